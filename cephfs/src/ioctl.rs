// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

//! Raw ioctl interface of the Ceph kernel client.
//!
//! Struct layout and request numbers follow the kernel's
//! `include/linux/ceph/ioctl.h`; field names are kept kernel-style so they
//! can be checked against it line by line.

use std::mem::zeroed;

use libc::sockaddr_storage;
use nix::{ioctl_read, ioctl_readwrite};

pub const CEPH_IOCTL_MAGIC: u8 = 0x97;

/// Striping parameters of one file.
#[repr(C)]
pub struct ceph_ioctl_layout {
    pub stripe_unit: u64,
    pub stripe_count: u64,
    pub object_size: u64,
    pub data_pool: u64,
    /// obsolete in the kernel interface; reads back as -1
    pub preferred_osd: i64,
}

impl ceph_ioctl_layout {
    pub fn new() -> Self {
        unsafe { zeroed() }
    }
}

/// Data location of the stripe unit containing `file_offset`.
///
/// `file_offset` is the only input field; the kernel fills in the rest,
/// including the address of the primary OSD serving that stripe unit.
#[repr(C)]
pub struct ceph_ioctl_dataloc {
    pub file_offset: u64,
    pub object_offset: u64,
    pub object_no: u64,
    pub object_size: u64,
    pub object_name: [libc::c_char; 64],
    pub block_offset: u64,
    pub block_size: u64,
    pub osd: i64,
    pub osd_addr: sockaddr_storage,
}

impl ceph_ioctl_dataloc {
    pub fn for_offset(offset: u64) -> Self {
        let mut dl: Self = unsafe { zeroed() };
        dl.file_offset = offset;
        dl
    }
}

ioctl_read!(ceph_ioc_get_layout, CEPH_IOCTL_MAGIC, 1, ceph_ioctl_layout);
ioctl_readwrite!(ceph_ioc_get_dataloc, CEPH_IOCTL_MAGIC, 3, ceph_ioctl_dataloc);

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_dataloc_carries_requested_offset() {
        let dl = ceph_ioctl_dataloc::for_offset(12345);
        assert_eq!(dl.file_offset, 12345);
        assert_eq!(dl.osd, 0);
    }

    #[test]
    fn test_layout_struct_size() {
        // five 64-bit fields, no padding; a mismatch here means the kernel
        // would scribble past the struct
        assert_eq!(std::mem::size_of::<ceph_ioctl_layout>(), 40);
    }
}
