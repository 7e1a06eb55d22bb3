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

//! fs-cephfs queries data locality from a CephFS kernel mount.
//!
//! The Ceph kernel client exposes a file's striping layout and the OSD
//! serving any given offset through two ioctls, `CEPH_IOC_GET_LAYOUT` and
//! `CEPH_IOC_GET_DATALOC`. This crate wraps them behind
//! [`file::CephDataFile`], which feeds the pure resolver in
//! `ceph-locality` to answer Hadoop-style "which hosts serve these bytes"
//! queries.
//!
//! The queried path must live on a CephFS kernel mount; on any other file
//! system the layout ioctl fails (typically `ENOTTY`) and the error names
//! the call that failed. [`file::localhost_block_locations`] is the
//! degraded answer for such mounts.
//!
//! ## Example
//!
//! ```ignore
//! use fs_cephfs::file::CephDataFile;
//!
//! let mut file = CephDataFile::open("/mnt/ceph/data/part-00000")?;
//! for block in file.block_locations(0, 1 << 26)? {
//!     println!("{}..{} on {:?}", block.offset, block.offset + block.length, block.hosts);
//! }
//! ```
//!
//! Locality answers are advisory. The layout is read once per query and
//! the per-block lookups follow it; a file restriped in between yields
//! stale placement, not an error.

#![allow(non_camel_case_types)]

pub mod file;
mod ioctl;
pub mod util;
