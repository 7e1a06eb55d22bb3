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

//! OSD address decoding.

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

use libc::{sockaddr_in, sockaddr_in6, sockaddr_storage, AF_INET, AF_INET6};

/// Numeric host address of an OSD, decoded from the `sockaddr_storage` the
/// data-location ioctl reports.
///
/// Only the address families the Ceph messenger uses are understood;
/// anything else yields `None` and the caller reports the block as
/// unresolvable. Addresses are rendered numerically, never via reverse
/// DNS, matching what schedulers compare against worker addresses.
pub fn osd_addr_to_host(addr: &sockaddr_storage) -> Option<IpAddr> {
    match addr.ss_family as libc::c_int {
        AF_INET => {
            let sin = unsafe { &*(addr as *const sockaddr_storage as *const sockaddr_in) };
            Some(IpAddr::V4(Ipv4Addr::from(u32::from_be(sin.sin_addr.s_addr))))
        }
        AF_INET6 => {
            let sin6 = unsafe { &*(addr as *const sockaddr_storage as *const sockaddr_in6) };
            Some(IpAddr::V6(Ipv6Addr::from(sin6.sin6_addr.s6_addr)))
        }
        _ => None,
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::mem::zeroed;

    fn v4_storage(octets: [u8; 4]) -> sockaddr_storage {
        let mut storage: sockaddr_storage = unsafe { zeroed() };
        let sin = &mut storage as *mut sockaddr_storage as *mut sockaddr_in;
        unsafe {
            (*sin).sin_family = AF_INET as libc::sa_family_t;
            (*sin).sin_addr.s_addr = u32::from_be_bytes(octets).to_be();
        }
        storage
    }

    fn v6_storage(segments: [u16; 8]) -> sockaddr_storage {
        let mut storage: sockaddr_storage = unsafe { zeroed() };
        let sin6 = &mut storage as *mut sockaddr_storage as *mut sockaddr_in6;
        let ip = Ipv6Addr::from(segments);
        unsafe {
            (*sin6).sin6_family = AF_INET6 as libc::sa_family_t;
            (*sin6).sin6_addr.s6_addr = ip.octets();
        }
        storage
    }

    #[test]
    fn test_decode_v4() {
        let addr = v4_storage([10, 20, 30, 40]);
        assert_eq!(
            osd_addr_to_host(&addr),
            Some(IpAddr::V4(Ipv4Addr::new(10, 20, 30, 40)))
        );
    }

    #[test]
    fn test_decode_v6() {
        let addr = v6_storage([0xfd00, 0, 0, 0, 0, 0, 0, 1]);
        assert_eq!(
            osd_addr_to_host(&addr),
            Some("fd00::1".parse::<IpAddr>().unwrap())
        );
    }

    #[test]
    fn test_unknown_family() {
        let storage: sockaddr_storage = unsafe { zeroed() };
        // family 0 is AF_UNSPEC
        assert_eq!(osd_addr_to_host(&storage), None);
    }
}
