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

//! Per-file locality queries against a CephFS kernel mount.

use std::fs::File;
use std::io;
use std::os::unix::io::AsRawFd;
use std::path::Path;

use ceph_locality::{
    resolve_block_locations, BlockLocation, ByteRange, LocalityError, LocalityResult,
    LocationInfo, LocationSource, StripeLayout,
};
use log::debug;

use crate::ioctl;
use crate::util::osd_addr_to_host;

/// An open CephFS file used for data-location queries.
///
/// Wraps a read-only descriptor; the data-location ioctls need nothing
/// stronger. The descriptor is released when the value drops, on error
/// paths included.
#[derive(Debug)]
pub struct CephDataFile {
    file: File,
    path: String,
}

impl CephDataFile {
    /// Open `path` read-only for locality queries.
    pub fn open<P: AsRef<Path>>(path: P) -> LocalityResult<CephDataFile> {
        let path = path.as_ref();
        let file = File::open(path)
            .map_err(|e| LocalityError::io("open", path.display().to_string(), e))?;
        Ok(CephDataFile {
            file,
            path: path.display().to_string(),
        })
    }

    #[inline]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Current size of the file in bytes.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> LocalityResult<u64> {
        let meta = self
            .file
            .metadata()
            .map_err(|e| LocalityError::io("stat", self.path.clone(), e))?;
        Ok(meta.len())
    }

    /// Striping parameters of the file, from `CEPH_IOC_GET_LAYOUT`.
    ///
    /// Fails on any mount that is not a CephFS kernel mount.
    pub fn layout(&self) -> LocalityResult<StripeLayout> {
        let mut raw = ioctl::ceph_ioctl_layout::new();
        unsafe { ioctl::ceph_ioc_get_layout(self.file.as_raw_fd(), &mut raw) }.map_err(|e| {
            LocalityError::io(
                "ioctl(CEPH_IOC_GET_LAYOUT)",
                self.path.clone(),
                io::Error::from_raw_os_error(e as i32),
            )
        })?;
        debug!(
            "layout for {}: stripe_unit={} object_size={}",
            self.path, raw.stripe_unit, raw.object_size
        );
        StripeLayout::new(raw.stripe_unit, raw.object_size)
    }

    /// Host serving the stripe unit containing `offset`, from
    /// `CEPH_IOC_GET_DATALOC`. One host per block: the kernel reports the
    /// primary OSD only.
    pub fn locate(&self, offset: u64) -> LocalityResult<LocationInfo> {
        let mut dl = ioctl::ceph_ioctl_dataloc::for_offset(offset);
        unsafe { ioctl::ceph_ioc_get_dataloc(self.file.as_raw_fd(), &mut dl) }.map_err(|e| {
            LocalityError::io(
                "ioctl(CEPH_IOC_GET_DATALOC)",
                self.path.clone(),
                io::Error::from_raw_os_error(e as i32),
            )
        })?;

        match osd_addr_to_host(&dl.osd_addr) {
            Some(host) => Ok(LocationInfo {
                hosts: vec![host.to_string()],
            }),
            None => Err(LocalityError::Lookup {
                offset,
                msg: format!("unrecognized address family for osd {}", dl.osd),
            }),
        }
    }

    /// Resolve the block locations covering `[start, start + len)`.
    ///
    /// This is the Hadoop `getFileBlockLocations` contract: negative start
    /// or non-positive len is invalid, a start past end-of-file answers
    /// with no blocks, and any query failure fails the whole call. The
    /// layout is read once and the per-block lookups follow it; a file
    /// restriped in between yields stale placement.
    pub fn block_locations(&mut self, start: i64, len: i64) -> LocalityResult<Vec<BlockLocation>> {
        let range = ByteRange::new(start, len)?;
        let file_len = self.len()?;
        if file_len < range.start() {
            debug!(
                "{}: range start {} past end of file ({} bytes)",
                self.path,
                range.start(),
                file_len
            );
            return Ok(Vec::new());
        }
        let layout = self.layout()?;
        resolve_block_locations(range, layout, file_len, self)
    }
}

impl LocationSource for CephDataFile {
    fn locate(&mut self, offset: u64) -> LocalityResult<LocationInfo> {
        CephDataFile::locate(self, offset)
    }
}

/// One-shot convenience: open `path`, resolve, release the descriptor.
pub fn file_block_locations<P: AsRef<Path>>(
    path: P,
    start: i64,
    len: i64,
) -> LocalityResult<Vec<BlockLocation>> {
    let mut file = CephDataFile::open(path)?;
    file.block_locations(start, len)
}

/// Degraded answer for files that do not live on CephFS: the whole file as
/// a single block served by `localhost`, which is what Hadoop's local file
/// system reports. Argument validation and the past-end-of-file case
/// behave exactly as in [`CephDataFile::block_locations`].
pub fn localhost_block_locations(
    file_len: u64,
    start: i64,
    len: i64,
) -> LocalityResult<Vec<BlockLocation>> {
    let range = ByteRange::new(start, len)?;
    if file_len < range.start() {
        return Ok(Vec::new());
    }
    Ok(vec![BlockLocation {
        offset: 0,
        length: file_len,
        hosts: vec!["localhost".to_string()],
    }])
}

#[cfg(test)]
mod test {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_open_missing_file() {
        let err = CephDataFile::open("/nonexistent/part-00000").unwrap_err();
        match err {
            LocalityError::Io { op, .. } => assert_eq!(op, "open"),
            other => panic!("expected Io error, got {other:?}"),
        }
    }

    #[test]
    fn test_invalid_arguments_rejected_before_any_query() {
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        tmp.write_all(b"0123456789").unwrap();

        let mut file = CephDataFile::open(tmp.path()).unwrap();
        assert!(matches!(
            file.block_locations(-1, 10),
            Err(LocalityError::InvalidArgument(_))
        ));
        assert!(matches!(
            file.block_locations(0, 0),
            Err(LocalityError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_start_past_eof_short_circuits_before_layout_ioctl() {
        // the tempfile is not on CephFS, so reaching the layout ioctl
        // would fail; an empty answer proves the length check runs first
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        tmp.write_all(b"0123456789").unwrap();

        let mut file = CephDataFile::open(tmp.path()).unwrap();
        let blocks = file.block_locations(100, 10).unwrap();
        assert!(blocks.is_empty());
    }

    #[test]
    fn test_layout_fails_off_cephfs() {
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        tmp.write_all(b"0123456789").unwrap();

        let file = CephDataFile::open(tmp.path()).unwrap();
        match file.layout().unwrap_err() {
            LocalityError::Io { op, .. } => assert_eq!(op, "ioctl(CEPH_IOC_GET_LAYOUT)"),
            other => panic!("expected Io error, got {other:?}"),
        }
    }

    #[test]
    fn test_localhost_fallback() {
        let blocks = localhost_block_locations(1000, 10, 50).unwrap();
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].offset, 0);
        assert_eq!(blocks[0].length, 1000);
        assert_eq!(blocks[0].hosts, vec!["localhost".to_string()]);

        assert!(localhost_block_locations(5, 10, 1).unwrap().is_empty());
        assert!(localhost_block_locations(1000, 0, 0).is_err());
    }
}
