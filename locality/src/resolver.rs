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

//! Maps a byte range onto the stripe-unit blocks covering it.

use log::debug;

use crate::errors::LocalityResult;
use crate::layout::{BlockLocation, ByteRange, StripeLayout};

/// Answer to a single per-offset location query: the host(s) serving the
/// stripe unit containing that offset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationInfo {
    pub hosts: Vec<String>,
}

/// Capability to resolve the serving host(s) for the stripe unit
/// containing a file offset.
///
/// This is the seam between the pure range arithmetic and the backing
/// store; `fs-cephfs` implements it over the kernel client's data-location
/// ioctl. Takes `&mut self` because a lookup typically drives an open file
/// handle.
pub trait LocationSource {
    fn locate(&mut self, offset: u64) -> LocalityResult<LocationInfo>;
}

impl<F> LocationSource for F
where
    F: FnMut(u64) -> LocalityResult<LocationInfo>,
{
    fn locate(&mut self, offset: u64) -> LocalityResult<LocationInfo> {
        self(offset)
    }
}

/// Resolve the ordered sequence of blocks covering `range`.
///
/// Blocks are cut at stripe-unit boundaries: the first block runs from
/// `range.start()` to the next boundary (a start sitting exactly on a
/// boundary gets a full stripe unit), every later block starts on a
/// boundary, and the last is clipped to the end of the range. The result
/// is sorted by offset with no gaps and no overlaps, covering exactly
/// `[range.start(), range.end())`.
///
/// A range starting at or past `file_len` is answered with an empty vector
/// rather than an error; the file simply has no data there to be local to.
/// Any `locate` failure aborts the whole resolution; callers never see a
/// partial block list.
pub fn resolve_block_locations<S: LocationSource + ?Sized>(
    range: ByteRange,
    layout: StripeLayout,
    file_len: u64,
    source: &mut S,
) -> LocalityResult<Vec<BlockLocation>> {
    if file_len < range.start() {
        debug!(
            "range start {} past end of file ({} bytes), no blocks",
            range.start(),
            file_len
        );
        return Ok(Vec::new());
    }

    let offset_end = range.end();
    // Block count over the stripe-aligned span. Enumeration below starts at
    // the raw range start, so this is a capacity hint, not a loop bound;
    // the two must still agree when the walk finishes.
    let aligned_len = offset_end - layout.stripe_floor(range.start());
    let num_blocks = aligned_len.div_ceil(layout.stripe_unit());
    debug!(
        "resolving [{}, {}) with stripe unit {}: {} block(s)",
        range.start(),
        offset_end,
        layout.stripe_unit(),
        num_blocks
    );

    let mut blocks = Vec::with_capacity(num_blocks as usize);
    let mut block_start = range.start();
    while block_start < offset_end {
        let block_end = offset_end.min(layout.stripe_ceil(block_start));
        let info = source.locate(block_start)?;
        blocks.push(BlockLocation {
            offset: block_start,
            length: block_end - block_start,
            hosts: info.hosts,
        });
        block_start = block_end;
    }

    debug_assert_eq!(blocks.len() as u64, num_blocks);
    Ok(blocks)
}
