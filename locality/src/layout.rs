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

//! Striping layout and byte-range types.

use crate::errors::{LocalityError, LocalityResult};

/// How a file's bytes are divided across the storage cluster.
///
/// Immutable per file. `stripe_unit` is the granularity at which
/// consecutive file bytes switch to a different storage object, and hence
/// the granularity at which locality can change; `object_size` is the full
/// size of each backing object and is always a whole number of stripe
/// units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StripeLayout {
    stripe_unit: u64,
    object_size: u64,
}

impl StripeLayout {
    pub fn new(stripe_unit: u64, object_size: u64) -> LocalityResult<StripeLayout> {
        if stripe_unit == 0 {
            return Err(LocalityError::InvalidArgument(
                "stripe unit must be positive".to_string(),
            ));
        }
        if object_size != 0 && object_size % stripe_unit != 0 {
            return Err(LocalityError::InvalidArgument(format!(
                "object size {object_size} is not a multiple of stripe unit {stripe_unit}"
            )));
        }
        Ok(StripeLayout {
            stripe_unit,
            object_size,
        })
    }

    #[inline]
    pub fn stripe_unit(&self) -> u64 {
        self.stripe_unit
    }

    #[inline]
    pub fn object_size(&self) -> u64 {
        self.object_size
    }

    /// Largest stripe boundary at or below `offset`.
    #[inline]
    pub fn stripe_floor(&self, offset: u64) -> u64 {
        offset - offset % self.stripe_unit
    }

    /// Stripe boundary strictly above `offset`. An offset sitting exactly
    /// on a boundary belongs to the stripe unit that starts there, so its
    /// ceiling is one full stripe unit away.
    #[inline]
    pub fn stripe_ceil(&self, offset: u64) -> u64 {
        offset + self.stripe_unit - offset % self.stripe_unit
    }
}

/// A caller's byte-range query, already validated.
///
/// Constructed from the signed `(start, len)` pair a Hadoop caller hands
/// over; negative start and non-positive length are rejected up front so
/// the resolver only ever sees a non-empty range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ByteRange {
    start: u64,
    length: u64,
}

impl ByteRange {
    pub fn new(start: i64, len: i64) -> LocalityResult<ByteRange> {
        if start < 0 {
            return Err(LocalityError::InvalidArgument(format!(
                "start must be non-negative, got {start}"
            )));
        }
        if len <= 0 {
            return Err(LocalityError::InvalidArgument(format!(
                "len must be positive, got {len}"
            )));
        }
        Ok(ByteRange {
            start: start as u64,
            length: len as u64,
        })
    }

    #[inline]
    pub fn start(&self) -> u64 {
        self.start
    }

    #[inline]
    pub fn length(&self) -> u64 {
        self.length
    }

    /// First byte past the range. Cannot overflow: both halves came in as
    /// non-negative `i64`s.
    #[inline]
    pub fn end(&self) -> u64 {
        self.start + self.length
    }
}

/// One resolved block: a contiguous run of file bytes within a single
/// stripe unit, annotated with the host(s) serving it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockLocation {
    pub offset: u64,
    pub length: u64,
    pub hosts: Vec<String>,
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_layout_rejects_zero_stripe_unit() {
        assert!(matches!(
            StripeLayout::new(0, 1 << 22),
            Err(LocalityError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_layout_rejects_misaligned_object_size() {
        assert!(StripeLayout::new(4096, 4096 * 4).is_ok());
        assert!(StripeLayout::new(4096, 10000).is_err());
        // object size unknown/unreported is accepted
        assert!(StripeLayout::new(4096, 0).is_ok());
    }

    #[test]
    fn test_stripe_boundaries() {
        let layout = StripeLayout::new(4096, 0).unwrap();
        assert_eq!(layout.stripe_floor(4000), 0);
        assert_eq!(layout.stripe_floor(4096), 4096);
        assert_eq!(layout.stripe_ceil(4000), 4096);
        // an offset on a boundary extends one full stripe unit
        assert_eq!(layout.stripe_ceil(4096), 8192);
        assert_eq!(layout.stripe_ceil(0), 4096);
    }

    #[test]
    fn test_range_rejects_negative_start() {
        assert!(matches!(
            ByteRange::new(-1, 100),
            Err(LocalityError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_range_rejects_non_positive_len() {
        assert!(ByteRange::new(0, 0).is_err());
        assert!(ByteRange::new(0, -5).is_err());
    }

    #[test]
    fn test_range_end() {
        let range = ByteRange::new(4000, 200).unwrap();
        assert_eq!(range.start(), 4000);
        assert_eq!(range.length(), 200);
        assert_eq!(range.end(), 4200);
    }
}
