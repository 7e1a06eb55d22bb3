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

//! Block-locality resolution for striped files.
//!
//! Hadoop-style schedulers place computation next to data by asking the
//! file system which hosts serve each region of a file. For a file striped
//! across a storage cluster that answer is computed, not stored: a byte
//! range is cut at stripe-unit boundaries and the host serving each
//! resulting block is looked up individually.
//!
//! This crate holds the pure half of that computation: the layout and
//! range types, and [`resolve_block_locations`], which walks a byte range
//! and asks a [`LocationSource`] for the host(s) behind each block. It
//! performs no I/O of its own; the `fs-cephfs` crate supplies a
//! `LocationSource` backed by the Ceph kernel client's ioctls.

pub mod errors;
mod layout;
mod resolver;

pub use errors::{LocalityError, LocalityResult};
pub use layout::{BlockLocation, ByteRange, StripeLayout};
pub use resolver::{resolve_block_locations, LocationInfo, LocationSource};
