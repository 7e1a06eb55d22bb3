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

//! Errors surfaced by locality resolution.

use thiserror::Error;

/// Errors which can occur while resolving block locations.
///
/// Any failure aborts the resolution it occurred in; there are no retries
/// and no partial results.
#[derive(Error, Debug)]
pub enum LocalityError {
    /// The caller's range or layout parameters are unusable.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// An operation against the backing file system failed. `op` names the
    /// call that failed so the caller can tell an open failure from a
    /// layout query failure.
    #[error("{op} failed for {path}: {source}")]
    Io {
        op: &'static str,
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The backing store answered, but no serving host could be determined
    /// for the block starting at `offset`.
    #[error("Block location lookup failed at offset {offset}: {msg}")]
    Lookup { offset: u64, msg: String },
}

pub type LocalityResult<T> = Result<T, LocalityError>;

impl LocalityError {
    /// Shorthand constructor for the `Io` variant.
    pub fn io(op: &'static str, path: impl Into<String>, source: std::io::Error) -> Self {
        LocalityError::Io {
            op,
            path: path.into(),
            source,
        }
    }
}
