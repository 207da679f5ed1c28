// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Error types for download request fields and header framing.

use thiserror::Error;

use crate::protocol::{
    MAX_BLOCK_LEN, MAX_DESCRIPTION_LEN, MAX_NAME_LEN, MAX_NAME_PREFIX_LEN, MAX_PLAIN_NAME_LEN,
};

/// Rejected remote file name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NameError {
    #[error("file name must not be empty")]
    Empty,

    /// Quotes would terminate the quoted field inside the download command.
    #[error("file name contains invalid character {0:?}")]
    InvalidChar(char),

    #[error("file name is {len} characters, at most {} allowed", MAX_NAME_LEN)]
    TooLong { len: usize },

    #[error(
        "file name has {len} characters before the '.', at most {} allowed",
        MAX_NAME_PREFIX_LEN
    )]
    PrefixTooLong { len: usize },

    #[error(
        "file name without an extension is {len} characters, at most {} allowed",
        MAX_PLAIN_NAME_LEN
    )]
    PlainTooLong { len: usize },
}

/// Rejected file description.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DescriptionError {
    #[error("description is {len} characters, at most {} allowed", MAX_DESCRIPTION_LEN)]
    TooLong { len: usize },

    #[error("description contains invalid character {0:?}")]
    InvalidChar(char),
}

/// Download header could not be framed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HeaderError {
    /// The block length field has room for eight decimal digits only.
    #[error(
        "file of {file_size} bytes is too large, block length is limited to {} bytes",
        MAX_BLOCK_LEN
    )]
    PayloadTooLarge { file_size: u64 },

    #[error("download command is {len} bytes, instrument accepts at most {max}")]
    TooLong { len: usize, max: usize },
}
