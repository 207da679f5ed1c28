// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Common types for uploading inverse assemblers to HP logic analyzers.
//!
//! - [`fields`]: validated remote file name and description
//! - [`protocol`]: control-port constants and the download header

pub mod error;
pub mod fields;
pub mod protocol;

// Re-export commonly used types
pub use error::{DescriptionError, HeaderError, NameError};
pub use fields::{Description, RemoteName};
pub use protocol::{block_len, DownloadHeader, Medium};
pub use protocol::{CONTROL_PORT, DEFAULT_TIMEOUT_SECS, FILE_CHUNK_SIZE, ID_QUERY, ID_RESPONSE_MAX};
