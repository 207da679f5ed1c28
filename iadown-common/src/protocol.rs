// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Control-port protocol for `:MMEMory:DOWNload` inverse assembler uploads.
//!
//! The instrument accepts SCPI-style text commands on its telnet control port.
//! A download is a single command whose last field is a definite-length
//! binary block (`#8nnnnnnnn`), followed by the block bytes and a line feed.

use core::fmt;

use crate::error::HeaderError;
use crate::fields::{Description, RemoteName};

// --- Connection ---

/// Telnet control port of the 1660/1670 series analyzers.
pub const CONTROL_PORT: u16 = 5025;

/// Send and receive timeout for the control connection.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Identification query, sent once to confirm the link.
pub const ID_QUERY: &[u8] = b"*IDN?\r\n";

/// Largest identification response read back.
pub const ID_RESPONSE_MAX: usize = 100;

// --- Download command ---

/// Payload is streamed in blocks of this size.
pub const FILE_CHUNK_SIZE: usize = 10_000;

/// File type code for inverse assembler files.
pub const INVASM_FILE_TYPE: i32 = -15614;

/// Number of decimal digits in the block length field.
pub const BLOCK_LEN_DIGITS: usize = 8;

/// Largest block length that fits in the length field.
pub const MAX_BLOCK_LEN: u64 = 99_999_999;

/// Size of the instrument's command buffer, including the trailing NUL.
pub const MAX_HEADER_LEN: usize = 100;

/// Byte ending the payload section.
pub const TRAILER: u8 = b'\n';

// --- Field limits ---

pub const MAX_DESCRIPTION_LEN: usize = 32;
pub const MAX_NAME_LEN: usize = 12; // DOS: NNNNNNNN.NNN
pub const MAX_PLAIN_NAME_LEN: usize = 11; // LIF: NNNNNNNNNNN
pub const MAX_NAME_PREFIX_LEN: usize = 8;

pub const DEFAULT_DESCRIPTION: &str = "Inverse Assembler";

/// Destination storage on the instrument.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Medium {
    /// Internal hard disk.
    #[default]
    Internal,
    /// Floppy drive.
    Floppy,
}

impl Medium {
    pub fn from_floppy_flag(floppy: bool) -> Self {
        if floppy {
            Medium::Floppy
        } else {
            Medium::Internal
        }
    }

    /// Digit following `internal` in the download command.
    pub fn selector(self) -> u8 {
        match self {
            Medium::Internal => 0,
            Medium::Floppy => 1,
        }
    }
}

impl fmt::Display for Medium {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Medium::Internal => f.write_str("hard"),
            Medium::Floppy => f.write_str("floppy"),
        }
    }
}

/// Length of the binary block announced for a source file of `file_size` bytes.
///
/// The block carries one NUL (the Invasm field option) ahead of the file
/// contents, so it is one byte longer than the file.
pub fn block_len(file_size: u64) -> Result<u64, HeaderError> {
    match file_size.checked_add(1) {
        Some(len) if len <= MAX_BLOCK_LEN => Ok(len),
        _ => Err(HeaderError::PayloadTooLarge { file_size }),
    }
}

/// The `:mmemory:download` command announcing an upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadHeader {
    text: String,
    block_len: u64,
}

impl DownloadHeader {
    /// Frame the download command for a source file of `file_size` bytes.
    pub fn new(
        name: &RemoteName,
        medium: Medium,
        description: &Description,
        file_size: u64,
    ) -> Result<Self, HeaderError> {
        Self::with_max_len(name, medium, description, file_size, MAX_HEADER_LEN)
    }

    /// Like [`DownloadHeader::new`], for an instrument whose command buffer
    /// holds `max_len` bytes including the trailing NUL.
    pub fn with_max_len(
        name: &RemoteName,
        medium: Medium,
        description: &Description,
        file_size: u64,
        max_len: usize,
    ) -> Result<Self, HeaderError> {
        let block_len = block_len(file_size)?;
        let text = format!(
            ":mmemory:download '{}',internal{},'{}',{},#{}{:0width$}",
            name,
            medium.selector(),
            description,
            INVASM_FILE_TYPE,
            BLOCK_LEN_DIGITS,
            block_len,
            width = BLOCK_LEN_DIGITS,
        );

        let len = text.len() + 1;
        if len > max_len {
            return Err(HeaderError::TooLong { len, max: max_len });
        }

        Ok(Self { text, block_len })
    }

    /// Command text, without the trailing NUL.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Value of the `#8` block length field.
    pub fn block_len(&self) -> u64 {
        self.block_len
    }

    /// Bytes sent on the wire: the command text followed by one NUL.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.text.len() + 1);
        bytes.extend_from_slice(self.text.as_bytes());
        bytes.push(0);
        bytes
    }
}

impl fmt::Display for DownloadHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\\0", self.text)
    }
}
