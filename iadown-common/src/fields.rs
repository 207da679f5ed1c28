// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Validated text fields of the download command.
//!
//! Both fields end up between single quotes in the command, and the
//! instrument only deals in ASCII, so lengths are counted in bytes.

use core::fmt;
use core::str::FromStr;

use crate::error::{DescriptionError, NameError};
use crate::protocol::{
    DEFAULT_DESCRIPTION, MAX_DESCRIPTION_LEN, MAX_NAME_LEN, MAX_NAME_PREFIX_LEN,
    MAX_PLAIN_NAME_LEN,
};

fn is_field_char(c: char) -> bool {
    (c.is_ascii_graphic() || c == ' ') && c != '\''
}

/// File name on the analyzer.
///
/// Up to 11 characters for a LIF name (`NNNNNNNNNNN`) or 12 for a DOS name
/// (`NNNNNNNN.NNN`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteName(String);

impl RemoteName {
    pub fn parse(name: &str) -> Result<Self, NameError> {
        if name.is_empty() {
            return Err(NameError::Empty);
        }
        if let Some(c) = name.chars().find(|&c| !is_field_char(c) || c == ' ') {
            return Err(NameError::InvalidChar(c));
        }

        let len = name.len();
        if len > MAX_NAME_LEN {
            return Err(NameError::TooLong { len });
        }
        match name.find('.') {
            Some(prefix) if prefix > MAX_NAME_PREFIX_LEN => {
                Err(NameError::PrefixTooLong { len: prefix })
            }
            None if len > MAX_PLAIN_NAME_LEN => Err(NameError::PlainTooLong { len }),
            _ => Ok(Self(name.to_string())),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for RemoteName {
    type Err = NameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for RemoteName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Descriptive string shown next to the file in the analyzer's file manager.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Description(String);

impl Description {
    pub fn parse(description: &str) -> Result<Self, DescriptionError> {
        if let Some(c) = description.chars().find(|&c| !is_field_char(c)) {
            return Err(DescriptionError::InvalidChar(c));
        }
        let len = description.len();
        if len > MAX_DESCRIPTION_LEN {
            return Err(DescriptionError::TooLong { len });
        }
        Ok(Self(description.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Description {
    fn default() -> Self {
        Self(DEFAULT_DESCRIPTION.to_string())
    }
}

impl FromStr for Description {
    type Err = DescriptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Description {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
