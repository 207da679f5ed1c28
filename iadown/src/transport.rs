// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! TCP transport to the logic analyzer's control port.

use std::io::{ErrorKind, Read, Write};
use std::net::{SocketAddr, TcpStream};
use std::time::Duration;

use anyhow::{bail, Context, Result};
use tracing::debug;

use iadown_common::protocol::{ID_QUERY, ID_RESPONSE_MAX, TRAILER};
use iadown_common::DownloadHeader;

/// Control connection to one instrument.
///
/// The underlying stream is closed when the transport is dropped.
pub struct Transport<S = TcpStream> {
    stream: S,
    peer: String,
}

impl Transport<TcpStream> {
    /// Connect to the instrument, bounding connect, send and receive by `timeout`.
    pub fn connect(addr: SocketAddr, timeout: Duration) -> Result<Self> {
        debug!("connecting to {}", addr);
        let stream = TcpStream::connect_timeout(&addr, timeout)
            .with_context(|| format!("Connection error to {}", addr))?;

        stream
            .set_read_timeout(Some(timeout))
            .context("Failed to set receive timeout")?;
        stream
            .set_write_timeout(Some(timeout))
            .context("Failed to set send timeout")?;

        Ok(Self::from_stream(stream, addr.to_string()))
    }
}

impl<S: Read + Write> Transport<S> {
    /// Wrap an already open stream.
    pub fn from_stream(stream: S, peer: impl Into<String>) -> Self {
        Self {
            stream,
            peer: peer.into(),
        }
    }

    /// Get the peer address.
    pub fn peer(&self) -> &str {
        &self.peer
    }

    /// Send `*IDN?` and return whatever comes back in one read.
    ///
    /// The response only confirms the instrument is listening; its content
    /// is not checked.
    pub fn identify(&mut self) -> Result<String> {
        debug!("-> {:?}", String::from_utf8_lossy(ID_QUERY));
        self.write(ID_QUERY)
            .context("Error checking *IDN? from logic analyzer")?;

        let mut buf = [0u8; ID_RESPONSE_MAX];
        let len = loop {
            match self.stream.read(&mut buf) {
                Ok(0) => bail!("Connection closed by {} before *IDN? response", self.peer),
                Ok(len) => break len,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) if matches!(e.kind(), ErrorKind::TimedOut | ErrorKind::WouldBlock) => {
                    bail!("Timeout waiting for *IDN? response from {}", self.peer)
                }
                Err(e) => {
                    return Err(e).context("Error checking *IDN? from logic analyzer");
                }
            }
        };

        let response = String::from_utf8_lossy(&buf[..len])
            .trim_end_matches(&['\r', '\n', '\0'][..])
            .to_string();
        debug!("<- {:?}", response);
        Ok(response)
    }

    /// Send the download command, including its trailing NUL.
    pub fn send_header(&mut self, header: &DownloadHeader) -> Result<()> {
        debug!("header: \"{}\"", header);
        self.write(&header.to_bytes())
            .context("Error sending download header")
    }

    /// Send one block of file contents.
    pub fn send_payload(&mut self, chunk: &[u8]) -> Result<()> {
        debug!("-> {} payload bytes", chunk.len());
        self.write(chunk).context("Error sending file data")
    }

    /// Send the line feed closing the binary block.
    pub fn send_trailer(&mut self) -> Result<()> {
        debug!("-> trailer {:?}", TRAILER as char);
        self.write(&[TRAILER]).context("Error sending trailing LF")
    }

    fn write(&mut self, bytes: &[u8]) -> std::io::Result<()> {
        self.stream.write_all(bytes)?;
        self.stream.flush()
    }

    #[cfg(test)]
    pub(crate) fn into_inner(self) -> S {
        self.stream
    }
}
