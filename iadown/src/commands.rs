// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Upload of an inverse assembler file over an open control connection.

use std::fs::File;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use crc::{Crc, CRC_32_ISO_HDLC};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::debug;

use iadown_common::protocol::FILE_CHUNK_SIZE;
use iadown_common::DownloadHeader;

use crate::transport::Transport;

const CRC32: Crc<u32> = Crc::<u32>::new(&CRC_32_ISO_HDLC);

/// Local `.R` file, opened with its size taken from metadata.
///
/// The size is captured once, before any network traffic, and is what the
/// download header announces.
pub struct SourceFile {
    path: PathBuf,
    file: File,
    size: u64,
}

impl SourceFile {
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("Cannot find / open file: {}", path.display()))?;
        let size = file
            .metadata()
            .with_context(|| format!("Cannot read size of {}", path.display()))?
            .len();
        debug!("Input file {} is {} bytes in size", path.display(), size);

        Ok(Self {
            path: path.to_path_buf(),
            file,
            size,
        })
    }

    pub fn size(&self) -> u64 {
        self.size
    }
}

/// Outcome of a completed payload transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadSummary {
    pub bytes_sent: u64,
    pub crc32: u32,
}

/// Identify the instrument, send the download header and stream the file.
pub fn upload<S: Read + Write>(
    transport: &mut Transport<S>,
    header: &DownloadHeader,
    source: SourceFile,
) -> Result<UploadSummary> {
    let id = transport.identify()?;
    println!("{}", id);

    println!("File:     {} ({} bytes)", source.path.display(), source.size);
    println!("Target:   {}", transport.peer());
    println!();

    transport.send_header(header)?;

    let pb = ProgressBar::new(source.size);
    pb.set_style(
        ProgressStyle::default_bar()
            .template(
                "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {bytes}/{total_bytes} ({eta})",
            )?
            .progress_chars("#>-"),
    );

    let result = stream_payload(transport, source.file, source.size, &pb);
    match &result {
        Ok(_) => pb.finish_with_message("Upload complete"),
        Err(_) => pb.abandon(),
    }
    let summary = result?;

    println!();
    println!(
        "Inverse assembler uploaded successfully ({} bytes, CRC32: 0x{:08x})",
        summary.bytes_sent, summary.crc32
    );

    Ok(summary)
}

/// Stream `reader` as the payload, then the trailer, then check the count.
///
/// Reading stops after the first chunk that comes back short. The trailer is
/// sent before the count is checked, so the instrument always sees a closed
/// block.
pub fn stream_payload<S: Read + Write, R: Read>(
    transport: &mut Transport<S>,
    mut reader: R,
    expected: u64,
    pb: &ProgressBar,
) -> Result<UploadSummary> {
    let mut buf = vec![0u8; FILE_CHUNK_SIZE];
    let mut digest = CRC32.digest();
    let mut total = 0u64;

    loop {
        let len = read_chunk(&mut reader, &mut buf).context("Error reading source file")?;
        if len > 0 {
            transport.send_payload(&buf[..len])?;
            digest.update(&buf[..len]);
            total += len as u64;
            pb.set_position(total);
        }
        if len < FILE_CHUNK_SIZE {
            break;
        }
    }

    transport.send_trailer()?;

    if total != expected {
        bail!("Short file read: {} of {} bytes", total, expected);
    }

    let summary = UploadSummary {
        bytes_sent: total,
        crc32: digest.finalize(),
    };
    debug!(
        "sent {} payload bytes, CRC32 0x{:08x}",
        summary.bytes_sent, summary.crc32
    );
    Ok(summary)
}

/// Fill `buf` from `reader`, returning less than `buf.len()` only at EOF.
fn read_chunk<R: Read>(reader: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(len) => filled += len,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}
