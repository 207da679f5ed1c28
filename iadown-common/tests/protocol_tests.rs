// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Unit tests for protocol constants and download header framing.

use iadown_common::protocol::{
    block_len, DownloadHeader, Medium, BLOCK_LEN_DIGITS, CONTROL_PORT, DEFAULT_TIMEOUT_SECS,
    FILE_CHUNK_SIZE, ID_QUERY, ID_RESPONSE_MAX, INVASM_FILE_TYPE, MAX_BLOCK_LEN, MAX_HEADER_LEN,
    TRAILER,
};
use iadown_common::{Description, HeaderError, RemoteName};

fn name(s: &str) -> RemoteName {
    RemoteName::parse(s).unwrap()
}

fn description(s: &str) -> Description {
    Description::parse(s).unwrap()
}

// --- Constants ---

#[test]
fn test_control_port() {
    assert_eq!(CONTROL_PORT, 5025);
}

#[test]
fn test_id_query_is_crlf_terminated() {
    assert_eq!(ID_QUERY, b"*IDN?\r\n");
}

#[test]
fn test_transfer_sizes() {
    assert_eq!(ID_RESPONSE_MAX, 100);
    assert_eq!(FILE_CHUNK_SIZE, 10_000);
    assert_eq!(MAX_HEADER_LEN, 100);
    assert_eq!(DEFAULT_TIMEOUT_SECS, 10);
}

#[test]
fn test_trailer_is_line_feed() {
    assert_eq!(TRAILER, 0x0A);
}

#[test]
fn test_max_block_len_fills_length_field() {
    assert_eq!(MAX_BLOCK_LEN.to_string().len(), BLOCK_LEN_DIGITS);
    assert_eq!((MAX_BLOCK_LEN + 1).to_string().len(), BLOCK_LEN_DIGITS + 1);
}

// --- Medium ---

#[test]
fn test_medium_selector() {
    assert_eq!(Medium::Internal.selector(), 0);
    assert_eq!(Medium::Floppy.selector(), 1);
}

#[test]
fn test_medium_from_flag() {
    assert_eq!(Medium::from_floppy_flag(false), Medium::Internal);
    assert_eq!(Medium::from_floppy_flag(true), Medium::Floppy);
    assert_eq!(Medium::default(), Medium::Internal);
}

// --- Block length ---

#[test]
fn test_block_len_counts_leading_null() {
    assert_eq!(block_len(0).unwrap(), 1);
    assert_eq!(block_len(1234).unwrap(), 1235);
}

#[test]
fn test_block_len_upper_bound() {
    assert_eq!(block_len(MAX_BLOCK_LEN - 1).unwrap(), MAX_BLOCK_LEN);
    assert_eq!(
        block_len(MAX_BLOCK_LEN),
        Err(HeaderError::PayloadTooLarge {
            file_size: MAX_BLOCK_LEN
        })
    );
}

#[test]
fn test_block_len_does_not_overflow() {
    assert!(block_len(u64::MAX).is_err());
}

// --- Download header ---

#[test]
fn test_header_text() {
    let header = DownloadHeader::new(
        &name("I6809"),
        Medium::Internal,
        &description("MC6809 Inverse Assembler"),
        1234,
    )
    .unwrap();

    assert_eq!(
        header.text(),
        ":mmemory:download 'I6809',internal0,'MC6809 Inverse Assembler',-15614,#800001235"
    );
    assert_eq!(header.block_len(), 1235);
}

#[test]
fn test_header_floppy_selector() {
    let header =
        DownloadHeader::new(&name("I8085.R"), Medium::Floppy, &Description::default(), 9).unwrap();

    assert_eq!(
        header.text(),
        ":mmemory:download 'I8085.R',internal1,'Inverse Assembler',-15614,#800000010"
    );
}

#[test]
fn test_header_bytes_end_with_single_null() {
    let header =
        DownloadHeader::new(&name("IZ80"), Medium::Internal, &Description::default(), 0).unwrap();
    let bytes = header.to_bytes();

    assert_eq!(bytes.len(), header.text().len() + 1);
    assert_eq!(bytes.last(), Some(&0));
    assert_eq!(bytes.iter().filter(|&&b| b == 0).count(), 1);
    assert!(bytes.ends_with(b"#800000001\0"));
}

#[test]
fn test_header_field_order() {
    let header = DownloadHeader::new(
        &name("ABC.DEF"),
        Medium::Floppy,
        &description("desc"),
        41,
    )
    .unwrap();
    let text = header.text();
    let file_type = INVASM_FILE_TYPE.to_string();

    let positions: Vec<usize> = [
        "'ABC.DEF'",
        "internal1",
        "'desc'",
        file_type.as_str(),
        "#800000042",
    ]
    .iter()
    .map(|field| text.find(*field).unwrap())
    .collect();

    assert!(positions.windows(2).all(|w| w[0] < w[1]));
    assert!(text.starts_with(":mmemory:download "));
}

#[test]
fn test_header_worst_case_fits_command_buffer() {
    let header = DownloadHeader::new(
        &name("ABCDEFGH.IJK"),
        Medium::Floppy,
        &description(&"x".repeat(32)),
        MAX_BLOCK_LEN - 1,
    )
    .unwrap();

    assert!(header.to_bytes().len() <= MAX_HEADER_LEN);
    assert!(header.text().ends_with("#899999999"));
}

#[test]
fn test_header_longer_than_command_buffer_rejected() {
    let make = |max_len| {
        DownloadHeader::with_max_len(
            &name("I6809"),
            Medium::Internal,
            &description("MC6809 Inverse Assembler"),
            1234,
            max_len,
        )
    };

    // 80 characters of text plus the NUL
    assert!(make(81).is_ok());
    assert_eq!(make(80), Err(HeaderError::TooLong { len: 81, max: 80 }));
    assert_eq!(make(50), Err(HeaderError::TooLong { len: 81, max: 50 }));
}

#[test]
fn test_header_worst_case_margin() {
    let header = DownloadHeader::new(
        &name("ABCDEFGH.IJK"),
        Medium::Floppy,
        &description(&"x".repeat(32)),
        MAX_BLOCK_LEN - 1,
    )
    .unwrap();

    assert_eq!(header.to_bytes().len(), 96);
}

#[test]
fn test_header_rejects_oversized_file() {
    let err = DownloadHeader::new(
        &name("BIG"),
        Medium::Internal,
        &Description::default(),
        100_000_000,
    )
    .unwrap_err();

    assert_eq!(
        err,
        HeaderError::PayloadTooLarge {
            file_size: 100_000_000
        }
    );
}

#[test]
fn test_header_display_shows_null() {
    let header =
        DownloadHeader::new(&name("IZ80"), Medium::Internal, &Description::default(), 5).unwrap();

    assert_eq!(header.to_string(), format!("{}\\0", header.text()));
}
