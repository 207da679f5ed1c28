// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Inverse assembler upload tool for HP 1660/1670 series logic analyzers.
//!
//! Sends a relocatable inverse assembler (`.R` file built with the HP 10391B
//! development package) to the analyzer's telnet control port using the
//! `:MMEMory:DOWNload` command.
//!
//! Usage:
//!   iadown -a 192.168.1.16 -n I6809 -d "MC6809 Inverse Assembler" I6809.R
//!   iadown -a 192.168.1.16 -n I6809.R --floppy --verbose I6809.R

mod cli;
mod commands;
mod logging;
mod transport;

use anyhow::Result;

fn main() -> Result<()> {
    let request = cli::Cli::parse_request();
    logging::init(request.verbose)?;
    cli::run(&request)
}
