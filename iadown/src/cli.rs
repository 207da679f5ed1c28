// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Command-line interface definitions.

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use tracing::debug;

use iadown_common::protocol::{CONTROL_PORT, DEFAULT_DESCRIPTION, DEFAULT_TIMEOUT_SECS};
use iadown_common::{Description, DownloadHeader, Medium, RemoteName};

use crate::commands::{self, SourceFile};
use crate::transport::Transport;

const USAGE: &str = "iadown [OPTIONS] --address <IP_ADDRESS> --name <NAME> <IA_FILE.R>";

const NAMING_RULES: &str = "\
e.g.: iadown -a 192.168.1.16 -n I6809 -d \"MC6809 Inverse Assembler\" I6809.R

The file name (-n) can be up to 11 characters for LIF (NNNNNNNNNNN)
or 12 for DOS (NNNNNNNN.NNN).
The maximum length of the description (-d) string is 32 characters.";

/// Command-line arguments.
#[derive(Parser, Debug)]
#[command(name = "iadown", version)]
#[command(about = "Upload an inverse assembler (.R file) to an HP logic analyzer")]
#[command(override_usage = USAGE)]
#[command(after_help = NAMING_RULES)]
pub struct Cli {
    /// IP address of the HP logic analyzer
    #[arg(short, long, value_name = "IP_ADDRESS")]
    pub address: IpAddr,

    /// File name on the logic analyzer
    #[arg(short, long)]
    pub name: RemoteName,

    /// Descriptive string for the inverse assembler
    #[arg(short, long, default_value = DEFAULT_DESCRIPTION)]
    pub description: Description,

    /// Create the file on the floppy drive
    #[arg(short, long)]
    pub floppy: bool,

    /// Show debugging information
    #[arg(long)]
    pub verbose: bool,

    /// Control port of the logic analyzer
    #[arg(long, default_value_t = CONTROL_PORT)]
    pub port: u16,

    /// Socket send/receive timeout in seconds
    #[arg(long, value_name = "SECS", default_value_t = DEFAULT_TIMEOUT_SECS,
          value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: u64,

    /// Relocatable inverse assembler file (.R)
    #[arg(value_name = "IA_FILE.R")]
    pub files: Vec<PathBuf>,
}

/// Everything needed for one upload, fixed once arguments are parsed.
#[derive(Debug, Clone)]
pub struct TransferRequest {
    pub address: SocketAddr,
    pub timeout: Duration,
    pub name: RemoteName,
    pub description: Description,
    pub medium: Medium,
    pub source: PathBuf,
    pub verbose: bool,
}

impl Cli {
    /// Parse the process arguments into a request.
    ///
    /// Any argument error prints the message and the full help text to
    /// stderr and exits with status 1. `--help` and `--version` exit 0.
    pub fn parse_request() -> TransferRequest {
        Cli::try_parse()
            .and_then(Cli::into_request)
            .unwrap_or_else(|e| exit_with_usage(e))
    }

    /// Check the positional arguments and build the request.
    pub fn into_request(self) -> Result<TransferRequest, clap::Error> {
        let mut files = self.files.into_iter();
        let source = match (files.next(), files.next()) {
            (None, _) => {
                return Err(Cli::command().error(
                    ErrorKind::MissingRequiredArgument,
                    "missing inverse assembler file (.R)",
                ))
            }
            (Some(_), Some(_)) => {
                return Err(Cli::command().error(ErrorKind::TooManyValues, "too many arguments"))
            }
            (Some(source), None) => source,
        };

        Ok(TransferRequest {
            address: SocketAddr::new(self.address, self.port),
            timeout: Duration::from_secs(self.timeout),
            name: self.name,
            description: self.description,
            medium: Medium::from_floppy_flag(self.floppy),
            source,
            verbose: self.verbose,
        })
    }
}

fn exit_with_usage(err: clap::Error) -> ! {
    if !err.use_stderr() {
        err.exit();
    }
    eprint!("{}", usage_report(&err));
    std::process::exit(1)
}

/// Error message followed by the complete help text.
fn usage_report(err: &clap::Error) -> String {
    format!("{}\n{}", err, Cli::command().render_help())
}

/// Execute the upload described by `request`.
pub fn run(request: &TransferRequest) -> Result<()> {
    debug!(" IP address: {} port {}", request.address.ip(), request.address.port());
    debug!(" Local file: {}", request.source.display());
    debug!("Remote file: {} (on {} disk)", request.name, request.medium);
    debug!("Description: {}", request.description);

    // Fail on a missing or oversized file before touching the network
    let source = SourceFile::open(&request.source)?;
    let header = DownloadHeader::new(
        &request.name,
        request.medium,
        &request.description,
        source.size(),
    )?;

    let mut transport = Transport::connect(request.address, request.timeout)?;
    commands::upload(&mut transport, &header, source)?;

    Ok(())
}
