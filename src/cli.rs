//! CLI argument definitions using clap derive macros.

use std::fmt;
use std::path::PathBuf;

use clap::{Parser, Subcommand};

use uspto_odp::DEFAULT_MIME_TYPE;
use uspto_odp::client::{API_KEY_ENV, BASE_URL_ENV, DEFAULT_BASE_URL};

/// Query the USPTO Open Data Portal patent application API.
///
/// Results are printed to stdout as JSON.
#[derive(Parser)]
#[command(name = "uspto-odp")]
#[command(author, version, about)]
pub struct Args {
    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// API key sent in the X-API-KEY header
    #[arg(long, env = API_KEY_ENV, hide_env_values = true)]
    pub api_key: Option<String>,

    /// Base URL of the applications API
    #[arg(long, env = BASE_URL_ENV, default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    #[command(subcommand)]
    pub command: Command,
}

// Custom Debug impl that redacts the API key.
impl fmt::Debug for Args {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Args")
            .field("verbose", &self.verbose)
            .field("quiet", &self.quiet)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .field("command", &self.command)
            .finish()
    }
}

/// One API operation per subcommand.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Application metadata and event history
    Wrapper {
        /// Application serial number
        serial: String,
    },
    /// Documents filed or mailed for an application
    Documents {
        /// Application serial number
        serial: String,
    },
    /// Parent and child continuity
    Continuity {
        /// Application serial number
        serial: String,
    },
    /// Foreign priority claims
    ForeignPriority {
        /// Application serial number
        serial: String,
    },
    /// Transaction history
    Transactions {
        /// Application serial number
        serial: String,
    },
    /// Assignment records
    Assignments {
        /// Application serial number
        serial: String,
    },
    /// Resolve a patent number (e.g. US11,989,999) to its application
    Lookup {
        /// Patent number, with or without the US prefix and separators
        patent_number: String,
    },
    /// Download one document of an application
    Download {
        /// Application serial number
        serial: String,
        /// Document identifier as listed by `documents`
        document_id: String,
        /// Mime identifier: PDF, MS_WORD or XML
        #[arg(short, long, default_value = DEFAULT_MIME_TYPE)]
        mime_type: String,
        /// Directory to save into (must exist)
        #[arg(short, long, default_value = ".")]
        output_dir: PathBuf,
        /// Filename to save as (defaults to application_code_identifier.ext)
        #[arg(short, long)]
        filename: Option<String>,
    },
}
