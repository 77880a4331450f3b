//! CLI configuration

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use storefront::sections::Section;

/// Log output format.
#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    /// Compact, human-readable logs.
    Compact,

    /// Structured JSON logs.
    Json,
}

/// Logging settings.
#[derive(Debug, Args)]
pub(crate) struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "RUST_LOG", default_value = "warn", global = true)]
    pub log_level: String,

    /// Log format (compact, json)
    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Compact, global = true)]
    pub log_format: LogFormat,
}

/// Storefront CLI configuration
#[derive(Debug, Parser)]
#[command(name = "storefront", about = "Home-goods storefront", long_about = None)]
pub(crate) struct StorefrontConfig {
    /// Catalog fixture file; the built-in shop is used when omitted
    #[arg(short, long, env = "STOREFRONT_FIXTURE", global = true)]
    pub fixture: Option<PathBuf>,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub(crate) enum Command {
    /// List catalog products
    Catalog {
        /// Only show products in this category
        #[arg(short, long)]
        category: Option<String>,
    },

    /// Show customer reviews
    Reviews,

    /// List page sections
    Sections,

    /// Show the content of one page section
    Section {
        /// Section anchor, e.g. delivery or #contacts
        section: Section,
    },

    /// Build a cart in one go and print it
    Cart {
        /// Product id to add; repeat to add more units
        #[arg(short, long = "add", value_name = "ID")]
        add: Vec<u32>,

        /// Product id to remove after adding
        #[arg(short, long = "remove", value_name = "ID")]
        remove: Vec<u32>,
    },

    /// Read actions from stdin, one per line
    Session,
}

impl StorefrontConfig {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }
}
