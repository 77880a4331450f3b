//! Storefront CLI

use std::{
    io::{self, Write},
    process::ExitCode,
};

use thiserror::Error;
use tracing::info;

use storefront::{
    fixtures::{Fixture, FixtureError},
    listing,
    products::ProductId,
    session::{self, SessionError},
    storefront::{Storefront, StorefrontError},
    summary::SummaryError,
};

use crate::{
    config::{Command, StorefrontConfig},
    observability::{ObservabilityError, init_subscriber},
};

mod config;
mod observability;

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Observability(#[from] ObservabilityError),

    #[error(transparent)]
    Fixture(#[from] FixtureError),

    #[error(transparent)]
    Storefront(#[from] StorefrontError),

    #[error(transparent)]
    Session(#[from] SessionError),

    #[error(transparent)]
    Summary(#[from] SummaryError),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Storefront CLI entry point
pub fn main() -> ExitCode {
    let config = match StorefrontConfig::load() {
        Ok(config) => config,
        Err(error) => {
            _ = error.print();

            return ExitCode::from(u8::try_from(error.exit_code()).unwrap_or(1));
        }
    };

    match run(config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            #[expect(
                clippy::print_stderr,
                reason = "top-level error report for the CLI user"
            )]
            {
                eprintln!("error: {error}");
            }

            ExitCode::FAILURE
        }
    }
}

fn run(config: StorefrontConfig) -> Result<(), CliError> {
    init_subscriber(&config.logging)?;

    let fixture = match config.fixture.as_deref() {
        Some(path) => Fixture::from_path(path)?,
        None => Fixture::builtin()?,
    };

    let mut storefront = Storefront::from_fixture(fixture);

    let stdout = io::stdout();
    let mut handle = stdout.lock();

    match config.command {
        Command::Catalog { category } => {
            let catalog = storefront.catalog();

            writeln!(handle, "{}", storefront.store_name())?;

            match category.as_deref() {
                Some(category) => listing::write_products(&mut handle, catalog.in_category(category))?,
                None => listing::write_products(&mut handle, catalog)?,
            }
        }
        Command::Reviews => listing::write_reviews(&mut handle, storefront.reviews())?,
        Command::Sections => listing::write_sections(&mut handle, storefront.active_section())?,
        Command::Section { section } => listing::write_section(&mut handle, &storefront, section)?,
        Command::Cart { add, remove } => {
            for id in add {
                storefront.add_product(ProductId::new(id))?;
            }

            for id in remove {
                storefront.remove_product(ProductId::new(id));
            }

            storefront
                .summary()
                .write_to(&mut handle, storefront.cart())?;
        }
        Command::Session => {
            info!(store = storefront.store_name(), "starting session");

            let stdin = io::stdin();

            session::run(&mut storefront, stdin.lock(), &mut handle)?;
        }
    }

    Ok(())
}
