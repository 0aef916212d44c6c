//! Command-line postal-code lookup that races several providers.
//!
//! Prints the address returned by whichever provider answers first. Exits
//! with 0 on success, 1 when every provider failed or the deadline elapsed,
//! and 2 when the postal code is invalid.

mod env;
mod output;

use std::{process::ExitCode, time::Duration};

use clap::{Parser, ValueEnum};
use color_eyre::{eyre::WrapErr, Result};
use env::providers_from_env;
use hedged_cep_client::{HedgedCepClient, ProviderKind, RaceConfig};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(version, about = "Look up a Brazilian postal code (CEP) across several providers")]
struct Args {
    /// Postal code, as `NNNNNNNN` or `NNNNN-NNN`.
    cep: String,

    /// Deadline for the whole lookup, in milliseconds.
    #[arg(long, env = "CEP_TIMEOUT_MS", value_name = "MS")]
    timeout_ms: Option<u64>,

    /// Providers to race. Defaults to all of them.
    #[arg(long = "provider", value_enum, value_name = "PROVIDER")]
    providers: Vec<ProviderArg>,

    /// Print the result as JSON.
    #[arg(long)]
    json: bool,

    /// Log level used when `RUST_LOG` is not set.
    #[arg(long, default_value = "WARN", value_name = "LEVEL")]
    log_level: tracing::Level,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ProviderArg {
    BrasilApi,
    ViaCep,
    AwesomeApi,
}

impl From<ProviderArg> for ProviderKind {
    fn from(arg: ProviderArg) -> Self {
        match arg {
            ProviderArg::BrasilApi => ProviderKind::BrasilApi,
            ProviderArg::ViaCep => ProviderKind::ViaCep,
            ProviderArg::AwesomeApi => ProviderKind::AwesomeApi,
        }
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    color_eyre::install()?;

    let args = Args::parse();
    init_tracing(args.log_level);

    let kinds: Vec<ProviderKind> = if args.providers.is_empty() {
        ProviderKind::ALL.to_vec()
    } else {
        args.providers.iter().copied().map(Into::into).collect()
    };
    let providers = providers_from_env(&kinds);

    let mut cfg = RaceConfig {
        max_providers: providers.len(),
        ..RaceConfig::default()
    };
    if let Some(ms) = args.timeout_ms {
        cfg = cfg.with_timeout(Duration::from_millis(ms));
    }

    let client =
        HedgedCepClient::new(providers, cfg).wrap_err("failed to set up the HTTP transport")?;
    let result = client.lookup(&args.cep).await;

    if args.json {
        output::print_json(&result)?;
    } else {
        output::print_human(&result);
    }

    let code = if result.is_success() {
        ExitCode::SUCCESS
    } else if result.validation_error().is_some() {
        ExitCode::from(2)
    } else {
        ExitCode::FAILURE
    };

    Ok(code)
}

fn init_tracing(level: tracing::Level) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.to_string()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
