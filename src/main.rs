use clap::{Parser, Subcommand};
use eyre::{Result, format_err};
use k8s_openapi::api::networking::v1::NetworkPolicy;
use log::{debug, info};
use serde_json::Value;
use std::io::Read;
use std::process::exit;

use netpol_form::{form::Policy, messages::Catalog};

pub mod config;

/// NetworkPolicy form converter
#[derive(Parser)]
#[command(version, about, long_about = ABOUT)]
struct Cli {
    /// log filters (see https://docs.rs/env_logger/latest/env_logger/index.html#enabling-logging)
    #[arg(long, default_value = "warn", env = "NETPOL_FORM_LOG")]
    log: String,
    /// log style (see https://docs.rs/env_logger/latest/env_logger/index.html#disabling-colors)
    #[arg(long, default_value = "auto", env = "NETPOL_FORM_LOG_STYLE")]
    log_style: String,

    /// Config file path.
    #[arg(long, short = 'c', env = "NETPOL_FORM_CONFIG")]
    config: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Convert a NetworkPolicy resource to its form representation (JSON).
    ToForm {
        /// Resource file (YAML or JSON, "-" for stdin).
        file: String,
    },
    /// Validate a form and convert it to a NetworkPolicy resource (YAML).
    ToKube {
        /// Form file (YAML or JSON, "-" for stdin).
        file: String,
    },
    /// Validate a form.
    Check {
        /// Form file (YAML or JSON, "-" for stdin).
        file: String,
    },
    /// Print the normalized resource.
    Normalize {
        /// Resource file (YAML or JSON, "-" for stdin).
        file: String,
        /// Print the fingerprint of the normalized resource instead.
        #[arg(long)]
        fingerprint: bool,
    },
    /// Exit with status 1 when two resources differ after normalization.
    Same { a: String, b: String },
}

const ABOUT: &'static str = r#"
NetworkPolicy form converter

Convert Kubernetes NetworkPolicy resources to and from the form model used by
policy editors:
- decode resources into editable forms
- validate and encode forms into resources
- normalize resources to detect real changes
"#;

fn main() -> Result<()> {
    let cli = Cli::parse();

    env_logger::builder()
        .parse_filters(cli.log.as_str())
        .parse_write_style(cli.log_style.as_str())
        .format_timestamp_millis()
        .init();

    let config = config::Config::load(cli.config.as_deref())?;
    if !config.messages.is_empty() {
        info!("using custom messages");
    }
    let messages = &config.messages;

    use Command::*;
    match cli.command {
        ToForm { file } => {
            let resource: Value = read(&file)?;
            let policy = netpol_form::decode(&resource).map_err(|e| report(e, messages))?;
            println!("{}", serde_json::to_string_pretty(&policy)?);
        }
        ToKube { file } => {
            let policy: Policy = read(&file)?;
            netpol_form::check_validity(&policy).map_err(|e| report(e, messages))?;
            print!("{}", serde_yaml::to_string(&netpol_form::encode(&policy))?);
        }
        Check { file } => {
            let policy: Policy = read(&file)?;
            netpol_form::check_validity(&policy).map_err(|e| report(e, messages))?;
            info!("{file}: valid");
        }
        Normalize { file, fingerprint } => {
            let policy: NetworkPolicy = read(&file)?;
            if fingerprint {
                println!("{:032x}", netpol_form::fingerprint(&policy)?);
            } else {
                print!("{}", serde_yaml::to_string(&netpol_form::normalize(&policy))?);
            }
        }
        Same { a, b } => {
            let a: NetworkPolicy = read(&a)?;
            let b: NetworkPolicy = read(&b)?;
            if !netpol_form::same(&a, &b) {
                debug!("normalized policies differ");
                exit(1);
            }
        }
    }

    Ok(())
}

/// Read a YAML or JSON document from a file or stdin.
fn read<T: serde::de::DeserializeOwned>(file: &str) -> Result<T> {
    let input = if file == "-" {
        let mut input = String::new();
        std::io::stdin().read_to_string(&mut input)?;
        input
    } else {
        std::fs::read_to_string(file).map_err(|e| format_err!("read failed: {file}: {e}"))?
    };
    serde_yaml::from_str(&input).map_err(|e| format_err!("parse failed: {file}: {e}"))
}

fn report(e: netpol_form::Error, messages: &Catalog) -> eyre::Report {
    format_err!("{:?}: {}", e.kind(), e.message(messages))
}
