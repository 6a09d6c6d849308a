// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! # btc1
//!
//! Entry point for the `btc1` binary. Parses CLI arguments, initializes
//! logging and runs one command against the `did-btc1` library.
//!
//! - `create`        : create a DID (fresh or from a mnemonic)
//! - `signing-method`: pick the signing key from a DID document
//! - `resolve`       : resolve a DID
//! - `version`       : print build version information

mod cli;
mod logging;

use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;

use did_btc1::{CreateOptions, DidBtc1, DidDocument, DidMethod, ResolutionOptions, Service};

use cli::{Btc1Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Btc1Cli::parse();
    logging::init_logging("btc1=info,did_btc1=info", cli.log_format);

    match cli.command {
        Commands::Create(args) => create(args),
        Commands::SigningMethod(args) => signing_method(args),
        Commands::Resolve(args) => resolve(args).await,
        Commands::Version => {
            print_version();
            Ok(())
        }
    }
}

fn create(args: cli::CreateArgs) -> Result<()> {
    let mut options = CreateOptions {
        network: args.network,
        version: args.did_version,
        mode: args.mode,
        ..CreateOptions::default()
    };
    if let Some(path) = &args.services {
        let services = load_services(path)?;
        tracing::info!(count = services.len(), path = %path.display(), "loaded services");
        options.services = Some(services);
    }

    let result = match args.mnemonic.as_deref() {
        Some(phrase) => DidBtc1
            .create_from_mnemonic(phrase, &options)
            .context("failed to create DID from mnemonic")?,
        None => DidBtc1.create(&options).context("failed to create DID")?,
    };

    print_json(&result)
}

fn signing_method(args: cli::SigningMethodArgs) -> Result<()> {
    let document = load_document(&args.document)?;
    let method = DidBtc1
        .get_signing_method(&document, args.method_id.as_deref())
        .with_context(|| format!("no signing method in document {}", document.id))?;
    print_json(method)
}

async fn resolve(args: cli::ResolveArgs) -> Result<()> {
    let options = ResolutionOptions {
        aggregator_uri: args.aggregator_uri,
        network: args.network,
    };
    let result = DidBtc1.resolve(&args.did, &options).await;
    if let Some(error) = &result.did_resolution_metadata.error {
        tracing::warn!(did = %args.did, ?error, "resolution failed");
    }
    print_json(&result)
}

/// Reads a JSON array of services.
fn load_services(path: &Path) -> Result<Vec<Service>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read services file {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("services file {} is not a JSON array of services", path.display()))
}

/// Reads a DID document from `path`, or from stdin when `path` is `-`.
fn load_document(path: &Path) -> Result<DidDocument> {
    let raw = if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read document from stdin")?;
        buf
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("failed to read document {}", path.display()))?
    };
    DidDocument::from_json(&raw).context("document is not a valid DID document")
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("failed to serialize output")?;
    println!("{json}");
    Ok(())
}

/// Prints version information to stdout.
fn print_version() {
    println!("btc1     {}", env!("CARGO_PKG_VERSION"));
    println!("method   did:{}", did_btc1::config::METHOD_NAME);
    println!("rustc    {}", rustc_version());
}

/// Returns the Rust compiler version used to build this binary.
fn rustc_version() -> &'static str {
    option_env!("RUSTC_VERSION").unwrap_or("unknown")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn loads_services_file() {
        let mut file = tempfile::NamedTempFile::new().expect("tempfile");
        write!(
            file,
            r##"[{{ "id": "#beacon", "type": "SingletonBeacon", "serviceEndpoint": "bitcoin:tb1qexample" }}]"##
        )
        .unwrap();

        let services = load_services(file.path()).unwrap();
        assert_eq!(services, vec![Service::new("#beacon", "SingletonBeacon", "bitcoin:tb1qexample")]);
    }

    #[test]
    fn rejects_malformed_services_file() {
        let mut file = tempfile::NamedTempFile::new().expect("tempfile");
        write!(file, r#"{{ "id": "not-an-array" }}"#).unwrap();
        assert!(load_services(file.path()).is_err());
        assert!(load_services(Path::new("/nonexistent/services.json")).is_err());
    }

    #[test]
    fn loads_created_document() {
        let created = DidBtc1.create(&CreateOptions::default()).unwrap();
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("doc.json");
        std::fs::write(&path, created.did_document.to_json().unwrap()).unwrap();

        let document = load_document(&path).unwrap();
        assert_eq!(document, created.did_document);
        assert_eq!(
            DidBtc1.get_signing_method(&document, None).unwrap().id,
            "#initialKey"
        );
    }
}
