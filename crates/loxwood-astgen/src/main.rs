//! generate-ast: write the generated Lox syntax modules to a directory.
//!
//! Usage:
//!   generate-ast <output directory> [--check] [--no-serde] [--derive PATH]...

use std::path::PathBuf;
use std::process;

use anyhow::Context;
use clap::Parser;
use loxwood_astgen::Generator;

#[derive(Parser, Debug)]
#[command(
    name = "generate-ast",
    about = "Generate the Lox syntax-tree modules and their visitor traits"
)]
struct Cli {
    /// Directory that receives one `<family>.rs` per family.
    #[arg(value_name = "OUTPUT_DIR")]
    output: PathBuf,

    /// Do not write; exit with status 1 if any artifact is missing or stale.
    #[arg(long)]
    check: bool,

    /// Omit the serde derives.
    #[arg(long)]
    no_serde: bool,

    /// Extra derive paths added to every generated type.
    #[arg(long = "derive", value_name = "PATH")]
    derives: Vec<String>,
}

fn init_tracing() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn run(cli: Cli) -> anyhow::Result<bool> {
    let mut generator = Generator::lox();
    if cli.no_serde {
        generator = generator.with_derives(["Debug", "Clone", "PartialEq"]);
    }
    for derive in cli.derives {
        generator = generator.derive(derive);
    }

    if cli.check {
        let artifacts = generator.generate().context("generation failed")?;
        let stale: Vec<_> = artifacts
            .iter()
            .filter(|a| !a.is_current_in(&cli.output))
            .map(|a| a.file_name.as_str())
            .collect();
        if stale.is_empty() {
            return Ok(true);
        }
        eprintln!("stale or missing: {}", stale.join(", "));
        return Ok(false);
    }

    let written = generator
        .write_to(&cli.output)
        .with_context(|| format!("generating into {}", cli.output.display()))?;
    for path in written {
        println!("{}", path.display());
    }
    Ok(true)
}

fn main() {
    init_tracing();
    match run(Cli::parse()) {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(err) => {
            eprintln!("error: {:#}", err);
            process::exit(65);
        }
    }
}
