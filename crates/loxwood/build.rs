//! Generates the syntax-tree modules into `OUT_DIR`.

use std::path::PathBuf;

use anyhow::Context;
use loxwood_astgen::Generator;

fn main() -> anyhow::Result<()> {
    println!("cargo:rerun-if-changed=build.rs");

    let out_dir = PathBuf::from(std::env::var("OUT_DIR").context("OUT_DIR is not set")?);
    Generator::lox()
        .write_to(&out_dir)
        .context("generating the Lox syntax tree")?;
    Ok(())
}
