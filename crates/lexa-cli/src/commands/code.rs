//! Java-subset program analysis.

use anyhow::{Context as _, Result};
use clap::Args;
use std::io::Read;
use std::path::{Path, PathBuf};

use super::{analyze_once, Context, Outcome};

#[derive(Args)]
pub struct CodeArgs {
    /// Source file to analyze; `-` or omitted reads stdin
    pub file: Option<PathBuf>,
}

/// Read the program from a file, or from stdin for `-` / no path.
pub fn read_source(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) if path != Path::new("-") => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),
        _ => {
            let mut source = String::new();
            std::io::stdin()
                .read_to_string(&mut source)
                .context("Failed to read program from stdin")?;
            Ok(source)
        }
    }
}

pub async fn execute(args: CodeArgs, ctx: &Context) -> Result<Outcome> {
    let profile = ctx.profile("java")?;
    let source = read_source(args.file.as_deref())?;
    analyze_once(ctx, &profile, &source).await
}
