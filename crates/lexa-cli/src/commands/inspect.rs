//! Offline interpretation of a saved response.

use anyhow::{Context as _, Result};
use clap::Args;
use lexa_core::{interpret, DisplayState, Profile, RawAnalysis};
use std::path::{Path, PathBuf};

use super::{Context, Outcome};
use crate::output;

#[derive(Args)]
pub struct InspectArgs {
    /// JSON file holding a response body from the analysis service
    pub file: PathBuf,
}

/// Interpret a saved response body.
pub fn load(path: &Path, profile: &Profile) -> Result<DisplayState> {
    let body = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let raw = RawAnalysis::from_json(&body)
        .with_context(|| format!("{} is not a JSON document", path.display()))?;
    Ok(interpret(&raw, profile))
}

pub fn execute(args: InspectArgs, ctx: &Context) -> Result<Outcome> {
    let profile = ctx.profile("git")?;
    let state = load(&args.file, &profile)?;

    if ctx.json {
        println!("{}", serde_json::to_string_pretty(&state)?);
    } else {
        output::print_state(&state);
    }

    Ok(if state.is_clean() {
        Outcome::Clean
    } else {
        Outcome::ContentErrors
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn saved(body: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(body.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_saved_response() {
        let file = saved(r#"{"status": "Error", "errorType": "Sintáctico", "tokens": [{"type": 1, "value": "git"}]}"#);
        let state = load(file.path(), &Profile::git()).unwrap();

        assert!(!state.is_clean());
        assert_eq!(state.status.unwrap().badge.as_deref(), Some("Sintáctico"));
    }

    #[test]
    fn test_non_json_file_is_error() {
        let file = saved("status: Correcto");
        assert!(load(file.path(), &Profile::git()).is_err());
    }
}
