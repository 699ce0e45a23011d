//! Git command analysis.

use anyhow::Result;
use clap::Args;

use super::{analyze_once, Context, Outcome};

/// Command analyzed when none is given.
pub const DEFAULT_COMMAND: &str = "git commit \"falta el flag -m\"";

#[derive(Args)]
pub struct CommandArgs {
    /// The command line to analyze (joined with spaces)
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub text: Vec<String>,
}

impl CommandArgs {
    /// The command line to submit.
    pub fn input(&self) -> String {
        if self.text.is_empty() {
            DEFAULT_COMMAND.to_string()
        } else {
            self.text.join(" ")
        }
    }
}

pub async fn execute(args: CommandArgs, ctx: &Context) -> Result<Outcome> {
    let profile = ctx.profile("git")?;
    analyze_once(ctx, &profile, &args.input()).await
}
