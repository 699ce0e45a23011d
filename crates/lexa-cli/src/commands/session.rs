//! Interactive analysis session.
//!
//! Every line entered is one submission within a single [`Session`]; the
//! previous result is cleared as soon as the next one starts.

use anyhow::{Context as _, Result};
use clap::Args;
use colored::Colorize;
use dialoguer::Input;
use lexa_client::{submit, ClientError};
use lexa_core::{CoreError, Profile, Session, SubmitPolicy};
use tracing::info;

use super::{report, Context, Outcome};
use crate::output;

/// Lines that end the session.
const EXIT_WORDS: &[&str] = &["exit", "quit", ":q"];

#[derive(Args)]
pub struct SessionArgs {
    /// Built-in profile for the session (git or java)
    #[arg(long, default_value = "git")]
    pub kind: String,
}

fn is_exit(line: &str) -> bool {
    EXIT_WORDS.contains(&line.trim().to_lowercase().as_str())
}

pub async fn execute(args: SessionArgs, ctx: &Context) -> Result<Outcome> {
    let profile: Profile = ctx.profile(&args.kind)?;
    let analyzer = ctx.analyzer();
    let mut session = Session::new(SubmitPolicy::Reject);

    info!(
        session = %session.id(),
        profile = %profile.name,
        policy = ?session.policy(),
        "Interactive session started"
    );

    println!("{}", profile.title.cyan().bold());
    println!(
        "{}",
        format!(
            "Sending to {} - type `exit` to leave.\n",
            analyzer.config().endpoint()
        )
        .dimmed()
    );

    let mut last = Outcome::Clean;
    loop {
        let mut prompt = Input::<String>::new()
            .with_prompt(profile.request_field.as_str())
            .allow_empty(true);
        if !session.input().is_empty() {
            prompt = prompt.with_initial_text(session.input());
        }
        let line: String = prompt.interact_text().context("Failed to read input")?;

        if is_exit(&line) {
            break;
        }

        let pb = (!ctx.json).then(|| output::spinner("Analyzing..."));
        let submitted = submit(&mut session, &analyzer, &profile, &line).await;
        if let Some(pb) = pb {
            pb.finish_and_clear();
        }

        match submitted {
            Ok(_) => {
                report(&session, ctx.json)?;
                last = Outcome::of(&session);
            }
            Err(ClientError::Core(CoreError::EmptyInput)) => {
                println!("{}", "Nothing to analyze.".dimmed());
            }
            Err(e) => return Err(e.into()),
        }
        println!();
    }

    info!(session = %session.id(), "Interactive session ended");
    Ok(last)
}
