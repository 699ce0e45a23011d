//! CLI command definitions and handlers.

use anyhow::{Context as _, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use lexa_client::{
    submit, ClientConfig, ClientError, HttpAnalyzer, DEFAULT_SERVICE_URL, DEFAULT_TIMEOUT_SECS,
};
use lexa_core::{Phase, Profile, Session};
use std::path::PathBuf;
use std::process::ExitCode;

use crate::output;

pub mod code;
pub mod command;
pub mod inspect;
pub mod ping;
pub mod profiles;
pub mod session;

/// Lexa - client for the lexical/syntax/semantic analysis service
#[derive(Parser)]
#[command(name = "lexa")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Base URL of the analysis service
    #[arg(long, global = true, env = "LEXA_URL", default_value = DEFAULT_SERVICE_URL)]
    pub url: String,

    /// Request timeout in seconds
    #[arg(long, global = true, env = "LEXA_TIMEOUT_SECS", default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout: u64,

    /// Use a built-in profile instead of the command's default
    #[arg(long, global = true, conflicts_with = "profile_file")]
    pub profile: Option<String>,

    /// Load the profile from a TOML file
    #[arg(long, global = true)]
    pub profile_file: Option<PathBuf>,

    /// Print the interpreted result as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Also write logs to this file
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze a Git command
    Command(command::CommandArgs),

    /// Analyze a Java-subset program
    Code(code::CodeArgs),

    /// Interactive analysis session
    Session(session::SessionArgs),

    /// Interpret a saved JSON response without calling the service
    Inspect(inspect::InspectArgs),

    /// List the built-in profiles
    Profiles,

    /// Check that the analysis service is reachable
    Ping,
}

/// Exit code for transport and server failures.
pub const TRANSPORT_ERROR: u8 = 2;

/// Exit code for usage and configuration errors.
pub const USAGE_ERROR: u8 = 3;

/// How a command ended, mapped to the process exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Analysis retrieved, nothing wrong reported.
    Clean,
    /// Analysis retrieved with content errors or status Error.
    ContentErrors,
    /// Transport or server failure.
    Failed,
}

impl Outcome {
    pub fn exit_code(self) -> ExitCode {
        match self {
            Self::Clean => ExitCode::SUCCESS,
            Self::ContentErrors => ExitCode::from(1),
            Self::Failed => ExitCode::from(TRANSPORT_ERROR),
        }
    }

    /// Exit code for a command that failed outright. Transport and server
    /// failures keep their own code; everything else is a usage error.
    pub fn error_code(error: &anyhow::Error) -> u8 {
        let transport = error
            .downcast_ref::<ClientError>()
            .is_some_and(ClientError::is_transport);
        if transport {
            TRANSPORT_ERROR
        } else {
            USAGE_ERROR
        }
    }

    pub fn of(session: &Session) -> Self {
        match session.phase() {
            Phase::Succeeded(state) if state.is_clean() => Self::Clean,
            Phase::Succeeded(_) => Self::ContentErrors,
            Phase::Failed(_) | Phase::Submitting => Self::Failed,
            Phase::Idle => Self::Clean,
        }
    }
}

/// Settings shared by every command.
pub struct Context {
    pub client: ClientConfig,
    pub profile_name: Option<String>,
    pub profile_file: Option<PathBuf>,
    pub json: bool,
}

impl Context {
    /// Resolve the profile to use, falling back to `default` when neither
    /// `--profile` nor `--profile-file` is given.
    pub fn profile(&self, default: &str) -> Result<Profile> {
        if let Some(path) = &self.profile_file {
            return Profile::from_file(path)
                .with_context(|| format!("Failed to load profile from {}", path.display()));
        }
        let name = self.profile_name.as_deref().unwrap_or(default);
        Ok(Profile::builtin(name)?)
    }

    pub fn analyzer(&self) -> HttpAnalyzer {
        HttpAnalyzer::new(self.client.clone())
    }
}

impl Cli {
    pub async fn execute(self) -> Result<Outcome> {
        let ctx = Context {
            client: ClientConfig::new(&self.url, self.timeout),
            profile_name: self.profile,
            profile_file: self.profile_file,
            json: self.json,
        };

        match self.command {
            Commands::Command(args) => command::execute(args, &ctx).await,
            Commands::Code(args) => code::execute(args, &ctx).await,
            Commands::Session(args) => session::execute(args, &ctx).await,
            Commands::Inspect(args) => inspect::execute(args, &ctx),
            Commands::Profiles => profiles::execute(&ctx),
            Commands::Ping => ping::execute(&ctx).await,
        }
    }
}

/// Run one submission against the service and print its outcome.
pub async fn analyze_once(ctx: &Context, profile: &Profile, input: &str) -> Result<Outcome> {
    let analyzer = ctx.analyzer();
    let mut session = Session::default();

    let pb = (!ctx.json).then(|| output::spinner("Analyzing..."));
    let submitted = submit(&mut session, &analyzer, profile, input).await;
    if let Some(pb) = pb {
        pb.finish_and_clear();
    }
    submitted?;

    report(&session, ctx.json)?;
    Ok(Outcome::of(&session))
}

/// Print whatever the session currently holds.
pub fn report(session: &Session, json: bool) -> Result<()> {
    if !session.has_run() {
        if !json {
            println!("{}", "Nothing analyzed yet.".dimmed());
        }
        return Ok(());
    }

    match session.phase() {
        Phase::Succeeded(state) => {
            if json {
                println!("{}", serde_json::to_string_pretty(state.as_ref())?);
            } else {
                output::print_state(state);
            }
        }
        Phase::Failed(message) => {
            if json {
                println!("{}", serde_json::json!({ "error": message }));
            }
            output::print_network_error(message);
        }
        Phase::Idle | Phase::Submitting => {}
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use lexa_core::{interpret, RawAnalysis};
    use serde_json::json;

    fn finished(payload: serde_json::Value, profile: &Profile) -> Session {
        let mut session = Session::default();
        let ticket = session.begin("input").unwrap();
        let state = interpret(&RawAnalysis::from_value(&payload), profile);
        session.succeed(ticket, state);
        session
    }

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::try_parse_from(["lexa", "command"]).unwrap();
        assert_eq!(cli.timeout, DEFAULT_TIMEOUT_SECS);
        assert!(!cli.json);
        assert!(matches!(cli.command, Commands::Command(_)));
    }

    #[test]
    fn test_global_options_after_subcommand() {
        let cli = Cli::try_parse_from([
            "lexa", "code", "Main.java", "--url", "http://analyzer:9000", "--json",
        ])
        .unwrap();
        assert_eq!(cli.url, "http://analyzer:9000");
        assert!(cli.json);
    }

    #[test]
    fn test_profile_and_profile_file_conflict() {
        let result = Cli::try_parse_from([
            "lexa", "profiles", "--profile", "git", "--profile-file", "x.toml",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_outcome_mapping() {
        let git = Profile::git();
        let java = Profile::java();

        assert_eq!(Outcome::of(&finished(json!({"status": "Correcto"}), &git)), Outcome::Clean);
        assert_eq!(Outcome::of(&finished(json!({"status": "Advertencia"}), &git)), Outcome::Clean);
        assert_eq!(
            Outcome::of(&finished(json!({"status": "Error"}), &git)),
            Outcome::ContentErrors
        );
        assert_eq!(
            Outcome::of(&finished(json!({"syntaxErrors": ["';' expected"]}), &java)),
            Outcome::ContentErrors
        );

        let mut session = Session::default();
        let ticket = session.begin("git status").unwrap();
        session.fail(ticket, "timeout");
        assert_eq!(Outcome::of(&session), Outcome::Failed);
    }

    #[test]
    fn test_error_exit_codes() {
        let transport = anyhow::Error::from(ClientError::Timeout { seconds: 5 });
        assert_eq!(Outcome::error_code(&transport), TRANSPORT_ERROR);

        let local = anyhow::Error::from(ClientError::from(lexa_core::CoreError::EmptyInput));
        assert_eq!(Outcome::error_code(&local), USAGE_ERROR);

        let other = anyhow::anyhow!("bad profile file");
        assert_eq!(Outcome::error_code(&other), USAGE_ERROR);
    }

    #[test]
    fn test_report_before_any_run() {
        let session = Session::default();
        assert!(!session.has_run());
        report(&session, false).unwrap();
        report(&session, true).unwrap();
    }

    #[test]
    fn test_profile_resolution() {
        let ctx = Context {
            client: ClientConfig::default(),
            profile_name: None,
            profile_file: None,
            json: false,
        };
        assert_eq!(ctx.profile("git").unwrap().name, "git");

        let ctx = Context {
            profile_name: Some("java".to_string()),
            ..ctx
        };
        assert_eq!(ctx.profile("git").unwrap().name, "java");

        let ctx = Context {
            profile_name: Some("cobol".to_string()),
            ..ctx
        };
        assert!(ctx.profile("git").is_err());
    }
}
