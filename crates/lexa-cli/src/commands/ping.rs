//! Service reachability check.

use anyhow::Result;
use colored::Colorize;

use super::{Context, Outcome};

pub async fn execute(ctx: &Context) -> Result<Outcome> {
    let analyzer = ctx.analyzer();
    let endpoint = analyzer.config().endpoint();

    if analyzer.health_check().await {
        println!("{} {} is reachable", "✓".green().bold(), endpoint);
        Ok(Outcome::Clean)
    } else {
        println!("{} {} is not reachable", "✗".red().bold(), endpoint);
        Ok(Outcome::Failed)
    }
}
