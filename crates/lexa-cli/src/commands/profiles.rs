//! Profile listing.

use anyhow::Result;
use lexa_core::profile::BUILTIN_PROFILES;
use lexa_core::Profile;

use super::{Context, Outcome};
use crate::output;

pub fn execute(ctx: &Context) -> Result<Outcome> {
    let mut profiles = BUILTIN_PROFILES
        .iter()
        .map(|name| Profile::builtin(name))
        .collect::<Result<Vec<_>, _>>()?;

    if let Some(path) = &ctx.profile_file {
        profiles.push(ctx.profile("")?);
        tracing::debug!(path = %path.display(), "Including custom profile");
    }

    if ctx.json {
        println!("{}", serde_json::to_string_pretty(&profiles)?);
    } else {
        output::print_profiles(&profiles);
    }

    Ok(Outcome::Clean)
}
