use crate::cli::CommonArgs;
use crate::loader::fetch_text;
use crate::model::{Stat, SCHEMA_VERSION};
use anyhow::Context;
use console::style;
use serde::{Deserialize, Serialize};
use tracing::debug;

pub const GITHUB_USERS_API: &str = "https://api.github.com/users/";

/// The subset of a GitHub user document the home page shows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GithubProfile {
    pub login: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub followers: u64,
    #[serde(default)]
    pub following: u64,
    #[serde(default)]
    pub public_repos: u64,
    #[serde(default)]
    pub public_gists: u64,
}

impl GithubProfile {
    pub fn pairs(&self) -> Vec<Stat> {
        vec![
            Stat::new("Followers", self.followers),
            Stat::new("Following", self.following),
            Stat::new("Public Repos", self.public_repos),
            Stat::new("Public Gists", self.public_gists),
        ]
    }
}

pub fn profile_url(user: &str) -> String {
    format!("{GITHUB_USERS_API}{}", user.trim_start_matches('@'))
}

pub fn parse_profile(text: &str) -> crate::error::Result<GithubProfile> {
    Ok(serde_json::from_str(text)?)
}

#[derive(Serialize)]
struct ProfileOutput<'a> {
    version: u32,
    generated_at: chrono::DateTime<chrono::Utc>,
    source: &'a str,
    profile: &'a GithubProfile,
}

pub fn exec(common: CommonArgs, user: Option<String>, source: Option<String>, json: bool) -> anyhow::Result<()> {
    let source = match (source, user) {
        (Some(source), _) => source,
        (None, Some(user)) => profile_url(&user),
        (None, None) => anyhow::bail!("Either a user name or --source is required"),
    };
    let text = fetch_text(&source, common.timeout.into(), !json)
        .with_context(|| format!("Failed to load profile from {source}"))?;
    let profile = parse_profile(&text).context("Failed to parse profile")?;
    debug!(login = %profile.login, "loaded profile");

    if json {
        let output = ProfileOutput {
            version: SCHEMA_VERSION,
            generated_at: chrono::Utc::now(),
            source: &source,
            profile: &profile,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    let heading = profile.name.as_deref().unwrap_or(&profile.login);
    println!("{} {}", style("GitHub Stats").bold(), style(heading).dim());
    println!("{}", "─".repeat(30));
    for pair in profile.pairs() {
        println!("{:<16} {}", pair.label, style(pair.value).cyan());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_the_fields_the_page_shows() {
        let profile = parse_profile(
            r#"{"login": "octo", "name": null, "followers": 12, "following": 3,
                "public_repos": 40, "public_gists": 1, "bio": "ignored"}"#,
        )
        .unwrap();
        let shown: Vec<(String, String)> = profile.pairs().into_iter().map(|s| (s.label, s.value)).collect();
        assert_eq!(
            shown,
            vec![
                ("Followers".to_string(), "12".to_string()),
                ("Following".to_string(), "3".to_string()),
                ("Public Repos".to_string(), "40".to_string()),
                ("Public Gists".to_string(), "1".to_string()),
            ]
        );
    }

    #[test]
    fn missing_counts_default_to_zero() {
        let profile = parse_profile(r#"{"login": "new"}"#).unwrap();
        assert_eq!(profile.followers, 0);
        assert!(parse_profile(r#"{"message": "Not Found"}"#).is_err());
    }

    #[test]
    fn url_strips_leading_at() {
        assert_eq!(profile_url("@octo"), "https://api.github.com/users/octo");
    }
}
