use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::cli::Cli;
use crate::error::AppError;
use crate::providers::Selection;

pub const DEFAULT_API_URL: &str = "https://api.github.com";

#[derive(Debug, Deserialize, Default)]
pub struct AppConfig {
    pub github: Option<GitHubConfig>,
}

#[derive(Debug, Deserialize, Default)]
pub struct GitHubConfig {
    pub owner: Option<String>,
    pub repository: Option<String>,
    pub access_token: Option<String>,
    pub api_url: Option<String>,
}

/// Everything a single run needs, resolved from flags and the config file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub owner: String,
    pub repository: String,
    pub access_token: Option<String>,
    pub api_url: String,
    pub selection: Selection,
}

pub fn config_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".issuecards")
        .join("config.toml")
}

/// Load the config file. A missing default file yields defaults; a missing explicit one is an error.
pub fn load_config(explicit: Option<&Path>) -> Result<AppConfig> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => {
            let path = config_path();
            if !path.exists() {
                return Ok(AppConfig::default());
            }
            path
        }
    };
    let contents = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read config from {}", path.display()))?;
    let config: AppConfig = toml::from_str(&contents)
        .with_context(|| format!("Failed to parse {}", path.display()))?;
    Ok(config)
}

impl RunConfig {
    /// Merge command-line flags over file values. Empty strings count as unset.
    pub fn resolve(cli: &Cli, file: &AppConfig) -> crate::error::Result<Self> {
        let selection = cli.selection()?;
        let github = file.github.as_ref();

        let pick = |flag: &Option<String>, from_file: Option<&Option<String>>| {
            flag.clone()
                .filter(|v| !v.is_empty())
                .or_else(|| from_file.and_then(|v| v.clone()).filter(|v| !v.is_empty()))
        };

        let owner = pick(&cli.owner, github.map(|g| &g.owner));
        let repository = pick(&cli.repository, github.map(|g| &g.repository));
        let (Some(owner), Some(repository)) = (owner, repository) else {
            return Err(AppError::MissingRepository);
        };

        let access_token = pick(&cli.access_token, github.map(|g| &g.access_token));
        let api_url = pick(&cli.api_url, github.map(|g| &g.api_url))
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        Ok(RunConfig {
            owner,
            repository,
            access_token,
            api_url,
            selection,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn cli(owner: &str, repository: &str, milestone: &str) -> Cli {
        Cli {
            owner: Some(owner.to_string()),
            repository: Some(repository.to_string()),
            milestone: milestone.to_string(),
            ..Cli::default()
        }
    }

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn load_full_config() {
        let file = write_config(
            r#"
[github]
owner = "octo"
repository = "board"
access_token = "secret"
api_url = "https://github.example.com/api/v3"
"#,
        );
        let config = load_config(Some(file.path())).unwrap();
        let github = config.github.unwrap();
        assert_eq!(github.owner.as_deref(), Some("octo"));
        assert_eq!(github.repository.as_deref(), Some("board"));
        assert_eq!(github.access_token.as_deref(), Some("secret"));
        assert_eq!(
            github.api_url.as_deref(),
            Some("https://github.example.com/api/v3")
        );
    }

    #[test]
    fn load_empty_config() {
        let file = write_config("");
        let config = load_config(Some(file.path())).unwrap();
        assert!(config.github.is_none());
    }

    #[test]
    fn missing_explicit_config_fails() {
        let dir = tempfile::TempDir::new().unwrap();
        let result = load_config(Some(&dir.path().join("nope.toml")));
        assert!(result.unwrap_err().to_string().contains("Failed to read config"));
    }

    #[test]
    fn malformed_config_fails() {
        let file = write_config("[github\nowner = ");
        let result = load_config(Some(file.path()));
        assert!(result.unwrap_err().to_string().contains("Failed to parse"));
    }

    #[test]
    fn resolve_from_flags_only() {
        let run = RunConfig::resolve(&cli("octo", "board", "3"), &AppConfig::default()).unwrap();
        assert_eq!(run.owner, "octo");
        assert_eq!(run.repository, "board");
        assert_eq!(run.access_token, None);
        assert_eq!(run.api_url, DEFAULT_API_URL);
        assert_eq!(run.selection, Selection::Milestone("3".into()));
    }

    #[test]
    fn flags_override_file() {
        let file = AppConfig {
            github: Some(GitHubConfig {
                owner: Some("file-owner".into()),
                repository: Some("file-repo".into()),
                access_token: Some("file-token".into()),
                api_url: Some("http://file".into()),
            }),
        };
        let mut args = cli("flag-owner", "", "1");
        args.access_token = Some("flag-token".into());

        let run = RunConfig::resolve(&args, &file).unwrap();
        assert_eq!(run.owner, "flag-owner");
        assert_eq!(run.repository, "file-repo");
        assert_eq!(run.access_token.as_deref(), Some("flag-token"));
        assert_eq!(run.api_url, "http://file");
    }

    #[test]
    fn empty_token_means_anonymous() {
        let mut args = cli("octo", "board", "1");
        args.access_token = Some(String::new());
        let run = RunConfig::resolve(&args, &AppConfig::default()).unwrap();
        assert_eq!(run.access_token, None);
    }

    #[test]
    fn missing_repository_is_a_usage_error() {
        let args = cli("octo", "", "1");
        let err = RunConfig::resolve(&args, &AppConfig::default()).unwrap_err();
        assert!(matches!(err, AppError::MissingRepository));
    }

    #[test]
    fn missing_selector_reported_first() {
        let args = Cli::default();
        let err = RunConfig::resolve(&args, &AppConfig::default()).unwrap_err();
        assert!(matches!(err, AppError::MissingSelector));
    }
}
