// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Commercial

use directories::ProjectDirs;
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::cli::Cli;
use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    #[default]
    Anthropic,
    Ollama,
}

impl Provider {
    pub fn parse(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "anthropic" | "claude" => Some(Self::Anthropic),
            "ollama" => Some(Self::Ollama),
            _ => None,
        }
    }
}

impl std::fmt::Display for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Anthropic => write!(f, "anthropic"),
            Self::Ollama => write!(f, "ollama"),
        }
    }
}

/// GitHub REST access for `sdkwatch remote`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitHubConfig {
    #[serde(default = "default_github_api_url")]
    pub api_url: String,

    /// Falls back to GITHUB_TOKEN, then GH_TOKEN
    #[serde(default)]
    pub token: Option<String>,

    /// `owner/name` of the upstream repository
    #[serde(default)]
    pub repo: Option<String>,
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            api_url: default_github_api_url(),
            token: None,
            repo: None,
        }
    }
}

/// Report rendering options.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Ticket ids link to `{jira_base_url}/{ID}` when set
    #[serde(default)]
    pub jira_base_url: Option<String>,

    /// Command suggested when OpenAPI specs change
    #[serde(default = "default_regenerate_command")]
    pub regenerate_command: String,

    /// Inline GitHub patches for OpenAPI files shorter than this
    #[serde(default = "default_max_inline_patch_chars")]
    pub max_inline_patch_chars: usize,

    /// Raw OpenAPI diffs are shown up to this many changed lines
    #[serde(default = "default_max_raw_diff_lines")]
    pub max_raw_diff_lines: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            jira_base_url: None,
            regenerate_command: default_regenerate_command(),
            max_inline_patch_chars: default_max_inline_patch_chars(),
            max_raw_diff_lines: default_max_raw_diff_lines(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Extra globs classified as ignored before the built-in rules
    #[serde(default)]
    pub ignore: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub provider: Provider,

    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default = "default_ollama_host")]
    pub ollama_host: String,

    #[serde(default)]
    pub api_key: Option<String>,

    #[serde(default = "default_anthropic_base_url")]
    pub anthropic_base_url: String,

    /// Request timeout in seconds (default 300)
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// LLM temperature (0.0-1.0, default 0.2)
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Maximum tokens to generate (default 4096)
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Lifecycle state document
    #[serde(default = "default_state_file")]
    pub state_file: PathBuf,

    #[serde(default)]
    pub github: GitHubConfig,

    #[serde(default)]
    pub report: ReportConfig,

    #[serde(default)]
    pub analysis: AnalysisConfig,
}

fn default_model() -> String {
    "claude-sonnet-4-20250514".into()
}
fn default_ollama_host() -> String {
    "http://localhost:11434".into()
}
fn default_anthropic_base_url() -> String {
    "https://api.anthropic.com".into()
}
fn default_timeout_secs() -> u64 {
    300
}
fn default_temperature() -> f32 {
    0.2
}
fn default_max_tokens() -> u32 {
    4096
}
fn default_state_file() -> PathBuf {
    PathBuf::from(".github/sdk-report-state.json")
}
fn default_github_api_url() -> String {
    "https://api.github.com".into()
}
fn default_regenerate_command() -> String {
    "make generate-client".into()
}
fn default_max_inline_patch_chars() -> usize {
    5_000
}
fn default_max_raw_diff_lines() -> usize {
    100
}

impl Default for Config {
    fn default() -> Self {
        Self {
            provider: Provider::default(),
            model: default_model(),
            ollama_host: default_ollama_host(),
            api_key: None,
            anthropic_base_url: default_anthropic_base_url(),
            timeout_secs: default_timeout_secs(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            state_file: default_state_file(),
            github: GitHubConfig::default(),
            report: ReportConfig::default(),
            analysis: AnalysisConfig::default(),
        }
    }
}

impl Config {
    /// Load with priority: CLI > ENV > user config > project config > defaults
    pub fn load(cli: &Cli) -> Result<Self> {
        let mut figment = Figment::new().merge(Serialized::defaults(Config::default()));

        // Project-level config (.sdkwatch.toml in the working directory)
        if let Ok(cwd) = std::env::current_dir() {
            let project_config = cwd.join(".sdkwatch.toml");
            if project_config.exists() {
                figment = figment.merge(Toml::file(&project_config));
            }
        }

        if let Some(path) = Self::config_path()
            && path.exists()
        {
            figment = figment.merge(Toml::file(&path));
        }

        // SDKWATCH_MODEL, SDKWATCH_GITHUB__REPO, ...
        figment = figment.merge(Env::prefixed("SDKWATCH_").split("__"));

        let mut config: Config = figment
            .extract()
            .map_err(|e| Error::Config(e.to_string()))?;

        // Fallbacks depend on the provider, so CLI overrides land first
        config.apply_cli(cli)?;
        config.apply_env_fallbacks();
        config.validate()?;
        Ok(config)
    }

    fn apply_env_fallbacks(&mut self) {
        if self.api_key.is_none() && self.provider == Provider::Anthropic {
            self.api_key = std::env::var("ANTHROPIC_API_KEY").ok();
        }

        if self.github.token.is_none() {
            self.github.token = std::env::var("GITHUB_TOKEN")
                .or_else(|_| std::env::var("GH_TOKEN"))
                .ok()
                .filter(|t| !t.is_empty());
        }
    }

    pub fn config_dir() -> Option<PathBuf> {
        ProjectDirs::from("", "", "sdkwatch").map(|dirs| dirs.config_dir().to_path_buf())
    }

    pub fn config_path() -> Option<PathBuf> {
        Self::config_dir().map(|d| d.join("config.toml"))
    }

    fn apply_cli(&mut self, cli: &Cli) -> Result<()> {
        if let Some(ref p) = cli.provider {
            self.provider = Provider::parse(p).ok_or_else(|| {
                Error::Config(format!("unknown provider '{p}', expected anthropic or ollama"))
            })?;
        }
        if let Some(ref m) = cli.model {
            self.model = m.clone();
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if !(1..=3600).contains(&self.timeout_secs) {
            return Err(Error::Config(format!(
                "timeout_secs must be 1–3600, got {}",
                self.timeout_secs
            )));
        }

        if !(0.0..=1.0).contains(&self.temperature) {
            return Err(Error::Config(format!(
                "temperature must be 0.0–1.0, got {}",
                self.temperature
            )));
        }

        if !(256..=64_000).contains(&self.max_tokens) {
            return Err(Error::Config(format!(
                "max_tokens must be 256–64000, got {}",
                self.max_tokens
            )));
        }

        if !(1..=10_000).contains(&self.report.max_raw_diff_lines) {
            return Err(Error::Config(format!(
                "report.max_raw_diff_lines must be 1–10000, got {}",
                self.report.max_raw_diff_lines
            )));
        }

        if self.model.trim().is_empty() {
            return Err(Error::Config("model cannot be empty".into()));
        }

        validate_http_url("ollama_host", &self.ollama_host)?;
        validate_http_url("anthropic_base_url", &self.anthropic_base_url)?;
        validate_http_url("github.api_url", &self.github.api_url)?;
        if let Some(ref jira) = self.report.jira_base_url {
            validate_http_url("report.jira_base_url", jira)?;
        }

        if let Some(ref repo) = self.github.repo
            && !is_owner_repo(repo)
        {
            return Err(Error::Config(format!(
                "github.repo must look like owner/name, got '{repo}'"
            )));
        }

        Ok(())
    }

    /// Create default config file with secure permissions
    pub fn create_default() -> Result<PathBuf> {
        let Some(dir) = Self::config_dir() else {
            return Err(Error::Config("Cannot determine config directory".into()));
        };

        fs::create_dir_all(&dir)?;

        let path = dir.join("config.toml");
        let content = r#"# sdkwatch configuration

# LLM provider used by `sdkwatch cluster --use-llm`: anthropic, ollama
provider = "anthropic"

# Model name (for Ollama, use `ollama list` to see available)
model = "claude-sonnet-4-20250514"

# Ollama server URL
ollama_host = "http://localhost:11434"

# Anthropic API key (or set ANTHROPIC_API_KEY)
# api_key = "sk-ant-..."

# State document for `sdkwatch state`
state_file = ".github/sdk-report-state.json"

[github]
# Upstream repository analysed by `sdkwatch remote`
# repo = "owner/name"
# Token (or set GITHUB_TOKEN / GH_TOKEN)
# token = "ghp_..."

[report]
# Link ticket ids in reports, e.g. "https://example.atlassian.net/browse"
# jira_base_url = ""
regenerate_command = "make generate-client"
max_inline_patch_chars = 5000
max_raw_diff_lines = 100

[analysis]
# Extra globs classified as ignored
ignore = []
"#;

        fs::write(&path, content)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = fs::metadata(&path)?.permissions();
            perms.set_mode(0o600);
            fs::set_permissions(&path, perms)?;
        }

        Ok(path)
    }
}

fn validate_http_url(field: &str, value: &str) -> Result<()> {
    let parsed = url::Url::parse(value)
        .map_err(|e| Error::Config(format!("{field} is not a valid URL '{value}': {e}")))?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(Error::Config(format!(
            "{field} must start with http:// or https://, got '{value}'"
        )));
    }

    Ok(())
}

fn is_owner_repo(repo: &str) -> bool {
    match repo.split_once('/') {
        Some((owner, name)) => !owner.is_empty() && !name.is_empty() && !name.contains('/'),
        None => false,
    }
}
