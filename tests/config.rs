// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Commercial

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

use sdkwatch::config::{Config, Provider};
use sdkwatch::error::Error;

// ─── Default values ──────────────────────────────────────────────────────────

#[test]
fn default_config_values() {
    let config = Config::default();
    assert_eq!(config.provider, Provider::Anthropic);
    assert_eq!(config.model, "claude-sonnet-4-20250514");
    assert_eq!(config.ollama_host, "http://localhost:11434");
    assert_eq!(config.anthropic_base_url, "https://api.anthropic.com");
    assert!(config.api_key.is_none());
    assert_eq!(config.timeout_secs, 300);
    assert!((config.temperature - 0.2).abs() < f32::EPSILON);
    assert_eq!(config.max_tokens, 4096);
    assert_eq!(
        config.state_file,
        PathBuf::from(".github/sdk-report-state.json")
    );

    assert_eq!(config.github.api_url, "https://api.github.com");
    assert!(config.github.repo.is_none());

    assert!(config.report.jira_base_url.is_none());
    assert_eq!(config.report.regenerate_command, "make generate-client");
    assert_eq!(config.report.max_inline_patch_chars, 5000);
    assert_eq!(config.report.max_raw_diff_lines, 100);
    assert!(config.analysis.ignore.is_empty());

    config.validate().unwrap();
}

// ─── TOML deserialization ────────────────────────────────────────────────────

#[test]
fn load_from_valid_toml() {
    let toml_str = r#"
provider = "ollama"
model = "qwen3:4b"
state_file = "state/sdk.json"

[github]
repo = "org/api"

[report]
jira_base_url = "https://example.atlassian.net/browse"
regenerate_command = "just client"
max_raw_diff_lines = 40

[analysis]
ignore = ["**/generated/**"]
"#;
    let config: Config = toml::from_str(toml_str).unwrap();
    assert_eq!(config.provider, Provider::Ollama);
    assert_eq!(config.model, "qwen3:4b");
    assert_eq!(config.state_file, PathBuf::from("state/sdk.json"));
    assert_eq!(config.github.repo.as_deref(), Some("org/api"));
    assert_eq!(config.github.api_url, "https://api.github.com");
    assert_eq!(config.report.regenerate_command, "just client");
    assert_eq!(config.report.max_raw_diff_lines, 40);
    assert_eq!(config.report.max_inline_patch_chars, 5000);
    assert_eq!(config.analysis.ignore, vec!["**/generated/**"]);
    config.validate().unwrap();
}

#[test]
fn empty_toml_uses_all_defaults() {
    let config: Config = toml::from_str("").unwrap();
    let default = Config::default();
    assert_eq!(config.provider, default.provider);
    assert_eq!(config.model, default.model);
    assert_eq!(config.state_file, default.state_file);
    assert_eq!(
        config.report.max_raw_diff_lines,
        default.report.max_raw_diff_lines
    );
}

#[test]
fn invalid_toml_returns_error() {
    assert!(toml::from_str::<Config>("provider = [").is_err());
    assert!(toml::from_str::<Config>(r#"provider = "openai""#).is_err());
}

// ─── Provider parsing ────────────────────────────────────────────────────────

#[test]
fn provider_names() {
    assert_eq!(Provider::parse("Anthropic"), Some(Provider::Anthropic));
    assert_eq!(Provider::parse("claude"), Some(Provider::Anthropic));
    assert_eq!(Provider::parse("OLLAMA"), Some(Provider::Ollama));
    assert_eq!(Provider::parse("openai"), None);

    assert_eq!(Provider::Anthropic.to_string(), "anthropic");
    assert_eq!(Provider::Ollama.to_string(), "ollama");
}

// ─── Validation ──────────────────────────────────────────────────────────────

fn assert_invalid(config: Config, needle: &str) {
    match config.validate() {
        Err(Error::Config(message)) => {
            assert!(message.contains(needle), "'{message}' should mention '{needle}'");
        }
        other => panic!("expected config error mentioning {needle}, got {other:?}"),
    }
}

#[test]
fn rejects_out_of_range_numbers() {
    assert_invalid(
        Config {
            timeout_secs: 0,
            ..Config::default()
        },
        "timeout_secs",
    );
    assert_invalid(
        Config {
            temperature: 1.5,
            ..Config::default()
        },
        "temperature",
    );
    assert_invalid(
        Config {
            max_tokens: 10,
            ..Config::default()
        },
        "max_tokens",
    );

    let mut config = Config::default();
    config.report.max_raw_diff_lines = 0;
    assert_invalid(config, "max_raw_diff_lines");
}

#[test]
fn rejects_blank_model() {
    assert_invalid(
        Config {
            model: "  ".into(),
            ..Config::default()
        },
        "model",
    );
}

#[test]
fn rejects_bad_urls() {
    assert_invalid(
        Config {
            ollama_host: "localhost:11434".into(),
            ..Config::default()
        },
        "ollama_host",
    );
    assert_invalid(
        Config {
            anthropic_base_url: "ftp://api.example.com".into(),
            ..Config::default()
        },
        "anthropic_base_url",
    );

    let mut config = Config::default();
    config.report.jira_base_url = Some("not a url".into());
    assert_invalid(config, "report.jira_base_url");
}

#[test]
fn rejects_malformed_repo() {
    for repo in ["org", "org/", "/api", "org/api/extra"] {
        let mut config = Config::default();
        config.github.repo = Some(repo.into());
        assert_invalid(config, "github.repo");
    }

    let mut config = Config::default();
    config.github.repo = Some("org/api".into());
    config.validate().unwrap();
}

// ─── Layering ────────────────────────────────────────────────────────────────

fn sdkwatch_in(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("sdkwatch").unwrap();
    cmd.current_dir(dir)
        .env("HOME", dir)
        .env("XDG_CONFIG_HOME", dir.join(".config"))
        .env("NO_COLOR", "1")
        .env_remove("SDKWATCH_PROVIDER")
        .env_remove("SDKWATCH_API_KEY")
        .env_remove("ANTHROPIC_API_KEY")
        .env_remove("GITHUB_TOKEN")
        .env_remove("GH_TOKEN");
    cmd
}

#[test]
fn cli_provider_picks_up_anthropic_key_from_env() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join(".sdkwatch.toml"), "provider = \"ollama\"\n").unwrap();

    sdkwatch_in(dir.path())
        .env("ANTHROPIC_API_KEY", "sk-ant-xyz")
        .args(["--provider", "anthropic", "config"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Provider: anthropic")
                .and(predicate::str::contains("API key: ***"))
                .and(predicate::str::contains("sk-ant-xyz").not()),
        );
}

#[test]
fn project_provider_without_cli_override_ignores_anthropic_key() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join(".sdkwatch.toml"), "provider = \"ollama\"\n").unwrap();

    sdkwatch_in(dir.path())
        .env("ANTHROPIC_API_KEY", "sk-ant-xyz")
        .arg("config")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Provider: ollama")
                .and(predicate::str::contains("API key: (not set)")),
        );
}

#[test]
fn github_token_falls_back_to_gh_token() {
    let dir = TempDir::new().unwrap();

    sdkwatch_in(dir.path())
        .env("GH_TOKEN", "ghp_secret")
        .arg("config")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("token: ***")
                .and(predicate::str::contains("ghp_secret").not()),
        );
}
