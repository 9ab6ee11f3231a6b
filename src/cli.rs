// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Commercial

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::domain::Status;

#[derive(Parser, Debug)]
#[command(name = "sdkwatch")]
#[command(version)]
#[command(
    about = "Classify upstream API diffs, cluster SDK change reports and track their state",
    long_about = None
)]
pub struct Cli {
    /// LLM provider for cluster refinement (anthropic, ollama)
    #[arg(short, long, global = true, env = "SDKWATCH_PROVIDER")]
    pub provider: Option<String>,

    /// Model name
    #[arg(short, long, global = true, env = "SDKWATCH_MODEL")]
    pub model: Option<String>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Analyze a local checkout for SDK-relevant changes
    Analyze(AnalyzeArgs),
    /// Analyze commits through the GitHub REST API, no clone required
    Remote(RemoteArgs),
    /// Group per-commit reports into clusters for batch handling
    Cluster(ClusterArgs),
    /// Track review status of reports and clusters
    State(StateArgs),
    /// Initialize config file
    Init,
    /// Show current configuration
    Config,
    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// Commit or range (abc123, HEAD~5..HEAD, main..feature)
    #[arg(required_unless_present = "since", conflicts_with = "since")]
    pub range: Option<String>,

    /// Analyze commits after this one up to HEAD
    #[arg(long, value_name = "COMMIT")]
    pub since: Option<String>,

    /// Only list the commits that would be analyzed
    #[arg(long, requires = "since")]
    pub list_commits: bool,

    /// Report each commit on its own instead of one combined diff
    #[arg(long, requires = "since", conflicts_with = "sdk_details")]
    pub per_commit: bool,

    /// Find SDK-relevant commits and write a full report for each
    #[arg(long, requires = "since")]
    pub sdk_details: bool,

    /// Stay silent unless SDK-relevant changes are found
    #[arg(long)]
    pub sdk_only: bool,

    /// Disable per-file commit attribution
    #[arg(long)]
    pub no_commits: bool,

    /// Path to the upstream repository
    #[arg(long, default_value = ".")]
    pub repo_path: PathBuf,

    /// Write the report to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Write 00-summary.md and one report per commit here (with --sdk-details)
    #[arg(long, requires = "sdk_details")]
    pub output_dir: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct RemoteArgs {
    /// Repository as owner/name (defaults to github.repo)
    #[arg(long)]
    pub repo: Option<String>,

    /// Number of recent commits to scan
    #[arg(long, default_value_t = 50, value_parser = clap::value_parser!(u32).range(1..=100))]
    pub commits: u32,

    /// Scan commits after this SHA instead
    #[arg(long, value_name = "SHA")]
    pub since: Option<String>,

    /// Save reports to this directory instead of stdout
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    /// Only list commits, don't analyze
    #[arg(long)]
    pub list_only: bool,
}

#[derive(Args, Debug)]
pub struct ClusterArgs {
    /// Directory containing per-commit reports
    #[arg(long)]
    pub input_dir: PathBuf,

    /// Directory for cluster reports and clusters.json
    #[arg(long)]
    pub output_dir: PathBuf,

    /// Refine heuristic clusters with the configured LLM
    #[arg(long)]
    pub use_llm: bool,

    /// Smaller clusters dissolve into single-commit entries
    #[arg(long, default_value_t = 2)]
    pub min_cluster_size: usize,

    /// Show the prompt sent to the LLM
    #[arg(long)]
    pub show_prompt: bool,
}

#[derive(Args, Debug)]
pub struct StateArgs {
    /// State file path (defaults to state_file from config)
    #[arg(long)]
    pub state_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: StateCommand,
}

/// Selects a report (by file name) or a cluster (by id).
#[derive(Args, Debug, Clone)]
#[group(required = true, multiple = true)]
pub struct ItemSelector {
    /// Report file name
    #[arg(long)]
    pub report: Option<String>,

    /// Cluster id
    #[arg(long)]
    pub cluster: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum StateCommand {
    /// Mark a report or cluster with a status
    Mark {
        #[command(flatten)]
        target: ItemSelector,

        #[arg(long, value_enum)]
        status: Status,

        /// Who is making the change (user:name, agent:name)
        #[arg(long)]
        by: Option<String>,

        #[arg(long)]
        notes: Option<String>,

        /// Associated pull request number
        #[arg(long)]
        pr: Option<u64>,

        /// Associated JIRA tickets
        #[arg(long, num_args = 1..)]
        jira: Vec<String>,
    },
    /// List reports or clusters
    List {
        #[arg(long = "type", value_enum, default_value_t = ListKind::All)]
        kind: ListKind,

        #[arg(long, value_enum)]
        status: Option<Status>,
    },
    /// Show per-status counts
    Summary,
    /// Register new reports and clusters as `new`
    Sync {
        #[arg(long)]
        reports_dir: Option<PathBuf>,

        #[arg(long)]
        clusters_dir: Option<PathBuf>,
    },
    /// Print one item as JSON
    Get {
        #[command(flatten)]
        target: ItemSelector,
    },
    /// List new and in-progress items
    NeedsAttention,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ListKind {
    Reports,
    Clusters,
    All,
}
