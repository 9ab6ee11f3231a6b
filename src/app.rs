// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Commercial

use std::fs;
use std::path::Path;
use std::time::Duration;

use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tokio::signal;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::cli::{
    AnalyzeArgs, Cli, ClusterArgs, Commands, ItemSelector, ListKind, RemoteArgs, StateArgs,
    StateCommand,
};
use crate::config::Config;
use crate::domain::{Cluster, CommitRef, DiffAnalysis, ItemKind, Status, short_sha};
use crate::error::{Error, Result};
use crate::services::{
    classifier::Classifier,
    cluster,
    git::{CommitRange, GitService},
    github::{GitHubClient, RemoteCommit},
    llm, refine,
    report::{AnalyzedCommit, FileDetails, ReportRenderer, collect_details},
    report_parser,
    state::{MarkOptions, StateStore},
};

pub struct App {
    cli: Cli,
    config: Config,
    cancel_token: CancellationToken,
}

impl App {
    pub fn new(cli: Cli) -> Result<Self> {
        let config = Config::load(&cli)?;
        debug!(
            provider = %config.provider,
            model = %config.model,
            state_file = %config.state_file.display(),
            "config loaded"
        );
        let cancel_token = CancellationToken::new();
        Ok(Self {
            cli,
            config,
            cancel_token,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        let cancel = self.cancel_token.clone();
        tokio::spawn(async move {
            signal::ctrl_c().await.ok();
            cancel.cancel();
        });

        match &self.cli.command {
            Commands::Analyze(args) => self.run_analyze(args).await,
            Commands::Remote(args) => self.run_remote(args).await,
            Commands::Cluster(args) => self.run_cluster(args).await,
            Commands::State(args) => self.run_state(args),
            Commands::Init => {
                let path = Config::create_default()?;
                println!("Created config: {}", path.display());
                Ok(())
            }
            Commands::Config => {
                self.show_config();
                Ok(())
            }
            Commands::Completions { shell } => {
                let mut cmd = <Cli as clap::CommandFactory>::command();
                clap_complete::generate(*shell, &mut cmd, "sdkwatch", &mut std::io::stdout());
                Ok(())
            }
        }
    }

    fn check_cancelled(&self) -> Result<()> {
        if self.cancel_token.is_cancelled() {
            return Err(Error::Cancelled);
        }
        Ok(())
    }

    // ─── Analyze ───

    async fn run_analyze(&self, args: &AnalyzeArgs) -> Result<()> {
        let git = GitService::open(&args.repo_path)?;
        let classifier = Classifier::new(&self.config.analysis.ignore)?;
        let renderer = ReportRenderer::new(&self.config.report);
        let repo_path = git.work_dir().display().to_string();

        let Some(ref since) = args.since else {
            let raw = args.range.as_deref().ok_or(Error::MissingRange)?;
            let range = CommitRange::parse(raw);
            let track = range.is_range() && !args.no_commits;

            self.print_status(&format!("Analyzing {raw}..."));
            let analysis = analyze_range(&git, &classifier, &range, &repo_path, track).await?;

            if args.sdk_only && !analysis.has_sdk_changes() {
                self.print_info(&format!("No SDK-relevant changes found in {raw}"));
                return Ok(());
            }

            let details = collect_details(&git, &range, &analysis, &self.config.report).await;
            return self.emit(&renderer.render(&analysis, &details), args.output.as_deref());
        };

        let commits = git.commits_since(since).await?;
        if commits.is_empty() {
            self.print_info(&format!("No commits found between {since} and HEAD"));
            return Ok(());
        }

        if args.list_commits {
            let repo_arg = args.repo_path.display().to_string();
            println!("{}", renderer.commit_list(since, &commits, &repo_arg));
            return Ok(());
        }

        if args.sdk_details {
            return self
                .run_sdk_details(&git, &classifier, since, &commits, args)
                .await;
        }

        if args.per_commit {
            return self
                .run_per_commit(&git, &classifier, since, &commits, args)
                .await;
        }

        // Combined diff of the whole range
        let range = CommitRange::parse(&format!("{since}..HEAD"));
        self.print_status(&format!(
            "Analyzing {} commits since {since}...",
            commits.len()
        ));
        let analysis =
            analyze_range(&git, &classifier, &range, &repo_path, !args.no_commits).await?;

        if args.sdk_only && !analysis.has_sdk_changes() {
            self.print_info(&format!("No SDK-relevant changes found since {since}"));
            return Ok(());
        }

        let details = collect_details(&git, &range, &analysis, &self.config.report).await;
        let report = renderer.render_with_commits(&analysis, &details, &commits);
        self.emit(&report, args.output.as_deref())
    }

    /// Classify each commit on its own. Commits git cannot diff (a root commit) are skipped.
    async fn scan_commits(
        &self,
        git: &GitService,
        classifier: &Classifier,
        commits: &[CommitRef],
    ) -> Result<Vec<(CommitRef, DiffAnalysis)>> {
        let repo_path = git.work_dir().display().to_string();
        let pb = progress_bar(commits.len() as u64);
        let mut scanned = Vec::with_capacity(commits.len());

        for commit in commits {
            self.check_cancelled()?;
            pb.set_message(commit.short().to_string());

            let range = CommitRange::parse(&commit.hash);
            match analyze_range(git, classifier, &range, &repo_path, false).await {
                Ok(analysis) => scanned.push((commit.clone(), analysis)),
                Err(e) => warn!(commit = commit.short(), error = %e, "skipping commit"),
            }
            pb.inc(1);
        }

        pb.finish_and_clear();
        Ok(scanned)
    }

    async fn run_sdk_details(
        &self,
        git: &GitService,
        classifier: &Classifier,
        since: &str,
        commits: &[CommitRef],
        args: &AnalyzeArgs,
    ) -> Result<()> {
        let renderer = ReportRenderer::new(&self.config.report);

        self.print_status(&format!(
            "Scanning {} commits for SDK-relevant changes...",
            commits.len()
        ));
        let scanned = self.scan_commits(git, classifier, commits).await?;

        let mut relevant = Vec::new();
        for (commit, analysis) in scanned {
            if !analysis.has_sdk_changes() {
                continue;
            }
            self.check_cancelled()?;
            let range = CommitRange::parse(&commit.hash);
            let details = collect_details(git, &range, &analysis, &self.config.report).await;
            relevant.push(AnalyzedCommit {
                commit,
                analysis,
                details,
            });
        }

        self.print_info(&format!("Found {} SDK-relevant commits", relevant.len()));
        if relevant.is_empty() {
            self.print_info(&format!(
                "No SDK-relevant changes found in {} commits since {since}",
                commits.len()
            ));
            return Ok(());
        }

        let summary = renderer.sdk_summary(since, commits, &relevant);

        let Some(ref dir) = args.output_dir else {
            let report = renderer.sdk_details_combined(&summary, &relevant);
            return self.emit(&report, args.output.as_deref());
        };

        fs::create_dir_all(dir)?;
        let summary_file = dir.join("00-summary.md");
        fs::write(&summary_file, &summary)?;
        self.print_status(&format!("Saved summary to: {}", summary_file.display()));

        let total = relevant.len();
        let mut written = 0;
        for (i, item) in relevant.iter().enumerate() {
            let filename = format!("{}.md", short_sha(&item.commit.hash, 12));
            let path = dir.join(&filename);
            if path.exists() {
                self.print_info(&format!("[{}/{total}] Skip (exists): {filename}", i + 1));
                continue;
            }
            fs::write(&path, renderer.commit_report(item))?;
            written += 1;
            self.print_status(&format!("[{}/{total}] Saved: {filename}", i + 1));
        }

        self.print_info(&format!(
            "Done! {written} new reports, {} skipped (already exist)",
            total - written
        ));
        self.print_info(&format!("Reports in: {}/", dir.display()));
        Ok(())
    }

    async fn run_per_commit(
        &self,
        git: &GitService,
        classifier: &Classifier,
        since: &str,
        commits: &[CommitRef],
        args: &AnalyzeArgs,
    ) -> Result<()> {
        let renderer = ReportRenderer::new(&self.config.report);

        self.print_status(&format!("Analyzing {} commits individually...", commits.len()));
        let analyzed: Vec<AnalyzedCommit> = self
            .scan_commits(git, classifier, commits)
            .await?
            .into_iter()
            .filter(|(_, analysis)| !args.sdk_only || analysis.has_sdk_changes())
            .map(|(commit, analysis)| AnalyzedCommit {
                commit,
                analysis,
                details: FileDetails::new(),
            })
            .collect();

        if args.sdk_only && analyzed.is_empty() {
            self.print_info(&format!(
                "No SDK-relevant changes found in {} commits since {since}",
                commits.len()
            ));
            return Ok(());
        }

        let report = renderer.multi_commit(since, commits.len(), &analyzed, args.sdk_only);
        self.emit(&report, args.output.as_deref())
    }

    fn emit(&self, report: &str, output: Option<&Path>) -> Result<()> {
        match output {
            Some(path) => {
                fs::write(path, report)?;
                self.print_info(&format!("Report written to: {}", path.display()));
            }
            None => println!("{report}"),
        }
        Ok(())
    }

    // ─── Remote ───

    async fn run_remote(&self, args: &RemoteArgs) -> Result<()> {
        let repo = args
            .repo
            .clone()
            .or_else(|| self.config.github.repo.clone())
            .ok_or_else(|| {
                Error::Config("no repository given, pass --repo owner/name or set github.repo".into())
            })?;

        let client = GitHubClient::new(&self.config);
        let renderer = ReportRenderer::new(&self.config.report);

        self.print_status(&format!("Fetching commits from {repo}..."));
        let summaries = match args.since {
            Some(ref since) => client.commits_since(&repo, since).await?,
            None => client.recent_commits(&repo, args.commits).await?,
        };

        let Some(latest) = summaries.first() else {
            self.print_info("No commits found");
            return Ok(());
        };
        let latest_sha = latest.sha.clone();
        self.print_info(&format!("Found {} commits", summaries.len()));

        if args.list_only {
            println!("# Commits from {repo} ({} total)\n", summaries.len());
            for (i, summary) in summaries.iter().enumerate() {
                let subject: String = summary.subject().chars().take(60).collect();
                println!("{}. `{}` - {subject}", i + 1, short_sha(&summary.sha, 12));
            }
            return Ok(());
        }

        let classifier = Classifier::new(&self.config.analysis.ignore)?;
        self.print_status("Analyzing commits for SDK relevance...");
        let pb = progress_bar(summaries.len() as u64);
        let mut commits = Vec::with_capacity(summaries.len());

        for summary in &summaries {
            self.check_cancelled()?;
            pb.set_message(short_sha(&summary.sha, 12).to_string());

            let details = match client.commit_details(&repo, &summary.sha).await {
                Ok(details) => Some(details),
                Err(e) => {
                    warn!(sha = short_sha(&summary.sha, 12), error = %e, "could not fetch commit details");
                    None
                }
            };
            commits.push(RemoteCommit::analyze(&classifier, summary, details));
            pb.inc(1);
        }
        pb.finish_and_clear();

        let relevant: Vec<&RemoteCommit> = commits.iter().filter(|c| c.sdk_relevant()).collect();
        self.print_info(&format!("Found {} SDK-relevant commits", relevant.len()));

        let summary = renderer.remote_summary(&repo, &commits, &latest_sha);

        if let Some(ref dir) = args.output_dir {
            fs::create_dir_all(dir)?;
            fs::write(dir.join("00-summary.md"), &summary)?;
            self.print_status(&format!("Saved: {}", dir.join("00-summary.md").display()));

            for commit in &relevant {
                let filename = format!("{}.md", short_sha(&commit.sha, 12));
                let path = dir.join(&filename);
                if path.exists() {
                    self.print_info(&format!("Skip (exists): {filename}"));
                    continue;
                }
                fs::write(&path, renderer.remote_commit_report(commit))?;
                self.print_status(&format!("Saved: {filename}"));
            }

            self.print_info(&format!("Reports saved to {}/", dir.display()));
            return Ok(());
        }

        if relevant.is_empty() {
            self.print_info("No SDK-relevant changes found");
            return Ok(());
        }

        println!("{summary}");
        println!("\n---\n");
        for commit in relevant {
            println!("{}", renderer.remote_commit_report(commit));
            println!("\n---\n");
        }
        Ok(())
    }

    // ─── Cluster ───

    async fn run_cluster(&self, args: &ClusterArgs) -> Result<()> {
        self.print_status(&format!(
            "Reading reports from {}...",
            args.input_dir.display()
        ));
        let reports = report_parser::load_reports(&args.input_dir)?;

        if reports.is_empty() {
            self.print_info("No reports found to cluster");
            return Ok(());
        }
        self.print_info(&format!("Found {} reports to cluster", reports.len()));

        let mut clusters = cluster::heuristic_cluster(&reports);
        self.print_info(&format!("Created {} initial clusters", clusters.len()));

        if args.use_llm {
            clusters = self.refine_clusters(clusters, args.show_prompt).await?;
        }

        let clusters = cluster::enforce_min_size(clusters, args.min_cluster_size);
        let (multi, singles): (Vec<&Cluster>, Vec<&Cluster>) =
            clusters.iter().partition(|c| c.reports.len() > 1);

        fs::create_dir_all(&args.output_dir)?;
        self.print_status(&format!(
            "Writing output to {}...",
            args.output_dir.display()
        ));

        for c in &multi {
            let path = args.output_dir.join(c.file_name());
            fs::write(&path, cluster::merged_report(c, &self.config.report))?;
            debug!(file = %path.display(), "cluster report written");
        }

        fs::write(
            args.output_dir.join("00-clusters.md"),
            cluster::cluster_summary(&clusters),
        )?;

        let manifest = cluster::manifest(reports.len(), &clusters);
        fs::write(
            args.output_dir.join("clusters.json"),
            serde_json::to_string_pretty(&manifest)?,
        )?;

        println!("{}", "=".repeat(60));
        println!("CLUSTERING SUMMARY");
        println!("{}", "=".repeat(60));
        println!("Input reports:         {}", reports.len());
        println!("Multi-report clusters: {}", multi.len());
        println!("Singleton reports:     {}", singles.len());
        println!(
            "Review runs saved:     {}",
            reports.len().saturating_sub(clusters.len())
        );

        if !multi.is_empty() {
            println!();
            println!("Clusters formed:");
            for c in cluster::sorted(&clusters).into_iter().filter(|c| c.reports.len() > 1) {
                println!("  [{}] {}: {} reports", c.priority, c.name, c.reports.len());
            }
        }

        Ok(())
    }

    /// LLM review of the heuristic clusters. Failures other than cancellation keep the input.
    async fn refine_clusters(&self, clusters: Vec<Cluster>, show_prompt: bool) -> Result<Vec<Cluster>> {
        let prompt = refine::build_prompt(&clusters);

        if show_prompt {
            eprintln!("{}", style("--- PROMPT ---").dim());
            eprintln!("{prompt}");
            eprintln!("{}", style("--- END PROMPT ---").dim());
        }

        match self.request_refinement(&prompt).await {
            Ok(refinement) => {
                if let Some(ref analysis) = refinement.analysis {
                    self.print_info(&format!("LLM analysis: {analysis}"));
                }
                let refined = refine::apply_recommendations(clusters, &refinement);
                self.print_info(&format!("Final cluster count: {}", refined.len()));
                Ok(refined)
            }
            Err(Error::Cancelled) => Err(Error::Cancelled),
            Err(e) => {
                warn!(error = %e, "cluster refinement failed");
                self.print_warning("Could not refine clusters, keeping heuristic clusters");
                Ok(clusters)
            }
        }
    }

    async fn request_refinement(&self, prompt: &str) -> Result<refine::Refinement> {
        let provider = llm::create_provider(&self.config)?;

        self.print_status(&format!(
            "Contacting {} ({})...",
            self.config.provider, self.config.model
        ));
        debug!(provider = provider.name(), "verifying provider");
        provider.verify().await?;

        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        spinner.set_message("Waiting for cluster review...");
        spinner.enable_steady_tick(Duration::from_millis(100));

        let (tx, mut rx) = mpsc::channel::<String>(64);
        let cancel_for_printer = self.cancel_token.clone();
        let progress = spinner.clone();
        let print_handle = tokio::spawn(async move {
            let mut received = 0usize;
            loop {
                tokio::select! {
                    _ = cancel_for_printer.cancelled() => break,
                    token = rx.recv() => {
                        match token {
                            Some(t) => {
                                received += t.len();
                                progress.set_message(format!("Receiving review ({received} chars)"));
                            }
                            None => break,
                        }
                    }
                }
            }
        });

        let response = provider
            .generate(prompt, tx, self.cancel_token.clone())
            .await;
        let _ = print_handle.await;
        spinner.finish_and_clear();

        let response = response?;
        debug!(len = response.len(), "refinement response received");
        refine::parse_refinement(&response)
    }

    // ─── State ───

    fn run_state(&self, args: &StateArgs) -> Result<()> {
        let path = args
            .state_file
            .clone()
            .unwrap_or_else(|| self.config.state_file.clone());
        let mut store = StateStore::load(&path)?;

        match &args.command {
            StateCommand::Mark {
                target,
                status,
                by,
                notes,
                pr,
                jira,
            } => {
                let options = MarkOptions {
                    by: by.clone(),
                    notes: notes.clone(),
                    pr: *pr,
                    jira: jira.clone(),
                };

                let targets = selected(target);
                if targets.is_empty() {
                    return Err(Error::NoMarkTarget);
                }
                for (kind, id) in targets {
                    store.mark(kind, id, *status, &options);
                    println!("Marked {kind} '{id}' as '{status}'");
                }
                store.save()
            }
            StateCommand::List { kind, status } => {
                if matches!(kind, ListKind::Reports | ListKind::All) {
                    print_items(&store.list(ItemKind::Report, *status), ItemKind::Report);
                }
                if matches!(kind, ListKind::Clusters | ListKind::All) {
                    print_items(&store.list(ItemKind::Cluster, *status), ItemKind::Cluster);
                }
                Ok(())
            }
            StateCommand::Summary => {
                print_summary(&store);
                Ok(())
            }
            StateCommand::Sync {
                reports_dir,
                clusters_dir,
            } => {
                let stats = store.sync(reports_dir.as_deref(), clusters_dir.as_deref())?;
                store.save()?;
                println!(
                    "Synced state: {} new reports, {} new clusters",
                    stats.new_reports, stats.new_clusters
                );
                println!("  (kept {} existing items)", stats.existing);
                Ok(())
            }
            StateCommand::Get { target } => {
                let Some((kind, id)) = selected(target).into_iter().next() else {
                    return Err(Error::NoMarkTarget);
                };
                match store.get_json(kind, id) {
                    Ok(value) => {
                        println!("{}", serde_json::to_string_pretty(&value)?);
                        Ok(())
                    }
                    Err(e @ Error::NotTracked { .. }) => {
                        println!("{}", serde_json::json!({ "error": "not found" }));
                        Err(e)
                    }
                    Err(e) => Err(e),
                }
            }
            StateCommand::NeedsAttention => {
                print_attention(&store);
                Ok(())
            }
        }
    }

    fn show_config(&self) {
        let mask = |v: &Option<String>| match v {
            Some(s) if !s.is_empty() => "***",
            _ => "(not set)",
        };

        println!("Provider: {}", self.config.provider);
        println!("Model: {}", self.config.model);
        println!("Ollama host: {}", self.config.ollama_host);
        println!("Anthropic base URL: {}", self.config.anthropic_base_url);
        println!("API key: {}", mask(&self.config.api_key));
        println!("Timeout: {}s", self.config.timeout_secs);
        println!("Temperature: {}", self.config.temperature);
        println!("Max tokens: {}", self.config.max_tokens);
        println!("State file: {}", self.config.state_file.display());
        println!();
        println!("[github]");
        println!("  api_url: {}", self.config.github.api_url);
        println!(
            "  repo: {}",
            self.config.github.repo.as_deref().unwrap_or("(not set)")
        );
        println!("  token: {}", mask(&self.config.github.token));
        println!();
        println!("[report]");
        println!(
            "  jira_base_url: {}",
            self.config
                .report
                .jira_base_url
                .as_deref()
                .unwrap_or("(not set)")
        );
        println!(
            "  regenerate_command: {}",
            self.config.report.regenerate_command
        );
        println!(
            "  max_inline_patch_chars: {}",
            self.config.report.max_inline_patch_chars
        );
        println!(
            "  max_raw_diff_lines: {}",
            self.config.report.max_raw_diff_lines
        );
        println!();
        println!("[analysis]");
        println!("  ignore: {:?}", self.config.analysis.ignore);
    }

    // ─── Output Helpers ───

    fn print_status(&self, msg: &str) {
        eprintln!("{} {}", style("→").cyan(), msg);
    }

    fn print_info(&self, msg: &str) {
        eprintln!("{} {}", style("info:").cyan(), msg);
    }

    fn print_warning(&self, msg: &str) {
        eprintln!("{} {}", style("warning:").yellow().bold(), msg);
    }
}

async fn analyze_range(
    git: &GitService,
    classifier: &Classifier,
    range: &CommitRange,
    repo_path: &str,
    track_commits: bool,
) -> Result<DiffAnalysis> {
    let changes = git.diff_files(range).await?;
    let file_commits = if track_commits {
        Some(git.file_commits(range).await?)
    } else {
        None
    };
    Ok(classifier.analyze(range.as_str(), repo_path, changes, file_commits.as_ref()))
}

fn progress_bar(len: u64) -> ProgressBar {
    let pb = ProgressBar::new(len);
    pb.set_style(
        ProgressStyle::with_template("{spinner:.cyan} [{bar:30.cyan/dim}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );
    pb
}

fn selected(target: &ItemSelector) -> Vec<(ItemKind, &str)> {
    let mut items = Vec::new();
    if let Some(ref report) = target.report {
        items.push((ItemKind::Report, report.as_str()));
    }
    if let Some(ref cluster) = target.cluster {
        items.push((ItemKind::Cluster, cluster.as_str()));
    }
    items
}

fn print_items(items: &[(&str, &crate::domain::TrackedItem)], kind: ItemKind) {
    if items.is_empty() {
        println!("No {} found", kind.plural());
        return;
    }

    println!("\n{} ({} items):", kind.plural().to_uppercase(), items.len());
    println!("{}", "-".repeat(60));

    for (id, item) in items {
        let created = item
            .created_at
            .map(|t| t.format("%Y-%m-%d").to_string())
            .unwrap_or_default();
        println!(
            "  {} [{:12}] {:40} {created}{}",
            item.status.icon(),
            item.status.as_str(),
            id,
            item.extra_info()
        );
    }
}

fn print_summary(store: &StateStore) {
    println!("{}", "=".repeat(50));
    println!("SDK REPORT STATE SUMMARY");
    println!("{}", "=".repeat(50));
    println!(
        "Last updated: {}",
        store
            .state()
            .last_updated
            .map(|t| t.to_rfc3339())
            .unwrap_or_else(|| "Never".into())
    );

    for kind in [ItemKind::Report, ItemKind::Cluster] {
        let counts = store.summary(kind);
        println!();
        println!("{}:", kind.plural().to_uppercase());
        println!("{}", "-".repeat(30));
        for (status, count) in &counts.counts {
            println!("  {} {:15} {count:3}", status.icon(), status.as_str());
        }
        println!("  {}", "─".repeat(20));
        println!("  {:15} {:3}", "Total", counts.total);
    }
}

fn print_attention(store: &StateStore) {
    let attention = store.needs_attention();

    println!("\n🔔 ITEMS NEEDING ATTENTION");
    println!("{}", "=".repeat(50));

    let assigned = |item: &crate::domain::TrackedItem| {
        item.assigned_to
            .clone()
            .unwrap_or_else(|| "unassigned".into())
    };

    if !attention.new_clusters.is_empty() {
        println!("\n{} New clusters ({}):", Status::New.icon(), attention.new_clusters.len());
        for (id, item) in &attention.new_clusters {
            println!(
                "  - {id}: {} ({} reports)",
                item.name.as_deref().unwrap_or("N/A"),
                item.report_count
                    .map(|n| n.to_string())
                    .unwrap_or_else(|| "?".into())
            );
        }
    }

    if !attention.in_progress_clusters.is_empty() {
        println!(
            "\n{} In-progress clusters ({}):",
            Status::InProgress.icon(),
            attention.in_progress_clusters.len()
        );
        for (id, item) in &attention.in_progress_clusters {
            println!(
                "  - {id}: {} (by {})",
                item.name.as_deref().unwrap_or("N/A"),
                assigned(item)
            );
        }
    }

    if !attention.new_reports.is_empty() {
        println!("\n{} New reports ({}):", Status::New.icon(), attention.new_reports.len());
        for (id, _) in attention.new_reports.iter().take(10) {
            println!("  - {id}");
        }
        if attention.new_reports.len() > 10 {
            println!("  ... and {} more", attention.new_reports.len() - 10);
        }
    }

    if !attention.in_progress_reports.is_empty() {
        println!(
            "\n{} In-progress reports ({}):",
            Status::InProgress.icon(),
            attention.in_progress_reports.len()
        );
        for (id, item) in &attention.in_progress_reports {
            println!("  - {id} (by {})", assigned(item));
        }
    }

    match attention.total() {
        0 => println!("\n✅ All caught up! Nothing needs attention."),
        total => println!("\n📊 Total items needing attention: {total}"),
    }
}
