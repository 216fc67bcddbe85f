//! `minipod add <podName> <podVersion> [-r <repoName>] [--dry-run]`

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::builder::NonEmptyStringValueParser;
use clap::Args;

use minipod_core::{config, MirrorLayout, PodIdentity, RepoName};
use minipod_sync::{add_pod, check_repo, AddError, AddEvent, GitMirror, HttpFetcher, Reporter};

/// Arguments for `minipod add`.
#[derive(Args, Debug)]
pub struct AddArgs {
    /// Pod name as published on the CocoaPods trunk (e.g. "AFNetworking").
    #[arg(value_parser = NonEmptyStringValueParser::new())]
    pub pod_name: String,

    /// Exact pod version (e.g. "3.1.0").
    #[arg(value_parser = NonEmptyStringValueParser::new())]
    pub pod_version: String,

    /// Repo name under the ~/.cocoapods/repos folder. Defaults to
    /// `default_repo` from ~/.minipod/config.yaml.
    #[arg(long, short = 'r', value_name = "REPO", value_parser = NonEmptyStringValueParser::new())]
    pub repo: Option<String>,

    /// Show where the spec would be downloaded from and written to, without
    /// touching the repo or the network.
    #[arg(long)]
    pub dry_run: bool,
}

/// Prints operator messages on stdout, one per line.
struct StdoutReporter;

impl Reporter for StdoutReporter {
    fn report(&mut self, event: AddEvent) {
        println!("{event}");
    }
}

impl AddArgs {
    pub fn run(self) -> Result<ExitCode> {
        let home = dirs::home_dir().context("could not determine home directory")?;
        let cfg = config::load_at(&home).context("failed to load config")?;

        let repo = match self.repo.map(RepoName::from).or_else(|| cfg.default_repo.clone()) {
            Some(repo) => repo,
            None => anyhow::bail!(
                "no repo given; pass --repo <REPO> or set default_repo in {}",
                config::config_path_at(&home).display()
            ),
        };
        let pod = PodIdentity::new(self.pod_name, self.pod_version);
        let layout = MirrorLayout::new(cfg);

        let repo_dir = match check_repo(&layout, &repo) {
            Ok(dir) => dir,
            Err(err @ AddError::RepoMissing { .. }) => {
                println!("{err}");
                return Ok(ExitCode::FAILURE);
            }
            Err(err) => return Err(err.into()),
        };
        tracing::debug!("using repo[{repo}] at {}", repo_dir.display());

        if self.dry_run {
            let paths = layout.resolve(&repo, &pod);
            println!("[dry-run] pod {pod} → repo[{repo}]");
            println!("  download  {}", paths.upstream_url);
            println!("  write     {}", paths.local_spec_file.display());
            println!("  commit    {}", minipod_sync::commit_message(&pod));
            return Ok(ExitCode::SUCCESS);
        }

        let fetcher = HttpFetcher::new();
        let mirror = GitMirror::new(repo_dir);
        add_pod(
            &layout,
            &repo,
            &pod,
            &fetcher,
            &mirror,
            &mut StdoutReporter,
        )
        .with_context(|| format!("failed to add {pod} to repo[{repo}]"))?;

        Ok(ExitCode::SUCCESS)
    }
}
