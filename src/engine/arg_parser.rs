use clap::Parser;
use std::path::PathBuf;

/// Find container build files across a GitHub organization and list the base images they use.
#[derive(Clone, Debug, Parser)]
#[command(name = "fromscan")]
#[command(about = "List base images declared in Dockerfiles across a GitHub organization.")]
pub struct Cli {
    /// GitHub organization to scan. Required here or in .fromscan.toml.
    #[arg(long, short = 'o')]
    pub org: Option<String>,

    /// Only scan this repository inside the organization.
    #[arg(long, short = 'r', alias = "repo-name")]
    pub repo: Option<String>,

    /// File name to search for. Default: Dockerfile.
    #[arg(long, short = 'n')]
    pub file_name: Option<String>,

    /// GitHub token for private repositories. Falls back to FROMSCAN_GH_TOKEN / GITHUB_TOKEN (env or .env).
    #[arg(long)]
    pub gh_token: Option<String>,

    /// Prompt for a token when none is found on the command line or in the environment.
    #[arg(long, num_args = 0..=1, default_missing_value = "true", value_parser = clap::value_parser!(bool))]
    pub prompt_token: Option<bool>,

    /// Number of workers fetching files in parallel. Clamped to the number of files found.
    #[arg(long, short = 'w', alias = "no-of-workers", value_parser = clap::value_parser!(u64).range(1..))]
    pub workers: Option<u64>,

    /// Write the image → files mapping to the output file.
    #[arg(long, short = 'g', num_args = 0..=1, default_missing_value = "true", value_parser = clap::value_parser!(bool))]
    pub generate_output_file: Option<bool>,

    /// Output file path. Default: ./containerImageFiles.json
    #[arg(long)]
    pub output_file: Option<PathBuf>,

    /// Abort a single download after this many seconds (0 = wait forever).
    #[arg(long)]
    pub fetch_timeout: Option<u64>,

    /// Verbose output.
    #[arg(long, short = 'v', num_args = 0..=1, default_missing_value = "true", value_parser = clap::value_parser!(bool))]
    pub verbose: Option<bool>,
}
