use anyhow::{Context, Result, bail};
use clap::Parser;
use reqwest::Url;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_API_BASE: &str = "http://localhost:8000/youtube";

#[derive(Parser, Debug)]
#[command(author, version, about = "Terminal client for a video download backend")]
pub struct Cli {
    /// Video URL to prefill.
    pub url: Option<String>,

    /// Backend base address; endpoints are `{base}/formats` and `{base}/download/*`.
    #[arg(long, env = "YTGRAB_API_BASE", default_value = DEFAULT_API_BASE)]
    pub api_base: String,

    /// Where "Download Link" saves files.
    #[arg(short, long, default_value = ".")]
    pub output_dir: PathBuf,

    #[arg(long, default_value = "ytgrab.log")]
    pub log_file: PathBuf,

    /// UI language (en, ko). Defaults to LANG.
    #[arg(long)]
    pub lang: Option<String>,

    /// Give up on backend requests after this many seconds. Unset waits forever.
    #[arg(long)]
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub api_base: String,
    pub initial_url: String,
    pub output_dir: PathBuf,
    pub log_file: PathBuf,
    pub lang: Option<String>,
    pub timeout: Option<Duration>,
}

impl Config {
    pub fn from_cli(cli: Cli) -> Result<Self> {
        let base = cli.api_base.trim().trim_end_matches('/');
        let parsed = Url::parse(base).with_context(|| format!("invalid --api-base {base:?}"))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            bail!("--api-base must be an http(s) URL, got {base:?}");
        }

        Ok(Self {
            api_base: base.to_string(),
            initial_url: cli.url.unwrap_or_default(),
            output_dir: cli.output_dir,
            log_file: cli.log_file,
            lang: cli.lang,
            timeout: cli.timeout_secs.filter(|s| *s > 0).map(Duration::from_secs),
        })
    }
}
