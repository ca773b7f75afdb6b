//! `pool-review` command line
//!
//! Writes a review of the changes in a pool checkout to a file. Exits with
//! status 1 and a single error line when a collaborator fails.

use anyhow::Context;
use clap::{value_parser, Arg, ArgMatches, Command};
use pool_review::{
    ChangesetSource, GitChangeset, NameStatusChangeset, OutputFormat, ReviewConfig, ReviewEngine,
    ReviewError,
};
use pool_store::MemoryPool;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn cli() -> Command {
    Command::new("pool-review")
        .version(pool_review::VERSION)
        .about("Review pool pull requests")
        .arg(
            Arg::new("pool")
                .value_name("POOL_DIR")
                .required(true)
                .value_parser(value_parser!(PathBuf))
                .help("Pool directory"),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .required(true)
                .value_parser(value_parser!(PathBuf))
                .help("Output filename"),
        )
        .arg(
            Arg::new("snapshot")
                .long("snapshot")
                .value_parser(value_parser!(PathBuf))
                .help("Pool snapshot (default: <POOL_DIR>/pool.json)"),
        )
        .arg(
            Arg::new("base")
                .long("base")
                .help("Base revision to compare against (default: master)"),
        )
        .arg(
            Arg::new("changes")
                .long("changes")
                .value_parser(value_parser!(PathBuf))
                .help("Read changed files from `git diff --name-status` output instead of git"),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .value_parser(value_parser!(PathBuf))
                .help("Review config (TOML)"),
        )
        .arg(
            Arg::new("format")
                .long("format")
                .default_value("markdown")
                .value_parser(["markdown", "json"])
                .help("Output format"),
        )
}

fn main() -> ExitCode {
    // Logs go to stderr so the report output stays clean
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let matches = cli().get_matches();
    match run(&matches) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::from(1)
        }
    }
}

fn run(matches: &ArgMatches) -> anyhow::Result<()> {
    let pool_dir = matches
        .get_one::<PathBuf>("pool")
        .context("pool path not specified")?;
    let output = matches
        .get_one::<PathBuf>("output")
        .context("output filename not specified")?;

    let mut config = match matches.get_one::<PathBuf>("config") {
        Some(path) => ReviewConfig::load(path).map_err(ReviewError::from)?,
        None => ReviewConfig::default(),
    };
    if let Some(base) = matches.get_one::<String>("base") {
        config = config.with_base_ref(base);
    }

    let format: OutputFormat = matches
        .get_one::<String>("format")
        .map_or(Ok(OutputFormat::default()), |s| s.parse())
        .map_err(anyhow::Error::msg)?;

    let snapshot = matches
        .get_one::<PathBuf>("snapshot")
        .cloned()
        .unwrap_or_else(|| pool_dir.join(&config.snapshot_file));
    let pool = MemoryPool::load(&snapshot).map_err(ReviewError::from)?;

    let source = changeset_source(matches.get_one::<PathBuf>("changes"), pool_dir, &config);
    let engine = ReviewEngine::new(pool, config);
    let report = engine.review(source.as_ref())?;

    let rendered = format.render(&report)?;
    std::fs::write(output, rendered)
        .with_context(|| format!("cannot write {}", output.display()))?;
    tracing::info!("Wrote {} review to {}", format, output.display());
    Ok(())
}

fn changeset_source(
    changes: Option<&PathBuf>,
    pool_dir: &Path,
    config: &ReviewConfig,
) -> Box<dyn ChangesetSource> {
    match changes {
        Some(path) => Box::new(NameStatusChangeset::from_file(path)),
        None => Box::new(GitChangeset::new(pool_dir).with_base_ref(&config.base_ref)),
    }
}
