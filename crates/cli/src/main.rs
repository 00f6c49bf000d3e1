//! ranklab CLI: BM25 search, score explanation, and hybrid re-ranking.
//!
//! Usage:
//! - `ranklab search --corpus docs.json -q "chocolate cake"`
//! - `ranklab explain --corpus docs.json -q "chocolate cake" --id 103`
//! - `ranklab rerank --payload results.json --explain`
//! - `ranklab init-config`

mod commands;
mod format;
mod input;
mod parse;

use std::path::Path;
use std::process;

use ranklab_core::{Error, RankConfig, Result, CONFIG_FILE_NAME};
use tracing::info;
use tracing_subscriber::EnvFilter;

use commands::build_cli;
use format::{
    format_error, format_explanation, format_rerank, format_rerank_explained, format_search,
    OutputMode,
};
use parse::{matches_to_action, CliAction};

fn main() {
    let matches = build_cli().get_matches();

    let level = if matches.get_flag("verbose") {
        "debug"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let mode = if matches.get_flag("json") {
        OutputMode::Json
    } else {
        OutputMode::Human
    };

    let result = load_config(matches.get_one::<String>("config").map(Path::new))
        .and_then(|config| matches_to_action(&matches, &config))
        .and_then(|action| run(action, mode));

    match result {
        Ok(output) => {
            if !output.is_empty() {
                println!("{}", output);
            }
        }
        Err(e) => {
            eprintln!("{}", format_error(&e, mode));
            process::exit(1);
        }
    }
}

/// Explicit `--config` must exist; the implicit `./ranklab.toml` is optional.
fn load_config(explicit: Option<&Path>) -> Result<RankConfig> {
    match explicit {
        Some(path) => RankConfig::from_file(path),
        None => {
            let implicit = Path::new(CONFIG_FILE_NAME);
            if implicit.is_file() {
                RankConfig::from_file(implicit)
            } else {
                Ok(RankConfig::default())
            }
        }
    }
}

fn run(action: CliAction, mode: OutputMode) -> Result<String> {
    match action {
        CliAction::Search {
            corpus,
            query,
            tokenization,
            options,
        } => {
            options.params.validate()?;
            let corpus = input::load_corpus(&corpus, tokenization)?;
            let results = corpus.search(&query, &options);
            Ok(format_search(&query, &results, mode))
        }
        CliAction::Explain {
            corpus,
            query,
            id,
            tokenization,
            params,
        } => {
            params.validate()?;
            let corpus = input::load_corpus(&corpus, tokenization)?;
            let explanation = corpus.explain(&query, &id, &params)?;
            Ok(format_explanation(&explanation, mode))
        }
        CliAction::Rerank { payload, explain } => {
            let payload = input::load_payload(&payload)?;
            let query = payload.query.as_deref();
            if explain {
                let explanation = payload.rerank_explained();
                Ok(format_rerank_explained(query, &explanation, payload.skipped, mode))
            } else {
                let results = payload.rerank();
                Ok(format_rerank(query, &results, payload.skipped, mode))
            }
        }
        CliAction::InitConfig { path, force } => init_config(&path, force),
    }
}

fn init_config(path: &Path, force: bool) -> Result<String> {
    if path.exists() && !force {
        return Err(Error::Config(format!(
            "{} already exists (use --force to overwrite)",
            path.display()
        )));
    }
    RankConfig::default().write_to_file(path)?;
    info!(path = %path.display(), "wrote default configuration");
    Ok(format!("Wrote {}", path.display()))
}
