//! ArgMatches → CliAction conversion.
//!
//! Merges command-line overrides over the loaded [`RankConfig`] so that each
//! action carries fully resolved options.

use std::path::PathBuf;

use clap::ArgMatches;
use ranklab_core::{
    Bm25Params, DocumentId, Error, IdfSmoothing, RankConfig, Result, SearchOptions, Tokenization,
    CONFIG_FILE_NAME,
};

/// The result of parsing the command line.
#[derive(Debug, Clone, PartialEq)]
pub enum CliAction {
    /// Rank a corpus.
    Search {
        corpus: PathBuf,
        query: String,
        tokenization: Tokenization,
        options: SearchOptions,
    },
    /// Explain one document's score.
    Explain {
        corpus: PathBuf,
        query: String,
        id: DocumentId,
        tokenization: Tokenization,
        params: Bm25Params,
    },
    /// Re-rank a JSON payload.
    Rerank { payload: PathBuf, explain: bool },
    /// Write a default configuration file.
    InitConfig { path: PathBuf, force: bool },
}

/// Convert parsed arguments into an action.
pub fn matches_to_action(matches: &ArgMatches, config: &RankConfig) -> Result<CliAction> {
    match matches.subcommand() {
        Some(("search", sub)) => {
            let mut options = config.search_options().with_params(params(sub, config));
            if let Some(limit) = sub.get_one::<usize>("limit") {
                options = options.with_limit(*limit);
            }
            if sub.get_flag("matches-only") {
                options = options.matches_only(true);
            }
            if sub.get_flag("no-text") {
                options = options.with_text(false);
            }
            Ok(CliAction::Search {
                corpus: required_path(sub, "corpus")?,
                query: required_str(sub, "query")?,
                tokenization: tokenization(sub, config),
                options,
            })
        }
        Some(("explain", sub)) => Ok(CliAction::Explain {
            corpus: required_path(sub, "corpus")?,
            query: required_str(sub, "query")?,
            id: DocumentId::parse(&required_str(sub, "id")?),
            tokenization: tokenization(sub, config),
            params: params(sub, config),
        }),
        Some(("rerank", sub)) => Ok(CliAction::Rerank {
            payload: required_path(sub, "payload")?,
            explain: sub.get_flag("explain"),
        }),
        Some(("init-config", sub)) => Ok(CliAction::InitConfig {
            path: sub
                .get_one::<String>("path")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(CONFIG_FILE_NAME)),
            force: sub.get_flag("force"),
        }),
        Some((other, _)) => Err(Error::Config(format!("unknown command '{}'", other))),
        None => Err(Error::Config("no command given".to_string())),
    }
}

fn params(sub: &ArgMatches, config: &RankConfig) -> Bm25Params {
    let mut params = config.params();
    if let Some(k1) = sub.get_one::<f64>("k1") {
        params.k1 = *k1;
    }
    if let Some(b) = sub.get_one::<f64>("b") {
        params.b = *b;
    }
    if sub.get_flag("plus-one") {
        params.idf_smoothing = IdfSmoothing::PlusOne;
    }
    params
}

fn tokenization(sub: &ArgMatches, config: &RankConfig) -> Tokenization {
    match sub.get_one::<String>("tokenizer").map(String::as_str) {
        Some("words") => Tokenization::Words,
        Some("whitespace") => Tokenization::Whitespace,
        _ => config.tokenizer,
    }
}

fn required_str(sub: &ArgMatches, name: &str) -> Result<String> {
    sub.get_one::<String>(name)
        .cloned()
        .ok_or_else(|| Error::Config(format!("missing --{}", name)))
}

fn required_path(sub: &ArgMatches, name: &str) -> Result<PathBuf> {
    required_str(sub, name).map(PathBuf::from)
}
