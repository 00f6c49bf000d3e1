//! Clap command tree definition.

use clap::{value_parser, Arg, ArgAction, Command};

/// Build the complete CLI command tree.
pub fn build_cli() -> Command {
    Command::new("ranklab")
        .about("BM25 ranking and hybrid lexical/vector re-ranking")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .long("config")
                .help("Configuration file (default: ./ranklab.toml if present)")
                .global(true),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .help("JSON output mode")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Debug logging on stderr")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand(build_search())
        .subcommand(build_explain())
        .subcommand(build_rerank())
        .subcommand(build_init_config())
}

// =========================================================================
// Shared arguments
// =========================================================================

fn corpus_arg() -> Arg {
    Arg::new("corpus")
        .long("corpus")
        .required(true)
        .help("Corpus file: JSON array of {\"id\", \"text\"} or one document per line")
}

fn query_arg() -> Arg {
    Arg::new("query")
        .long("query")
        .short('q')
        .required(true)
        .help("Query text")
}

fn params_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("k1")
            .long("k1")
            .value_parser(value_parser!(f64))
            .help("Term frequency saturation (default from config, 1.5)"),
    )
    .arg(
        Arg::new("b")
            .long("b")
            .value_parser(value_parser!(f64))
            .help("Length normalization (default from config, 0.75)"),
    )
    .arg(
        Arg::new("tokenizer")
            .long("tokenizer")
            .value_parser(["whitespace", "words"])
            .help("Tokenization rule (default from config, whitespace)"),
    )
    .arg(
        Arg::new("plus-one")
            .long("plus-one")
            .action(ArgAction::SetTrue)
            .help("Use ln(... + 1) IDF smoothing"),
    )
}

// =========================================================================
// Search
// =========================================================================

fn build_search() -> Command {
    let cmd = Command::new("search")
        .about("Rank every document of a corpus against a query")
        .arg(corpus_arg())
        .arg(query_arg())
        .arg(
            Arg::new("limit")
                .long("limit")
                .short('k')
                .value_parser(value_parser!(usize))
                .help("Maximum results, 0 for all (default from config, 0)"),
        )
        .arg(
            Arg::new("matches-only")
                .long("matches-only")
                .action(ArgAction::SetTrue)
                .help("Drop documents containing no query term"),
        )
        .arg(
            Arg::new("no-text")
                .long("no-text")
                .action(ArgAction::SetTrue)
                .help("Omit document text from results"),
        );
    params_args(cmd)
}

// =========================================================================
// Explain
// =========================================================================

fn build_explain() -> Command {
    let cmd = Command::new("explain")
        .about("Show the per-term score breakdown of one document")
        .arg(corpus_arg())
        .arg(query_arg())
        .arg(
            Arg::new("id")
                .long("id")
                .required(true)
                .help("Document id"),
        );
    params_args(cmd)
}

// =========================================================================
// Rerank
// =========================================================================

fn build_rerank() -> Command {
    Command::new("rerank")
        .about("Merge lexical and vector result lists into one ranking")
        .arg(
            Arg::new("payload")
                .long("payload")
                .required(true)
                .help("JSON payload file, or - for stdin"),
        )
        .arg(
            Arg::new("explain")
                .long("explain")
                .action(ArgAction::SetTrue)
                .help("Include the calculation steps"),
        )
}

// =========================================================================
// Init config
// =========================================================================

fn build_init_config() -> Command {
    Command::new("init-config")
        .about("Write a default ranklab.toml")
        .arg(
            Arg::new("path")
                .help("Destination (default: ./ranklab.toml)")
                .required(false),
        )
        .arg(
            Arg::new("force")
                .long("force")
                .action(ArgAction::SetTrue)
                .help("Overwrite an existing file"),
        )
}
