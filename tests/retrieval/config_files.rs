//! Configuration files driving search.

use crate::fixtures::recipes;
use ranklab::{IdfSmoothing, RankConfig, Tokenization, CONFIG_FILE_NAME};

#[test]
fn default_file_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(CONFIG_FILE_NAME);

    RankConfig::write_default_if_missing(&path).unwrap();
    assert_eq!(RankConfig::from_file(&path).unwrap(), RankConfig::default());

    // a second call leaves an edited file alone
    std::fs::write(&path, "k1 = 2.0\n").unwrap();
    RankConfig::write_default_if_missing(&path).unwrap();
    assert_eq!(RankConfig::from_file(&path).unwrap().k1, 2.0);
}

#[test]
fn custom_file_changes_results() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(CONFIG_FILE_NAME);
    std::fs::write(
        &path,
        r#"
k1 = 1.2
b = 0.5
idf_smoothing = "plus_one"
tokenizer = "words"
limit = 2
matches_only = true
"#,
    )
    .unwrap();

    let config = RankConfig::from_file(&path).unwrap();
    assert_eq!(config.idf_smoothing, IdfSmoothing::PlusOne);
    assert_eq!(config.tokenizer, Tokenization::Words);

    let results = recipes().search("cake", &config.search_options());
    assert_eq!(results.len(), 2);
    assert!(results.iter().all(|r| r.score > 0.0));
}

#[test]
fn written_config_reloads_identically() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("custom.toml");
    let config = RankConfig {
        k1: 0.9,
        limit: 10,
        ..RankConfig::default()
    };
    config.write_to_file(&path).unwrap();
    assert_eq!(RankConfig::from_file(&path).unwrap(), config);
}

#[test]
fn non_finite_parameter_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(CONFIG_FILE_NAME);
    std::fs::write(&path, "b = nan\n").unwrap();
    assert!(RankConfig::from_file(&path).is_err());
}
