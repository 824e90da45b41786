//! Remote endpoint configuration.
//!
//! Environment variables win; a `.pinboard.ron` file in the working
//! directory is the fallback. The access key and endpoint have no
//! defaults, the table name defaults to `items`.

use std::env;
use std::fs;
use std::path::Path;

use anyhow::{bail, Context};
use board_logging::board_warn;
use serde::Deserialize;

const CONFIG_FILENAME: &str = ".pinboard.ron";
const ENDPOINT_VAR: &str = "PINBOARD_ENDPOINT";
const API_KEY_VAR: &str = "PINBOARD_API_KEY";
const TABLE_VAR: &str = "PINBOARD_TABLE";
const DEFAULT_TABLE: &str = "items";

#[derive(Debug, Clone)]
pub struct BoardConfig {
    pub endpoint: String,
    pub api_key: String,
    pub table: String,
}

#[derive(Debug, Clone, Deserialize)]
struct ConfigFile {
    endpoint: String,
    api_key: String,
    #[serde(default)]
    table: Option<String>,
}

pub fn load() -> anyhow::Result<BoardConfig> {
    match (env::var(ENDPOINT_VAR), env::var(API_KEY_VAR)) {
        (Ok(endpoint), Ok(api_key)) => {
            let table = env::var(TABLE_VAR).unwrap_or_else(|_| DEFAULT_TABLE.to_string());
            return Ok(BoardConfig {
                endpoint,
                api_key,
                table,
            });
        }
        (Ok(_), Err(_)) | (Err(_), Ok(_)) => {
            board_warn!(
                "Only one of {} and {} is set; falling back to {}",
                ENDPOINT_VAR,
                API_KEY_VAR,
                CONFIG_FILENAME
            );
        }
        (Err(_), Err(_)) => {}
    }
    load_from_file(Path::new(CONFIG_FILENAME))
}

fn load_from_file(path: &Path) -> anyhow::Result<BoardConfig> {
    if !path.exists() {
        bail!(
            "no configuration: set {} and {}, or provide {}",
            ENDPOINT_VAR,
            API_KEY_VAR,
            CONFIG_FILENAME
        );
    }
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;
    let file: ConfigFile = ron::from_str(&content)
        .with_context(|| format!("failed to parse config file {}", path.display()))?;

    Ok(BoardConfig {
        endpoint: file.endpoint,
        api_key: file.api_key,
        table: file.table.unwrap_or_else(|| DEFAULT_TABLE.to_string()),
    })
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::load_from_file;

    #[test]
    fn config_file_parses_with_explicit_table() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".pinboard.ron");
        fs::write(
            &path,
            r#"(
                endpoint: "https://example.supabase.co",
                api_key: "anon-key",
                table: Some("chores"),
            )"#,
        )
        .unwrap();

        let config = load_from_file(&path).unwrap();
        assert_eq!(config.endpoint, "https://example.supabase.co");
        assert_eq!(config.api_key, "anon-key");
        assert_eq!(config.table, "chores");
    }

    #[test]
    fn table_defaults_to_items() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".pinboard.ron");
        fs::write(
            &path,
            r#"(
                endpoint: "https://example.supabase.co",
                api_key: "anon-key",
            )"#,
        )
        .unwrap();

        let config = load_from_file(&path).unwrap();
        assert_eq!(config.table, "items");
    }

    #[test]
    fn missing_file_is_a_clear_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_from_file(&dir.path().join(".pinboard.ron")).unwrap_err();
        assert!(err.to_string().contains("no configuration"));
    }

    #[test]
    fn malformed_file_is_a_clear_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".pinboard.ron");
        fs::write(&path, "not ron at all").unwrap();

        let err = load_from_file(&path).unwrap_err();
        assert!(err.to_string().contains("failed to parse"));
    }
}
