//! エラーケーステスト
//!
//! 各種エラー条件でのエラーハンドリングを検証

use assets_console::cli::{FormsetCommand, ReportCommand};
use assets_console::commands::{formset_state, report};
use assets_console::config::Config;
use assets_console::error::ConsoleError;
use assets_console_common::ConsoleConfig;
use std::path::Path;
use tempfile::tempdir;

/// 存在しない状態ファイル
#[test]
fn test_formset_state_not_found() {
    let result = formset_state::run(
        Path::new("/nonexistent/path/12345/state.json"),
        &FormsetCommand::Show,
        &ConsoleConfig::default(),
    );

    assert!(matches!(result.unwrap_err(), ConsoleError::FileNotFound(_)));
}

/// 存在しないレポートファイル
#[test]
fn test_report_not_found() {
    let result = report::run(Path::new("/nonexistent/path/12345/rows.json"), &ReportCommand::Show);
    assert!(matches!(result.unwrap_err(), ConsoleError::FileNotFound(_)));
}

/// 壊れたJSONの状態ファイル
#[test]
fn test_formset_state_invalid_json() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("state.json");
    std::fs::write(&path, "{ invalid }").unwrap();

    let result = formset_state::run(&path, &FormsetCommand::Show, &ConsoleConfig::default());
    assert!(matches!(result.unwrap_err(), ConsoleError::JsonParse(_)));
}

/// 設定ファイルが無ければ既定値
#[test]
fn test_config_missing_file_uses_default() {
    let dir = tempdir().expect("Failed to create temp dir");
    let config = Config::load_from(&dir.path().join("config.json")).unwrap();
    assert_eq!(config, ConsoleConfig::default());
}

/// 不正な設定ファイル
#[test]
fn test_config_invalid_file() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("config.json");
    std::fs::write(&path, r#"{"max_fill_rows": 0}"#).unwrap();

    let err = Config::load_from(&path).unwrap_err();
    assert!(matches!(err, ConsoleError::Core(assets_console_common::Error::Config(_))));
}

/// 全エラーバリアントのDisplay実装確認
#[test]
fn test_error_display() {
    let errors = vec![
        ConsoleError::Config("テスト".to_string()),
        ConsoleError::FileNotFound("/path/to/state.json".to_string()),
        ConsoleError::Fetch("HTTP 500".to_string()),
        ConsoleError::Prompt("中断".to_string()),
    ];

    for err in errors {
        let display = format!("{}", err);
        assert!(!display.is_empty(), "エラーメッセージが空: {:?}", err);
    }
}

/// エラーのDebug実装確認
#[test]
fn test_error_debug() {
    let err = ConsoleError::Config("テスト".to_string());
    let debug = format!("{:?}", err);

    assert!(debug.contains("Config"));
    assert!(debug.contains("テスト"));
}

/// IOエラーからの変換
#[test]
fn test_io_error_conversion() {
    let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
    let err: ConsoleError = io_err.into();

    assert!(matches!(err, ConsoleError::Io(_)));
    let display = format!("{}", err);
    assert!(display.contains("IO"));
}

/// JSONエラーからの変換
#[test]
fn test_json_error_conversion() {
    let json_err = serde_json::from_str::<serde_json::Value>("{ invalid }").unwrap_err();
    let err: ConsoleError = json_err.into();

    assert!(matches!(err, ConsoleError::JsonParse(_)));
}

/// common::Errorからの変換（透過的エラー）
#[test]
fn test_common_error_transparent() {
    let common_err = assets_console_common::Error::TargetNotSpecified {
        attribute: "data-trgt".to_string(),
    };
    let err: ConsoleError = common_err.into();

    assert!(matches!(err, ConsoleError::Core(_)));
    assert_eq!(format!("{}", err), "Attribute 'data-trgt' not specified.");
}
