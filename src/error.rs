use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConsoleError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("{0}")]
    Core(#[from] assets_console_common::Error),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error("サマリー取得エラー: {0}")]
    Fetch(String),

    #[error("入力エラー: {0}")]
    Prompt(String),
}

pub type Result<T> = std::result::Result<T, ConsoleError>;
