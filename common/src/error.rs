//! エラー型定義

use std::fmt;
use thiserror::Error;

/// 自動補完フィールドのどちら側が壊れているか
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Source,
    Destination,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Source => write!(f, "source"),
            Side::Destination => write!(f, "destination"),
        }
    }
}

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Attribute '{attribute}' not specified.")]
    TargetNotSpecified { attribute: String },

    #[error("Attribute '{attribute}' has invalid value: {value}")]
    InvalidAttribute { attribute: String, value: String },

    #[error("Missing hidden input on {side} side in container '{container}'")]
    MissingHiddenInput { side: Side, container: String },

    #[error("Unknown field: {0}")]
    UnknownField(String),
}

impl Error {
    /// 設定不備（マークアップ修正が必要）かどうか
    pub fn is_configuration_defect(&self) -> bool {
        matches!(
            self,
            Error::TargetNotSpecified { .. }
                | Error::InvalidAttribute { .. }
                | Error::MissingHiddenInput { .. }
                | Error::Config(_)
        )
    }
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;
