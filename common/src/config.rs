//! コンソール設定
//!
//! CLIとWeb(WASM)で同じ設定を使う。項目が欠けていれば既定値。

use crate::dispatch::{ActionDispatcher, DEFAULT_BULK_TRANSITIONS};
use crate::error::{Error, Result};
use crate::fill::MAX_FILL_ROWS;
use crate::toggle::DEFAULT_THRESHOLD;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsoleConfig {
    /// 一括実行を許す状態遷移
    pub allowed_transitions: Vec<String>,
    /// formset の prefix
    pub formset_prefix: String,
    /// 「全行に入力」で走査する最大行数
    pub max_fill_rows: usize,
    /// 子要素表示切り替えの既定閾値
    pub visible_threshold: usize,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            allowed_transitions: DEFAULT_BULK_TRANSITIONS.iter().map(|s| s.to_string()).collect(),
            formset_prefix: "form".into(),
            max_fill_rows: MAX_FILL_ROWS,
            visible_threshold: DEFAULT_THRESHOLD,
        }
    }
}

impl ConsoleConfig {
    /// JSON文字列から読み込み
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// JSONファイルから読み込み
    pub fn from_file(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn validate(&self) -> Result<()> {
        if self.formset_prefix.trim().is_empty() {
            return Err(Error::Config("formset_prefix is empty".into()));
        }
        if self.max_fill_rows == 0 {
            return Err(Error::Config("max_fill_rows must be positive".into()));
        }
        Ok(())
    }

    pub fn dispatcher(&self) -> ActionDispatcher {
        ActionDispatcher::with_allowed_transitions(self.allowed_transitions.iter().cloned())
    }

    /// 遷移を許可リストへ追加（重複は追加しない）
    pub fn allow_transition(&mut self, slug: &str) -> bool {
        if self.allowed_transitions.iter().any(|t| t == slug) {
            return false;
        }
        self.allowed_transitions.push(slug.to_string());
        true
    }
}
