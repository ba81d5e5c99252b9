//! 宣言的な data 属性と、子要素の表示切り替えボタン
//!
//! `data-trgt`      表示を切り替える子要素を持つ要素の id（必須）
//! `data-threshold` 常に表示しておく子要素の数（既定 5）
//! `data-alt-msg`   切り替え後のボタン文言（押すたびに現在の文言と入れ替わる）

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const ATTR_TARGET: &str = "data-trgt";
pub const ATTR_THRESHOLD: &str = "data-threshold";
pub const ATTR_ALT_MSG: &str = "data-alt-msg";
pub const ATTR_TRANSITION_TYPE: &str = "data-transition-type";
pub const ATTR_SELECTED: &str = "data-selected";
pub const ATTR_SEARCHED_ITEMS: &str = "data-searched-items";

pub const DEFAULT_THRESHOLD: usize = 5;

/// 要素の data 属性
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DataAttributes(BTreeMap<String, String>);

impl DataAttributes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: &str, value: &str) -> Self {
        self.0.insert(name.to_string(), value.to_string());
        self
    }

    pub fn set(&mut self, name: &str, value: &str) {
        self.0.insert(name.to_string(), value.to_string());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    /// 空でない値が必須の属性
    pub fn require(&self, name: &str) -> Result<&str> {
        match self.get(name) {
            Some(value) if !value.trim().is_empty() => Ok(value),
            _ => Err(Error::TargetNotSpecified {
                attribute: name.to_string(),
            }),
        }
    }

    /// 真偽値の属性（jQuery の `.data()` と同じく `true` / `1` を真とみなす）
    pub fn flag(&self, name: &str) -> bool {
        matches!(self.get(name).map(str::trim), Some("true") | Some("1"))
    }

    /// 数値の属性。空なら既定値、数値でなければエラー
    pub fn usize_or(&self, name: &str, default: usize) -> Result<usize> {
        match self.get(name).map(str::trim) {
            None | Some("") => Ok(default),
            Some(raw) => raw.parse().map_err(|_| Error::InvalidAttribute {
                attribute: name.to_string(),
                value: raw.to_string(),
            }),
        }
    }
}

/// 「もっと見る / 閉じる」ボタン
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChildDisplayToggle {
    pub target_id: String,
    pub threshold: usize,
    pub label: String,
    pub alt_label: Option<String>,
}

impl ChildDisplayToggle {
    /// ボタンの属性から作る。`data-trgt` が無ければ設定エラー
    pub fn from_attributes(attrs: &DataAttributes, label: &str) -> Result<Self> {
        Self::from_attributes_or(attrs, label, DEFAULT_THRESHOLD)
    }

    /// `data-threshold` が無いときの閾値を指定して作る
    pub fn from_attributes_or(attrs: &DataAttributes, label: &str, default_threshold: usize) -> Result<Self> {
        Ok(Self {
            target_id: attrs.require(ATTR_TARGET)?.to_string(),
            threshold: attrs.usize_or(ATTR_THRESHOLD, default_threshold)?,
            label: label.to_string(),
            alt_label: attrs.get(ATTR_ALT_MSG).map(str::to_string),
        })
    }

    /// 閾値より後ろの子要素の表示を反転し、文言を入れ替える
    pub fn toggle(&mut self, children_visible: &mut [bool]) {
        for visible in children_visible.iter_mut().skip(self.threshold) {
            *visible = !*visible;
        }
        if let Some(alt) = self.alt_label.take() {
            self.alt_label = Some(std::mem::replace(&mut self.label, alt));
        }
    }
}
