//! 一覧・一括操作で共有される型
//!
//! - RecordId: 一覧の行（資産など）の識別子
//! - QueryString: 現在の絞り込み条件（`window.location.search` 相当）

use serde::{Deserialize, Serialize};
use std::fmt;

/// レコード識別子（サーバー側のIDをそのまま保持する）
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RecordId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for RecordId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<u64> for RecordId {
    fn from(n: u64) -> Self {
        Self(n.to_string())
    }
}

/// 絞り込み条件のクエリ文字列
///
/// 全ページ選択時にはサーバーへそのまま渡すため、生の文字列を保持する。
/// 先頭の `?` は取り除いた形で持つ。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QueryString(String);

impl QueryString {
    /// `?status=new` でも `status=new` でも受け付ける
    pub fn new(raw: impl AsRef<str>) -> Self {
        let raw = raw.as_ref();
        Self(raw.strip_prefix('?').unwrap_or(raw).to_string())
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// 先頭の `?` を除いた生の文字列
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// キーと値の組（デコードなし、出現順）
    pub fn pairs(&self) -> Vec<(&str, &str)> {
        self.0
            .split('&')
            .filter(|p| !p.is_empty())
            .map(|p| p.split_once('=').unwrap_or((p, "")))
            .collect()
    }

    /// 指定キーの最初の値
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs().into_iter().find(|(k, _)| *k == key).map(|(_, v)| v)
    }
}

impl fmt::Display for QueryString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_id_from_number() {
        let id = RecordId::from(42u64);
        assert_eq!(id.as_str(), "42");
        assert_eq!(id.to_string(), "42");
    }

    #[test]
    fn test_record_id_serializes_as_plain_string() {
        let json = serde_json::to_string(&RecordId::from("7")).expect("シリアライズ失敗");
        assert_eq!(json, "\"7\"");
    }

    #[test]
    fn test_query_string_strips_leading_question_mark() {
        assert_eq!(QueryString::new("?status=new").as_str(), "status=new");
        assert_eq!(QueryString::new("status=new").as_str(), "status=new");
        assert!(QueryString::new("?").is_empty());
    }

    #[test]
    fn test_query_string_pairs_keep_order_and_duplicates() {
        let q = QueryString::new("?status=new&sn=&status=used&flag");
        assert_eq!(
            q.pairs(),
            vec![("status", "new"), ("sn", ""), ("status", "used"), ("flag", "")]
        );
        assert_eq!(q.get("status"), Some("new"));
        assert_eq!(q.get("missing"), None);
    }
}
