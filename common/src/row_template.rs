//! フォーム行の命名規則
//!
//! 繰り返しフォーム行のフィールドは `<prefix>-<index>-<field>` という
//! name/id を持つ（Django formset 互換。id には `id_` が前置される）。
//! 行番号の書き換えは必ずこの index 部分だけを対象にする。
//! フィールド名側に数字が含まれていても（`sn2`, `part-1-x` など）壊さない。

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Django が id 属性に付ける接頭辞
pub const ID_LEAD: &str = "id_";

/// 分解された name/id 属性
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldName {
    /// `id_` など prefix の前に付いていた部分
    pub lead: String,
    pub prefix: String,
    pub index: usize,
    pub field: String,
}

impl FieldName {
    /// テンプレートを知らない場合の分解（`pre-<n>-post`）
    ///
    /// 最初に現れる数字だけのセグメントを行番号とみなす。
    pub fn split(attr: &str) -> Option<Self> {
        lazy_static! {
            static ref INDEXED_RE: Regex = Regex::new(r"^(.+?)-([0-9]+)-(.+)$").unwrap();
        }
        let caps = INDEXED_RE.captures(attr)?;
        let index = caps[2].parse().ok()?;
        let head = &caps[1];
        let (lead, prefix) = match head.strip_prefix(ID_LEAD) {
            Some(rest) if !rest.is_empty() => (ID_LEAD, rest),
            _ => ("", head),
        };
        Some(Self {
            lead: lead.to_string(),
            prefix: prefix.to_string(),
            index,
            field: caps[3].to_string(),
        })
    }

    /// 元の属性文字列に戻す
    pub fn render(&self) -> String {
        format!("{}{}-{}-{}", self.lead, self.prefix, self.index, self.field)
    }
}

/// 1行分のフィールド名パターン（不変）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowTemplate {
    prefix: String,
    fields: Vec<String>,
    /// 既存行かどうかを判定するフィールド（通常は `id`）
    #[serde(default)]
    identity_field: Option<String>,
}

impl RowTemplate {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            fields: Vec::new(),
            identity_field: None,
        }
    }

    pub fn with_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields = fields.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_identity_field(mut self, field: impl Into<String>) -> Self {
        self.identity_field = Some(field.into());
        self
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    pub fn identity_field(&self) -> Option<&str> {
        self.identity_field.as_deref()
    }

    /// name 属性 `form-0-sn`
    pub fn field_name(&self, index: usize, field: &str) -> String {
        format!("{}-{}-{}", self.prefix, index, field)
    }

    /// id 属性 `id_form-0-sn`
    pub fn field_id(&self, index: usize, field: &str) -> String {
        format!("{}{}", ID_LEAD, self.field_name(index, field))
    }

    /// 管理フォームの name 属性（`form-TOTAL_FORMS` など）
    pub fn management_name(&self, counter: &str) -> String {
        format!("{}-{}", self.prefix, counter)
    }

    /// このテンプレートの prefix に一致する属性だけを分解する
    pub fn parse(&self, attr: &str) -> Option<FieldName> {
        let (lead, rest) = match attr.strip_prefix(ID_LEAD) {
            Some(rest) if rest.starts_with(&self.prefix) => (ID_LEAD, rest),
            _ => ("", attr),
        };
        let rest = rest.strip_prefix(self.prefix.as_str())?.strip_prefix('-')?;
        let (digits, field) = rest.split_once('-')?;
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) || field.is_empty() {
            return None;
        }
        Some(FieldName {
            lead: lead.to_string(),
            prefix: self.prefix.clone(),
            index: digits.parse().ok()?,
            field: field.to_string(),
        })
    }

    /// index 部分だけを書き換える。パターンに合わない属性は None
    pub fn reindex(&self, attr: &str, index: usize) -> Option<String> {
        let mut parsed = self.parse(attr)?;
        parsed.index = index;
        Some(parsed.render())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn template() -> RowTemplate {
        RowTemplate::new("form")
            .with_fields(["id", "sn", "barcode"])
            .with_identity_field("id")
    }

    #[test]
    fn test_field_name_and_id() {
        let t = template();
        assert_eq!(t.field_name(3, "sn"), "form-3-sn");
        assert_eq!(t.field_id(3, "sn"), "id_form-3-sn");
        assert_eq!(t.management_name("TOTAL_FORMS"), "form-TOTAL_FORMS");
    }

    #[test]
    fn test_parse_name_and_id() {
        let t = template();
        let name = t.parse("form-12-barcode").unwrap();
        assert_eq!(name.index, 12);
        assert_eq!(name.field, "barcode");
        assert_eq!(name.lead, "");

        let id = t.parse("id_form-4-sn").unwrap();
        assert_eq!(id.index, 4);
        assert_eq!(id.lead, "id_");
    }

    #[test]
    fn test_parse_rejects_other_prefixes_and_management_fields() {
        let t = template();
        assert!(t.parse("other-1-sn").is_none());
        assert!(t.parse("form-TOTAL_FORMS").is_none());
        assert!(t.parse("form-1-").is_none());
        assert!(t.parse("formx-1-sn").is_none());
    }

    #[test]
    fn test_reindex_only_touches_index_segment() {
        let t = template();
        assert_eq!(t.reindex("form-7-sn2", 0).as_deref(), Some("form-0-sn2"));
        assert_eq!(
            t.reindex("id_form-10-part-3-price", 2).as_deref(),
            Some("id_form-2-part-3-price")
        );
        assert_eq!(t.reindex("form-1-1", 5).as_deref(), Some("form-5-1"));
    }

    #[test]
    fn test_prefix_with_digits_survives_reindex() {
        let t = RowTemplate::new("invoice2");
        assert_eq!(t.reindex("invoice2-4-line9", 1).as_deref(), Some("invoice2-1-line9"));
    }

    #[test]
    fn test_split_without_template() {
        let name = FieldName::split("id_form-3-user").unwrap();
        assert_eq!(name.lead, "id_");
        assert_eq!(name.prefix, "form");
        assert_eq!(name.index, 3);
        assert_eq!(name.field, "user");
        assert_eq!(name.render(), "id_form-3-user");

        let nested = FieldName::split("form-1-part-2-sn").unwrap();
        assert_eq!(nested.index, 1);
        assert_eq!(nested.field, "part-2-sn");

        assert!(FieldName::split("plain_field").is_none());
    }
}
