//! 繰り返しフォーム行（formset）の管理
//!
//! 行の追加・削除のたびに index を 0 から振り直し、name/id と
//! サーバーが読む `TOTAL_FORMS` / `INITIAL_FORMS` を行の並びに合わせる。
//! どの操作も途中状態を残さない（カウンタ更新と振り直しは常に一緒に行う）。

use crate::row_template::RowTemplate;
use log::debug;
use serde::{Deserialize, Serialize};

/// 最低限残す行数
pub const MIN_ROWS: usize = 1;

pub const TOTAL_FORMS: &str = "TOTAL_FORMS";
pub const INITIAL_FORMS: &str = "INITIAL_FORMS";

/// 自動補完ウィジェットが実際に送信する値を持つ hidden input
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HiddenInput {
    pub name: String,
    pub id: String,
    #[serde(default)]
    pub value: String,
}

/// フィールドの入力部品
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Widget {
    #[default]
    Plain,
    /// 表示値と送信値が別（送信値は同じコンテナ内の hidden input）
    Autocomplete { hidden: Option<HiddenInput> },
}

/// 1つの入力フィールド
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormField {
    /// 論理フィールド名（`sn`, `user` など）
    pub key: String,
    pub name: String,
    pub id: String,
    #[serde(default)]
    pub value: String,
    #[serde(default)]
    pub has_error: bool,
    /// インラインのバリデーションメッセージ
    #[serde(default)]
    pub messages: Vec<String>,
    #[serde(default)]
    pub widget: Widget,
}

impl FormField {
    /// テンプレートの命名規則に沿った空フィールド
    pub fn blank(template: &RowTemplate, index: usize, key: &str) -> Self {
        Self {
            key: key.to_string(),
            name: template.field_name(index, key),
            id: template.field_id(index, key),
            value: String::new(),
            has_error: false,
            messages: Vec::new(),
            widget: Widget::Plain,
        }
    }

    /// 自動補完ウィジェット化する（hidden の name/id は本体と同じ規則）
    pub fn autocompleted(mut self) -> Self {
        let hidden = HiddenInput {
            name: self.name.clone(),
            id: self.id.clone(),
            value: String::new(),
        };
        self.name.push_str("_text");
        self.id.push_str("_text");
        self.widget = Widget::Autocomplete { hidden: Some(hidden) };
        self
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    pub fn is_autocompleted(&self) -> bool {
        matches!(self.widget, Widget::Autocomplete { .. })
    }

    pub fn hidden(&self) -> Option<&HiddenInput> {
        match &self.widget {
            Widget::Autocomplete { hidden } => hidden.as_ref(),
            Widget::Plain => None,
        }
    }

    pub fn hidden_mut(&mut self) -> Option<&mut HiddenInput> {
        match &mut self.widget {
            Widget::Autocomplete { hidden } => hidden.as_mut(),
            Widget::Plain => None,
        }
    }

    /// サーバーへ送られる値
    pub fn submitted_value(&self) -> &str {
        match self.hidden() {
            Some(hidden) => &hidden.value,
            None => &self.value,
        }
    }

    /// name/id/hidden のいずれかが属性に一致するか
    pub fn answers_to(&self, attr: &str) -> bool {
        self.name == attr
            || self.id == attr
            || self.hidden().is_some_and(|h| h.name == attr || h.id == attr)
    }

    fn clear(&mut self) {
        self.value.clear();
        self.has_error = false;
        self.messages.clear();
        if let Some(hidden) = self.hidden_mut() {
            hidden.value.clear();
        }
    }

    fn reindex(&mut self, template: &RowTemplate, index: usize) {
        reindex_attr(template, &mut self.name, index);
        reindex_attr(template, &mut self.id, index);
        if let Some(hidden) = self.hidden_mut() {
            reindex_attr(template, &mut hidden.name, index);
            reindex_attr(template, &mut hidden.id, index);
        }
    }
}

fn reindex_attr(template: &RowTemplate, attr: &mut String, index: usize) {
    if let Some(renamed) = template.reindex(attr, index) {
        *attr = renamed;
    }
}

/// フォーム1行
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormRow {
    pub index: usize,
    pub fields: Vec<FormField>,
    /// ページ描画時から存在した行か
    #[serde(default)]
    pub is_initial: bool,
    /// 画面表示用の通し番号（1始まり）
    #[serde(default)]
    pub ordinal: usize,
}

impl FormRow {
    /// テンプレートの全フィールドを空で持つ行
    pub fn blank(template: &RowTemplate, index: usize) -> Self {
        Self {
            index,
            fields: template
                .fields()
                .iter()
                .map(|key| FormField::blank(template, index, key))
                .collect(),
            is_initial: false,
            ordinal: index + 1,
        }
    }

    pub fn initial(mut self) -> Self {
        self.is_initial = true;
        self
    }

    pub fn field(&self, key: &str) -> Option<&FormField> {
        self.fields.iter().find(|f| f.key == key)
    }

    pub fn field_mut(&mut self, key: &str) -> Option<&mut FormField> {
        self.fields.iter_mut().find(|f| f.key == key)
    }

    /// サーバー由来の行か（`is_initial` または identity が空でも 0 でもない）
    pub fn is_existing(&self, identity_field: Option<&str>) -> bool {
        if self.is_initial {
            return true;
        }
        identity_field
            .and_then(|key| self.field(key))
            .map(|f| {
                let v = f.submitted_value().trim();
                !v.is_empty() && v != "0"
            })
            .unwrap_or(false)
    }

    /// 複製元から新しい行を作る: 値・エラー表示・メッセージを消す
    fn cleaned_clone(&self) -> Self {
        let mut row = self.clone();
        for field in &mut row.fields {
            field.clear();
        }
        row.is_initial = false;
        row
    }
}

/// サーバーが読む管理フォームの値
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManagementCounters {
    pub total_forms: usize,
    pub initial_forms: usize,
}

/// ある行のフィールドが変わったときに同じ行の別フィールドを合わせる規則
///
/// 例: `user` が選ばれたら `status` を `in progress` にする。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldLink {
    pub trigger: String,
    pub target: String,
    pub value: String,
}

impl FieldLink {
    pub fn user_sets_in_progress() -> Self {
        Self {
            trigger: "user".into(),
            target: "status".into(),
            value: "in progress".into(),
        }
    }
}

fn default_min_rows() -> usize {
    MIN_ROWS
}

/// 順序付きの行の集まり
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormCollection {
    template: RowTemplate,
    rows: Vec<FormRow>,
    /// 追加時に複製する雛形行（無ければ最終行を複製）
    #[serde(default)]
    blank_row: Option<FormRow>,
    /// 最終行のこのフィールドが埋まっていなければ追加しない
    #[serde(default)]
    require_filled_before_add: Option<String>,
    #[serde(default = "default_min_rows")]
    min_rows: usize,
    #[serde(default)]
    counters: ManagementCounters,
}

impl FormCollection {
    /// サーバー描画済みの行から初期化する
    pub fn from_rows(template: RowTemplate, rows: Vec<FormRow>) -> Self {
        let mut collection = Self {
            template,
            rows,
            blank_row: None,
            require_filled_before_add: None,
            min_rows: MIN_ROWS,
            counters: ManagementCounters::default(),
        };
        collection.renumber();
        collection
    }

    /// `initial` 行がサーバー由来、残り `extra` 行が空の新規行
    pub fn with_blank_rows(template: RowTemplate, initial: usize, extra: usize) -> Self {
        let rows = (0..initial + extra)
            .map(|i| {
                let row = FormRow::blank(&template, i);
                if i < initial {
                    row.initial()
                } else {
                    row
                }
            })
            .collect();
        Self::from_rows(template, rows)
    }

    pub fn with_blank_row(mut self, row: FormRow) -> Self {
        self.blank_row = Some(row);
        self
    }

    pub fn require_filled_before_add(mut self, key: impl Into<String>) -> Self {
        self.require_filled_before_add = Some(key.into());
        self
    }

    pub fn template(&self) -> &RowTemplate {
        &self.template
    }

    pub fn rows(&self) -> &[FormRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn row(&self, index: usize) -> Option<&FormRow> {
        self.rows.get(index)
    }

    pub fn row_mut(&mut self, index: usize) -> Option<&mut FormRow> {
        self.rows.get_mut(index)
    }

    pub fn counters(&self) -> ManagementCounters {
        self.counters
    }

    pub fn total_count(&self) -> usize {
        self.counters.total_forms
    }

    pub fn initial_count(&self) -> usize {
        self.counters.initial_forms
    }

    /// 管理フォームの hidden input（name, value）
    pub fn management_form(&self) -> Vec<(String, String)> {
        vec![
            (
                self.template.management_name(TOTAL_FORMS),
                self.counters.total_forms.to_string(),
            ),
            (
                self.template.management_name(INITIAL_FORMS),
                self.counters.initial_forms.to_string(),
            ),
        ]
    }

    /// 行を1つ追加する。追加できなければ false
    pub fn add_row(&mut self) -> bool {
        if let (Some(key), Some(last)) = (&self.require_filled_before_add, self.rows.last()) {
            let filled = last
                .field(key)
                .is_some_and(|f| !f.submitted_value().trim().is_empty());
            if !filled {
                debug!("add_row refused: last row has no '{}'", key);
                return false;
            }
        }

        let source = match self.blank_row.as_ref().or(self.rows.last()) {
            Some(source) => source,
            None => {
                debug!("add_row refused: no row to clone");
                return false;
            }
        };
        let row = source.cleaned_clone();
        self.rows.push(row);
        self.renumber();
        debug!("add_row: {} rows", self.rows.len());
        true
    }

    /// 指定行を削除する。最低行数を割る場合は何もしない
    pub fn delete_row(&mut self, index: usize) -> bool {
        if index >= self.rows.len() || self.rows.len() <= self.min_rows {
            debug!(
                "delete_row ignored: index {} of {} rows (min {})",
                index,
                self.rows.len(),
                self.min_rows
            );
            return false;
        }
        self.rows.remove(index);
        self.renumber();
        debug!("delete_row: {} rows", self.rows.len());
        true
    }

    /// index・name/id・通し番号・カウンタを行の並びに合わせる
    pub fn renumber(&mut self) {
        for (position, row) in self.rows.iter_mut().enumerate() {
            row.index = position;
            row.ordinal = position + 1;
            for field in &mut row.fields {
                field.reindex(&self.template, position);
            }
        }
        self.recount();
    }

    /// カウンタだけを行の状態に合わせる
    pub(crate) fn recount(&mut self) {
        let identity = self.template.identity_field().map(str::to_string);
        self.counters = ManagementCounters {
            total_forms: self.rows.len(),
            initial_forms: self
                .rows
                .iter()
                .filter(|row| row.is_existing(identity.as_deref()))
                .count(),
        };
    }

    /// 値を設定する。行やフィールドが無ければ false
    pub fn set_value(&mut self, row: usize, key: &str, value: &str) -> bool {
        let Some(field) = self.rows.get_mut(row).and_then(|r| r.field_mut(key)) else {
            return false;
        };
        field.value = value.to_string();
        self.recount();
        true
    }

    /// 利用者の入力: 表示値と（自動補完なら）送信値の両方を設定する
    pub fn input(&mut self, row: usize, key: &str, value: &str) -> bool {
        let Some(field) = self.rows.get_mut(row).and_then(|r| r.field_mut(key)) else {
            return false;
        };
        field.value = value.to_string();
        if let Some(hidden) = field.hidden_mut() {
            hidden.value = value.to_string();
        }
        self.recount();
        true
    }

    /// フィールド変更後の連動（`links` のうち `key` が trigger のもの）
    ///
    /// 変更のあったフィールド名を返す。
    pub fn react_to_change(&mut self, row: usize, key: &str, links: &[FieldLink]) -> Vec<String> {
        let mut changed = Vec::new();
        let Some(row) = self.rows.get_mut(row) else {
            return changed;
        };
        for link in links.iter().filter(|l| l.trigger == key) {
            let triggered = row
                .field(&link.trigger)
                .is_some_and(|f| !f.submitted_value().is_empty());
            if !triggered {
                continue;
            }
            if let Some(target) = row.field_mut(&link.target) {
                target.value = link.value.clone();
                changed.push(link.target.clone());
            }
        }
        if !changed.is_empty() {
            self.recount();
        }
        changed
    }
}
