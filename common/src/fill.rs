//! 列の一括入力（「全行に入力」ツールバー）
//!
//! 元フィールドの値を、同じ列の他の全行へコピーする。
//! 自動補完フィールドは表示値と送信値（hidden input）の両方を写し、
//! 連動処理のために変更通知を返す。

use crate::error::{Error, Result, Side};
use crate::formset::{FormCollection, FormField};
use crate::row_template::FieldName;
use log::debug;
use serde::{Deserialize, Serialize};

/// 走査する最大行数
pub const MAX_FILL_ROWS: usize = 100;

/// コピー元の指定（id が無いフィールドは name で指す）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "by", content = "value", rename_all = "snake_case")]
pub enum FillSource {
    Id(String),
    Name(String),
}

impl FillSource {
    /// フォーカスされたフィールドから作る
    pub fn for_field(field: &FormField) -> Self {
        if field.id.is_empty() {
            FillSource::Name(field.name.clone())
        } else {
            FillSource::Id(field.id.clone())
        }
    }

    pub fn attr(&self) -> &str {
        match self {
            FillSource::Id(attr) | FillSource::Name(attr) => attr.as_str(),
        }
    }
}

/// 自動補完フィールドの値が変わったことの通知
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeNotification {
    pub row: usize,
    pub field: String,
    /// コピー元 hidden input の name
    pub source_hidden: String,
}

/// 一括入力の結果
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FillOutcome {
    pub updated_rows: Vec<usize>,
    pub notifications: Vec<ChangeNotification>,
}

/// `source` の値を同じ列の他の行へコピーする
pub fn fill_column_from_row(collection: &mut FormCollection, source: &FillSource) -> Result<FillOutcome> {
    fill_column_from_row_with_limit(collection, source, MAX_FILL_ROWS)
}

/// 走査行数の上限を指定して一括入力する
///
/// 全行を検証してから書き込むので、エラー時は何も変わらない。
pub fn fill_column_from_row_with_limit(
    collection: &mut FormCollection,
    source: &FillSource,
    max_rows: usize,
) -> Result<FillOutcome> {
    let attr = source.attr();
    // prefix が違う属性でも `pre-<n>-post` なら行番号を読む
    let parsed = collection
        .template()
        .parse(attr)
        .or_else(|| FieldName::split(attr))
        .ok_or_else(|| Error::UnknownField(attr.to_string()))?;
    let source_row = parsed.index;
    let source_field = collection
        .row(source_row)
        .and_then(|row| row.fields.iter().find(|f| f.answers_to(attr)))
        .cloned()
        .ok_or_else(|| Error::UnknownField(attr.to_string()))?;
    let key = source_field.key.clone();

    // 書き込み先を決めて検証する
    let mut targets = Vec::new();
    for index in 0..max_rows {
        let Some(row) = collection.row(index) else {
            break;
        };
        if index == source_row {
            continue;
        }
        let Some(target) = row.field(&key) else {
            break;
        };
        if target.is_autocompleted() {
            if source_field.hidden().is_none() {
                return Err(Error::MissingHiddenInput {
                    side: Side::Source,
                    container: source_field.id.clone(),
                });
            }
            if target.hidden().is_none() {
                return Err(Error::MissingHiddenInput {
                    side: Side::Destination,
                    container: target.id.clone(),
                });
            }
        }
        targets.push(index);
    }

    let mut outcome = FillOutcome::default();
    for index in targets {
        let Some(target) = collection.row_mut(index).and_then(|row| row.field_mut(&key)) else {
            continue;
        };
        target.value = source_field.value.clone();
        if let (Some(from), Some(to)) = (source_field.hidden(), target.hidden_mut()) {
            to.value = from.value.clone();
            outcome.notifications.push(ChangeNotification {
                row: index,
                field: key.clone(),
                source_hidden: from.name.clone(),
            });
        }
        outcome.updated_rows.push(index);
    }
    collection.recount();
    debug!("filled '{}' into {} rows", key, outcome.updated_rows.len());
    Ok(outcome)
}

/// 浮動ツールバーの状態
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FillToolbar {
    target: Option<FillSource>,
    visible: bool,
}

impl FillToolbar {
    pub fn new() -> Self {
        Self::default()
    }

    /// フィールドにフォーカス（または日付選択を閉じた）
    pub fn focus(&mut self, field: &FormField) {
        self.target = Some(FillSource::for_field(field));
        self.visible = true;
    }

    pub fn blur(&mut self) {
        self.visible = false;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn target(&self) -> Option<&FillSource> {
        self.target.as_ref()
    }

    /// 「全行に入力」。対象が無ければ None
    pub fn fill_all_rows(&mut self, collection: &mut FormCollection) -> Result<Option<FillOutcome>> {
        self.visible = false;
        match &self.target {
            Some(source) => fill_column_from_row(collection, source).map(Some),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formset::{FormRow, Widget};
    use crate::row_template::RowTemplate;

    fn plain_collection(rows: usize) -> FormCollection {
        let t = RowTemplate::new("form").with_fields(["sn", "remarks"]);
        FormCollection::with_blank_rows(t, 0, rows)
    }

    fn user_collection(rows: usize) -> FormCollection {
        let t = RowTemplate::new("form").with_fields(["user", "status"]);
        let rows = (0..rows)
            .map(|i| {
                let mut row = FormRow::blank(&t, i);
                let user = FormField::blank(&t, i, "user").autocompleted();
                row.fields[0] = user;
                row
            })
            .collect();
        FormCollection::from_rows(t, rows)
    }

    #[test]
    fn test_fill_plain_field() {
        let mut c = plain_collection(4);
        c.set_value(1, "sn", "X");
        c.set_value(1, "remarks", "keep");
        let outcome = fill_column_from_row(&mut c, &FillSource::Id("id_form-1-sn".into())).unwrap();
        assert_eq!(outcome.updated_rows, vec![0, 2, 3]);
        assert!(outcome.notifications.is_empty());
        for row in c.rows() {
            assert_eq!(row.field("sn").unwrap().value, "X");
        }
        assert_eq!(c.row(1).unwrap().field("remarks").unwrap().value, "keep");
        assert_eq!(c.row(0).unwrap().field("remarks").unwrap().value, "");
    }

    #[test]
    fn test_fill_never_touches_source_row() {
        let mut c = plain_collection(3);
        c.set_value(2, "sn", "X");
        let before = c.row(2).cloned();
        fill_column_from_row(&mut c, &FillSource::Name("form-2-sn".into())).unwrap();
        assert_eq!(c.row(2).cloned(), before);
    }

    #[test]
    fn test_fill_respects_row_limit() {
        let mut c = plain_collection(5);
        c.set_value(0, "sn", "X");
        let outcome =
            fill_column_from_row_with_limit(&mut c, &FillSource::Name("form-0-sn".into()), 3).unwrap();
        assert_eq!(outcome.updated_rows, vec![1, 2]);
        assert_eq!(c.row(3).unwrap().field("sn").unwrap().value, "");
    }

    #[test]
    fn test_fill_autocomplete_copies_hidden_value_and_notifies() {
        let mut c = user_collection(3);
        {
            let user = c.row_mut(0).unwrap().field_mut("user").unwrap();
            user.value = "John Doe".into();
            user.hidden_mut().unwrap().value = "17".into();
        }
        let outcome = fill_column_from_row(&mut c, &FillSource::Id("id_form-0-user_text".into())).unwrap();
        assert_eq!(outcome.updated_rows, vec![1, 2]);
        assert_eq!(outcome.notifications.len(), 2);
        assert_eq!(outcome.notifications[0].source_hidden, "form-0-user");
        let target = c.row(2).unwrap().field("user").unwrap();
        assert_eq!(target.value, "John Doe");
        assert_eq!(target.submitted_value(), "17");
    }

    #[test]
    fn test_fill_autocomplete_missing_destination_hidden() {
        let mut c = user_collection(3);
        c.row_mut(2).unwrap().field_mut("user").unwrap().widget = Widget::Autocomplete { hidden: None };
        let err = fill_column_from_row(&mut c, &FillSource::Id("id_form-0-user_text".into())).unwrap_err();
        match err {
            Error::MissingHiddenInput { side, container } => {
                assert_eq!(side, Side::Destination);
                assert_eq!(container, "id_form-2-user_text");
            }
            other => panic!("unexpected error: {:?}", other),
        }
        // 途中まで書き込まれていないこと
        assert_eq!(c.row(1).unwrap().field("user").unwrap().value, "");
    }

    #[test]
    fn test_fill_autocomplete_missing_source_hidden() {
        let mut c = user_collection(2);
        c.row_mut(0).unwrap().field_mut("user").unwrap().widget = Widget::Plain;
        let err = fill_column_from_row(&mut c, &FillSource::Id("id_form-0-user_text".into())).unwrap_err();
        assert!(matches!(
            err,
            Error::MissingHiddenInput { side: Side::Source, .. }
        ));
    }

    #[test]
    fn test_fill_unknown_source() {
        let mut c = plain_collection(2);
        assert!(matches!(
            fill_column_from_row(&mut c, &FillSource::Id("id_other-0-sn".into())),
            Err(Error::UnknownField(_))
        ));
        assert!(matches!(
            fill_column_from_row(&mut c, &FillSource::Id("id_form-9-sn".into())),
            Err(Error::UnknownField(_))
        ));
    }

    #[test]
    fn test_fill_source_outside_template_prefix() {
        // 別 prefix で描画された行（`licence-<n>-sn`）
        let t = RowTemplate::new("form").with_fields(["sn"]);
        let rows = (0..3)
            .map(|i| {
                let mut row = FormRow::blank(&t, i);
                row.fields[0].name = format!("licence-{}-sn", i);
                row.fields[0].id = format!("id_licence-{}-sn", i);
                row
            })
            .collect();
        let mut c = FormCollection::from_rows(t, rows);
        c.set_value(2, "sn", "L");

        let outcome = fill_column_from_row(&mut c, &FillSource::Name("licence-2-sn".into())).unwrap();
        assert_eq!(outcome.updated_rows, vec![0, 1]);
        assert_eq!(c.row(0).unwrap().field("sn").unwrap().value, "L");
    }

    #[test]
    fn test_fill_identity_column_updates_initial_count() {
        let t = RowTemplate::new("form")
            .with_fields(["id", "sn"])
            .with_identity_field("id");
        let mut c = FormCollection::with_blank_rows(t, 0, 3);
        c.set_value(0, "id", "5");
        assert_eq!(c.initial_count(), 1);

        fill_column_from_row(&mut c, &FillSource::Id("id_form-0-id".into())).unwrap();
        assert_eq!(c.initial_count(), 3);
        assert_eq!(c.total_count(), 3);
    }

    #[test]
    fn test_toolbar_focus_blur_and_fill() {
        let mut c = plain_collection(2);
        c.set_value(0, "remarks", "same");
        let mut toolbar = FillToolbar::new();
        assert_eq!(toolbar.fill_all_rows(&mut c).unwrap(), None);

        let field = c.row(0).unwrap().field("remarks").unwrap().clone();
        toolbar.focus(&field);
        assert!(toolbar.is_visible());
        assert_eq!(toolbar.target(), Some(&FillSource::Id("id_form-0-remarks".into())));
        toolbar.blur();
        assert!(!toolbar.is_visible());

        let outcome = toolbar.fill_all_rows(&mut c).unwrap().unwrap();
        assert_eq!(outcome.updated_rows, vec![1]);
        assert_eq!(c.row(1).unwrap().field("remarks").unwrap().value, "same");
    }

    #[test]
    fn test_toolbar_uses_name_when_field_has_no_id() {
        let mut field = FormField::blank(&RowTemplate::new("form"), 0, "sn");
        field.id.clear();
        assert_eq!(FillSource::for_field(&field), FillSource::Name("form-0-sn".into()));
    }
}
