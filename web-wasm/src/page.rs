//! ページに埋め込まれた初期データとブラウザ操作
//!
//! サーバーは `<script type="application/json" id="assets-console-data">` に
//! 一覧・formset・レポートの初期状態を書き出す。

use assets_console_common::guard::Confirmed;
use assets_console_common::layout::AsyncReportConfig;
use assets_console_common::{
    ConsoleConfig, DataAttributes, DestructiveAction, FormCollection, NavigationTarget, QueryString, RecordId,
    ReportRow,
};
use gloo::console;
use gloo::events::EventListener;
use gloo::utils::{document, window};
use serde::Deserialize;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Element, HtmlFormElement, HtmlInputElement};

pub const DATA_ELEMENT_ID: &str = "assets-console-data";

/// 一覧の1行
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AssetRow {
    pub id: RecordId,
    #[serde(default)]
    pub label: String,
}

/// 子要素の表示切り替え付きリスト
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ChildListData {
    pub label: String,
    pub attributes: DataAttributes,
    pub items: Vec<String>,
}

/// 確認付きの削除ボタン
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DeleteControl {
    pub label: String,
    pub action: DestructiveAction,
    /// 確認後にそのまま送信するフォーム（資産の削除）
    #[serde(default)]
    pub form_id: Option<String>,
}

/// 確認後に送るフォーム
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormSubmission {
    pub form_id: String,
    /// 送信前に設定する hidden input（name, value）
    pub field: Option<(String, String)>,
}

impl DeleteControl {
    /// 利用者の回答から送信内容を決める。拒否なら None
    pub fn submission(&self, answer: bool) -> Option<FormSubmission> {
        match self.action.resolve(answer)? {
            Confirmed::SubmitForm { form_id, field, value } => Some(FormSubmission {
                form_id,
                field: Some((field.to_string(), value)),
            }),
            Confirmed::Proceed => self.form_id.clone().map(|form_id| FormSubmission { form_id, field: None }),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct PageData {
    pub config: ConsoleConfig,
    pub assets: Vec<AssetRow>,
    /// 検索結果の一覧か（全ページ選択を出すかどうか）
    pub searched_items: bool,
    pub pagination_items: usize,
    pub formset: Option<FormCollection>,
    pub report: Vec<ReportRow>,
    pub licence_summary_url: Option<String>,
    pub child_lists: Vec<ChildListData>,
    pub delete_controls: Vec<DeleteControl>,
    /// 非同期レポート。省略時はページ送りと `data-role="async-report"` ボタン
    pub async_reports: Option<Vec<AsyncReportConfig>>,
}

impl PageData {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn async_reports(&self) -> Vec<AsyncReportConfig> {
        self.async_reports
            .clone()
            .unwrap_or_else(|| vec![AsyncReportConfig::pagination(), AsyncReportConfig::async_report_button()])
    }

    /// 埋め込みデータを読む。無い・壊れている場合は空のページ
    pub fn load() -> Self {
        let Some(text) = document()
            .get_element_by_id(DATA_ELEMENT_ID)
            .and_then(|el| el.text_content())
        else {
            return Self::default();
        };

        match Self::from_json(&text) {
            Ok(data) => {
                if let Err(e) = data.config.validate() {
                    console::error!(format!("設定エラー: {}", e));
                }
                data
            }
            Err(e) => {
                console::error!(format!("ページデータの読み込みに失敗: {}", e));
                Self::default()
            }
        }
    }
}

/// 現在の `location.search`
pub fn current_query() -> QueryString {
    window()
        .location()
        .search()
        .map(QueryString::new)
        .unwrap_or_default()
}

pub fn navigate(target: &NavigationTarget) {
    if let Err(e) = window().location().set_href(&target.href()) {
        console::error!(format!("遷移に失敗: {:?}", e));
    }
}

pub fn viewport_width() -> u32 {
    window()
        .inner_width()
        .ok()
        .and_then(|w| w.as_f64())
        .map(|w| w as u32)
        .unwrap_or(u32::MAX)
}

/// フォームを送信する（必要なら hidden input を設定してから）
pub fn submit_form(submission: &FormSubmission) -> Result<(), JsValue> {
    let form: HtmlFormElement = document()
        .get_element_by_id(&submission.form_id)
        .ok_or_else(|| JsValue::from_str(&format!("form '{}' not found", submission.form_id)))?
        .dyn_into()?;
    if let Some((name, value)) = &submission.field {
        let input: HtmlInputElement = match form.query_selector(&format!("input[name=\"{}\"]", name))? {
            Some(existing) => existing.dyn_into()?,
            None => {
                let created: HtmlInputElement = document().create_element("input")?.dyn_into()?;
                created.set_type("hidden");
                created.set_name(name);
                form.append_child(&created)?;
                created
            }
        };
        input.set_value(value);
    }
    form.submit()
}

/// 非同期レポートの開始要素に、進捗バーを出すクリック処理を付ける
pub fn install_async_report(config: &AsyncReportConfig) -> Result<(), JsValue> {
    let triggers = document().query_selector_all(&config.trigger)?;
    for i in 0..triggers.length() {
        let Some(trigger) = triggers.item(i).and_then(|node| node.dyn_into::<Element>().ok()) else {
            continue;
        };
        let progress_bar = config.progress_bar.clone();
        let eta_el = config.eta_el.clone();
        EventListener::new(&trigger, "click", move |_| {
            if let Err(e) = show_progress(&progress_bar, &eta_el) {
                console::error!(format!("進捗表示に失敗: {:?}", e));
            }
        })
        .forget();
    }
    Ok(())
}

fn show_progress(progress_bar: &str, eta_el: &str) -> Result<(), JsValue> {
    if let Some(bar) = document().query_selector(progress_bar)? {
        bar.remove_attribute("hidden")?;
    }
    if let Some(eta) = document().query_selector(eta_el)? {
        eta.set_text_content(Some("残り時間を計算中..."));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_page_data() {
        let data = PageData::from_json("{}").unwrap();
        assert!(data.assets.is_empty());
        assert!(data.formset.is_none());
        assert_eq!(data.config, ConsoleConfig::default());
    }

    #[test]
    fn test_page_data_with_assets_and_report() {
        let data = PageData::from_json(
            r#"{
                "assets": [{"id": "1", "label": "SN-1"}, {"id": "2"}],
                "searched_items": true,
                "pagination_items": 40,
                "report": [{"uid": "a"}, {"uid": "b", "parent": "a", "level": 2, "visible": false}],
                "child_lists": [{"label": "More", "attributes": {"data-trgt": "licences"}, "items": ["x"]}]
            }"#,
        )
        .unwrap();
        assert_eq!(data.assets[0].id, RecordId::from("1"));
        assert_eq!(data.assets[1].label, "");
        assert_eq!(data.report.len(), 2);
        assert_eq!(data.child_lists[0].attributes.get("data-trgt"), Some("licences"));
    }

    #[test]
    fn test_default_async_reports() {
        let data = PageData::from_json("{}").unwrap();
        let reports = data.async_reports();
        assert_eq!(reports.len(), 2);
        assert!(reports.iter().all(|r| r.validate().is_ok()));

        let custom = PageData::from_json(
            r##"{"async_reports": [{"trigger": "#go", "progressBar": "#bar", "etaEl": "#eta"}]}"##,
        )
        .unwrap();
        assert_eq!(custom.async_reports()[0].trigger, "#go");
    }

    #[test]
    fn test_attachment_delete_submits_delete_type() {
        let data = PageData::from_json(
            r#"{"delete_controls": [{
                "label": "Delete",
                "action": {"kind": "delete_attachment", "delete_type": "from_all", "form_id": "attachments"}
            }]}"#,
        )
        .unwrap();
        let control = &data.delete_controls[0];

        assert_eq!(control.submission(false), None);
        assert_eq!(
            control.submission(true),
            Some(FormSubmission {
                form_id: "attachments".into(),
                field: Some(("delete_type".into(), "from_all".into())),
            })
        );
    }

    #[test]
    fn test_asset_delete_submits_its_form() {
        let control = DeleteControl {
            label: "Delete asset".into(),
            action: DestructiveAction::DeleteAsset,
            form_id: Some("delete-asset".into()),
        };
        assert_eq!(control.submission(false), None);
        assert_eq!(
            control.submission(true),
            Some(FormSubmission {
                form_id: "delete-asset".into(),
                field: None,
            })
        );

        let without_form = DeleteControl { form_id: None, ..control };
        assert_eq!(without_form.submission(true), None);
    }
}
