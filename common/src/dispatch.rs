//! 一括操作の遷移先URL組み立て
//!
//! 優先順位:
//! 1. 全ページ選択中 → `<path>?<検索条件>&from_query=1[&transition_type=..]`
//! 2. 個別選択あり → `<path>?select=<id>&select=<id>..[&transition_type=..]`
//! 3. それ以外 → 何もしない
//!
//! 遷移するか何もしないかのどちらかで、エラーにはならない。

use crate::selection::SelectionStore;
use crate::types::{QueryString, RecordId};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 一括で実行できる状態遷移（最も広いリスト）
pub const DEFAULT_BULK_TRANSITIONS: [&str; 4] =
    ["release-asset", "return-asset", "loan-asset", "change-hostname"];

/// 一括操作
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BulkAction {
    Edit,
    EditLocation,
    InvoiceReport,
    /// 添付ファイル追加（親の種類: `asset` など）
    AddAttachment(String),
    /// 状態遷移（`release-asset` など）
    Transition(String),
}

impl BulkAction {
    /// 遷移先のパス
    pub fn path(&self) -> String {
        match self {
            BulkAction::Edit => "bulkedit".into(),
            BulkAction::EditLocation => "edit_location_data".into(),
            BulkAction::InvoiceReport => "invoice_report".into(),
            BulkAction::AddAttachment(kind) => format!("add_attachment/{}/", kind),
            BulkAction::Transition(_) => "transition".into(),
        }
    }

    fn transition_type(&self) -> Option<&str> {
        match self {
            BulkAction::Transition(subtype) => Some(subtype.as_str()),
            _ => None,
        }
    }
}

impl FromStr for BulkAction {
    type Err = String;

    /// `edit`, `edit-location`, `invoice-report`, `add-attachment:<type>`, `transition:<subtype>`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, arg) = match s.split_once(':') {
            Some((name, arg)) => (name, Some(arg.trim())),
            None => (s, None),
        };
        match (name.trim().to_lowercase().as_str(), arg) {
            ("edit", None) => Ok(BulkAction::Edit),
            ("edit-location", None) => Ok(BulkAction::EditLocation),
            ("invoice-report", None) => Ok(BulkAction::InvoiceReport),
            ("add-attachment", None) => Ok(BulkAction::AddAttachment("asset".into())),
            ("add-attachment", Some(kind)) if !kind.is_empty() => {
                Ok(BulkAction::AddAttachment(kind.to_string()))
            }
            ("transition", Some(subtype)) if !subtype.is_empty() => {
                Ok(BulkAction::Transition(subtype.to_string()))
            }
            _ => Err(format!(
                "Unknown action: {}. Use edit, edit-location, invoice-report, add-attachment[:type] or transition:<type>",
                s
            )),
        }
    }
}

impl fmt::Display for BulkAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BulkAction::Edit => write!(f, "edit"),
            BulkAction::EditLocation => write!(f, "edit-location"),
            BulkAction::InvoiceReport => write!(f, "invoice-report"),
            BulkAction::AddAttachment(kind) => write!(f, "add-attachment:{}", kind),
            BulkAction::Transition(subtype) => write!(f, "transition:{}", subtype),
        }
    }
}

/// 遷移先（パス + クエリ文字列）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationTarget {
    pub path: String,
    pub query: String,
}

impl NavigationTarget {
    pub fn href(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for NavigationTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}?{}", self.path, self.query)
    }
}

/// 何もしなかった理由（ログ用）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoOpReason {
    NothingSelected,
    EmptyQuery,
    TransitionNotAllowed,
}

/// dispatch の結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch {
    Navigate(NavigationTarget),
    NoOp(NoOpReason),
}

impl Dispatch {
    pub fn target(&self) -> Option<&NavigationTarget> {
        match self {
            Dispatch::Navigate(target) => Some(target),
            Dispatch::NoOp(_) => None,
        }
    }

    pub fn is_noop(&self) -> bool {
        matches!(self, Dispatch::NoOp(_))
    }
}

/// 一括操作の振り分け
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionDispatcher {
    allowed_transitions: Vec<String>,
}

impl Default for ActionDispatcher {
    fn default() -> Self {
        Self::with_allowed_transitions(DEFAULT_BULK_TRANSITIONS)
    }
}

impl ActionDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_allowed_transitions<I, S>(allowed: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            allowed_transitions: allowed.into_iter().map(Into::into).collect(),
        }
    }

    pub fn allowed_transitions(&self) -> &[String] {
        &self.allowed_transitions
    }

    pub fn is_allowed(&self, action: &BulkAction) -> bool {
        match action.transition_type() {
            Some(subtype) => self.allowed_transitions.iter().any(|t| t == subtype),
            None => true,
        }
    }

    /// 選択状態から遷移先を決める（全ページ選択が常に優先）
    pub fn dispatch(&self, selection: &SelectionStore, action: &BulkAction) -> Dispatch {
        let result = if !self.is_allowed(action) {
            Dispatch::NoOp(NoOpReason::TransitionNotAllowed)
        } else if selection.all_pages_selected() {
            self.for_query(action, selection.query())
        } else {
            let ids = selection.get_selected_ids();
            if ids.is_empty() {
                Dispatch::NoOp(NoOpReason::NothingSelected)
            } else {
                Dispatch::Navigate(NavigationTarget {
                    path: action.path(),
                    query: with_transition(select_params(&ids), action),
                })
            }
        };
        log_result(action, &result);
        result
    }

    /// 検索条件に対する操作（「検索結果で請求レポート」ボタン）
    ///
    /// チェック状態に関係なく、現在の検索条件で遷移する。
    pub fn dispatch_search_query(&self, action: &BulkAction, query: &QueryString) -> Dispatch {
        let result = if self.is_allowed(action) {
            self.for_query(action, query)
        } else {
            Dispatch::NoOp(NoOpReason::TransitionNotAllowed)
        };
        log_result(action, &result);
        result
    }

    fn for_query(&self, action: &BulkAction, query: &QueryString) -> Dispatch {
        if query.is_empty() {
            return Dispatch::NoOp(NoOpReason::EmptyQuery);
        }
        let params = format!("{}&from_query=1", query.as_str());
        Dispatch::Navigate(NavigationTarget {
            path: action.path(),
            query: with_transition(params, action),
        })
    }
}

fn select_params(ids: &[RecordId]) -> String {
    ids.iter()
        .map(|id| format!("select={}", urlencoding::encode(id.as_str())))
        .collect::<Vec<_>>()
        .join("&")
}

fn with_transition(mut params: String, action: &BulkAction) -> String {
    if let Some(subtype) = action.transition_type() {
        params.push_str("&transition_type=");
        params.push_str(&urlencoding::encode(subtype));
    }
    params
}

fn log_result(action: &BulkAction, result: &Dispatch) {
    match result {
        Dispatch::Navigate(target) => debug!("{} -> {}", action, target),
        Dispatch::NoOp(NoOpReason::TransitionNotAllowed) => {
            warn!("{} rejected: transition not allowed for bulk", action)
        }
        Dispatch::NoOp(reason) => debug!("{} ignored: {:?}", action, reason),
    }
}
