//! Asset Console Common Library
//!
//! 資産管理コンソールの画面状態（CLIとWeb(WASM)で共有）
//! - 一覧の選択と一括操作の遷移先
//! - 繰り返しフォーム行（formset）の追加・削除・番号振り直し
//! - 列の一括入力
//!
//! DOM には触れない。状態を計算してから、呼び出し側が一度だけ画面へ反映する。

pub mod config;
pub mod dispatch;
pub mod error;
pub mod fill;
pub mod formset;
pub mod guard;
pub mod hierarchy;
pub mod layout;
pub mod licence;
pub mod row_template;
pub mod selection;
pub mod toggle;
pub mod types;

pub use config::ConsoleConfig;
pub use dispatch::{ActionDispatcher, BulkAction, Dispatch, NavigationTarget, NoOpReason};
pub use error::{Error, Result, Side};
pub use fill::{fill_column_from_row, ChangeNotification, FillOutcome, FillSource, FillToolbar};
pub use formset::{FieldLink, FormCollection, FormField, FormRow, ManagementCounters, Widget};
pub use guard::{DestructiveAction, UnsavedChangesGuard};
pub use hierarchy::{ReportRow, ReportTree};
pub use licence::{LicenceUsageSummary, SummaryBoard};
pub use row_template::{FieldName, RowTemplate};
pub use selection::{SelectionMode, SelectionStore};
pub use toggle::{ChildDisplayToggle, DataAttributes};
pub use types::{QueryString, RecordId};
