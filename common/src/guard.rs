//! 未保存の変更の警告と、削除前の確認

use serde::{Deserialize, Serialize};

pub const UNSAVED_CHANGES_MESSAGE: &str = "Detected unsaved changes on form.";

/// 入力部品の種類（hidden は変更検知の対象外）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    Visible,
    Hidden,
}

/// `.detect-changes` フォームの変更検知
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UnsavedChangesGuard {
    dirty: bool,
}

impl UnsavedChangesGuard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn input_changed(&mut self, kind: InputKind) {
        if kind == InputKind::Visible {
            self.dirty = true;
        }
    }

    /// 送信ボタンが押された
    pub fn submitted(&mut self) {
        self.dirty = false;
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// ページを離れる前の警告文（変更が無ければ None）
    pub fn before_unload(&self) -> Option<&'static str> {
        self.dirty.then_some(UNSAVED_CHANGES_MESSAGE)
    }
}

/// 確認が必要な削除操作
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DestructiveAction {
    /// 添付ファイル削除（`delete_type` を指定フォームに入れて送信する）
    DeleteAttachment { delete_type: String, form_id: String },
    DeleteAsset,
}

/// 確認後に実行すべき内容
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Confirmed {
    SubmitForm {
        form_id: String,
        field: &'static str,
        value: String,
    },
    Proceed,
}

impl DestructiveAction {
    pub fn prompt(&self) -> &'static str {
        match self {
            DestructiveAction::DeleteAttachment { .. } => "Are you sure to delete Attachment(s)?",
            DestructiveAction::DeleteAsset => "Are you sure to delete Asset?",
        }
    }

    /// 利用者の回答を反映する。拒否なら None（状態は何も変わらない）
    pub fn resolve(&self, confirmed: bool) -> Option<Confirmed> {
        if !confirmed {
            return None;
        }
        Some(match self {
            DestructiveAction::DeleteAttachment { delete_type, form_id } => Confirmed::SubmitForm {
                form_id: form_id.clone(),
                field: "delete_type",
                value: delete_type.clone(),
            },
            DestructiveAction::DeleteAsset => Confirmed::Proceed,
        })
    }
}
