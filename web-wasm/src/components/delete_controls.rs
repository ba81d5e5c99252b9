//! 確認付きの削除ボタン（添付ファイル・資産）

use crate::page::{self, DeleteControl};
use assets_console_common::UnsavedChangesGuard;
use gloo::console;
use gloo::dialogs::confirm;
use leptos::prelude::*;

#[component]
pub fn DeleteControls(controls: Vec<DeleteControl>, guard: RwSignal<UnsavedChangesGuard>) -> impl IntoView {
    controls
        .into_iter()
        .map(|control| {
            let label = control.label.clone();
            view! {
                <button
                    type="button"
                    class="btn btn-small btn-danger"
                    on:click=move |_| {
                        let Some(submission) = control.submission(confirm(control.action.prompt())) else {
                            return;
                        };
                        // 送信による離脱では警告しない
                        guard.update(|g| g.submitted());
                        if let Err(e) = page::submit_form(&submission) {
                            console::error!(format!("削除フォームの送信に失敗: {:?}", e));
                        }
                    }
                >
                    {label}
                </button>
            }
        })
        .collect_view()
}
