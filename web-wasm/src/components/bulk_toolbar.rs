//! 一括操作ボタン

use crate::page;
use assets_console_common::{ActionDispatcher, BulkAction, Dispatch, QueryString, SelectionMode, SelectionStore};
use gloo::console;
use leptos::prelude::*;

fn follow(result: Dispatch) {
    match result {
        Dispatch::Navigate(target) => page::navigate(&target),
        Dispatch::NoOp(reason) => console::log!(format!("一括操作を実行しません: {:?}", reason)),
    }
}

/// 「検索結果で請求レポート」（チェック状態は見ない）
fn search_invoice_report(dispatcher: &ActionDispatcher, query: &QueryString) -> Dispatch {
    dispatcher.dispatch_search_query(&BulkAction::InvoiceReport, query)
}

#[component]
pub fn BulkToolbar(
    selection: RwSignal<SelectionStore>,
    dispatcher: StoredValue<ActionDispatcher>,
    transitions: Vec<String>,
    query: QueryString,
) -> impl IntoView {
    let run = move |action: BulkAction| {
        let result = selection.with_untracked(|s| dispatcher.with_value(|d| d.dispatch(s, &action)));
        follow(result);
    };
    let nothing_selected = move || selection.with(|s| matches!(s.mode(), SelectionMode::Empty));

    let mut actions = vec![
        ("一括編集".to_string(), BulkAction::Edit),
        ("設置場所の編集".to_string(), BulkAction::EditLocation),
        ("請求レポート".to_string(), BulkAction::InvoiceReport),
        ("添付ファイルを追加".to_string(), BulkAction::AddAttachment("asset".into())),
    ];
    actions.extend(
        transitions
            .into_iter()
            .map(|slug| (slug.replace('-', " "), BulkAction::Transition(slug))),
    );

    let search_invoice = move |_| {
        let result = dispatcher.with_value(|d| search_invoice_report(d, &query));
        follow(result);
    };

    view! {
        <div class="bulk-toolbar">
            {actions
                .into_iter()
                .map(|(label, action)| {
                    view! {
                        <button
                            class="btn btn-small btn-primary"
                            disabled=nothing_selected
                            on:click=move |_| run(action.clone())
                        >
                            {label}
                        </button>
                    }
                })
                .collect_view()}
            <button class="btn btn-small btn-tertiary" on:click=search_invoice>
                "検索結果で請求レポート"
            </button>
        </div>
    }
}
