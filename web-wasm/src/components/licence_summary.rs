//! ライセンス使用状況サマリー

use assets_console_common::{LicenceUsageSummary, SummaryBoard};
use gloo::console;
use gloo::net::http::Request;
use leptos::prelude::*;
use leptos::task::spawn_local;

async fn fetch_summary(url: &str) -> Result<LicenceUsageSummary, String> {
    let response = Request::get(url).send().await.map_err(|e| e.to_string())?;
    if !response.ok() {
        return Err(format!("HTTP {}", response.status()));
    }
    let body = response.text().await.map_err(|e| e.to_string())?;
    LicenceUsageSummary::from_json(&body).map_err(|e| e.to_string())
}

#[component]
pub fn LicenceSummary(url: String) -> impl IntoView {
    let board = RwSignal::new(SummaryBoard::new());

    let on_click = move |_| {
        let url = url.clone();
        let request = board.try_update(|b| b.request_started());
        spawn_local(async move {
            match fetch_summary(&url).await {
                Ok(summary) => {
                    board.try_update(|b| b.insert(summary));
                }
                Err(e) => console::error!(format!("サマリー取得に失敗 ({:?}): {}", request, e)),
            }
        });
    };

    view! {
        <div class="licence-summary">
            <button class="btn btn-small btn-secondary" on:click=on_click>
                "使用状況を表示"
            </button>
            {move || {
                board.with(|b| b.current().map(|summary| {
                    let lines = summary.lines();
                    view! {
                        <div class="licence-summary-panel">
                            {lines.into_iter().map(|line| view! { <p>{line}</p> }).collect_view()}
                        </div>
                    }
                }))
            }}
        </div>
    }
}
