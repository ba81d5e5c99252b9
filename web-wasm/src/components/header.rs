//! ヘッダーコンポーネント

use leptos::prelude::*;

#[component]
pub fn Header() -> impl IntoView {
    view! {
        <header class="header">
            <h1>"Asset Console - 資産管理"</h1>
        </header>
    }
}
