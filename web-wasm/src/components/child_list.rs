//! 「もっと見る」ボタン付きのリスト

use crate::page::ChildListData;
use assets_console_common::ChildDisplayToggle;
use gloo::console;
use leptos::prelude::*;

#[component]
pub fn ChildList(data: ChildListData, default_threshold: usize) -> impl IntoView {
    let toggle = match ChildDisplayToggle::from_attributes_or(&data.attributes, &data.label, default_threshold) {
        Ok(toggle) => toggle,
        Err(e) => {
            console::error!(e.to_string());
            return ().into_any();
        }
    };
    let threshold = toggle.threshold;
    let target_id = toggle.target_id.clone();
    let toggle = RwSignal::new(toggle);
    let shown = RwSignal::new(
        (0..data.items.len()).map(|i| i < threshold).collect::<Vec<bool>>(),
    );

    let items = data
        .items
        .into_iter()
        .enumerate()
        .map(|(i, item)| {
            view! {
                <li style:display=move || {
                    if shown.with(|s| s.get(i).copied().unwrap_or(true)) { "" } else { "none" }
                }>
                    {item}
                </li>
            }
        })
        .collect_view();

    view! {
        <div class="child-list">
            <ul id=target_id>{items}</ul>
            <button
                class="btn btn-small btn-tertiary"
                on:click=move |_| {
                    shown.update(|s| toggle.update(|t| t.toggle(s)));
                }
            >
                {move || toggle.with(|t| t.label.clone())}
            </button>
        </div>
    }
    .into_any()
}
