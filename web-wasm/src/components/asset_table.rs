//! 資産一覧（チェックボックスと全ページ選択）

use crate::page::AssetRow;
use assets_console_common::{QueryString, SelectionStore};
use leptos::prelude::*;

#[component]
pub fn AssetTable(
    assets: Vec<AssetRow>,
    selection: RwSignal<SelectionStore>,
    offers_all_pages: bool,
    query: QueryString,
) -> impl IntoView {
    let all_visible_checked = move || {
        selection.with(|s| !s.visible().is_empty() && s.visible().iter().all(|id| s.is_checked(id)))
    };

    view! {
        <div class="asset-table">
            <div class="selection-actions">
                <label class="select-pill">
                    <input
                        type="checkbox"
                        prop:checked=all_visible_checked
                        on:change=move |ev| {
                            if event_target_checked(&ev) {
                                selection.update(|s| s.select_all_visible());
                            } else {
                                selection.update(|s| s.clear());
                            }
                        }
                    />
                    "このページを全選択"
                </label>
                <button
                    class="btn btn-small btn-secondary"
                    on:click=move |_| selection.update(|s| s.invert_visible())
                >
                    "選択を反転"
                </button>
                {offers_all_pages.then(|| {
                    view! {
                        <label class="select-pill all-pages">
                            <input
                                type="checkbox"
                                prop:checked=move || selection.with(|s| s.all_pages_selected())
                                on:change=move |ev| {
                                    let flag = event_target_checked(&ev);
                                    selection.update(|s| s.set_all_pages_selected(flag, &query));
                                }
                            />
                            "検索結果の全ページを選択"
                        </label>
                    }
                })}
            </div>

            <table>
                <tbody>
                    <For
                        each=move || assets.clone()
                        key=|asset| asset.id.clone()
                        children=move |asset| {
                            let id = asset.id.clone();
                            let id_toggle = asset.id.clone();
                            view! {
                                <tr class:selected=move || selection.with(|s| s.is_checked(&id))>
                                    <td>
                                        <input
                                            type="checkbox"
                                            name="select"
                                            value=asset.id.to_string()
                                            prop:checked={
                                                let id = asset.id.clone();
                                                move || selection.with(|s| s.is_checked(&id))
                                            }
                                            on:change=move |_| selection.update(|s| s.toggle(&id_toggle))
                                        />
                                    </td>
                                    <td>{asset.id.to_string()}</td>
                                    <td>{asset.label}</td>
                                </tr>
                            }
                        }
                    />
                </tbody>
            </table>
        </div>
    }
}
