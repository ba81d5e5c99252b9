//! 階層レポート

use assets_console_common::hierarchy::RowState;
use assets_console_common::ReportTree;
use leptos::prelude::*;

#[component]
pub fn ReportTreeView(tree: RwSignal<ReportTree>) -> impl IntoView {
    let rows = move || tree.with(|t| t.rows().to_vec());

    view! {
        <div class="report-tree">
            <div class="report-actions">
                <button class="btn btn-small btn-secondary" on:click=move |_| tree.update(|t| t.expand_all())>
                    "すべて展開"
                </button>
                <button class="btn btn-small btn-secondary" on:click=move |_| tree.update(|t| t.collapse_all())>
                    "すべて折りたたむ"
                </button>
            </div>
            <table>
                <tbody>
                    <For
                        each=rows
                        key=|row| (row.uid.clone(), row.state, row.visible)
                        children=move |row| {
                            let uid = row.uid.clone();
                            let state_class = match row.state {
                                RowState::Root => "",
                                RowState::Expanded => "expanded",
                                RowState::Collapsed => "collapsed",
                            };
                            view! {
                                <tr
                                    class=format!("level-{} {}", row.level, state_class)
                                    data-uid=row.uid.clone()
                                    data-parent=row.parent.clone().unwrap_or_default()
                                    style:display=if row.visible { "" } else { "none" }
                                    on:click=move |_| tree.update(|t| t.click(&uid))
                                >
                                    <td>{row.uid.clone()}</td>
                                </tr>
                            }
                        }
                    />
                </tbody>
            </table>
        </div>
    }
}
