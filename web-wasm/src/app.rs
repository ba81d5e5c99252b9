//! メインアプリケーションコンポーネント

use crate::components::{
    asset_table::AssetTable,
    bulk_toolbar::BulkToolbar,
    child_list::ChildList,
    delete_controls::DeleteControls,
    formset_editor::FormsetEditor,
    header::Header,
    licence_summary::LicenceSummary,
    report_tree::ReportTreeView,
};
use crate::page::{self, PageData};
use assets_console_common::layout::{section_order, InfoSection};
use assets_console_common::{ReportTree, SelectionStore, UnsavedChangesGuard};
use gloo::console;
use gloo::events::{EventListener, EventListenerOptions};
use gloo::utils::window;
use leptos::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::BeforeUnloadEvent;

/// メインアプリケーションコンポーネント
#[component]
pub fn App() -> impl IntoView {
    let page = PageData::load();
    let query = page::current_query();

    // 選択はページ読み込みごとに空から始まる
    let selection = RwSignal::new(SelectionStore::new(page.assets.iter().map(|a| a.id.clone())));
    let offers_all_pages = SelectionStore::offers_all_pages(page.searched_items, page.pagination_items);
    let dispatcher = StoredValue::new(page.config.dispatcher());
    let transitions = page.config.allowed_transitions.clone();
    let max_fill_rows = page.config.max_fill_rows;
    let visible_threshold = page.config.visible_threshold;

    let guard = RwSignal::new(UnsavedChangesGuard::new());
    install_unload_guard(guard);
    install_async_reports(&page);

    let mut basic = Some(view! {
        <section class="basic-info">
            <BulkToolbar selection=selection dispatcher=dispatcher transitions=transitions query=query.clone() />
            <AssetTable assets=page.assets selection=selection offers_all_pages=offers_all_pages query=query />
            {page.formset.map(|collection| {
                view! { <FormsetEditor collection=RwSignal::new(collection) guard=guard max_fill_rows=max_fill_rows /> }
            })}
            <div class="delete-controls">
                <DeleteControls controls=page.delete_controls guard=guard />
            </div>
        </section>
    }.into_any());

    let report = page.report;
    let licence_url = page.licence_summary_url;
    let child_lists = page.child_lists;
    let mut additional = Some(view! {
        <section class="additional-info">
            {(!report.is_empty()).then(|| {
                view! { <ReportTreeView tree=RwSignal::new(ReportTree::new(report)) /> }
            })}
            {licence_url.map(|url| view! { <LicenceSummary url=url /> })}
            {child_lists
                .into_iter()
                .map(|list| view! { <ChildList data=list default_threshold=visible_threshold /> })
                .collect_view()}
        </section>
    }.into_any());

    let sections = section_order(page::viewport_width())
        .into_iter()
        .filter_map(|section| match section {
            InfoSection::BasicInfo => basic.take(),
            InfoSection::AdditionalInfo => additional.take(),
        })
        .collect_view();

    view! {
        <div class="container">
            <Header />
            {sections}
        </div>
    }
}

/// 非同期レポートの開始要素に進捗表示を付ける（設定不備は報告して飛ばす）
fn install_async_reports(data: &PageData) {
    for config in data.async_reports() {
        if let Err(e) = config.validate() {
            console::error!(format!("設定不備: {}", e));
            continue;
        }
        if let Err(e) = page::install_async_report(&config) {
            console::error!(format!("非同期レポートの設定に失敗: {:?}", e));
        }
    }
}

/// 未保存の変更があればページ離脱時に警告する
fn install_unload_guard(guard: RwSignal<UnsavedChangesGuard>) {
    let options = EventListenerOptions::enable_prevent_default();
    EventListener::new_with_options(&window(), "beforeunload", options, move |event| {
        let Some(message) = guard.try_get_untracked().and_then(|g| g.before_unload()) else {
            return;
        };
        if let Some(event) = event.dyn_ref::<BeforeUnloadEvent>() {
            event.prevent_default();
            event.set_return_value(message);
        }
    })
    .forget();
}
