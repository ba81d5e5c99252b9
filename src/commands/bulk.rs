//! 一括操作URLの組み立て

use assets_console_common::{BulkAction, ConsoleConfig, Dispatch, QueryString, RecordId, SelectionStore};

/// コマンドラインの指定から選択状態を再現する
///
/// `visible` が空ならチェックされた行だけが表示されているとみなす。
pub fn selection_from_args(
    visible: &[String],
    select: &[String],
    all_pages: bool,
    query: &str,
) -> SelectionStore {
    let rows = if visible.is_empty() { select } else { visible };
    let mut selection = SelectionStore::new(rows.iter().map(|id| RecordId::from(id.as_str())));
    for id in select {
        let id = RecordId::from(id.as_str());
        if !selection.is_checked(&id) {
            selection.toggle(&id);
        }
    }
    if all_pages {
        selection.set_all_pages_selected(true, &QueryString::new(query));
    }
    selection
}

pub fn dispatch(
    config: &ConsoleConfig,
    action: &BulkAction,
    visible: &[String],
    select: &[String],
    all_pages: bool,
    query: &str,
) -> Dispatch {
    let selection = selection_from_args(visible, select, all_pages, query);
    config.dispatcher().dispatch(&selection, action)
}

pub fn dispatch_search_query(config: &ConsoleConfig, action: &BulkAction, query: &str) -> Dispatch {
    config
        .dispatcher()
        .dispatch_search_query(action, &QueryString::new(query))
}

/// 結果の表示用文字列
pub fn describe(result: &Dispatch) -> String {
    match result {
        Dispatch::Navigate(target) => target.href(),
        Dispatch::NoOp(reason) => format!("(no-op: {:?})", reason),
    }
}
