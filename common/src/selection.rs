//! 一覧の選択状態
//!
//! 選択は「チェックされた個別ID」か「現在の検索条件に一致する全件」の
//! どちらか一方。全ページ選択中は個別IDは使わない。

use crate::types::{QueryString, RecordId};
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// 現在有効な選択
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionMode {
    Empty,
    Explicit(Vec<RecordId>),
    AllPages(QueryString),
}

/// 選択状態（ページ読み込みごとに空で作られる）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionStore {
    /// 現在のページに描画されている行（表示順）
    visible: Vec<RecordId>,
    checked: HashSet<RecordId>,
    all_pages_selected: bool,
    query: QueryString,
}

impl SelectionStore {
    pub fn new<I>(visible: I) -> Self
    where
        I: IntoIterator<Item = RecordId>,
    {
        let mut seen = HashSet::new();
        let visible = visible.into_iter().filter(|id| seen.insert(id.clone())).collect();
        Self {
            visible,
            ..Self::default()
        }
    }

    pub fn visible(&self) -> &[RecordId] {
        &self.visible
    }

    pub fn is_checked(&self, id: &RecordId) -> bool {
        self.checked.contains(id)
    }

    pub fn all_pages_selected(&self) -> bool {
        self.all_pages_selected
    }

    /// 全ページ選択時に記録した検索条件
    pub fn query(&self) -> &QueryString {
        &self.query
    }

    /// チェックされた個別ID（表示順）。全ページ選択中は空
    pub fn get_selected_ids(&self) -> Vec<RecordId> {
        if self.all_pages_selected {
            return Vec::new();
        }
        self.visible
            .iter()
            .filter(|id| self.checked.contains(*id))
            .cloned()
            .collect()
    }

    pub fn mode(&self) -> SelectionMode {
        if self.all_pages_selected {
            return SelectionMode::AllPages(self.query.clone());
        }
        let ids = self.get_selected_ids();
        if ids.is_empty() {
            SelectionMode::Empty
        } else {
            SelectionMode::Explicit(ids)
        }
    }

    /// 1行のチェックを反転する。表示されていないIDは無視
    ///
    /// 全ページ選択中に行を触った場合は個別選択に戻る。
    pub fn toggle(&mut self, id: &RecordId) {
        if !self.visible.contains(id) {
            debug!("toggle ignored: {} is not on this page", id);
            return;
        }
        self.all_pages_selected = false;
        if !self.checked.remove(id) {
            self.checked.insert(id.clone());
        }
    }

    /// 全ページ選択の切り替え
    ///
    /// オンにすると見えている行はすべてチェック表示になり、検索条件を記録する。
    /// オフにするとチェックも含めてすべて外す。
    pub fn set_all_pages_selected(&mut self, flag: bool, query: &QueryString) {
        if flag == self.all_pages_selected {
            return;
        }
        if flag {
            self.checked = self.visible.iter().cloned().collect();
            self.query = query.clone();
        } else {
            self.checked.clear();
            self.query = QueryString::empty();
        }
        self.all_pages_selected = flag;
        debug!("all pages selected: {}", flag);
    }

    /// 何も選択していない状態に戻す
    pub fn clear(&mut self) {
        self.checked.clear();
        self.all_pages_selected = false;
        self.query = QueryString::empty();
    }

    /// 「すべて選択」: 表示中の行をチェックし、全ページ選択は解除
    pub fn select_all_visible(&mut self) {
        self.checked = self.visible.iter().cloned().collect();
        self.all_pages_selected = false;
        self.query = QueryString::empty();
    }

    /// 「選択反転」: 表示中の行のチェックを反転し、全ページ選択は解除
    pub fn invert_visible(&mut self) {
        let was_all_pages = self.all_pages_selected;
        self.all_pages_selected = false;
        self.query = QueryString::empty();
        self.checked = if was_all_pages {
            HashSet::new()
        } else {
            self.visible
                .iter()
                .filter(|id| !self.checked.contains(*id))
                .cloned()
                .collect()
        };
    }

    /// 「全ページを選択」を出すかどうか
    ///
    /// 検索結果の一覧で、ページ送りが2項目以上あるときだけ。
    pub fn offers_all_pages(searched_items: bool, pagination_items: usize) -> bool {
        searched_items && pagination_items > 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(v: &[u64]) -> Vec<RecordId> {
        v.iter().map(|n| RecordId::from(*n)).collect()
    }

    fn store() -> SelectionStore {
        SelectionStore::new(ids(&[3, 5, 7, 11]))
    }

    #[test]
    fn test_new_store_is_empty() {
        let s = store();
        assert!(s.get_selected_ids().is_empty());
        assert_eq!(s.mode(), SelectionMode::Empty);
    }

    #[test]
    fn test_selected_ids_follow_page_order() {
        let mut s = store();
        s.toggle(&RecordId::from(7u64));
        s.toggle(&RecordId::from(3u64));
        assert_eq!(s.get_selected_ids(), ids(&[3, 7]));
        s.toggle(&RecordId::from(7u64));
        assert_eq!(s.get_selected_ids(), ids(&[3]));
    }

    #[test]
    fn test_toggle_unknown_id_is_noop() {
        let mut s = store();
        s.toggle(&RecordId::from(999u64));
        assert_eq!(s, store());
    }

    #[test]
    fn test_duplicate_visible_ids_are_collapsed() {
        let s = SelectionStore::new(ids(&[1, 1, 2]));
        assert_eq!(s.visible(), ids(&[1, 2]).as_slice());
    }

    #[test]
    fn test_all_pages_checks_everything_and_hides_ids() {
        let mut s = store();
        let q = QueryString::new("?status=new");
        s.set_all_pages_selected(true, &q);
        assert!(s.visible().iter().all(|id| s.is_checked(id)));
        assert!(s.get_selected_ids().is_empty());
        assert_eq!(s.mode(), SelectionMode::AllPages(q));
    }

    #[test]
    fn test_all_pages_off_clears_everything() {
        let mut s = store();
        s.toggle(&RecordId::from(5u64));
        s.set_all_pages_selected(true, &QueryString::new("a=1"));
        s.set_all_pages_selected(false, &QueryString::empty());
        assert!(!s.all_pages_selected());
        assert!(s.visible().iter().all(|id| !s.is_checked(id)));
        assert!(s.query().is_empty());
    }

    #[test]
    fn test_all_pages_off_when_already_off_is_noop() {
        let mut s = store();
        s.toggle(&RecordId::from(5u64));
        let before = s.clone();
        s.set_all_pages_selected(false, &QueryString::new("x=1"));
        assert_eq!(s, before);
    }

    #[test]
    fn test_toggle_leaves_all_pages_mode() {
        let mut s = store();
        s.set_all_pages_selected(true, &QueryString::new("a=1"));
        s.toggle(&RecordId::from(3u64));
        assert!(!s.all_pages_selected());
        assert_eq!(s.get_selected_ids(), ids(&[5, 7, 11]));
    }

    #[test]
    fn test_select_controls_drop_all_pages_flag() {
        let mut s = store();
        s.set_all_pages_selected(true, &QueryString::new("a=1"));
        s.select_all_visible();
        assert!(!s.all_pages_selected());
        assert_eq!(s.get_selected_ids(), ids(&[3, 5, 7, 11]));

        s.set_all_pages_selected(true, &QueryString::new("a=1"));
        s.invert_visible();
        assert!(!s.all_pages_selected());
        assert!(s.get_selected_ids().is_empty());

        s.toggle(&RecordId::from(5u64));
        s.invert_visible();
        assert_eq!(s.get_selected_ids(), ids(&[3, 7, 11]));

        s.clear();
        assert_eq!(s.mode(), SelectionMode::Empty);
    }

    #[test]
    fn test_offers_all_pages() {
        assert!(SelectionStore::offers_all_pages(true, 3));
        assert!(!SelectionStore::offers_all_pages(true, 1));
        assert!(!SelectionStore::offers_all_pages(false, 5));
    }
}
