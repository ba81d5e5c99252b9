//! 階層レポートの展開・折りたたみ
//!
//! レポート行は `data-uid` と `data-parent` で親子関係を持つ。
//! 展開は直下の子だけを表示し、折りたたみは子孫をすべて隠す。

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// 行の開閉状態
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RowState {
    /// 初期状態（まだ一度も開いていない）
    #[default]
    Root,
    Expanded,
    Collapsed,
}

/// レポートの1行
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportRow {
    pub uid: String,
    #[serde(default)]
    pub parent: Option<String>,
    /// `level-1` が最上位
    #[serde(default = "default_level")]
    pub level: u32,
    #[serde(default)]
    pub state: RowState,
    #[serde(default = "default_visible")]
    pub visible: bool,
}

fn default_level() -> u32 {
    1
}

fn default_visible() -> bool {
    true
}

impl ReportRow {
    pub fn new(uid: impl Into<String>, parent: Option<&str>, level: u32) -> Self {
        Self {
            uid: uid.into(),
            parent: parent.map(str::to_string),
            level,
            state: RowState::Root,
            visible: level <= 1,
        }
    }
}

/// レポート全体
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportTree {
    rows: Vec<ReportRow>,
}

impl ReportTree {
    pub fn new(rows: Vec<ReportRow>) -> Self {
        Self { rows }
    }

    /// JSON配列から読み込み
    pub fn from_json(json: &str) -> Result<Self> {
        let rows: Vec<ReportRow> = serde_json::from_str(json)?;
        Ok(Self { rows })
    }

    pub fn rows(&self) -> &[ReportRow] {
        &self.rows
    }

    pub fn row(&self, uid: &str) -> Option<&ReportRow> {
        self.rows.iter().find(|r| r.uid == uid)
    }

    /// 直下の子の uid
    pub fn children(&self, uid: &str) -> Vec<&str> {
        self.rows
            .iter()
            .filter(|r| r.parent.as_deref() == Some(uid))
            .map(|r| r.uid.as_str())
            .collect()
    }

    /// 表示中の行（表示順）
    pub fn visible_uids(&self) -> Vec<&str> {
        self.rows
            .iter()
            .filter(|r| r.visible)
            .map(|r| r.uid.as_str())
            .collect()
    }

    /// 行のアイコンをクリック: 閉じていれば開き、開いていれば閉じる
    pub fn click(&mut self, uid: &str) {
        match self.row(uid).map(|r| r.state) {
            Some(RowState::Root) | Some(RowState::Collapsed) => self.expand(uid),
            Some(RowState::Expanded) => self.collapse(uid),
            None => {}
        }
    }

    pub fn expand(&mut self, uid: &str) {
        for row in &mut self.rows {
            if row.uid == uid {
                row.state = RowState::Expanded;
            } else if row.parent.as_deref() == Some(uid) {
                row.visible = true;
            }
        }
    }

    pub fn collapse(&mut self, uid: &str) {
        let descendants = self.descendants(uid);
        for row in &mut self.rows {
            if row.uid == uid {
                row.state = RowState::Collapsed;
            } else if descendants.contains(row.uid.as_str()) {
                row.visible = false;
            }
        }
    }

    pub fn expand_all(&mut self) {
        for row in &mut self.rows {
            row.visible = true;
            row.state = RowState::Expanded;
        }
    }

    /// 最上位の行だけを残して閉じる
    pub fn collapse_all(&mut self) {
        for row in &mut self.rows {
            row.visible = row.level <= 1;
            row.state = RowState::Collapsed;
        }
    }

    fn descendants(&self, uid: &str) -> HashSet<String> {
        let mut by_parent: HashMap<&str, Vec<&str>> = HashMap::new();
        for row in &self.rows {
            if let Some(parent) = row.parent.as_deref() {
                by_parent.entry(parent).or_default().push(&row.uid);
            }
        }
        let mut found = HashSet::new();
        let mut stack = vec![uid];
        while let Some(current) = stack.pop() {
            for child in by_parent.get(current).into_iter().flatten() {
                // 循環した親子関係でも止まるように
                if found.insert(child.to_string()) {
                    stack.push(*child);
                }
            }
        }
        found
    }
}
