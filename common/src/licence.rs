//! ライセンス使用状況サマリー
//!
//! サマリーは非同期に取得され、届いた順に画面へ差し込まれる。
//! 連打しても表示は常に1つ（前のサマリーを消してから入れる）。

use crate::error::Result;
use serde::{Deserialize, Serialize};

/// サーバーから返るサマリー
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LicenceUsageSummary {
    pub total: u64,
    pub used_by_users: u64,
    pub used_by_assets: u64,
}

impl LicenceUsageSummary {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// パネルの文言
    pub fn lines(&self) -> [String; 3] {
        [
            format!("{} licences in total.", self.total),
            format!("{} licences assigned to users.", self.used_by_users),
            format!("{} licences assigned to assets.", self.used_by_assets),
        ]
    }
}

/// サマリー表示枠（常に0個か1個）
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SummaryBoard {
    current: Option<LicenceUsageSummary>,
    requests: u64,
}

impl SummaryBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// 取得開始（取り消しは無い）。発行した回数を返す
    pub fn request_started(&mut self) -> u64 {
        self.requests += 1;
        self.requests
    }

    /// 応答が届いた: 前の表示を消して差し替える
    pub fn insert(&mut self, summary: LicenceUsageSummary) {
        self.current = Some(summary);
    }

    pub fn current(&self) -> Option<&LicenceUsageSummary> {
        self.current.as_ref()
    }

    pub fn clear(&mut self) {
        self.current = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_summary() {
        let s = LicenceUsageSummary::from_json(r#"{"total": 10, "used_by_users": 4, "used_by_assets": 3}"#)
            .unwrap();
        assert_eq!(s.total, 10);
        assert_eq!(
            s.lines(),
            [
                "10 licences in total.".to_string(),
                "4 licences assigned to users.".to_string(),
                "3 licences assigned to assets.".to_string(),
            ]
        );
    }

    #[test]
    fn test_parse_summary_missing_field_fails() {
        assert!(LicenceUsageSummary::from_json(r#"{"total": 1}"#).is_err());
    }

    #[test]
    fn test_board_holds_single_panel() {
        let mut board = SummaryBoard::new();
        assert_eq!(board.request_started(), 1);
        assert_eq!(board.request_started(), 2);
        board.insert(LicenceUsageSummary { total: 1, used_by_users: 0, used_by_assets: 0 });
        board.insert(LicenceUsageSummary { total: 2, used_by_users: 1, used_by_assets: 1 });
        assert_eq!(board.current().map(|s| s.total), Some(2));
        board.clear();
        assert!(board.current().is_none());
    }
}
