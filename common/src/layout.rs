//! 画面レイアウトと非同期レポートの設定

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// これより狭い画面はモバイル表示
pub const MOBILE_BREAKPOINT_PX: u32 = 768;

/// 詳細画面の情報ブロック
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InfoSection {
    BasicInfo,
    AdditionalInfo,
}

/// 表示順（モバイルではデータセンター情報を先頭へ）
pub fn section_order(viewport_width: u32) -> [InfoSection; 2] {
    if viewport_width < MOBILE_BREAKPOINT_PX {
        [InfoSection::AdditionalInfo, InfoSection::BasicInfo]
    } else {
        [InfoSection::BasicInfo, InfoSection::AdditionalInfo]
    }
}

/// 非同期レポート（進捗バー付き）の設定
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AsyncReportConfig {
    /// レポート生成を始める要素のセレクタ
    pub trigger: String,
    pub progress_bar: String,
    pub eta_el: String,
}

impl AsyncReportConfig {
    /// 一覧ページ既定（最後のページ送りリンク）
    pub fn pagination() -> Self {
        Self {
            trigger: ".pagination a:last-child".into(),
            progress_bar: "#async-progress".into(),
            eta_el: "#eta".into(),
        }
    }

    /// `data-role="async-report"` ボタン用
    pub fn async_report_button() -> Self {
        Self {
            trigger: r#"[data-role="async-report"]"#.into(),
            progress_bar: "#async-progress".into(),
            eta_el: "#eta".into(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("trigger", &self.trigger),
            ("progressBar", &self.progress_bar),
            ("etaEl", &self.eta_el),
        ] {
            if value.trim().is_empty() {
                return Err(Error::Config(format!("async report '{}' is empty", name)));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_order() {
        assert_eq!(
            section_order(480),
            [InfoSection::AdditionalInfo, InfoSection::BasicInfo]
        );
        assert_eq!(
            section_order(1024),
            [InfoSection::BasicInfo, InfoSection::AdditionalInfo]
        );
        assert_eq!(section_order(MOBILE_BREAKPOINT_PX)[0], InfoSection::BasicInfo);
    }

    #[test]
    fn test_async_report_config() {
        assert!(AsyncReportConfig::pagination().validate().is_ok());
        let json = r##"{"trigger": "#go", "progressBar": "#bar", "etaEl": ""}"##;
        let config: AsyncReportConfig = serde_json::from_str(json).unwrap();
        assert!(matches!(config.validate(), Err(Error::Config(_))));
    }
}
