//! ライセンス使用状況サマリーの取得

use crate::error::{ConsoleError, Result};
use assets_console_common::{LicenceUsageSummary, SummaryBoard};

pub async fn fetch_summary(url: &str) -> Result<LicenceUsageSummary> {
    let response = reqwest::get(url)
        .await
        .map_err(|e| ConsoleError::Fetch(e.to_string()))?;
    if !response.status().is_success() {
        return Err(ConsoleError::Fetch(format!("HTTP {}", response.status())));
    }
    response
        .json::<LicenceUsageSummary>()
        .await
        .map_err(|e| ConsoleError::Fetch(e.to_string()))
}

/// 取得してパネルを差し替える
pub async fn refresh(board: &mut SummaryBoard, url: &str) -> Result<()> {
    board.request_started();
    let summary = fetch_summary(url).await?;
    board.insert(summary);
    Ok(())
}
