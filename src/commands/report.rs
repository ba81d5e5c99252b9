//! 階層レポートの開閉

use crate::cli::ReportCommand;
use crate::error::{ConsoleError, Result};
use assets_console_common::ReportTree;
use std::path::Path;

pub fn run(path: &Path, op: &ReportCommand) -> Result<Vec<String>> {
    if !path.exists() {
        return Err(ConsoleError::FileNotFound(path.display().to_string()));
    }
    let mut tree = ReportTree::from_json(&std::fs::read_to_string(path)?)?;
    let changed = match op {
        ReportCommand::Click { uid } => {
            tree.click(uid);
            true
        }
        ReportCommand::ExpandAll => {
            tree.expand_all();
            true
        }
        ReportCommand::CollapseAll => {
            tree.collapse_all();
            true
        }
        ReportCommand::Show => false,
    };
    // show は読むだけ
    if changed {
        std::fs::write(path, serde_json::to_string_pretty(tree.rows())?)?;
    }
    Ok(tree.visible_uids().into_iter().map(str::to_string).collect())
}
