//! formset 状態ファイルの操作
//!
//! 状態は `FormCollection` のJSON。操作のたびに読み込み、書き戻す。

use crate::cli::FormsetCommand;
use crate::error::{ConsoleError, Result};
use assets_console_common::fill::fill_column_from_row_with_limit;
use assets_console_common::{
    ConsoleConfig, FieldLink, FillOutcome, FillSource, FormCollection, ManagementCounters, RowTemplate,
};
use log::info;
use std::path::Path;

/// 1回の操作の結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpReport {
    /// 状態が変わったか
    pub changed: bool,
    pub counters: ManagementCounters,
    pub fill: Option<FillOutcome>,
}

pub fn load(path: &Path) -> Result<FormCollection> {
    if !path.exists() {
        return Err(ConsoleError::FileNotFound(path.display().to_string()));
    }
    let content = std::fs::read_to_string(path)?;
    let mut collection: FormCollection = serde_json::from_str(&content)?;
    // 手で編集された状態でもカウンタを合わせる
    collection.renumber();
    Ok(collection)
}

pub fn save(path: &Path, collection: &FormCollection) -> Result<()> {
    let json = serde_json::to_string_pretty(collection)?;
    std::fs::write(path, json)?;
    Ok(())
}

/// 設定の prefix で空の formset を作る（最低1行）
pub fn init(config: &ConsoleConfig, fields: &[String], identity: Option<&str>, rows: usize) -> FormCollection {
    let mut template = RowTemplate::new(config.formset_prefix.as_str()).with_fields(fields.iter().cloned());
    if let Some(identity) = identity {
        template = template.with_identity_field(identity);
    }
    FormCollection::with_blank_rows(template, 0, rows.max(1))
}

/// 操作を適用する
pub fn apply(collection: &mut FormCollection, op: &FormsetCommand, config: &ConsoleConfig) -> Result<OpReport> {
    let mut fill = None;
    let changed = match op {
        FormsetCommand::Init { fields, identity, rows } => {
            *collection = init(config, fields, identity.as_deref(), *rows);
            true
        }
        FormsetCommand::Add => collection.add_row(),
        FormsetCommand::Delete { index } => collection.delete_row(*index),
        FormsetCommand::Renumber => {
            collection.renumber();
            true
        }
        FormsetCommand::Set { row, field, value } => {
            let set = collection.set_value(*row, field, value);
            if set {
                collection.react_to_change(*row, field, &[FieldLink::user_sets_in_progress()]);
            }
            set
        }
        FormsetCommand::Fill { source } => {
            let source = if source.starts_with(assets_console_common::row_template::ID_LEAD) {
                FillSource::Id(source.clone())
            } else {
                FillSource::Name(source.clone())
            };
            let outcome = fill_column_from_row_with_limit(collection, &source, config.max_fill_rows)?;
            for notification in &outcome.notifications {
                collection.react_to_change(
                    notification.row,
                    &notification.field,
                    &[FieldLink::user_sets_in_progress()],
                );
            }
            let changed = !outcome.updated_rows.is_empty();
            fill = Some(outcome);
            changed
        }
        FormsetCommand::Show => false,
    };
    Ok(OpReport {
        changed,
        counters: collection.counters(),
        fill,
    })
}

/// ファイルを読み込んで操作し、変わっていれば書き戻す
///
/// `init` だけはファイルを読まずに新しく作る。
pub fn run(path: &Path, op: &FormsetCommand, config: &ConsoleConfig) -> Result<OpReport> {
    if let FormsetCommand::Init { fields, identity, rows } = op {
        let collection = init(config, fields, identity.as_deref(), *rows);
        save(path, &collection)?;
        info!("created {} with {} rows", path.display(), collection.len());
        return Ok(OpReport {
            changed: true,
            counters: collection.counters(),
            fill: None,
        });
    }

    let mut collection = load(path)?;
    let report = apply(&mut collection, op, config)?;
    if report.changed {
        save(path, &collection)?;
    }
    Ok(report)
}
