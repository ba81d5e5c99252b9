//! 画面部品

pub mod asset_table;
pub mod bulk_toolbar;
pub mod child_list;
pub mod delete_controls;
pub mod formset_editor;
pub mod header;
pub mod licence_summary;
pub mod report_tree;
