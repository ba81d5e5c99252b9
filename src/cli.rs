use assets_console_common::BulkAction;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "assets-console")]
#[command(about = "資産管理コンソール: 一括操作URLとformsetの操作", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 選択状態から一括操作の遷移先URLを組み立てる
    Dispatch {
        /// 操作 (edit / edit-location / invoice-report / add-attachment[:type] / transition:<type>)
        #[arg(required = true)]
        action: BulkAction,

        /// 現在のページに表示されている行のID（省略時は --select と同じ）
        #[arg(long = "visible")]
        visible: Vec<String>,

        /// チェックされた行のID（複数指定可）
        #[arg(short, long = "select")]
        select: Vec<String>,

        /// 全ページ選択
        #[arg(long)]
        all_pages: bool,

        /// 現在の検索条件（例: "?status=new"）
        #[arg(short, long, default_value = "")]
        query: String,
    },

    /// 検索条件に対して操作する（チェック状態は無視）
    SearchQuery {
        #[arg(required = true)]
        action: BulkAction,

        /// 現在の検索条件
        #[arg(short, long, required = true)]
        query: String,
    },

    /// formset の状態ファイルを操作する
    Formset {
        /// 状態JSONファイル
        #[arg(required = true)]
        state: PathBuf,

        #[command(subcommand)]
        op: FormsetCommand,
    },

    /// 階層レポートの開閉
    Report {
        /// レポート行のJSONファイル
        #[arg(required = true)]
        rows: PathBuf,

        #[command(subcommand)]
        op: ReportCommand,
    },

    /// ライセンス使用状況サマリーを取得して表示
    Licences {
        /// サマリーのURL
        #[arg(required = true)]
        url: String,
    },

    /// 設定を表示/編集
    Config {
        /// 一括実行を許す状態遷移を追加
        #[arg(long)]
        allow_transition: Option<String>,

        /// 既定値に戻す
        #[arg(long)]
        reset: bool,

        /// 既定値に戻す前の確認を省く
        #[arg(short, long)]
        yes: bool,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}

#[derive(Subcommand, Clone, Debug)]
pub enum FormsetCommand {
    /// 空の状態ファイルを作る（prefix は設定の formset_prefix）
    Init {
        /// フィールド名（カンマ区切り）
        #[arg(long, value_delimiter = ',', required = true)]
        fields: Vec<String>,

        /// 既存行を見分けるフィールド（例: id）
        #[arg(long)]
        identity: Option<String>,

        /// 空行の数
        #[arg(long, default_value_t = 1)]
        rows: usize,
    },
    /// 行を追加
    Add,
    /// 行を削除（最後の1行は削除できない）
    Delete { index: usize },
    /// 番号とカウンタを振り直す
    Renumber,
    /// 値を設定する
    Set {
        row: usize,
        field: String,
        value: String,
    },
    /// 指定フィールドの値を同じ列の他の行へコピー（id または name）
    Fill { source: String },
    /// 状態を表示
    Show,
}

#[derive(Subcommand, Clone, Debug)]
pub enum ReportCommand {
    /// 行をクリック（開閉）
    Click { uid: String },
    ExpandAll,
    CollapseAll,
    /// 表示中の行を表示
    Show,
}
