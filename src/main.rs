use assets_console::commands::{bulk, formset_state, licences, report};
use assets_console::{cli, config, error};
use assets_console_common::{ConsoleConfig, Dispatch, SummaryBoard};
use clap::Parser;
use cli::{Cli, Commands};
use config::Config;
use error::{ConsoleError, Result};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logger(cli.verbose);
    let config = Config::load()?;

    match cli.command {
        Commands::Dispatch { action, visible, select, all_pages, query } => {
            let result = bulk::dispatch(&config, &action, &visible, &select, all_pages, &query);
            println!("{}", bulk::describe(&result));
        }

        Commands::SearchQuery { action, query } => {
            let result = bulk::dispatch_search_query(&config, &action, &query);
            println!("{}", bulk::describe(&result));
            if let Dispatch::NoOp(_) = result {
                println!("検索条件が空のため何もしません");
            }
        }

        Commands::Formset { state, op } => {
            let report = formset_state::run(&state, &op, &config)?;

            if let Some(fill) = &report.fill {
                println!("✔ {}行に入力しました", fill.updated_rows.len());
            }
            println!("{}", if report.changed { "✔ 更新しました" } else { "変更なし" });
            println!("  TOTAL_FORMS: {}", report.counters.total_forms);
            println!("  INITIAL_FORMS: {}", report.counters.initial_forms);
        }

        Commands::Report { rows, op } => {
            for uid in report::run(&rows, &op)? {
                println!("{}", uid);
            }
        }

        Commands::Licences { url } => {
            let mut board = SummaryBoard::new();
            licences::refresh(&mut board, &url).await?;
            if let Some(summary) = board.current() {
                for line in summary.lines() {
                    println!("{}", line);
                }
            }
        }

        Commands::Config { allow_transition, reset, show, yes } => {
            let reset = reset && (yes || confirm("設定を既定値に戻しますか?")?);
            let mut config = if reset { ConsoleConfig::default() } else { config };
            let mut changed = reset;

            if let Some(slug) = allow_transition {
                changed |= config.allow_transition(&slug);
            }
            if changed {
                Config::save(&config)?;
                println!("✔ 設定を保存しました");
            }

            if show || !changed {
                println!("設定:");
                println!("  一括遷移: {}", config.allowed_transitions.join(", "));
                println!("  formset prefix: {}", config.formset_prefix);
                println!("  全行入力の最大行数: {}", config.max_fill_rows);
                println!("  表示閾値: {}", config.visible_threshold);
            }
        }
    }

    Ok(())
}

fn confirm(prompt: &str) -> Result<bool> {
    dialoguer::Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()
        .map_err(|e| ConsoleError::Prompt(e.to_string()))
}

fn init_logger(verbose: bool) {
    let mut builder = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.init();
}
