mod config;
mod error;
mod models;
mod ui;

use std::fs::{self, OpenOptions};
use std::io;
use std::path::Path;
use std::sync::Arc;

use ratatui::DefaultTerminal;
use tracing_subscriber::{
    EnvFilter, filter::LevelFilter, layer::SubscriberExt, util::SubscriberInitExt,
};

use crate::config::Config;
use crate::error::AppError;
use crate::ui::{App, render};

/// 初始化日志，写入文件（终端由 TUI 占用）
fn setup_logging(path: &Path, level: LevelFilter) -> Result<(), AppError> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    let log_file = OpenOptions::new().create(true).append(true).open(path)?;

    // RUST_LOG 优先于配置的级别
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::default().add_directive(level.into()));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Arc::new(log_file)),
        )
        .init();
    Ok(())
}

fn main() -> Result<(), AppError> {
    let config = Config::load()?;
    setup_logging(&config.log_file, config.log_level)?;
    tracing::info!(currency = %config.currency_symbol, "starting expense tracker");

    // 创建应用状态
    let mut app = App::new(config.currency_symbol);

    // 设置终端：try_init 会安装 panic hook，panic 时也会恢复终端
    let mut terminal = match ratatui::try_init() {
        Ok(terminal) => terminal,
        Err(e) => {
            ratatui::restore();
            return Err(e.into());
        }
    };

    // 主循环
    let result = run_app(&mut terminal, &mut app);

    // 恢复终端，每一步失败都不会跳过后续步骤
    ratatui::restore();

    tracing::info!(
        expenses = app.store.len(),
        total = app.store.total(),
        "exiting, session discarded"
    );

    result.map_err(AppError::from)
}

fn run_app(terminal: &mut DefaultTerminal, app: &mut App) -> io::Result<()> {
    loop {
        terminal.draw(|f| render(f, app))?;

        if let crossterm::event::Event::Key(key) = crossterm::event::read()? {
            if key.kind == crossterm::event::KeyEventKind::Press {
                if ui::handle_key_event(app, key.code)? {
                    break;
                }
            }
        }
    }
    Ok(())
}
