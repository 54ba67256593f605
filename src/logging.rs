//! 日志：滚动文件 + Terminal 面板
//!
//! 文件里是完整的 fmt 输出；Terminal 标签只收 codepad 自己 info 及以上的事件，
//! 压成 `LEVEL message key=value` 一行，时间戳由 `ConsoleState` 统一加上。
//! Console 标签已有的行（`CONSOLE_TARGET`）不再重复进入 Terminal。

use std::fmt::{self, Write as _};
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, Sender};

use codepad::kernel::console::CONSOLE_TARGET;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

const DEFAULT_FILTER: &str = "codepad=info";
const LOG_FILE: &str = "codepad.log";
const APP_TARGET_PREFIX: &str = "codepad";

pub struct LoggingGuard {
    _guard: WorkerGuard,
    log_dir: PathBuf,
    terminal_rx: Option<Receiver<String>>,
}

impl LoggingGuard {
    pub fn log_dir(&self) -> &Path {
        &self.log_dir
    }

    pub fn take_terminal_rx(&mut self) -> Option<Receiver<String>> {
        self.terminal_rx.take()
    }
}

/// 把事件压成一行发给会话的 Terminal 标签
struct TerminalLayer {
    tx: Sender<String>,
}

impl TerminalLayer {
    fn accepts(event: &Event<'_>) -> bool {
        let meta = event.metadata();
        *meta.level() <= Level::INFO
            && meta.target().starts_with(APP_TARGET_PREFIX)
            && meta.target() != CONSOLE_TARGET
    }
}

impl<S: Subscriber> Layer<S> for TerminalLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        if !Self::accepts(event) {
            return;
        }
        let mut line = TerminalLine::default();
        event.record(&mut line);
        let _ = self.tx.send(line.finish(*event.metadata().level()));
    }
}

#[derive(Default)]
struct TerminalLine {
    message: String,
    fields: String,
}

impl TerminalLine {
    fn finish(self, level: Level) -> String {
        format!("{:<5} {}{}", level.to_string(), self.message, self.fields)
    }
}

impl Visit for TerminalLine {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message.push_str(value);
        } else {
            let _ = write!(self.fields, " {}={}", field.name(), value);
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            let _ = write!(self.message, "{value:?}");
        } else {
            let _ = write!(self.fields, " {}={:?}", field.name(), value);
        }
    }
}

fn log_dir() -> std::io::Result<PathBuf> {
    codepad::kernel::services::adapters::ensure_log_dir().or_else(
        |_| -> std::io::Result<PathBuf> {
            let dir = std::env::temp_dir().join("codepad").join("logs");
            std::fs::create_dir_all(&dir)?;
            Ok(dir)
        },
    )
}

/// 安装全局 subscriber；已经安装过或拿不到日志目录时返回 `None`
pub fn init() -> Option<LoggingGuard> {
    let log_dir = log_dir().ok()?;

    let (file, guard) = tracing_appender::non_blocking(tracing_appender::rolling::daily(
        &log_dir, LOG_FILE,
    ));
    let (tx, terminal_rx) = mpsc::channel::<String>();

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let subscriber = tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(file)
                .with_ansi(false)
                .with_target(true),
        )
        .with(TerminalLayer { tx });

    if subscriber.try_init().is_err() {
        return None;
    }

    std::panic::set_hook(Box::new(|panic_info| {
        tracing::error!(panic = %panic_info, "panic");
    }));

    tracing::info!(log_dir = %log_dir.display(), "tracing initialized");

    Some(LoggingGuard {
        _guard: guard,
        log_dir,
        terminal_rx: Some(terminal_rx),
    })
}

#[cfg(test)]
#[path = "../tests/unit/logging.rs"]
mod tests;
