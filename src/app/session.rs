//! 会话：把 Store、异步运行时和预览渲染串起来
//!
//! - 后台任务（身份校验、定时 tick）通过 `AppMessage` 回到这里，再转成 `Action`
//! - `Effect` 在这里执行（写出独立预览文档）
//! - 访问闸门没有放行之前，不渲染任何界面内容

use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, TryRecvError};
use std::sync::Arc;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use thiserror::Error;

use crate::kernel::services::adapters::{get_preview_dir, AppMessage, AsyncRuntime, TickerGuard};
use crate::kernel::services::ports::{IdentityProvider, Settings};
use crate::kernel::{
    AccessGate, Action, AppState, DispatchResult, Effect, PreviewError, PreviewRenderer,
    PreviewView, Store,
};
use crate::models::{seed_project, Forest};

const MAX_TERMINAL_DRAIN_PER_PUMP: usize = 256;
pub const DEFAULT_TICK_PERIOD: Duration = Duration::from_millis(50);

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("failed to start async runtime: {0}")]
    Runtime(#[from] std::io::Error),
    #[error(transparent)]
    Preview(#[from] PreviewError),
}

pub struct Session {
    store: Store,
    renderer: PreviewRenderer,
    runtime: AsyncRuntime,
    rx: Receiver<AppMessage>,
    _ticker: Option<TickerGuard>,
    terminal_rx: Option<Receiver<String>>,
    preview_dir: PathBuf,
    opened_previews: Vec<PathBuf>,
}

impl Session {
    pub fn new(settings: &Settings) -> Result<Self, SessionError> {
        let forest = if settings.project.seed_templates {
            seed_project()
        } else {
            Forest::default()
        };
        Self::with_forest(forest, settings)
    }

    pub fn with_forest(forest: Forest, settings: &Settings) -> Result<Self, SessionError> {
        let (tx, rx) = mpsc::channel();
        let runtime = AsyncRuntime::new(tx)?;
        let renderer = PreviewRenderer::new()?;
        let store = Store::new(AppState::new(forest, settings));
        tracing::info!(
            nodes = store.state().forest.len(),
            debounce_ms = settings.preview.debounce_ms,
            "session created"
        );

        Ok(Self {
            store,
            renderer,
            runtime,
            rx,
            _ticker: None,
            terminal_rx: None,
            preview_dir: get_preview_dir(),
            opened_previews: Vec::new(),
        })
    }

    pub fn with_terminal(mut self, terminal_rx: Option<Receiver<String>>) -> Self {
        self.terminal_rx = terminal_rx;
        self
    }

    pub fn with_preview_dir(mut self, dir: PathBuf) -> Self {
        self.preview_dir = dir;
        self
    }

    /// 启动身份校验和 tick；重复调用会替换旧的 ticker
    pub fn start(&mut self, identity: Arc<dyn IdentityProvider>, tick_period: Duration) {
        self.runtime.verify_identity(identity);
        self._ticker = Some(self.runtime.spawn_ticker(tick_period));
    }

    pub fn state(&self) -> &AppState {
        self.store.state()
    }

    pub fn gate(&self) -> &AccessGate {
        &self.store.state().gate
    }

    pub fn shell_visible(&self) -> bool {
        self.gate().is_granted()
    }

    pub fn opened_previews(&self) -> &[PathBuf] {
        &self.opened_previews
    }

    pub fn dispatch(&mut self, action: Action) -> bool {
        let DispatchResult {
            effects,
            state_changed,
        } = self.store.dispatch(action);
        for effect in effects {
            self.run_effect(effect);
        }
        state_changed
    }

    pub fn handle_message(&mut self, msg: AppMessage) -> bool {
        match msg {
            AppMessage::Tick { now } => self.dispatch(Action::Tick { now }),
            AppMessage::IdentityResolved(result) => self.dispatch(Action::IdentityResolved(result)),
        }
    }

    /// 处理所有已到达的消息和日志行，不阻塞
    pub fn pump(&mut self) -> bool {
        let mut changed = false;
        loop {
            match self.rx.try_recv() {
                Ok(msg) => changed |= self.handle_message(msg),
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
        changed |= self.poll_terminal();
        changed
    }

    /// 阻塞到闸门有结果或超时；超时后闸门仍是 `Pending`
    pub fn wait_for_gate(&mut self, timeout: Duration) -> &AccessGate {
        let deadline = Instant::now() + timeout;
        while matches!(self.gate(), AccessGate::Pending) {
            let Some(left) = deadline.checked_duration_since(Instant::now()) else {
                tracing::warn!(?timeout, "identity check timed out");
                break;
            };
            match self.rx.recv_timeout(left) {
                Ok(msg) => {
                    self.handle_message(msg);
                }
                Err(RecvTimeoutError::Timeout) => continue,
                Err(RecvTimeoutError::Disconnected) => break,
            }
        }
        self.poll_terminal();
        self.gate()
    }

    /// 持续处理消息，直到没有待发出的预览更新
    pub fn wait_for_preview(&mut self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        while self.store.state().preview.debounce().is_pending() {
            let Some(left) = deadline.checked_duration_since(Instant::now()) else {
                return false;
            };
            match self.rx.recv_timeout(left) {
                Ok(msg) => {
                    self.handle_message(msg);
                }
                Err(RecvTimeoutError::Timeout) => return false,
                Err(RecvTimeoutError::Disconnected) => {
                    self.dispatch(Action::Tick {
                        now: Instant::now(),
                    });
                    return !self.store.state().preview.debounce().is_pending();
                }
            }
        }
        self.poll_terminal();
        true
    }

    pub fn preview_view(&self) -> PreviewView<'_> {
        let preview = &self.store.state().preview;
        PreviewView::from_code(preview.code(), preview.live)
    }

    /// 闸门未放行时返回 `Ok(None)`
    pub fn render_preview(&self) -> Result<Option<String>, PreviewError> {
        if !self.shell_visible() {
            return Ok(None);
        }
        let html = self
            .renderer
            .render(&self.preview_view(), self.store.state().ui.theme)?;
        Ok(Some(html))
    }

    fn poll_terminal(&mut self) -> bool {
        let Some(rx) = self.terminal_rx.take() else {
            return false;
        };

        let mut changed = false;
        let mut disconnected = false;
        for _ in 0..MAX_TERMINAL_DRAIN_PER_PUMP {
            match rx.try_recv() {
                Ok(line) => {
                    changed |= self.store.dispatch(Action::TerminalAppend { line }).state_changed;
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    disconnected = true;
                    break;
                }
            }
        }

        if !disconnected {
            self.terminal_rx = Some(rx);
        }
        changed
    }

    fn run_effect(&mut self, effect: Effect) {
        match effect {
            Effect::OpenPreviewWindow { html } => match self.write_preview(&html) {
                Ok(path) => {
                    tracing::info!(path = %path.display(), "preview document written");
                    self.opened_previews.push(path);
                }
                Err(e) => {
                    tracing::error!(dir = %self.preview_dir.display(), error = %e, "open preview failed");
                }
            },
        }
    }

    fn write_preview(&self, html: &str) -> std::io::Result<PathBuf> {
        std::fs::create_dir_all(&self.preview_dir)?;
        let stamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis())
            .unwrap_or_default();
        let path = self
            .preview_dir
            .join(format!("preview-{stamp}-{}.html", self.opened_previews.len()));
        std::fs::write(&path, html)?;
        Ok(path)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/app/session.rs"]
mod tests;
