use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Context};
use codepad::app::{Session, DEFAULT_TICK_PERIOD};
use codepad::kernel::services::adapters::{ensure_settings_file, load_settings, LocalIdentity};
use codepad::kernel::{console, AccessGate, Action};
use codepad::models::NodeId;

mod logging;

const GATE_TIMEOUT: Duration = Duration::from_secs(10);

fn main() -> anyhow::Result<()> {
    console::capture_local_offset();
    let mut logging = logging::init();

    if let Err(e) = ensure_settings_file() {
        tracing::warn!(error = %e, "settings file unavailable");
    }
    let settings = load_settings();

    let file_id = std::env::args().nth(1).map(NodeId::from);

    let mut session = Session::new(&settings)
        .context("failed to start session")?
        .with_terminal(logging.as_mut().and_then(|g| g.take_terminal_rx()));
    session.start(Arc::new(LocalIdentity::from_env()), DEFAULT_TICK_PERIOD);

    match session.wait_for_gate(GATE_TIMEOUT) {
        AccessGate::Granted(identity) => {
            tracing::info!(user = %identity.display_name, "access granted");
        }
        AccessGate::Denied { reason } => bail!("access denied: {reason}"),
        AccessGate::Pending => bail!("identity check did not answer in {GATE_TIMEOUT:?}"),
    }

    if let Some(id) = file_id {
        if !session.dispatch(Action::OpenFile { id: id.clone() })
            && session.state().active_file_id.as_ref() != Some(&id)
        {
            bail!("no file with id {id}");
        }
    }
    if !session.state().preview.live {
        session.dispatch(Action::ToggleLivePreview);
    }
    session.wait_for_preview(settings.preview.debounce_delay() * 2 + GATE_TIMEOUT);
    session.pump();

    let markup = session
        .render_preview()
        .context("failed to render preview")?
        .context("preview hidden behind access gate")?;
    println!("{markup}");

    if let Some(guard) = &logging {
        tracing::info!(log_dir = %guard.log_dir().display(), "done");
    }
    Ok(())
}
