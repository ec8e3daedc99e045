//! Background refresh of the external calendar.

use std::time::Duration;

use nova_core::ExternalWindow;
use nova_core::external::fetch_external;

use crate::state::AppState;

/// Fetch the external feed once and store the result.
pub async fn refresh_external(state: &AppState) {
    let window = ExternalWindow::starting(state.today(), state.config.external_window_days);
    let calendar = fetch_external(
        state.config.external_calendar.as_deref(),
        window,
        state.config.external_color,
    )
    .await;

    tracing::debug!(
        connected = calendar.connected,
        events = calendar.events.len(),
        "refreshed external calendar"
    );
    state.set_external(calendar).await;
}

/// Refresh immediately, then every `state.config.server.refresh_interval_secs`.
pub fn spawn_refresh_job(state: AppState) -> tokio::task::JoinHandle<()> {
    let period = Duration::from_secs(state.config.server.refresh_interval_secs.max(1));

    tokio::spawn(async move {
        let mut interval = tokio::time::interval(period);
        loop {
            interval.tick().await;
            refresh_external(&state).await;
        }
    })
}
