use std::sync::Arc;

use chrono::{Local, NaiveDate};
use nova_core::config::NovaConfig;
use nova_core::{ExternalCalendar, KvStore, LocalEvents, NovaResult};
use tokio::sync::{Mutex, RwLock};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<NovaConfig>,
    pub store: Arc<dyn KvStore>,
    /// Replaced wholesale by the refresh task
    pub external: Arc<RwLock<ExternalCalendar>>,
    /// Held across load, modify and save of local events
    write_lock: Arc<Mutex<()>>,
}

impl AppState {
    pub fn new(config: NovaConfig, store: Arc<dyn KvStore>) -> Self {
        AppState {
            config: Arc::new(config),
            store,
            external: Arc::new(RwLock::new(ExternalCalendar::disconnected())),
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }

    /// Local events are re-read per request so edits from the CLI show up.
    pub fn load_local(&self) -> NovaResult<LocalEvents> {
        LocalEvents::load(self.store.as_ref(), &self.config.events_key())
    }

    /// Load local events, apply `f`, and save them if `f` succeeds.
    /// Writers are serialized; nothing is saved when `f` fails.
    pub async fn modify_local<T>(
        &self,
        f: impl FnOnce(&mut LocalEvents) -> NovaResult<T>,
    ) -> NovaResult<T> {
        let _guard = self.write_lock.lock().await;

        let mut local = self.load_local()?;
        let result = f(&mut local)?;
        local.save(self.store.as_ref(), &self.config.events_key())?;

        Ok(result)
    }

    pub async fn set_external(&self, calendar: ExternalCalendar) {
        *self.external.write().await = calendar;
    }
}
