//! Application state wiring the engine to its infrastructure.
//!
//! `AppState` holds one `SessionController` per signed-in owner, created
//! lazily on first contact. The controller generics are pinned here to
//! the concrete infra implementations; each controller sits behind an
//! async mutex so its operations stay a single logical thread of control
//! per owner.

use std::sync::Arc;
use std::time::Duration;

use dashmap::DashMap;
use tokio::sync::Mutex;

use synapse_core::event::bus::EventBus;
use synapse_core::session::controller::SessionController;
use synapse_infra::completion::http::HttpCompletionGateway;
use synapse_infra::config::{load_config, resolve_data_dir};
use synapse_infra::sqlite::pool::DatabasePool;
use synapse_infra::sqlite::session::SqliteSessionStore;
use synapse_types::config::AppConfig;
use synapse_types::error::SessionError;
use synapse_types::session::OwnerId;

/// Concrete controller type pinned to the infra implementations.
pub type ConcreteController = SessionController<SqliteSessionStore, HttpCompletionGateway>;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    controllers: Arc<DashMap<OwnerId, Arc<Mutex<ConcreteController>>>>,
    pub events: EventBus,
    pub config: AppConfig,
    pub db_pool: DatabasePool,
}

impl AppState {
    /// Initialize the application state: resolve the data directory,
    /// load config, connect to the database.
    pub async fn init() -> anyhow::Result<Self> {
        let data_dir = resolve_data_dir();
        tokio::fs::create_dir_all(&data_dir).await?;

        let config = load_config(&data_dir).await;

        let db_url = format!(
            "sqlite://{}?mode=rwc",
            data_dir.join("synapse.db").display()
        );
        let db_pool = DatabasePool::new(&db_url).await?;

        Ok(Self {
            controllers: Arc::new(DashMap::new()),
            events: EventBus::new(1024),
            config,
            db_pool,
        })
    }

    /// Get or create the controller for an owner.
    ///
    /// First contact acts as the sign-in transition: active state is
    /// reset and the owner's session list is fetched.
    pub async fn controller_for(
        &self,
        owner: &OwnerId,
    ) -> Result<Arc<Mutex<ConcreteController>>, SessionError> {
        if let Some(ctrl) = self.controllers.get(owner) {
            return Ok(ctrl.clone());
        }

        let store = SqliteSessionStore::new(self.db_pool.clone());
        let gateway = HttpCompletionGateway::new(
            self.config.completion_base_url.clone(),
            Duration::from_secs(self.config.completion_timeout_secs),
        );
        let mut controller = SessionController::new(store, gateway, self.events.clone());
        controller.sign_in(owner.clone()).await?;

        // Two requests can race here; entry() keeps whichever landed first.
        let entry = self
            .controllers
            .entry(owner.clone())
            .or_insert_with(|| Arc::new(Mutex::new(controller)));
        Ok(entry.clone())
    }

    /// Drop an owner's controller (sign-out transition), clearing its
    /// local state and cached list.
    pub async fn sign_out(&self, owner: &OwnerId) {
        if let Some((_, ctrl)) = self.controllers.remove(owner) {
            ctrl.lock().await.sign_out();
        }
    }
}
