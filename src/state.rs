use std::sync::Arc;
use tokio::sync::{broadcast, RwLock};

use crate::analytics::Analytics;
use crate::config::Settings;
use crate::contact::ContactBackend;
use crate::content_loader::Content;

pub type RefreshBroadcaster = broadcast::Sender<()>;

pub struct AppState {
    /// Replaced wholesale by the hot-reload watcher, otherwise read-only.
    pub content: RwLock<Content>,
    pub settings: Settings,
    pub analytics: Arc<dyn Analytics>,
    pub contact: Arc<dyn ContactBackend>,
}

impl AppState {
    pub fn new(
        content: Content,
        settings: Settings,
        analytics: Arc<dyn Analytics>,
        contact: Arc<dyn ContactBackend>,
    ) -> Self {
        Self {
            content: RwLock::new(content),
            settings,
            analytics,
            contact,
        }
    }

    pub fn is_development(&self) -> bool {
        self.settings.is_development
    }
}

#[derive(Clone)]
pub struct RouterState {
    pub app_state: Arc<AppState>,
    pub broadcaster: RefreshBroadcaster,
}

impl axum::extract::FromRef<RouterState> for Arc<AppState> {
    fn from_ref(state: &RouterState) -> Self {
        state.app_state.clone()
    }
}

impl axum::extract::FromRef<RouterState> for RefreshBroadcaster {
    fn from_ref(state: &RouterState) -> Self {
        state.broadcaster.clone()
    }
}
