use std::sync::Arc;

use pagekit_twilight::{AccessPolicy, SessionRegistry};
use twilight_http::Client;

use crate::config::BotConfig;

/// Shared application context passed into command handlers.
///
/// Cheap to clone because it only stores reference-counted shared state.
#[derive(Clone)]
pub struct Context {
    pub http: Arc<Client>,
    pub registry: SessionRegistry,
    pub config: Arc<BotConfig>,
}

impl Context {
    pub fn new(http: Arc<Client>, config: BotConfig) -> Self {
        Self {
            registry: SessionRegistry::new(Arc::clone(&http)),
            http,
            config: Arc::new(config),
        }
    }

    /// Paginators answer their invoker, plus bot owners when configured.
    pub fn access_for(&self, user_id: u64) -> AccessPolicy {
        AccessPolicy::owned_by(user_id).with_bot_owners(
            self.config.owner_ids.clone(),
            self.config.paginator.always_allow_owners,
        )
    }
}
