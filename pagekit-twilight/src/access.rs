//! Who may operate a paginator session.

use std::{fmt, sync::Arc};

type AccessCheck = Arc<dyn Fn(u64) -> bool + Send + Sync>;

/// Decides whether a user may press a session's controls.
///
/// Bot owners pass first when `allow_owners` is set. A session owner then
/// decides alone: only that user may interact. The custom check is consulted
/// only for sessions without an owner, and with neither everyone is let in.
#[derive(Clone, Default)]
pub struct AccessPolicy {
    pub owner_id: Option<u64>,
    pub bot_owners: Vec<u64>,
    pub allow_owners: bool,
    check: Option<AccessCheck>,
}

impl AccessPolicy {
    /// Anyone may interact.
    pub fn public() -> Self {
        Self::default()
    }

    /// Only `owner_id` may interact.
    pub fn owned_by(owner_id: u64) -> Self {
        Self {
            owner_id: Some(owner_id),
            ..Self::default()
        }
    }

    /// Let bot owners through regardless of the session owner.
    pub fn with_bot_owners(mut self, bot_owners: Vec<u64>, allow_owners: bool) -> Self {
        self.bot_owners = bot_owners;
        self.allow_owners = allow_owners;
        self
    }

    /// Predicate deciding access to sessions that have no owner.
    pub fn with_check(mut self, check: impl Fn(u64) -> bool + Send + Sync + 'static) -> Self {
        self.check = Some(Arc::new(check));
        self
    }

    pub fn allows(&self, user_id: u64) -> bool {
        if self.allow_owners && self.bot_owners.contains(&user_id) {
            return true;
        }

        if let Some(owner_id) = self.owner_id {
            return owner_id == user_id;
        }

        self.check.as_ref().is_none_or(|check| check(user_id))
    }
}

impl fmt::Debug for AccessPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessPolicy")
            .field("owner_id", &self.owner_id)
            .field("bot_owners", &self.bot_owners)
            .field("allow_owners", &self.allow_owners)
            .field("check", &self.check.is_some())
            .finish()
    }
}
