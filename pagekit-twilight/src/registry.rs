//! Live paginator sessions, their messages and their timeouts.

use std::{
    collections::HashMap,
    sync::{
        Arc, Weak,
        atomic::{AtomicU64, Ordering},
    },
    time::Duration,
};

use anyhow::bail;
use pagekit_core::{AfterAction, PageCollection};
use tokio::{sync::Mutex, task::JoinHandle};
use tracing::{debug, info, warn};
use twilight_http::Client;
use twilight_model::{
    application::interaction::Interaction,
    channel::message::component::Component,
    id::{
        Id,
        marker::{ChannelMarker, MessageMarker},
    },
};

use crate::{
    interaction::{ControlEvent, PaginatorInteraction, classify},
    respond::{
        delete_message, edit_components, edit_message, respond_deferred_update,
        respond_ephemeral_message, respond_expired, respond_invalid, respond_modal,
        respond_update_components, respond_update_message, respond_with_message, send_message,
    },
    session::{ErasedSession, Session, SessionReply},
    token::SessionId,
};

type SharedSession = Arc<Mutex<Slot>>;
type MessageRef = (Id<ChannelMarker>, Id<MessageMarker>);

/// A registered session, closed once the registry lets go of it.
struct Slot {
    session: Box<dyn ErasedSession>,
    closed: bool,
}

impl Slot {
    /// `None` once the session was stopped or timed out.
    fn handle(
        &mut self,
        session_id: SessionId,
        actor: Option<u64>,
        event: ControlEvent,
    ) -> Option<SessionReply> {
        if self.closed {
            return None;
        }

        Some(self.session.handle(session_id, actor, event))
    }

    /// Close the slot and return the components `action` leaves behind.
    fn close(&mut self, session_id: SessionId, action: AfterAction) -> Option<Vec<Component>> {
        self.closed = true;
        self.session.after_components(session_id, action)
    }
}

struct Entry {
    session: SharedSession,
    message: Option<MessageRef>,
    timeout_secs: Option<u64>,
    timeout: Option<JoinHandle<()>>,
}

impl Entry {
    fn cancel_timeout(&mut self) {
        if let Some(task) = self.timeout.take() {
            task.abort();
        }
    }
}

struct RegistryInner {
    http: Arc<Client>,
    sessions: Mutex<HashMap<SessionId, Entry>>,
    next_id: AtomicU64,
}

/// Owns every live session and routes paginator interactions to them.
///
/// Cheap to clone; clones share the same sessions.
#[derive(Clone)]
pub struct SessionRegistry {
    inner: Arc<RegistryInner>,
}

impl SessionRegistry {
    pub fn new(http: Arc<Client>) -> Self {
        Self {
            inner: Arc::new(RegistryInner {
                http,
                sessions: Mutex::new(HashMap::new()),
                next_id: AtomicU64::new(1),
            }),
        }
    }

    pub fn http(&self) -> &Client {
        &self.inner.http
    }

    fn allocate_id(&self) -> SessionId {
        self.inner.next_id.fetch_add(1, Ordering::Relaxed)
    }

    /// Post `session` to a channel and start tracking it.
    ///
    /// Returns `None` when the first page has no controls; nothing is
    /// tracked then.
    pub async fn send<P: Send + 'static>(
        &self,
        channel_id: Id<ChannelMarker>,
        session: Session<P>,
    ) -> anyhow::Result<Option<SessionId>> {
        let session_id = self.allocate_id();
        let payload = session.payload(session_id);
        let message = send_message(self.http(), channel_id, &payload).await?;

        if payload.components.is_empty() {
            return Ok(None);
        }

        self.insert(session_id, Box::new(session), Some((message.channel_id, message.id)))
            .await;

        Ok(Some(session_id))
    }

    /// Answer `interaction` with `session` and start tracking it.
    pub async fn respond<P: Send + 'static>(
        &self,
        interaction: &Interaction,
        session: Session<P>,
    ) -> anyhow::Result<Option<SessionId>> {
        let session_id = self.allocate_id();
        let payload = session.payload(session_id);
        let message = respond_with_message(self.http(), interaction, &payload).await?;

        if payload.components.is_empty() {
            return Ok(None);
        }

        self.insert(session_id, Box::new(session), Some((message.channel_id, message.id)))
            .await;

        Ok(Some(session_id))
    }

    async fn insert(
        &self,
        session_id: SessionId,
        session: Box<dyn ErasedSession>,
        message: Option<MessageRef>,
    ) {
        let timeout_secs = session.options().timeout_secs;
        let entry = Entry {
            session: Arc::new(Mutex::new(Slot {
                session,
                closed: false,
            })),
            message,
            timeout_secs,
            timeout: timeout_secs.map(|secs| self.spawn_timeout(session_id, secs)),
        };

        self.inner.sessions.lock().await.insert(session_id, entry);
        debug!(session_id, ?timeout_secs, "paginator session registered");
    }

    pub async fn len(&self) -> usize {
        self.inner.sessions.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.sessions.lock().await.is_empty()
    }

    pub async fn contains(&self, session_id: SessionId) -> bool {
        self.inner.sessions.lock().await.contains_key(&session_id)
    }

    fn spawn_timeout(&self, session_id: SessionId, timeout_secs: u64) -> JoinHandle<()> {
        let inner = Arc::downgrade(&self.inner);

        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_secs(timeout_secs)).await;
            expire(inner, session_id).await;
        })
    }

    /// Restart the idle timeout of a live session.
    async fn rearm(&self, session_id: SessionId) {
        let mut sessions = self.inner.sessions.lock().await;
        let Some(entry) = sessions.get_mut(&session_id) else {
            return;
        };

        entry.cancel_timeout();
        entry.timeout = entry
            .timeout_secs
            .map(|secs| self.spawn_timeout(session_id, secs));
    }

    async fn take(&self, session_id: SessionId) -> Option<Entry> {
        let mut entry = self.inner.sessions.lock().await.remove(&session_id)?;
        entry.cancel_timeout();
        Some(entry)
    }

    /// End a session from code, applying its `after_stop` action.
    ///
    /// Returns `false` when the session is not live.
    pub async fn stop(&self, session_id: SessionId) -> anyhow::Result<bool> {
        let Some(entry) = self.take(session_id).await else {
            return Ok(false);
        };

        let (action, components) = {
            let mut slot = entry.session.lock().await;
            let action = slot.session.options().after_stop;
            (action, slot.close(session_id, action))
        };
        info!(session_id, ?action, "paginator session stopped");
        apply_after_action(self.http(), action, components, entry.message).await?;

        Ok(true)
    }

    /// Run `update` on a live session over `P` pages, then redraw its message.
    ///
    /// Returns `Ok(None)` when the session has ended, and an error when it
    /// holds pages of another type.
    pub async fn update_session<P, R>(
        &self,
        session_id: SessionId,
        update: impl FnOnce(&mut Session<P>) -> R,
    ) -> anyhow::Result<Option<R>>
    where
        P: Send + 'static,
    {
        let live = {
            let sessions = self.inner.sessions.lock().await;
            sessions
                .get(&session_id)
                .map(|entry| (Arc::clone(&entry.session), entry.message))
        };
        let Some((shared, message)) = live else {
            return Ok(None);
        };

        // Held through the edit so interaction responses cannot interleave.
        let mut slot = shared.lock().await;
        if slot.closed {
            return Ok(None);
        }

        let Some(session) = slot.session.as_any_mut().downcast_mut::<Session<P>>() else {
            bail!("paginator session {session_id} holds a different page type");
        };
        let output = update(&mut *session);
        let payload = session.payload(session_id);

        if let Some((channel_id, message_id)) = message {
            edit_message(self.http(), channel_id, message_id, &payload).await?;
        }
        debug!(session_id, "paginator session updated");

        Ok(Some(output))
    }

    /// Swap the pages of a live session and redraw it. The current index is
    /// kept when it still exists and clamped to the new last page otherwise.
    ///
    /// Returns `false` when the session has ended.
    pub async fn set_pages<P: Send + 'static>(
        &self,
        session_id: SessionId,
        pages: Vec<P>,
    ) -> anyhow::Result<bool> {
        let pages = PageCollection::new(pages)?;
        let change = self
            .update_session(session_id, move |session: &mut Session<P>| {
                session.paginator_mut().set_collection(pages)
            })
            .await?;

        match change {
            Some(change) => {
                change?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Route one gateway interaction.
    ///
    /// Returns `false` when the interaction is not addressed to a paginator,
    /// so callers can hand it to other handlers.
    pub async fn handle_interaction(&self, interaction: &Interaction) -> anyhow::Result<bool> {
        let (session_id, actor_user_id, event) = match classify(interaction) {
            PaginatorInteraction::NotForPaginator => return Ok(false),
            PaginatorInteraction::Invalid => {
                respond_invalid(self.http(), interaction).await?;
                return Ok(true);
            }
            PaginatorInteraction::Valid {
                session_id,
                actor_user_id,
                event,
            } => (session_id, actor_user_id, event),
        };

        let shared = {
            let sessions = self.inner.sessions.lock().await;
            sessions
                .get(&session_id)
                .map(|entry| Arc::clone(&entry.session))
        };

        let Some(shared) = shared else {
            respond_expired(self.http(), interaction).await?;
            return Ok(true);
        };

        // Held until the response is sent so edits land in order.
        let mut slot = shared.lock().await;
        let Some(reply) = slot.handle(session_id, actor_user_id, event) else {
            respond_expired(self.http(), interaction).await?;
            return Ok(true);
        };
        debug!(session_id, ?actor_user_id, "paginator interaction handled");

        match reply {
            SessionReply::Update(payload) => {
                respond_update_message(self.http(), interaction, &payload).await?;
                self.rearm(session_id).await;
            }
            SessionReply::Defer => {
                respond_deferred_update(self.http(), interaction).await?;
                self.rearm(session_id).await;
            }
            SessionReply::OpenModal(data) => {
                respond_modal(self.http(), interaction, data).await?;
                self.rearm(session_id).await;
            }
            SessionReply::Ephemeral(content) => {
                respond_ephemeral_message(self.http(), interaction, &content).await?;
            }
            SessionReply::Stop(action) => {
                let message = self
                    .take(session_id)
                    .await
                    .and_then(|entry| entry.message)
                    .or_else(|| {
                        interaction
                            .message
                            .as_ref()
                            .map(|message| (message.channel_id, message.id))
                    });
                info!(session_id, ?action, "paginator session stopped");

                match slot.close(session_id, action) {
                    Some(components) => {
                        respond_update_components(self.http(), interaction, &components).await?;
                    }
                    None => respond_deferred_update(self.http(), interaction).await?,
                }

                if action == AfterAction::DeleteMessage
                    && let Some((channel_id, message_id)) = message
                {
                    delete_message(self.http(), channel_id, message_id).await?;
                }
            }
        }

        Ok(true)
    }
}

async fn expire(inner: Weak<RegistryInner>, session_id: SessionId) {
    let Some(inner) = inner.upgrade() else {
        return;
    };

    // The running task is this one, so its handle is dropped rather than aborted.
    let Some(entry) = inner.sessions.lock().await.remove(&session_id) else {
        return;
    };

    let (action, components) = {
        let mut slot = entry.session.lock().await;
        let action = slot.session.options().after_timeout;
        (action, slot.close(session_id, action))
    };
    info!(session_id, ?action, "paginator session timed out");

    if let Err(source) = apply_after_action(&inner.http, action, components, entry.message).await
    {
        warn!(?source, session_id, "failed to clean up timed out paginator message");
    }
}

async fn apply_after_action(
    http: &Client,
    action: AfterAction,
    components: Option<Vec<Component>>,
    message: Option<MessageRef>,
) -> anyhow::Result<()> {
    let Some((channel_id, message_id)) = message else {
        return Ok(());
    };

    if action == AfterAction::DeleteMessage {
        return delete_message(http, channel_id, message_id).await;
    }

    if let Some(components) = components {
        edit_components(http, channel_id, message_id, &components).await?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use pagekit_core::{Paginator, PaginatorOptions};

    use super::*;
    use crate::token::ControlAction;

    fn registry() -> SessionRegistry {
        let _ = rustls::crypto::ring::default_provider().install_default();
        SessionRegistry::new(Arc::new(Client::new("test-token".to_owned())))
    }

    fn words(start: usize, timeout_secs: Option<u64>) -> Box<dyn ErasedSession> {
        let paginator = Paginator::with_start(["one", "two", "three", "four"], start).unwrap();
        let options = PaginatorOptions {
            timeout_secs,
            ..PaginatorOptions::default()
        };
        Box::new(Session::from_content(paginator, options))
    }

    fn session(timeout_secs: Option<u64>) -> Box<dyn ErasedSession> {
        words(0, timeout_secs)
    }

    async fn shared(registry: &SessionRegistry, session_id: SessionId) -> SharedSession {
        let sessions = registry.inner.sessions.lock().await;
        Arc::clone(&sessions[&session_id].session)
    }

    async fn index(registry: &SessionRegistry, session_id: SessionId) -> Option<usize> {
        registry
            .update_session(session_id, |session: &mut Session<&'static str>| {
                session.paginator().index()
            })
            .await
            .unwrap()
    }

    #[tokio::test(start_paused = true)]
    async fn sessions_expire_after_their_timeout() {
        let registry = registry();
        registry.insert(1, session(Some(60)), None).await;
        assert!(registry.contains(1).await);

        tokio::time::sleep(Duration::from_secs(59)).await;
        assert!(registry.contains(1).await);

        tokio::time::sleep(Duration::from_secs(2)).await;
        assert!(!registry.contains(1).await);
        assert!(registry.is_empty().await);
    }

    #[tokio::test(start_paused = true)]
    async fn sessions_without_a_timeout_stay_live() {
        let registry = registry();
        registry.insert(2, session(None), None).await;

        tokio::time::sleep(Duration::from_secs(86_400)).await;
        registry.rearm(2).await;
        tokio::time::sleep(Duration::from_secs(86_400)).await;
        assert!(registry.contains(2).await);
        assert!(registry.stop(2).await.unwrap());
    }

    #[tokio::test(start_paused = true)]
    async fn rearming_pushes_the_timeout_back() {
        let registry = registry();
        registry.insert(7, session(Some(60)), None).await;

        tokio::time::sleep(Duration::from_secs(45)).await;
        registry.rearm(7).await;

        tokio::time::sleep(Duration::from_secs(45)).await;
        assert!(registry.contains(7).await);

        tokio::time::sleep(Duration::from_secs(20)).await;
        assert!(!registry.contains(7).await);
    }

    #[tokio::test(start_paused = true)]
    async fn stop_removes_the_session_once() {
        let registry = registry();
        registry.insert(3, session(Some(60)), None).await;
        registry.insert(4, session(Some(60)), None).await;
        assert_eq!(registry.len().await, 2);

        assert!(registry.stop(3).await.unwrap());
        assert!(!registry.stop(3).await.unwrap());
        assert_eq!(registry.len().await, 1);
        assert!(registry.contains(4).await);
    }

    #[tokio::test(start_paused = true)]
    async fn events_waiting_on_a_stopped_session_are_refused() {
        let registry = registry();
        registry.insert(5, session(Some(60)), None).await;
        let waiting = shared(&registry, 5).await;

        assert!(registry.stop(5).await.unwrap());

        let mut slot = waiting.lock().await;
        let event = ControlEvent::Press(ControlAction::Next);
        assert_eq!(slot.handle(5, Some(1), event), None);
    }

    #[tokio::test(start_paused = true)]
    async fn events_waiting_on_a_timed_out_session_are_refused() {
        let registry = registry();
        registry.insert(6, session(Some(60)), None).await;
        let waiting = shared(&registry, 6).await;

        tokio::time::sleep(Duration::from_secs(61)).await;
        assert!(!registry.contains(6).await);

        let mut slot = waiting.lock().await;
        assert!(slot.closed);
        let event = ControlEvent::Press(ControlAction::Next);
        assert_eq!(slot.handle(6, Some(1), event), None);
        assert_eq!(index(&registry, 6).await, None);
    }

    #[tokio::test(start_paused = true)]
    async fn set_pages_clamps_a_live_session() {
        let registry = registry();
        registry.insert(8, words(3, Some(60)), None).await;
        assert_eq!(index(&registry, 8).await, Some(3));

        assert!(registry.set_pages(8, vec!["uno", "dos"]).await.unwrap());
        assert_eq!(index(&registry, 8).await, Some(1));

        let mut slot = shared(&registry, 8).await.lock_owned().await;
        let event = ControlEvent::Press(ControlAction::First);
        let Some(SessionReply::Update(payload)) = slot.handle(8, Some(1), event) else {
            panic!("expected the first page");
        };
        assert_eq!(payload.content.as_deref(), Some("uno\nPage 1 of 2"));
    }

    #[tokio::test(start_paused = true)]
    async fn set_pages_rejects_empty_and_mistyped_pages() {
        let registry = registry();
        registry.insert(9, session(Some(60)), None).await;

        assert!(registry.set_pages::<&str>(9, Vec::new()).await.is_err());
        assert!(registry.set_pages(9, vec![1_u32, 2]).await.is_err());
        assert_eq!(index(&registry, 9).await, Some(0));

        assert!(registry.stop(9).await.unwrap());
        assert!(!registry.set_pages(9, vec!["gone"]).await.unwrap());
    }

    #[tokio::test]
    async fn ids_are_unique_across_clones() {
        let registry = registry();
        let clone = registry.clone();
        let first = registry.allocate_id();
        let second = clone.allocate_id();
        assert_ne!(first, second);
    }
}
