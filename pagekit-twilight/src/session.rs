//! A paginator coupled to its renderer, controls and access policy.
//!
//! [`Session::handle`] performs no I/O: it turns one control event into a
//! [`SessionReply`] that the registry carries out.

use std::{any::Any, sync::Arc};

use pagekit_core::{
    AfterAction, JumpTarget, Navigation, PageChange, PageRenderer, Paginator, PaginatorOptions,
};
use twilight_model::{
    channel::message::component::Component, http::interaction::InteractionResponseData,
};

use crate::{
    access::AccessPolicy,
    content::{ContentRenderer, MessagePayload, ToPageContent},
    controls::{
        ButtonControls, ControlIntent, ControlState, Controls,
        modal::{jump_modal, parse_jump_value},
    },
    interaction::ControlEvent,
    respond::{PAGINATION_INVALID_MESSAGE, PAGINATION_WRONG_USER_MESSAGE},
    token::{ControlAction, SessionId},
};

type BoxedRenderer<P> = Box<dyn PageRenderer<P, Output = MessagePayload> + Send + Sync>;
type PageHook = Box<dyn Fn(PageChange, u64) + Send + Sync>;

/// What the registry should do in answer to one control event.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionReply {
    /// Edit the message to show a new page.
    Update(MessagePayload),
    /// Acknowledge without changes (the page did not move).
    Defer,
    OpenModal(InteractionResponseData),
    /// Tell only the actor; the session is untouched.
    Ephemeral(String),
    /// End the session and apply this action to the message.
    Stop(AfterAction),
}

pub struct Session<P> {
    paginator: Paginator<P>,
    renderer: BoxedRenderer<P>,
    controls: Arc<dyn Controls>,
    access: AccessPolicy,
    options: PaginatorOptions,
    on_page: Option<PageHook>,
}

impl<P: ToPageContent> Session<P> {
    /// Session over displayable pages, rendered with [`ContentRenderer`]
    /// and driven by default buttons.
    pub fn from_content(paginator: Paginator<P>, options: PaginatorOptions) -> Self {
        let renderer = ContentRenderer::from_options(&options);
        Self::new(paginator, renderer, options)
    }
}

impl<P> Session<P> {
    pub fn new(
        paginator: Paginator<P>,
        renderer: impl PageRenderer<P, Output = MessagePayload> + Send + Sync + 'static,
        options: PaginatorOptions,
    ) -> Self {
        Self {
            paginator,
            renderer: Box::new(renderer),
            controls: Arc::new(ButtonControls::default()),
            access: AccessPolicy::public(),
            options,
            on_page: None,
        }
    }

    pub fn with_controls(mut self, controls: impl Controls + 'static) -> Self {
        self.controls = Arc::new(controls);
        self
    }

    pub fn with_access(mut self, access: AccessPolicy) -> Self {
        self.access = access;
        self
    }

    /// Called with the index change and the acting user whenever an
    /// interaction moves the session to another page.
    pub fn on_page(mut self, hook: impl Fn(PageChange, u64) + Send + Sync + 'static) -> Self {
        self.on_page = Some(Box::new(hook));
        self
    }

    pub fn paginator(&self) -> &Paginator<P> {
        &self.paginator
    }

    /// Mutable access for callers that swap pages mid-session.
    pub fn paginator_mut(&mut self) -> &mut Paginator<P> {
        &mut self.paginator
    }

    pub fn options(&self) -> &PaginatorOptions {
        &self.options
    }

    fn state(&self, session_id: SessionId, disabled: bool) -> ControlState<'_> {
        ControlState {
            session_id,
            position: self.paginator.position(),
            keys: self.paginator.collection().keys(),
            disabled,
        }
    }

    /// The current page with its controls attached.
    pub fn payload(&self, session_id: SessionId) -> MessagePayload {
        let mut payload = self.paginator.render(&*self.renderer);
        payload.components = self.controls.components(&self.state(session_id, false));
        payload
    }

    /// Components to leave on the message after the session ends, or
    /// `None` when the message should not be edited.
    pub fn after_components(
        &self,
        session_id: SessionId,
        action: AfterAction,
    ) -> Option<Vec<Component>> {
        match action {
            AfterAction::DisableItems => {
                Some(self.controls.components(&self.state(session_id, true)))
            }
            AfterAction::ClearItems => Some(Vec::new()),
            AfterAction::DeleteMessage | AfterAction::Nothing => None,
        }
    }

    /// Apply one event from `actor` and describe the response.
    pub fn handle(
        &mut self,
        session_id: SessionId,
        actor: Option<u64>,
        event: ControlEvent,
    ) -> SessionReply {
        let Some(actor) = actor.filter(|actor| self.access.allows(*actor)) else {
            return SessionReply::Ephemeral(PAGINATION_WRONG_USER_MESSAGE.to_owned());
        };

        let position = self.paginator.position();
        let intent = match event {
            ControlEvent::Press(action) => self.controls.intent(action, position),
            ControlEvent::Select(value) if self.controls.handles(ControlAction::Select) => value
                .parse::<usize>()
                .ok()
                .filter(|index| *index < position.total)
                .map(|index| ControlIntent::Navigate(Navigation::Jump(JumpTarget::Index(index)))),
            ControlEvent::JumpSubmit(raw) if self.controls.handles(ControlAction::Jump) => {
                match parse_jump_value(&raw, position.total) {
                    Ok(index) => Some(ControlIntent::Navigate(Navigation::Jump(
                        JumpTarget::Index(index),
                    ))),
                    Err(message) => return SessionReply::Ephemeral(message),
                }
            }
            ControlEvent::Select(_) | ControlEvent::JumpSubmit(_) => None,
        };

        let Some(intent) = intent else {
            return SessionReply::Ephemeral(PAGINATION_INVALID_MESSAGE.to_owned());
        };

        match intent {
            ControlIntent::Navigate(navigation) => match self.paginator.navigate(navigation) {
                Ok(change) if change.moved() => {
                    if let Some(hook) = &self.on_page {
                        hook(change, actor);
                    }
                    SessionReply::Update(self.payload(session_id))
                }
                Ok(_) => SessionReply::Defer,
                Err(_) => SessionReply::Ephemeral(PAGINATION_INVALID_MESSAGE.to_owned()),
            },
            ControlIntent::OpenJumpModal => {
                SessionReply::OpenModal(jump_modal(session_id, position))
            }
            ControlIntent::Stop => SessionReply::Stop(self.options.after_stop),
        }
    }
}

/// Type-erased session so the registry can hold any page type.
pub(crate) trait ErasedSession: Send {
    fn payload(&self, session_id: SessionId) -> MessagePayload;

    fn handle(
        &mut self,
        session_id: SessionId,
        actor: Option<u64>,
        event: ControlEvent,
    ) -> SessionReply;

    fn after_components(&self, session_id: SessionId, action: AfterAction)
    -> Option<Vec<Component>>;

    fn options(&self) -> &PaginatorOptions;

    /// Lets the registry recover the concrete `Session<P>`.
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<P: Send + 'static> ErasedSession for Session<P> {
    fn payload(&self, session_id: SessionId) -> MessagePayload {
        Session::payload(self, session_id)
    }

    fn handle(
        &mut self,
        session_id: SessionId,
        actor: Option<u64>,
        event: ControlEvent,
    ) -> SessionReply {
        Session::handle(self, session_id, actor, event)
    }

    fn after_components(
        &self,
        session_id: SessionId,
        action: AfterAction,
    ) -> Option<Vec<Component>> {
        Session::after_components(self, session_id, action)
    }

    fn options(&self) -> &PaginatorOptions {
        Session::options(self)
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
