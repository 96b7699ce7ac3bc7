//! Discord paginators on top of twilight.
//!
//! Build a [`Session`] from a [`pagekit_core::Paginator`], hand it to a
//! [`SessionRegistry`], and forward every `InteractionCreate` to
//! [`SessionRegistry::handle_interaction`].

/// Who may press a session's controls.
pub mod access;
/// Page content shapes and the default renderer.
pub mod content;
/// Buttons, select menus and the jump modal.
pub mod controls;
/// Embed helpers shared by renderers.
pub mod embed;
/// Interaction decoding.
pub mod interaction;
/// Live sessions and timeouts.
pub mod registry;
/// Interaction response helpers.
pub mod respond;
/// Pure session state machine.
pub mod session;
/// Custom-id encoding.
pub mod token;

pub use access::AccessPolicy;
pub use content::{ContentRenderer, MessagePayload, PageContent, ToPageContent};
pub use controls::{ButtonControls, ButtonSelectControls, Controls, SelectControls};
pub use embed::build_page_embed;
pub use interaction::{ControlEvent, PaginatorInteraction};
pub use registry::SessionRegistry;
pub use session::{Session, SessionReply};
pub use token::{SessionId, is_paginator_custom_id};
