//! Custom-id encoding for paginator controls and the jump modal.

const TOKEN_PREFIX: &str = "pg";
const MODAL_TOKEN_PREFIX: &str = "pgm";

/// Registry-assigned identifier of a live paginator session.
pub type SessionId = u64;

/// What a paginator control asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlAction {
    First,
    Prev,
    /// The page indicator; opens the jump modal.
    Jump,
    Next,
    Last,
    Stop,
    Select,
    GroupPrev,
    GroupNext,
}

impl ControlAction {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::First => "first",
            Self::Prev => "prev",
            Self::Jump => "jump",
            Self::Next => "next",
            Self::Last => "last",
            Self::Stop => "stop",
            Self::Select => "select",
            Self::GroupPrev => "groupprev",
            Self::GroupNext => "groupnext",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        let action = match raw {
            "first" => Self::First,
            "prev" => Self::Prev,
            "jump" => Self::Jump,
            "next" => Self::Next,
            "last" => Self::Last,
            "stop" => Self::Stop,
            "select" => Self::Select,
            "groupprev" => Self::GroupPrev,
            "groupnext" => Self::GroupNext,
            _ => return None,
        };

        Some(action)
    }
}

/// Parsed control custom id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlToken {
    pub session_id: SessionId,
    pub action: ControlAction,
}

/// Build the custom id carried by a paginator control.
pub fn build_custom_id(session_id: SessionId, action: ControlAction) -> String {
    format!("{TOKEN_PREFIX}:{session_id}:{}", action.as_str())
}

/// Parse a paginator control custom id.
pub fn parse_custom_id(custom_id: &str) -> Option<ControlToken> {
    let mut parts = custom_id.split(':');

    if parts.next()? != TOKEN_PREFIX {
        return None;
    }

    let session_id = parts.next()?.parse::<SessionId>().ok()?;
    let action = ControlAction::parse(parts.next()?)?;

    if parts.next().is_some() {
        return None;
    }

    Some(ControlToken { session_id, action })
}

/// Build the custom id of a session's jump modal.
pub fn build_modal_custom_id(session_id: SessionId) -> String {
    format!("{MODAL_TOKEN_PREFIX}:{session_id}")
}

/// Parse a jump-modal custom id into its session id.
pub fn parse_modal_custom_id(custom_id: &str) -> Option<SessionId> {
    let mut parts = custom_id.split(':');

    if parts.next()? != MODAL_TOKEN_PREFIX {
        return None;
    }

    let session_id = parts.next()?.parse::<SessionId>().ok()?;

    if parts.next().is_some() {
        return None;
    }

    Some(session_id)
}

/// Cheap prefix check used by interaction routers.
pub fn is_paginator_custom_id(custom_id: &str) -> bool {
    custom_id.starts_with("pg:") || custom_id.starts_with("pgm:")
}
