//! Classification of incoming interactions addressed to paginator sessions.

use twilight_model::application::interaction::{
    Interaction, InteractionData,
    modal::{ModalInteractionComponent, ModalInteractionData},
};

use crate::{
    controls::modal::JUMP_INPUT_ID,
    token::{ControlAction, SessionId, parse_custom_id, parse_modal_custom_id},
};

/// What the user did to a paginator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControlEvent {
    /// A button press.
    Press(ControlAction),
    /// A select menu choice; the raw option value.
    Select(String),
    /// The jump modal was submitted with this raw text.
    JumpSubmit(String),
}

/// Outcome of inspecting an interaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaginatorInteraction {
    /// Not a paginator control; other handlers should look at it.
    NotForPaginator,
    /// Carries a paginator prefix but cannot be decoded.
    Invalid,
    Valid {
        session_id: SessionId,
        actor_user_id: Option<u64>,
        event: ControlEvent,
    },
}

/// Decode a gateway interaction into a paginator event.
pub fn classify(interaction: &Interaction) -> PaginatorInteraction {
    let actor_user_id = interaction.author_id().map(|id| id.get());

    let decoded = match interaction.data.as_ref() {
        Some(InteractionData::MessageComponent(data)) => {
            decode_component(&data.custom_id, &data.values)
        }
        Some(InteractionData::ModalSubmit(data)) => {
            decode_modal(&data.custom_id, jump_input_value(data))
        }
        _ => return PaginatorInteraction::NotForPaginator,
    };

    match decoded {
        Decoded::Foreign => PaginatorInteraction::NotForPaginator,
        Decoded::Malformed => PaginatorInteraction::Invalid,
        Decoded::Event(session_id, event) => PaginatorInteraction::Valid {
            session_id,
            actor_user_id,
            event,
        },
    }
}

#[derive(Debug, PartialEq, Eq)]
enum Decoded {
    Foreign,
    Malformed,
    Event(SessionId, ControlEvent),
}

fn decode_component(custom_id: &str, values: &[String]) -> Decoded {
    if !custom_id.starts_with("pg:") {
        return Decoded::Foreign;
    }

    let Some(token) = parse_custom_id(custom_id) else {
        return Decoded::Malformed;
    };

    let event = match token.action {
        ControlAction::Select => match values.first() {
            Some(value) => ControlEvent::Select(value.clone()),
            None => return Decoded::Malformed,
        },
        action => ControlEvent::Press(action),
    };

    Decoded::Event(token.session_id, event)
}

fn decode_modal(custom_id: &str, page: Option<&str>) -> Decoded {
    if !custom_id.starts_with("pgm:") {
        return Decoded::Foreign;
    }

    match parse_modal_custom_id(custom_id) {
        Some(session_id) => Decoded::Event(
            session_id,
            ControlEvent::JumpSubmit(page.unwrap_or_default().to_owned()),
        ),
        None => Decoded::Malformed,
    }
}

/// Find the jump modal's text input, looking inside action rows.
fn jump_input_value(data: &ModalInteractionData) -> Option<&str> {
    for component in &data.components {
        if let ModalInteractionComponent::ActionRow(row) = component {
            for nested in &row.components {
                if let ModalInteractionComponent::TextInput(text_input) = nested
                    && text_input.custom_id == JUMP_INPUT_ID
                {
                    return Some(text_input.value.as_str());
                }
            }
        }
    }

    None
}
