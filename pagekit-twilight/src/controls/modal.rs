//! The jump-to-page modal opened by the page indicator.

use pagekit_core::Position;
use twilight_model::{
    channel::message::component::{ActionRow, Component, TextInput, TextInputStyle},
    http::interaction::InteractionResponseData,
};

use crate::token::{SessionId, build_modal_custom_id};

/// Custom id of the modal's only text input.
pub const JUMP_INPUT_ID: &str = "page";

const JUMP_MODAL_TITLE: &str = "Jump to page";

/// Modal data asking for a page number between 1 and the page total.
#[allow(deprecated)]
pub fn jump_modal(session_id: SessionId, position: Position) -> InteractionResponseData {
    let digits = position.total.to_string().len();

    let page_input = Component::TextInput(TextInput {
        id: None,
        custom_id: JUMP_INPUT_ID.to_owned(),
        label: Some(format!("Page (1-{})", position.total)),
        max_length: Some(u16::try_from(digits).unwrap_or(u16::MAX)),
        min_length: Some(1),
        placeholder: Some(format!("Current: {}", position.number())),
        required: Some(true),
        style: TextInputStyle::Short,
        value: None,
    });

    InteractionResponseData {
        components: Some(vec![Component::ActionRow(ActionRow {
            id: None,
            components: vec![page_input],
        })]),
        custom_id: Some(build_modal_custom_id(session_id)),
        title: Some(JUMP_MODAL_TITLE.to_owned()),
        ..InteractionResponseData::default()
    }
}

/// Turn a submitted page number into a zero-based index.
///
/// The error is the user-facing message to send back.
pub fn parse_jump_value(raw: &str, total: usize) -> Result<usize, String> {
    match raw.trim().parse::<usize>() {
        Ok(page) if (1..=total).contains(&page) => Ok(page - 1),
        _ => Err(format!("Please enter a valid number between 1 and {total}.")),
    }
}
