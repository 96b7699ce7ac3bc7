//! Presentation styles: which components drive a session and what each
//! control press means.

mod buttons;
pub mod modal;
mod select;

pub use buttons::{ButtonControls, ButtonKey, NavButton};
pub use select::{MAX_SELECT_OPTIONS, SelectControls};

use pagekit_core::{Navigation, Position};
use twilight_model::channel::message::component::{ActionRow, Component};

use crate::token::{ControlAction, SessionId};

/// Maximum number of buttons Discord allows in one action row.
const MAX_ROW_BUTTONS: usize = 5;

/// Inputs needed to draw a session's controls.
#[derive(Debug, Clone, Copy)]
pub struct ControlState<'a> {
    pub session_id: SessionId,
    pub position: Position,
    /// Page keys, when the paginator is keyed.
    pub keys: Option<&'a [String]>,
    /// Draw every control disabled (used once a session ends).
    pub disabled: bool,
}

/// What a control press should do to the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControlIntent {
    Navigate(Navigation),
    OpenJumpModal,
    Stop,
}

/// A presentation style for paginator controls.
pub trait Controls: Send + Sync {
    /// Component rows for the current state; empty when nothing is interactive.
    fn components(&self, state: &ControlState<'_>) -> Vec<Component>;

    /// Whether this style ever renders `action`.
    fn handles(&self, action: ControlAction) -> bool;

    /// Map a press to an intent. `None` for actions this style does not own.
    fn intent(&self, action: ControlAction, _position: Position) -> Option<ControlIntent> {
        if !self.handles(action) {
            return None;
        }

        let intent = match action {
            ControlAction::First => ControlIntent::Navigate(Navigation::First),
            ControlAction::Prev => ControlIntent::Navigate(Navigation::Previous),
            ControlAction::Next => ControlIntent::Navigate(Navigation::Next),
            ControlAction::Last => ControlIntent::Navigate(Navigation::Last),
            ControlAction::Jump => ControlIntent::OpenJumpModal,
            ControlAction::Stop => ControlIntent::Stop,
            ControlAction::Select | ControlAction::GroupPrev | ControlAction::GroupNext => {
                return None;
            }
        };

        Some(intent)
    }
}

/// Select menu rows stacked over button rows.
pub struct ButtonSelectControls {
    pub select: SelectControls,
    pub buttons: ButtonControls,
}

impl Controls for ButtonSelectControls {
    fn components(&self, state: &ControlState<'_>) -> Vec<Component> {
        let mut rows = self.select.components(state);
        rows.extend(self.buttons.components(state));
        rows
    }

    fn handles(&self, action: ControlAction) -> bool {
        self.select.handles(action) || self.buttons.handles(action)
    }

    fn intent(&self, action: ControlAction, position: Position) -> Option<ControlIntent> {
        if self.select.handles(action) {
            self.select.intent(action, position)
        } else {
            self.buttons.intent(action, position)
        }
    }
}

/// Pack loose components into action rows of at most five.
pub(crate) fn into_rows(components: Vec<Component>) -> Vec<Component> {
    components
        .chunks(MAX_ROW_BUTTONS)
        .map(|chunk| {
            Component::ActionRow(ActionRow {
                id: None,
                components: chunk.to_vec(),
            })
        })
        .collect()
}

/// Flatten action rows back into their children.
#[cfg(test)]
pub(crate) fn row_children(rows: &[Component]) -> impl Iterator<Item = &Component> {
    rows.iter().flat_map(|row| match row {
        Component::ActionRow(row) => row.components.as_slice(),
        other => std::slice::from_ref(other),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagekit_core::JumpTarget;
    use twilight_model::channel::message::component::{Button, ButtonStyle};

    fn button(n: usize) -> Component {
        Component::Button(Button {
            id: None,
            custom_id: Some(format!("b{n}")),
            disabled: false,
            emoji: None,
            label: Some(n.to_string()),
            style: ButtonStyle::Secondary,
            url: None,
            sku_id: None,
        })
    }

    #[test]
    fn rows_hold_at_most_five_components() {
        let rows = into_rows((0..6).map(button).collect());
        assert_eq!(rows.len(), 2);
        assert_eq!(row_children(&rows).count(), 6);
    }

    #[test]
    fn combined_controls_route_actions_to_their_owner() {
        let controls = ButtonSelectControls {
            select: SelectControls::default(),
            buttons: ButtonControls::default(),
        };
        let position = Position { index: 30, total: 60 };

        assert_eq!(
            controls.intent(ControlAction::GroupPrev, position),
            Some(ControlIntent::Navigate(Navigation::Jump(JumpTarget::Index(0))))
        );
        assert_eq!(
            controls.intent(ControlAction::Next, position),
            Some(ControlIntent::Navigate(Navigation::Next))
        );
        assert!(controls.handles(ControlAction::Select));
        assert!(controls.handles(ControlAction::Stop));
    }
}
