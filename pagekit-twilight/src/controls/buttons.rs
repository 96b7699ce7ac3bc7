//! Button row paginator controls (first/prev/indicator/next/last/stop).

use twilight_model::channel::message::{
    EmojiReactionType,
    component::{Button, ButtonStyle, Component},
};

use super::{ControlState, Controls, into_rows};
use crate::token::{ControlAction, build_custom_id};

/// The fixed slots of a button paginator, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ButtonKey {
    First,
    Previous,
    PageIndicator,
    Next,
    Last,
    Stop,
}

impl ButtonKey {
    pub const ALL: [ButtonKey; 6] = [
        Self::First,
        Self::Previous,
        Self::PageIndicator,
        Self::Next,
        Self::Last,
        Self::Stop,
    ];

    pub const fn action(self) -> ControlAction {
        match self {
            Self::First => ControlAction::First,
            Self::Previous => ControlAction::Prev,
            Self::PageIndicator => ControlAction::Jump,
            Self::Next => ControlAction::Next,
            Self::Last => ControlAction::Last,
            Self::Stop => ControlAction::Stop,
        }
    }

    fn index(self) -> usize {
        match self {
            Self::First => 0,
            Self::Previous => 1,
            Self::PageIndicator => 2,
            Self::Next => 3,
            Self::Last => 4,
            Self::Stop => 5,
        }
    }
}

/// Look of one paginator button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavButton {
    pub label: Option<String>,
    pub emoji: Option<EmojiReactionType>,
    pub style: ButtonStyle,
}

impl NavButton {
    pub fn labelled(label: impl Into<String>) -> Self {
        Self {
            label: Some(label.into()),
            emoji: None,
            style: ButtonStyle::Secondary,
        }
    }

    pub fn style(mut self, style: ButtonStyle) -> Self {
        self.style = style;
        self
    }
}

/// Button-based controls.
///
/// Slots can be restyled or removed. FIRST and LAST are left out when
/// there are two pages or fewer, and the indicator is disabled then since
/// PREV/NEXT already reach every page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ButtonControls {
    buttons: [Option<NavButton>; 6],
    clickable_style: Option<ButtonStyle>,
    always_show_stop: bool,
}

impl Default for ButtonControls {
    fn default() -> Self {
        Self {
            buttons: [
                Some(NavButton::labelled("«")),
                Some(NavButton::labelled("◀ Prev")),
                Some(NavButton::labelled("Page")),
                Some(NavButton::labelled("Next ▶")),
                Some(NavButton::labelled("»")),
                Some(NavButton::labelled("Stop").style(ButtonStyle::Danger)),
            ],
            clickable_style: Some(ButtonStyle::Success),
            always_show_stop: false,
        }
    }
}

impl ButtonControls {
    /// Replace the look of one slot.
    pub fn with_button(mut self, key: ButtonKey, button: NavButton) -> Self {
        self.buttons[key.index()] = Some(button);
        self
    }

    /// Remove one slot entirely.
    pub fn without(mut self, key: ButtonKey) -> Self {
        self.buttons[key.index()] = None;
        self
    }

    /// Style applied to enabled navigation buttons; `None` keeps each
    /// button's own style.
    pub fn clickable_style(mut self, style: Option<ButtonStyle>) -> Self {
        self.clickable_style = style;
        self
    }

    /// Show the STOP button even on single-page paginators.
    pub fn always_show_stop(mut self, always: bool) -> Self {
        self.always_show_stop = always;
        self
    }

    pub fn button(&self, key: ButtonKey) -> Option<&NavButton> {
        self.buttons[key.index()].as_ref()
    }

    fn build(&self, key: ButtonKey, state: &ControlState<'_>) -> Option<Component> {
        let nav = self.button(key)?;
        let position = state.position;
        let total = position.total;

        let (label, disabled) = match key {
            ButtonKey::First | ButtonKey::Last if total <= 2 => return None,
            ButtonKey::First => (
                Some(format!("1 {}", nav.label.as_deref().unwrap_or_default())),
                position.index == 0,
            ),
            ButtonKey::Previous => (nav.label.clone(), position.index == 0),
            ButtonKey::PageIndicator => (Some(position.page_string()), total <= 2),
            ButtonKey::Next => (nav.label.clone(), position.index + 1 >= total),
            ButtonKey::Last => (
                Some(format!("{} {total}", nav.label.as_deref().unwrap_or_default())),
                position.index + 1 >= total,
            ),
            ButtonKey::Stop => (nav.label.clone(), false),
        };

        let disabled = disabled || state.disabled;
        let style = match (self.clickable_style, key) {
            (_, ButtonKey::Stop | ButtonKey::PageIndicator) => nav.style,
            (Some(clickable), _) if !disabled => clickable,
            _ => nav.style,
        };

        Some(Component::Button(Button {
            id: None,
            custom_id: Some(build_custom_id(state.session_id, key.action())),
            disabled,
            emoji: nav.emoji.clone(),
            label: label.map(|label| label.trim().to_owned()),
            style,
            url: None,
            sku_id: None,
        }))
    }
}

impl Controls for ButtonControls {
    fn components(&self, state: &ControlState<'_>) -> Vec<Component> {
        if state.position.total <= 1 {
            if !self.always_show_stop {
                return Vec::new();
            }

            return into_rows(self.build(ButtonKey::Stop, state).into_iter().collect());
        }

        let buttons = ButtonKey::ALL
            .into_iter()
            .filter_map(|key| self.build(key, state))
            .collect();

        into_rows(buttons)
    }

    fn handles(&self, action: ControlAction) -> bool {
        ButtonKey::ALL
            .into_iter()
            .any(|key| key.action() == action && self.button(key).is_some())
    }
}
