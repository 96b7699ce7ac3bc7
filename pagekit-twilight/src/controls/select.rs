//! Select-menu paginator controls with grouped options.

use pagekit_core::{JumpTarget, Navigation, Position};
use twilight_model::channel::message::component::{
    Button, ButtonStyle, Component, SelectMenu, SelectMenuOption, SelectMenuType,
};

use super::{ControlIntent, ControlState, Controls, into_rows};
use crate::token::{ControlAction, build_custom_id};

/// Discord's cap on options in one select menu.
pub const MAX_SELECT_OPTIONS: usize = 25;
/// Discord's cap on select option labels.
const MAX_OPTION_LABEL: usize = 100;

/// One select menu listing the pages of the current group.
///
/// Pages beyond [`MAX_SELECT_OPTIONS`] are split into groups; a row of
/// group buttons moves between them by jumping to the group's first page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectControls {
    placeholder: String,
    per_select: usize,
}

impl Default for SelectControls {
    fn default() -> Self {
        Self {
            placeholder: "Select a page".to_owned(),
            per_select: MAX_SELECT_OPTIONS,
        }
    }
}

impl SelectControls {
    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    /// Options per menu, clamped to `1..=25`.
    pub fn per_select(mut self, per_select: usize) -> Self {
        self.per_select = per_select.clamp(1, MAX_SELECT_OPTIONS);
        self
    }

    fn group_of(&self, index: usize) -> usize {
        index / self.per_select
    }

    fn group_count(&self, total: usize) -> usize {
        total.div_ceil(self.per_select)
    }

    fn options(&self, state: &ControlState<'_>) -> Vec<SelectMenuOption> {
        let position = state.position;
        let start = self.group_of(position.index) * self.per_select;
        let end = (start + self.per_select).min(position.total);

        (start..end)
            .map(|index| {
                let label = state
                    .keys
                    .and_then(|keys| keys.get(index))
                    .cloned()
                    .unwrap_or_else(|| format!("Page {}", index + 1));

                SelectMenuOption {
                    default: index == position.index,
                    description: Some(format!("{} of {}", index + 1, position.total)),
                    emoji: None,
                    label: truncate(&label, MAX_OPTION_LABEL),
                    value: index.to_string(),
                }
            })
            .collect()
    }

    fn group_button(&self, state: &ControlState<'_>, action: ControlAction) -> Component {
        let position = state.position;
        let group = self.group_of(position.index);
        let (label, at_edge) = match action {
            ControlAction::GroupPrev => ("◀ Previous pages", group == 0),
            _ => (
                "Next pages ▶",
                group + 1 >= self.group_count(position.total),
            ),
        };

        Component::Button(Button {
            id: None,
            custom_id: Some(build_custom_id(state.session_id, action)),
            disabled: at_edge || state.disabled,
            emoji: None,
            label: Some(label.to_owned()),
            style: ButtonStyle::Secondary,
            url: None,
            sku_id: None,
        })
    }
}

impl Controls for SelectControls {
    fn components(&self, state: &ControlState<'_>) -> Vec<Component> {
        let position = state.position;
        if position.total <= 1 {
            return Vec::new();
        }

        let menu = Component::SelectMenu(SelectMenu {
            id: None,
            channel_types: None,
            custom_id: build_custom_id(state.session_id, ControlAction::Select),
            default_values: None,
            disabled: state.disabled,
            kind: SelectMenuType::Text,
            max_values: Some(1),
            min_values: Some(1),
            options: Some(self.options(state)),
            placeholder: Some(format!("{} | {}", self.placeholder, position.page_string())),
            required: None,
        });

        let mut rows = into_rows(vec![menu]);
        if self.group_count(position.total) > 1 {
            rows.extend(into_rows(vec![
                self.group_button(state, ControlAction::GroupPrev),
                self.group_button(state, ControlAction::GroupNext),
            ]));
        }

        rows
    }

    fn handles(&self, action: ControlAction) -> bool {
        matches!(
            action,
            ControlAction::Select | ControlAction::GroupPrev | ControlAction::GroupNext
        )
    }

    fn intent(&self, action: ControlAction, position: Position) -> Option<ControlIntent> {
        let group = self.group_of(position.index);
        let target = match action {
            ControlAction::GroupPrev => group.checked_sub(1)?,
            ControlAction::GroupNext if group + 1 < self.group_count(position.total) => group + 1,
            _ => return None,
        };

        Some(ControlIntent::Navigate(Navigation::Jump(JumpTarget::Index(
            target * self.per_select,
        ))))
    }
}

fn truncate(label: &str, max: usize) -> String {
    label.chars().take(max).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controls::row_children;

    fn state(index: usize, total: usize, keys: Option<&[String]>) -> ControlState<'_> {
        ControlState {
            session_id: 3,
            position: Position { index, total },
            keys,
            disabled: false,
        }
    }

    fn menu(rows: &[Component]) -> &SelectMenu {
        row_children(rows)
            .find_map(|component| match component {
                Component::SelectMenu(menu) => Some(menu),
                _ => None,
            })
            .unwrap()
    }

    #[test]
    fn small_paginators_get_one_menu_without_group_row() {
        let rows = SelectControls::default().components(&state(1, 3, None));
        assert_eq!(rows.len(), 1);

        let options = menu(&rows).options.as_ref().unwrap();
        let labels: Vec<_> = options.iter().map(|o| o.label.as_str()).collect();
        assert_eq!(labels, ["Page 1", "Page 2", "Page 3"]);
        assert!(options[1].default);
        assert_eq!(options[2].value, "2");
        assert_eq!(options[2].description.as_deref(), Some("3 of 3"));
        assert_eq!(
            menu(&rows).placeholder.as_deref(),
            Some("Select a page | Page 2 of 3")
        );
    }

    #[test]
    fn keyed_pages_label_options_with_their_keys() {
        let keys = vec!["intro".to_owned(), "usage".to_owned()];
        let rows = SelectControls::default().components(&state(0, 2, Some(keys.as_slice())));
        let options = menu(&rows).options.as_ref().unwrap();
        assert_eq!(options[1].label, "usage");
    }

    #[test]
    fn long_labels_are_truncated() {
        let keys = vec!["x".repeat(150), "y".to_owned()];
        let rows = SelectControls::default().components(&state(0, 2, Some(keys.as_slice())));
        let options = menu(&rows).options.as_ref().unwrap();
        assert_eq!(options[0].label.chars().count(), MAX_OPTION_LABEL);
    }

    #[test]
    fn large_paginators_show_the_current_group_only() {
        let rows = SelectControls::default().components(&state(30, 60, None));
        assert_eq!(rows.len(), 2);

        let options = menu(&rows).options.as_ref().unwrap();
        assert_eq!(options.len(), MAX_SELECT_OPTIONS);
        assert_eq!(options[0].value, "25");
        assert!(options[5].default);

        let last_group = SelectControls::default().components(&state(55, 60, None));
        assert_eq!(menu(&last_group).options.as_ref().unwrap().len(), 10);
    }

    #[test]
    fn group_buttons_jump_to_adjacent_group_starts() {
        let controls = SelectControls::default();
        let middle = Position { index: 30, total: 60 };
        assert_eq!(
            controls.intent(ControlAction::GroupNext, middle),
            Some(ControlIntent::Navigate(Navigation::Jump(JumpTarget::Index(50))))
        );
        assert_eq!(
            controls.intent(ControlAction::GroupPrev, Position { index: 3, total: 60 }),
            None
        );
        assert_eq!(
            controls.intent(ControlAction::GroupNext, Position { index: 55, total: 60 }),
            None
        );
        assert_eq!(controls.intent(ControlAction::Select, middle), None);
    }

    #[test]
    fn smaller_groups_follow_per_select() {
        let controls = SelectControls::default().per_select(5);
        let rows = controls.components(&state(7, 12, None));
        let options = menu(&rows).options.as_ref().unwrap();
        assert_eq!(options.len(), 5);
        assert_eq!(options[0].value, "5");
        assert_eq!(
            controls.intent(ControlAction::GroupPrev, Position { index: 7, total: 12 }),
            Some(ControlIntent::Navigate(Navigation::Jump(JumpTarget::Index(0))))
        );
    }

    #[test]
    fn only_group_and_select_actions_are_owned() {
        let controls = SelectControls::default();
        assert!(controls.handles(ControlAction::Select));
        assert!(controls.handles(ControlAction::GroupPrev));
        assert!(!controls.handles(ControlAction::Next));
        assert!(SelectControls::default().components(&state(0, 1, None)).is_empty());
    }
}
