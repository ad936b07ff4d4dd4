use std::collections::BTreeSet;

use iced::{
    widget::{button, column, row, scrollable, text, text_input, Column},
    window, Element, Length, Size, Task,
};

use crate::{gui::Message, tracker::Tracker};

use super::{show_error, AuxWindow, WINDOW_HEIGHT, WINDOW_WIDTH};

#[derive(Debug, Clone)]
pub enum SettingsMessage {
    ToggleSelection(usize),
    Add,
    DeleteSelected,
    StartRename,
    RenameInput(String),
    RenameSubmit,
    RenameCancel,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct RenameDraft {
    index: usize,
    value: String,
}

/// Project list editor. The list is saved to disk when this window closes.
pub struct SettingsWindow {
    id: window::Id,
    selection: BTreeSet<usize>,
    rename: Option<RenameDraft>,
}

impl AuxWindow for SettingsWindow {
    type Message = SettingsMessage;

    const TITLE: &'static str = "Projects";

    fn new(id: window::Id) -> Self {
        Self {
            id,
            selection: BTreeSet::new(),
            rename: None,
        }
    }

    fn id(&self) -> window::Id {
        self.id
    }

    fn size() -> Size {
        Size::new(WINDOW_WIDTH, WINDOW_HEIGHT)
    }

    fn view<'a>(&'a self, tracker: &'a Tracker) -> Element<'a, SettingsMessage> {
        // Everything is read only while a session is running.
        let editable = !tracker.is_running();

        let rows = tracker
            .projects()
            .names()
            .iter()
            .enumerate()
            .map(|(index, name)| -> Element<'a, SettingsMessage> {
                match &self.rename {
                    Some(draft) if draft.index == index => row![
                        text_input("Project name", &draft.value)
                            .on_input(SettingsMessage::RenameInput)
                            .on_submit(SettingsMessage::RenameSubmit),
                        button(text("Save")).on_press(SettingsMessage::RenameSubmit),
                        button(text("Cancel"))
                            .style(button::secondary)
                            .on_press(SettingsMessage::RenameCancel),
                    ]
                    .spacing(5)
                    .into(),
                    _ => button(text(name.as_str()))
                        .width(Length::Fill)
                        .style(if self.selection.contains(&index) {
                            button::primary
                        } else {
                            button::secondary
                        })
                        .on_press_maybe(
                            editable.then_some(SettingsMessage::ToggleSelection(index)),
                        )
                        .into(),
                }
            });

        let actions = row![
            button(text("Add project"))
                .on_press_maybe(editable.then_some(SettingsMessage::Add)),
            button(text("Rename"))
                .on_press_maybe(editable.then_some(SettingsMessage::StartRename)),
            button(text("Delete selected"))
                .style(button::danger)
                .on_press_maybe(editable.then_some(SettingsMessage::DeleteSelected)),
        ]
        .spacing(10);

        column![
            scrollable(Column::with_children(rows).spacing(2)).height(Length::Fill),
            actions,
        ]
        .spacing(10)
        .padding(10)
        .into()
    }
}

impl SettingsWindow {
    pub fn update(&mut self, message: SettingsMessage, tracker: &mut Tracker) -> Task<Message> {
        match message {
            SettingsMessage::ToggleSelection(index) => {
                if !self.selection.remove(&index) {
                    self.selection.insert(index);
                }
                Task::none()
            }
            SettingsMessage::Add => match tracker.add_project() {
                Ok(_) => Task::none(),
                Err(e) => show_error("Error", e),
            },
            SettingsMessage::StartRename => {
                let Some(&index) = self.selection.first() else {
                    return show_error("Error", "Please select a project to rename");
                };
                let Some(name) = tracker.projects().names().get(index) else {
                    self.selection.clear();
                    return Task::none();
                };
                self.rename = Some(RenameDraft {
                    index,
                    value: name.clone(),
                });
                Task::none()
            }
            SettingsMessage::RenameInput(value) => {
                if let Some(draft) = &mut self.rename {
                    draft.value = value;
                }
                Task::none()
            }
            SettingsMessage::RenameSubmit => {
                let Some(draft) = self.rename.take() else {
                    return Task::none();
                };
                match tracker.rename_project(draft.index, &draft.value) {
                    Ok(()) => {
                        self.selection.clear();
                        Task::none()
                    }
                    Err(e) => {
                        self.rename = Some(draft);
                        show_error("Error", e)
                    }
                }
            }
            SettingsMessage::RenameCancel => {
                self.rename = None;
                Task::none()
            }
            SettingsMessage::DeleteSelected => {
                if self.selection.is_empty() {
                    return show_error("Error", "Please select a project to delete");
                }
                let result = tracker.delete_projects(&self.selection);
                self.selection.clear();
                self.rename = None;
                match result {
                    Ok(_) => Task::none(),
                    Err(e) => show_error("Error", e),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use iced::window;

    use crate::{
        gui::windows::AuxWindow,
        tracker::{projects::ProjectRegistry, Tracker},
        utils::{clock::MockClock, logging::TEST_LOGGING},
    };

    use super::{RenameDraft, SettingsMessage, SettingsWindow};

    fn tracker(names: &[&str]) -> Tracker {
        Tracker::new(
            ProjectRegistry::new(names.iter().map(|v| v.to_string())),
            MockClock::new(),
        )
    }

    #[test]
    fn failed_rename_keeps_draft() {
        *TEST_LOGGING;
        let mut tracker = tracker(&["Alpha", "Beta"]);
        let mut window = SettingsWindow::new(window::Id::unique());

        let _ = window.update(SettingsMessage::ToggleSelection(1), &mut tracker);
        let _ = window.update(SettingsMessage::StartRename, &mut tracker);
        let _ = window.update(SettingsMessage::RenameInput("   ".into()), &mut tracker);
        let _ = window.update(SettingsMessage::RenameSubmit, &mut tracker);

        assert_eq!(
            window.rename,
            Some(RenameDraft {
                index: 1,
                value: "   ".into()
            })
        );
        assert_eq!(tracker.projects().names(), ["Alpha", "Beta"]);
    }

    #[test]
    fn submitted_rename_updates_list() {
        let mut tracker = tracker(&["Alpha", "Beta"]);
        let mut window = SettingsWindow::new(window::Id::unique());

        let _ = window.update(SettingsMessage::ToggleSelection(1), &mut tracker);
        let _ = window.update(SettingsMessage::StartRename, &mut tracker);
        let _ = window.update(SettingsMessage::RenameInput("Writing".into()), &mut tracker);
        let _ = window.update(SettingsMessage::RenameSubmit, &mut tracker);

        assert_eq!(window.rename, None);
        assert!(window.selection.is_empty());
        assert_eq!(tracker.projects().names(), ["Alpha", "Writing"]);
    }

    #[test]
    fn delete_without_selection_keeps_list() {
        let mut tracker = tracker(&["Alpha", "Beta"]);
        let mut window = SettingsWindow::new(window::Id::unique());

        let _ = window.update(SettingsMessage::DeleteSelected, &mut tracker);

        assert_eq!(tracker.projects().names(), ["Alpha", "Beta"]);
    }

    #[test]
    fn delete_selected_removes_projects() {
        let mut tracker = tracker(&["Alpha", "Beta", "Gamma"]);
        let mut window = SettingsWindow::new(window::Id::unique());

        let _ = window.update(SettingsMessage::ToggleSelection(0), &mut tracker);
        let _ = window.update(SettingsMessage::ToggleSelection(2), &mut tracker);
        let _ = window.update(SettingsMessage::DeleteSelected, &mut tracker);

        assert_eq!(tracker.projects().names(), ["Beta"]);
        assert!(window.selection.is_empty());
    }
}
