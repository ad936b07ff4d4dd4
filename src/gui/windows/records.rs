use std::collections::BTreeSet;

use iced::{
    widget::{button, column, container, row, scrollable, text, Column, Row},
    window, Element, Length, Size, Task,
};
use tracing::info;

use crate::{
    args::AppConfig,
    gui::{dialogs, Message},
    tracker::{
        export::{clipboard_text, export_records, ExportOutcome},
        records::SessionRecord,
        Tracker,
    },
    utils::time::format_duration,
};

use super::{show_error, show_info, show_warning, AuxWindow, WINDOW_HEIGHT, WINDOW_WIDTH};

const COLUMNS: [(&str, u16); 5] = [
    ("Project", 2),
    ("Start", 2),
    ("End", 2),
    ("Duration", 2),
    ("Notes", 3),
];

#[derive(Debug, Clone)]
pub enum RecordsMessage {
    ToggleSelection(usize),
    DeleteSelected,
    DeleteConfirmed(BTreeSet<usize>, bool),
    Export,
    Exported(Result<ExportOutcome, String>),
    CopyToClipboard,
}

/// Table of finished sessions with export and clipboard actions.
pub struct RecordsWindow {
    id: window::Id,
    selection: BTreeSet<usize>,
    /// Set while the delete confirmation is open. Only one confirmation may be pending, a second
    /// one would hold positions that the first one shifts.
    pending_delete: bool,
}

fn table_row<'a, M: 'a>(cells: [String; 5]) -> Row<'a, M> {
    Row::with_children(
        cells
            .into_iter()
            .zip(COLUMNS)
            .map(|(cell, (_, portion))| -> Element<'a, M> {
                text(cell).width(Length::FillPortion(portion)).into()
            }),
    )
    .spacing(5)
}

fn record_cells(record: &SessionRecord) -> [String; 5] {
    let row = record.row();
    [
        row.project.to_owned(),
        row.start_time,
        row.end_time,
        row.duration,
        record.notes_preview(),
    ]
}

impl AuxWindow for RecordsWindow {
    type Message = RecordsMessage;

    const TITLE: &'static str = "Records";

    fn new(id: window::Id) -> Self {
        Self {
            id,
            selection: BTreeSet::new(),
            pending_delete: false,
        }
    }

    fn id(&self) -> window::Id {
        self.id
    }

    fn size() -> Size {
        Size::new(WINDOW_WIDTH * 2.0, WINDOW_HEIGHT)
    }

    fn view<'a>(&'a self, tracker: &'a Tracker) -> Element<'a, RecordsMessage> {
        let records = tracker.records();

        let header = container(table_row(COLUMNS.map(|(title, _)| title.to_owned()))).padding(5);

        let rows = records
            .iter()
            .enumerate()
            .map(|(index, record)| -> Element<'a, RecordsMessage> {
                button(table_row(record_cells(record)))
                    .width(Length::Fill)
                    .style(if self.selection.contains(&index) {
                        button::primary
                    } else {
                        button::text
                    })
                    .on_press(RecordsMessage::ToggleSelection(index))
                    .into()
            });

        let total = records
            .iter()
            .map(SessionRecord::duration)
            .fold(chrono::Duration::zero(), |acc, v| acc + v);

        let table: Element<'a, RecordsMessage> = if records.is_empty() {
            container(text("No records yet")).center(Length::Fill).into()
        } else {
            scrollable(Column::with_children(rows).spacing(2))
                .height(Length::Fill)
                .into()
        };

        let actions = row![
            button(text("Delete selected"))
                .style(button::danger)
                .on_press_maybe(
                    (!self.pending_delete).then_some(RecordsMessage::DeleteSelected)
                ),
            button(text("Export")).on_press(RecordsMessage::Export),
            button(text("Copy to clipboard"))
                .style(button::secondary)
                .on_press(RecordsMessage::CopyToClipboard),
            text(format!(
                "{} records, {} total",
                records.len(),
                format_duration(total)
            )),
        ]
        .spacing(10)
        .align_y(iced::Alignment::Center);

        column![
            header,
            table,
            actions,
        ]
        .spacing(5)
        .padding(10)
        .into()
    }
}

impl RecordsWindow {
    pub fn update(
        &mut self,
        message: RecordsMessage,
        tracker: &mut Tracker,
        config: &AppConfig,
    ) -> Task<Message> {
        match message {
            RecordsMessage::ToggleSelection(index) => {
                if !self.selection.remove(&index) {
                    self.selection.insert(index);
                }
                Task::none()
            }
            RecordsMessage::DeleteSelected => {
                if self.pending_delete {
                    return Task::none();
                }
                if self.selection.is_empty() {
                    return show_error("Error", "Please select records to delete");
                }
                self.pending_delete = true;
                let selection = self.selection.clone();
                Task::perform(
                    dialogs::confirm(
                        "Delete".to_owned(),
                        "Delete the selected records?".to_owned(),
                    ),
                    move |confirmed| {
                        Message::Records(RecordsMessage::DeleteConfirmed(selection, confirmed))
                    },
                )
            }
            RecordsMessage::DeleteConfirmed(selection, confirmed) => {
                if !self.pending_delete {
                    return Task::none();
                }
                self.pending_delete = false;
                if confirmed {
                    tracker.delete_records(&selection);
                    self.selection.clear();
                }
                Task::none()
            }
            RecordsMessage::Export => {
                let records = tracker.records().as_slice().to_vec();
                let dir = config.export_dir.clone();
                let moment = tracker.now();
                Task::perform(
                    async move {
                        export_records(&records, &dir, moment)
                            .await
                            .map_err(|e| format!("{e:#}"))
                    },
                    |result| Message::Records(RecordsMessage::Exported(result)),
                )
            }
            RecordsMessage::Exported(Ok(ExportOutcome::NothingToExport)) => {
                show_warning("Warning", "There are no records to export!")
            }
            RecordsMessage::Exported(Ok(ExportOutcome::Exported { path, records })) => show_info(
                "Export complete",
                format!("{records} records were saved as {}", path.display()),
            ),
            RecordsMessage::Exported(Err(e)) => show_error("Export failed", e),
            RecordsMessage::CopyToClipboard => {
                let text = clipboard_text(tracker.records().iter());
                info!("Copied {} records to clipboard", tracker.records().len());
                iced::clipboard::write(text)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use iced::window;
    use tempfile::TempDir;

    use crate::{
        args::AppConfig,
        gui::windows::AuxWindow,
        tracker::{projects::ProjectRegistry, Tracker},
        utils::{clock::ticking_clock, logging::TEST_LOGGING},
    };

    use super::{RecordsMessage, RecordsWindow};

    fn tracker_with_notes(notes: &[&str]) -> Tracker {
        let mut tracker = Tracker::new(ProjectRegistry::default(), ticking_clock(5));
        for note in notes {
            tracker.start().unwrap();
            tracker.stop(note.to_string()).unwrap();
        }
        tracker
    }

    fn notes(tracker: &Tracker) -> Vec<&str> {
        tracker.records().iter().map(|v| v.notes.as_str()).collect()
    }

    #[test]
    fn only_one_delete_confirmation_at_a_time() {
        *TEST_LOGGING;
        let dir = TempDir::new().unwrap();
        let config = AppConfig::new(dir.path().to_owned(), dir.path().to_owned());
        let mut tracker = tracker_with_notes(&["a", "b", "c"]);
        let mut window = RecordsWindow::new(window::Id::unique());

        let _ = window.update(RecordsMessage::ToggleSelection(0), &mut tracker, &config);
        let _ = window.update(RecordsMessage::DeleteSelected, &mut tracker, &config);
        assert!(window.pending_delete);
        // Pressing again while the dialog is open does nothing.
        let _ = window.update(RecordsMessage::DeleteSelected, &mut tracker, &config);
        assert!(window.pending_delete);

        let confirmed = RecordsMessage::DeleteConfirmed(BTreeSet::from([0]), true);
        let _ = window.update(confirmed.clone(), &mut tracker, &config);
        assert_eq!(notes(&tracker), vec!["b", "c"]);
        assert!(!window.pending_delete);
        assert!(window.selection.is_empty());

        // A stale answer without an open confirmation is dropped.
        let _ = window.update(confirmed, &mut tracker, &config);
        assert_eq!(notes(&tracker), vec!["b", "c"]);
    }

    #[test]
    fn cancelled_delete_keeps_records() {
        let dir = TempDir::new().unwrap();
        let config = AppConfig::new(dir.path().to_owned(), dir.path().to_owned());
        let mut tracker = tracker_with_notes(&["a", "b"]);
        let mut window = RecordsWindow::new(window::Id::unique());

        let _ = window.update(RecordsMessage::ToggleSelection(1), &mut tracker, &config);
        let _ = window.update(RecordsMessage::DeleteSelected, &mut tracker, &config);
        let _ = window.update(
            RecordsMessage::DeleteConfirmed(BTreeSet::from([1]), false),
            &mut tracker,
            &config,
        );

        assert_eq!(notes(&tracker), vec!["a", "b"]);
        assert!(!window.pending_delete);
        assert_eq!(window.selection, BTreeSet::from([1]));
    }

    #[test]
    fn delete_without_selection_asks_nothing() {
        let dir = TempDir::new().unwrap();
        let config = AppConfig::new(dir.path().to_owned(), dir.path().to_owned());
        let mut tracker = tracker_with_notes(&["a"]);
        let mut window = RecordsWindow::new(window::Id::unique());

        let _ = window.update(RecordsMessage::DeleteSelected, &mut tracker, &config);

        assert!(!window.pending_delete);
        assert_eq!(notes(&tracker), vec!["a"]);
    }
}
