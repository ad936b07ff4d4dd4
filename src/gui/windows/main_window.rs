use chrono::Duration;
use iced::{
    widget::{button, column, container, pick_list, row, text, text_editor},
    window, Alignment, Element, Font, Length, Size,
};

use crate::{
    gui::message::MainMessage,
    tracker::Tracker,
    utils::time::format_duration,
};

use super::{WINDOW_HEIGHT, WINDOW_WIDTH};

pub const TITLE: &str = "Worktally";

/// State of the stopwatch window that doesn't belong to the tracker itself.
pub struct MainWindow {
    pub id: window::Id,
    pub notes: text_editor::Content,
    /// Value shown on the stopwatch. Refreshed from the tracker on every tick.
    pub elapsed: Duration,
    pub topmost: bool,
}

impl MainWindow {
    pub fn settings() -> window::Settings {
        window::Settings {
            size: Size::new(WINDOW_WIDTH, WINDOW_HEIGHT),
            min_size: Some(Size::new(WINDOW_WIDTH, WINDOW_HEIGHT)),
            exit_on_close_request: false,
            ..Default::default()
        }
    }

    pub fn new(id: window::Id) -> Self {
        Self {
            id,
            notes: text_editor::Content::new(),
            elapsed: Duration::zero(),
            topmost: false,
        }
    }

    /// Text of the notes editor without the trailing line break the editor keeps.
    pub fn notes_text(&self) -> String {
        self.notes.text().trim_end_matches(['\n', '\r']).to_owned()
    }

    pub fn view<'a>(&'a self, tracker: &'a Tracker) -> Element<'a, MainMessage> {
        let running = tracker.is_running();
        let projects = tracker.projects();

        // Switching projects mid-session isn't allowed, so the selector is replaced by a label.
        let selector: Element<'a, MainMessage> = if running {
            container(text(projects.selected()))
                .padding(5)
                .into()
        } else {
            pick_list(
                projects.options(),
                Some(projects.selected_option()),
                MainMessage::ProjectSelected,
            )
            .into()
        };

        let pin = button(text("Pin"))
            .style(if self.topmost {
                button::primary
            } else {
                button::secondary
            })
            .on_press(MainMessage::ToggleTopmost);

        let controls = row![
            button(text("Settings"))
                .style(button::secondary)
                .on_press_maybe((!running).then_some(MainMessage::OpenSettings)),
            button(text("Records"))
                .style(button::secondary)
                .on_press(MainMessage::OpenRecords),
            pin,
        ]
        .spacing(10);

        let toggle = button(text(if running { "Pause" } else { "Start" }))
            .style(if running {
                button::danger
            } else {
                button::primary
            })
            .on_press(MainMessage::ToggleTimer);

        let content = column![
            selector,
            controls,
            toggle,
            text(format_duration(self.elapsed))
                .size(32)
                .font(Font::MONOSPACE),
            text("Notes"),
            text_editor(&self.notes)
                .on_action(MainMessage::NotesEdited)
                .height(Length::Fixed(80.0)),
        ]
        .spacing(10)
        .padding(10)
        .align_x(Alignment::Center);

        container(content)
            .center_x(Length::Fill)
            .into()
    }
}
