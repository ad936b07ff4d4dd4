use iced::{widget::text_editor, window};

use crate::tracker::projects::ProjectOption;

use super::windows::{records::RecordsMessage, settings::SettingsMessage};

#[derive(Debug, Clone)]
pub enum Message {
    Main(MainMessage),
    Settings(SettingsMessage),
    Records(RecordsMessage),
    Tick,
    WindowOpened(window::Id),
    CloseRequested(window::Id),
    WindowClosed(window::Id),
    ExitConfirmed(bool),
    ProjectsSaved(Result<(), String>),
    DialogClosed,
}

#[derive(Debug, Clone)]
pub enum MainMessage {
    ProjectSelected(ProjectOption),
    ToggleTimer,
    NotesEdited(text_editor::Action),
    OpenSettings,
    OpenRecords,
    ToggleTopmost,
}
