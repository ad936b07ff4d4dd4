pub mod main_window;
pub mod records;
pub mod settings;

use std::fmt::Display;

use iced::{window, Element, Size, Task};
use tracing::{error, warn};

use crate::tracker::Tracker;

use super::{dialogs, Message};

pub const WINDOW_WIDTH: f32 = 400.0;
pub const WINDOW_HEIGHT: f32 = 300.0;

/// Window that is opened on demand from the main window. At most one instance of each kind
/// exists at a time, stored in an [Option] slot of the application.
pub trait AuxWindow: Sized {
    type Message: std::fmt::Debug;

    const TITLE: &'static str;

    fn new(id: window::Id) -> Self;

    fn id(&self) -> window::Id;

    fn size() -> Size;

    fn view<'a>(&'a self, tracker: &'a Tracker) -> Element<'a, Self::Message>;
}

/// Focuses the window if it is already open, otherwise opens a fresh one and stores it in `slot`.
pub fn open_or_focus<W: AuxWindow>(slot: &mut Option<W>) -> Task<Message> {
    match slot {
        Some(opened) => window::gain_focus(opened.id()),
        None => {
            let (id, open) = window::open(window::Settings {
                size: W::size(),
                min_size: Some(Size::new(WINDOW_WIDTH / 2.0, WINDOW_HEIGHT / 2.0)),
                exit_on_close_request: false,
                ..Default::default()
            });
            *slot = Some(W::new(id));
            open.map(Message::WindowOpened)
        }
    }
}

pub fn show_info(title: &str, description: impl Display) -> Task<Message> {
    Task::perform(
        dialogs::info(title.to_owned(), description.to_string()),
        |_| Message::DialogClosed,
    )
}

pub fn show_warning(title: &str, description: impl Display) -> Task<Message> {
    warn!("{title}: {description}");
    Task::perform(
        dialogs::warning(title.to_owned(), description.to_string()),
        |_| Message::DialogClosed,
    )
}

pub fn show_error(title: &str, description: impl Display) -> Task<Message> {
    error!("{title}: {description}");
    Task::perform(
        dialogs::error(title.to_owned(), description.to_string()),
        |_| Message::DialogClosed,
    )
}
