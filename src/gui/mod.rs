//! Desktop front end. A main window with the stopwatch and two auxiliary windows, one for
//! editing the project list and one for browsing finished sessions.

mod app;
mod dialogs;
mod message;
mod windows;

pub use app::TrackerApp;
pub use message::Message;

use crate::{args::AppConfig, tracker::projects::ProjectRegistry};

/// Runs the event loop until the user exits. `startup_error` is shown in a dialog once the main
/// window is up.
pub fn run(
    config: AppConfig,
    projects: ProjectRegistry,
    startup_error: Option<String>,
) -> iced::Result {
    iced::daemon(
        move || TrackerApp::new(config.clone(), projects.clone(), startup_error.clone()),
        TrackerApp::update,
        TrackerApp::view,
    )
    .title(TrackerApp::title)
    .subscription(TrackerApp::subscription)
    .run()
}
