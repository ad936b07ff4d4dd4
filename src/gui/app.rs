use std::{future::Future, time::Duration};

use iced::{
    time,
    widget::{container, text, text_editor},
    window, Element, Subscription, Task,
};
use tracing::{debug, error, info};

use crate::{
    args::AppConfig,
    fs::projects_file::save_projects,
    tracker::{projects::ProjectRegistry, Tracker},
    utils::clock::DefaultClock,
};

use super::{
    dialogs,
    message::{MainMessage, Message},
    windows::{
        main_window::{self, MainWindow},
        open_or_focus,
        records::RecordsWindow,
        settings::SettingsWindow,
        show_error, AuxWindow,
    },
};

const TICK_INTERVAL: Duration = Duration::from_secs(1);

pub struct TrackerApp {
    tracker: Tracker,
    config: AppConfig,
    main: MainWindow,
    settings: Option<SettingsWindow>,
    records: Option<RecordsWindow>,
}

impl TrackerApp {
    pub fn new(
        config: AppConfig,
        projects: ProjectRegistry,
        startup_error: Option<String>,
    ) -> (Self, Task<Message>) {
        let (app, open) = Self::with_tracker(config, Tracker::new(projects, DefaultClock));
        let mut tasks = vec![open];
        if let Some(e) = startup_error {
            tasks.push(show_error("Failed to load projects", e));
        }
        (app, Task::batch(tasks))
    }

    fn with_tracker(config: AppConfig, tracker: Tracker) -> (Self, Task<Message>) {
        let (id, open) = window::open(MainWindow::settings());
        (
            Self {
                tracker,
                config,
                main: MainWindow::new(id),
                settings: None,
                records: None,
            },
            open.map(Message::WindowOpened),
        )
    }

    pub fn title(&self, id: window::Id) -> String {
        if self.settings.as_ref().is_some_and(|v| v.id() == id) {
            SettingsWindow::TITLE.to_owned()
        } else if self.records.as_ref().is_some_and(|v| v.id() == id) {
            RecordsWindow::TITLE.to_owned()
        } else {
            main_window::TITLE.to_owned()
        }
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Main(message) => self.update_main(message),
            Message::Settings(message) => match &mut self.settings {
                Some(settings) => settings.update(message, &mut self.tracker),
                None => Task::none(),
            },
            Message::Records(message) => match &mut self.records {
                Some(records) => records.update(message, &mut self.tracker, &self.config),
                None => Task::none(),
            },
            Message::Tick => {
                self.main.elapsed = self.tracker.elapsed();
                Task::none()
            }
            Message::WindowOpened(id) => {
                debug!("Opened window {id:?}");
                Task::none()
            }
            Message::CloseRequested(id) => self.close_window(id),
            Message::WindowClosed(id) => {
                // Windows closed by the system without a request still free their slot.
                if self.settings.as_ref().is_some_and(|v| v.id() == id) {
                    return self.close_settings();
                }
                if self.records.as_ref().is_some_and(|v| v.id() == id) {
                    self.records = None;
                }
                Task::none()
            }
            Message::ExitConfirmed(true) => {
                info!("Exiting");
                let save = if self.settings.is_some() {
                    self.close_settings()
                } else {
                    Task::none()
                };
                save.chain(iced::exit())
            }
            Message::ExitConfirmed(false) => Task::none(),
            Message::ProjectsSaved(Ok(())) => Task::none(),
            Message::ProjectsSaved(Err(e)) => show_error("Failed to save projects", e),
            Message::DialogClosed => Task::none(),
        }
    }

    fn update_main(&mut self, message: MainMessage) -> Task<Message> {
        match message {
            MainMessage::ProjectSelected(option) => {
                match self.tracker.select_project(option.index) {
                    Ok(()) => Task::none(),
                    Err(e) => show_error("Error", e),
                }
            }
            MainMessage::ToggleTimer => {
                let result = if self.tracker.is_running() {
                    self.tracker.stop(self.main.notes_text()).map(|_| ())
                } else {
                    self.tracker.start().map(|_| {
                        self.main.notes = text_editor::Content::new();
                    })
                };
                self.main.elapsed = self.tracker.elapsed();
                match result {
                    Ok(()) => Task::none(),
                    Err(e) => show_error("Error", e),
                }
            }
            MainMessage::NotesEdited(action) => {
                self.main.notes.perform(action);
                Task::none()
            }
            MainMessage::OpenSettings => {
                if self.tracker.is_running() {
                    return Task::none();
                }
                open_or_focus(&mut self.settings)
            }
            MainMessage::OpenRecords => open_or_focus(&mut self.records),
            MainMessage::ToggleTopmost => {
                self.main.topmost = !self.main.topmost;
                let level = if self.main.topmost {
                    window::Level::AlwaysOnTop
                } else {
                    window::Level::Normal
                };
                window::set_level(self.main.id, level)
            }
        }
    }

    fn close_window(&mut self, id: window::Id) -> Task<Message> {
        if id == self.main.id {
            return Task::perform(
                dialogs::confirm(
                    "Exit".to_owned(),
                    "Are you sure you want to exit? Records that weren't exported will be lost."
                        .to_owned(),
                ),
                Message::ExitConfirmed,
            );
        }
        if self.settings.as_ref().is_some_and(|v| v.id() == id) {
            return self.close_settings().chain(window::close(id));
        }
        if self.records.as_ref().is_some_and(|v| v.id() == id) {
            self.records = None;
        }
        window::close(id)
    }

    /// Frees the settings slot and writes the project list to disk.
    fn close_settings(&mut self) -> Task<Message> {
        self.settings = None;
        Task::perform(self.persist_projects(), Message::ProjectsSaved)
    }

    /// Snapshot of the project list that is written out once the future is polled.
    fn persist_projects(&self) -> impl Future<Output = Result<(), String>> + 'static {
        let path = self.config.projects_file.clone();
        let names = self.tracker.projects().names().to_vec();
        async move {
            save_projects(&path, &names).await.map_err(|e| {
                error!("Failed to save projects into {path:?} {e:?}");
                format!("{e:#}")
            })
        }
    }

    pub fn view(&self, id: window::Id) -> Element<'_, Message> {
        if id == self.main.id {
            return self.main.view(&self.tracker).map(Message::Main);
        }
        if let Some(settings) = self.settings.as_ref().filter(|v| v.id() == id) {
            return settings.view(&self.tracker).map(Message::Settings);
        }
        if let Some(records) = self.records.as_ref().filter(|v| v.id() == id) {
            return records.view(&self.tracker).map(Message::Records);
        }
        container(text("")).into()
    }

    /// The tick only exists while the timer runs, so it stops together with the timer.
    pub fn subscription(&self) -> Subscription<Message> {
        let mut subscriptions = vec![
            window::close_requests().map(Message::CloseRequested),
            window::close_events().map(Message::WindowClosed),
        ];
        if self.tracker.is_running() {
            subscriptions.push(time::every(TICK_INTERVAL).map(|_| Message::Tick));
        }
        Subscription::batch(subscriptions)
    }
}
