use env_logger::Env;
use iced::keyboard::{self, key::Named};
use iced::widget::{column, container, scrollable, text};
use iced::{Element, Length, Subscription, Task, Theme};
use std::collections::{BTreeSet, HashMap};
use std::path::PathBuf;
use std::time::Duration;

mod assets;
mod config;
mod error;
mod state;
mod ui;

use assets::{dataset, thumbnail};
use config::Settings;
use state::controller::{Catalog, Effect, Event, Key};
use state::data::Record;
use state::store::Store;
use ui::grid::GridView;
use ui::modal::ModalView;

/// Where the application is in its one-shot startup
enum Phase {
    Loading,
    /// The dataset could not be loaded; nothing else happens
    Failed,
    Ready(Catalog),
}

impl Phase {
    /// Outcome of the dataset load. Read, parse and store errors all end in `Failed`.
    fn from_load(result: Result<Vec<Record>, String>, search_delay: Duration) -> Self {
        match result.and_then(|records| Store::new(records).map_err(|e| e.to_string())) {
            Ok(store) => {
                log::info!(
                    "✅ Catalog ready: {} records, {} basins",
                    store.len(),
                    store.basins().len()
                );
                Phase::Ready(Catalog::new(store, search_delay))
            }
            Err(e) => {
                log::error!("Error loading mussel data: {}", e);
                Phase::Failed
            }
        }
    }
}

/// Main application state
struct MusselCatalog {
    settings: Settings,
    phase: Phase,
    /// Image filename -> cached thumbnail path
    thumbnails: HashMap<String, PathBuf>,
}

/// Application messages (events)
#[derive(Debug, Clone)]
enum Message {
    /// Background dataset load finished
    DatasetLoaded(Result<Vec<Record>, String>),
    /// A card thumbnail finished (None if it could not be generated)
    ThumbnailReady(String, Option<PathBuf>),
    /// User interaction forwarded to the catalog controller
    Catalog(Event),
}

impl MusselCatalog {
    /// Create a new instance of the application and start loading the dataset
    fn new(settings: Settings) -> (Self, Task<Message>) {
        let data_file = settings.data_file.clone();
        log::info!("📁 Loading dataset from {}", data_file.display());

        (
            MusselCatalog {
                settings,
                phase: Phase::Loading,
                thumbnails: HashMap::new(),
            },
            Task::perform(dataset::load_records(data_file), |result| {
                Message::DatasetLoaded(result.map_err(|e| e.to_string()))
            }),
        )
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::DatasetLoaded(result) => {
                self.phase = Phase::from_load(result, self.settings.search_delay());
                match &self.phase {
                    Phase::Ready(catalog) => self.generate_thumbnails(catalog.store()),
                    _ => Task::none(),
                }
            }
            Message::ThumbnailReady(filename, path) => {
                if let Some(path) = path {
                    self.thumbnails.insert(filename, path);
                }
                Task::none()
            }
            Message::Catalog(event) => {
                let Phase::Ready(catalog) = &mut self.phase else {
                    return Task::none();
                };

                match catalog.handle(event) {
                    Effect::ScheduleSearch { ticket, delay } => {
                        Task::perform(tokio::time::sleep(delay), move |_| {
                            Message::Catalog(Event::SearchElapsed(ticket))
                        })
                    }
                    Effect::None => Task::none(),
                }
            }
        }
    }

    /// One background job per distinct card image
    fn generate_thumbnails(&self, store: &Store) -> Task<Message> {
        let cache_dir = match thumbnail::thumbnail_cache_dir() {
            Ok(dir) => dir,
            Err(e) => {
                log::warn!("⚠️  Thumbnails disabled: {}", e);
                return Task::none();
            }
        };
        let size = self.settings.thumbnail_size;

        let filenames: BTreeSet<&str> = store
            .records()
            .iter()
            .filter_map(Record::first_image)
            .collect();

        Task::batch(filenames.into_iter().map(|filename| {
            let source = self.settings.image_path(filename);
            let filename = filename.to_string();

            Task::perform(
                thumbnail::ensure_thumbnail(source, filename.clone(), cache_dir.clone(), size),
                move |result| {
                    let path = match result {
                        Ok(path) => Some(path),
                        Err(e) => {
                            log::debug!("No thumbnail for {}: {}", filename, e);
                            None
                        }
                    };
                    Message::ThumbnailReady(filename.clone(), path)
                },
            )
        }))
    }

    /// Build the user interface
    fn view(&self) -> Element<'_, Message> {
        match &self.phase {
            Phase::Loading => status_screen("⏳ Loading mussel data..."),
            Phase::Failed => {
                status_screen("⚠️ Error loading data. Please restart the application.")
            }
            Phase::Ready(catalog) => self.catalog_view(catalog),
        }
    }

    fn catalog_view<'a>(&'a self, catalog: &'a Catalog) -> Element<'a, Message> {
        let grid = GridView::project(catalog.store().filtered());
        let header = ui::toolbar::view(catalog, grid.stat_labels());

        let body = if grid.is_empty() {
            ui::grid::empty_state()
        } else {
            ui::grid::view(grid, &self.settings, &self.thumbnails)
        };

        let page: Element<'a, Message> = column![
            container(header).padding(20),
            scrollable(container(body).padding(20).width(Length::Fill)).height(Length::Fill),
        ]
        .into();

        match catalog.open_record() {
            Some((session, record)) => ui::modal::overlay(
                page,
                ui::modal::view(ModalView::project(session, record), &self.settings),
                Message::Catalog(Event::Backdrop),
            ),
            None => page,
        }
    }

    /// Keyboard shortcuts are only live while the detail modal is open
    fn subscription(&self) -> Subscription<Message> {
        match &self.phase {
            Phase::Ready(catalog) if catalog.session().is_open() => {
                keyboard::on_key_press(modal_key)
            }
            _ => Subscription::none(),
        }
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        Theme::Dark
    }
}

fn modal_key(key: keyboard::Key, _modifiers: keyboard::Modifiers) -> Option<Message> {
    let key = match key {
        keyboard::Key::Named(Named::Escape) => Key::Escape,
        keyboard::Key::Named(Named::ArrowLeft) => Key::ArrowLeft,
        keyboard::Key::Named(Named::ArrowRight) => Key::ArrowRight,
        _ => return None,
    };
    Some(Message::Catalog(Event::KeyPressed(key)))
}

fn status_screen<'a>(message: &'a str) -> Element<'a, Message> {
    container(text(message).size(20))
        .width(Length::Fill)
        .height(Length::Fill)
        .center_x(Length::Fill)
        .center_y(Length::Fill)
        .into()
}

fn main() -> iced::Result {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let settings = Settings::load();
    log::info!("🦪 Mussel Catalog starting");

    iced::application("Mussel Catalog", MusselCatalog::update, MusselCatalog::view)
        .theme(MusselCatalog::theme)
        .subscription(MusselCatalog::subscription)
        .window_size((1280.0, 860.0))
        .centered()
        .run_with(move || MusselCatalog::new(settings))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: i64) -> Record {
        Record {
            id,
            common_name: Some(format!("Mussel {}", id)),
            ..Default::default()
        }
    }

    #[test]
    fn test_load_becomes_ready() {
        let phase = Phase::from_load(Ok(vec![record(1), record(2)]), Duration::from_millis(300));

        match phase {
            Phase::Ready(catalog) => assert_eq!(catalog.store().len(), 2),
            _ => panic!("expected a ready catalog"),
        }
    }

    #[test]
    fn test_duplicate_ids_fail_the_load() {
        let phase = Phase::from_load(Ok(vec![record(7), record(7)]), Duration::from_millis(300));
        assert!(matches!(phase, Phase::Failed));
    }

    #[test]
    fn test_read_error_fails_the_load() {
        let phase = Phase::from_load(Err("no such file".to_string()), Duration::from_millis(300));
        assert!(matches!(phase, Phase::Failed));
    }
}
