/// Catalog controller
///
/// Owns every piece of mutable catalog state (store, filter criteria,
/// search debouncer, modal session) and mutates it only through `handle`.
/// The GUI layer forwards inbound events here and turns the returned
/// `Effect` into async work; nothing in this module knows about iced.

use std::time::Duration;

use super::data::Record;
use super::debounce::{Debouncer, Ticket};
use super::filter::{HostBucket, StructuralFilters};
use super::session::{ModalSession, OpenSession, Step, Tab};
use super::store::Store;

/// Keys handled while the modal is open
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Escape,
    ArrowLeft,
    ArrowRight,
}

/// Inbound UI events
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Search box text changed (restarts the debounce countdown)
    SearchChanged(String),
    /// A debounce countdown elapsed
    SearchElapsed(Ticket),
    ClearSearch,
    BasinSelected(Option<String>),
    HostBucketSelected(Option<HostBucket>),
    Reset,
    CardActivated(i64),
    CloseModal,
    Backdrop,
    PrevImage,
    NextImage,
    TabSelected(Tab),
    KeyPressed(Key),
}

/// Follow-up work the caller must perform after an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    None,
    /// Sleep for `delay`, then send `Event::SearchElapsed(ticket)`
    ScheduleSearch { ticket: Ticket, delay: Duration },
}

pub struct Catalog {
    store: Store,
    search_text: String,
    filters: StructuralFilters,
    debouncer: Debouncer,
    session: ModalSession,
}

impl Catalog {
    pub fn new(store: Store, search_delay: Duration) -> Self {
        Catalog {
            store,
            search_text: String::new(),
            filters: StructuralFilters::default(),
            debouncer: Debouncer::new(search_delay),
            session: ModalSession::default(),
        }
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    /// Raw text currently in the search box
    pub fn search_text(&self) -> &str {
        &self.search_text
    }

    /// Whether the "clear search" affordance should be visible
    pub fn show_clear_search(&self) -> bool {
        !self.search_text.trim().is_empty()
    }

    pub fn filters(&self) -> &StructuralFilters {
        &self.filters
    }

    pub fn session(&self) -> &ModalSession {
        &self.session
    }

    /// The open session together with its record
    pub fn open_record(&self) -> Option<(&OpenSession, &Record)> {
        let session = self.session.current()?;
        let record = self.store.get(session.record_id)?;
        Some((session, record))
    }

    /// Apply one event to the catalog state
    pub fn handle(&mut self, event: Event) -> Effect {
        match event {
            Event::SearchChanged(text) => {
                self.search_text = text;
                let ticket = self.debouncer.schedule(self.search_text.clone());
                return Effect::ScheduleSearch {
                    ticket,
                    delay: self.debouncer.delay(),
                };
            }
            Event::SearchElapsed(ticket) => {
                if let Some(query) = self.debouncer.fire(ticket) {
                    log::debug!("Searching for {:?}", query);
                    self.store.apply_search(&query, &self.filters);
                }
            }
            Event::ClearSearch => {
                self.search_text.clear();
                if self.debouncer.is_pending() {
                    log::debug!("Dropping pending search");
                }
                self.debouncer.cancel();
                self.store.apply_search("", &self.filters);
            }
            Event::BasinSelected(basin) => {
                self.filters.basin = basin;
                self.store.apply_filters(&self.filters);
            }
            Event::HostBucketSelected(bucket) => {
                self.filters.host_bucket = bucket;
                self.store.apply_filters(&self.filters);
            }
            Event::Reset => {
                self.search_text.clear();
                self.filters.clear();
                self.debouncer.cancel();
                self.store.reset();
                log::debug!("Filters reset, showing all {} records", self.store.len());
            }
            Event::CardActivated(id) => self.open(id),
            Event::CloseModal | Event::Backdrop => self.close(),
            Event::PrevImage => {
                self.session.step(Step::Prev);
            }
            Event::NextImage => {
                self.session.step(Step::Next);
            }
            Event::TabSelected(tab) => self.session.select_tab(tab),
            Event::KeyPressed(key) => {
                if !self.session.is_open() {
                    return Effect::None;
                }
                match key {
                    Key::Escape => self.close(),
                    Key::ArrowLeft => {
                        self.session.step(Step::Prev);
                    }
                    Key::ArrowRight => {
                        self.session.step(Step::Next);
                    }
                }
            }
        }

        Effect::None
    }

    fn open(&mut self, id: i64) {
        match self.store.get(id) {
            Some(record) => {
                log::debug!("Opening record {} ({})", id, record.name());
                self.session.open(id, record.image_count());
            }
            None => log::debug!("Ignoring activation of unknown record {}", id),
        }
    }

    fn close(&mut self) {
        if self.session.is_open() {
            log::debug!("Closing detail view");
        }
        self.session.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DELAY: Duration = Duration::from_millis(300);

    fn record(id: i64, name: &str, basin: &str, hosts: u32, images: usize) -> Record {
        Record {
            id,
            common_name: Some(name.to_string()),
            basin: Some(basin.to_string()),
            host_fish_count: Some(hosts),
            images: (0..images).map(|i| format!("{}_{}.jpg", id, i)).collect(),
            ..Default::default()
        }
    }

    fn catalog() -> Catalog {
        let store = Store::new(vec![
            record(1, "Threeridge", "Gulf", 3, 2),
            record(2, "Washboard", "Gulf", 30, 0),
            record(3, "Spectaclecase", "Ohio", 8, 1),
        ])
        .unwrap();
        Catalog::new(store, DELAY)
    }

    fn visible(catalog: &Catalog) -> Vec<i64> {
        catalog.store().filtered().map(|r| r.id).collect()
    }

    fn type_and_wait(catalog: &mut Catalog, text: &str) {
        let Effect::ScheduleSearch { ticket, delay } =
            catalog.handle(Event::SearchChanged(text.to_string()))
        else {
            panic!("search input must schedule a timer");
        };
        assert_eq!(delay, DELAY);
        catalog.handle(Event::SearchElapsed(ticket));
    }

    #[test]
    fn test_search_waits_for_timer() {
        let mut catalog = catalog();

        catalog.handle(Event::SearchChanged("wash".to_string()));
        assert_eq!(visible(&catalog), vec![1, 2, 3]);
        assert!(catalog.show_clear_search());

        type_and_wait(&mut catalog, "WASH");
        assert_eq!(visible(&catalog), vec![2]);
    }

    #[test]
    fn test_stale_timer_is_ignored() {
        let mut catalog = catalog();

        let Effect::ScheduleSearch { ticket: stale, .. } =
            catalog.handle(Event::SearchChanged("three".to_string()))
        else {
            panic!("expected a timer");
        };
        let Effect::ScheduleSearch { ticket: live, .. } =
            catalog.handle(Event::SearchChanged("spect".to_string()))
        else {
            panic!("expected a timer");
        };

        catalog.handle(Event::SearchElapsed(stale));
        assert_eq!(visible(&catalog), vec![1, 2, 3]);

        catalog.handle(Event::SearchElapsed(live));
        assert_eq!(visible(&catalog), vec![3]);
    }

    #[test]
    fn test_clearing_one_filter_keeps_the_others() {
        let mut catalog = catalog();
        type_and_wait(&mut catalog, "gulf");
        catalog.handle(Event::HostBucketSelected(Some(HostBucket::Lots)));
        assert_eq!(visible(&catalog), vec![2]);

        catalog.handle(Event::HostBucketSelected(None));
        assert_eq!(visible(&catalog), vec![1, 2]);
        assert_eq!(catalog.search_text(), "gulf");

        catalog.handle(Event::BasinSelected(Some("Gulf".to_string())));
        catalog.handle(Event::ClearSearch);
        assert_eq!(visible(&catalog), vec![1, 2]);
        assert_eq!(catalog.filters().basin.as_deref(), Some("Gulf"));
        assert!(!catalog.show_clear_search());
    }

    #[test]
    fn test_reset_clears_everything_and_cancels_pending_search() {
        let mut catalog = catalog();
        catalog.handle(Event::BasinSelected(Some("Gulf".to_string())));
        catalog.handle(Event::HostBucketSelected(Some(HostBucket::Few)));
        let Effect::ScheduleSearch { ticket, .. } =
            catalog.handle(Event::SearchChanged("three".to_string()))
        else {
            panic!("expected a timer");
        };

        catalog.handle(Event::Reset);
        catalog.handle(Event::SearchElapsed(ticket));

        assert_eq!(visible(&catalog), vec![1, 2, 3]);
        assert_eq!(catalog.search_text(), "");
        assert!(!catalog.filters().is_active());
    }

    #[test]
    fn test_modal_lifecycle() {
        let mut catalog = catalog();

        catalog.handle(Event::CardActivated(1));
        catalog.handle(Event::NextImage);
        catalog.handle(Event::TabSelected(Tab::Hosts));
        let (session, record) = catalog.open_record().unwrap();
        assert_eq!(record.id, 1);
        assert_eq!(session.image_index, 1);
        assert_eq!(session.tab, Tab::Hosts);

        catalog.handle(Event::Backdrop);
        assert!(!catalog.session().is_open());

        catalog.handle(Event::CardActivated(3));
        let (session, _) = catalog.open_record().unwrap();
        assert_eq!(session.image_index, 0);
        assert_eq!(session.tab, Tab::Overview);
    }

    #[test]
    fn test_unknown_id_is_a_no_op() {
        let mut catalog = catalog();
        catalog.handle(Event::CardActivated(99));
        assert!(!catalog.session().is_open());
    }

    #[test]
    fn test_keys_only_act_while_open() {
        let mut catalog = catalog();
        assert_eq!(catalog.handle(Event::KeyPressed(Key::ArrowRight)), Effect::None);
        assert!(!catalog.session().is_open());

        catalog.handle(Event::CardActivated(1));
        catalog.handle(Event::KeyPressed(Key::ArrowLeft));
        assert_eq!(catalog.open_record().unwrap().0.image_index, 1);
        catalog.handle(Event::KeyPressed(Key::ArrowRight));
        assert_eq!(catalog.open_record().unwrap().0.image_index, 0);

        catalog.handle(Event::KeyPressed(Key::Escape));
        assert!(!catalog.session().is_open());
    }

    #[test]
    fn test_arrows_do_nothing_without_images() {
        let mut catalog = catalog();
        catalog.handle(Event::CardActivated(2));
        catalog.handle(Event::KeyPressed(Key::ArrowRight));
        catalog.handle(Event::PrevImage);
        assert_eq!(catalog.open_record().unwrap().0.image_index, 0);
    }
}
