/// Modal session state machine
///
/// Closed --open(id)--> Open --close/backdrop/escape--> Closed.
/// While open, the session tracks the displayed image and the active tab.

/// Detail tabs, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Tab {
    #[default]
    Overview,
    Characteristics,
    Hosts,
    Identification,
}

impl Tab {
    pub const ALL: [Tab; 4] = [
        Tab::Overview,
        Tab::Characteristics,
        Tab::Hosts,
        Tab::Identification,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Tab::Overview => "Overview",
            Tab::Characteristics => "Characteristics",
            Tab::Hosts => "Host Fish",
            Tab::Identification => "Identification",
        }
    }
}

/// Carousel step direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Prev,
    Next,
}

/// State of one open modal
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenSession {
    pub record_id: i64,
    pub image_index: usize,
    pub image_count: usize,
    pub tab: Tab,
}

/// Holds at most one open session
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ModalSession {
    #[default]
    Closed,
    Open(OpenSession),
}

impl ModalSession {
    pub fn is_open(&self) -> bool {
        matches!(self, ModalSession::Open(_))
    }

    pub fn current(&self) -> Option<&OpenSession> {
        match self {
            ModalSession::Open(session) => Some(session),
            ModalSession::Closed => None,
        }
    }

    /// Start a fresh session: first image, Overview tab
    pub fn open(&mut self, record_id: i64, image_count: usize) {
        *self = ModalSession::Open(OpenSession {
            record_id,
            image_index: 0,
            image_count,
            tab: Tab::Overview,
        });
    }

    pub fn close(&mut self) {
        *self = ModalSession::Closed;
    }

    pub fn select_tab(&mut self, tab: Tab) {
        if let ModalSession::Open(session) = self {
            session.tab = tab;
        }
    }

    /// Move the carousel one image; no-op when closed or with fewer than two images
    pub fn step(&mut self, step: Step) -> bool {
        let ModalSession::Open(session) = self else {
            return false;
        };
        if session.image_count <= 1 {
            return false;
        }

        let total = session.image_count;
        session.image_index = match step {
            Step::Next => (session.image_index + 1) % total,
            Step::Prev => (session.image_index + total - 1) % total,
        };
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_open_starts_at_first_image_on_overview() {
        let mut session = ModalSession::default();
        assert!(!session.is_open());

        session.open(3, 4);
        session.step(Step::Next);
        session.step(Step::Next);
        session.select_tab(Tab::Hosts);

        session.close();
        assert_eq!(session, ModalSession::Closed);

        session.open(9, 2);
        let open = session.current().unwrap();
        assert_eq!(open.record_id, 9);
        assert_eq!(open.image_index, 0);
        assert_eq!(open.tab, Tab::Overview);
    }

    #[test]
    fn test_carousel_wraps_both_ways() {
        let mut session = ModalSession::default();
        session.open(1, 3);

        assert!(session.step(Step::Prev));
        assert_eq!(session.current().unwrap().image_index, 2);
        assert!(session.step(Step::Next));
        assert!(session.step(Step::Next));
        assert_eq!(session.current().unwrap().image_index, 1);
    }

    #[test]
    fn test_carousel_is_inert_with_one_image_or_closed() {
        let mut session = ModalSession::default();
        assert!(!session.step(Step::Next));

        session.open(1, 1);
        assert!(!session.step(Step::Next));
        assert!(!session.step(Step::Prev));
        assert_eq!(session.current().unwrap().image_index, 0);
    }

    #[test]
    fn test_select_tab_ignored_when_closed() {
        let mut session = ModalSession::default();
        session.select_tab(Tab::Identification);
        assert_eq!(session, ModalSession::Closed);
    }

    proptest! {
        #[test]
        fn carousel_index_stays_in_range(count in 0usize..6, steps in prop::collection::vec(any::<bool>(), 0..40)) {
            let mut session = ModalSession::default();
            session.open(1, count);

            for forward in steps {
                session.step(if forward { Step::Next } else { Step::Prev });
                let index = session.current().unwrap().image_index;
                if count <= 1 {
                    prop_assert_eq!(index, 0);
                } else {
                    prop_assert!(index < count);
                }
            }
        }
    }
}
