use iced::widget::{button, column, pick_list, row, text, text_input};
use iced::{Alignment, Element, Length};
use std::fmt;

use crate::state::controller::{Catalog, Event};
use crate::state::filter::HostBucket;
use crate::Message;

/// Entry of the basin dropdown
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BasinChoice {
    Any,
    Basin(String),
}

impl BasinChoice {
    fn into_filter(self) -> Option<String> {
        match self {
            BasinChoice::Any => None,
            BasinChoice::Basin(basin) => Some(basin),
        }
    }
}

impl fmt::Display for BasinChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BasinChoice::Any => f.write_str("All basins"),
            BasinChoice::Basin(basin) => f.write_str(basin),
        }
    }
}

/// Entry of the host-count dropdown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BucketChoice(pub Option<HostBucket>);

impl fmt::Display for BucketChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            None => f.write_str("Any host count"),
            Some(bucket) => write!(f, "{}", bucket),
        }
    }
}

/// Title, statistics, search box and filter controls
pub fn view<'a>(catalog: &'a Catalog, stats: (String, String)) -> Element<'a, Message> {
    let (mussels, images) = stats;

    let title = row![
        text("🦪 Freshwater Mussel Catalog").size(30),
        iced::widget::horizontal_space(),
        text(mussels).size(16),
        text(images).size(16),
    ]
    .spacing(16)
    .align_y(Alignment::Center);

    let mut search = row![text_input(
        "Search by name, species, basin or description...",
        catalog.search_text()
    )
    .on_input(|value| Message::Catalog(Event::SearchChanged(value)))
    .padding(10)
    .width(Length::Fill)]
    .spacing(8)
    .align_y(Alignment::Center);

    if catalog.show_clear_search() {
        search = search.push(
            button(text("✕"))
                .on_press(Message::Catalog(Event::ClearSearch))
                .style(button::secondary),
        );
    }

    let basin_options: Vec<BasinChoice> = std::iter::once(BasinChoice::Any)
        .chain(catalog.store().basins().iter().cloned().map(BasinChoice::Basin))
        .collect();
    let selected_basin = catalog
        .filters()
        .basin
        .clone()
        .map_or(BasinChoice::Any, BasinChoice::Basin);

    let bucket_options: Vec<BucketChoice> = std::iter::once(BucketChoice(None))
        .chain(HostBucket::ALL.into_iter().map(|bucket| BucketChoice(Some(bucket))))
        .collect();
    let selected_bucket = BucketChoice(catalog.filters().host_bucket);

    let filters = row![
        pick_list(basin_options, Some(selected_basin), |choice: BasinChoice| {
            Message::Catalog(Event::BasinSelected(choice.into_filter()))
        })
        .padding(8),
        pick_list(bucket_options, Some(selected_bucket), |choice: BucketChoice| {
            Message::Catalog(Event::HostBucketSelected(choice.0))
        })
        .padding(8),
        button(text("Reset filters"))
            .on_press(Message::Catalog(Event::Reset))
            .padding(8),
    ]
    .spacing(12)
    .align_y(Alignment::Center);

    column![title, search, filters].spacing(14).into()
}
