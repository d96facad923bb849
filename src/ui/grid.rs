/// Card grid
///
/// `GridView::project` turns the filtered records into plain card data;
/// `view` lays those cards out with iced widgets.
use iced::alignment::Horizontal;
use iced::widget::{column, container, image, mouse_area, row, stack, text, Column};
use iced::{Alignment, ContentFit, Element, Length};
use iced_aw::Wrap;
use std::collections::HashMap;
use std::path::PathBuf;

use crate::config::Settings;
use crate::state::controller::Event;
use crate::state::data::Record;
use crate::Message;

const CARD_WIDTH: f32 = 260.0;
const CARD_IMAGE_HEIGHT: f32 = 170.0;

/// Everything a card shows about one record
#[derive(Debug, Clone, PartialEq)]
pub struct CardSummary {
    pub id: i64,
    pub name: String,
    pub species: String,
    pub host_count: u32,
    pub image_count: usize,
    pub basin: String,
    pub first_image: Option<String>,
}

impl CardSummary {
    pub fn from_record(record: &Record) -> Self {
        Self {
            id: record.id,
            name: record.name().to_string(),
            species: record
                .species
                .clone()
                .unwrap_or_else(|| "Species not specified".to_string()),
            host_count: record.host_count(),
            image_count: record.image_count(),
            basin: record
                .basin
                .clone()
                .unwrap_or_else(|| "Basin not specified".to_string()),
            first_image: record.first_image().map(str::to_string),
        }
    }

    /// Corner badge, only for records with images
    pub fn badge(&self) -> Option<String> {
        (self.image_count > 0).then(|| plural(self.image_count, "image"))
    }
}

/// Cards for the filtered view plus its aggregate statistics
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GridView {
    pub cards: Vec<CardSummary>,
    pub record_count: usize,
    pub image_count: usize,
}

impl GridView {
    pub fn project<'a>(records: impl IntoIterator<Item = &'a Record>) -> Self {
        let cards: Vec<CardSummary> = records.into_iter().map(CardSummary::from_record).collect();
        let image_count = cards.iter().map(|card| card.image_count).sum();

        Self {
            record_count: cards.len(),
            image_count,
            cards,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// "N mussels" and "M images" labels for the header
    pub fn stat_labels(&self) -> (String, String) {
        (
            plural(self.record_count, "mussel"),
            plural(self.image_count, "image"),
        )
    }
}

/// "1 image", "2 images", "0 images"
pub fn plural(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("{} {}", count, noun)
    } else {
        format!("{} {}s", count, noun)
    }
}

/// Build the card grid; thumbnails are used where they have been generated
pub fn view<'a>(
    grid: GridView,
    settings: &Settings,
    thumbnails: &HashMap<String, PathBuf>,
) -> Element<'a, Message> {
    let cards: Vec<Element<'a, Message>> = grid
        .cards
        .into_iter()
        .map(|summary| {
            let picture = summary.first_image.as_ref().map(|filename| {
                thumbnails
                    .get(filename)
                    .cloned()
                    .unwrap_or_else(|| settings.image_path(filename))
            });
            card(summary, picture)
        })
        .collect();

    Wrap::with_elements(cards)
        .spacing(16.0)
        .line_spacing(16.0)
        .into()
}

fn card<'a>(summary: CardSummary, picture: Option<PathBuf>) -> Element<'a, Message> {
    let picture: Element<'a, Message> = match picture {
        Some(path) => image(image::Handle::from_path(path))
            .width(Length::Fill)
            .height(CARD_IMAGE_HEIGHT)
            .content_fit(ContentFit::Cover)
            .into(),
        None => container(text("🌱").size(48))
            .center_x(Length::Fill)
            .center_y(CARD_IMAGE_HEIGHT)
            .into(),
    };

    let picture: Element<'a, Message> = match summary.badge() {
        Some(badge) => stack![
            picture,
            container(container(text(badge).size(12)).padding(4).style(container::dark))
                .width(Length::Fill)
                .padding(6)
                .align_x(Horizontal::Right),
        ]
        .into(),
        None => picture,
    };

    let stats = row![
        stat(summary.host_count.to_string(), "Host Fish"),
        stat(summary.image_count.to_string(), "Images"),
    ]
    .spacing(24);

    let content = column![
        picture,
        text(summary.name).size(18),
        text(summary.species).size(14),
        stats,
        text(summary.basin).size(13),
    ]
    .spacing(8);

    mouse_area(
        container(content)
            .width(CARD_WIDTH)
            .padding(12)
            .style(container::rounded_box),
    )
    .on_press(Message::Catalog(Event::CardActivated(summary.id)))
    .into()
}

fn stat<'a>(value: String, label: &'a str) -> Column<'a, Message> {
    column![text(value).size(20), text(label).size(12)].align_x(Alignment::Center)
}

/// Shown instead of the grid when nothing matches
pub fn empty_state<'a>() -> Element<'a, Message> {
    container(
        column![
            text("🔍").size(48),
            text("No mussels found").size(22),
            text("Try adjusting your search or filters.").size(14),
        ]
        .spacing(10)
        .align_x(Alignment::Center),
    )
    .center_x(Length::Fill)
    .padding(60)
    .into()
}
