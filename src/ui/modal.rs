/// Detail modal
///
/// `ModalView::project` fills the four tab panels and the carousel state
/// from the open session; `view` and `overlay` draw them with iced.
use iced::widget::{
    button, center, column, container, horizontal_space, image, mouse_area, opaque, row,
    scrollable, stack, text, Column, Row,
};
use iced::{border, Alignment, Color, ContentFit, Element, Length, Theme};
use iced_aw::Wrap;

use crate::config::Settings;
use crate::state::controller::Event;
use crate::state::data::Record;
use crate::state::session::{OpenSession, Tab};
use crate::Message;

pub const NOT_SPECIFIED: &str = "Not specified";
pub const NO_HOSTS: &str = "No host fish information available";

/// One labelled value in a panel
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub label: &'static str,
    pub value: String,
}

impl Field {
    fn new(label: &'static str, value: Option<&str>, fallback: &str) -> Self {
        Self {
            label,
            value: value.unwrap_or(fallback).to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CarouselView {
    /// Filename of the displayed image
    pub current: Option<String>,
    /// "position / total", 1-based; "0 / 0" without images
    pub counter: String,
    /// Prev/next controls are enabled only with two or more images
    pub can_navigate: bool,
}

/// Everything the open modal displays
#[derive(Debug, Clone, PartialEq)]
pub struct ModalView {
    pub title: String,
    pub active_tab: Tab,
    pub overview: Vec<Field>,
    pub characteristics: Vec<Field>,
    pub host_count: u32,
    pub hosts: Vec<String>,
    pub identification: Vec<Field>,
    pub carousel: CarouselView,
}

impl ModalView {
    pub fn project(session: &OpenSession, record: &Record) -> Self {
        let total = record.image_count();
        let carousel = CarouselView {
            current: record.images.get(session.image_index).cloned(),
            counter: if total == 0 {
                "0 / 0".to_string()
            } else {
                format!("{} / {}", session.image_index + 1, total)
            },
            can_navigate: total > 1,
        };

        let overview = vec![
            Field::new("Species", record.species.as_deref(), NOT_SPECIFIED),
            Field::new("Basin", record.basin.as_deref(), NOT_SPECIFIED),
            Field {
                label: "Host Fish Count",
                value: record.host_count().to_string(),
            },
            Field::new(
                "Most Common Host",
                record.most_common_host.as_deref(),
                NOT_SPECIFIED,
            ),
            Field::new(
                "Description",
                record.defining_characteristics.as_deref(),
                "No description available",
            ),
        ];

        let characteristics = vec![
            Field::new(
                "Shell",
                record.shell_description.as_deref(),
                "No shell description available",
            ),
            Field::new(
                "Nacre",
                record.nacre.as_deref(),
                "No nacre description available",
            ),
            Field::new(
                "Periostracum",
                record.periostracum.as_deref(),
                "No periostracum description available",
            ),
            Field::new(
                "Other Characteristics",
                record.other_characteristics.as_deref(),
                "No other characteristics available",
            ),
        ];

        let identification = vec![
            Field::new(
                "May Be Confused With",
                record.maybe_confused.as_deref(),
                "No confusion information available",
            ),
            Field::new(
                "Image Credit",
                record.image_credit.as_deref(),
                "No image credit information available",
            ),
        ];

        Self {
            title: record.name().to_string(),
            active_tab: session.tab,
            overview,
            characteristics,
            host_count: record.host_count(),
            hosts: record.host_list().into_iter().map(str::to_string).collect(),
            identification,
            carousel,
        }
    }
}

/// Build the dialog body
pub fn view<'a>(modal: ModalView, settings: &Settings) -> Element<'a, Message> {
    let header = row![
        text(modal.title).size(28),
        horizontal_space(),
        button(text("✕"))
            .on_press(Message::Catalog(Event::CloseModal))
            .style(button::secondary),
    ]
    .align_y(Alignment::Center);

    let carousel = carousel(modal.carousel, settings);

    let tabs = Row::with_children(Tab::ALL.into_iter().map(|tab| -> Element<'a, Message> {
        let style = if tab == modal.active_tab {
            button::primary
        } else {
            button::secondary
        };
        button(text(tab.title()))
            .on_press(Message::Catalog(Event::TabSelected(tab)))
            .style(style)
            .into()
    }))
    .spacing(8);

    let panel = match modal.active_tab {
        Tab::Overview => fields(modal.overview),
        Tab::Characteristics => fields(modal.characteristics),
        Tab::Hosts => hosts(modal.host_count, modal.hosts),
        Tab::Identification => fields(modal.identification),
    };

    let body = column![header, carousel, tabs, panel].spacing(20);

    container(scrollable(container(body).padding(24)))
        .max_width(860.0)
        .max_height(760.0)
        .style(|theme: &Theme| {
            let palette = theme.extended_palette();
            container::Style {
                background: Some(palette.background.base.color.into()),
                border: border::rounded(12.0),
                ..container::Style::default()
            }
        })
        .into()
}

fn carousel<'a>(carousel: CarouselView, settings: &Settings) -> Element<'a, Message> {
    let picture: Element<'a, Message> = match &carousel.current {
        Some(filename) => image(image::Handle::from_path(settings.image_path(filename)))
            .width(Length::Fill)
            .height(380.0)
            .content_fit(ContentFit::Contain)
            .into(),
        None => container(text("🖼").size(64))
            .center_x(Length::Fill)
            .center_y(380.0)
            .into(),
    };

    let prev = carousel
        .can_navigate
        .then_some(Message::Catalog(Event::PrevImage));
    let next = carousel
        .can_navigate
        .then_some(Message::Catalog(Event::NextImage));

    let controls = row![
        button(text("‹").size(20)).on_press_maybe(prev),
        text(carousel.counter).size(16),
        button(text("›").size(20)).on_press_maybe(next),
    ]
    .spacing(16)
    .align_y(Alignment::Center);

    column![picture, controls]
        .spacing(12)
        .align_x(Alignment::Center)
        .into()
}

fn fields<'a>(fields: Vec<Field>) -> Element<'a, Message> {
    Column::with_children(fields.into_iter().map(|field| -> Element<'a, Message> {
        column![text(field.label).size(13), text(field.value).size(16)]
            .spacing(4)
            .into()
    }))
    .spacing(16)
    .into()
}

fn hosts<'a>(count: u32, hosts: Vec<String>) -> Element<'a, Message> {
    let summary = column![text("Host Fish Count").size(13), text(count.to_string()).size(16)].spacing(4);

    let list: Element<'a, Message> = if hosts.is_empty() {
        text(NO_HOSTS).size(16).into()
    } else {
        let tags: Vec<Element<'a, Message>> = hosts
            .into_iter()
            .map(|host| {
                container(text(host).size(14))
                    .padding([4, 10])
                    .style(container::rounded_box)
                    .into()
            })
            .collect();
        Wrap::with_elements(tags).spacing(8.0).line_spacing(8.0).into()
    };

    column![summary, text("Reported Hosts").size(13), list]
        .spacing(12)
        .into()
}

/// Stack `content` over `base` behind a dimmed backdrop.
/// The backdrop swallows clicks and scrolling meant for `base`.
pub fn overlay<'a>(
    base: Element<'a, Message>,
    content: Element<'a, Message>,
    on_blur: Message,
) -> Element<'a, Message> {
    stack![
        base,
        opaque(
            mouse_area(center(opaque(content)).style(|_theme| {
                container::Style {
                    background: Some(
                        Color {
                            a: 0.8,
                            ..Color::BLACK
                        }
                        .into(),
                    ),
                    ..container::Style::default()
                }
            }))
            .on_press(on_blur)
        )
    ]
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(image_index: usize, image_count: usize, tab: Tab) -> OpenSession {
        OpenSession {
            record_id: 1,
            image_index,
            image_count,
            tab,
        }
    }

    fn value<'a>(fields: &'a [Field], label: &str) -> &'a str {
        &fields.iter().find(|field| field.label == label).unwrap().value
    }

    #[test]
    fn test_empty_record_uses_placeholders() {
        let record = Record {
            id: 1,
            common_name: Some("Rabbitsfoot".to_string()),
            ..Default::default()
        };

        let modal = ModalView::project(&session(0, 0, Tab::Overview), &record);

        assert_eq!(modal.title, "Rabbitsfoot");
        assert_eq!(value(&modal.overview, "Species"), NOT_SPECIFIED);
        assert_eq!(value(&modal.overview, "Host Fish Count"), "0");
        assert_eq!(value(&modal.overview, "Description"), "No description available");
        assert_eq!(value(&modal.characteristics, "Nacre"), "No nacre description available");
        assert_eq!(
            value(&modal.identification, "Image Credit"),
            "No image credit information available"
        );
        assert!(modal.hosts.is_empty());
        assert_eq!(modal.carousel.counter, "0 / 0");
        assert_eq!(modal.carousel.current, None);
        assert!(!modal.carousel.can_navigate);
    }

    #[test]
    fn test_populated_record() {
        let record = Record {
            id: 1,
            common_name: Some("Ebonyshell".to_string()),
            species: Some("Fusconaia ebena".to_string()),
            host_fish_count: Some(2),
            reported_hosts: Some("Skipjack Herring, ,".to_string()),
            images: vec!["e1.jpg".to_string(), "e2.jpg".to_string(), "e3.jpg".to_string()],
            ..Default::default()
        };

        let modal = ModalView::project(&session(1, 3, Tab::Hosts), &record);

        assert_eq!(modal.active_tab, Tab::Hosts);
        assert_eq!(value(&modal.overview, "Species"), "Fusconaia ebena");
        assert_eq!(modal.host_count, 2);
        assert_eq!(modal.hosts, vec!["Skipjack Herring".to_string()]);
        assert_eq!(modal.carousel.current.as_deref(), Some("e2.jpg"));
        assert_eq!(modal.carousel.counter, "2 / 3");
        assert!(modal.carousel.can_navigate);
    }

    #[test]
    fn test_single_image_disables_navigation() {
        let record = Record {
            id: 1,
            images: vec!["only.jpg".to_string()],
            ..Default::default()
        };

        let modal = ModalView::project(&session(0, 1, Tab::Overview), &record);

        assert_eq!(modal.carousel.counter, "1 / 1");
        assert!(!modal.carousel.can_navigate);
    }
}
