//! Pure rendering of a catalog snapshot
//!
//! [`render`] turns one [`Catalog`] into the two regions the board shows:
//! activity cards and activity selector options. Nothing is diffed or kept
//! between renders; the board simply swaps in the new [`BoardView`].

use crate::models::Catalog;

pub const SELECT_PLACEHOLDER: &str = "-- Select an activity --";
pub const EMPTY_PARTICIPANTS: &str = "No participants yet.";
pub const LOAD_FAILED: &str = "Failed to load activities. Please try again later.";
pub const LOADING: &str = "Loading activities...";

/// CSS-style class carried by per-participant delete controls
pub const DELETE_CONTROL_CLASS: &str = "delete-btn";

/// A control attached to a rendered participant, identified by its class and
/// data attributes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Control {
    pub class: &'static str,
    pub data_activity: String,
    pub data_email: String,
    pub title: String,
    pub aria_label: String,
}

impl Control {
    pub fn delete(activity: &str, email: &str) -> Self {
        Control {
            class: DELETE_CONTROL_CLASS,
            data_activity: activity.to_string(),
            data_email: email.to_string(),
            title: format!("Unregister {}", email),
            aria_label: format!("Unregister {} from {}", email, activity),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParticipantItem {
    pub email: String,
    pub control: Control,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParticipantList {
    /// Single placeholder line instead of an empty list
    Empty,
    Items(Vec<ParticipantItem>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityCard {
    pub name: String,
    pub description: String,
    pub schedule: String,
    pub spots_left: i64,
    pub participant_count: usize,
    pub participants: ParticipantList,
}

impl ActivityCard {
    pub fn availability_text(&self) -> String {
        format!("{} spots left", self.spots_left)
    }

    pub fn participants_heading(&self) -> String {
        format!("Participants ({})", self.participant_count)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

impl SelectOption {
    pub fn placeholder() -> Self {
        SelectOption {
            value: String::new(),
            label: SELECT_PLACEHOLDER.to_string(),
        }
    }

    pub fn is_placeholder(&self) -> bool {
        self.value.is_empty()
    }
}

/// What the activity list region currently shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListRegion {
    Loading,
    Cards(Vec<ActivityCard>),
    Failed(String),
}

/// The two regions rebuilt on every load
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardView {
    pub list: ListRegion,
    pub options: Vec<SelectOption>,
}

impl Default for BoardView {
    fn default() -> Self {
        BoardView {
            list: ListRegion::Loading,
            options: vec![SelectOption::placeholder()],
        }
    }
}

impl BoardView {
    pub fn cards(&self) -> &[ActivityCard] {
        match &self.list {
            ListRegion::Cards(cards) => cards,
            _ => &[],
        }
    }

    /// Flatten the list region into display rows, top to bottom
    pub fn rows(&self) -> Vec<Row> {
        match &self.list {
            ListRegion::Loading => vec![Row::plain(RowKind::Notice, LOADING)],
            ListRegion::Failed(text) => vec![Row::plain(RowKind::Notice, text)],
            ListRegion::Cards(cards) => cards.iter().flat_map(card_rows).collect(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowKind {
    Title,
    Description,
    Schedule,
    Availability,
    ParticipantsHeading,
    Participant,
    EmptyParticipants,
    Spacer,
    Notice,
}

/// One rendered line of the list region, with the control it carries if any
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub kind: RowKind,
    pub text: String,
    pub control: Option<Control>,
}

impl Row {
    fn plain(kind: RowKind, text: impl Into<String>) -> Self {
        Row {
            kind,
            text: text.into(),
            control: None,
        }
    }
}

fn card_rows(card: &ActivityCard) -> Vec<Row> {
    let mut rows = vec![
        Row::plain(RowKind::Title, card.name.clone()),
        Row::plain(RowKind::Description, card.description.clone()),
        Row::plain(RowKind::Schedule, format!("Schedule: {}", card.schedule)),
        Row::plain(
            RowKind::Availability,
            format!("Availability: {}", card.availability_text()),
        ),
        Row::plain(RowKind::ParticipantsHeading, card.participants_heading()),
    ];

    match &card.participants {
        ParticipantList::Empty => {
            rows.push(Row::plain(RowKind::EmptyParticipants, EMPTY_PARTICIPANTS))
        }
        ParticipantList::Items(items) => {
            for item in items {
                rows.push(Row {
                    kind: RowKind::Participant,
                    text: format!("• {}", item.email),
                    control: Some(item.control.clone()),
                });
            }
        }
    }

    rows.push(Row::plain(RowKind::Spacer, ""));
    rows
}

/// Build the view for a freshly fetched catalog
pub fn render(catalog: &Catalog) -> BoardView {
    let mut cards = Vec::with_capacity(catalog.len());
    let mut options = Vec::with_capacity(catalog.len() + 1);
    options.push(SelectOption::placeholder());

    for (name, details) in catalog.iter() {
        let participants = if details.participants.is_empty() {
            ParticipantList::Empty
        } else {
            ParticipantList::Items(
                details
                    .participants
                    .iter()
                    .map(|email| ParticipantItem {
                        email: email.clone(),
                        control: Control::delete(name, email),
                    })
                    .collect(),
            )
        };

        cards.push(ActivityCard {
            name: name.to_string(),
            description: details.description.clone(),
            schedule: details.schedule.clone(),
            spots_left: details.spots_left(),
            participant_count: details.participants.len(),
            participants,
        });

        options.push(SelectOption {
            value: name.to_string(),
            label: name.to_string(),
        });
    }

    BoardView {
        list: ListRegion::Cards(cards),
        options,
    }
}

/// Render the list region as plain text, one row per line
pub fn to_text(view: &BoardView) -> String {
    let mut out = String::new();
    for row in view.rows() {
        let line = match row.kind {
            RowKind::Title => format!("== {} ==", row.text),
            RowKind::Participant | RowKind::EmptyParticipants => format!("  {}", row.text),
            _ => row.text,
        };
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}
