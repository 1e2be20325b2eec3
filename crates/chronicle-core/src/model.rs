//! Story summary data model.
//!
//! These types mirror the JSON the extraction model is asked to produce.
//! Every field defaults when absent so that partial batches decode.

use serde::{Deserialize, Serialize};

/// Sentinel key for an event whose time and description are both blank.
pub const BLANK_EVENT_KEY: &str = "(blank)";

/// Characters and dated events extracted from a story.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    #[serde(default)]
    pub characters: Vec<Character>,
    #[serde(default)]
    pub timeline: Vec<Timeline>,
}

impl Summary {
    pub fn new(characters: Vec<Character>, timeline: Vec<Timeline>) -> Self {
        Self {
            characters,
            timeline,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.characters.is_empty() && self.timeline.is_empty()
    }

    /// Total number of events across all dates
    pub fn event_count(&self) -> usize {
        self.timeline.iter().map(|t| t.events.len()).sum()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Character {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub aliases: Vec<String>,
    /// Prominence: main, major, or minor
    #[serde(default)]
    pub kind: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub age: String,
    #[serde(default)]
    pub gender: String,
    #[serde(default)]
    pub species: String,
    #[serde(default)]
    pub personality: String,
    #[serde(default)]
    pub physical_description: PhysicalDescription,
    #[serde(default)]
    pub sexual_characteristics: SexualCharacteristics,
    #[serde(default)]
    pub notable_actions: Vec<String>,
}

impl Character {
    /// A character with only a name set.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Identity key used for all character matching.
    pub fn identity_key(&self) -> String {
        identity_key(&self.name)
    }
}

/// Trim + lowercase of a character name.
pub fn identity_key(name: &str) -> String {
    name.trim().to_lowercase()
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhysicalDescription {
    #[serde(default)]
    pub height: String,
    #[serde(default)]
    pub build: String,
    #[serde(default)]
    pub hair: String,
    #[serde(default)]
    pub other: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SexualCharacteristics {
    #[serde(default)]
    pub genitalia: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub penis_length_flaccid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub penis_length_erect: Option<String>,
    #[serde(default)]
    pub pubic_hair: String,
    #[serde(default)]
    pub other: String,
}

/// Events sharing one opaque date string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timeline {
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub events: Vec<Event>,
}

impl Timeline {
    pub fn new(date: impl Into<String>, events: Vec<Event>) -> Self {
        Self {
            date: date.into(),
            events,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    #[serde(default)]
    pub time: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub characters_involved: Vec<String>,
}

impl Event {
    pub fn new(time: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            time: time.into(),
            description: description.into(),
            characters_involved: Vec::new(),
        }
    }

    /// `trim(time)|trim(description)`, or [`BLANK_EVENT_KEY`] when both are blank.
    pub fn identity_key(&self) -> String {
        let time = self.time.trim();
        let description = self.description.trim();
        if time.is_empty() && description.is_empty() {
            return BLANK_EVENT_KEY.to_string();
        }
        format!("{}|{}", time, description)
    }
}
