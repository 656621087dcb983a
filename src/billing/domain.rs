use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Category of a play; decides which pricing curve applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayType {
    Tragedy,
    Comedy,
}

impl PlayType {
    pub const fn ordered() -> [Self; 2] {
        [Self::Tragedy, Self::Comedy]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Tragedy => "tragedy",
            Self::Comedy => "comedy",
        }
    }
}

impl fmt::Display for PlayType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Raised when a type string is not exactly one of the known labels.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognized play type '{0}'")]
pub struct UnrecognizedPlayType(pub String);

impl FromStr for PlayType {
    type Err = UnrecognizedPlayType;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        PlayType::ordered()
            .into_iter()
            .find(|play_type| play_type.label() == value)
            .ok_or_else(|| UnrecognizedPlayType(value.to_string()))
    }
}

/// Catalog entry. The type is kept as loaded and only resolved when the play
/// is priced, so a bad catalog entry fails the statement that uses it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Play {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
}

impl Play {
    pub fn new(name: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: kind.into(),
        }
    }

    pub fn of_type(name: impl Into<String>, play_type: PlayType) -> Self {
        Self::new(name, play_type.label())
    }

    pub fn play_type(&self) -> Result<PlayType, UnrecognizedPlayType> {
        self.kind.parse()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Performance {
    #[serde(rename = "playID")]
    pub play_id: String,
    pub audience: u32,
}

impl Performance {
    pub fn new(play_id: impl Into<String>, audience: u32) -> Self {
        Self {
            play_id: play_id.into(),
            audience,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invoice {
    pub customer: String,
    #[serde(default)]
    pub performances: Vec<Performance>,
}

impl Invoice {
    pub fn new(customer: impl Into<String>, performances: Vec<Performance>) -> Self {
        Self {
            customer: customer.into(),
            performances,
        }
    }
}

/// Lookup seam used by the aggregator to resolve play ids.
pub trait PlayCatalog {
    fn lookup(&self, play_id: &str) -> Option<&Play>;
}

impl PlayCatalog for HashMap<String, Play> {
    fn lookup(&self, play_id: &str) -> Option<&Play> {
        self.get(play_id)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    plays: HashMap<String, Play>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a play, returning the entry it replaced if the id was taken.
    pub fn insert(&mut self, play_id: impl Into<String>, play: Play) -> Option<Play> {
        self.plays.insert(play_id.into(), play)
    }

    pub fn contains(&self, play_id: &str) -> bool {
        self.plays.contains_key(play_id)
    }

    pub fn len(&self) -> usize {
        self.plays.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plays.is_empty()
    }
}

impl PlayCatalog for Catalog {
    fn lookup(&self, play_id: &str) -> Option<&Play> {
        self.plays.get(play_id)
    }
}

impl From<HashMap<String, Play>> for Catalog {
    fn from(plays: HashMap<String, Play>) -> Self {
        Self { plays }
    }
}

impl<K: Into<String>> FromIterator<(K, Play)> for Catalog {
    fn from_iter<I: IntoIterator<Item = (K, Play)>>(iter: I) -> Self {
        Self {
            plays: iter.into_iter().map(|(id, play)| (id.into(), play)).collect(),
        }
    }
}

/// Failures that invalidate a whole statement.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StatementError {
    #[error("unknown play type '{play_type}' for play '{play_id}'")]
    UnknownPlayType { play_id: String, play_type: String },
    #[error("unknown play '{play_id}'")]
    UnknownPlay { play_id: String },
    #[error("amount owed overflowed while pricing play '{play_id}'")]
    AmountOverflow { play_id: String },
}
