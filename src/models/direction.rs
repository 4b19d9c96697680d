use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::FormatError;

/// Trade direction of a signal. Parsed from text case-insensitively,
/// so `"buy"`, `" Sell "` and `"BUY"` are all accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Direction {
    Buy,
    Sell,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Buy => "BUY",
            Direction::Sell => "SELL",
        }
    }
}

impl FromStr for Direction {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "BUY" => Ok(Direction::Buy),
            "SELL" => Ok(Direction::Sell),
            _ => Err(FormatError::InvalidDirection(s.to_string())),
        }
    }
}

impl TryFrom<String> for Direction {
    type Error = FormatError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Direction> for String {
    fn from(d: Direction) -> Self {
        d.as_str().to_string()
    }
}

/// The `type` field of a signal payload.
///
/// Backend feeds also carry non-directional types (neutral, hold, or
/// `LONG`/`SHORT` from older strategies). Those are kept verbatim in
/// `Other` so they survive a round trip and simply skip TP ordering.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SignalType {
    Directional(Direction),
    Other(String),
}

impl SignalType {
    pub fn direction(&self) -> Option<Direction> {
        match self {
            SignalType::Directional(d) => Some(*d),
            SignalType::Other(_) => None,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            SignalType::Directional(d) => d.as_str(),
            SignalType::Other(raw) => raw,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.as_str().trim().is_empty()
    }
}

impl Default for SignalType {
    fn default() -> Self {
        SignalType::Other(String::new())
    }
}

impl fmt::Display for SignalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for SignalType {
    fn from(raw: String) -> Self {
        match raw.parse::<Direction>() {
            Ok(d) => SignalType::Directional(d),
            Err(_) => SignalType::Other(raw),
        }
    }
}

impl From<&str> for SignalType {
    fn from(raw: &str) -> Self {
        SignalType::from(raw.to_string())
    }
}

impl From<Direction> for SignalType {
    fn from(d: Direction) -> Self {
        SignalType::Directional(d)
    }
}

impl From<SignalType> for String {
    fn from(t: SignalType) -> Self {
        match t {
            SignalType::Directional(d) => d.as_str().to_string(),
            SignalType::Other(raw) => raw,
        }
    }
}
