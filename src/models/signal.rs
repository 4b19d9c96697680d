use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::formatting::take_profit::TakeProfitCarrier;
use crate::models::{Direction, SignalType};

/// Take-profit price levels of a signal.
///
/// Backend payloads name the list either `targets` or `tp_levels`; the
/// variant remembers which one so re-serializing writes the same key back.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "LevelFields", into = "LevelFields")]
pub enum TakeProfitLevels {
    Targets(Vec<f64>),
    TpLevels(Vec<f64>),
    #[default]
    Absent,
}

impl TakeProfitLevels {
    pub fn as_slice(&self) -> &[f64] {
        match self {
            TakeProfitLevels::Targets(v) | TakeProfitLevels::TpLevels(v) => v.as_slice(),
            TakeProfitLevels::Absent => &[],
        }
    }

    pub fn is_empty(&self) -> bool {
        self.as_slice().is_empty()
    }

    /// Payload key this list was read from.
    pub fn field_name(&self) -> Option<&'static str> {
        match self {
            TakeProfitLevels::Targets(_) => Some("targets"),
            TakeProfitLevels::TpLevels(_) => Some("tp_levels"),
            TakeProfitLevels::Absent => None,
        }
    }

    /// Build a new list of the same variant from `f` applied to the current values.
    pub fn map_values<F>(&self, f: F) -> Self
    where
        F: FnOnce(&[f64]) -> Vec<f64>,
    {
        match self {
            TakeProfitLevels::Targets(v) => TakeProfitLevels::Targets(f(v)),
            TakeProfitLevels::TpLevels(v) => TakeProfitLevels::TpLevels(f(v)),
            TakeProfitLevels::Absent => TakeProfitLevels::Absent,
        }
    }
}

/// Wire shape of the two optional level keys.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LevelFields {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub targets: Option<Vec<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tp_levels: Option<Vec<f64>>,
}

impl TryFrom<LevelFields> for TakeProfitLevels {
    type Error = String;

    fn try_from(fields: LevelFields) -> Result<Self, Self::Error> {
        match (fields.targets, fields.tp_levels) {
            (Some(_), Some(_)) => {
                Err("signal carries both 'targets' and 'tp_levels'; expected one".to_string())
            }
            (Some(t), None) => Ok(TakeProfitLevels::Targets(t)),
            (None, Some(t)) => Ok(TakeProfitLevels::TpLevels(t)),
            (None, None) => Ok(TakeProfitLevels::Absent),
        }
    }
}

impl From<TakeProfitLevels> for LevelFields {
    fn from(levels: TakeProfitLevels) -> Self {
        match levels {
            TakeProfitLevels::Targets(t) => LevelFields {
                targets: Some(t),
                tp_levels: None,
            },
            TakeProfitLevels::TpLevels(t) => LevelFields {
                targets: None,
                tp_levels: Some(t),
            },
            TakeProfitLevels::Absent => LevelFields::default(),
        }
    }
}

/// A trade signal as served by the backend's signal feed.
///
/// Deserialization goes through [`SignalWire`], which accepts both the
/// dashboard's camelCase shape and the snake_case shape of the unified
/// signals router.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "SignalWire")]
pub struct TradeSignal {
    pub id: String,
    pub symbol: String,
    #[serde(rename = "type")]
    pub signal_type: SignalType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entry_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop_loss: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub take_profit: Option<f64>,
    /// Fraction in `0..=1`; whole-number percents are scaled down on read.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exchange: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strategy_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub leverage: Option<f64>,
    #[serde(flatten)]
    pub levels: TakeProfitLevels,
    /// Keys this crate does not model, kept so nothing is dropped.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Incoming signal record. Text fields tolerate `null` and numbers.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignalWire {
    #[serde(default, deserialize_with = "lenient_string")]
    id: String,
    #[serde(default, deserialize_with = "lenient_string")]
    symbol: String,
    #[serde(rename = "type", default, deserialize_with = "lenient_opt_string")]
    signal_type: Option<String>,
    #[serde(default, alias = "entry_price", alias = "price")]
    entry_price: Option<f64>,
    #[serde(default, alias = "stop_loss")]
    stop_loss: Option<f64>,
    #[serde(default, alias = "take_profit")]
    take_profit: Option<f64>,
    #[serde(default)]
    confidence: Option<f64>,
    #[serde(default, deserialize_with = "lenient_opt_string")]
    timestamp: Option<String>,
    #[serde(default, deserialize_with = "lenient_opt_string")]
    status: Option<String>,
    #[serde(default, deserialize_with = "lenient_opt_string")]
    exchange: Option<String>,
    #[serde(default, deserialize_with = "lenient_opt_string")]
    source: Option<String>,
    #[serde(default, alias = "strategy_name", deserialize_with = "lenient_opt_string")]
    strategy_name: Option<String>,
    #[serde(default)]
    leverage: Option<f64>,
    #[serde(flatten)]
    levels: TakeProfitLevels,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl From<SignalWire> for TradeSignal {
    fn from(wire: SignalWire) -> Self {
        let raw_type = wire
            .signal_type
            .filter(|t| !t.trim().is_empty())
            .or_else(|| side_from_extra(&wire.extra))
            .unwrap_or_default();

        TradeSignal {
            id: wire.id,
            symbol: wire.symbol,
            signal_type: SignalType::from(raw_type),
            entry_price: wire.entry_price,
            stop_loss: wire.stop_loss,
            take_profit: wire.take_profit,
            confidence: wire.confidence.map(|c| if c > 1.0 { c / 100.0 } else { c }),
            timestamp: wire.timestamp,
            status: wire.status,
            exchange: wire.exchange,
            source: wire.source,
            strategy_name: wire.strategy_name,
            leverage: wire.leverage,
            levels: wire.levels,
            extra: wire.extra,
        }
    }
}

/// Direction for payloads without `type`: a `side` key, else a
/// `"<SIDE> Signal"` subtitle. Both stay in `extra` untouched.
fn side_from_extra(extra: &Map<String, Value>) -> Option<String> {
    if let Some(side) = extra.get("side").and_then(Value::as_str) {
        if !side.trim().is_empty() {
            return Some(side.to_string());
        }
    }

    extra
        .get("subtitle")
        .and_then(Value::as_str)
        .and_then(|s| s.split_whitespace().next())
        .filter(|word| word.parse::<Direction>().is_ok())
        .map(str::to_string)
}

fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_opt_string(deserializer)?.unwrap_or_default())
}

fn lenient_opt_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(Value::Bool(b)) => Ok(Some(b.to_string())),
        Some(other) => Err(D::Error::custom(format!(
            "invalid type: {other}, expected a string"
        ))),
    }
}

impl TradeSignal {
    pub fn new(
        symbol: &str,
        signal_type: impl Into<SignalType>,
        levels: TakeProfitLevels,
    ) -> Self {
        Self {
            symbol: symbol.to_string(),
            signal_type: signal_type.into(),
            levels,
            ..Default::default()
        }
    }
}

impl TakeProfitCarrier for TradeSignal {
    fn signal_type(&self) -> &SignalType {
        &self.signal_type
    }

    fn take_profit_levels(&self) -> &TakeProfitLevels {
        &self.levels
    }

    fn with_take_profit_levels(&self, levels: TakeProfitLevels) -> Self {
        Self {
            levels,
            ..self.clone()
        }
    }
}
