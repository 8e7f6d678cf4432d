use std::fmt::Display;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate};
use derive_more::{From, Into};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};
use strum::IntoStaticStr;

use crate::{predeploys, Address, Bytes, Hash, U256};

/// Withdrawal record exactly as the ingestion pipeline produced it.
pub type Document = Map<String, Value>;

/// Record creation time in epoch milliseconds. Only used to order search results.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, From, Into)]
pub struct Timestamp(pub u64);

impl Timestamp {
    fn from_value(value: Option<&Value>) -> Self {
        let parsed = match value {
            Some(Value::Number(n)) => n.as_u64().or_else(|| n.as_f64().map(|f| f.max(0.0) as u64)),
            Some(Value::String(s)) => {
                let s = s.trim();
                s.parse().ok().or_else(|| Self::parse_date(s))
            }
            _ => None,
        };
        Self(parsed.unwrap_or_default())
    }

    /// RFC 3339 date-time, or a bare date taken as UTC midnight.
    fn parse_date(s: &str) -> Option<u64> {
        let millis = match DateTime::parse_from_rfc3339(s) {
            Ok(datetime) => datetime.timestamp_millis(),
            Err(_) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .ok()?
                .and_hms_opt(0, 0, 0)?
                .and_utc()
                .timestamp_millis(),
        };
        u64::try_from(millis).ok()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ShapeError {
    #[error("only one of `l1Token` and `l2Token` is set")]
    LoneTokenField,
    #[error("missing field `{0}`")]
    MissingField(&'static str),
    #[error("invalid field `{field}`: {reason}")]
    InvalidField { field: &'static str, reason: String },
}

/// Address-bearing fields of a record, as far as they parse.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Parties {
    pub from: Option<Address>,
    pub to: Option<Address>,
    pub sender: Option<Address>,
    pub target: Option<Address>,
    /// Lowercased text of set fields that are not addresses.
    pub unparsed: Vec<String>,
}

impl Parties {
    pub fn contains(&self, address: &Address) -> bool {
        [self.from, self.to, self.sender, self.target]
            .iter()
            .flatten()
            .any(|party| party == address)
    }

    /// Case-insensitive match of `query` against the fields that did not parse.
    pub fn contains_text(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        self.unparsed.iter().any(|party| *party == query)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TokenTransfer {
    pub l1_token: Address,
    pub l2_token: Address,
    pub from: Address,
    pub to: Address,
    pub amount: U256,
    pub extra_data: Bytes,
    pub message_nonce: U256,
}

impl TokenTransfer {
    /// ETH leaves L2 as the zero L1 token paired with the WETH predeploy.
    pub fn is_native(&self) -> bool {
        self.l1_token == Address::ZERO && self.l2_token == predeploys::WETH
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GenericMessage {
    pub sender: Address,
    pub target: Address,
    pub message: Bytes,
    pub message_nonce: U256,
}

/// Shape of a withdrawal, decided once when the record is ingested.
#[derive(Clone, Debug, PartialEq, Eq, IntoStaticStr)]
pub enum WithdrawalKind {
    TokenTransfer(TokenTransfer),
    GenericMessage(GenericMessage),
    /// Fits neither shape. Still listed and searchable, but can't be proven.
    Unsupported(ShapeError),
}

impl WithdrawalKind {
    fn classify(fields: Fields<'_>) -> Self {
        let kind = match (fields.get("l1Token"), fields.get("l2Token")) {
            (Some(l1_token), Some(l2_token)) => Self::token_transfer(fields, l1_token, l2_token),
            (None, None) => Self::generic_message(fields),
            _ => Err(ShapeError::LoneTokenField),
        };
        kind.unwrap_or_else(Self::Unsupported)
    }

    fn token_transfer(
        fields: Fields<'_>,
        l1_token: &Value,
        l2_token: &Value,
    ) -> Result<Self, ShapeError> {
        Ok(Self::TokenTransfer(TokenTransfer {
            l1_token: parse("l1Token", l1_token)?,
            l2_token: parse("l2Token", l2_token)?,
            from: fields.either("from", "sender")?,
            to: fields.either("to", "target")?,
            amount: parse("amount", fields.required("amount")?)?,
            extra_data: fields
                .get("extraData")
                .map(|value| parse("extraData", value))
                .transpose()?
                .unwrap_or_default(),
            message_nonce: parse("messageNonce", fields.required("messageNonce")?)?,
        }))
    }

    fn generic_message(fields: Fields<'_>) -> Result<Self, ShapeError> {
        Ok(Self::GenericMessage(GenericMessage {
            sender: fields.either("sender", "from")?,
            target: fields.either("target", "to")?,
            message: parse("message", fields.required("message")?)?,
            message_nonce: parse("messageNonce", fields.required("messageNonce")?)?,
        }))
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WithdrawalRecord {
    pub hash: Hash,
    pub timestamp: Timestamp,
    pub parties: Parties,
    pub kind: WithdrawalKind,
    /// Source fields, echoed back to API clients untouched.
    pub document: Document,
}

impl WithdrawalRecord {
    pub fn new(hash: Hash, document: Document) -> Self {
        let fields = Fields(&document);
        let mut parties = Parties::default();
        for (field, slot) in [
            ("from", &mut parties.from),
            ("to", &mut parties.to),
            ("sender", &mut parties.sender),
            ("target", &mut parties.target),
        ] {
            let Some(value) = fields.get(field) else {
                continue;
            };
            match parse(field, value) {
                Ok(address) => *slot = Some(address),
                Err(_) => parties.unparsed.push(match value {
                    Value::String(s) => s.trim().to_lowercase(),
                    other => other.to_string().to_lowercase(),
                }),
            }
        }
        let timestamp = Timestamp::from_value(fields.get("timestamp"));
        let kind = WithdrawalKind::classify(fields);

        Self {
            hash,
            timestamp,
            parties,
            kind,
            document,
        }
    }
}

impl Serialize for WithdrawalRecord {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.document.len() + 1))?;
        map.serialize_entry("hash", &self.hash)?;
        for (key, value) in self.document.iter().filter(|(key, _)| *key != "hash") {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

#[derive(Clone, Copy)]
struct Fields<'a>(&'a Document);

impl<'a> Fields<'a> {
    /// Absent, `null` and empty strings all count as unset.
    fn get(self, field: &str) -> Option<&'a Value> {
        self.0.get(field).filter(|value| match value {
            Value::Null => false,
            Value::String(s) => !s.is_empty(),
            _ => true,
        })
    }

    fn required(self, field: &'static str) -> Result<&'a Value, ShapeError> {
        self.get(field).ok_or(ShapeError::MissingField(field))
    }

    fn either<T>(self, field: &'static str, alias: &'static str) -> Result<T, ShapeError>
    where
        T: FromStr,
        T::Err: Display,
    {
        match (self.get(field), self.get(alias)) {
            (Some(value), _) => parse(field, value),
            (None, Some(value)) => parse(alias, value),
            (None, None) => Err(ShapeError::MissingField(field)),
        }
    }
}

fn parse<T>(field: &'static str, value: &Value) -> Result<T, ShapeError>
where
    T: FromStr,
    T::Err: Display,
{
    let invalid = |reason: String| ShapeError::InvalidField { field, reason };
    match value {
        Value::String(s) => s.trim().parse().map_err(|err: T::Err| invalid(err.to_string())),
        Value::Number(n) => n
            .to_string()
            .parse()
            .map_err(|err: T::Err| invalid(err.to_string())),
        other => Err(invalid(format!("unexpected value {other}"))),
    }
}
