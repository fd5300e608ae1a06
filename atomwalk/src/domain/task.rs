use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::lenient::{lenient, lenient_string};

/// A record identifier as the backend sends it: usually a number, sometimes a string.
///
/// Serializes back in the same form, so an id read from a task can be echoed in an
/// update request unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Number(i64),
    /// Floats and integers beyond `i64`, kept as sent.
    Decimal(serde_json::Number),
    Text(String),
}

impl RecordId {
    /// `None` for blank text ids, which the backend uses interchangeably with a missing id.
    pub fn non_empty(self) -> Option<Self> {
        match &self {
            RecordId::Text(s) if s.trim().is_empty() => None,
            _ => Some(self),
        }
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordId::Number(n) => write!(f, "{}", n),
            RecordId::Decimal(n) => write_decimal(f, n),
            RecordId::Text(s) => write!(f, "{}", s),
        }
    }
}

/// Whole floats inside the exactly-representable range print without a fraction.
fn write_decimal(f: &mut fmt::Formatter<'_>, n: &serde_json::Number) -> fmt::Result {
    const MAX_SAFE: f64 = 9_007_199_254_740_992.0;
    if let Some(u) = n.as_u64() {
        return write!(f, "{}", u);
    }
    match n.as_f64() {
        Some(x) if x.fract() == 0.0 && x.abs() <= MAX_SAFE => write!(f, "{}", x as i64),
        _ => write!(f, "{}", n),
    }
}

impl From<i64> for RecordId {
    fn from(id: i64) -> Self {
        RecordId::Number(id)
    }
}

impl From<&str> for RecordId {
    fn from(id: &str) -> Self {
        RecordId::Text(id.to_string())
    }
}

/// A user reference embedded in a task (`curr_user`, `owner`).
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawUser {
    #[serde(default, deserialize_with = "lenient")]
    pub id: Option<RecordId>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub user_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub user_nick_name: Option<String>,
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawCustomer {
    #[serde(default, deserialize_with = "lenient")]
    pub id: Option<RecordId>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: Option<String>,
}

// Raw types, these are the types that are returned from the user_task endpoint
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawTask {
    #[serde(default, deserialize_with = "lenient")]
    pub id: Option<RecordId>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub remarks: Option<String>,
    /// `DD-MM-YYYY`
    #[serde(default, deserialize_with = "lenient_string")]
    pub task_date: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub start_time: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub end_time: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub task_status: Option<String>,
    /// "01" high, "02" medium, anything else low.
    #[serde(default, deserialize_with = "lenient_string")]
    pub priority: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub task_type: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub task_type_display: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub customer: Option<RawCustomer>,
    #[serde(default, deserialize_with = "lenient")]
    pub curr_user: Option<RawUser>,
    #[serde(default, deserialize_with = "lenient")]
    pub owner: Option<RawUser>,
    /// Fields this client does not interpret, kept so the record can be inspected as sent.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
