use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Coarse date range of the task list. The backend applies it; the client only sends
/// the token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumString)]
#[derive(Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
#[strum(ascii_case_insensitive)]
pub enum DayFilter {
    #[default]
    #[strum(to_string = "Today", serialize = "D0")]
    Today,
    #[strum(
        to_string = "Next 3 Days",
        serialize = "NEXT 3",
        serialize = "next3",
        serialize = "D3"
    )]
    Next3Days,
    #[strum(to_string = "Past")]
    Past,
    #[strum(to_string = "All")]
    All,
    /// Only reachable from old screens; kept so their token still round-trips.
    #[strum(to_string = "Cancel")]
    Cancel,
}

impl DayFilter {
    /// Token the `user_task` endpoint expects in its `task_type` parameter.
    pub fn query_token(self) -> &'static str {
        match self {
            DayFilter::Today => "D0",
            DayFilter::Next3Days => "D3",
            DayFilter::Past => "PAST",
            DayFilter::All => "ALL",
            DayFilter::Cancel => "CANCEL",
        }
    }
}

impl TryFrom<String> for DayFilter {
    type Error = strum::ParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        DayFilter::from_str(value.trim())
    }
}

impl From<DayFilter> for String {
    fn from(value: DayFilter) -> Self {
        value.to_string()
    }
}

/// Client-side filter over the normalized task status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumString)]
#[derive(Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
#[strum(ascii_case_insensitive)]
pub enum StatusFilter {
    #[default]
    #[strum(to_string = "Planned")]
    Planned,
    #[strum(to_string = "Completed")]
    Completed,
    #[strum(
        to_string = "Not Planned",
        serialize = "not-planned",
        serialize = "NotPlanned"
    )]
    NotPlanned,
    #[strum(to_string = "All")]
    All,
}

impl StatusFilter {
    /// The status text a task must carry to pass, `None` for [`StatusFilter::All`].
    pub fn label(self) -> Option<&'static str> {
        match self {
            StatusFilter::Planned => Some("Planned"),
            StatusFilter::Completed => Some("Completed"),
            StatusFilter::NotPlanned => Some("Not Planned"),
            StatusFilter::All => None,
        }
    }
}

impl TryFrom<String> for StatusFilter {
    type Error = strum::ParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        StatusFilter::from_str(value.trim())
    }
}

impl From<StatusFilter> for String {
    fn from(value: StatusFilter) -> Self {
        value.to_string()
    }
}

/// How status texts are compared, both by the filter and by the completion guard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusMatch {
    #[default]
    CaseInsensitive,
    Exact,
}

impl StatusMatch {
    pub fn same(self, a: &str, b: &str) -> bool {
        match self {
            StatusMatch::CaseInsensitive => a.trim().eq_ignore_ascii_case(b.trim()),
            StatusMatch::Exact => a == b,
        }
    }
}

/// The two filters a task list is viewed through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FilterState {
    pub day: DayFilter,
    pub status: StatusFilter,
}

impl FilterState {
    pub fn new(day: DayFilter, status: StatusFilter) -> Self {
        Self { day, status }
    }
}
