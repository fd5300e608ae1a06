use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use atomwalk::{RawActivity, RecordId};

/// Status label shown on an activity card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize)]
pub enum ActivityStatus {
    #[strum(to_string = "PLANNED")]
    #[serde(rename = "PLANNED")]
    Planned,
    #[strum(to_string = "IN PROGRESS")]
    #[serde(rename = "IN PROGRESS")]
    InProgress,
    #[strum(to_string = "COMPLETED")]
    #[serde(rename = "COMPLETED")]
    Completed,
    #[strum(to_string = "ON HOLD")]
    #[serde(rename = "ON HOLD")]
    OnHold,
    #[strum(to_string = "NOT ALLOCATED")]
    #[serde(rename = "NOT ALLOCATED")]
    NotAllocated,
    #[strum(to_string = "NOT REQUIRED")]
    #[serde(rename = "NOT REQUIRED")]
    NotRequired,
    #[strum(to_string = "OVER-DUE")]
    #[serde(rename = "OVER-DUE")]
    OverDue,
    #[strum(to_string = "UNKNOWN")]
    #[serde(rename = "UNKNOWN")]
    Unknown,
}

impl ActivityStatus {
    pub fn from_code(code: Option<&str>) -> Self {
        match code.map(str::trim) {
            Some("01") => ActivityStatus::Planned,
            Some("02") => ActivityStatus::InProgress,
            Some("03") => ActivityStatus::Completed,
            Some("04") => ActivityStatus::OnHold,
            Some("09") => ActivityStatus::NotAllocated,
            Some("99") => ActivityStatus::NotRequired,
            _ => ActivityStatus::Unknown,
        }
    }
}

/// An activity with its display status resolved against a given day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedActivity {
    pub activity_id: Option<RecordId>,
    pub activity_name: Option<String>,
    pub ref_num: Option<String>,
    pub sale_order_no: Option<String>,
    /// Raw status code as sent by the backend.
    pub status_code: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub status: ActivityStatus,
    pub no_hold: Option<i64>,
    pub no_pending: Option<i64>,
    pub original: RawActivity,
}

impl NormalizedActivity {
    /// Card heading: the sale order number if there is one, the reference otherwise.
    pub fn heading(&self) -> &str {
        self.sale_order_no
            .as_deref()
            .filter(|s| !s.is_empty())
            .or(self.ref_num.as_deref())
            .unwrap_or("")
    }

    /// Due date as the backend sent it, "N/A" when missing.
    pub fn due_date_label(&self) -> &str {
        self.original
            .due_date
            .as_deref()
            .filter(|s| !s.is_empty())
            .unwrap_or(super::NO_DATE)
    }

    /// Completion, QC and inventory updates are only offered for in-progress work that
    /// has not been resolved as completed.
    pub fn accepts_updates(&self) -> bool {
        self.status != ActivityStatus::Completed && self.status_code.as_deref() == Some("02")
    }
}

/// Which slice of the activity list a screen shows.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString, Serialize, Deserialize,
)]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "snake_case")]
pub enum ActivityView {
    #[default]
    #[strum(to_string = "All")]
    All,
    #[strum(to_string = "Pending")]
    Pending,
    #[strum(to_string = "OverDue", serialize = "over-due", serialize = "overdue")]
    OverDue,
    #[strum(to_string = "Completed")]
    Completed,
}

impl ActivityView {
    pub fn title(self) -> &'static str {
        match self {
            ActivityView::All => "My Activities",
            ActivityView::Pending => "Pending Activities",
            ActivityView::OverDue => "OverDue Activities",
            ActivityView::Completed => "Completed Activities",
        }
    }

    pub fn includes(self, activity: &NormalizedActivity) -> bool {
        match self {
            ActivityView::All => true,
            // A missing counter is not zero.
            ActivityView::Pending => {
                activity.status != ActivityStatus::Completed && activity.no_pending != Some(0)
            }
            ActivityView::OverDue => activity.status == ActivityStatus::OverDue,
            ActivityView::Completed => activity.status == ActivityStatus::Completed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes() {
        assert_eq!(ActivityStatus::from_code(Some("01")), ActivityStatus::Planned);
        assert_eq!(ActivityStatus::from_code(Some("02")), ActivityStatus::InProgress);
        assert_eq!(ActivityStatus::from_code(Some("03")), ActivityStatus::Completed);
        assert_eq!(ActivityStatus::from_code(Some("04")), ActivityStatus::OnHold);
        assert_eq!(ActivityStatus::from_code(Some("09")), ActivityStatus::NotAllocated);
        assert_eq!(ActivityStatus::from_code(Some("99")), ActivityStatus::NotRequired);
        assert_eq!(ActivityStatus::from_code(Some("05")), ActivityStatus::Unknown);
        assert_eq!(ActivityStatus::from_code(None), ActivityStatus::Unknown);
        assert_eq!(ActivityStatus::OverDue.to_string(), "OVER-DUE");
        assert_eq!(ActivityStatus::InProgress.to_string(), "IN PROGRESS");
    }

    #[test]
    fn view_parses_screen_tokens() {
        assert_eq!("PENDING".parse::<ActivityView>().unwrap(), ActivityView::Pending);
        assert_eq!("OverDue".parse::<ActivityView>().unwrap(), ActivityView::OverDue);
        assert_eq!("over-due".parse::<ActivityView>().unwrap(), ActivityView::OverDue);
        assert_eq!("Completed".parse::<ActivityView>().unwrap(), ActivityView::Completed);
    }
}
