use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::lenient::{flag, lenient, lenient_count, lenient_string};
use super::RecordId;

/// Envelope of the `get_user_activity` endpoint.
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityList {
    #[serde(default, deserialize_with = "lenient")]
    pub a_list: Option<Vec<RawActivity>>,
}

impl ActivityList {
    pub fn into_activities(self) -> Vec<RawActivity> {
        self.a_list.unwrap_or_default()
    }
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawActivity {
    #[serde(default, deserialize_with = "lenient")]
    pub activity_id: Option<RecordId>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub activity_name: Option<String>,
    /// Project / order reference the activity belongs to.
    #[serde(default, deserialize_with = "lenient_string")]
    pub ref_num: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub sale_order_no: Option<String>,
    /// "01" planned, "02" in progress, "03" completed, "04" on hold,
    /// "09" not allocated, "99" not required.
    #[serde(default, deserialize_with = "lenient_string")]
    pub activity_status: Option<String>,
    /// `DD-Mon-YYYY`, e.g. `01-Jan-2020`.
    #[serde(default, deserialize_with = "lenient_string")]
    pub due_date: Option<String>,
    #[serde(default, deserialize_with = "flag")]
    pub is_over_due: bool,
    #[serde(default, deserialize_with = "lenient_count")]
    pub no_hold: Option<i64>,
    #[serde(default, deserialize_with = "lenient_count")]
    pub no_pending: Option<i64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn deserializes_activity_envelope() {
        let list: ActivityList = serde_json::from_value(json!({
            "a_list": [
                {
                    "activity_id": 41,
                    "ref_num": "PRJ-9",
                    "activity_status": "02",
                    "due_date": "01-Jan-2020",
                    "is_over_due": false,
                    "no_hold": 0,
                    "no_pending": 2
                },
                { "activity_id": 42, "is_over_due": "Y", "no_pending": "3" }
            ]
        }))
        .unwrap();

        let activities = list.into_activities();
        assert_eq!(activities.len(), 2);
        assert_eq!(activities[0].activity_status.as_deref(), Some("02"));
        assert!(!activities[0].is_over_due);
        assert_eq!(activities[0].no_hold, Some(0));
        assert!(activities[1].is_over_due);
        assert_eq!(activities[1].no_pending, None);
    }

    #[test]
    fn missing_list_is_empty() {
        let list: ActivityList = serde_json::from_value(json!({})).unwrap();
        assert!(list.into_activities().is_empty());
    }
}
