use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::RecordId;

/// `"Y"` / `"N"` flag as the update endpoint expects it.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
pub enum YesNo {
    #[serde(rename = "Y")]
    Yes,
    #[default]
    #[serde(rename = "N")]
    No,
}

impl fmt::Display for YesNo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            YesNo::Yes => write!(f, "Y"),
            YesNo::No => write!(f, "N"),
        }
    }
}

/// The `task_data` object of an update request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskUpdateData {
    /// Id of the currently assigned user in its wire form. Sent as `""` when unassigned.
    #[serde(
        default,
        serialize_with = "unassigned_as_empty",
        deserialize_with = "blank_as_unassigned"
    )]
    pub curr_user: Option<RecordId>,
    pub id: RecordId,
    pub name: String,
    pub remarks: String,
    pub start_time: Option<String>,
    /// `DD-MM-YYYY`
    pub task_date: String,
    pub task_type: String,
}

fn unassigned_as_empty<S>(user: &Option<RecordId>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match user {
        Some(id) => id.serialize(serializer),
        None => serializer.serialize_str(""),
    }
}

fn blank_as_unassigned<'de, D>(deserializer: D) -> Result<Option<RecordId>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<RecordId>::deserialize(deserializer)?.and_then(RecordId::non_empty))
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskUpdateRequest {
    pub task_data: TaskUpdateData,
    pub is_completed: YesNo,
    pub assign_user: YesNo,
}

impl TaskUpdateRequest {
    pub fn new(task_data: TaskUpdateData, is_completed: YesNo, assign_user: YesNo) -> Self {
        Self {
            task_data,
            is_completed,
            assign_user,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn serializes_update_request() {
        let request = TaskUpdateRequest::new(
            TaskUpdateData {
                curr_user: Some(RecordId::Number(12)),
                id: RecordId::Number(7),
                name: "Fix pump".to_string(),
                remarks: String::new(),
                start_time: None,
                task_date: "19-10-2026".to_string(),
                task_type: "GENERAL".to_string(),
            },
            YesNo::Yes,
            YesNo::No,
        );

        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "task_data": {
                    "curr_user": 12,
                    "id": 7,
                    "name": "Fix pump",
                    "remarks": "",
                    "start_time": null,
                    "task_date": "19-10-2026",
                    "task_type": "GENERAL"
                },
                "is_completed": "Y",
                "assign_user": "N"
            })
        );
    }

    #[test]
    fn unassigned_user_is_sent_as_empty_string() {
        let data = TaskUpdateData {
            curr_user: None,
            id: RecordId::from("T-1"),
            name: "Fix pump".to_string(),
            remarks: String::new(),
            start_time: None,
            task_date: "19-10-2026".to_string(),
            task_type: "GENERAL".to_string(),
        };

        let value = serde_json::to_value(&data).unwrap();
        assert_eq!(value["curr_user"], json!(""));

        let back: TaskUpdateData = serde_json::from_value(value).unwrap();
        assert_eq!(back.curr_user, None);
    }
}
