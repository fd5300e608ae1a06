use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::lenient::{lenient, lenient_string};
use super::RecordId;

/// One entry of `get_employee_list`, filtered by `emp_id` to the signed-in employee.
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileInfo {
    #[serde(default, deserialize_with = "lenient")]
    pub id: Option<RecordId>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub emp_id: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub email_id: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub image: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyInfo {
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub image: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
