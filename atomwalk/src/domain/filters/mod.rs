mod employee_filter;
mod manager_activity_filter;
mod user_task_filter;

pub use employee_filter::EmployeeFilter;
pub use manager_activity_filter::ManagerActivityFilter;
pub use user_task_filter::UserTaskFilter;

/// Query parameters of a GET endpoint. Parameters with empty values are left out.
pub trait AtomwalkQuery {
    fn as_query_pairs(&self) -> Vec<(&'static str, String)>;
}

pub(crate) fn push_non_empty(
    pairs: &mut Vec<(&'static str, String)>,
    key: &'static str,
    value: Option<&str>,
) {
    if let Some(value) = value.map(str::trim).filter(|v| !v.is_empty()) {
        pairs.push((key, value.to_string()));
    }
}
