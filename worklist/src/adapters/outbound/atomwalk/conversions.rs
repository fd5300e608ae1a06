use atomwalk::{AtomwalkFetchError, TaskUpdateData, TaskUpdateRequest, UserTaskFilter, YesNo};

use crate::domain::{ports::outbound::TaskQuery, WorklistError};

/// Convert a domain TaskQuery to the `user_task` query parameters.
pub fn to_user_task_filter(query: &TaskQuery) -> UserTaskFilter {
    UserTaskFilter::new(query.day.query_token())
        .with_customer_id(query.customer_id.clone())
        .with_emp_id(query.emp_id.clone())
        .with_lead_id(query.lead_id.clone())
}

pub fn to_update_request(
    task_data: &TaskUpdateData,
    is_completed: YesNo,
    assign_user: YesNo,
) -> TaskUpdateRequest {
    TaskUpdateRequest::new(task_data.clone(), is_completed, assign_user)
}

pub fn map_atomwalk_error(e: AtomwalkFetchError) -> WorklistError {
    match e {
        AtomwalkFetchError::Unauthorized => WorklistError::Unauthorized,
        AtomwalkFetchError::ResponseError(msg) => WorklistError::network(msg),
        AtomwalkFetchError::ParsingError(msg) => WorklistError::unknown(msg),
        AtomwalkFetchError::Other(msg) => WorklistError::unknown(msg),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::DayFilter;
    use atomwalk::AtomwalkQuery;

    #[test]
    fn query_maps_day_to_token() {
        let query = TaskQuery {
            day: DayFilter::Next3Days,
            emp_id: Some("EMP-4".to_string()),
            lead_id: Some(String::new()),
            ..TaskQuery::default()
        };
        let filter = to_user_task_filter(&query);
        assert_eq!(filter.task_type(), "D3");
        assert_eq!(
            filter.as_query_pairs(),
            vec![("task_type", "D3".to_string()), ("emp_id", "EMP-4".to_string())]
        );
    }

    #[test]
    fn transport_errors_are_retryable() {
        assert!(map_atomwalk_error(AtomwalkFetchError::ResponseError("timeout".into()))
            .is_retryable());
        assert!(matches!(
            map_atomwalk_error(AtomwalkFetchError::Unauthorized),
            WorklistError::Unauthorized
        ));
    }
}
