use super::{push_non_empty, AtomwalkQuery};

/// Parameters of the `user_task` endpoint.
///
/// `task_type` is the day-range token (`D0`, `D3`, `PAST`, `ALL`, `CANCEL`); the backend
/// does the date scoping.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserTaskFilter {
    task_type: String,
    customer_id: Option<String>,
    emp_id: Option<String>,
    lead_id: Option<String>,
}

impl UserTaskFilter {
    pub fn new(task_type: impl Into<String>) -> Self {
        Self {
            task_type: task_type.into(),
            ..Self::default()
        }
    }

    pub fn with_customer_id(mut self, customer_id: Option<String>) -> Self {
        self.customer_id = customer_id;
        self
    }

    pub fn with_emp_id(mut self, emp_id: Option<String>) -> Self {
        self.emp_id = emp_id;
        self
    }

    pub fn with_lead_id(mut self, lead_id: Option<String>) -> Self {
        self.lead_id = lead_id;
        self
    }

    pub fn task_type(&self) -> &str {
        &self.task_type
    }
}

impl AtomwalkQuery for UserTaskFilter {
    fn as_query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::with_capacity(4);
        push_non_empty(&mut pairs, "task_type", Some(self.task_type.as_str()));
        push_non_empty(&mut pairs, "customer_id", self.customer_id.as_deref());
        push_non_empty(&mut pairs, "emp_id", self.emp_id.as_deref());
        push_non_empty(&mut pairs, "lead_id", self.lead_id.as_deref());
        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_set_params_are_sent() {
        let filter = UserTaskFilter::new("PAST")
            .with_customer_id(Some(String::new()))
            .with_emp_id(Some("EMP-001".to_string()))
            .with_lead_id(None);

        assert_eq!(
            filter.as_query_pairs(),
            vec![("task_type", "PAST".to_string()), ("emp_id", "EMP-001".to_string())]
        );
    }
}
