use super::{push_non_empty, AtomwalkQuery};

pub struct EmployeeFilter {
    emp_id: Option<String>,
}

impl EmployeeFilter {
    pub fn new(emp_id: Option<String>) -> Self {
        Self { emp_id }
    }
}

impl AtomwalkQuery for EmployeeFilter {
    fn as_query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        push_non_empty(&mut pairs, "emp_id", self.emp_id.as_deref());
        pairs
    }
}
