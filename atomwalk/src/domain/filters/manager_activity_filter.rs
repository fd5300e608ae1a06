use super::{push_non_empty, AtomwalkQuery};

/// Switches `get_user_activity` to the manager's view of the team's activities.
pub struct ManagerActivityFilter {
    call_mode: String,
}

impl ManagerActivityFilter {
    pub fn new(call_mode: impl Into<String>) -> Self {
        Self {
            call_mode: call_mode.into(),
        }
    }
}

impl AtomwalkQuery for ManagerActivityFilter {
    fn as_query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        push_non_empty(&mut pairs, "call_mode", Some(self.call_mode.as_str()));
        pairs
    }
}
