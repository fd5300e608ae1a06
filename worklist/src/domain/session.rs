use std::fmt;

/// The signed-in employee, as left behind by the login flow.
///
/// Read-only: the core never writes it back. It is passed explicitly to whatever builds
/// requests instead of being looked up from storage.
#[derive(Clone, Default)]
pub struct SessionContext {
    /// Tenant database the employee belongs to.
    pub db_name: String,
    pub token: String,
    pub emp_id: Option<String>,
    pub pin: Option<String>,
    pub biometric_enabled: bool,
}

impl SessionContext {
    pub fn new(db_name: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            db_name: db_name.into(),
            token: token.into(),
            ..Self::default()
        }
    }

    pub fn with_emp_id(mut self, emp_id: impl Into<String>) -> Self {
        self.emp_id = Some(emp_id.into());
        self
    }

    pub fn with_pin(mut self, pin: impl Into<String>) -> Self {
        self.pin = Some(pin.into());
        self
    }

    pub fn with_biometric(mut self, enabled: bool) -> Self {
        self.biometric_enabled = enabled;
        self
    }

    /// Employee id with blanks treated as absent.
    pub fn emp_id(&self) -> Option<&str> {
        self.emp_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
    }

    pub fn has_pin(&self) -> bool {
        self.pin.as_deref().is_some_and(|pin| !pin.is_empty())
    }
}

impl fmt::Debug for SessionContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionContext")
            .field("db_name", &self.db_name)
            .field("token", &"<redacted>")
            .field("emp_id", &self.emp_id)
            .field("pin", &self.pin.as_ref().map(|_| "<redacted>"))
            .field("biometric_enabled", &self.biometric_enabled)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_emp_id_is_absent() {
        let session = SessionContext::new("ACME", "t").with_emp_id("  ");
        assert_eq!(session.emp_id(), None);
    }

    #[test]
    fn debug_redacts_secrets() {
        let session = SessionContext::new("ACME", "secret-token").with_pin("1234");
        let printed = format!("{:?}", session);
        assert!(!printed.contains("secret-token"));
        assert!(!printed.contains("1234"));
        assert!(printed.contains("ACME"));
    }
}
