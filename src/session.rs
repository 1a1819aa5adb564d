use tracing::info;

/// Capabilities decided once at login and handed to every screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Session {
    admin: bool,
}

impl Session {
    /// Case-sensitive comparison against the configured admin password.
    pub fn login(password: &str, admin_password: &str) -> Self {
        let session = Self { admin: password == admin_password };
        info!(admin = session.admin, "session started");
        session
    }

    pub fn browse_only() -> Self {
        Self { admin: false }
    }

    pub fn admin() -> Self {
        Self { admin: true }
    }

    pub fn is_admin(&self) -> bool {
        self.admin
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matching_password_grants_admin() {
        assert!(Session::login("admin", "admin").is_admin());
    }

    #[test]
    fn other_passwords_browse_only() {
        assert!(!Session::login("", "admin").is_admin());
        assert!(!Session::login("Admin", "admin").is_admin());
        assert!(!Session::login("admin ", "admin").is_admin());
    }

    #[test]
    fn default_session_is_not_admin() {
        assert_eq!(Session::default(), Session::browse_only());
    }
}
