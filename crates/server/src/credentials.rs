//! Credential checks for Basic authentication.

/// Decides whether a username/password pair may use the API.
pub trait CredentialVerifier: Send + Sync {
    fn verify(&self, username: &str, password: &str) -> bool;
}

/// Accepts exactly one username/password pair.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StaticCredentials {
    username: String,
    password: String,
}

impl StaticCredentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl Default for StaticCredentials {
    fn default() -> Self {
        Self::new("admin", "password123")
    }
}

impl CredentialVerifier for StaticCredentials {
    fn verify(&self, username: &str, password: &str) -> bool {
        username == self.username && password == self.password
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_pair_is_accepted() {
        assert!(StaticCredentials::default().verify("admin", "password123"));
    }

    #[test]
    fn anything_else_is_rejected() {
        let verifier = StaticCredentials::default();
        assert!(!verifier.verify("admin", "password"));
        assert!(!verifier.verify("Admin", "password123"));
        assert!(!verifier.verify("", ""));
        assert!(!verifier.verify("admin", "password123 "));
    }
}
