//! Login credentials accepted by the authentication port.
//!
//! Inbound adapters build [`LoginCredentials`] from raw payload strings so the
//! login port only ever sees trimmed, non-empty values.

use zeroize::Zeroizing;

/// Reasons a login payload is rejected before reaching the login port.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoginValidationError {
    /// Username was missing or blank once trimmed.
    #[error("username must not be empty")]
    EmptyUsername,
    /// Password was blank.
    #[error("password must not be empty")]
    EmptyPassword,
}

/// Validated login credentials.
///
/// ## Invariants
/// - `username` is trimmed, lower-cased and non-empty.
/// - `password` is non-empty and keeps caller-provided whitespace. It is
///   wiped from memory when dropped.
///
/// # Examples
/// ```
/// use school_backend::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts(" Head.Teacher ", "s3cret").expect("valid");
/// assert_eq!(creds.username(), "head.teacher");
/// assert!(creds.password_matches("s3cret"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    username: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw username/password inputs.
    pub fn try_from_parts(username: &str, password: &str) -> Result<Self, LoginValidationError> {
        let normalized = username.trim();
        if normalized.is_empty() {
            return Err(LoginValidationError::EmptyUsername);
        }
        if password.is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }

        Ok(Self {
            username: normalized.to_lowercase(),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Normalised username used for account lookups.
    pub fn username(&self) -> &str {
        self.username.as_str()
    }

    /// Password string provided by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }

    /// Compare the supplied password with `expected` without short-circuiting
    /// on the first differing byte.
    pub fn password_matches(&self, expected: &str) -> bool {
        let supplied = self.password.as_bytes();
        let expected = expected.as_bytes();
        if supplied.len() != expected.len() {
            return false;
        }
        supplied
            .iter()
            .zip(expected)
            .fold(0_u8, |diff, (a, b)| diff | (a ^ b))
            == 0
    }
}
