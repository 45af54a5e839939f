//! Per-request view of the authenticated caller.
//!
//! An [`IdentityContext`] is built once per request by the transport boundary
//! and handed to handlers by reference. It is deliberately neither `Clone`
//! nor stored anywhere global, so no handler can keep it past the request
//! that produced it.
//!
//! Handlers that act on "my" data must read [`IdentityContext::current_user_id`]
//! instead of trusting an identifier supplied by the client.

use std::collections::BTreeSet;

use crate::domain::{Error, UserId};

/// Well-known role names issued by the authentication layer.
pub mod roles {
    /// School administrators.
    pub const ADMIN: &str = "Admin";
    /// Teaching staff.
    pub const TEACHER: &str = "Teacher";
    /// Enrolled students.
    pub const STUDENT: &str = "Student";
    /// Parents and guardians.
    pub const PARENT: &str = "Parent";
}

/// Authenticated principal attached to a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    user_id: UserId,
    roles: BTreeSet<String>,
}

impl Principal {
    /// Build a principal from its user id and role names.
    ///
    /// Blank role names are discarded.
    pub fn new<R, S>(user_id: UserId, roles: R) -> Self
    where
        R: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let roles = roles
            .into_iter()
            .map(Into::into)
            .filter(|role: &String| !role.trim().is_empty())
            .collect();
        Self { user_id, roles }
    }

    /// Identifier of the authenticated account.
    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    /// Role names held by the principal, in sorted order.
    pub fn roles(&self) -> impl Iterator<Item = &str> {
        self.roles.iter().map(String::as_str)
    }
}

/// Read-only projection of the caller for a single request.
///
/// # Examples
/// ```
/// use school_backend::domain::identity::{roles, IdentityContext, Principal};
/// use school_backend::domain::UserId;
///
/// let anonymous = IdentityContext::anonymous();
/// assert!(anonymous.current_user_id().is_none());
/// assert!(!anonymous.has_role(roles::ADMIN));
///
/// let teacher =
///     IdentityContext::from_principal(Principal::new(UserId::random(), [roles::TEACHER]));
/// assert!(teacher.has_role(roles::TEACHER));
/// ```
#[derive(Debug, Default)]
pub struct IdentityContext {
    principal: Option<Principal>,
}

impl IdentityContext {
    /// Context for a request with no authenticated principal.
    pub fn anonymous() -> Self {
        Self { principal: None }
    }

    /// Context for an authenticated principal.
    pub fn from_principal(principal: Principal) -> Self {
        Self {
            principal: Some(principal),
        }
    }

    /// Shorthand for [`Self::from_principal`].
    pub fn authenticated<R, S>(user_id: UserId, roles: R) -> Self
    where
        R: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::from_principal(Principal::new(user_id, roles))
    }

    /// Identifier of the calling account, if authenticated.
    pub fn current_user_id(&self) -> Option<&UserId> {
        self.principal.as_ref().map(Principal::user_id)
    }

    /// Whether the caller holds `role`.
    ///
    /// Always `false` for anonymous callers; never fails.
    pub fn has_role(&self, role: &str) -> bool {
        self.principal
            .as_ref()
            .is_some_and(|principal| principal.roles.contains(role))
    }

    /// Whether the caller holds at least one of `roles`.
    pub fn has_any_role(&self, roles: &[&str]) -> bool {
        roles.iter().any(|role| self.has_role(role))
    }

    /// Whether a principal is attached.
    pub fn is_authenticated(&self) -> bool {
        self.principal.is_some()
    }

    /// Attached principal, if any.
    pub fn principal(&self) -> Option<&Principal> {
        self.principal.as_ref()
    }

    /// The caller's user id or an `unauthorized` error.
    pub fn require_user_id(&self) -> Result<&UserId, Error> {
        self.current_user_id()
            .ok_or_else(|| Error::unauthorized("login required"))
    }
}
