//! Command and query message model.
//!
//! Every business operation is an [`Intent`]: an immutable value that names
//! its result type, whether it mutates state, and who may invoke it. The
//! dispatcher routes intents by their exact Rust type, so the result type is
//! fixed at compile time.

use std::fmt;

use crate::domain::Error;
use crate::domain::identity::IdentityContext;

/// Whether an intent mutates state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IntentKind {
    /// Mutates state.
    Command,
    /// Reads state.
    Query,
}

impl fmt::Display for IntentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Command => f.write_str("command"),
            Self::Query => f.write_str("query"),
        }
    }
}

/// Authorisation requirement declared by an intent type.
///
/// The transport boundary evaluates this before dispatch; the dispatcher
/// itself never authorises.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// Anyone may invoke the intent.
    Anonymous,
    /// Any authenticated caller may invoke the intent.
    Authenticated,
    /// The caller must hold at least one of the listed roles.
    AnyRole(&'static [&'static str]),
}

impl Access {
    /// Check `identity` against this requirement.
    ///
    /// Unauthenticated callers get `unauthorized`; authenticated callers
    /// without a required role get `forbidden`.
    ///
    /// # Examples
    /// ```
    /// use school_backend::domain::identity::{roles, IdentityContext};
    /// use school_backend::domain::intent::Access;
    /// use school_backend::domain::{ErrorCode, UserId};
    ///
    /// let access = Access::AnyRole(&[roles::ADMIN]);
    /// let teacher = IdentityContext::authenticated(UserId::random(), [roles::TEACHER]);
    /// let error = access.check(&teacher).expect_err("teachers are not admins");
    /// assert_eq!(error.code(), ErrorCode::Forbidden);
    /// ```
    pub fn check(&self, identity: &IdentityContext) -> Result<(), Error> {
        match self {
            Self::Anonymous => Ok(()),
            _ if !identity.is_authenticated() => Err(Error::unauthorized("login required")),
            Self::Authenticated => Ok(()),
            Self::AnyRole(required) if identity.has_any_role(required) => Ok(()),
            Self::AnyRole(required) => Err(Error::forbidden(format!(
                "requires one of the roles: {}",
                required.join(", ")
            ))),
        }
    }
}

/// A command or query routed through the dispatcher.
///
/// Implementations are plain data holders; business validation belongs to
/// the handler. Use [`impl_intent!`](crate::domain::intent::impl_intent) to
/// declare the associated items.
pub trait Intent: fmt::Debug + Send + Sync + 'static {
    /// Payload carried by a successful envelope.
    type Output: Send + 'static;

    /// Stable name used in logs and configuration errors.
    const NAME: &'static str;

    /// Whether the intent mutates state.
    const KIND: IntentKind;

    /// Who may invoke the intent.
    const ACCESS: Access;
}

/// Implement [`Intent`] for a message type.
///
/// ```ignore
/// impl_intent!(EnrollStudentCommand => Enrollment, Command, Access::AnyRole(&[roles::ADMIN]));
/// ```
macro_rules! impl_intent {
    ($intent:ident => $output:ty, $kind:ident, $access:expr) => {
        impl $crate::domain::intent::Intent for $intent {
            type Output = $output;
            const NAME: &'static str = stringify!($intent);
            const KIND: $crate::domain::intent::IntentKind =
                $crate::domain::intent::IntentKind::$kind;
            const ACCESS: $crate::domain::intent::Access = $access;
        }
    };
}

pub(crate) use impl_intent;

#[cfg(test)]
mod tests {
    //! Intent declarations and access requirements.
    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::UserId;
    use crate::domain::identity::roles;
    use rstest::rstest;

    #[derive(Debug)]
    struct PingQuery;

    impl_intent!(PingQuery => String, Query, Access::AnyRole(&[roles::ADMIN, roles::TEACHER]));

    fn teacher() -> IdentityContext {
        IdentityContext::authenticated(UserId::random(), [roles::TEACHER])
    }

    fn parent() -> IdentityContext {
        IdentityContext::authenticated(UserId::random(), [roles::PARENT])
    }

    #[rstest]
    fn macro_declares_name_kind_and_access() {
        assert_eq!(PingQuery::NAME, "PingQuery");
        assert_eq!(PingQuery::KIND, IntentKind::Query);
        assert_eq!(
            PingQuery::ACCESS,
            Access::AnyRole(&[roles::ADMIN, roles::TEACHER])
        );
    }

    #[rstest]
    #[case(Access::Anonymous, IdentityContext::anonymous(), None)]
    #[case(Access::Authenticated, IdentityContext::anonymous(), Some(ErrorCode::Unauthorized))]
    #[case(Access::Authenticated, parent(), None)]
    #[case(Access::AnyRole(&[roles::ADMIN]), IdentityContext::anonymous(), Some(ErrorCode::Unauthorized))]
    #[case(Access::AnyRole(&[roles::ADMIN]), teacher(), Some(ErrorCode::Forbidden))]
    #[case(Access::AnyRole(&[roles::ADMIN, roles::TEACHER]), teacher(), None)]
    fn access_checks_follow_declared_requirements(
        #[case] access: Access,
        #[case] identity: IdentityContext,
        #[case] expected: Option<ErrorCode>,
    ) {
        let outcome = access.check(&identity).err().map(|error| error.code());
        assert_eq!(outcome, expected);
    }

    #[rstest]
    fn kinds_display_in_lower_case() {
        assert_eq!(IntentKind::Command.to_string(), "command");
        assert_eq!(IntentKind::Query.to_string(), "query");
    }
}
