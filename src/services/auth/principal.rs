//! Verified identity → principal mapping.

use std::fmt;

use crate::error::AuthFailure;

/// What the credential verifier hands back after a successful check.
///
/// `subject` is the token's `sub`; `kind` is the optional `kind` claim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedIdentity {
    pub subject: String,
    pub kind: Option<String>,
}

impl VerifiedIdentity {
    pub fn new(subject: impl Into<String>, kind: Option<String>) -> Self {
        Self {
            subject: subject.into(),
            kind,
        }
    }
}

/// Key of a user record in the user store.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UserKey(String);

impl UserKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceId(String);

impl ServiceId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// The authenticated subject of the current request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrincipalKind {
    /// A full user; a user record is loaded for it.
    User(UserKey),
    /// A non-user caller (service-to-service). No user record exists.
    Service(ServiceId),
}

impl PrincipalKind {
    /// Map a verified identity to a principal.
    ///
    /// A missing `kind` means a user. Blank subjects and unknown kinds do not
    /// resolve. The subject is used verbatim as the key.
    pub fn resolve(identity: &VerifiedIdentity) -> Result<Self, AuthFailure> {
        if identity.subject.trim().is_empty() {
            return Err(AuthFailure::PrincipalNotResolved);
        }

        let subject = identity.subject.clone();
        match identity.kind.as_deref() {
            None | Some("user") => Ok(Self::User(UserKey::new(subject))),
            Some("service") => Ok(Self::Service(ServiceId(subject))),
            Some(_) => Err(AuthFailure::PrincipalNotResolved),
        }
    }
}

/// Identity and principal bound to a request after successful verification.
#[derive(Debug, Clone)]
pub struct SecurityContext {
    pub identity: VerifiedIdentity,
    pub principal: PrincipalKind,
}

impl SecurityContext {
    pub fn subject(&self) -> &str {
        &self.identity.subject
    }

    pub fn is_user(&self) -> bool {
        matches!(self.principal, PrincipalKind::User(_))
    }
}
