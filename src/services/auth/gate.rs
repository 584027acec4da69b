//! Access decision for a single request.
//!
//! Start → allow-listed? → credential present? → verify → resolve principal →
//! load user (user principals only) → Permit. Any failure after a credential
//! was presented is a Deny carrying the failure; no credential at all is a
//! silent Deny the caller may still serve anonymously.

use std::sync::Arc;

use crate::error::AuthFailure;
use crate::repos::{UserRecord, UserStore};
use crate::services::auth::access_jwt::CredentialVerifier;
use crate::services::auth::allow_list::AllowList;
use crate::services::auth::credential::Credential;
use crate::services::auth::principal::{PrincipalKind, SecurityContext};

#[derive(Debug)]
pub enum Decision {
    Permit(Grant),
    Deny(Denial),
}

#[derive(Debug)]
pub enum Grant {
    /// Target is on the allow-list; no credential was looked at.
    AllowListed,
    Authenticated(Authenticated),
}

#[derive(Debug)]
pub struct Authenticated {
    pub context: SecurityContext,
    /// Present only for user principals.
    pub user: Option<UserRecord>,
}

#[derive(Debug)]
pub enum Denial {
    /// No credential on a protected target. Authorization is deferred downstream.
    NoCredential,
    /// A credential was presented and rejected.
    Failed(AuthFailure),
}

/// The access gate: allow-list plus injected verifier and user store.
///
/// Holds no per-request state; share it behind `Arc`.
pub struct AccessGate {
    allow_list: AllowList,
    verifier: Arc<dyn CredentialVerifier>,
    users: Arc<dyn UserStore>,
}

impl std::fmt::Debug for AccessGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessGate")
            .field("allow_list", &self.allow_list)
            .field("user_store", &self.users.backend_name())
            .finish()
    }
}

impl AccessGate {
    pub fn new(
        allow_list: AllowList,
        verifier: Arc<dyn CredentialVerifier>,
        users: Arc<dyn UserStore>,
    ) -> Self {
        Self {
            allow_list,
            verifier,
            users,
        }
    }

    pub async fn decide(&self, target: &str, credential: Option<&Credential>) -> Decision {
        if self.allow_list.contains(target) {
            return Decision::Permit(Grant::AllowListed);
        }

        let Some(credential) = credential else {
            return Decision::Deny(Denial::NoCredential);
        };

        match self.authenticate(credential).await {
            Ok(authenticated) => Decision::Permit(Grant::Authenticated(authenticated)),
            Err(failure) => Decision::Deny(Denial::Failed(failure)),
        }
    }

    async fn authenticate(&self, credential: &Credential) -> Result<Authenticated, AuthFailure> {
        let identity = self.verifier.verify(credential)?;
        let principal = PrincipalKind::resolve(&identity)?;
        let context = SecurityContext {
            identity,
            principal,
        };
        let user = self.resolve_user(&context.principal).await?;

        Ok(Authenticated { context, user })
    }

    /// Load the user record for a user principal; other principals have none.
    async fn resolve_user(
        &self,
        principal: &PrincipalKind,
    ) -> Result<Option<UserRecord>, AuthFailure> {
        let PrincipalKind::User(key) = principal else {
            return Ok(None);
        };

        match self.users.load_user_by_key(key).await {
            Ok(Some(user)) => Ok(Some(user)),
            Ok(None) => {
                tracing::info!(user_key = %key, "verified token names an unknown user");
                Err(AuthFailure::PrincipalNotResolved)
            }
            Err(err) => {
                tracing::warn!(
                    error = ?err,
                    backend = self.users.backend_name(),
                    "user store lookup failed"
                );
                Err(AuthFailure::from(err))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repos::InMemoryUserStore;
    use crate::repos::error::RepoError;
    use crate::services::auth::principal::{UserKey, VerifiedIdentity};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Accepts `valid:<sub>` and `service:<sub>`, counts calls.
    #[derive(Default)]
    struct FakeVerifier {
        calls: AtomicUsize,
    }

    impl CredentialVerifier for FakeVerifier {
        fn verify(&self, credential: &Credential) -> Result<VerifiedIdentity, AuthFailure> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let token = credential.token();
            if let Some(sub) = token.strip_prefix("valid:") {
                Ok(VerifiedIdentity::new(sub, None))
            } else if let Some(sub) = token.strip_prefix("service:") {
                Ok(VerifiedIdentity::new(sub, Some("service".into())))
            } else if token == "expired" {
                Err(AuthFailure::TokenExpired)
            } else {
                Err(AuthFailure::TokenInvalid)
            }
        }
    }

    struct DownStore;

    #[async_trait]
    impl UserStore for DownStore {
        fn backend_name(&self) -> &'static str {
            "down"
        }

        async fn load_user_by_key(&self, _key: &UserKey) -> Result<Option<UserRecord>, RepoError> {
            Err(RepoError::Db(sqlx::Error::PoolClosed))
        }
    }

    fn user(no: &str) -> UserRecord {
        UserRecord {
            user_no: no.to_string(),
            user_name: format!("user-{no}"),
            image_url: None,
        }
    }

    fn gate_with(verifier: Arc<FakeVerifier>, users: Arc<dyn UserStore>) -> AccessGate {
        AccessGate::new(AllowList::new(["/public/health"]), verifier, users)
    }

    fn gate(verifier: Arc<FakeVerifier>) -> AccessGate {
        gate_with(verifier, Arc::new(InMemoryUserStore::new([user("42")])))
    }

    #[tokio::test]
    async fn allow_listed_target_skips_verification_even_with_bad_credential() {
        let verifier = Arc::new(FakeVerifier::default());
        let gate = gate(verifier.clone());

        let decision = gate
            .decide("/public/health", Some(&Credential::new("Bearer garbage")))
            .await;

        assert!(matches!(decision, Decision::Permit(Grant::AllowListed)));
        assert_eq!(verifier.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn missing_credential_is_a_silent_denial() {
        let verifier = Arc::new(FakeVerifier::default());
        let gate = gate(verifier.clone());

        let decision = gate.decide("/orders", None).await;

        assert!(matches!(decision, Decision::Deny(Denial::NoCredential)));
        assert_eq!(verifier.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn valid_user_credential_permits_and_loads_user() {
        let gate = gate(Arc::new(FakeVerifier::default()));

        let decision = gate
            .decide("/orders", Some(&Credential::new("Bearer valid:42")))
            .await;

        let Decision::Permit(Grant::Authenticated(auth)) = decision else {
            panic!("expected an authenticated permit");
        };
        assert_eq!(auth.context.subject(), "42");
        assert!(auth.context.is_user());
        assert_eq!(auth.user, Some(user("42")));
    }

    #[tokio::test]
    async fn service_principal_permits_without_user_lookup() {
        let gate = gate_with(Arc::new(FakeVerifier::default()), Arc::new(DownStore));

        let decision = gate
            .decide("/orders", Some(&Credential::new("Bearer service:billing")))
            .await;

        let Decision::Permit(Grant::Authenticated(auth)) = decision else {
            panic!("expected an authenticated permit");
        };
        assert!(!auth.context.is_user());
        assert!(auth.user.is_none());
    }

    #[tokio::test]
    async fn rejected_credential_is_a_failure() {
        let gate = gate(Arc::new(FakeVerifier::default()));

        let invalid = gate
            .decide("/orders", Some(&Credential::new("Bearer garbage")))
            .await;
        let expired = gate
            .decide("/orders", Some(&Credential::new("Bearer expired")))
            .await;

        assert!(matches!(
            invalid,
            Decision::Deny(Denial::Failed(AuthFailure::TokenInvalid))
        ));
        assert!(matches!(
            expired,
            Decision::Deny(Denial::Failed(AuthFailure::TokenExpired))
        ));
    }

    #[tokio::test]
    async fn unresolvable_principal_is_a_failure_not_anonymous() {
        let gate = gate(Arc::new(FakeVerifier::default()));

        let blank = gate
            .decide("/orders", Some(&Credential::new("Bearer valid:")))
            .await;
        let unknown_user = gate
            .decide("/orders", Some(&Credential::new("Bearer valid:99")))
            .await;

        assert!(matches!(
            blank,
            Decision::Deny(Denial::Failed(AuthFailure::PrincipalNotResolved))
        ));
        assert!(matches!(
            unknown_user,
            Decision::Deny(Denial::Failed(AuthFailure::PrincipalNotResolved))
        ));
    }

    #[tokio::test]
    async fn store_outage_is_a_failure() {
        let gate = gate_with(Arc::new(FakeVerifier::default()), Arc::new(DownStore));

        let decision = gate
            .decide("/orders", Some(&Credential::new("Bearer valid:42")))
            .await;

        assert!(matches!(
            decision,
            Decision::Deny(Denial::Failed(AuthFailure::StoreUnavailable(_)))
        ));
    }
}
