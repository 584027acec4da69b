pub mod access_jwt;
pub mod allow_list;
pub mod credential;
pub mod factory;
pub mod gate;
pub mod principal;

pub use access_jwt::{CredentialVerifier, JwtVerifier};
pub use allow_list::AllowList;
pub use credential::Credential;
pub use factory::build_access_gate;
pub use gate::{AccessGate, Authenticated, Decision, Denial, Grant};
pub use principal::{PrincipalKind, SecurityContext, ServiceId, UserKey, VerifiedIdentity};
