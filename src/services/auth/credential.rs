use axum::http::{HeaderMap, header};

/// Raw `Authorization` header value, taken verbatim.
///
/// Only presence matters at this level. A header whose bytes are not visible
/// ASCII is still a credential (lossily decoded) so that it fails verification
/// instead of being mistaken for an anonymous request.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn from_headers(headers: &HeaderMap) -> Option<Self> {
        let value = headers.get(header::AUTHORIZATION)?;
        let raw = match value.to_str() {
            Ok(s) => s.to_string(),
            Err(_) => String::from_utf8_lossy(value.as_bytes()).into_owned(),
        };
        Some(Self(raw))
    }

    /// The token part: strips a leading `Bearer ` scheme (any case) if present.
    pub fn token(&self) -> &str {
        let raw = self.0.trim();
        match raw.split_once(' ') {
            Some((scheme, rest)) if scheme.eq_ignore_ascii_case("bearer") => rest.trim_start(),
            _ => raw,
        }
    }
}

// Never print bearer material.
impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Credential").field(&"<redacted>").finish()
    }
}
