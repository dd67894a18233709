use serde::Deserialize;
use tracing::warn;

use crate::{ContextValue, Error, Result};

/// Prefix an authorization token must carry. Matched case-sensitively.
pub const BEARER_PREFIX: &str = "Bearer ";

/// Claims as returned by a `TokenVerifier`, keyed by claim name.
pub type RawClaims = serde_json::Map<String, serde_json::Value>;

/// Verifies a bearer token and returns its claims.
///
/// Signature checks, expiry and key management are the verifier's business.
/// Any failure is reported as `Err` and turned into `Error::Unauthorized`,
/// the reason is only logged.
pub trait TokenVerifier {
    type Error: std::fmt::Display;

    fn verify(&self, token: &str) -> std::result::Result<RawClaims, Self::Error>;
}

impl<T> TokenVerifier for &T
where
    T: TokenVerifier + ?Sized,
{
    type Error = T::Error;

    fn verify(&self, token: &str) -> std::result::Result<RawClaims, Self::Error> {
        (**self).verify(token)
    }
}

/// Identity claims every session token has to carry.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Claims {
    email_address: String,
    /// Scalars only, their type depends on the user store.
    user_type: ContextValue,
    user_id: ContextValue,
}

impl Claims {
    pub fn email_address(&self) -> &str {
        &self.email_address
    }

    pub fn user_type(&self) -> &ContextValue {
        &self.user_type
    }

    pub fn user_id(&self) -> &ContextValue {
        &self.user_id
    }

    /// The principal the policy is issued for.
    pub fn principal_id(&self) -> &str {
        &self.email_address
    }

    /// Non-secret attributes forwarded to the backend through the authorizer
    /// context.
    pub fn context_entries(&self) -> Vec<(&'static str, ContextValue)> {
        vec![
            ("emailAddress", self.email_address.as_str().into()),
            ("userType", self.user_type.clone()),
            ("userId", self.user_id.clone()),
        ]
    }
}

/// Validates the `Bearer ` header and the token behind it.
///
/// The verifier is not called at all when the prefix is missing.
pub fn extract_claims<V>(authorization: &str, verifier: &V) -> Result<Claims>
where
    V: TokenVerifier + ?Sized,
{
    let token = match authorization.strip_prefix(BEARER_PREFIX) {
        Some(token) => token,
        None => {
            warn!("authorization token is not a bearer token");
            return Err(Error::Unauthorized);
        }
    };

    let raw = verifier.verify(token).map_err(|e| {
        warn!(error = %e, "bearer token failed verification");
        Error::Unauthorized
    })?;

    serde_json::from_value(serde_json::Value::Object(raw)).map_err(|e| {
        warn!(error = %e, "bearer token lacks identity claims");
        Error::Unauthorized
    })
}
