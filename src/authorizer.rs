use serde::Deserialize;
use tracing::{info, warn};

use crate::{
    claims::{extract_claims, Claims, TokenVerifier},
    AuthPolicy, AuthResponse, Error, MethodArn, Result,
};

/// Token authorizer request as delivered by API Gateway.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenAuthorizerEvent {
    #[serde(rename = "type", default)]
    pub event_type: Option<String>,
    pub authorization_token: String,
    pub method_arn: String,
}

impl TokenAuthorizerEvent {
    pub fn new(authorization_token: impl Into<String>, method_arn: impl Into<String>) -> Self {
        Self {
            event_type: Some("TOKEN".into()),
            authorization_token: authorization_token.into(),
            method_arn: method_arn.into(),
        }
    }
}

/// Decides which grants an authenticated principal receives.
///
/// Errors returned from `apply` are defects in the policy logic and are
/// propagated as they are, they never turn into `Error::Unauthorized`.
pub trait GrantPolicy {
    fn apply(&self, claims: &Claims, policy: &mut AuthPolicy) -> Result<()>;
}

/// Grants every verb on every path of the stage.
#[derive(Debug, Default, Copy, Clone)]
pub struct AllowAll;

impl GrantPolicy for AllowAll {
    fn apply(&self, _claims: &Claims, policy: &mut AuthPolicy) -> Result<()> {
        policy.allow_all_methods()?;
        Ok(())
    }
}

/// Denies every verb on every path of the stage.
#[derive(Debug, Default, Copy, Clone)]
pub struct DenyAll;

impl GrantPolicy for DenyAll {
    fn apply(&self, _claims: &Claims, policy: &mut AuthPolicy) -> Result<()> {
        policy.deny_all_methods()?;
        Ok(())
    }
}

impl<F> GrantPolicy for F
where
    F: Fn(&Claims, &mut AuthPolicy) -> Result<()>,
{
    fn apply(&self, claims: &Claims, policy: &mut AuthPolicy) -> Result<()> {
        self(claims, policy)
    }
}

/// Turns a `TokenAuthorizerEvent` into an `AuthResponse`.
///
/// Holds no per-request state, so one instance can serve concurrent requests.
#[derive(Debug)]
pub struct Authorizer<V, P> {
    verifier: V,
    policy: P,
}

impl<V> Authorizer<V, AllowAll>
where
    V: TokenVerifier,
{
    pub fn builder() -> AuthorizerBuilder<V, AllowAll> {
        AuthorizerBuilder {
            verifier: None,
            policy: AllowAll,
        }
    }
}

impl<V, P> Authorizer<V, P>
where
    V: TokenVerifier,
    P: GrantPolicy,
{
    /// Authorizes a request.
    ///
    /// `Error::Unauthorized` is the only error meant for the caller. Any other
    /// error means the method ARN or the grant policy is broken.
    pub fn authorize(&self, event: &TokenAuthorizerEvent) -> Result<AuthResponse> {
        info!(method_arn = %event.method_arn, "authorizing request");

        let claims = extract_claims(&event.authorization_token, &self.verifier)?;
        let method_arn: MethodArn = event.method_arn.parse()?;

        let mut policy = AuthPolicy::new(claims.principal_id(), method_arn.into_target());
        self.policy.apply(&claims, &mut policy)?;

        let mut response = policy.build()?;
        for (key, value) in claims.context_entries() {
            response.insert_context(key, value);
        }

        info!(principal_id = %response.principal_id(), "request authorized");
        Ok(response)
    }

    /// Authorizes a raw JSON event and returns the JSON response.
    pub fn authorize_json(&self, event: &str) -> Result<String> {
        let event: TokenAuthorizerEvent = serde_json::from_str(event).map_err(|e| {
            warn!(error = %e, "malformed authorizer event");
            Error::Unauthorized
        })?;
        self.authorize(&event)?.to_json()
    }
}

pub struct AuthorizerBuilder<V, P> {
    verifier: Option<V>,
    policy: P,
}

impl<V, P> AuthorizerBuilder<V, P>
where
    V: TokenVerifier,
    P: GrantPolicy,
{
    pub fn with_verifier(mut self, verifier: V) -> Self {
        self.verifier = Some(verifier);
        self
    }

    pub fn with_policy<Q>(self, policy: Q) -> AuthorizerBuilder<V, Q>
    where
        Q: GrantPolicy,
    {
        AuthorizerBuilder {
            verifier: self.verifier,
            policy,
        }
    }

    pub fn build(self) -> Result<Authorizer<V, P>> {
        let verifier = self
            .verifier
            .ok_or_else(|| Error::Configuration("token verifier is not set".into()))?;

        Ok(Authorizer {
            verifier,
            policy: self.policy,
        })
    }
}
