//! Bearer-token authorizer for API Gateway.
//!
//! An `Authorizer` checks the bearer token of a `TokenAuthorizerEvent`,
//! lets a `GrantPolicy` record allow/deny grants for the principal and
//! compiles them into the `AuthResponse` the gateway expects.
#![deny(rust_2018_idioms, warnings)]
#![deny(clippy::all, clippy::pedantic)]
#![allow(
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::missing_errors_doc
)]
mod arn;
mod authorizer;
mod claims;
mod errors;
mod policy;
mod validator;
mod verb;

pub use arn::{ApiGatewayTarget, MethodArn};
pub use authorizer::{
    AllowAll, Authorizer, AuthorizerBuilder, DenyAll, GrantPolicy, TokenAuthorizerEvent,
};
pub use claims::{extract_claims, Claims, RawClaims, TokenVerifier, BEARER_PREFIX};
pub use errors::{Error, Result};
pub use policy::{
    compile_statements, AuthPolicy, AuthResponse, Conditions, ContextValue, Effect, Grant,
    PolicyDocument, Statement, INVOKE_ACTION, POLICY_VERSION,
};
pub use validator::{validate_path, PATH_PATTERN};
pub use verb::{is_valid_verb, HttpVerb};
