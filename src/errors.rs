use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// The only rejection that is meant to reach the caller. The message is
    /// the literal the gateway maps to a 401 response and carries no cause.
    #[error("Unauthorized")]
    Unauthorized,

    #[error("Invalid HTTP verb {0}. Allowed verbs are GET, POST, PUT, PATCH, HEAD, DELETE, OPTIONS and *.")]
    InvalidVerb(String),

    #[error("Invalid resource path: {0}. Path should match {}.", crate::validator::PATH_PATTERN)]
    InvalidPath(String),

    #[error("No statements defined for the policy.")]
    NoStatements,

    #[error("Malformed method ARN {0}.")]
    MalformedMethodArn(String),

    #[error("An error occurred configuring the authorizer: {0}.")]
    Configuration(String),

    #[error("An error occurred serializing the authorizer response {0}.")]
    Serializing(#[source] serde_json::Error),
}

impl Error {
    /// `true` for the caller-facing rejection, `false` for defects in the
    /// policy logic or its inputs.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Error::Unauthorized)
    }
}
