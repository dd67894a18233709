use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::Error;

/// HTTP verbs a grant can be declared for. `All` is the `*` wildcard and
/// matches any verb.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HttpVerb {
    #[serde(rename = "GET")]
    Get,
    #[serde(rename = "POST")]
    Post,
    #[serde(rename = "PUT")]
    Put,
    #[serde(rename = "PATCH")]
    Patch,
    #[serde(rename = "HEAD")]
    Head,
    #[serde(rename = "DELETE")]
    Delete,
    #[serde(rename = "OPTIONS")]
    Options,
    #[serde(rename = "*")]
    All,
}

impl HttpVerb {
    pub const VARIANTS: [HttpVerb; 8] = [
        HttpVerb::Get,
        HttpVerb::Post,
        HttpVerb::Put,
        HttpVerb::Patch,
        HttpVerb::Head,
        HttpVerb::Delete,
        HttpVerb::Options,
        HttpVerb::All,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            HttpVerb::Get => "GET",
            HttpVerb::Post => "POST",
            HttpVerb::Put => "PUT",
            HttpVerb::Patch => "PATCH",
            HttpVerb::Head => "HEAD",
            HttpVerb::Delete => "DELETE",
            HttpVerb::Options => "OPTIONS",
            HttpVerb::All => "*",
        }
    }

    pub fn is_wildcard(self) -> bool {
        self == HttpVerb::All
    }
}

/// Verb tokens are case-sensitive, `get` is not a verb.
pub fn is_valid_verb(token: &str) -> bool {
    token.parse::<HttpVerb>().is_ok()
}

impl FromStr for HttpVerb {
    type Err = Error;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        HttpVerb::VARIANTS
            .iter()
            .copied()
            .find(|verb| verb.as_str() == token)
            .ok_or_else(|| Error::InvalidVerb(token.into()))
    }
}

impl fmt::Display for HttpVerb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
