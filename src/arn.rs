use std::{fmt, str::FromStr};

use crate::{validator::validate_path, Error, HttpVerb, Result};

const SERVICE: &str = "execute-api";
const DEFAULT_PARTITION: &str = "aws";

/// A deployed API stage that resource ARNs are generated for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiGatewayTarget {
    partition: String,
    region: String,
    account_id: String,
    rest_api_id: String,
    stage: String,
}

impl ApiGatewayTarget {
    pub fn new(
        region: impl Into<String>,
        account_id: impl Into<String>,
        rest_api_id: impl Into<String>,
        stage: impl Into<String>,
    ) -> Self {
        Self {
            partition: DEFAULT_PARTITION.into(),
            region: region.into(),
            account_id: account_id.into(),
            rest_api_id: rest_api_id.into(),
            stage: stage.into(),
        }
    }

    pub fn with_partition(mut self, partition: impl Into<String>) -> Self {
        self.partition = partition.into();
        self
    }

    pub fn region(&self) -> &str {
        &self.region
    }

    pub fn account_id(&self) -> &str {
        &self.account_id
    }

    pub fn rest_api_id(&self) -> &str {
        &self.rest_api_id
    }

    pub fn stage(&self) -> &str {
        &self.stage
    }

    /// Builds the ARN of `verb` on `path` for this stage:
    /// `arn:{partition}:execute-api:{region}:{account}:{api}/{stage}/{verb}/{path}`.
    ///
    /// One leading `/` is stripped from `path`, so `/pets` and `pets` yield
    /// the same ARN.
    pub fn resource_arn(&self, verb: HttpVerb, path: &str) -> Result<String> {
        validate_path(path)?;
        let path = path.strip_prefix('/').unwrap_or(path);

        Ok(format!(
            "arn:{}:{}:{}:{}:{}/{}/{}/{}",
            self.partition,
            SERVICE,
            self.region,
            self.account_id,
            self.rest_api_id,
            self.stage,
            verb,
            path
        ))
    }
}

/// The method ARN API Gateway sends with every authorization request, e.g.
/// `arn:aws:execute-api:us-east-1:123456789012:abcde12345/test/GET/pets`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodArn {
    target: ApiGatewayTarget,
    verb: String,
    path: String,
}

impl MethodArn {
    pub fn target(&self) -> &ApiGatewayTarget {
        &self.target
    }

    /// The verb that was invoked. Empty when the ARN stops at the stage.
    pub fn verb(&self) -> &str {
        &self.verb
    }

    /// The invoked path without a leading `/`. May be empty.
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn into_target(self) -> ApiGatewayTarget {
        self.target
    }
}

impl FromStr for MethodArn {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        let malformed = || Error::MalformedMethodArn(value.into());

        let segments: Vec<&str> = value.split(':').collect();
        let (partition, region, account_id, resource) = match segments.as_slice() {
            ["arn", partition, SERVICE, region, account_id, resource] => {
                (*partition, *region, *account_id, *resource)
            }
            _ => return Err(malformed()),
        };

        let mut parts = resource.splitn(4, '/');
        let rest_api_id = parts.next().unwrap_or_default();
        let stage = parts.next().unwrap_or_default();
        let verb = parts.next().unwrap_or_default();
        let path = parts.next().unwrap_or_default();

        let required = [partition, region, account_id, rest_api_id, stage];
        if required.iter().any(|segment| segment.is_empty()) {
            return Err(malformed());
        }

        Ok(Self {
            target: ApiGatewayTarget::new(region, account_id, rest_api_id, stage)
                .with_partition(partition),
            verb: verb.into(),
            path: path.into(),
        })
    }
}

impl fmt::Display for MethodArn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let t = &self.target;
        write!(
            f,
            "arn:{}:{}:{}:{}:{}/{}",
            t.partition, SERVICE, t.region, t.account_id, t.rest_api_id, t.stage
        )?;
        if !self.verb.is_empty() {
            write!(f, "/{}/{}", self.verb, self.path)?;
        }
        Ok(())
    }
}
