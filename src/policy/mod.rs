mod builder;
pub use builder::{compile_statements, AuthPolicy};

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{errors::Result, Error};

/// The only action an API Gateway authorizer policy can grant.
pub const INVOKE_ACTION: &str = "execute-api:Invoke";

/// IAM policy language version API Gateway expects.
pub const POLICY_VERSION: &str = "2012-10-17";

/// Condition block of a statement: operator -> (condition key -> value),
/// e.g. `{"IpAddress": {"aws:SourceIp": "203.0.113.0/24"}}`.
pub type Conditions = BTreeMap<String, BTreeMap<String, serde_json::Value>>;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Effect {
    Allow,
    Deny,
}

impl Effect {
    /// Normalizes an effect name in any casing.
    ///
    /// # Panics
    ///
    /// Panics on anything other than `allow` or `deny`. Effects only come from
    /// the crate's own grant policies, so an unknown name is a bug there.
    pub fn from_name(name: &str) -> Self {
        if name.eq_ignore_ascii_case("allow") {
            Effect::Allow
        } else if name.eq_ignore_ascii_case("deny") {
            Effect::Deny
        } else {
            panic!("unrecognized policy effect {:?}", name)
        }
    }
}

/// A single allow/deny declaration, already resolved to a resource ARN.
#[derive(Debug, Clone, PartialEq)]
pub struct Grant {
    effect: Effect,
    resource_arn: String,
    conditions: Conditions,
}

impl Grant {
    pub(crate) fn new(effect: Effect, resource_arn: String, conditions: Conditions) -> Self {
        Self {
            effect,
            resource_arn,
            conditions,
        }
    }

    pub fn effect(&self) -> Effect {
        self.effect
    }

    pub fn resource_arn(&self) -> &str {
        &self.resource_arn
    }

    pub fn conditions(&self) -> &Conditions {
        &self.conditions
    }

    pub fn is_conditional(&self) -> bool {
        !self.conditions.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Statement {
    action: &'static str,
    effect: Effect,
    resource: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    condition: Option<Conditions>,
}

impl Statement {
    pub(crate) fn new(effect: Effect) -> Self {
        Self {
            action: INVOKE_ACTION,
            effect,
            resource: Vec::new(),
            condition: None,
        }
    }

    pub(crate) fn conditional(effect: Effect, resource_arn: String, conditions: Conditions) -> Self {
        Self {
            action: INVOKE_ACTION,
            effect,
            resource: vec![resource_arn],
            condition: Some(conditions),
        }
    }

    pub fn action(&self) -> &str {
        self.action
    }

    pub fn effect(&self) -> Effect {
        self.effect
    }

    pub fn resource(&self) -> &[String] {
        &self.resource
    }

    pub fn condition(&self) -> Option<&Conditions> {
        self.condition.as_ref()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct PolicyDocument {
    version: &'static str,
    statement: Vec<Statement>,
}

impl PolicyDocument {
    pub fn version(&self) -> &str {
        self.version
    }

    pub fn statements(&self) -> &[Statement] {
        &self.statement
    }
}

/// Value of a context entry. API Gateway rejects arrays and objects in the
/// authorizer context, so only scalars can be expressed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ContextValue {
    Bool(bool),
    Number(serde_json::Number),
    String(String),
}

impl ContextValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ContextValue::String(value) => Some(value.as_str()),
            _ => None,
        }
    }
}

impl From<&str> for ContextValue {
    fn from(value: &str) -> Self {
        ContextValue::String(value.into())
    }
}

impl From<String> for ContextValue {
    fn from(value: String) -> Self {
        ContextValue::String(value)
    }
}

impl From<bool> for ContextValue {
    fn from(value: bool) -> Self {
        ContextValue::Bool(value)
    }
}

impl From<i64> for ContextValue {
    fn from(value: i64) -> Self {
        ContextValue::Number(value.into())
    }
}

/// The response handed back to API Gateway.
///
/// Only `AuthPolicy::build` constructs it, which guarantees at least one
/// statement. Context entries can be attached afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    principal_id: String,
    policy_document: PolicyDocument,
    context: BTreeMap<String, ContextValue>,
}

impl AuthResponse {
    pub fn principal_id(&self) -> &str {
        &self.principal_id
    }

    pub fn policy_document(&self) -> &PolicyDocument {
        &self.policy_document
    }

    pub fn context(&self) -> &BTreeMap<String, ContextValue> {
        &self.context
    }

    pub fn insert_context(&mut self, key: impl Into<String>, value: impl Into<ContextValue>) {
        self.context.insert(key.into(), value.into());
    }

    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<ContextValue>) -> Self {
        self.insert_context(key, value);
        self
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(Error::Serializing)
    }
}
