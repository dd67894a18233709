use tracing::debug;

use crate::{
    policy::{AuthResponse, Conditions, Effect, Grant, PolicyDocument, Statement, POLICY_VERSION},
    ApiGatewayTarget, Error, HttpVerb, Result,
};

/// Collects the grants of a single authorization request and compiles them
/// into an `AuthResponse`.
///
/// Every request builds its own `AuthPolicy`; grants are never shared
/// between requests and can't be removed once added.
#[derive(Debug, Clone)]
pub struct AuthPolicy {
    principal_id: String,
    target: ApiGatewayTarget,
    allow: Vec<Grant>,
    deny: Vec<Grant>,
}

impl AuthPolicy {
    pub fn new(principal_id: impl Into<String>, target: ApiGatewayTarget) -> Self {
        Self {
            principal_id: principal_id.into(),
            target,
            allow: Vec::new(),
            deny: Vec::new(),
        }
    }

    pub fn principal_id(&self) -> &str {
        &self.principal_id
    }

    pub fn target(&self) -> &ApiGatewayTarget {
        &self.target
    }

    pub fn grants(&self, effect: Effect) -> &[Grant] {
        match effect {
            Effect::Allow => &self.allow,
            Effect::Deny => &self.deny,
        }
    }

    /// Resolves `verb` and `path` to a resource ARN and records the grant.
    pub fn add_method(
        &mut self,
        effect: Effect,
        verb: HttpVerb,
        path: &str,
        conditions: Conditions,
    ) -> Result<&mut Self> {
        let resource_arn = self.target.resource_arn(verb, path)?;
        let grant = Grant::new(effect, resource_arn, conditions);
        match effect {
            Effect::Allow => self.allow.push(grant),
            Effect::Deny => self.deny.push(grant),
        }
        Ok(self)
    }

    /// Grants access to every verb on every path of the stage.
    pub fn allow_all_methods(&mut self) -> Result<&mut Self> {
        self.add_method(Effect::Allow, HttpVerb::All, "*", Conditions::new())
    }

    /// Denies access to every verb on every path of the stage.
    pub fn deny_all_methods(&mut self) -> Result<&mut Self> {
        self.add_method(Effect::Deny, HttpVerb::All, "*", Conditions::new())
    }

    pub fn allow_method(&mut self, verb: HttpVerb, path: &str) -> Result<&mut Self> {
        self.add_method(Effect::Allow, verb, path, Conditions::new())
    }

    pub fn deny_method(&mut self, verb: HttpVerb, path: &str) -> Result<&mut Self> {
        self.add_method(Effect::Deny, verb, path, Conditions::new())
    }

    /// Grants access under `conditions`. The grant gets a statement of its own.
    pub fn allow_method_with_conditions(
        &mut self,
        verb: HttpVerb,
        path: &str,
        conditions: Conditions,
    ) -> Result<&mut Self> {
        self.add_method(Effect::Allow, verb, path, conditions)
    }

    /// Denies access under `conditions`. The grant gets a statement of its own.
    pub fn deny_method_with_conditions(
        &mut self,
        verb: HttpVerb,
        path: &str,
        conditions: Conditions,
    ) -> Result<&mut Self> {
        self.add_method(Effect::Deny, verb, path, conditions)
    }

    /// Compiles the recorded grants: allow statements first, then deny
    /// statements. Fails with `Error::NoStatements` if nothing was granted.
    pub fn build(self) -> Result<AuthResponse> {
        if self.allow.is_empty() && self.deny.is_empty() {
            return Err(Error::NoStatements);
        }

        let mut statement = compile_statements(Effect::Allow, &self.allow);
        statement.extend(compile_statements(Effect::Deny, &self.deny));

        debug!(
            principal_id = %self.principal_id,
            allow = self.allow.len(),
            deny = self.deny.len(),
            statements = statement.len(),
            "compiled policy statements"
        );

        Ok(AuthResponse {
            principal_id: self.principal_id,
            policy_document: PolicyDocument {
                version: POLICY_VERSION,
                statement,
            },
            context: Default::default(),
        })
    }
}

/// Compiles the grants of one effect into statements.
///
/// Unconditional grants are merged into a single statement that comes last.
/// Each conditional grant gets its own statement, in insertion order. The
/// merged statement is left out when every grant carries conditions.
/// Grants of the other effect are skipped.
pub fn compile_statements(effect: Effect, grants: &[Grant]) -> Vec<Statement> {
    let mut statements = Vec::new();
    let mut aggregate = Statement::new(effect);

    for grant in grants.iter().filter(|grant| grant.effect() == effect) {
        if grant.is_conditional() {
            statements.push(Statement::conditional(
                effect,
                grant.resource_arn().to_string(),
                grant.conditions().clone(),
            ));
        } else {
            aggregate.resource.push(grant.resource_arn().to_string());
        }
    }

    if !aggregate.resource.is_empty() {
        statements.push(aggregate);
    }

    statements
}
