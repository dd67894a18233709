use std::collections::HashMap;

use assert_matches::assert_matches;
use gateway_authorizer::{
    AuthPolicy, Authorizer, Claims, ContextValue, Effect, Error, HttpVerb, RawClaims,
    TokenAuthorizerEvent, TokenVerifier,
};
use serde_json::json;

const METHOD_ARN: &str = "arn:aws:execute-api:us-east-1:123456789012:abcde12345/test/GET/pets";

/// Token table standing in for a real JWT verifier.
#[derive(Default)]
struct SessionTable(HashMap<String, RawClaims>);

impl SessionTable {
    fn with_session(mut self, token: &str, claims: serde_json::Value) -> Self {
        if let serde_json::Value::Object(claims) = claims {
            self.0.insert(token.into(), claims);
        }
        self
    }
}

impl TokenVerifier for SessionTable {
    type Error = &'static str;

    fn verify(&self, token: &str) -> Result<RawClaims, Self::Error> {
        self.0.get(token).cloned().ok_or("unknown or expired token")
    }
}

fn sessions() -> SessionTable {
    SessionTable::default()
        .with_session(
            "valid",
            json!({
                "emailAddress": "user@example.com",
                "userType": "customer",
                "userId": "u-1"
            }),
        )
        .with_session(
            "no-user-type",
            json!({
                "emailAddress": "user@example.com",
                "userId": "u-1"
            }),
        )
}

#[test]
fn allow_all_end_to_end() {
    let authorizer = Authorizer::builder()
        .with_verifier(sessions())
        .build()
        .unwrap();

    let response = authorizer
        .authorize(&TokenAuthorizerEvent::new("Bearer valid", METHOD_ARN))
        .unwrap();

    let statements = response.policy_document().statements();
    assert_eq!(1, statements.len());
    assert_eq!(Effect::Allow, statements[0].effect());
    assert_eq!(1, statements[0].resource().len());
    assert!(statements[0].resource()[0].ends_with("test/*/*"));
    assert_eq!(
        Some(&ContextValue::from("user@example.com")),
        response.context().get("emailAddress")
    );
}

#[test]
fn wire_format_end_to_end() {
    let authorizer = Authorizer::builder()
        .with_verifier(sessions())
        .build()
        .unwrap();

    let input = json!({
        "type": "TOKEN",
        "authorizationToken": "Bearer valid",
        "methodArn": METHOD_ARN
    })
    .to_string();

    let output: serde_json::Value =
        serde_json::from_str(&authorizer.authorize_json(&input).unwrap()).unwrap();

    assert_eq!(
        json!({
            "principalId": "user@example.com",
            "policyDocument": {
                "Version": "2012-10-17",
                "Statement": [{
                    "Action": "execute-api:Invoke",
                    "Effect": "Allow",
                    "Resource": ["arn:aws:execute-api:us-east-1:123456789012:abcde12345/test/*/*"]
                }]
            },
            "context": {
                "emailAddress": "user@example.com",
                "userType": "customer",
                "userId": "u-1"
            }
        }),
        output
    );
}

#[test]
fn rejected_credentials() {
    let authorizer = Authorizer::builder()
        .with_verifier(sessions())
        .build()
        .unwrap();

    for token in &["Basic xyz", "Bearer unknown", "Bearer no-user-type", ""] {
        let error = authorizer
            .authorize(&TokenAuthorizerEvent::new(*token, METHOD_ARN))
            .unwrap_err();
        assert!(error.is_unauthorized(), "{} was not rejected", token);
        assert_eq!("Unauthorized", error.to_string());
    }
}

#[test]
fn path_scoped_policy() {
    let authorizer = Authorizer::builder()
        .with_verifier(sessions())
        .with_policy(|claims: &Claims, policy: &mut AuthPolicy| -> gateway_authorizer::Result<()> {
            policy
                .allow_method(HttpVerb::Get, "/pets/*")?
                .allow_method("POST".parse()?, "/pets")?;
            if claims.user_type().as_str() != Some("admin") {
                policy.deny_method(HttpVerb::Delete, "/pets/*")?;
            }
            Ok(())
        })
        .build()
        .unwrap();

    let response = authorizer
        .authorize(&TokenAuthorizerEvent::new("Bearer valid", METHOD_ARN))
        .unwrap();
    let statements = response.policy_document().statements();

    assert_eq!(2, statements.len());
    assert_eq!(
        &[
            "arn:aws:execute-api:us-east-1:123456789012:abcde12345/test/GET/pets/*".to_string(),
            "arn:aws:execute-api:us-east-1:123456789012:abcde12345/test/POST/pets".to_string(),
        ],
        statements[0].resource()
    );
    assert_eq!(Effect::Deny, statements[1].effect());
}

#[test]
fn broken_policy_is_not_reported_as_denial() {
    let authorizer = Authorizer::builder()
        .with_verifier(sessions())
        .with_policy(|_: &Claims, policy: &mut AuthPolicy| -> gateway_authorizer::Result<()> {
            policy.allow_method(HttpVerb::Get, "/pets/{id}")?;
            Ok(())
        })
        .build()
        .unwrap();

    let error = authorizer
        .authorize(&TokenAuthorizerEvent::new("Bearer valid", METHOD_ARN))
        .unwrap_err();

    assert_matches!(error, Error::InvalidPath(ref path) if path == "/pets/{id}");
    assert!(!error.is_unauthorized());
}

#[test]
fn authorizer_is_shareable_across_threads() {
    let authorizer = std::sync::Arc::new(
        Authorizer::builder()
            .with_verifier(sessions())
            .build()
            .unwrap(),
    );

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let authorizer = authorizer.clone();
            std::thread::spawn(move || {
                authorizer
                    .authorize(&TokenAuthorizerEvent::new("Bearer valid", METHOD_ARN))
                    .unwrap()
                    .to_json()
                    .unwrap()
            })
        })
        .collect();

    let documents: Vec<String> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert!(documents.windows(2).all(|pair| pair[0] == pair[1]));
}
