use gateway_authorizer::{
    AuthPolicy, Authorizer, Claims, HttpVerb, RawClaims, Result, TokenAuthorizerEvent,
    TokenVerifier,
};
use serde_json::json;
use tracing_subscriber::EnvFilter;

// Accepts a single hard-coded session token.
struct DemoVerifier;

impl TokenVerifier for DemoVerifier {
    type Error = &'static str;

    fn verify(&self, token: &str) -> std::result::Result<RawClaims, Self::Error> {
        if token != "demo-session" {
            return Err("invalid signature");
        }
        match json!({
            "emailAddress": "user@example.com",
            "userType": "customer",
            "userId": 7
        }) {
            serde_json::Value::Object(claims) => Ok(claims),
            _ => Err("claims are not an object"),
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let authorizer = Authorizer::builder()
        .with_verifier(DemoVerifier)
        .with_policy(|claims: &Claims, policy: &mut AuthPolicy| -> Result<()> {
            policy.allow_method(HttpVerb::Get, "/pets/*")?;
            if claims.user_type().as_str() == Some("admin") {
                policy.allow_all_methods()?;
            }
            Ok(())
        })
        .build()?;

    let event = TokenAuthorizerEvent::new(
        "Bearer demo-session",
        "arn:aws:execute-api:us-east-1:123456789012:abcde12345/test/GET/pets/42",
    );
    println!("{}", authorizer.authorize(&event)?.to_json()?);

    let rejected = TokenAuthorizerEvent::new("Bearer forged", event.method_arn.clone());
    match authorizer.authorize(&rejected) {
        Err(e) if e.is_unauthorized() => println!("{}", e),
        other => panic!("expected a rejection, got {:?}", other),
    }

    Ok(())
}
