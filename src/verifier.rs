use std::collections::BTreeMap;
use std::str;

use chrono::prelude::*;
use chrono::Duration;
use serde_json::Value;

use crate::datetime_utils::RequestTime;
use crate::errors::*;
use crate::signer::{self, Signature};

/// Signature material pulled from one inbound partner request.
#[derive(Debug, Clone, Default)]
pub struct SignedRequest {
    pub timestamp: Option<String>,
    pub signature: Option<String>,
    pub body: Vec<u8>,
}

/// Build the string that gets signed: `trim(timestamp + serialize(body))`.
///
/// An empty body serializes to nothing. Any other body must be JSON, and is
/// re-rendered compactly with object keys sorted, so both sides agree on the
/// bytes regardless of how the sender formatted it. Partners must sign this
/// sorted-key form, not their own serialization of the body.
pub fn canonical_payload(timestamp: &str, body: &[u8]) -> Result<String> {
    let body = serialize_body(body)?;
    Ok(format!("{}{}", timestamp, body).trim().to_string())
}

/// The signature a partner must present for `timestamp` and `body`.
pub fn expected_signature(timestamp: &str, body: &[u8], secret: &str) -> Result<Signature> {
    let payload = canonical_payload(timestamp, body)?;
    signer::sign(&payload, secret.trim())
}

fn serialize_body(body: &[u8]) -> Result<String> {
    let text = str::from_utf8(body).chain_err(|| "body is not valid utf-8")?;
    if text.trim().is_empty() {
        return Ok(String::new());
    }

    let value: Value = serde_json::from_str(text)?;
    Ok(serde_json::to_string(&sort_keys(value))?)
}

fn sort_keys(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let sorted: BTreeMap<String, Value> =
                map.into_iter().map(|(k, v)| (k, sort_keys(v))).collect();
            Value::Object(sorted.into_iter().collect())
        }
        Value::Array(items) => Value::Array(items.into_iter().map(sort_keys).collect()),
        other => other,
    }
}

fn rejected<S: Into<String>>(reason: S) -> ErrorKind {
    ErrorKind::VerificationFailed(reason.into())
}

pub struct Verifier<'a> {
    secret: &'a str,
    max_clock_skew: Option<Duration>,
}

impl<'a> Verifier<'a> {
    pub fn new(secret: &'a str, max_clock_skew: Option<Duration>) -> Self {
        Self {
            secret,
            max_clock_skew,
        }
    }

    pub fn verify(&self, request: &SignedRequest) -> Result<()> {
        self.verify_at(request, &Utc::now())
    }

    /// Accept the request only if the presented signature equals the one
    /// recomputed from the loaded secret. Every failure other than a missing
    /// secret is reported as `VerificationFailed`.
    pub fn verify_at(&self, request: &SignedRequest, now: &DateTime<Utc>) -> Result<()> {
        let secret = self.secret.trim();
        if secret.is_empty() {
            bail!(ErrorKind::SecretUnavailable);
        }

        let (timestamp, presented) = match (&request.timestamp, &request.signature) {
            (Some(timestamp), Some(presented)) => (timestamp, presented),
            _ => bail!(rejected("missing signature headers")),
        };

        let sent_at = RequestTime::from_header(timestamp)
            .chain_err(|| rejected("malformed timestamp"))?;

        if let Some(window) = self.max_clock_skew {
            if !sent_at.within(now, window) {
                bail!(rejected(format!("timestamp {} outside allowed skew", sent_at)));
            }
        }

        let expected = expected_signature(timestamp, &request.body, secret)
            .chain_err(|| rejected("could not compute signature"))?;

        if !expected.matches(presented) {
            bail!(rejected("signature mismatch"));
        }

        Ok(())
    }
}
