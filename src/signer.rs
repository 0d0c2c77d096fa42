use std::fmt;

use ring::hmac;
use subtle::ConstantTimeEq;

use crate::errors::*;

/// An HMAC-SHA256 tag rendered as lowercase hex. Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature(String);

impl Signature {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Compare against a signature presented by a caller, in constant time
    /// with respect to content.
    pub fn matches(&self, presented: &str) -> bool {
        !self.0.is_empty() && constant_time_compare(&self.0, presented)
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.0)
    }
}

pub fn sign(payload: &str, secret: &str) -> Result<Signature> {
    if secret.is_empty() {
        bail!(ErrorKind::SecretUnavailable);
    }

    let key = hmac::Key::new(hmac::HMAC_SHA256, secret.as_bytes());
    let tag = hmac::sign(&key, payload.as_bytes());

    Ok(Signature(hex::encode(tag.as_ref())))
}

fn constant_time_compare(a: &str, b: &str) -> bool {
    // Pad both sides to the longer length so a length mismatch costs the
    // same as a content mismatch.
    let max_len = a.len().max(b.len());

    let mut a_padded = vec![0u8; max_len];
    let mut b_padded = vec![0xFFu8; max_len];

    a_padded[..a.len()].copy_from_slice(a.as_bytes());
    b_padded[..b.len()].copy_from_slice(b.as_bytes());

    let lengths_equal = (a.len() as u64).ct_eq(&(b.len() as u64));
    let contents_equal = a_padded.ct_eq(&b_padded);

    (lengths_equal & contents_equal).into()
}
