use std::convert::Infallible;

use rocket::request::{FromRequest, Outcome, Request};

use crate::config::ExchangeConfig;
use crate::verifier::SignedRequest;

/// The timestamp and signature headers of a partner request. Absent headers
/// are kept as `None` so the verifier, not routing, decides the outcome.
#[derive(Debug, Clone, Default)]
pub struct SignatureHeaders {
    pub timestamp: Option<String>,
    pub signature: Option<String>,
}

impl SignatureHeaders {
    pub fn with_body(self, body: Vec<u8>) -> SignedRequest {
        SignedRequest {
            timestamp: self.timestamp,
            signature: self.signature,
            body,
        }
    }
}

#[rocket::async_trait]
impl<'r> FromRequest<'r> for SignatureHeaders {
    type Error = Infallible;

    async fn from_request(req: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        let fallback;
        let config = match req.rocket().state::<ExchangeConfig>() {
            Some(config) => config,
            None => {
                fallback = ExchangeConfig::default();
                &fallback
            }
        };

        // header lookup is case-insensitive
        let headers = req.headers();
        Outcome::Success(SignatureHeaders {
            timestamp: headers.get_one(&config.timestamp_header).map(String::from),
            signature: headers.get_one(&config.signature_header).map(String::from),
        })
    }
}
