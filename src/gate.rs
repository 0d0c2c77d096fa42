//! Runs a reservation-store operation only after the partner request that
//! asked for it has been verified.

use std::future::Future;
use std::time::Duration;

use log::{debug, warn};
use rocket::tokio::time;

use crate::errors::*;
use crate::verifier::{SignedRequest, Verifier};

/// Where a gated request ended up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateState {
    Received,
    Verifying,
    Authorized,
    Rejected,
}

pub struct Gate<'a> {
    verifier: Verifier<'a>,
    store_timeout: Duration,
    state: GateState,
}

impl<'a> Gate<'a> {
    pub fn new(verifier: Verifier<'a>, store_timeout: Duration) -> Self {
        Self {
            verifier,
            store_timeout,
            state: GateState::Received,
        }
    }

    pub fn state(&self) -> GateState {
        self.state
    }

    /// Verify `request`, then run `operation` and return its result as-is.
    ///
    /// On rejection `operation` is never called and the verification error
    /// is returned; its kind is always `SecretUnavailable` or
    /// `VerificationFailed`. An operation that outlives the store timeout
    /// yields `StoreTimeout`.
    pub async fn authorize<T, F, Fut>(&mut self, request: &SignedRequest, operation: F) -> Result<T>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        self.state = GateState::Verifying;

        if let Err(e) = self.verifier.verify(request) {
            self.state = GateState::Rejected;
            warn!("exchange request rejected: {}", e);
            return Err(e);
        }

        self.state = GateState::Authorized;
        debug!("exchange request authorized");

        match time::timeout(self.store_timeout, operation()).await {
            Ok(result) => result,
            Err(_) => bail!(ErrorKind::StoreTimeout),
        }
    }
}
