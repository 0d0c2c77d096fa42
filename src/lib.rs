#[macro_use]
extern crate error_chain;
#[macro_use]
extern crate rocket;

pub mod api;
pub mod config;
pub mod datetime_utils;
pub mod errors;
pub mod gate;
pub mod reservation_storage;
pub mod reservation_types;
pub mod secret_store;
pub mod signer;
pub mod verifier;
