use serde::{Deserialize, Serialize};

use crate::reservation_types::Reservation;

/// Body of `POST /exchange/restaurant/reservations/email`.
#[derive(Serialize, Deserialize)]
pub struct EmailLookup {
    pub email: String,
}

#[derive(Serialize, Deserialize)]
pub struct ReservationList {
    pub reservations: Vec<Reservation>,
}

#[derive(Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub secret_loaded: bool,
}
