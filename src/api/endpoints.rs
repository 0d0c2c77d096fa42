use rocket::serde::json::Json;
use rocket::State;

use crate::api::guards::SignatureHeaders;
use crate::api::types::*;
use crate::config::ExchangeConfig;
use crate::errors::*;
use crate::gate::Gate;
use crate::reservation_storage::Store;
use crate::reservation_types::*;
use crate::secret_store::SecretStore;
use crate::verifier::Verifier;

fn gate<'a>(config: &ExchangeConfig, secrets: &'a SecretStore) -> Gate<'a> {
    Gate::new(
        Verifier::new(secrets.current_secret(), config.max_clock_skew()),
        config.store_timeout(),
    )
}

// -------- partner routes, behind the gate

#[get("/reservations/<email>")]
pub async fn exchange_by_email(
    email: String,
    headers: SignatureHeaders,
    config: &State<ExchangeConfig>,
    secrets: &State<SecretStore>,
    store: &State<Store>,
) -> Result<Json<Vec<Reservation>>> {
    // GET carries no body, so only the timestamp is signed
    let request = headers.with_body(Vec::new());

    let found = gate(config, secrets)
        .authorize(&request, || store.get_by_email(&email))
        .await?;

    Ok(Json(found))
}

#[post("/reservations/email", data = "<body>")]
pub async fn exchange_by_email_body(
    headers: SignatureHeaders,
    body: Vec<u8>,
    config: &State<ExchangeConfig>,
    secrets: &State<SecretStore>,
    store: &State<Store>,
) -> Result<Json<Vec<Reservation>>> {
    let request = headers.with_body(body);

    let found = gate(config, secrets)
        .authorize(&request, || async {
            let lookup: EmailLookup = serde_json::from_slice(&request.body)
                .chain_err(|| ErrorKind::BadRequest("expected {\"email\": ...}".into()))?;
            store.get_by_email(&lookup.email).await
        })
        .await?;

    Ok(Json(found))
}

// -------- UI routes, unauthenticated

#[get("/reservations")]
pub async fn list(store: &State<Store>) -> Result<Json<ReservationList>> {
    Ok(Json(ReservationList {
        reservations: store.list().await?,
    }))
}

#[get("/reservations/id/<id>")]
pub async fn get_by_id(id: u64, store: &State<Store>) -> Result<Json<Reservation>> {
    Ok(Json(store.get(id).await?))
}

#[post("/reservations", data = "<reservation>")]
pub async fn add(
    reservation: Json<NewReservation>,
    store: &State<Store>,
) -> Result<Json<Reservation>> {
    Ok(Json(store.add(reservation.into_inner()).await?))
}

#[put("/reservations/<id>", data = "<patch>")]
pub async fn update(
    id: u64,
    patch: Json<ReservationPatch>,
    store: &State<Store>,
) -> Result<Json<Reservation>> {
    Ok(Json(store.update(id, patch.into_inner()).await?))
}

#[delete("/reservations/<id>")]
pub async fn delete(id: u64, store: &State<Store>) -> Result<Json<Reservation>> {
    Ok(Json(store.delete(id).await?))
}

#[get("/health")]
pub fn health(secrets: &State<SecretStore>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".into(),
        secret_loaded: secrets.is_loaded(),
    })
}
