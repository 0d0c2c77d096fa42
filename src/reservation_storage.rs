use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use mvdb::Mvdb;
use rocket::tokio::task;
use serde::{Deserialize, Serialize};

use crate::errors::*;
use crate::reservation_types::*;

/// Handle shared by every route.
pub type Store = Arc<dyn ReservationStore>;

#[rocket::async_trait]
pub trait ReservationStore: Send + Sync {
    async fn get(&self, id: u64) -> Result<Reservation>;
    async fn list(&self) -> Result<Vec<Reservation>>;
    async fn get_by_email(&self, email: &str) -> Result<Vec<Reservation>>;
    async fn add(&self, reservation: NewReservation) -> Result<Reservation>;
    async fn update(&self, id: u64, patch: ReservationPatch) -> Result<Reservation>;
    async fn delete(&self, id: u64) -> Result<Reservation>;
}

#[derive(Serialize, Deserialize, Clone, Default)]
pub struct ReservationDB {
    next_id: u64,
    reservations: BTreeMap<u64, Reservation>,
}

impl ReservationDB {
    pub fn get(&self, id: u64) -> Result<Reservation> {
        self.reservations
            .get(&id)
            .cloned()
            .ok_or_else(|| ErrorKind::ReservationNotFound(id).into())
    }

    pub fn list(&self) -> Vec<Reservation> {
        self.reservations.values().cloned().collect()
    }

    pub fn by_email(&self, email: &str) -> Vec<Reservation> {
        self.reservations
            .values()
            .filter(|r| r.is_hosted_by(email))
            .cloned()
            .collect()
    }

    pub fn insert(&mut self, new: NewReservation) -> Reservation {
        // Ids are never reused, even after a delete
        self.next_id += 1;
        let reservation = new.with_id(self.next_id);
        self.reservations.insert(reservation.id, reservation.clone());
        reservation
    }

    pub fn update(&mut self, id: u64, patch: &ReservationPatch) -> Result<Reservation> {
        let reservation = self
            .reservations
            .get_mut(&id)
            .ok_or_else(|| Error::from(ErrorKind::ReservationNotFound(id)))?;

        reservation.apply(patch);
        Ok(reservation.clone())
    }

    pub fn remove(&mut self, id: u64) -> Result<Reservation> {
        self.reservations
            .remove(&id)
            .ok_or_else(|| ErrorKind::ReservationNotFound(id).into())
    }
}

/// Reservations kept in a pretty-printed JSON file.
#[derive(Clone)]
pub struct FileStore {
    db: Mvdb<ReservationDB>,
}

impl FileStore {
    pub fn open(path: &Path) -> Result<Self> {
        let db = Mvdb::from_file_or_default_pretty(path)
            .chain_err(|| format!("failed to open reservation database {}", path.display()))?;

        Ok(Self { db })
    }

    /// Run `action` against the database on the blocking pool, since every
    /// mutation rewrites the file.
    async fn run<F, R>(&self, action: F) -> Result<R>
    where
        F: FnOnce(&Mvdb<ReservationDB>) -> Result<R> + Send + 'static,
        R: Send + 'static,
    {
        let db = self.db.clone();
        task::spawn_blocking(move || action(&db))
            .await
            .chain_err(|| "reservation store task did not complete")?
    }
}

#[rocket::async_trait]
impl ReservationStore for FileStore {
    async fn get(&self, id: u64) -> Result<Reservation> {
        self.run(move |db| db.access(|db| db.get(id))?).await
    }

    async fn list(&self) -> Result<Vec<Reservation>> {
        self.run(|db| Ok(db.access(|db| db.list())?)).await
    }

    async fn get_by_email(&self, email: &str) -> Result<Vec<Reservation>> {
        let email = email.to_string();
        self.run(move |db| Ok(db.access(|db| db.by_email(&email))?)).await
    }

    async fn add(&self, reservation: NewReservation) -> Result<Reservation> {
        self.run(move |db| Ok(db.access_mut(|db| db.insert(reservation.clone()))?))
            .await
    }

    async fn update(&self, id: u64, patch: ReservationPatch) -> Result<Reservation> {
        self.run(move |db| db.access_mut(|db| db.update(id, &patch))?).await
    }

    async fn delete(&self, id: u64) -> Result<Reservation> {
        self.run(move |db| db.access_mut(|db| db.remove(id))?).await
    }
}
