use std::sync::Arc;

use log::{error, info, warn};
use rocket::fairing::AdHoc;
use rocket::{Build, Rocket};

use crate::config::ExchangeConfig;
use crate::reservation_storage::{FileStore, Store};
use crate::secret_store::SecretStore;

pub mod endpoints;
pub mod guards;
pub mod types;


pub fn setup_rocket() -> Rocket<Build> {
    attach_state(rocket::build())
}

/// Mount the routes and load configuration, secret and database while the
/// given instance ignites. Launch aborts if config or database can't be read;
/// a missing secret only disables the partner routes.
pub fn attach_state(rocket: Rocket<Build>) -> Rocket<Build> {
    mount(rocket).attach(AdHoc::try_on_ignite("Exchange State", |rocket| async move {
        let config = match ExchangeConfig::from_figment(rocket.figment()) {
            Ok(config) => config,
            Err(e) => {
                error!("{}", e);
                return Err(rocket);
            }
        };

        let secrets = SecretStore::new();
        if let Err(e) = secrets.load_from(&config.secret_path).await {
            warn!("{}; partner routes will reject every request", e);
        }

        let store = match FileStore::open(&config.database_path) {
            Ok(store) => store,
            Err(e) => {
                error!("{}", e);
                return Err(rocket);
            }
        };

        info!(
            "serving reservations from {}",
            config.database_path.display()
        );

        Ok(manage(rocket, config, secrets, Arc::new(store)))
    }))
}

pub fn manage(
    rocket: Rocket<Build>,
    config: ExchangeConfig,
    secrets: SecretStore,
    store: Store,
) -> Rocket<Build> {
    rocket.manage(config).manage(secrets).manage(store)
}

pub fn mount(rocket: Rocket<Build>) -> Rocket<Build> {
    rocket
        .mount(
            "/exchange/restaurant",
            routes![
                endpoints::exchange_by_email,
                endpoints::exchange_by_email_body,

                endpoints::list,
                endpoints::get_by_id,
                endpoints::add,
                endpoints::update,
                endpoints::delete,
            ],
        )
        .mount("/", routes![endpoints::health])
}
