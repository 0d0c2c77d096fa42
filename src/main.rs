#[macro_use]
extern crate rocket;

use reservation_exchange::api;

#[launch]
fn rocket() -> _ {
    api::setup_rocket()
}
