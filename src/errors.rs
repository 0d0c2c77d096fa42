use std::io::Cursor;

use rocket::http::{ContentType, Status};
use rocket::request::Request;
use rocket::response::{self, Responder, Response};
use serde_json::json;

error_chain! {
    foreign_links {
        Io(::std::io::Error);
        Json(::serde_json::Error);
        Mvdb(::mvdb::errors::Error);
    }

    errors {
        SecretUnavailable {
            description("signing secret unavailable")
            display("signing secret has not been loaded")
        }

        VerificationFailed(reason: String) {
            description("request verification failed")
            display("request verification failed: {}", reason)
        }

        ReservationNotFound(id: u64) {
            description("reservation not found")
            display("no reservation with id {}", id)
        }

        StoreTimeout {
            description("reservation store timed out")
            display("reservation store did not answer in time")
        }

        BadRequest(reason: String) {
            description("malformed request")
            display("malformed request: {}", reason)
        }
    }
}

/// Body sent for every authorization failure, whatever the cause.
const UNAUTHORIZED: &str = "unauthorized";

impl Error {
    /// True for the two kinds that collapse into a single 401 outcome.
    pub fn is_authorization_failure(&self) -> bool {
        match *self.kind() {
            ErrorKind::SecretUnavailable | ErrorKind::VerificationFailed(_) => true,
            _ => false,
        }
    }

    pub fn status(&self) -> Status {
        match *self.kind() {
            ErrorKind::SecretUnavailable | ErrorKind::VerificationFailed(_) => Status::Unauthorized,
            ErrorKind::ReservationNotFound(_) => Status::NotFound,
            ErrorKind::StoreTimeout => Status::ServiceUnavailable,
            ErrorKind::BadRequest(_) => Status::BadRequest,
            _ => Status::InternalServerError,
        }
    }

    fn render_message(&self) -> String {
        if self.is_authorization_failure() {
            return UNAUTHORIZED.into();
        }

        let mut rslt = String::new();

        #[cfg(debug_assertions)]
        {
            rslt += &format!("Error: {}", self);
            for ce in self.iter().skip(1) {
                rslt += &format!(", caused by: {}", ce);
            }
        }

        #[cfg(not(debug_assertions))]
        {
            rslt += match *self.kind() {
                ErrorKind::ReservationNotFound(_) => "reservation not found",
                ErrorKind::StoreTimeout => "reservation store unavailable",
                ErrorKind::BadRequest(_) => "malformed request",
                _ => "request failed",
            };
        }

        rslt
    }
}

// Implement `Responder` for `error_chain`'s `Error` type
impl<'r, 'o: 'r> Responder<'r, 'o> for Error {
    fn respond_to(self, _: &'r Request<'_>) -> response::Result<'o> {
        let resp = json!({
            "status": "failure",
            "message": self.render_message(),
        })
        .to_string();

        Response::build()
            .status(self.status())
            .header(ContentType::JSON)
            .sized_body(resp.len(), Cursor::new(resp))
            .ok()
    }
}
