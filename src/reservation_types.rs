use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Reservation {
    pub id: u64,
    pub host_name: String,
    pub host_email: String,
    pub date: String, // M/D/YYYY
    pub hour: String, // H:MM
    pub party_size: String,
}

/// A reservation as submitted, before the store assigns it an id.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct NewReservation {
    pub host_name: String,
    pub host_email: String,
    pub date: String,
    pub hour: String,
    pub party_size: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct ReservationPatch {
    pub host_name: Option<String>,
    pub host_email: Option<String>,
    pub date: Option<String>,
    pub hour: Option<String>,
    pub party_size: Option<String>,
}

impl NewReservation {
    pub fn with_id(self, id: u64) -> Reservation {
        Reservation {
            id,
            host_name: self.host_name,
            host_email: self.host_email,
            date: self.date,
            hour: self.hour,
            party_size: self.party_size,
        }
    }
}

impl Reservation {
    pub fn apply(&mut self, patch: &ReservationPatch) {
        fn set(field: &mut String, value: &Option<String>) {
            if let Some(ref value) = *value {
                *field = value.clone();
            }
        }

        set(&mut self.host_name, &patch.host_name);
        set(&mut self.host_email, &patch.host_email);
        set(&mut self.date, &patch.date);
        set(&mut self.hour, &patch.hour);
        set(&mut self.party_size, &patch.party_size);
    }

    pub fn is_hosted_by(&self, email: &str) -> bool {
        self.host_email.trim().eq_ignore_ascii_case(email.trim())
    }
}
