use std::fmt;

use chrono::prelude::*;
use chrono::Duration;

use crate::errors::*;

/// The moment a partner claims to have signed a request, taken from the
/// timestamp header as whole seconds since the Unix epoch.
#[derive(Debug, Clone, Eq)]
pub struct RequestTime {
    inner: DateTime<Utc>,
    rendered: String,
}

impl RequestTime {
    pub fn from_header(input: &str) -> Result<Self> {
        let secs: i64 = input
            .trim()
            .parse()
            .chain_err(|| "timestamp is not an integer")?;

        let time = match Utc.timestamp_opt(secs, 0).single() {
            Some(time) => time,
            None => bail!("timestamp out of range"),
        };

        Ok(Self::from_datetime(time))
    }

    pub fn from_datetime(time: DateTime<Utc>) -> Self {
        let rendered = time.to_rfc3339();

        Self {
            inner: time,
            rendered,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.rendered
    }

    pub fn inner(&self) -> &DateTime<Utc> {
        &self.inner
    }

    /// Whether this time lies no further than `window` from `now`, in
    /// either direction.
    pub fn within(&self, now: &DateTime<Utc>, window: Duration) -> bool {
        let skew = now.signed_duration_since(self.inner).num_seconds().abs();
        skew <= window.num_seconds()
    }
}

impl fmt::Display for RequestTime {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl PartialEq for RequestTime {
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_epoch_seconds() {
        let t = RequestTime::from_header("1000").unwrap();
        assert_eq!(t.inner().timestamp(), 1000);
        assert_eq!(t.as_str(), "1970-01-01T00:16:40+00:00");
    }

    #[test]
    fn tolerates_surrounding_whitespace() {
        assert_eq!(
            RequestTime::from_header(" 1000\n").unwrap(),
            RequestTime::from_header("1000").unwrap()
        );
    }

    #[test]
    fn rejects_malformed() {
        assert!(RequestTime::from_header("").is_err());
        assert!(RequestTime::from_header("yesterday").is_err());
        assert!(RequestTime::from_header("10.5").is_err());
        assert!(RequestTime::from_header("2017-07-01T12:00:00Z").is_err());
        assert!(RequestTime::from_header(&i64::MAX.to_string()).is_err());
    }

    #[test]
    fn skew_window_is_symmetric() {
        let now = Utc.timestamp_opt(10_000, 0).unwrap();
        let window = Duration::seconds(300);

        assert!(RequestTime::from_header("10000").unwrap().within(&now, window));
        assert!(RequestTime::from_header("9700").unwrap().within(&now, window));
        assert!(RequestTime::from_header("10300").unwrap().within(&now, window));
        assert!(!RequestTime::from_header("9699").unwrap().within(&now, window));
        assert!(!RequestTime::from_header("10301").unwrap().within(&now, window));
    }
}
