use chrono::Utc;

use crate::error::Error;
use crate::{Result, Timestamp};

/// Source of the `time` field stamped onto every request.
///
/// `System` reads the local clock for each call. `Fixed` pins every request to
/// one timestamp, which makes signatures reproducible.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum TimePolicy {
    #[default]
    System,
    Fixed(Timestamp),
}

impl TimePolicy {
    pub(crate) fn resolve(self) -> Result<Timestamp> {
        match self {
            TimePolicy::Fixed(ts) => Ok(ts),
            TimePolicy::System => {
                let now = Utc::now().timestamp();
                Timestamp::try_from(now).map_err(|e| {
                    Error::validation(format!("system clock is before the unix epoch ({now}): {e}"))
                })
            }
        }
    }
}
