//! Pre-persist timestamp hook
//!
//! Every store stamps entities through these functions on insert and update,
//! so creation and modification times are assigned in one place. Stamps are
//! truncated to microseconds to match Postgres `TIMESTAMPTZ` precision.

use chrono::{DateTime, Duration, SubsecRound, Utc};

/// Stamp for a newly inserted entity
pub fn creation_stamp() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

/// Stamp for a modified entity, strictly later than its previous stamp
pub fn modification_stamp(previous: DateTime<Utc>) -> DateTime<Utc> {
    let now = creation_stamp();
    if now > previous {
        now
    } else {
        previous + Duration::microseconds(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modification_stamp_is_strictly_increasing() {
        let future = Utc::now().trunc_subsecs(6) + Duration::hours(1);
        let stamp = modification_stamp(future);
        assert_eq!(stamp, future + Duration::microseconds(1));

        let past = Utc::now() - Duration::hours(1);
        assert!(modification_stamp(past) > past);
    }

    #[test]
    fn test_creation_stamp_precision() {
        let stamp = creation_stamp();
        assert_eq!(stamp.timestamp_subsec_nanos() % 1_000, 0);
    }
}
