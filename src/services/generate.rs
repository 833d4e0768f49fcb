//! Random UUID generation.

use uuid::Uuid;

use crate::error::{AppError, AppResult};

/// Smallest number of UUIDs a single request may ask for.
pub const MIN_UUID_COUNT: i64 = 1;

/// Largest number of UUIDs a single request may ask for.
pub const MAX_UUID_COUNT: i64 = 20;

/// Generate `count` random (v4) UUIDs.
///
/// The count is validated before anything is generated; out-of-range values
/// are rejected rather than clamped.
pub fn generate_uuids(count: i64) -> AppResult<Vec<Uuid>> {
    if !(MIN_UUID_COUNT..=MAX_UUID_COUNT).contains(&count) {
        return Err(count_error());
    }

    Ok((0..count).map(|_| Uuid::new_v4()).collect())
}

/// Error for a missing, malformed or out-of-range count.
pub fn count_error() -> AppError {
    AppError::BadRequest(format!(
        "count must be an integer between {MIN_UUID_COUNT} and {MAX_UUID_COUNT}"
    ))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_generates_requested_count() {
        for count in MIN_UUID_COUNT..=MAX_UUID_COUNT {
            let uuids = generate_uuids(count).unwrap();
            assert_eq!(uuids.len() as i64, count);
        }
    }

    #[test]
    fn test_uuids_are_distinct_v4() {
        let uuids = generate_uuids(MAX_UUID_COUNT).unwrap();
        let unique: HashSet<_> = uuids.iter().collect();

        assert_eq!(unique.len(), uuids.len());
        assert!(uuids.iter().all(|u| u.get_version_num() == 4));
    }

    #[test]
    fn test_out_of_range_rejected() {
        for count in [0, 21, -1, i64::MAX] {
            let err = generate_uuids(count).unwrap_err();
            assert!(matches!(err, AppError::BadRequest(_)));
            assert!(err.to_string().contains("between 1 and 20"));
        }
    }
}
