//! Membership expiry date arithmetic.
//!
//! A membership plan's duration is either a count of months or years, or
//! lifetime (non-expiring). Renewal extends from the current expiry when the
//! membership is still active, otherwise from now.

use chrono::{DateTime, Months, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Unit of a plan's duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DurationUnit {
    Months,
    Years,
    Lifetime,
}

impl DurationUnit {
    /// String form stored in the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            DurationUnit::Months => "months",
            DurationUnit::Years => "years",
            DurationUnit::Lifetime => "lifetime",
        }
    }

    /// Parse the stored string form. Unknown values are treated as lifetime
    /// so a bad row never produces a spurious expiry.
    pub fn parse(s: &str) -> Self {
        match s {
            "months" => DurationUnit::Months,
            "years" => DurationUnit::Years,
            _ => DurationUnit::Lifetime,
        }
    }
}

/// Expiry for a membership starting at `from`. `None` means non-expiring.
pub fn expiry_from(
    from: DateTime<Utc>,
    unit: DurationUnit,
    value: u32,
) -> Option<DateTime<Utc>> {
    let months = match unit {
        DurationUnit::Months => value,
        DurationUnit::Years => value.saturating_mul(12),
        DurationUnit::Lifetime => return None,
    };
    from.checked_add_months(Months::new(months))
}

/// Expiry for a renewal: extends from the current expiry while it is still
/// in the future, otherwise from `now`.
pub fn renewal_expiry(
    now: DateTime<Utc>,
    current: Option<DateTime<Utc>>,
    unit: DurationUnit,
    value: u32,
) -> Option<DateTime<Utc>> {
    let base = match current {
        Some(expiry) if expiry > now => expiry,
        _ => now,
    };
    expiry_from(base, unit, value)
}

/// Generate a membership number: `CM-` plus eight uppercase hex chars.
/// Uniqueness is enforced by the storage layer's unique constraint; the
/// caller retries on collision.
pub fn generate_membership_no() -> String {
    let n: u32 = rand::thread_rng().gen();
    format!("CM-{n:08X}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap()
    }

    #[test]
    fn months_add_calendar_months() {
        let start = at(2024, 1, 31);
        let expiry = expiry_from(start, DurationUnit::Months, 1).unwrap();
        // Chrono clamps to the end of the shorter month.
        assert_eq!(expiry, at(2024, 2, 29));
    }

    #[test]
    fn years_are_twelve_months_each() {
        let start = at(2024, 3, 15);
        let expiry = expiry_from(start, DurationUnit::Years, 2).unwrap();
        assert_eq!(expiry, at(2026, 3, 15));
    }

    #[test]
    fn lifetime_never_expires() {
        assert!(expiry_from(at(2024, 1, 1), DurationUnit::Lifetime, 99).is_none());
    }

    #[test]
    fn renewal_extends_active_membership_from_current_expiry() {
        let now = at(2024, 6, 1);
        let current = Some(at(2024, 9, 1));
        let expiry = renewal_expiry(now, current, DurationUnit::Months, 6).unwrap();
        assert_eq!(expiry, at(2025, 3, 1));
    }

    #[test]
    fn renewal_of_lapsed_membership_starts_from_now() {
        let now = at(2024, 6, 1);
        let current = Some(at(2024, 1, 1));
        let expiry = renewal_expiry(now, current, DurationUnit::Years, 1).unwrap();
        assert_eq!(expiry, at(2025, 6, 1));
    }

    #[test]
    fn renewal_of_lifetime_membership_stays_non_expiring() {
        let now = at(2024, 6, 1);
        assert!(renewal_expiry(now, None, DurationUnit::Lifetime, 1).is_none());
    }

    #[test]
    fn membership_no_has_expected_shape() {
        let no = generate_membership_no();
        assert!(no.starts_with("CM-"));
        assert_eq!(no.len(), 11);
        assert!(no[3..].chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn duration_unit_round_trips_through_stored_string() {
        for unit in [
            DurationUnit::Months,
            DurationUnit::Years,
            DurationUnit::Lifetime,
        ] {
            assert_eq!(DurationUnit::parse(unit.as_str()), unit);
        }
        assert_eq!(DurationUnit::parse("bogus"), DurationUnit::Lifetime);
    }
}
