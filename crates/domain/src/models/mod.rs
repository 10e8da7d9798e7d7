//! Domain models for the Charity CMS.

pub mod activity;
pub mod admin;
pub mod asset;
pub mod complaint;
pub mod donor;
pub mod enquiry;
pub mod event_booking;
pub mod member;
pub mod membership_plan;
pub mod patch;
pub mod payment;
pub mod slider;
pub mod team_member;
pub mod web_setting;

pub use activity::{Activity, ListActivitiesQuery};
pub use admin::{Admin, ListAdminsQuery};
pub use asset::{AssetPayload, AssetRef};
pub use complaint::{Complaint, ComplaintStatus, ListComplaintsQuery};
pub use donor::{Donor, ListDonorsQuery};
pub use enquiry::{Enquiry, ListEnquiriesQuery};
pub use event_booking::{EventBooking, ListEventBookingsQuery};
pub use member::{ListMembersQuery, Member};
pub use membership_plan::{ListMembershipPlansQuery, MembershipPlan};
pub use patch::Patch;
pub use payment::PaymentDetails;
pub use slider::{ListSlidersQuery, Slider};
pub use team_member::{ListTeamMembersQuery, TeamMember};
pub use web_setting::{ListWebSettingsQuery, WebSetting};

use lazy_static::lazy_static;
use regex::Regex;
use validator::ValidationError;

lazy_static! {
    static ref PHONE_RE: Regex = Regex::new(r"^\+?[0-9][0-9 \-]{6,14}$").unwrap();
}

/// Shared phone validator for request DTOs.
pub fn validate_phone(phone: &str) -> Result<(), ValidationError> {
    if PHONE_RE.is_match(phone) {
        Ok(())
    } else {
        let mut err = ValidationError::new("phone");
        err.message = Some("Invalid phone number".into());
        Err(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phone_validator_accepts_common_formats() {
        assert!(validate_phone("+91 98765 43210").is_ok());
        assert!(validate_phone("9876543210").is_ok());
        assert!(validate_phone("022-2345678").is_ok());
    }

    #[test]
    fn list_queries_are_exported_at_the_models_root() {
        // Repositories import these from the models root.
        assert!(ListDonorsQuery::default().search.is_none());
        assert!(ListWebSettingsQuery::default().search.is_none());
    }

    #[test]
    fn phone_validator_rejects_garbage() {
        assert!(validate_phone("abc").is_err());
        assert!(validate_phone("12").is_err());
        assert!(validate_phone("++123456789").is_err());
    }
}
