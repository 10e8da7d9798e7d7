//! Database row mappings.
//!
//! Asset references are stored as a `<field>_url` / `<field>_public_id`
//! column pair; the pair is either fully present or fully absent.

pub mod activity;
pub mod admin;
pub mod complaint;
pub mod donor;
pub mod enquiry;
pub mod event_booking;
pub mod member;
pub mod membership_plan;
pub mod payment;
pub mod slider;
pub mod team_member;
pub mod web_setting;

pub use activity::ActivityEntity;
pub use admin::AdminEntity;
pub use complaint::ComplaintEntity;
pub use donor::DonorEntity;
pub use enquiry::EnquiryEntity;
pub use event_booking::EventBookingEntity;
pub use member::MemberEntity;
pub use membership_plan::MembershipPlanEntity;
pub use payment::PaymentDetailsEntity;
pub use slider::SliderEntity;
pub use team_member::TeamMemberEntity;
pub use web_setting::WebSettingEntity;

use domain::models::AssetRef;

/// Assemble an optional asset reference from its column pair. A half-set
/// pair is treated as absent rather than surfacing a partial reference.
pub(crate) fn asset_from_pair(url: Option<String>, public_id: Option<String>) -> Option<AssetRef> {
    match (url, public_id) {
        (Some(url), Some(public_id)) => Some(AssetRef { url, public_id }),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn complete_pair_becomes_asset_ref() {
        let asset = asset_from_pair(
            Some("https://media.example/x".to_string()),
            Some("charity/x".to_string()),
        )
        .unwrap();
        assert_eq!(asset.public_id, "charity/x");
    }

    #[test]
    fn partial_pair_is_treated_as_absent() {
        assert!(asset_from_pair(Some("https://media.example/x".to_string()), None).is_none());
        assert!(asset_from_pair(None, Some("charity/x".to_string())).is_none());
        assert!(asset_from_pair(None, None).is_none());
    }
}
