//! Repository layer.
//!
//! Each repository owns the SQL for one table. List endpoints run a count
//! and a page slice against the same filter, so the two queries can never
//! disagree about what matches.

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

pub use activity::ActivityRepository;
pub use admin::AdminRepository;
pub use complaint::ComplaintRepository;
pub use donor::DonorRepository;
pub use enquiry::EnquiryRepository;
pub use event_booking::EventBookingRepository;
pub use member::MemberRepository;
pub use membership_plan::MembershipPlanRepository;
pub use payment::PaymentRepository;
pub use slider::SliderRepository;
pub use team_member::TeamMemberRepository;
pub use web_setting::WebSettingRepository;
