//! # Campsite Shared
//!
//! This crate defines the document models stored by the campsite content backend
//! and the collection names and reserved identifiers they live under.

pub mod types;

pub use types::camping_info::CampingInfo;
pub use types::collection::{Collection, SingletonDocument};
pub use types::contact_info::ContactInfo;
pub use types::fishing_info::FishingInfo;
pub use types::gallery_image::{GalleryCategory, GalleryImage};
pub use types::rule::{Rule, RuleCategory};
