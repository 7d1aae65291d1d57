//! Document types persisted in the content store.
//!
//! Field names follow the stored representation exactly (`pitchTypes`,
//! `dayTicketPrice`, `imageData`), so the models can be written with
//! `bson::to_document` and read back without a mapping layer.

pub mod camping_info;
pub mod collection;
pub mod contact_info;
pub mod fishing_info;
pub mod gallery_image;
pub mod rule;

pub use camping_info::CampingInfo;
pub use collection::{Collection, SingletonDocument};
pub use contact_info::ContactInfo;
pub use fishing_info::FishingInfo;
pub use gallery_image::{GalleryCategory, GalleryImage};
pub use rule::{Rule, RuleCategory};
