//! Canonical site content written by the seeder.
//!
//! Camping, fishing and the rule set are only written into an empty store, so
//! editing them here does not change an existing deployment. The contact
//! fields listed in [`contact_refresh_fields`] are different: they are forced
//! back to these values on every start.

use std::collections::BTreeMap;

use bson::{doc, Document};
use campsite_shared::{CampingInfo, ContactInfo, FishingInfo, Rule, RuleCategory};

pub const CONTACT_PHONE: &str = "07887 577338";
pub const CONTACT_EMAIL: &str = "info@birchwood-skegness.co.uk";
pub const CONTACT_ADDRESS: &str =
    "Birchwood Fishing & Camping, Mill Lane, Skegness, Lincolnshire, PE25 1HW, UK";
pub const CONTACT_LATITUDE: f64 = 53.16737;
pub const CONTACT_LONGITUDE: f64 = 0.31966;
pub const CONTACT_FACEBOOK: &str = "https://www.facebook.com/share/1AiuyXLNeF/";

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|item| item.to_string()).collect()
}

pub fn camping_info() -> CampingInfo {
    let pricing: BTreeMap<String, String> = [
        ("tent", "Contact for rates"),
        ("tourer", "Contact for rates"),
        ("motorhome", "Contact for rates"),
        (
            "note",
            "Prices vary by season and pitch type. Please contact us for current rates.",
        ),
    ]
    .into_iter()
    .map(|(kind, price)| (kind.to_string(), price.to_string()))
    .collect();

    CampingInfo::new(
        "Camping at Birchwood",
        "Welcome to Birchwood Fishing & Camping - a quiet, family-run campsite near Skegness, \
         Lincolnshire. We offer a peaceful retreat with excellent facilities, perfect for \
         families and pet owners.",
        strings(&[
            "Clean toilets and hot showers",
            "Washing up areas",
            "Electric hook-ups available",
            "Fresh water points",
            "Chemical disposal point",
            "Pet-friendly environment",
            "Safe for children",
            "Regular cleaning service",
        ]),
        strings(&[
            "Tent pitches",
            "Tourer pitches",
            "Motorhome pitches",
            "Up to 54 pitches available",
        ]),
        pricing,
    )
}

pub fn fishing_info() -> FishingInfo {
    FishingInfo::new(
        "Fishing at Birchwood",
        "Enjoy course fishing at our well-stocked lake featuring a variety of species. Our \
         peaceful fishing lake is perfect for both experienced anglers and beginners.",
        strings(&["Carp", "Rudd", "Roach", "Tench", "Bream"]),
        "Day tickets available - contact for pricing",
        strings(&[
            "Day tickets must be purchased before fishing",
            "Fishing from designated areas only",
            "Keep noise to a minimum",
            "Take all litter home",
            "Barbless hooks recommended",
            "Follow catch and release guidelines",
            "Children must be supervised",
        ]),
    )
}

pub fn contact_info() -> ContactInfo {
    ContactInfo::new(
        CONTACT_PHONE,
        CONTACT_EMAIL,
        CONTACT_ADDRESS,
        CONTACT_LATITUDE,
        CONTACT_LONGITUDE,
    )
    .with_facebook(CONTACT_FACEBOOK)
}

/// Contact fields overwritten on every start.
///
/// `email`, `id`, `updated_at` and anything an operator added stay as stored.
pub fn contact_refresh_fields() -> Document {
    doc! {
        "phone": CONTACT_PHONE,
        "address": CONTACT_ADDRESS,
        "latitude": CONTACT_LATITUDE,
        "longitude": CONTACT_LONGITUDE,
        "facebook": CONTACT_FACEBOOK,
    }
}

pub fn rules() -> Vec<Rule> {
    vec![
        Rule::new(
            "rule_1",
            "Check-in/Check-out",
            "Check-in from 2 PM, Check-out by 11 AM",
            RuleCategory::General,
            1,
        ),
        Rule::new(
            "rule_2",
            "Quiet Hours",
            "Please keep noise to a minimum between 10 PM and 8 AM",
            RuleCategory::General,
            2,
        ),
        Rule::new(
            "rule_3",
            "Pets",
            "Pets are welcome but must be kept on a lead and under control at all times",
            RuleCategory::General,
            3,
        ),
        Rule::new(
            "rule_4",
            "Speed Limit",
            "Maximum speed limit of 5 mph on site",
            RuleCategory::Camping,
            4,
        ),
        Rule::new(
            "rule_5",
            "Fires",
            "No open fires. BBQs allowed but must be off the ground",
            RuleCategory::Camping,
            5,
        ),
        Rule::new(
            "rule_6",
            "Waste Disposal",
            "Please use designated bins and keep the site clean",
            RuleCategory::General,
            6,
        ),
    ]
}
