//! Per-language fixed strings drawn on tags.
//!
//! Translation storage lives outside the renderer; callers hand these in.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Fixed strings for one language.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TagLabels {
    pub sale: String,
    pub special: String,
    pub sku: String,
    pub part_number: String,
    /// Label of the synthesized material spec on wide brand tags.
    pub material_details: String,
    /// Cross-reference line on dual-language brand tags.
    pub other_language_hint: String,
    /// Appended to every price when non-empty.
    pub currency: String,
}

impl Default for TagLabels {
    fn default() -> Self {
        Self {
            sale: "SALE".into(),
            special: "SPECIAL".into(),
            sku: "SKU".into(),
            part_number: "P/N".into(),
            material_details: "Material Details".into(),
            other_language_hint: "See the tag next to this one for another language".into(),
            currency: String::new(),
        }
    }
}

impl TagLabels {
    /// `"<amount> <currency>"`, or just the amount.
    pub fn with_currency(&self, amount: &str) -> String {
        if self.currency.trim().is_empty() {
            amount.to_string()
        } else {
            format!("{} {}", amount, self.currency.trim())
        }
    }
}

/// Built-in strings for the shipped languages.
pub fn built_in_labels() -> BTreeMap<String, TagLabels> {
    let en = TagLabels::default();
    let ka = TagLabels {
        sale: "ფასდაკლება".into(),
        special: "სპეციალური".into(),
        sku: "კოდი".into(),
        part_number: "ნაწილის №".into(),
        material_details: "მასალა".into(),
        other_language_hint: "სხვა ენაზე იხილეთ მეზობელი იარლიყი".into(),
        currency: String::new(),
    };
    let ru = TagLabels {
        sale: "СКИДКА".into(),
        special: "АКЦИЯ".into(),
        sku: "Артикул".into(),
        part_number: "Парт-номер".into(),
        material_details: "Материалы".into(),
        other_language_hint: "На другом языке смотрите соседний ценник".into(),
        currency: String::new(),
    };
    [("en", en), ("ka", ka), ("ru", ru)]
        .into_iter()
        .map(|(lang, labels)| (lang.to_string(), labels))
        .collect()
}
