//! # Product Records
//!
//! The product data a tag is rendered from, as handed over by the data store.
//!
//! Records deserialize from the store's JSON shape (PascalCase keys). Attribute
//! and extra top-level fields keep their document order, since spec discovery
//! order follows it.
//!
//! ```
//! use pricetag::record::ProductRecord;
//!
//! let record: ProductRecord = serde_json::from_str(r#"{
//!     "SKU": "A-100",
//!     "Name": "Laptop",
//!     "RegularPrice": "1299,00",
//!     "Attributes": {"RAM": "16GB"},
//!     "Weight": 1.4
//! }"#).unwrap();
//!
//! assert_eq!(record.attributes.get("RAM"), Some("16GB"));
//! assert_eq!(record.extra.get("Weight"), Some("1.4"));
//! ```

pub mod columns;
pub mod fields;
pub mod price;

pub use columns::{ColumnMapping, ColumnRule};
pub use fields::FieldMap;
pub use price::{PriceDisplay, PriceInfo, format_amount, parse_price};

use serde::{Deserialize, Serialize};

use crate::error::{Result, TagError};

/// Accept a string or a bare number for price-like fields.
pub(crate) fn deserialize_lenient_string<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum StringOrNumber {
        Text(String),
        Number(serde_json::Number),
        Null(()),
    }

    match StringOrNumber::deserialize(deserializer)? {
        StringOrNumber::Text(s) => Ok(s),
        StringOrNumber::Number(n) => Ok(n.to_string()),
        StringOrNumber::Null(()) => Ok(String::new()),
    }
}

/// One product as delivered by the data store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ProductRecord {
    #[serde(rename = "SKU", default, deserialize_with = "deserialize_lenient_string")]
    pub sku: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, deserialize_with = "deserialize_lenient_string")]
    pub regular_price: String,
    #[serde(default, deserialize_with = "deserialize_lenient_string")]
    pub sale_price: String,
    #[serde(default)]
    pub part_number: Option<String>,
    /// Free text with embedded list markup (HTML `<li>` or Markdown lists).
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub attributes: FieldMap,
    #[serde(rename = "QRUrl", default)]
    pub qr_url: Option<String>,
    /// Any other top-level field, filtered later by the column mapping.
    #[serde(flatten)]
    pub extra: FieldMap,
}

impl ProductRecord {
    /// Minimal record with a SKU and a name.
    pub fn new(sku: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            sku: sku.into(),
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_prices(mut self, regular: impl Into<String>, sale: impl Into<String>) -> Self {
        self.regular_price = regular.into();
        self.sale_price = sale.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push(name, value);
        self
    }

    pub fn with_part_number(mut self, part_number: impl Into<String>) -> Self {
        self.part_number = Some(part_number.into());
        self
    }

    pub fn with_qr_url(mut self, url: impl Into<String>) -> Self {
        self.qr_url = Some(url.into());
        self
    }

    /// Reject records that cannot produce a tag.
    pub fn validate(&self) -> Result<()> {
        if self.sku.trim().is_empty() {
            return Err(TagError::InvalidRecord("missing SKU".into()));
        }
        Ok(())
    }

    /// Parsed price pair.
    pub fn prices(&self) -> PriceInfo {
        PriceInfo::new(&self.regular_price, &self.sale_price)
    }

    /// Part number, if present and non-blank.
    pub fn part_number(&self) -> Option<&str> {
        self.part_number
            .as_deref()
            .map(str::trim)
            .filter(|p| !p.is_empty())
    }

    /// QR target, if present and non-blank.
    pub fn qr_url(&self) -> Option<&str> {
        self.qr_url.as_deref().map(str::trim).filter(|u| !u.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_full_record() {
        let record: ProductRecord = serde_json::from_str(
            r#"{
                "SKU": 12345,
                "Name": "Printer",
                "RegularPrice": 249.9,
                "SalePrice": null,
                "PartNumber": "PN-1",
                "Description": "<ul><li>Speed: 20ppm</li></ul>",
                "Attributes": {"Color": "Black", "Duplex": "Yes"},
                "QRUrl": "https://example.com/p/12345",
                "Warranty": "2 years",
                "Stock": 4
            }"#,
        )
        .unwrap();

        assert_eq!(record.sku, "12345");
        assert_eq!(record.regular_price, "249.9");
        assert_eq!(record.sale_price, "");
        assert_eq!(record.part_number(), Some("PN-1"));
        assert_eq!(record.qr_url(), Some("https://example.com/p/12345"));
        let attr_keys: Vec<_> = record.attributes.iter().map(|(k, _)| k).collect();
        assert_eq!(attr_keys, ["Color", "Duplex"]);
        let extra_keys: Vec<_> = record.extra.iter().map(|(k, _)| k).collect();
        assert_eq!(extra_keys, ["Warranty", "Stock"]);
        assert_eq!(record.extra.get("Stock"), Some("4"));
    }

    #[test]
    fn test_validate_requires_sku() {
        assert!(ProductRecord::new("", "x").validate().is_err());
        assert!(ProductRecord::new("  ", "x").validate().is_err());
        assert!(ProductRecord::new("S1", "x").validate().is_ok());
    }

    #[test]
    fn test_blank_optional_fields() {
        let record = ProductRecord::new("S1", "x")
            .with_part_number("  ")
            .with_qr_url("");
        assert_eq!(record.part_number(), None);
        assert_eq!(record.qr_url(), None);
    }
}
