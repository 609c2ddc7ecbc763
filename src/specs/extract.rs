//! Spec candidate collection and de-duplication.

use std::collections::HashMap;

use super::description;
use crate::record::{ColumnMapping, ProductRecord};

/// Extract the ordered, de-duplicated spec list of a record.
///
/// Sources are concatenated as description items, then attributes, then
/// whitelisted top-level fields. Running this twice yields the same list.
pub fn extract(record: &ProductRecord, mapping: &ColumnMapping) -> Vec<String> {
    dedupe(candidates(record, mapping))
}

/// All spec candidates before de-duplication, in source order.
pub fn candidates(record: &ProductRecord, mapping: &ColumnMapping) -> Vec<String> {
    let mut specs = description::list_items(&record.description);

    for (name, value) in record.attributes.iter() {
        if let Some(label) = mapping.attribute_label(name) {
            push_field(&mut specs, label, value);
        }
    }

    for (name, value) in record.extra.iter() {
        if let Some(label) = mapping.field_label(name) {
            push_field(&mut specs, label, value);
        }
    }

    specs
}

fn push_field(specs: &mut Vec<String>, label: &str, value: &str) {
    let value = value.trim();
    if !value.is_empty() {
        specs.push(format!("{}: {}", label.trim(), value));
    }
}

/// Split a `"Label: Value"` spec. Bare phrases return `None`.
pub fn split_spec(spec: &str) -> Option<(&str, &str)> {
    spec.split_once(':')
        .map(|(label, value)| (label.trim(), value.trim()))
}

/// Normalize a label for duplicate detection.
///
/// Lowercases and trims, collapses anything mentioning "warranty" to
/// `warranty`, then drops a trailing `(s)` or plural `s`.
pub fn normalize_label(label: &str) -> String {
    let lower = label.trim().to_lowercase();
    if lower.contains("warranty") {
        return "warranty".to_string();
    }
    if let Some(stripped) = lower.strip_suffix("(s)") {
        return stripped.trim_end().to_string();
    }
    match lower.strip_suffix('s') {
        Some(stripped) if !stripped.is_empty() => stripped.to_string(),
        _ => lower,
    }
}

/// Whether a spec is warranty-type (label or bare phrase mentions warranty).
pub fn is_warranty(spec: &str) -> bool {
    let label = split_spec(spec).map(|(label, _)| label).unwrap_or(spec);
    label.to_lowercase().contains("warranty")
}

/// Bare phrases and labeled specs never share a key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum SpecKey {
    Label(String),
    Phrase(String),
}

fn key_of(spec: &str) -> (SpecKey, usize) {
    match split_spec(spec) {
        Some((label, value)) => (
            SpecKey::Label(normalize_label(label)),
            value.chars().count(),
        ),
        None => (SpecKey::Phrase(spec.to_string()), 0),
    }
}

/// Keep one spec per normalized label, preferring the longest value.
///
/// Output order is the first-seen order of each surviving key; ties keep the
/// earlier entry.
pub fn dedupe(specs: Vec<String>) -> Vec<String> {
    let mut order: Vec<SpecKey> = Vec::new();
    let mut best: HashMap<SpecKey, (usize, String)> = HashMap::new();

    for spec in specs {
        let spec = spec.trim().to_string();
        if spec.is_empty() {
            continue;
        }
        let (key, value_len) = key_of(&spec);
        match best.get_mut(&key) {
            Some(slot) => {
                if value_len > slot.0 {
                    *slot = (value_len, spec);
                }
            }
            None => {
                order.push(key.clone());
                best.insert(key, (value_len, spec));
            }
        }
    }

    order
        .into_iter()
        .filter_map(|key| best.remove(&key).map(|(_, spec)| spec))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn record() -> ProductRecord {
        ProductRecord::new("SKU1", "Laptop")
            .with_description(
                "<ul><li>Processor: i5</li><li>RAM: 8GB</li><li>Warranty: 1 year</li><li>Backlit keyboard</li></ul>",
            )
            .with_attribute("ram", "8GB DDR4 3200MHz")
            .with_attribute("Colors", "Silver")
            .with_attribute("internal_code", "X-99")
    }

    #[test]
    fn test_extract_merges_sources() {
        let mut rec = record();
        rec.extra.push("Manufacturer Warranty", "24 months limited");
        rec.extra.push("Stock", "7");
        let mapping = ColumnMapping::new()
            .rename("ram", "RAM")
            .ignore("internal_code")
            .show("Manufacturer Warranty");

        assert_eq!(
            extract(&rec, &mapping),
            vec![
                "Processor: i5",
                "RAM: 8GB DDR4 3200MHz",
                "Manufacturer Warranty: 24 months limited",
                "Backlit keyboard",
                "Colors: Silver",
            ]
        );
    }

    #[test]
    fn test_extract_is_idempotent() {
        let mapping = ColumnMapping::new().rename("ram", "RAM");
        let once = extract(&record(), &mapping);
        let twice = extract(&record(), &mapping);
        assert_eq!(once, twice);
        assert_eq!(dedupe(once.clone()), once);
    }

    #[test]
    fn test_normalize_label() {
        assert_eq!(normalize_label("  Colors "), "color");
        assert_eq!(normalize_label("Port(s)"), "port");
        assert_eq!(normalize_label("Extended Warranty Period"), "warranty");
        assert_eq!(normalize_label("RAM"), "ram");
        assert_eq!(normalize_label("s"), "s");
    }

    #[test]
    fn test_plural_labels_collapse() {
        let specs = vec!["Port: USB".to_string(), "Ports: USB, HDMI".to_string()];
        assert_eq!(dedupe(specs), vec!["Ports: USB, HDMI"]);
    }

    #[test]
    fn test_tie_keeps_first() {
        let specs = vec!["Color: Red".to_string(), "colour: Red".to_string(), "COLOR: Blu".to_string()];
        assert_eq!(dedupe(specs), vec!["Color: Red", "colour: Red"]);
    }

    #[test]
    fn test_bare_phrase_and_label_are_distinct() {
        let specs = vec!["Bluetooth".to_string(), "Bluetooth: 5.2".to_string()];
        assert_eq!(dedupe(specs), vec!["Bluetooth", "Bluetooth: 5.2"]);
    }

    #[test]
    fn test_duplicate_bare_phrases_collapse() {
        let specs = vec!["Backlit".to_string(), "Backlit".to_string()];
        assert_eq!(dedupe(specs), vec!["Backlit"]);
    }

    #[test]
    fn test_is_warranty() {
        assert!(is_warranty("Warranty: 2 years"));
        assert!(is_warranty("2 year limited warranty"));
        assert!(!is_warranty("Weight: 2kg"));
    }

    #[test]
    fn test_empty_record() {
        assert!(extract(&ProductRecord::new("S", "N"), &ColumnMapping::new()).is_empty());
    }
}
