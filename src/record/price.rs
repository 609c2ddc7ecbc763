//! Price parsing, sale detection and display formatting.
//!
//! Prices arrive as strings that may use a comma decimal separator
//! (`"80,00"`). Parsing never fails loudly: a string that does not parse is
//! shown verbatim and never counts as a sale.

/// Parse a price string, normalizing a decimal comma to a dot.
///
/// When both separators are present, the last one is the decimal separator
/// and the other is treated as a thousands separator (`"1.299,00"`).
pub fn parse_price(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .trim()
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '\u{a0}')
        .collect();
    if cleaned.is_empty() {
        return None;
    }

    let normalized = match (cleaned.rfind(','), cleaned.rfind('.')) {
        (Some(comma), Some(dot)) if comma > dot => cleaned.replace('.', "").replace(',', "."),
        (Some(_), Some(_)) => cleaned.replace(',', ""),
        (Some(_), None) => cleaned.replace(',', "."),
        _ => cleaned,
    };

    normalized.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Format an amount with two decimals.
pub fn format_amount(value: f64) -> String {
    format!("{:.2}", value)
}

/// What the price block should show.
#[derive(Debug, Clone, PartialEq)]
pub enum PriceDisplay {
    /// Sale price emphasized, regular price struck through.
    Sale { sale: f64, regular: f64 },
    /// A single valid price.
    Single(f64),
    /// An unparseable price string, shown as is.
    Raw(String),
    /// Nothing to show.
    None,
}

/// Regular/sale price pair of one record.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceInfo {
    pub regular_raw: String,
    pub sale_raw: String,
    pub regular: Option<f64>,
    pub sale: Option<f64>,
}

impl PriceInfo {
    pub fn new(regular: &str, sale: &str) -> Self {
        Self {
            regular_raw: regular.trim().to_string(),
            sale_raw: sale.trim().to_string(),
            regular: parse_price(regular),
            sale: parse_price(sale),
        }
    }

    /// A sale is active when both prices parse, the sale price is positive,
    /// and it differs from the regular price.
    pub fn is_on_sale(&self) -> bool {
        match (self.sale, self.regular) {
            (Some(sale), Some(regular)) => sale > 0.0 && (sale - regular).abs() > f64::EPSILON,
            _ => false,
        }
    }

    pub fn display(&self) -> PriceDisplay {
        if self.is_on_sale() {
            if let (Some(sale), Some(regular)) = (self.sale, self.regular) {
                return PriceDisplay::Sale { sale, regular };
            }
        }
        if let Some(sale) = self.sale.filter(|v| *v > 0.0) {
            return PriceDisplay::Single(sale);
        }
        if let Some(regular) = self.regular.filter(|v| *v > 0.0) {
            return PriceDisplay::Single(regular);
        }
        if self.regular.is_none() && !self.regular_raw.is_empty() {
            return PriceDisplay::Raw(self.regular_raw.clone());
        }
        if self.sale.is_none() && !self.sale_raw.is_empty() {
            return PriceDisplay::Raw(self.sale_raw.clone());
        }
        PriceDisplay::None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_price_variants() {
        assert_eq!(parse_price("100.00"), Some(100.0));
        assert_eq!(parse_price("80,00"), Some(80.0));
        assert_eq!(parse_price(" 1 299,50 "), Some(1299.5));
        assert_eq!(parse_price("1.299,00"), Some(1299.0));
        assert_eq!(parse_price("1,299.00"), Some(1299.0));
        assert_eq!(parse_price(""), None);
        assert_eq!(parse_price("call us"), None);
        assert_eq!(parse_price("NaN"), None);
    }

    #[test]
    fn test_sale_detected() {
        let info = PriceInfo::new("100.00", "80,00");
        assert!(info.is_on_sale());
        assert_eq!(
            info.display(),
            PriceDisplay::Sale {
                sale: 80.0,
                regular: 100.0
            }
        );
        assert_eq!(format_amount(info.sale.unwrap()), "80.00");
    }

    #[test]
    fn test_no_sale_when_empty_or_zero() {
        assert!(!PriceInfo::new("100.00", "").is_on_sale());
        assert!(!PriceInfo::new("100.00", "0").is_on_sale());
        assert_eq!(PriceInfo::new("100.00", "0").display(), PriceDisplay::Single(100.0));
    }

    #[test]
    fn test_equal_prices_are_not_a_sale() {
        let info = PriceInfo::new("50,00", "50.00");
        assert!(!info.is_on_sale());
        assert_eq!(info.display(), PriceDisplay::Single(50.0));
    }

    #[test]
    fn test_sale_only_price() {
        let info = PriceInfo::new("", "75");
        assert!(!info.is_on_sale());
        assert_eq!(info.display(), PriceDisplay::Single(75.0));
    }

    #[test]
    fn test_malformed_falls_back_to_raw() {
        let info = PriceInfo::new("ask in store", "");
        assert!(!info.is_on_sale());
        assert_eq!(info.display(), PriceDisplay::Raw("ask in store".into()));

        // A malformed regular price disables the sale but a valid sale still shows.
        let info = PriceInfo::new("n/a", "80");
        assert!(!info.is_on_sale());
        assert_eq!(info.display(), PriceDisplay::Single(80.0));
    }

    #[test]
    fn test_nothing_to_show() {
        assert_eq!(PriceInfo::new("", "").display(), PriceDisplay::None);
        assert_eq!(PriceInfo::new("0", "0").display(), PriceDisplay::None);
    }
}
