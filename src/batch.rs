//! # Batch Rendering
//!
//! Renders many records in parallel against one shared request. A failing
//! record is reported and skipped; it never aborts the rest of the batch.
//!
//! ```text
//! records ──par_iter──→ tag::render ──┬─ Ok  → BatchReport::tags
//!                                     └─ Err → BatchReport::failures
//! ```

use image::RgbaImage;
use log::{info, warn};
use rayon::prelude::*;

use crate::draw::BackgroundCache;
use crate::error::{Result, TagError};
use crate::paper::SheetSize;
use crate::record::ProductRecord;
use crate::resources::Resources;
use crate::sheet::{FitResult, pack_batch};
use crate::tag::{self, TagRequest};

/// One successfully rendered tag.
#[derive(Debug, Clone)]
pub struct RenderedTag {
    /// Position of the record in the input.
    pub index: usize,
    pub sku: String,
    pub image: RgbaImage,
}

/// One record that produced no tag.
#[derive(Debug)]
pub struct BatchFailure {
    /// Position in the input, when the record got far enough to have one.
    pub index: Option<usize>,
    pub sku: String,
    pub error: TagError,
}

/// Outcome of a batch, in input order.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub tags: Vec<RenderedTag>,
    pub failures: Vec<BatchFailure>,
}

impl BatchReport {
    /// Record an input that failed before rendering (e.g. malformed JSON).
    pub fn push_failure(&mut self, index: Option<usize>, sku: impl Into<String>, error: TagError) {
        warn!("Skipping record {}: {}", describe(index), error);
        self.failures.push(BatchFailure {
            index,
            sku: sku.into(),
            error,
        });
    }

    /// `"<ok> rendered, <failed> failed"`.
    pub fn summary(&self) -> String {
        format!(
            "{} rendered, {} failed",
            self.tags.len(),
            self.failures.len()
        )
    }

    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    /// The rendered images, in input order.
    pub fn images(&self) -> Vec<RgbaImage> {
        self.tags.iter().map(|t| t.image.clone()).collect()
    }

    /// Pack every rendered tag onto as many sheets as needed.
    pub fn sheets(&self, fit: &FitResult, sheet: &SheetSize) -> Result<Vec<RgbaImage>> {
        pack_batch(&self.images(), fit, sheet)
    }
}

fn describe(index: Option<usize>) -> String {
    match index {
        Some(i) => format!("#{}", i),
        None => "?".to_string(),
    }
}

/// Render every record with the same request.
///
/// Records are rendered on the rayon pool. Results keep input order; one
/// record's failure is logged and collected without affecting the others.
pub fn render_batch(
    records: &[ProductRecord],
    request: &TagRequest,
    resources: &Resources,
    backgrounds: &BackgroundCache,
) -> BatchReport {
    let results: Vec<(usize, Result<RgbaImage>)> = records
        .par_iter()
        .enumerate()
        .map(|(idx, record)| (idx, tag::render(record, request, resources, Some(backgrounds))))
        .collect();

    let mut report = BatchReport::default();
    for (idx, result) in results {
        let sku = records[idx].sku.clone();
        match result {
            Ok(image) => report.tags.push(RenderedTag {
                index: idx,
                sku,
                image,
            }),
            Err(e) => report.push_failure(Some(idx), sku, e),
        }
    }

    info!("Batch of {}: {}", records.len(), report.summary());
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paper::built_in_sizes;
    use crate::sheet::fit_count;
    use crate::style::StyleConfig;

    fn request(name: &str) -> TagRequest {
        let size = built_in_sizes().into_iter().find(|s| s.name == name).unwrap();
        TagRequest::new(size, StyleConfig::default())
    }

    fn records() -> Vec<ProductRecord> {
        (0..5)
            .map(|i| {
                let sku = if i == 3 { String::new() } else { format!("SKU-{}", i) };
                ProductRecord::new(sku, format!("Item {}", i)).with_prices("19.99", "")
            })
            .collect()
    }

    #[test]
    fn test_failure_is_isolated() {
        let report = render_batch(
            &records(),
            &request("Accessory"),
            &Resources::builtin(),
            &BackgroundCache::new(),
        );
        assert_eq!(report.tags.len(), 4);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].index, Some(3));
        assert!(matches!(report.failures[0].error, TagError::InvalidRecord(_)));
        assert_eq!(
            report.tags.iter().map(|t| t.index).collect::<Vec<_>>(),
            vec![0, 1, 2, 4]
        );
        assert_eq!(report.summary(), "4 rendered, 1 failed");
        assert!(!report.is_clean());
    }

    #[test]
    fn test_batch_to_sheets() {
        let request = request("Accessory");
        let report = render_batch(
            &records(),
            &request,
            &Resources::builtin(),
            &BackgroundCache::new(),
        );
        let sheet = SheetSize::A4;
        let fit = fit_count(&sheet, request.size.width_cm, request.size.height_cm);
        let sheets = report.sheets(&fit, &sheet).unwrap();
        assert_eq!(sheets.len(), 1);
        assert_eq!(sheets[0].dimensions(), sheet.pixel_size());
    }

    #[test]
    fn test_push_failure_without_index() {
        let mut report = BatchReport::default();
        report.push_failure(None, "", TagError::InvalidRecord("bad json".into()));
        assert_eq!(report.failures[0].index, None);
        assert_eq!(report.summary(), "0 rendered, 1 failed");
    }
}
