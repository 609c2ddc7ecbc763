//! # Render Tests
//!
//! End-to-end renders through the public API with the built-in bitmap face
//! (no font or icon files on disk). Assertions use pixel dimensions and color
//! probes rather than golden images, so they hold across platforms.

use image::RgbaImage;
use pretty_assertions::assert_eq;

use pricetag::{
    Catalog, ProductRecord, SheetSize, SizeConfig, TagError,
    batch::render_batch,
    resources::Resources,
    sheet::{fit_count, pack_batch, pack_pair},
    style::{Color, LayoutSettings, StyleSelection},
    tag::{self, BackgroundCache, LayoutKind, TagRequest, common::SPECIAL_COLOR},
};

fn laptop() -> ProductRecord {
    ProductRecord::new("LT-1400", "Laptop Pro 14 with a rather long product name")
        .with_prices("1299,00", "1099.00")
        .with_description(
            "<ul><li>Processor: 8-core</li><li>Display: 14\" OLED</li>\
             <li>2 years warranty</li></ul>",
        )
        .with_attribute("RAM", "16GB")
        .with_attribute("Storage", "512GB SSD")
        .with_part_number("LP14-16-512")
        .with_qr_url("https://example.com/p/LT-1400")
}

fn request(catalog: &Catalog, size: &str, selection: &StyleSelection) -> TagRequest {
    catalog.request(size, selection, "en").unwrap()
}

fn render(record: &ProductRecord, request: &TagRequest) -> RgbaImage {
    tag::render(record, request, &Resources::builtin(), None).unwrap()
}

fn close(a: [u8; 4], b: Color) -> bool {
    a.iter().zip(b.0.iter()).all(|(x, y)| x.abs_diff(*y) <= 3)
}

/// Pixels close to `color` in the top-right corner, where badges sit.
fn corner_matches(image: &RgbaImage, color: Color) -> usize {
    let (w, h) = image.dimensions();
    let (x0, y1) = (w * 2 / 3, h / 3);
    image
        .enumerate_pixels()
        .filter(|(x, y, p)| *x >= x0 && *y < y1 && close(p.0, color))
        .count()
}

#[test]
fn test_every_size_renders_at_exact_pixels() {
    let catalog = Catalog::built_in();
    let record = laptop();
    for size in &catalog.sizes {
        for selection in [
            StyleSelection::default(),
            StyleSelection::default().with_theme("back_to_school"),
            StyleSelection::default().with_brand("nordlys"),
        ] {
            let request = request(&catalog, &size.name, &selection);
            let image = render(&record, &request);
            assert_eq!(
                image.dimensions(),
                size.pixel_size(),
                "{} with {:?}",
                size.name,
                selection
            );
        }
    }
}

#[test]
fn test_every_strategy_is_reachable() {
    let catalog = Catalog::built_in();
    let plain = StyleSelection::default();
    let brand = StyleSelection::default().with_brand("voltaire");
    let cases = [
        ("Standard", &plain, LayoutKind::Standard),
        ("Accessory", &plain, LayoutKind::Accessory),
        ("Keyboard", &plain, LayoutKind::Keyboard),
        ("Accessory", &brand, LayoutKind::BrandCompact),
        ("Wide", &brand, LayoutKind::BrandFull),
        ("Keyboard", &brand, LayoutKind::BrandFull),
    ];
    for (size, selection, expected) in cases {
        let request = request(&catalog, size, selection);
        let kind = LayoutKind::select(&request.size, &request.style).unwrap();
        assert_eq!(kind, expected, "{}", size);
        let image = render(&laptop(), &request);
        assert_eq!(image.dimensions(), request.size.pixel_size());
    }
}

#[test]
fn test_sale_badge_uses_accent_color() {
    let catalog = Catalog::built_in();
    let request = request(&catalog, "Standard", &StyleSelection::default());
    let accent = request.style.palette.accent;

    let on_sale = render(&laptop(), &request);
    let regular = render(&laptop().with_prices("1299.00", ""), &request);

    let sale_hits = corner_matches(&on_sale, accent);
    let regular_hits = corner_matches(&regular, accent);
    assert!(
        sale_hits > regular_hits + 2000,
        "sale {} vs regular {}",
        sale_hits,
        regular_hits
    );
}

#[test]
fn test_special_badge_wins_over_sale() {
    let catalog = Catalog::built_in();
    let request = request(&catalog, "Standard", &StyleSelection::default()).special(true);
    let image = render(&laptop(), &request);
    assert!(corner_matches(&image, SPECIAL_COLOR) > 2000);
}

#[test]
fn test_unparseable_prices_still_render() {
    let catalog = Catalog::built_in();
    let request = request(&catalog, "Small", &StyleSelection::default());
    let record = ProductRecord::new("X-1", "Cable").with_prices("call us", "n/a");
    let image = render(&record, &request);
    assert_eq!(image.dimensions(), request.size.pixel_size());
}

#[test]
fn test_missing_sku_is_rejected() {
    let catalog = Catalog::built_in();
    let request = request(&catalog, "Standard", &StyleSelection::default());
    let err = tag::render(&ProductRecord::new("  ", "x"), &request, &Resources::builtin(), None)
        .unwrap_err();
    assert!(matches!(err, TagError::InvalidRecord(_)));
}

#[test]
fn test_unknown_design_is_fatal() {
    let catalog = Catalog::from_json_str(
        r#"{"sizes": [{"name": "Odd", "width_cm": 8, "height_cm": 5, "design": "hexagon"}]}"#,
    )
    .unwrap();
    let request = request(&catalog, "Odd", &StyleSelection::default());
    let err = tag::render(&laptop(), &request, &Resources::builtin(), None).unwrap_err();
    assert!(matches!(err, TagError::UnknownStrategy(ref d) if d == "hexagon"));
}

#[test]
fn test_batch_isolates_failures_and_packs_sheets() {
    let catalog = Catalog::built_in();
    let request = request(&catalog, "Small", &StyleSelection::default().with_theme("winter"));
    let records: Vec<ProductRecord> = (0..10)
        .map(|i| {
            let sku = if i == 3 { String::new() } else { format!("SM-{}", i) };
            ProductRecord::new(sku, format!("Mouse {}", i)).with_prices("25", "19.5")
        })
        .collect();

    let cache = BackgroundCache::new();
    let report = render_batch(&records, &request, &Resources::builtin(), &cache);
    assert_eq!(report.tags.len(), 9);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].index, Some(3));
    // One snow layer per rendered SKU.
    assert_eq!(cache.len(), 9);

    let sheet = SheetSize::A4;
    let fit = fit_count(&sheet, request.size.width_cm, request.size.height_cm);
    assert_eq!((fit.count, fit.rotated), (8, true));

    let sheets = report.sheets(&fit, &sheet).unwrap();
    assert_eq!(sheets.len(), 2);
    for page in &sheets {
        assert_eq!(page.dimensions(), (2480, 3508));
    }
}

#[test]
fn test_sheet_counts_for_built_in_sizes() {
    let catalog = Catalog::built_in();
    let a4 = SheetSize::A4;
    let counts: Vec<(String, usize)> = catalog
        .sizes
        .iter()
        .map(|s| (s.name.clone(), fit_count(&a4, s.width_cm, s.height_cm).count))
        .collect();
    let expected = [
        ("Standard", 2),
        ("Large", 2),
        ("Small", 8),
        ("Wide", 2),
        ("Accessory", 21),
        ("Keyboard", 4),
    ];
    for ((name, count), (want_name, want)) in counts.iter().zip(expected) {
        assert_eq!((name.as_str(), *count), (want_name, want));
    }
}

#[test]
fn test_degenerate_fit_is_an_error() {
    let sheet = SheetSize::A4;
    let fit = fit_count(&sheet, 40.0, 40.0);
    assert_eq!(fit.count, 0);
    let tag = RgbaImage::new(10, 10);
    assert!(matches!(
        pack_batch(&[tag], &fit, &sheet),
        Err(TagError::DegenerateSize { .. })
    ));
}

#[test]
fn test_dual_language_pair() {
    let catalog = Catalog::built_in();
    let selection = StyleSelection::default().with_brand("nordlys");
    let resources = Resources::builtin();
    let sheet = SheetSize::A4;

    let tags: Vec<RgbaImage> = ["en", "ka"]
        .iter()
        .map(|lang| {
            let request = catalog.request("Standard", &selection, lang).unwrap().dual(true);
            tag::render(&laptop(), &request, &resources, None).unwrap()
        })
        .collect();

    // Two 10cm tags sit side by side on one A4 sheet.
    assert_eq!(pack_pair(&tags[0], &tags[1], &sheet).len(), 1);

    let large: Vec<RgbaImage> = ["en", "ru"]
        .iter()
        .map(|lang| {
            let request = catalog.request("Large", &selection, lang).unwrap();
            tag::render(&laptop(), &request, &resources, None).unwrap()
        })
        .collect();
    assert_eq!(pack_pair(&large[0], &large[1], &sheet).len(), 2);
}

#[test]
fn test_part_number_scale_changes_render() {
    let catalog = Catalog::built_in();
    let plain = request(&catalog, "Standard", &StyleSelection::default());
    let scaled = plain.clone().with_layout(LayoutSettings {
        part_number: 3.0,
        ..LayoutSettings::default()
    });

    assert_ne!(render(&laptop(), &plain), render(&laptop(), &scaled));

    // Without a part number the factor has nothing to scale.
    let bare = ProductRecord::new("LT-1400", "Laptop").with_prices("1299.00", "");
    assert_eq!(render(&bare, &plain), render(&bare, &scaled));
}

#[test]
fn test_zero_pixel_size_fails_only_its_records() {
    let catalog = Catalog::built_in();
    let style = catalog
        .style(&StyleSelection::default().with_theme("winter"))
        .unwrap();
    let request = TagRequest::new(SizeConfig::new("Sliver", 0.001, 10.0, 3), style);
    let records: Vec<ProductRecord> = (0..3)
        .map(|i| ProductRecord::new(format!("SL-{}", i), "Sliver").with_prices("5", ""))
        .collect();

    let report = render_batch(&records, &request, &Resources::builtin(), &BackgroundCache::new());
    assert_eq!(report.tags.len(), 0);
    assert_eq!(report.failures.len(), 3);
    assert!(
        report
            .failures
            .iter()
            .all(|f| matches!(f.error, TagError::DegenerateSize { .. }))
    );
}

fn wide_brand_request(size: SizeConfig) -> TagRequest {
    let catalog = Catalog::built_in();
    let style = catalog
        .style(&StyleSelection::default().with_brand("nordlys"))
        .unwrap();
    let request = TagRequest::new(size, style)
        .with_language("en", catalog.labels_for("en"));
    assert_eq!(
        LayoutKind::select(&request.size, &request.style).unwrap(),
        LayoutKind::BrandFull
    );
    request
}

fn cable() -> ProductRecord {
    ProductRecord::new("CB-2", "Cable").with_prices("25", "")
}

/// Non-white pixels in the second spec column of a 15x10 cm full brand tag,
/// between the title and the price block.
fn second_column_ink(image: &RgbaImage) -> usize {
    image
        .enumerate_pixels()
        .filter(|(x, y, p)| (910..1730).contains(x) && (270..950).contains(y) && p.0 != [255; 4])
        .count()
}

#[test]
fn test_material_details_row_is_drawn_in_second_column() {
    let record = cable()
        .with_attribute("Length", "2m")
        .with_attribute("Material", "Braided nylon");

    let reserved = wide_brand_request(SizeConfig::new("Wide", 15.0, 10.0, 8).with_material_details());
    let plain = wide_brand_request(SizeConfig::new("Wide", 15.0, 10.0, 8));

    // Both specs fit in column 1 unless the material row is synthesized.
    assert!(second_column_ink(&render(&record, &reserved)) > 0);
    assert_eq!(second_column_ink(&render(&record, &plain)), 0);
}

#[test]
fn test_material_details_row_takes_a_spec_slot() {
    let with_b = cable()
        .with_attribute("Length", "2m")
        .with_attribute("Weight", "80g")
        .with_attribute("Material", "Braided nylon");
    let without_b = cable()
        .with_attribute("Length", "2m")
        .with_attribute("Material", "Braided nylon");

    // Limit 2: the material row plus one normal spec, so "Weight" is dropped.
    let two = wide_brand_request(SizeConfig::new("Wide", 15.0, 10.0, 2).with_material_details());
    assert_eq!(render(&with_b, &two), render(&without_b, &two));

    let three = wide_brand_request(SizeConfig::new("Wide", 15.0, 10.0, 3).with_material_details());
    assert_ne!(render(&with_b, &three), render(&without_b, &three));
}

#[test]
fn test_dual_flag_draws_language_hint() {
    let request = wide_brand_request(SizeConfig::new("Wide", 15.0, 10.0, 8).with_material_details());
    let single = render(&cable(), &request);
    let dual = render(&cable(), &request.clone().dual(true));
    assert_eq!(single.dimensions(), dual.dimensions());
    assert_ne!(single, dual);
}
