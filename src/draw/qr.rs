//! QR codes for the footer.

use image::{Rgba, RgbaImage};
use qrcode::{EcLevel, QrCode};

use crate::error::{Result, TagError};
use crate::style::Color;

/// Light modules added on every side.
pub const QUIET_ZONE: usize = 1;

/// Render `data` as a `size` x `size` QR code, error correction level L.
///
/// Modules are scaled nearest-neighbour, so at small sizes some modules are
/// one pixel wider than others.
pub fn qr_image(data: &str, size: u32, dark: Color) -> Result<RgbaImage> {
    let code = QrCode::with_error_correction_level(data, EcLevel::L)
        .map_err(|e| TagError::Image(format!("QR code generation failed: {}", e)))?;

    let modules = code.width();
    let total = modules + 2 * QUIET_ZONE;
    let size = size.max(total as u32);
    let mut img = RgbaImage::from_pixel(size, size, Rgba([255, 255, 255, 255]));

    for (x, y, px) in img.enumerate_pixels_mut() {
        let mx = x as usize * total / size as usize;
        let my = y as usize * total / size as usize;
        let inside = (QUIET_ZONE..QUIET_ZONE + modules).contains(&mx)
            && (QUIET_ZONE..QUIET_ZONE + modules).contains(&my);
        if inside && code[(mx - QUIET_ZONE, my - QUIET_ZONE)] == qrcode::Color::Dark {
            *px = dark.into();
        }
    }
    Ok(img)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_qr_size_and_quiet_zone() {
        let img = qr_image("https://example.com/p/12345", 150, Color::BLACK).unwrap();
        assert_eq!(img.dimensions(), (150, 150));
        // Top-left pixel is quiet zone, finder pattern starts just inside.
        assert_eq!(img.get_pixel(0, 0).0, [255, 255, 255, 255]);
        let total = QrCode::with_error_correction_level("https://example.com/p/12345", EcLevel::L)
            .unwrap()
            .width() as u32
            + 2;
        let inside = 150 / total + 2;
        assert_eq!(img.get_pixel(inside, inside).0, [0, 0, 0, 255]);
    }

    #[test]
    fn test_qr_never_smaller_than_modules() {
        let img = qr_image("x", 3, Color::BLACK).unwrap();
        assert_eq!(img.width(), 23);
    }
}
