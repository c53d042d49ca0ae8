//! QR code rendering for invitation links.

use base64::{engine::general_purpose::STANDARD, Engine};
use qrcode::render::svg;
use qrcode::{EcLevel, QrCode};

/// Rendered QR image edge length in SVG user units.
const QR_DIMENSIONS: u32 = 256;

/// Renders the given link as an SVG QR code wrapped in a base64 data URL,
/// ready to drop into an `<img src=...>` on the invitation page.
pub fn svg_data_url(link: &str) -> Result<String, qrcode::types::QrError> {
    let code = QrCode::with_error_correction_level(link.as_bytes(), EcLevel::M)?;
    let image = code
        .render::<svg::Color>()
        .min_dimensions(QR_DIMENSIONS, QR_DIMENSIONS)
        .dark_color(svg::Color("#000000"))
        .light_color(svg::Color("#ffffff"))
        .build();

    Ok(format!("data:image/svg+xml;base64,{}", STANDARD.encode(image)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_svg_data_url_shape() {
        let url = svg_data_url("https://weddings.example.com/check-in?code=guest-abc").unwrap();
        assert!(url.starts_with("data:image/svg+xml;base64,"));

        let encoded = url.trim_start_matches("data:image/svg+xml;base64,");
        let decoded = STANDARD.decode(encoded).unwrap();
        let svg = String::from_utf8(decoded).unwrap();
        assert!(svg.contains("<svg"));
    }

    #[test]
    fn test_distinct_links_distinct_images() {
        let a = svg_data_url("https://example.com/check-in?code=a").unwrap();
        let b = svg_data_url("https://example.com/check-in?code=b").unwrap();
        assert_ne!(a, b);
    }
}
