//! # QR symbol construction and PNG rendering
//!
//! Every chunk payload is rendered at a fixed symbol version so that
//! all issued cards look alike regardless of content length. Capacity
//! overflow at the forced version is surfaced as an error; there is no
//! re-chunking retry.

use image::Luma;
use qrcode::{EcLevel, QrCode, Version};

use crate::error::QrError;

/// Fixed QR symbol version for every chunk.
pub const SYMBOL_VERSION: Version = Version::Normal(22);

/// Minimum rendered image edge, in pixels.
pub const MIN_IMAGE_SIZE: u32 = 512;

/// Build the QR symbol for a chunk payload at the fixed version and
/// medium error correction.
pub fn symbol(payload: &str) -> Result<QrCode, QrError> {
    Ok(QrCode::with_version(
        payload.as_bytes(),
        SYMBOL_VERSION,
        EcLevel::M,
    )?)
}

/// Render a chunk payload as a PNG image of at least
/// [`MIN_IMAGE_SIZE`] pixels per side.
pub fn render_png(payload: &str) -> Result<Vec<u8>, QrError> {
    let code = symbol(payload)?;
    let img = code
        .render::<Luma<u8>>()
        .min_dimensions(MIN_IMAGE_SIZE, MIN_IMAGE_SIZE)
        .build();

    let mut buf = std::io::Cursor::new(Vec::new());
    img.write_to(&mut buf, image::ImageFormat::Png)?;
    Ok(buf.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chunk::encode;

    /// PNG files open with this signature.
    const PNG_MAGIC: [u8; 8] = [0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1a, b'\n'];

    #[test]
    fn typical_chunk_payload_fits_the_fixed_version() {
        // A realistic single-card JWS is well under the chunk bound.
        let jws = "eyJhbGciOiJFUzI1NiJ9.".repeat(30); // 630 chars
        let chunks = encode(jws.trim_end_matches('.')).unwrap();
        assert!(symbol(&chunks[0].payload).is_ok());
    }

    #[test]
    fn oversized_payload_is_an_error_not_a_panic() {
        let too_big = "1".repeat(8000);
        assert!(matches!(symbol(&too_big), Err(QrError::Symbol(_))));
    }

    #[test]
    fn rendered_png_has_the_png_signature() {
        let chunks = encode("eyJhbGciOiJFUzI1NiJ9").unwrap();
        let png = render_png(&chunks[0].payload).unwrap();
        assert!(png.len() > PNG_MAGIC.len());
        assert_eq!(&png[..8], &PNG_MAGIC);
    }

    #[test]
    fn rendered_image_meets_the_minimum_size() {
        let chunks = encode("eyJhbGciOiJFUzI1NiJ9").unwrap();
        let png = render_png(&chunks[0].payload).unwrap();
        let img = image::load_from_memory(&png).unwrap();
        assert!(img.width() >= MIN_IMAGE_SIZE);
        assert!(img.height() >= MIN_IMAGE_SIZE);
    }
}
