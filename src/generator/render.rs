use anyhow::{Context, Result};
use image::{ImageFormat, Luma};
use qrcode::QrCode;
use std::io::Cursor;

pub const MIN_IMAGE_SIZE: u32 = 256;

/// Encodes `payload` as a QR code and returns PNG bytes.
pub fn render_png(payload: &str) -> Result<Vec<u8>> {
    let code = QrCode::new(payload.as_bytes()).context("payload does not fit in a QR code")?;
    let img = code
        .render::<Luma<u8>>()
        .quiet_zone(true)
        .min_dimensions(MIN_IMAGE_SIZE, MIN_IMAGE_SIZE)
        .build();

    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, ImageFormat::Png)
        .context("failed to encode QR image as PNG")?;
    Ok(out.into_inner())
}
