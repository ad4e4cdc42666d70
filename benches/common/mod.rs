use image::{GrayImage, ImageBuffer, Luma};
use qrcode::{Color, QrCode};

/// Render `text` as a QR code, `scale` pixels per module, with a four-module quiet zone
pub fn synthetic_code(text: &str, scale: u32) -> GrayImage {
    let code = QrCode::new(text.as_bytes()).unwrap();
    let width = code.width() as u32;
    let colors = code.to_colors();
    let quiet = 4;
    let side = (width + 2 * quiet) * scale;
    ImageBuffer::from_fn(side, side, |x, y| {
        let (mx, my) = (x / scale, y / scale);
        if mx < quiet || my < quiet || mx >= width + quiet || my >= width + quiet {
            return Luma([255]);
        }
        let idx = ((my - quiet) * width + (mx - quiet)) as usize;
        match colors[idx] {
            Color::Dark => Luma([0]),
            Color::Light => Luma([255]),
        }
    })
}
