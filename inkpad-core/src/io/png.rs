//! Raster export. The canvas is quantized to 8-bit straight RGBA and handed to the `png` encoder,
//! top row first.

use crate::canvas::Canvas;

/// Quantized RGBA8 bytes of the canvas, top row first.
#[must_use]
pub fn rgba8_top_down(canvas: &Canvas) -> Vec<u8> {
    let mut data = Vec::with_capacity(canvas.pixels().len() * 4);
    for row in canvas.rows_top_down() {
        data.extend(row.iter().flat_map(|pixel| pixel.to_rgba8()));
    }
    data
}

/// Encode the canvas as a PNG file.
pub fn encode(canvas: &Canvas) -> Result<Vec<u8>, super::ExportError> {
    let data = rgba8_top_down(canvas);
    let mut out = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut out, canvas.width(), canvas.height());
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header()?;
        writer.write_image_data(&data)?;
        writer.finish()?;
    }
    log::debug!(
        "Encoded {}x{} canvas into {} png bytes",
        canvas.width(),
        canvas.height(),
        out.len()
    );
    Ok(out)
}
