use std::io::Cursor;

use anyhow::Context as _;

use crate::foundation::error::{ReelError, ReelResult};
use crate::render::backend::FrameRGBA;

/// Convert a frame to straight-alpha RGBA8, as PNG expects.
pub fn to_straight_rgba8(frame: &FrameRGBA) -> ReelResult<Vec<u8>> {
    let expected = (frame.width as usize) * (frame.height as usize) * 4;
    if frame.data.len() != expected {
        return Err(ReelError::export(format!(
            "frame data is {} bytes, expected {expected} for {}x{}",
            frame.data.len(),
            frame.width,
            frame.height
        )));
    }

    let mut out = frame.data.clone();
    if frame.premultiplied {
        unpremultiply_rgba8_in_place(&mut out);
    }
    Ok(out)
}

/// Encode a frame as PNG bytes.
pub fn encode_png(frame: &FrameRGBA) -> ReelResult<Vec<u8>> {
    let rgba = to_straight_rgba8(frame)?;
    let mut bytes = Vec::new();
    image::write_buffer_with_format(
        &mut Cursor::new(&mut bytes),
        &rgba,
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .context("encode png")?;
    Ok(bytes)
}

fn unpremultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = u16::from(px[3]);
        if a == 0 || a == 255 {
            if a == 0 {
                px[0] = 0;
                px[1] = 0;
                px[2] = 0;
            }
            continue;
        }
        for c in &mut px[..3] {
            *c = ((u16::from(*c) * 255 + a / 2) / a).min(255) as u8;
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/png.rs"]
mod tests;
