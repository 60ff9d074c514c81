use std::sync::Arc;

use anyhow::Context;

use crate::foundation::error::{ShowreelError, ShowreelResult};

/// Prepared raster image in premultiplied RGBA8 form.
///
/// Pixels are shared behind an `Arc` so a frame can be held by the player and
/// cloned into sinks without copying the buffer.
#[derive(Clone, Debug)]
pub struct PreparedImage {
    width: u32,
    height: u32,
    rgba8_premul: Arc<Vec<u8>>,
}

impl PreparedImage {
    /// Build a prepared image from straight-alpha RGBA8 pixels.
    ///
    /// `pixels` must be tightly packed row-major `width * height * 4` bytes.
    pub fn from_rgba8(width: u32, height: u32, mut pixels: Vec<u8>) -> ShowreelResult<Self> {
        if width == 0 || height == 0 {
            return Err(ShowreelError::asset("image dimensions must be > 0"));
        }
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|v| v.checked_mul(4))
            .ok_or_else(|| ShowreelError::asset("image byte size overflow"))?;
        if pixels.len() != expected {
            return Err(ShowreelError::asset(format!(
                "expected {expected} rgba8 bytes for {width}x{height}, got {}",
                pixels.len()
            )));
        }
        premultiply_rgba8_in_place(&mut pixels);
        Ok(Self {
            width,
            height,
            rgba8_premul: Arc::new(pixels),
        })
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Pixel bytes in row-major premultiplied RGBA8.
    pub fn rgba8_premul(&self) -> &[u8] {
        &self.rgba8_premul
    }
}

/// Decode encoded image bytes (PNG and friends) into a [`PreparedImage`].
pub fn decode_image(bytes: &[u8]) -> ShowreelResult<PreparedImage> {
    let dyn_img = image::load_from_memory(bytes).context("decode image from memory")?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();
    PreparedImage::from_rgba8(width, height, rgba.into_raw())
}

fn premultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = u16::from(px[3]);
        if a == 0 {
            px[0] = 0;
            px[1] = 0;
            px[2] = 0;
            continue;
        }
        px[0] = ((u16::from(px[0]) * a + 127) / 255) as u8;
        px[1] = ((u16::from(px[1]) * a + 127) / 255) as u8;
        px[2] = ((u16::from(px[2]) * a + 127) / 255) as u8;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_rgba8_validates_dimensions_and_length() {
        assert!(PreparedImage::from_rgba8(0, 1, vec![]).is_err());
        assert!(PreparedImage::from_rgba8(2, 1, vec![0; 4]).is_err());
        assert!(PreparedImage::from_rgba8(1, 1, vec![10, 20, 30, 255]).is_ok());
    }

    #[test]
    fn from_rgba8_premultiplies() {
        let img = PreparedImage::from_rgba8(2, 1, vec![200, 100, 50, 128, 10, 20, 30, 0]).unwrap();
        let px = img.rgba8_premul();
        // 200 * 128 / 255 rounds to 100.
        assert_eq!(&px[0..4], &[100, 50, 25, 128]);
        // Zero alpha forces the color channels to zero.
        assert_eq!(&px[4..8], &[0, 0, 0, 0]);
    }

    #[test]
    fn decode_round_trips_an_encoded_png() {
        let src = image::RgbaImage::from_pixel(3, 2, image::Rgba([255, 0, 0, 255]));
        let mut bytes = Vec::new();
        src.write_to(
            &mut std::io::Cursor::new(&mut bytes),
            image::ImageFormat::Png,
        )
        .unwrap();

        let img = decode_image(&bytes).unwrap();
        assert_eq!((img.width(), img.height()), (3, 2));
        assert_eq!(&img.rgba8_premul()[0..4], &[255, 0, 0, 255]);
    }

    #[test]
    fn decode_rejects_garbage() {
        assert!(decode_image(b"not an image").is_err());
    }
}
