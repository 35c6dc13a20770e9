use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use thiserror::Error;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PixelFormat {
    Rgb8,
    Rgba8,
}

impl PixelFormat {
    pub fn channels(self) -> usize {
        match self {
            Self::Rgb8 => 3,
            Self::Rgba8 => 4,
        }
    }
}

/// Decoded 8-bit image, top row first.
#[derive(Debug, Clone)]
pub struct Image {
    pub width: u32,
    pub height: u32,
    pub format: PixelFormat,
    pub data: Vec<u8>,
}

impl Image {
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self, ImageError> {
        let file = File::open(path.as_ref()).map_err(ImageError::Input)?;

        let image = Self::decode(BufReader::new(file))?;
        log::debug!(
            "loaded {} ({}x{}, {:?})",
            path.as_ref().display(),
            image.width,
            image.height,
            image.format
        );

        Ok(image)
    }

    /// Decodes a PNG stream. Palettes and low bit depths are expanded,
    /// 16 bit channels are stripped and grayscale is spread to RGB.
    pub fn decode<R: Read>(reader: R) -> Result<Self, ImageError> {
        let mut decoder = png::Decoder::new(reader);
        decoder.set_transformations(png::Transformations::EXPAND | png::Transformations::STRIP_16);

        let mut reader = decoder.read_info()?;
        let mut buf = vec![0; reader.output_buffer_size()];
        let info = reader.next_frame(&mut buf)?;
        buf.truncate(info.buffer_size());

        if info.bit_depth != png::BitDepth::Eight {
            return Err(ImageError::Unsupported(format!("bit depth {:?}", info.bit_depth)));
        }

        let (format, data) = match info.color_type {
            png::ColorType::Rgb => (PixelFormat::Rgb8, buf),
            png::ColorType::Rgba => (PixelFormat::Rgba8, buf),
            png::ColorType::Grayscale => (
                PixelFormat::Rgb8,
                buf.iter().flat_map(|&v| [v, v, v]).collect(),
            ),
            png::ColorType::GrayscaleAlpha => (
                PixelFormat::Rgba8,
                buf.chunks_exact(2)
                    .flat_map(|px| [px[0], px[0], px[0], px[1]])
                    .collect(),
            ),
            png::ColorType::Indexed => {
                return Err(ImageError::Unsupported("unexpanded palette".to_string()));
            }
        };

        Ok(Self {
            width: info.width,
            height: info.height,
            format,
            data,
        })
    }
}

#[derive(Debug, Error)]
pub enum ImageError {
    #[error("Could not open image: {0}")]
    Input(std::io::Error),
    #[error("Could not decode PNG: {0}")]
    Decoding(#[from] png::DecodingError),
    #[error("Unsupported image: {0}")]
    Unsupported(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode(width: u32, height: u32, color: png::ColorType, data: &[u8]) -> Vec<u8> {
        let mut out = Vec::new();
        {
            let mut encoder = png::Encoder::new(&mut out, width, height);
            encoder.set_color(color);
            encoder.set_depth(png::BitDepth::Eight);
            let mut writer = encoder.write_header().unwrap();
            writer.write_image_data(data).unwrap();
            writer.finish().unwrap();
        }
        out
    }

    #[test]
    fn rgba_passes_through() {
        let src = [255, 0, 0, 255, 0, 255, 0, 128];
        let png = encode(2, 1, png::ColorType::Rgba, &src);

        let image = Image::decode(png.as_slice()).unwrap();

        assert_eq!((image.width, image.height), (2, 1));
        assert_eq!(image.format, PixelFormat::Rgba8);
        assert_eq!(image.data, src);
    }

    #[test]
    fn grayscale_becomes_rgb() {
        let png = encode(1, 2, png::ColorType::Grayscale, &[10, 200]);

        let image = Image::decode(png.as_slice()).unwrap();

        assert_eq!(image.format, PixelFormat::Rgb8);
        assert_eq!(image.data, [10, 10, 10, 200, 200, 200]);
        assert_eq!(image.data.len(), 2 * image.format.channels());
    }

    #[test]
    fn gray_alpha_becomes_rgba() {
        let png = encode(1, 1, png::ColorType::GrayscaleAlpha, &[7, 99]);

        let image = Image::decode(png.as_slice()).unwrap();

        assert_eq!(image.format, PixelFormat::Rgba8);
        assert_eq!(image.data, [7, 7, 7, 99]);
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(matches!(
            Image::decode(&b"definitely not a png"[..]),
            Err(ImageError::Decoding(_))
        ));
        assert!(matches!(
            Image::load_from_path("missing.png"),
            Err(ImageError::Input(_))
        ));
    }
}
