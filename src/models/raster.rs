use crate::utils::grayscale::{rgb_to_grayscale, rgba_to_grayscale};
use std::borrow::Cow;

/// Sample layout of a raster frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelFormat {
    /// 1 byte per pixel luminance
    Gray,
    /// 3 bytes per pixel
    Rgb,
    /// 4 bytes per pixel, alpha ignored
    Rgba,
}

impl PixelFormat {
    /// Bytes per pixel
    pub fn channels(&self) -> usize {
        match self {
            PixelFormat::Gray => 1,
            PixelFormat::Rgb => 3,
            PixelFormat::Rgba => 4,
        }
    }
}

/// A captured frame handed to the decoder
#[derive(Debug, Clone)]
pub struct RasterImage {
    width: usize,
    height: usize,
    format: PixelFormat,
    data: Vec<u8>,
}

impl RasterImage {
    /// Wrap raw samples; returns `None` when the buffer does not match the dimensions
    pub fn new(width: usize, height: usize, format: PixelFormat, data: Vec<u8>) -> Option<Self> {
        if data.len() != width * height * format.channels() {
            return None;
        }
        Some(Self {
            width,
            height,
            format,
            data,
        })
    }

    /// Grayscale frame
    pub fn from_gray(width: usize, height: usize, data: Vec<u8>) -> Option<Self> {
        Self::new(width, height, PixelFormat::Gray, data)
    }

    /// RGB frame
    pub fn from_rgb(width: usize, height: usize, data: Vec<u8>) -> Option<Self> {
        Self::new(width, height, PixelFormat::Rgb, data)
    }

    /// Grayscale frame whose buffer length is already known to match
    pub(crate) fn gray_unchecked(width: usize, height: usize, data: Vec<u8>) -> Self {
        debug_assert_eq!(data.len(), width * height);
        Self {
            width,
            height,
            format: PixelFormat::Gray,
            data,
        }
    }

    /// Convert any `image` crate image into a grayscale frame
    pub fn from_dynamic(img: &image::DynamicImage) -> Self {
        let luma = img.to_luma8();
        let (width, height) = luma.dimensions();
        Self {
            width: width as usize,
            height: height as usize,
            format: PixelFormat::Gray,
            data: luma.into_raw(),
        }
    }

    /// Frame width in pixels
    pub fn width(&self) -> usize {
        self.width
    }

    /// Frame height in pixels
    pub fn height(&self) -> usize {
        self.height
    }

    /// Sample layout
    pub fn format(&self) -> PixelFormat {
        self.format
    }

    /// Raw samples
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Luminance plane, borrowed when the frame is already grayscale
    pub fn luminance(&self) -> Cow<'_, [u8]> {
        match self.format {
            PixelFormat::Gray => Cow::Borrowed(&self.data),
            PixelFormat::Rgb => Cow::Owned(rgb_to_grayscale(&self.data, self.width, self.height)),
            PixelFormat::Rgba => {
                Cow::Owned(rgba_to_grayscale(&self.data, self.width, self.height))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_mismatched_buffer() {
        assert!(RasterImage::from_rgb(2, 2, vec![0; 11]).is_none());
        assert!(RasterImage::from_gray(2, 2, vec![0; 4]).is_some());
    }

    #[test]
    fn test_luminance_borrows_gray() {
        let frame = RasterImage::from_gray(2, 1, vec![10, 200]).unwrap();
        assert!(matches!(frame.luminance(), Cow::Borrowed(_)));

        let rgb = RasterImage::from_rgb(1, 1, vec![255, 255, 255]).unwrap();
        assert_eq!(rgb.luminance().as_ref(), &[255]);
    }
}
