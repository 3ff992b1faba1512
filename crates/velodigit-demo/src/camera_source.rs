//! Camera frames for the demo: a still image from disk or a moving gradient.

use std::path::Path;

/// Errors that can occur while loading the camera still.
#[derive(Debug, thiserror::Error)]
pub enum CameraSourceError {
    #[error("failed to decode image: {0}")]
    Decode(#[from] image::ImageError),
}

pub enum CameraSource {
    Still(Vec<u8>),
    Gradient,
}

impl CameraSource {
    /// Load `path` and resize it to the camera resolution.
    pub fn from_image(path: &Path, width: u32, height: u32) -> Result<Self, CameraSourceError> {
        let img = image::open(path)?;
        let rgba = img
            .resize_exact(width, height, image::imageops::FilterType::Triangle)
            .to_rgba8();
        Ok(Self::Still(rgba.into_raw()))
    }

    /// Tightly packed RGBA8 frame for animation step `step`.
    pub fn frame(&self, width: u32, height: u32, step: u32) -> Vec<u8> {
        match self {
            Self::Still(rgba) => rgba.clone(),
            Self::Gradient => gradient(width, height, step),
        }
    }
}

fn gradient(width: u32, height: u32, step: u32) -> Vec<u8> {
    let mut rgba = Vec::with_capacity((width * height * 4) as usize);
    for y in 0..height {
        for x in 0..width {
            let shifted = (x + step) % width.max(1);
            rgba.push((shifted * 255 / width.max(1)) as u8);
            rgba.push((y * 255 / height.max(1)) as u8);
            rgba.push(96);
            rgba.push(255);
        }
    }
    rgba
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gradient_frame_size() {
        let frame = CameraSource::Gradient.frame(8, 4, 3);
        assert_eq!(frame.len(), 8 * 4 * 4);
        assert!(frame.chunks(4).all(|px| px[3] == 255));
    }

    #[test]
    fn test_gradient_scrolls_with_step() {
        let a = CameraSource::Gradient.frame(8, 1, 0);
        let b = CameraSource::Gradient.frame(8, 1, 1);
        assert_eq!(&a[4..8], &b[0..4]);
    }
}
