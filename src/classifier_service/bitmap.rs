use crate::camera::frame::CameraFrame;
use crate::image_classifier::error::ClassifierError;
use image::RgbaImage;

const BYTES_PER_PIXEL: usize = 4;

/// Copies the frame's plane into a `width` × `height` RGBA8 bitmap. Extra
/// bytes past the last pixel are ignored.
pub fn bitmap_from_frame(frame: &dyn CameraFrame) -> Result<RgbaImage, ClassifierError> {
    let (width, height) = (frame.width(), frame.height());
    let needed = width as usize * height as usize * BYTES_PER_PIXEL;
    let plane = frame.plane();

    if width == 0 || height == 0 {
        return Err(ClassifierError::InvalidFrame(format!(
            "empty frame {}x{}",
            width, height
        )));
    }

    if plane.len() < needed {
        return Err(ClassifierError::InvalidFrame(format!(
            "buffer holds {} bytes, {}x{} RGBA needs {}",
            plane.len(),
            width,
            height,
            needed
        )));
    }

    RgbaImage::from_raw(width, height, plane[..needed].to_vec()).ok_or_else(|| {
        ClassifierError::InvalidFrame(format!("cannot build {}x{} bitmap", width, height))
    })
}
