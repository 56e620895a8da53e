use crate::camera::frame::{CameraFrame, RgbaFrame};
use crate::camera::interface::Camera;
use crate::library::logger::interface::Logger;
use image::RgbaImage;
use std::sync::Arc;

/// Serves the same decoded still image for every capture.
pub struct CameraImageFile {
    image: RgbaImage,
    rotation_degrees: i32,
    logger: Arc<dyn Logger + Send + Sync>,
}

impl CameraImageFile {
    pub fn new(
        path: &str,
        rotation_degrees: i32,
        logger: Arc<dyn Logger + Send + Sync>,
    ) -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        let image = image::open(path)?.to_rgba8();
        let logger = logger.with_namespace("camera").with_namespace("image_file");
        logger.info(&format!(
            "Loaded {} ({}x{})",
            path,
            image.width(),
            image.height()
        ))?;

        Ok(Self {
            image,
            rotation_degrees,
            logger,
        })
    }
}

impl Camera for CameraImageFile {
    fn start(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.logger.info("Camera started")?;
        Ok(())
    }

    fn stop(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.logger.info("Camera stopped")?;
        Ok(())
    }

    fn capture_frame(&self) -> Result<Box<dyn CameraFrame>, Box<dyn std::error::Error + Send + Sync>> {
        Ok(Box::new(RgbaFrame::from_image(
            &self.image,
            self.rotation_degrees,
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::library::logger::impl_memory::LoggerMemory;

    #[test]
    fn test_missing_file_is_an_error() {
        let result = CameraImageFile::new("./no/such/image.png", 0, Arc::new(LoggerMemory::new()));
        assert!(result.is_err());
    }
}
