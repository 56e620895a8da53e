use crate::camera::frame::{CameraFrame, RgbaFrame};
use crate::camera::interface::Camera;
use crate::library::logger::interface::Logger;
use image::{Rgba, RgbaImage};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

const ROTATIONS: [i32; 4] = [0, 90, 180, 270];

/// Synthetic gradient frames. The rotation cycles through 0, 90, 180, 270.
pub struct CameraFake {
    width: u32,
    height: u32,
    frame_count: AtomicUsize,
    logger: Arc<dyn Logger + Send + Sync>,
}

impl CameraFake {
    pub fn new(width: u32, height: u32, logger: Arc<dyn Logger + Send + Sync>) -> Self {
        Self {
            width,
            height,
            frame_count: AtomicUsize::new(0),
            logger: logger.with_namespace("camera").with_namespace("fake"),
        }
    }
}

impl Camera for CameraFake {
    fn start(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.logger.info("Starting camera...")?;
        Ok(())
    }

    fn stop(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.logger.info("Stopping camera...")?;
        Ok(())
    }

    fn capture_frame(&self) -> Result<Box<dyn CameraFrame>, Box<dyn std::error::Error + Send + Sync>> {
        let index = self.frame_count.fetch_add(1, Ordering::SeqCst);
        let rotation = ROTATIONS[index % ROTATIONS.len()];
        let shift = (index % 256) as u32;

        let image = RgbaImage::from_fn(self.width, self.height, |x, y| {
            Rgba([
                ((x + shift) % 256) as u8,
                ((y + shift) % 256) as u8,
                ((x + y) % 256) as u8,
                255,
            ])
        });

        self.logger
            .info(&format!("Captured frame {} (rotation {})", index, rotation))?;

        Ok(Box::new(RgbaFrame::from_image(&image, rotation)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::library::logger::impl_memory::LoggerMemory;

    #[test]
    fn test_frames_cycle_rotations() {
        let camera = CameraFake::new(8, 4, Arc::new(LoggerMemory::new()));

        let rotations: Vec<i32> = (0..5)
            .map(|_| camera.capture_frame().unwrap().rotation_degrees())
            .collect();

        assert_eq!(rotations, vec![0, 90, 180, 270, 0]);
    }

    #[test]
    fn test_frame_matches_configured_size() {
        let camera = CameraFake::new(8, 4, Arc::new(LoggerMemory::new()));
        let frame = camera.capture_frame().unwrap();

        assert_eq!((frame.width(), frame.height()), (8, 4));
        assert_eq!(frame.plane().len(), 8 * 4 * 4);
    }
}
