use crate::camera::frame::CameraFrame;

pub trait Camera: Send + Sync {
    fn start(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;
    fn stop(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;
    fn capture_frame(&self) -> Result<Box<dyn CameraFrame>, Box<dyn std::error::Error + Send + Sync>>;
}
