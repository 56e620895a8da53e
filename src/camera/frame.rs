use image::RgbaImage;

/// One captured image plus the rotation the sensor reported for it.
pub trait CameraFrame: Send {
    fn width(&self) -> u32;
    fn height(&self) -> u32;
    /// 0, 90, 180 or 270 on a well behaved source.
    fn rotation_degrees(&self) -> i32;
    /// Single plane, row-major RGBA8.
    fn plane(&self) -> &[u8];
}

type ReleaseHook = Box<dyn FnOnce() + Send>;

/// Owned RGBA8 frame. The release hook runs once when the frame is dropped.
pub struct RgbaFrame {
    width: u32,
    height: u32,
    rotation_degrees: i32,
    pixels: Vec<u8>,
    on_release: Option<ReleaseHook>,
}

impl RgbaFrame {
    pub fn new(width: u32, height: u32, rotation_degrees: i32, pixels: Vec<u8>) -> Self {
        Self {
            width,
            height,
            rotation_degrees,
            pixels,
            on_release: None,
        }
    }

    pub fn from_image(image: &RgbaImage, rotation_degrees: i32) -> Self {
        Self::new(
            image.width(),
            image.height(),
            rotation_degrees,
            image.as_raw().clone(),
        )
    }

    pub fn with_release_hook(mut self, hook: impl FnOnce() + Send + 'static) -> Self {
        self.on_release = Some(Box::new(hook));
        self
    }
}

impl CameraFrame for RgbaFrame {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn rotation_degrees(&self) -> i32 {
        self.rotation_degrees
    }

    fn plane(&self) -> &[u8] {
        &self.pixels
    }
}

impl Drop for RgbaFrame {
    fn drop(&mut self) {
        if let Some(release) = self.on_release.take() {
            release();
        }
    }
}
