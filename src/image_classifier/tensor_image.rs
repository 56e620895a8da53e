use image::RgbaImage;

/// Engine input: an RGBA8 bitmap.
#[derive(Debug, Clone, PartialEq)]
pub struct TensorImage {
    image: RgbaImage,
}

impl TensorImage {
    pub fn from_rgba(image: RgbaImage) -> Self {
        Self { image }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn as_rgba(&self) -> &RgbaImage {
        &self.image
    }

    pub fn into_rgba(self) -> RgbaImage {
        self.image
    }
}
