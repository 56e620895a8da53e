use crate::image_classifier::tensor_image::TensorImage;
use image::imageops::{self, FilterType};

pub trait ImageOp: Send + Sync {
    fn apply(&self, image: TensorImage) -> TensorImage;
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResizeOp {
    pub width: u32,
    pub height: u32,
}

impl ImageOp for ResizeOp {
    fn apply(&self, image: TensorImage) -> TensorImage {
        if image.width() == self.width && image.height() == self.height {
            return image;
        }
        TensorImage::from_rgba(imageops::resize(
            image.as_rgba(),
            self.width,
            self.height,
            FilterType::Triangle,
        ))
    }
}

/// Rotates counter-clockwise by `quarter_turns` × 90°. Negative turns rotate clockwise.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rot90Op {
    pub quarter_turns: i32,
}

impl ImageOp for Rot90Op {
    fn apply(&self, image: TensorImage) -> TensorImage {
        let rgba = image.as_rgba();
        match self.quarter_turns.rem_euclid(4) {
            1 => TensorImage::from_rgba(imageops::rotate270(rgba)),
            2 => TensorImage::from_rgba(imageops::rotate180(rgba)),
            3 => TensorImage::from_rgba(imageops::rotate90(rgba)),
            _ => image,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlipVerticalOp;

impl ImageOp for FlipVerticalOp {
    fn apply(&self, image: TensorImage) -> TensorImage {
        TensorImage::from_rgba(imageops::flip_vertical(image.as_rgba()))
    }
}

/// Applies its ops in insertion order. An empty processor returns the input untouched.
#[derive(Default)]
pub struct ImageProcessor {
    ops: Vec<Box<dyn ImageOp>>,
}

impl ImageProcessor {
    pub fn builder() -> ImageProcessorBuilder {
        ImageProcessorBuilder::default()
    }

    pub fn process(&self, image: TensorImage) -> TensorImage {
        self.ops.iter().fold(image, |image, op| op.apply(image))
    }
}

#[derive(Default)]
pub struct ImageProcessorBuilder {
    ops: Vec<Box<dyn ImageOp>>,
}

impl ImageProcessorBuilder {
    pub fn add(mut self, op: impl ImageOp + 'static) -> Self {
        self.ops.push(Box::new(op));
        self
    }

    pub fn build(self) -> ImageProcessor {
        ImageProcessor { ops: self.ops }
    }
}
