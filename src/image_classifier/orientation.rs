use crate::image_classifier::processor::{FlipVerticalOp, ImageProcessor, Rot90Op};
use crate::image_classifier::tensor_image::TensorImage;

/// EXIF-style orientation: where the first row and first column of the stored
/// image sit relative to the upright scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    TopLeft,
    RightTop,
    BottomRight,
    RightBottom,
}

impl Orientation {
    /// Correction for a camera frame's rotation. Anything other than 90, 180
    /// or 270 falls back to `RightTop`.
    pub fn from_rotation_degrees(rotation_degrees: i32) -> Self {
        match rotation_degrees {
            270 => Orientation::BottomRight,
            180 => Orientation::RightBottom,
            90 => Orientation::TopLeft,
            _ => Orientation::RightTop,
        }
    }

    pub fn upright_processor(&self) -> ImageProcessor {
        let builder = ImageProcessor::builder();
        match self {
            Orientation::TopLeft => builder,
            Orientation::RightTop => builder.add(Rot90Op { quarter_turns: -1 }),
            Orientation::BottomRight => builder.add(Rot90Op { quarter_turns: 2 }),
            // transverse
            Orientation::RightBottom => builder
                .add(Rot90Op { quarter_turns: -1 })
                .add(FlipVerticalOp),
        }
        .build()
    }

    pub fn to_upright(&self, image: TensorImage) -> TensorImage {
        self.upright_processor().process(image)
    }
}
