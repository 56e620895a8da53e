use crate::image_classifier::models::model_config::ModelConfig;
use crate::image_classifier::orientation::Orientation;
use crate::image_classifier::processor::{ImageOp, ResizeOp};
use crate::image_classifier::tensor_image::TensorImage;
use image::{imageops, Rgba, RgbaImage};
use tract_onnx::prelude::*;

/// Scales to fit inside `width` × `height` keeping the aspect ratio and
/// centers the result on a black canvas. Square inputs are stretched.
pub fn letterbox(image: TensorImage, width: u32, height: u32) -> RgbaImage {
    if image.width() == image.height() {
        return ResizeOp { width, height }.apply(image).into_rgba();
    }

    let (w, h) = (image.width() as f32, image.height() as f32);
    let scale = (width as f32 / w).min(height as f32 / h);
    let new_w = ((w * scale) as u32).clamp(1, width);
    let new_h = ((h * scale) as u32).clamp(1, height);

    let scaled = ResizeOp {
        width: new_w,
        height: new_h,
    }
    .apply(image);

    let mut padded = RgbaImage::from_pixel(width, height, Rgba([0, 0, 0, 255]));
    let x_offset = (width - new_w) / 2;
    let y_offset = (height - new_h) / 2;
    imageops::overlay(&mut padded, scaled.as_rgba(), x_offset as i64, y_offset as i64);

    padded
}

/// NCHW f32 tensor, each channel scaled to [0,1] then normalized with `mean` and `std`.
/// Alpha is dropped.
pub fn image_to_tensor(image: &RgbaImage, mean: &[f32; 3], std: &[f32; 3]) -> Tensor {
    let (width, height) = (image.width() as usize, image.height() as usize);

    tract_ndarray::Array4::from_shape_fn((1, 3, height, width), |(_, c, y, x)| {
        let pixel = image.get_pixel(x as u32, y as u32);
        (pixel[c] as f32 / 255.0 - mean[c]) / std[c]
    })
    .into_tensor()
}

/// Upright, letterboxed and normalized model input for one frame.
pub fn input_tensor(image: &TensorImage, orientation: Orientation, config: &ModelConfig) -> Tensor {
    let (height, width) = config.input_shape;
    let upright = orientation.to_upright(image.clone());

    image_to_tensor(&letterbox(upright, width, height), &config.mean, &config.std)
}

#[cfg(test)]
mod tests {
    use super::*;

    const NO_MEAN: [f32; 3] = [0.0, 0.0, 0.0];
    const NO_STD: [f32; 3] = [1.0, 1.0, 1.0];

    fn solid(width: u32, height: u32, color: [u8; 3]) -> TensorImage {
        TensorImage::from_rgba(RgbaImage::from_pixel(
            width,
            height,
            Rgba([color[0], color[1], color[2], 255]),
        ))
    }

    fn unnormalized(input_shape: (u32, u32)) -> ModelConfig {
        ModelConfig {
            input_shape,
            mean: NO_MEAN,
            std: NO_STD,
            ..ModelConfig::default()
        }
    }

    #[test]
    fn test_square_image_to_tensor() {
        let padded = letterbox(solid(100, 100, [255, 0, 0]), 224, 224);
        let tensor = image_to_tensor(&padded, &NO_MEAN, &NO_STD);

        assert_eq!(tensor.shape(), &[1, 3, 224, 224]);

        let slice = tensor.as_slice::<f32>().unwrap();
        assert_eq!(slice[0], 1.0);
        assert_eq!(slice[224 * 224], 0.0);
        assert_eq!(slice[2 * 224 * 224], 0.0);
    }

    #[test]
    fn test_wide_image_is_centered() {
        let padded = letterbox(solid(200, 100, [255, 0, 0]), 224, 224);
        let tensor = image_to_tensor(&padded, &NO_MEAN, &NO_STD);
        let slice = tensor.as_slice::<f32>().unwrap();

        // red at the center of the red channel, black padding in the top row
        assert_eq!(slice[112 * 224 + 112], 1.0);
        assert_eq!(slice[0], 0.0);
    }

    #[test]
    fn test_normalization() {
        let config = ModelConfig {
            input_shape: (10, 10),
            mean: [0.5, 0.5, 0.5],
            std: [0.25, 0.25, 0.25],
            ..ModelConfig::default()
        };
        let tensor = input_tensor(&solid(10, 10, [255, 0, 255]), Orientation::TopLeft, &config);
        let slice = tensor.as_slice::<f32>().unwrap();

        assert!((slice[0] - 2.0).abs() < 1e-5);
        assert!((slice[100] + 2.0).abs() < 1e-5);
        assert!((slice[200] - 2.0).abs() < 1e-5);
    }

    #[test]
    fn test_input_is_turned_upright_before_letterboxing() {
        let config = unnormalized((4, 4));
        let frame = solid(4, 2, [255, 0, 0]);

        // 4x2 stays wide: black bands above and below
        let as_is = input_tensor(&frame, Orientation::TopLeft, &config);
        assert_eq!(as_is.shape(), &[1, 3, 4, 4]);
        assert_eq!(as_is.as_slice::<f32>().unwrap()[1], 0.0);

        // turned to 2x4: black bands left and right, red reaches the top row
        let turned = input_tensor(&frame, Orientation::RightTop, &config);
        assert_eq!(turned.shape(), &[1, 3, 4, 4]);
        let slice = turned.as_slice::<f32>().unwrap();
        assert_eq!(slice[1], 1.0);
        assert_eq!(slice[0], 0.0);
    }
}
