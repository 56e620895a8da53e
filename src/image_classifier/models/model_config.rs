/// Input layout and post-processing of an ONNX classification model.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelConfig {
    /// (height, width)
    pub input_shape: (u32, u32),
    pub labels_path: Option<String>,
    pub mean: [f32; 3],
    pub std: [f32; 3],
    pub apply_softmax: bool,
}

impl Default for ModelConfig {
    fn default() -> Self {
        // MobileNetV2 / ImageNet
        Self {
            input_shape: (224, 224),
            labels_path: None,
            mean: [0.485, 0.456, 0.406],
            std: [0.229, 0.224, 0.225],
            apply_softmax: true,
        }
    }
}
