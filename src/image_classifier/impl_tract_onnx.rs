use crate::image_classifier::error::ClassifierError;
use crate::image_classifier::interface::{
    Classifications, ClassifierOptions, ImageClassifier, ImageClassifierLoader,
};
use crate::image_classifier::models::model_config::ModelConfig;
use crate::image_classifier::orientation::Orientation;
use crate::image_classifier::tensor_image::TensorImage;
use crate::image_classifier::tract::image::input_tensor;
use crate::image_classifier::tract::scores::{categories_from_scores, parse_labels};
use crate::library::logger::interface::Logger;
use std::sync::Arc;
use tract_onnx::prelude::*;

type TractPlan = SimplePlan<TypedFact, Box<dyn TypedOp>, TypedModel>;

pub struct ImageClassifierLoaderTractOnnx {
    config: ModelConfig,
    logger: Arc<dyn Logger + Send + Sync>,
}

impl ImageClassifierLoaderTractOnnx {
    pub fn new(config: ModelConfig, logger: Arc<dyn Logger + Send + Sync>) -> Self {
        Self {
            config,
            logger: logger.with_namespace("image_classifier").with_namespace("tract_onnx"),
        }
    }
}

impl ImageClassifierLoader for ImageClassifierLoaderTractOnnx {
    fn load(
        &self,
        model_path: &str,
        options: &ClassifierOptions,
    ) -> Result<Box<dyn ImageClassifier>, ClassifierError> {
        let _ = self.logger.info(&format!(
            "Loading {} (threshold {}, max results {}, {} threads requested, tract runs on the calling thread)",
            model_path, options.score_threshold, options.max_results, options.num_threads
        ));

        let classifier = ImageClassifierTractOnnx::new(model_path, self.config.clone(), options)?;

        let _ = self
            .logger
            .info(&format!("Loaded {} with {} labels", model_path, classifier.labels.len()));

        Ok(Box::new(classifier))
    }
}

pub struct ImageClassifierTractOnnx {
    model: TractPlan,
    config: ModelConfig,
    options: ClassifierOptions,
    labels: Vec<String>,
}

impl ImageClassifierTractOnnx {
    pub fn new(
        model_path: &str,
        config: ModelConfig,
        options: &ClassifierOptions,
    ) -> Result<Self, ClassifierError> {
        let load_error = |message: String| ClassifierError::ModelLoad {
            path: model_path.to_string(),
            message,
        };

        let (height, width) = config.input_shape;

        let model = tract_onnx::onnx()
            .model_for_path(model_path)
            .and_then(|model| {
                model.with_input_fact(0, f32::fact([1, 3, height as usize, width as usize]).into())
            })
            .and_then(|model| model.into_optimized())
            .and_then(|model| model.into_runnable())
            .map_err(|e| load_error(e.to_string()))?;

        let labels = match &config.labels_path {
            Some(path) => std::fs::read_to_string(path)
                .map(|contents| parse_labels(&contents))
                .map_err(|e| load_error(format!("cannot read labels `{}`: {}", path, e)))?,
            None => Vec::new(),
        };

        Ok(Self {
            model,
            config,
            options: options.clone(),
            labels,
        })
    }
}

impl ImageClassifier for ImageClassifierTractOnnx {
    fn classify(
        &self,
        image: &TensorImage,
        orientation: Orientation,
    ) -> Result<Vec<Classifications>, ClassifierError> {
        let input = input_tensor(image, orientation, &self.config);

        let outputs = self
            .model
            .run(tvec!(input.into_tvalue()))
            .map_err(|e| ClassifierError::Inference(e.to_string()))?;

        let output = outputs
            .first()
            .ok_or_else(|| ClassifierError::Inference("model produced no outputs".to_string()))?;
        let scores: Vec<f32> = output
            .to_array_view::<f32>()
            .map_err(|e| ClassifierError::Inference(e.to_string()))?
            .iter()
            .copied()
            .collect();

        Ok(vec![Classifications {
            head_index: 0,
            head_name: None,
            categories: categories_from_scores(
                scores,
                &self.labels,
                self.config.apply_softmax,
                &self.options,
            ),
        }])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::library::logger::impl_memory::LoggerMemory;

    #[test]
    fn test_missing_model_is_a_load_error() {
        let loader = ImageClassifierLoaderTractOnnx::new(
            ModelConfig::default(),
            Arc::new(LoggerMemory::new()),
        );
        let options = ClassifierOptions {
            score_threshold: 0.1,
            max_results: 3,
            num_threads: 4,
        };

        match loader.load("./does/not/exist.onnx", &options) {
            Err(ClassifierError::ModelLoad { path, .. }) => {
                assert_eq!(path, "./does/not/exist.onnx")
            }
            Err(e) => panic!("unexpected error: {}", e),
            Ok(_) => panic!("loading a missing model succeeded"),
        }
    }
}
