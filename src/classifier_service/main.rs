use crate::camera::frame::CameraFrame;
use crate::classifier_observer::interface::ClassifierObserver;
use crate::classifier_service::bitmap::bitmap_from_frame;
use crate::config::{ClassifierConfig, InitFailurePolicy};
use crate::image_classifier::error::ClassifierError;
use crate::image_classifier::interface::{ImageClassifier, ImageClassifierLoader};
use crate::image_classifier::orientation::Orientation;
use crate::image_classifier::processor::ImageProcessor;
use crate::image_classifier::tensor_image::TensorImage;
use crate::library::clock::interface::Clock;
use crate::library::logger::interface::Logger;
use std::sync::Arc;

pub enum EngineState {
    Absent,
    Ready(Box<dyn ImageClassifier>),
}

/// Owns one engine handle and turns camera frames into observer notifications.
///
/// `classify` takes `&mut self`: calls on one service are serialized by the
/// caller, the service itself holds no locks.
pub struct ClassifierService {
    config: ClassifierConfig,
    state: EngineState,
    image_processor: ImageProcessor,
    loader: Arc<dyn ImageClassifierLoader + Send + Sync>,
    observer: Arc<dyn ClassifierObserver + Send + Sync>,
    clock: Arc<dyn Clock + Send + Sync>,
    logger: Arc<dyn Logger + Send + Sync>,
}

impl ClassifierService {
    pub fn new(
        config: ClassifierConfig,
        logger: Arc<dyn Logger + Send + Sync>,
        loader: Arc<dyn ImageClassifierLoader + Send + Sync>,
        observer: Arc<dyn ClassifierObserver + Send + Sync>,
        clock: Arc<dyn Clock + Send + Sync>,
    ) -> Self {
        let mut service = Self {
            config,
            state: EngineState::Absent,
            image_processor: ImageProcessor::builder().build(),
            loader,
            observer,
            clock,
            logger: logger.with_namespace("classifier_service"),
        };

        service.setup();

        service
    }

    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    pub fn is_ready(&self) -> bool {
        matches!(self.state, EngineState::Ready(_))
    }

    /// Builds the engine handle from the current configuration. A failure
    /// leaves the handle absent, is always logged and is reported to the
    /// observer unless the policy is `LogOnly`.
    pub fn setup(&mut self) -> bool {
        match self.initialize() {
            Ok(()) => true,
            Err(error) => {
                if self.config.init_failure == InitFailurePolicy::Report {
                    self.observer.on_error(&init_failure_message(&error));
                }
                false
            }
        }
    }

    /// Replaces the configuration. The handle is rebuilt on the next frame.
    pub fn update_config(&mut self, config: ClassifierConfig) {
        self.config = config;
        self.clear();
    }

    pub fn clear(&mut self) {
        self.state = EngineState::Absent;
    }

    /// Classifies one frame and notifies the observer exactly once. The frame
    /// is released as soon as its pixels are copied.
    pub fn classify(&mut self, frame: Box<dyn CameraFrame>) {
        if !self.is_ready() {
            if let Err(error) = self.initialize() {
                drop(frame);
                self.observer.on_error(&init_failure_message(&error));
                return;
            }
        }

        let rotation_degrees = frame.rotation_degrees();
        let bitmap = bitmap_from_frame(frame.as_ref());
        drop(frame);

        let bitmap = match bitmap {
            Ok(bitmap) => bitmap,
            Err(error) => {
                let _ = self.logger.error(&error.to_string());
                self.observer.on_error(&error.to_string());
                return;
            }
        };

        let EngineState::Ready(classifier) = &self.state else {
            self.observer.on_error("Image classifier is not initialized");
            return;
        };

        let start = self.clock.now();
        let tensor_image = self.image_processor.process(TensorImage::from_rgba(bitmap));
        let orientation = Orientation::from_rotation_degrees(rotation_degrees);
        let results = classifier.classify(&tensor_image, orientation);
        let inference_time = self.clock.now().saturating_duration_since(start);

        match results {
            Ok(results) => self.observer.on_results(&results, inference_time),
            Err(error) => {
                let message = format!("Image classification failed: {}", error);
                let _ = self.logger.error(&message);
                self.observer.on_error(&message);
            }
        }
    }

    fn initialize(&mut self) -> Result<(), ClassifierError> {
        let options = self.config.options();

        match self.loader.load(&self.config.model_path, &options) {
            Ok(classifier) => {
                self.state = EngineState::Ready(classifier);
                let _ = self.logger.info(&format!(
                    "Image classifier ready (threshold {}, max results {}, {} threads)",
                    options.score_threshold, options.max_results, options.num_threads
                ));
                Ok(())
            }
            Err(error) => {
                self.state = EngineState::Absent;
                let _ = self
                    .logger
                    .error(&format!("Failed to load model with error: {}", error));
                Err(error)
            }
        }
    }
}

fn init_failure_message(error: &ClassifierError) -> String {
    format!("Image classifier failed to initialize: {}", error)
}
