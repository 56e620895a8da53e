use crate::camera::interface::Camera;
use crate::classifier_service::main::ClassifierService;
use crate::config::ClassifierConfig;
use crate::library::logger::interface::Logger;
use std::sync::mpsc::Receiver;
use std::sync::Arc;
use std::time::Duration;

pub struct App {
    camera: Arc<dyn Camera + Send + Sync>,
    service: ClassifierService,
    frame_interval: Duration,
    max_frames: Option<usize>,
    settings: Option<Receiver<ClassifierConfig>>,
    logger: Arc<dyn Logger + Send + Sync>,
}

impl App {
    pub fn new(
        camera: Arc<dyn Camera + Send + Sync>,
        service: ClassifierService,
        frame_interval: Duration,
        max_frames: Option<usize>,
        logger: Arc<dyn Logger + Send + Sync>,
    ) -> Self {
        Self {
            camera,
            service,
            frame_interval,
            max_frames,
            settings: None,
            logger: logger.with_namespace("app"),
        }
    }

    /// Classifier settings received here replace the service configuration
    /// before the next frame.
    pub fn with_settings(mut self, settings: Receiver<ClassifierConfig>) -> Self {
        self.settings = Some(settings);
        self
    }

    fn apply_settings(&mut self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let Some(settings) = &self.settings else {
            return Ok(());
        };

        // only the latest pending change matters
        let Some(config) = settings.try_iter().last() else {
            return Ok(());
        };

        if let Err(e) = config.validate() {
            self.logger
                .error(&format!("Ignoring classifier settings: {}", e))?;
            return Ok(());
        }

        self.service.update_config(config);
        let config = self.service.config();
        self.logger.info(&format!(
            "Classifier settings changed (threshold {}, max results {}, {} threads)",
            config.threshold, config.max_results, config.num_threads
        ))?;

        Ok(())
    }

    /// Feeds one frame at a time to the service until `max_frames` is reached.
    pub fn start(&mut self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.camera.start()?;

        let mut frames = 0;
        while self.max_frames.map_or(true, |max| frames < max) {
            self.apply_settings()?;

            let frame = self.camera.capture_frame()?;
            self.service.classify(frame);
            frames += 1;

            std::thread::sleep(self.frame_interval);
        }

        self.logger
            .info(&format!("Classified {} frames", frames))?;

        self.service.clear();
        self.camera.stop()?;

        Ok(())
    }
}
