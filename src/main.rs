use app::App;
use camera::impl_fake::CameraFake;
use camera::impl_image_file::CameraImageFile;
use camera::interface::Camera;
use classifier_observer::impl_console::ObserverConsole;
use classifier_observer::impl_gui::ObserverGui;
use classifier_service::main::ClassifierService;
use config::{CameraKind, Config, EngineKind, ObserverKind};
use image_classifier::impl_fake::{FakeScores, ImageClassifierLoaderFake};
use image_classifier::impl_tract_onnx::ImageClassifierLoaderTractOnnx;
use image_classifier::interface::ImageClassifierLoader;
use library::clock::impl_system::ClockSystem;
use library::logger::impl_console::LoggerConsole;
use library::logger::interface::Logger;
use std::sync::Arc;

mod app;
mod camera;
mod classifier_observer;
mod classifier_service;
mod config;
mod image_classifier;
mod library;

fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let config = Config::from_env()?;

    let logger: Arc<dyn Logger + Send + Sync> = Arc::new(LoggerConsole::new(config.logger_timezone));

    let camera: Arc<dyn Camera + Send + Sync> = match &config.camera {
        CameraKind::Fake { width, height } => {
            Arc::new(CameraFake::new(*width, *height, logger.clone()))
        }
        CameraKind::ImageFile {
            path,
            rotation_degrees,
        } => Arc::new(CameraImageFile::new(path, *rotation_degrees, logger.clone())?),
    };

    let loader: Arc<dyn ImageClassifierLoader + Send + Sync> = match (config.engine, &config.fake_scores) {
        (EngineKind::Fake, Some(scores)) => Arc::new(ImageClassifierLoaderFake::new(
            logger.clone(),
            FakeScores::Fixed(scores.clone()),
        )),
        (EngineKind::Fake, None) => Arc::new(ImageClassifierLoaderFake::with_random_labels(
            logger.clone(),
        )),
        (EngineKind::TractOnnx, _) => Arc::new(ImageClassifierLoaderTractOnnx::new(
            config.model.clone(),
            logger.clone(),
        )),
    };

    let clock = Arc::new(ClockSystem::new());

    match config.observer {
        ObserverKind::Console => {
            let observer = Arc::new(ObserverConsole::new(logger.clone()));
            let service = ClassifierService::new(
                config.classifier.clone(),
                logger.clone(),
                loader,
                observer,
                clock,
            );
            let mut app = App::new(
                camera,
                service,
                config.frame_interval,
                config.max_frames,
                logger,
            );
            app.start()
        }
        ObserverKind::Gui => {
            let (observer, settings) = ObserverGui::new(config.classifier.clone());
            let observer = Arc::new(observer);
            let service = ClassifierService::new(
                config.classifier.clone(),
                logger.clone(),
                loader,
                observer.clone(),
                clock,
            );
            let mut app = App::new(
                camera,
                service,
                config.frame_interval,
                config.max_frames,
                logger.clone(),
            )
            .with_settings(settings);

            std::thread::spawn(move || {
                if let Err(e) = app.start() {
                    let _ = logger.error(&format!("Frame loop stopped: {}", e));
                }
            });

            observer.run_window()
        }
    }
}
