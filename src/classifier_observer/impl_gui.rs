use crate::classifier_observer::interface::ClassifierObserver;
use crate::config::ClassifierConfig;
use crate::image_classifier::interface::{Category, Classifications};
use eframe::egui;
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

#[derive(Debug, Clone, Default)]
struct Snapshot {
    categories: Vec<Category>,
    inference_time: Duration,
    last_error: Option<String>,
    frames: usize,
}

struct ResultsWindow {
    snapshot: Arc<Mutex<Snapshot>>,
    settings: ClassifierConfig,
    settings_sender: Sender<ClassifierConfig>,
}

impl ResultsWindow {
    fn settings_panel(&mut self, ui: &mut egui::Ui) {
        ui.collapsing("Settings", |ui| {
            ui.add(egui::Slider::new(&mut self.settings.threshold, 0.0..=1.0).text("Threshold"));
            ui.add(egui::Slider::new(&mut self.settings.max_results, 1..=10).text("Max results"));
            ui.add(egui::Slider::new(&mut self.settings.num_threads, 1..=8).text("Threads"));

            if ui.button("Apply").clicked() {
                self.apply_settings();
            }
        });
    }

    /// Hands the edited settings to the frame loop, which rebuilds the classifier.
    fn apply_settings(&self) {
        // the loop may already be gone
        let _ = self.settings_sender.send(self.settings.clone());
    }
}

impl eframe::App for ResultsWindow {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let snapshot = lock(&self.snapshot).clone();

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Classification");
            ui.label(format!(
                "Frame {}  ·  inference {} ms",
                snapshot.frames,
                snapshot.inference_time.as_millis()
            ));
            ui.separator();

            if snapshot.categories.is_empty() {
                ui.label("No category above threshold");
            }

            for category in &snapshot.categories {
                ui.horizontal(|ui| {
                    ui.label(egui::RichText::new(&category.label).monospace().size(18.0));
                    ui.add(
                        egui::ProgressBar::new(category.score)
                            .text(format!("{:.1}%", category.score * 100.0)),
                    );
                });
            }

            if let Some(error) = &snapshot.last_error {
                ui.separator();
                ui.colored_label(egui::Color32::from_rgb(200, 40, 40), error.as_str());
            }

            ui.separator();
            self.settings_panel(ui);
        });

        // results arrive from the worker thread
        ctx.request_repaint_after(Duration::from_millis(100));
    }
}

pub struct ObserverGui {
    snapshot: Arc<Mutex<Snapshot>>,
    settings: ClassifierConfig,
    settings_sender: Sender<ClassifierConfig>,
}

impl ObserverGui {
    /// The receiver yields every configuration applied from the settings panel.
    pub fn new(settings: ClassifierConfig) -> (Self, Receiver<ClassifierConfig>) {
        let (settings_sender, settings_receiver) = mpsc::channel();
        let observer = Self {
            snapshot: Arc::new(Mutex::new(Snapshot::default())),
            settings,
            settings_sender,
        };
        (observer, settings_receiver)
    }

    fn window(&self) -> ResultsWindow {
        ResultsWindow {
            snapshot: self.snapshot.clone(),
            settings: self.settings.clone(),
            settings_sender: self.settings_sender.clone(),
        }
    }

    /// Blocks until the window is closed. Must run on the main thread.
    pub fn run_window(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let options = eframe::NativeOptions {
            viewport: egui::ViewportBuilder::default()
                .with_inner_size([420.0, 360.0])
                .with_resizable(true),
            ..Default::default()
        };

        let window = self.window();

        eframe::run_native(
            "Frame Classifier",
            options,
            Box::new(|_cc| Box::new(window)),
        )
        .map_err(|e| e.to_string())?;

        Ok(())
    }
}

impl ClassifierObserver for ObserverGui {
    fn on_error(&self, error: &str) {
        let mut snapshot = lock(&self.snapshot);
        snapshot.frames += 1;
        snapshot.last_error = Some(error.to_string());
    }

    fn on_results(&self, results: &[Classifications], inference_time: Duration) {
        let mut snapshot = lock(&self.snapshot);
        snapshot.frames += 1;
        snapshot.inference_time = inference_time;
        snapshot.categories = results
            .iter()
            .flat_map(|head| head.categories.iter().cloned())
            .collect();
        snapshot.last_error = None;
    }
}

fn lock(snapshot: &Mutex<Snapshot>) -> MutexGuard<'_, Snapshot> {
    match snapshot.lock() {
        Ok(snapshot) => snapshot,
        Err(poisoned) => poisoned.into_inner(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_results_replace_previous_error() {
        let (observer, _settings) = ObserverGui::new(ClassifierConfig::default());

        observer.on_error("model missing");
        assert_eq!(
            lock(&observer.snapshot).last_error.as_deref(),
            Some("model missing")
        );

        observer.on_results(
            &[Classifications {
                head_index: 0,
                head_name: None,
                categories: vec![Category {
                    index: 1,
                    label: "cat".to_string(),
                    score: 0.8,
                }],
            }],
            Duration::from_millis(12),
        );

        let snapshot = lock(&observer.snapshot).clone();
        assert_eq!(snapshot.frames, 2);
        assert_eq!(snapshot.last_error, None);
        assert_eq!(snapshot.categories.len(), 1);
        assert_eq!(snapshot.inference_time, Duration::from_millis(12));
    }

    #[test]
    fn test_applied_settings_reach_the_receiver() {
        let (observer, settings) = ObserverGui::new(ClassifierConfig::default());
        let mut window = observer.window();

        assert!(settings.try_recv().is_err());

        window.settings.threshold = 0.4;
        window.settings.max_results = 1;
        window.apply_settings();

        let applied = settings.try_recv().unwrap();
        assert_eq!(applied.threshold, 0.4);
        assert_eq!(applied.max_results, 1);
        assert_eq!(applied.model_path, ClassifierConfig::default().model_path);
    }
}
