use crate::image_classifier::interface::Classifications;
use std::time::Duration;

/// Receives the outcome of every classification attempt, synchronously,
/// on the thread that called the service.
pub trait ClassifierObserver: Send + Sync {
    fn on_error(&self, error: &str);
    fn on_results(&self, results: &[Classifications], inference_time: Duration);
}
