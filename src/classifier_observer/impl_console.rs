use crate::classifier_observer::interface::ClassifierObserver;
use crate::image_classifier::interface::Classifications;
use crate::library::logger::interface::Logger;
use std::sync::Arc;
use std::time::Duration;

pub struct ObserverConsole {
    logger: Arc<dyn Logger + Send + Sync>,
}

impl ObserverConsole {
    pub fn new(logger: Arc<dyn Logger + Send + Sync>) -> Self {
        Self {
            logger: logger.with_namespace("observer"),
        }
    }
}

impl ClassifierObserver for ObserverConsole {
    fn on_error(&self, error: &str) {
        let _ = self.logger.error(error);
    }

    fn on_results(&self, results: &[Classifications], inference_time: Duration) {
        let _ = self
            .logger
            .info(&format!("Inference time: {} ms", inference_time.as_millis()));

        let mut empty = true;
        for head in results {
            let head_label = match &head.head_name {
                Some(name) => name.clone(),
                None => format!("head {}", head.head_index),
            };
            for category in &head.categories {
                empty = false;
                let _ = self.logger.info(&format!(
                    "[{}] {} (#{}) {:.2}%",
                    head_label,
                    category.label,
                    category.index,
                    category.score * 100.0
                ));
            }
        }

        if empty {
            let _ = self.logger.info("No category above threshold");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image_classifier::interface::Category;
    use crate::library::logger::impl_memory::LoggerMemory;

    #[test]
    fn test_logs_each_category_with_its_head() {
        let logger = LoggerMemory::new();
        let observer = ObserverConsole::new(Arc::new(logger.clone()));

        observer.on_results(
            &[Classifications {
                head_index: 0,
                head_name: None,
                categories: vec![Category {
                    index: 7,
                    label: "cat".to_string(),
                    score: 0.875,
                }],
            }],
            Duration::from_millis(31),
        );
        observer.on_results(&[], Duration::from_millis(4));
        observer.on_error("model missing");

        let messages: Vec<String> = logger.entries().into_iter().map(|e| e.message).collect();
        assert_eq!(
            messages,
            vec![
                "Inference time: 31 ms",
                "[head 0] cat (#7) 87.50%",
                "Inference time: 4 ms",
                "No category above threshold",
                "model missing",
            ]
        );
        assert_eq!(logger.errors().len(), 1);
    }
}
