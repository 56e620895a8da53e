use crate::classifier_observer::interface::ClassifierObserver;
use crate::image_classifier::interface::Classifications;
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq)]
pub enum ObserverEvent {
    Results {
        results: Vec<Classifications>,
        inference_time: Duration,
    },
    Error(String),
}

#[derive(Debug, Clone, Default)]
pub struct ObserverFake {
    events: Arc<Mutex<Vec<ObserverEvent>>>,
}

impl ObserverFake {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<ObserverEvent> {
        match self.events.lock() {
            Ok(events) => events.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn errors(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                ObserverEvent::Error(message) => Some(message),
                ObserverEvent::Results { .. } => None,
            })
            .collect()
    }

    fn push(&self, event: ObserverEvent) {
        match self.events.lock() {
            Ok(mut events) => events.push(event),
            Err(poisoned) => poisoned.into_inner().push(event),
        }
    }
}

impl ClassifierObserver for ObserverFake {
    fn on_error(&self, error: &str) {
        self.push(ObserverEvent::Error(error.to_string()));
    }

    fn on_results(&self, results: &[Classifications], inference_time: Duration) {
        self.push(ObserverEvent::Results {
            results: results.to_vec(),
            inference_time,
        });
    }
}
