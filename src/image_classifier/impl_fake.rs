use crate::image_classifier::error::ClassifierError;
use crate::image_classifier::interface::{
    rank_categories, Category, Classifications, ClassifierOptions, ImageClassifier,
    ImageClassifierLoader,
};
use crate::image_classifier::orientation::Orientation;
use crate::image_classifier::tensor_image::TensorImage;
use crate::library::logger::interface::Logger;
use rand::distr::{Distribution, Uniform};
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Debug, Clone, PartialEq)]
pub enum FakeScores {
    /// Candidate `(label, score)` pairs returned for every image.
    Fixed(Vec<(String, f32)>),
    /// Every label gets a uniformly random score per image.
    Random(Vec<String>),
}

#[derive(Debug, Default)]
struct FakeState {
    load_calls: Vec<(String, ClassifierOptions)>,
    failing_loads: usize,
    failing_classifications: usize,
    classify_calls: usize,
    orientations: Vec<Orientation>,
}

/// Loader whose classifiers behave like a real engine, applying the score
/// threshold and max results they were loaded with. Failures can be scripted.
#[derive(Clone)]
pub struct ImageClassifierLoaderFake {
    scores: FakeScores,
    state: Arc<Mutex<FakeState>>,
    logger: Arc<dyn Logger + Send + Sync>,
}

impl ImageClassifierLoaderFake {
    pub fn new(logger: Arc<dyn Logger + Send + Sync>, scores: FakeScores) -> Self {
        Self {
            scores,
            state: Arc::new(Mutex::new(FakeState::default())),
            logger: logger.with_namespace("image_classifier").with_namespace("fake"),
        }
    }

    pub fn with_random_labels(logger: Arc<dyn Logger + Send + Sync>) -> Self {
        let labels = [
            "dog", "cat", "person", "car", "chair", "table", "bird", "tree", "bicycle", "book",
            "laptop", "phone", "cup", "bottle", "keyboard", "mouse", "plant", "clock",
        ];
        Self::new(
            logger,
            FakeScores::Random(labels.iter().map(|l| l.to_string()).collect()),
        )
    }

    fn lock(&self) -> MutexGuard<'_, FakeState> {
        match self.state.lock() {
            Ok(state) => state,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

#[cfg(test)]
impl ImageClassifierLoaderFake {
    pub fn fail_next_loads(&self, count: usize) {
        self.lock().failing_loads = count;
    }

    pub fn fail_next_classifications(&self, count: usize) {
        self.lock().failing_classifications = count;
    }

    pub fn load_calls(&self) -> Vec<(String, ClassifierOptions)> {
        self.lock().load_calls.clone()
    }

    pub fn classify_calls(&self) -> usize {
        self.lock().classify_calls
    }

    pub fn orientations(&self) -> Vec<Orientation> {
        self.lock().orientations.clone()
    }
}

impl ImageClassifierLoader for ImageClassifierLoaderFake {
    fn load(
        &self,
        model_path: &str,
        options: &ClassifierOptions,
    ) -> Result<Box<dyn ImageClassifier>, ClassifierError> {
        let mut state = self.lock();
        state
            .load_calls
            .push((model_path.to_string(), options.clone()));

        if state.failing_loads > 0 {
            state.failing_loads -= 1;
            return Err(ClassifierError::ModelLoad {
                path: model_path.to_string(),
                message: "scripted load failure".to_string(),
            });
        }

        let _ = self.logger.info(&format!("Loaded fake model {}", model_path));

        Ok(Box::new(ImageClassifierFake {
            scores: self.scores.clone(),
            options: options.clone(),
            state: self.state.clone(),
        }))
    }
}

pub struct ImageClassifierFake {
    scores: FakeScores,
    options: ClassifierOptions,
    state: Arc<Mutex<FakeState>>,
}

impl ImageClassifierFake {
    fn candidates(&self) -> Result<Vec<Category>, ClassifierError> {
        match &self.scores {
            FakeScores::Fixed(scores) => Ok(scores
                .iter()
                .enumerate()
                .map(|(index, (label, score))| Category {
                    index,
                    label: label.clone(),
                    score: *score,
                })
                .collect()),
            FakeScores::Random(labels) => {
                let mut rng = rand::rng();
                let score_dist = Uniform::new(0.0f32, 1.0)
                    .map_err(|e| ClassifierError::Inference(e.to_string()))?;
                Ok(labels
                    .iter()
                    .enumerate()
                    .map(|(index, label)| Category {
                        index,
                        label: label.clone(),
                        score: score_dist.sample(&mut rng),
                    })
                    .collect())
            }
        }
    }
}

impl ImageClassifier for ImageClassifierFake {
    fn classify(
        &self,
        _image: &TensorImage,
        orientation: Orientation,
    ) -> Result<Vec<Classifications>, ClassifierError> {
        {
            let mut state = self
                .state
                .lock()
                .map_err(|e| ClassifierError::Inference(e.to_string()))?;
            state.classify_calls += 1;
            state.orientations.push(orientation);

            if state.failing_classifications > 0 {
                state.failing_classifications -= 1;
                return Err(ClassifierError::Inference(
                    "scripted classification failure".to_string(),
                ));
            }
        }

        Ok(vec![Classifications {
            head_index: 0,
            head_name: None,
            categories: rank_categories(self.candidates()?, &self.options),
        }])
    }
}
