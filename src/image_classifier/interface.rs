use crate::image_classifier::error::ClassifierError;
use crate::image_classifier::orientation::Orientation;
use crate::image_classifier::tensor_image::TensorImage;

#[derive(Debug, Clone, PartialEq)]
pub struct Category {
    pub index: usize,
    pub label: String,
    pub score: f32,
}

/// Ranked categories produced by one classification head.
#[derive(Debug, Clone, PartialEq)]
pub struct Classifications {
    pub head_index: usize,
    pub head_name: Option<String>,
    pub categories: Vec<Category>,
}

/// Options baked into a classifier when it is loaded.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifierOptions {
    pub score_threshold: f32,
    pub max_results: usize,
    pub num_threads: usize,
}

pub trait ImageClassifier: Send {
    fn classify(
        &self,
        image: &TensorImage,
        orientation: Orientation,
    ) -> Result<Vec<Classifications>, ClassifierError>;
}

pub trait ImageClassifierLoader: Send + Sync {
    fn load(
        &self,
        model_path: &str,
        options: &ClassifierOptions,
    ) -> Result<Box<dyn ImageClassifier>, ClassifierError>;
}

/// Drops categories under the threshold, sorts the rest by descending score
/// and keeps at most `max_results`.
pub fn rank_categories(mut categories: Vec<Category>, options: &ClassifierOptions) -> Vec<Category> {
    categories.retain(|c| c.score >= options.score_threshold);
    categories.sort_by(|a, b| b.score.total_cmp(&a.score));
    categories.truncate(options.max_results);
    categories
}
