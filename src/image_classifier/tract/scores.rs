use crate::image_classifier::interface::{rank_categories, Category, ClassifierOptions};

pub fn softmax(scores: &mut [f32]) {
    let max = scores.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    if !max.is_finite() {
        return;
    }

    let mut sum = 0.0;
    for score in scores.iter_mut() {
        *score = (*score - max).exp();
        sum += *score;
    }

    if sum > 0.0 {
        for score in scores.iter_mut() {
            *score /= sum;
        }
    }
}

pub fn parse_labels(contents: &str) -> Vec<String> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Turns one raw output row into ranked categories. Indices without a label
/// are named by their index.
pub fn categories_from_scores(
    mut scores: Vec<f32>,
    labels: &[String],
    apply_softmax: bool,
    options: &ClassifierOptions,
) -> Vec<Category> {
    if apply_softmax {
        softmax(&mut scores);
    }

    let categories = scores
        .into_iter()
        .enumerate()
        .map(|(index, score)| Category {
            index,
            label: labels
                .get(index)
                .cloned()
                .unwrap_or_else(|| index.to_string()),
            score,
        })
        .collect();

    rank_categories(categories, options)
}
