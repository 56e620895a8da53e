use crate::image_classifier::interface::ClassifierOptions;
use crate::image_classifier::models::model_config::ModelConfig;
use chrono::{FixedOffset, Offset, Utc};
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

pub const MODEL_PATH: &str = "./models/mobilenetv2-7.onnx";

const ENV_PREFIX: &str = "FRAME_CLASSIFIER_";

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("threshold must be within [0, 1], got {0}")]
    InvalidThreshold(f32),

    #[error("max results must be greater than 0")]
    InvalidMaxResults,

    #[error("thread count must be greater than 0")]
    InvalidNumThreads,

    #[error("invalid value `{value}` for {key}")]
    InvalidValue { key: String, value: String },
}

/// What `setup` does with an engine construction failure besides logging it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitFailurePolicy {
    Report,
    LogOnly,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClassifierConfig {
    pub threshold: f32,
    pub max_results: usize,
    pub num_threads: usize,
    pub model_path: String,
    pub init_failure: InitFailurePolicy,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            threshold: 0.1,
            max_results: 3,
            num_threads: 4,
            model_path: MODEL_PATH.to_string(),
            init_failure: InitFailurePolicy::Report,
        }
    }
}

impl ClassifierConfig {
    pub fn options(&self) -> ClassifierOptions {
        ClassifierOptions {
            score_threshold: self.threshold,
            max_results: self.max_results,
            num_threads: self.num_threads,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.threshold) {
            return Err(ConfigError::InvalidThreshold(self.threshold));
        }
        if self.max_results == 0 {
            return Err(ConfigError::InvalidMaxResults);
        }
        if self.num_threads == 0 {
            return Err(ConfigError::InvalidNumThreads);
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineKind {
    Fake,
    TractOnnx,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObserverKind {
    Console,
    Gui,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CameraKind {
    Fake { width: u32, height: u32 },
    ImageFile { path: String, rotation_degrees: i32 },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub classifier: ClassifierConfig,
    pub model: ModelConfig,
    pub engine: EngineKind,
    /// Fixed `(label, score)` candidates for the fake engine; random labels when unset.
    pub fake_scores: Option<Vec<(String, f32)>>,
    pub camera: CameraKind,
    pub observer: ObserverKind,
    pub frame_interval: Duration,
    pub max_frames: Option<usize>,
    pub logger_timezone: FixedOffset,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            classifier: ClassifierConfig::default(),
            model: ModelConfig::default(),
            engine: EngineKind::Fake,
            fake_scores: None,
            camera: CameraKind::Fake {
                width: 640,
                height: 480,
            },
            observer: ObserverKind::Console,
            frame_interval: Duration::from_secs(1),
            max_frames: None,
            logger_timezone: Utc.fix(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overridden by `FRAME_CLASSIFIER_*` variables.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Config::default();
        let get = |name: &str| lookup(&format!("{}{}", ENV_PREFIX, name));

        if let Some(threshold) = parse(&get, "THRESHOLD")? {
            config.classifier.threshold = threshold;
        }
        if let Some(max_results) = parse(&get, "MAX_RESULTS")? {
            config.classifier.max_results = max_results;
        }
        if let Some(num_threads) = parse(&get, "NUM_THREADS")? {
            config.classifier.num_threads = num_threads;
        }
        if let Some(model_path) = get("MODEL") {
            config.classifier.model_path = model_path;
        }
        if let Some(labels_path) = get("LABELS") {
            config.model.labels_path = Some(labels_path);
        }
        if let Some(policy) = get("INIT_FAILURE") {
            config.classifier.init_failure = match policy.as_str() {
                "report" => InitFailurePolicy::Report,
                "log" => InitFailurePolicy::LogOnly,
                _ => return Err(invalid("INIT_FAILURE", &policy)),
            };
        }
        if let Some(engine) = get("ENGINE") {
            config.engine = match engine.as_str() {
                "fake" => EngineKind::Fake,
                "tract" => EngineKind::TractOnnx,
                _ => return Err(invalid("ENGINE", &engine)),
            };
        }
        if let Some(scores) = get("FAKE_SCORES") {
            config.fake_scores =
                Some(parse_fake_scores(&scores).ok_or_else(|| invalid("FAKE_SCORES", &scores))?);
        }
        if let Some(observer) = get("OBSERVER") {
            config.observer = match observer.as_str() {
                "console" => ObserverKind::Console,
                "gui" => ObserverKind::Gui,
                _ => return Err(invalid("OBSERVER", &observer)),
            };
        }
        if let Some(path) = get("IMAGE") {
            config.camera = CameraKind::ImageFile {
                path,
                rotation_degrees: parse(&get, "ROTATION")?.unwrap_or(0),
            };
        }
        if let Some(millis) = parse(&get, "FRAME_INTERVAL_MS")? {
            config.frame_interval = Duration::from_millis(millis);
        }
        if let Some(max_frames) = parse(&get, "MAX_FRAMES")? {
            config.max_frames = Some(max_frames);
        }
        if let Some(hours) = parse::<i32>(&get, "UTC_OFFSET_HOURS")? {
            config.logger_timezone = hours
                .checked_mul(3600)
                .and_then(FixedOffset::east_opt)
                .ok_or_else(|| invalid("UTC_OFFSET_HOURS", &hours.to_string()))?;
        }

        config.classifier.validate()?;

        Ok(config)
    }
}

fn parse<T: FromStr>(
    get: &impl Fn(&str) -> Option<String>,
    name: &str,
) -> Result<Option<T>, ConfigError> {
    match get(name) {
        Some(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| invalid(name, &value)),
        None => Ok(None),
    }
}

/// `label:score` pairs separated by commas, e.g. `cat:0.9,dog:0.5`.
fn parse_fake_scores(value: &str) -> Option<Vec<(String, f32)>> {
    value
        .split(',')
        .map(|pair| {
            let (label, score) = pair.trim().rsplit_once(':')?;
            let label = label.trim();
            if label.is_empty() {
                return None;
            }
            Some((label.to_string(), score.trim().parse().ok()?))
        })
        .collect()
}

fn invalid(name: &str, value: &str) -> ConfigError {
    ConfigError::InvalidValue {
        key: format!("{}{}", ENV_PREFIX, name),
        value: value.to_string(),
    }
}
