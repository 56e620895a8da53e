pub mod image;
pub mod scores;
