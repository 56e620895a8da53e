pub mod bitmap;
pub mod main;
