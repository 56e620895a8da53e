pub mod error;
pub mod impl_fake;
pub mod impl_tract_onnx;
pub mod interface;
pub mod models;
pub mod orientation;
pub mod processor;
pub mod tensor_image;
pub mod tract;
