pub mod http;
pub mod model;
pub mod service;

pub use model::{
    CreateImagePayload, ImagePatch, ImageRecord, NewImage, UpdateImagePayload, MAX_IMAGE_BYTES,
};
