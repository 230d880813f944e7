pub mod http;
pub mod model;
pub mod service;

pub use model::{CreateTextPayload, TextPatch, TextRecord, UpdateTextPayload};
