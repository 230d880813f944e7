pub mod error;
pub mod ports;
pub mod respond;
pub mod slug;

pub mod gallery;
pub mod images;
pub mod texts;
pub mod timeline;

#[cfg(test)]
pub mod testing;

pub use error::ApiError;
pub use ports::{Blobs, Store};
