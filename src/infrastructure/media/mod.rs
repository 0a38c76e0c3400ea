// src/infrastructure/media/mod.rs
pub mod codec;
pub mod local_storage;

pub use codec::ImageRsCodec;
pub use local_storage::LocalMediaStorage;
