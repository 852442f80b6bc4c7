//! Anonbeats media host client.
//!
//! Everything durable in Anonbeats lives on a remote media host: audio
//! assets, cover art, and the playlist document (a raw JSON blob). This
//! crate is the only place that speaks the host's HTTP API.
//!
//! The [`MediaStore`] trait is the contract; [`HttpMediaStore`] implements
//! it over reqwest, and [`MemoryMediaStore`] is an in-process double for
//! tests and local development.

#![forbid(unsafe_code)]

mod error;
mod http;
mod memory;
mod signing;
mod store;
mod types;

pub use error::{MediaError, Result};
pub use http::{HttpMediaStore, MediaConfig};
pub use memory::MemoryMediaStore;
pub use signing::{sign_upload, SignedUpload, UploadRequest};
pub use store::MediaStore;
pub use types::{AssetContext, MediaAsset, RawObject, Revision};
