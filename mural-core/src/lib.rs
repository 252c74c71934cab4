//! This crate implements the core functionality of the mural front-end
//!
//! This mostly includes archive reading, asset decoding, the graphic descriptor documents
//! and the UI-state save codec.

#![allow(clippy::uninlined_format_args)]

pub mod assets;
pub mod error;
pub mod format;
pub mod graphic;
pub mod save;
pub mod types;

pub use assets::{AssetCategory, AssetRegistry};
pub use error::{MuralError, Result};
pub use graphic::GraphicRegistry;

#[cfg(test)]
mod test_util;
