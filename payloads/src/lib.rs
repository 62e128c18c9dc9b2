//! Types shared between the catalog UI and anything consuming its output.

pub mod requests;
pub mod sizes;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub use sizes::{CLOTHING_SIZES, ProductSize, ProductType, SHOE_SIZES};

/// Largest image file accepted from the file picker, in bytes.
pub const MAX_IMAGE_SIZE: usize = 5 * 1024 * 1024;

/// JPEG quality used when encoding a captured camera frame.
pub const CAPTURE_JPEG_QUALITY: f64 = 0.9;

/// `accept` attribute for the image file input.
pub const IMAGE_ACCEPT: &str = "image/*";

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::From,
)]
pub struct ProductId(pub Uuid);

impl ProductId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ProductId {
    fn default() -> Self {
        Self::new()
    }
}
