//! COLLADA (`.dae`) document model and the texture-slot mutation core.
//!
//! Everything in here is plain tree editing against one schema dialect: the
//! `library_effects/.../phong` channel elements and their paired
//! `library_images` entries. GUI and CLI front-ends live elsewhere.

pub mod channel;
pub mod document;
pub mod edit;
pub mod resolve;

pub use channel::*;
pub use document::*;
pub use edit::*;
pub use resolve::*;
