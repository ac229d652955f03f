//! daetex: attach or replace texture-map references in COLLADA (`.dae`)
//! models and preview the linked images.
//!
//! The `dae` module holds the document model and the phong channel mutation
//! core; `editor` holds the session/config/preview layer shared by the GUI
//! and the CLIs.

pub mod dae;
pub mod editor;

pub use dae::{
    BindAction, BindError, BindReport, DaeDocument, DaeError, FILE_URI_PREFIX, LinkedTexture,
    TextureChannel, bind_texture, linked_textures, resolve_texture_path,
};
