//! Tooling layer shared by the GUI editor and the command-line front-ends.
//!
//! This module is intentionally separate from the document model so that the
//! mutation core stays free of egui and file-dialog concerns while the
//! front-ends share session, config, and preview logic.

pub mod config;
pub mod io;
pub mod preview;
pub mod session;
pub mod ui;
