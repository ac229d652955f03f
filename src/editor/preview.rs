use std::{collections::HashMap, path::Path};

use eframe::egui::{self, Color32, ColorImage, RichText};

use crate::{dae::TextureChannel, editor::session::ModelSession};

const THUMBNAIL_EDGE: f32 = 160.0;

/// Per-slot thumbnails decoded from the resolved texture paths.
///
/// Decoding failures are kept per channel and shown inline; a texture that
/// cannot be previewed never blocks editing.
#[derive(Default)]
pub struct TexturePreviewPanel {
    thumbnails: HashMap<TextureChannel, egui::TextureHandle>,
    failures: HashMap<TextureChannel, String>,
}

impl TexturePreviewPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop stale thumbnails and decode every currently linked texture.
    pub fn sync(&mut self, ctx: &egui::Context, session: &ModelSession) {
        self.clear();
        for resolved in session.resolved_textures() {
            let channel = resolved.linked.channel;
            match load_thumbnail(&resolved.path) {
                Ok(image) => {
                    let handle = ctx.load_texture(
                        format!("slot_preview_{channel}"),
                        image,
                        egui::TextureOptions::LINEAR,
                    );
                    self.thumbnails.insert(channel, handle);
                }
                Err(message) => {
                    self.failures.insert(channel, message);
                }
            }
        }
    }

    pub fn clear(&mut self) {
        self.thumbnails.clear();
        self.failures.clear();
    }

    pub fn ui(&self, ui: &mut egui::Ui, channel: TextureChannel) {
        if let Some(texture) = self.thumbnails.get(&channel) {
            let size = texture.size_vec2();
            let scale = (THUMBNAIL_EDGE / size.x.max(size.y)).min(1.0);
            ui.add(egui::Image::new(texture).fit_to_exact_size(size * scale));
        } else if let Some(failure) = self.failures.get(&channel) {
            ui.label(RichText::new(failure).color(Color32::from_rgb(235, 168, 75)));
        } else {
            ui.label(RichText::new("No preview").weak());
        }
    }
}

fn load_thumbnail(path: &Path) -> Result<ColorImage, String> {
    let decoded =
        image::open(path).map_err(|err| format!("cannot preview {}: {err}", path.display()))?;
    let rgba = decoded.to_rgba8();
    let size = [rgba.width() as usize, rgba.height() as usize];
    Ok(ColorImage::from_rgba_unmultiplied(size, rgba.as_raw()))
}
