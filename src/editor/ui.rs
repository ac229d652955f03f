use std::{
    path::{Path, PathBuf},
    time::{Duration, Instant},
};

use eframe::egui::{self, Color32, RichText};

use crate::{
    dae::TextureChannel,
    editor::{
        preview::TexturePreviewPanel,
        session::{ModelSession, TEXTURE_EXTENSIONS, is_model_path, is_texture_path},
    },
};

pub struct SlotEditorApp {
    session: Option<ModelSession>,
    selected_channel: TextureChannel,
    status: Option<StatusMessage>,
    log: Vec<String>,
    preview: TexturePreviewPanel,
    preview_dirty: bool,
}

impl SlotEditorApp {
    pub fn new(initial_model: Option<PathBuf>) -> Self {
        let mut app = Self {
            session: None,
            selected_channel: TextureChannel::Diffuse,
            status: None,
            log: Vec::new(),
            preview: TexturePreviewPanel::new(),
            preview_dirty: false,
        };
        if let Some(path) = initial_model {
            app.open_model(&path);
        }
        app
    }

    fn push_log(&mut self, line: impl Into<String>) {
        self.log.push(line.into());
        if self.log.len() > 200 {
            self.log.remove(0);
        }
    }

    fn prune_status(&mut self) {
        if let Some(status) = &self.status {
            if status.expired() {
                self.status = None;
            }
        }
    }

    fn set_status(&mut self, kind: StatusKind, message: impl Into<String>) {
        self.status = Some(StatusMessage::new(kind, message));
    }

    fn open_model(&mut self, path: &Path) {
        match ModelSession::open(path) {
            Ok(session) => {
                self.push_log(format!("loaded {}", session.path().display()));
                self.session = Some(session);
                self.preview_dirty = true;
                self.set_status(StatusKind::Info, "Model loaded");
            }
            Err(err) => {
                // A rejected file never replaces the open document.
                self.push_log(err.to_string());
                self.set_status(StatusKind::Error, format!("Failed to load: {err}"));
            }
        }
    }

    fn bind_texture(&mut self, channel: TextureChannel, texture: &Path) {
        let Some(session) = self.session.as_mut() else {
            self.set_status(StatusKind::Error, "Open a .dae model first");
            return;
        };
        match session.bind(channel, texture) {
            Ok(report) => {
                self.push_log(format!(
                    "{} {} -> {}",
                    match report.action {
                        crate::dae::BindAction::Inserted => "added",
                        crate::dae::BindAction::Replaced => "replaced",
                    },
                    report.channel,
                    texture.display()
                ));
                for warning in &report.warnings {
                    self.push_log(format!("warning: {warning}"));
                }
                self.preview_dirty = true;
                self.set_status(
                    StatusKind::Info,
                    format!("Saved {} binding", report.channel.label()),
                );
            }
            Err(err) => {
                self.push_log(err.to_string());
                self.set_status(StatusKind::Error, format!("Bind failed: {err}"));
            }
        }
    }

    fn handle_dropped_files(&mut self, ctx: &egui::Context) {
        let dropped = ctx.input(|input| input.raw.dropped_files.clone());
        for file in dropped {
            let Some(path) = file.path else { continue };
            if is_model_path(&path) {
                self.open_model(&path);
            } else if is_texture_path(&path) {
                let channel = self.selected_channel;
                self.bind_texture(channel, &path);
            } else {
                self.push_log(format!("rejected drop: {}", path.display()));
                self.set_status(
                    StatusKind::Error,
                    format!("Unsupported file: {}", path.display()),
                );
            }
        }
    }

    fn draw_top_bar(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.heading("Daetex");
            ui.separator();
            if ui.button("Open model…").clicked() {
                if let Some(path) = rfd::FileDialog::new()
                    .add_filter("DAE", &["dae"])
                    .pick_file()
                {
                    self.open_model(&path);
                }
            }
            match &self.session {
                Some(session) => {
                    ui.label(session.path().display().to_string());
                }
                None => {
                    ui.label(RichText::new("No model open").weak());
                }
            }
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if let Some(status) = &self.status {
                    let text = RichText::new(&status.text).color(status.color());
                    ui.label(text);
                }
            });
        });
    }

    fn draw_slots(&mut self, ui: &mut egui::Ui, hovering_files: bool) {
        if hovering_files {
            ui.label(
                RichText::new("Drop a .dae model, or an image onto the selected slot")
                    .color(Color32::from_rgb(116, 185, 120)),
            );
            ui.separator();
        }

        if self.session.is_none() {
            ui.label("Open or drop a .dae model to edit its texture slots.");
            return;
        }

        let bindings: Vec<_> = self
            .session
            .as_ref()
            .map(|session| session.resolved_textures())
            .unwrap_or_default();

        let mut pending: Option<(TextureChannel, PathBuf)> = None;
        egui::ScrollArea::vertical().show(ui, |ui| {
            for channel in TextureChannel::ALL {
                let selected = self.selected_channel == channel;
                ui.horizontal(|ui| {
                    if ui.selectable_label(selected, channel.label()).clicked() {
                        self.selected_channel = channel;
                    }
                    if ui.small_button("Pick…").clicked() {
                        if let Some(path) = rfd::FileDialog::new()
                            .add_filter("Images", &TEXTURE_EXTENSIONS)
                            .pick_file()
                        {
                            pending = Some((channel, path));
                        }
                    }
                    let binding = bindings
                        .iter()
                        .find(|resolved| resolved.linked.channel == channel);
                    match binding {
                        Some(resolved) => {
                            ui.label(RichText::new(&resolved.linked.stored).monospace());
                        }
                        None => {
                            ui.label(RichText::new("<unbound>").weak());
                        }
                    }
                });
                self.preview.ui(ui, channel);
                ui.separator();
            }
        });

        if let Some((channel, path)) = pending {
            self.selected_channel = channel;
            self.bind_texture(channel, &path);
        }
    }

    fn draw_log(&self, ui: &mut egui::Ui) {
        ui.heading("Log");
        egui::ScrollArea::vertical()
            .stick_to_bottom(true)
            .show(ui, |ui| {
                for line in &self.log {
                    ui.label(RichText::new(line).monospace());
                }
            });
    }
}

impl eframe::App for SlotEditorApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.prune_status();
        self.handle_dropped_files(ctx);

        if self.preview_dirty {
            match &self.session {
                Some(session) => self.preview.sync(ctx, session),
                None => self.preview.clear(),
            }
            self.preview_dirty = false;
        }

        let hovering_files = ctx.input(|input| !input.raw.hovered_files.is_empty());

        egui::TopBottomPanel::top("slot_editor_top").show(ctx, |ui| self.draw_top_bar(ui));

        egui::TopBottomPanel::bottom("slot_editor_log")
            .resizable(true)
            .default_height(120.0)
            .show(ctx, |ui| self.draw_log(ui));

        egui::CentralPanel::default().show(ctx, |ui| self.draw_slots(ui, hovering_files));

        ctx.request_repaint_after(Duration::from_millis(200));
    }
}

struct StatusMessage {
    text: String,
    kind: StatusKind,
    created_at: Instant,
}

impl StatusMessage {
    fn new(kind: StatusKind, text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind,
            created_at: Instant::now(),
        }
    }

    fn expired(&self) -> bool {
        self.created_at.elapsed() > Duration::from_secs(6)
    }

    fn color(&self) -> Color32 {
        match self.kind {
            StatusKind::Info => Color32::from_rgb(116, 185, 120),
            StatusKind::Error => Color32::from_rgb(235, 111, 111),
        }
    }
}

#[derive(Clone, Copy)]
enum StatusKind {
    Info,
    Error,
}
