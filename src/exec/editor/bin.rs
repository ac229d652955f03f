use std::path::PathBuf;

use daetex::editor::{session::is_model_path, ui::SlotEditorApp};
use eframe::egui;

fn main() -> eframe::Result<()> {
    let initial_model = parse_model_arg();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(egui::vec2(900.0, 720.0))
            .with_min_inner_size(egui::vec2(720.0, 540.0))
            .with_drag_and_drop(true),
        ..Default::default()
    };

    eframe::run_native(
        "Daetex Editor",
        options,
        Box::new(move |_cc| Box::new(SlotEditorApp::new(initial_model))),
    )
}

/// Optional `.dae` preload; the last argument wins so shell integrations can
/// append the model path. Anything that is not a model path is ignored and
/// the editor starts empty.
fn parse_model_arg() -> Option<PathBuf> {
    std::env::args()
        .skip(1)
        .next_back()
        .map(PathBuf::from)
        .filter(|path| is_model_path(path))
}
