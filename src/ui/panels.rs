use eframe::egui::{self, Color32, RichText, Sense, Ui};

use rainforest_seg::SegmentationDataset;

use crate::state::ViewerState;

// ---------------------------------------------------------------------------
// Left side panel – legend and navigation
// ---------------------------------------------------------------------------

/// Render the left panel: legend, sample index and file paths.
pub fn side_panel(ui: &mut Ui, state: &mut ViewerState) {
    ui.heading("Legend");
    ui.separator();

    let Some(dataset) = &state.dataset else {
        ui.label("No dataset loaded.");
        return;
    };

    for label in dataset.labels() {
        ui.horizontal(|ui: &mut Ui| {
            let (rect, _) = ui.allocate_exact_size(egui::vec2(14.0, 14.0), Sense::hover());
            let [r, g, b] = label.color;
            ui.painter().rect_filled(rect, 2.0, Color32::GRAY);
            ui.painter()
                .rect_filled(rect.shrink(1.0), 2.0, Color32::from_rgb(r, g, b));
            ui.label(label.name);
        });
    }

    ui.add_space(8.0);
    ui.heading("Sample");
    ui.separator();

    let len = dataset.len();
    let image_path = dataset.image_path(state.index).map(|p| p.display().to_string());
    let mask_path = dataset.mask_path(state.index).map(|p| p.display().to_string());

    let mut index = state.index;
    ui.add(
        egui::Slider::new(&mut index, 0..=len.saturating_sub(1)).text("index"),
    );
    if index != state.index {
        state.go_to(index);
    }

    ui.horizontal(|ui: &mut Ui| {
        if ui.button("◀ Prev").clicked() {
            state.previous();
        }
        if ui.button("Next ▶").clicked() {
            state.next();
        }
    });

    ui.add_space(8.0);
    if let Some(p) = image_path {
        ui.label(RichText::new(format!("image: {p}")).small());
    }
    if let Some(p) = mask_path {
        ui.label(RichText::new(format!("mask: {p}")).small());
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut ViewerState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_folder_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(ds) = &state.dataset {
            if ds.is_empty() {
                ui.label(format!("{}: no samples", ds.name()));
            } else {
                ui.label(format!(
                    "{}: sample {} of {}",
                    ds.name(),
                    state.index + 1,
                    ds.len()
                ));
            }
        }

        ui.separator();

        if ui
            .selectable_label(state.show_overlay, "Overlay")
            .clicked()
        {
            state.show_overlay = !state.show_overlay;
        }

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Folder dialog
// ---------------------------------------------------------------------------

pub fn open_folder_dialog(state: &mut ViewerState) {
    let folder = rfd::FileDialog::new()
        .set_title("Open dataset folder (with images/ and masks/)")
        .pick_folder();

    if let Some(path) = folder {
        state.open_dataset(path);
    }
}
