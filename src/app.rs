use eframe::egui;

use crate::state::ViewerState;
use crate::ui::plot::SampleTextures;
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct RainforestViewerApp {
    pub state: ViewerState,
    textures: Option<SampleTextures>,
}

impl RainforestViewerApp {
    pub fn new(state: ViewerState) -> Self {
        Self {
            state,
            textures: None,
        }
    }
}

impl eframe::App for RainforestViewerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Keyboard navigation ----
        let (next, previous) = ctx.input(|i| {
            (
                i.key_pressed(egui::Key::ArrowRight),
                i.key_pressed(egui::Key::ArrowLeft),
            )
        });
        if next {
            self.state.next();
        }
        if previous {
            self.state.previous();
        }

        if self.state.take_figure_changed() {
            self.textures = self
                .state
                .figure
                .as_ref()
                .map(|figure| SampleTextures::upload(ctx, figure));
        }

        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: legend and navigation ----
        egui::SidePanel::left("legend_panel")
            .default_width(200.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: image and mask ----
        egui::CentralPanel::default().show(ctx, |ui| {
            plot::sample_view(ui, &self.state, self.textures.as_ref());
        });
    }
}
