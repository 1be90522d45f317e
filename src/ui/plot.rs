use eframe::egui::{self, ColorImage, TextureHandle, TextureOptions, Ui};
use egui_plot::{Plot, PlotImage, PlotPoint};
use image::RgbImage;

use rainforest_seg::Figure;

use crate::state::ViewerState;

// ---------------------------------------------------------------------------
// GPU textures for the figure on screen
// ---------------------------------------------------------------------------

pub struct SampleTextures {
    image: TextureHandle,
    mask: TextureHandle,
    overlay: TextureHandle,
}

impl SampleTextures {
    pub fn upload(ctx: &egui::Context, figure: &Figure) -> Self {
        let load = |name: &str, img: &RgbImage| {
            let size = [img.width() as usize, img.height() as usize];
            ctx.load_texture(
                format!("{name}-{}", figure.index),
                ColorImage::from_rgb(size, img.as_raw()),
                // nearest keeps mask edges crisp when zoomed
                TextureOptions::NEAREST,
            )
        };
        SampleTextures {
            image: load("image", &figure.image),
            mask: load("mask", &figure.mask),
            overlay: load("overlay", &figure.overlay),
        }
    }
}

// ---------------------------------------------------------------------------
// Sample view (central panel)
// ---------------------------------------------------------------------------

/// Render the image and its mask side by side in the central panel.
pub fn sample_view(ui: &mut Ui, state: &ViewerState, textures: Option<&SampleTextures>) {
    let (figure, textures) = match (&state.figure, textures) {
        (Some(f), Some(t)) => (f, t),
        _ => {
            ui.centered_and_justified(|ui: &mut Ui| {
                ui.heading("Open a dataset folder to view samples  (File → Open…)");
            });
            return;
        }
    };

    ui.vertical_centered(|ui: &mut Ui| {
        ui.heading(&figure.title);
    });
    ui.add_space(4.0);

    let size = egui::vec2(figure.image.width() as f32, figure.image.height() as f32);

    if state.show_overlay {
        image_plot(ui, "overlay_plot", "Overlay", &textures.overlay, size);
        return;
    }

    ui.columns(2, |cols| {
        image_plot(&mut cols[0], "image_plot", "Image", &textures.image, size);
        image_plot(&mut cols[1], "mask_plot", "Mask", &textures.mask, size);
    });
}

fn image_plot(ui: &mut Ui, id: &str, name: &str, texture: &TextureHandle, size: egui::Vec2) {
    Plot::new(id)
        .data_aspect(1.0)
        .show_axes(false)
        .show_grid(false)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            let center = PlotPoint::new(size.x as f64 / 2.0, size.y as f64 / 2.0);
            plot_ui.image(PlotImage::new(texture.id(), center, size).name(name));
        });
}
