use tracing::{debug, error, info, trace, warn};

use super::{ui_types::OverlayWindow, utils};
use crate::overlay::Outline;

/// New
impl OverlayWindow {
    pub fn new(image: image::RgbaImage, outlines: Vec<Outline>, stroke: egui::Stroke) -> Self {
        let image_size = egui::Vec2::new(image.width() as f32, image.height() as f32);
        Self {
            image: Some(image),
            texture: None,
            image_size,
            outlines,
            stroke,
        }
    }

    fn texture(&mut self, ctx: &egui::Context) -> Option<&egui::TextureHandle> {
        if self.texture.is_none() {
            let image = self.image.take()?;
            let max_side = ctx.input(|i| i.max_texture_side);
            let image = utils::downscale_to_fit(image, max_side);
            let color_image = egui::ColorImage::from_rgba_unmultiplied(
                [image.width() as usize, image.height() as usize],
                image.as_raw(),
            );
            self.texture = Some(ctx.load_texture(
                "overlay_image",
                color_image,
                egui::TextureOptions::LINEAR,
            ));
        }
        self.texture.as_ref()
    }

    fn show_overlay(&mut self, ui: &mut egui::Ui) {
        let available = ui.max_rect();
        let image_size = self.image_size;
        let rect = utils::fit_rect(available, image_size);

        let painter = ui.painter_at(available);

        let Some(texture) = self.texture(ui.ctx()) else {
            error!("overlay texture missing");
            return;
        };

        painter.image(
            texture.id(),
            rect,
            egui::Rect::from_min_max(egui::pos2(0., 0.), egui::pos2(1., 1.)),
            egui::Color32::WHITE,
        );

        for outline in &self.outlines {
            let points: Vec<egui::Pos2> = outline
                .points
                .iter()
                .map(|p| utils::image_to_screen(rect, image_size, *p))
                .collect();
            painter.add(egui::Shape::closed_line(points, self.stroke));
        }
    }
}

impl eframe::App for OverlayWindow {
    fn update(&mut self, ctx: &egui::Context, frame: &mut eframe::Frame) {
        if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }

        egui::CentralPanel::default()
            .frame(egui::Frame::NONE.fill(egui::Color32::WHITE))
            .show(ctx, |ui| {
                self.show_overlay(ui);
            });
    }
}
