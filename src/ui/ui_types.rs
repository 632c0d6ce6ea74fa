use crate::overlay::Outline;

/// How the overlay window looks. Defaults follow an 8x6 inch figure at 100
/// dpi with 2 px red outlines.
#[derive(serde::Serialize, serde::Deserialize, Clone, Copy, Debug, PartialEq)]
#[serde(default)]
pub struct DisplaySettings {
    /// logical pixels, width x height
    pub window_size: [f32; 2],
    pub stroke_width: f32,
    pub stroke_color: [u8; 3],
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            window_size: [800.0, 600.0],
            stroke_width: 2.0,
            stroke_color: [255, 0, 0],
        }
    }
}

impl DisplaySettings {
    pub fn stroke(&self) -> egui::Stroke {
        let [r, g, b] = self.stroke_color;
        egui::Stroke::new(self.stroke_width, egui::Color32::from_rgb(r, g, b))
    }
}

/// Window state for one image. Built from an `OverlayView` before the
/// event loop starts so nothing borrowed crosses into eframe.
///
/// `image_size` is the decoded size; the uploaded texture may be smaller.
pub struct OverlayWindow {
    pub(super) image: Option<image::RgbaImage>,
    pub(super) texture: Option<egui::TextureHandle>,
    pub(super) image_size: egui::Vec2,
    pub(super) outlines: Vec<Outline>,
    pub(super) stroke: egui::Stroke,
}
