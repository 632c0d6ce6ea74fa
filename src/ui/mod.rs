pub mod app;
pub mod ui_types;
pub mod utils;

pub use self::ui_types::*;

use tracing::{debug, error, info, trace, warn};

use crate::{error::ViewerError, overlay::OverlayView};

/// Where composed views go.
pub trait DisplaySink {
    /// Shows `view` and returns once it has been dismissed.
    fn present(&mut self, view: &OverlayView) -> Result<(), ViewerError>;
}

/// Opens one native window per view and blocks until the user closes it.
///
/// The event loop is kept between calls (`run_and_return`), which is what
/// lets a walkthrough open window after window from the same thread.
#[derive(Debug, Clone, Default)]
pub struct EguiDisplay {
    pub settings: DisplaySettings,
}

impl EguiDisplay {
    pub fn new(settings: DisplaySettings) -> Self {
        Self { settings }
    }
}

impl DisplaySink for EguiDisplay {
    fn present(&mut self, view: &OverlayView) -> Result<(), ViewerError> {
        let title = view.title();

        let image = view.image.clone();
        let outlines = view.outlines.clone();
        let stroke = self.settings.stroke();

        let native_options = eframe::NativeOptions {
            viewport: egui::ViewportBuilder::default()
                .with_title(&title)
                .with_inner_size(self.settings.window_size)
                .with_min_inner_size([200.0, 150.0]),
            run_and_return: true,
            ..Default::default()
        };

        debug!(
            "opening window for image {} with {} outlines",
            view.image_id,
            outlines.len()
        );

        eframe::run_native(
            &title,
            native_options,
            Box::new(move |_cc| Ok(Box::new(OverlayWindow::new(image, outlines, stroke)))),
        )
        .map_err(|e| ViewerError::Display(e.to_string()))?;

        debug!("window for image {} closed", view.image_id);

        Ok(())
    }
}
