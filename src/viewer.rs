use std::{
    io::Write,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, trace, warn};

use crate::{
    coco::{AnnotationIndex, CocoIndex, Image, ImageId},
    error::ViewerError,
    image_source::{FileImageSource, ImageSource},
    overlay::{OverlayView, PolygonPolicy},
    ui::{DisplaySettings, DisplaySink, EguiDisplay},
};

/// What a walkthrough does when one image fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorPolicy {
    /// stop at the first failing image and return its error
    #[default]
    Abort,
    /// log the failure, keep going, report it in the summary
    Continue,
}

#[derive(Debug, Default)]
pub struct WalkSummary {
    pub total: usize,
    pub rendered: Vec<ImageId>,
    pub failures: Vec<(ImageId, ViewerError)>,
}

impl WalkSummary {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Shows every image of an annotation index with its polygons drawn on top,
/// one window at a time.
pub struct AnnotationOverlayViewer<I, S, D> {
    index: I,
    images: S,
    display: D,
    console: Box<dyn Write>,
    image_root: Option<PathBuf>,
    polygon_policy: PolygonPolicy,
    error_policy: ErrorPolicy,
}

impl AnnotationOverlayViewer<CocoIndex, FileImageSource, EguiDisplay> {
    /// Loads `annotation_file` and shows images in native windows.
    pub fn open<P: AsRef<Path>>(
        annotation_file: P,
        display: DisplaySettings,
    ) -> Result<Self, ViewerError> {
        let index = CocoIndex::open(annotation_file)?;
        Ok(Self::new(index, FileImageSource, EguiDisplay::new(display)))
    }
}

impl<I, S, D> AnnotationOverlayViewer<I, S, D>
where
    I: AnnotationIndex,
    S: ImageSource,
    D: DisplaySink,
{
    pub fn new(index: I, images: S, display: D) -> Self {
        Self {
            index,
            images,
            display,
            console: Box::new(std::io::stdout()),
            image_root: None,
            polygon_policy: PolygonPolicy::default(),
            error_policy: ErrorPolicy::default(),
        }
    }

    /// Directory `file_name` is resolved against. Without one, file names
    /// are used as given.
    pub fn with_image_root(mut self, root: Option<PathBuf>) -> Self {
        self.image_root = root;
        self
    }

    pub fn with_polygon_policy(mut self, policy: PolygonPolicy) -> Self {
        self.polygon_policy = policy;
        self
    }

    pub fn with_error_policy(mut self, policy: ErrorPolicy) -> Self {
        self.error_policy = policy;
        self
    }

    pub fn with_console(mut self, console: Box<dyn Write>) -> Self {
        self.console = console;
        self
    }

    pub fn index(&self) -> &I {
        &self.index
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    /// Builds the view for one image without showing it.
    pub fn compose(&mut self, image_id: ImageId) -> Result<OverlayView, ViewerError> {
        let image = self
            .index
            .image(image_id)
            .ok_or(ViewerError::ImageNotFound(image_id))?;
        let path = resolve_image_path(self.image_root.as_deref(), image);

        let pixels = self.images.decode(&path)?;
        let mut view = OverlayView::new(image_id, path, pixels);

        let ann_ids = self.index.annotation_ids(image_id);
        for ann in self.index.load_annotations(&ann_ids)? {
            trace!(
                "image {}: annotation {} ({})",
                image_id,
                ann.id,
                ann.category_id
                    .and_then(|c| self.index.category_name(c))
                    .unwrap_or("no category")
            );
            view.add_annotation(ann, self.polygon_policy)?;
        }

        debug!(
            "composed image {}: {} annotations, {} outlines",
            image_id,
            ann_ids.len(),
            view.outlines.len()
        );

        Ok(view)
    }

    /// Shows one image and blocks until its window is dismissed.
    pub fn render_image(&mut self, image_id: ImageId) -> Result<(), ViewerError> {
        let view = self.compose(image_id)?;
        self.say("Press close image window to see next image");
        self.display.present(&view)
    }

    /// Walks every image in index order.
    pub fn render_all(&mut self) -> Result<WalkSummary, ViewerError> {
        let image_ids = self.index.image_ids();
        self.say(&format!("{} images", image_ids.len()));

        let mut summary = WalkSummary {
            total: image_ids.len(),
            ..Default::default()
        };

        for (i, image_id) in image_ids.into_iter().enumerate() {
            debug!("rendering {}/{}: image {}", i + 1, summary.total, image_id);
            match self.render_image(image_id) {
                Ok(()) => summary.rendered.push(image_id),
                Err(e) => match self.error_policy {
                    ErrorPolicy::Abort => {
                        error!("image {} failed, aborting walkthrough", image_id);
                        return Err(e);
                    }
                    ErrorPolicy::Continue => {
                        warn!("image {} failed: {}", image_id, e);
                        summary.failures.push((image_id, e));
                    }
                },
            }
        }

        if self.error_policy == ErrorPolicy::Continue {
            self.say(&format!(
                "{} rendered, {} failed",
                summary.rendered.len(),
                summary.failures.len()
            ));
        }

        info!(
            "walkthrough done: {}/{} images rendered",
            summary.rendered.len(),
            summary.total
        );

        Ok(summary)
    }

    fn say(&mut self, line: &str) {
        let line = format!("{}\n", line);
        if let Err(e) = self
            .console
            .write_all(line.as_bytes())
            .and_then(|_| self.console.flush())
        {
            warn!("failed to write to console: {}", e);
        }
    }
}

fn resolve_image_path(root: Option<&Path>, image: &Image) -> PathBuf {
    match root {
        Some(root) => root.join(&image.file_name),
        None => PathBuf::from(&image.file_name),
    }
}
