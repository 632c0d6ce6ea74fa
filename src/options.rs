use std::path::PathBuf;

use clap::Parser;

use crate::{
    appconfig::AppSettings, coco::ImageId, overlay::PolygonPolicy, viewer::ErrorPolicy,
};

/// Show COCO images with their segmentation polygons, one window at a time.
///
/// Close a window (or press Escape) to move on to the next image.
#[derive(Debug, Clone, Parser)]
#[command(version)]
pub struct Args {
    /// COCO annotation file [default: result.json]
    pub annotation_file: Option<PathBuf>,

    /// TOML settings file [default: coco_viewer.toml, if present]
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// directory image file names are relative to
    #[arg(long)]
    pub image_root: Option<PathBuf>,

    /// show only this image
    #[arg(long)]
    pub image_id: Option<ImageId>,

    /// keep going when an image fails and report failures at the end
    #[arg(long)]
    pub continue_on_error: bool,

    /// draw every polygon of a multi-part segmentation
    #[arg(long, conflicts_with = "first_polygon")]
    pub all_polygons: bool,

    /// draw only the first polygon of each segmentation
    #[arg(long)]
    pub first_polygon: bool,

    /// also write logs to this file
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Args {
    /// Command line flags win over the settings file.
    pub fn apply(&self, settings: &mut AppSettings) {
        if let Some(path) = &self.annotation_file {
            settings.annotation_file = path.clone();
        }
        if let Some(root) = &self.image_root {
            settings.image_root = Some(root.clone());
        }
        if self.continue_on_error {
            settings.error_policy = ErrorPolicy::Continue;
        }
        if self.all_polygons {
            settings.polygon_policy = PolygonPolicy::All;
        }
        if self.first_polygon {
            settings.polygon_policy = PolygonPolicy::FirstOnly;
        }
        if let Some(path) = &self.log_file {
            settings.log_file = Some(path.clone());
        }
    }
}
