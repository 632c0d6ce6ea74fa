#![allow(unused_variables)]
#![allow(unused_imports)]
#![allow(dead_code)]

pub mod appconfig;
pub mod coco;
pub mod error;
pub mod image_source;
pub mod logging;
pub mod options;
pub mod overlay;
pub mod ui;
pub mod viewer;


use anyhow::{anyhow, bail, ensure, Context, Result};
use clap::Parser;
use tracing::{debug, error, info, trace, warn};

use crate::{appconfig::AppSettings, viewer::AnnotationOverlayViewer};

fn main() -> Result<()> {
    let args = options::Args::parse();

    let mut settings = AppSettings::load_or_default(args.config.as_deref())?;
    args.apply(&mut settings);

    let _guard = logging::init_logs(settings.log_file.as_deref());
    debug!("settings: {:?}", settings);

    let mut viewer = AnnotationOverlayViewer::open(&settings.annotation_file, settings.display)
        .context("Failed to open annotation file")?
        .with_image_root(settings.image_root.clone())
        .with_polygon_policy(settings.polygon_policy)
        .with_error_policy(settings.error_policy);

    if let Some(image_id) = args.image_id {
        viewer
            .render_image(image_id)
            .with_context(|| format!("Failed to show image {}", image_id))?;
        return Ok(());
    }

    let summary = viewer.render_all().context("Walkthrough aborted")?;

    if !summary.is_clean() {
        bail!(
            "{} of {} images failed",
            summary.failures.len(),
            summary.total
        );
    }

    Ok(())
}
