use std::path::PathBuf;

use crate::coco::{AnnotationId, ImageId};

#[derive(Debug, thiserror::Error)]
pub enum ViewerError {
    #[error("failed to load annotation file '{}'", .path.display())]
    Load {
        path: PathBuf,
        #[source]
        source: LoadErrorKind,
    },

    #[error("image {0} not found in annotation index")]
    ImageNotFound(ImageId),

    #[error("annotation {0} not found in annotation index")]
    AnnotationNotFound(AnnotationId),

    #[error("failed to decode image '{}'", .path.display())]
    ImageDecode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("malformed segmentation in annotation {annotation_id}: {reason}")]
    MalformedAnnotation {
        annotation_id: AnnotationId,
        reason: String,
    },

    #[error("display failed: {0}")]
    Display(String),
}

#[derive(Debug, thiserror::Error)]
pub enum LoadErrorKind {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl ViewerError {
    pub fn malformed(annotation_id: AnnotationId, reason: impl Into<String>) -> Self {
        ViewerError::MalformedAnnotation {
            annotation_id,
            reason: reason.into(),
        }
    }
}
