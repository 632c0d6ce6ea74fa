pub mod coco_types;

use std::{collections::HashMap, fs::File, io::BufReader, path::Path};

use indexmap::IndexMap;
use tracing::{debug, error, info, trace, warn};

pub use self::coco_types::*;
use crate::error::{LoadErrorKind, ViewerError};

/// Read-only queries the viewer needs from an annotation index.
pub trait AnnotationIndex {
    /// All image ids, in index order.
    fn image_ids(&self) -> Vec<ImageId>;

    fn image(&self, id: ImageId) -> Option<&Image>;

    /// Ids of the annotations attached to `image_id`, in file order.
    /// Unknown images have no annotations.
    fn annotation_ids(&self, image_id: ImageId) -> Vec<AnnotationId>;

    fn annotation(&self, id: AnnotationId) -> Option<&Annotation>;

    fn category_name(&self, id: CategoryId) -> Option<&str> {
        None
    }

    fn load_annotations(&self, ids: &[AnnotationId]) -> Result<Vec<&Annotation>, ViewerError> {
        ids.iter()
            .map(|id| {
                self.annotation(*id)
                    .ok_or(ViewerError::AnnotationNotFound(*id))
            })
            .collect()
    }
}

#[derive(Debug, Clone, Default)]
pub struct CocoIndex {
    images: IndexMap<ImageId, Image>,
    annotations: IndexMap<AnnotationId, Annotation>,
    image_to_annotations: HashMap<ImageId, Vec<AnnotationId>>,
    categories: IndexMap<CategoryId, Category>,
}

impl CocoIndex {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, ViewerError> {
        let path = path.as_ref();
        let load_err = |source: LoadErrorKind| ViewerError::Load {
            path: path.to_path_buf(),
            source,
        };

        debug!("loading annotations from {}", path.display());
        let t0 = std::time::Instant::now();

        let file = File::open(path).map_err(|e| load_err(e.into()))?;
        let dataset: CocoFile =
            serde_json::from_reader(BufReader::new(file)).map_err(|e| load_err(e.into()))?;

        let index = Self::from_dataset(dataset);

        info!(
            "loaded {} images, {} annotations, {} categories in {:.1} ms",
            index.images.len(),
            index.annotations.len(),
            index.categories.len(),
            t0.elapsed().as_micros() as f64 / 1000.0
        );

        Ok(index)
    }

    pub fn from_dataset(dataset: CocoFile) -> Self {
        let mut out = Self::default();

        for image in dataset.images {
            let id = image.id;
            if out.images.insert(id, image).is_some() {
                warn!("duplicate image id {}, keeping the later record", id);
            }
        }

        for ann in dataset.annotations {
            let (id, image_id) = (ann.id, ann.image_id);
            if !out.images.contains_key(&image_id) {
                warn!(
                    "annotation {} references unknown image {}, it will never be drawn",
                    id, image_id
                );
            }
            if let Some(prev) = out.annotations.insert(id, ann) {
                warn!("duplicate annotation id {}, keeping the later record", id);
                // the replaced record may belong to another image
                if let Some(ids) = out.image_to_annotations.get_mut(&prev.image_id) {
                    ids.retain(|a| *a != id);
                }
            }
            out.image_to_annotations.entry(image_id).or_default().push(id);
        }

        for cat in dataset.categories {
            out.categories.insert(cat.id, cat);
        }

        out
    }

    pub fn category(&self, id: CategoryId) -> Option<&Category> {
        self.categories.get(&id)
    }

    pub fn num_images(&self) -> usize {
        self.images.len()
    }

    pub fn num_annotations(&self) -> usize {
        self.annotations.len()
    }
}

impl AnnotationIndex for CocoIndex {
    fn image_ids(&self) -> Vec<ImageId> {
        self.images.keys().copied().collect()
    }

    fn image(&self, id: ImageId) -> Option<&Image> {
        self.images.get(&id)
    }

    fn annotation_ids(&self, image_id: ImageId) -> Vec<AnnotationId> {
        self.image_to_annotations
            .get(&image_id)
            .cloned()
            .unwrap_or_default()
    }

    fn annotation(&self, id: AnnotationId) -> Option<&Annotation> {
        self.annotations.get(&id)
    }

    fn category_name(&self, id: CategoryId) -> Option<&str> {
        self.category(id).map(|c| c.name.as_str())
    }
}
