use serde::{Deserialize, Serialize};

pub type ImageId = u64;
pub type AnnotationId = u64;
pub type CategoryId = u64;

/// Top level of a COCO annotation file. Only the parts the viewer reads are
/// modelled, anything else in the file is ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CocoFile {
    #[serde(default)]
    pub images: Vec<Image>,
    #[serde(default)]
    pub annotations: Vec<Annotation>,
    #[serde(default)]
    pub categories: Vec<Category>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Image {
    pub id: ImageId,
    pub file_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    pub id: AnnotationId,
    pub image_id: ImageId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<CategoryId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub segmentation: Option<Segmentation>,
    #[serde(default)]
    pub iscrowd: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bbox: Option<[f64; 4]>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub area: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supercategory: Option<String>,
}

/// The `segmentation` field of an annotation.
///
/// Crowd annotations carry a run-length encoding instead of polygons. Anything
/// else is kept as raw json so a bad segmentation fails the one annotation
/// instead of the whole file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Segmentation {
    /// one flat `[x0, y0, x1, y1, ..]` list per polygon part
    Polygons(Vec<Vec<f64>>),
    Rle(Rle),
    Other(serde_json::Value),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rle {
    pub counts: serde_json::Value,
    pub size: Vec<u32>,
}
