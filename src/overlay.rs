use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, trace, warn};

use crate::{
    coco::{Annotation, AnnotationId, CategoryId, ImageId, Segmentation},
    error::ViewerError,
};

/// Which parts of a multi-polygon segmentation get drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PolygonPolicy {
    /// only `segmentation[0]`, later parts are dropped with a debug log
    FirstOnly,
    #[default]
    All,
}

/// One closed, unfilled polygon in image pixel coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct Outline {
    pub annotation_id: AnnotationId,
    pub category_id: Option<CategoryId>,
    pub points: Vec<[f32; 2]>,
}

/// Everything one window shows: the decoded image and the outlines on top.
#[derive(Debug, Clone)]
pub struct OverlayView {
    pub image_id: ImageId,
    pub path: PathBuf,
    pub image: image::RgbaImage,
    pub outlines: Vec<Outline>,
}

impl OverlayView {
    pub fn new(image_id: ImageId, path: PathBuf, image: image::RgbaImage) -> Self {
        Self {
            image_id,
            path,
            image,
            outlines: vec![],
        }
    }

    pub fn size(&self) -> [usize; 2] {
        [self.image.width() as usize, self.image.height() as usize]
    }

    pub fn title(&self) -> String {
        format!("{} (image {})", self.path.display(), self.image_id)
    }

    pub fn add_annotation(
        &mut self,
        ann: &Annotation,
        policy: PolygonPolicy,
    ) -> Result<(), ViewerError> {
        self.outlines.extend(annotation_outlines(ann, policy)?);
        Ok(())
    }
}

/// Reshapes a flat `[x0, y0, x1, y1, ..]` list into vertices.
pub fn polygon_points(
    annotation_id: AnnotationId,
    coords: &[f64],
) -> Result<Vec<[f32; 2]>, ViewerError> {
    if coords.len() % 2 != 0 {
        return Err(ViewerError::malformed(
            annotation_id,
            format!("odd number of coordinates ({})", coords.len()),
        ));
    }
    if coords.len() < 6 {
        return Err(ViewerError::malformed(
            annotation_id,
            format!("polygon needs at least 3 vertices, got {}", coords.len() / 2),
        ));
    }

    Ok(coords
        .chunks_exact(2)
        .map(|xy| [xy[0] as f32, xy[1] as f32])
        .collect())
}

pub fn annotation_outlines(
    ann: &Annotation,
    policy: PolygonPolicy,
) -> Result<Vec<Outline>, ViewerError> {
    let polygons = match &ann.segmentation {
        Some(Segmentation::Polygons(polygons)) => polygons,
        Some(Segmentation::Rle(_)) => {
            return Err(ViewerError::malformed(
                ann.id,
                "run-length encoded segmentation is not supported",
            ));
        }
        Some(Segmentation::Other(v)) => {
            return Err(ViewerError::malformed(
                ann.id,
                format!("expected a list of polygons, got {}", v),
            ));
        }
        None => return Err(ViewerError::malformed(ann.id, "missing segmentation")),
    };

    if polygons.is_empty() {
        return Err(ViewerError::malformed(ann.id, "empty segmentation"));
    }

    let parts = match policy {
        PolygonPolicy::FirstOnly => {
            if polygons.len() > 1 {
                debug!(
                    "annotation {}: drawing 1 of {} polygon parts",
                    ann.id,
                    polygons.len()
                );
            }
            &polygons[..1]
        }
        PolygonPolicy::All => &polygons[..],
    };

    parts
        .iter()
        .map(|coords| {
            Ok(Outline {
                annotation_id: ann.id,
                category_id: ann.category_id,
                points: polygon_points(ann.id, coords)?,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ann(segmentation: serde_json::Value) -> Annotation {
        serde_json::from_value(serde_json::json!({
            "id": 5,
            "image_id": 1,
            "segmentation": segmentation,
        }))
        .unwrap()
    }

    #[test]
    fn reshape_keeps_order() {
        let pts = polygon_points(1, &[10., 10., 50., 10., 30., 40.]).unwrap();
        assert_eq!(pts, vec![[10., 10.], [50., 10.], [30., 40.]]);
    }

    #[test]
    fn n_pairs_give_n_vertices() {
        for n in 3..12 {
            let coords: Vec<f64> = (0..2 * n).map(|v| v as f64).collect();
            let pts = polygon_points(1, &coords).unwrap();
            assert_eq!(pts.len(), n);
            assert_eq!(pts[n - 1], [(2 * n - 2) as f32, (2 * n - 1) as f32]);
        }
    }

    #[test]
    fn odd_coordinate_count_is_malformed() {
        let err = polygon_points(9, &[10., 10., 50., 10., 30., 40., 7.]).unwrap_err();
        assert!(matches!(
            err,
            ViewerError::MalformedAnnotation {
                annotation_id: 9,
                ..
            }
        ));
    }

    #[test]
    fn degenerate_polygon_is_malformed() {
        assert!(polygon_points(1, &[0., 0., 1., 1.]).is_err());
        assert!(polygon_points(1, &[]).is_err());
    }

    #[test]
    fn first_only_policy() {
        let a = ann(serde_json::json!([[0, 0, 4, 0, 4, 4], [1, 1, 2, 1, 2, 2, 1, 2]]));
        let outlines = annotation_outlines(&a, PolygonPolicy::FirstOnly).unwrap();
        assert_eq!(outlines.len(), 1);
        assert_eq!(outlines[0].points.len(), 3);
    }

    #[test]
    fn all_policy() {
        let a = ann(serde_json::json!([[0, 0, 4, 0, 4, 4], [1, 1, 2, 1, 2, 2, 1, 2]]));
        let outlines = annotation_outlines(&a, PolygonPolicy::All).unwrap();
        assert_eq!(outlines.len(), 2);
        assert_eq!(outlines[1].points.len(), 4);
        assert!(outlines.iter().all(|o| o.annotation_id == 5));
    }

    #[test]
    fn first_only_ignores_bad_later_parts() {
        let a = ann(serde_json::json!([[0, 0, 4, 0, 4, 4], [1, 1, 2]]));
        assert!(annotation_outlines(&a, PolygonPolicy::FirstOnly).is_ok());
        assert!(annotation_outlines(&a, PolygonPolicy::All).is_err());
    }

    #[test]
    fn unusable_segmentations() {
        let cases = [
            serde_json::json!([]),
            serde_json::json!({"counts": "abc", "size": [4, 4]}),
            serde_json::json!([10, 10, 50, 10, 30, 40]),
            serde_json::json!("nope"),
        ];
        for seg in cases {
            let err = annotation_outlines(&ann(seg.clone()), PolygonPolicy::All).unwrap_err();
            assert!(
                matches!(err, ViewerError::MalformedAnnotation { .. }),
                "{}",
                seg
            );
        }

        let missing: Annotation =
            serde_json::from_value(serde_json::json!({"id": 5, "image_id": 1})).unwrap();
        assert!(annotation_outlines(&missing, PolygonPolicy::All).is_err());
    }
}
