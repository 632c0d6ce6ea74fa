use egui::{Pos2, Rect, Vec2};
use tracing::debug;

/// Largest rect with the image's aspect ratio that fits in `available`,
/// centered.
pub fn fit_rect(available: Rect, image_size: Vec2) -> Rect {
    if image_size.x <= 0. || image_size.y <= 0. {
        return available;
    }

    let scale = (available.width() / image_size.x).min(available.height() / image_size.y);

    Rect::from_center_size(available.center(), image_size * scale)
}

/// Maps a point in image pixel coordinates into the rect the image is drawn in.
pub fn image_to_screen(rect: Rect, image_size: Vec2, p: [f32; 2]) -> Pos2 {
    let sx = rect.width() / image_size.x;
    let sy = rect.height() / image_size.y;
    rect.min + Vec2::new(p[0] * sx, p[1] * sy)
}

/// Size that keeps the aspect ratio with neither side above `max_side`.
pub fn fitted_texture_size(width: u32, height: u32, max_side: usize) -> (u32, u32) {
    let longest = width.max(height) as u64;
    let max_side = max_side as u64;
    if max_side == 0 || longest <= max_side {
        return (width, height);
    }

    let scale = |side: u32| ((side as u64 * max_side / longest) as u32).max(1);
    (scale(width), scale(height))
}

/// Shrinks images the GPU can't hold as one texture. Outlines stay in the
/// original pixel space, the texture is stretched back over the same rect.
pub fn downscale_to_fit(img: image::RgbaImage, max_side: usize) -> image::RgbaImage {
    let (w, h) = img.dimensions();
    let (nw, nh) = fitted_texture_size(w, h, max_side);
    if (nw, nh) == (w, h) {
        return img;
    }

    debug!(
        "downscaling {}x{} to {}x{} (max texture side {})",
        w, h, nw, nh, max_side
    );
    image::imageops::resize(&img, nw, nh, image::imageops::FilterType::Triangle)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn texture_size_within_limit_unchanged() {
        assert_eq!(fitted_texture_size(1920, 1080, 8192), (1920, 1080));
        assert_eq!(fitted_texture_size(8192, 8192, 8192), (8192, 8192));
    }

    #[test]
    fn oversized_texture_shrinks_longest_side() {
        assert_eq!(fitted_texture_size(20000, 10000, 8192), (8192, 4096));
        assert_eq!(fitted_texture_size(3000, 40000, 16384), (1228, 16384));
    }

    #[test]
    fn thin_image_keeps_one_pixel() {
        assert_eq!(fitted_texture_size(100000, 2, 8192), (8192, 1));
    }

    #[test]
    fn downscale_large_image() {
        let img = image::RgbaImage::from_pixel(40, 20, image::Rgba([0, 255, 0, 255]));
        let out = downscale_to_fit(img, 16);
        assert_eq!(out.dimensions(), (16, 8));
        let [r, g, _, a] = out.get_pixel(8, 4).0;
        assert!(r < 5 && g > 250 && a > 250);

        let img = image::RgbaImage::new(10, 10);
        assert_eq!(downscale_to_fit(img, 16).dimensions(), (10, 10));
    }

    fn approx(a: Pos2, b: Pos2) -> bool {
        (a - b).length() < 1e-3
    }

    #[test]
    fn fit_wide_image() {
        let avail = Rect::from_min_size(Pos2::ZERO, Vec2::new(800., 600.));
        let r = fit_rect(avail, Vec2::new(1600., 400.));
        assert_eq!(r.width(), 800.);
        assert_eq!(r.height(), 200.);
        assert!(approx(r.center(), avail.center()));
    }

    #[test]
    fn fit_tall_image() {
        let avail = Rect::from_min_size(Pos2::ZERO, Vec2::new(800., 600.));
        let r = fit_rect(avail, Vec2::new(100., 200.));
        assert_eq!(r.height(), 600.);
        assert_eq!(r.width(), 300.);
    }

    #[test]
    fn fit_empty_image() {
        let avail = Rect::from_min_size(Pos2::ZERO, Vec2::new(800., 600.));
        assert_eq!(fit_rect(avail, Vec2::ZERO), avail);
    }

    #[test]
    fn map_corners() {
        let rect = Rect::from_min_size(Pos2::new(100., 50.), Vec2::new(200., 100.));
        let size = Vec2::new(400., 200.);
        assert!(approx(image_to_screen(rect, size, [0., 0.]), Pos2::new(100., 50.)));
        assert!(approx(image_to_screen(rect, size, [400., 200.]), Pos2::new(300., 150.)));
        assert!(approx(image_to_screen(rect, size, [30., 40.]), Pos2::new(115., 70.)));
    }
}
