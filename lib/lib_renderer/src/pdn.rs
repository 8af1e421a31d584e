//! Texture coordinates as read off an image editor's cursor.
//!
//! The editor reports the pixel under the cursor with a top-left origin, so
//! `min`/`max` name the first and last covered pixels rather than a half-open
//! range. Textures are sampled with a bottom-left origin.

use lib_math::{Rect, Vec2};

/// Converts editor cursor coordinates to texture pixel coordinates.
///
/// `min.y` and `max.x` are bumped by one pixel, then both y values are
/// mirrored against the texture height. The corners keep their roles, so the
/// result usually has a negative height.
pub fn pixel_rect_from_pdn(pdn: Rect, texture_size: Vec2) -> Rect {
    let mut rect = pdn;

    rect.min.y += 1.0;
    rect.max.x += 1.0;

    rect.min.y = texture_size.y - rect.min.y;
    rect.max.y = texture_size.y - rect.max.y;

    rect
}

pub fn normalized_rect_from_pdn(pdn: Rect, texture_size: Vec2) -> Rect {
    pixel_rect_from_pdn(pdn, texture_size) / texture_size
}

#[cfg(test)]
mod tests {
    use lib_math::vec2;

    use super::*;

    #[test]
    fn bumps_then_mirrors() {
        let rect = pixel_rect_from_pdn(Rect::from_coords(2.0, 3.0, 5.0, 7.0), vec2(16.0, 32.0));

        assert_eq!(rect, Rect::from_coords(2.0, 28.0, 6.0, 25.0));
    }

    #[test]
    fn top_row_reaches_the_top_edge() {
        let size = vec2(8.0, 16.0);
        let rect = normalized_rect_from_pdn(Rect::from_coords(0.0, 0.0, 7.0, 0.0), size);

        assert_eq!(rect.max.y, 1.0);
        assert_eq!(rect.min.y, 15.0 / 16.0);
    }

    #[test]
    fn full_image_spans_unit_width() {
        let size = vec2(64.0, 32.0);
        let rect = normalized_rect_from_pdn(Rect::from_coords(0.0, 0.0, 63.0, 31.0), size);

        assert_eq!(rect.min.x, 0.0);
        assert_eq!(rect.max.x, 1.0);
        assert_eq!(rect.min.y, 31.0 / 32.0);
        assert_eq!(rect.max.y, 1.0 / 32.0);
    }

    #[test]
    fn pixel_size_keeps_sign() {
        let rect = pixel_rect_from_pdn(Rect::from_coords(4.0, 4.0, 11.0, 19.0), vec2(32.0, 32.0));

        assert_eq!(rect.size(), vec2(8.0, -14.0));
    }
}
