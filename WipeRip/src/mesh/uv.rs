//! Texel to UV conversion

use glam::Vec2;

use crate::formats::common::Texel;
use crate::formats::tim::Image;

/// Scale a stored texel into the unit square.
///
/// Stored texels have their components exchanged, so `u` is measured against
/// the image height and `v` against the width.
#[must_use]
pub fn normalize_texel(texel: Texel, width: u32, height: u32) -> Vec2 {
    Vec2::new(
        f32::from(texel.u) / height as f32,
        1.0 - f32::from(texel.v) / width as f32,
    )
}

/// Turn a normalized texel into its final orientation.
///
/// Rotates a quarter turn, flips both axes, then flips `v` back.
#[must_use]
pub fn orient_uv(uv: Vec2) -> Vec2 {
    let rotated = Vec2::new(uv.y, 1.0 - uv.x);
    let flipped = Vec2::ONE - rotated;
    Vec2::new(flipped.x, 1.0 - flipped.y)
}

/// Final UV for a texel sampled from `image`.
#[must_use]
pub fn texel_to_uv(texel: Texel, image: &Image) -> Vec2 {
    orient_uv(normalize_texel(texel, image.width, image.height))
}

/// The four corner UVs of a track face.
///
/// Order matches the stored corner order; `flip` mirrors horizontally.
#[must_use]
pub fn track_face_uvs(flip: bool) -> [Vec2; 4] {
    let f = if flip { 1.0 } else { 0.0 };
    [
        Vec2::new(1.0 - f, 0.0),
        Vec2::new(f, 0.0),
        Vec2::new(f, 1.0),
        Vec2::new(1.0 - f, 1.0),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image(width: u32, height: u32) -> Image {
        Image::blank(width, height)
    }

    #[test]
    fn test_normalize_uses_height_then_width() {
        let uv = normalize_texel(Texel { u: 128, v: 64 }, 128, 256);
        assert_eq!(uv, Vec2::new(0.5, 0.5));
    }

    #[test]
    fn test_centre_texel_is_stable() {
        let uv = texel_to_uv(Texel { u: 128, v: 64 }, &image(128, 256));
        assert_eq!(uv, Vec2::new(0.5, 0.5));
    }

    #[test]
    fn test_orientation_chain() {
        // normalized (0.25, 0.75) -> rotated (0.75, 0.75) -> flipped
        // (0.25, 0.25) -> v flipped back (0.25, 0.75)
        let uv = texel_to_uv(Texel { u: 64, v: 32 }, &image(128, 256));
        assert_eq!(uv, Vec2::new(0.25, 0.75));
    }

    #[test]
    fn test_origin_texel() {
        let uv = texel_to_uv(Texel { u: 0, v: 0 }, &image(64, 64));
        assert_eq!(uv, Vec2::new(0.0, 1.0));
    }

    #[test]
    fn test_track_face_uvs() {
        assert_eq!(
            track_face_uvs(false),
            [Vec2::new(1.0, 0.0), Vec2::new(0.0, 0.0), Vec2::new(0.0, 1.0), Vec2::new(1.0, 1.0)]
        );
        assert_eq!(track_face_uvs(true)[0], Vec2::new(0.0, 0.0));
        assert_eq!(track_face_uvs(true)[1], Vec2::new(1.0, 0.0));
    }
}
