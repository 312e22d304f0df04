//! Pieces and the regions they are made of.
//!
//! A [`Region`] maps a rectangle of the source image onto a rectangle of a
//! piece's local space. A [`Piece`] is an ordered list of regions sharing one
//! placement offset, the position of the piece-local origin in world space.
//!
//! # Coordinate Spaces
//!
//! - Source: image pixels, origin at the image's top-left corner
//! - Piece-local: origin at the piece's own top-left when the region was created
//! - World: piece-local translated by [`Piece::placement`]
//!
//! Region order is draw order: later regions are drawn on top.

use serde::{Deserialize, Serialize};

use crate::geometry::{Rectangle, Vector2};

/// A source rectangle and where it lands inside its piece.
///
/// Source and destination always have the same size; pieces only select
/// and translate pixels, never scale them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Region {
    /// Rectangle in source image pixel space.
    pub source: Rectangle,
    /// Rectangle in piece-local space.
    pub destination: Rectangle,
}

impl Region {
    pub fn new(source: Rectangle, destination: Rectangle) -> Self {
        debug_assert!(
            source.width == destination.width && source.height == destination.height,
            "Region source and destination must have the same size"
        );
        Self {
            source,
            destination,
        }
    }

    /// Destination rectangle in world space for a piece placed at `placement`.
    #[inline]
    pub fn world_destination(&self, placement: Vector2) -> Rectangle {
        self.destination.translated(placement)
    }
}

/// A user-movable group of regions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Piece {
    /// Regions in draw order. Never empty while the piece is stored.
    pub regions: Vec<Region>,
    /// World position of the piece-local origin.
    pub placement: Vector2,
}

impl Piece {
    pub fn new(regions: Vec<Region>, placement: Vector2) -> Self {
        Self { regions, placement }
    }

    /// The single piece covering a freshly loaded image.
    ///
    /// Source and destination both span `width x height` from the origin;
    /// the piece is placed at `world_position`.
    pub fn whole_image(width: u32, height: u32, world_position: Vector2) -> Self {
        let full = Rectangle::new(0.0, 0.0, width as f32, height as f32);
        Self::new(vec![Region::new(full, full)], world_position)
    }

    /// Bounds in piece-local space. See [`compute_bounds`].
    pub fn local_bounds(&self) -> Rectangle {
        compute_bounds(self)
    }

    /// Bounds in world space.
    pub fn world_bounds(&self) -> Rectangle {
        compute_bounds(self).translated(self.placement)
    }

    /// Whether `point` (world space) lies inside any region of this piece.
    pub fn contains(&self, point: Vector2) -> bool {
        self.regions
            .iter()
            .any(|region| region.world_destination(self.placement).contains(point))
    }

    /// Regions relative to the piece's bounding box, for exporting the piece
    /// as a standalone image. Placement plays no part.
    pub fn export_layout(&self) -> ExportLayout {
        let bounds = compute_bounds(self);
        let shift = -bounds.position();
        ExportLayout {
            bounds: bounds.with_position(Vector2::ZERO),
            regions: self
                .regions
                .iter()
                .map(|region| Region {
                    source: region.source,
                    destination: region.destination.translated(shift),
                })
                .collect(),
        }
    }

    /// Sum of destination areas. Overlapping regions are counted twice.
    pub fn covered_area(&self) -> f32 {
        self.regions.iter().map(|r| r.destination.area()).sum()
    }
}

/// A piece laid out for writing to its own image.
///
/// `bounds` always starts at the origin and gives the output size; every
/// region's destination is shifted so the piece's bounding box lands on it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportLayout {
    pub bounds: Rectangle,
    pub regions: Vec<Region>,
}

/// Compute the smallest rectangle covering every region's destination,
/// in piece-local space.
///
/// # Panics
///
/// Panics if the piece has no regions. Stored pieces are never empty, so
/// reaching this indicates a broken invariant rather than bad user input.
pub fn compute_bounds(piece: &Piece) -> Rectangle {
    assert!(
        !piece.regions.is_empty(),
        "cannot compute bounds of a piece without regions"
    );

    let mut left = f32::MAX;
    let mut top = f32::MAX;
    let mut right = f32::MIN;
    let mut bottom = f32::MIN;

    for region in &piece.regions {
        let dest = &region.destination;
        left = left.min(dest.x);
        top = top.min(dest.y);
        right = right.max(dest.right());
        bottom = bottom.max(dest.bottom());
    }

    Rectangle::new(left, top, right - left, bottom - top)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn region_at(x: f32, y: f32, w: f32, h: f32) -> Region {
        Region::new(Rectangle::new(0.0, 0.0, w, h), Rectangle::new(x, y, w, h))
    }

    #[test]
    fn test_single_region_bounds() {
        let piece = Piece::new(vec![region_at(0.0, 0.0, 10.0, 10.0)], Vector2::ZERO);
        assert_eq!(compute_bounds(&piece), Rectangle::new(0.0, 0.0, 10.0, 10.0));
    }

    #[test]
    fn test_multi_region_bounds() {
        let piece = Piece::new(
            vec![
                region_at(5.0, 5.0, 10.0, 10.0),
                region_at(-3.0, 8.0, 2.0, 20.0),
                region_at(12.0, -1.0, 4.0, 1.0),
            ],
            Vector2::new(100.0, 100.0),
        );
        // left -3, top -1, right 16, bottom 28
        assert_eq!(compute_bounds(&piece), Rectangle::new(-3.0, -1.0, 19.0, 29.0));
    }

    #[test]
    fn test_world_bounds_adds_placement() {
        let piece = Piece::new(vec![region_at(2.0, 3.0, 4.0, 5.0)], Vector2::new(10.0, 20.0));
        assert_eq!(piece.local_bounds(), Rectangle::new(2.0, 3.0, 4.0, 5.0));
        assert_eq!(piece.world_bounds(), Rectangle::new(12.0, 23.0, 4.0, 5.0));
    }

    #[test]
    #[should_panic(expected = "without regions")]
    fn test_empty_piece_bounds_panics() {
        let piece = Piece::new(Vec::new(), Vector2::ZERO);
        compute_bounds(&piece);
    }

    #[test]
    fn test_whole_image_piece() {
        let piece = Piece::whole_image(640, 480, Vector2::new(80.0, 0.0));
        assert_eq!(piece.regions.len(), 1);
        assert_eq!(piece.regions[0].source, Rectangle::new(0.0, 0.0, 640.0, 480.0));
        assert_eq!(piece.regions[0].destination, piece.regions[0].source);
        assert_eq!(piece.world_bounds(), Rectangle::new(80.0, 0.0, 640.0, 480.0));
    }

    #[test]
    fn test_piece_contains_uses_regions_not_bounds() {
        // L-shaped piece: the bounding box corner at (15, 15) is empty
        let piece = Piece::new(
            vec![region_at(0.0, 0.0, 20.0, 10.0), region_at(0.0, 10.0, 10.0, 10.0)],
            Vector2::ZERO,
        );
        assert!(piece.contains(Vector2::new(5.0, 15.0)));
        assert!(piece.contains(Vector2::new(15.0, 5.0)));
        assert!(!piece.contains(Vector2::new(15.0, 15.0)));
    }

    #[test]
    fn test_export_layout_of_offset_l_shape() {
        // Local bounds start at (5, 8), as after combining onto a moved piece
        let piece = Piece::new(
            vec![
                Region::new(Rectangle::new(0.0, 0.0, 20.0, 10.0), Rectangle::new(5.0, 8.0, 20.0, 10.0)),
                Region::new(Rectangle::new(0.0, 10.0, 10.0, 10.0), Rectangle::new(5.0, 18.0, 10.0, 10.0)),
            ],
            Vector2::new(300.0, 40.0),
        );

        let layout = piece.export_layout();
        assert_eq!(layout.bounds, Rectangle::new(0.0, 0.0, 20.0, 20.0));
        assert_eq!(layout.regions[0].destination, Rectangle::new(0.0, 0.0, 20.0, 10.0));
        assert_eq!(layout.regions[1].destination, Rectangle::new(0.0, 10.0, 10.0, 10.0));
        assert_eq!(layout.regions[1].source, piece.regions[1].source);
    }

    #[test]
    fn test_export_layout_ignores_placement() {
        let piece = Piece::whole_image(64, 32, Vector2::new(-7.0, 12.0));
        let layout = piece.export_layout();
        assert_eq!(layout.bounds, Rectangle::new(0.0, 0.0, 64.0, 32.0));
        assert_eq!(layout.regions, piece.regions);
    }

    #[test]
    fn test_covered_area() {
        let piece = Piece::new(
            vec![region_at(0.0, 0.0, 10.0, 10.0), region_at(10.0, 0.0, 5.0, 2.0)],
            Vector2::ZERO,
        );
        assert_eq!(piece.covered_area(), 110.0);
    }
}
