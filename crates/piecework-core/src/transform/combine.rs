//! Binding and combining two pieces.
//!
//! Combining is two-phase. [`bind_pieces`] moves the second piece next to
//! the first and reports the offset between their origins; it is cheap and
//! can run every frame as a preview while the user confirms. The store's
//! [`combine`](crate::store::PieceStore::combine) then appends the second
//! piece's regions to the first, re-based by that offset.
//!
//! # Snapping
//!
//! Without the snap modifier, the second piece is pulled flush against the
//! first on each axis where the two are strictly apart. Axes that already
//! overlap are left alone.
//!
//! With the snap modifier, eight flush placements around the first piece
//! are scored by how much they overlap the second piece's current position,
//! and the best one wins. See [`SnapAnchor`] for the order and tie-break.

use tracing::debug;

use crate::geometry::{Rectangle, Vector2};
use crate::piece::Piece;

/// A flush placement of the second piece around the first.
///
/// Variants are listed in scan order. The first word names the side of the
/// first piece, the second names the edge the two pieces share an end on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapAnchor {
    /// Above, left edges aligned
    TopLeft,
    /// Above, right edges aligned
    TopRight,
    /// Right side, top edges aligned
    RightTop,
    /// Right side, bottom edges aligned
    RightBottom,
    /// Below, right edges aligned
    BottomRight,
    /// Below, left edges aligned
    BottomLeft,
    /// Left side, bottom edges aligned
    LeftBottom,
    /// Left side, top edges aligned
    LeftTop,
}

impl SnapAnchor {
    pub const ALL: [SnapAnchor; 8] = [
        SnapAnchor::TopLeft,
        SnapAnchor::TopRight,
        SnapAnchor::RightTop,
        SnapAnchor::RightBottom,
        SnapAnchor::BottomRight,
        SnapAnchor::BottomLeft,
        SnapAnchor::LeftBottom,
        SnapAnchor::LeftTop,
    ];

    /// Where a rectangle of `size` sits when placed at this anchor around `target`.
    pub fn place(self, target: &Rectangle, size: &Rectangle) -> Rectangle {
        let (x, y) = match self {
            SnapAnchor::TopLeft => (target.x, target.y - size.height),
            SnapAnchor::TopRight => (target.right() - size.width, target.y - size.height),
            SnapAnchor::RightTop => (target.right(), target.y),
            SnapAnchor::RightBottom => (target.right(), target.bottom() - size.height),
            SnapAnchor::BottomRight => (target.right() - size.width, target.bottom()),
            SnapAnchor::BottomLeft => (target.x, target.bottom()),
            SnapAnchor::LeftBottom => (target.x - size.width, target.bottom() - size.height),
            SnapAnchor::LeftTop => (target.x - size.width, target.y),
        };
        Rectangle::new(x, y, size.width, size.height)
    }
}

/// Pick the snap placement that overlaps `moving` the most.
///
/// Candidates are scanned in [`SnapAnchor::ALL`] order and a candidate
/// replaces the current best when its score is greater than *or equal to*
/// it, so among equal maxima the last one scanned wins. Returns `None` when
/// no candidate overlaps `moving` at all.
pub fn best_snap(target: &Rectangle, moving: &Rectangle) -> Option<(SnapAnchor, Rectangle)> {
    let mut best: Option<(SnapAnchor, Rectangle)> = None;
    let mut best_score = 0.0f32;

    for anchor in SnapAnchor::ALL {
        let candidate = anchor.place(target, moving);
        let score = moving.overlap_area(&candidate);
        if score >= best_score {
            best_score = score;
            best = Some((anchor, candidate));
        }
    }

    if best_score > 0.0 {
        best
    } else {
        None
    }
}

/// Offset that pulls `moving` flush against `target` along one axis, given
/// each rectangle's start and end on that axis. Zero when they overlap or touch.
fn clamp_axis(target_start: f32, target_end: f32, moving_start: f32, moving_end: f32) -> f32 {
    if moving_start > target_end {
        target_end - moving_start
    } else if moving_end < target_start {
        target_start - moving_end
    } else {
        0.0
    }
}

/// Move `second` next to `first` and return the offset of `second`'s origin
/// relative to `first`'s origin.
///
/// The returned delta is what [`PieceStore::combine`] needs to re-base the
/// second piece's regions into the first piece's local space.
///
/// `snap` selects the eight-candidate snapping heuristic instead of
/// per-axis clamping. Identical inputs always produce identical output.
///
/// # Panics
///
/// Panics if either piece has no regions.
///
/// [`PieceStore::combine`]: crate::store::PieceStore::combine
pub fn bind_pieces(first: &Piece, second: &mut Piece, snap: bool) -> Vector2 {
    let first_bounds = first.world_bounds();
    let second_bounds = second.world_bounds();

    if snap {
        if let Some((anchor, placed)) = best_snap(&first_bounds, &second_bounds) {
            debug!(?anchor, "Snapping piece");
            second.placement += placed.position() - second_bounds.position();
        }
    } else {
        second.placement.x += clamp_axis(
            first_bounds.x,
            first_bounds.right(),
            second_bounds.x,
            second_bounds.right(),
        );
        second.placement.y += clamp_axis(
            first_bounds.y,
            first_bounds.bottom(),
            second_bounds.y,
            second_bounds.bottom(),
        );
    }

    second.placement - first.placement
}

/// Append `second`'s regions to `first`, translated by `delta`.
///
/// Regions are appended in order after `first`'s own, so the absorbed piece
/// draws on top. Nothing is merged or deduplicated.
pub fn absorb(first: &mut Piece, second: Piece, delta: Vector2) {
    first.regions.extend(second.regions.into_iter().map(|mut region| {
        region.destination = region.destination.translated(delta);
        region
    }));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::piece::Region;

    fn block(x: f32, y: f32, w: f32, h: f32) -> Piece {
        let rect = Rectangle::new(0.0, 0.0, w, h);
        Piece::new(vec![Region::new(rect, rect)], Vector2::new(x, y))
    }

    #[test]
    fn test_clamp_pulls_right_piece_left() {
        let first = block(0.0, 0.0, 10.0, 10.0);
        let mut second = block(25.0, 2.0, 10.0, 10.0);

        let delta = bind_pieces(&first, &mut second, false);

        assert_eq!(second.placement, Vector2::new(10.0, 2.0));
        assert_eq!(delta, Vector2::new(10.0, 2.0));
    }

    #[test]
    fn test_clamp_pulls_on_both_axes() {
        let first = block(100.0, 100.0, 50.0, 50.0);
        let mut second = block(0.0, 0.0, 20.0, 30.0);

        let delta = bind_pieces(&first, &mut second, false);

        // Flush against the top-left: right edge at 100, bottom edge at 100
        assert_eq!(second.placement, Vector2::new(80.0, 70.0));
        assert_eq!(delta, Vector2::new(-20.0, -30.0));
    }

    #[test]
    fn test_clamp_leaves_overlapping_axis_alone() {
        let first = block(0.0, 0.0, 10.0, 10.0);
        let mut second = block(5.0, 40.0, 10.0, 10.0);

        bind_pieces(&first, &mut second, false);

        assert_eq!(second.placement, Vector2::new(5.0, 10.0));
    }

    #[test]
    fn test_clamp_adjacent_piece_unchanged() {
        let first = block(0.0, 0.0, 10.0, 10.0);
        let mut second = block(10.0, 0.0, 10.0, 10.0);

        let delta = bind_pieces(&first, &mut second, false);

        assert_eq!(second.placement, Vector2::new(10.0, 0.0));
        assert_eq!(delta, Vector2::new(10.0, 0.0));
    }

    #[test]
    fn test_clamp_uses_bounds_not_placement() {
        // Region offset inside the second piece: bounds start at x = 35
        let first = block(0.0, 0.0, 10.0, 10.0);
        let rect = Rectangle::new(0.0, 0.0, 5.0, 5.0);
        let mut second = Piece::new(
            vec![Region::new(rect, Rectangle::new(15.0, 0.0, 5.0, 5.0))],
            Vector2::new(20.0, 0.0),
        );

        let delta = bind_pieces(&first, &mut second, false);

        assert_eq!(second.world_bounds().x, 10.0);
        assert_eq!(delta, Vector2::new(-5.0, 0.0));
    }

    #[test]
    fn test_anchor_placements() {
        let target = Rectangle::new(0.0, 0.0, 100.0, 50.0);
        let size = Rectangle::new(0.0, 0.0, 20.0, 10.0);

        let expected = [
            (SnapAnchor::TopLeft, (0.0, -10.0)),
            (SnapAnchor::TopRight, (80.0, -10.0)),
            (SnapAnchor::RightTop, (100.0, 0.0)),
            (SnapAnchor::RightBottom, (100.0, 40.0)),
            (SnapAnchor::BottomRight, (80.0, 50.0)),
            (SnapAnchor::BottomLeft, (0.0, 50.0)),
            (SnapAnchor::LeftBottom, (-20.0, 40.0)),
            (SnapAnchor::LeftTop, (-20.0, 0.0)),
        ];
        for (anchor, (x, y)) in expected {
            assert_eq!(
                anchor.place(&target, &size),
                Rectangle::new(x, y, 20.0, 10.0),
                "{anchor:?}"
            );
        }
    }

    #[test]
    fn test_snap_picks_largest_overlap() {
        let first = block(0.0, 0.0, 100.0, 100.0);
        // Dropped just right of the bottom-right corner, mostly below the first piece
        let mut second = block(95.0, 92.0, 20.0, 20.0);

        let delta = bind_pieces(&first, &mut second, true);

        // RightBottom (100, 80) overlaps 15x8 = 120; BottomRight (80, 100) overlaps 5x12 = 60
        assert_eq!(second.placement, Vector2::new(100.0, 80.0));
        assert_eq!(delta, Vector2::new(100.0, 80.0));
    }

    #[test]
    fn test_snap_without_overlap_leaves_piece() {
        let first = block(0.0, 0.0, 10.0, 10.0);
        let mut second = block(500.0, 500.0, 10.0, 10.0);

        let delta = bind_pieces(&first, &mut second, true);

        assert_eq!(second.placement, Vector2::new(500.0, 500.0));
        assert_eq!(delta, Vector2::new(500.0, 500.0));
    }

    #[test]
    fn test_snap_tie_keeps_last_maximum() {
        // Same-size pieces: RightTop and RightBottom coincide
        let target = Rectangle::new(0.0, 0.0, 10.0, 10.0);
        let moving = Rectangle::new(5.0, 0.0, 10.0, 10.0);

        let (anchor, placed) = best_snap(&target, &moving).unwrap();

        // RightTop and RightBottom are the same rectangle with equal score;
        // the later one in scan order wins.
        assert_eq!(anchor, SnapAnchor::RightBottom);
        assert_eq!(placed, Rectangle::new(10.0, 0.0, 10.0, 10.0));
    }

    #[test]
    fn test_snap_is_deterministic() {
        let first = block(3.5, -7.25, 40.0, 12.0);
        let start = block(30.0, -3.0, 17.0, 9.0);

        let mut a = start.clone();
        let mut b = start.clone();
        let delta_a = bind_pieces(&first, &mut a, true);
        let delta_b = bind_pieces(&first, &mut b, true);

        assert_eq!(delta_a, delta_b);
        assert_eq!(a, b);
    }

    #[test]
    fn test_absorb_appends_translated_regions() {
        let mut first = block(0.0, 0.0, 10.0, 10.0);
        let second = block(10.0, 0.0, 5.0, 5.0);

        absorb(&mut first, second, Vector2::new(10.0, 0.0));

        assert_eq!(first.regions.len(), 2);
        assert_eq!(
            first.regions[1].destination,
            Rectangle::new(10.0, 0.0, 5.0, 5.0)
        );
        assert_eq!(first.regions[1].source, Rectangle::new(0.0, 0.0, 5.0, 5.0));
        assert_eq!(first.world_bounds(), Rectangle::new(0.0, 0.0, 15.0, 10.0));
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================
