//! Resolving a world-space point to a piece index.

use crate::geometry::Vector2;
use crate::piece::Piece;

/// Which pieces a hit test may return.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HitMode {
    /// Any piece; the topmost (last stored) wins.
    #[default]
    Normal,
    /// Only the two pieces awaiting combine confirmation, `first` tested
    /// before `second`.
    PendingCombine { first: usize, second: usize },
}

/// Find the piece under `point`.
///
/// In [`HitMode::Normal`] pieces are scanned from last to first, so a piece
/// drawn later shadows the ones below it. Within a piece, regions are scanned
/// in order and containment is half-open (see
/// [`Rectangle::contains`](crate::geometry::Rectangle::contains)).
///
/// In [`HitMode::PendingCombine`] only the two candidates are considered.
/// A candidate index past the end of `pieces` never matches.
///
/// Returns `None` when no piece contains the point.
pub fn find_piece_at(pieces: &[Piece], point: Vector2, mode: HitMode) -> Option<usize> {
    match mode {
        HitMode::Normal => pieces.iter().rposition(|piece| piece.contains(point)),
        HitMode::PendingCombine { first, second } => [first, second]
            .into_iter()
            .find(|&index| pieces.get(index).is_some_and(|piece| piece.contains(point))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Rectangle;
    use crate::piece::Region;

    fn block(x: f32, y: f32, size: f32) -> Piece {
        let rect = Rectangle::new(0.0, 0.0, size, size);
        Piece::new(vec![Region::new(rect, rect)], Vector2::new(x, y))
    }

    #[test]
    fn test_empty_store_has_no_hit() {
        assert_eq!(find_piece_at(&[], Vector2::ZERO, HitMode::Normal), None);
    }

    #[test]
    fn test_later_piece_wins_overlap() {
        let pieces = vec![block(0.0, 0.0, 10.0), block(5.0, 5.0, 10.0)];
        assert_eq!(
            find_piece_at(&pieces, Vector2::new(7.0, 7.0), HitMode::Normal),
            Some(1)
        );
        assert_eq!(
            find_piece_at(&pieces, Vector2::new(2.0, 2.0), HitMode::Normal),
            Some(0)
        );
    }

    #[test]
    fn test_miss_returns_none() {
        let pieces = vec![block(0.0, 0.0, 10.0)];
        assert_eq!(
            find_piece_at(&pieces, Vector2::new(10.0, 0.0), HitMode::Normal),
            None
        );
        assert_eq!(
            find_piece_at(&pieces, Vector2::new(-1.0, 3.0), HitMode::Normal),
            None
        );
    }

    #[test]
    fn test_hit_respects_placement() {
        let pieces = vec![block(100.0, 50.0, 10.0)];
        assert_eq!(
            find_piece_at(&pieces, Vector2::new(5.0, 5.0), HitMode::Normal),
            None
        );
        assert_eq!(
            find_piece_at(&pieces, Vector2::new(105.0, 55.0), HitMode::Normal),
            Some(0)
        );
    }

    #[test]
    fn test_pending_combine_ignores_other_pieces() {
        let pieces = vec![block(0.0, 0.0, 10.0), block(20.0, 0.0, 10.0), block(0.0, 0.0, 30.0)];
        let mode = HitMode::PendingCombine { first: 0, second: 1 };

        // Piece 2 covers everything but is not a candidate
        assert_eq!(find_piece_at(&pieces, Vector2::new(5.0, 5.0), mode), Some(0));
        assert_eq!(find_piece_at(&pieces, Vector2::new(25.0, 5.0), mode), Some(1));
        assert_eq!(find_piece_at(&pieces, Vector2::new(15.0, 5.0), mode), None);
        assert_eq!(
            find_piece_at(&pieces, Vector2::new(15.0, 5.0), HitMode::Normal),
            Some(2)
        );
    }

    #[test]
    fn test_pending_combine_tests_first_candidate_first() {
        let pieces = vec![block(0.0, 0.0, 10.0), block(0.0, 0.0, 10.0)];
        let mode = HitMode::PendingCombine { first: 0, second: 1 };
        assert_eq!(find_piece_at(&pieces, Vector2::new(1.0, 1.0), mode), Some(0));
    }

    #[test]
    fn test_pending_combine_stale_index_never_matches() {
        let pieces = vec![block(0.0, 0.0, 10.0)];
        let mode = HitMode::PendingCombine { first: 4, second: 0 };
        assert_eq!(find_piece_at(&pieces, Vector2::new(1.0, 1.0), mode), Some(0));
    }
}
