// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Corner handle dragging, independent of any UI toolkit.
//
// A drag grabs the first corner (in set order) within the selection radius of
// where the gesture started, moves it by every reported delta, and lets go on
// release. Each move replaces the corner position; nothing is queued.

use docscan_core::{CornerSet, DisplayPoint};
use tracing::trace;

/// One event from the gesture layer, in display units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragEvent {
    /// Finger/pointer went down at this position.
    Start(DisplayPoint),
    /// Pointer moved by this delta since the previous event.
    Move { dx: f32, dy: f32 },
    /// Pointer released or gesture cancelled.
    End,
}

/// Index of the first corner strictly closer than `radius` to `at`.
pub fn corner_at(corners: &CornerSet, at: DisplayPoint, radius: f32) -> Option<usize> {
    corners
        .points()
        .iter()
        .position(|p| p.0.distance(at.0) < radius)
}

/// Drag state for one corner set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CornerDrag {
    radius: f32,
    selected: Option<usize>,
}

impl CornerDrag {
    pub fn new(radius: f32) -> Self {
        Self {
            radius,
            selected: None,
        }
    }

    /// Corner currently being dragged.
    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// Apply one gesture event and return the updated corners.
    pub fn apply(&mut self, corners: CornerSet, event: DragEvent) -> CornerSet {
        match event {
            DragEvent::Start(at) => {
                self.selected = corner_at(&corners, at, self.radius);
                trace!(selected = ?self.selected, x = at.x(), y = at.y(), "Drag started");
                corners
            }
            DragEvent::Move { dx, dy } => {
                let Some(index) = self.selected else {
                    return corners;
                };
                let mut updated = corners;
                if let Some(point) = corners.get(index) {
                    updated.set(index, point.offset(dx, dy));
                }
                updated
            }
            DragEvent::End => {
                self.selected = None;
                corners
            }
        }
    }
}

impl Default for CornerDrag {
    fn default() -> Self {
        Self::new(50.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docscan_core::Viewport;

    fn square() -> CornerSet {
        CornerSet::centered_square(Viewport::new(800.0, 800.0), 300.0)
    }

    #[test]
    fn grabs_corner_within_radius() {
        let corners = square();
        assert_eq!(corner_at(&corners, DisplayPoint::new(260.0, 240.0), 50.0), Some(0));
        assert_eq!(corner_at(&corners, DisplayPoint::new(540.0, 560.0), 50.0), Some(2));
    }

    #[test]
    fn radius_is_exclusive() {
        let corners = square();
        // Exactly 50 units right of the top-left corner.
        assert_eq!(corner_at(&corners, DisplayPoint::new(300.0, 250.0), 50.0), None);
    }

    #[test]
    fn overlapping_corners_pick_the_first() {
        let p = DisplayPoint::new(100.0, 100.0);
        let corners = CornerSet::new([p, p, p, p]);
        assert_eq!(corner_at(&corners, p, 50.0), Some(0));
    }

    #[test]
    fn drag_moves_only_the_selected_corner() {
        let mut drag = CornerDrag::default();
        let mut corners = square();
        for event in [
            DragEvent::Start(DisplayPoint::new(550.0, 250.0)),
            DragEvent::Move { dx: 10.0, dy: -5.0 },
            DragEvent::Move { dx: 2.0, dy: 1.0 },
            DragEvent::End,
        ] {
            corners = drag.apply(corners, event);
        }
        assert_eq!(corners.get(1), Some(DisplayPoint::new(562.0, 246.0)));
        assert_eq!(corners.get(0), square().get(0));
        assert_eq!(drag.selected(), None);
    }

    #[test]
    fn drag_away_from_corners_changes_nothing() {
        let mut drag = CornerDrag::default();
        let mut corners = square();
        corners = drag.apply(corners, DragEvent::Start(DisplayPoint::new(400.0, 400.0)));
        corners = drag.apply(corners, DragEvent::Move { dx: 30.0, dy: 30.0 });
        assert_eq!(corners, square());
    }

    #[test]
    fn move_after_release_is_ignored() {
        let mut drag = CornerDrag::default();
        let mut corners = square();
        corners = drag.apply(corners, DragEvent::Start(DisplayPoint::new(250.0, 250.0)));
        corners = drag.apply(corners, DragEvent::End);
        corners = drag.apply(corners, DragEvent::Move { dx: 99.0, dy: 99.0 });
        assert_eq!(corners, square());
    }
}
