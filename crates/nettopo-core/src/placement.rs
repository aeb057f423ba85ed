//! Default placement of new diagram items.
//!
//! Where a new device lands when the user has not clicked a position is a UI
//! policy, not core logic.  The core only defines the contract — a
//! [`PositionProvider`] the presentation layer supplies when it calls
//! `Topology::add_device` — plus a grid-based default implementation driven
//! by [`PlacementConfig`], so every frontend gets the same sensible behaviour
//! for free.

use crate::config::{CanvasConfig, PlacementConfig};
use crate::domain::geom::Point;

/// Supplies canvas positions for newly created items.
pub trait PositionProvider {
    /// Returns the position for the next new item.
    fn next_position(&mut self) -> Point;
}

/// Row-major grid placement: fills a row left to right, then wraps.
#[derive(Debug, Clone)]
pub struct GridPlacement {
    config: PlacementConfig,
    next_slot: usize,
}

impl GridPlacement {
    pub fn new(config: PlacementConfig) -> Self {
        Self {
            config,
            next_slot: 0,
        }
    }

    /// Forgets how many slots were handed out, restarting at the origin.
    pub fn reset(&mut self) {
        self.next_slot = 0;
    }
}

impl PositionProvider for GridPlacement {
    fn next_position(&mut self) -> Point {
        let columns = self.config.columns.max(1);
        let col = self.next_slot % columns;
        let row = self.next_slot / columns;
        self.next_slot += 1;
        Point::new(
            self.config.origin_x + col as f64 * self.config.grid_spacing,
            self.config.origin_y + row as f64 * self.config.grid_spacing,
        )
    }
}

/// Clamps a proposed position so the item stays inside the canvas, keeping
/// the configured padding from every edge.
pub fn clamp_to_canvas(p: Point, canvas: &CanvasConfig) -> Point {
    Point::new(
        p.x.min(canvas.width - canvas.padding).max(canvas.padding),
        p.y.min(canvas.height - canvas.padding).max(canvas.padding),
    )
}

// ── Tests ─────────────────────────────────────────────────────────────────────
