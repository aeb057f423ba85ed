//! Boundary zones.
//!
//! A boundary is a named rectangle drawn under the devices, typically marking
//! a subnet or security zone.  Which devices are "inside" a boundary is never
//! authoritative state: it is recomputed from geometry after every structural
//! change (device add/move/delete, boundary move/resize) by a full rescan of
//! the device collection.  At the expected scale of tens of entities the
//! rescan is cheaper than keeping an incremental index correct.

use std::collections::BTreeSet;

use crate::domain::device::Device;
use crate::domain::error::TopologyError;
use crate::domain::geom::{Point, Rect};

/// Minimum boundary width, in canvas units.
pub const MIN_WIDTH: f64 = 100.0;

/// Minimum boundary height, in canvas units.
pub const MIN_HEIGHT: f64 = 100.0;

/// User-supplied attributes for a new boundary.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundaryConfig {
    pub name: String,
    pub subnet: String,
    pub description: String,
    /// Display color, passed through opaquely.  The core never validates or
    /// interprets it.
    pub color: String,
}

impl BoundaryConfig {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            subnet: String::new(),
            description: String::new(),
            color: "#ADD8E6".to_string(),
        }
    }

    pub fn with_subnet(mut self, subnet: impl Into<String>) -> Self {
        self.subnet = subnet.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }
}

/// A named rectangular zone whose contained devices are derived from geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct Boundary {
    name: String,
    pub subnet: String,
    pub description: String,
    pub color: String,
    rect: Rect,
    contained: BTreeSet<String>,
}

impl Boundary {
    /// Creates a boundary covering `rect`.
    ///
    /// Width and height are clamped up to [`MIN_WIDTH`] / [`MIN_HEIGHT`] so
    /// the size invariant holds from the first moment.
    ///
    /// # Errors
    ///
    /// Returns [`TopologyError::EmptyName`] if the trimmed name is empty.
    pub fn new(config: BoundaryConfig, rect: Rect) -> Result<Self, TopologyError> {
        let name = config.name.trim().to_string();
        if name.is_empty() {
            return Err(TopologyError::EmptyName);
        }
        Ok(Self {
            name,
            subnet: config.subnet,
            description: config.description,
            color: config.color,
            rect: Rect::new(
                rect.x,
                rect.y,
                rect.width.max(MIN_WIDTH),
                rect.height.max(MIN_HEIGHT),
            ),
            contained: BTreeSet::new(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    /// Moves the boundary by the given delta without changing its size.
    pub fn translate(&mut self, dx: f64, dy: f64) {
        self.rect.translate(dx, dy);
    }

    /// Resizes the boundary, clamping each dimension to its floor.
    ///
    /// Requests below [`MIN_WIDTH`] / [`MIN_HEIGHT`] (including negative
    /// values mid-drag) are clamped, never rejected.
    pub fn resize(&mut self, new_width: f64, new_height: f64) {
        self.rect.width = new_width.max(MIN_WIDTH);
        self.rect.height = new_height.max(MIN_HEIGHT);
    }

    /// Returns `true` if `p` lies inside the boundary rectangle (edges
    /// inclusive).
    pub fn contains_point(&self, p: Point) -> bool {
        self.rect.contains(p)
    }

    /// Returns `true` if the device's center position lies inside.
    pub fn contains_device(&self, device: &Device) -> bool {
        self.contains_point(device.position)
    }

    /// Names of the devices currently inside, sorted.
    ///
    /// Derived state: only meaningful after the owning topology has run a
    /// containment recomputation, which it does after every structural change.
    pub fn contained_devices(&self) -> &BTreeSet<String> {
        &self.contained
    }

    /// Rebuilds the contained-device set from scratch against `devices`.
    pub(crate) fn recompute_contained(&mut self, devices: &[Device]) {
        self.contained.clear();
        for device in devices {
            if self.contains_device(device) {
                self.contained.insert(device.name().to_string());
            }
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
