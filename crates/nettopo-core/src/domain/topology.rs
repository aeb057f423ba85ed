//! The topology aggregate.
//!
//! A [`Topology`] owns every device, boundary, and connection in one diagram
//! and is the only way to mutate them.  Routing all mutation through the
//! aggregate is what keeps the cross-entity invariants true:
//!
//! - device and boundary names are unique within one shared namespace;
//! - a connection is registered with both of its endpoints or with neither;
//! - removing a device removes its incident connections first, so no
//!   connection ever dangles;
//! - each boundary's contained-device set is recomputed after every
//!   structural change.
//!
//! Collections are insertion-ordered vectors with linear name lookup.  The
//! diagram scale is tens of entities, hit-test precedence is defined in terms
//! of insertion order, and save files must come out in a deterministic order,
//! so a plain `Vec` fits better than a map here.
//!
//! The aggregate is single-threaded and synchronous.  It performs no locking;
//! callers serialize access on one control thread (the UI event dispatch
//! thread in the full application).

use std::net::IpAddr;

use tracing::debug;

use crate::domain::boundary::{Boundary, BoundaryConfig};
use crate::domain::connection::{Connection, ConnectionId, LinkKind};
use crate::domain::device::{Device, DeviceConfig, DeviceKind};
use crate::domain::error::TopologyError;
use crate::domain::events::{TopologyEvent, TopologyObserver};
use crate::domain::geom::{Point, Rect};

/// What a [`Topology::hit_test`] found under the cursor.
///
/// An explicit tagged result: callers match on the variant instead of
/// comparing opaque canvas handles to guess what was clicked.
#[derive(Debug, Clone, Copy)]
pub enum HitTarget<'a> {
    Device(&'a Device),
    Boundary(&'a Boundary),
}

impl HitTarget<'_> {
    /// Name of the hit entity, whichever variant it is.
    pub fn name(&self) -> &str {
        match self {
            HitTarget::Device(d) => d.name(),
            HitTarget::Boundary(b) => b.name(),
        }
    }
}

/// The aggregate of all devices, connections, and boundaries in one diagram.
pub struct Topology {
    devices: Vec<Device>,
    boundaries: Vec<Boundary>,
    connections: Vec<Connection>,
    observers: Vec<Box<dyn TopologyObserver>>,
}

impl Default for Topology {
    fn default() -> Self {
        Self::new()
    }
}

impl Topology {
    /// Creates an empty topology.
    pub fn new() -> Self {
        Self {
            devices: Vec::new(),
            boundaries: Vec::new(),
            connections: Vec::new(),
            observers: Vec::new(),
        }
    }

    /// Registers an observer that receives a [`TopologyEvent`] after every
    /// successful mutation.
    pub fn subscribe(&mut self, observer: Box<dyn TopologyObserver>) {
        self.observers.push(observer);
    }

    // ── Read access ───────────────────────────────────────────────────────────

    /// Devices in insertion order.
    pub fn devices(&self) -> impl Iterator<Item = &Device> {
        self.devices.iter()
    }

    /// Boundaries in insertion order.
    pub fn boundaries(&self) -> impl Iterator<Item = &Boundary> {
        self.boundaries.iter()
    }

    /// Connections in creation order.
    pub fn connections(&self) -> impl Iterator<Item = &Connection> {
        self.connections.iter()
    }

    pub fn device(&self, name: &str) -> Option<&Device> {
        self.devices.iter().find(|d| d.name() == name)
    }

    pub fn boundary(&self, name: &str) -> Option<&Boundary> {
        self.boundaries.iter().find(|b| b.name() == name)
    }

    pub fn connection(&self, id: ConnectionId) -> Option<&Connection> {
        self.connections.iter().find(|c| c.id() == id)
    }

    /// Connections touching the named device, in registration order.
    ///
    /// Unknown names yield an empty list.
    pub fn connections_of(&self, name: &str) -> Vec<&Connection> {
        match self.device(name) {
            Some(device) => device
                .connections()
                .iter()
                .filter_map(|id| self.connection(*id))
                .collect(),
            None => Vec::new(),
        }
    }

    /// All connections between the two named devices, regardless of endpoint
    /// order.  Consumers that want to forbid parallel links check this before
    /// calling [`connect`](Self::connect).
    pub fn connections_between(&self, a: &str, b: &str) -> Vec<&Connection> {
        self.connections
            .iter()
            .filter(|c| c.touches(a) && c.touches(b))
            .collect()
    }

    /// Current endpoints of a connection's rendered line, derived from the
    /// live device positions.
    pub fn connection_line(&self, id: ConnectionId) -> Option<(Point, Point)> {
        let conn = self.connection(id)?;
        let d1 = self.device(conn.device1())?;
        let d2 = self.device(conn.device2())?;
        Some((d1.position, d2.position))
    }

    pub fn device_count(&self) -> usize {
        self.devices.len()
    }

    pub fn boundary_count(&self) -> usize {
        self.boundaries.len()
    }

    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.devices.is_empty() && self.boundaries.is_empty()
    }

    /// Finds what lies under `p` for click selection.
    ///
    /// Devices take priority over boundaries; within each category entities
    /// are checked in insertion order and the first match wins.  This
    /// precedence is part of the selection contract and must stay stable.
    pub fn hit_test(&self, p: Point) -> Option<HitTarget<'_>> {
        if let Some(device) = self.devices.iter().find(|d| d.contains_point(p)) {
            return Some(HitTarget::Device(device));
        }
        if let Some(boundary) = self.boundaries.iter().find(|b| b.contains_point(p)) {
            return Some(HitTarget::Boundary(boundary));
        }
        None
    }

    // ── Device mutation ───────────────────────────────────────────────────────

    /// Adds a device at `position`.
    ///
    /// # Errors
    ///
    /// Returns [`TopologyError::EmptyName`] for a blank name and
    /// [`TopologyError::DuplicateName`] when the name collides with any
    /// existing device or boundary.
    pub fn add_device(
        &mut self,
        config: DeviceConfig,
        position: Point,
    ) -> Result<&Device, TopologyError> {
        let device = Device::new(config, position)?;
        if self.name_in_use(device.name()) {
            return Err(TopologyError::DuplicateName(device.name().to_string()));
        }
        let name = device.name().to_string();
        self.devices.push(device);
        self.recompute_containment();
        debug!("device {name} added at ({}, {})", position.x, position.y);
        self.notify(TopologyEvent::DeviceAdded { name });
        let idx = self.devices.len() - 1;
        Ok(&self.devices[idx])
    }

    /// Removes a device and every connection incident to it.
    ///
    /// The cascade deregisters each incident connection from its other
    /// endpoint before the device itself is dropped, so no dangling
    /// reference can exist at any point.
    ///
    /// # Errors
    ///
    /// Returns [`TopologyError::NotFound`] if no such device exists; the
    /// topology is untouched in that case.
    pub fn remove_device(&mut self, name: &str) -> Result<(), TopologyError> {
        let idx = self
            .device_index(name)
            .ok_or_else(|| TopologyError::NotFound(name.to_string()))?;
        let incident: Vec<ConnectionId> = self.devices[idx].connections().to_vec();
        for id in &incident {
            self.detach_connection(*id);
        }
        let device = self.devices.remove(idx);
        self.recompute_containment();
        debug!(
            "device {} removed along with {} connection(s)",
            device.name(),
            incident.len()
        );
        for id in incident {
            self.notify(TopologyEvent::ConnectionRemoved { id });
        }
        self.notify(TopologyEvent::DeviceRemoved {
            name: device.name().to_string(),
        });
        Ok(())
    }

    /// Moves a device by the given delta and recomputes containment, since
    /// the move may carry the device into or out of a boundary.
    pub fn move_device(&mut self, name: &str, dx: f64, dy: f64) -> Result<(), TopologyError> {
        let device = self
            .device_mut(name)
            .ok_or_else(|| TopologyError::NotFound(name.to_string()))?;
        device.translate(dx, dy);
        self.recompute_containment();
        debug!("device {name} moved by ({dx}, {dy})");
        self.notify(TopologyEvent::DeviceMoved {
            name: name.to_string(),
        });
        Ok(())
    }

    /// Renames a device, rewriting the endpoint names inside its incident
    /// connections so they keep resolving.
    ///
    /// Renaming a device to its current name is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`TopologyError::EmptyName`], [`TopologyError::NotFound`], or
    /// [`TopologyError::DuplicateName`] when another device or boundary
    /// already uses `new_name`.
    pub fn rename_device(&mut self, name: &str, new_name: &str) -> Result<(), TopologyError> {
        let new = new_name.trim();
        if new.is_empty() {
            return Err(TopologyError::EmptyName);
        }
        let idx = self
            .device_index(name)
            .ok_or_else(|| TopologyError::NotFound(name.to_string()))?;
        if new == name {
            return Ok(());
        }
        if self.name_in_use(new) {
            return Err(TopologyError::DuplicateName(new.to_string()));
        }
        for conn in &mut self.connections {
            conn.rename_endpoint(name, new);
        }
        self.devices[idx].set_name(new.to_string());
        self.recompute_containment();
        debug!("device {name} renamed to {new}");
        self.notify(TopologyEvent::DeviceRenamed {
            old: name.to_string(),
            new: new.to_string(),
        });
        Ok(())
    }

    /// Changes a device's kind.
    pub fn set_device_kind(&mut self, name: &str, kind: DeviceKind) -> Result<(), TopologyError> {
        let device = self
            .device_mut(name)
            .ok_or_else(|| TopologyError::NotFound(name.to_string()))?;
        device.kind = kind;
        self.notify(TopologyEvent::DeviceUpdated {
            name: name.to_string(),
        });
        Ok(())
    }

    /// Changes or clears a device's IP address.
    pub fn set_device_ip(
        &mut self,
        name: &str,
        ip_address: Option<IpAddr>,
    ) -> Result<(), TopologyError> {
        let device = self
            .device_mut(name)
            .ok_or_else(|| TopologyError::NotFound(name.to_string()))?;
        device.ip_address = ip_address;
        self.notify(TopologyEvent::DeviceUpdated {
            name: name.to_string(),
        });
        Ok(())
    }

    // ── Connection mutation ───────────────────────────────────────────────────

    /// Connects two devices with a typed link.
    ///
    /// Duplicate parallel connections between the same pair are allowed; the
    /// serializer collapses them on save.
    ///
    /// The interactive connection mode (pick an anchor device, then a
    /// target) lives in the presentation layer; it calls this exactly once
    /// per session and treats a second click on the anchor as a no-op
    /// instead of requesting a self-connection.
    ///
    /// # Errors
    ///
    /// Returns [`TopologyError::NotFound`] if either name is absent and
    /// [`TopologyError::SelfConnection`] when both names are the same device.
    pub fn connect(
        &mut self,
        name1: &str,
        name2: &str,
        kind: LinkKind,
    ) -> Result<ConnectionId, TopologyError> {
        if self.device(name1).is_none() {
            return Err(TopologyError::NotFound(name1.to_string()));
        }
        if self.device(name2).is_none() {
            return Err(TopologyError::NotFound(name2.to_string()));
        }
        let conn = Connection::new(name1.to_string(), name2.to_string(), kind)?;
        let id = conn.id();
        self.connections.push(conn);
        if let Some(d) = self.device_mut(name1) {
            d.register_connection(id);
        }
        if let Some(d) = self.device_mut(name2) {
            d.register_connection(id);
        }
        debug!("{} connection {name1} <-> {name2} added", kind.as_str());
        self.notify(TopologyEvent::ConnectionAdded { id });
        Ok(id)
    }

    /// Removes a connection, deregistering it from both endpoints.
    ///
    /// Idempotent: removing an id that is no longer present is a no-op, not
    /// an error.
    pub fn remove_connection(&mut self, id: ConnectionId) {
        if self.detach_connection(id).is_some() {
            debug!("connection {id} removed");
            self.notify(TopologyEvent::ConnectionRemoved { id });
        }
    }

    // ── Boundary mutation ─────────────────────────────────────────────────────

    /// Adds a boundary covering `rect` (clamped to the minimum size).
    ///
    /// # Errors
    ///
    /// Same namespace rules as [`add_device`](Self::add_device).
    pub fn add_boundary(
        &mut self,
        config: BoundaryConfig,
        rect: Rect,
    ) -> Result<&Boundary, TopologyError> {
        let boundary = Boundary::new(config, rect)?;
        if self.name_in_use(boundary.name()) {
            return Err(TopologyError::DuplicateName(boundary.name().to_string()));
        }
        let name = boundary.name().to_string();
        self.boundaries.push(boundary);
        self.recompute_containment();
        debug!("boundary {name} added");
        self.notify(TopologyEvent::BoundaryAdded { name });
        let idx = self.boundaries.len() - 1;
        Ok(&self.boundaries[idx])
    }

    /// Removes a boundary.  Devices are never owned by a boundary, so there
    /// is no cascade.
    ///
    /// # Errors
    ///
    /// Returns [`TopologyError::NotFound`] if no such boundary exists.
    pub fn remove_boundary(&mut self, name: &str) -> Result<(), TopologyError> {
        let idx = self
            .boundary_index(name)
            .ok_or_else(|| TopologyError::NotFound(name.to_string()))?;
        self.boundaries.remove(idx);
        debug!("boundary {name} removed");
        self.notify(TopologyEvent::BoundaryRemoved {
            name: name.to_string(),
        });
        Ok(())
    }

    /// Moves a boundary by the given delta and recomputes containment, since
    /// the boundary may gain or lose devices.
    pub fn move_boundary(&mut self, name: &str, dx: f64, dy: f64) -> Result<(), TopologyError> {
        let boundary = self
            .boundary_mut(name)
            .ok_or_else(|| TopologyError::NotFound(name.to_string()))?;
        boundary.translate(dx, dy);
        self.recompute_containment();
        debug!("boundary {name} moved by ({dx}, {dy})");
        self.notify(TopologyEvent::BoundaryMoved {
            name: name.to_string(),
        });
        Ok(())
    }

    /// Resizes a boundary, clamping to the minimum floor, and recomputes
    /// containment.
    pub fn resize_boundary(
        &mut self,
        name: &str,
        new_width: f64,
        new_height: f64,
    ) -> Result<(), TopologyError> {
        let boundary = self
            .boundary_mut(name)
            .ok_or_else(|| TopologyError::NotFound(name.to_string()))?;
        boundary.resize(new_width, new_height);
        self.recompute_containment();
        debug!("boundary {name} resized to {new_width}x{new_height} (pre-clamp)");
        self.notify(TopologyEvent::BoundaryResized {
            name: name.to_string(),
        });
        Ok(())
    }

    /// Updates a boundary's descriptive fields.
    pub fn set_boundary_details(
        &mut self,
        name: &str,
        subnet: impl Into<String>,
        description: impl Into<String>,
        color: impl Into<String>,
    ) -> Result<(), TopologyError> {
        let boundary = self
            .boundary_mut(name)
            .ok_or_else(|| TopologyError::NotFound(name.to_string()))?;
        boundary.subnet = subnet.into();
        boundary.description = description.into();
        boundary.color = color.into();
        self.notify(TopologyEvent::BoundaryUpdated {
            name: name.to_string(),
        });
        Ok(())
    }

    // ── Whole-diagram mutation ────────────────────────────────────────────────

    /// Removes everything.  The "are you sure" prompt before a destructive
    /// reset belongs to the presentation layer; this method just clears.
    pub fn clear(&mut self) {
        debug!(
            "topology cleared ({} devices, {} connections, {} boundaries)",
            self.devices.len(),
            self.connections.len(),
            self.boundaries.len()
        );
        self.devices.clear();
        self.connections.clear();
        self.boundaries.clear();
        self.notify(TopologyEvent::Cleared);
    }

    // ── Private helpers ───────────────────────────────────────────────────────

    fn name_in_use(&self, name: &str) -> bool {
        self.devices.iter().any(|d| d.name() == name)
            || self.boundaries.iter().any(|b| b.name() == name)
    }

    fn device_index(&self, name: &str) -> Option<usize> {
        self.devices.iter().position(|d| d.name() == name)
    }

    fn boundary_index(&self, name: &str) -> Option<usize> {
        self.boundaries.iter().position(|b| b.name() == name)
    }

    fn device_mut(&mut self, name: &str) -> Option<&mut Device> {
        self.devices.iter_mut().find(|d| d.name() == name)
    }

    fn boundary_mut(&mut self, name: &str) -> Option<&mut Boundary> {
        self.boundaries.iter_mut().find(|b| b.name() == name)
    }

    /// Removes a connection from the central list and both endpoints.
    /// Returns the removed connection, or `None` if the id was unknown.
    fn detach_connection(&mut self, id: ConnectionId) -> Option<Connection> {
        let pos = self.connections.iter().position(|c| c.id() == id)?;
        let conn = self.connections.remove(pos);
        let first = conn.device1().to_string();
        let second = conn.device2().to_string();
        if let Some(d) = self.device_mut(&first) {
            d.deregister_connection(id);
        }
        if let Some(d) = self.device_mut(&second) {
            d.deregister_connection(id);
        }
        Some(conn)
    }

    /// Full rescan: rebuilds every boundary's contained-device set.
    fn recompute_containment(&mut self) {
        for boundary in &mut self.boundaries {
            boundary.recompute_contained(&self.devices);
        }
    }

    fn notify(&mut self, event: TopologyEvent) {
        for observer in &mut self.observers {
            observer.topology_changed(event.clone());
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
