//! Plain-data document schema for persisted topologies.
//!
//! The document is the JSON-compatible shape written to disk:
//!
//! ```json
//! {
//!   "devices":     [{"name": "...", "type": "router", "ip": "", "x": 0, "y": 0}],
//!   "connections": [{"device1": "...", "device2": "...", "type": "ethernet"}],
//!   "boundaries":  [{"name": "...", "subnet": "", "description": "",
//!                    "color": "...", "x": 0, "y": 0, "width": 0, "height": 0}]
//! }
//! ```
//!
//! All three top-level keys are required.  Enum strings (`type` fields)
//! validate during deserialization; an unrecognized value fails the load.
//! The `color` field passes through unvalidated.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::domain::boundary::BoundaryConfig;
use crate::domain::connection::LinkKind;
use crate::domain::device::{parse_ip, DeviceConfig, DeviceKind};
use crate::domain::error::TopologyError;
use crate::domain::geom::{Point, Rect};
use crate::domain::topology::Topology;
use crate::persist::PersistError;

/// Top-level persisted document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopologyDocument {
    pub devices: Vec<DeviceEntry>,
    pub connections: Vec<ConnectionEntry>,
    pub boundaries: Vec<BoundaryEntry>,
}

/// One persisted device.  `ip` is the string form; empty means no address.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceEntry {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: DeviceKind,
    pub ip: String,
    pub x: f64,
    pub y: f64,
}

/// One persisted connection, referencing its endpoints by device name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectionEntry {
    pub device1: String,
    pub device2: String,
    #[serde(rename = "type")]
    pub kind: LinkKind,
}

/// One persisted boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoundaryEntry {
    pub name: String,
    pub subnet: String,
    pub description: String,
    pub color: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Converts a live topology into its persisted document form.
///
/// Devices and boundaries are written in insertion order.  Connections are
/// gathered by walking each device's connection list in insertion order and
/// collapsing duplicates: one entry per unordered endpoint pair, keeping the
/// first occurrence.
pub fn to_document(topology: &Topology) -> TopologyDocument {
    let devices = topology
        .devices()
        .map(|d| DeviceEntry {
            name: d.name().to_string(),
            kind: d.kind,
            ip: d.ip_address.map(|ip| ip.to_string()).unwrap_or_default(),
            x: d.position.x,
            y: d.position.y,
        })
        .collect();

    let mut seen_pairs: HashSet<(String, String)> = HashSet::new();
    let mut connections = Vec::new();
    for device in topology.devices() {
        for conn in topology.connections_of(device.name()) {
            if seen_pairs.insert(conn.pair_key()) {
                connections.push(ConnectionEntry {
                    device1: conn.device1().to_string(),
                    device2: conn.device2().to_string(),
                    kind: conn.kind,
                });
            }
        }
    }
    let collapsed = topology.connection_count() - connections.len();
    if collapsed > 0 {
        warn!("collapsed {collapsed} duplicate connection(s) on save");
    }

    let boundaries = topology
        .boundaries()
        .map(|b| {
            let rect = b.rect();
            BoundaryEntry {
                name: b.name().to_string(),
                subnet: b.subnet.clone(),
                description: b.description.clone(),
                color: b.color.clone(),
                x: rect.x,
                y: rect.y,
                width: rect.width,
                height: rect.height,
            }
        })
        .collect();

    TopologyDocument {
        devices,
        connections,
        boundaries,
    }
}

/// Builds a fresh topology from a document.
///
/// Entities are created in stacking order: boundaries (bottom layer) first,
/// then devices, then connections.  Containment comes out recomputed because
/// every entity goes through the normal aggregate mutators.
///
/// Duplicate connection entries are applied as-is — collapsing happens only
/// on save, never on load.
///
/// # Errors
///
/// Returns [`PersistError::UnknownDevice`] when a connection references a
/// device name that is not in the document (hard failure — the partially
/// built topology is discarded), or [`PersistError::Model`] for entries that
/// violate model rules (empty names, duplicate names, malformed IP strings,
/// self-connections).
pub fn from_document(doc: &TopologyDocument) -> Result<Topology, PersistError> {
    let mut topology = Topology::new();

    for entry in &doc.boundaries {
        let config = BoundaryConfig::new(entry.name.clone())
            .with_subnet(entry.subnet.clone())
            .with_description(entry.description.clone())
            .with_color(entry.color.clone());
        topology.add_boundary(config, Rect::new(entry.x, entry.y, entry.width, entry.height))?;
    }

    for entry in &doc.devices {
        let mut config = DeviceConfig::new(entry.name.clone(), entry.kind);
        config.ip_address = parse_ip(&entry.ip)?;
        topology.add_device(config, Point::new(entry.x, entry.y))?;
    }

    for entry in &doc.connections {
        match topology.connect(&entry.device1, &entry.device2, entry.kind) {
            Ok(_) => {}
            Err(TopologyError::NotFound(missing)) => {
                return Err(PersistError::UnknownDevice {
                    device1: entry.device1.clone(),
                    device2: entry.device2.clone(),
                    missing,
                });
            }
            Err(e) => return Err(PersistError::Model(e)),
        }
    }

    Ok(topology)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
