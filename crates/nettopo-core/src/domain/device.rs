//! Network device entity.
//!
//! A device is a named, typed node positioned on the canvas.  Its visual
//! footprint is a circle of [`HIT_RADIUS`] around [`Device::position`]; that
//! circle is the canonical hit-test region for click selection and for
//! deciding whether a device sits inside a boundary.
//!
//! Devices do not own their connections.  The [`Topology`] aggregate owns
//! every [`Connection`] centrally; each device only keeps the list of
//! connection ids that touch it, so cascading deletes and endpoint lookups
//! stay symmetric by construction.
//!
//! [`Topology`]: crate::domain::topology::Topology
//! [`Connection`]: crate::domain::connection::Connection

use std::net::IpAddr;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::connection::ConnectionId;
use crate::domain::error::TopologyError;
use crate::domain::geom::{point_in_circle, Point};

/// Edge length of the square icon footprint, in canvas units.
pub const ICON_SIZE: f64 = 60.0;

/// Radius of the circular hit-test region centered on the device position.
pub const HIT_RADIUS: f64 = ICON_SIZE / 2.0;

/// The kinds of network device that can appear in a diagram.
///
/// The snake_case string form (`"access_point"` etc.) is what gets persisted
/// in topology files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviceKind {
    Router,
    Switch,
    Firewall,
    Server,
    Client,
    AccessPoint,
}

impl DeviceKind {
    /// All kinds, in the order they appear in the device palette.
    pub const ALL: [DeviceKind; 6] = [
        DeviceKind::Router,
        DeviceKind::Switch,
        DeviceKind::Firewall,
        DeviceKind::Server,
        DeviceKind::Client,
        DeviceKind::AccessPoint,
    ];

    /// The persisted string form of this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            DeviceKind::Router => "router",
            DeviceKind::Switch => "switch",
            DeviceKind::Firewall => "firewall",
            DeviceKind::Server => "server",
            DeviceKind::Client => "client",
            DeviceKind::AccessPoint => "access_point",
        }
    }
}

impl FromStr for DeviceKind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, ()> {
        match s {
            "router" => Ok(DeviceKind::Router),
            "switch" => Ok(DeviceKind::Switch),
            "firewall" => Ok(DeviceKind::Firewall),
            "server" => Ok(DeviceKind::Server),
            "client" => Ok(DeviceKind::Client),
            "access_point" => Ok(DeviceKind::AccessPoint),
            _ => Err(()),
        }
    }
}

/// Parses the string form of an optional IP address.
///
/// An empty (or all-whitespace) string means "no address".  Anything else
/// must be a syntactically valid IPv4 or IPv6 literal.
///
/// # Errors
///
/// Returns [`TopologyError::InvalidIpAddress`] for a non-empty string that
/// does not parse.
pub fn parse_ip(raw: &str) -> Result<Option<IpAddr>, TopologyError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    trimmed
        .parse::<IpAddr>()
        .map(Some)
        .map_err(|_| TopologyError::InvalidIpAddress(trimmed.to_string()))
}

/// User-supplied attributes for a new device.
#[derive(Debug, Clone, PartialEq)]
pub struct DeviceConfig {
    pub name: String,
    pub kind: DeviceKind,
    pub ip_address: Option<IpAddr>,
}

impl DeviceConfig {
    pub fn new(name: impl Into<String>, kind: DeviceKind) -> Self {
        Self {
            name: name.into(),
            kind,
            ip_address: None,
        }
    }

    pub fn with_ip(mut self, ip: IpAddr) -> Self {
        self.ip_address = Some(ip);
        self
    }
}

/// A positioned, named, typed node in the topology.
#[derive(Debug, Clone, PartialEq)]
pub struct Device {
    name: String,
    pub kind: DeviceKind,
    pub ip_address: Option<IpAddr>,
    pub position: Point,
    connections: Vec<ConnectionId>,
}

impl Device {
    /// Creates a new device at `position`.
    ///
    /// The name is trimmed before storing; name uniqueness is enforced by the
    /// owning [`Topology`](crate::domain::topology::Topology), not here.
    ///
    /// # Errors
    ///
    /// Returns [`TopologyError::EmptyName`] if the trimmed name is empty.
    pub fn new(config: DeviceConfig, position: Point) -> Result<Self, TopologyError> {
        let name = config.name.trim().to_string();
        if name.is_empty() {
            return Err(TopologyError::EmptyName);
        }
        Ok(Self {
            name,
            kind: config.kind,
            ip_address: config.ip_address,
            position,
            connections: Vec::new(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Ids of the connections touching this device, in registration order.
    pub fn connections(&self) -> &[ConnectionId] {
        &self.connections
    }

    /// Moves the device by the given delta.
    ///
    /// Connection endpoints are derived from device positions on query, so no
    /// per-connection bookkeeping happens here.
    pub fn translate(&mut self, dx: f64, dy: f64) {
        self.position = self.position.translated(dx, dy);
    }

    /// Returns `true` if `p` falls within the circular icon footprint.
    pub fn contains_point(&self, p: Point) -> bool {
        point_in_circle(self.position, HIT_RADIUS, p)
    }

    /// Returns the point on the icon circle where a line toward `target`
    /// should attach.
    ///
    /// When `target` coincides with the device position the anchor degrades
    /// to the rightmost point of the circle.
    pub fn anchor_toward(&self, target: Point) -> Point {
        let dx = target.x - self.position.x;
        let dy = target.y - self.position.y;
        let angle = dy.atan2(dx);
        Point::new(
            self.position.x + HIT_RADIUS * angle.cos(),
            self.position.y + HIT_RADIUS * angle.sin(),
        )
    }

    pub(crate) fn set_name(&mut self, name: String) {
        self.name = name;
    }

    pub(crate) fn register_connection(&mut self, id: ConnectionId) {
        self.connections.push(id);
    }

    pub(crate) fn deregister_connection(&mut self, id: ConnectionId) {
        self.connections.retain(|c| *c != id);
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
