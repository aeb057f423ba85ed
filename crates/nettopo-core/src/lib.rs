//! # nettopo-core
//!
//! Core library for the NetTopo topology designer: the diagram data model,
//! its spatial and containment semantics, and JSON persistence.
//!
//! This crate is consumed by the desktop frontend.  It has zero dependencies
//! on UI frameworks, rendering APIs, or OS event loops, and can be compiled
//! and tested anywhere.
//!
//! # Architecture overview
//!
//! A diagram is a set of **devices** (routers, switches, firewalls, servers,
//! clients, access points) placed on a canvas, joined by typed
//! **connections** (ethernet, fiber, wireless, VPN, serial, USB) and grouped
//! by rectangular **boundary** zones.  This crate defines:
//!
//! - **`domain`** – The entities and the [`Topology`] aggregate that owns
//!   them.  The aggregate enforces the structural invariants: one shared
//!   name namespace, symmetric connection registration, cascading deletes,
//!   and geometry-derived boundary containment.  Frontends learn about
//!   changes through the [`TopologyObserver`] seam instead of the core
//!   touching a canvas.
//!
//! - **`persist`** – The JSON document a diagram is saved as, and the
//!   save/load functions with full-replace semantics (a failed load never
//!   disturbs the open diagram).
//!
//! - **`config`** – Editor preferences (canvas size, placement grid, file
//!   handling) stored as TOML in the platform config directory.
//!
//! - **`placement`** – The position-provider contract for placing new items
//!   when the user did not click a location, with a grid default.

pub mod config;
pub mod domain;
pub mod persist;
pub mod placement;

// Re-export the most-used types at the crate root so callers can write
// `nettopo_core::Topology` instead of `nettopo_core::domain::topology::Topology`.
pub use domain::boundary::{Boundary, BoundaryConfig, MIN_HEIGHT, MIN_WIDTH};
pub use domain::connection::{Connection, ConnectionId, LinkKind};
pub use domain::device::{parse_ip, Device, DeviceConfig, DeviceKind, HIT_RADIUS, ICON_SIZE};
pub use domain::error::TopologyError;
pub use domain::events::{TopologyEvent, TopologyObserver};
pub use domain::geom::{Point, Rect};
pub use domain::topology::{HitTarget, Topology};
pub use persist::{load_topology, save_topology, PersistError, TopologyDocument};
