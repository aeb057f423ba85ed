//! Domain entities for the topology designer.
//!
//! This module contains pure business logic with no infrastructure
//! dependencies: no file I/O, no rendering, no OS APIs.  Everything here can
//! be constructed and tested in isolation on any platform.
//!
//! The aggregate root is [`topology::Topology`]; the entities it owns live in
//! [`device`], [`connection`], and [`boundary`], on top of the geometry
//! primitives in [`geom`].  Presentation code observes changes through
//! [`events`] rather than the core reaching into a rendering API.

pub mod boundary;
pub mod connection;
pub mod device;
pub mod error;
pub mod events;
pub mod geom;
pub mod topology;
