//! Integration tests for the nettopo-core public API.
//!
//! These tests drive a complete editing session the way a frontend would:
//! build a diagram through the aggregate, save it to disk, reload it, and
//! verify that everything the user drew comes back — exercising the domain
//! model and the serializer together.

use std::path::PathBuf;

use nettopo_core::{
    load_topology, save_topology, BoundaryConfig, DeviceConfig, DeviceKind, HitTarget, LinkKind,
    PersistError, Point, Rect, Topology, TopologyError,
};
use uuid::Uuid;

fn temp_dir() -> PathBuf {
    let dir = std::env::temp_dir().join(format!("nettopo_it_{}", Uuid::new_v4()));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

/// Builds the reference diagram: a router and a switch joined by fiber,
/// with a LAN boundary across the bottom-left of the canvas.
fn lab_topology() -> Topology {
    let mut topo = Topology::new();
    topo.add_device(
        DeviceConfig::new("R1", DeviceKind::Router),
        Point::new(10.0, 10.0),
    )
    .expect("add R1");
    topo.add_device(
        DeviceConfig::new("S1", DeviceKind::Switch),
        Point::new(200.0, 10.0),
    )
    .expect("add S1");
    topo.connect("R1", "S1", LinkKind::Fiber).expect("connect");
    topo.add_boundary(
        BoundaryConfig::new("LAN").with_subnet("192.168.0.0/24"),
        Rect::new(0.0, 0.0, 400.0, 100.0),
    )
    .expect("add LAN");
    topo
}

#[test]
fn test_lab_diagram_survives_save_and_reload() {
    let dir = temp_dir();
    let path = dir.join("lab.json");
    let original = lab_topology();

    save_topology(&original, &path).expect("save must succeed");
    let restored = load_topology(&path).expect("load must succeed");

    // Devices come back with identical positions and kinds.
    let r1 = restored.device("R1").expect("R1 restored");
    assert_eq!(r1.kind, DeviceKind::Router);
    assert_eq!(r1.position, Point::new(10.0, 10.0));
    let s1 = restored.device("S1").expect("S1 restored");
    assert_eq!(s1.kind, DeviceKind::Switch);
    assert_eq!(s1.position, Point::new(200.0, 10.0));

    // The fiber connection joins the same pair.
    assert_eq!(restored.connection_count(), 1);
    let conns = restored.connections_of("R1");
    assert_eq!(conns.len(), 1);
    assert_eq!(conns[0].kind, LinkKind::Fiber);
    assert_eq!(conns[0].other_endpoint("R1"), Ok("S1"));

    // The boundary geometry is intact and both devices fall inside it.
    let lan = restored.boundary("LAN").expect("LAN restored");
    assert_eq!(lan.rect(), Rect::new(0.0, 0.0, 400.0, 100.0));
    assert_eq!(lan.subnet, "192.168.0.0/24");
    assert!(lan.contained_devices().contains("R1"));
    assert!(lan.contained_devices().contains("S1"));

    // Clicking on R1's position selects R1, not the boundary underneath.
    match restored.hit_test(Point::new(10.0, 10.0)) {
        Some(HitTarget::Device(d)) => assert_eq!(d.name(), "R1"),
        other => panic!("expected R1 under cursor, got {other:?}"),
    }

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_empty_topology_round_trips() {
    let dir = temp_dir();
    let path = dir.join("empty.json");

    save_topology(&Topology::new(), &path).expect("save");
    let restored = load_topology(&path).expect("load");

    assert!(restored.is_empty());
    assert_eq!(restored.connection_count(), 0);

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_parallel_connections_collapse_on_save_only() {
    let dir = temp_dir();
    let path = dir.join("parallel.json");

    let mut topo = lab_topology();
    topo.connect("S1", "R1", LinkKind::Ethernet).expect("duplicate pair");
    assert_eq!(topo.connection_count(), 2, "duplicates allowed in memory");

    save_topology(&topo, &path).expect("save");
    let restored = load_topology(&path).expect("load");

    // The unordered pair was collapsed to one entry on save.
    assert_eq!(restored.connection_count(), 1);
    assert_eq!(restored.connections_of("S1").len(), 1);

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_load_failure_leaves_caller_topology_untouched() {
    let dir = temp_dir();
    let path = dir.join("dangling.json");
    std::fs::write(
        &path,
        r#"{
            "devices": [{"name": "R1", "type": "router", "ip": "", "x": 0, "y": 0}],
            "connections": [{"device1": "R1", "device2": "ghost", "type": "ethernet"}],
            "boundaries": []
        }"#,
    )
    .unwrap();

    // The editor keeps its live topology; load builds a new one and fails
    // before anything is swapped in.
    let live = lab_topology();
    let result = load_topology(&path);

    assert!(matches!(
        result,
        Err(PersistError::UnknownDevice { ref missing, .. }) if missing == "ghost"
    ));
    assert_eq!(live.device_count(), 2);
    assert_eq!(live.connection_count(), 1);

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_load_rejects_unrecognized_enum_string() {
    let dir = temp_dir();
    let path = dir.join("badkind.json");
    std::fs::write(
        &path,
        r#"{
            "devices": [{"name": "X", "type": "toaster", "ip": "", "x": 0, "y": 0}],
            "connections": [],
            "boundaries": []
        }"#,
    )
    .unwrap();

    assert!(matches!(load_topology(&path), Err(PersistError::Parse(_))));

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_edit_session_after_reload_behaves_like_the_original() {
    let dir = temp_dir();
    let path = dir.join("session.json");
    save_topology(&lab_topology(), &path).expect("save");
    let mut topo = load_topology(&path).expect("load");

    // Keep editing the reloaded diagram: add a firewall, wire it up, then
    // delete the switch and watch the cascade.
    topo.add_device(
        DeviceConfig::new("FW1", DeviceKind::Firewall),
        Point::new(300.0, 200.0),
    )
    .expect("add FW1");
    topo.connect("S1", "FW1", LinkKind::Ethernet).expect("connect FW1");
    assert_eq!(topo.connection_count(), 2);

    topo.remove_device("S1").expect("remove S1");

    assert_eq!(topo.device_count(), 2);
    assert_eq!(topo.connection_count(), 0, "both S1 links cascaded away");
    assert!(topo.connections_of("R1").is_empty());
    assert!(topo.connections_of("FW1").is_empty());

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_self_connection_is_rejected_through_the_public_api() {
    let mut topo = lab_topology();
    let result = topo.connect("R1", "R1", LinkKind::Wireless);
    assert_eq!(
        result.err(),
        Some(TopologyError::SelfConnection("R1".to_string()))
    );
}

#[test]
fn test_device_ip_string_round_trips_through_file() {
    let dir = temp_dir();
    let path = dir.join("ips.json");

    let mut topo = Topology::new();
    topo.add_device(
        DeviceConfig::new("gw", DeviceKind::Router).with_ip("10.1.2.3".parse().unwrap()),
        Point::new(50.0, 50.0),
    )
    .expect("add gw");
    topo.add_device(
        DeviceConfig::new("ap", DeviceKind::AccessPoint).with_ip("fe80::1".parse().unwrap()),
        Point::new(150.0, 50.0),
    )
    .expect("add ap");
    topo.add_device(DeviceConfig::new("lab-pc", DeviceKind::Client), Point::new(250.0, 50.0))
        .expect("add lab-pc");

    save_topology(&topo, &path).expect("save");
    let restored = load_topology(&path).expect("load");

    assert_eq!(
        restored.device("gw").unwrap().ip_address,
        Some("10.1.2.3".parse().unwrap())
    );
    assert_eq!(
        restored.device("ap").unwrap().ip_address,
        Some("fe80::1".parse().unwrap())
    );
    assert_eq!(restored.device("lab-pc").unwrap().ip_address, None);

    std::fs::remove_dir_all(&dir).ok();
}
