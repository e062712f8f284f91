//! Board-map document integration tests.
//!
//! These tests check the demo board as the host sees it: serialized JSON
//! loaded into map storage.

use std::collections::HashSet;

use semver::Version;

use board_plugin_example::core::PluginConfig;
use board_plugin_example::host::{MapRegistration, MapStorage};
use board_plugin_example::maps::{demo_board, BoardMap, Connection, Priority};
use board_plugin_example::HostError;

/// Test that every connection in the serialized board names a real space.
#[test]
fn test_connections_resolve_in_json() {
    let json = demo_board(&PluginConfig::default()).to_json();
    let spaces = json["board"]["topology"]["spaces"].as_array().unwrap();
    let ids: HashSet<&str> = spaces.iter().map(|s| s["id"].as_str().unwrap()).collect();

    assert_eq!(ids.len(), spaces.len(), "space ids should be unique");
    for space in spaces {
        for connection in space["connections"].as_array().unwrap() {
            let target = connection["targetId"].as_str().unwrap();
            assert!(ids.contains(target), "{} connects to missing {}", space["id"], target);
            assert_eq!(connection["draw"], true);
        }
    }
}

/// Test that the board reaches the finish from the start.
#[test]
fn test_finish_reachable_from_start() {
    let board = demo_board(&PluginConfig::default());
    let mut current = board.space("start").unwrap();
    let mut steps = 0;

    while let Some(next) = current.connections.first() {
        current = board.space(&next.target_id).unwrap();
        steps += 1;
        assert!(steps <= board.spaces().len(), "path should not loop");
    }

    assert_eq!(current.id, "finish");
    assert_eq!(steps, 5);
}

/// Test that map storage accepts the board and rejects a broken copy.
#[test]
fn test_storage_validates_connections() {
    let board = demo_board(&PluginConfig::new(Version::new(1, 0, 0)));
    let mut storage = MapStorage::new();

    let info = MapRegistration::from_map(&board);
    storage.insert("example-everything-plugin", board.clone(), info).unwrap();
    assert!(storage.contains("demo-plugin-board"));

    let mut broken = board;
    broken.metadata.id = "broken-board".to_string();
    broken.board.topology.spaces[5].connections.push(Connection {
        target_id: "nowhere".to_string(),
        draw: true,
    });
    let info = MapRegistration::from_map(&broken);

    let err = storage.insert("example-everything-plugin", broken, info).unwrap_err();
    assert!(matches!(err, HostError::UnresolvedConnection { ref target_id, .. } if target_id == "nowhere"));
    assert_eq!(storage.len(), 1);
}

/// Test that the board survives the host's JSON round trip.
#[test]
fn test_board_reloads_from_text() {
    let board = demo_board(&PluginConfig::default());
    let text = serde_json::to_string_pretty(&board).unwrap();
    let reloaded = BoardMap::from_json(&text).unwrap();

    assert_eq!(reloaded.spaces().len(), 6);
    let finish = reloaded.space("finish").unwrap();
    assert_eq!(finish.triggers.len(), 3);
    assert_eq!(finish.triggers[0].action.kind, "SET_PLAYER_STATE");
    assert!(finish.triggers.iter().all(|t| t.priority <= Priority::Mid));
}
