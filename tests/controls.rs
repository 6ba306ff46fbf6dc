// MIT License - Copyright (c) 2026 Peter Wright
// Secondary PTZ controls and panorama capture

mod common;

use common::{MockSnapshot, MockTransport, device_error};
use ptz_lan_control::{
    Command, GuardOptions, MaskArea, PanoramaPlan, PatrolRoute, PatrolStop, PatternTrack,
    PtzCheckState, PtzController, PtzError, ZoomFocus, ZoomFocusOp, build_panorama,
};
use serde_json::json;

fn controller(transport: MockTransport) -> PtzController<MockTransport> {
    PtzController::new(transport)
}

// --- Guard ---

#[tokio::test]
async fn test_guard_rejects_unsupported_timeout() {
    let camera = controller(MockTransport::new());
    let opts = GuardOptions {
        timeout_sec: 30,
        ..Default::default()
    };
    let err = camera.set_guard(0, opts).await.unwrap_err();
    assert!(err.is_validation());
    assert!(camera.transport().calls().is_empty());
}

#[tokio::test]
async fn test_set_guard_payload() {
    let camera = controller(MockTransport::new());
    let opts = GuardOptions {
        enable: true,
        save_current_position: true,
        timeout_sec: 60,
    };
    camera.set_guard(1, opts).await.unwrap();
    assert_eq!(
        camera.transport().last_payload(Command::SetPtzGuard),
        Some(json!({"PtzGuard": {
            "channel": 1,
            "cmdStr": "setPos",
            "benable": 1,
            "bSaveCurrentPos": 1,
            "timeout": 60
        }}))
    );
}

#[tokio::test]
async fn test_get_guard() {
    let transport = MockTransport::new().reply(
        Command::GetPtzGuard,
        json!({"PtzGuard": {"benable": 1, "bexistPos": 1, "channel": 0, "timeout": 60}}),
    );
    let guard = controller(transport).get_guard(0).await.unwrap();
    assert!(guard.enabled);
    assert!(guard.position_exists);
    assert_eq!(guard.timeout, 60);
}

#[tokio::test]
async fn test_get_guard_missing_section() {
    let camera = controller(MockTransport::new());
    let err = camera.get_guard(0).await.unwrap_err();
    assert!(matches!(err, PtzError::InvalidResponse { .. }));
}

// --- Self check ---

#[tokio::test]
async fn test_ptz_check_and_state() {
    let transport = MockTransport::new().reply(Command::GetPtzCheckState, json!({"PtzCheckState": 1}));
    let camera = controller(transport);
    camera.ptz_check(0).await.unwrap();
    let state = camera.get_ptz_check_state(0).await.unwrap();
    assert_eq!(state, PtzCheckState::Checking);
    assert!(state.is_running());
    assert_eq!(
        camera.transport().commands(),
        vec![Command::PtzCheck, Command::GetPtzCheckState]
    );
}

// --- Patrol ---

#[tokio::test]
async fn test_get_patrol_single_route_is_wrapped() {
    let transport = MockTransport::new().reply(
        Command::GetPtzPatrol,
        json!({"PtzPatrol": {"channel": 0, "id": 1, "enable": 1, "running": 0, "name": "Yard",
            "preset": [{"id": 2, "dwellTime": 5, "speed": 20}]}}),
    );
    let routes = controller(transport).get_patrol(0).await.unwrap();
    assert_eq!(routes.len(), 1);
    assert_eq!(routes[0].name, "Yard");
    assert_eq!(
        routes[0].preset,
        vec![PatrolStop {
            id: 2,
            dwell_time: 5,
            speed: 20
        }]
    );
}

#[tokio::test]
async fn test_set_patrol_overrides_channel() {
    let camera = controller(MockTransport::new());
    let route = PatrolRoute {
        channel: 9,
        id: 1,
        enable: true,
        running: false,
        name: "Yard".to_string(),
        preset: vec![PatrolStop {
            id: 2,
            dwell_time: 5,
            speed: 20,
        }],
    };
    camera.set_patrol(0, &route).await.unwrap();
    let payload = camera.transport().last_payload(Command::SetPtzPatrol).unwrap();
    assert_eq!(payload["PtzPatrol"]["channel"], json!(0));
    assert_eq!(payload["PtzPatrol"]["enable"], json!(1));
    assert_eq!(payload["PtzPatrol"]["preset"][0]["dwellTime"], json!(5));
}

// --- Pattern ---

#[tokio::test]
async fn test_pattern_roundtrip_through_device() {
    let transport = MockTransport::new().reply(
        Command::GetPtzTattern,
        json!({"PtzTattern": {"channel": 0, "track": [{"id": 1, "enable": 1, "name": "Sweep", "running": 0}]}}),
    );
    let camera = controller(transport);
    let tracks = camera.get_pattern(0).await.unwrap();
    assert_eq!(
        tracks,
        vec![PatternTrack {
            id: 1,
            enable: true,
            running: false,
            name: "Sweep".to_string()
        }]
    );

    camera.set_pattern(0, &tracks).await.unwrap();
    assert_eq!(
        camera.transport().last_payload(Command::SetPtzTattern),
        Some(json!({"PtzTattern": {"channel": 0, "track": [
            {"id": 1, "enable": 1, "running": 0, "name": "Sweep"}
        ]}}))
    );
}

// --- Focus ---

#[tokio::test]
async fn test_auto_focus_is_inverted_on_wire() {
    let transport = MockTransport::new().reply(Command::GetAutoFocus, json!({"AutoFocus": {"channel": 0, "disable": 1}}));
    let camera = controller(transport);
    assert!(!camera.get_auto_focus(0).await.unwrap());

    camera.set_auto_focus(0, true).await.unwrap();
    assert_eq!(
        camera.transport().last_payload(Command::SetAutoFocus),
        Some(json!({"AutoFocus": {"channel": 0, "disable": 0}}))
    );
}

#[tokio::test]
async fn test_zoom_focus() {
    let transport = MockTransport::new().reply(
        Command::GetZoomFocus,
        json!({"ZoomFocus": {"channel": 0, "zoom": {"pos": 7}, "focus": {"pos": 120}}}),
    );
    let camera = controller(transport);
    assert_eq!(
        camera.get_zoom_focus(0).await.unwrap(),
        ZoomFocus { zoom: 7, focus: 120 }
    );

    camera.start_zoom_focus(0, ZoomFocusOp::Focus, 90).await.unwrap();
    assert_eq!(
        camera.transport().last_payload(Command::StartZoomFocus),
        Some(json!({"ZoomFocus": {"channel": 0, "op": "FocusPos", "pos": 90}}))
    );
}

// --- Serial ---

#[tokio::test]
async fn test_ptz_serial() {
    let transport = MockTransport::new().reply(
        Command::GetPtzSerial,
        json!({"PtzSerial": {"baudRate": 9600, "channel": 0, "ctrlAddr": 1, "ctrlProtocol": "PELCO_P",
            "dataBit": "CS8", "flowCtrl": "none", "parity": "none", "stopBit": 1}}),
    );
    let camera = controller(transport);
    let serial = camera.get_ptz_serial(0).await.unwrap();
    assert_eq!(serial.baud_rate, 9600);
    assert_eq!(serial.ctrl_protocol, "PELCO_P");

    camera.set_ptz_serial(2, &serial).await.unwrap();
    let payload = camera.transport().last_payload(Command::SetPtzSerial).unwrap();
    assert_eq!(payload["PtzSerial"]["channel"], json!(2));
    assert_eq!(payload["PtzSerial"]["baudRate"], json!(9600));
}

// --- Masks ---

#[tokio::test]
async fn test_masks_roundtrip() {
    let transport = MockTransport::new().reply(
        Command::GetMask,
        json!({"Mask": {"channel": 0, "enable": 1, "area": [
            {"screen": {"width": 640, "height": 360}, "block": {"x": 1, "y": 2, "width": 30, "height": 40}}
        ]}}),
    );
    let camera = controller(transport);
    let config = camera.get_masks(0).await.unwrap();
    assert!(config.enable);
    assert_eq!(config.area, vec![MaskArea::new((640, 360), (1, 2, 30, 40))]);

    camera.set_masks(0, &config.area).await.unwrap();
    let payload = camera.transport().last_payload(Command::SetMask).unwrap();
    assert_eq!(payload["Mask"]["enable"], json!(1));
    assert_eq!(payload["Mask"]["area"][0]["block"]["width"], json!(30));
}

#[tokio::test]
async fn test_pass_through_errors_propagate() {
    let transport = MockTransport::new().fail(Command::GetPtzSerial, device_error(Command::GetPtzSerial, -9));
    let err = controller(transport).get_ptz_serial(0).await.unwrap_err();
    assert!(err.is_device_error());
    assert!(err.to_string().contains("Not supported"));
}

// --- Panorama ---

#[tokio::test]
async fn test_panorama_rejects_zero_tiles() {
    let snapshot = MockSnapshot::new(b"jpeg");
    let plan = PanoramaPlan {
        max_tiles: 0,
        columns: 3,
        rows: 1,
    };
    let err = build_panorama(0, &plan, &snapshot).await.unwrap_err();
    assert!(err.is_validation());
    assert_eq!(snapshot.captures(), 0);
}

#[tokio::test]
async fn test_panorama_captures_single_tile() {
    let snapshot = MockSnapshot::new(b"jpeg-bytes");
    let plan = PanoramaPlan {
        max_tiles: 8,
        columns: 4,
        rows: 2,
    };
    let capture = build_panorama(0, &plan, &snapshot).await.unwrap();
    assert_eq!(capture.tiles, 1);
    assert_eq!(capture.requested_tiles, 8);
    assert_eq!(capture.image, b"jpeg-bytes".to_vec());
    assert_eq!(snapshot.captures(), 1);
}
