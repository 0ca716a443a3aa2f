use super::*;

#[test]
fn parses_events_and_groups_by_tick() {
    let json = r#"
{
  "events": [
    { "tick": 3, "event": { "type": "move", "x": 10, "y": 20 } },
    { "tick": 0, "event": { "type": "touch_start" } },
    { "tick": 3, "event": { "type": "leave" } },
    { "tick": 9, "event": { "type": "resize", "width": 640, "height": 480 } }
  ]
}
"#;
    let script = EventScript::from_json_str(json).unwrap();
    assert_eq!(script.len(), 4);
    assert_eq!(script.last_tick(), Some(9));
    assert_eq!(script.events_at(0), &[InputEvent::TouchStart]);
    assert_eq!(
        script.events_at(3),
        &[InputEvent::Move { x: 10.0, y: 20.0 }, InputEvent::Leave]
    );
    assert!(script.events_at(4).is_empty());
    assert!(script.has_resize());
    assert_eq!(
        script.events_at(9),
        &[InputEvent::Resize {
            width: 640,
            height: 480
        }]
    );
}

#[test]
fn unknown_fields_and_event_types_are_rejected() {
    assert!(EventScript::from_json_str(r#"{ "events": [], "extra": 1 }"#).is_err());
    assert!(
        EventScript::from_json_str(r#"{ "events": [ { "tick": 0, "event": { "type": "click" } } ] }"#)
            .is_err()
    );
}

#[test]
fn serializes_in_tick_order() {
    let mut script = EventScript::new();
    script.push(5, InputEvent::Leave);
    script.push(1, InputEvent::TouchEnd);
    let v = serde_json::to_value(&script).unwrap();
    assert_eq!(v["events"][0]["tick"], 1);
    assert_eq!(v["events"][1]["event"]["type"], "leave");

    let back: EventScript = serde_json::from_value(v).unwrap();
    assert_eq!(back, script);
}

#[test]
fn horizontal_sweep_crosses_the_surface_then_leaves() {
    let script = EventScript::horizontal_sweep(SurfaceSize::new(200, 100), 5);
    assert_eq!(script.len(), 5);
    assert_eq!(script.events_at(0), &[InputEvent::Move { x: 0.0, y: 50.0 }]);
    assert_eq!(script.events_at(3), &[InputEvent::Move { x: 200.0, y: 50.0 }]);
    assert_eq!(script.events_at(4), &[InputEvent::Leave]);
    assert_eq!(script.last_tick(), Some(4));
    assert!(!script.has_resize());
    assert!(EventScript::horizontal_sweep(SurfaceSize::new(0, 100), 5).is_empty());
}

#[test]
fn short_sweeps_still_leave_within_their_ticks() {
    let two = EventScript::horizontal_sweep(SurfaceSize::new(200, 100), 2);
    assert_eq!(two.events_at(0), &[InputEvent::Move { x: 100.0, y: 50.0 }]);
    assert_eq!(two.events_at(1), &[InputEvent::Leave]);

    let one = EventScript::horizontal_sweep(SurfaceSize::new(200, 100), 1);
    assert_eq!(one.events_at(0), &[InputEvent::Leave]);
    assert_eq!(one.last_tick(), Some(0));
}
