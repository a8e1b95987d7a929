//! Assertion utilities for input tests
//!
//! Helpers for checking recorded events. They panic with a descriptive
//! message, so they are meant for test code only.

use crate::event::{EventAction, InjectedEvent, MouseButtons, PointerId, PointerType, PrimitiveEvent};
use cranpose_ui_graphics::Point;

/// Assert that a value is within `tolerance` of the expected value.
pub fn assert_approx_eq(actual: f32, expected: f32, tolerance: f32, msg: &str) {
    let diff = (actual - expected).abs();
    assert!(
        diff <= tolerance,
        "{}: expected {} (±{}), got {} (diff: {})",
        msg,
        expected,
        tolerance,
        actual,
        diff
    );
}

pub fn assert_point_approx_eq(actual: Point, expected: Point, tolerance: f32, msg: &str) {
    assert_approx_eq(actual.x, expected.x, tolerance, &format!("{} - x", msg));
    assert_approx_eq(actual.y, expected.y, tolerance, &format!("{} - y", msg));
}

/// Assert that event times never decrease and that every pointer event's
/// history is ordered and older than the event itself.
pub fn assert_has_valid_event_times(events: &[InjectedEvent]) {
    let mut previous = i64::MIN;
    for (index, event) in events.iter().enumerate() {
        let time = event.event_time();
        assert!(
            time >= previous,
            "event {} at {}ms is earlier than the previous event at {}ms",
            index,
            time,
            previous
        );
        if let InjectedEvent::Pointer(pointer) = event {
            let mut sample_time = previous;
            for sample in &pointer.history {
                assert!(
                    sample.event_time >= sample_time && sample.event_time < time,
                    "event {}: historical sample at {}ms is outside ({}ms, {}ms)",
                    index,
                    sample.event_time,
                    sample_time,
                    time
                );
                sample_time = sample.event_time;
            }
        }
        previous = time;
    }
}

/// Assert the shape of a touch event.
pub fn verify_touch_event(
    event: &PrimitiveEvent,
    expected_pointer_count: usize,
    expected_action: EventAction,
    expected_action_index: usize,
    expected_event_time: i64,
    expected_pointer_type: PointerType,
) {
    assert_eq!(
        event.pointer_count(),
        expected_pointer_count,
        "pointer count of {:?}",
        event
    );
    assert_eq!(event.action, expected_action, "action of {:?}", event);
    assert_eq!(
        event.action_index, expected_action_index,
        "action index of {:?}",
        event
    );
    assert_eq!(
        event.event_time, expected_event_time,
        "event time of {:?}",
        event
    );
    assert_eq!(
        event.pointer_type, expected_pointer_type,
        "pointer type of {:?}",
        event
    );
}

/// Assert that the pointer at `index` has the given id and position.
pub fn verify_touch_pointer(
    event: &PrimitiveEvent,
    index: usize,
    expected_id: PointerId,
    expected_position: Point,
) {
    let pointer = event
        .pointers
        .get(index)
        .unwrap_or_else(|| panic!("no pointer at index {} in {:?}", index, event));
    assert_eq!(pointer.id, expected_id, "id of pointer {}", index);
    assert_point_approx_eq(
        pointer.position,
        expected_position,
        1e-3,
        &format!("position of pointer {}", index),
    );
}

/// Assert the shape of a mouse event.
pub fn verify_mouse_event(
    event: &PrimitiveEvent,
    expected_event_time: i64,
    expected_action: EventAction,
    expected_position: Point,
    expected_buttons: MouseButtons,
) {
    assert_eq!(
        event.pointer_type,
        PointerType::Mouse,
        "pointer type of {:?}",
        event
    );
    assert_eq!(
        event.event_time, expected_event_time,
        "event time of {:?}",
        event
    );
    assert_eq!(event.action, expected_action, "action of {:?}", event);
    let position = event
        .position()
        .unwrap_or_else(|| panic!("mouse event without a pointer: {:?}", event));
    assert_point_approx_eq(position, expected_position, 1e-3, "mouse position");
    assert_eq!(event.buttons, expected_buttons, "buttons of {:?}", event);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn approx_eq_accepts_values_within_tolerance() {
        assert_approx_eq(10.05, 10.0, 0.1, "value");
        assert_point_approx_eq(Point::new(1.0, 2.0), Point::new(1.01, 1.99), 0.02, "point");
    }

    #[test]
    #[should_panic(expected = "value: expected 10")]
    fn approx_eq_rejects_values_outside_tolerance() {
        assert_approx_eq(10.5, 10.0, 0.1, "value");
    }
}
