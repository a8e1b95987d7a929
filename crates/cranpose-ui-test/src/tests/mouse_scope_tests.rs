use crate::assertions::{assert_approx_eq, verify_mouse_event};
use crate::config::InjectionConfig;
use crate::coordinates::NodeTransform;
use crate::dispatcher::InputDispatcher;
use crate::error::Result;
use crate::event::{EventAction, MouseButton, MouseButtons, PointerType, PrimitiveEvent, ScrollWheel};
use crate::injection::{InjectionScope, MouseInjectionScope};
use crate::input_constants::DEFAULT_MOUSE_GESTURE_DURATION_MILLIS;
use crate::rule::create_headless_input_test;
use cranpose_ui_graphics::{Point, Size};

fn count(events: &[PrimitiveEvent], action: EventAction) -> usize {
    events.iter().filter(|event| event.action == action).count()
}

fn actions(events: &[PrimitiveEvent]) -> Vec<EventAction> {
    events.iter().map(|event| event.action).collect()
}

#[test]
fn click_presses_for_sixty_millis() {
    let (mut rule, recorder) = create_headless_input_test(100, 100).unwrap();
    let position = Point::new(10.0, 10.0);
    let primary = MouseButtons::NONE.with(MouseButton::Primary);

    rule.perform_mouse_input(|mouse| mouse.click(position))
        .unwrap();
    let events = recorder.pointer_events();

    assert_eq!(events.len(), 6);
    verify_mouse_event(&events[0], 0, EventAction::Down, position, primary);
    verify_mouse_event(&events[1], 0, EventAction::ButtonPress, position, primary);
    verify_mouse_event(&events[2], 60, EventAction::ButtonRelease, position, MouseButtons::NONE);
    verify_mouse_event(&events[3], 60, EventAction::Up, position, MouseButtons::NONE);
    assert_eq!(events[4].action, EventAction::HoverEnter);
    assert_eq!(events[5].action, EventAction::HoverMove);
}

#[test]
fn right_click_uses_secondary_button() {
    let (mut rule, recorder) = create_headless_input_test(100, 100).unwrap();

    rule.perform_mouse_input(|mouse| mouse.right_click(Point::new(10.0, 10.0)))
        .unwrap();
    let events = recorder.pointer_events();

    assert_eq!(events[1].action_button, Some(MouseButton::Secondary));
    assert_eq!(events[2].action_button, Some(MouseButton::Secondary));
}

#[test]
fn double_and_triple_click_timing() {
    let (mut rule, recorder) = create_headless_input_test(100, 100).unwrap();

    rule.perform_mouse_input(|mouse| mouse.triple_click(Point::new(10.0, 10.0)))
        .unwrap();
    let downs: Vec<_> = recorder
        .pointer_events()
        .iter()
        .filter(|event| event.action == EventAction::Down)
        .map(|event| event.event_time)
        .collect();

    // 60ms press, then the 170ms double tap midpoint between clicks
    assert_eq!(downs, vec![0, 230, 460]);
}

#[test]
fn second_click_ends_hover_first() {
    let (mut rule, recorder) = create_headless_input_test(100, 100).unwrap();

    rule.perform_mouse_input(|mouse| mouse.double_click(Point::new(10.0, 10.0)))
        .unwrap();
    let events = recorder.pointer_events();

    assert_eq!(events[6].action, EventAction::HoverExit);
    assert_eq!(events[7].action, EventAction::Down);
    assert_eq!(events[7].event_time, 230);
}

#[test]
fn long_click_holds_past_timeout() {
    let (mut rule, recorder) = create_headless_input_test(100, 100).unwrap();

    rule.perform_mouse_input(|mouse| mouse.long_click(Point::new(10.0, 10.0)))
        .unwrap();
    let events = recorder.pointer_events();

    let up = events
        .iter()
        .find(|event| event.action == EventAction::Up)
        .unwrap();
    assert_eq!(up.event_time, 600);
}

#[test]
fn click_outside_root_is_rejected() {
    let (mut rule, recorder) = create_headless_input_test(100, 100).unwrap();

    let error = rule
        .perform_mouse_input(|mouse| mouse.click(Point::new(150.0, 150.0)))
        .unwrap_err();

    assert!(error.is_illegal_state());
    assert!(recorder.is_empty());
    assert_eq!(rule.current_time(), 0);
}

#[test]
fn animate_to_hovers_along_the_line() {
    let (mut rule, recorder) = create_headless_input_test(100, 100).unwrap();

    rule.perform_mouse_input(|mouse| {
        mouse.animate_to(Point::new(50.0, 0.0), DEFAULT_MOUSE_GESTURE_DURATION_MILLIS)
    })
        .unwrap();
    let events = recorder.pointer_events();

    // round(300 / 16) = 19 samples
    assert_eq!(count(&events, EventAction::HoverEnter), 1);
    assert_eq!(count(&events, EventAction::HoverMove), 19);
    let last = &events[events.len() - 1];
    verify_mouse_event(
        last,
        300,
        EventAction::HoverMove,
        Point::new(50.0, 0.0),
        MouseButtons::NONE,
    );
}

#[test]
fn animate_along_jumps_to_curve_start() {
    let (mut rule, recorder) = create_headless_input_test(100, 100).unwrap();

    rule.perform_mouse_input(|mouse| {
        mouse.animate_along(|time| Point::new(20.0 + time as f32 / 10.0, 20.0), 100)
    })
    .unwrap();
    let events = recorder.pointer_events();

    assert_eq!(events[0].action, EventAction::HoverEnter);
    assert_eq!(events[0].event_time, 0);
    assert_eq!(events[0].position(), Some(Point::new(20.0, 20.0)));
}

#[test]
fn animation_needs_positive_duration() {
    let (mut rule, recorder) = create_headless_input_test(100, 100).unwrap();

    let error = rule
        .perform_mouse_input(|mouse| mouse.animate_to(Point::new(50.0, 0.0), 0))
        .unwrap_err();

    assert!(error.is_illegal_argument());
    assert!(recorder.is_empty());
}

#[test]
fn drag_and_drop_moves_with_button_pressed() {
    let (mut rule, recorder) = create_headless_input_test(100, 100).unwrap();

    rule.perform_mouse_input(|mouse| {
        mouse.drag_and_drop(
            Point::new(10.0, 10.0),
            Point::new(60.0, 10.0),
            DEFAULT_MOUSE_GESTURE_DURATION_MILLIS,
        )
    })
    .unwrap();
    let events = recorder.pointer_events();

    assert_eq!(
        actions(&events[..2]),
        vec![EventAction::Down, EventAction::ButtonPress]
    );
    let moves: Vec<_> = events
        .iter()
        .filter(|event| event.action == EventAction::Move)
        .collect();
    assert_eq!(moves.len(), 19);
    assert!(moves
        .iter()
        .all(|event| event.buttons.contains(MouseButton::Primary)));
    assert_eq!(
        actions(&events[events.len() - 4..]),
        vec![
            EventAction::ButtonRelease,
            EventAction::Up,
            EventAction::HoverEnter,
            EventAction::HoverMove
        ]
    );
    assert_eq!(events[events.len() - 1].event_time, 300);
}

#[test]
fn smooth_scroll_adds_up_to_amount() {
    let (mut rule, recorder) = create_headless_input_test(100, 100).unwrap();

    rule.perform_mouse_input(|mouse| mouse.smooth_scroll(100.0, 160, ScrollWheel::Vertical))
        .unwrap();
    let scrolls: Vec<_> = recorder
        .pointer_events()
        .into_iter()
        .filter(|event| event.action == EventAction::Scroll)
        .collect();

    assert_eq!(scrolls.len(), 10);
    assert_eq!(scrolls[9].event_time, 160);
    let total: f32 = scrolls
        .iter()
        .filter_map(|event| event.scroll)
        .map(|scroll| scroll.delta)
        .sum();
    assert_approx_eq(total, 100.0, 1e-3, "scrolled amount");
}

#[test]
fn enter_and_exit_need_matching_hover_state() {
    let (mut rule, recorder) = create_headless_input_test(100, 100).unwrap();

    rule.perform_mouse_input(|mouse| {
        mouse.enter(Point::new(10.0, 10.0), 0)?;
        mouse.exit(Point::new(150.0, 10.0), 16)
    })
    .unwrap();
    let error = rule
        .perform_mouse_input(|mouse| mouse.exit(Point::new(150.0, 10.0), 16))
        .unwrap_err();

    assert!(error.is_illegal_state());
    assert_eq!(
        recorder.actions(),
        vec![EventAction::HoverEnter, EventAction::HoverExit]
    );
    assert_eq!(rule.current_time(), 16);
}

#[test]
fn cancel_without_buttons_keeps_time() {
    let (mut rule, _recorder) = create_headless_input_test(100, 100).unwrap();

    let error = rule
        .perform_mouse_input(|mouse| mouse.cancel(100))
        .unwrap_err();

    assert!(error.is_illegal_state());
    assert_eq!(rule.current_time(), 0);
}

#[test]
fn cursor_position_survives_between_gestures() {
    let (mut rule, _recorder) = create_headless_input_test(100, 100).unwrap();

    rule.perform_mouse_input(|mouse| mouse.move_to(Point::new(30.0, 40.0), 0))
        .unwrap();
    let position = rule
        .perform_mouse_input(|mouse| {
            mouse.move_by(Point::new(5.0, 5.0), 16)?;
            Ok(mouse.current_position())
        })
        .unwrap();

    assert_eq!(position, Point::new(35.0, 45.0));
}

#[test]
fn mouse_after_touch_cancels_the_touch_gesture() {
    let (mut rule, recorder) = create_headless_input_test(100, 100).unwrap();

    rule.perform_multi_modal_input(|input| {
        input.touch().down(0, Point::new(5.0, 5.0))?;
        input.mouse().move_to(Point::new(10.0, 10.0), 16)
    })
    .unwrap();
    let events = recorder.pointer_events();

    assert_eq!(
        actions(&events),
        vec![
            EventAction::Down,
            EventAction::Cancel,
            EventAction::HoverEnter,
            EventAction::HoverMove
        ]
    );
    assert_eq!(events[1].pointer_type, PointerType::Touch);
    assert_eq!(events[1].event_time, 16);
}

type MouseOp = fn(&mut MouseInjectionScope<'_>) -> Result<()>;

fn assert_rejected_without_effect(dispatcher: &mut InputDispatcher, cases: &[(&str, MouseOp)]) {
    let mapper = NodeTransform::covering(Size::new(100.0, 100.0));
    let state = dispatcher.mouse_state().clone();
    let pending = dispatcher.pending_events().to_vec();
    let time = dispatcher.current_time();
    for (name, operation) in cases {
        let error = operation(&mut MouseInjectionScope::new(&mut *dispatcher, &mapper)).unwrap_err();
        assert!(error.is_illegal_argument(), "{name}: {error}");
        assert_eq!(dispatcher.mouse_state(), &state, "{name} changed the mouse");
        assert_eq!(dispatcher.pending_events(), &pending[..], "{name} enqueued events");
        assert_eq!(dispatcher.current_time(), time, "{name} moved the clock");
    }
}

fn mouse_dispatcher() -> InputDispatcher {
    InputDispatcher::new(InjectionConfig::for_root_size(Size::new(100.0, 100.0))).unwrap()
}

#[test]
fn rejected_delays_leave_the_mouse_untouched() {
    let idle_cases: [(&str, MouseOp); 2] = [
        ("enter", |mouse: &mut MouseInjectionScope<'_>| {
            mouse.enter(Point::new(10.0, 10.0), -1)
        }),
        ("move_to", |mouse: &mut MouseInjectionScope<'_>| {
            mouse.move_to(Point::new(10.0, 10.0), -1)
        }),
    ];
    let hovering_cases: [(&str, MouseOp); 2] = [
        ("exit", |mouse: &mut MouseInjectionScope<'_>| {
            mouse.exit(Point::new(150.0, 10.0), -1)
        }),
        ("move_by", |mouse: &mut MouseInjectionScope<'_>| {
            mouse.move_by(Point::new(5.0, 0.0), -1)
        }),
    ];
    let pressed_cases: [(&str, MouseOp); 3] = [
        ("cancel", |mouse: &mut MouseInjectionScope<'_>| mouse.cancel(-1)),
        ("cancel overflow", |mouse: &mut MouseInjectionScope<'_>| {
            mouse.cancel(i64::MAX)
        }),
        ("advance_event_time", |mouse: &mut MouseInjectionScope<'_>| {
            mouse.advance_event_time(i64::MAX)
        }),
    ];

    let mut idle = mouse_dispatcher();
    assert_rejected_without_effect(&mut idle, &idle_cases);

    let mut hovering = mouse_dispatcher();
    hovering.enqueue_mouse_enter(Point::new(10.0, 10.0)).unwrap();
    assert_rejected_without_effect(&mut hovering, &hovering_cases);

    let mut pressed = mouse_dispatcher();
    pressed.update_mouse_position(Point::new(10.0, 10.0));
    pressed.enqueue_mouse_press(MouseButton::Primary).unwrap();
    pressed.advance_event_time(5).unwrap();
    assert_rejected_without_effect(&mut pressed, &pressed_cases);
}
