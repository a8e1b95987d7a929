use super::*;

#[test]
fn segment_ends_exactly_at_end_time() {
    assert_eq!(segment_times(0, 100, 10), (1..=10).map(|i| i * 10).collect::<Vec<_>>());
    assert_eq!(segment_times(20, 27, 16), vec![27]);
}

#[test]
fn short_segment_still_gets_one_sample() {
    assert_eq!(segment_times(5, 6, 16), vec![6]);
    assert_eq!(step_count(1, 16), 1);
}

#[test]
fn equidistant_tie_favours_more_events() {
    // 15ms at a 10ms period is 1.5 steps, which rounds to 2.
    assert_eq!(segment_times(0, 15, 10), vec![8, 15]);
    assert_eq!(step_count(25, 10), 3);
}

#[test]
fn swipe_times_without_key_times() {
    let times = swipe_times(200, &[], 16).unwrap();
    assert_eq!(times.len(), 13);
    assert_eq!(times.last(), Some(&200));
    assert!(times.windows(2).all(|pair| pair[0] < pair[1]));
}

#[test]
fn swipe_times_include_every_key_time() {
    let key_times = [3, 50, 50, 99, 100];
    let times = swipe_times(100, &key_times, 16).unwrap();
    for key_time in key_times {
        assert!(times.contains(&key_time), "{key_time} missing from {times:?}");
    }
    assert!(times.windows(2).all(|pair| pair[0] < pair[1]));
    assert_eq!(times.last(), Some(&100));
}

#[test]
fn zero_key_time_adds_nothing() {
    assert_eq!(
        swipe_times(100, &[0], 10).unwrap(),
        swipe_times(100, &[], 10).unwrap()
    );
}

#[test]
fn invalid_durations_and_key_times() {
    assert!(swipe_times(0, &[], 10).unwrap_err().is_illegal_argument());
    assert!(swipe_times(-5, &[], 10).unwrap_err().is_illegal_argument());
    assert!(swipe_times(100, &[101], 10).unwrap_err().is_illegal_argument());
    assert!(swipe_times(100, &[-1], 10).unwrap_err().is_illegal_argument());
    let error = swipe_times(100, &[50, 20], 10).unwrap_err();
    assert!(error.message().contains("sorted"), "{error}");
}

#[test]
fn lerp_time_rounds_to_nearest() {
    assert_eq!(lerp_time(0, 15, 0.5), 8);
    assert_eq!(lerp_time(10, 20, 0.0), 10);
    assert_eq!(lerp_time(10, 20, 1.0), 20);
    assert_eq!(lerp_time(0, 100, 1.0 / 3.0), 33);
}

#[test]
fn scroll_steps_add_up_to_amount() {
    let steps = scroll_steps(1000.0, 300, 16);
    assert_eq!(steps.len(), 19);
    let total_delay: i64 = steps.iter().map(|step| step.delay_millis).sum();
    assert_eq!(total_delay, 300);
    let total: f32 = steps.iter().map(|step| step.delta).sum();
    assert!((total - 1000.0).abs() < 1e-2, "total was {total}");
}

#[test]
fn scroll_steps_negative_amount() {
    let steps = scroll_steps(-50.0, 20, 10);
    assert_eq!(steps.len(), 2);
    assert_eq!(steps[0].delay_millis, 10);
    assert!((steps[0].delta + 25.0).abs() < 1e-4);
    assert!((steps[1].delta + 25.0).abs() < 1e-4);
}
