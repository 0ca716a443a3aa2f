use super::*;

fn fps(n: u32) -> Fps {
    Fps::new(n, 1).unwrap()
}

#[test]
fn offline_scheduler_counts_up_to_the_end() {
    let mut s = OfflineScheduler::new(3);
    let got: Vec<u64> = std::iter::from_fn(|| s.next_frame()).map(|f| f.0).collect();
    assert_eq!(got, vec![0, 1, 2]);
    assert_eq!(s.next_frame(), None);
}

#[test]
fn unbounded_scheduler_keeps_going() {
    let mut s = OfflineScheduler::unbounded();
    for i in 0..1000 {
        assert_eq!(s.next_frame(), Some(FrameIndex(i)));
    }
}

#[test]
fn paced_scheduler_sleeps_one_period_per_tick() {
    let mut s = PacedScheduler::new(ManualClock::new(), fps(50), Some(5));
    let period = s.period();
    assert_eq!(period, Duration::from_millis(20));

    while s.next_frame().is_some() {}
    // The first tick runs immediately, each later one waits a full period.
    assert_eq!(s.clock().slept(), period * 4);
    assert_eq!(s.late_ticks(), 0);
}

#[test]
fn work_between_ticks_shortens_the_wait() {
    let mut s = PacedScheduler::new(ManualClock::new(), fps(50), None);
    s.next_frame();
    s.clock().advance(Duration::from_millis(15));
    s.next_frame();
    assert_eq!(s.clock().slept(), Duration::from_millis(5));
}

#[test]
fn late_ticks_reanchor_instead_of_bursting() {
    let mut s = PacedScheduler::new(ManualClock::new(), fps(50), None);
    s.next_frame();
    // Stall for five periods.
    s.clock().advance(Duration::from_millis(100));
    assert_eq!(s.next_frame(), Some(FrameIndex(1)));
    assert_eq!(s.late_ticks(), 1);
    assert_eq!(s.clock().slept(), Duration::ZERO);

    // The following tick is paced from the new anchor.
    assert_eq!(s.next_frame(), Some(FrameIndex(2)));
    assert_eq!(s.clock().slept(), Duration::from_millis(20));
}
