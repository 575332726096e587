use chrono::{Duration, NaiveDate, NaiveDateTime};
use taskbot::scheduler::{busy_ranges, find_free_slot, TimeRange};
use taskbot::{Task, TaskList};

fn h(hour: u32, minute: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 12, 2).unwrap().and_hms_opt(hour, minute, 0).unwrap()
}

fn events(spans: &[(u32, u32)]) -> TaskList {
    spans
        .iter()
        .enumerate()
        .map(|(i, &(from, to))| Task::event(format!("event {i}"), h(from, 0), h(to, 0)).unwrap())
        .collect()
}

#[test]
fn test_busy_ranges_merge_overlaps() {
    let mut tasks = events(&[(6, 8), (1, 3), (2, 4)]);
    tasks.add(Task::todo("not an event"));
    tasks.add(Task::deadline("neither", h(5, 0)));

    assert_eq!(
        busy_ranges(&tasks),
        vec![TimeRange::new(h(1, 0), h(4, 0)), TimeRange::new(h(6, 0), h(8, 0))]
    );
    assert!(busy_ranges(&TaskList::new()).is_empty());
}

#[test]
fn test_free_slot_starts_now_without_future_events() {
    let now = h(9, 0);
    let slot = find_free_slot(&TaskList::new(), now, 2.0).unwrap();
    assert_eq!(slot, TimeRange::new(now, h(11, 0)));

    // ongoing and past events do not count
    let tasks = events(&[(7, 8), (8, 12)]);
    assert_eq!(find_free_slot(&tasks, now, 2.0).unwrap().start, now);

    // an event starting exactly now is not in the future either
    let tasks = events(&[(9, 10)]);
    assert_eq!(find_free_slot(&tasks, now, 2.0).unwrap().start, now);
}

#[test]
fn test_free_slot_takes_first_gap_that_fits() {
    let tasks = events(&[(10, 11), (14, 15)]);
    assert_eq!(
        find_free_slot(&tasks, h(8, 0), 3.0).unwrap(),
        TimeRange::new(h(11, 0), h(14, 0))
    );
    assert_eq!(
        find_free_slot(&tasks, h(8, 0), 2.0).unwrap(),
        TimeRange::new(h(8, 0), h(10, 0))
    );
}

#[test]
fn test_free_slot_after_last_event() {
    let tasks = events(&[(10, 12), (13, 15)]);
    assert_eq!(
        find_free_slot(&tasks, h(9, 0), 2.0).unwrap(),
        TimeRange::new(h(15, 0), h(17, 0))
    );
}

#[test]
fn test_free_slot_ignores_nested_event_end() {
    let tasks = events(&[(1, 10), (2, 3)]);
    let slot = find_free_slot(&tasks, h(0, 0), 5.0).unwrap();
    assert_eq!(slot.start, h(10, 0));
}

#[test]
fn test_free_slot_fractional_hours() {
    let tasks = events(&[(10, 11)]);
    let slot = find_free_slot(&tasks, h(9, 0), 1.5).unwrap();
    assert_eq!(slot, TimeRange::new(h(11, 0), h(12, 30)));
}

#[test]
fn test_free_slot_never_starts_before_now() {
    let tasks = events(&[(1, 3), (2, 4), (6, 8), (9, 9), (12, 20)]);
    for hour in 0..23 {
        for minute in [0, 30] {
            let now = h(hour, minute);
            for hours in [0.5, 1.0, 2.0, 5.0] {
                let slot = find_free_slot(&tasks, now, hours).unwrap();
                assert!(slot.start >= now, "now={now} hours={hours}");
                assert_eq!(slot.end - slot.start, Duration::minutes((hours * 60.0) as i64));
            }
        }
    }
}
