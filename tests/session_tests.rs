use std::fs;
use std::path::PathBuf;

use chrono::{NaiveDate, NaiveDateTime};
use taskbot::{FileStore, ResponseKind, Session};

fn with_session<F>(f: F)
where
    F: FnOnce(&mut Session, PathBuf),
{
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tasks.txt");
    let mut session = Session::open(FileStore::new(&path));
    f(&mut session, path);
}

fn at(day: u32, hour: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 12, day).unwrap().and_hms_opt(hour, 0, 0).unwrap()
}

#[test]
fn test_add_and_list() {
    with_session(|session, _path| {
        assert!(!session.handle("todo read book").is_error());
        assert!(!session.handle("deadline report /by 2/12/2025 1800").is_error());

        let response = session.handle("list");
        assert_eq!(response.kind, ResponseKind::Normal);
        let task_lines: Vec<&str> = response.message.lines().skip(1).collect();
        assert_eq!(
            task_lines,
            ["1.[T][ ] read book", "2.[D][ ] report (by: Dec 2 2025, 18:00)"]
        );
    });
}

#[test]
fn test_add_responses_carry_count() {
    with_session(|session, _path| {
        let response = session.handle("event meeting /from 2/12/2025 1600 /to 2/12/2025 1800");
        assert!(response
            .message
            .contains("[E][ ] meeting (from: Dec 2 2025, 16:00 to: Dec 2 2025, 18:00)"));
        assert!(response.message.contains("Now you have 1 task(s)"));
    });
}

#[test]
fn test_mutations_are_saved() {
    with_session(|session, path| {
        session.handle("todo read book");
        session.handle("todo water plants");
        session.handle("mark 2");

        let saved = fs::read_to_string(&path).unwrap();
        assert_eq!(saved, "[T][ ] read book\n[T][X] water plants\n");

        let reopened = Session::open(FileStore::new(&path));
        assert_eq!(reopened.tasks(), session.tasks());
    });
}

#[test]
fn test_descriptions_with_markers_survive_reopen() {
    with_session(|session, path| {
        assert!(!session.handle("deadline reply (by: email) /by 2/12/2025 1800").is_error());
        assert!(!session
            .handle("event talk (from: home to: office) /from 3/12/2025 0900 /to 3/12/2025 1000")
            .is_error());
        assert!(!session.handle("todo later task").is_error());

        let mut reopened = Session::open(FileStore::new(&path));
        assert!(reopened.take_load_error().is_none());
        assert_eq!(reopened.tasks().count(), 3);
        assert_eq!(reopened.tasks().get(0).unwrap().description, "reply (by: email)");
        assert_eq!(reopened.tasks().get(0).unwrap().when(), Some(at(2, 18)));
        assert_eq!(reopened.tasks().get(1).unwrap().description, "talk (from: home to: office)");
        assert_eq!(reopened.tasks().get(2).unwrap().description, "later task");
        assert_eq!(reopened.tasks(), session.tasks());
    });
}

#[test]
fn test_queries_do_not_save() {
    with_session(|session, path| {
        session.handle("list");
        session.handle("find book");
        session.handle("todo");
        assert!(!path.exists());
    });
}

#[test]
fn test_index_bounds() {
    with_session(|session, _path| {
        for name in ["a", "b", "c"] {
            session.handle(&format!("todo {name}"));
        }
        for line in ["mark 0", "mark 999"] {
            let response = session.handle(line);
            assert!(response.is_error(), "{line}");
            assert!(response.message.contains("does not exist"), "{line}");
        }
        let response = session.handle("mark abc");
        assert!(response.is_error());
        assert!(response.message.contains("valid integer"));
    });
}

#[test]
fn test_mark_is_idempotent() {
    with_session(|session, _path| {
        session.handle("todo read book");
        session.handle("mark 1");
        let response = session.handle("mark 1");
        assert!(response.message.contains("[T][X] read book"));
        assert!(session.tasks().get(0).unwrap().done);

        session.handle("unmark 1");
        let response = session.handle("unmark 1");
        assert!(response.message.contains("[T][ ] read book"));
        assert!(!session.tasks().get(0).unwrap().done);
    });
}

#[test]
fn test_delete_task() {
    with_session(|session, _path| {
        session.handle("todo one");
        session.handle("todo two");
        let response = session.handle("delete 1");
        assert!(response.message.contains("[T][ ] one"));
        assert!(response.message.contains("Now you have 1 task(s)"));
        assert_eq!(session.tasks().get(0).unwrap().description, "two");
    });
}

#[test]
fn test_event_ending_before_start_is_rejected() {
    with_session(|session, path| {
        let response = session.handle("event party /from 3/12/2025 2000 /to 3/12/2025 1800");
        assert!(response.is_error());
        assert!(response.message.contains("cannot end before it starts"));
        assert!(session.tasks().is_empty());
        assert!(!path.exists());
    });
}

#[test]
fn test_bad_date_is_rejected() {
    with_session(|session, _path| {
        let response = session.handle("deadline report /by tomorrow");
        assert!(response.is_error());
        assert!(session.tasks().is_empty());
    });
}

#[test]
fn test_search_is_whole_word() {
    with_session(|session, _path| {
        session.handle("todo read book");
        session.handle("todo Book club");
        session.handle("todo buy bookcase");

        let response = session.handle("find book");
        assert!(response.message.contains("1.[T][ ] read book"));
        assert!(response.message.contains("2.[T][ ] Book club"));
        assert!(!response.message.contains("bookcase"));

        let response = session.handle("find piano");
        assert_eq!(response.message, "No matching tasks found.");
    });
}

#[test]
fn test_free_time() {
    with_session(|session, _path| {
        session.handle("event standup /from 2/12/2025 1000 /to 2/12/2025 1100");
        session.handle("event review /from 2/12/2025 1200 /to 2/12/2025 1500");

        let response = session.handle_at("free /duration 2", at(2, 9));
        assert_eq!(
            response.message,
            "Your next available free time slot is [Dec 2 2025, 15:00, Dec 2 2025, 17:00)."
        );

        let response = session.handle_at("free /duration 1", at(2, 9));
        assert!(response.message.contains("[Dec 2 2025, 09:00, Dec 2 2025, 10:00)"));

        let response = session.handle_at("free /duration 0", at(2, 9));
        assert!(response.is_error());
    });
}

#[test]
fn test_unknown_and_exit() {
    with_session(|session, _path| {
        let response = session.handle("sing a song");
        assert!(response.is_error());
        assert!(response.message.contains("don't know what"));

        let response = session.handle("bye");
        assert_eq!(response.kind, ResponseKind::Exit);
        assert_eq!(response.message, "Bye. Hope to see you again soon!");
    });
}

#[test]
fn test_corrupt_file_loads_prefix_and_reports_once() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tasks.txt");
    fs::write(&path, "[T][ ] kept\n[Q] broken\n[T][ ] lost\n").unwrap();

    let mut session = Session::open(FileStore::new(&path));
    assert_eq!(session.tasks().count(), 1);

    let message = session.take_load_error().unwrap();
    assert!(message.starts_with("LOADING ERROR"));
    assert!(message.contains("line 2"));
    assert!(session.take_load_error().is_none());

    assert!(!session.handle("list").is_error());
}

#[test]
fn test_save_failure_does_not_interrupt() {
    let dir = tempfile::tempdir().unwrap();
    // a directory cannot be written as a file
    let mut session = Session::open(FileStore::new(dir.path()));
    session.take_load_error();

    let response = session.handle("todo still works");
    assert_eq!(response.kind, ResponseKind::Normal);
    assert_eq!(session.tasks().count(), 1);
    assert!(!session.handle("list").is_error());
}
