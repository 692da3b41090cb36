use std::sync::mpsc;
use std::time::{Duration, Instant};

use chrono::NaiveDate;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use fitpro::app::{App, View};
use fitpro::runtime::{FitEvent, FrameTicker, Runner, TestEventSource};
use fitpro::storage::{DataDir, DocumentStore};

fn key(code: KeyCode) -> FitEvent {
    FitEvent::Key(KeyEvent::new(code, KeyModifiers::NONE))
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 10).unwrap()
}

// Headless integration using the runtime + App without a TTY.
// Each frame advances a simulated clock by one second.
#[test]
fn headless_session_runs_to_completion() {
    let dir = tempfile::tempdir().unwrap();
    let data = DataDir::new(dir.path());
    data.seed_defaults().unwrap();
    let mut app = App::load(data);

    let (tx, rx) = mpsc::channel();
    let runner = Runner::new(TestEventSource::new(rx), FrameTicker::from_millis(1));

    // pick the second duration of the first program (30 s), then start
    tx.send(key(KeyCode::Right)).unwrap();
    tx.send(key(KeyCode::Enter)).unwrap();

    let mut clock = Instant::now();
    for _ in 0..200u32 {
        match runner.step() {
            FitEvent::Key(k) => app.handle_key(k, clock, today()),
            FitEvent::Resize => {}
            FitEvent::Frame => {
                clock += Duration::from_secs(1);
                app.on_frame(clock, today());
            }
        }
        if matches!(app.view, View::Completed(_)) {
            break;
        }
    }

    let View::Completed(done) = &app.view else {
        panic!("session did not complete: {:?}", app.view);
    };
    assert_eq!(done.workout.elapsed_seconds, 30);
    assert_eq!(done.workout.duration_label, "30 sec");

    let stored = DataDir::new(dir.path()).progress().load().unwrap();
    assert_eq!(stored.stats.total_workouts, 1);
    assert_eq!(stored.stats.total_calories, 40);
    assert_eq!(stored.stats.last_workout_date, Some(today()));
    assert_eq!(stored.workout_counts.get("HIIT"), Some(&1));
}

#[test]
fn headless_pause_holds_the_clock() {
    let dir = tempfile::tempdir().unwrap();
    let data = DataDir::new(dir.path());
    data.seed_defaults().unwrap();
    let mut app = App::load(data);

    let start = Instant::now();
    app.handle_key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE), start, today());
    app.on_frame(start + Duration::from_millis(5_500), today());
    app.handle_key(
        KeyEvent::new(KeyCode::Char(' '), KeyModifiers::NONE),
        start + Duration::from_millis(5_500),
        today(),
    );

    // an hour passes while paused
    app.on_frame(start + Duration::from_secs(3_600), today());
    let View::Session(session) = &app.view else {
        panic!("expected an active session");
    };
    assert_eq!(session.timer.elapsed_seconds(), 5);
    assert!(!session.timer.is_running());

    // the half second left before the pause counts after resuming
    let resumed = start + Duration::from_secs(3_600);
    app.handle_key(KeyEvent::new(KeyCode::Char(' '), KeyModifiers::NONE), resumed, today());
    app.on_frame(resumed + Duration::from_millis(600), today());
    let View::Session(session) = &app.view else {
        panic!("expected an active session");
    };
    assert_eq!(session.timer.elapsed_seconds(), 6);
}
