use chrono::NaiveDate;
use fitpro::catalog::WorkoutCatalog;
use fitpro::ledger::ProgressLedger;
use fitpro::storage::{DataDir, DocumentStore, PROGRESS_FILE};

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

// A week of completions persisted through the file store one at a time,
// the way the app saves after every finished session.
#[test]
fn streaks_survive_reloads() {
    let dir = tempfile::tempdir().unwrap();
    let data = DataDir::new(dir.path());
    data.seed_defaults().unwrap();

    let catalog: WorkoutCatalog = data.catalog().load().unwrap();
    let (_, hiit) = catalog.get_index(0).unwrap();
    let option = &hiit.durations[0];

    let days = ["2024-05-01", "2024-05-02", "2024-05-03", "2024-05-05", "2024-05-06"];
    for day in days {
        let mut ledger: ProgressLedger = data.progress().load().unwrap();
        ledger.apply_completion(hiit.completion(option, option.time as u32), date(day));
        data.progress().save(&ledger).unwrap();
    }

    let ledger = data.progress().load().unwrap();
    assert_eq!(ledger.stats.total_workouts, 5);
    assert_eq!(ledger.stats.streak, 2);
    assert_eq!(ledger.stats.best_streak, 3);
    assert_eq!(ledger.stats.last_workout_date, Some(date("2024-05-06")));
    assert_eq!(ledger.history.len(), 5);
    assert_eq!(ledger.workout_counts.get("HIIT"), Some(&5));
    assert_eq!(ledger.stats.total_calories, 5 * option.calories);
}

#[test]
fn stored_progress_uses_documented_keys() {
    let dir = tempfile::tempdir().unwrap();
    let data = DataDir::new(dir.path());
    data.seed_defaults().unwrap();

    let catalog = data.catalog().load().unwrap();
    let (_, program) = catalog.get_index(1).unwrap();
    let mut ledger = data.progress().load().unwrap();
    ledger.apply_completion(program.completion(&program.durations[0], 60), date("2024-02-29"));
    data.progress().save(&ledger).unwrap();

    let raw = std::fs::read_to_string(dir.path().join(PROGRESS_FILE)).unwrap();
    let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
    let entry = &json["history"][0];
    assert_eq!(entry["date"], "2024-02-29");
    assert_eq!(entry["workout"], program.name.as_str());
    assert_eq!(entry["time"], 60);
    assert_eq!(entry["completed"], true);
    assert_eq!(json["stats"]["last_workout_date"], "2024-02-29");
    assert!(raw.contains("\n    \"stats\""));
}

#[test]
fn reset_restores_empty_progress() {
    let dir = tempfile::tempdir().unwrap();
    let data = DataDir::new(dir.path());
    data.seed_defaults().unwrap();

    let mut ledger = data.progress().load().unwrap();
    let catalog = data.catalog().load().unwrap();
    let (_, program) = catalog.get_index(0).unwrap();
    ledger.apply_completion(program.completion(&program.durations[0], 15), date("2024-01-01"));
    data.progress().save(&ledger).unwrap();

    data.restore_default(PROGRESS_FILE).unwrap();
    let ledger = data.progress().load().unwrap();
    assert_eq!(ledger.stats.total_workouts, 0);
    assert!(ledger.history.is_empty());
}
