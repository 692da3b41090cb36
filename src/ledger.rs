use chrono::NaiveDate;
use indexmap::IndexMap;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Aggregate counters kept alongside the history
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressStats {
    pub total_workouts: u32,
    pub total_calories: u32,
    pub streak: u32,
    pub best_streak: u32,
    pub last_workout_date: Option<NaiveDate>,
}

/// One finished session, as stored in the history
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkoutRecord {
    pub date: NaiveDate,
    #[serde(rename = "workout")]
    pub program_name: String,
    #[serde(rename = "duration")]
    pub duration_label: String,
    pub completed: bool,
    pub calories: u32,
    #[serde(rename = "time")]
    pub elapsed_seconds: u32,
    pub exercises_completed: usize,
}

/// What the presentation layer knows about a session that just completed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletedWorkout {
    pub program_name: String,
    pub duration_label: String,
    pub calories: u32,
    pub elapsed_seconds: u32,
    pub exercise_count: usize,
}

impl CompletedWorkout {
    /// Key into `workout_counts`: the first word of the program name
    pub fn type_key(&self) -> Option<&str> {
        self.program_name.split_whitespace().next()
    }
}

/// Historical workout statistics; serializes as the progress document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressLedger {
    pub stats: ProgressStats,
    #[serde(default)]
    pub history: Vec<WorkoutRecord>,
    #[serde(default)]
    pub workout_counts: IndexMap<String, u32>,
}

impl ProgressLedger {
    /// Fold one completed session into the ledger and return the appended record.
    pub fn apply_completion(&mut self, workout: CompletedWorkout, today: NaiveDate) -> &WorkoutRecord {
        let stats = &mut self.stats;
        stats.total_workouts = stats.total_workouts.saturating_add(1);
        stats.total_calories = stats.total_calories.saturating_add(workout.calories);

        match stats.last_workout_date {
            None => stats.streak = 1,
            Some(last) => match (today - last).num_days() {
                1 => stats.streak = stats.streak.saturating_add(1),
                gap if gap > 1 => stats.streak = 1,
                0 => {}
                gap => warn!(%last, %today, gap, "completion dated before last workout; streak kept"),
            },
        }
        stats.best_streak = stats.best_streak.max(stats.streak);
        stats.last_workout_date = Some(today);

        // unknown type prefixes are not added to the counts
        if let Some(count) = workout
            .type_key()
            .and_then(|key| self.workout_counts.get_mut(key))
        {
            *count = count.saturating_add(1);
        }

        info!(
            program = %workout.program_name,
            calories = workout.calories,
            streak = stats.streak,
            "workout recorded"
        );

        self.history.push(WorkoutRecord {
            date: today,
            program_name: workout.program_name,
            duration_label: workout.duration_label,
            completed: true,
            calories: workout.calories,
            elapsed_seconds: workout.elapsed_seconds,
            exercises_completed: workout.exercise_count,
        });
        &self.history[self.history.len() - 1]
    }

    /// Newest first
    pub fn recent_history(&self, n: usize) -> impl Iterator<Item = &WorkoutRecord> {
        self.history.iter().rev().take(n)
    }

    /// Calories burned per date for the `days` most recent workout dates, oldest first
    pub fn calories_by_day(&self, days: usize) -> Vec<(NaiveDate, u32)> {
        let totals = self
            .history
            .iter()
            .map(|r| (r.date, r.calories))
            .into_grouping_map()
            .fold(0u32, |acc, _date, kcal| acc.saturating_add(kcal));

        let newest = totals
            .into_iter()
            .sorted_by_key(|(date, _)| *date)
            .rev()
            .take(days)
            .collect_vec();
        newest.into_iter().rev().collect()
    }

    pub fn days_since_last(&self, today: NaiveDate) -> Option<i64> {
        self.stats
            .last_workout_date
            .map(|last| (today - last).num_days())
    }
}
