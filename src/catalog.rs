use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{FitError, Result};
use crate::ledger::CompletedWorkout;

/// A selectable length for a program
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DurationOption {
    /// Seconds
    pub time: i64,
    pub name: String,
    pub calories: u32,
}

impl DurationOption {
    pub fn new(time: i64, name: &str, calories: u32) -> Self {
        Self {
            time,
            name: name.to_string(),
            calories,
        }
    }
}

/// Durations offered by newly created programs
pub fn default_durations() -> Vec<DurationOption> {
    vec![
        DurationOption::new(15, "15 sec", 20),
        DurationOption::new(30, "30 sec", 40),
        DurationOption::new(60, "60 sec", 80),
    ]
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Program {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub durations: Vec<DurationOption>,
    /// Exercise entries are carried through untouched; only their count matters here
    #[serde(default)]
    pub exercises: Vec<serde_json::Value>,
}

impl Program {
    pub fn new(name: &str, description: &str) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            durations: default_durations(),
            exercises: Vec::new(),
        }
    }

    /// Summary of a completed run of this program at `duration`
    pub fn completion(&self, duration: &DurationOption, elapsed_seconds: u32) -> CompletedWorkout {
        CompletedWorkout {
            program_name: self.name.clone(),
            duration_label: duration.name.clone(),
            calories: duration.calories,
            elapsed_seconds,
            exercise_count: self.exercises.len(),
        }
    }
}

/// Workout programs keyed by id, in document order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorkoutCatalog {
    programs: IndexMap<String, Program>,
}

impl WorkoutCatalog {
    pub fn len(&self) -> usize {
        self.programs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.programs.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Program> {
        self.programs.get(id)
    }

    pub fn get_index(&self, index: usize) -> Option<(&String, &Program)> {
        self.programs.get_index(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Program)> {
        self.programs.iter()
    }

    pub fn insert(&mut self, id: &str, program: Program) {
        self.programs.insert(id.to_string(), program);
    }

    /// Add a program with default durations; returns its new id.
    pub fn add_program(&mut self, name: &str, description: &str) -> Result<String> {
        let name = validated_name(name)?;
        let id = self.next_id();
        self.programs
            .insert(id.clone(), Program::new(name, description.trim()));
        info!(%id, name, "program created");
        Ok(id)
    }

    /// Change name and description, keeping durations and exercises.
    pub fn update_details(&mut self, id: &str, name: &str, description: &str) -> Result<()> {
        let name = validated_name(name)?;
        let program = self
            .programs
            .get_mut(id)
            .ok_or_else(|| FitError::ProgramNotFound(id.to_string()))?;
        program.name = name.to_string();
        program.description = description.trim().to_string();
        info!(%id, name, "program updated");
        Ok(())
    }

    pub fn remove(&mut self, id: &str) -> Result<Program> {
        let program = self
            .programs
            .shift_remove(id)
            .ok_or_else(|| FitError::ProgramNotFound(id.to_string()))?;
        info!(%id, name = %program.name, "program deleted");
        Ok(program)
    }

    fn next_id(&self) -> String {
        let mut n = self.programs.len() + 1;
        loop {
            let id = format!("program_{n}");
            if !self.programs.contains_key(&id) {
                return id;
            }
            n += 1;
        }
    }
}

fn validated_name(name: &str) -> Result<&str> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(FitError::InvalidField {
            field: "name",
            value: name.to_string(),
        });
    }
    Ok(trimmed)
}
