//! Presentation state for the terminal front end.
//!
//! The screen currently shown is a [`View`] value that is rebuilt from the
//! loaded documents on every transition; nothing view-specific outlives it.
//! The timer and ledger stay UI-agnostic: this module feeds them ticks and
//! completions and persists the results.

use std::time::Instant;

use chrono::NaiveDate;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::{debug, error, info, warn};

use crate::catalog::{DurationOption, Program, WorkoutCatalog};
use crate::celebration::Celebration;
use crate::color::LogoCycle;
use crate::error::{FitError, Result};
use crate::form::{Form, TextField};
use crate::ledger::{CompletedWorkout, ProgressLedger, WorkoutRecord};
use crate::session::{SessionTimer, TickOutcome, TickSchedule};
use crate::settings::{Settings, PROFILE_FIELDS};
use crate::storage::{DataDir, DocumentStore};

/// Top-level destinations reachable from the sidebar
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum Screen {
    Workout,
    Stats,
    Settings,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum SettingsTab {
    General,
    Programs,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status {
    pub kind: StatusKind,
    pub text: String,
}

/// Program list with the highlighted program and duration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogState {
    pub program: usize,
    pub duration: usize,
}

/// A workout in progress
#[derive(Debug)]
pub struct ActiveSession {
    pub program_id: String,
    pub program: Program,
    pub duration: DurationOption,
    pub timer: SessionTimer,
    pub schedule: TickSchedule,
    pub started_at: Instant,
}

impl ActiveSession {
    /// Seconds since the session view was opened; drives the ring animation
    pub fn animation_secs(&self, now: Instant) -> f64 {
        now.saturating_duration_since(self.started_at).as_secs_f64()
    }
}

#[derive(Debug)]
pub struct CompletionState {
    pub workout: CompletedWorkout,
    /// The history entry, when the ledger was available to record it
    pub record: Option<WorkoutRecord>,
    pub celebration: Celebration,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgramEditor {
    /// `None` while creating a new program
    pub id: Option<String>,
    pub form: Form,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProgramsState {
    pub selected: usize,
    pub editor: Option<ProgramEditor>,
    pub confirm_delete: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsState {
    pub tab: SettingsTab,
    /// `None` when the settings document could not be loaded
    pub profile: Option<Form>,
    pub programs: ProgramsState,
}

impl SettingsState {
    fn is_editing_text(&self) -> bool {
        let profile_editing = self.profile.as_ref().is_some_and(Form::is_editing);
        let program_editing = self.programs.editor.is_some() || self.programs.confirm_delete.is_some();
        match self.tab {
            SettingsTab::General => profile_editing,
            SettingsTab::Programs => program_editing,
        }
    }
}

#[derive(Debug)]
pub enum View {
    Catalog(CatalogState),
    Session(ActiveSession),
    Completed(CompletionState),
    Stats,
    Settings(SettingsState),
}

impl View {
    pub fn screen(&self) -> Screen {
        match self {
            View::Catalog(_) | View::Session(_) | View::Completed(_) => Screen::Workout,
            View::Stats => Screen::Stats,
            View::Settings(_) => Screen::Settings,
        }
    }
}

pub struct App {
    data: DataDir,
    pub settings: Option<Settings>,
    pub catalog: Option<WorkoutCatalog>,
    pub ledger: Option<ProgressLedger>,
    pub view: View,
    pub logo: LogoCycle,
    /// Sessions completed since the app started
    pub timer_completions: u32,
    pub status: Option<Status>,
    pub should_quit: bool,
    viewport: (u16, u16),
    last_frame: Option<Instant>,
}

impl App {
    /// Load all documents from `data`. A document that fails to load stays
    /// `None` and its screens show an error; the file itself is not touched.
    pub fn load(data: DataDir) -> Self {
        let mut problems = Vec::new();
        let settings = load_or_note(&data.settings(), &mut problems);
        let catalog = load_or_note(&data.catalog(), &mut problems);
        let ledger = load_or_note(&data.progress(), &mut problems);

        let status = (!problems.is_empty()).then(|| Status {
            kind: StatusKind::Error,
            text: problems.join("; "),
        });

        Self {
            data,
            settings,
            catalog,
            ledger,
            view: View::Catalog(CatalogState::default()),
            logo: LogoCycle::new(),
            timer_completions: 0,
            status,
            should_quit: false,
            viewport: (80, 24),
            last_frame: None,
        }
    }

    pub fn data_dir(&self) -> &DataDir {
        &self.data
    }

    pub fn set_viewport(&mut self, width: u16, height: u16) {
        self.viewport = (width, height);
    }

    fn info(&mut self, text: impl Into<String>) {
        self.status = Some(Status {
            kind: StatusKind::Info,
            text: text.into(),
        });
    }

    fn fail(&mut self, err: &FitError) {
        warn!(%err, "operation failed");
        self.status = Some(Status {
            kind: StatusKind::Error,
            text: err.to_string(),
        });
    }

    /// Switch screens, rebuilding the target view. Leaving a running session abandons it.
    pub fn navigate(&mut self, screen: Screen) {
        if let View::Session(session) = &self.view {
            info!(
                program = %session.program.name,
                remaining = session.timer.remaining_seconds(),
                "session abandoned"
            );
        }
        self.view = match screen {
            Screen::Workout => View::Catalog(CatalogState::default()),
            Screen::Stats => View::Stats,
            Screen::Settings => View::Settings(self.settings_view(SettingsTab::General)),
        };
        debug!(%screen, "view changed");
    }

    fn settings_view(&self, tab: SettingsTab) -> SettingsState {
        let profile = self.settings.as_ref().map(|s| {
            Form::new(
                PROFILE_FIELDS
                    .iter()
                    .copied()
                    .zip(["Name", "Age", "Weight (kg)", "Height (cm)"])
                    .map(|(key, label)| {
                        TextField::new(key, label, s.user.field_value(key).unwrap_or_default())
                    })
                    .collect(),
            )
        });
        SettingsState {
            tab,
            profile,
            programs: ProgramsState::default(),
        }
    }

    // ── workout session ─────────────────────────────────────────────────────

    /// Start the highlighted program/duration from the catalog view.
    pub fn start_session(&mut self, now: Instant) -> Result<()> {
        let View::Catalog(state) = &self.view else {
            return Ok(());
        };
        let Some((id, program)) = self
            .catalog
            .as_ref()
            .and_then(|c| c.get_index(state.program))
        else {
            return Ok(());
        };
        let Some(duration) = program.durations.get(state.duration) else {
            return Ok(());
        };

        let mut timer = SessionTimer::start(duration.time)?;
        timer.toggle();
        let mut schedule = TickSchedule::new();
        schedule.resume(now);

        info!(program = %program.name, duration = %duration.name, "session started");
        self.view = View::Session(ActiveSession {
            program_id: id.clone(),
            program: program.clone(),
            duration: duration.clone(),
            timer,
            schedule,
            started_at: now,
        });
        Ok(())
    }

    /// Pause or resume the running session. Seconds already owed are applied first.
    pub fn toggle_pause(&mut self, now: Instant, today: NaiveDate) {
        self.collect_ticks(now, today);
        if let View::Session(session) = &mut self.view {
            if session.timer.toggle() {
                session.schedule.resume(now);
            } else {
                session.schedule.pause(now);
            }
        }
    }

    pub fn abandon_session(&mut self) {
        if matches!(self.view, View::Session(_)) {
            self.navigate(Screen::Workout);
        }
    }

    /// Feed `count` one-second ticks to the running session
    pub fn apply_ticks(&mut self, count: u32, today: NaiveDate) {
        let View::Session(session) = &mut self.view else {
            return;
        };

        let mut completed = false;
        for _ in 0..count {
            if session.timer.tick() == TickOutcome::Completed {
                completed = true;
                break;
            }
        }

        if completed {
            if let View::Session(session) = std::mem::replace(&mut self.view, View::Stats) {
                self.finish_session(session, today);
            }
        }
    }

    fn collect_ticks(&mut self, now: Instant, today: NaiveDate) {
        let due = match &mut self.view {
            View::Session(session) => session.schedule.due(now),
            _ => 0,
        };
        if due > 0 {
            self.apply_ticks(due, today);
        }
    }

    fn finish_session(&mut self, session: ActiveSession, today: NaiveDate) {
        let workout = session
            .program
            .completion(&session.duration, session.timer.elapsed_seconds());
        self.timer_completions += 1;

        let record = match self.ledger.as_mut() {
            Some(ledger) => Some(ledger.apply_completion(workout.clone(), today).clone()),
            None => {
                warn!("progress document unavailable; completion not recorded");
                None
            }
        };

        if record.is_some() {
            if let Err(err) = self.persist_ledger() {
                error!(%err, "could not save progress");
                self.fail(&err);
            }
        } else {
            self.status = Some(Status {
                kind: StatusKind::Error,
                text: "Progress could not be loaded; this workout was not recorded".into(),
            });
        }

        let mut celebration = Celebration::new();
        celebration.start(self.viewport.0, self.viewport.1);
        self.view = View::Completed(CompletionState {
            workout,
            record,
            celebration,
        });
    }

    fn persist_ledger(&self) -> Result<()> {
        match &self.ledger {
            Some(ledger) => self.data.progress().save(ledger),
            None => Ok(()),
        }
    }

    /// Per-frame housekeeping: logo colour, timer ticks, celebration physics.
    pub fn on_frame(&mut self, now: Instant, today: NaiveDate) {
        let dt = self
            .last_frame
            .map(|last| now.saturating_duration_since(last).as_secs_f64())
            .unwrap_or(0.0);
        self.last_frame = Some(now);

        self.logo.advance();
        self.collect_ticks(now, today);
        if let View::Completed(done) = &mut self.view {
            done.celebration.update(dt);
        }
    }

    // ── settings ────────────────────────────────────────────────────────────

    /// Validate and persist the profile form. Nothing is written on error.
    pub fn save_profile(&mut self) {
        let View::Settings(state) = &self.view else {
            return;
        };
        let (Some(form), Some(current)) = (state.profile.as_ref(), self.settings.as_ref()) else {
            return;
        };

        let saved = current
            .with_profile_edits(form.values())
            .and_then(|next| self.data.settings().save(&next).map(|_| next));
        match saved {
            Ok(next) => {
                info!(name = %next.user.name, "profile saved");
                self.settings = Some(next);
                self.info("Settings saved");
            }
            Err(err) => self.fail(&err),
        }
    }

    /// Apply `change` to a copy of the catalog and persist it; the in-memory
    /// catalog is only replaced once the write succeeded.
    fn change_catalog<F, T>(&mut self, change: F) -> Result<T>
    where
        F: FnOnce(&mut WorkoutCatalog) -> Result<T>,
    {
        let Some(current) = self.catalog.as_ref() else {
            return Err(FitError::Unavailable("workout catalog"));
        };
        let mut next = current.clone();
        let out = change(&mut next)?;
        self.data.catalog().save(&next)?;
        self.catalog = Some(next);
        Ok(out)
    }

    pub fn open_program_editor(&mut self, id: Option<String>) {
        let existing = id
            .as_deref()
            .and_then(|id| self.catalog.as_ref()?.get(id))
            .map(|p| (p.name.clone(), p.description.clone()))
            .unwrap_or_default();
        if let View::Settings(state) = &mut self.view {
            state.programs.editor = Some(ProgramEditor {
                id,
                form: Form::new(vec![
                    TextField::new("name", "Name", existing.0),
                    TextField::new("description", "Description", existing.1),
                ]),
            });
        }
    }

    pub fn save_program_editor(&mut self) {
        let View::Settings(state) = &self.view else {
            return;
        };
        let Some(editor) = state.programs.editor.clone() else {
            return;
        };

        let name = editor.form.value("name").to_string();
        let description = editor.form.value("description").to_string();
        let result = self.change_catalog(|catalog| match &editor.id {
            Some(id) => catalog.update_details(id, &name, &description).map(|_| id.clone()),
            None => catalog.add_program(&name, &description),
        });

        match result {
            Ok(_) => {
                if let View::Settings(state) = &mut self.view {
                    state.programs.editor = None;
                }
                self.info(format!("Program \"{}\" saved", name.trim()));
            }
            Err(err) => self.fail(&err),
        }
    }

    pub fn request_delete_selected(&mut self) {
        let id = match (&self.view, self.catalog.as_ref()) {
            (View::Settings(state), Some(catalog)) => catalog
                .get_index(state.programs.selected)
                .map(|(id, _)| id.clone()),
            _ => None,
        };
        if let (Some(id), View::Settings(state)) = (id, &mut self.view) {
            state.programs.confirm_delete = Some(id);
        }
    }

    pub fn confirm_delete(&mut self, confirmed: bool) {
        let View::Settings(state) = &mut self.view else {
            return;
        };
        let Some(id) = state.programs.confirm_delete.take() else {
            return;
        };
        if !confirmed {
            return;
        }

        match self.change_catalog(|catalog| catalog.remove(&id)) {
            Ok(program) => {
                if let (View::Settings(state), Some(catalog)) = (&mut self.view, &self.catalog) {
                    state.programs.selected = state.programs.selected.min(catalog.len().saturating_sub(1));
                }
                self.info(format!("Program \"{}\" deleted", program.name));
            }
            Err(err) => self.fail(&err),
        }
    }

    // ── input ───────────────────────────────────────────────────────────────

    pub fn handle_key(&mut self, key: KeyEvent, now: Instant, today: NaiveDate) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        let text_input = matches!(&self.view, View::Settings(s) if s.is_editing_text());
        if !text_input {
            let target = match key.code {
                KeyCode::Char('1') => Some(Screen::Workout),
                KeyCode::Char('2') => Some(Screen::Stats),
                KeyCode::Char('3') => Some(Screen::Settings),
                _ => None,
            };
            if let Some(screen) = target {
                if !matches!(self.view, View::Session(_)) {
                    self.navigate(screen);
                    return;
                }
            }
        }

        match &self.view {
            View::Catalog(_) => self.on_catalog_key(key, now),
            View::Session(_) => match key.code {
                KeyCode::Char(' ') | KeyCode::Char('p') => self.toggle_pause(now, today),
                KeyCode::Esc => self.abandon_session(),
                _ => {}
            },
            View::Completed(_) => {
                if matches!(key.code, KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ')) {
                    self.navigate(Screen::Workout);
                }
            }
            View::Stats => match key.code {
                KeyCode::Esc => self.navigate(Screen::Workout),
                KeyCode::Char('q') => self.should_quit = true,
                _ => {}
            },
            View::Settings(_) => self.on_settings_key(key),
        }
    }

    fn on_catalog_key(&mut self, key: KeyEvent, now: Instant) {
        let catalog = self.catalog.as_ref();
        let View::Catalog(state) = &mut self.view else {
            return;
        };
        let programs = catalog.map_or(0, WorkoutCatalog::len);
        let durations = catalog
            .and_then(|c| c.get_index(state.program))
            .map_or(0, |(_, p)| p.durations.len());

        match key.code {
            KeyCode::Up | KeyCode::Char('k') if programs > 0 => {
                state.program = (state.program + programs - 1) % programs;
                state.duration = 0;
            }
            KeyCode::Down | KeyCode::Char('j') if programs > 0 => {
                state.program = (state.program + 1) % programs;
                state.duration = 0;
            }
            KeyCode::Left | KeyCode::Char('h') if durations > 0 => {
                state.duration = (state.duration + durations - 1) % durations;
            }
            KeyCode::Right | KeyCode::Char('l') if durations > 0 => {
                state.duration = (state.duration + 1) % durations;
            }
            KeyCode::Enter => {
                if let Err(err) = self.start_session(now) {
                    self.fail(&err);
                }
            }
            KeyCode::Esc | KeyCode::Char('q') => self.should_quit = true,
            _ => {}
        }
    }

    fn on_settings_key(&mut self, key: KeyEvent) {
        let View::Settings(state) = &mut self.view else {
            return;
        };

        if key.code == KeyCode::Tab && !state.is_editing_text() {
            state.tab = match state.tab {
                SettingsTab::General => SettingsTab::Programs,
                SettingsTab::Programs => SettingsTab::General,
            };
            return;
        }

        match state.tab {
            SettingsTab::General => self.on_profile_key(key),
            SettingsTab::Programs => self.on_programs_key(key),
        }
    }

    fn on_profile_key(&mut self, key: KeyEvent) {
        let View::Settings(SettingsState {
            profile: Some(form), ..
        }) = &mut self.view
        else {
            if key.code == KeyCode::Esc {
                self.navigate(Screen::Workout);
            }
            return;
        };

        if form.is_editing() {
            edit_field(form, key);
            return;
        }
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => form.select_prev(),
            KeyCode::Down | KeyCode::Char('j') => form.select_next(),
            KeyCode::Enter => form.begin_edit(),
            KeyCode::Char('s') => self.save_profile(),
            KeyCode::Esc => self.navigate(Screen::Workout),
            _ => {}
        }
    }

    fn on_programs_key(&mut self, key: KeyEvent) {
        let count = self.catalog.as_ref().map_or(0, WorkoutCatalog::len);
        let View::Settings(state) = &mut self.view else {
            return;
        };
        let programs = &mut state.programs;

        if programs.confirm_delete.is_some() {
            let answer = matches!(key.code, KeyCode::Char('y') | KeyCode::Char('Y'));
            self.confirm_delete(answer);
            return;
        }

        if let Some(editor) = programs.editor.as_mut() {
            if editor.form.is_editing() {
                edit_field(&mut editor.form, key);
                return;
            }
            match key.code {
                KeyCode::Up => editor.form.select_prev(),
                KeyCode::Down => editor.form.select_next(),
                KeyCode::Enter => editor.form.begin_edit(),
                KeyCode::Char('s') => self.save_program_editor(),
                KeyCode::Esc => programs.editor = None,
                _ => {}
            }
            return;
        }

        match key.code {
            KeyCode::Up | KeyCode::Char('k') if count > 0 => {
                programs.selected = (programs.selected + count - 1) % count;
            }
            KeyCode::Down | KeyCode::Char('j') if count > 0 => {
                programs.selected = (programs.selected + 1) % count;
            }
            KeyCode::Char('n') => self.open_program_editor(None),
            KeyCode::Char('e') | KeyCode::Enter => {
                let id = self
                    .catalog
                    .as_ref()
                    .and_then(|c| c.get_index(programs.selected))
                    .map(|(id, _)| id.clone());
                if id.is_some() {
                    self.open_program_editor(id);
                }
            }
            KeyCode::Char('d') | KeyCode::Delete => self.request_delete_selected(),
            KeyCode::Esc => self.navigate(Screen::Workout),
            _ => {}
        }
    }
}

fn edit_field(form: &mut Form, key: KeyEvent) {
    match key.code {
        KeyCode::Enter => form.commit_edit(),
        KeyCode::Esc => form.cancel_edit(),
        KeyCode::Backspace => form.backspace(),
        KeyCode::Char(c) => form.push_char(c),
        _ => {}
    }
}

fn load_or_note<T, S: DocumentStore<T>>(store: &S, problems: &mut Vec<String>) -> Option<T> {
    match store.load() {
        Ok(doc) => Some(doc),
        Err(err) => {
            error!(%err, "document failed to load");
            problems.push(err.to_string());
            None
        }
    }
}
