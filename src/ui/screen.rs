use ratatui::{layout::Rect, Frame};

use crate::{
    app::{App, View},
    ui::{settings, stats, workout, RenderContext},
};

/// A UI Screen boundary: renders one kind of [`View`] into the main area
pub trait Screen {
    fn render(&self, app: &App, ctx: &RenderContext, f: &mut Frame, area: Rect);
}

/// Program list with duration picker
pub struct CatalogScreen;

impl Screen for CatalogScreen {
    fn render(&self, app: &App, _ctx: &RenderContext, f: &mut Frame, area: Rect) {
        workout::render_catalog(app, f, area);
    }
}

/// Countdown with animated rings
pub struct SessionScreen;

impl Screen for SessionScreen {
    fn render(&self, app: &App, ctx: &RenderContext, f: &mut Frame, area: Rect) {
        workout::render_session(app, ctx, f, area);
    }
}

pub struct CompletedScreen;

impl Screen for CompletedScreen {
    fn render(&self, app: &App, _ctx: &RenderContext, f: &mut Frame, area: Rect) {
        workout::render_completed(app, f, area);
    }
}

pub struct StatsScreen;

impl Screen for StatsScreen {
    fn render(&self, app: &App, ctx: &RenderContext, f: &mut Frame, area: Rect) {
        stats::render_stats(app, ctx, f, area);
    }
}

pub struct SettingsScreen;

impl Screen for SettingsScreen {
    fn render(&self, app: &App, _ctx: &RenderContext, f: &mut Frame, area: Rect) {
        settings::render_settings(app, f, area);
    }
}

/// Helper to construct the appropriate screen for the current view
pub fn current_screen(view: &View) -> Box<dyn Screen> {
    match view {
        View::Catalog(_) => Box::new(CatalogScreen),
        View::Session(_) => Box::new(SessionScreen),
        View::Completed(_) => Box::new(CompletedScreen),
        View::Stats => Box::new(StatsScreen),
        View::Settings(_) => Box::new(SettingsScreen),
    }
}
