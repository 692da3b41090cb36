// Library surface for headless/integration tests and reuse.
// The binary in main.rs only owns the terminal and the event loop.
pub mod app;
pub mod app_dirs;
pub mod catalog;
pub mod celebration;
pub mod color;
pub mod error;
pub mod form;
pub mod ledger;
pub mod runtime;
pub mod session;
pub mod settings;
pub mod storage;
pub mod ui;
pub mod util;

pub use app::App;
pub use error::{FitError, Result};
