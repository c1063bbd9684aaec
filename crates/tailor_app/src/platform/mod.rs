mod app;
mod cli;
mod editor;
mod effects;
mod logging;
mod render;
mod settings;

pub use app::run_app;
pub use cli::Cli;
