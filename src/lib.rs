pub mod accents;
pub mod bloom;
#[cfg(feature = "cli")]
pub mod cli;
pub mod color;
pub mod config;
pub mod draw;
pub mod error;
pub mod fonts;
pub mod gradient;
pub mod motif;
pub mod render;
pub mod request;
pub mod theme;
pub mod wrap;

#[cfg(feature = "cli")]
pub use cli::run;
pub use config::{load_config, EngineConfig};
pub use error::RenderError;
pub use render::render_thumbnail;
pub use request::{Category, RenderRequest};
pub use theme::Theme;
