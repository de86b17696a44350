pub mod palette;
pub mod scene;

pub use palette::Palette;
pub use scene::{ConfigError, DampingRates, SceneConfig};
