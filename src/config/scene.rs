use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Damping rates outside this band are accepted but have not been tuned
pub const RECOMMENDED_RATE_RANGE: (f32, f32) = (0.5, 5.0);

/// Smallest accepted tree height or radius
pub const MIN_DIMENSION: f32 = 1e-3;

/// Largest accepted element count for a single population
pub const MAX_POPULATION: usize = 1_000_000;

/// Errors raised while loading or validating the scene configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("YAML parse error: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("{field} must be a positive finite number, got {value}")]
    NotPositive { field: &'static str, value: f32 },
    #[error("{field} must be at least {min}, got {value}")]
    TooSmall { field: &'static str, value: f32, min: f32 },
    #[error("{field} must be at most {max}, got {count}")]
    TooMany { field: &'static str, count: usize, max: usize },
}

/// Per-population smoothing rates (higher converges faster)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DampingRates {
    pub foliage: f32,
    pub spheres: f32,
    pub boxes: f32,
    pub topper: f32,
}

impl Default for DampingRates {
    fn default() -> Self {
        Self {
            foliage: 2.0,
            spheres: 1.8,
            boxes: 1.0,
            topper: 1.5,
        }
    }
}

/// Static scene configuration, loaded once before the populations are built
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub foliage_count: usize,
    pub sphere_count: usize,
    pub box_count: usize,
    pub tree_height: f32,
    pub tree_radius_base: f32,
    pub scatter_radius: f32,
    pub damping: DampingRates,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            foliage_count: 12_000,
            sphere_count: 300,
            box_count: 80,
            tree_height: 14.0,
            tree_radius_base: 5.5,
            scatter_radius: 25.0,
            damping: DampingRates::default(),
        }
    }
}

impl SceneConfig {
    /// Parse from YAML string; absent keys keep their defaults
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        let config: SceneConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Check counts, dimensions and rates
    pub fn validate(&self) -> Result<(), ConfigError> {
        let counts = [
            ("foliage_count", self.foliage_count),
            ("sphere_count", self.sphere_count),
            ("box_count", self.box_count),
        ];
        for (field, count) in counts {
            if count > MAX_POPULATION {
                return Err(ConfigError::TooMany { field, count, max: MAX_POPULATION });
            }
        }

        require_dimension("tree_height", self.tree_height)?;
        require_dimension("tree_radius_base", self.tree_radius_base)?;
        require_dimension("scatter_radius", self.scatter_radius)?;

        let rates = [
            ("damping.foliage", self.damping.foliage),
            ("damping.spheres", self.damping.spheres),
            ("damping.boxes", self.damping.boxes),
            ("damping.topper", self.damping.topper),
        ];
        let (low, high) = RECOMMENDED_RATE_RANGE;
        for (field, rate) in rates {
            require_positive(field, rate)?;
            if !(low..=high).contains(&rate) {
                log::warn!("{} = {} is outside the tuned range [{}, {}]", field, rate, low, high);
            }
        }

        Ok(())
    }

    /// Y coordinate of the cone base
    pub fn base_y(&self) -> f32 {
        -self.tree_height / 2.0
    }

    /// Y coordinate of the cone tip
    pub fn top_y(&self) -> f32 {
        self.tree_height / 2.0
    }

    /// Total element count across every population, topper included
    pub fn total_elements(&self) -> usize {
        self.foliage_count + self.sphere_count + self.box_count + 1
    }
}

fn require_positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NotPositive { field, value })
    }
}

fn require_dimension(field: &'static str, value: f32) -> Result<(), ConfigError> {
    require_positive(field, value)?;
    if value < MIN_DIMENSION {
        return Err(ConfigError::TooSmall { field, value, min: MIN_DIMENSION });
    }
    Ok(())
}
