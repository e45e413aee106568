//! Planner configuration.
//!
//! All seven constants are required and there is no `Default`: a config file
//! that omits a field fails to parse.
//!
//! ```toml
//! grid_distance_connected_threshold = 1000.0
//! minimum_population = 200.0
//! demand_per_person_kw_peak = 0.1
//! generation_cost_per_kw = 1000.0
//! microgrid_infrastructure_cost_per_area = 0.5
//! wire_cost_per_length = 20.0
//! grid_infrastructure_cost_per_area = 1.0
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ElectrifyError, ElectrifyResult};

/// Cost constants and intake thresholds for one planning run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PlannerConfig {
    /// Clusters at or below this distance from existing grid start connected.
    pub grid_distance_connected_threshold: f64,
    /// Clusters must have strictly more people than this to be planned.
    pub minimum_population: f64,
    /// Peak demand per person (kW)
    pub demand_per_person_kw_peak: f64,
    /// Local generation capital cost per kW
    pub generation_cost_per_kw: f64,
    /// Local distribution cost per unit of cluster area
    pub microgrid_infrastructure_cost_per_area: f64,
    /// Grid line cost per unit of length
    pub wire_cost_per_length: f64,
    /// Grid distribution cost per unit of cluster area
    pub grid_infrastructure_cost_per_area: f64,
}

impl PlannerConfig {
    /// Parse a TOML document.
    pub fn from_toml_str(contents: &str) -> ElectrifyResult<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Load configuration from a specific path.
    pub fn load_from(path: impl AsRef<Path>) -> ElectrifyResult<Self> {
        let path = path.as_ref();
        debug!("loading planner config from {}", path.display());
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Save configuration to a specific path.
    pub fn save_to(&self, path: impl AsRef<Path>) -> ElectrifyResult<()> {
        let contents = toml::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Reject values the cost arithmetic cannot work with.
    ///
    /// Demand, generation and wire costs must be strictly positive. Per-area
    /// costs and intake thresholds may be zero but not negative. Every value
    /// must be finite.
    pub fn validate(&self) -> ElectrifyResult<()> {
        let positive = [
            ("demand_per_person_kw_peak", self.demand_per_person_kw_peak),
            ("generation_cost_per_kw", self.generation_cost_per_kw),
            ("wire_cost_per_length", self.wire_cost_per_length),
        ];
        let non_negative = [
            (
                "grid_distance_connected_threshold",
                self.grid_distance_connected_threshold,
            ),
            ("minimum_population", self.minimum_population),
            (
                "microgrid_infrastructure_cost_per_area",
                self.microgrid_infrastructure_cost_per_area,
            ),
            (
                "grid_infrastructure_cost_per_area",
                self.grid_infrastructure_cost_per_area,
            ),
        ];

        for (name, value) in positive.iter().chain(non_negative.iter()) {
            if !value.is_finite() {
                return Err(ElectrifyError::Config(format!(
                    "{name} must be finite, got {value}"
                )));
            }
        }
        for (name, value) in positive {
            if value <= 0.0 {
                return Err(ElectrifyError::Config(format!(
                    "{name} must be positive, got {value}"
                )));
            }
        }
        for (name, value) in non_negative {
            if value < 0.0 {
                return Err(ElectrifyError::Config(format!(
                    "{name} must not be negative, got {value}"
                )));
            }
        }
        Ok(())
    }

    /// Off-grid generation cost per person (demand × generation cost).
    pub fn generation_cost_per_person(&self) -> f64 {
        self.demand_per_person_kw_peak * self.generation_cost_per_kw
    }
}
