//! Simulation configuration with documented constants
//!
//! All magic numbers are collected here with explanations of their purpose
//! and how they interact with each other.

/// Configuration for the simulation systems
///
/// These values have been tuned to produce good colony pacing.
/// Changing them will affect how quickly beings starve, build, and wander.
#[derive(Debug, Clone)]
pub struct SimulationConfig {
    // === BEING VITALS ===
    /// Maximum health a being can have
    pub max_health: f32,

    /// Maximum hunger (satiation) a being can have
    ///
    /// Hunger counts DOWN from this value; a being at 0 is starving.
    /// A being at or below half of max is "hungry" and will try to eat.
    pub max_hunger: f32,

    /// Hunger lost per second
    ///
    /// At the default rate (2.0), a freshly fed being becomes hungry
    /// (crosses half of max_hunger) after 25 seconds of simulation time.
    pub hunger_decay_rate: f32,

    /// Hunger restored by eating one edible item
    pub eat_restore: f32,

    /// Health lost per second while hunger is fully exhausted
    pub starvation_rate: f32,

    /// Health regained per second while fed
    ///
    /// Intentionally slower than starvation so neglect has lasting cost.
    pub health_regen_rate: f32,

    // === MOVEMENT ===
    /// Movement speed in tiles per second
    pub move_speed: f32,

    // === ACTIONS ===
    /// Seconds of accumulated work to deliver one item to a construction site
    pub build_duration: f32,

    /// Seconds of accumulated work to hand one item to a storable
    pub give_duration: f32,

    /// Seconds of accumulated work to take one item from a takeable
    pub take_duration: f32,

    /// Maximum distance at which a being can interact with a target
    ///
    /// 1.5 admits the four orthogonal neighbour tiles (distance 1.0)
    /// as well as diagonal contact (distance ~1.414).
    pub interact_distance: f32,

    // === WORLD QUERIES ===
    /// Radius of the nearest-resource / nearest-structure searches
    pub search_radius: f32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            max_health: 100.0,
            max_hunger: 100.0,
            hunger_decay_rate: 2.0,
            eat_restore: 40.0,
            starvation_rate: 4.0,
            health_regen_rate: 1.0,

            move_speed: 3.0,

            build_duration: 2.0,
            give_duration: 1.0,
            take_duration: 1.0,
            interact_distance: 1.5,

            search_radius: 25.0,
        }
    }
}

impl SimulationConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<(), String> {
        if self.max_health <= 0.0 || self.max_hunger <= 0.0 {
            return Err("max_health and max_hunger must be positive".into());
        }

        if self.hunger_decay_rate <= 0.0 || self.starvation_rate <= 0.0 {
            return Err("Decay rates must be positive".into());
        }

        if self.move_speed <= 0.0 {
            return Err("move_speed must be positive".into());
        }

        // Orthogonal neighbours sit at distance 1.0; anything tighter
        // makes harvest/build unreachable from an adjacent tile.
        if self.interact_distance < 1.0 {
            return Err(format!(
                "interact_distance ({}) must be >= 1.0 to reach neighbour tiles",
                self.interact_distance
            ));
        }

        if self.build_duration <= 0.0 || self.give_duration <= 0.0 || self.take_duration <= 0.0 {
            return Err("Action durations must be positive".into());
        }

        if self.search_radius <= 0.0 {
            return Err("search_radius must be positive".into());
        }

        Ok(())
    }

    /// Hunger level at or below which a being counts as hungry
    pub fn hungry_threshold(&self) -> f32 {
        self.max_hunger / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(SimulationConfig::default().validate().is_ok());
    }

    #[test]
    fn test_invalid_interact_distance_rejected() {
        let config = SimulationConfig {
            interact_distance: 0.5,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_rates_rejected() {
        let config = SimulationConfig {
            hunger_decay_rate: 0.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_hungry_threshold_is_half_max() {
        let config = SimulationConfig::default();
        assert!((config.hungry_threshold() - config.max_hunger / 2.0).abs() < f32::EPSILON);
    }
}
