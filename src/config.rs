//! Configuration of bodies.

use crate::{
    error::BodyError,
    fph,
    quantities::{Position, Velocity},
};
use std::collections::HashMap;

/// How a body participates in the simulation.
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Treatment {
    /// The body is fully simulated and responds to forces.
    #[default]
    Dynamic,
    /// The body moves at prescribed velocities and is unaffected by forces.
    Kinematic,
    /// The body never moves.
    Static,
}

/// A configuration value for an entry the body core does not interpret
/// itself.
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(untagged)
)]
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigValue {
    /// A boolean value.
    Bool(bool),
    /// A numeric value.
    Number(fph),
    /// A textual value.
    Text(String),
}

/// The resolved configuration of a body.
///
/// Values start out at the base defaults given by [`Default`], after which
/// the body type's defaults and finally the creator's [`BodyOptions`] are
/// layered on top.
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
#[derive(Clone, Debug, PartialEq)]
pub struct BodyConfig {
    /// Whether the body should be excluded from rendering.
    pub hidden: bool,
    /// How the body participates in the simulation.
    pub treatment: Treatment,
    /// The mass of the body. Must be nonzero and finite when the body is
    /// created.
    pub mass: fph,
    /// The coefficient of restitution of the body's surface.
    pub restitution: fph,
    /// The coefficient of friction of the body's surface.
    pub cof: fph,
    /// An identifier for the visual representation of the body. Not
    /// interpreted by the body core.
    pub view: Option<String>,
    /// Configuration entries the body core does not interpret itself, kept
    /// for body types and external systems.
    pub extras: HashMap<String, ConfigValue>,
}

/// Options provided when creating a body.
///
/// Recognized values that are left as [`None`] fall back to the body type's
/// defaults. The initial-state values seed the body's kinematic state
/// directly and are not retained in the configuration.
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BodyOptions {
    /// Whether the body should be excluded from rendering.
    pub hidden: Option<bool>,
    /// How the body participates in the simulation.
    pub treatment: Option<Treatment>,
    /// The mass of the body.
    pub mass: Option<fph>,
    /// The coefficient of restitution of the body's surface.
    pub restitution: Option<fph>,
    /// The coefficient of friction of the body's surface.
    pub cof: Option<fph>,
    /// An identifier for the visual representation of the body.
    pub view: Option<String>,
    /// The initial position of the body's center of mass.
    pub position: Option<Position>,
    /// The initial velocity of the body's center of mass.
    pub velocity: Option<Velocity>,
    /// The initial orientation angle of the body (radians, clockwise).
    pub angular_position: Option<fph>,
    /// The initial angular velocity of the body (clockwise).
    pub angular_velocity: Option<fph>,
    /// Additional configuration entries for the body type or external
    /// systems.
    pub extras: HashMap<String, ConfigValue>,
}

impl ConfigValue {
    /// Returns the value as a number, or [`None`] if it is not numeric.
    pub fn as_number(&self) -> Option<fph> {
        match self {
            Self::Number(number) => Some(*number),
            _ => None,
        }
    }

    /// Returns the value as a boolean, or [`None`] if it is not boolean.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(boolean) => Some(*boolean),
            _ => None,
        }
    }

    /// Returns the value as text, or [`None`] if it is not textual.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }
}

impl From<bool> for ConfigValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<fph> for ConfigValue {
    fn from(value: fph) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for ConfigValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for ConfigValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl BodyConfig {
    /// Checks that the configuration describes a body that may be created.
    ///
    /// # Errors
    /// Returns an error if the mass is zero or not finite.
    pub fn validate(&self) -> Result<(), BodyError> {
        if self.mass == 0.0 {
            return Err(BodyError::InvalidConfiguration(
                "body mass must be nonzero".to_string(),
            ));
        }
        if !self.mass.is_finite() {
            return Err(BodyError::InvalidConfiguration(format!(
                "body mass must be finite, not {}",
                self.mass
            )));
        }
        Ok(())
    }
}

impl Default for BodyConfig {
    fn default() -> Self {
        Self {
            hidden: false,
            treatment: Treatment::Dynamic,
            mass: 1.0,
            restitution: 1.0,
            cof: 0.8,
            view: None,
            extras: HashMap::new(),
        }
    }
}

impl BodyOptions {
    /// Creates an empty set of options, leaving every value to its default.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a configuration entry with the given key and value.
    pub fn extra(mut self, key: impl Into<String>, value: impl Into<ConfigValue>) -> Self {
        self.extras.insert(key.into(), value.into());
        self
    }

    /// Layers these options on top of the given configuration.
    ///
    /// Values the options leave unset keep their configured values, and
    /// additional entries are merged with the options' entries winning.
    pub fn apply_to(&self, config: &mut BodyConfig) {
        if let Some(hidden) = self.hidden {
            config.hidden = hidden;
        }
        if let Some(treatment) = self.treatment {
            config.treatment = treatment;
        }
        if let Some(mass) = self.mass {
            config.mass = mass;
        }
        if let Some(restitution) = self.restitution {
            config.restitution = restitution;
        }
        if let Some(cof) = self.cof {
            config.cof = cof;
        }
        if let Some(view) = &self.view {
            config.view = Some(view.clone());
        }
        for (key, value) in &self.extras {
            config.extras.insert(key.clone(), value.clone());
        }
    }
}
