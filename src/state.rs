//! Kinematic state of bodies.

use crate::{
    fph,
    quantities::{Acceleration, Position, Velocity},
};
use approx::AbsDiffEq;
use bytemuck::{Pod, Zeroable};

/// The angular part of a body's kinematic state.
///
/// Angles are in radians, and positive values are clockwise (with the
/// y-axis pointing down).
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Zeroable, Pod)]
pub struct AngularState {
    /// The orientation angle.
    pub pos: fph,
    /// The angular velocity.
    pub vel: fph,
    /// The angular acceleration.
    pub acc: fph,
}

/// A complete kinematic record for one point in time.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Zeroable, Pod)]
pub struct StateSnapshot {
    /// The position of the center of mass.
    pub pos: Position,
    /// The linear velocity of the center of mass.
    pub vel: Velocity,
    /// The linear acceleration of the center of mass.
    pub acc: Acceleration,
    /// The angular state about the center of mass.
    pub angular: AngularState,
}

/// The full kinematic state of a body: the live record plus a shadow copy
/// holding the previous timestep's values.
///
/// The `old` record belongs to the integrator driving the simulation. It is
/// zero-initialized at construction, and nothing here writes to it except
/// [`store_old`](Self::store_old).
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Zeroable, Pod)]
pub struct BodyState {
    /// The position of the center of mass.
    pub pos: Position,
    /// The linear velocity of the center of mass.
    pub vel: Velocity,
    /// The linear acceleration of the center of mass.
    pub acc: Acceleration,
    /// The angular state about the center of mass.
    pub angular: AngularState,
    /// The state at the previous timestep.
    pub old: StateSnapshot,
}

impl BodyState {
    /// Creates a state with the given initial position, velocity,
    /// orientation angle and angular velocity. The accelerations and the
    /// previous-step record start out zeroed.
    pub fn new(
        position: Position,
        velocity: Velocity,
        angular_position: fph,
        angular_velocity: fph,
    ) -> Self {
        Self {
            pos: position,
            vel: velocity,
            acc: Acceleration::zeros(),
            angular: AngularState {
                pos: angular_position,
                vel: angular_velocity,
                acc: 0.0,
            },
            old: StateSnapshot::zeroed(),
        }
    }

    /// Captures the live state in a snapshot.
    pub fn snapshot(&self) -> StateSnapshot {
        StateSnapshot {
            pos: self.pos,
            vel: self.vel,
            acc: self.acc,
            angular: self.angular,
        }
    }

    /// Copies the live state into the previous-step record.
    pub fn store_old(&mut self) {
        self.old = self.snapshot();
    }
}

impl Default for StateSnapshot {
    fn default() -> Self {
        Self::zeroed()
    }
}

impl Default for BodyState {
    fn default() -> Self {
        Self::zeroed()
    }
}

impl AbsDiffEq for AngularState {
    type Epsilon = <fph as AbsDiffEq>::Epsilon;

    fn default_epsilon() -> Self::Epsilon {
        fph::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        fph::abs_diff_eq(&self.pos, &other.pos, epsilon)
            && fph::abs_diff_eq(&self.vel, &other.vel, epsilon)
            && fph::abs_diff_eq(&self.acc, &other.acc, epsilon)
    }
}

impl AbsDiffEq for StateSnapshot {
    type Epsilon = <fph as AbsDiffEq>::Epsilon;

    fn default_epsilon() -> Self::Epsilon {
        fph::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        Position::abs_diff_eq(&self.pos, &other.pos, epsilon)
            && Velocity::abs_diff_eq(&self.vel, &other.vel, epsilon)
            && Acceleration::abs_diff_eq(&self.acc, &other.acc, epsilon)
            && AngularState::abs_diff_eq(&self.angular, &other.angular, epsilon)
    }
}

impl AbsDiffEq for BodyState {
    type Epsilon = <fph as AbsDiffEq>::Epsilon;

    fn default_epsilon() -> Self::Epsilon {
        fph::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        Position::abs_diff_eq(&self.pos, &other.pos, epsilon)
            && Velocity::abs_diff_eq(&self.vel, &other.vel, epsilon)
            && Acceleration::abs_diff_eq(&self.acc, &other.acc, epsilon)
            && AngularState::abs_diff_eq(&self.angular, &other.angular, epsilon)
            && StateSnapshot::abs_diff_eq(&self.old, &other.old, epsilon)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use approx::assert_abs_diff_eq;
    use nalgebra::{point, vector};

    #[test]
    fn default_state_is_all_zero() {
        let state = BodyState::default();
        assert_abs_diff_eq!(state.pos, Position::origin());
        assert_abs_diff_eq!(state.vel, Velocity::zeros());
        assert_abs_diff_eq!(state.acc, Acceleration::zeros());
        assert_abs_diff_eq!(state.angular, AngularState::default());
        assert_abs_diff_eq!(state.old, StateSnapshot::default());
    }

    #[test]
    fn new_state_seeds_position_and_velocity() {
        let state = BodyState::new(point![1.0, 2.0], vector![3.0, 4.0], 0.5, -0.25);
        assert_abs_diff_eq!(state.pos, point![1.0, 2.0]);
        assert_abs_diff_eq!(state.vel, vector![3.0, 4.0]);
        assert_abs_diff_eq!(state.angular.pos, 0.5);
        assert_abs_diff_eq!(state.angular.vel, -0.25);
        assert_abs_diff_eq!(state.acc, Acceleration::zeros());
        assert_abs_diff_eq!(state.angular.acc, 0.0);
    }

    #[test]
    fn new_state_has_zeroed_previous_step_record() {
        let state = BodyState::new(point![1.0, 2.0], vector![3.0, 4.0], 0.5, -0.25);
        assert_abs_diff_eq!(state.old, StateSnapshot::zeroed());
    }

    #[test]
    fn storing_old_state_copies_all_live_fields() {
        let mut state = BodyState::new(point![1.0, 2.0], vector![3.0, 4.0], 0.5, -0.25);
        state.acc = vector![5.0, 6.0];
        state.angular.acc = 7.0;
        state.store_old();
        assert_abs_diff_eq!(state.old, state.snapshot());
        assert_abs_diff_eq!(state.old.pos, point![1.0, 2.0]);
        assert_abs_diff_eq!(state.old.acc, vector![5.0, 6.0]);
        assert_abs_diff_eq!(state.old.angular.acc, 7.0);
    }
}
