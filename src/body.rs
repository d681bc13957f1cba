//! Bodies and the operations that manipulate them.

use crate::{
    config::{BodyConfig, Treatment},
    error::BodyError,
    fph,
    geometry::{Aabb, Point, Shape},
    quantities::{self, Acceleration, Force},
    registry::BodyType,
    scratch::ScratchPool,
    state::BodyState,
};
use bytemuck::{Pod, Zeroable};
use nalgebra::Vector2;
use std::{fmt, sync::Arc};

/// Identifier for a [`Body`].
#[repr(transparent)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Zeroable, Pod)]
pub struct BodyId(u64);

/// Handle identifying a simulation world a body can be attached to.
///
/// The handle is opaque to the body core; the surrounding simulation mints
/// and interprets it.
#[repr(transparent)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Zeroable, Pod)]
pub struct WorldHandle(u64);

/// A simulated physical body.
///
/// Bodies are created by a
/// [`BodyRegistry`](crate::registry::BodyRegistry) from a named body type
/// and a set of [`BodyOptions`](crate::config::BodyOptions).
#[derive(Debug)]
pub struct Body {
    id: BodyId,
    type_name: Arc<str>,
    handler: Arc<dyn BodyType>,
    config: BodyConfig,
    state: BodyState,
    geometry: Arc<dyn Shape>,
    moment_of_inertia: Option<fph>,
    world: Option<WorldHandle>,
    style: Option<String>,
}

impl BodyId {
    /// Converts the given `u64` into a body ID. Should only be called with
    /// values returned from [`Self::as_u64`].
    #[inline]
    pub const fn from_u64(value: u64) -> Self {
        Self(value)
    }

    /// Returns the `u64` value corresponding to the body ID.
    #[inline]
    pub const fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for BodyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl WorldHandle {
    /// Converts the given `u64` into a world handle. Should only be called
    /// with values returned from [`Self::as_u64`].
    #[inline]
    pub const fn from_u64(value: u64) -> Self {
        Self(value)
    }

    /// Returns the `u64` value corresponding to the world handle.
    #[inline]
    pub const fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for WorldHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Body {
    pub(crate) fn new(
        id: BodyId,
        type_name: Arc<str>,
        handler: Arc<dyn BodyType>,
        config: BodyConfig,
        state: BodyState,
    ) -> Self {
        Self {
            id,
            type_name,
            handler,
            config,
            state,
            geometry: Arc::new(Point),
            moment_of_inertia: None,
            world: None,
            style: None,
        }
    }

    /// Returns the unique ID of the body.
    pub fn id(&self) -> BodyId {
        self.id
    }

    /// Returns the name of the body type the body was created as.
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Returns a reference to the body's configuration.
    pub fn config(&self) -> &BodyConfig {
        &self.config
    }

    /// Returns a mutable reference to the body's configuration.
    ///
    /// Call [`recalc`](Self::recalc) after changing values that derived
    /// properties depend on.
    pub fn config_mut(&mut self) -> &mut BodyConfig {
        &mut self.config
    }

    /// Returns a reference to the body's kinematic state.
    pub fn state(&self) -> &BodyState {
        &self.state
    }

    /// Returns a mutable reference to the body's kinematic state.
    ///
    /// This is the integrator's access path; every field may be read and
    /// written directly.
    pub fn state_mut(&mut self) -> &mut BodyState {
        &mut self.state
    }

    /// Returns a reference to the body's geometry.
    pub fn geometry(&self) -> &Arc<dyn Shape> {
        &self.geometry
    }

    /// Sets the geometry of the body.
    pub fn set_geometry(&mut self, geometry: Arc<dyn Shape>) {
        self.geometry = geometry;
    }

    /// Returns the moment of inertia of the body about its center of mass,
    /// or [`None`] if it has not been determined.
    pub fn moment_of_inertia(&self) -> Option<fph> {
        self.moment_of_inertia
    }

    /// Sets the moment of inertia of the body about its center of mass.
    pub fn set_moment_of_inertia(&mut self, moment_of_inertia: Option<fph>) {
        self.moment_of_inertia = moment_of_inertia;
    }

    /// Returns the handle of the world the body is attached to, or [`None`]
    /// if it is not attached to any world.
    pub fn world(&self) -> Option<WorldHandle> {
        self.world
    }

    /// Returns the style payload consumed by the renderer, if any.
    pub fn style(&self) -> Option<&str> {
        self.style.as_deref()
    }

    /// Sets the style payload consumed by the renderer.
    pub fn set_style(&mut self, style: Option<String>) {
        self.style = style;
    }

    /// Whether the body responds to forces.
    pub fn is_dynamic(&self) -> bool {
        self.config.treatment == Treatment::Dynamic
    }

    /// Adds the given acceleration to the body's linear acceleration.
    ///
    /// Bodies that are not dynamic are left untouched. Every force applied
    /// to the body takes effect through this method.
    pub fn accelerate(&mut self, acceleration: &Acceleration) -> &mut Self {
        if self.is_dynamic() {
            self.state.acc += acceleration;
        }
        self
    }

    /// Applies the given force at the body's center of mass.
    ///
    /// The force is converted to an acceleration and routed through
    /// [`accelerate`](Self::accelerate), so bodies that are not dynamic are
    /// unaffected. The angular state is never touched.
    ///
    /// # Errors
    /// Returns an error if the force has non-finite components.
    pub fn apply_force(&mut self, force: &Force) -> Result<&mut Self, BodyError> {
        validate_finite_vector("force", force)?;
        self.accelerate_from_force(force);
        Ok(self)
    }

    /// Applies the given force to the body at the given offset from its
    /// center of mass (with world-aligned axes).
    ///
    /// In addition to the linear effect of [`apply_force`](Self::apply_force),
    /// the force exerts a torque when the body's moment of inertia is known.
    /// Since the orientation angle is clockwise-positive while the scalar
    /// cross product is counterclockwise-positive, the angular acceleration
    /// changes by `-cross(force_position, force) / moment_of_inertia`. With
    /// the moment of inertia undetermined, the angular state is left
    /// untouched. Bodies that are not dynamic are unaffected.
    ///
    /// # Errors
    /// Returns an error if the force or the offset has non-finite
    /// components.
    pub fn apply_force_at_point(
        &mut self,
        force: &Force,
        force_position: &Vector2<fph>,
    ) -> Result<&mut Self, BodyError> {
        validate_finite_vector("force", force)?;
        validate_finite_vector("force position", force_position)?;

        if self.is_dynamic()
            && let Some(moment_of_inertia) = self.moment_of_inertia
        {
            self.state.angular.acc -=
                quantities::compute_torque(force_position, force) / moment_of_inertia;
        }

        self.accelerate_from_force(force);
        Ok(self)
    }

    /// Attaches the body to the world with the given handle, or detaches it
    /// when given [`None`].
    ///
    /// If the body is currently attached, the body type's
    /// [`disconnect`](BodyType::disconnect) hook runs for the old world
    /// before the change, and if the body ends up attached, the
    /// [`connect`](BodyType::connect) hook runs for the new world after it.
    /// Detaching a body that was never attached invokes no hook.
    pub fn set_world(&mut self, world: Option<WorldHandle>) -> &mut Self {
        let handler = Arc::clone(&self.handler);

        if let Some(old_world) = self.world {
            log::trace!("Disconnecting body {} from world {}", self.id, old_world);
            handler.disconnect(self, old_world);
        }

        self.world = world;

        if let Some(new_world) = world {
            log::trace!("Connecting body {} to world {}", self.id, new_world);
            handler.connect(self, new_world);
        }

        self
    }

    /// Computes the axis-aligned bounding box of the body in world space,
    /// with the geometry rotated to the body's current orientation angle
    /// and centered on the body's current position.
    pub fn aabb(&self) -> Aabb {
        self.geometry
            .bounding_box(self.state.angular.pos)
            .translated(&self.state.pos.coords)
    }

    /// Recalculates properties derived from the body's configuration and
    /// geometry, by dispatching to the body type the body was created as.
    pub fn recalc(&mut self) -> &mut Self {
        let handler = Arc::clone(&self.handler);
        handler.recalc(self);
        self
    }

    fn accelerate_from_force(&mut self, force: &Force) {
        let mut acceleration = ScratchPool::vector();
        *acceleration = force / self.config.mass;
        self.accelerate(&acceleration);
    }
}

fn validate_finite_vector(name: &str, vector: &Vector2<fph>) -> Result<(), BodyError> {
    if vector.iter().all(|component| component.is_finite()) {
        Ok(())
    } else {
        Err(BodyError::InvalidArgument(format!(
            "{name} is not finite: [{}, {}]",
            vector.x, vector.y
        )))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{config::BodyOptions, geometry::Rectangle, quantities::Position};
    use approx::assert_abs_diff_eq;
    use nalgebra::{point, vector};
    use proptest::prelude::*;
    use std::f64::consts::FRAC_PI_2;
    use std::sync::Mutex;

    #[derive(Debug)]
    struct PlainBodyType;

    impl BodyType for PlainBodyType {
        fn init(&self, _body: &mut Body, _options: &BodyOptions) -> Result<(), BodyError> {
            Ok(())
        }
    }

    #[derive(Debug, Default)]
    struct RecordingBodyType {
        events: Mutex<Vec<String>>,
    }

    impl RecordingBodyType {
        fn events(&self) -> Vec<String> {
            self.events.lock().unwrap().clone()
        }

        fn record(&self, event: String) {
            self.events.lock().unwrap().push(event);
        }
    }

    impl BodyType for RecordingBodyType {
        fn init(&self, _body: &mut Body, _options: &BodyOptions) -> Result<(), BodyError> {
            Ok(())
        }

        fn recalc(&self, _body: &mut Body) {
            self.record("recalc".to_string());
        }

        fn connect(&self, _body: &mut Body, world: WorldHandle) {
            self.record(format!("connect {world}"));
        }

        fn disconnect(&self, _body: &mut Body, world: WorldHandle) {
            self.record(format!("disconnect {world}"));
        }
    }

    fn body_with_config(config: BodyConfig) -> Body {
        Body::new(
            BodyId::from_u64(0),
            Arc::from("plain"),
            Arc::new(PlainBodyType),
            config,
            BodyState::default(),
        )
    }

    fn body_with_handler(handler: Arc<RecordingBodyType>) -> Body {
        Body::new(
            BodyId::from_u64(0),
            Arc::from("recording"),
            handler,
            BodyConfig::default(),
            BodyState::default(),
        )
    }

    fn dummy_body() -> Body {
        body_with_config(BodyConfig::default())
    }

    fn body_with_treatment(treatment: Treatment) -> Body {
        body_with_config(BodyConfig {
            treatment,
            ..BodyConfig::default()
        })
    }

    prop_compose! {
        fn vector_strategy(max_coord: fph)(
            coord_x in -max_coord..max_coord,
            coord_y in -max_coord..max_coord,
        ) -> Vector2<fph> {
            vector![coord_x, coord_y]
        }
    }

    prop_compose! {
        fn position_strategy(max_position_coord: fph)(
            position_coord_x in -max_position_coord..max_position_coord,
            position_coord_y in -max_position_coord..max_position_coord,
        ) -> Position {
            point![position_coord_x, position_coord_y]
        }
    }

    #[test]
    fn body_exposes_identity_and_type_name() {
        let body = Body::new(
            BodyId::from_u64(7),
            Arc::from("plain"),
            Arc::new(PlainBodyType),
            BodyConfig::default(),
            BodyState::default(),
        );
        assert_eq!(body.id(), BodyId::from_u64(7));
        assert_eq!(body.id().to_string(), "7");
        assert_eq!(body.type_name(), "plain");
        assert_eq!(body.geometry().name(), "point");
        assert_eq!(body.world(), None);
        assert_eq!(body.moment_of_inertia(), None);
    }

    #[test]
    fn accelerating_dynamic_body_adds_to_acceleration() {
        let mut body = dummy_body();
        body.accelerate(&vector![1.0, -2.0])
            .accelerate(&vector![0.5, 0.5]);
        assert_abs_diff_eq!(body.state().acc, vector![1.5, -1.5]);
    }

    #[test]
    fn accelerating_non_dynamic_body_does_nothing() {
        for treatment in [Treatment::Kinematic, Treatment::Static] {
            let mut body = body_with_treatment(treatment);
            body.accelerate(&vector![1.0, -2.0]);
            assert_abs_diff_eq!(body.state().acc, Acceleration::zeros());
        }
    }

    #[test]
    fn applying_force_divides_by_mass() {
        let mut body = body_with_config(BodyConfig {
            mass: 2.0,
            ..BodyConfig::default()
        });
        body.apply_force(&vector![4.0, 0.0]).unwrap();
        assert_abs_diff_eq!(body.state().acc, vector![2.0, 0.0]);
    }

    #[test]
    fn applying_force_at_center_of_mass_never_touches_angular_state() {
        let mut body = dummy_body();
        body.set_moment_of_inertia(Some(8.0));
        body.apply_force(&vector![4.0, 3.0]).unwrap();
        assert_abs_diff_eq!(body.state().angular.acc, 0.0);
    }

    #[test]
    fn applying_force_at_point_applies_torque_and_linear_acceleration() {
        let mut body = body_with_config(BodyConfig {
            mass: 2.0,
            ..BodyConfig::default()
        });
        body.set_moment_of_inertia(Some(8.0));
        body.apply_force_at_point(&vector![4.0, 0.0], &vector![0.0, 2.0])
            .unwrap();
        assert_abs_diff_eq!(body.state().acc, vector![2.0, 0.0]);
        assert_abs_diff_eq!(body.state().angular.acc, 1.0);
    }

    #[test]
    fn applying_force_at_point_without_moment_of_inertia_leaves_angular_state() {
        let mut body = dummy_body();
        body.apply_force_at_point(&vector![4.0, 0.0], &vector![0.0, 2.0])
            .unwrap();
        assert_abs_diff_eq!(body.state().angular.acc, 0.0);
        assert_abs_diff_eq!(body.state().acc, vector![4.0, 0.0]);
    }

    #[test]
    fn applying_force_to_non_dynamic_body_does_nothing() {
        for treatment in [Treatment::Kinematic, Treatment::Static] {
            let mut body = body_with_treatment(treatment);
            body.set_moment_of_inertia(Some(8.0));
            body.apply_force_at_point(&vector![4.0, 0.0], &vector![0.0, 2.0])
                .unwrap();
            assert_abs_diff_eq!(body.state().acc, Acceleration::zeros());
            assert_abs_diff_eq!(body.state().angular.acc, 0.0);
        }
    }

    #[test]
    fn applying_non_finite_force_fails_without_mutating_state() {
        let mut body = dummy_body();
        body.set_moment_of_inertia(Some(8.0));
        let result = body.apply_force(&vector![fph::NAN, 0.0]);
        assert!(matches!(result, Err(BodyError::InvalidArgument(_))));
        assert_abs_diff_eq!(body.state().acc, Acceleration::zeros());
        assert_abs_diff_eq!(body.state().angular.acc, 0.0);
    }

    #[test]
    fn applying_force_at_non_finite_point_fails_without_mutating_state() {
        let mut body = dummy_body();
        body.set_moment_of_inertia(Some(8.0));
        let result = body.apply_force_at_point(&vector![1.0, 0.0], &vector![0.0, fph::INFINITY]);
        assert!(matches!(result, Err(BodyError::InvalidArgument(_))));
        assert_abs_diff_eq!(body.state().acc, Acceleration::zeros());
        assert_abs_diff_eq!(body.state().angular.acc, 0.0);
    }

    #[test]
    fn force_application_leaves_no_scratch_vectors_checked_out() {
        let mut body = dummy_body();
        body.set_moment_of_inertia(Some(8.0));
        body.apply_force(&vector![1.0, 2.0]).unwrap();
        body.apply_force_at_point(&vector![1.0, 2.0], &vector![3.0, 4.0])
            .unwrap();
        assert!(body.apply_force(&vector![fph::NAN, 0.0]).is_err());
        assert_eq!(ScratchPool::live_checkouts(), 0);
    }

    #[test]
    fn attaching_and_detaching_fires_hooks_in_order() {
        let handler = Arc::new(RecordingBodyType::default());
        let mut body = body_with_handler(Arc::clone(&handler));

        let world_1 = WorldHandle::from_u64(1);
        let world_2 = WorldHandle::from_u64(2);

        body.set_world(Some(world_1));
        assert_eq!(body.world(), Some(world_1));

        body.set_world(Some(world_2));
        assert_eq!(body.world(), Some(world_2));

        body.set_world(None);
        assert_eq!(body.world(), None);

        assert_eq!(
            handler.events(),
            vec![
                "connect 1".to_string(),
                "disconnect 1".to_string(),
                "connect 2".to_string(),
                "disconnect 2".to_string(),
            ]
        );
    }

    #[test]
    fn detaching_never_attached_body_fires_no_hooks() {
        let handler = Arc::new(RecordingBodyType::default());
        let mut body = body_with_handler(Arc::clone(&handler));
        body.set_world(None);
        assert_eq!(body.world(), None);
        assert!(handler.events().is_empty());
    }

    #[test]
    fn recalc_dispatches_to_body_type() {
        let handler = Arc::new(RecordingBodyType::default());
        let mut body = body_with_handler(Arc::clone(&handler));
        body.recalc();
        assert_eq!(handler.events(), vec!["recalc".to_string()]);
    }

    #[test]
    fn aabb_follows_geometry_rotated_to_current_angle() {
        let mut body = dummy_body();
        body.set_geometry(Arc::new(Rectangle::new(2.0, 1.0)));
        body.state_mut().angular.pos = FRAC_PI_2;
        let aabb = body.aabb();
        assert_abs_diff_eq!(aabb.extent_x(), 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(aabb.extent_y(), 2.0, epsilon = 1e-12);
    }

    #[test]
    fn aabb_of_default_geometry_is_degenerate_at_body_position() {
        let mut body = dummy_body();
        body.state_mut().pos = point![3.0, -4.0];
        let aabb = body.aabb();
        assert_abs_diff_eq!(*aabb.lower_corner(), point![3.0, -4.0]);
        assert_abs_diff_eq!(*aabb.upper_corner(), point![3.0, -4.0]);
    }

    proptest! {
        #[test]
        fn torque_changes_angular_acceleration_by_scaled_cross_product(
            force in vector_strategy(1e3),
            force_position in vector_strategy(1e3),
        ) {
            let moment_of_inertia = 8.0;
            let mut body = dummy_body();
            body.set_moment_of_inertia(Some(moment_of_inertia));
            body.apply_force_at_point(&force, &force_position).unwrap();
            assert_abs_diff_eq!(
                body.state().angular.acc,
                -quantities::cross(&force_position, &force) / moment_of_inertia
            );
        }

        #[test]
        fn aabb_translates_with_position(
            position in position_strategy(1e3),
            displacement in vector_strategy(1e3),
        ) {
            let mut body = dummy_body();
            body.set_geometry(Arc::new(Rectangle::new(2.0, 1.0)));
            body.state_mut().angular.pos = 0.3;

            body.state_mut().pos = position;
            let aabb = body.aabb();

            body.state_mut().pos = position + displacement;
            let displaced_aabb = body.aabb();

            assert_abs_diff_eq!(
                *displaced_aabb.lower_corner(),
                aabb.lower_corner() + displacement,
                epsilon = 1e-9
            );
            assert_abs_diff_eq!(
                *displaced_aabb.upper_corner(),
                aabb.upper_corner() + displacement,
                epsilon = 1e-9
            );
        }
    }
}
