//! Registration of body types and creation of bodies.

use crate::{
    body::{Body, BodyId, WorldHandle},
    config::{BodyConfig, BodyOptions},
    error::BodyError,
    quantities::{Position, Velocity},
    state::BodyState,
};
use std::{
    collections::HashMap,
    fmt,
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    },
};

/// Behavior shared by all bodies created as a given named type.
///
/// A body type contributes configuration defaults, initializes each new
/// body, recalculates derived properties, and observes world attachment.
/// The hooks run after base initialization of the body has completed, so
/// they may use every [`Body`] accessor.
pub trait BodyType: fmt::Debug + Send + Sync {
    /// Returns the configuration a body of this type starts out with,
    /// before any creation options are applied.
    fn default_config(&self) -> BodyConfig {
        BodyConfig::default()
    }

    /// Initializes the given newly created body.
    ///
    /// The body's configuration and kinematic state have already been
    /// resolved when this runs. Typical implementations validate
    /// type-specific configuration entries and compute derived properties.
    ///
    /// # Errors
    /// Returns an error if the body cannot be initialized, in which case
    /// the body is discarded.
    fn init(&self, body: &mut Body, options: &BodyOptions) -> Result<(), BodyError>;

    /// Recalculates the given body's derived properties after its
    /// configuration or geometry has changed.
    fn recalc(&self, body: &mut Body) {
        let _ = body;
    }

    /// Called after the given body has been attached to the world with the
    /// given handle.
    fn connect(&self, body: &mut Body, world: WorldHandle) {
        let _ = (body, world);
    }

    /// Called before the given body is detached from the world with the
    /// given handle.
    fn disconnect(&self, body: &mut Body, world: WorldHandle) {
        let _ = (body, world);
    }
}

/// Allocator of unique [`BodyId`]s.
///
/// Every clone draws from the same sequence, so bodies created through
/// different clones never share an ID.
#[derive(Clone, Debug)]
pub struct BodyIdAllocator {
    next_id: Arc<AtomicU64>,
}

/// Registry of named body types, used to create [`Body`] instances.
#[derive(Debug)]
pub struct BodyRegistry {
    types: HashMap<String, Arc<dyn BodyType>>,
    id_allocator: BodyIdAllocator,
}

impl BodyIdAllocator {
    /// Creates a new allocator whose first provided ID is zero.
    pub fn new() -> Self {
        Self::starting_at(BodyId::from_u64(0))
    }

    /// Creates a new allocator whose first provided ID is the given one.
    pub fn starting_at(first_id: BodyId) -> Self {
        Self {
            next_id: Arc::new(AtomicU64::new(first_id.as_u64())),
        }
    }

    /// Provides the next unused [`BodyId`].
    pub fn provide_id(&self) -> BodyId {
        BodyId::from_u64(self.next_id.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for BodyIdAllocator {
    fn default() -> Self {
        Self::new()
    }
}

impl BodyRegistry {
    /// Creates a new registry with no defined body types.
    pub fn new() -> Self {
        Self::with_id_allocator(BodyIdAllocator::new())
    }

    /// Creates a new registry with no defined body types, drawing body IDs
    /// from the given allocator.
    pub fn with_id_allocator(id_allocator: BodyIdAllocator) -> Self {
        Self {
            types: HashMap::new(),
            id_allocator,
        }
    }

    /// Creates a new registry with the standard body types defined.
    pub fn with_standard_types() -> Self {
        let mut registry = Self::new();
        crate::body_types::register_standard(&mut registry)
            .expect("Standard body type names should not collide");
        registry
    }

    /// Returns a reference to the registry's [`BodyIdAllocator`].
    pub fn id_allocator(&self) -> &BodyIdAllocator {
        &self.id_allocator
    }

    /// Defines the body type with the given name.
    ///
    /// # Errors
    /// Returns an error if a body type with the given name has already been
    /// defined.
    pub fn define(
        &mut self,
        name: impl Into<String>,
        body_type: impl BodyType + 'static,
    ) -> Result<(), BodyError> {
        let name = name.into();
        if self.types.contains_key(&name) {
            return Err(BodyError::DuplicateBodyType(name));
        }
        log::debug!("Defining body type `{name}`");
        self.types.insert(name, Arc::new(body_type));
        Ok(())
    }

    /// Whether a body type with the given name has been defined.
    pub fn is_defined(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    /// Returns an iterator over the names of all defined body types.
    pub fn defined_type_names(&self) -> impl Iterator<Item = &str> {
        self.types.keys().map(String::as_str)
    }

    /// Creates a new body of the type with the given name.
    ///
    /// The body's configuration is resolved by layering the given options
    /// over the type's default configuration, and its kinematic state is
    /// seeded from the options. The type's [`init`](BodyType::init) hook
    /// runs last.
    ///
    /// # Errors
    /// Returns an error if no body type with the given name has been
    /// defined, if the resolved configuration is invalid or if the type
    /// fails to initialize the body.
    pub fn create(&self, name: &str, options: &BodyOptions) -> Result<Body, BodyError> {
        let handler = self
            .types
            .get(name)
            .ok_or_else(|| BodyError::UnknownBodyType(name.to_string()))?;

        let mut config = handler.default_config();
        options.apply_to(&mut config);
        config.validate()?;

        let state = BodyState::new(
            options.position.unwrap_or_else(Position::origin),
            options.velocity.unwrap_or_else(Velocity::zeros),
            options.angular_position.unwrap_or(0.0),
            options.angular_velocity.unwrap_or(0.0),
        );

        let id = self.id_allocator.provide_id();
        let mut body = Body::new(id, Arc::from(name), Arc::clone(handler), config, state);

        handler.init(&mut body, options)?;

        log::trace!("Created body {id} of type `{name}`");
        Ok(body)
    }
}

impl Default for BodyRegistry {
    fn default() -> Self {
        Self::new()
    }
}
