//! Location values
//!
//! A [`Location`] is a detached snapshot of an entity's position,
//! orientation, and world identity. Freshly constructed locations hold
//! sentinel values (`NaN` coordinates, `-1` angles, no dimension, no world)
//! meaning "not yet observed" — distinct from a present zero.
//!
//! The live, registry-owned counterpart is [`LocationHandle`]; a handle
//! keeps mutating after it is handed out, a `Location` never does. The only
//! way from one to the other is [`LocationHandle::snapshot`].
//!
//! Fields form four independently updated groups: position + on_ground,
//! yaw + pitch, dimension, and world identity. A location can have a known
//! position and an unknown world at any time.

use uuid::Uuid;

pub mod dimension;
mod handle;

pub use dimension::Dimension;
pub use handle::LocationHandle;

use crate::protocol::constants::LOOK_UNSET;

/// A point-in-time location snapshot
///
/// Equality and hashing compare the exact bit patterns of x, y, z, yaw and
/// pitch, plus dimension and world UUID. The coordinate sentinel is the
/// canonical `f64::NAN` constant, so two untouched locations compare equal;
/// a `NaN` with any other payload does not.
#[derive(Debug, Clone)]
pub struct Location {
    x: f64,
    y: f64,
    z: f64,
    yaw: f32,
    pitch: f32,
    on_ground: bool,
    dimension: Option<Dimension>,
    world_name: Option<String>,
    world_uuid: Option<Uuid>,
}

impl Location {
    /// Create a location with every field unobserved
    pub fn new() -> Self {
        Self {
            x: f64::NAN,
            y: f64::NAN,
            z: f64::NAN,
            yaw: LOOK_UNSET,
            pitch: LOOK_UNSET,
            on_ground: false,
            dimension: None,
            world_name: None,
            world_uuid: None,
        }
    }

    /// Create a location at the given coordinates, everything else unobserved
    pub fn from_position(x: f64, y: f64, z: f64) -> Self {
        let mut loc = Self::new();
        loc.set_position(x, y, z, false);
        loc
    }

    /// Set yaw and pitch, consuming self
    pub fn with_look(mut self, yaw: f32, pitch: f32) -> Self {
        self.set_look(yaw, pitch);
        self
    }

    /// Set the on-ground flag, consuming self
    pub fn with_on_ground(mut self, on_ground: bool) -> Self {
        self.on_ground = on_ground;
        self
    }

    /// Set the world identity, consuming self
    pub fn with_world(mut self, uuid: Uuid, name: impl Into<String>) -> Self {
        self.set_world(uuid, name.into());
        self
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    pub fn z(&self) -> f64 {
        self.z
    }

    /// Block column x (floor toward negative infinity)
    pub fn block_x(&self) -> i64 {
        self.x.floor() as i64
    }

    /// Block column y
    pub fn block_y(&self) -> i64 {
        self.y.floor() as i64
    }

    /// Block column z
    pub fn block_z(&self) -> i64 {
        self.z.floor() as i64
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    pub fn on_ground(&self) -> bool {
        self.on_ground
    }

    pub fn dimension(&self) -> Option<Dimension> {
        self.dimension
    }

    pub fn world_name(&self) -> Option<&str> {
        self.world_name.as_deref()
    }

    pub fn world_uuid(&self) -> Option<Uuid> {
        self.world_uuid
    }

    /// Whether a position frame has been observed yet
    pub fn has_position(&self) -> bool {
        !self.x.is_nan()
    }

    // Group mutators. Only the registry side (via LocationHandle) uses these
    // on live records; each sets its whole field group at once.

    pub(crate) fn set_position(&mut self, x: f64, y: f64, z: f64, on_ground: bool) {
        self.x = x;
        self.y = y;
        self.z = z;
        self.on_ground = on_ground;
    }

    pub(crate) fn set_look(&mut self, yaw: f32, pitch: f32) {
        self.yaw = yaw;
        self.pitch = pitch;
    }

    pub(crate) fn set_dimension(&mut self, dimension: Option<Dimension>) {
        self.dimension = dimension;
    }

    pub(crate) fn set_world(&mut self, uuid: Uuid, name: String) {
        self.world_uuid = Some(uuid);
        self.world_name = Some(name);
    }

    /// Component-wise sum of the coordinates
    ///
    /// on_ground, yaw, pitch and world identity come from `self` only, and
    /// the dimension of the result is always unset. Surprising but
    /// intentional; callers relying on the right operand's metadata should
    /// swap the operands.
    pub fn add(&self, other: &Location) -> Location {
        let mut loc = Location::new();
        loc.set_position(
            self.x + other.x,
            self.y + other.y,
            self.z + other.z,
            self.on_ground,
        );
        loc.set_look(self.yaw, self.pitch);
        if let (Some(uuid), Some(name)) = (self.world_uuid, self.world_name.clone()) {
            loc.set_world(uuid, name);
        }
        loc
    }

    /// Component-wise difference of the coordinates
    ///
    /// Metadata handling matches [`Location::add`].
    pub fn subtract(&self, other: &Location) -> Location {
        let mut loc = Location::new();
        loc.set_position(
            self.x - other.x,
            self.y - other.y,
            self.z - other.z,
            self.on_ground,
        );
        loc.set_look(self.yaw, self.pitch);
        if let (Some(uuid), Some(name)) = (self.world_uuid, self.world_name.clone()) {
            loc.set_world(uuid, name);
        }
        loc
    }

    /// Scale the coordinates, keeping every other field
    pub fn multiply(&self, m: f64) -> Location {
        let mut loc = self.clone();
        loc.set_position(self.x * m, self.y * m, self.z * m, self.on_ground);
        loc
    }

    /// Euclidean norm from the origin
    pub fn length(&self) -> f64 {
        self.length_squared().sqrt()
    }

    /// Squared norm; the fast path when only comparing magnitudes
    pub fn length_squared(&self) -> f64 {
        self.x * self.x + self.y * self.y + self.z * self.z
    }

    /// Euclidean distance to another location
    pub fn distance(&self, other: &Location) -> f64 {
        self.distance_squared(other).sqrt()
    }

    /// Squared distance; the fast path when only comparing distances
    pub fn distance_squared(&self, other: &Location) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        dx * dx + dy * dy + dz * dz
    }
}

impl Default for Location {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for Location {
    fn eq(&self, other: &Self) -> bool {
        self.x.to_bits() == other.x.to_bits()
            && self.y.to_bits() == other.y.to_bits()
            && self.z.to_bits() == other.z.to_bits()
            && self.yaw.to_bits() == other.yaw.to_bits()
            && self.pitch.to_bits() == other.pitch.to_bits()
            && self.dimension == other.dimension
            && self.world_uuid == other.world_uuid
    }
}

impl Eq for Location {}

impl std::hash::Hash for Location {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.x.to_bits().hash(state);
        self.y.to_bits().hash(state);
        self.z.to_bits().hash(state);
        self.yaw.to_bits().hash(state);
        self.pitch.to_bits().hash(state);
        self.dimension.hash(state);
        self.world_uuid.hash(state);
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "({}, {}, {}) yaw={} pitch={}",
            self.x, self.y, self.z, self.yaw, self.pitch
        )?;
        if let Some(dim) = self.dimension {
            write!(f, " dim={}", dim)?;
        }
        if let Some(name) = &self.world_name {
            write!(f, " world={}", name)?;
        }
        Ok(())
    }
}
