//! Live location records
//!
//! A [`LocationHandle`] points at the single live record the registry owns
//! for one session. Every clone shares the same record, so an update applied
//! through the interceptor is immediately visible to every holder. Reading
//! always goes through [`LocationHandle::snapshot`], which yields a detached
//! [`Location`] that stops changing.

use std::sync::{Arc, Mutex, MutexGuard};

use uuid::Uuid;

use super::{Dimension, Location};

/// Handle to the live location record of one session
///
/// Cheap to clone; all clones observe the same record. Field groups are
/// updated atomically as units under the record's lock, so a snapshot never
/// sees a half-written group.
#[derive(Debug, Clone)]
pub struct LocationHandle {
    inner: Arc<Mutex<Location>>,
}

impl LocationHandle {
    /// Create a handle to a fresh, fully unobserved record
    pub(crate) fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(Location::new())),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Location> {
        // Poisoning is ignored; the record stays usable.
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Take a detached snapshot of the current state
    pub fn snapshot(&self) -> Location {
        self.lock().clone()
    }

    /// Whether two handles point at the same live record
    pub fn same_record(&self, other: &LocationHandle) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    pub(crate) fn update_position(&self, x: f64, y: f64, z: f64, on_ground: bool) {
        self.lock().set_position(x, y, z, on_ground);
    }

    pub(crate) fn update_look(&self, yaw: f32, pitch: f32) {
        self.lock().set_look(yaw, pitch);
    }

    pub(crate) fn update_dimension(&self, dimension: Option<Dimension>) {
        self.lock().set_dimension(dimension);
    }

    pub(crate) fn update_world(&self, uuid: Uuid, name: String) {
        self.lock().set_world(uuid, name);
    }
}
