//! Tracker facade
//!
//! Owns the registry, the protocol table, and the set of attached taps.
//! Session-lifecycle code drives it with exactly two calls per connection:
//! [`Tracker::attach`] at session start, [`Tracker::detach`] at disconnect.
//! Consumers needing an entity's live location go through
//! [`Tracker::lookup`] / [`Tracker::get_or_create`].

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::location::LocationHandle;
use crate::protocol::constants::WORLD_MESSAGE_TAG;
use crate::protocol::ProtocolTable;
use crate::registry::{LocationRegistry, SessionKey};

use super::{FrameChain, FrameTap, LocationInterceptor};

/// Tracker configuration
#[derive(Debug, Clone)]
pub struct TrackerConfig {
    /// Tag of the world identity side-channel message
    pub world_message_tag: String,

    /// Frame classification table
    pub table: ProtocolTable,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            world_message_tag: WORLD_MESSAGE_TAG.to_owned(),
            table: ProtocolTable::vanilla(),
        }
    }
}

impl TrackerConfig {
    /// Set the side-channel tag
    pub fn world_message_tag(mut self, tag: impl Into<String>) -> Self {
        self.world_message_tag = tag.into();
        self
    }

    /// Set the frame classification table
    pub fn table(mut self, table: ProtocolTable) -> Self {
        self.table = table;
        self
    }
}

struct AttachedTap {
    tap: Arc<LocationInterceptor>,
    chain: Arc<dyn FrameChain>,
}

/// Relay-side entry point for location tracking
pub struct Tracker {
    config: TrackerConfig,
    registry: Arc<LocationRegistry>,
    table: Arc<ProtocolTable>,
    attached: RwLock<HashMap<SessionKey, AttachedTap>>,
}

impl Tracker {
    /// Create a tracker with default configuration
    pub fn new() -> Self {
        Self::with_config(TrackerConfig::default())
    }

    /// Create a tracker with custom configuration
    pub fn with_config(config: TrackerConfig) -> Self {
        let table = Arc::new(config.table.clone());
        Self {
            config,
            registry: Arc::new(LocationRegistry::new()),
            table,
            attached: RwLock::new(HashMap::new()),
        }
    }

    /// Get a reference to the location registry
    pub fn registry(&self) -> &Arc<LocationRegistry> {
        &self.registry
    }

    /// Get the live record for a session, if one exists
    pub fn lookup(&self, key: SessionKey) -> Option<LocationHandle> {
        self.registry.lookup(key)
    }

    /// Get the live record for a session, creating it on first access
    pub fn get_or_create(&self, key: SessionKey) -> LocationHandle {
        self.registry.get_or_create(key)
    }

    /// Install a tap into a connection's frame chain
    ///
    /// Returns the installed tap, or `None` when the chain rejects the
    /// insertion — in that case a warning is logged and the session simply
    /// goes untracked; the stream itself is unaffected. Attaching a session
    /// that is already attached returns the existing tap.
    pub async fn attach(
        &self,
        key: SessionKey,
        chain: Arc<dyn FrameChain>,
    ) -> Option<Arc<LocationInterceptor>> {
        let mut attached = self.attached.write().await;

        if let Some(existing) = attached.get(&key) {
            tracing::debug!(session = %key, "Session already attached");
            return Some(Arc::clone(&existing.tap));
        }

        let tap = Arc::new(LocationInterceptor::new(
            key,
            Arc::clone(&self.registry),
            Arc::clone(&self.table),
            self.config.world_message_tag.clone(),
        ));

        let dyn_tap: Arc<dyn FrameTap> = tap.clone();
        if let Err(e) = chain.install(dyn_tap) {
            tracing::warn!(
                session = %key,
                error = %e,
                "Failed to install frame tap, location tracking disabled for this session"
            );
            return None;
        }

        tracing::debug!(session = %key, "Interceptor attached");
        attached.insert(key, AttachedTap { tap: Arc::clone(&tap), chain });
        Some(tap)
    }

    /// Tear down a session: uninstall its tap and discard its record
    ///
    /// Idempotent — detaching a session that was never attached (or already
    /// detached) is a no-op. Safe to call while frames for the session are
    /// still mid-flight; a frame that loses the race sees a detached tap.
    pub async fn detach(&self, key: SessionKey) {
        let removed = self.attached.write().await.remove(&key);
        if let Some(entry) = removed {
            entry.tap.detach();
            entry.chain.uninstall();
            tracing::debug!(session = %key, "Interceptor detached");
        }
        self.registry.remove(key);
    }

    /// Number of currently attached sessions
    pub async fn attached_count(&self) -> usize {
        self.attached.read().await.len()
    }
}

impl Default for Tracker {
    fn default() -> Self {
        Self::new()
    }
}
