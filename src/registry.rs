//! Session-to-engine mapping for hosting servers.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::config::PhysicsParameters;
use crate::engine::PhysicsEngine;
use crate::error::{PhysicsError, PhysicsResult};

/// An engine shared between a step driver and a command handler. The mutex
/// serializes access: a step runs to completion before any queued mutation is
/// applied, and vice versa.
pub type SharedEngine = Arc<Mutex<PhysicsEngine>>;

/// Explicit, caller-owned map from session id to engine.
///
/// The library keeps no process-wide state; a hosting server constructs one
/// registry, owns it, and hands out [`SharedEngine`] clones to whichever
/// tasks drive or mutate a session.
#[derive(Default)]
pub struct SimulationRegistry {
    sessions: HashMap<String, SharedEngine>,
}

impl SimulationRegistry {
    pub fn new() -> Self {
        Self {
            sessions: HashMap::new(),
        }
    }

    pub fn create(
        &mut self,
        session_id: &str,
        params: PhysicsParameters,
    ) -> PhysicsResult<SharedEngine> {
        if self.sessions.contains_key(session_id) {
            return Err(PhysicsError::Configuration(format!(
                "session '{session_id}' already exists"
            )));
        }

        let engine = Arc::new(Mutex::new(PhysicsEngine::new(params)?));
        self.sessions
            .insert(session_id.to_owned(), Arc::clone(&engine));
        Ok(engine)
    }

    pub fn get(&self, session_id: &str) -> Option<SharedEngine> {
        self.sessions.get(session_id).cloned()
    }

    pub fn remove(&mut self, session_id: &str) -> PhysicsResult<()> {
        self.sessions
            .remove(session_id)
            .map(|_| ())
            .ok_or_else(|| PhysicsError::NotFound(format!("session '{session_id}'")))
    }

    pub fn session_ids(&self) -> impl Iterator<Item = &str> {
        self.sessions.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_session_ids_are_rejected() {
        let mut registry = SimulationRegistry::new();
        registry
            .create("room-1", PhysicsParameters::default())
            .unwrap();
        let duplicate = registry.create("room-1", PhysicsParameters::default());
        assert!(matches!(duplicate, Err(PhysicsError::Configuration(_))));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn removed_sessions_stop_resolving() {
        let mut registry = SimulationRegistry::new();
        registry
            .create("room-2", PhysicsParameters::default())
            .unwrap();
        registry.remove("room-2").unwrap();
        assert!(registry.get("room-2").is_none());
        assert!(matches!(
            registry.remove("room-2"),
            Err(PhysicsError::NotFound(_))
        ));
    }

    #[test]
    fn shared_engines_serialize_commands_through_the_mutex() {
        let mut registry = SimulationRegistry::new();
        let engine = registry
            .create("room-3", PhysicsParameters::default())
            .unwrap();

        {
            let mut guard = engine.lock();
            guard
                .add_particle(crate::core::particle::Particle::builder())
                .unwrap();
        }
        assert_eq!(engine.lock().particle_count(), 1);
    }
}
