//! Server state management
//!
//! One game session shared by every request.

use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tictac_core::GameSession;

/// Server-wide shared state
pub struct ServerState {
    session: RwLock<GameSession>,
}

impl ServerState {
    pub fn new() -> Self {
        Self {
            session: RwLock::new(GameSession::new()),
        }
    }

    /// Read access to the session
    pub fn session(&self) -> RwLockReadGuard<'_, GameSession> {
        // Session operations never leave a half-applied state behind
        self.session.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Exclusive access for one user action
    pub fn session_mut(&self) -> RwLockWriteGuard<'_, GameSession> {
        self.session.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for ServerState {
    fn default() -> Self {
        Self::new()
    }
}
