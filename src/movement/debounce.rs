//! Movement domain: request/consume/grace-window bookkeeping for discrete actions.

use serde::{Deserialize, Serialize};

/// Which debounced channel an action belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionKind {
    Jump,
    Interact,
    Fire,
    Escape,
}

/// One debounced action channel.
///
/// A request fires at most once. After firing the channel stays consumed until
/// the downstream effect reports back through [`ActionRequest::resolve`] (or,
/// for jumps, [`ActionRequest::release`] on landing). Requests that wait longer
/// than the grace window are dropped without firing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActionRequest {
    requested: bool,
    consumed: bool,
    fired_this_frame: bool,
    time_since_requested: f32,
    grace_window: f32,
}

impl ActionRequest {
    pub fn new(grace_window: f32) -> Self {
        Self {
            requested: false,
            consumed: false,
            fired_this_frame: false,
            time_since_requested: f32::INFINITY,
            grace_window,
        }
    }

    pub fn is_requested(&self) -> bool {
        self.requested
    }

    pub fn is_consumed(&self) -> bool {
        self.consumed
    }

    pub fn fired_this_frame(&self) -> bool {
        self.fired_this_frame
    }

    pub fn time_since_requested(&self) -> f32 {
        self.time_since_requested
    }

    pub fn grace_window(&self) -> f32 {
        self.grace_window
    }

    pub fn request(&mut self) {
        self.requested = true;
        self.time_since_requested = 0.0;
    }

    /// Start a new frame for this channel.
    pub fn tick(&mut self, dt: f32) {
        self.fired_this_frame = false;
        self.time_since_requested += dt;
    }

    /// Fire if requested and either not yet consumed or still inside the grace window.
    pub fn try_fire(&mut self) -> bool {
        let eligible = !self.consumed || self.time_since_requested <= self.grace_window;
        self.try_fire_when(eligible)
    }

    /// Fire if requested, not consumed, and `allowed` holds.
    pub fn try_fire_gated(&mut self, allowed: bool) -> bool {
        let eligible = !self.consumed && allowed;
        self.try_fire_when(eligible)
    }

    fn try_fire_when(&mut self, eligible: bool) -> bool {
        if !self.requested || !eligible {
            return false;
        }
        self.requested = false;
        self.consumed = true;
        self.fired_this_frame = true;
        true
    }

    /// Drop a request that outlived the grace window. Returns true if one was dropped.
    pub fn expire(&mut self) -> bool {
        if self.requested && self.time_since_requested > self.grace_window {
            self.requested = false;
            return true;
        }
        false
    }

    /// Clear a stale consumed flag unless the action fired this frame.
    pub fn release(&mut self) {
        if !self.fired_this_frame {
            self.consumed = false;
        }
    }

    /// Downstream effect finished: drop stale requests, release, restart the clock.
    pub fn resolve(&mut self) -> bool {
        let dropped = self.expire();
        self.release();
        self.time_since_requested = 0.0;
        dropped
    }

    /// Mark any in-flight request as spent so it can never fire later.
    pub fn force_consume(&mut self) {
        self.requested = false;
        self.consumed = true;
        self.fired_this_frame = true;
    }
}
