/*
 * Responsibility
 * - Shared context bound to the Router (AppState)
 *   - gate: admission decision engine, upstream: forwarding client
 * - Clone is cheap (Arc inside)
 */
use std::sync::Arc;

use crate::gate::AdmissionGate;
use crate::services::upstream::Upstream;

#[derive(Clone, Debug)]
pub struct AppState {
    pub gate: Arc<AdmissionGate>,
    pub upstream: Arc<Upstream>,
}

impl AppState {
    pub fn new(gate: Arc<AdmissionGate>, upstream: Arc<Upstream>) -> Self {
        Self { gate, upstream }
    }
}
