//! Services module
//!
//! Business logic: the match aggregate, the surface broadcast fan-out and the
//! outbound transport seam.

pub mod broadcast;
pub mod matches;
pub mod transport;

pub use broadcast::BroadcastService;
pub use matches::{MatchService, UserProfile};
pub use transport::{SurfaceTransport, TelegramTransport};

use std::sync::Arc;

use crate::database::store::MatchStore;

/// Bundle of all services, injected into every handler.
#[derive(Clone)]
pub struct ServiceFactory {
    pub matches: MatchService,
    pub broadcast: BroadcastService,
}

impl ServiceFactory {
    pub fn new(store: Arc<dyn MatchStore>, transport: Arc<dyn SurfaceTransport>) -> Self {
        Self {
            matches: MatchService::new(store.clone()),
            broadcast: BroadcastService::new(store, transport),
        }
    }
}
