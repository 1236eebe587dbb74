//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{CardSelectionQuery, LoginService, ProgressCommand, StatsQuery};

/// Parameter object bundling the driving ports used by the HTTP handlers.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub login: Arc<dyn LoginService>,
    pub cards: Arc<dyn CardSelectionQuery>,
    pub progress: Arc<dyn ProgressCommand>,
    pub stats: Arc<dyn StatsQuery>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub login: Arc<dyn LoginService>,
    pub cards: Arc<dyn CardSelectionQuery>,
    pub progress: Arc<dyn ProgressCommand>,
    pub stats: Arc<dyn StatsQuery>,
}

impl From<HttpStatePorts> for HttpState {
    fn from(ports: HttpStatePorts) -> Self {
        Self::new(ports)
    }
}

impl HttpState {
    /// Construct state from a ports bundle.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use backend::domain::{
    ///     CardSelectionService, ProgressService, SelectionPolicy, StatsService, UserLoginService,
    /// };
    /// use backend::inbound::http::state::{HttpState, HttpStatePorts};
    /// use backend::outbound::memory::InMemoryStore;
    /// use mockable::DefaultClock;
    ///
    /// let store = Arc::new(InMemoryStore::new());
    /// let state = HttpState::new(HttpStatePorts {
    ///     login: Arc::new(UserLoginService::new(store.clone(), Arc::new(DefaultClock))),
    ///     cards: Arc::new(CardSelectionService::new(
    ///         store.clone(),
    ///         store.clone(),
    ///         SelectionPolicy::default(),
    ///     )),
    ///     progress: Arc::new(ProgressService::new(
    ///         store.clone(),
    ///         store.clone(),
    ///         Arc::new(DefaultClock),
    ///     )),
    ///     stats: Arc::new(StatsService::new(store.clone(), store)),
    /// });
    /// let _cards = state.cards.clone();
    /// ```
    pub fn new(ports: HttpStatePorts) -> Self {
        let HttpStatePorts {
            login,
            cards,
            progress,
            stats,
        } = ports;
        Self {
            login,
            cards,
            progress,
            stats,
        }
    }
}
