//! Builders wiring repositories into the domain services.

use std::sync::Arc;

use mockable::{Clock, DefaultClock};

use backend::domain::ports::{
    CardSelectionQuery, CorpusImportCommand, ProgressRepository, UserRepository,
    VocabularyRepository,
};
use backend::domain::{
    CardSelectionService, CorpusImportService, ProgressService, SelectionPolicy, StatsService,
    UserLoginService,
};
use backend::inbound::http::state::{HttpState, HttpStatePorts};
use backend::outbound::corpus::CsvCorpusSource;
use backend::outbound::memory::InMemoryStore;
use backend::outbound::persistence::{
    DieselProgressRepository, DieselUserRepository, DieselVocabularyRepository,
};

use super::ServerConfig;

/// Services built over one set of stores.
pub(crate) struct AppServices {
    pub(crate) http_state: HttpState,
    pub(crate) importer: Arc<dyn CorpusImportCommand>,
}

fn card_selection<V, P>(
    vocabulary: Arc<V>,
    progress: Arc<P>,
    config: &ServerConfig,
) -> Arc<dyn CardSelectionQuery>
where
    V: VocabularyRepository + 'static,
    P: ProgressRepository + 'static,
{
    let policy: SelectionPolicy = config.policy;
    match config.rng_seed {
        Some(seed) => Arc::new(CardSelectionService::with_seed(
            vocabulary, progress, policy, seed,
        )),
        None => Arc::new(CardSelectionService::new(vocabulary, progress, policy)),
    }
}

fn build_with_stores<U, V, P>(
    users: Arc<U>,
    vocabulary: Arc<V>,
    progress: Arc<P>,
    config: &ServerConfig,
) -> AppServices
where
    U: UserRepository + 'static,
    V: VocabularyRepository + 'static,
    P: ProgressRepository + 'static,
{
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    let http_state = HttpState::new(HttpStatePorts {
        login: Arc::new(UserLoginService::new(users, clock.clone())),
        cards: card_selection(vocabulary.clone(), progress.clone(), config),
        progress: Arc::new(ProgressService::new(
            vocabulary.clone(),
            progress.clone(),
            clock,
        )),
        stats: Arc::new(StatsService::new(vocabulary.clone(), progress)),
    });
    let importer = Arc::new(CorpusImportService::new(
        Arc::new(CsvCorpusSource::new()),
        vocabulary,
    ));
    AppServices {
        http_state,
        importer,
    }
}

/// Use PostgreSQL when a pool is configured, process memory otherwise.
pub(crate) fn build_services(config: &ServerConfig) -> AppServices {
    match &config.db_pool {
        Some(pool) => build_with_stores(
            Arc::new(DieselUserRepository::new(pool.clone())),
            Arc::new(DieselVocabularyRepository::new(pool.clone())),
            Arc::new(DieselProgressRepository::new(pool.clone())),
            config,
        ),
        None => {
            let store = Arc::new(InMemoryStore::new());
            build_with_stores(store.clone(), store.clone(), store, config)
        }
    }
}
