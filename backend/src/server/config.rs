//! Server settings loaded via OrthoConfig, plus the assembled
//! [`ServerConfig`] handed to [`super::create_server`].

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use ortho_config::OrthoConfig;
use serde::Deserialize;

use backend::domain::{
    DEFAULT_REVIEW_PROBABILITY, ParseSelectionPolicyError, ReviewProbability,
    ReviewProbabilityError, SelectionPolicy,
};
use backend::inbound::http::session_config::SessionSettings;
use backend::outbound::persistence::DbPool;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_CORPUS_PATH: &str = "data/vocabulary.csv";
const DEFAULT_SELECTION_POLICY: &str = "weighted";

/// Errors raised while interpreting [`AppSettings`].
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("invalid bind address `{value}`: {source}")]
    BindAddr {
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },
    #[error(transparent)]
    Policy(#[from] ParseSelectionPolicyError),
    #[error(transparent)]
    ReviewProbability(#[from] ReviewProbabilityError),
}

/// Process configuration read from CLI flags, `FLASHCARDS_*` variables and
/// configuration files.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "FLASHCARDS")]
pub struct AppSettings {
    /// PostgreSQL URL. The in-memory store is used when absent.
    pub database_url: Option<String>,
    /// Socket address to listen on.
    #[ortho_config(default = DEFAULT_BIND_ADDR.to_owned())]
    pub bind_addr: String,
    /// CSV corpus imported at startup.
    #[ortho_config(default = PathBuf::from(DEFAULT_CORPUS_PATH))]
    pub corpus_path: PathBuf,
    /// `weighted` or `new_first`.
    #[ortho_config(default = DEFAULT_SELECTION_POLICY.to_owned())]
    pub selection_policy: String,
    /// Chance of serving a Review card under the weighted policy.
    #[ortho_config(default = DEFAULT_REVIEW_PROBABILITY)]
    pub review_probability: f64,
    /// Fixed seed for reproducible card sampling.
    pub rng_seed: Option<u64>,
}

impl AppSettings {
    /// Parse the configured listen address.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        self.bind_addr
            .parse()
            .map_err(|source| SettingsError::BindAddr {
                value: self.bind_addr.clone(),
                source,
            })
    }

    /// Path of the CSV corpus imported at startup.
    pub fn corpus_path(&self) -> &Path {
        &self.corpus_path
    }

    /// Build the card selection policy from its name and probability.
    pub fn selection_policy(&self) -> Result<SelectionPolicy, SettingsError> {
        let review_probability = ReviewProbability::new(self.review_probability)?;
        Ok(SelectionPolicy::from_name(
            &self.selection_policy,
            review_probability,
        )?)
    }
}

/// Everything the HTTP server needs once settings have been validated.
pub struct ServerConfig {
    pub(crate) session: SessionSettings,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: Option<DbPool>,
    pub(crate) corpus_path: PathBuf,
    pub(crate) policy: SelectionPolicy,
    pub(crate) rng_seed: Option<u64>,
}

impl ServerConfig {
    /// Validate `settings` and combine them with the session settings.
    pub fn new(session: SessionSettings, settings: &AppSettings) -> Result<Self, SettingsError> {
        Ok(Self {
            session,
            bind_addr: settings.bind_addr()?,
            db_pool: None,
            corpus_path: settings.corpus_path().to_path_buf(),
            policy: settings.selection_policy()?,
            rng_seed: settings.rng_seed,
        })
    }

    /// Back the stores with PostgreSQL instead of process memory.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsString;

    use backend::inbound::http::session_config::{BuildMode, session_settings_from_env};
    use env_lock::lock_env;
    use mockable::MockEnv;
    use rstest::rstest;

    const VARS: [&str; 6] = [
        "FLASHCARDS_DATABASE_URL",
        "FLASHCARDS_BIND_ADDR",
        "FLASHCARDS_CORPUS_PATH",
        "FLASHCARDS_SELECTION_POLICY",
        "FLASHCARDS_REVIEW_PROBABILITY",
        "FLASHCARDS_RNG_SEED",
    ];

    fn load_from_empty_args() -> AppSettings {
        AppSettings::load_from_iter([OsString::from("flashcard-backend")])
            .expect("config should load")
    }

    fn cleared() -> Vec<(&'static str, Option<String>)> {
        VARS.iter().map(|name| (*name, None)).collect()
    }

    #[rstest]
    fn defaults_apply_when_unset() {
        let _guard = lock_env(cleared());

        let settings = load_from_empty_args();

        assert!(settings.database_url.is_none());
        assert_eq!(
            settings.bind_addr().expect("default address"),
            DEFAULT_BIND_ADDR.parse::<SocketAddr>().expect("valid")
        );
        assert_eq!(settings.corpus_path(), Path::new(DEFAULT_CORPUS_PATH));
        assert_eq!(
            settings.selection_policy().expect("default policy"),
            SelectionPolicy::default()
        );
        assert!(settings.rng_seed.is_none());
    }

    #[rstest]
    fn server_config_builds_from_defaults() {
        let _guard = lock_env(cleared());
        let settings = load_from_empty_args();
        let mut env = MockEnv::new();
        env.expect_string().returning(|_| None);
        let session =
            session_settings_from_env(&env, BuildMode::Debug).expect("debug session settings");

        let config = ServerConfig::new(session, &settings).expect("defaults are valid");

        assert_eq!(config.bind_addr.port(), 8080);
        assert_eq!(config.corpus_path, PathBuf::from(DEFAULT_CORPUS_PATH));
        assert_eq!(config.policy, SelectionPolicy::default());
        assert!(config.db_pool.is_none());
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let mut vars = cleared();
        vars.extend([
            ("FLASHCARDS_DATABASE_URL", Some("postgres://db/cards".to_owned())),
            ("FLASHCARDS_BIND_ADDR", Some("127.0.0.1:9000".to_owned())),
            ("FLASHCARDS_CORPUS_PATH", Some("/srv/words.csv".to_owned())),
            ("FLASHCARDS_SELECTION_POLICY", Some("new-first".to_owned())),
            ("FLASHCARDS_RNG_SEED", Some("7".to_owned())),
        ]);
        let _guard = lock_env(vars);

        let settings = load_from_empty_args();

        assert_eq!(settings.database_url.as_deref(), Some("postgres://db/cards"));
        assert_eq!(
            settings.bind_addr().expect("address").port(),
            9000
        );
        assert_eq!(settings.corpus_path(), Path::new("/srv/words.csv"));
        assert_eq!(
            settings.selection_policy().expect("policy"),
            SelectionPolicy::NewFirst
        );
        assert_eq!(settings.rng_seed, Some(7));
    }

    #[rstest]
    fn weighted_policy_uses_configured_probability() {
        let mut vars = cleared();
        vars.push(("FLASHCARDS_REVIEW_PROBABILITY", Some("0.4".to_owned())));
        let _guard = lock_env(vars);

        let policy = load_from_empty_args()
            .selection_policy()
            .expect("weighted policy");

        assert_eq!(
            policy,
            SelectionPolicy::Weighted {
                review_probability: ReviewProbability::new(0.4).expect("in range"),
            }
        );
    }

    #[rstest]
    #[case("FLASHCARDS_BIND_ADDR", "not-an-address")]
    #[case("FLASHCARDS_SELECTION_POLICY", "spaced")]
    #[case("FLASHCARDS_REVIEW_PROBABILITY", "1.5")]
    fn invalid_values_are_reported(#[case] name: &'static str, #[case] value: &str) {
        let mut vars = cleared();
        vars.push((name, Some(value.to_owned())));
        let _guard = lock_env(vars);

        let settings = load_from_empty_args();

        let outcome = settings
            .bind_addr()
            .map(|_| ())
            .and_then(|()| settings.selection_policy().map(|_| ()));
        assert!(outcome.is_err(), "{name}={value} should be rejected");
    }
}
