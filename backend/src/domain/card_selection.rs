//! Card selection domain service.
//!
//! Each request classifies the catalogue into New (no record) and Review
//! (record with status Unknown) pools for the learner, then samples one item
//! according to the configured [`SelectionPolicy`]. Known items are never in
//! either pool. Sampling is uniform within a pool and the pools are rebuilt
//! from the stores on every call, so there is no session-level queue.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use super::error_mapping::{map_progress_error, map_vocabulary_error};
use crate::domain::ports::{CardSelectionQuery, ProgressRepository, VocabularyRepository};
use crate::domain::{Card, Direction, Error, RecallStatus, Selection, Username, VocabId, VocabItem};

/// Chance of drawing from the Review pool when both pools are non-empty.
pub const DEFAULT_REVIEW_PROBABILITY: f64 = 0.15;

/// Errors raised when building a [`ReviewProbability`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ReviewProbabilityError {
    #[error("review probability must be within [0, 1], got {0}")]
    OutOfRange(f64),
}

/// Probability in `[0, 1]` of preferring the Review pool.
///
/// # Examples
/// ```
/// use backend::domain::ReviewProbability;
///
/// assert!(ReviewProbability::new(0.15).is_ok());
/// assert!(ReviewProbability::new(1.5).is_err());
/// assert!(ReviewProbability::new(f64::NAN).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReviewProbability(f64);

impl ReviewProbability {
    /// Validate a probability.
    pub fn new(value: f64) -> Result<Self, ReviewProbabilityError> {
        if (0.0..=1.0).contains(&value) {
            Ok(Self(value))
        } else {
            Err(ReviewProbabilityError::OutOfRange(value))
        }
    }

    /// The raw probability.
    pub fn value(self) -> f64 {
        self.0
    }
}

impl Default for ReviewProbability {
    fn default() -> Self {
        Self(DEFAULT_REVIEW_PROBABILITY)
    }
}

/// Strategy used to pick between the New and Review pools.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SelectionPolicy {
    /// Bernoulli draw with the given probability of preferring Review,
    /// falling back to whichever pool is non-empty. Direction is random.
    Weighted {
        review_probability: ReviewProbability,
    },
    /// Drain New before Review. Direction is always source to target.
    NewFirst,
}

impl Default for SelectionPolicy {
    fn default() -> Self {
        Self::Weighted {
            review_probability: ReviewProbability::default(),
        }
    }
}

impl SelectionPolicy {
    /// Build a policy from its configuration name.
    ///
    /// `review_probability` is only consulted by the weighted policy.
    ///
    /// # Examples
    /// ```
    /// use backend::domain::{ReviewProbability, SelectionPolicy};
    ///
    /// let policy = SelectionPolicy::from_name("new_first", ReviewProbability::default());
    /// assert_eq!(policy, Ok(SelectionPolicy::NewFirst));
    /// ```
    pub fn from_name(
        name: &str,
        review_probability: ReviewProbability,
    ) -> Result<Self, ParseSelectionPolicyError> {
        match name.parse::<SelectionPolicyKind>()? {
            SelectionPolicyKind::Weighted => Ok(Self::Weighted { review_probability }),
            SelectionPolicyKind::NewFirst => Ok(Self::NewFirst),
        }
    }
}

/// Configuration names accepted for [`SelectionPolicy`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionPolicyKind {
    /// `weighted`
    Weighted,
    /// `new_first`
    NewFirst,
}

impl fmt::Display for SelectionPolicyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Weighted => "weighted",
            Self::NewFirst => "new_first",
        })
    }
}

/// Error returned for an unrecognised policy name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown selection policy `{input}` (expected `weighted` or `new_first`)")]
pub struct ParseSelectionPolicyError {
    pub input: String,
}

impl FromStr for SelectionPolicyKind {
    type Err = ParseSelectionPolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "weighted" => Ok(Self::Weighted),
            "new_first" => Ok(Self::NewFirst),
            _ => Err(ParseSelectionPolicyError {
                input: s.to_owned(),
            }),
        }
    }
}

/// Selectable items for one learner at one instant.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CandidatePools {
    /// Items the learner has never marked.
    pub new: Vec<VocabItem>,
    /// Items whose latest mark is Unknown.
    pub review: Vec<VocabItem>,
}

impl CandidatePools {
    /// Split the catalogue into pools.
    ///
    /// Every catalogue item without a record is New. `review` is taken as
    /// given; it must already be restricted to Unknown records. Both pools
    /// are ordered by id so a seeded sampler is independent of store order.
    pub fn classify(
        catalogue: Vec<VocabItem>,
        with_progress: &HashSet<VocabId>,
        mut review: Vec<VocabItem>,
    ) -> Self {
        let mut new: Vec<VocabItem> = catalogue
            .into_iter()
            .filter(|item| !with_progress.contains(&item.id))
            .collect();
        new.sort_by(|a, b| a.id.cmp(&b.id));
        review.sort_by(|a, b| a.id.cmp(&b.id));
        Self { new, review }
    }

    /// Whether no item is selectable.
    pub fn is_empty(&self) -> bool {
        self.new.is_empty() && self.review.is_empty()
    }
}

/// Sample one card from `pools` under `policy`.
///
/// The weighted policy always consumes one Bernoulli draw before looking at
/// the pools, so a seeded generator yields the same sequence regardless of
/// which pools are empty.
pub fn choose_card<R>(policy: SelectionPolicy, pools: CandidatePools, rng: &mut R) -> Selection
where
    R: Rng + ?Sized,
{
    let CandidatePools { new, review } = pools;
    let chosen = match policy {
        SelectionPolicy::NewFirst => pick_uniform(new, rng)
            .or_else(|| pick_uniform(review, rng))
            .map(|item| Card {
                item,
                direction: Direction::SourceToTarget,
            }),
        SelectionPolicy::Weighted { review_probability } => {
            let prefer_review = rng.gen_bool(review_probability.value());
            let from_review = !review.is_empty() && (prefer_review || new.is_empty());
            let item = if from_review {
                pick_uniform(review, rng)
            } else {
                pick_uniform(new, rng)
            };
            item.map(|item| Card {
                item,
                direction: random_direction(rng),
            })
        }
    };
    chosen.map_or(Selection::Finished, Selection::Card)
}

fn pick_uniform<R>(mut items: Vec<VocabItem>, rng: &mut R) -> Option<VocabItem>
where
    R: Rng + ?Sized,
{
    if items.is_empty() {
        return None;
    }
    let index = rng.gen_range(0..items.len());
    Some(items.swap_remove(index))
}

fn random_direction<R>(rng: &mut R) -> Direction
where
    R: Rng + ?Sized,
{
    if rng.gen_bool(0.5) {
        Direction::SourceToTarget
    } else {
        Direction::TargetToSource
    }
}

/// Card selection service implementing [`CardSelectionQuery`].
pub struct CardSelectionService<V, P> {
    vocabulary_repo: Arc<V>,
    progress_repo: Arc<P>,
    policy: SelectionPolicy,
    rng: Mutex<SmallRng>,
}

impl<V, P> CardSelectionService<V, P> {
    /// Create a service seeded from operating-system entropy.
    pub fn new(vocabulary_repo: Arc<V>, progress_repo: Arc<P>, policy: SelectionPolicy) -> Self {
        Self::with_rng(
            vocabulary_repo,
            progress_repo,
            policy,
            SmallRng::from_entropy(),
        )
    }

    /// Create a service whose draws are reproducible for a given seed.
    pub fn with_seed(
        vocabulary_repo: Arc<V>,
        progress_repo: Arc<P>,
        policy: SelectionPolicy,
        seed: u64,
    ) -> Self {
        Self::with_rng(
            vocabulary_repo,
            progress_repo,
            policy,
            SmallRng::seed_from_u64(seed),
        )
    }

    fn with_rng(
        vocabulary_repo: Arc<V>,
        progress_repo: Arc<P>,
        policy: SelectionPolicy,
        rng: SmallRng,
    ) -> Self {
        Self {
            vocabulary_repo,
            progress_repo,
            policy,
            rng: Mutex::new(rng),
        }
    }

    /// The configured policy.
    pub fn policy(&self) -> SelectionPolicy {
        self.policy
    }

    fn sample(&self, pools: CandidatePools) -> Result<Selection, Error> {
        let mut rng = self
            .rng
            .lock()
            .map_err(|_| Error::internal("card sampler state poisoned"))?;
        Ok(choose_card(self.policy, pools, &mut *rng))
    }
}

impl<V, P> CardSelectionService<V, P>
where
    V: VocabularyRepository,
    P: ProgressRepository,
{
    async fn candidate_pools(&self, username: &Username) -> Result<CandidatePools, Error> {
        let catalogue = self
            .vocabulary_repo
            .list_all()
            .await
            .map_err(map_vocabulary_error)?;
        let with_progress = self
            .progress_repo
            .item_ids_with_progress(username)
            .await
            .map_err(map_progress_error)?;
        let review = self
            .progress_repo
            .items_with_status(username, RecallStatus::Unknown)
            .await
            .map_err(map_progress_error)?;
        Ok(CandidatePools::classify(catalogue, &with_progress, review))
    }
}

#[async_trait]
impl<V, P> CardSelectionQuery for CardSelectionService<V, P>
where
    V: VocabularyRepository,
    P: ProgressRepository,
{
    async fn select_card(&self, username: &Username) -> Result<Selection, Error> {
        let pools = self.candidate_pools(username).await?;
        debug!(
            %username,
            new = pools.new.len(),
            review = pools.review.len(),
            "sampling next card"
        );
        self.sample(pools)
    }
}

#[cfg(test)]
#[path = "card_selection_tests.rs"]
mod tests;
