//! Tests for card sampling and the selection service.

use std::collections::HashSet;
use std::sync::Arc;

use rand::SeedableRng;
use rand::rngs::SmallRng;
use rstest::rstest;

use chrono::{TimeZone, Utc};

use super::*;
use crate::domain::ports::UserRepository;
use crate::domain::{ErrorCode, ProgressRecord, User};
use crate::outbound::memory::InMemoryStore;
use crate::domain::ports::{
    MockProgressRepository, MockVocabularyRepository, ProgressRepositoryError,
    VocabularyRepositoryError,
};

fn item(id: &str) -> VocabItem {
    VocabItem::new(
        VocabId::new(id).expect("valid id"),
        format!("english {id}"),
        format!("romanized {id}"),
        format!("native {id}"),
    )
}

fn items(ids: &[&str]) -> Vec<VocabItem> {
    ids.iter().map(|id| item(id)).collect()
}

fn ids(ids: &[&str]) -> HashSet<VocabId> {
    ids.iter()
        .map(|id| VocabId::new(*id).expect("valid id"))
        .collect()
}

fn learner() -> Username {
    Username::new("ada").expect("valid username")
}

fn weighted(p: f64) -> SelectionPolicy {
    SelectionPolicy::Weighted {
        review_probability: ReviewProbability::new(p).expect("probability in range"),
    }
}

fn card_id(selection: &Selection) -> &str {
    selection
        .card()
        .map(|card| card.item.id.as_ref())
        .expect("a card is selected")
}

#[rstest]
#[case(0.0)]
#[case(0.15)]
#[case(1.0)]
fn accepts_probabilities_in_unit_interval(#[case] value: f64) {
    let probability = ReviewProbability::new(value).expect("in range");
    assert_eq!(probability.value(), value);
}

#[rstest]
#[case(-0.01)]
#[case(1.01)]
#[case(f64::NAN)]
fn rejects_probabilities_outside_unit_interval(#[case] value: f64) {
    assert!(ReviewProbability::new(value).is_err());
}

#[rstest]
#[case("weighted", SelectionPolicyKind::Weighted)]
#[case("new_first", SelectionPolicyKind::NewFirst)]
#[case(" New-First ", SelectionPolicyKind::NewFirst)]
fn parses_policy_names(#[case] raw: &str, #[case] expected: SelectionPolicyKind) {
    assert_eq!(raw.parse::<SelectionPolicyKind>(), Ok(expected));
}

#[rstest]
fn rejects_unknown_policy_name() {
    let err = SelectionPolicy::from_name("spaced", ReviewProbability::default())
        .expect_err("unknown name");
    assert_eq!(err.input, "spaced");
}

#[rstest]
fn default_policy_is_weighted_at_fifteen_percent() {
    assert_eq!(SelectionPolicy::default(), weighted(DEFAULT_REVIEW_PROBABILITY));
}

#[rstest]
fn classify_excludes_every_item_with_a_record() {
    let pools = CandidatePools::classify(items(&["a", "b", "c"]), &ids(&["b", "c"]), items(&["b"]));
    assert_eq!(pools.new, items(&["a"]));
    assert_eq!(pools.review, items(&["b"]));
}

#[rstest]
fn classify_orders_both_pools_by_id() {
    let pools = CandidatePools::classify(
        items(&["c", "a", "d", "b"]),
        &ids(&["d", "b"]),
        items(&["d", "b"]),
    );
    assert_eq!(pools.new, items(&["a", "c"]));
    assert_eq!(pools.review, items(&["b", "d"]));
}

#[rstest]
#[case(weighted(DEFAULT_REVIEW_PROBABILITY))]
#[case(SelectionPolicy::NewFirst)]
fn empty_pools_finish(#[case] policy: SelectionPolicy) {
    let mut rng = SmallRng::seed_from_u64(7);
    let selection = choose_card(policy, CandidatePools::default(), &mut rng);
    assert!(selection.is_finished());
}

#[rstest]
#[case(0.0)]
#[case(1.0)]
fn falls_back_to_the_only_non_empty_pool(#[case] p: f64) {
    let mut rng = SmallRng::seed_from_u64(11);
    for _ in 0..50 {
        let only_new = CandidatePools {
            new: items(&["n"]),
            review: Vec::new(),
        };
        assert_eq!(card_id(&choose_card(weighted(p), only_new, &mut rng)), "n");

        let only_review = CandidatePools {
            new: Vec::new(),
            review: items(&["r"]),
        };
        assert_eq!(card_id(&choose_card(weighted(p), only_review, &mut rng)), "r");
    }
}

#[rstest]
fn weighted_policy_prefers_review_at_configured_rate() {
    let mut rng = SmallRng::seed_from_u64(42);
    let trials = 10_000;
    let mut review_hits = 0_u32;
    for _ in 0..trials {
        let pools = CandidatePools {
            new: items(&["n1", "n2", "n3"]),
            review: items(&["r1", "r2"]),
        };
        let selection = choose_card(weighted(DEFAULT_REVIEW_PROBABILITY), pools, &mut rng);
        if card_id(&selection).starts_with('r') {
            review_hits += 1;
        }
    }
    let rate = f64::from(review_hits) / f64::from(trials);
    assert!((0.13..=0.17).contains(&rate), "review rate was {rate}");
}

#[rstest]
fn weighted_policy_uses_both_directions() {
    let mut rng = SmallRng::seed_from_u64(3);
    let mut seen = HashSet::new();
    for _ in 0..200 {
        let pools = CandidatePools {
            new: items(&["a"]),
            review: Vec::new(),
        };
        if let Selection::Card(card) = choose_card(weighted(0.5), pools, &mut rng) {
            seen.insert(card.direction);
        }
    }
    assert_eq!(seen.len(), 2);
}

#[rstest]
fn new_first_drains_new_before_review_in_source_direction() {
    let mut rng = SmallRng::seed_from_u64(5);
    for _ in 0..100 {
        let pools = CandidatePools {
            new: items(&["n1", "n2"]),
            review: items(&["r1"]),
        };
        let selection = choose_card(SelectionPolicy::NewFirst, pools, &mut rng);
        let card = selection.card().expect("card selected");
        assert!(card.item.id.as_ref().starts_with('n'));
        assert_eq!(card.direction, Direction::SourceToTarget);
    }
}

#[rstest]
fn uniform_within_pool_reaches_every_item() {
    let mut rng = SmallRng::seed_from_u64(9);
    let mut seen = HashSet::new();
    for _ in 0..300 {
        let pools = CandidatePools {
            new: items(&["a", "b", "c", "d"]),
            review: Vec::new(),
        };
        seen.insert(card_id(&choose_card(weighted(0.0), pools, &mut rng)).to_owned());
    }
    assert_eq!(seen.len(), 4);
}

#[rstest]
fn seeded_services_are_reproducible() {
    let draw = |seed| {
        let mut rng = SmallRng::seed_from_u64(seed);
        (0..20)
            .map(|_| {
                let pools = CandidatePools {
                    new: items(&["a", "b", "c"]),
                    review: items(&["x", "y"]),
                };
                choose_card(weighted(0.3), pools, &mut rng)
            })
            .collect::<Vec<_>>()
    };
    assert_eq!(draw(17), draw(17));
}

fn service_with(
    catalogue: Vec<VocabItem>,
    with_progress: HashSet<VocabId>,
    review: Vec<VocabItem>,
    policy: SelectionPolicy,
) -> CardSelectionService<MockVocabularyRepository, MockProgressRepository> {
    let mut vocabulary = MockVocabularyRepository::new();
    vocabulary
        .expect_list_all()
        .returning(move || Ok(catalogue.clone()));

    let mut progress = MockProgressRepository::new();
    progress
        .expect_item_ids_with_progress()
        .returning(move |_| Ok(with_progress.clone()));
    progress
        .expect_items_with_status()
        .withf(|_, status| *status == RecallStatus::Unknown)
        .returning(move |_, _| Ok(review.clone()));

    CardSelectionService::with_seed(Arc::new(vocabulary), Arc::new(progress), policy, 1)
}

#[tokio::test]
async fn select_card_finishes_on_empty_catalogue() {
    let service = service_with(Vec::new(), HashSet::new(), Vec::new(), SelectionPolicy::default());
    let selection = service.select_card(&learner()).await.expect("selection");
    assert_eq!(selection, Selection::Finished);
}

#[tokio::test]
async fn select_card_never_serves_known_items() {
    // A is Known, B is New: only B may ever be served.
    let service = service_with(
        items(&["a", "b"]),
        ids(&["a"]),
        Vec::new(),
        SelectionPolicy::default(),
    );
    for _ in 0..100 {
        let selection = service.select_card(&learner()).await.expect("selection");
        assert_eq!(card_id(&selection), "b");
    }
}

#[tokio::test]
async fn select_card_finishes_when_everything_is_known() {
    let service = service_with(
        items(&["a", "b"]),
        ids(&["a", "b"]),
        Vec::new(),
        SelectionPolicy::default(),
    );
    let selection = service.select_card(&learner()).await.expect("selection");
    assert!(selection.is_finished());
}

#[tokio::test]
async fn select_card_serves_review_when_no_new_items_remain() {
    let service = service_with(
        items(&["a", "b"]),
        ids(&["a", "b"]),
        items(&["b"]),
        SelectionPolicy::default(),
    );
    let selection = service.select_card(&learner()).await.expect("selection");
    assert_eq!(card_id(&selection), "b");
}

#[tokio::test]
async fn select_card_maps_vocabulary_outage_to_service_unavailable() {
    let mut vocabulary = MockVocabularyRepository::new();
    vocabulary
        .expect_list_all()
        .return_once(|| Err(VocabularyRepositoryError::connection("refused")));
    let progress = MockProgressRepository::new();
    let service = CardSelectionService::with_seed(
        Arc::new(vocabulary),
        Arc::new(progress),
        SelectionPolicy::default(),
        1,
    );

    let error = service
        .select_card(&learner())
        .await
        .expect_err("outage surfaces");
    assert_eq!(error.code(), ErrorCode::ServiceUnavailable);
}

#[tokio::test]
async fn select_card_maps_progress_query_failure_to_internal() {
    let mut vocabulary = MockVocabularyRepository::new();
    vocabulary.expect_list_all().return_once(|| Ok(Vec::new()));
    let mut progress = MockProgressRepository::new();
    progress
        .expect_item_ids_with_progress()
        .return_once(|_| Err(ProgressRepositoryError::query("boom")));
    let service = CardSelectionService::with_seed(
        Arc::new(vocabulary),
        Arc::new(progress),
        SelectionPolicy::default(),
        1,
    );

    let error = service
        .select_card(&learner())
        .await
        .expect_err("query failure surfaces");
    assert_eq!(error.code(), ErrorCode::InternalError);
}

async fn review_deck(names: impl Iterator<Item = String>) -> Arc<InMemoryStore> {
    let names: Vec<String> = names.collect();
    let store = Arc::new(InMemoryStore::with_vocabulary(
        names.iter().map(|id| item(id)),
    ));
    let stamp = Utc
        .with_ymd_and_hms(2024, 1, 1, 0, 0, 0)
        .single()
        .expect("valid timestamp");
    store
        .insert_if_absent(&User::new(learner(), stamp))
        .await
        .expect("learner stored");
    for id in &names {
        store
            .upsert(&ProgressRecord {
                username: learner(),
                vocab_id: VocabId::new(id.as_str()).expect("valid id"),
                status: RecallStatus::Unknown,
                updated_at: stamp,
            })
            .await
            .expect("record stored");
    }
    store
}

async fn draw_ids(store: Arc<InMemoryStore>, seed: u64) -> Vec<String> {
    let service = CardSelectionService::with_seed(store.clone(), store, weighted(1.0), seed);
    let mut drawn = Vec::new();
    for _ in 0..10 {
        let selection = service.select_card(&learner()).await.expect("selection");
        drawn.push(card_id(&selection).to_owned());
    }
    drawn
}

#[tokio::test]
async fn same_seed_draws_the_same_cards_from_equal_stores() {
    let forward = review_deck((0..30).map(|n| format!("w{n}"))).await;
    let reversed = review_deck((0..30).rev().map(|n| format!("w{n}"))).await;

    assert_eq!(draw_ids(forward, 7).await, draw_ids(reversed, 7).await);
}
