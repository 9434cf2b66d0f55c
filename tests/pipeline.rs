use aso_scout::analyzer::{self, KeywordMiner};
use aso_scout::fetcher::ListingFetcher;
use aso_scout::model::{AnalysisError, FetchError, NarrativeError};
use aso_scout::narrative::{CompletionClient, NarrativeService};
use aso_scout::parser::ListingExtractor;
use aso_scout::Aggregator;

use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

const LISTING: &str = include_str!("fixtures/listing.html");
const PACKAGE: &str = "com.deepwork.focustimer";

struct StaticPage(&'static str);

#[async_trait::async_trait]
impl ListingFetcher for StaticPage {
    async fn fetch(&self, _package_id: &str) -> Result<String, FetchError> {
        Ok(self.0.to_string())
    }
}

struct Unreachable;

#[async_trait::async_trait]
impl ListingFetcher for Unreachable {
    async fn fetch(&self, _package_id: &str) -> Result<String, FetchError> {
        Err(FetchError::Timeout)
    }
}

/// Never answers within any sane timeout.
struct Hanging;

#[async_trait::async_trait]
impl CompletionClient for Hanging {
    async fn complete(&self, _prompt: &str) -> Result<String, NarrativeError> {
        tokio::time::sleep(Duration::from_secs(3600)).await;
        Ok("{}".into())
    }
}

/// Records the peak number of simultaneous calls, then fails.
#[derive(Default)]
struct Counting {
    in_flight: AtomicUsize,
    peak: AtomicUsize,
}

#[async_trait::async_trait]
impl CompletionClient for Counting {
    async fn complete(&self, _prompt: &str) -> Result<String, NarrativeError> {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);
        tokio::time::sleep(Duration::from_millis(50)).await;
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        Err(NarrativeError::Status(503))
    }
}

struct Panicking;

#[async_trait::async_trait]
impl CompletionClient for Panicking {
    async fn complete(&self, _prompt: &str) -> Result<String, NarrativeError> {
        panic!("client bug");
    }
}

fn aggregator(fetcher: impl ListingFetcher + 'static, narrative: Option<NarrativeService>) -> Aggregator {
    Aggregator::new(
        Arc::new(fetcher),
        ListingExtractor::new().unwrap(),
        KeywordMiner::default(),
        narrative,
    )
}

fn narrative(client: impl CompletionClient + 'static, timeout: Duration) -> Option<NarrativeService> {
    Some(NarrativeService::new(Arc::new(client), timeout))
}

#[tokio::test]
async fn heuristic_report_from_fixture() {
    let report = aggregator(StaticPage(LISTING), None).analyze(PACKAGE).await.unwrap();

    assert_eq!(report.package_id, PACKAGE);
    assert_eq!(report.app_info.title, "Focus Timer: Pomodoro & Study Planner");
    assert_eq!(report.app_info.developer, "Deep Work Labs");
    assert_eq!(report.app_info.category, "Productivity");
    assert_eq!(report.app_info.installs, "10M+");
    assert_eq!(report.app_info.version, "5.12.3");
    assert_eq!(report.app_info.size, "38 MB");
    assert_eq!(report.app_info.content_rating, "Teen");
    assert_eq!(report.ratings.overall, 4.6);
    assert_eq!(report.ratings.total_reviews, 152_000);
    assert_eq!(
        report.ratings.distribution,
        BTreeMap::from([(5, 78), (4, 11), (3, 4), (2, 2), (1, 5)])
    );

    assert_eq!(report.keywords.primary[0], "focus");
    assert_eq!(report.keywords.positions["focus"], 3);

    assert_eq!(report.aso_score.breakdown.title_optimization, 90);
    assert_eq!(report.aso_score.breakdown.user_engagement, 90);
    assert_eq!(report.aso_score.overall, report.aso_score.breakdown.average());

    assert_eq!(report.competition.ranking, "Top 100");
    assert_eq!(report.competition.level, "Medium-High");
    assert_eq!(report.competition.saturation, "75%");

    assert_eq!(report.clone_feasibility.score, 2 + 1 + 3);
    assert_eq!(report.clone_feasibility.difficulty, "Medium");
    assert_eq!(report.clone_feasibility.factors.unique_features, &report.keywords.primary[..3]);

    assert!(report.recommendations.len() <= 8);
}

#[tokio::test]
async fn narrative_timeouts_fall_back_to_heuristics() {
    let listing = ListingExtractor::new().unwrap().extract_html(LISTING, PACKAGE);
    let keywords = KeywordMiner::default().mine(&listing.title, listing.description_text());

    let report = aggregator(StaticPage(LISTING), narrative(Hanging, Duration::from_millis(100)))
        .analyze(PACKAGE)
        .await
        .unwrap();

    assert_eq!(report.keywords, keywords);
    assert_eq!(report.aso_score, analyzer::listing_score(&listing));
    assert_eq!(report.competition, analyzer::listing_competition(&listing));
    assert_eq!(report.clone_feasibility, analyzer::listing_clone_feasibility(&listing, &keywords));
    assert_eq!(report.recommendations, analyzer::listing_recommendations(&listing, &keywords));
}

#[tokio::test]
async fn narrative_failures_match_the_heuristic_only_pipeline() {
    let enriched = aggregator(StaticPage(LISTING), narrative(Counting::default(), Duration::from_secs(5)))
        .analyze(PACKAGE)
        .await
        .unwrap();
    let plain = aggregator(StaticPage(LISTING), None).analyze(PACKAGE).await.unwrap();

    assert_eq!(enriched.aso_score, plain.aso_score);
    assert_eq!(enriched.clone_feasibility, plain.clone_feasibility);
    assert_eq!(enriched.recommendations, plain.recommendations);
    assert_eq!(enriched.app_info, plain.app_info);
}

#[tokio::test]
async fn derivations_run_concurrently() {
    let client = Arc::new(Counting::default());
    let svc = NarrativeService::new(client.clone(), Duration::from_secs(5));

    aggregator(StaticPage(LISTING), Some(svc)).analyze(PACKAGE).await.unwrap();

    assert_eq!(client.peak.load(Ordering::SeqCst), 3);
    assert_eq!(client.in_flight.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn fetch_failure_is_fatal() {
    let err = aggregator(Unreachable, None).analyze(PACKAGE).await.unwrap_err();
    assert!(matches!(err, AnalysisError::Fetch(FetchError::Timeout)));
}

#[tokio::test]
async fn demo_path_is_explicit() {
    let report = aggregator(Unreachable, None).analyze_or_demo(PACKAGE).await;
    assert_eq!(report.app_info.title, "Demo App Analysis");
    assert_eq!(report.package_id, PACKAGE);
}

#[tokio::test]
async fn deadline_expiry_is_an_aggregation_failure() {
    let err = aggregator(StaticPage(LISTING), narrative(Hanging, Duration::from_secs(3600)))
        .with_deadline(Duration::from_millis(100))
        .analyze(PACKAGE)
        .await
        .unwrap_err();
    assert!(matches!(err, AnalysisError::Aggregation(_)));
}

#[tokio::test]
async fn panicking_derivation_is_an_aggregation_failure() {
    let err = aggregator(StaticPage(LISTING), narrative(Panicking, Duration::from_secs(5)))
        .analyze(PACKAGE)
        .await
        .unwrap_err();
    assert!(matches!(err, AnalysisError::Aggregation(_)));
}

#[tokio::test]
async fn blank_page_still_yields_a_complete_report() {
    let report = aggregator(StaticPage("<html></html>"), narrative(Hanging, Duration::from_millis(50)))
        .analyze(PACKAGE)
        .await
        .unwrap();
    assert_eq!(report.app_info.title, PACKAGE);
    assert_eq!(report.app_info.developer, "Unknown Developer");
    assert_eq!(report.competition.ranking, "Top 500+");
    assert!(!report.recommendations.is_empty());

    let mined: Vec<&String> = report.keywords.primary.iter().chain(&report.keywords.secondary).collect();
    assert!(mined.iter().all(|k| !matches!(k.as_str(), "description" | "available")), "{mined:?}");
    let listing = ListingExtractor::new().unwrap().extract_html("<html></html>", PACKAGE);
    assert_eq!(report.aso_score, analyzer::score(&listing.title, "", listing.rating, listing.review_count));
}

#[test]
fn report_serializes_with_camel_case_keys() {
    let report = aso_scout::demo::demo_report(PACKAGE);
    let value = serde_json::to_value(&report).unwrap();
    assert!(value["asoScore"]["breakdown"]["titleOptimization"].is_number());
    assert!(value["cloneFeasibility"]["factors"]["uniqueFeatures"].is_array());
    assert!(value["keywords"]["simulatedPositions"].is_object());
    assert!(value["appInfo"]["contentRating"].is_string());
}
