// Orchestration: fetch -> extract -> mine -> fan-out derivations -> report.
use crate::analyzer::{self, KeywordMiner};
use crate::config::AppConfig;
use crate::demo::demo_report;
use crate::fetcher::{ListingFetcher, PlayStoreFetcher};
use crate::model::{
    AnalysisError, AnalysisReport, AppInfo, AsoScore, CloneFeasibility, ExtractedListing, Keywords, Ratings,
};
use crate::narrative::NarrativeService;
use crate::parser::ListingExtractor;

use chrono::Utc;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::task::JoinSet;
use tokio::time::timeout;
use tracing::{error, info, warn};

/// Output of one of the three concurrent derivations.
enum Derived {
    Score(AsoScore),
    CloneFeasibility(CloneFeasibility),
    Recommendations(Vec<String>),
}

/// Single entry point for analyses. Collaborators are passed in explicitly.
pub struct Aggregator {
    fetcher: Arc<dyn ListingFetcher>,
    extractor: ListingExtractor,
    miner: KeywordMiner,
    narrative: Option<NarrativeService>,
    deadline: Option<Duration>,
}

impl Aggregator {
    pub fn new(
        fetcher: Arc<dyn ListingFetcher>,
        extractor: ListingExtractor,
        miner: KeywordMiner,
        narrative: Option<NarrativeService>,
    ) -> Self {
        Self {
            fetcher,
            extractor,
            miner,
            narrative,
            deadline: None,
        }
    }

    /// Overall bound for one `analyze` call.
    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub fn from_config(cfg: &AppConfig) -> Result<Self, AnalysisError> {
        let fetcher = PlayStoreFetcher::new(&cfg.fetch)?;
        let extractor = ListingExtractor::new().map_err(|e| AnalysisError::Aggregation(e.to_string()))?;
        let aggregator = Self::new(
            Arc::new(fetcher),
            extractor,
            KeywordMiner::new(cfg.keywords),
            NarrativeService::from_config(&cfg.narrative),
        );
        Ok(match cfg.analysis_timeout_seconds {
            Some(secs) => aggregator.with_deadline(Duration::from_secs(secs)),
            None => aggregator,
        })
    }

    /// Complete report or a single tagged error; never a partial report.
    /// Dropping the returned future aborts any in-flight derivations.
    pub async fn analyze(&self, package_id: &str) -> Result<AnalysisReport, AnalysisError> {
        let started = Instant::now();
        let result = match self.deadline {
            Some(deadline) => timeout(deadline, self.run(package_id))
                .await
                .unwrap_or_else(|_| Err(AnalysisError::Aggregation(format!("timed out after {deadline:?}")))),
            None => self.run(package_id).await,
        };
        match &result {
            Ok(_) => info!("✅ Analysis of {} finished in {:?}", package_id, started.elapsed()),
            Err(e) => error!("❌ Analysis of {} failed: {}", package_id, e),
        }
        result
    }

    /// Like `analyze`, but substitutes the canned demo report on failure.
    pub async fn analyze_or_demo(&self, package_id: &str) -> AnalysisReport {
        match self.analyze(package_id).await {
            Ok(report) => report,
            Err(e) => {
                warn!("Serving demo report for {} after failure: {}", package_id, e);
                demo_report(package_id)
            }
        }
    }

    async fn run(&self, package_id: &str) -> Result<AnalysisReport, AnalysisError> {
        info!("Fetching listing {}...", package_id);
        let html = self.fetcher.fetch(package_id).await?;

        info!("Extracting listing fields...");
        let listing = Arc::new(self.extractor.extract_html(&html, package_id));
        let keywords = Arc::new(self.miner.mine(&listing.title, listing.description_text()));

        let mut tasks = self.spawn_derivations(&listing, &keywords);
        let competition = analyzer::listing_competition(&listing);

        let (mut score, mut clone_feasibility, mut recommendations) = (None, None, None);
        while let Some(joined) = tasks.join_next().await {
            match joined.map_err(|e| AnalysisError::Aggregation(format!("derivation task failed: {e}")))? {
                Derived::Score(v) => score = Some(v),
                Derived::CloneFeasibility(v) => clone_feasibility = Some(v),
                Derived::Recommendations(v) => recommendations = Some(v),
            }
        }
        let (Some(aso_score), Some(clone_feasibility), Some(recommendations)) =
            (score, clone_feasibility, recommendations)
        else {
            return Err(AnalysisError::Aggregation("a derivation produced no result".into()));
        };

        Ok(AnalysisReport {
            package_id: package_id.to_string(),
            analyzed_at: Utc::now(),
            app_info: AppInfo::from(listing.as_ref()),
            ratings: Ratings::from(listing.as_ref()),
            keywords: Arc::unwrap_or_clone(keywords),
            aso_score,
            competition,
            clone_feasibility,
            recommendations,
        })
    }

    /// Spawns score, clone feasibility and recommendations over shared,
    /// read-only inputs.
    fn spawn_derivations(
        &self,
        listing: &Arc<ExtractedListing>,
        keywords: &Arc<Keywords>,
    ) -> JoinSet<Derived> {
        let mut tasks = JoinSet::new();
        match &self.narrative {
            Some(narrative) => {
                let (svc, l) = (narrative.clone(), listing.clone());
                tasks.spawn(async move { Derived::Score(svc.generate_score(&l).await) });

                let (svc, l, k) = (narrative.clone(), listing.clone(), keywords.clone());
                tasks.spawn(async move { Derived::CloneFeasibility(svc.generate_clone_feasibility(&l, &k).await) });

                let (svc, l, k) = (narrative.clone(), listing.clone(), keywords.clone());
                tasks.spawn(async move { Derived::Recommendations(svc.generate_recommendations(&l, &k).await) });
            }
            None => {
                let l = listing.clone();
                tasks.spawn(async move { Derived::Score(analyzer::listing_score(&l)) });

                let (l, k) = (listing.clone(), keywords.clone());
                tasks.spawn(async move { Derived::CloneFeasibility(analyzer::listing_clone_feasibility(&l, &k)) });

                let (l, k) = (listing.clone(), keywords.clone());
                tasks.spawn(async move { Derived::Recommendations(analyzer::listing_recommendations(&l, &k)) });
            }
        }
        tasks
    }
}
