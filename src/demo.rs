// Canned sample report for front ends that prefer showing something over an error.
use crate::model::{
    AnalysisReport, AppInfo, AsoScore, CloneFeasibility, Competition, Factors, Keywords, Ratings, ScoreBreakdown,
};
use chrono::Utc;
use std::collections::BTreeMap;

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Fixed productivity-app sample. Only `package_id` and `analyzed_at` vary.
pub fn demo_report(package_id: &str) -> AnalysisReport {
    AnalysisReport {
        package_id: package_id.to_string(),
        analyzed_at: Utc::now(),
        app_info: AppInfo {
            title: "Demo App Analysis".into(),
            developer: "Demo Developer".into(),
            category: "Productivity".into(),
            installs: "1M+".into(),
            version: "2.5.0".into(),
            size: "45MB".into(),
            content_rating: "Everyone".into(),
        },
        ratings: Ratings {
            overall: 4.3,
            total_reviews: 125_000,
            distribution: BTreeMap::from([(5, 65), (4, 20), (3, 8), (2, 4), (1, 3)]),
        },
        keywords: Keywords {
            primary: strings(&["task manager", "productivity", "todo list", "organizer"]),
            secondary: strings(&["calendar", "reminder", "notes", "planner", "schedule"]),
            positions: BTreeMap::from([
                ("task manager".to_string(), 8),
                ("productivity".to_string(), 15),
                ("todo list".to_string(), 5),
            ]),
        },
        aso_score: AsoScore::from_breakdown(ScoreBreakdown {
            title_optimization: 75,
            description_quality: 68,
            keyword_density: 70,
            visual_assets: 80,
            user_engagement: 72,
        }),
        competition: Competition {
            ranking: "Top 30".into(),
            level: "High".into(),
            saturation: "82%".into(),
            opportunities: strings(&[
                "Focus on niche workflows",
                "AI-powered suggestions",
                "Better collaboration",
                "Offline-first approach",
            ]),
        },
        clone_feasibility: CloneFeasibility {
            score: 7,
            difficulty: "Medium".into(),
            recommendation: "Feasible - Focus on unique features and niche audience".into(),
            factors: Factors {
                technical: "Medium - Standard CRUD with sync".into(),
                demand: "High - Always in demand".into(),
                barrier: "Medium - Large market".into(),
                unique_features: strings(&["Custom task templates", "Smart prioritization", "Cross-platform sync"]),
            },
        },
        recommendations: strings(&[
            "Optimize title with high-volume keywords",
            "Expand description with long-tail keywords",
            "Update screenshots to highlight features",
            "Encourage user reviews",
            "Localize content for top markets",
            "Monitor competitor strategies",
            "A/B test different icons",
        ]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::difficulty_for;

    #[test]
    fn demo_report_respects_report_invariants() {
        let report = demo_report("com.example.todo");
        assert_eq!(report.package_id, "com.example.todo");
        assert_eq!(report.aso_score.overall, report.aso_score.breakdown.average());
        assert_eq!(report.clone_feasibility.difficulty, difficulty_for(report.clone_feasibility.score));
        assert!(report.recommendations.len() <= 8);
        assert!(report.keywords.positions.keys().all(|k| report.keywords.primary.contains(k)));
    }
}
