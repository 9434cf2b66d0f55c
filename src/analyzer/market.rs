// Market position heuristics: competition tiers and clone feasibility.
use crate::model::{CloneFeasibility, Competition, Factors, Keywords};

/// Ranking tiers, strongest first.
pub const RANKING_TIERS: [&str; 5] = ["Top 5", "Top 10", "Top 30", "Top 100", "Top 500+"];

pub const CLONE_SCORE_MIN: u32 = 1;
pub const CLONE_SCORE_MAX: u32 = 10;

pub fn competition(category: &str, rating: f64, install_count: u64) -> Competition {
    let ranking = match install_count {
        n if n > 100_000_000 => RANKING_TIERS[0],
        n if n > 50_000_000 => RANKING_TIERS[1],
        n if n > 10_000_000 => RANKING_TIERS[2],
        n if n > 1_000_000 => RANKING_TIERS[3],
        _ => RANKING_TIERS[4],
    };

    let level = if rating >= 4.5 && install_count > 50_000_000 {
        "Very High"
    } else if rating >= 4.3 && install_count > 10_000_000 {
        "High"
    } else if rating >= 4.0 && install_count > 1_000_000 {
        "Medium-High"
    } else {
        "Medium"
    };

    let saturation = match category.to_lowercase().as_str() {
        "games" | "game" => "92%",
        "social" => "88%",
        "entertainment" => "85%",
        "productivity" | "tools" => "75%",
        _ => "70%",
    };

    Competition {
        ranking: ranking.to_string(),
        level: level.to_string(),
        saturation: saturation.to_string(),
        opportunities: vec![
            format!("Target underserved niches within {category}"),
            "Focus on user retention strategies".to_string(),
            "Optimize for emerging markets".to_string(),
            "Consider lite version for low-end devices".to_string(),
        ],
    }
}

/// Difficulty label for a clone score: >= 8 Easy, >= 5 Medium, else Hard.
pub fn difficulty_for(score: u32) -> &'static str {
    match score {
        s if s >= 8 => "Easy",
        s if s >= 5 => "Medium",
        _ => "Hard",
    }
}

/// Sum of demand (1-3), competition barrier (1-3) and category difficulty (1-3).
pub fn clone_feasibility(
    category: &str,
    rating: f64,
    _reviews: u64,
    install_count: u64,
    keywords: &Keywords,
) -> CloneFeasibility {
    let demand = match install_count {
        n if n > 10_000_000 => 3,
        n if n > 1_000_000 => 2,
        _ => 1,
    };

    let barrier = if rating < 4.0 {
        3
    } else if rating < 4.5 {
        2
    } else {
        1
    };

    let category_difficulty = match category.to_lowercase().as_str() {
        "games" | "game" => 1,
        "social" => 2,
        "productivity" | "tools" => 3,
        _ => 2,
    };

    let score = demand + barrier + category_difficulty;

    let recommendation = if score >= 7 {
        "Highly Feasible - Good market opportunity with manageable competition"
    } else if score >= 5 {
        "Feasible - Focus on unique features and specific niche"
    } else {
        "Challenging - Requires significant innovation and resources"
    };

    let barrier_text = if rating > 4.5 { "High - Strong incumbent" } else { "Medium" };

    CloneFeasibility {
        score,
        difficulty: difficulty_for(score).to_string(),
        recommendation: recommendation.to_string(),
        factors: Factors {
            technical: "Medium - Standard mobile app architecture".to_string(),
            demand: if install_count > 1_000_000 { "High" } else { "Medium" }.to_string(),
            barrier: barrier_text.to_string(),
            unique_features: keywords.primary.iter().take(3).cloned().collect(),
        },
    }
}
