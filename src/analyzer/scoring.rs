use crate::model::{AsoScore, ScoreBreakdown};

/// Fixed until screenshot analysis exists.
pub const VISUAL_ASSETS_PLACEHOLDER: u32 = 75;

/// Scores a listing from title/description length, word count and engagement.
pub fn score(title: &str, description: &str, rating: f64, reviews: u64) -> AsoScore {
    AsoScore::from_breakdown(ScoreBreakdown {
        title_optimization: title_score(title.chars().count()),
        description_quality: description_score(description.chars().count()),
        keyword_density: keyword_density_score(description.split_whitespace().count()),
        visual_assets: VISUAL_ASSETS_PLACEHOLDER,
        user_engagement: engagement_score(rating, reviews),
    })
}

fn title_score(len: usize) -> u32 {
    match len {
        30..=50 => 90,
        20..=29 => 75,
        _ => 60,
    }
}

fn description_score(len: usize) -> u32 {
    match len {
        n if n > 3000 => 85,
        n if n > 1000 => 70,
        _ => 55,
    }
}

fn keyword_density_score(words: usize) -> u32 {
    if words > 200 { 75 } else { 60 }
}

fn engagement_score(rating: f64, reviews: u64) -> u32 {
    if rating > 4.5 && reviews > 100_000 {
        90
    } else if rating > 4.0 && reviews > 10_000 {
        75
    } else {
        60
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strong_listing_fixture() {
        let title = "x".repeat(35);
        let description = "word ".repeat(640);
        assert_eq!(description.len(), 3200);

        let s = score(&title, &description, 4.6, 150_000);
        assert_eq!(s.breakdown.title_optimization, 90);
        assert_eq!(s.breakdown.description_quality, 85);
        assert_eq!(s.breakdown.keyword_density, 75);
        assert_eq!(s.breakdown.visual_assets, 75);
        assert_eq!(s.breakdown.user_engagement, 90);
        assert_eq!(s.overall, (90 + 85 + 75 + 75 + 90) / 5);
    }

    #[test]
    fn weak_listing_takes_lowest_buckets() {
        let s = score("Todo", "Short.", 3.9, 50);
        assert_eq!(
            s.breakdown,
            ScoreBreakdown {
                title_optimization: 60,
                description_quality: 55,
                keyword_density: 60,
                visual_assets: 75,
                user_engagement: 60,
            }
        );
        assert_eq!(s.overall, 62);
    }

    #[test]
    fn bucket_edges() {
        assert_eq!(title_score(20), 75);
        assert_eq!(title_score(29), 75);
        assert_eq!(title_score(30), 90);
        assert_eq!(title_score(50), 90);
        assert_eq!(title_score(51), 60);
        assert_eq!(description_score(1000), 55);
        assert_eq!(description_score(1001), 70);
        assert_eq!(description_score(3001), 85);
        assert_eq!(keyword_density_score(200), 60);
        assert_eq!(keyword_density_score(201), 75);
        assert_eq!(engagement_score(4.5, 1_000_000), 75);
        assert_eq!(engagement_score(4.1, 10_000), 60);
    }

    #[test]
    fn overall_is_always_the_breakdown_average() {
        let long_title = "a".repeat(40);
        let long_description = "b ".repeat(2500);
        for (t, d, r, n) in [("", "", 0.0, 0), (long_title.as_str(), long_description.as_str(), 5.0, u64::MAX)] {
            let s = score(t, d, r, n);
            assert!(s.overall <= 100);
            assert_eq!(s.overall, s.breakdown.average());
        }
    }
}
