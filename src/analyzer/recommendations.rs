use crate::model::Keywords;

pub const MAX_RECOMMENDATIONS: usize = 8;

const GENERIC_POOL: [&str; 6] = [
    "Localize app content for top 5 markets",
    "Update screenshots every quarter to showcase new features",
    "A/B test different icon designs to improve CTR",
    "Encourage satisfied users to leave reviews",
    "Monitor competitor keyword strategies weekly",
    "Optimize first 160 characters of description for preview text",
];

/// Targeted advice first, then the generic pool, capped at eight entries.
pub fn recommendations(title: &str, description: &str, keywords: &Keywords, rating: f64) -> Vec<String> {
    let mut out: Vec<&str> = Vec::with_capacity(MAX_RECOMMENDATIONS + GENERIC_POOL.len());

    if title.chars().count() < 30 {
        out.push("Expand title to include more relevant keywords (aim for 30-50 characters)");
    }
    if description.chars().count() < 2000 {
        out.push("Expand description with more detailed feature explanations and use cases");
    }
    if keywords.primary.len() < 4 {
        out.push("Identify and incorporate more high-traffic keywords in your description");
    }
    if rating < 4.5 {
        out.push("Focus on improving user experience to boost ratings");
        out.push("Implement in-app feedback system to resolve issues quickly");
    }

    out.extend(GENERIC_POOL);
    out.into_iter().take(MAX_RECOMMENDATIONS).map(String::from).collect()
}
