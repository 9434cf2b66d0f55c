// Prompt builders for the three narrative derivations.
use crate::model::ExtractedListing;

pub const SYSTEM_INSTRUCTION: &str = "You are an ASO analyst. Respond with valid JSON only.";

pub fn score_prompt(listing: &ExtractedListing) -> String {
    format!(
        r#"Score ASO performance for: "{title}" ({title_len} chars)
Description: {desc_len} chars | Rating: {rating} | Reviews: {reviews} | Installs: {installs}

Score 0-100: titleOptimization, descriptionQuality, keywordDensity, visualAssets, userEngagement
{{"overall": X, "breakdown": {{"titleOptimization": X, "descriptionQuality": X, "keywordDensity": X, "visualAssets": X, "userEngagement": X}}}}
Only output JSON."#,
        title = listing.title,
        title_len = listing.title.chars().count(),
        desc_len = listing.description_text().chars().count(),
        rating = listing.rating,
        reviews = listing.review_count,
        installs = listing.installs,
    )
}

pub fn clone_feasibility_prompt(listing: &ExtractedListing, keywords: &[String]) -> String {
    format!(
        r#"Analyze clone feasibility for: {title}
Category: {category} | Rating: {rating} | Reviews: {reviews} | Installs: {installs}
Keywords: {keywords}

Provide JSON:
{{"score": 1-10, "difficulty": "Easy/Medium/Hard", "recommendation": "...", "technical": "...", "demand": "...", "barrier": "...", "uniqueFeatures": ["f1","f2","f3"]}}
Only output JSON."#,
        title = listing.title,
        category = listing.category,
        rating = listing.rating,
        reviews = listing.review_count,
        installs = listing.installs,
        keywords = keywords.join(", "),
    )
}

pub fn recommendations_prompt(listing: &ExtractedListing, keywords: &[String]) -> String {
    format!(
        r#"You are an expert ASO consultant. Analyze this Android app and provide 8 specific, actionable recommendations.

App: {title} by {developer}
Category: {category} | Rating: {rating} | Reviews: {reviews} | Installs: {installs}
Keywords: {keywords}
Description: {desc_len} chars

Provide exactly 8 specific ASO recommendations as a JSON array:
["Recommendation 1", "Recommendation 2", ...]
Only output JSON."#,
        title = listing.title,
        developer = listing.developer,
        category = listing.category,
        rating = listing.rating,
        reviews = listing.review_count,
        installs = listing.installs,
        keywords = keywords.join(", "),
        desc_len = listing.description_text().chars().count(),
    )
}
