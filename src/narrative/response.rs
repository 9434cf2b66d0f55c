// Parsing of untrusted model output into report views.
//
// Top-level shape mismatches are errors (the caller falls back wholesale);
// individual missing or mistyped fields take the heuristic value instead.
use crate::analyzer::difficulty_for;
use crate::analyzer::market::{CLONE_SCORE_MAX, CLONE_SCORE_MIN};
use crate::analyzer::recommendations::MAX_RECOMMENDATIONS;
use crate::model::{AsoScore, CloneFeasibility, Factors, NarrativeError, ScoreBreakdown};
use serde_json::{Map, Value};

const MAX_UNIQUE_FEATURES: usize = 3;

fn parse_json(content: &str) -> Result<Value, NarrativeError> {
    serde_json::from_str(content).map_err(|e| NarrativeError::MalformedResponse(e.to_string()))
}

fn as_object(value: &Value) -> Result<&Map<String, Value>, NarrativeError> {
    value
        .as_object()
        .ok_or_else(|| NarrativeError::Schema(format!("expected a JSON object, got {}", kind(value))))
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Integer from a number or a numeric string.
fn int_field(obj: Option<&Map<String, Value>>, key: &str) -> Option<i64> {
    match obj?.get(key)? {
        Value::Number(n) => n.as_f64().filter(|f| f.is_finite()).map(|f| f.round() as i64),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|f| f.is_finite()).map(|f| f.round() as i64),
        _ => None,
    }
}

fn text_field(obj: &Map<String, Value>, key: &str, default: &str) -> String {
    obj.get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(default)
        .to_string()
}

fn string_list(value: Option<&Value>, limit: usize) -> Vec<String> {
    value
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .take(limit)
                .map(String::from)
                .collect()
        })
        .unwrap_or_default()
}

/// `overall` is recomputed from the clamped breakdown.
pub fn parse_score(content: &str, fallback: &AsoScore) -> Result<AsoScore, NarrativeError> {
    let value = parse_json(content)?;
    let obj = as_object(&value)?;
    let breakdown = obj.get("breakdown").and_then(Value::as_object);
    let metric = |key: &str, default: u32| {
        int_field(breakdown, key)
            .map(|v| v.clamp(0, 100) as u32)
            .unwrap_or(default)
    };

    let fb = &fallback.breakdown;
    Ok(AsoScore::from_breakdown(ScoreBreakdown {
        title_optimization: metric("titleOptimization", fb.title_optimization),
        description_quality: metric("descriptionQuality", fb.description_quality),
        keyword_density: metric("keywordDensity", fb.keyword_density),
        visual_assets: metric("visualAssets", fb.visual_assets),
        user_engagement: metric("userEngagement", fb.user_engagement),
    }))
}

/// `difficulty` is re-derived from the clamped score.
pub fn parse_clone_feasibility(
    content: &str,
    fallback: &CloneFeasibility,
) -> Result<CloneFeasibility, NarrativeError> {
    let value = parse_json(content)?;
    let obj = as_object(&value)?;

    let score = int_field(Some(obj), "score")
        .map(|s| s.clamp(CLONE_SCORE_MIN as i64, CLONE_SCORE_MAX as i64) as u32)
        .unwrap_or(fallback.score);

    let mut unique_features = string_list(obj.get("uniqueFeatures"), MAX_UNIQUE_FEATURES);
    if unique_features.is_empty() {
        unique_features = fallback.factors.unique_features.clone();
    }

    let fb = &fallback.factors;
    Ok(CloneFeasibility {
        score,
        difficulty: difficulty_for(score).to_string(),
        recommendation: text_field(obj, "recommendation", &fallback.recommendation),
        factors: Factors {
            technical: text_field(obj, "technical", &fb.technical),
            demand: text_field(obj, "demand", &fb.demand),
            barrier: text_field(obj, "barrier", &fb.barrier),
            unique_features,
        },
    })
}

pub fn parse_recommendations(content: &str) -> Result<Vec<String>, NarrativeError> {
    let value = parse_json(content)?;
    if !value.is_array() {
        return Err(NarrativeError::Schema(format!("expected a JSON array, got {}", kind(&value))));
    }
    let recommendations = string_list(Some(&value), MAX_RECOMMENDATIONS);
    if recommendations.is_empty() {
        return Err(NarrativeError::Schema("no usable recommendations".into()));
    }
    Ok(recommendations)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fallback_score() -> AsoScore {
        AsoScore::from_breakdown(ScoreBreakdown {
            title_optimization: 60,
            description_quality: 55,
            keyword_density: 60,
            visual_assets: 75,
            user_engagement: 60,
        })
    }

    fn fallback_clone() -> CloneFeasibility {
        CloneFeasibility {
            score: 5,
            difficulty: "Medium".into(),
            recommendation: "Feasible".into(),
            factors: Factors {
                technical: "Medium".into(),
                demand: "Medium".into(),
                barrier: "Medium".into(),
                unique_features: vec!["notes".into()],
            },
        }
    }

    #[test]
    fn full_score_response_is_used() {
        let content = r#"{"overall": 10, "breakdown": {"titleOptimization": 80, "descriptionQuality": 70,
            "keywordDensity": 65, "visualAssets": 90, "userEngagement": 85}}"#;
        let s = parse_score(content, &fallback_score()).unwrap();
        assert_eq!(s.breakdown.title_optimization, 80);
        assert_eq!(s.breakdown.visual_assets, 90);
        assert_eq!(s.overall, 78);
    }

    #[test]
    fn partial_score_response_fills_from_fallback() {
        let content = r#"{"breakdown": {"titleOptimization": "95", "keywordDensity": 250, "userEngagement": null}}"#;
        let s = parse_score(content, &fallback_score()).unwrap();
        assert_eq!(s.breakdown.title_optimization, 95);
        assert_eq!(s.breakdown.description_quality, 55);
        assert_eq!(s.breakdown.keyword_density, 100);
        assert_eq!(s.breakdown.user_engagement, 60);
        assert_eq!(s.overall, s.breakdown.average());
    }

    #[test]
    fn score_shape_mismatch_is_rejected() {
        assert!(matches!(parse_score("[1,2]", &fallback_score()), Err(NarrativeError::Schema(_))));
        assert!(matches!(
            parse_score("Sure! Here is the JSON", &fallback_score()),
            Err(NarrativeError::MalformedResponse(_))
        ));
    }

    #[test]
    fn clone_response_is_clamped_and_relabelled() {
        let content = r#"{"score": 42, "difficulty": "Trivial", "recommendation": "Go for it",
            "technical": "", "uniqueFeatures": ["Offline mode", " ", 7, "Sync", "Widgets", "Themes"]}"#;
        let cf = parse_clone_feasibility(content, &fallback_clone()).unwrap();
        assert_eq!(cf.score, 10);
        assert_eq!(cf.difficulty, "Easy");
        assert_eq!(cf.recommendation, "Go for it");
        assert_eq!(cf.factors.technical, "Medium");
        assert_eq!(cf.factors.unique_features, ["Offline mode", "Sync", "Widgets"]);
    }

    #[test]
    fn empty_clone_object_equals_fallback() {
        assert_eq!(parse_clone_feasibility("{}", &fallback_clone()).unwrap(), fallback_clone());
    }

    #[test]
    fn recommendations_need_a_non_empty_array() {
        let many = serde_json::to_string(&(0..12).map(|i| format!("tip {i}")).collect::<Vec<_>>()).unwrap();
        assert_eq!(parse_recommendations(&many).unwrap().len(), 8);
        assert_eq!(parse_recommendations(r#"["a", 3, "", "b"]"#).unwrap(), ["a", "b"]);
        assert!(matches!(parse_recommendations("[]"), Err(NarrativeError::Schema(_))));
        assert!(matches!(parse_recommendations(r#"{"items": []}"#), Err(NarrativeError::Schema(_))));
    }
}
