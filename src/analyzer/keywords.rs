use crate::config::KeywordProfile;
use crate::model::Keywords;
use std::collections::{BTreeMap, HashMap};

const STOP_WORDS: &[&str] = &[
    "the", "a", "an", "and", "or", "but", "in", "on", "at", "to", "for", "of", "with", "by", "from",
    "is", "are", "was", "were", "be", "have", "has", "it", "its", "this", "that", "you", "we",
    "they", "your", "our", "their", "about",
];

/// Frequency-based keyword extraction over title and description.
#[derive(Debug, Clone, Default)]
pub struct KeywordMiner {
    profile: KeywordProfile,
}

impl KeywordMiner {
    pub fn new(profile: KeywordProfile) -> Self {
        Self { profile }
    }

    /// Ranks tokens longer than three characters by frequency. Equal counts
    /// keep first-occurrence order. Positions are simulated:
    /// `position_base + index * position_stride` for each primary keyword.
    pub fn mine(&self, title: &str, description: &str) -> Keywords {
        let text = format!("{title} {description}").to_lowercase();

        let mut counts: Vec<(&str, u32)> = Vec::new();
        let mut index: HashMap<&str, usize> = HashMap::new();
        for token in text
            .split(|c: char| !(c.is_alphanumeric() || c == '_'))
            .filter(|t| t.chars().count() > 3 && !STOP_WORDS.contains(t))
        {
            let i = *index.entry(token).or_insert_with(|| {
                counts.push((token, 0));
                counts.len() - 1
            });
            counts[i].1 += 1;
        }
        // stable: ties stay in first-occurrence order
        counts.sort_by(|a, b| b.1.cmp(&a.1));

        let mut ranked = counts.into_iter().map(|(token, _)| token.to_string());
        let primary: Vec<String> = ranked.by_ref().take(self.profile.primary_count).collect();
        let secondary: Vec<String> = ranked.take(self.profile.secondary_count).collect();

        let positions: BTreeMap<String, u32> = primary
            .iter()
            .enumerate()
            .map(|(i, k)| (k.clone(), self.profile.position_base + i as u32 * self.profile.position_stride))
            .collect();

        Keywords {
            primary,
            secondary,
            positions,
        }
    }
}
