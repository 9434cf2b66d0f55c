// Play Store detail page extraction
use crate::model::{ExtractedListing, ParserError, EVERYONE, NO_DESCRIPTION, UNKNOWN, UNKNOWN_DEVELOPER, VARIES};
use crate::parser::rules::{self, Cascade, Page};
use crate::utils::{first_decimal, parse_count};
use regex::Regex;
use scraper::{Html, Selector};
use std::collections::BTreeMap;
use tracing::debug;

const MIN_DESCRIPTION_LEN: usize = 50;

/// Histogram used whenever the rating bars cannot be read.
pub fn default_distribution() -> BTreeMap<u8, u32> {
    BTreeMap::from([(5, 60), (4, 20), (3, 10), (2, 5), (1, 5)])
}

/// Runs the fallback cascades for every listing field.
///
/// Built once; holds only compiled selectors and patterns, so one instance can
/// serve any number of documents.
pub struct ListingExtractor {
    title: Cascade,
    developer: Cascade,
    category: Cascade,
    rating: Cascade,
    reviews: Cascade,
    installs: Cascade,
    version: Cascade,
    size: Cascade,
    content_rating: Cascade,
    description: Cascade,
    description_meta: Cascade,
    rating_bars: Vec<Selector>,
    title_suffix: Regex,
    bar_width: Regex,
}

impl ListingExtractor {
    pub fn new() -> Result<Self, ParserError> {
        Ok(Self {
            title: Cascade::compile(rules::TITLE)?,
            developer: Cascade::compile(rules::DEVELOPER)?,
            category: Cascade::compile(rules::CATEGORY)?,
            rating: Cascade::compile(rules::RATING)?,
            reviews: Cascade::compile(rules::REVIEWS)?,
            installs: Cascade::compile(rules::INSTALLS)?,
            version: Cascade::compile(rules::VERSION)?,
            size: Cascade::compile(rules::SIZE)?,
            content_rating: Cascade::compile(rules::CONTENT_RATING)?,
            description: Cascade::compile(rules::DESCRIPTION)?,
            description_meta: Cascade::compile(rules::DESCRIPTION_META)?,
            rating_bars: rules::RATING_BARS
                .iter()
                .map(|css| rules::compile_selector(*css))
                .collect::<Result<_, _>>()?,
            title_suffix: rules::compile_pattern(rules::TITLE_SUFFIX)?,
            bar_width: rules::compile_pattern(rules::BAR_WIDTH)?,
        })
    }

    /// Parses `html` and extracts it. The parsed tree is dropped before returning.
    pub fn extract_html(&self, html: &str, fallback_id: &str) -> ExtractedListing {
        let document = Html::parse_document(html);
        self.extract(&document, fallback_id)
    }

    /// Never fails: exhausted cascades resolve to the documented defaults and
    /// the title falls back to `fallback_id`.
    pub fn extract(&self, document: &Html, fallback_id: &str) -> ExtractedListing {
        let page = Page::new(document);

        let title = self
            .title
            .first_match(&page, |s| {
                let cleaned = self.title_suffix.replace(s, "").trim().to_string();
                (!cleaned.is_empty()).then_some(cleaned)
            })
            .unwrap_or_else(|| gap("title", fallback_id));

        let rating = self
            .rating
            .first_match(&page, |s| first_decimal(s).filter(|r| (0.0..=5.0).contains(r)))
            .unwrap_or_else(|| {
                debug!("No rating found, using 0.0");
                0.0
            });

        let review_count = self
            .reviews
            .first_match(&page, |s| Some(parse_count(s)).filter(|n| *n > 0))
            .unwrap_or(0);

        let description = self
            .description
            .first_match(&page, |s| (s.chars().count() > MIN_DESCRIPTION_LEN).then(|| s.to_string()))
            .or_else(|| self.description_meta.first_text(&page))
            .unwrap_or_else(|| gap("description", NO_DESCRIPTION));

        ExtractedListing {
            title,
            developer: text_or(&self.developer, &page, "developer", UNKNOWN_DEVELOPER),
            category: text_or(&self.category, &page, "category", UNKNOWN),
            installs: text_or(&self.installs, &page, "installs", UNKNOWN),
            version: text_or(&self.version, &page, "version", UNKNOWN),
            size: text_or(&self.size, &page, "size", VARIES),
            content_rating: text_or(&self.content_rating, &page, "content rating", EVERYONE),
            rating,
            review_count,
            rating_distribution: self.rating_distribution(document),
            description,
        }
    }

    /// Reads five bar widths (5 stars first). Any miss yields the default.
    fn rating_distribution(&self, document: &Html) -> BTreeMap<u8, u32> {
        self.rating_bars
            .iter()
            .find_map(|sel| {
                let bars: Vec<_> = document.select(sel).take(5).collect();
                if bars.len() < 5 {
                    return None;
                }
                bars.iter()
                    .enumerate()
                    .map(|(i, bar)| {
                        let style = bar.value().attr("style")?;
                        let width: f64 = self.bar_width.captures(style)?.get(1)?.as_str().parse().ok()?;
                        Some((5 - i as u8, width.round().clamp(0.0, 100.0) as u32))
                    })
                    .collect::<Option<BTreeMap<u8, u32>>>()
            })
            .unwrap_or_else(|| {
                debug!("Rating bars not readable, using default distribution");
                default_distribution()
            })
    }
}

fn text_or(cascade: &Cascade, page: &Page, field: &str, default: &str) -> String {
    cascade.first_text(page).unwrap_or_else(|| gap(field, default))
}

fn gap(field: &str, default: &str) -> String {
    debug!("No match for {}, using {:?}", field, default);
    default.to_string()
}
