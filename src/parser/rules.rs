// Fallback rule tables for the Play Store detail page and the cascade runner.
use crate::model::ParserError;
use crate::utils::normalize_ws;
use regex::Regex;
use scraper::{ElementRef, Html, Node, Selector};

/// Uncompiled rule as written in the tables below.
#[derive(Debug, Clone, Copy)]
pub enum RuleSpec {
    /// Text of each element matching the selector.
    Text(&'static str),
    /// Attribute of each element matching the selector.
    Attr(&'static str, &'static str),
    /// Label cell containing the text; value is the next sibling element.
    LabelBefore(&'static str, &'static str),
    /// Label cell containing the text; value is the previous sibling element.
    LabelAfter(&'static str, &'static str),
    /// Regex over the visible page text; group 1 if present.
    Pattern(&'static str),
}

pub const TITLE: &[RuleSpec] = &[
    RuleSpec::Text("h1[itemprop=name]"),
    RuleSpec::Text("h1.Fd93Bb"),
    RuleSpec::Text("h1"),
    RuleSpec::Text("span.AfwdI"),
    RuleSpec::Attr("meta[property='og:title']", "content"),
    RuleSpec::Text("title"),
];

pub const DEVELOPER: &[RuleSpec] = &[
    RuleSpec::Text("div.Vbfug a"),
    RuleSpec::Text("a[href*='developer'] span"),
    RuleSpec::Text("a.Si6A0c"),
    RuleSpec::Text("div.qQKdcc span"),
];

pub const CATEGORY: &[RuleSpec] = &[
    RuleSpec::Text("a[itemprop=genre]"),
    RuleSpec::Text("span[itemprop=genre]"),
    RuleSpec::Text("a[href*='/category/']"),
];

pub const RATING: &[RuleSpec] = &[
    RuleSpec::Text("div.TT9eCd"),
    RuleSpec::Text("div.BHMmbe"),
    RuleSpec::Text("span.w2kbF"),
    RuleSpec::Text("div.jILTFe"),
    RuleSpec::Attr("meta[itemprop=ratingValue]", "content"),
    RuleSpec::Attr("[aria-label*='Rated']", "aria-label"),
];

pub const REVIEWS: &[RuleSpec] = &[
    RuleSpec::Text("div.g1rdde"),
    RuleSpec::Text("span.EymY4b span"),
    RuleSpec::Text("div.EHUI5b"),
    RuleSpec::Attr("meta[itemprop=reviewCount]", "content"),
    RuleSpec::Pattern(r"(?i)(\d[\d.,]*\s*[KMB]?)\s+reviews"),
];

pub const INSTALLS: &[RuleSpec] = &[
    RuleSpec::LabelAfter("div.g1rdde", "Downloads"),
    RuleSpec::LabelBefore("div.ClM7O", "Downloads"),
    RuleSpec::Pattern(r"(?i)(\d+[KMB+,\d]*\+?)\s*downloads"),
    RuleSpec::Pattern(r"(?i)Downloads\s*(\d+[KMB+,\d]*\+?)"),
];

pub const VERSION: &[RuleSpec] = &[
    RuleSpec::LabelBefore("div.q078ud", "Version"),
    RuleSpec::LabelBefore("div.ClM7O", "Version"),
    RuleSpec::Pattern(r"(?i)Version\s*(\d[\d.]*)"),
];

pub const SIZE: &[RuleSpec] = &[
    RuleSpec::LabelBefore("div.q078ud", "Download size"),
    RuleSpec::LabelBefore("div.ClM7O", "Size"),
    RuleSpec::Pattern(r"(?i)(\d+(?:\.\d+)?\s*[MG]B)"),
];

pub const CONTENT_RATING: &[RuleSpec] = &[
    RuleSpec::Text("span[itemprop=contentRating]"),
    RuleSpec::LabelBefore("div.ClM7O", "Rated for"),
    RuleSpec::Pattern(r"(?i)Rated for\s*(\d+\+?)"),
    RuleSpec::Pattern(r"(Everyone 10\+|Everyone|Teen|Mature 17\+|Adults only)"),
];

/// Block-level description candidates; only long enough text counts.
pub const DESCRIPTION: &[RuleSpec] = &[
    RuleSpec::Text("div[data-g-id=description]"),
    RuleSpec::Text("div.W4P4ne"),
    RuleSpec::Text("div.bARER"),
];

pub const DESCRIPTION_META: &[RuleSpec] = &[
    RuleSpec::Attr("meta[name=description]", "content"),
    RuleSpec::Attr("meta[property='og:description']", "content"),
];

/// Rating histogram bars, five per page, 5 stars first.
pub const RATING_BARS: &[&str] = &["div.RutFAf", "div.VEF2C"];

pub const TITLE_SUFFIX: &str = r"(?i)\s*(?:[-–]\s*)?(?:Apps on Google Play|Google Play)\s*$";
pub const BAR_WIDTH: &str = r"(?i)width\s*:\s*(\d+(?:\.\d+)?)\s*%";

pub fn compile_selector(css: &'static str) -> Result<Selector, ParserError> {
    Selector::parse(css).map_err(|e| ParserError::InvalidSelector(css, e.to_string()))
}

pub fn compile_pattern(pattern: &'static str) -> Result<Regex, ParserError> {
    Regex::new(pattern).map_err(|e| ParserError::InvalidPattern(pattern, e.to_string()))
}

#[derive(Debug)]
enum Rule {
    Text(Selector),
    Attr(Selector, &'static str),
    LabelBefore(Selector, String),
    LabelAfter(Selector, String),
    Pattern(Regex),
}

/// An ordered list of compiled rules for one field.
#[derive(Debug)]
pub struct Cascade {
    rules: Vec<Rule>,
}

impl Cascade {
    pub fn compile(specs: &[RuleSpec]) -> Result<Self, ParserError> {
        let rules = specs
            .iter()
            .map(|spec| -> Result<Rule, ParserError> {
                Ok(match *spec {
                    RuleSpec::Text(css) => Rule::Text(compile_selector(css)?),
                    RuleSpec::Attr(css, attr) => Rule::Attr(compile_selector(css)?, attr),
                    RuleSpec::LabelBefore(css, label) => {
                        Rule::LabelBefore(compile_selector(css)?, label.to_lowercase())
                    }
                    RuleSpec::LabelAfter(css, label) => {
                        Rule::LabelAfter(compile_selector(css)?, label.to_lowercase())
                    }
                    RuleSpec::Pattern(pattern) => Rule::Pattern(compile_pattern(pattern)?),
                })
            })
            .collect::<Result<Vec<_>, ParserError>>()?;
        Ok(Self { rules })
    }

    /// Tries every candidate of every rule in order; the first one `accept`
    /// maps to `Some` wins.
    pub fn first_match<T>(&self, page: &Page, mut accept: impl FnMut(&str) -> Option<T>) -> Option<T> {
        self.rules
            .iter()
            .flat_map(|rule| rule.candidates(page))
            .find_map(|candidate| accept(&candidate))
    }

    /// First non-empty candidate, whitespace-normalized.
    pub fn first_text(&self, page: &Page) -> Option<String> {
        self.first_match(page, |s| Some(s.to_string()))
    }
}

impl Rule {
    fn candidates(&self, page: &Page) -> Vec<String> {
        let found: Vec<String> = match self {
            Rule::Text(sel) => page.html.select(sel).map(element_text).collect(),
            Rule::Attr(sel, attr) => page
                .html
                .select(sel)
                .filter_map(|el| el.value().attr(attr).map(normalize_ws))
                .collect(),
            Rule::LabelBefore(sel, label) => labelled(page, sel, label, |el| {
                el.next_siblings().find_map(ElementRef::wrap)
            }),
            Rule::LabelAfter(sel, label) => labelled(page, sel, label, |el| {
                el.prev_siblings().find_map(ElementRef::wrap)
            }),
            Rule::Pattern(re) => re
                .captures_iter(&page.text)
                .filter_map(|caps| caps.get(1).or_else(|| caps.get(0)))
                .map(|m| normalize_ws(m.as_str()))
                .collect(),
        };
        found.into_iter().filter(|s| !s.is_empty()).collect()
    }
}

fn labelled<'a>(
    page: &Page<'a>,
    sel: &Selector,
    label: &str,
    value_of: impl Fn(ElementRef<'a>) -> Option<ElementRef<'a>>,
) -> Vec<String> {
    page.html
        .select(sel)
        .filter(|el| element_text(*el).to_lowercase().contains(label))
        .filter_map(|el| value_of(el).map(element_text))
        .collect()
}

pub fn element_text(el: ElementRef<'_>) -> String {
    normalize_ws(&el.text().collect::<Vec<_>>().join(" "))
}

/// A parsed document plus its visible text, shared by all cascades.
pub struct Page<'a> {
    pub html: &'a Html,
    pub text: String,
}

impl<'a> Page<'a> {
    pub fn new(html: &'a Html) -> Self {
        Self {
            html,
            text: visible_text(html),
        }
    }
}

/// Page text without script, style or template bodies.
fn visible_text(html: &Html) -> String {
    let mut parts = Vec::new();
    for node in html.root_element().descendants() {
        if let Node::Text(text) = node.value() {
            let hidden = node
                .parent()
                .and_then(|p| p.value().as_element().map(|e| e.name()))
                .is_some_and(|name| matches!(name, "script" | "style" | "noscript" | "template"));
            if !hidden {
                parts.push(&**text);
            }
        }
    }
    normalize_ws(&parts.join(" "))
}
