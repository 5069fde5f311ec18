//! CV extractor — turns plain résumé text into skills, years of experience
//! and industries using the lexicon tables.

use serde::Serialize;

use crate::matching::lexicon::Lexicon;

/// Facts pulled out of a single uploaded document. Request-scoped.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExtractedCv {
    #[serde(skip)]
    pub text: String,
    pub skills: Vec<String>,
    pub experience: u32,
    pub industries: Vec<String>,
}

/// Runs all three extractors over `text`. Never fails: no match yields an
/// empty list or zero.
pub fn extract_cv(text: &str, lexicon: &Lexicon) -> ExtractedCv {
    let lowered = text.to_lowercase();

    ExtractedCv {
        skills: extract_skills(&lowered, lexicon),
        experience: extract_experience(&lowered, lexicon),
        industries: extract_industries(&lowered, lexicon),
        text: text.to_string(),
    }
}

/// Lexicon skills appearing as whole words or phrases, in lexicon order.
fn extract_skills(lowered: &str, lexicon: &Lexicon) -> Vec<String> {
    lexicon
        .skills()
        .iter()
        .filter(|skill| skill.is_match(lowered))
        .map(|skill| skill.term.clone())
        .collect()
}

/// Largest year count claimed by any experience phrasing, or 0.
fn extract_experience(lowered: &str, lexicon: &Lexicon) -> u32 {
    lexicon
        .experience_patterns()
        .iter()
        .flat_map(|re| re.captures_iter(lowered))
        .filter_map(|caps| caps.get(1))
        .filter_map(|m| m.as_str().parse::<u32>().ok())
        .max()
        .unwrap_or(0)
}

/// Industries are plain substring hits, not word-bounded.
fn extract_industries(lowered: &str, lexicon: &Lexicon) -> Vec<String> {
    lexicon
        .industries()
        .iter()
        .filter(|industry| lowered.contains(industry.as_str()))
        .cloned()
        .collect()
}
