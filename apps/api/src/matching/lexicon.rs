//! Lexicon & pattern tables — skill vocabulary, industry vocabulary and the
//! experience-year patterns used by the extractor.
//!
//! The default tables ship embedded in the binary (`data/lexicon.json`); an
//! alternative file can be supplied through `LEXICON_PATH` at startup.

use std::path::Path;

use anyhow::{Context, Result};
use regex::Regex;
use serde::Deserialize;

const DEFAULT_LEXICON: &str = include_str!("../../data/lexicon.json");

/// On-disk shape of a lexicon file.
#[derive(Debug, Deserialize)]
struct LexiconFile {
    skills: Vec<String>,
    industries: Vec<String>,
    experience_patterns: Vec<String>,
}

/// Immutable lookup tables, built once and shared across requests.
#[derive(Debug, Clone)]
pub struct Lexicon {
    skills: Vec<SkillTerm>,
    industries: Vec<String>,
    experience_patterns: Vec<Regex>,
}

/// A skill term plus its literal, boundary-anchored matcher.
#[derive(Debug, Clone)]
pub struct SkillTerm {
    pub term: String,
    matcher: Regex,
}

impl SkillTerm {
    fn new(term: String) -> Result<Self> {
        // No lookaround in `regex`: anchor on a non-word char or the text edge.
        // The term itself is escaped so `c++` or `ci/cd` match literally.
        let pattern = format!(r"(?:^|\W){}(?:\W|$)", regex::escape(&term));
        let matcher = Regex::new(&pattern)
            .with_context(|| format!("Failed to build matcher for skill '{term}'"))?;
        Ok(Self { term, matcher })
    }

    /// `text` must already be lower-cased.
    pub fn is_match(&self, text: &str) -> bool {
        self.matcher.is_match(text)
    }
}

impl Lexicon {
    /// The tables compiled into the binary.
    pub fn embedded() -> Result<Self> {
        Self::from_json(DEFAULT_LEXICON).context("Embedded lexicon is invalid")
    }

    /// Loads a lexicon from a JSON file on disk.
    pub fn from_path(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read lexicon file '{}'", path.display()))?;
        Self::from_json(&raw)
            .with_context(|| format!("Invalid lexicon file '{}'", path.display()))
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        let file: LexiconFile = serde_json::from_str(raw)?;
        Self::new(file.skills, file.industries, file.experience_patterns)
    }

    /// Builds the tables from raw term lists. Terms are trimmed, lower-cased
    /// and de-duplicated keeping first-seen order. Every experience pattern
    /// must carry a capture group for the year count.
    pub fn new<S, I, P>(skills: S, industries: I, experience_patterns: P) -> Result<Self>
    where
        S: IntoIterator<Item = String>,
        I: IntoIterator<Item = String>,
        P: IntoIterator<Item = String>,
    {
        let skills = normalize_terms(skills)
            .into_iter()
            .map(SkillTerm::new)
            .collect::<Result<Vec<_>>>()?;

        let industries = normalize_terms(industries);

        let experience_patterns = experience_patterns
            .into_iter()
            .map(|p| -> Result<Regex> {
                let re = Regex::new(&p)
                    .with_context(|| format!("Invalid experience pattern '{p}'"))?;
                anyhow::ensure!(
                    re.captures_len() > 1,
                    "Experience pattern '{p}' has no capture group for the year count"
                );
                Ok(re)
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            skills,
            industries,
            experience_patterns,
        })
    }

    pub fn skills(&self) -> &[SkillTerm] {
        &self.skills
    }

    pub fn industries(&self) -> &[String] {
        &self.industries
    }

    pub fn experience_patterns(&self) -> &[Regex] {
        &self.experience_patterns
    }
}

fn normalize_terms<T: IntoIterator<Item = String>>(terms: T) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for term in terms {
        let term = term.trim().to_lowercase();
        if !term.is_empty() && !out.contains(&term) {
            out.push(term);
        }
    }
    out
}
