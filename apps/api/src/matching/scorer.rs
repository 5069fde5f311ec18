//! Weighted match scorer — compares extracted CV facts with one posting's
//! requirements.
//!
//! composite = 0.5·skill + 0.3·experience + 0.2·industry

use std::collections::HashSet;

use serde::Serialize;

use crate::matching::extractor::ExtractedCv;
use crate::models::JobPostingRow;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MatchWeights {
    pub skill: f64,
    pub experience: f64,
    pub industry: f64,
}

/// Fixed convex weights. Changing them changes every published score.
pub const MATCH_WEIGHTS: MatchWeights = MatchWeights {
    skill: 0.5,
    experience: 0.3,
    industry: 0.2,
};

/// Sub-scores and composite, all in [0, 1], unrounded.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MatchScore {
    pub skill_score: f64,
    pub experience_score: f64,
    pub industry_score: f64,
    pub composite: f64,
}

/// Which requirements a CV covers, for explaining a score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchBreakdown {
    pub matched_skills: Vec<String>,
    pub missing_skills: Vec<String>,
    pub matched_industries: Vec<String>,
    pub missing_industries: Vec<String>,
    /// CV years minus required years; negative when the CV falls short.
    pub experience_difference: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JobMatch {
    pub score: MatchScore,
    pub breakdown: MatchBreakdown,
}

/// Case-insensitive overlap of two term lists, divided by the size of the
/// larger de-duplicated list. 0.0 when both are empty.
pub fn overlap_score(a: &[String], b: &[String]) -> f64 {
    let a = lowercase_set(a);
    let b = lowercase_set(b);
    let denominator = a.len().max(b.len());
    if denominator == 0 {
        return 0.0;
    }
    a.intersection(&b).count() as f64 / denominator as f64
}

/// 1 / (1 + |cv − job|): 1.0 on an exact match, approaching 0 as the gap grows.
pub fn experience_score(cv_years: u32, job_years: u32) -> f64 {
    1.0 / (1.0 + cv_years.abs_diff(job_years) as f64)
}

pub fn composite_score(skill: f64, experience: f64, industry: f64) -> f64 {
    MATCH_WEIGHTS.skill * skill
        + MATCH_WEIGHTS.experience * experience
        + MATCH_WEIGHTS.industry * industry
}

/// Scores `cv` against a single posting and explains the result.
pub fn score_job(cv: &ExtractedCv, job: &JobPostingRow) -> JobMatch {
    let job_years = job.required_experience();

    let skill_score = overlap_score(&cv.skills, &job.skills);
    let experience_score = experience_score(cv.experience, job_years);
    let industry_score = overlap_score(&cv.industries, &job.industries);

    let (matched_skills, missing_skills) = split_matched(&cv.skills, &job.skills);
    let (matched_industries, missing_industries) = split_matched(&cv.industries, &job.industries);

    JobMatch {
        score: MatchScore {
            skill_score,
            experience_score,
            industry_score,
            composite: composite_score(skill_score, experience_score, industry_score),
        },
        breakdown: MatchBreakdown {
            matched_skills,
            missing_skills,
            matched_industries,
            missing_industries,
            experience_difference: i64::from(cv.experience) - i64::from(job_years),
        },
    }
}

/// Splits requirements into (matched, missing). Matched terms use the CV's
/// spelling, missing ones the job's; both are de-duplicated.
fn split_matched(cv_terms: &[String], required: &[String]) -> (Vec<String>, Vec<String>) {
    let required_lower = lowercase_set(required);
    let cv_lower = lowercase_set(cv_terms);

    let mut matched: Vec<String> = Vec::new();
    let mut seen = HashSet::new();
    for term in cv_terms {
        let lower = term.to_lowercase();
        if required_lower.contains(&lower) && seen.insert(lower) {
            matched.push(term.clone());
        }
    }

    let mut missing: Vec<String> = Vec::new();
    let mut seen = HashSet::new();
    for term in required {
        let lower = term.to_lowercase();
        if !cv_lower.contains(&lower) && seen.insert(lower) {
            missing.push(term.clone());
        }
    }

    (matched, missing)
}

fn lowercase_set(terms: &[String]) -> HashSet<String> {
    terms.iter().map(|t| t.to_lowercase()).collect()
}
