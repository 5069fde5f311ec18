//! The three matching operations, over an injected `JobStore`.
//!
//! Everything here is request-scoped: vector spaces and extracted facts are
//! rebuilt per call and dropped afterwards.

use serde::Serialize;
use tracing::{debug, info};
use uuid::Uuid;

use crate::errors::AppError;
use crate::matching::extractor::{extract_cv, ExtractedCv};
use crate::matching::format::{percent1, round2};
use crate::matching::lexicon::Lexicon;
use crate::matching::scorer::{score_job, MatchBreakdown};
use crate::matching::tfidf::{job_text, profile_text, rank_by_similarity};
use crate::models::JobPostingRow;
use crate::store::JobStore;

pub const RECOMMENDATION_LIMIT: usize = 5;
pub const CV_MATCH_LIMIT: usize = 10;

// ────────────────────────────────────────────────────────────────────────────
// Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct Recommendation {
    pub job_id: Uuid,
    pub title: String,
    pub score: f64,
}

#[derive(Debug, Clone)]
pub enum RecommendOutcome {
    Recommendations(Vec<Recommendation>),
    UserNotFound,
}

#[derive(Debug, Clone, Serialize)]
pub struct CvMatch {
    pub job_id: Uuid,
    pub title: String,
    pub company: Option<String>,
    pub score: f64,
    pub skill_match: f64,
    pub experience_match: f64,
    pub industry_match: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct MatchCvResponse {
    pub cv_info: ExtractedCv,
    pub matches: Vec<CvMatch>,
}

#[derive(Debug, Clone, Serialize)]
pub struct JobDetails {
    pub job_id: Uuid,
    pub title: String,
    pub company: Option<String>,
    pub skills: Vec<String>,
    pub experience: i32,
    pub industries: Vec<String>,
}

/// Scores as percentages, one decimal.
#[derive(Debug, Clone, Serialize)]
pub struct MatchingScores {
    pub overall: f64,
    pub skill_match: f64,
    pub experience_match: f64,
    pub industry_match: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct MatchCvToJobResponse {
    pub job_details: JobDetails,
    pub cv_info: ExtractedCv,
    pub matching_scores: MatchingScores,
    pub matching_details: MatchBreakdown,
}

// ────────────────────────────────────────────────────────────────────────────
// Operations
// ────────────────────────────────────────────────────────────────────────────

/// Ranks active postings against a seeker's declared skills with TF-IDF
/// cosine similarity. Unknown or malformed ids are a normal outcome.
pub async fn recommend(store: &dyn JobStore, user_id: &str) -> Result<RecommendOutcome, AppError> {
    let Ok(user_id) = Uuid::parse_str(user_id) else {
        debug!(user_id, "Malformed user id");
        return Ok(RecommendOutcome::UserNotFound);
    };
    let Some(seeker) = store.get_seeker(user_id).await? else {
        return Ok(RecommendOutcome::UserNotFound);
    };

    let jobs = store.list_active_jobs().await?;
    let corpus: Vec<(usize, String)> = jobs
        .iter()
        .enumerate()
        .map(|(i, job)| (i, job_text(&job.title, &job.skills)))
        .collect();

    let recommendations: Vec<Recommendation> =
        rank_by_similarity(&profile_text(&seeker.skills), &corpus)
            .into_iter()
            .take(RECOMMENDATION_LIMIT)
            .map(|ranked| {
                let job = &jobs[ranked.key];
                Recommendation {
                    job_id: job.id,
                    title: job.title.clone(),
                    score: round2(ranked.similarity),
                }
            })
            .collect();

    info!(
        %user_id,
        active_jobs = jobs.len(),
        returned = recommendations.len(),
        "Computed recommendations"
    );
    Ok(RecommendOutcome::Recommendations(recommendations))
}

/// Extracts CV facts and scores them against every active posting; best
/// composite first, top `CV_MATCH_LIMIT`.
pub async fn match_cv(
    store: &dyn JobStore,
    lexicon: &Lexicon,
    text: &str,
) -> Result<MatchCvResponse, AppError> {
    let cv = extract_cv(text, lexicon);
    log_extraction(&cv);

    let jobs = store.list_active_jobs().await?;
    let mut scored: Vec<(f64, CvMatch)> = jobs
        .iter()
        .map(|job| {
            let result = score_job(&cv, job);
            let composite = result.score.composite;
            let entry = CvMatch {
                job_id: job.id,
                title: job.title.clone(),
                company: job.company.clone(),
                score: round2(composite),
                skill_match: round2(result.score.skill_score),
                experience_match: round2(result.score.experience_score),
                industry_match: round2(result.score.industry_score),
            };
            (composite, entry)
        })
        .collect();

    // Stable: equal composites keep store order.
    scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));
    let matches: Vec<CvMatch> = scored
        .into_iter()
        .take(CV_MATCH_LIMIT)
        .map(|(_, entry)| entry)
        .collect();

    info!(
        active_jobs = jobs.len(),
        returned = matches.len(),
        "Matched CV against active jobs"
    );
    Ok(MatchCvResponse {
        cv_info: cv,
        matches,
    })
}

/// Scores CV facts against one active posting with a full breakdown.
/// Unknown, malformed or inactive job ids are `NotFound`.
pub async fn match_cv_to_job(
    store: &dyn JobStore,
    lexicon: &Lexicon,
    job_id: &str,
    text: &str,
) -> Result<MatchCvToJobResponse, AppError> {
    let job = find_active_job(store, job_id).await?;

    let cv = extract_cv(text, lexicon);
    log_extraction(&cv);

    let result = score_job(&cv, &job);
    info!(job_id = %job.id, composite = result.score.composite, "Matched CV against job");

    Ok(MatchCvToJobResponse {
        matching_scores: MatchingScores {
            overall: percent1(result.score.composite),
            skill_match: percent1(result.score.skill_score),
            experience_match: percent1(result.score.experience_score),
            industry_match: percent1(result.score.industry_score),
        },
        matching_details: result.breakdown,
        job_details: JobDetails {
            job_id: job.id,
            title: job.title,
            company: job.company,
            skills: job.skills,
            experience: job.experience,
            industries: job.industries,
        },
        cv_info: cv,
    })
}

/// Resolves `job_id` to an active posting.
pub async fn find_active_job(store: &dyn JobStore, job_id: &str) -> Result<JobPostingRow, AppError> {
    let not_found = || AppError::NotFound(format!("Job {job_id} not found or not active"));

    let id = Uuid::parse_str(job_id).map_err(|_| not_found())?;
    store
        .get_job(id)
        .await?
        .filter(JobPostingRow::is_active)
        .ok_or_else(not_found)
}

fn log_extraction(cv: &ExtractedCv) {
    debug!(
        skills = cv.skills.len(),
        experience = cv.experience,
        industries = cv.industries.len(),
        "Extracted CV facts"
    );
}
