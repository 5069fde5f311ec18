pub mod job;
pub mod seeker;

pub use job::{JobPostingRow, JobStatus};
pub use seeker::JobSeekerRow;
