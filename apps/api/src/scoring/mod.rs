// Resume scoring engine.
// Deterministic and synchronous: no I/O, no LLM calls. AI suggestions live in `ats`.

pub mod criteria;
pub mod job_match;
pub mod scorer;

pub use scorer::{AnalysisInput, AnalysisResult, ResumeScorer, ScoreError};
