//! Rule-based resume scorer.
//!
//! Six fixed criteria (keywords, formatting, length, contact info, education,
//! experience) add up to at most 100 points. No network, no randomness: the same
//! input always produces the same `AnalysisResult`.

use std::collections::BTreeMap;

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::scoring::criteria::{
    Criterion, CONTACT_FEEDBACK, EDUCATION_FEEDBACK, EXPERIENCE_FEEDBACK, FORMATTING_FEEDBACK,
    JOB_KEYWORDS_FEEDBACK, KEYWORD_FEEDBACK, LENGTH_TOO_LONG_FEEDBACK, LENGTH_TOO_SHORT_FEEDBACK,
};
use crate::scoring::job_match::{JobKeywordExtractor, JobMatch};

pub const DEFAULT_KEYWORDS: &[&str] = &[
    "experience",
    "skills",
    "education",
    "projects",
    "achievements",
    "leadership",
    "team",
    "development",
    "management",
    "analysis",
];

const EMAIL_PATTERN: &str = r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}";
const PHONE_PATTERN: &str = r"(\+\d{1,3}[-. ]?)?\(?\d{3}\)?[-. ]?\d{3}[-. ]?\d{4}";
const EDUCATION_PATTERN: &str = r"(?i)education|university|college|degree|bachelor|master";
const EXPERIENCE_PATTERN: &str = r"(?i)experience|work|job|position|role";

/// More non-blank lines than this earns full formatting credit.
const FORMATTING_MIN_LINES: usize = 10;
const FORMATTING_FALLBACK_POINTS: f64 = 10.0;

const IDEAL_MIN_WORDS: usize = 300;
const IDEAL_MAX_WORDS: usize = 700;
const TOO_LONG_POINTS: f64 = 10.0;
const TOO_SHORT_POINTS: f64 = 5.0;

#[derive(Debug, Error, PartialEq)]
pub enum ScoreError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Extracted resume text plus an optional job description to compare against.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisInput {
    pub text: String,
    #[serde(default)]
    pub job_description: Option<String>,
}

impl AnalysisInput {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            job_description: None,
        }
    }

    #[allow(dead_code)]
    pub fn with_job_description(mut self, job_description: impl Into<String>) -> Self {
        self.job_description = Some(job_description.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    /// 0 – 100
    pub score: u32,
    pub feedback: Vec<String>,
    pub keywords_found: Vec<String>,
    pub missing_keywords: Vec<String>,
    pub criteria: BTreeMap<Criterion, f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_match: Option<JobMatch>,
}

/// Holds the reference vocabulary and the compiled detectors. Build once at
/// startup and share behind an `Arc`.
pub struct ResumeScorer {
    vocabulary: Vec<String>,
    email: Regex,
    phone: Regex,
    education: Regex,
    experience: Regex,
    job_keywords: JobKeywordExtractor,
}

impl Default for ResumeScorer {
    fn default() -> Self {
        Self::new(DEFAULT_KEYWORDS.iter().map(|k| k.to_string()).collect())
    }
}

impl ResumeScorer {
    /// Keywords are trimmed, lowercased and deduplicated; blank entries are dropped.
    pub fn new(vocabulary: Vec<String>) -> Self {
        let mut normalized: Vec<String> = Vec::with_capacity(vocabulary.len());
        for keyword in vocabulary {
            let keyword = keyword.trim().to_lowercase();
            if !keyword.is_empty() && !normalized.contains(&keyword) {
                normalized.push(keyword);
            }
        }

        Self {
            vocabulary: normalized,
            email: Regex::new(EMAIL_PATTERN).expect("email pattern is valid"),
            phone: Regex::new(PHONE_PATTERN).expect("phone pattern is valid"),
            education: Regex::new(EDUCATION_PATTERN).expect("education pattern is valid"),
            experience: Regex::new(EXPERIENCE_PATTERN).expect("experience pattern is valid"),
            job_keywords: JobKeywordExtractor::default(),
        }
    }

    pub fn vocabulary(&self) -> &[String] {
        &self.vocabulary
    }

    /// Scores resume text. Fails only when the text is empty or whitespace.
    pub fn score(&self, input: &AnalysisInput) -> Result<AnalysisResult, ScoreError> {
        let text = input.text.as_str();
        if text.trim().is_empty() {
            return Err(ScoreError::InvalidInput(
                "resume text is empty".to_string(),
            ));
        }

        let lowered = text.to_lowercase();
        let (keywords_found, missing_keywords): (Vec<String>, Vec<String>) = self
            .vocabulary
            .iter()
            .cloned()
            .partition(|keyword| lowered.contains(keyword.as_str()));

        let keyword_points = if self.vocabulary.is_empty() {
            0.0
        } else {
            keywords_found.len() as f64 / self.vocabulary.len() as f64
                * Criterion::KeywordPresence.max_points()
        };

        let line_count = text.lines().filter(|l| !l.trim().is_empty()).count();
        let formatting_points = if line_count > FORMATTING_MIN_LINES {
            Criterion::Formatting.max_points()
        } else {
            FORMATTING_FALLBACK_POINTS
        };

        let word_count = text.split_whitespace().count();
        let length_points = if (IDEAL_MIN_WORDS..=IDEAL_MAX_WORDS).contains(&word_count) {
            Criterion::Length.max_points()
        } else if word_count > IDEAL_MAX_WORDS {
            TOO_LONG_POINTS
        } else {
            TOO_SHORT_POINTS
        };

        let half_contact = Criterion::ContactInfo.max_points() / 2.0;
        let mut contact_points = 0.0;
        if self.email.is_match(text) {
            contact_points += half_contact;
        }
        if self.phone.is_match(text) {
            contact_points += half_contact;
        }

        let education_points = presence_points(&self.education, text, Criterion::Education);
        let experience_points = presence_points(&self.experience, text, Criterion::Experience);

        let criteria: BTreeMap<Criterion, f64> = [
            (Criterion::KeywordPresence, keyword_points),
            (Criterion::Formatting, formatting_points),
            (Criterion::Length, length_points),
            (Criterion::ContactInfo, contact_points),
            (Criterion::Education, education_points),
            (Criterion::Experience, experience_points),
        ]
        .into_iter()
        .collect();

        let total: f64 = criteria.values().sum();
        let score = total.round().clamp(0.0, 100.0) as u32;

        let mut feedback: Vec<String> = criteria
            .iter()
            .filter(|(criterion, points)| **points < criterion.feedback_threshold())
            .map(|(criterion, _)| feedback_for(*criterion, word_count).to_string())
            .collect();

        let job_match = input
            .job_description
            .as_deref()
            .filter(|jd| !jd.trim().is_empty())
            .map(|jd| self.job_keywords.compare(jd, text));

        if job_match.as_ref().is_some_and(JobMatch::is_weak) {
            feedback.push(JOB_KEYWORDS_FEEDBACK.to_string());
        }

        Ok(AnalysisResult {
            score,
            feedback,
            keywords_found,
            missing_keywords,
            criteria,
            job_match,
        })
    }
}

fn presence_points(pattern: &Regex, text: &str, criterion: Criterion) -> f64 {
    if pattern.is_match(text) {
        criterion.max_points()
    } else {
        0.0
    }
}

fn feedback_for(criterion: Criterion, word_count: usize) -> &'static str {
    match criterion {
        Criterion::KeywordPresence => KEYWORD_FEEDBACK,
        Criterion::Formatting => FORMATTING_FEEDBACK,
        Criterion::Length if word_count > IDEAL_MAX_WORDS => LENGTH_TOO_LONG_FEEDBACK,
        Criterion::Length => LENGTH_TOO_SHORT_FEEDBACK,
        Criterion::ContactInfo => CONTACT_FEEDBACK,
        Criterion::Education => EDUCATION_FEEDBACK,
        Criterion::Experience => EXPERIENCE_FEEDBACK,
    }
}
