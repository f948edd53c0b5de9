//! Job description keyword report.
//!
//! Pulls the most frequent meaningful terms out of a job description and checks
//! which of them appear in the resume. Purely informational: nothing here feeds
//! into the resume score.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use stop_words::{get, LANGUAGE};

/// How many job description terms are compared against the resume.
pub const MAX_JOB_TERMS: usize = 20;
const MIN_TERM_CHARS: usize = 3;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobMatch {
    pub keywords_found: Vec<String>,
    pub missing_keywords: Vec<String>,
    /// 0 – 100
    pub match_percent: u32,
}

impl JobMatch {
    /// True when fewer than half of the job terms were found in the resume.
    pub fn is_weak(&self) -> bool {
        let total = self.keywords_found.len() + self.missing_keywords.len();
        total > 0 && self.keywords_found.len() * 2 < total
    }
}

pub struct JobKeywordExtractor {
    stop_words: HashSet<String>,
    max_terms: usize,
}

impl Default for JobKeywordExtractor {
    fn default() -> Self {
        Self {
            stop_words: get(LANGUAGE::English).into_iter().collect(),
            max_terms: MAX_JOB_TERMS,
        }
    }
}

impl JobKeywordExtractor {
    /// Ranked terms from a job description: frequency descending, ties broken by
    /// first appearance.
    pub fn extract(&self, job_description: &str) -> Vec<String> {
        // term -> (frequency, first position)
        let mut counts: HashMap<String, (u32, usize)> = HashMap::new();

        for (position, token) in tokenize(job_description).enumerate() {
            if !self.is_meaningful(&token) {
                continue;
            }
            counts.entry(token).or_insert((0, position)).0 += 1;
        }

        let mut ranked: Vec<(String, (u32, usize))> = counts.into_iter().collect();
        ranked.sort_by(|(_, (freq_a, pos_a)), (_, (freq_b, pos_b))| {
            freq_b.cmp(freq_a).then(pos_a.cmp(pos_b))
        });

        ranked
            .into_iter()
            .take(self.max_terms)
            .map(|(term, _)| term)
            .collect()
    }

    /// Compares the job description's top terms with the words of `resume_text`.
    pub fn compare(&self, job_description: &str, resume_text: &str) -> JobMatch {
        let terms = self.extract(job_description);
        let resume_words: HashSet<String> = tokenize(resume_text).collect();

        let (keywords_found, missing_keywords): (Vec<String>, Vec<String>) = terms
            .into_iter()
            .partition(|term| resume_words.contains(term));

        let total = keywords_found.len() + missing_keywords.len();
        let match_percent = if total > 0 {
            ((keywords_found.len() as f64 / total as f64) * 100.0).round() as u32
        } else {
            0
        };

        JobMatch {
            keywords_found,
            missing_keywords,
            match_percent,
        }
    }

    fn is_meaningful(&self, token: &str) -> bool {
        token.chars().count() >= MIN_TERM_CHARS
            && !token.chars().all(|c| c.is_ascii_digit())
            && !self.stop_words.contains(token)
    }
}

/// Lowercased alphanumeric runs.
fn tokenize(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(str::to_lowercase)
}
