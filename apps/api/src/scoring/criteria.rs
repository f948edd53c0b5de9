use serde::{Deserialize, Serialize};

/// Fraction of a criterion's maximum below which an improvement sentence is emitted.
pub const FEEDBACK_THRESHOLD: f64 = 0.75;

/// A weighted scoring dimension. Declaration order is the evaluation order,
/// and also the order criteria appear in serialized results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Criterion {
    KeywordPresence,
    Formatting,
    Length,
    ContactInfo,
    Education,
    Experience,
}

impl Criterion {
    #[allow(dead_code)]
    pub const ALL: [Criterion; 6] = [
        Criterion::KeywordPresence,
        Criterion::Formatting,
        Criterion::Length,
        Criterion::ContactInfo,
        Criterion::Education,
        Criterion::Experience,
    ];

    pub fn max_points(self) -> f64 {
        match self {
            Criterion::KeywordPresence | Criterion::Formatting => 20.0,
            Criterion::Length
            | Criterion::ContactInfo
            | Criterion::Education
            | Criterion::Experience => 15.0,
        }
    }

    /// Points strictly below this value produce a feedback sentence.
    pub fn feedback_threshold(self) -> f64 {
        self.max_points() * FEEDBACK_THRESHOLD
    }
}

// Static feedback copy. One sentence per criterion, except length which
// distinguishes the direction of the problem.
pub const KEYWORD_FEEDBACK: &str =
    "Consider adding more relevant industry keywords to improve visibility.";
pub const FORMATTING_FEEDBACK: &str =
    "Improve resume formatting with clear sections and bullet points.";
pub const LENGTH_TOO_SHORT_FEEDBACK: &str =
    "Your resume might be too short. Aim for 300-700 words.";
pub const LENGTH_TOO_LONG_FEEDBACK: &str =
    "Your resume might be too long. Aim for 300-700 words.";
pub const CONTACT_FEEDBACK: &str = "Ensure your contact information is clearly visible.";
pub const EDUCATION_FEEDBACK: &str = "Add or make your education section more prominent.";
pub const EXPERIENCE_FEEDBACK: &str =
    "Enhance your experience section with detailed achievements.";
pub const JOB_KEYWORDS_FEEDBACK: &str = "Add more relevant keywords from the job description.";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_max_points_sum_to_100() {
        let total: f64 = Criterion::ALL.iter().map(|c| c.max_points()).sum();
        assert_eq!(total, 100.0);
    }

    #[test]
    fn test_thresholds_are_three_quarters_of_max() {
        assert_eq!(Criterion::KeywordPresence.feedback_threshold(), 15.0);
        assert_eq!(Criterion::Length.feedback_threshold(), 11.25);
    }

    #[test]
    fn test_criterion_serializes_camel_case() {
        let json = serde_json::to_string(&Criterion::KeywordPresence).unwrap();
        assert_eq!(json, r#""keywordPresence""#);
        let json = serde_json::to_string(&Criterion::ContactInfo).unwrap();
        assert_eq!(json, r#""contactInfo""#);
    }

    #[test]
    fn test_ordering_follows_evaluation_order() {
        let mut shuffled = vec![
            Criterion::Experience,
            Criterion::Length,
            Criterion::KeywordPresence,
            Criterion::Education,
            Criterion::ContactInfo,
            Criterion::Formatting,
        ];
        shuffled.sort();
        assert_eq!(shuffled, Criterion::ALL.to_vec());
    }
}
