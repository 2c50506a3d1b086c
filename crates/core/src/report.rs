//! The post-interview analysis shown on the results page.
//!
//! No scoring happens: every interview receives the same canned report.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ScoreBand {
    Excellent,
    Good,
    #[serde(rename = "Needs Improvement")]
    NeedsImprovement,
}

impl ScoreBand {
    pub fn for_score(score: u8) -> Self {
        match score {
            80.. => Self::Excellent,
            60..=79 => Self::Good,
            _ => Self::NeedsImprovement,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryFeedback {
    pub category: String,
    pub score: u8,
    pub band: ScoreBand,
    pub feedback: String,
}

impl CategoryFeedback {
    fn new(category: &str, score: u8, feedback: &str) -> Self {
        Self {
            category: category.to_string(),
            score,
            band: ScoreBand::for_score(score),
            feedback: feedback.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InterviewReport {
    pub overall_score: u8,
    pub confidence_score: u8,
    pub communication_score: u8,
    pub technical_score: u8,
    /// Average seconds before the candidate started answering.
    pub response_time: f32,
    pub strengths: Vec<String>,
    pub improvements: Vec<String>,
    pub key_insights: Vec<String>,
    pub detailed_feedback: Vec<CategoryFeedback>,
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl InterviewReport {
    pub fn canned() -> Self {
        Self {
            overall_score: 78,
            confidence_score: 82,
            communication_score: 75,
            technical_score: 80,
            response_time: 3.2,
            strengths: strings(&[
                "Clear articulation of technical concepts",
                "Good problem-solving approach",
                "Confident delivery",
                "Relevant experience examples",
            ]),
            improvements: strings(&[
                "Provide more specific examples",
                "Reduce filler words",
                "Elaborate on project challenges",
                "Ask clarifying questions",
            ]),
            key_insights: strings(&[
                "Strong technical foundation with room for communication improvement",
                "Demonstrates good understanding of core concepts",
                "Would benefit from more structured responses",
            ]),
            detailed_feedback: vec![
                CategoryFeedback::new(
                    "Technical Knowledge",
                    80,
                    "Demonstrated solid understanding of core concepts with good examples.",
                ),
                CategoryFeedback::new(
                    "Communication",
                    75,
                    "Clear speaking voice but could benefit from more structured responses.",
                ),
                CategoryFeedback::new(
                    "Problem Solving",
                    85,
                    "Excellent approach to breaking down complex problems.",
                ),
                CategoryFeedback::new(
                    "Confidence",
                    82,
                    "Spoke with confidence and maintained good eye contact.",
                ),
            ],
        }
    }
}
