//! The fixed interview script.
//!
//! Question selection is a pure function of the turn index and the profile; it
//! never calls out to a generation or synthesis service.

use crate::profile::CandidateProfile;

/// Follow-up prompts for turns 1 through 9, in order.
pub const FOLLOW_UP_QUESTIONS: [&str; 9] = [
    "That's interesting! Can you walk me through a challenging project you've worked on?",
    "How do you approach problem-solving when you encounter a technical challenge?",
    "What technologies are you most excited about learning or working with?",
    "Can you describe a time when you had to work with a difficult team member?",
    "How do you stay updated with the latest trends in your field?",
    "What's your approach to code review and ensuring code quality?",
    "Can you explain a complex technical concept to someone non-technical?",
    "How do you handle tight deadlines and pressure?",
    "What questions do you have about our company or this role?",
];

/// Returned once the follow-up list is exhausted.
pub const CLOSING_PROMPT: &str =
    "Thank you for your responses. Do you have any final questions for me?";

/// Personalized opening question for turn 0.
pub fn greeting(profile: &CandidateProfile) -> String {
    format!(
        "Hello {}! I'm excited to interview you for the {} position. Let's start with a simple question: Can you tell me a bit about yourself and what interests you about this role?",
        profile.name, profile.job_role
    )
}

/// Returns the question text for `turn_index`.
pub fn next_question(turn_index: u32, profile: &CandidateProfile) -> String {
    if turn_index == 0 {
        return greeting(profile);
    }
    FOLLOW_UP_QUESTIONS
        .get(turn_index as usize - 1)
        .copied()
        .unwrap_or(CLOSING_PROMPT)
        .to_string()
}
