use serde::{Deserialize, Deserializer, Serialize};

/// Reasons a submitted profile is rejected before it reaches the relay.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ProfileError {
    #[error("profile field '{0}' is required")]
    MissingField(&'static str),
}

/// The candidate details collected by the setup form.
///
/// `skills` arrives from the browser as one comma separated string, but a JSON
/// array is accepted as well. Blank entries are dropped either way.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateProfile {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub job_role: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub experience: Option<String>,
    #[serde(default, deserialize_with = "deserialize_skills")]
    pub skills: Vec<String>,
}

impl CandidateProfile {
    pub fn new(name: impl Into<String>, job_role: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            job_role: job_role.into(),
            experience: None,
            skills: Vec::new(),
        }
    }

    pub fn with_experience(mut self, experience: impl Into<String>) -> Self {
        self.experience = Some(experience.into());
        self
    }

    pub fn with_skills<I, S>(mut self, skills: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.skills = skills.into_iter().map(Into::into).collect();
        self
    }

    /// Trims every field and checks that the required ones are present.
    pub fn validated(mut self) -> Result<Self, ProfileError> {
        self.name = self.name.trim().to_string();
        self.job_role = self.job_role.trim().to_string();
        if self.name.is_empty() {
            return Err(ProfileError::MissingField("name"));
        }
        if self.job_role.is_empty() {
            return Err(ProfileError::MissingField("jobRole"));
        }
        self.experience = self
            .experience
            .map(|e| e.trim().to_string())
            .filter(|e| !e.is_empty());
        self.skills = normalize_skills(self.skills);
        Ok(self)
    }

    /// Skills joined for prompt interpolation.
    pub fn skills_line(&self) -> String {
        self.skills.join(", ")
    }
}

fn normalize_skills(skills: Vec<String>) -> Vec<String> {
    skills
        .into_iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SkillsField {
    List(Vec<String>),
    Line(String),
}

fn deserialize_skills<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let skills = match Option::<SkillsField>::deserialize(deserializer)? {
        Some(SkillsField::List(list)) => list,
        Some(SkillsField::Line(line)) => line.split(',').map(str::to_string).collect(),
        None => Vec::new(),
    };
    Ok(normalize_skills(skills))
}
