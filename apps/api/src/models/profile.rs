use serde::{Deserialize, Serialize};

/// Social network handle shown in the resume header.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Social {
    pub network: String,
    pub username: String,
}

/// Header metadata for the candidate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Meta {
    pub name: String,
    #[serde(default)]
    pub headline: Option<String>,
    pub location: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub socials: Vec<Social>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Experience {
    #[serde(default)]
    pub id: Option<String>,
    pub company: String,
    pub position: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub highlights: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Project {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub highlights: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Education {
    #[serde(default)]
    pub id: Option<String>,
    pub institution: String,
    pub area: String,
    #[serde(default)]
    pub degree: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub highlights: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// A labelled skill line, e.g. `Languages: Rust, Go`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillEntry {
    pub label: String,
    pub details: String,
}

/// Candidate profile supplied by the caller. Read-only for everything in this service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub meta: Meta,
    #[serde(default)]
    pub education: Vec<Education>,
    #[serde(default)]
    pub experience: Vec<Experience>,
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub skills: Vec<SkillEntry>,
    #[serde(default)]
    pub certifications: Vec<String>,
    #[serde(default)]
    pub interests: Vec<String>,
}

impl Profile {
    /// Experience ids that can be referenced by a plan. Entries without an id are skipped.
    pub fn experience_ids(&self) -> Vec<&str> {
        known_ids(self.experience.iter().map(|e| e.id.as_deref()))
    }

    pub fn project_ids(&self) -> Vec<&str> {
        known_ids(self.projects.iter().map(|p| p.id.as_deref()))
    }

    pub fn education_ids(&self) -> Vec<&str> {
        known_ids(self.education.iter().map(|e| e.id.as_deref()))
    }

    pub fn skill_labels(&self) -> Vec<&str> {
        self.skills.iter().map(|s| s.label.as_str()).collect()
    }
}

fn known_ids<'a>(ids: impl Iterator<Item = Option<&'a str>>) -> Vec<&'a str> {
    ids.flatten().filter(|id| !id.is_empty()).collect()
}
