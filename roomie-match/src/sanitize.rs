//! Profile sanitization before external exposure.
//!
//! Real names and contact details never reach the reasoning service. The two
//! parties are relabeled with opaque generic labels, and empty optional
//! fields are rendered as "not specified" rather than fabricated.

use serde::{Deserialize, Serialize};

use crate::profile::{CandidateProfile, CompleteProfile, PersonalityProfile, RoommatePreference};

/// Placeholder text for optional fields the user left empty.
pub const NOT_SPECIFIED: &str = "not specified";

/// Anonymous label for one party in a pairwise analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PartyLabel {
    First,
    Second,
}

impl PartyLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::First => "first party",
            Self::Second => "second party",
        }
    }
}

/// A profile with identity stripped, ready for prompt embedding.
///
/// Every field is pre-rendered text; the only party-specific token left is
/// the opaque label.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SanitizedProfile {
    pub label: String,
    pub age: String,
    pub gender: String,
    pub nationality: String,
    pub description: String,
    pub sleep_type: String,
    pub study_habits: String,
    pub cleanliness: String,
    pub social_level: String,
    pub mbti: String,
    pub going_out: String,
    pub smoking: String,
    pub drinking: String,
    pub pet_stance: String,
    pub noise_tolerance: String,
    pub temperature: String,
    pub lifestyle_tags: String,
    pub preferred_age_range: String,
    pub preferred_gender: String,
    pub preferred_mbti: String,
    pub preferred_sleep_type: String,
    pub preferred_cleanliness: String,
    pub preferred_smoking: String,
    pub additional_preferences: String,
}

impl SanitizedProfile {
    /// Render as a text block for prompt embedding.
    pub fn render(&self) -> String {
        let mut out = String::new();

        out.push_str(&format!("### Profile of the {}\n\n", self.label));
        out.push_str(&format!("- Age: {}\n", self.age));
        out.push_str(&format!("- Gender: {}\n", self.gender));
        out.push_str(&format!("- Nationality: {}\n", self.nationality));
        out.push_str(&format!("- Self description: {}\n", self.description));
        out.push_str(&format!("- Sleep schedule: {}\n", self.sleep_type));
        out.push_str(&format!("- Study habits: {}\n", self.study_habits));
        out.push_str(&format!("- Cleanliness: {}\n", self.cleanliness));
        out.push_str(&format!("- Social level: {}\n", self.social_level));
        out.push_str(&format!("- MBTI: {}\n", self.mbti));
        out.push_str(&format!("- Going out: {}\n", self.going_out));
        out.push_str(&format!("- Smoking: {}\n", self.smoking));
        out.push_str(&format!("- Drinking: {}\n", self.drinking));
        out.push_str(&format!("- Pets: {}\n", self.pet_stance));
        out.push_str(&format!("- Noise: {}\n", self.noise_tolerance));
        out.push_str(&format!("- Room temperature: {}\n", self.temperature));
        out.push_str(&format!("- Lifestyle tags: {}\n", self.lifestyle_tags));
        out.push_str("\nStated roommate preferences:\n");
        out.push_str(&format!("- Preferred age range: {}\n", self.preferred_age_range));
        out.push_str(&format!("- Preferred gender: {}\n", self.preferred_gender));
        out.push_str(&format!("- Preferred MBTI: {}\n", self.preferred_mbti));
        out.push_str(&format!("- Preferred sleep schedule: {}\n", self.preferred_sleep_type));
        out.push_str(&format!("- Preferred cleanliness: {}\n", self.preferred_cleanliness));
        out.push_str(&format!("- Smoking preference: {}\n", self.preferred_smoking));
        out.push_str(&format!("- Additional preferences: {}\n", self.additional_preferences));

        out
    }
}

/// Sanitize a complete profile for pairwise analysis.
pub fn sanitize(profile: &CompleteProfile, label: PartyLabel) -> SanitizedProfile {
    sanitize_with_label(
        &profile.personality,
        Some(&profile.preferences),
        label.as_str().to_string(),
    )
}

/// Sanitize a bulk-ranking candidate under a caller-chosen opaque label.
pub fn sanitize_candidate(candidate: &CandidateProfile, label: String) -> SanitizedProfile {
    sanitize_with_label(&candidate.personality, candidate.preferences.as_ref(), label)
}

/// Sanitize a complete profile under a caller-chosen opaque label. Used for
/// the bulk-ranking target.
pub fn sanitize_labeled(profile: &CompleteProfile, label: impl Into<String>) -> SanitizedProfile {
    sanitize_with_label(&profile.personality, Some(&profile.preferences), label.into())
}

fn sanitize_with_label(
    personality: &PersonalityProfile,
    preferences: Option<&RoommatePreference>,
    label: String,
) -> SanitizedProfile {
    SanitizedProfile {
        label,
        age: personality.age.to_string(),
        gender: non_empty(&personality.gender),
        nationality: non_empty(&personality.nationality),
        description: non_empty(&personality.description),
        sleep_type: personality.sleep_type.as_str().to_string(),
        study_habits: personality.study_habits.as_str().to_string(),
        cleanliness: personality.cleanliness.as_str().to_string(),
        social_level: personality.social_level.as_str().to_string(),
        mbti: personality
            .mbti
            .map(|m| m.as_str().to_string())
            .unwrap_or_else(|| NOT_SPECIFIED.to_string()),
        going_out: personality.going_out.as_str().to_string(),
        smoking: if personality.smoking { "smoker" } else { "non-smoker" }.to_string(),
        drinking: personality.drinking.as_str().to_string(),
        pet_stance: personality.pet_stance.as_str().to_string(),
        noise_tolerance: personality.noise_tolerance.as_str().to_string(),
        temperature: personality.temperature.as_str().to_string(),
        lifestyle_tags: if personality.lifestyle_tags.is_empty() {
            NOT_SPECIFIED.to_string()
        } else {
            personality.lifestyle_tags.join(", ")
        },
        preferred_age_range: preferences
            .map(|p| format!("{}-{}", p.preferred_age.min, p.preferred_age.max))
            .unwrap_or_else(|| NOT_SPECIFIED.to_string()),
        preferred_gender: opt_text(preferences.and_then(|p| p.preferred_gender.as_deref())),
        preferred_mbti: preferences
            .and_then(|p| p.preferred_mbti)
            .map(|m| m.as_str().to_string())
            .unwrap_or_else(|| NOT_SPECIFIED.to_string()),
        preferred_sleep_type: preferences
            .and_then(|p| p.preferred_sleep_type)
            .map(|s| s.as_str().to_string())
            .unwrap_or_else(|| NOT_SPECIFIED.to_string()),
        preferred_cleanliness: preferences
            .and_then(|p| p.preferred_cleanliness)
            .map(|c| c.as_str().to_string())
            .unwrap_or_else(|| NOT_SPECIFIED.to_string()),
        preferred_smoking: preferences
            .and_then(|p| p.preferred_smoking)
            .map(|s| if s { "smoking ok" } else { "no smoking" }.to_string())
            .unwrap_or_else(|| NOT_SPECIFIED.to_string()),
        additional_preferences: opt_text(
            preferences.and_then(|p| p.additional_preferences.as_deref()),
        ),
    }
}

fn non_empty(value: &str) -> String {
    if value.trim().is_empty() {
        NOT_SPECIFIED.to_string()
    } else {
        value.to_string()
    }
}

fn opt_text(value: Option<&str>) -> String {
    match value {
        Some(v) if !v.trim().is_empty() => v.to_string(),
        _ => NOT_SPECIFIED.to_string(),
    }
}
