//! User profile data model and the profile accessor seam.
//!
//! The engine reads three mandatory records per user: identity, personality,
//! and roommate preferences. All three must exist before any scoring runs;
//! the `ProfileStore` accessor enforces that precondition.

use async_trait::async_trait;
use dashmap::DashMap;
use serde::{Deserialize, Serialize};

use crate::types::{MatchError, Result};

/// A user's identity record. Read-only to the engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserIdentity {
    /// Numeric user id, opaque and stable
    pub user_id: u64,
    /// Display name (stripped before external exposure)
    pub display_name: String,
    /// Free-text bio
    pub bio: Option<String>,
    /// Contact email (never leaves the engine)
    pub email: Option<String>,
}

/// Sleep schedule type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SleepType {
    EarlyBird,
    NightOwl,
    Flexible,
}

impl SleepType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::EarlyBird => "early bird",
            Self::NightOwl => "night owl",
            Self::Flexible => "flexible",
        }
    }
}

/// Study habit style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StudyHabits {
    InRoom,
    Library,
    Mixed,
}

impl StudyHabits {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InRoom => "studies in the room",
            Self::Library => "studies at the library",
            Self::Mixed => "mixed study locations",
        }
    }
}

/// Cleanliness standard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CleanlinessLevel {
    VeryTidy,
    Tidy,
    Average,
    Relaxed,
}

impl CleanlinessLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::VeryTidy => "very tidy",
            Self::Tidy => "tidy",
            Self::Average => "average",
            Self::Relaxed => "relaxed",
        }
    }
}

/// Social energy level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SocialLevel {
    VerySocial,
    Social,
    Balanced,
    Private,
}

impl SocialLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::VerySocial => "very social",
            Self::Social => "social",
            Self::Balanced => "balanced",
            Self::Private => "private",
        }
    }
}

/// MBTI personality type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
#[allow(clippy::upper_case_acronyms)]
pub enum Mbti {
    INTJ,
    INTP,
    ENTJ,
    ENTP,
    INFJ,
    INFP,
    ENFJ,
    ENFP,
    ISTJ,
    ISFJ,
    ESTJ,
    ESFJ,
    ISTP,
    ISFP,
    ESTP,
    ESFP,
}

impl Mbti {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::INTJ => "INTJ",
            Self::INTP => "INTP",
            Self::ENTJ => "ENTJ",
            Self::ENTP => "ENTP",
            Self::INFJ => "INFJ",
            Self::INFP => "INFP",
            Self::ENFJ => "ENFJ",
            Self::ENFP => "ENFP",
            Self::ISTJ => "ISTJ",
            Self::ISFJ => "ISFJ",
            Self::ESTJ => "ESTJ",
            Self::ESFJ => "ESFJ",
            Self::ISTP => "ISTP",
            Self::ISFP => "ISFP",
            Self::ESTP => "ESTP",
            Self::ESFP => "ESFP",
        }
    }
}

/// How often a user goes out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoingOutFrequency {
    Rarely,
    Monthly,
    Weekly,
    SeveralTimesAWeek,
}

impl GoingOutFrequency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Rarely => "rarely goes out",
            Self::Monthly => "goes out monthly",
            Self::Weekly => "goes out weekly",
            Self::SeveralTimesAWeek => "goes out several times a week",
        }
    }
}

/// Drinking frequency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DrinkingFrequency {
    Never,
    Occasionally,
    Socially,
    Regularly,
}

impl DrinkingFrequency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Never => "never drinks",
            Self::Occasionally => "drinks occasionally",
            Self::Socially => "drinks socially",
            Self::Regularly => "drinks regularly",
        }
    }
}

/// Stance on pets in shared housing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PetStance {
    LovesPets,
    OkWithPets,
    NoPets,
    Allergic,
}

impl PetStance {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::LovesPets => "loves pets",
            Self::OkWithPets => "ok with pets",
            Self::NoPets => "prefers no pets",
            Self::Allergic => "allergic to pets",
        }
    }
}

/// Tolerance for noise in shared space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoiseTolerance {
    NeedsQuiet,
    Moderate,
    Tolerant,
}

impl NoiseTolerance {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NeedsQuiet => "needs quiet",
            Self::Moderate => "moderate noise tolerance",
            Self::Tolerant => "tolerant of noise",
        }
    }
}

/// Preferred room temperature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemperaturePreference {
    Cool,
    Moderate,
    Warm,
}

impl TemperaturePreference {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cool => "prefers a cool room",
            Self::Moderate => "prefers moderate temperature",
            Self::Warm => "prefers a warm room",
        }
    }
}

/// A user's personality record. Exactly one per onboarded user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersonalityProfile {
    pub age: u8,
    pub gender: String,
    pub nationality: String,
    /// Free-text self description
    pub description: String,
    pub sleep_type: SleepType,
    pub study_habits: StudyHabits,
    pub cleanliness: CleanlinessLevel,
    pub social_level: SocialLevel,
    pub mbti: Option<Mbti>,
    pub going_out: GoingOutFrequency,
    pub smoking: bool,
    pub drinking: DrinkingFrequency,
    pub pet_stance: PetStance,
    pub noise_tolerance: NoiseTolerance,
    pub temperature: TemperaturePreference,
    /// Ordered free-form lifestyle tags
    pub lifestyle_tags: Vec<String>,
}

/// Preferred age range for a roommate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgeRange {
    pub min: u8,
    pub max: u8,
}

impl AgeRange {
    /// Create a range, enforcing min <= max.
    pub fn new(min: u8, max: u8) -> Result<Self> {
        if min > max {
            return Err(MatchError::InvalidProfile(format!(
                "age range min {} exceeds max {}",
                min, max
            )));
        }
        Ok(Self { min, max })
    }
}

/// A user's roommate preference record. Exactly one per user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoommatePreference {
    pub preferred_age: AgeRange,
    pub preferred_gender: Option<String>,
    pub preferred_mbti: Option<Mbti>,
    pub preferred_sleep_type: Option<SleepType>,
    pub preferred_cleanliness: Option<CleanlinessLevel>,
    /// None means no stance on smoking
    pub preferred_smoking: Option<bool>,
    /// Additional free-text preferences
    pub additional_preferences: Option<String>,
    /// Housing units the user is interested in
    pub preferred_housing_ids: Vec<u64>,
}

/// The three mandatory records for one user, assembled by the accessor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompleteProfile {
    pub identity: UserIdentity,
    pub personality: PersonalityProfile,
    pub preferences: RoommatePreference,
}

/// A bulk-ranking candidate: identity plus personality. Preferences are
/// optional on the candidate side.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateProfile {
    pub identity: UserIdentity,
    pub personality: PersonalityProfile,
    pub preferences: Option<RoommatePreference>,
}

/// Read-only access to user profile records.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Fetch the three mandatory records for a user.
    ///
    /// Fails with `IncompleteProfile` if identity, personality, or
    /// preferences is missing. Partial analysis is never attempted.
    async fn fetch(&self, user_id: u64) -> Result<CompleteProfile>;

    /// Fetch a bulk-ranking candidate, or `None` if the user has no
    /// personality profile yet.
    async fn fetch_candidate(&self, user_id: u64) -> Result<Option<CandidateProfile>>;

    /// All known user ids, in stable registration order.
    async fn list_user_ids(&self) -> Result<Vec<u64>>;
}

/// In-memory profile store for tests and application bootstrap.
#[derive(Default)]
pub struct InMemoryProfileStore {
    identities: DashMap<u64, UserIdentity>,
    personalities: DashMap<u64, PersonalityProfile>,
    preferences: DashMap<u64, RoommatePreference>,
    // registration order, since DashMap iteration order is unspecified
    order: std::sync::Mutex<Vec<u64>>,
}

impl InMemoryProfileStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an identity record.
    pub fn insert_identity(&self, identity: UserIdentity) {
        let user_id = identity.user_id;
        if self.identities.insert(user_id, identity).is_none() {
            self.order.lock().expect("order lock poisoned").push(user_id);
        }
    }

    /// Insert a personality record.
    pub fn insert_personality(&self, user_id: u64, personality: PersonalityProfile) {
        self.personalities.insert(user_id, personality);
    }

    /// Insert a preference record.
    pub fn insert_preferences(&self, user_id: u64, preferences: RoommatePreference) {
        self.preferences.insert(user_id, preferences);
    }
}

#[async_trait]
impl ProfileStore for InMemoryProfileStore {
    async fn fetch(&self, user_id: u64) -> Result<CompleteProfile> {
        let identity = self
            .identities
            .get(&user_id)
            .map(|e| e.value().clone())
            .ok_or(MatchError::IncompleteProfile {
                user_id,
                missing: "identity",
            })?;

        let personality = self
            .personalities
            .get(&user_id)
            .map(|e| e.value().clone())
            .ok_or(MatchError::IncompleteProfile {
                user_id,
                missing: "personality",
            })?;

        let preferences = self
            .preferences
            .get(&user_id)
            .map(|e| e.value().clone())
            .ok_or(MatchError::IncompleteProfile {
                user_id,
                missing: "preferences",
            })?;

        Ok(CompleteProfile {
            identity,
            personality,
            preferences,
        })
    }

    async fn fetch_candidate(&self, user_id: u64) -> Result<Option<CandidateProfile>> {
        let identity = match self.identities.get(&user_id) {
            Some(e) => e.value().clone(),
            None => return Ok(None),
        };

        let personality = match self.personalities.get(&user_id) {
            Some(e) => e.value().clone(),
            None => return Ok(None),
        };

        let preferences = self.preferences.get(&user_id).map(|e| e.value().clone());

        Ok(Some(CandidateProfile {
            identity,
            personality,
            preferences,
        }))
    }

    async fn list_user_ids(&self) -> Result<Vec<u64>> {
        Ok(self.order.lock().expect("order lock poisoned").clone())
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    /// A complete personality record for tests.
    pub fn personality(sleep: SleepType) -> PersonalityProfile {
        PersonalityProfile {
            age: 21,
            gender: "female".to_string(),
            nationality: "Dutch".to_string(),
            description: "Quiet CS student who likes board games".to_string(),
            sleep_type: sleep,
            study_habits: StudyHabits::Library,
            cleanliness: CleanlinessLevel::Tidy,
            social_level: SocialLevel::Balanced,
            mbti: Some(Mbti::INTJ),
            going_out: GoingOutFrequency::Weekly,
            smoking: false,
            drinking: DrinkingFrequency::Socially,
            pet_stance: PetStance::OkWithPets,
            noise_tolerance: NoiseTolerance::NeedsQuiet,
            temperature: TemperaturePreference::Moderate,
            lifestyle_tags: vec!["gaming".to_string(), "cooking".to_string()],
        }
    }

    pub fn preferences() -> RoommatePreference {
        RoommatePreference {
            preferred_age: AgeRange::new(18, 25).unwrap(),
            preferred_gender: None,
            preferred_mbti: None,
            preferred_sleep_type: Some(SleepType::EarlyBird),
            preferred_cleanliness: Some(CleanlinessLevel::Tidy),
            preferred_smoking: Some(false),
            additional_preferences: Some("No loud music after 22:00".to_string()),
            preferred_housing_ids: vec![11, 42],
        }
    }

    pub fn identity(user_id: u64, name: &str) -> UserIdentity {
        UserIdentity {
            user_id,
            display_name: name.to_string(),
            bio: Some("Student".to_string()),
            email: Some(format!("user{}@example.edu", user_id)),
        }
    }

    /// Register a fully onboarded user.
    pub fn register_complete(store: &InMemoryProfileStore, user_id: u64, name: &str) {
        store.insert_identity(identity(user_id, name));
        store.insert_personality(user_id, personality(SleepType::EarlyBird));
        store.insert_preferences(user_id, preferences());
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;

    #[test]
    fn test_age_range_validation() {
        assert!(AgeRange::new(18, 25).is_ok());
        assert!(AgeRange::new(25, 18).is_err());
        assert!(AgeRange::new(20, 20).is_ok());
    }

    #[tokio::test]
    async fn test_fetch_complete_profile() {
        let store = InMemoryProfileStore::new();
        register_complete(&store, 1, "Anna");

        let profile = store.fetch(1).await.unwrap();
        assert_eq!(profile.identity.display_name, "Anna");
        assert_eq!(profile.personality.sleep_type, SleepType::EarlyBird);
    }

    #[tokio::test]
    async fn test_fetch_fails_on_missing_preferences() {
        let store = InMemoryProfileStore::new();
        store.insert_identity(identity(1, "Anna"));
        store.insert_personality(1, personality(SleepType::Flexible));

        let err = store.fetch(1).await.unwrap_err();
        assert!(matches!(
            err,
            MatchError::IncompleteProfile {
                user_id: 1,
                missing: "preferences"
            }
        ));
    }

    #[tokio::test]
    async fn test_candidate_none_without_personality() {
        let store = InMemoryProfileStore::new();
        store.insert_identity(identity(1, "Anna"));

        assert!(store.fetch_candidate(1).await.unwrap().is_none());

        store.insert_personality(1, personality(SleepType::NightOwl));
        let candidate = store.fetch_candidate(1).await.unwrap().unwrap();
        assert_eq!(candidate.identity.user_id, 1);
        assert!(candidate.preferences.is_none());
    }

    #[tokio::test]
    async fn test_list_user_ids_in_registration_order() {
        let store = InMemoryProfileStore::new();
        for (id, name) in [(3, "C"), (1, "A"), (2, "B")] {
            store.insert_identity(identity(id, name));
        }
        assert_eq!(store.list_user_ids().await.unwrap(), vec![3, 1, 2]);
    }
}
