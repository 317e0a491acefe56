//! Core types for the compatibility engine.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use roomie_agent::ReasoningError;

/// A scored factor in a compatibility analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoredFactor {
    /// Factor category (e.g., "sleep schedule", "cleanliness")
    pub category: String,
    /// Why this factor helps or hurts the match
    pub explanation: String,
}

/// A cached pairwise compatibility result.
///
/// One entry per unordered user pair, keyed by the symmetric pair hash.
/// Entries are never updated in place; re-analysis after expiry stores a
/// fresh entry under the same key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchResult {
    /// Symmetric pair hash (cache key)
    pub pair_hash: String,
    /// Lower of the two user ids
    pub user_a: u64,
    /// Higher of the two user ids
    pub user_b: u64,
    /// Compatibility score, 0-100
    pub compatibility_score: u8,
    /// One-sentence verdict
    pub bottom_line: String,
    /// Strongest shared trait
    pub spark: String,
    /// Biggest risk for the pair
    pub friction: String,
    /// Ordered strengths (3-5 when produced live)
    pub strengths: Vec<ScoredFactor>,
    /// Ordered concerns (2-3 when produced live)
    pub concerns: Vec<ScoredFactor>,
    /// Summary paragraph
    pub summary: String,
    /// True when this is the fixed fallback produced after a reasoning failure
    pub degraded: bool,
    /// True when the score was substituted because the provider omitted it
    pub low_confidence: bool,
    /// When the analysis was produced
    pub created_at: DateTime<Utc>,
}

impl MatchResult {
    /// Whether this result covers the given user pair (order-independent).
    pub fn covers(&self, user_x: u64, user_y: u64) -> bool {
        let (lo, hi) = if user_x <= user_y {
            (user_x, user_y)
        } else {
            (user_y, user_x)
        };
        self.user_a == lo && self.user_b == hi
    }
}

/// Structured breakdown for one bulk-ranking candidate.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompatibilityBreakdown {
    /// Personality fit explanation
    pub personality: String,
    /// Lifestyle fit explanation
    pub lifestyle: String,
    /// Stated-preference fit explanation
    pub preferences: String,
    /// Overall reason for the percentage
    pub overall: String,
}

/// One ranked candidate from a bulk match call. Ephemeral, never cached.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulkMatchRecord {
    /// Candidate user id
    pub user_id: u64,
    /// Candidate display name
    pub display_name: String,
    /// Match percentage, 0-100
    pub match_percentage: u8,
    /// Structured compatibility breakdown
    pub breakdown: CompatibilityBreakdown,
}

/// Histogram of match percentages across four quality buckets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchDistribution {
    /// Percentage >= 80
    pub excellent: usize,
    /// Percentage 60-79
    pub good: usize,
    /// Percentage 40-59
    pub fair: usize,
    /// Percentage < 40
    pub poor: usize,
}

impl MatchDistribution {
    /// Add a percentage to the appropriate bucket.
    pub fn record(&mut self, percentage: u8) {
        match percentage {
            80..=100 => self.excellent += 1,
            60..=79 => self.good += 1,
            40..=59 => self.fair += 1,
            _ => self.poor += 1,
        }
    }
}

/// Aggregate statistics over a ranked candidate list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchingStats {
    /// Total ranked candidates
    pub total_matches: usize,
    /// Candidates at or above the requested minimum percentage
    pub good_matches: usize,
    /// Mean match percentage
    pub average_match_percentage: f64,
    /// Highest-ranked candidate
    pub best_match: Option<BulkMatchRecord>,
    /// Lowest-ranked candidate
    pub worst_match: Option<BulkMatchRecord>,
    /// Four-bucket histogram
    pub distribution: MatchDistribution,
}

/// Error types for the compatibility engine.
#[derive(Debug, thiserror::Error)]
pub enum MatchError {
    /// A mandatory sub-profile (identity, personality, or preferences) is missing
    #[error("User {user_id} has an incomplete profile: missing {missing}")]
    IncompleteProfile { user_id: u64, missing: &'static str },

    /// Caller asked to compare a user against themselves
    #[error("Cannot compare user {user_id} with themselves")]
    SelfComparison { user_id: u64 },

    /// A profile record violates a data invariant
    #[error("Invalid profile data: {0}")]
    InvalidProfile(String),

    /// Reasoning-service failure (network, provider, timeout, empty content)
    #[error("Reasoning service error: {0}")]
    ReasoningService(#[from] ReasoningError),

    /// Provider returned non-JSON or schema-violating content
    #[error("Malformed reasoning response: {0}")]
    MalformedResponse(String),

    /// Cache storage unavailable
    #[error("Storage error: {0}")]
    Storage(String),
}

impl MatchError {
    /// Whether this failure should degrade to the fixed fallback result
    /// on the pairwise path, rather than propagate to the caller.
    pub fn is_degradable(&self) -> bool {
        matches!(
            self,
            MatchError::ReasoningService(_) | MatchError::MalformedResponse(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, MatchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distribution_buckets() {
        let mut dist = MatchDistribution::default();
        for p in [90, 80, 79, 60, 59, 40, 39, 0] {
            dist.record(p);
        }
        assert_eq!(dist.excellent, 2);
        assert_eq!(dist.good, 2);
        assert_eq!(dist.fair, 2);
        assert_eq!(dist.poor, 2);
    }

    #[test]
    fn test_covers_is_order_independent() {
        let result = MatchResult {
            pair_hash: "h".to_string(),
            user_a: 1,
            user_b: 2,
            compatibility_score: 80,
            bottom_line: String::new(),
            spark: String::new(),
            friction: String::new(),
            strengths: vec![],
            concerns: vec![],
            summary: String::new(),
            degraded: false,
            low_confidence: false,
            created_at: Utc::now(),
        };

        assert!(result.covers(1, 2));
        assert!(result.covers(2, 1));
        assert!(!result.covers(1, 3));
    }

    #[test]
    fn test_degradable_errors() {
        assert!(MatchError::MalformedResponse("oops".to_string()).is_degradable());
        assert!(MatchError::ReasoningService(ReasoningError::EmptyResponse).is_degradable());
        assert!(!MatchError::SelfComparison { user_id: 1 }.is_degradable());
        assert!(!MatchError::IncompleteProfile {
            user_id: 1,
            missing: "personality"
        }
        .is_degradable());
    }
}
