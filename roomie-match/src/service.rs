//! CompatibilityService - main entry point for compatibility analysis.
//!
//! Composes the pair hasher, match cache, profile accessor, sanitizer,
//! prompt builder, reasoning backend, and response parser into the two
//! public operations: pairwise analysis and bulk candidate ranking.
//!
//! Pairwise flow: hash the pair, try the cache, and on a miss fetch both
//! profiles, sanitize, prompt, call the reasoning backend, parse, store,
//! return. Transient reasoning failures degrade to a fixed fallback result
//! that is never cached; caller errors (self-comparison, incomplete
//! profiles) propagate instead of being swallowed.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, warn};

use roomie_agent::{CompletionRequest, ReasoningBackend};

use crate::cache::MatchCache;
use crate::config::MatchConfig;
use crate::pair::{ordered_pair, pair_hash};
use crate::parse::{parse_bulk, parse_pairwise, PairwiseAnalysis};
use crate::profile::{CandidateProfile, CompleteProfile, ProfileStore};
use crate::prompt::PromptBuilder;
use crate::sanitize::{sanitize, sanitize_candidate, sanitize_labeled, PartyLabel};
use crate::types::{
    BulkMatchRecord, MatchDistribution, MatchError, MatchResult, MatchingStats, Result,
};

/// Main entry point for compatibility analysis.
///
/// All collaborators are injected at construction; the service holds no
/// global state beyond what they own.
pub struct CompatibilityService {
    backend: Arc<dyn ReasoningBackend>,
    profiles: Arc<dyn ProfileStore>,
    cache: Arc<dyn MatchCache>,
    config: MatchConfig,
}

impl CompatibilityService {
    /// Create a new service with the given collaborators.
    pub fn new(
        backend: Arc<dyn ReasoningBackend>,
        profiles: Arc<dyn ProfileStore>,
        cache: Arc<dyn MatchCache>,
    ) -> Self {
        Self {
            backend,
            profiles,
            cache,
            config: MatchConfig::default(),
        }
    }

    /// Create with configuration.
    pub fn with_config(mut self, config: MatchConfig) -> Self {
        self.config = config;
        self
    }

    /// Analyze the compatibility of two distinct users.
    ///
    /// Cache-first: an unexpired cached result for the pair is returned
    /// without touching the reasoning service, regardless of argument
    /// order. On a miss the result of a live analysis is cached before
    /// returning. If the reasoning call or its output fails, a degraded
    /// fallback result is returned and NOT cached, so a later call retries
    /// the live path.
    pub async fn analyze_compatibility(&self, user_x: u64, user_y: u64) -> Result<MatchResult> {
        if user_x == user_y {
            return Err(MatchError::SelfComparison { user_id: user_x });
        }

        let hash = pair_hash(user_x, user_y);

        if let Some(cached) = self.cache.lookup(&hash).await? {
            debug!(pair_hash = %hash, "Returning cached match result");
            return Ok(cached);
        }

        // Independent reads, fetched concurrently. IncompleteProfile
        // propagates; partial analysis is never attempted.
        let (first, second) = futures::try_join!(
            self.profiles.fetch(user_x),
            self.profiles.fetch(user_y)
        )?;

        match self.run_pairwise(&first, &second).await {
            Ok(analysis) => {
                let result = self.build_result(&hash, user_x, user_y, analysis);
                self.cache.store(result.clone()).await?;
                info!(
                    pair_hash = %hash,
                    score = result.compatibility_score,
                    "Stored fresh match result"
                );
                Ok(result)
            }
            Err(err) if err.is_degradable() => {
                warn!(
                    pair_hash = %hash,
                    error = %err,
                    "Live analysis failed, returning fallback result"
                );
                Ok(self.fallback_result(&hash, user_x, user_y))
            }
            Err(err) => Err(err),
        }
    }

    /// Rank all eligible candidates against a target user.
    ///
    /// Candidates without a personality profile are excluded, not errors.
    /// Zero eligible candidates yields an empty list. One reasoning call
    /// scores the whole candidate set; reasoning and parse failures
    /// propagate - a list view may surface an error state, but never a
    /// fabricated ranking.
    pub async fn find_roommate_matches(&self, user_id: u64) -> Result<Vec<BulkMatchRecord>> {
        let target = self.profiles.fetch(user_id).await?;

        let mut candidates: Vec<CandidateProfile> = Vec::new();
        let mut excluded = 0usize;
        for id in self.profiles.list_user_ids().await? {
            if id == user_id {
                continue;
            }
            match self.profiles.fetch_candidate(id).await? {
                Some(candidate) => candidates.push(candidate),
                None => excluded += 1,
            }
        }

        if excluded > 0 {
            debug!(excluded, "Excluded candidates without personality profiles");
        }

        if candidates.is_empty() {
            return Ok(Vec::new());
        }

        let sanitized_target = sanitize_labeled(&target, "target");
        let sanitized_candidates: Vec<_> = candidates
            .iter()
            .map(|c| sanitize_candidate(c, format!("candidate {}", c.identity.user_id)))
            .collect();

        let prompt = PromptBuilder::bulk(&sanitized_target, &sanitized_candidates);
        let request = CompletionRequest::user(prompt)
            .with_system(PromptBuilder::system_prompt())
            .with_temperature(self.config.bulk.temperature)
            .with_max_tokens(self.config.bulk.max_tokens)
            .with_json_output();

        let completion = self.backend.complete(request).await?;
        let entries = parse_bulk(&completion.content)?;

        let mut by_id: HashMap<u64, _> = entries
            .into_iter()
            .map(|e| (e.candidate_id, e))
            .collect();

        // Assemble in original candidate order so the descending sort below
        // keeps ties stable in that order.
        let mut records: Vec<BulkMatchRecord> = Vec::with_capacity(candidates.len());
        for candidate in &candidates {
            let id = candidate.identity.user_id;
            match by_id.remove(&id) {
                Some(entry) => records.push(BulkMatchRecord {
                    user_id: id,
                    display_name: candidate.identity.display_name.clone(),
                    match_percentage: entry.match_percentage,
                    breakdown: entry.breakdown,
                }),
                None => warn!(candidate = id, "Candidate missing from ranking response"),
            }
        }

        records.sort_by(|a, b| b.match_percentage.cmp(&a.match_percentage));
        Ok(records)
    }

    /// Derive aggregate statistics from the ranked candidate list.
    pub async fn matching_stats(&self, user_id: u64, min_percentage: u8) -> Result<MatchingStats> {
        let records = self.find_roommate_matches(user_id).await?;

        let total_matches = records.len();
        let good_matches = records
            .iter()
            .filter(|r| r.match_percentage >= min_percentage)
            .count();

        let average_match_percentage = if total_matches > 0 {
            let sum: u32 = records.iter().map(|r| r.match_percentage as u32).sum();
            sum as f64 / total_matches as f64
        } else {
            0.0
        };

        let mut distribution = MatchDistribution::default();
        for record in &records {
            distribution.record(record.match_percentage);
        }

        Ok(MatchingStats {
            total_matches,
            good_matches,
            average_match_percentage,
            best_match: records.first().cloned(),
            worst_match: records.last().cloned(),
            distribution,
        })
    }

    /// Run the live pairwise analysis: sanitize, prompt, call, parse.
    async fn run_pairwise(
        &self,
        first: &CompleteProfile,
        second: &CompleteProfile,
    ) -> Result<PairwiseAnalysis> {
        let sanitized_first = sanitize(first, PartyLabel::First);
        let sanitized_second = sanitize(second, PartyLabel::Second);

        let prompt = PromptBuilder::pairwise(&sanitized_first, &sanitized_second);
        debug!(
            estimated_tokens = PromptBuilder::estimate_tokens(&prompt),
            "Built pairwise prompt"
        );

        let request = CompletionRequest::user(prompt)
            .with_system(PromptBuilder::system_prompt())
            .with_temperature(self.config.pairwise.temperature)
            .with_max_tokens(self.config.pairwise.max_tokens)
            .with_json_output();

        let completion = self.backend.complete(request).await?;
        parse_pairwise(&completion.content, self.config.fallback.neutral_score)
    }

    fn build_result(
        &self,
        hash: &str,
        user_x: u64,
        user_y: u64,
        analysis: PairwiseAnalysis,
    ) -> MatchResult {
        let (user_a, user_b) = ordered_pair(user_x, user_y);
        MatchResult {
            pair_hash: hash.to_string(),
            user_a,
            user_b,
            compatibility_score: analysis.compatibility_score,
            bottom_line: analysis.bottom_line,
            spark: analysis.spark,
            friction: analysis.friction,
            strengths: analysis.strengths,
            concerns: analysis.concerns,
            summary: analysis.summary,
            degraded: false,
            low_confidence: analysis.low_confidence,
            created_at: Utc::now(),
        }
    }

    /// The fixed degraded result for a failed live analysis. Never cached.
    fn fallback_result(&self, hash: &str, user_x: u64, user_y: u64) -> MatchResult {
        let (user_a, user_b) = ordered_pair(user_x, user_y);
        MatchResult {
            pair_hash: hash.to_string(),
            user_a,
            user_b,
            compatibility_score: self.config.fallback.neutral_score,
            bottom_line: "We could not complete a detailed analysis right now.".to_string(),
            spark: "You both chose this community, which is a start.".to_string(),
            friction: "A detailed comparison is not available at the moment.".to_string(),
            strengths: Vec::new(),
            concerns: Vec::new(),
            summary: "The compatibility service was temporarily unavailable, so this is a \
                      neutral placeholder. Try again in a little while for a full analysis."
                .to_string(),
            degraded: true,
            low_confidence: true,
            created_at: Utc::now(),
        }
    }
}
