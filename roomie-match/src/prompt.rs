//! Prompt assembly for compatibility analysis.
//!
//! Builds the structured requests sent to the reasoning service: sanitized
//! profiles embedded verbatim under their generic labels, plus an explicit
//! instruction block fixing the answer's voice and JSON shape.

use crate::sanitize::SanitizedProfile;

/// Assembles reasoning-service prompts.
pub struct PromptBuilder;

impl PromptBuilder {
    /// System prompt shared by pairwise and bulk calls.
    pub fn system_prompt() -> String {
        let mut prompt = String::new();

        prompt.push_str("You are a roommate compatibility analyst for a student housing platform.\n");
        prompt.push_str("You assess how well people would live together based strictly on the\n");
        prompt.push_str("profile data you are given. You respond only with the requested JSON\n");
        prompt.push_str("object, with no surrounding prose or code fences.\n");

        prompt
    }

    /// Build the pairwise analysis prompt.
    pub fn pairwise(first: &SanitizedProfile, second: &SanitizedProfile) -> String {
        let mut prompt = String::new();

        prompt.push_str("# ROOMMATE COMPATIBILITY ANALYSIS\n\n");
        prompt.push_str("Assess the compatibility of the two people below as roommates.\n\n");

        prompt.push_str(&first.render());
        prompt.push('\n');
        prompt.push_str(&second.render());

        prompt.push_str("\n## RULES\n\n");
        prompt.push_str("1. Address the reader directly. Write every sentence in second person\n");
        prompt.push_str("   (\"you both...\", \"your roommate...\"). The internal labels \"first\n");
        prompt.push_str("   party\" and \"second party\" must NEVER appear in your answer.\n");
        prompt.push_str("2. Use only data points explicitly present in the profiles above. Do\n");
        prompt.push_str("   not infer interests, hobbies, or habits that are not listed. Fields\n");
        prompt.push_str("   marked \"not specified\" carry no information; do not invent values\n");
        prompt.push_str("   for them.\n");
        prompt.push_str("3. Respond with a single JSON object and nothing else.\n");

        prompt.push_str("\n## REQUIRED RESPONSE FORMAT\n\n");
        prompt.push_str("The values below illustrate the format only; never copy them:\n\n");
        prompt.push_str("{\n");
        prompt.push_str("  \"compatibilityScore\": 0-100 integer,\n");
        prompt.push_str("  \"bottom_line\": \"<one-sentence verdict>\",\n");
        prompt.push_str("  \"spark\": \"<the strongest shared trait, one sentence>\",\n");
        prompt.push_str("  \"friction\": \"<the biggest risk, one sentence>\",\n");
        prompt.push_str("  \"strengths\": [ {\"category\": \"<factor>\", \"explanation\": \"<why it helps>\"} ],\n");
        prompt.push_str("  \"concerns\": [ {\"category\": \"<factor>\", \"explanation\": \"<why it may hurt>\"} ],\n");
        prompt.push_str("  \"summary\": \"<one paragraph>\"\n");
        prompt.push_str("}\n\n");
        prompt.push_str("Provide 3-5 strengths and 2-3 concerns.\n");

        prompt
    }

    /// Build the bulk ranking prompt: one target scored against all candidates.
    pub fn bulk(target: &SanitizedProfile, candidates: &[SanitizedProfile]) -> String {
        let mut prompt = String::new();

        prompt.push_str("# ROOMMATE CANDIDATE RANKING\n\n");
        prompt.push_str(&format!(
            "Score each of the {} candidates below against the target profile.\n\n",
            candidates.len()
        ));

        prompt.push_str(&target.render());

        for candidate in candidates {
            prompt.push('\n');
            prompt.push_str(&candidate.render());
        }

        prompt.push_str("\n## RULES\n\n");
        prompt.push_str("1. Score every candidate exactly once, using its label's numeric id.\n");
        prompt.push_str("2. Use only data points explicitly present in the profiles above. Do\n");
        prompt.push_str("   not infer interests or habits that are not listed.\n");
        prompt.push_str("3. Write the explanations in second person, addressed to the target.\n");
        prompt.push_str("   Internal labels must not appear in the text.\n");
        prompt.push_str("4. Respond with a single JSON object and nothing else.\n");

        prompt.push_str("\n## REQUIRED RESPONSE FORMAT\n\n");
        prompt.push_str("The values below illustrate the format only; never copy them:\n\n");
        prompt.push_str("{\n");
        prompt.push_str("  \"matches\": [\n");
        prompt.push_str("    {\n");
        prompt.push_str("      \"candidateId\": <numeric id from the candidate label>,\n");
        prompt.push_str("      \"matchPercentage\": 0-100 integer,\n");
        prompt.push_str("      \"personality\": \"<personality fit, one sentence>\",\n");
        prompt.push_str("      \"lifestyle\": \"<lifestyle fit, one sentence>\",\n");
        prompt.push_str("      \"preferences\": \"<stated-preference fit, one sentence>\",\n");
        prompt.push_str("      \"overallReason\": \"<why this percentage>\"\n");
        prompt.push_str("    }\n");
        prompt.push_str("  ]\n");
        prompt.push_str("}\n");

        prompt
    }

    /// Estimate token count for a prompt (rough approximation).
    ///
    /// Uses 4 characters per token as a rough estimate.
    pub fn estimate_tokens(prompt: &str) -> usize {
        prompt.len() / 4
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::{fixtures, CompleteProfile, SleepType};
    use crate::sanitize::{sanitize, sanitize_candidate, PartyLabel};

    fn sanitized_pair() -> (SanitizedProfile, SanitizedProfile) {
        let profile = CompleteProfile {
            identity: fixtures::identity(1, "Anna"),
            personality: fixtures::personality(SleepType::EarlyBird),
            preferences: fixtures::preferences(),
        };
        (
            sanitize(&profile, PartyLabel::First),
            sanitize(&profile, PartyLabel::Second),
        )
    }

    #[test]
    fn test_pairwise_prompt_sections() {
        let (first, second) = sanitized_pair();
        let prompt = PromptBuilder::pairwise(&first, &second);

        assert!(prompt.contains("ROOMMATE COMPATIBILITY ANALYSIS"));
        assert!(prompt.contains("Profile of the first party"));
        assert!(prompt.contains("Profile of the second party"));
        assert!(prompt.contains("REQUIRED RESPONSE FORMAT"));
        assert!(prompt.contains("compatibilityScore"));
        assert!(prompt.contains("3-5 strengths and 2-3 concerns"));
    }

    #[test]
    fn test_pairwise_prompt_embeds_profile_data() {
        let (first, second) = sanitized_pair();
        let prompt = PromptBuilder::pairwise(&first, &second);

        assert!(prompt.contains("early bird"));
        assert!(prompt.contains("gaming, cooking"));
        assert!(!prompt.contains("Anna"));
    }

    #[test]
    fn test_bulk_prompt_lists_all_candidates() {
        let (target, _) = sanitized_pair();
        let candidates: Vec<_> = [2u64, 5, 9]
            .iter()
            .map(|id| {
                let candidate = crate::profile::CandidateProfile {
                    identity: fixtures::identity(*id, "X"),
                    personality: fixtures::personality(SleepType::NightOwl),
                    preferences: None,
                };
                sanitize_candidate(&candidate, format!("candidate {}", id))
            })
            .collect();

        let prompt = PromptBuilder::bulk(&target, &candidates);
        assert!(prompt.contains("Score each of the 3 candidates"));
        assert!(prompt.contains("candidate 2"));
        assert!(prompt.contains("candidate 5"));
        assert!(prompt.contains("candidate 9"));
        assert!(prompt.contains("matchPercentage"));
    }

    #[test]
    fn test_estimate_tokens() {
        assert_eq!(PromptBuilder::estimate_tokens("abcdefgh"), 2);
    }
}
