//! Validation and coercion of reasoning-service output.
//!
//! The provider is asked for a strict JSON shape but is not trusted to
//! deliver one. Non-JSON content is a `MalformedResponse` for the caller to
//! handle. Once JSON parsing succeeds the result is always usable: missing
//! sub-fields get defaults, and a missing core score is substituted with the
//! neutral score and flagged low-confidence.

use serde_json::Value;

use crate::types::{CompatibilityBreakdown, MatchError, Result, ScoredFactor};

/// Typed result of one pairwise analysis call.
#[derive(Debug, Clone)]
pub struct PairwiseAnalysis {
    pub compatibility_score: u8,
    pub bottom_line: String,
    pub spark: String,
    pub friction: String,
    pub strengths: Vec<ScoredFactor>,
    pub concerns: Vec<ScoredFactor>,
    pub summary: String,
    /// True when the provider omitted the score and the neutral default
    /// was substituted
    pub low_confidence: bool,
}

/// One parsed entry from a bulk ranking call.
#[derive(Debug, Clone)]
pub struct BulkEntry {
    pub candidate_id: u64,
    pub match_percentage: u8,
    pub breakdown: CompatibilityBreakdown,
}

/// Parse a pairwise analysis response.
///
/// `neutral_score` is used when `compatibilityScore` is absent or
/// non-numeric; JSON-level failure is returned as `MalformedResponse`.
pub fn parse_pairwise(raw: &str, neutral_score: u8) -> Result<PairwiseAnalysis> {
    let data: Value = serde_json::from_str(raw)
        .map_err(|e| MatchError::MalformedResponse(format!("not valid JSON: {}", e)))?;

    if !data.is_object() {
        return Err(MatchError::MalformedResponse(
            "expected a JSON object".to_string(),
        ));
    }

    let (compatibility_score, low_confidence) = match score_field(&data, "compatibilityScore") {
        Some(score) => (score, false),
        None => (neutral_score, true),
    };

    Ok(PairwiseAnalysis {
        compatibility_score,
        bottom_line: string_field(&data, "bottom_line"),
        spark: string_field(&data, "spark"),
        friction: string_field(&data, "friction"),
        strengths: factor_list(&data, "strengths"),
        concerns: factor_list(&data, "concerns"),
        summary: string_field(&data, "summary"),
        low_confidence,
    })
}

/// Parse a bulk ranking response into per-candidate entries.
///
/// Accepts either a top-level array or an object with a `matches` array.
/// Entries lacking a candidate id or percentage are dropped; the caller
/// reconciles the survivors against its candidate list.
pub fn parse_bulk(raw: &str) -> Result<Vec<BulkEntry>> {
    let data: Value = serde_json::from_str(raw)
        .map_err(|e| MatchError::MalformedResponse(format!("not valid JSON: {}", e)))?;

    let entries = match &data {
        Value::Array(items) => items.as_slice(),
        Value::Object(map) => map
            .get("matches")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .ok_or_else(|| {
                MatchError::MalformedResponse("missing \"matches\" array".to_string())
            })?,
        _ => {
            return Err(MatchError::MalformedResponse(
                "expected a JSON object or array".to_string(),
            ))
        }
    };

    Ok(entries.iter().filter_map(bulk_entry).collect())
}

fn bulk_entry(value: &Value) -> Option<BulkEntry> {
    let candidate_id = value.get("candidateId").and_then(Value::as_u64)?;
    let match_percentage = score_field(value, "matchPercentage")?;

    Some(BulkEntry {
        candidate_id,
        match_percentage,
        breakdown: CompatibilityBreakdown {
            personality: string_field(value, "personality"),
            lifestyle: string_field(value, "lifestyle"),
            preferences: string_field(value, "preferences"),
            overall: string_field(value, "overallReason"),
        },
    })
}

/// Read a numeric 0-100 field, clamping out-of-range values.
fn score_field(data: &Value, key: &str) -> Option<u8> {
    let value = data.get(key)?;
    let number = value.as_f64()?;
    if !number.is_finite() {
        return None;
    }
    Some(number.round().clamp(0.0, 100.0) as u8)
}

fn string_field(data: &Value, key: &str) -> String {
    data.get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

fn factor_list(data: &Value, key: &str) -> Vec<ScoredFactor> {
    data.get(key)
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(|item| {
                    let category = item.get("category")?.as_str()?.to_string();
                    let explanation = item.get("explanation")?.as_str()?.to_string();
                    Some(ScoredFactor {
                        category,
                        explanation,
                    })
                })
                .collect()
        })
        .unwrap_or_default()
}
