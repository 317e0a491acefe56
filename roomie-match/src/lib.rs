//! Roomie Match - roommate compatibility scoring and caching engine.
//!
//! Takes two users' personality and preference profiles, produces an
//! LLM-assisted compatibility score with structured reasoning, and caches
//! results per unique user pair:
//! - Symmetric pair hashing for idempotent cache keys
//! - Cache-first pairwise analysis with a never-cached degraded fallback
//! - Profile sanitization before any external exposure
//! - Bulk candidate ranking and matching statistics
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │        CompatibilityService             │
//! │   (pairwise analysis, bulk ranking)     │
//! └──────┬──────────┬──────────┬────────────┘
//!        ▼          ▼          ▼
//! ┌────────────┐ ┌─────────┐ ┌──────────────┐
//! │ MatchCache │ │ Profile │ │ Reasoning    │
//! │ (pair hash │ │ Store   │ │ Backend      │
//! │  keyed)    │ │         │ │ (roomie-agent│
//! └────────────┘ └─────────┘ └──────────────┘
//! ```

pub mod cache;
pub mod config;
pub mod pair;
pub mod parse;
pub mod profile;
pub mod prompt;
pub mod sanitize;
pub mod service;
pub mod types;

// Re-export main types for convenience
pub use cache::{InMemoryMatchCache, MatchCache};
pub use config::MatchConfig;
pub use pair::pair_hash;
pub use profile::{CompleteProfile, InMemoryProfileStore, PersonalityProfile, ProfileStore};
pub use sanitize::{sanitize, PartyLabel, SanitizedProfile};
pub use service::CompatibilityService;
pub use types::{
    BulkMatchRecord, MatchDistribution, MatchError, MatchResult, MatchingStats, Result,
};
