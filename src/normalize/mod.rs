//! Controlled-vocabulary classifiers.
//!
//! Each normalizer maps free-text source fields (expertise terms, industries,
//! languages, credentials, speaking formats, demographics) onto a static
//! taxonomy via keyword matching. The keyword tables are immutable data built
//! once at construction; every normalizer is a stateless service over them and
//! degrades gracefully to "unmatched" output -- malformed input never raises.

pub mod credential;
pub mod demographics;
pub mod expertise;
pub mod industry;
pub mod language;
mod lexicon;
pub mod speaking;

pub use lexicon::is_skippable_term;

use crate::normalize::credential::CredentialNormalizer;
use crate::normalize::demographics::DemographicsNormalizer;
use crate::normalize::expertise::ExpertiseNormalizer;
use crate::normalize::industry::IndustryNormalizer;
use crate::normalize::language::LanguageNormalizer;
use crate::normalize::speaking::SpeakingNormalizer;

/// The full set of classifiers, constructed once and shared by the profile
/// factory and the merge engine.
pub struct Normalizers {
    pub expertise: ExpertiseNormalizer,
    pub industry: IndustryNormalizer,
    pub language: LanguageNormalizer,
    pub credential: CredentialNormalizer,
    pub speaking: SpeakingNormalizer,
    pub demographics: DemographicsNormalizer,
}

impl Normalizers {
    pub fn new() -> Self {
        Self {
            expertise: ExpertiseNormalizer::new(),
            industry: IndustryNormalizer::new(),
            language: LanguageNormalizer::new(),
            credential: CredentialNormalizer::new(),
            speaking: SpeakingNormalizer::new(),
            demographics: DemographicsNormalizer::new(),
        }
    }
}

impl Default for Normalizers {
    fn default() -> Self {
        Self::new()
    }
}
