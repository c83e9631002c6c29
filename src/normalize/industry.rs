//! Industry normalization against the flat industry taxonomy.
//!
//! Same match algorithm as the expertise normalizer over a separate ~15-entry
//! table. Also exposes [`IndustryNormalizer::partition_mixed`] for sources
//! that conflate topics and industries in a single field.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::normalize::lexicon::{KeywordIndex, TermMatch, is_skippable_term};

/// An industry: canonical id, display name, subcategory tags, keywords.
pub struct Industry {
    pub id: &'static str,
    pub display_name: &'static str,
    pub subcategories: &'static [&'static str],
    pub keywords: &'static [&'static str],
}

pub const INDUSTRIES: &[Industry] = &[
    Industry {
        id: "healthcare",
        display_name: "Healthcare & Life Sciences",
        subcategories: &[
            "hospitals",
            "pharmaceuticals",
            "biotechnology",
            "medical_devices",
            "digital_health",
        ],
        keywords: &[
            "healthcare",
            "medical",
            "medicine",
            "health care",
            "hospital",
            "clinical",
            "patient care",
            "health system",
            "nursing",
            "pharma",
            "pharmaceutical",
            "biotech",
            "biotechnology",
            "life sciences",
            "health services",
            "wellness",
            "mental health",
            "public health",
            "telemedicine",
            "digital health",
            "medtech",
            "medical device",
        ],
    },
    Industry {
        id: "technology",
        display_name: "Technology & Software",
        subcategories: &["software", "hardware", "saas", "fintech", "cybersecurity"],
        keywords: &[
            "technology",
            "tech",
            "it",
            "information technology",
            "software",
            "hardware",
            "computer",
            "digital",
            "internet",
            "web",
            "mobile",
            "app",
            "saas",
            "cloud",
            "data",
            "ai",
            "artificial intelligence",
            "machine learning",
            "cybersecurity",
            "fintech",
            "edtech",
            "martech",
        ],
    },
    Industry {
        id: "finance",
        display_name: "Financial Services",
        subcategories: &["banking", "investment", "insurance", "fintech", "real_estate"],
        keywords: &[
            "finance",
            "financial",
            "banking",
            "bank",
            "investment",
            "insurance",
            "finserv",
            "financial services",
            "wealth management",
            "asset management",
            "private equity",
            "venture capital",
            "hedge fund",
            "trading",
            "capital markets",
            "payments",
            "lending",
            "credit",
            "mortgage",
            "real estate finance",
        ],
    },
    Industry {
        id: "manufacturing",
        display_name: "Manufacturing & Industrial",
        subcategories: &["automotive", "aerospace", "chemicals", "machinery", "logistics"],
        keywords: &[
            "manufacturing",
            "industrial",
            "factory",
            "production",
            "assembly",
            "automotive",
            "aerospace",
            "defense",
            "chemicals",
            "materials",
            "supply chain",
            "logistics",
            "distribution",
            "warehouse",
            "operations",
            "lean",
            "six sigma",
            "quality",
            "engineering",
            "machinery",
        ],
    },
    Industry {
        id: "retail",
        display_name: "Retail & E-commerce",
        subcategories: &["ecommerce", "brick_mortar", "fashion", "grocery", "hospitality"],
        keywords: &[
            "retail",
            "ecommerce",
            "e-commerce",
            "online retail",
            "store",
            "shopping",
            "consumer goods",
            "cpg",
            "fmcg",
            "fashion",
            "apparel",
            "grocery",
            "restaurant",
            "hospitality",
            "food service",
            "qsr",
            "customer experience",
            "omnichannel",
            "marketplace",
        ],
    },
    Industry {
        id: "education",
        display_name: "Education & Academia",
        subcategories: &["k12", "higher_ed", "edtech", "training", "research"],
        keywords: &[
            "education",
            "academic",
            "university",
            "college",
            "school",
            "k-12",
            "k12",
            "higher education",
            "edtech",
            "e-learning",
            "online education",
            "training",
            "professional development",
            "curriculum",
            "teaching",
            "student",
            "research",
            "library",
            "educational technology",
        ],
    },
    Industry {
        id: "government",
        display_name: "Government & Public Sector",
        subcategories: &["federal", "state_local", "military", "nonprofit", "international"],
        keywords: &[
            "government",
            "federal",
            "state",
            "local",
            "municipal",
            "public sector",
            "public service",
            "military",
            "defense",
            "intelligence",
            "policy",
            "regulation",
            "compliance",
            "politics",
            "political",
            "diplomatic",
            "international relations",
            "ngo",
            "nonprofit",
            "non-profit",
        ],
    },
    Industry {
        id: "media",
        display_name: "Media & Entertainment",
        subcategories: &["broadcast", "publishing", "digital_media", "advertising", "gaming"],
        keywords: &[
            "media",
            "entertainment",
            "broadcast",
            "television",
            "tv",
            "film",
            "movie",
            "music",
            "publishing",
            "news",
            "journalism",
            "advertising",
            "marketing",
            "pr",
            "public relations",
            "digital media",
            "social media",
            "content",
            "streaming",
            "gaming",
            "sports",
            "creative",
        ],
    },
    Industry {
        id: "energy",
        display_name: "Energy & Utilities",
        subcategories: &["oil_gas", "renewable", "utilities", "mining", "environmental"],
        keywords: &[
            "energy",
            "oil",
            "gas",
            "petroleum",
            "renewable",
            "solar",
            "wind",
            "utilities",
            "power",
            "electricity",
            "nuclear",
            "coal",
            "natural gas",
            "sustainability",
            "clean energy",
            "green energy",
            "environmental",
            "climate",
            "carbon",
            "emissions",
            "mining",
            "resources",
        ],
    },
    Industry {
        id: "professional_services",
        display_name: "Professional Services",
        subcategories: &["consulting", "legal", "accounting", "hr_services", "real_estate"],
        keywords: &[
            "consulting",
            "professional services",
            "legal",
            "law",
            "accounting",
            "audit",
            "tax",
            "advisory",
            "management consulting",
            "strategy consulting",
            "hr",
            "human resources",
            "recruiting",
            "staffing",
            "real estate",
            "architecture",
            "engineering services",
            "design",
        ],
    },
    Industry {
        id: "telecommunications",
        display_name: "Telecommunications",
        subcategories: &["wireless", "broadband", "infrastructure", "satellite"],
        keywords: &[
            "telecom",
            "telecommunications",
            "wireless",
            "mobile",
            "5g",
            "broadband",
            "cable",
            "satellite",
            "network",
            "carrier",
            "isp",
            "internet service",
            "communication",
            "connectivity",
            "infrastructure",
        ],
    },
    Industry {
        id: "transportation",
        display_name: "Transportation & Logistics",
        subcategories: &["aviation", "ground_transport", "maritime", "logistics", "delivery"],
        keywords: &[
            "transportation",
            "transport",
            "logistics",
            "shipping",
            "freight",
            "airline",
            "aviation",
            "rail",
            "railroad",
            "trucking",
            "maritime",
            "delivery",
            "courier",
            "postal",
            "mobility",
            "autonomous",
            "vehicle",
        ],
    },
    Industry {
        id: "agriculture",
        display_name: "Agriculture & Food",
        subcategories: &["farming", "agtech", "food_processing", "sustainability"],
        keywords: &[
            "agriculture",
            "farming",
            "agtech",
            "agribusiness",
            "food production",
            "crop",
            "livestock",
            "dairy",
            "ranch",
            "agricultural technology",
            "precision farming",
            "sustainable agriculture",
            "organic",
            "food processing",
        ],
    },
    Industry {
        id: "construction",
        display_name: "Construction & Real Estate",
        subcategories: &["commercial", "residential", "infrastructure", "architecture"],
        keywords: &[
            "construction",
            "building",
            "contractor",
            "architecture",
            "engineering",
            "real estate development",
            "infrastructure",
            "civil engineering",
            "commercial construction",
            "residential construction",
            "heavy construction",
        ],
    },
    Industry {
        id: "pharmaceutical",
        display_name: "Pharmaceuticals",
        subcategories: &["research", "manufacturing", "distribution", "clinical_trials"],
        keywords: &[
            "pharmaceutical",
            "pharma",
            "drug",
            "medication",
            "clinical trial",
            "fda",
            "regulatory",
            "drug development",
            "biopharmaceutical",
            "generic",
            "specialty pharma",
            "vaccine",
            "therapeutic",
        ],
    },
];

/// Classifier output, set semantics, sorted for determinism.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizedIndustries {
    pub primary_industries: Vec<String>,
    pub secondary_industries: Vec<String>,
    pub keywords: Vec<String>,
    pub original_terms: Vec<String>,
    pub unmatched: Vec<String>,
}

/// Result of splitting a mixed topic/industry field.
#[derive(Debug, Clone, Default)]
pub struct IndustryPartition {
    pub industries: NormalizedIndustries,
    /// Terms with no relation to any industry keyword; these usually belong
    /// to the expertise classifier instead.
    pub non_industry_terms: Vec<String>,
}

/// Maps free-text industry terms onto the industry taxonomy.
pub struct IndustryNormalizer {
    index: KeywordIndex,
}

impl IndustryNormalizer {
    pub fn new() -> Self {
        let index = KeywordIndex::build(INDUSTRIES.iter().map(|i| (i.id, i.keywords)));
        Self { index }
    }

    /// Normalize a list of industry terms. Same cascade as the expertise
    /// normalizer: exact matches are primary, substring/token matches are
    /// secondary, unmatched terms stay searchable.
    pub fn normalize(&self, terms: &[String]) -> NormalizedIndustries {
        let mut primary = BTreeSet::new();
        let mut secondary = BTreeSet::new();
        let mut keywords = BTreeSet::new();
        let mut unmatched = BTreeSet::new();
        let mut original = Vec::new();

        for term in terms {
            if is_skippable_term(term) {
                continue;
            }
            let lowered = term.to_lowercase();
            let lowered = lowered.trim();
            original.push(term.clone());

            match self.index.match_term(lowered) {
                Some(TermMatch::Exact(industry)) => {
                    primary.insert(industry.to_string());
                    keywords.insert(lowered.to_string());
                }
                Some(m) => {
                    let industry = m.category();
                    if !primary.contains(industry) {
                        secondary.insert(industry.to_string());
                    }
                    keywords.insert(lowered.to_string());
                }
                None => {
                    unmatched.insert(term.clone());
                    keywords.insert(lowered.to_string());
                }
            }
        }

        let secondary: BTreeSet<String> = secondary.difference(&primary).cloned().collect();

        original.sort();
        original.dedup();

        NormalizedIndustries {
            primary_industries: primary.into_iter().collect(),
            secondary_industries: secondary.into_iter().collect(),
            keywords: keywords.into_iter().collect(),
            original_terms: original,
            unmatched: unmatched.into_iter().collect(),
        }
    }

    /// Split a mixed category list into industry terms and everything else,
    /// then normalize the industry half.
    ///
    /// Several sources put topics ("Leadership") and industries
    /// ("Healthcare") in the same field; the non-industry remainder should be
    /// fed to the expertise normalizer by the caller.
    pub fn partition_mixed(&self, terms: &[String]) -> IndustryPartition {
        let mut industry_terms = Vec::new();
        let mut non_industry_terms = Vec::new();

        for term in terms {
            if is_skippable_term(term) {
                continue;
            }
            let lowered = term.to_lowercase();
            if self.index.is_related(lowered.trim()) {
                industry_terms.push(term.clone());
            } else {
                non_industry_terms.push(term.clone());
            }
        }

        IndustryPartition {
            industries: self.normalize(&industry_terms),
            non_industry_terms,
        }
    }

    /// Display metadata for an industry id.
    pub fn industry_info(&self, industry_id: &str) -> Option<&'static Industry> {
        INDUSTRIES.iter().find(|i| i.id == industry_id)
    }
}

impl Default for IndustryNormalizer {
    fn default() -> Self {
        Self::new()
    }
}
