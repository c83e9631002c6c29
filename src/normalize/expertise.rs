//! Expertise normalization against the hierarchical topic taxonomy.
//!
//! Roughly 35 categories grouped under 9 parents. The normalizer is
//! idempotent and safe to re-run over merged term sets: the merge engine
//! always re-normalizes the union of raw terms rather than unioning computed
//! category lists, so category assignment stays consistent regardless of
//! merge order.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::normalize::lexicon::{KeywordIndex, TermMatch, is_skippable_term};

/// A taxonomy category: canonical id, display name, parent id, and the
/// keyword list that maps free text onto it.
pub struct Category {
    pub id: &'static str,
    pub display_name: &'static str,
    pub parent: &'static str,
    pub keywords: &'static [&'static str],
}

/// Parent category ids and display names.
pub const PARENT_CATEGORIES: &[(&str, &str)] = &[
    ("technology", "Technology & Innovation"),
    ("business", "Business & Management"),
    ("health_sciences", "Healthcare & Life Sciences"),
    ("stem", "Science & Engineering"),
    ("legal_policy", "Law & Policy"),
    ("creative", "Creative & Media"),
    ("education_research", "Education & Research"),
    ("social", "Social Impact"),
    ("personal", "Personal Development"),
];

pub const TAXONOMY: &[Category] = &[
    // Technology & Computer Science
    Category {
        id: "artificial_intelligence",
        display_name: "Artificial Intelligence & Machine Learning",
        parent: "technology",
        keywords: &[
            "ai",
            "artificial intelligence",
            "machine learning",
            "deep learning",
            "neural network",
            "ml",
            "reinforcement learning",
            "nlp",
            "natural language processing",
            "computer vision",
            "chatbot",
            "llm",
            "generative ai",
            "predictive modeling",
            "pattern recognition",
        ],
    },
    Category {
        id: "data_science",
        display_name: "Data Science & Analytics",
        parent: "technology",
        keywords: &[
            "data science",
            "data analytics",
            "big data",
            "data mining",
            "data analysis",
            "business intelligence",
            "predictive analytics",
            "statistics",
            "data visualization",
            "data engineering",
            "etl",
            "data warehouse",
            "tableau",
            "power bi",
            "sql",
        ],
    },
    Category {
        id: "software_development",
        display_name: "Software Development",
        parent: "technology",
        keywords: &[
            "software",
            "programming",
            "coding",
            "software development",
            "web development",
            "mobile development",
            "app development",
            "full stack",
            "backend",
            "frontend",
            "agile",
            "scrum",
            "devops",
            "javascript",
            "python",
            "java",
            "react",
            "node.js",
        ],
    },
    Category {
        id: "cybersecurity",
        display_name: "Cybersecurity & Information Security",
        parent: "technology",
        keywords: &[
            "cybersecurity",
            "security",
            "information security",
            "network security",
            "data security",
            "privacy",
            "encryption",
            "ethical hacking",
            "penetration testing",
            "compliance",
            "risk management",
            "incident response",
            "soc",
            "ciso",
        ],
    },
    Category {
        id: "cloud_infrastructure",
        display_name: "Cloud Computing & Infrastructure",
        parent: "technology",
        keywords: &[
            "cloud",
            "cloud computing",
            "aws",
            "azure",
            "google cloud",
            "gcp",
            "infrastructure",
            "saas",
            "paas",
            "iaas",
            "kubernetes",
            "docker",
            "microservices",
            "serverless",
            "cloud migration",
            "hybrid cloud",
        ],
    },
    Category {
        id: "emerging_tech",
        display_name: "Emerging Technologies",
        parent: "technology",
        keywords: &[
            "blockchain",
            "cryptocurrency",
            "bitcoin",
            "ethereum",
            "defi",
            "web3",
            "nft",
            "metaverse",
            "iot",
            "internet of things",
            "embedded systems",
            "quantum computing",
            "augmented reality",
            "virtual reality",
            "ar",
            "vr",
        ],
    },
    // Business & Management
    Category {
        id: "leadership",
        display_name: "Leadership & Management",
        parent: "business",
        keywords: &[
            "leadership",
            "management",
            "executive",
            "ceo",
            "team building",
            "organizational",
            "team leadership",
            "servant leadership",
            "executive leadership",
            "leading",
            "manager",
            "director",
            "vp",
            "c-suite",
            "board",
        ],
    },
    Category {
        id: "entrepreneurship",
        display_name: "Entrepreneurship & Innovation",
        parent: "business",
        keywords: &[
            "entrepreneur",
            "startup",
            "founder",
            "business development",
            "venture",
            "innovation",
            "business growth",
            "small business",
            "solopreneur",
            "business owner",
            "scale",
            "pivot",
            "lean startup",
            "mvp",
        ],
    },
    Category {
        id: "marketing",
        display_name: "Marketing & Branding",
        parent: "business",
        keywords: &[
            "marketing",
            "digital marketing",
            "social media",
            "branding",
            "advertising",
            "content marketing",
            "seo",
            "growth hacking",
            "brand strategy",
            "pr",
            "public relations",
            "influencer",
            "email marketing",
            "ppc",
            "sem",
        ],
    },
    Category {
        id: "sales",
        display_name: "Sales & Business Development",
        parent: "business",
        keywords: &[
            "sales",
            "selling",
            "revenue",
            "customer acquisition",
            "b2b",
            "b2c",
            "sales strategy",
            "negotiation",
            "closing",
            "pipeline",
            "crm",
            "account management",
            "business development",
            "lead generation",
        ],
    },
    Category {
        id: "finance",
        display_name: "Finance & Investment",
        parent: "business",
        keywords: &[
            "finance",
            "investment",
            "banking",
            "fintech",
            "accounting",
            "economics",
            "financial planning",
            "wealth management",
            "private equity",
            "venture capital",
            "cfo",
            "treasury",
            "financial analysis",
            "budgeting",
            "forex",
            "trading",
        ],
    },
    Category {
        id: "strategy",
        display_name: "Strategy & Consulting",
        parent: "business",
        keywords: &[
            "strategy",
            "business strategy",
            "strategic planning",
            "consulting",
            "transformation",
            "change management",
            "operations",
            "process improvement",
            "efficiency",
            "optimization",
            "restructuring",
            "turnaround",
        ],
    },
    Category {
        id: "human_resources",
        display_name: "Human Resources & Culture",
        parent: "business",
        keywords: &[
            "hr",
            "human resources",
            "talent",
            "recruitment",
            "hiring",
            "people",
            "culture",
            "employee engagement",
            "retention",
            "compensation",
            "benefits",
            "diversity",
            "inclusion",
            "dei",
            "workplace",
            "organizational development",
        ],
    },
    // Healthcare & Life Sciences
    Category {
        id: "healthcare",
        display_name: "Healthcare & Medicine",
        parent: "health_sciences",
        keywords: &[
            "healthcare",
            "medical",
            "medicine",
            "clinical",
            "patient care",
            "telemedicine",
            "hospital",
            "physician",
            "doctor",
            "nurse",
            "nursing",
            "health system",
            "healthcare delivery",
            "patient experience",
        ],
    },
    Category {
        id: "biotechnology",
        display_name: "Biotechnology & Pharmaceuticals",
        parent: "health_sciences",
        keywords: &[
            "biotech",
            "biotechnology",
            "genomics",
            "bioinformatics",
            "molecular biology",
            "genetics",
            "crispr",
            "drug discovery",
            "pharmaceutical",
            "pharma",
            "clinical trials",
            "fda",
            "therapeutics",
            "diagnostics",
        ],
    },
    Category {
        id: "public_health",
        display_name: "Public Health & Policy",
        parent: "health_sciences",
        keywords: &[
            "public health",
            "epidemiology",
            "health policy",
            "global health",
            "pandemic",
            "disease prevention",
            "community health",
            "health equity",
            "vaccination",
            "health education",
            "population health",
        ],
    },
    Category {
        id: "wellness",
        display_name: "Mental Health & Wellness",
        parent: "health_sciences",
        keywords: &[
            "wellness",
            "mental health",
            "psychology",
            "psychiatry",
            "mindfulness",
            "therapy",
            "counseling",
            "stress",
            "anxiety",
            "depression",
            "wellbeing",
            "meditation",
            "yoga",
            "fitness",
            "nutrition",
            "holistic health",
        ],
    },
    // Science & Engineering
    Category {
        id: "engineering",
        display_name: "Engineering",
        parent: "stem",
        keywords: &[
            "engineering",
            "mechanical",
            "electrical",
            "civil",
            "chemical",
            "aerospace",
            "biomedical",
            "environmental",
            "industrial",
            "systems engineering",
            "robotics",
            "automation",
            "manufacturing",
            "3d printing",
            "cad",
        ],
    },
    Category {
        id: "physical_sciences",
        display_name: "Physical Sciences",
        parent: "stem",
        keywords: &[
            "physics",
            "chemistry",
            "materials science",
            "nanotechnology",
            "polymer",
            "quantum",
            "astrophysics",
            "particle physics",
            "theoretical physics",
            "astronomy",
            "geology",
            "earth science",
            "climate science",
        ],
    },
    Category {
        id: "life_sciences",
        display_name: "Life Sciences",
        parent: "stem",
        keywords: &[
            "biology",
            "molecular biology",
            "cell biology",
            "ecology",
            "evolution",
            "microbiology",
            "immunology",
            "neuroscience",
            "biochemistry",
            "marine biology",
            "botany",
            "zoology",
            "conservation",
        ],
    },
    Category {
        id: "mathematics",
        display_name: "Mathematics & Statistics",
        parent: "stem",
        keywords: &[
            "mathematics",
            "math",
            "statistics",
            "algorithms",
            "computational",
            "applied math",
            "pure math",
            "probability",
            "calculus",
            "algebra",
            "geometry",
            "topology",
            "number theory",
            "combinatorics",
        ],
    },
    // Law & Policy
    Category {
        id: "law",
        display_name: "Law & Legal",
        parent: "legal_policy",
        keywords: &[
            "law",
            "legal",
            "attorney",
            "litigation",
            "corporate law",
            "intellectual property",
            "patent",
            "trademark",
            "copyright",
            "compliance",
            "regulation",
            "contract",
            "employment law",
            "securities",
            "tax law",
            "criminal law",
            "constitutional law",
        ],
    },
    Category {
        id: "policy",
        display_name: "Policy & Government",
        parent: "legal_policy",
        keywords: &[
            "policy",
            "public policy",
            "government",
            "politics",
            "diplomacy",
            "international relations",
            "foreign policy",
            "legislative",
            "regulatory",
            "advocacy",
            "lobbying",
            "think tank",
            "ngo",
            "nonprofit",
        ],
    },
    // Creative & Media
    Category {
        id: "media",
        display_name: "Media & Entertainment",
        parent: "creative",
        keywords: &[
            "media",
            "journalism",
            "broadcasting",
            "film",
            "television",
            "production",
            "documentary",
            "news",
            "reporter",
            "anchor",
            "producer",
            "director",
            "cinematography",
            "editing",
            "multimedia",
            "podcast",
        ],
    },
    Category {
        id: "design",
        display_name: "Design & Creative",
        parent: "creative",
        keywords: &[
            "design",
            "ux",
            "ui",
            "graphic design",
            "product design",
            "architecture",
            "interior design",
            "fashion",
            "industrial design",
            "web design",
            "user experience",
            "user interface",
            "visual design",
            "branding design",
        ],
    },
    Category {
        id: "arts",
        display_name: "Arts & Performance",
        parent: "creative",
        keywords: &[
            "art",
            "music",
            "theater",
            "performance",
            "creative",
            "entertainment",
            "artist",
            "musician",
            "actor",
            "dancer",
            "singer",
            "composer",
            "painting",
            "sculpture",
            "photography",
            "gallery",
            "museum",
        ],
    },
    Category {
        id: "writing",
        display_name: "Writing & Publishing",
        parent: "creative",
        keywords: &[
            "writing",
            "author",
            "content creation",
            "copywriting",
            "publishing",
            "novelist",
            "poet",
            "screenwriter",
            "blogger",
            "editor",
            "literary",
            "book",
            "manuscript",
            "storytelling",
            "narrative",
        ],
    },
    // Education & Research
    Category {
        id: "education",
        display_name: "Education & Teaching",
        parent: "education_research",
        keywords: &[
            "education",
            "teaching",
            "learning",
            "training",
            "curriculum",
            "e-learning",
            "instructional design",
            "academic",
            "professor",
            "teacher",
            "educator",
            "pedagogy",
            "k-12",
            "higher education",
            "university",
            "school",
        ],
    },
    Category {
        id: "research",
        display_name: "Research & Academia",
        parent: "education_research",
        keywords: &[
            "research",
            "researcher",
            "scientist",
            "scholar",
            "phd",
            "postdoc",
            "grant",
            "publication",
            "peer review",
            "methodology",
            "study",
            "experiment",
            "analysis",
            "findings",
            "hypothesis",
        ],
    },
    // Social Impact
    Category {
        id: "social_impact",
        display_name: "Social Impact & Sustainability",
        parent: "social",
        keywords: &[
            "social impact",
            "nonprofit",
            "charity",
            "philanthropy",
            "social enterprise",
            "community",
            "volunteer",
            "humanitarian",
            "development",
            "sustainability",
            "environment",
            "climate",
            "green",
            "eco",
            "conservation",
            "renewable",
        ],
    },
    Category {
        id: "diversity_inclusion",
        display_name: "Diversity & Inclusion",
        parent: "social",
        keywords: &[
            "diversity",
            "inclusion",
            "dei",
            "equity",
            "equality",
            "bias",
            "gender",
            "race",
            "lgbtq",
            "accessibility",
            "belonging",
            "multicultural",
            "intersectionality",
            "allyship",
        ],
    },
    // Personal Development
    Category {
        id: "personal_development",
        display_name: "Personal Development",
        parent: "personal",
        keywords: &[
            "motivation",
            "inspiration",
            "resilience",
            "mindset",
            "growth",
            "self improvement",
            "personal growth",
            "life coach",
            "success",
            "goal setting",
            "productivity",
            "time management",
            "habits",
        ],
    },
    Category {
        id: "communication",
        display_name: "Communication & Speaking",
        parent: "personal",
        keywords: &[
            "communication",
            "public speaking",
            "presentation",
            "storytelling",
            "speech",
            "rhetoric",
            "persuasion",
            "influence",
            "negotiation",
            "interpersonal",
            "listening",
            "conflict resolution",
        ],
    },
];

/// Classifier output. All category and keyword collections use set semantics;
/// they are emitted sorted so the result is deterministic regardless of input
/// order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizedExpertise {
    pub primary_categories: Vec<String>,
    pub secondary_categories: Vec<String>,
    pub parent_categories: Vec<String>,
    pub keywords: Vec<String>,
    pub original_terms: Vec<String>,
    pub unmatched: Vec<String>,
}

/// Maps free-text expertise terms to taxonomy categories.
pub struct ExpertiseNormalizer {
    index: KeywordIndex,
}

impl ExpertiseNormalizer {
    pub fn new() -> Self {
        let index = KeywordIndex::build(TAXONOMY.iter().map(|c| (c.id, c.keywords)));
        Self { index }
    }

    /// Normalize a list of expertise terms into structured categories.
    ///
    /// Exact keyword matches are primary; substring and per-word matches are
    /// secondary. Unmatched terms are reported separately but still
    /// contribute to `keywords` so they remain searchable. Empty input
    /// produces the empty shape, never an error.
    pub fn normalize(&self, terms: &[String]) -> NormalizedExpertise {
        let mut primary = BTreeSet::new();
        let mut secondary = BTreeSet::new();
        let mut parents = BTreeSet::new();
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
                Some(TermMatch::Exact(category)) => {
                    primary.insert(category.to_string());
                    parents.insert(parent_of(category).to_string());
                    keywords.insert(lowered.to_string());
                }
                Some(m) => {
                    let category = m.category();
                    if !primary.contains(category) {
                        secondary.insert(category.to_string());
                    }
                    parents.insert(parent_of(category).to_string());
                    keywords.insert(lowered.to_string());
                }
                None => {
                    unmatched.insert(term.clone());
                    // Still searchable even though uncategorized
                    keywords.insert(lowered.to_string());
                }
            }
        }

        // A category promoted to primary by a later term drops out of
        // secondary.
        let secondary: BTreeSet<String> =
            secondary.difference(&primary).cloned().collect();

        original.sort();
        original.dedup();

        NormalizedExpertise {
            primary_categories: primary.into_iter().collect(),
            secondary_categories: secondary.into_iter().collect(),
            parent_categories: parents.into_iter().collect(),
            keywords: keywords.into_iter().collect(),
            original_terms: original,
            unmatched: unmatched.into_iter().collect(),
        }
    }

    /// Display metadata for a category id, if it exists in the taxonomy.
    pub fn category_info(&self, category_id: &str) -> Option<&'static Category> {
        TAXONOMY.iter().find(|c| c.id == category_id)
    }
}

impl Default for ExpertiseNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

/// Parent id for a category id. Falls back to the category itself for ids
/// not in the taxonomy (should not happen for classifier output).
fn parent_of(category_id: &str) -> &'static str {
    TAXONOMY
        .iter()
        .find(|c| c.id == category_id)
        .map(|c| c.parent)
        .unwrap_or("technology")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normalizer() -> ExpertiseNormalizer {
        ExpertiseNormalizer::new()
    }

    fn terms(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn exact_terms_become_primary() {
        let result =
            normalizer().normalize(&terms(&["AI", "Machine Learning", "none", "Leadership"]));
        assert!(
            result
                .primary_categories
                .contains(&"artificial_intelligence".to_string())
        );
        assert!(result.primary_categories.contains(&"leadership".to_string()));
        // "none" is skipped entirely -- not a keyword, not a category
        assert!(!result.keywords.contains(&"none".to_string()));
        assert!(!result.original_terms.contains(&"none".to_string()));
    }

    #[test]
    fn parent_rollup() {
        let result = normalizer().normalize(&terms(&["Machine Learning", "Leadership"]));
        assert!(result.parent_categories.contains(&"technology".to_string()));
        assert!(result.parent_categories.contains(&"business".to_string()));
    }

    #[test]
    fn substring_match_is_secondary() {
        // "keynotes on cybersecurity trends" contains the keyword "cybersecurity"
        let result = normalizer().normalize(&terms(&["keynotes on cybersecurity trends"]));
        assert!(
            result
                .secondary_categories
                .contains(&"cybersecurity".to_string())
        );
        assert!(result.primary_categories.is_empty());
    }

    #[test]
    fn token_match_is_secondary() {
        // "ai" is too short for substring matching but matches per-word
        let result = normalizer().normalize(&terms(&["ai ethics"]));
        assert!(
            result
                .secondary_categories
                .contains(&"artificial_intelligence".to_string())
        );
        assert!(result.primary_categories.is_empty());
    }

    #[test]
    fn unmatched_term_still_searchable() {
        let result = normalizer().normalize(&terms(&["Underwater Basket Weaving"]));
        assert_eq!(result.unmatched, vec!["Underwater Basket Weaving"]);
        assert!(
            result
                .keywords
                .contains(&"underwater basket weaving".to_string())
        );
        assert!(result.primary_categories.is_empty());
    }

    #[test]
    fn empty_input_empty_shape() {
        let result = normalizer().normalize(&[]);
        assert_eq!(result, NormalizedExpertise::default());
    }

    #[test]
    fn normalization_is_idempotent() {
        let n = normalizer();
        let first = n.normalize(&terms(&["AI", "Data Science", "Quantum Widgets"]));
        let second = n.normalize(&first.original_terms);
        assert_eq!(first, second);
    }

    #[test]
    fn order_independent() {
        let n = normalizer();
        let a = n.normalize(&terms(&["AI", "Leadership", "Marketing"]));
        let b = n.normalize(&terms(&["Marketing", "AI", "Leadership"]));
        assert_eq!(a.primary_categories, b.primary_categories);
        assert_eq!(a.parent_categories, b.parent_categories);
        assert_eq!(a.keywords, b.keywords);
    }

    #[test]
    fn primary_excludes_duplicate_secondary() {
        // "security" is an exact keyword (primary); a later substring match on
        // the same category must not also list it as secondary
        let n = normalizer();
        let result = n.normalize(&terms(&["security", "enterprise security posture"]));
        assert!(result.primary_categories.contains(&"cybersecurity".to_string()));
        assert!(
            !result
                .secondary_categories
                .contains(&"cybersecurity".to_string())
        );
    }

    #[test]
    fn every_category_has_known_parent() {
        let parents: Vec<&str> = PARENT_CATEGORIES.iter().map(|(id, _)| *id).collect();
        for category in TAXONOMY {
            assert!(
                parents.contains(&category.parent),
                "category {} has unknown parent {}",
                category.id,
                category.parent
            );
        }
    }
}
