//! Builds one canonical profile from one raw source document.
//!
//! The sources agree on almost nothing: the same concept hides behind a
//! different field name on every site, sometimes as a string, sometimes a
//! list, sometimes an object. The factory reads every concept through an
//! alias list (tried in order) and runs the classifiers and parsers over
//! whatever it finds. A record without a usable name is the only hard
//! failure; everything else degrades to an emptier profile.

use chrono::Utc;

use crate::data::fees::{self, FeeInfo};
use crate::data::location::{self, Location};
use crate::data::names::parse_person_name;
use crate::data::profile::{CanonicalProfile, Testimonial, Video};
use crate::data::record::SourceRecord;
use crate::normalize::Normalizers;
use crate::pipeline::identity::unified_id;
use crate::pipeline::scoring;
use crate::sources::SourceSpec;

/// Record-level failures that skip the record rather than abort the batch.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("record has no usable name field")]
    MissingName,
}

// Alias tables: every concept is looked up under each name in order. The
// union covers all nine scraped sites plus the parsed corpus, so one table
// serves every source.
const NAME_FIELDS: &[&str] = &["name", "full_name", "speaker_name", "display_name"];
const TITLE_FIELDS: &[&str] = &["job_title", "title", "position", "role", "profession"];
const COMPANY_FIELDS: &[&str] = &["company", "organization", "employer", "affiliation"];
const TAGLINE_FIELDS: &[&str] = &["tagline", "headline", "subtitle", "one_liner"];
const BIO_FIELDS: &[&str] = &["biography", "bio", "about", "description", "full_bio"];
const BRIEF_BIO_FIELDS: &[&str] = &["short_bio", "summary", "brief_bio", "intro"];
const LOCATION_FIELDS: &[&str] = &["location", "based_in", "city_state", "residence"];
const TOPIC_FIELDS: &[&str] = &[
    "topics",
    "speaking_topics",
    "expertise",
    "areas_of_expertise",
];
/// Generic category fields where some sites mix topics and industries.
const MIXED_CATEGORY_FIELDS: &[&str] = &["categories", "tags"];
const TOPIC_OBJECT_KEYS: &[&str] = &["title", "name", "topic"];
const INDUSTRY_FIELDS: &[&str] = &["industries", "industry", "sectors", "industries_served"];
const RESEARCH_FIELDS: &[&str] = &["research_areas", "research_interests", "research"];
const EDUCATION_FIELDS: &[&str] = &["education", "degrees", "qualifications"];
const CERTIFICATION_FIELDS: &[&str] = &["certifications", "certificates", "accreditations"];
const AWARD_FIELDS: &[&str] = &["awards", "honors", "achievements", "recognitions"];
const LANGUAGE_FIELDS: &[&str] = &["languages", "spoken_languages", "languages_spoken"];
const LANGUAGE_OBJECT_KEYS: &[&str] = &["language", "name"];
const FORMAT_FIELDS: &[&str] = &[
    "speaking_formats",
    "formats",
    "presentation_types",
    "event_types",
    "session_types",
];
const AUDIENCE_FIELDS: &[&str] = &["audience_types", "audiences", "target_audience"];
const AUDIENCE_SIZE_FIELDS: &[&str] = &["audience_size", "typical_audience_size", "group_size"];
const SESSION_LENGTH_FIELDS: &[&str] = &["session_lengths", "talk_durations", "durations"];
const FEE_FIELDS: &[&str] = &["fee_range", "fee", "speaking_fee", "fees", "budget"];
const YEARS_FIELDS: &[&str] = &["years_speaking", "years_of_experience", "speaking_years"];
const TALKS_FIELDS: &[&str] = &[
    "talks_delivered",
    "total_talks",
    "number_of_talks",
    "presentations_given",
];
const RATING_FIELDS: &[&str] = &["average_rating", "rating", "avg_rating"];
const RATING_COUNT_FIELDS: &[&str] = &["total_ratings", "reviews_count", "number_of_reviews"];
const IMAGE_FIELDS: &[&str] = &["image", "photo", "profile_image", "image_url", "avatar"];
const IMAGE_LIST_FIELDS: &[&str] = &["images", "photos", "gallery"];
const VIDEO_FIELDS: &[&str] = &["videos", "video_links", "video_urls"];
const WEBSITE_FIELDS: &[&str] = &["website", "web", "homepage", "personal_site"];
const SOCIAL_OBJECT_FIELDS: &[&str] = &["social_media", "social_links", "social", "socials"];
const SOCIAL_PLATFORMS: &[&str] = &[
    "linkedin",
    "twitter",
    "facebook",
    "instagram",
    "youtube",
    "tiktok",
];
const EMAIL_FIELDS: &[&str] = &["email", "contact_email", "email_address"];
const PHONE_FIELDS: &[&str] = &["phone", "phone_number", "contact_phone"];
const BOOKING_FIELDS: &[&str] = &["booking_url", "booking_link", "profile_url", "url"];
const EVENT_COUNT_FIELDS: &[&str] = &["total_events", "events_count", "engagements"];
const VIRTUAL_FIELDS: &[&str] = &["virtual", "virtual_available", "remote", "offers_virtual"];
const PRO_BONO_FIELDS: &[&str] = &["pro_bono", "accepts_pro_bono", "will_speak_free"];

/// Builds canonical profiles from raw source documents.
pub struct ProfileFactory<'a> {
    normalizers: &'a Normalizers,
}

impl<'a> ProfileFactory<'a> {
    pub fn new(normalizers: &'a Normalizers) -> Self {
        Self { normalizers }
    }

    /// Build a profile for one record of one source.
    ///
    /// The identity key is derived from the name before anything else; a
    /// record with no name is unmergeable and gets skipped upstream.
    pub fn build(
        &self,
        record: &SourceRecord,
        source: &SourceSpec,
    ) -> Result<CanonicalProfile, BuildError> {
        let raw_name = record.str_field(NAME_FIELDS).ok_or(BuildError::MissingName)?;
        let name = parse_person_name(&raw_name).ok_or(BuildError::MissingName)?;

        let mut profile = CanonicalProfile {
            unified_id: unified_id(&raw_name),
            ..CanonicalProfile::default()
        };

        profile.basic_info.full_name = Some(name.display.clone());
        profile.basic_info.first_name = Some(name.first.clone());
        if !name.last.is_empty() {
            profile.basic_info.last_name = Some(name.last.clone());
        }
        profile.basic_info.display_name = Some(name.display.clone());

        self.populate_demographics(&mut profile, record);
        self.populate_professional(&mut profile, record);
        self.populate_location(&mut profile, record);
        self.populate_biography(&mut profile, record);
        self.populate_expertise(&mut profile, record);
        self.populate_credentials(&mut profile, record);
        self.populate_languages(&mut profile, record);
        self.populate_speaking(&mut profile, record);
        self.populate_media(&mut profile, record);
        self.populate_presence(&mut profile, record, source);
        self.populate_engagement(&mut profile, record);
        self.enrich_from_bio(&mut profile);

        if let Some(id) = record.native_id(source.id_fields) {
            profile.source_ids.insert(source.name.to_string(), id);
        }
        profile.metadata.primary_source = source.name.to_string();
        profile.metadata.sources = vec![source.name.to_string()];
        profile.metadata.data_quality_tier = source.tier;
        let now = Utc::now();
        profile.metadata.created_at = now;
        profile.metadata.updated_at = now;

        scoring::recompute(&mut profile, &self.normalizers.speaking);
        Ok(profile)
    }

    fn populate_demographics(&self, profile: &mut CanonicalProfile, record: &SourceRecord) {
        if let Some(gender) = record.str_field(&["gender"]) {
            let info = self.normalizers.demographics.normalize_gender(&gender);
            if info.gender != "not_specified" {
                profile.basic_info.gender = Some(info.gender);
            }
            if info.pronouns.is_some() {
                profile.basic_info.pronouns = info.pronouns;
            }
        }
        if let Some(pronouns) = record.str_field(&["pronouns", "preferred_pronouns"]) {
            profile.basic_info.pronouns = Some(pronouns.to_lowercase());
        }

        let age_info = if let Some(age) = record.u32_field(&["age"]) {
            Some(self.normalizers.demographics.normalize_age(age))
        } else {
            record
                .str_field(&["age_range", "age_bracket", "birth_year", "generation"])
                .map(|text| self.normalizers.demographics.normalize_age_text(&text))
        };
        if let Some(age_info) = age_info {
            profile.demographics.age = age_info.age;
            profile.demographics.age_bracket = age_info.bracket;
            profile.demographics.generation = age_info.generation;
            profile.demographics.birth_year = age_info.birth_year;
        }

        let diversity_terms = record.string_list(
            &["diversity", "diversity_categories", "identities", "identifies_as"],
            &["name"],
        );
        if !diversity_terms.is_empty() {
            let info = self.normalizers.demographics.normalize_diversity(&diversity_terms);
            profile.demographics.diversity_categories = info.categories;
            profile.demographics.diversity_flags = info.flags;
            profile.demographics.is_dei_speaker = info.dei_speaker;
        }
    }

    fn populate_professional(&self, profile: &mut CanonicalProfile, record: &SourceRecord) {
        profile.professional_info.title = record.str_field(TITLE_FIELDS);
        profile.professional_info.company = record.str_field(COMPANY_FIELDS);
        profile.professional_info.tagline = record.str_field(TAGLINE_FIELDS);
    }

    fn populate_location(&self, profile: &mut CanonicalProfile, record: &SourceRecord) {
        // Structured {city, state, country} object first, else free text.
        profile.location = if let Some(map) = record.object("location") {
            let get = |key: &str| {
                map.get(key)
                    .and_then(serde_json::Value::as_str)
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
            };
            let mut loc = Location {
                city: get("city"),
                state: get("state"),
                country: get("country"),
                ..Location::default()
            };
            if loc.is_empty() {
                record
                    .str_field(LOCATION_FIELDS)
                    .map(|text| location::parse_location(&text))
                    .unwrap_or_default()
            } else {
                if loc.country.as_deref() == Some("United States") {
                    loc.country_code = Some("US".to_string());
                }
                if let Some(state) = &loc.state {
                    loc.timezone = location::timezone_for_state(state);
                }
                loc
            }
        } else {
            record
                .str_field(LOCATION_FIELDS)
                .map(|text| location::parse_location(&text))
                .unwrap_or_default()
        };

        if let Some(flag) = record.bool_field(VIRTUAL_FIELDS) {
            profile.location.virtual_available = flag;
        }
    }

    fn populate_biography(&self, profile: &mut CanonicalProfile, record: &SourceRecord) {
        profile.biography.full = record.str_field(BIO_FIELDS);
        profile.biography.brief = record.str_field(BRIEF_BIO_FIELDS);
    }

    fn populate_expertise(&self, profile: &mut CanonicalProfile, record: &SourceRecord) {
        let mut topics = record.string_list(TOPIC_FIELDS, TOPIC_OBJECT_KEYS);
        let mut industry_terms = record.string_list(INDUSTRY_FIELDS, &["name"]);

        if topics.is_empty() {
            // Sites without a dedicated topic field put topics and industries
            // in one generic category list; split it before classifying. A
            // dedicated topic field is never partitioned -- the taxonomies
            // share keywords ("ai", "healthcare") and topic input must reach
            // the expertise classifier.
            let mixed = record.string_list(MIXED_CATEGORY_FIELDS, TOPIC_OBJECT_KEYS);
            let partition = self.normalizers.industry.partition_mixed(&mixed);
            topics = partition.non_industry_terms;
            industry_terms.extend(partition.industries.original_terms);
        }

        let industries = self.normalizers.industry.normalize(&industry_terms);
        profile.expertise.industries = industries.original_terms;
        profile.expertise.normalized_industries.primary = industries.primary_industries;
        profile.expertise.normalized_industries.secondary = industries.secondary_industries;
        profile.expertise.normalized_industries.keywords = industries.keywords;
        profile.expertise.normalized_industries.unmatched = industries.unmatched;

        let normalized = self.normalizers.expertise.normalize(&topics);
        profile.expertise.original_terms = normalized.original_terms;
        profile.expertise.primary_categories = normalized.primary_categories;
        profile.expertise.secondary_categories = normalized.secondary_categories;
        profile.expertise.parent_categories = normalized.parent_categories;
        profile.expertise.keywords = normalized.keywords;
        profile.expertise.unmatched = normalized.unmatched;

        profile.expertise.research_areas = record.string_list(RESEARCH_FIELDS, &["name"]);
    }

    fn populate_credentials(&self, profile: &mut CanonicalProfile, record: &SourceRecord) {
        let degree_strings = record.string_list(EDUCATION_FIELDS, &["degree", "title"]);
        for degree_string in &degree_strings {
            if let Some(degree) = self.normalizers.credential.normalize_degree(degree_string) {
                profile.credentials.degrees.push(degree);
            }
        }
        profile.education.degrees = degree_strings;

        for cert in record.string_list(CERTIFICATION_FIELDS, &["name", "title"]) {
            if let Some(certification) =
                self.normalizers.credential.normalize_certification(&cert)
            {
                profile.credentials.certifications.push(certification);
            }
        }

        let award_strings = record.string_list(AWARD_FIELDS, &["name", "title"]);
        if !award_strings.is_empty() {
            let normalized = self.normalizers.credential.normalize_awards(&award_strings);
            profile.credentials.awards = normalized.awards;
            profile.credentials.honors = normalized.categories;
        }
    }

    fn populate_languages(&self, profile: &mut CanonicalProfile, record: &SourceRecord) {
        let inputs = record.string_list(LANGUAGE_FIELDS, LANGUAGE_OBJECT_KEYS);
        if !inputs.is_empty() {
            profile.languages = self.normalizers.language.normalize_list(&inputs);
            profile.speaking_info.languages.clone_from(&profile.languages.codes);
        }
    }

    fn populate_speaking(&self, profile: &mut CanonicalProfile, record: &SourceRecord) {
        let format_inputs = record.string_list(FORMAT_FIELDS, &["name", "type"]);
        if !format_inputs.is_empty() {
            let formats = self.normalizers.speaking.normalize_formats(&format_inputs);
            profile.speaking_info.formats = formats.formats;
            profile.speaking_info.primary_format = formats.primary_format;
            profile.speaking_info.virtual_capable = formats.virtual_capable;
            profile.speaking_info.can_emcee = formats.can_emcee;
            profile.speaking_info.event_types = formats.original;
        }
        if profile.speaking_info.virtual_capable {
            profile.location.virtual_available = true;
        }

        let audience_inputs = record.string_list(AUDIENCE_FIELDS, &["name", "type"]);
        if !audience_inputs.is_empty() {
            let audiences = self.normalizers.speaking.normalize_audiences(&audience_inputs);
            profile.speaking_info.audience_types = audiences.audience_types;
            profile.speaking_info.primary_audience = audiences.primary_audience;
            profile.speaking_info.sectors_served = audiences.sectors;
        }

        if let Some(size_text) = record.str_field(AUDIENCE_SIZE_FIELDS) {
            if let Some(size) = self.normalizers.speaking.normalize_audience_size(&size_text) {
                profile.speaking_info.audience_sizes = size;
            }
        } else if let Some(count) = record.u32_field(AUDIENCE_SIZE_FIELDS) {
            profile.speaking_info.audience_sizes =
                self.normalizers.speaking.audience_size_from_count(count);
        }

        for length in record.string_list(SESSION_LENGTH_FIELDS, &[]) {
            if let Some(duration) = self.normalizers.speaking.normalize_duration(&length) {
                profile.speaking_info.session_lengths.push(duration.display);
            }
        }

        profile.speaking_info.fee = self.extract_fee(record);
        if record.bool_field(PRO_BONO_FIELDS) == Some(true) {
            profile.speaking_info.accepts_pro_bono = true;
        } else if profile.speaking_info.fee.pro_bono {
            profile.speaking_info.accepts_pro_bono = true;
        }

        profile.speaking_info.years_speaking = record.u32_field(YEARS_FIELDS);
        profile.speaking_info.talks_delivered = record.u32_field(TALKS_FIELDS);
        profile.speaking_info.average_rating = record.f64_field(RATING_FIELDS);
        profile.speaking_info.total_ratings = record.u32_field(RATING_COUNT_FIELDS).unwrap_or(0);
    }

    /// Fee input arrives as a display string on most sites, and as a
    /// structured `{min, max, display}` object from the parsed corpus.
    fn extract_fee(&self, record: &SourceRecord) -> FeeInfo {
        for key in ["fee_details", "fee_range", "fee"] {
            if let Some(map) = record.object(key) {
                let num = |k: &str| map.get(k).and_then(serde_json::Value::as_f64);
                let display = map
                    .get("display")
                    .or_else(|| map.get("text"))
                    .and_then(serde_json::Value::as_str)
                    .map(str::to_string);
                return fees::fee_from_range(num("min"), num("max"), display);
            }
        }
        record
            .str_field(FEE_FIELDS)
            .and_then(|text| fees::parse_fee(&text))
            .unwrap_or_default()
    }

    fn populate_media(&self, profile: &mut CanonicalProfile, record: &SourceRecord) {
        profile.media.primary_image = record.str_field(IMAGE_FIELDS);
        profile.media.images = record.string_list(IMAGE_LIST_FIELDS, &["url", "src"]);
        if let Some(primary) = &profile.media.primary_image
            && !profile.media.images.contains(primary)
        {
            profile.media.images.insert(0, primary.clone());
        }

        if let Some(serde_json::Value::Array(items)) =
            VIDEO_FIELDS.iter().find_map(|key| record.value(key))
        {
            for item in items {
                match item {
                    serde_json::Value::String(url) if !url.trim().is_empty() => {
                        profile.media.videos.push(Video {
                            url: url.trim().to_string(),
                            title: None,
                        });
                    }
                    serde_json::Value::Object(map) => {
                        let url = map
                            .get("url")
                            .or_else(|| map.get("link"))
                            .and_then(serde_json::Value::as_str);
                        if let Some(url) = url {
                            profile.media.videos.push(Video {
                                url: url.to_string(),
                                title: map
                                    .get("title")
                                    .and_then(serde_json::Value::as_str)
                                    .map(str::to_string),
                            });
                        }
                    }
                    _ => {}
                }
            }
        }
    }

    fn populate_presence(
        &self,
        profile: &mut CanonicalProfile,
        record: &SourceRecord,
        source: &SourceSpec,
    ) {
        profile.online_presence.website = record.str_field(WEBSITE_FIELDS);

        for key in SOCIAL_OBJECT_FIELDS {
            if let Some(map) = record.object(key) {
                for (platform, value) in map {
                    if let Some(url) = value.as_str().map(str::trim).filter(|s| !s.is_empty()) {
                        profile
                            .online_presence
                            .social_media
                            .insert(platform.to_lowercase(), url.to_string());
                    }
                }
                break;
            }
        }
        // Flat per-platform fields used by the simpler sites.
        for platform in SOCIAL_PLATFORMS {
            if let Some(url) = record.str_field(&[*platform]) {
                profile
                    .online_presence
                    .social_media
                    .entry((*platform).to_string())
                    .or_insert(url);
            }
        }

        profile.contact.email = record.str_field(EMAIL_FIELDS);
        profile.contact.phone = record.str_field(PHONE_FIELDS);
        if let Some(url) = record.str_field(BOOKING_FIELDS) {
            profile
                .online_presence
                .booking_sites
                .insert(source.name.to_string(), url.clone());
            profile.contact.booking_url = Some(url);
        }
    }

    fn populate_engagement(&self, profile: &mut CanonicalProfile, record: &SourceRecord) {
        if let Some(serde_json::Value::Array(items)) = record.value("testimonials") {
            for item in items {
                match item {
                    serde_json::Value::String(text) if !text.trim().is_empty() => {
                        profile.engagement.testimonials.push(Testimonial {
                            text: text.trim().to_string(),
                            rating: None,
                            author: None,
                        });
                    }
                    serde_json::Value::Object(map) => {
                        let text = map
                            .get("text")
                            .or_else(|| map.get("quote"))
                            .and_then(serde_json::Value::as_str);
                        if let Some(text) = text {
                            profile.engagement.testimonials.push(Testimonial {
                                text: text.to_string(),
                                rating: map.get("rating").and_then(serde_json::Value::as_f64),
                                author: map
                                    .get("author")
                                    .and_then(serde_json::Value::as_str)
                                    .map(str::to_string),
                            });
                        }
                    }
                    _ => {}
                }
            }
        }
        profile.engagement.total_events = record.u32_field(EVENT_COUNT_FIELDS);
    }

    /// Best-effort enrichment from biography text: credentials the structured
    /// fields missed, and demographics stated in the first person. Only fills
    /// gaps; structured fields always win.
    fn enrich_from_bio(&self, profile: &mut CanonicalProfile) {
        let Some(bio) = profile.biography.full.clone() else {
            return;
        };

        let found = self.normalizers.credential.extract_from_bio(&bio);
        if profile.credentials.degrees.is_empty() {
            profile.credentials.degrees = found.degrees;
        }
        if profile.credentials.certifications.is_empty() {
            profile.credentials.certifications = found.certifications;
        }
        if profile.credentials.awards.is_empty() {
            profile.credentials.awards = found.awards;
        }

        let stated = self.normalizers.demographics.extract_from_bio(&bio);
        if profile.basic_info.gender.is_none() {
            profile.basic_info.gender = stated.gender;
        }
        if profile.basic_info.pronouns.is_none() {
            profile.basic_info.pronouns = stated.pronouns;
        }
        if profile.demographics.diversity_categories.is_empty() && !stated.diversity.is_empty() {
            let info = self.normalizers.demographics.normalize_diversity(&stated.diversity);
            profile.demographics.diversity_categories = info.categories;
            profile.demographics.diversity_flags = info.flags;
            profile.demographics.is_dei_speaker = info.dei_speaker;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::profile::QualityTier;
    use serde_json::json;

    fn factory_build(
        value: serde_json::Value,
        source: &SourceSpec,
    ) -> Result<CanonicalProfile, BuildError> {
        let normalizers = Normalizers::new();
        let factory = ProfileFactory::new(&normalizers);
        factory.build(&SourceRecord::new(value), source)
    }

    fn test_source() -> SourceSpec {
        SourceSpec {
            name: "speakerhub",
            database: "speakerhub_scraper",
            collection: "speakers",
            id_fields: &["uid"],
            tier: None,
        }
    }

    #[test]
    fn missing_name_is_skippable() {
        let result = factory_build(json!({"job_title": "CEO"}), &test_source());
        assert!(matches!(result, Err(BuildError::MissingName)));
    }

    #[test]
    fn builds_full_profile() {
        let profile = factory_build(
            json!({
                "name": "Dr. Jane Smith",
                "uid": "js-42",
                "job_title": "Chief Scientist",
                "company": "Acme Labs",
                "location": "Austin, TX",
                "bio": "Jane advises boards on applied machine learning.",
                "topics": ["Artificial Intelligence", "Leadership"],
                "languages": ["English (Native)", "Spanish (Fluent)"],
                "fee_range": "$10,000 - $20,000",
                "speaking_formats": ["Keynote", "Virtual Presentation"],
                "email": "jane@example.com"
            }),
            &test_source(),
        )
        .unwrap();

        assert!(!profile.unified_id.is_empty());
        assert_eq!(profile.source_ids["speakerhub"], "js-42");
        assert_eq!(profile.basic_info.first_name.as_deref(), Some("Jane"));
        assert_eq!(profile.basic_info.last_name.as_deref(), Some("Smith"));
        assert_eq!(profile.location.state.as_deref(), Some("TX"));
        assert_eq!(profile.location.country_code.as_deref(), Some("US"));
        assert!(
            profile
                .expertise
                .primary_categories
                .contains(&"artificial_intelligence".to_string())
        );
        assert_eq!(profile.languages.native, vec!["en"]);
        assert_eq!(profile.speaking_info.fee.min, Some(10_000.0));
        assert!(profile.speaking_info.virtual_capable);
        assert!(profile.location.virtual_available);
        assert_eq!(profile.metadata.primary_source, "speakerhub");
        assert_eq!(profile.metadata.sources, vec!["speakerhub".to_string()]);
        assert!(profile.metadata.profile_score > 0);
    }

    #[test]
    fn partitions_mixed_topic_and_industry_list() {
        let profile = factory_build(
            json!({
                "name": "Marcus Chen",
                "categories": ["Healthcare", "Leadership", "Storytelling"]
            }),
            &test_source(),
        )
        .unwrap();

        assert!(
            profile
                .expertise
                .normalized_industries
                .primary
                .contains(&"healthcare".to_string())
        );
        assert!(profile.expertise.primary_categories.contains(&"leadership".to_string()));
        // The industry term stays out of the expertise term set
        assert!(!profile.expertise.original_terms.contains(&"Healthcare".to_string()));
    }

    #[test]
    fn dedicated_topic_field_is_never_partitioned() {
        // "Artificial Intelligence" is also an industry keyword; from a
        // dedicated topic field it must still classify as expertise
        let profile = factory_build(
            json!({
                "name": "Jane Smith",
                "topics": ["Artificial Intelligence", "Machine Learning"]
            }),
            &test_source(),
        )
        .unwrap();

        assert!(
            profile
                .expertise
                .primary_categories
                .contains(&"artificial_intelligence".to_string())
        );
        assert!(profile.expertise.normalized_industries.primary.is_empty());
    }

    #[test]
    fn explicit_industry_field_is_used_directly() {
        let profile = factory_build(
            json!({
                "name": "Marcus Chen",
                "topics": ["Leadership"],
                "industries": ["Pharma", "Banking"]
            }),
            &test_source(),
        )
        .unwrap();

        // "Pharma" is an exact keyword of the healthcare entry
        assert!(
            profile
                .expertise
                .normalized_industries
                .primary
                .contains(&"healthcare".to_string())
        );
        assert!(
            profile
                .expertise
                .normalized_industries
                .primary
                .contains(&"finance".to_string())
        );
        assert_eq!(profile.expertise.original_terms, vec!["Leadership".to_string()]);
    }

    #[test]
    fn structured_location_object() {
        let profile = factory_build(
            json!({
                "name": "Ana Silva",
                "location": {"city": "Lisbon", "country": "Portugal"}
            }),
            &test_source(),
        )
        .unwrap();
        assert_eq!(profile.location.city.as_deref(), Some("Lisbon"));
        assert_eq!(profile.location.country.as_deref(), Some("Portugal"));
    }

    #[test]
    fn structured_fee_object() {
        let profile = factory_build(
            json!({
                "name": "Ana Silva",
                "fee_details": {"min": 5000.0, "max": 10000.0, "display": "$5,000 - $10,000"}
            }),
            &test_source(),
        )
        .unwrap();
        assert_eq!(profile.speaking_info.fee.min, Some(5000.0));
        assert_eq!(profile.speaking_info.fee.max, Some(10000.0));
        assert!(profile.speaking_info.fee.is_set());
    }

    #[test]
    fn tier_stamped_from_source() {
        let source = SourceSpec {
            name: "llm_parsed",
            database: "llm_parsed_db",
            collection: "cat_1",
            id_fields: &[],
            tier: Some(QualityTier::Cat1),
        };
        let profile = factory_build(json!({"name": "Jane Smith"}), &source).unwrap();
        assert_eq!(profile.metadata.data_quality_tier, Some(QualityTier::Cat1));
    }

    #[test]
    fn bio_enrichment_fills_credential_gaps() {
        let profile = factory_build(
            json!({
                "name": "Jane Smith",
                "bio": "Jane holds a PhD in Economics from MIT and is a TEDx speaker."
            }),
            &test_source(),
        )
        .unwrap();
        assert!(!profile.credentials.degrees.is_empty());
    }

    #[test]
    fn videos_tolerate_both_shapes() {
        let profile = factory_build(
            json!({
                "name": "Jane Smith",
                "videos": [
                    "https://youtube.com/watch?v=1",
                    {"url": "https://vimeo.com/2", "title": "Keynote reel"}
                ]
            }),
            &test_source(),
        )
        .unwrap();
        assert_eq!(profile.media.videos.len(), 2);
        assert_eq!(profile.media.videos[1].title.as_deref(), Some("Keynote reel"));
    }

    #[test]
    fn social_links_from_object_and_flat_fields() {
        let profile = factory_build(
            json!({
                "name": "Jane Smith",
                "social_media": {"LinkedIn": "https://linkedin.com/in/jane"},
                "twitter": "https://twitter.com/jane"
            }),
            &test_source(),
        )
        .unwrap();
        assert_eq!(
            profile.online_presence.social_media["linkedin"],
            "https://linkedin.com/in/jane"
        );
        assert_eq!(
            profile.online_presence.social_media["twitter"],
            "https://twitter.com/jane"
        );
    }
}
