//! Persona reference data - the five fixed AI-attitude archetypes.
//!
//! The catalog is immutable once built.  It is either the built-in table
//! ([`PersonaCatalog::builtin`]) or loaded from a JSON reference file keyed
//! by persona name:
//!
//! ```json
//! {
//!   "Balanced Social Participant": {
//!     "size": 35344,
//!     "percentage": 59.4,
//!     "color": "#7994b5",
//!     "description": "...",
//!     "fearProfile": { "economic": 0.25, "surveillance": 0.2, "social": 0.45,
//!                      "safety": 0.15, "cultural": 0.1 }
//!   },
//!   "metadata": { "totalParticipants": 59542 }
//! }
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::CatalogError;

/// Allowed drift of the summed population percentages away from 100.
const PERCENTAGE_TOLERANCE: f64 = 0.5;

// ============================================================================
// Persona names
// ============================================================================

/// The five persona labels, declared in canonical order.
///
/// Canonical order decides ties during classification and the
/// `globalRanking` reported by [`PersonaCatalog::insights`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PersonaName {
    #[serde(rename = "Balanced Social Participant")]
    BalancedSocialParticipant,
    #[serde(rename = "Consistent Social Responder")]
    ConsistentSocialResponder,
    #[serde(rename = "Balanced Security Participant")]
    BalancedSecurityParticipant,
    #[serde(rename = "Cultural Preservationist")]
    CulturalPreservationist,
    #[serde(rename = "Technology-Aware Participant")]
    TechnologyAwareParticipant,
}

impl PersonaName {
    /// All personas in canonical order.
    pub const ALL: [PersonaName; 5] = [
        Self::BalancedSocialParticipant,
        Self::ConsistentSocialResponder,
        Self::BalancedSecurityParticipant,
        Self::CulturalPreservationist,
        Self::TechnologyAwareParticipant,
    ];

    /// Display label, exactly as it appears in reference data.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BalancedSocialParticipant => "Balanced Social Participant",
            Self::ConsistentSocialResponder => "Consistent Social Responder",
            Self::BalancedSecurityParticipant => "Balanced Security Participant",
            Self::CulturalPreservationist => "Cultural Preservationist",
            Self::TechnologyAwareParticipant => "Technology-Aware Participant",
        }
    }

    /// Zero-based canonical position.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Look up a persona by its display label.
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.as_str() == label)
    }
}

impl fmt::Display for PersonaName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PersonaName {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_label(s)
            .ok_or_else(|| CatalogError::Validation(format!("Unknown persona '{}'", s)))
    }
}

// ============================================================================
// Fear profile
// ============================================================================

/// The five fixed fear categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FearCategory {
    Economic,
    Surveillance,
    Social,
    Safety,
    Cultural,
}

impl FearCategory {
    pub const ALL: [FearCategory; 5] = [
        Self::Economic,
        Self::Surveillance,
        Self::Social,
        Self::Safety,
        Self::Cultural,
    ];
}

/// Per-category concern intensity, each weight in `[0, 1]`.
///
/// Weights are independent; they are not required to sum to anything.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FearProfile {
    pub economic: f64,
    pub surveillance: f64,
    pub social: f64,
    pub safety: f64,
    pub cultural: f64,
}

impl FearProfile {
    pub fn weight(&self, category: FearCategory) -> f64 {
        match category {
            FearCategory::Economic => self.economic,
            FearCategory::Surveillance => self.surveillance,
            FearCategory::Social => self.social,
            FearCategory::Safety => self.safety,
            FearCategory::Cultural => self.cultural,
        }
    }

    /// The category with the highest weight (first in category order on ties).
    pub fn dominant(&self) -> FearCategory {
        let mut best = FearCategory::Economic;
        for category in FearCategory::ALL {
            if self.weight(category) > self.weight(best) {
                best = category;
            }
        }
        best
    }
}

// ============================================================================
// Persona
// ============================================================================

/// Reference attributes of a single persona.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Persona {
    /// Number of study participants in this persona.
    pub size: u64,
    /// Share of the study population (all five sum to ~100).
    pub percentage: f64,
    /// Display color (hex).
    pub color: String,
    pub description: String,
    pub fear_profile: FearProfile,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub characteristics: Vec<String>,
    /// Participant counts per region code (e.g. `GD1`).
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub regional_distribution: BTreeMap<String, u64>,
}

/// A persona plus derived ranking flags.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonaInsights<'a> {
    pub name: PersonaName,
    #[serde(flatten)]
    pub persona: &'a Persona,
    /// 1-based canonical position.
    pub global_ranking: usize,
    pub is_largest_group: bool,
    pub is_majority: bool,
}

// ============================================================================
// Catalog
// ============================================================================

/// The immutable set of exactly five personas.
#[derive(Debug, Clone, PartialEq)]
pub struct PersonaCatalog {
    /// Indexed by [`PersonaName::index`].
    personas: Vec<Persona>,
    /// Opaque study metadata carried by reference files.
    metadata: Option<Value>,
}

impl PersonaCatalog {
    /// The built-in research table.
    pub fn builtin() -> Self {
        BUILTIN_CATALOG.clone()
    }

    /// Parse a catalog from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_value(value)
    }

    /// Load a catalog from a JSON reference file on disk.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let catalog = Self::from_json(&content)?;
        log::info!("Loaded persona reference data from {}", path.display());
        Ok(catalog)
    }

    fn from_value(value: Value) -> Result<Self, CatalogError> {
        let Value::Object(mut map) = value else {
            return Err(CatalogError::Validation(
                "Persona reference data must be a JSON object".to_string(),
            ));
        };
        let metadata = map.remove("metadata");

        let mut slots: Vec<Option<Persona>> = vec![None; PersonaName::ALL.len()];
        for (key, entry) in map {
            let name: PersonaName = key.parse()?;
            let persona: Persona = serde_json::from_value(entry)?;
            slots[name.index()] = Some(persona);
        }

        let mut personas = Vec::with_capacity(slots.len());
        for (name, slot) in PersonaName::ALL.iter().zip(slots) {
            let persona = slot.ok_or_else(|| {
                CatalogError::Validation(format!("Missing persona '{}'", name))
            })?;
            personas.push(persona);
        }

        let catalog = Self { personas, metadata };
        catalog.validate()?;
        Ok(catalog)
    }

    fn validate(&self) -> Result<(), CatalogError> {
        let total: f64 = self.personas.iter().map(|p| p.percentage).sum();
        if (total - 100.0).abs() > PERCENTAGE_TOLERANCE {
            return Err(CatalogError::Validation(format!(
                "Persona percentages sum to {:.1}, expected 100",
                total
            )));
        }
        for (name, persona) in self.iter() {
            for category in FearCategory::ALL {
                let w = persona.fear_profile.weight(category);
                if !(0.0..=1.0).contains(&w) {
                    return Err(CatalogError::Validation(format!(
                        "{}: fear weight {:?} = {} is outside 0.0..1.0",
                        name, category, w
                    )));
                }
            }
        }
        Ok(())
    }

    pub fn get(&self, name: PersonaName) -> &Persona {
        &self.personas[name.index()]
    }

    /// Look up a persona by display label.
    pub fn by_label(&self, label: &str) -> Option<&Persona> {
        PersonaName::from_label(label).map(|name| self.get(name))
    }

    /// Iterate personas in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (PersonaName, &Persona)> {
        PersonaName::ALL.into_iter().zip(self.personas.iter())
    }

    pub fn metadata(&self) -> Option<&Value> {
        self.metadata.as_ref()
    }

    pub fn insights(&self, name: PersonaName) -> PersonaInsights<'_> {
        let persona = self.get(name);
        PersonaInsights {
            name,
            persona,
            global_ranking: name.index() + 1,
            is_largest_group: persona.percentage > 50.0,
            is_majority: persona.percentage > 25.0,
        }
    }

    /// JSON object keyed by persona label, in canonical order, plus metadata.
    pub fn to_json(&self) -> Value {
        let mut map = serde_json::Map::new();
        for (name, persona) in self.iter() {
            map.insert(
                name.as_str().to_string(),
                serde_json::to_value(persona).unwrap_or(Value::Null),
            );
        }
        if let Some(metadata) = &self.metadata {
            map.insert("metadata".to_string(), metadata.clone());
        }
        Value::Object(map)
    }
}

impl Default for PersonaCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

// ============================================================================
// Built-in table
// ============================================================================

fn persona(
    size: u64,
    percentage: f64,
    color: &str,
    description: &str,
    fear: [f64; 5],
    characteristics: [&str; 4],
    regional: [u64; 3],
) -> Persona {
    Persona {
        size,
        percentage,
        color: color.to_string(),
        description: description.to_string(),
        fear_profile: FearProfile {
            economic: fear[0],
            surveillance: fear[1],
            social: fear[2],
            safety: fear[3],
            cultural: fear[4],
        },
        characteristics: characteristics.iter().map(|c| c.to_string()).collect(),
        regional_distribution: ["GD1", "GD2", "GD3"]
            .iter()
            .zip(regional)
            .map(|(code, n)| (code.to_string(), n))
            .collect(),
    }
}

lazy_static::lazy_static! {
    static ref BUILTIN_CATALOG: PersonaCatalog = PersonaCatalog {
        personas: vec![
            persona(
                35344, 59.4, "#7994b5",
                "You approach AI with cautious optimism, recognizing both opportunities and risks. You value social connection and worry about technology isolating people, but you also see AI's potential to enhance human collaboration.",
                [0.25, 0.20, 0.45, 0.15, 0.10],
                [
                    "Values human connection above efficiency",
                    "Sees both benefits and risks in AI",
                    "Concerned about social isolation",
                    "Wants AI to enhance rather than replace human interaction",
                ],
                [15234, 12876, 7234],
            ),
            persona(
                13241, 22.2, "#93b778",
                "You engage thoughtfully with AI questions and show consistent concern patterns. Social isolation and maintaining human connections are your primary concerns as AI develops.",
                [0.35, 0.15, 0.40, 0.25, 0.05],
                [
                    "Thoughtful and consistent in responses",
                    "Focused on social justice implications",
                    "Worried about increasing inequality",
                    "Advocates for inclusive AI development",
                ],
                [3241, 5876, 4124],
            ),
            persona(
                2023, 3.4, "#d17c3f",
                "You prioritize safety and security in AI development. You want careful regulation and oversight to ensure AI systems are safe and beneficial for everyone.",
                [0.20, 0.45, 0.15, 0.50, 0.15],
                [
                    "Safety-first approach to AI",
                    "Supports strong regulation",
                    "Concerned about surveillance",
                    "Wants transparent AI development",
                ],
                [523, 876, 624],
            ),
            persona(
                4987, 8.4, "#be7249",
                "You're concerned about AI's impact on cultural values and traditions. You want to ensure that technological progress doesn't erode the cultural foundations that give life meaning.",
                [0.15, 0.25, 0.20, 0.10, 0.55],
                [
                    "Values tradition and cultural heritage",
                    "Worried about cultural homogenization",
                    "Wants AI to respect diverse values",
                    "Sees importance of preserving human wisdom",
                ],
                [987, 1456, 2544],
            ),
            persona(
                3947, 6.6, "#b63e36",
                "You understand technology dependence risks but remain engaged. You're aware of the potential pitfalls of AI while appreciating its capabilities.",
                [0.30, 0.35, 0.25, 0.30, 0.20],
                [
                    "Knowledgeable about technology",
                    "Balanced view of benefits and risks",
                    "Concerned about dependency",
                    "Advocates for digital literacy",
                ],
                [1862, 1372, 713],
            ),
        ],
        metadata: Some(serde_json::json!({
            "totalParticipants": 59542,
            "studyPeriod": "2022-2023",
            "regions": {
                "GD1": "North America",
                "GD2": "Europe",
                "GD3": "Asia-Pacific",
            },
            "methodology": "Machine learning clustering analysis with K-means (k=5)",
        })),
    };
}

// ============================================================================
// Tests
// ============================================================================
