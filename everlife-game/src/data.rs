//! Static catalog definitions consumed by the engine.
//!
//! Catalogs are immutable: the engine only ever derives per-session instances
//! from them (see [`crate::state::GameState`]). Default balance data ships as
//! embedded JSON; embedders may substitute their own via [`crate::DataLoader`].

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

const DEFAULT_SKILLS_DATA: &str = include_str!("../assets/data/skills.json");
const DEFAULT_JOBS_DATA: &str = include_str!("../assets/data/jobs.json");
const DEFAULT_LIFESTYLE_DATA: &str = include_str!("../assets/data/lifestyle.json");
const DEFAULT_ACHIEVEMENTS_DATA: &str = include_str!("../assets/data/achievements.json");

/// Definition of a trainable skill.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillDef {
    pub id: String,
    pub name: String,
    pub category: String,
    #[serde(default)]
    pub base_value: u32,
    #[serde(default = "default_max_level")]
    pub max_level: u32,
    #[serde(default = "default_one")]
    pub growth_rate: f64,
    #[serde(default)]
    pub decay_rate: f64,
    pub primary_attribute: String,
    #[serde(default)]
    pub secondary_attribute: Option<String>,
    #[serde(default)]
    pub synergies: SmallVec<[String; 4]>,
}

/// Definition of a character attribute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributeDef {
    pub id: String,
    pub name: String,
    #[serde(default = "default_attribute_base")]
    pub base_value: f64,
}

/// Definition of a skill category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryDef {
    pub id: String,
    pub name: String,
}

/// One rung of a career path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TierDef {
    pub tier: u32,
    pub title: String,
    #[serde(default)]
    pub income_per_year: f64,
    #[serde(default)]
    pub skill_reward_per_year: BTreeMap<String, f64>,
    #[serde(default)]
    pub required_skill: BTreeMap<String, u32>,
    #[serde(default)]
    pub required_job_level: u32,
}

/// A career track: tiers ordered by ascending `tier` and requirement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobDef {
    pub id: String,
    pub title: String,
    pub tiers: Vec<TierDef>,
}

impl JobDef {
    #[must_use]
    pub fn tier(&self, index: usize) -> Option<&TierDef> {
        self.tiers.get(index)
    }
}

/// The three lifestyle categories a player selects one option in at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LifestyleCategory {
    Housing,
    Transportation,
    Diet,
}

impl LifestyleCategory {
    pub const ALL: [Self; 3] = [Self::Housing, Self::Transportation, Self::Diet];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Housing => "housing",
            Self::Transportation => "transportation",
            Self::Diet => "diet",
        }
    }
}

impl fmt::Display for LifestyleCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LifestyleCategory {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "housing" => Ok(Self::Housing),
            "transportation" => Ok(Self::Transportation),
            "diet" => Ok(Self::Diet),
            _ => Err(()),
        }
    }
}

/// An immutable lifestyle catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LifestyleOption {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub cost: f64,
    #[serde(default)]
    pub mortality_effect: f64,
    #[serde(default)]
    pub comfort_effect: f64,
    #[serde(default)]
    pub time_effect: f64,
    #[serde(default)]
    pub required_gold: f64,
    #[serde(default)]
    pub required_housing: Option<String>,
    #[serde(default)]
    pub required_career_completion: Option<String>,
}

/// Per-category option lists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct LifestyleCatalog {
    #[serde(default)]
    pub housing: Vec<LifestyleOption>,
    #[serde(default)]
    pub transportation: Vec<LifestyleOption>,
    #[serde(default)]
    pub diet: Vec<LifestyleOption>,
}

impl LifestyleCatalog {
    #[must_use]
    pub fn options(&self, category: LifestyleCategory) -> &[LifestyleOption] {
        match category {
            LifestyleCategory::Housing => &self.housing,
            LifestyleCategory::Transportation => &self.transportation,
            LifestyleCategory::Diet => &self.diet,
        }
    }

    #[must_use]
    pub fn option(&self, category: LifestyleCategory, id: &str) -> Option<&LifestyleOption> {
        self.options(category).iter().find(|o| o.id == id)
    }

    /// The insolvency fallback for a category: its zero-cost entry, or the
    /// first entry when no zero-cost option exists.
    #[must_use]
    pub fn zero_cost(&self, category: LifestyleCategory) -> Option<&LifestyleOption> {
        let options = self.options(category);
        options
            .iter()
            .find(|o| o.cost <= 0.0)
            .or_else(|| options.first())
    }
}

/// Definition of an achievement known to the catalog. Evaluation itself is an
/// external collaborator concern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AchievementDef {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub desc: String,
}

#[derive(Debug, Clone, Deserialize, Default)]
struct SkillsFile {
    #[serde(default)]
    categories: Vec<CategoryDef>,
    #[serde(default)]
    attributes: Vec<AttributeDef>,
    #[serde(default)]
    skills: Vec<SkillDef>,
}

#[derive(Debug, Clone, Deserialize, Default)]
struct JobsFile {
    #[serde(default)]
    jobs: Vec<JobDef>,
}

#[derive(Debug, Clone, Deserialize, Default)]
struct AchievementsFile {
    #[serde(default)]
    achievements: Vec<AchievementDef>,
}

/// Container for all static configuration the engine consumes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct GameData {
    pub skills: Vec<SkillDef>,
    pub attributes: Vec<AttributeDef>,
    pub categories: Vec<CategoryDef>,
    pub jobs: Vec<JobDef>,
    pub lifestyle: LifestyleCatalog,
    pub achievements: Vec<AchievementDef>,
}

impl GameData {
    /// Parse catalogs from the four JSON documents.
    ///
    /// # Errors
    ///
    /// Returns an error if any document cannot be parsed.
    pub fn from_json(
        skills_json: &str,
        jobs_json: &str,
        lifestyle_json: &str,
        achievements_json: &str,
    ) -> Result<Self, serde_json::Error> {
        let skills: SkillsFile = serde_json::from_str(skills_json)?;
        let jobs: JobsFile = serde_json::from_str(jobs_json)?;
        let lifestyle: LifestyleCatalog = serde_json::from_str(lifestyle_json)?;
        let achievements: AchievementsFile = serde_json::from_str(achievements_json)?;
        Ok(Self {
            skills: skills.skills,
            attributes: skills.attributes,
            categories: skills.categories,
            jobs: jobs.jobs,
            lifestyle,
            achievements: achievements.achievements,
        })
    }

    /// Load the embedded default catalogs, falling back to the minimal
    /// built-in catalog if the embedded data is malformed.
    #[must_use]
    pub fn default_config() -> Self {
        Self::from_json(
            DEFAULT_SKILLS_DATA,
            DEFAULT_JOBS_DATA,
            DEFAULT_LIFESTYLE_DATA,
            DEFAULT_ACHIEVEMENTS_DATA,
        )
        .unwrap_or_else(|err| {
            log::warn!("embedded catalog data failed to parse: {err}");
            Self::minimal_fallback()
        })
    }

    /// The smallest catalog that keeps the simulation runnable: one skill,
    /// one job, and the zero-cost lifestyle rows. Used when external
    /// configuration cannot be loaded.
    #[must_use]
    pub fn minimal_fallback() -> Self {
        let zero_option = |id: &str, name: &str| LifestyleOption {
            id: String::from(id),
            name: String::from(name),
            cost: 0.0,
            mortality_effect: 0.0,
            comfort_effect: 0.0,
            time_effect: 0.0,
            required_gold: 0.0,
            required_housing: None,
            required_career_completion: None,
        };
        Self {
            skills: vec![SkillDef {
                id: String::from("labor"),
                name: String::from("Labor"),
                category: String::from("general"),
                base_value: 0,
                max_level: default_max_level(),
                growth_rate: 1.0,
                decay_rate: 0.0,
                primary_attribute: String::from("discipline"),
                secondary_attribute: None,
                synergies: SmallVec::new(),
            }],
            attributes: vec![AttributeDef {
                id: String::from("discipline"),
                name: String::from("Discipline"),
                base_value: default_attribute_base(),
            }],
            categories: vec![CategoryDef {
                id: String::from("general"),
                name: String::from("General"),
            }],
            jobs: vec![JobDef {
                id: String::from("day_labor"),
                title: String::from("Day Labor"),
                tiers: vec![TierDef {
                    tier: 0,
                    title: String::from("Laborer"),
                    income_per_year: 1_000.0,
                    skill_reward_per_year: BTreeMap::from([(String::from("labor"), 20.0)]),
                    required_skill: BTreeMap::new(),
                    required_job_level: 0,
                }],
            }],
            lifestyle: LifestyleCatalog {
                housing: vec![zero_option("street", "Street")],
                transportation: vec![zero_option("walking", "Walking")],
                diet: vec![zero_option("scraps", "Scraps")],
            },
            achievements: Vec::new(),
        }
    }

    #[must_use]
    pub fn skill(&self, id: &str) -> Option<&SkillDef> {
        self.skills.iter().find(|s| s.id == id)
    }

    #[must_use]
    pub fn job(&self, id: &str) -> Option<&JobDef> {
        self.jobs.iter().find(|j| j.id == id)
    }

    #[must_use]
    pub fn attribute(&self, id: &str) -> Option<&AttributeDef> {
        self.attributes.iter().find(|a| a.id == id)
    }
}

fn default_max_level() -> u32 {
    100
}

fn default_one() -> f64 {
    1.0
}

fn default_attribute_base() -> f64 {
    5.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_parses_embedded_catalogs() {
        let data = GameData::default_config();
        assert!(data.skills.len() >= 6);
        assert!(data.jobs.len() >= 3);
        assert!(data.skill("study").is_some());
        assert!(data.job("office").is_some());
        assert_eq!(data.lifestyle.housing[0].id, "shared_room");
    }

    #[test]
    fn job_tiers_are_ordered_ascending() {
        let data = GameData::default_config();
        for job in &data.jobs {
            for pair in job.tiers.windows(2) {
                assert!(pair[0].tier < pair[1].tier, "tiers out of order in {}", job.id);
                assert!(
                    pair[0].income_per_year <= pair[1].income_per_year,
                    "income not ascending in {}",
                    job.id
                );
            }
        }
    }

    #[test]
    fn zero_cost_option_exists_per_category() {
        let data = GameData::default_config();
        for category in LifestyleCategory::ALL {
            let fallback = data.lifestyle.zero_cost(category).expect("fallback row");
            assert!(fallback.cost <= 0.0);
        }
    }

    #[test]
    fn minimal_fallback_is_runnable() {
        let data = GameData::minimal_fallback();
        assert_eq!(data.skills.len(), 1);
        assert_eq!(data.jobs.len(), 1);
        for category in LifestyleCategory::ALL {
            assert!(data.lifestyle.zero_cost(category).is_some());
        }
    }

    #[test]
    fn from_json_rejects_malformed_documents() {
        let err = GameData::from_json("{not json", "{}", "{}", "{}");
        assert!(err.is_err());
    }

    #[test]
    fn lifestyle_requirements_deserialize() {
        let data = GameData::default_config();
        let house = data.lifestyle.option(LifestyleCategory::Housing, "house").unwrap();
        assert_eq!(house.required_career_completion.as_deref(), Some("office"));
        let car = data
            .lifestyle
            .option(LifestyleCategory::Transportation, "car")
            .unwrap();
        assert_eq!(car.required_housing.as_deref(), Some("apartment"));
    }
}
