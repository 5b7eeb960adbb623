//! Shape checks for the embedded default catalogs: every cross-reference a
//! definition carries must resolve inside the same data set.

use everlife_game::{GameData, LifestyleCategory};
use std::collections::HashSet;

fn data() -> GameData {
    GameData::default_config()
}

#[test]
fn skill_ids_are_unique() {
    let data = data();
    let mut seen = HashSet::new();
    for skill in &data.skills {
        assert!(seen.insert(skill.id.as_str()), "duplicate skill {}", skill.id);
    }
}

#[test]
fn skills_reference_known_attributes_and_categories() {
    let data = data();
    let categories: HashSet<&str> = data.categories.iter().map(|c| c.id.as_str()).collect();
    for skill in &data.skills {
        assert!(
            categories.contains(skill.category.as_str()),
            "{} has unknown category {}",
            skill.id,
            skill.category
        );
        assert!(
            data.attribute(&skill.primary_attribute).is_some(),
            "{} has unknown primary attribute",
            skill.id
        );
        if let Some(secondary) = skill.secondary_attribute.as_deref() {
            assert!(
                data.attribute(secondary).is_some(),
                "{} has unknown secondary attribute",
                skill.id
            );
        }
    }
}

#[test]
fn synergies_reference_known_skills_and_never_self() {
    let data = data();
    for skill in &data.skills {
        for partner in &skill.synergies {
            assert_ne!(partner, &skill.id, "{} lists itself as a synergy", skill.id);
            assert!(
                data.skill(partner).is_some(),
                "{} has unknown synergy {partner}",
                skill.id
            );
        }
    }
}

#[test]
fn skill_rates_are_sane() {
    for skill in &data().skills {
        assert!(skill.growth_rate > 0.0, "{} growth rate", skill.id);
        assert!(skill.decay_rate >= 0.0, "{} decay rate", skill.id);
        assert!(skill.max_level >= skill.base_value, "{} level bounds", skill.id);
    }
}

#[test]
fn job_tiers_reference_known_skills() {
    let data = data();
    for job in &data.jobs {
        assert!(!job.tiers.is_empty(), "{} has no tiers", job.id);
        for tier in &job.tiers {
            for skill_id in tier.required_skill.keys().chain(tier.skill_reward_per_year.keys()) {
                assert!(
                    data.skill(skill_id).is_some(),
                    "{} tier {} references unknown skill {skill_id}",
                    job.id,
                    tier.tier
                );
            }
        }
    }
}

#[test]
fn job_tiers_ascend_in_requirement_and_income() {
    for job in &data().jobs {
        for pair in job.tiers.windows(2) {
            assert!(pair[0].tier < pair[1].tier);
            assert!(pair[0].income_per_year <= pair[1].income_per_year);
            assert!(pair[0].required_job_level <= pair[1].required_job_level);
        }
    }
}

#[test]
fn every_lifestyle_category_has_a_zero_cost_row() {
    let data = data();
    for category in LifestyleCategory::ALL {
        assert!(!data.lifestyle.options(category).is_empty());
        let fallback = data.lifestyle.zero_cost(category).unwrap();
        assert!(fallback.cost <= 0.0, "{category} fallback costs gold");
    }
}

#[test]
fn lifestyle_requirements_resolve() {
    let data = data();
    for category in LifestyleCategory::ALL {
        for option in data.lifestyle.options(category) {
            if let Some(housing) = option.required_housing.as_deref() {
                assert!(
                    data.lifestyle.option(LifestyleCategory::Housing, housing).is_some(),
                    "{} requires unknown housing {housing}",
                    option.id
                );
            }
            if let Some(job_id) = option.required_career_completion.as_deref() {
                assert!(
                    data.job(job_id).is_some(),
                    "{} requires unknown career {job_id}",
                    option.id
                );
            }
            assert!(option.required_gold >= 0.0);
        }
    }
}

#[test]
fn achievement_ids_are_unique() {
    let data = data();
    let mut seen = HashSet::new();
    for achievement in &data.achievements {
        assert!(
            seen.insert(achievement.id.as_str()),
            "duplicate achievement {}",
            achievement.id
        );
        assert!(!achievement.name.is_empty());
    }
}
