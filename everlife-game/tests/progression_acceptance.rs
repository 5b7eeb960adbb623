//! Acceptance checks for the progression math and state transitions, driven
//! through the public API.

use everlife_game::{
    calendar, jobs, lifestyle, prestige, skills, Ending, GameData, GameState, JobDef,
    LifestyleCategory, Season, TierDef,
};
use std::collections::BTreeMap;

fn fresh() -> (GameState, GameData) {
    let data = GameData::default_config();
    let mut state = GameState::new(&data);
    lifestyle::refresh_effects(&mut state, &data);
    (state, data)
}

#[test]
fn xp_curve_reference_points() {
    assert!((skills::xp_for_level(1) - 100.0).abs() < f64::EPSILON);
    assert!((skills::xp_for_level(2) - 110.0).abs() < f64::EPSILON);
    assert!((skills::xp_for_level(5) - 146.0).abs() < f64::EPSILON);
    for level in 1..=99 {
        assert!(skills::xp_for_level(level + 1) > skills::xp_for_level(level));
    }
}

#[test]
fn carry_over_invariant_survives_arbitrary_grants() {
    let (mut state, _) = fresh();
    let grants = [3.0, 250.0, 97.5, 1.0, 4_000.0, 0.25, 180.0];
    for (i, amount) in grants.iter().enumerate() {
        skills::add_xp(&mut state, "programming", *amount, i as f64).unwrap();
        let record = &state.skills["programming"];
        if record.level < record.max_level {
            assert!(record.xp >= 0.0);
            assert!(record.xp < skills::xp_for_level(record.level));
        }
    }
}

#[test]
fn decay_floors_at_base_value_and_zero_xp() {
    let (mut state, _) = fresh();
    skills::poll_decay(&mut state, 1.0);
    {
        let record = state.skills.get_mut("fitness").unwrap();
        record.level = 5;
        record.xp = 2.0;
        record.decay_rate = 5.0;
        record.last_updated_ms = 1.0;
    }
    state.last_decay_check_ms = 1.0;
    // A month of neglect at an absurd decay rate.
    skills::poll_decay(&mut state, 1.0 + 30.0 * 24.0 * 3_600.0 * 1_000.0);
    let record = &state.skills["fitness"];
    assert_eq!(record.level, record.base_value);
    assert!(record.xp >= 0.0);
}

#[test]
fn ineligible_prestige_is_byte_for_byte_idempotent() {
    let (mut state, data) = fresh();
    state.gold = 4_321.0;
    state.statistics.total_gold_earned = 9_000.0;
    let before = serde_json::to_string(&state).unwrap();
    assert!(prestige::perform_prestige(&mut state, &data, 1.0).is_err());
    assert_eq!(serde_json::to_string(&state).unwrap(), before);
}

#[test]
fn prestige_round_trip_preserves_the_defined_subset() {
    let (mut state, data) = fresh();
    state.age = state.max_age;
    state.achievements.insert(String::from("ten_thousand"));
    state.settings.autosave = false;
    state.statistics.total_gold_earned = 30_000.0;
    state.gold = 8_000.0;
    state.day = 23;

    prestige::perform_prestige(&mut state, &data, 1.0).unwrap();
    assert!(state.achievements.contains("ten_thousand"));
    assert_eq!(state.statistics.prestige_count, 1);
    assert!(!state.settings.autosave);
    assert!(state.gold.abs() < f64::EPSILON);
    assert_eq!(state.day, 1);
    assert_eq!(state.age, 18);
}

#[test]
fn insolvency_downgrades_to_zero_cost_options() {
    let (mut state, data) = fresh();
    state.gold = 10.0;
    state.lifestyle.housing = String::from("house");
    state.lifestyle.transportation = String::from("car");
    state.lifestyle.diet = String::from("meal_service");
    lifestyle::refresh_effects(&mut state, &data);

    lifestyle::apply_daily_cost(&mut state, &data, 1.0);
    assert!(state.gold.abs() < f64::EPSILON);
    for category in LifestyleCategory::ALL {
        let selected = state.lifestyle.get(category);
        let fallback = data.lifestyle.zero_cost(category).unwrap();
        assert_eq!(selected, fallback.id);
    }
}

#[test]
fn year_boundary_after_exactly_six_hundred_ticks() {
    let (mut state, data) = fresh();
    calendar::advance_ticks(&mut state, &data, 599, 1.0);
    assert_eq!(state.year, 1);
    calendar::advance_ticks(&mut state, &data, 1, 1.0);
    assert_eq!(state.year, 2);
    assert_eq!(state.season, Season::Spring);
    assert_eq!(state.day, 1);
}

#[test]
fn terminal_end_of_life_fires_once_and_halts_accrual() {
    let (mut state, data) = fresh();
    state.age = 64;
    state.max_age = 65;
    state.season = Season::Winter;
    state.day = 30;
    state.ticks_since_day_start = 4;
    jobs::apply_for_job(&mut state, &data, "office", 0, 1.0).unwrap();

    assert_eq!(calendar::advance_ticks(&mut state, &data, 500, 1.0), 1);
    assert_eq!(state.ending, Some(Ending::Retirement));
    let gold_at_death = state.gold;
    assert_eq!(calendar::advance_ticks(&mut state, &data, 500, 2.0), 0);
    assert!((state.gold - gold_at_death).abs() < f64::EPSILON);
    assert_eq!(
        state.logs.iter().filter(|l| l.starts_with("log.life.ended")).count(),
        1
    );
}

#[test]
fn career_upgrade_promotes_to_tier_one_not_two() {
    let mut data = GameData::default_config();
    data.jobs = vec![JobDef {
        id: String::from("ladder"),
        title: String::from("Ladder"),
        tiers: [0u32, 10, 25]
            .iter()
            .enumerate()
            .map(|(index, min_skill)| TierDef {
                tier: index as u32,
                title: format!("Rung {index}"),
                income_per_year: 1_000.0,
                skill_reward_per_year: BTreeMap::new(),
                required_skill: BTreeMap::from([(String::from("study"), *min_skill)]),
                required_job_level: 0,
            })
            .collect(),
    }];
    let mut state = GameState::new(&data);
    jobs::apply_for_job(&mut state, &data, "ladder", 0, 1.0).unwrap();
    state.skills.get_mut("study").unwrap().level = 12;

    assert_eq!(jobs::check_career_upgrade(&mut state, &data, 2.0), Some(1));
    assert_eq!(state.active_job.as_ref().unwrap().tier_index, 1);
}

#[test]
fn synergy_bonus_clamps_at_exactly_one_half() {
    let (mut state, _) = fresh();
    let mut partners: Vec<String> = state
        .skills
        .keys()
        .filter(|id| id.as_str() != "study")
        .cloned()
        .collect();
    // One extra partner pushes the raw sum past the cap.
    let mut extra = state.skills["study"].clone();
    extra.id = String::from("oratory");
    extra.synergies.clear();
    partners.push(extra.id.clone());
    state.skills.insert(extra.id.clone(), extra);
    assert!(partners.len() >= 6, "need enough partners to exceed the cap");
    {
        let record = state.skills.get_mut("study").unwrap();
        record.synergies = partners.iter().cloned().collect();
    }
    for id in &partners {
        state.skills.get_mut(id).unwrap().level = 100;
    }
    assert!((skills::synergy_bonus(&state, "study") - 0.5).abs() < f64::EPSILON);
}
