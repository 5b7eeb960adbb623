//! Lifestyle selections and their derived effects.
//!
//! The three categories (housing, transportation, diet) each hold exactly one
//! selected catalog option. `recompute` is a pure projection of selections
//! onto a derived effects record; daily upkeep runs once per day increment
//! and force-downgrades on insolvency instead of letting gold go negative.

use crate::constants::{
    BASE_COMMUTE_HOURS, BASE_MEAL_HOURS, BASE_SLEEP_HOURS, DEFAULT_TRAINING_HOURS,
    DEFAULT_WORKING_HOURS, DIET_MORTALITY_WEIGHT, FIXED_CLEANING_HOURS,
    HOUSING_MORTALITY_WEIGHT, LOG_LIFESTYLE_INSOLVENCY, LOG_LIFESTYLE_SELECTED,
    MIN_COMMUTE_HOURS, MIN_MEAL_HOURS, MORTALITY_MODIFIER_FLOOR,
    TRANSPORT_MORTALITY_WEIGHT,
};
use crate::data::{GameData, LifestyleCategory, LifestyleOption};
use crate::error::EngineError;
use crate::events::EventCategory;
use crate::state::{GameState, LifestyleEffects};

fn selected<'a>(
    state: &GameState,
    data: &'a GameData,
    category: LifestyleCategory,
) -> Option<&'a LifestyleOption> {
    data.lifestyle.option(category, state.lifestyle.get(category))
}

/// Derive the effects record from the current selections. Pure: no state is
/// mutated, unknown selections contribute nothing.
#[must_use]
pub fn recompute(state: &GameState, data: &GameData) -> LifestyleEffects {
    let housing = selected(state, data, LifestyleCategory::Housing);
    let transport = selected(state, data, LifestyleCategory::Transportation);
    let diet = selected(state, data, LifestyleCategory::Diet);

    let effect = |option: Option<&LifestyleOption>, f: fn(&LifestyleOption) -> f64| {
        option.map_or(0.0, f)
    };

    let mortality_modifier = (1.0
        + effect(housing, |o| o.mortality_effect) * HOUSING_MORTALITY_WEIGHT
        + effect(transport, |o| o.mortality_effect) * TRANSPORT_MORTALITY_WEIGHT
        + effect(diet, |o| o.mortality_effect) * DIET_MORTALITY_WEIGHT)
        .max(MORTALITY_MODIFIER_FLOOR);

    let sleep_hours = BASE_SLEEP_HOURS * (1.0 + effect(housing, |o| o.time_effect));
    let commute_hours = (BASE_COMMUTE_HOURS * (1.0 + effect(transport, |o| o.time_effect)))
        .max(MIN_COMMUTE_HOURS);
    let meal_hours =
        (BASE_MEAL_HOURS * (1.0 + effect(diet, |o| o.time_effect))).max(MIN_MEAL_HOURS);

    let committed = sleep_hours + commute_hours + meal_hours + FIXED_CLEANING_HOURS;
    let free_time_hours =
        (24.0 - committed - DEFAULT_WORKING_HOURS - DEFAULT_TRAINING_HOURS).max(0.0);

    LifestyleEffects {
        mortality_modifier,
        comfort: effect(housing, |o| o.comfort_effect)
            + effect(transport, |o| o.comfort_effect)
            + effect(diet, |o| o.comfort_effect),
        cost_per_day: effect(housing, |o| o.cost)
            + effect(transport, |o| o.cost)
            + effect(diet, |o| o.cost),
        sleep_hours,
        commute_hours,
        meal_hours,
        free_time_hours,
    }
}

/// Recompute and store the derived effects on the state.
pub fn refresh_effects(state: &mut GameState, data: &GameData) {
    state.lifestyle_effects = recompute(state, data);
}

/// Select a lifestyle option, enforcing its requirement gates.
///
/// # Errors
///
/// [`EngineError::InvalidReference`] for an unknown option id and
/// [`EngineError::RequirementNotMet`] when a gate fails. Neither mutates
/// state.
pub fn select_option(
    state: &mut GameState,
    data: &GameData,
    category: LifestyleCategory,
    option_id: &str,
    now_ms: f64,
) -> Result<(), EngineError> {
    let Some(option) = data.lifestyle.option(category, option_id) else {
        return Err(EngineError::InvalidReference(format!(
            "lifestyle:{category}:{option_id}"
        )));
    };

    if state.gold < option.required_gold {
        return Err(EngineError::RequirementNotMet(format!(
            "{} requires {} gold",
            option.name, option.required_gold
        )));
    }
    if let Some(required) = option.required_housing.as_deref() {
        if state.lifestyle.housing != required {
            return Err(EngineError::RequirementNotMet(format!(
                "{} requires housing {required}",
                option.name
            )));
        }
    }
    if let Some(track) = option.required_career_completion.as_deref() {
        if !state.career_completed(track) {
            return Err(EngineError::RequirementNotMet(format!(
                "{} requires completing the {track} career",
                option.name
            )));
        }
    }

    let name = option.name.clone();
    state.lifestyle.set(category, option_id);
    refresh_effects(state, data);
    state.push_log(LOG_LIFESTYLE_SELECTED, &format!("{category}:{option_id}"));
    state.push_event(
        EventCategory::Lifestyle,
        format!("{category} changed to {name}"),
        now_ms,
    );
    Ok(())
}

/// Deduct the daily upkeep. When gold cannot cover it, gold clamps to zero
/// and all three categories drop to their zero-cost option. The downgrade is
/// a corrective transition, not an error.
pub fn apply_daily_cost(state: &mut GameState, data: &GameData, now_ms: f64) {
    let cost = state.lifestyle_effects.cost_per_day;
    state.gold -= cost;
    if state.gold >= 0.0 {
        return;
    }

    state.gold = 0.0;
    for category in LifestyleCategory::ALL {
        if let Some(option) = data.lifestyle.zero_cost(category) {
            state.lifestyle.set(category, option.id.clone());
        }
    }
    refresh_effects(state, data);
    log::info!("insolvency downgrade applied, upkeep was {cost}");
    state.push_log(LOG_LIFESTYLE_INSOLVENCY, "");
    state.push_event(
        EventCategory::Lifestyle,
        "upkeep unaffordable, lifestyle downgraded",
        now_ms,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> (GameState, GameData) {
        let data = GameData::default_config();
        let mut state = GameState::new(&data);
        refresh_effects(&mut state, &data);
        (state, data)
    }

    #[test]
    fn default_selections_are_free() {
        let (state, _) = setup();
        assert!(state.lifestyle_effects.cost_per_day.abs() < f64::EPSILON);
    }

    #[test]
    fn mortality_modifier_uses_category_weights() {
        let (state, data) = setup();
        // shared_room 0.3*0.15 + walking -0.1*0.05 + noodles 0.5*0.10.
        let expected = 1.0 + 0.3 * 0.15 - 0.1 * 0.05 + 0.5 * 0.10;
        let effects = recompute(&state, &data);
        assert!((effects.mortality_modifier - expected).abs() < 1e-12);
    }

    #[test]
    fn mortality_modifier_never_drops_below_floor() {
        let (state, mut data) = setup();
        for options in [
            &mut data.lifestyle.housing,
            &mut data.lifestyle.transportation,
            &mut data.lifestyle.diet,
        ] {
            for option in options {
                option.mortality_effect = -100.0;
            }
        }
        let effects = recompute(&state, &data);
        assert!((effects.mortality_modifier - MORTALITY_MODIFIER_FLOOR).abs() < f64::EPSILON);
    }

    #[test]
    fn meal_hours_respect_the_floor() {
        let (mut state, mut data) = setup();
        data.lifestyle.diet[0].time_effect = -0.9;
        refresh_effects(&mut state, &data);
        assert!((state.lifestyle_effects.meal_hours - MIN_MEAL_HOURS).abs() < f64::EPSILON);
    }

    #[test]
    fn free_time_is_never_negative() {
        let (mut state, mut data) = setup();
        data.lifestyle.transportation[0].time_effect = 20.0;
        refresh_effects(&mut state, &data);
        assert!(state.lifestyle_effects.free_time_hours.abs() < f64::EPSILON);
    }

    #[test]
    fn selection_gates_on_gold() {
        let (mut state, data) = setup();
        let err = select_option(
            &mut state,
            &data,
            LifestyleCategory::Housing,
            "apartment",
            1.0,
        )
        .unwrap_err();
        assert!(matches!(err, EngineError::RequirementNotMet(_)));
        assert_eq!(state.lifestyle.housing, "shared_room");

        state.gold = 600.0;
        select_option(&mut state, &data, LifestyleCategory::Housing, "apartment", 1.0).unwrap();
        assert_eq!(state.lifestyle.housing, "apartment");
        assert!(state.lifestyle_effects.cost_per_day > 0.0);
    }

    #[test]
    fn selection_gates_on_housing_prerequisite() {
        let (mut state, data) = setup();
        state.gold = 10_000.0;
        let err = select_option(
            &mut state,
            &data,
            LifestyleCategory::Transportation,
            "car",
            1.0,
        )
        .unwrap_err();
        assert!(matches!(err, EngineError::RequirementNotMet(_)));

        select_option(&mut state, &data, LifestyleCategory::Housing, "apartment", 1.0).unwrap();
        select_option(&mut state, &data, LifestyleCategory::Transportation, "car", 1.0).unwrap();
        assert_eq!(state.lifestyle.transportation, "car");
    }

    #[test]
    fn selection_gates_on_career_completion() {
        let (mut state, data) = setup();
        state.gold = 100_000.0;
        let err =
            select_option(&mut state, &data, LifestyleCategory::Housing, "house", 1.0).unwrap_err();
        assert!(matches!(err, EngineError::RequirementNotMet(_)));

        state
            .job_progress
            .entry(String::from("office"))
            .or_default()
            .level = 50;
        select_option(&mut state, &data, LifestyleCategory::Housing, "house", 1.0).unwrap();
        assert_eq!(state.lifestyle.housing, "house");
    }

    #[test]
    fn unknown_option_is_invalid_reference() {
        let (mut state, data) = setup();
        let err = select_option(&mut state, &data, LifestyleCategory::Diet, "ambrosia", 1.0)
            .unwrap_err();
        assert!(matches!(err, EngineError::InvalidReference(_)));
    }

    #[test]
    fn insolvency_forces_zero_cost_options() {
        let (mut state, data) = setup();
        state.gold = 10.0;
        state.lifestyle.housing = String::from("house");
        state.lifestyle.transportation = String::from("car");
        state.lifestyle.diet = String::from("meal_service");
        refresh_effects(&mut state, &data);
        assert!(state.lifestyle_effects.cost_per_day >= 50.0);

        apply_daily_cost(&mut state, &data, 1.0);
        assert!(state.gold.abs() < f64::EPSILON);
        assert_eq!(state.lifestyle.housing, "shared_room");
        assert_eq!(state.lifestyle.transportation, "walking");
        assert_eq!(state.lifestyle.diet, "instant_noodles");
        assert!(state.lifestyle_effects.cost_per_day.abs() < f64::EPSILON);
    }

    #[test]
    fn affordable_upkeep_just_deducts() {
        let (mut state, data) = setup();
        state.gold = 100.0;
        state.lifestyle.diet = String::from("home_cooking");
        refresh_effects(&mut state, &data);
        apply_daily_cost(&mut state, &data, 1.0);
        assert!((state.gold - 95.0).abs() < f64::EPSILON);
        assert_eq!(state.lifestyle.diet, "home_cooking");
    }
}
