use std::collections::{HashMap, HashSet};

use homeplate_mealplan::{Command, Generate, PlannerSettings, Query};
use homeplate_shared::user::MealPreferences;
use temp_dir::TempDir;
use time::macros::date;

use crate::helpers::RecipeInput;

mod helpers;

fn input(moments: Option<&[&str]>, preferences: MealPreferences, save: bool) -> Generate {
    Generate {
        user_id: "john".to_owned(),
        start: date!(2025 - 01 - 20),
        moments: moments.map(|names| names.iter().map(|n| n.to_string()).collect()),
        preferences,
        save,
    }
}

#[tokio::test]
async fn test_three_untagged_recipes_fill_three_slots() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = helpers::setup_test_state(dir.child("db.sqlite3")).await?;
    helpers::create_recipes(&state, ["1", "2", "3"], 30).await?;

    let command = Command::new(state);
    let plan = command
        .generate(input(
            Some(&["Lunch", "Dinner"]),
            MealPreferences::default(),
            false,
        ))
        .await?;

    assert_eq!(plan.requested, 14);
    assert_eq!(plan.planned, 3);
    assert_eq!(plan.meals.len(), 3);

    let ids = plan
        .meals
        .iter()
        .map(|m| m.recipe.id.as_str())
        .collect::<HashSet<_>>();
    assert_eq!(ids, HashSet::from(["1", "2", "3"]));

    Ok(())
}

#[tokio::test]
async fn test_dinner_recipe_never_for_breakfast() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = helpers::setup_test_state(dir.child("db.sqlite3")).await?;
    helpers::create_recipe(&state, RecipeInput::official("steak", 15, &["Dinner"])).await?;

    let command = Command::new(state);
    let plan = command
        .generate(input(None, MealPreferences::default(), false))
        .await?;

    assert_eq!(plan.requested, 21);
    assert_eq!(plan.meals.len(), 1);
    assert_eq!(plan.meals[0].moment.name, "Dinner");
    assert_eq!(plan.meals[0].date, date!(2025 - 01 - 20));

    Ok(())
}

#[tokio::test]
async fn test_vegetarian_only() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = helpers::setup_test_state(dir.child("db.sqlite3")).await?;
    helpers::create_recipes(&state, ["meat1", "meat2", "meat3", "meat4"], 30).await?;
    helpers::create_recipe(&state, RecipeInput::official("salad", 30, &["Vegetarian"])).await?;

    let command = Command::new(state);
    let plan = command
        .generate(input(
            Some(&["Lunch", "Dinner"]),
            MealPreferences {
                vegetarian_only: true,
                ..Default::default()
            },
            false,
        ))
        .await?;

    assert_eq!(plan.meals.len(), 1);
    assert_eq!(plan.meals[0].recipe.id, "salad");

    Ok(())
}

#[tokio::test]
async fn test_plan_properties() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = helpers::setup_test_state(dir.child("db.sqlite3")).await?;

    let tag_sets: [&[&str]; 8] = [
        &[],
        &["Pasta"],
        &["Soup", "Vegetarian"],
        &["Dinner"],
        &["Lunch", "Chicken"],
        &["Breakfast"],
        &["Dinner", "Fish"],
        &["Vegetarian", "Gluten-Free"],
    ];

    let mut recipe_tags = HashMap::new();
    for i in 0..40u32 {
        let id = format!("r{i}");
        let tags = tag_sets[i as usize % tag_sets.len()];
        let cook_time = 10 + (i * 7) % 50;
        helpers::create_recipe(&state, RecipeInput::official(&id, cook_time, tags)).await?;
        recipe_tags.insert(id, (cook_time, tags));
    }

    let recent = helpers::plan_meal(&state, "john", date!(2025 - 01 - 13), "lunch", "r0").await?;
    assert!(!recent.is_empty());

    let command = Command::new(state);

    for _ in 0..10 {
        let plan = command
            .generate(input(None, MealPreferences::default(), false))
            .await?;

        let mut used = HashSet::new();
        for meal in plan.meals.iter() {
            assert!(used.insert(meal.recipe.id.to_owned()), "recipe planned twice");
            assert_ne!(meal.recipe.id, "r0", "recently used recipe planned");

            let (cook_time, tags) = recipe_tags[&meal.recipe.id];
            for moment in ["Breakfast", "Lunch", "Dinner"] {
                if moment != meal.moment.name && tags.contains(&moment) {
                    panic!("{} tagged {moment} planned for {}", meal.recipe.id, meal.moment.name);
                }
            }

            if meal.moment.name == "Breakfast" {
                assert!(cook_time <= 20);
            }
        }

        let mut by_day: HashMap<time::Date, Vec<&str>> = HashMap::new();
        for meal in plan.meals.iter() {
            by_day.entry(meal.date).or_default().push(&meal.recipe.id);
        }

        for recipes in by_day.values() {
            let mut claimed = HashSet::new();
            for id in recipes {
                for tag in recipe_tags[*id].1 {
                    assert!(claimed.insert(*tag), "tag {tag} shared on the same day");
                }
            }
        }
    }

    Ok(())
}

#[tokio::test]
async fn test_preferences_are_applied() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = helpers::setup_test_state(dir.child("db.sqlite3")).await?;
    helpers::create_recipe(&state, RecipeInput::official("a", 10, &["Vegetarian", "Gluten-Free"])).await?;
    helpers::create_recipe(&state, RecipeInput::official("b", 50, &["Vegetarian", "Gluten-Free", "Soup"])).await?;
    helpers::create_recipe(&state, RecipeInput::official("c", 10, &["Vegetarian"])).await?;
    helpers::create_recipe(&state, RecipeInput::official("d", 10, &["Gluten-Free"])).await?;

    let command = Command::new(state);
    let plan = command
        .generate(input(
            Some(&["Lunch", "Dinner"]),
            MealPreferences {
                vegetarian_only: true,
                gluten_free: true,
                max_cook_minutes: Some(30),
            },
            false,
        ))
        .await?;

    assert_eq!(plan.meals.len(), 1);
    assert_eq!(plan.meals[0].recipe.id, "a");

    Ok(())
}

#[tokio::test]
async fn test_recent_window() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = helpers::setup_test_state(dir.child("db.sqlite3")).await?;
    helpers::create_recipes(&state, ["recent", "old", "other_user"], 30).await?;
    helpers::plan_meal(&state, "john", date!(2025 - 01 - 06), "dinner", "recent").await?;
    helpers::plan_meal(&state, "john", date!(2025 - 01 - 05), "dinner", "old").await?;
    helpers::plan_meal(&state, "albert", date!(2025 - 01 - 19), "dinner", "other_user").await?;

    let command = Command::new(state);
    let plan = command
        .generate(input(
            Some(&["Lunch", "Dinner"]),
            MealPreferences::default(),
            false,
        ))
        .await?;

    let ids = plan
        .meals
        .iter()
        .map(|m| m.recipe.id.as_str())
        .collect::<HashSet<_>>();
    assert_eq!(ids, HashSet::from(["old", "other_user"]));

    Ok(())
}

#[tokio::test]
async fn test_only_official_and_own_recipes() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = helpers::setup_test_state(dir.child("db.sqlite3")).await?;
    helpers::create_recipes(&state, ["official"], 30).await?;
    helpers::create_recipe(
        &state,
        RecipeInput {
            id: "mine",
            user_id: Some("john"),
            cook_time: 30,
            tags: &[],
        },
    )
    .await?;
    helpers::create_recipe(
        &state,
        RecipeInput {
            id: "theirs",
            user_id: Some("albert"),
            cook_time: 30,
            tags: &[],
        },
    )
    .await?;

    let command = Command::new(state);
    let plan = command
        .generate(input(
            Some(&["Lunch", "Dinner"]),
            MealPreferences::default(),
            false,
        ))
        .await?;

    let ids = plan
        .meals
        .iter()
        .map(|m| m.recipe.id.as_str())
        .collect::<HashSet<_>>();
    assert_eq!(ids, HashSet::from(["official", "mine"]));

    Ok(())
}

#[tokio::test]
async fn test_candidate_limit() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = helpers::setup_test_state(dir.child("db.sqlite3")).await?;
    helpers::create_recipes(&state, (0..10).map(|i| i.to_string()), 30).await?;

    let command = Command::with_settings(
        state,
        PlannerSettings {
            candidate_limit: 2,
            ..Default::default()
        },
    );
    let plan = command
        .generate(input(
            Some(&["Lunch", "Dinner"]),
            MealPreferences::default(),
            false,
        ))
        .await?;

    assert_eq!(plan.meals.len(), 2);

    Ok(())
}

#[tokio::test]
async fn test_ratings_drive_selection() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = helpers::setup_test_state(dir.child("db.sqlite3")).await?;
    helpers::create_recipes(&state, ["top", "good", "fine", "poor", "bad"], 45).await?;
    helpers::rate_recipe(&state, "top", "john", 5.0).await?;
    helpers::rate_recipe(&state, "top", "albert", 4.0).await?;
    helpers::rate_recipe(&state, "good", "john", 4.5).await?;
    helpers::rate_recipe(&state, "fine", "john", 3.9).await?;
    helpers::rate_recipe(&state, "poor", "john", 1.0).await?;
    helpers::rate_recipe(&state, "bad", "john", 0.5).await?;

    let command = Command::new(state);

    for _ in 0..20 {
        let plan = command
            .generate(input(Some(&["Dinner"]), MealPreferences::default(), false))
            .await?;

        assert_eq!(plan.meals.len(), 5);
        assert_eq!(plan.meals[0].date, date!(2025 - 01 - 20));
        assert!(["top", "good", "fine"].contains(&plan.meals[0].recipe.id.as_str()));
    }

    Ok(())
}

#[tokio::test]
async fn test_no_recipes_available() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = helpers::setup_test_state(dir.child("db.sqlite3")).await?;

    let command = Command::new(state);
    let err = command
        .generate(input(None, MealPreferences::default(), true))
        .await
        .unwrap_err();

    assert!(matches!(err, homeplate_shared::Error::User(_)));
    assert_eq!(err.to_string(), "no recipes available");

    Ok(())
}

#[tokio::test]
async fn test_save_replaces_week() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = helpers::setup_test_state(dir.child("db.sqlite3")).await?;
    helpers::create_recipes(&state, (0..20).map(|i| i.to_string()), 30).await?;

    let replaced = helpers::plan_meal(&state, "john", date!(2025 - 01 - 22), "lunch", "1").await?;
    let next_week = helpers::plan_meal(&state, "john", date!(2025 - 01 - 27), "lunch", "2").await?;
    let other_user = helpers::plan_meal(&state, "albert", date!(2025 - 01 - 22), "lunch", "3").await?;

    let command = Command::new(state.clone());
    let plan = command
        .generate(Generate {
            start: date!(2025 - 01 - 24),
            ..input(Some(&["Lunch", "Dinner"]), MealPreferences::default(), true)
        })
        .await?;

    assert_eq!(plan.start, date!(2025 - 01 - 20));
    assert_eq!(plan.meals.len(), 14);

    let john = helpers::planned_ids(&state, "john").await?;
    assert_eq!(john.len(), 15);
    assert!(!john.contains(&replaced));
    assert!(john.contains(&next_week));
    assert_eq!(helpers::planned_ids(&state, "albert").await?, vec![other_user]);

    let week = Query(state)
        .week("john", date!(2025 - 01 - 20), date!(2025 - 01 - 26))
        .await?;
    assert_eq!(week.len(), 14);
    assert_eq!(week[0].date, date!(2025 - 01 - 20));
    assert_eq!(week[0].moment.name, "Lunch");
    assert_eq!(week[1].moment.name, "Dinner");
    assert_eq!(week[13].date, date!(2025 - 01 - 26));

    Ok(())
}

#[tokio::test]
async fn test_preview_is_not_saved() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = helpers::setup_test_state(dir.child("db.sqlite3")).await?;
    helpers::create_recipes(&state, ["1", "2"], 30).await?;

    let command = Command::new(state.clone());
    let plan = command
        .generate(input(None, MealPreferences::default(), false))
        .await?;

    assert!(!plan.meals.is_empty());
    assert!(helpers::planned_ids(&state, "john").await?.is_empty());

    Ok(())
}
