use super::*;

// =============================================================
// Goal / VariableKind
// =============================================================

#[test]
fn goal_serializes_lowercase() {
    assert_eq!(serde_json::to_value(Goal::Minimize).unwrap(), serde_json::json!("minimize"));
    assert_eq!(serde_json::to_value(Goal::Maximize).unwrap(), serde_json::json!("maximize"));
}

#[test]
fn goal_parses_short_and_long_forms() {
    assert_eq!("minimize".parse::<Goal>().unwrap(), Goal::Minimize);
    assert_eq!(" MAX ".parse::<Goal>().unwrap(), Goal::Maximize);
    assert!("sideways".parse::<Goal>().is_err());
}

#[test]
fn variable_kind_uses_type_key_on_the_wire() {
    let variable = Variable {
        name: "x".to_owned(),
        kind: VariableKind::Discrete,
        custom_values: vec!["a".to_owned()],
        ..Variable::default()
    };
    let json = serde_json::to_value(&variable).unwrap();
    assert_eq!(json["type"], "discrete");
    assert_eq!(json["customValues"], serde_json::json!(["a"]));
    assert!(json.get("intervalSize").is_none());
}

// =============================================================
// Variable decoding
// =============================================================

#[test]
fn variable_accepts_numeric_bounds() {
    let variable: Variable =
        serde_json::from_value(serde_json::json!({ "name": "x", "min": 0, "max": 2.5, "type": "continuous" })).unwrap();
    assert_eq!(variable.min, "0");
    assert_eq!(variable.max, "2.5");
    assert!(variable.custom_values.is_empty());
    assert_eq!(variable.interval_size, None);
}

#[test]
fn variable_accepts_comma_separated_custom_values() {
    let variable: Variable =
        serde_json::from_value(serde_json::json!({ "name": "c", "type": "discrete", "customValues": "red, blue" }))
            .unwrap();
    assert_eq!(variable.custom_values, vec!["red", "blue"]);
}

#[test]
fn variable_rejects_object_bounds() {
    let result = serde_json::from_value::<Variable>(serde_json::json!({ "min": { "v": 1 } }));
    assert!(result.is_err());
}

// =============================================================
// VariableSpec
// =============================================================

#[test]
fn continuous_spec_renders_numbers_without_trailing_zero() {
    let spec = VariableSpec::Continuous { name: "x".to_owned(), min: 0.0, max: 10.0, interval: Some(0.5) };
    let wire = spec.to_wire();
    assert_eq!(wire.min, "0");
    assert_eq!(wire.max, "10");
    assert_eq!(wire.interval_size.as_deref(), Some("0.5"));
    assert_eq!(wire.kind, VariableKind::Continuous);
    assert!(wire.custom_values.is_empty());
}

#[test]
fn discrete_spec_leaves_missing_bounds_empty() {
    let spec = VariableSpec::Discrete {
        name: "catalyst".to_owned(),
        values: vec!["Pd".to_owned(), "Pt".to_owned()],
        min: None,
        max: Some(3.0),
    };
    let wire = spec.to_wire();
    assert_eq!(wire.min, "");
    assert_eq!(wire.max, "3");
    assert_eq!(wire.custom_values, vec!["Pd", "Pt"]);
    assert_eq!(wire.interval_size, None);
    assert_eq!(spec.name(), "catalyst");
}

// =============================================================
// Population
// =============================================================

#[test]
fn empty_population_passes_any_shape_check() {
    let population = Population::default();
    assert_eq!(population.columns(), None);
    assert!(population.check_shape(Some(3)).is_ok());
}

#[test]
fn ragged_population_is_rejected() {
    let population = Population::new(vec![vec![1.0, 2.0], vec![3.0]]);
    assert_eq!(
        population.check_shape(None),
        Err(ShapeError::Ragged { row: 1, expected: 2, found: 1 })
    );
}

#[test]
fn population_width_must_match_variable_count() {
    let population = Population::new(vec![vec![1.0], vec![2.0]]);
    assert!(population.check_shape(Some(1)).is_ok());
    assert_eq!(
        population.check_shape(Some(2)),
        Err(ShapeError::ColumnMismatch { expected: 2, found: 1 })
    );
}

// =============================================================
// Experiment decoding
// =============================================================

#[test]
fn experiment_fills_defaults_for_missing_fields() {
    let experiment: Experiment = serde_json::from_value(serde_json::json!({})).unwrap();
    assert_eq!(experiment.experiment_name, UNNAMED_EXPERIMENT);
    assert_eq!(experiment.experiment_id, "");
    assert_eq!(experiment.population_size, 0);
    assert!(experiment.variables.is_empty());
    assert!(experiment.population.is_empty());
    assert_eq!(experiment.goal_label(), "No goal specified");
}

#[test]
fn experiment_accepts_string_population_size_and_null_population() {
    let experiment: Experiment = serde_json::from_value(serde_json::json!({
        "experimentId": "e-1",
        "userId": "u-1",
        "experimentName": "E1",
        "goal": "maximize",
        "populationSize": "12",
        "variables": null,
        "population": null
    }))
    .unwrap();
    assert_eq!(experiment.population_size, 12);
    assert_eq!(experiment.goal, Some(Goal::Maximize));
    assert!(experiment.population.is_empty());
}

#[test]
fn experiment_treats_unknown_goal_as_unspecified() {
    let experiment: Experiment =
        serde_json::from_value(serde_json::json!({ "goal": "No goal specified" })).unwrap();
    assert_eq!(experiment.goal, None);
}

#[test]
fn experiment_rejects_negative_population_size() {
    let result = serde_json::from_value::<Experiment>(serde_json::json!({ "populationSize": -3 }));
    assert!(result.is_err());
}

#[test]
fn column_labels_fall_back_for_unnamed_and_extra_columns() {
    let experiment = Experiment {
        experiment_id: "e".to_owned(),
        user_id: "u".to_owned(),
        experiment_name: "E".to_owned(),
        goal: Some(Goal::Minimize),
        population_size: 2,
        variables: vec![Variable { name: "temp".to_owned(), ..Variable::default() }, Variable::default()],
        population: Population::new(vec![vec![1.0, 2.0, 3.0]]),
    };
    assert_eq!(experiment.column_labels(), vec!["temp", "Variable 2", "Variable 3"]);
    assert!(!experiment.exceeds_population_size());
}

// =============================================================
// Request / response bodies
// =============================================================

#[test]
fn new_experiment_serializes_camel_case_with_empty_population() {
    let body = NewExperiment {
        user_id: "u-1".to_owned(),
        experiment_name: "E1".to_owned(),
        variables: Vec::new(),
        goal: Goal::Minimize,
        population_size: 2,
        population: Population::default(),
    };
    assert_eq!(
        serde_json::to_value(&body).unwrap(),
        serde_json::json!({
            "userId": "u-1",
            "experimentName": "E1",
            "variables": [],
            "goal": "minimize",
            "populationSize": 2,
            "population": []
        })
    );
}

#[test]
fn advance_request_serializes_population_and_scores() {
    let body = AdvanceRequest {
        population: Population::new(vec![vec![1.0], vec![2.0]]),
        fitness_scores: vec![3.5, 2.1],
    };
    assert_eq!(
        serde_json::to_value(&body).unwrap(),
        serde_json::json!({ "population": [[1.0], [2.0]], "fitnessScores": [3.5, 2.1] })
    );
}

#[test]
fn advance_response_requires_flat_population() {
    let flat: AdvanceResponse = serde_json::from_value(serde_json::json!({ "population": [[0.5]] })).unwrap();
    assert_eq!(flat.population.rows(), &[vec![0.5]]);
    assert_eq!(flat.fitness_scores, None);

    let wrapped = serde_json::from_value::<AdvanceResponse>(serde_json::json!({
        "experiment": { "population": [[0.5]] }
    }));
    assert!(wrapped.is_err());
}

#[test]
fn advance_response_accepts_null_scores() {
    let next: AdvanceResponse = serde_json::from_value(serde_json::json!({
        "population": [[7.0], [8.0]],
        "fitnessScores": [null, 0.5]
    }))
    .unwrap();
    assert_eq!(next.fitness_scores, Some(vec![None, Some(0.5)]));
    assert_eq!(next.complete_scores(), None);
}
