use super::*;

fn draft(name: &str, min: &str, max: &str) -> VariableDraft {
    VariableDraft { name: name.to_owned(), min: min.to_owned(), max: max.to_owned(), ..VariableDraft::default() }
}

// =============================================================
// Editor
// =============================================================

#[test]
fn single_field_edits_leave_other_fields_untouched() {
    let base = VariableDraft {
        name: "x".to_owned(),
        min: "0".to_owned(),
        max: "10".to_owned(),
        kind: VariableKind::Discrete,
        custom_values: vec!["a".to_owned()],
        interval_size: "0.5".to_owned(),
    };

    let renamed = base.apply(VariableEdit::Name("y".to_owned()));
    assert_eq!(renamed, VariableDraft { name: "y".to_owned(), ..base.clone() });

    let widened = base.apply(VariableEdit::Max("20".to_owned()));
    assert_eq!(widened, VariableDraft { max: "20".to_owned(), ..base.clone() });

    let stepped = base.apply(VariableEdit::IntervalSize("1".to_owned()));
    assert_eq!(stepped, VariableDraft { interval_size: "1".to_owned(), ..base.clone() });
}

#[test]
fn switching_kind_keeps_other_kind_fields() {
    let base = draft("x", "0", "1").apply(VariableEdit::IntervalSize("0.1".to_owned()));
    let discrete = base.apply(VariableEdit::Kind(VariableKind::Discrete));
    assert_eq!(discrete.interval_size, "0.1");

    let with_values = discrete.apply(VariableEdit::CustomValues("a, b".to_owned()));
    let back = with_values.apply(VariableEdit::Kind(VariableKind::Continuous));
    assert_eq!(back.custom_values, vec!["a", "b"]);
    assert_eq!(back.interval_size, "0.1");
}

#[test]
fn custom_values_split_on_commas_and_trim() {
    assert_eq!(split_custom_values(" red , green,blue "), vec!["red", "green", "blue"]);
    assert!(split_custom_values("   ").is_empty());
    let draft = VariableDraft::default().apply(VariableEdit::CustomValues("a,b".to_owned()));
    assert_eq!(draft.custom_values_text(), "a, b");
}

#[test]
fn draft_from_wire_copies_stored_strings() {
    let variable = Variable {
        name: "rate".to_owned(),
        min: "0.1".to_owned(),
        max: "0.9".to_owned(),
        interval_size: Some("0.1".to_owned()),
        ..Variable::default()
    };
    let draft = VariableDraft::from_wire(&variable);
    assert_eq!(draft.interval_size, "0.1");
    assert_eq!(draft.kind, VariableKind::Continuous);
}

// =============================================================
// Parsing
// =============================================================

#[test]
fn continuous_draft_parses_bounds_and_interval() {
    let spec = draft(" x ", "0", "10")
        .apply(VariableEdit::IntervalSize("0.5".to_owned()))
        .parse(0)
        .unwrap();
    assert_eq!(
        spec,
        VariableSpec::Continuous { name: "x".to_owned(), min: 0.0, max: 10.0, interval: Some(0.5) }
    );
}

#[test]
fn continuous_draft_reports_every_problem() {
    let errors = draft("", "abc", "").parse(2).unwrap_err();
    assert_eq!(
        errors,
        vec![
            FormError::UnnamedVariable { position: 3 },
            FormError::InvalidBound { position: 3, bound: Bound::Min },
            FormError::InvalidBound { position: 3, bound: Bound::Max },
        ]
    );
}

#[test]
fn continuous_draft_rejects_inverted_bounds_and_bad_interval() {
    let errors = draft("x", "5", "1")
        .apply(VariableEdit::IntervalSize("0".to_owned()))
        .parse(0)
        .unwrap_err();
    assert_eq!(
        errors,
        vec![FormError::InvertedBounds { position: 1 }, FormError::InvalidInterval { position: 1 }]
    );
    assert!(draft("x", "NaN", "1").parse(0).is_err());
    assert!(draft("x", "1", "inf").parse(0).is_err());
}

#[test]
fn equal_bounds_are_accepted() {
    assert!(draft("x", "2", "2").parse(0).is_ok());
}

#[test]
fn discrete_draft_uses_values_and_optional_bounds() {
    let spec = draft("color", "", "")
        .apply(VariableEdit::Kind(VariableKind::Discrete))
        .apply(VariableEdit::CustomValues("red, ,blue".to_owned()))
        .parse(0)
        .unwrap();
    assert_eq!(
        spec,
        VariableSpec::Discrete {
            name: "color".to_owned(),
            values: vec!["red".to_owned(), "blue".to_owned()],
            min: None,
            max: None,
        }
    );
}

#[test]
fn discrete_draft_needs_values_and_parseable_bounds() {
    let errors = draft("color", "low", "")
        .apply(VariableEdit::Kind(VariableKind::Discrete))
        .parse(0)
        .unwrap_err();
    assert_eq!(
        errors,
        vec![
            FormError::NoDiscreteValues { position: 1 },
            FormError::InvalidBound { position: 1, bound: Bound::Min },
        ]
    );
}

// =============================================================
// Collection
// =============================================================

#[test]
fn add_appends_default_continuous_draft() {
    let mut collection = VariableCollection::new();
    collection.add();
    assert_eq!(collection.len(), 1);
    assert_eq!(collection.get(0), Some(&VariableDraft::default()));
    assert_eq!(collection.get(0).unwrap().kind, VariableKind::Continuous);
}

#[test]
fn add_then_remove_restores_previous_list() {
    let mut collection: VariableCollection = [draft("a", "0", "1"), draft("b", "0", "1")].into_iter().collect();
    let before = collection.clone();
    collection.add();
    collection.remove(collection.len() - 1);
    assert_eq!(collection, before);
}

#[test]
fn remove_keeps_relative_order_and_ignores_out_of_range() {
    let mut collection: VariableCollection =
        [draft("a", "", ""), draft("b", "", ""), draft("c", "", "")].into_iter().collect();
    assert_eq!(collection.remove(1).map(|d| d.name), Some("b".to_owned()));
    assert_eq!(collection.remove(7), None);
    let names: Vec<&str> = collection.iter().map(|d| d.name.as_str()).collect();
    assert_eq!(names, ["a", "c"]);
}

#[test]
fn update_replaces_exactly_one_entry() {
    let mut collection: VariableCollection = [draft("a", "", ""), draft("b", "", "")].into_iter().collect();
    assert!(collection.update(1, VariableEdit::Min("3".to_owned())));
    assert_eq!(collection.get(0), Some(&draft("a", "", "")));
    assert_eq!(collection.get(1), Some(&draft("b", "3", "")));
    assert!(!collection.update(5, VariableEdit::Min("3".to_owned())));
}

#[test]
fn parse_all_requires_a_variable() {
    assert_eq!(VariableCollection::new().parse_all(), Err(vec![FormError::NoVariables]));
}

#[test]
fn parse_all_preserves_count_and_order() {
    let collection: VariableCollection = [draft("a", "0", "1"), draft("b", "2", "3")].into_iter().collect();
    let specs = collection.parse_all().unwrap();
    assert_eq!(specs.len(), collection.len());
    assert_eq!(specs[1].name(), "b");
}

#[test]
fn parse_all_collects_errors_across_drafts() {
    let collection: VariableCollection = [draft("", "0", "1"), draft("b", "x", "3")].into_iter().collect();
    let errors = collection.parse_all().unwrap_err();
    assert_eq!(
        errors,
        vec![
            FormError::UnnamedVariable { position: 1 },
            FormError::InvalidBound { position: 2, bound: Bound::Min },
        ]
    );
}
