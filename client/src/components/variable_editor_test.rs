use super::*;

#[test]
fn kind_from_value_maps_select_options() {
    assert_eq!(kind_from_value("discrete"), VariableKind::Discrete);
    assert_eq!(kind_from_value("continuous"), VariableKind::Continuous);
}

#[test]
fn kind_from_value_defaults_to_continuous() {
    assert_eq!(kind_from_value(""), VariableKind::Continuous);
}
