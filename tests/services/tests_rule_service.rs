//! RuleService tests: rule evaluation and role recommendation.

use rstest::rstest;
use sigdoc::Error;
use sigdoc::services::{derive_roles_recommendation, evaluate_rule, is_rule_valid};
use sigdoc::structure::{Numerus, ThematicGrid, ThematicRole};

use crate::helpers::catalog_fixtures::*;
use crate::helpers::tree_fixtures::*;

fn names(roles: &[ThematicRole]) -> Vec<&str> {
    roles.iter().map(|r| r.name.as_str()).collect()
}

// =============================================================================
// EVALUATE RULE
// =============================================================================

#[test]
fn test_evaluate_rule_sees_operation_context() {
    let mut f = customer_service();
    tag(&mut f.tree, f.customer, "OBJECT", Numerus::Plural);

    let role = object_role();
    // evaluated at a leaf, the rule still sees the whole operation
    assert!(!evaluate_rule(r#"isSingular("OBJECT")"#, &role, &f.tree, f.customer_id).unwrap());
    assert!(evaluate_rule("isPlural(role)", &role, &f.tree, f.customer_id).unwrap());
    assert!(evaluate_rule("isPredicate('find')", &role, &f.tree, f.operation).unwrap());
}

#[rstest]
#[case::empty("")]
#[case::blank("  \t")]
fn test_evaluate_rule_rejects_blank_expressions(#[case] expression: &str) {
    let f = customer_service();
    let err = evaluate_rule(expression, &object_role(), &f.tree, f.operation).unwrap_err();
    assert!(matches!(err, Error::InvalidArgument(_)));
}

#[test]
fn test_evaluate_rule_rejects_unknown_node() {
    let f = customer_service();
    let err = evaluate_rule("always()", &object_role(), &f.tree, sigdoc::NodeIdx(999)).unwrap_err();
    assert!(matches!(err, Error::InvalidArgument(_)));
}

#[test]
fn test_evaluate_rule_surfaces_compile_errors() {
    let f = customer_service();
    let err = evaluate_rule("isSingular(", &object_role(), &f.tree, f.operation).unwrap_err();
    match err {
        Error::RuleEvaluation { rule, source } => {
            assert_eq!(rule, "isSingular(");
            assert!(source.message.contains("end of rule"));
        }
        other => panic!("expected a rule evaluation error, got {other:?}"),
    }
}

#[rstest]
#[case("always()", true)]
#[case("def();", true)]
#[case(r#"exists("SOURCE") || hasAttributes(role.name)"#, true)]
#[case("exists(SOURCE)", false)]
#[case("return true;", false)]
#[case("", false)]
fn test_is_rule_valid(#[case] expression: &str, #[case] valid: bool) {
    assert_eq!(is_rule_valid(expression), valid);
}

// =============================================================================
// DERIVE ROLES RECOMMENDATION
// =============================================================================

#[test]
fn test_singular_object_is_recommended() {
    let mut f = customer_service();
    tag(&mut f.tree, f.output_id, "OBJECT", Numerus::Singular);
    let grids = vec![ThematicGrid::new("Searching Operations")
        .with_verbs(["find"])
        .with_role(object_role(), true)];

    let recommendations = derive_roles_recommendation(&grids, &f.tree, f.operation).unwrap();

    assert_eq!(names(recommendations.first_level()), vec!["OBJECT"]);
    assert!(recommendations.second_level().is_empty());
}

#[test]
fn test_role_based_phase_partitions_all_roles() {
    let mut f = customer_service();
    tag(&mut f.tree, f.customer, "OBJECT", Numerus::Plural);
    let grids = vec![searching_grid(), finder_grid()];

    let recommendations = derive_roles_recommendation(&grids, &f.tree, f.customer_id).unwrap();

    // no unambiguous grid: two candidates and no pinned grid name
    assert_eq!(names(recommendations.first_level()), vec!["AGENT"]);
    assert_eq!(names(recommendations.second_level()), vec!["OBJECT", "SOURCE"]);
}

#[test]
fn test_partition_is_complete_and_disjoint() {
    let mut f = customer_service();
    tag(&mut f.tree, f.customer, "SOURCE", Numerus::Singular);
    let grids = vec![searching_grid(), finder_grid()];

    let recommendations = derive_roles_recommendation(&grids, &f.tree, f.operation).unwrap();
    let (first, second) = recommendations.into_parts();

    let mut all: Vec<_> = first.iter().chain(&second).map(|r| r.name.clone()).collect();
    all.sort();
    assert_eq!(all, vec!["AGENT", "OBJECT", "SOURCE"]);
    assert!(first.iter().all(|r| !second.contains(r)));
}

#[test]
fn test_single_grid_rule_applies_unconditionally() {
    let f = customer_service();
    let grid = searching_grid().with_grid_rule("false");

    let recommendations = derive_roles_recommendation([&grid], &f.tree, f.operation).unwrap();

    assert!(recommendations.first_level().is_empty());
    assert_eq!(names(recommendations.second_level()), vec!["AGENT", "OBJECT", "SOURCE"]);
}

#[test]
fn test_pinned_grid_selects_unambiguous_grid() {
    let mut f = customer_service();
    f.tree
        .element_mut(f.operation)
        .unwrap()
        .set_thematic_grid_name(Some("Finder".to_string()));
    let grids = vec![searching_grid(), finder_grid()];

    let recommendations = derive_roles_recommendation(&grids, &f.tree, f.operation).unwrap();

    // Finder's AGENT override needs attributes; nothing is tagged AGENT
    assert_eq!(names(recommendations.first_level()), vec!["OBJECT"]);
    assert_eq!(names(recommendations.second_level()), vec!["AGENT", "SOURCE"]);
}

#[test]
fn test_first_grid_with_pinned_name_wins() {
    let mut f = customer_service();
    f.tree
        .element_mut(f.operation)
        .unwrap()
        .set_thematic_grid_name(Some("Finder".to_string()));
    let lenient = ThematicGrid::new("Finder")
        .with_verbs(["find"])
        .with_role(object_role(), true)
        .with_role(agent_role(), false)
        .with_grid_rule("always()");
    let grids = vec![searching_grid(), finder_grid(), lenient];

    let recommendations = derive_roles_recommendation(&grids, &f.tree, f.operation).unwrap();

    // the earlier Finder grid decides, not the last one with that name;
    // a last-wins lookup would keep AGENT recommended through `lenient`
    assert!(recommendations.is_optional("AGENT"));
    assert!(recommendations.is_recommended("OBJECT"));
}

#[test]
fn test_role_missing_from_unambiguous_grid_is_demoted() {
    let mut f = customer_service();
    tag(&mut f.tree, f.customer, "SOURCE", Numerus::Singular);
    f.tree
        .element_mut(f.operation)
        .unwrap()
        .set_thematic_grid_name(Some("Finder".to_string()));
    let grids = vec![searching_grid(), finder_grid()];

    let recommendations = derive_roles_recommendation(&grids, &f.tree, f.operation).unwrap();

    assert!(recommendations.is_optional("SOURCE"));
    assert!(recommendations.is_recommended("OBJECT"));
}

#[test]
fn test_grid_without_rule_keeps_recommendation() {
    let f = customer_service();
    let grid = ThematicGrid::new("Plain")
        .with_verbs(["find"])
        .with_role(agent_role(), false);

    let recommendations = derive_roles_recommendation([&grid], &f.tree, f.operation).unwrap();
    assert_eq!(names(recommendations.first_level()), vec!["AGENT"]);
}

#[test]
fn test_missing_role_based_rule_is_fatal() {
    let f = customer_service();
    let grid = searching_grid().with_role(ThematicRole::new("INSTRUMENT"), false);

    let err = derive_roles_recommendation([&grid], &f.tree, f.operation).unwrap_err();

    assert!(matches!(&err, Error::MissingRoleBasedRule { role } if role == "INSTRUMENT"));
    assert!(err.is_fatal());
}

#[test]
fn test_broken_role_rule_fails_derivation() {
    let f = customer_service();
    let grid = ThematicGrid::new("Broken")
        .with_role(ThematicRole::new("OBJECT").with_rule("isSingular(OBJECT)"), true);

    let err = derive_roles_recommendation([&grid], &f.tree, f.operation).unwrap_err();
    assert!(matches!(err, Error::RuleEvaluation { .. }));
    assert!(!err.is_fatal());
}

#[test]
fn test_equal_role_names_are_evaluated_once() {
    let f = customer_service();
    let always = ThematicRole::new("OBJECT").with_rule("always()");
    let never = ThematicRole::new("OBJECT").with_rule("false");
    let grids = vec![
        ThematicGrid::new("First").with_role(always, true),
        ThematicGrid::new("Second").with_role(never, true),
    ];

    let recommendations = derive_roles_recommendation(&grids, &f.tree, f.operation).unwrap();

    // the first definition of a role name wins
    assert_eq!(names(recommendations.first_level()), vec!["OBJECT"]);
    assert!(recommendations.second_level().is_empty());
}

#[test]
fn test_element_outside_operation_sees_no_roles() {
    let f = customer_service();
    let grid = ThematicGrid::new("Searching Operations")
        .with_role(source_role(), false)
        .with_grid_rule("always()");

    let recommendations = derive_roles_recommendation([&grid], &f.tree, f.interface).unwrap();
    assert_eq!(names(recommendations.second_level()), vec!["SOURCE"]);
}
