//! Thematic grid lookup tests.

use rstest::rstest;
use sigdoc::services::{collect_thematic_roles, derive_thematic_grid, find_matching_grids};
use sigdoc::structure::ThematicRole;

use crate::helpers::catalog_fixtures::*;

#[test]
fn test_find_customer_by_name_derives_find_grids() {
    let grids = vec![searching_grid(), finder_grid()];
    let derived = derive_thematic_grid("findCustomerByName", &grids);

    assert_eq!(derived.len(), 2);
    let roles = &derived["Searching Operations"];
    assert!(roles[&ThematicRole::new("OBJECT")]);
    assert!(!roles[&ThematicRole::new("SOURCE")]);
}

#[rstest]
#[case::camel("searchOrders", vec!["Searching Operations"])]
#[case::underscore("find_all", vec!["Searching Operations", "Finder"])]
#[case::capitalized("FindAll", vec!["Searching Operations", "Finder"])]
#[case::unknown_verb("deleteOrder", vec![])]
#[case::empty("", vec![])]
fn test_find_matching_grids(#[case] identifier: &str, #[case] expected: Vec<&str>) {
    let grids = vec![searching_grid(), finder_grid()];
    let names: Vec<_> = find_matching_grids(identifier, &grids)
        .into_iter()
        .map(|grid| grid.name.as_str())
        .collect();
    assert_eq!(names, expected);
}

#[test]
fn test_collect_thematic_roles_unions_by_name() {
    let grids = vec![searching_grid(), finder_grid()];
    let mut roles = Vec::new();
    collect_thematic_roles(&grids, &mut roles);

    let names: Vec<_> = roles.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["OBJECT", "SOURCE", "AGENT"]);
}
