//! Thematic roles and grids used across service tests.

use sigdoc::structure::{ThematicGrid, ThematicRole};

pub fn object_role() -> ThematicRole {
    ThematicRole::new("OBJECT").with_rule(r#"isSingular("OBJECT")"#)
}

pub fn source_role() -> ThematicRole {
    ThematicRole::new("SOURCE").with_rule(r#"exists("SOURCE")"#)
}

pub fn agent_role() -> ThematicRole {
    ThematicRole::new("AGENT").with_rule("always()")
}

/// Verbs `find` and `search`, roles OBJECT (mandatory), SOURCE and AGENT.
pub fn searching_grid() -> ThematicGrid {
    ThematicGrid::new("Searching Operations")
        .with_verbs(["find", "search"])
        .with_role(object_role(), true)
        .with_role(source_role(), false)
        .with_role(agent_role(), false)
        .with_grid_rule("always()")
}

/// Verb `find`, roles OBJECT and AGENT; AGENT only with attributes.
pub fn finder_grid() -> ThematicGrid {
    ThematicGrid::new("Finder")
        .with_verbs(["find"])
        .with_role(object_role(), true)
        .with_role(agent_role(), false)
        .with_role_rule("AGENT", r#"hasAttributes("AGENT")"#)
}
