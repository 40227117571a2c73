//! The generated-skill artifact type.

use serde::{Deserialize, Serialize};

/// Separator between the tool name and the action id in a skill id.
///
/// Tool names are unique across the catalog and action ids are unique
/// within their tool, so the joined id is globally unique.
pub const ID_SEPARATOR: char = '-';

/// The generated, persistable artifact for one action.
///
/// Created by the renderer from exactly one action; immutable once
/// created. Its terminal state is hand-off to the skill store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillDescriptor {
    /// Globally unique composite id: `{tool_name}-{action_id}`.
    pub id: String,

    /// Display title: `{tool_name}: {display_name}`.
    pub title: String,

    /// The action's description, carried through unchanged.
    pub description: String,

    /// File name the skill is installed under: `{id}.py`.
    pub file_name: String,

    /// The rendered Python source.
    pub content: String,
}

impl SkillDescriptor {
    /// Compose the globally unique skill id for a tool/action pair.
    pub fn compose_id(tool_name: &str, action_id: &str) -> String {
        format!("{tool_name}{ID_SEPARATOR}{action_id}")
    }

    /// Compose the display title for a tool/action pair.
    pub fn compose_title(tool_name: &str, display_name: &str) -> String {
        format!("{tool_name}: {display_name}")
    }

    /// The file name a skill with the given id is installed under.
    pub fn compose_file_name(id: &str) -> String {
        format!("{id}.py")
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_composition() {
        assert_eq!(
            SkillDescriptor::compose_id("github", "github_create_issue"),
            "github-github_create_issue"
        );
    }

    #[test]
    fn title_composition() {
        assert_eq!(
            SkillDescriptor::compose_title("github", "Create Issue"),
            "github: Create Issue"
        );
    }

    #[test]
    fn file_name_composition() {
        assert_eq!(
            SkillDescriptor::compose_file_name("github-github_create_issue"),
            "github-github_create_issue.py"
        );
    }
}
