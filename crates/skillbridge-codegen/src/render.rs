//! Skill rendering — turns one action plus its normalized parameters into
//! a self-contained Python function stub.
//!
//! Rendering is a structured builder over four named fields (`method_url`,
//! `description`, `method_name`, `method_parameters`) rather than a
//! free-form text template, so identifier and escaping rules are enforced
//! before any text is produced. Output is deterministic: the same inputs
//! always yield byte-identical source.

use tracing::trace;

use crate::error::{CodegenError, Result};
use crate::normalize::{NormalizedParameter, PyType};
use crate::types::SkillDescriptor;
use skillbridge_catalog::Action;

// ---------------------------------------------------------------------------
// Template
// ---------------------------------------------------------------------------

/// The named fields a stub is rendered from.
#[derive(Debug, Clone)]
pub struct StubTemplate<'a> {
    /// URL the stub POSTs its parameters to.
    pub method_url: &'a str,

    /// Header text: the skill title on the first line, description after.
    pub description: &'a str,

    /// Python function name. Must be a valid identifier.
    pub method_name: &'a str,

    /// Ordered parameter list for the function signature.
    pub method_parameters: &'a [NormalizedParameter],
}

impl StubTemplate<'_> {
    /// Render the stub.
    ///
    /// # Errors
    ///
    /// Fails when `method_name` or any parameter name is not a valid
    /// Python identifier — emitting such a stub would produce a file that
    /// cannot be imported.
    pub fn render(&self) -> Result<String> {
        validate_identifier(self.method_name).map_err(|reason| CodegenError::Render {
            skill: self.method_name.to_owned(),
            reason,
        })?;
        for param in self.method_parameters {
            validate_identifier(&param.name).map_err(|reason| CodegenError::Render {
                skill: self.method_name.to_owned(),
                reason: format!("parameter `{}`: {reason}", param.name),
            })?;
        }

        let mut out = String::new();

        // Comment header: title and description, one `# ` prefix per line.
        for line in self.description.lines() {
            out.push_str("# ");
            out.push_str(line);
            out.push('\n');
        }
        if self
            .method_parameters
            .iter()
            .any(|p| p.py_type == PyType::Any)
        {
            out.push_str("from typing import Any\n");
        }
        out.push_str("import requests\n\n\n");

        // Signature.
        out.push_str("def ");
        out.push_str(self.method_name);
        out.push('(');
        for (i, param) in self.method_parameters.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            out.push_str(&param.name);
            out.push_str(": ");
            out.push_str(param.py_type.as_str());
        }
        out.push_str(") -> dict:\n");

        // Docstring with per-parameter descriptions.
        out.push_str("    \"\"\"Invoke the remote action.\n");
        if !self.method_parameters.is_empty() {
            out.push_str("\n    Args:\n");
            for param in self.method_parameters {
                out.push_str("        ");
                out.push_str(&param.name);
                out.push_str(" (");
                out.push_str(param.py_type.as_str());
                out.push_str("): ");
                out.push_str(&docstring_text(&param.description));
                out.push('\n');
            }
        }
        out.push_str("    \"\"\"\n");

        // Body: collect parameters and call the action endpoint.
        out.push_str("    payload = {");
        if self.method_parameters.is_empty() {
            out.push_str("}\n");
        } else {
            out.push('\n');
            for param in self.method_parameters {
                out.push_str("        \"");
                out.push_str(&param.name);
                out.push_str("\": ");
                out.push_str(&param.name);
                out.push_str(",\n");
            }
            out.push_str("    }\n");
        }
        out.push_str("    response = requests.post(\n        \"");
        out.push_str(self.method_url);
        out.push_str("\",\n        json=payload,\n    )\n");
        out.push_str("    response.raise_for_status()\n");
        out.push_str("    return response.json()\n");

        trace!(method = self.method_name, bytes = out.len(), "stub rendered");
        Ok(out)
    }
}

/// Render the full skill descriptor for one action of a tool.
pub fn render_skill(
    tool_name: &str,
    action: &Action,
    params: &[NormalizedParameter],
    method_url: &str,
) -> Result<SkillDescriptor> {
    let id = SkillDescriptor::compose_id(tool_name, &action.id);
    let title = SkillDescriptor::compose_title(tool_name, &action.display_name);
    let file_name = SkillDescriptor::compose_file_name(&id);

    let header = if action.description.is_empty() {
        title.clone()
    } else {
        format!("{title}\n{}", action.description)
    };

    let content = StubTemplate {
        method_url,
        description: &header,
        method_name: &action.id,
        method_parameters: params,
    }
    .render()
    .map_err(|err| match err {
        // Re-key the error on the composite skill id.
        CodegenError::Render { reason, .. } => CodegenError::Render {
            skill: id.clone(),
            reason,
        },
    })?;

    Ok(SkillDescriptor {
        id,
        title,
        description: action.description.clone(),
        file_name,
        content,
    })
}

// ---------------------------------------------------------------------------
// Escaping
// ---------------------------------------------------------------------------

/// Python keywords that cannot be used as function or parameter names.
const PYTHON_KEYWORDS: &[&str] = &[
    "False", "None", "True", "and", "as", "assert", "async", "await", "break", "class", "continue",
    "def", "del", "elif", "else", "except", "finally", "for", "from", "global", "if", "import",
    "in", "is", "lambda", "nonlocal", "not", "or", "pass", "raise", "return", "try", "while",
    "with", "yield",
];

/// Check that `name` is usable as a Python identifier.
fn validate_identifier(name: &str) -> std::result::Result<(), String> {
    let mut chars = name.chars();
    match chars.next() {
        None => return Err("empty identifier".to_owned()),
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        Some(c) => return Err(format!("identifier starts with `{c}`")),
    }
    if let Some(c) = chars.find(|c| !c.is_ascii_alphanumeric() && *c != '_') {
        return Err(format!("identifier contains `{c}`"));
    }
    if PYTHON_KEYWORDS.contains(&name) {
        return Err(format!("`{name}` is a Python keyword"));
    }
    Ok(())
}

/// Flatten free text into a single docstring-safe line.
fn docstring_text(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .replace('"', "'")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> Vec<NormalizedParameter> {
        vec![
            NormalizedParameter {
                name: "title".to_string(),
                py_type: PyType::Str,
                description: "Issue title".to_string(),
            },
            NormalizedParameter {
                name: "count".to_string(),
                py_type: PyType::Int,
                description: "How many".to_string(),
            },
        ]
    }

    fn template<'a>(params: &'a [NormalizedParameter]) -> StubTemplate<'a> {
        StubTemplate {
            method_url: "https://api.example.com/v1/actions/github/create_issue/execute",
            description: "github: Create Issue\nOpen a new issue",
            method_name: "create_issue",
            method_parameters: params,
        }
    }

    #[test]
    fn render_is_deterministic() {
        let params = params();
        let first = template(&params).render().unwrap();
        let second = template(&params).render().unwrap();
        assert_eq!(first, second, "same inputs must yield byte-identical output");
    }

    #[test]
    fn rendered_stub_has_expected_shape() {
        let params = params();
        let stub = template(&params).render().unwrap();

        assert!(stub.starts_with("# github: Create Issue\n# Open a new issue\n"));
        assert!(stub.contains("def create_issue(title: str, count: int) -> dict:"));
        assert!(stub.contains("title (str): Issue title"));
        assert!(stub.contains("\"title\": title,"));
        assert!(stub.contains(
            "\"https://api.example.com/v1/actions/github/create_issue/execute\""
        ));
        assert!(stub.ends_with("return response.json()\n"));
    }

    #[test]
    fn parameters_render_in_given_order() {
        let params = params();
        let stub = template(&params).render().unwrap();
        let title_pos = stub.find("title: str").unwrap();
        let count_pos = stub.find("count: int").unwrap();
        assert!(title_pos < count_pos);
    }

    #[test]
    fn empty_parameter_list_renders_empty_payload() {
        let stub = StubTemplate {
            method_url: "https://api.example.com/x",
            description: "t",
            method_name: "ping",
            method_parameters: &[],
        }
        .render()
        .unwrap();

        assert!(stub.contains("def ping() -> dict:"));
        assert!(stub.contains("payload = {}"));
    }

    #[test]
    fn any_parameter_pulls_in_typing_import() {
        let typed = params();
        let stub = template(&typed).render().unwrap();
        assert!(!stub.contains("from typing import Any"));

        let untyped = vec![NormalizedParameter {
            name: "blob".to_string(),
            py_type: PyType::Any,
            description: String::new(),
        }];
        let stub = template(&untyped).render().unwrap();
        assert!(stub.contains("from typing import Any\nimport requests"));
        assert!(stub.contains("def create_issue(blob: Any) -> dict:"));
    }

    #[test]
    fn invalid_method_name_fails_render() {
        let err = StubTemplate {
            method_url: "https://api.example.com/x",
            description: "t",
            method_name: "123-bad name",
            method_parameters: &[],
        }
        .render()
        .unwrap_err();

        let CodegenError::Render { reason, .. } = err;
        assert!(reason.contains("identifier"), "got: {reason}");
    }

    #[test]
    fn keyword_parameter_name_fails_render() {
        let params = vec![NormalizedParameter {
            name: "import".to_string(),
            py_type: PyType::Str,
            description: String::new(),
        }];
        let err = template(&params).render().unwrap_err();
        let CodegenError::Render { reason, .. } = err;
        assert!(reason.contains("keyword"), "got: {reason}");
    }

    #[test]
    fn docstring_text_is_escaped() {
        assert_eq!(docstring_text("line one\nline two"), "line one line two");
        assert_eq!(docstring_text(r#"say "hi""#), "say 'hi'");
    }

    #[test]
    fn render_skill_composes_descriptor() {
        let action = Action {
            id: "create_issue".to_string(),
            display_name: "Create Issue".to_string(),
            description: "Open a new issue".to_string(),
            signature: Default::default(),
        };
        let params = params();

        let skill = render_skill("github", &action, &params, "https://api.example.com/x").unwrap();

        assert_eq!(skill.id, "github-create_issue");
        assert_eq!(skill.title, "github: Create Issue");
        assert_eq!(skill.description, "Open a new issue");
        assert_eq!(skill.file_name, "github-create_issue.py");
        assert!(skill.content.contains("def create_issue"));
    }

    #[test]
    fn render_skill_error_uses_composite_id() {
        let action = Action {
            id: "not valid".to_string(),
            display_name: "Broken".to_string(),
            description: String::new(),
            signature: Default::default(),
        };

        let err = render_skill("github", &action, &[], "https://api.example.com/x").unwrap_err();
        let CodegenError::Render { skill, .. } = err;
        assert_eq!(skill, "github-not valid");
    }
}
