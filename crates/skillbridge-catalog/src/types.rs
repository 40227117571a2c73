//! Wire types for the remote tool catalog.
//!
//! The catalog service returns capitalized field names (`Name`, `Actions`,
//! `DisplayName`) and, in places, loosely typed values — most notably the
//! `isAuthenticated` flag, which has been observed as both a boolean and the
//! strings `"True"`/`"False"`. These types normalize such quirks at the
//! deserialization boundary so the rest of the codebase works with clean
//! Rust values.

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

/// The full remote listing of tools and their actions.
///
/// Fetched fresh per session and never mutated locally.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Catalog {
    /// All integrations the platform currently offers.
    #[serde(default)]
    pub tools: Vec<Tool>,
}

/// A named external integration (e.g. a SaaS product).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tool {
    /// Unique tool name, the key for everything derived from this tool.
    #[serde(rename = "Name")]
    pub name: String,

    /// The invokable capabilities this tool exposes.
    #[serde(rename = "Actions", default)]
    pub actions: Vec<Action>,

    /// Authentication state and required scopes.
    #[serde(rename = "Authentication", default)]
    pub authentication: Authentication,
}

/// One invokable operation exposed by a tool.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Action {
    /// Raw identifier, unique within the owning tool.
    #[serde(rename = "Id")]
    pub id: String,

    /// Human-readable name for display.
    #[serde(rename = "DisplayName", default)]
    pub display_name: String,

    /// What the action does.
    #[serde(rename = "Description", default)]
    pub description: String,

    /// The typed input schema for invoking this action.
    #[serde(rename = "Signature", default)]
    pub signature: Signature,
}

/// An action's invocation signature.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Signature {
    /// The input parameter schema.
    #[serde(rename = "Input", default)]
    pub input: InputSchema,
}

/// The input parameter schema of an action.
///
/// Parameter order is meaningful: generated stubs list parameters in the
/// order the schema declares them, so the map preserves insertion order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InputSchema {
    /// Parameter name → declared type and description.
    #[serde(default)]
    pub properties: IndexMap<String, ParameterSpec>,
}

/// Declared type and description of a single input parameter.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ParameterSpec {
    /// The schema type string (`"string"`, `"integer"`, ...).
    #[serde(rename = "type", default)]
    pub schema_type: String,

    /// Human-readable parameter description.
    #[serde(default)]
    pub description: String,
}

// ---------------------------------------------------------------------------
// Authentication
// ---------------------------------------------------------------------------

/// Authentication descriptor attached to a tool.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Authentication {
    /// Whether the current user has already authenticated this tool.
    ///
    /// The wire value is sometimes the string `"True"`/`"False"` instead of
    /// a boolean. Coercion rule: `"False"`/`"false"`, boolean `false`,
    /// `null`, or an absent field all mean not authenticated; any other
    /// value means authenticated.
    #[serde(
        rename = "isAuthenticated",
        default,
        deserialize_with = "lenient_bool"
    )]
    pub is_authenticated: bool,

    /// OAuth scopes the tool requires.
    #[serde(rename = "Scopes", default)]
    pub scopes: Vec<String>,
}

/// Deserialize a boolean that may arrive as a bool, a string, or null.
fn lenient_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(coerce_bool(value.as_ref()))
}

/// The boundary coercion rule for the `isAuthenticated` flag.
pub(crate) fn coerce_bool(value: Option<&serde_json::Value>) -> bool {
    match value {
        None | Some(serde_json::Value::Null) => false,
        Some(serde_json::Value::Bool(b)) => *b,
        Some(serde_json::Value::String(s)) => {
            !s.is_empty() && !s.eq_ignore_ascii_case("false")
        }
        Some(_) => true,
    }
}

// ---------------------------------------------------------------------------
// Identify
// ---------------------------------------------------------------------------

/// Session credential returned by the identify call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionToken(pub String);

impl std::fmt::Display for SessionToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
