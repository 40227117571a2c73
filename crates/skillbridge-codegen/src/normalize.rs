//! Signature normalization — maps the catalog's JSON type vocabulary onto
//! Python type names for generated stubs.
//!
//! The mapping is total: unrecognized schema types become `Any` instead of
//! failing, so a catalog entry with a novel type still produces a usable
//! stub. Normalization never fails.

use serde::{Deserialize, Serialize};
use skillbridge_catalog::InputSchema;

// ---------------------------------------------------------------------------
// Target types
// ---------------------------------------------------------------------------

/// Python type name used in a generated stub's parameter annotations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PyType {
    /// `str`
    Str,
    /// `int`
    Int,
    /// `float`
    Float,
    /// `bool`
    Bool,
    /// `dict`
    Dict,
    /// `list`
    List,
    /// `Any` — fallback for unknown schema types.
    Any,
}

impl PyType {
    /// Map a declared JSON schema type string onto a Python type.
    ///
    /// Total: anything not in the table maps to [`PyType::Any`].
    pub fn from_schema_type(schema_type: &str) -> Self {
        match schema_type {
            "string" => Self::Str,
            "integer" => Self::Int,
            "number" => Self::Float,
            "boolean" => Self::Bool,
            "object" => Self::Dict,
            "array" => Self::List,
            _ => Self::Any,
        }
    }

    /// The annotation text emitted into generated code.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Str => "str",
            Self::Int => "int",
            Self::Float => "float",
            Self::Bool => "bool",
            Self::Dict => "dict",
            Self::List => "list",
            Self::Any => "Any",
        }
    }
}

impl std::fmt::Display for PyType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Normalization
// ---------------------------------------------------------------------------

/// One normalized input parameter of an action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedParameter {
    /// The parameter name as declared by the schema.
    pub name: String,

    /// The Python type the stub annotates this parameter with.
    pub py_type: PyType,

    /// Human-readable description from the schema.
    pub description: String,
}

/// Normalize an action's input schema into an ordered parameter list.
///
/// Output order equals the schema's declaration order.
pub fn normalize(schema: &InputSchema) -> Vec<NormalizedParameter> {
    schema
        .properties
        .iter()
        .map(|(name, spec)| NormalizedParameter {
            name: name.clone(),
            py_type: PyType::from_schema_type(&spec.schema_type),
            description: spec.description.clone(),
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use skillbridge_catalog::ParameterSpec;

    fn schema(entries: &[(&str, &str)]) -> InputSchema {
        let mut properties = indexmap::IndexMap::new();
        for (name, ty) in entries {
            properties.insert(
                name.to_string(),
                ParameterSpec {
                    schema_type: ty.to_string(),
                    description: format!("the {name} parameter"),
                },
            );
        }
        InputSchema { properties }
    }

    #[test]
    fn known_types_map_to_python_primitives() {
        assert_eq!(PyType::from_schema_type("string"), PyType::Str);
        assert_eq!(PyType::from_schema_type("integer"), PyType::Int);
        assert_eq!(PyType::from_schema_type("number"), PyType::Float);
        assert_eq!(PyType::from_schema_type("boolean"), PyType::Bool);
        assert_eq!(PyType::from_schema_type("object"), PyType::Dict);
        assert_eq!(PyType::from_schema_type("array"), PyType::List);
    }

    #[test]
    fn unknown_type_falls_back_to_any() {
        assert_eq!(PyType::from_schema_type("unsupported_type"), PyType::Any);
        assert_eq!(PyType::from_schema_type(""), PyType::Any);
        assert_eq!(PyType::from_schema_type("String"), PyType::Any);
    }

    #[test]
    fn mapping_is_total_over_arbitrary_junk() {
        // Whatever the catalog declares, normalization lands on one of the
        // seven target types and never panics.
        for junk in ["", "nil", "uuid", "date-time", "STRING", "int64", "???"] {
            let ty = PyType::from_schema_type(junk);
            assert!(!ty.as_str().is_empty());
        }
    }

    #[test]
    fn normalize_preserves_declaration_order() {
        let params = normalize(&schema(&[("b", "string"), ("a", "integer")]));
        let names: Vec<&str> = params.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["b", "a"]);
    }

    #[test]
    fn normalize_maps_each_entry() {
        let params = normalize(&schema(&[("title", "string"), ("count", "integer")]));
        assert_eq!(params.len(), 2);
        assert_eq!(params[0].py_type, PyType::Str);
        assert_eq!(params[0].description, "the title parameter");
        assert_eq!(params[1].py_type, PyType::Int);
    }

    #[test]
    fn normalize_empty_schema_yields_no_parameters() {
        let params = normalize(&InputSchema::default());
        assert!(params.is_empty());
    }
}
