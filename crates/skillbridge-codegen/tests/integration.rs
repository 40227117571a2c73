//! Integration tests for the skillbridge-codegen crate.
//!
//! Exercises the full catalog → skills pipeline: normalization, rendering,
//! and the transformer's ordering, uniqueness, and fail-fast guarantees.

use std::collections::HashSet;

use skillbridge_codegen::{CodegenError, catalog_to_skills};

use skillbridge_catalog::{ApiEnvironment, Catalog, CatalogClient, Endpoints};

fn client() -> CatalogClient {
    CatalogClient::new(Endpoints::for_environment(ApiEnvironment::Local))
}

/// Build a catalog of `tools` tools with `actions` actions each, with
/// distinct names, descriptions, and parameter schemas.
fn synthetic_catalog(tools: usize, actions: usize) -> Catalog {
    let tool_entries: Vec<serde_json::Value> = (0..tools)
        .map(|t| {
            let action_entries: Vec<serde_json::Value> = (0..actions)
                .map(|a| {
                    serde_json::json!({
                        "Id": format!("action_{a}"),
                        "DisplayName": format!("Action {a}"),
                        "Description": format!("Does thing {a}"),
                        "Signature": {
                            "Input": {
                                "properties": {
                                    "z_last": { "type": "string", "description": "z" },
                                    "a_first": { "type": "unsupported_type", "description": "a" }
                                }
                            }
                        }
                    })
                })
                .collect();
            serde_json::json!({
                "Name": format!("tool{t}"),
                "Authentication": { "isAuthenticated": "False", "Scopes": [] },
                "Actions": action_entries
            })
        })
        .collect();

    serde_json::from_value(serde_json::json!({ "tools": tool_entries })).unwrap()
}

#[test]
fn transform_produces_one_skill_per_action_with_distinct_ids() {
    let catalog = synthetic_catalog(4, 3);
    let skills_by_tool = catalog_to_skills(&catalog, &client()).unwrap();

    assert_eq!(skills_by_tool.len(), 4);

    let ids: Vec<String> = skills_by_tool
        .values()
        .flatten()
        .map(|s| s.id.clone())
        .collect();
    assert_eq!(ids.len(), 12);

    let distinct: HashSet<&String> = ids.iter().collect();
    assert_eq!(distinct.len(), 12, "skill ids must be pairwise distinct");
}

#[test]
fn transform_preserves_catalog_order() {
    let catalog = synthetic_catalog(3, 2);
    let skills_by_tool = catalog_to_skills(&catalog, &client()).unwrap();

    let tool_names: Vec<&String> = skills_by_tool.keys().collect();
    assert_eq!(tool_names, ["tool0", "tool1", "tool2"]);

    let first_tool = &skills_by_tool["tool0"];
    assert_eq!(first_tool[0].id, "tool0-action_0");
    assert_eq!(first_tool[1].id, "tool0-action_1");
}

#[test]
fn transform_is_deterministic() {
    let catalog = synthetic_catalog(2, 2);
    let first = catalog_to_skills(&catalog, &client()).unwrap();
    let second = catalog_to_skills(&catalog, &client()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn generated_stub_lists_parameters_in_schema_order() {
    let catalog = synthetic_catalog(1, 1);
    let skills_by_tool = catalog_to_skills(&catalog, &client()).unwrap();

    let skill = &skills_by_tool["tool0"][0];
    // Schema declares z_last before a_first; no re-sorting.
    assert!(skill.content.contains("def action_0(z_last: str, a_first: Any) -> dict:"));
}

#[test]
fn unknown_schema_type_renders_as_any() {
    let catalog = synthetic_catalog(1, 1);
    let skills_by_tool = catalog_to_skills(&catalog, &client()).unwrap();

    let skill = &skills_by_tool["tool0"][0];
    assert!(skill.content.contains("a_first: Any"));
}

#[test]
fn transform_fails_fast_on_first_bad_action() {
    let catalog: Catalog = serde_json::from_value(serde_json::json!({
        "tools": [
            {
                "Name": "good",
                "Authentication": {},
                "Actions": [
                    { "Id": "fine_action", "DisplayName": "Fine", "Description": "",
                      "Signature": { "Input": { "properties": {} } } }
                ]
            },
            {
                "Name": "bad",
                "Authentication": {},
                "Actions": [
                    { "Id": "not a valid identifier", "DisplayName": "Broken", "Description": "",
                      "Signature": { "Input": { "properties": {} } } }
                ]
            }
        ]
    }))
    .unwrap();

    let err = catalog_to_skills(&catalog, &client()).unwrap_err();
    let CodegenError::Render { skill, .. } = err;
    assert_eq!(skill, "bad-not a valid identifier");
}

#[test]
fn skill_metadata_matches_composition_rules() {
    let catalog = synthetic_catalog(1, 1);
    let skills_by_tool = catalog_to_skills(&catalog, &client()).unwrap();

    let skill = &skills_by_tool["tool0"][0];
    assert_eq!(skill.id, "tool0-action_0");
    assert_eq!(skill.title, "tool0: Action 0");
    assert_eq!(skill.description, "Does thing 0");
    assert_eq!(skill.file_name, "tool0-action_0.py");
    assert!(skill.content.contains("/v1/actions/tool0/action_0/execute"));
}
