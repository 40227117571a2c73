//! Catalog-to-skills transformation.
//!
//! Walks the full catalog in its declared order and renders one skill per
//! action. Fail-fast: the first render error aborts the whole transform —
//! a partially generated set would silently narrow the installed surface.

use indexmap::IndexMap;
use tracing::debug;

use crate::error::Result;
use crate::normalize::normalize;
use crate::render::render_skill;
use crate::types::SkillDescriptor;
use skillbridge_catalog::{Catalog, CatalogClient};

/// Render every action in the catalog into a skill, keyed by tool name.
///
/// Iteration order (tools, and actions within a tool) matches the catalog.
///
/// # Errors
///
/// Propagates the first [`crate::CodegenError::Render`] encountered.
pub fn catalog_to_skills(
    catalog: &Catalog,
    client: &CatalogClient,
) -> Result<IndexMap<String, Vec<SkillDescriptor>>> {
    let mut skills_by_tool = IndexMap::new();

    for tool in &catalog.tools {
        let mut skills = Vec::with_capacity(tool.actions.len());
        for action in &tool.actions {
            let params = normalize(&action.signature.input);
            let method_url = client.action_invocation_url(&tool.name, &action.id);
            skills.push(render_skill(&tool.name, action, &params, &method_url)?);
        }
        debug!(tool = %tool.name, skills = skills.len(), "tool transformed");
        skills_by_tool.insert(tool.name.clone(), skills);
    }

    Ok(skills_by_tool)
}
