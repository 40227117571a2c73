//! Skill generation for skillbridge.
//!
//! This crate turns the remote tool/action catalog into installable skill
//! artifacts:
//!
//! - **Normalizer** — maps the catalog's JSON type vocabulary onto Python
//!   type names; total, order-preserving, never fails.
//!
//! - **Renderer** — a structured stub builder that produces one
//!   deterministic Python function per action, calling the action's
//!   invocation endpoint.
//!
//! - **Transformer** — walks the whole catalog and assembles the
//!   tool-name → skills mapping handed to the persistence sink.

pub mod error;
pub mod normalize;
pub mod render;
pub mod transform;
pub mod types;

pub use error::{CodegenError, Result};
pub use normalize::{NormalizedParameter, PyType, normalize};
pub use render::{StubTemplate, render_skill};
pub use transform::catalog_to_skills;
pub use types::SkillDescriptor;
