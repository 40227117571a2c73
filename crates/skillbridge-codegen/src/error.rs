//! Error types for the codegen crate.

/// Errors produced while generating skill code.
#[derive(Debug, thiserror::Error)]
pub enum CodegenError {
    /// A skill stub could not be rendered from its action metadata.
    #[error("failed to render skill `{skill}`: {reason}")]
    Render {
        /// The composite skill id (`{tool}-{action}`) being rendered.
        skill: String,
        /// Why rendering failed.
        reason: String,
    },
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, CodegenError>;

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
