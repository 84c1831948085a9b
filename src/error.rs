use thiserror::Error;

/// Fatal render failures. Everything else in the pipeline degrades silently:
/// unknown themes, categories and tool labels fall through to defaults, and
/// missing fonts fall back to the built-in bitmap face.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("canvas allocation failed for {width}x{height}")]
    CanvasAlloc { width: u32, height: u32 },

    #[error("png encoding failed: {0}")]
    Encode(String),
}
