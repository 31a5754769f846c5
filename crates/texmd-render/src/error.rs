use std::path::PathBuf;

/// Errors raised while rendering a formula.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// A rendering tool could not be found on `PATH`.
    #[error("{program} not found: {source}")]
    MissingTool {
        program: String,
        #[source]
        source: which::Error,
    },

    /// A rendering tool could not be started.
    #[error("failed to run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// A rendering tool ran and reported a failure.
    #[error("{program} failed: {message}")]
    Tool { program: String, message: String },

    /// The produced SVG could not be read back.
    #[error("unexpected SVG output in {}: {reason}", .path.display())]
    Svg { path: PathBuf, reason: String },

    /// Colour not in `#RRGGBB` form.
    #[error("invalid colour {0:?}, expected #RRGGBB")]
    InvalidColor(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
