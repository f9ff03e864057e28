//! Error types for catalog construction, configuration and output

use std::fmt;
use std::path::PathBuf;

/// Main error type for all tiling operations
///
/// Unsatisfiable and cancelled searches are not errors; they are reported as
/// [`SolveOutcome`](crate::algorithm::outcome::SolveOutcome) variants.
#[derive(Debug)]
pub enum TilingError {
    /// Tile literal does not contain exactly K×K symbols
    MalformedTile {
        /// The offending literal
        literal: String,
        /// Required number of symbols
        expected: usize,
        /// Number of symbols supplied
        found: usize,
    },

    /// Tile added to a catalog built for a different tile size
    TileSizeMismatch {
        /// Catalog tile size
        expected: usize,
        /// Size of the rejected tile
        found: usize,
    },

    /// Solving was requested with no tiles to choose from
    EmptyCatalog,

    /// Parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// Catalog file could not be parsed
    CatalogSyntax {
        /// One-based line number of the offending directive
        line: usize,
        /// Description of the problem
        reason: String,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// Failed to save a rendered image to disk
    ImageExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image export error
        source: image::ImageError,
    },

    /// An internal invariant did not hold
    Computation {
        /// Name of the computation that failed
        operation: &'static str,
        /// Description of the failure
        reason: String,
    },

    /// A run finished without producing a complete tiling
    NoSolution {
        /// Label of the final outcome (unsatisfiable, incomplete, cancelled)
        outcome: &'static str,
        /// Number of attempts made
        attempts: usize,
    },
}

impl TilingError {
    /// Whether this error is a fail-fast configuration error raised before solving
    pub const fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::MalformedTile { .. }
                | Self::TileSizeMismatch { .. }
                | Self::EmptyCatalog
                | Self::InvalidParameter { .. }
                | Self::CatalogSyntax { .. }
        )
    }
}

impl fmt::Display for TilingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedTile {
                literal,
                expected,
                found,
            } => {
                write!(
                    f,
                    "Malformed tile literal {literal:?}: expected {expected} symbols, found {found}"
                )
            }
            Self::TileSizeMismatch { expected, found } => {
                write!(
                    f,
                    "Tile of size {found} does not belong in a catalog of size {expected}"
                )
            }
            Self::EmptyCatalog => write!(f, "Tile catalog is empty"),
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::CatalogSyntax { line, reason } => {
                write!(f, "Catalog syntax error on line {line}: {reason}")
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
            Self::ImageExport { path, source } => {
                write!(
                    f,
                    "Failed to export image to '{}': {source}",
                    path.display()
                )
            }
            Self::Computation { operation, reason } => {
                write!(f, "Computation error in {operation}: {reason}")
            }
            Self::NoSolution { outcome, attempts } => {
                write!(f, "No tiling found after {attempts} attempt(s): {outcome}")
            }
        }
    }
}

impl std::error::Error for TilingError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ImageExport { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for tiling results
pub type Result<T> = std::result::Result<T, TilingError>;

impl From<std::io::Error> for TilingError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from("<unknown>"),
            operation: "unknown",
            source: err,
        }
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> TilingError {
    TilingError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create a computation error
pub fn computation_error(operation: &'static str, reason: &impl ToString) -> TilingError {
    TilingError::Computation {
        operation,
        reason: reason.to_string(),
    }
}
