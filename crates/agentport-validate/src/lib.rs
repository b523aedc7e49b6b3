//! Validation of Kiro agent JSON artifacts.
//!
//! The validator is independent of the converter: it checks any agent file
//! against the closed Kiro field set, whoever produced it.
//!
//! - [`validate_value`] / [`validate_str`] / [`validate_file`]: static
//!   checks for one artifact, returning every violation found.
//! - [`ExternalValidator`]: optional deep validation via
//!   `kiro-cli agent validate`.
//! - [`validate_dir`]: validates every artifact in a directory and
//!   returns a [`ValidationSummary`].

pub mod error;
pub mod external;
pub mod report;
pub mod schema;
pub mod validator;

pub use error::{Result, ValidateError};
pub use external::{DEFAULT_BINARY, ExternalValidator};
pub use report::{FileReport, ValidateOptions, ValidationSummary, discover_artifacts, validate_dir};
pub use schema::{ALLOWED_FIELDS, REQUIRED_FIELDS};
pub use validator::{ValidationResult, validate_file, validate_str, validate_value};
