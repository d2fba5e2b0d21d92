pub mod codec;
pub mod registry;
pub mod validate;

pub use codec::{decode, decode_as, encode, encode_compact, is_well_formed};
pub use registry::{get_template, ContentRegistry};
pub use validate::{evaluate, Check, FieldIssue, Rule, ValidationReport, When};

/// Keys a shape does not model, carried through edits untouched.
pub type Extra = serde_json::Map<String, serde_json::Value>;
