//! Structural validation of LPF documents.
//!
//! Validators read an untyped [`serde_json::Value`] so that hand-edited or
//! foreign documents can be checked, and report every problem as a
//! [`Violation`] instead of failing.

mod validators;
mod violation;

pub use validators::{
    GeometryValidator, IdentityValidator, NamesValidator, PropertiesValidator, RootValidator, SchemaValidator,
    TemporalValidator, TitleUniquenessValidator, Validator, ValidatorConfig, title_counts,
};
pub use violation::{Violation, ViolationKind};
