//! Layered settings for the studio
//!
//! Settings come from three sources with different trust: a settings file
//! deployed with the application, URL query parameters and values the user
//! saved locally. Each source is validated against a fixed schema and the
//! results are merged into one effective configuration.

#![forbid(unsafe_code)]

pub mod defaults;
pub mod manager;
pub mod merge;
pub mod opts;
pub mod prelude;
pub mod schema;
pub mod source;
pub mod validate;
pub mod validator;
pub mod value;

pub use manager::SettingsManager;
pub use merge::{merge, merge_into};
pub use opts::SettingsOpts;
pub use studio_types::{Error, Source, StResult};
pub use validate::{Issue, IssueKind, Validated, validate, validate_report};
pub use validator::{ValidationError, Validator};
pub use value::{AclRoles, AclSetting, Document, FieldState, Node, SettingValue};

// vim: ts=4
