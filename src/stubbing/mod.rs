//! Fluent rule-building API for configuring doubles.
//!
//! Constraints chain, then a finalizer appends the rule:
//!
//! ```rust,ignore
//! use understudy::{args, methods, stub};
//! use serde_json::json;
//!
//! let double = stub(None, methods! {"method" => "DEFAULT"});
//!
//! // Narrower rules added after a default win only the calls they match.
//! double.stubs("method").with(args!["ARG"]).returns(json!("RESULT"));
//! double.stubs("method").at(1).returns(json!("SECOND"));
//! double.stubs("method").on(|args| args.len() > 2).calls(|args| args[0].clone());
//! ```

mod builder;
mod matchers;

pub use builder::StubBuilder;
pub use matchers::values_match;

#[cfg(test)]
mod tests;
