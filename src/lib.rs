//! # understudy
//!
//! Test doubles for Rust: stubs, mocks, and spies with call recording and
//! fluent per-method stubbing.
//!
//! Every double carries a controller that records each intercepted call and
//! answers it from an ordered rule list. Rules can be unconditional defaults
//! or constrained by argument values, a predicate, or call occurrence order;
//! the most recently configured eligible rule wins. Calling a method with no
//! eligible rule raises a distinguishable error instead of returning a
//! default, so tests can assert on missing configuration.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use understudy::{args, methods, stub};
//! use serde_json::json;
//!
//! let double = stub(None, methods! {"query" => "RESULT"});
//!
//! assert_eq!(double.call("query", args!["id"]).unwrap(), json!("RESULT"));
//! assert_eq!(double.report("query"), vec![vec![json!("id")]]);
//! ```
//!
//! ## Constrained rules
//!
//! ```rust,ignore
//! use understudy::{args, methods, stub};
//! use serde_json::json;
//!
//! let double = stub(None, methods! {"query" => "DEFAULT"});
//!
//! double.stubs("query").with(args!["ARG"]).returns(json!("BY_ARGS"));
//! double.stubs("query").at(1).returns(json!("SECOND_CALL"));
//!
//! assert_eq!(double.call("query", args!["ARG"]).unwrap(), json!("BY_ARGS"));
//! assert_eq!(double.call("query", args![]).unwrap(), json!("SECOND_CALL"));
//! assert_eq!(double.call("query", args![]).unwrap(), json!("DEFAULT"));
//! ```
//!
//! ## Spies
//!
//! ```rust,ignore
//! use understudy::{args, spy};
//! use serde_json::json;
//!
//! let callback = spy(Some(json!("DONE")));
//! assert_eq!(callback.call(args!["x"]).unwrap(), json!("DONE"));
//! assert_eq!(callback.report(), vec![vec![json!("x")]]);
//! ```

pub mod controller;
pub mod double;
pub mod error;
pub mod ledger;
pub mod spy;
pub mod stubbing;

#[cfg(feature = "yaml")]
pub mod yaml;

// Core types
pub use controller::{DoubleController, MethodConfig};
pub use error::Error;
pub use ledger::{Action, BehaviorLedger, RecordedCall, Rule};

// Double construction
pub use double::{
    mock, mock_class, stub, stub_class, Double, DoubleClass, Mode, Parent, CONSTRUCTOR,
    STATIC_PREFIX,
};

// Spies
pub use spy::{spy, Spy};

// Stubbing surface
pub use stubbing::{values_match, StubBuilder};

// YAML fixtures (feature-gated)
#[cfg(feature = "yaml")]
pub use yaml::{load_fixture, stub_from_file, Fixture};
