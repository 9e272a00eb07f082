//! Free-standing callable spies.
//!
//! A spy is a single-method double exposed as a directly invocable unit: the
//! same controller, ledger, and rule machinery, without a method name at the
//! call site.

use serde_json::Value;

use crate::controller::DoubleController;
use crate::error::Error;
use crate::stubbing::StubBuilder;

/// The anonymous ledger name behind every spy.
const SPY_METHOD: &str = "spy";

/// A directly-callable test double.
pub struct Spy {
    controller: DoubleController,
}

impl Spy {
    /// Invoke the spy. Recorded and matched exactly like a named method.
    pub fn call(&self, args: Vec<Value>) -> Result<Value, Error> {
        self.controller.dispatch(SPY_METHOD, args)
    }

    /// A rule builder bound to the spy's sole ledger.
    pub fn stubs(&self) -> StubBuilder {
        self.controller.stubs(SPY_METHOD)
    }

    /// The spy's call log, in call order.
    pub fn report(&self) -> Vec<Vec<Value>> {
        self.controller.report(SPY_METHOD)
    }

    /// How many times the spy has been called.
    pub fn call_count(&self) -> usize {
        self.report().len()
    }
}

/// Build a spy, optionally pre-loaded with a default return value.
///
/// Without a default, calling the spy before any stubbing raises the
/// not-stubbed error (the call is still recorded).
///
/// # Example
///
/// ```rust,ignore
/// use understudy::{args, spy};
/// use serde_json::json;
///
/// let spy = spy(Some(json!("DEFAULT")));
/// spy.stubs().with(args!["ARG"]).returns(json!("RESULT"));
///
/// assert_eq!(spy.call(args!["ARG"]).unwrap(), json!("RESULT"));
/// assert_eq!(spy.call(args![]).unwrap(), json!("DEFAULT"));
/// ```
pub fn spy(default: Option<Value>) -> Spy {
    let controller = DoubleController::new();
    if let Some(value) = default {
        controller.stubs(SPY_METHOD).returns(value);
    } else {
        controller.allow(SPY_METHOD);
    }
    Spy { controller }
}
