//! Rule builder bound to one method's ledger.

use serde_json::Value;
use std::cell::RefCell;
use std::rc::Rc;

use super::matchers::values_match;
use crate::ledger::{Action, BehaviorLedger, Rule};

/// Builds one rule against a single [`BehaviorLedger`].
///
/// Constraint methods (`with`, `matching`, `on`, `at`) chain; a finalizer
/// (`returns`, `calls`) appends the rule and consumes the builder. A builder
/// finalized without constraints appends an unconditional rule, which acts as
/// the new default for the method.
pub struct StubBuilder {
    ledger: Rc<RefCell<BehaviorLedger>>,
    args: Option<Vec<Value>>,
    predicate: Option<Rc<dyn Fn(&[Value]) -> bool>>,
    call_index: Option<usize>,
}

impl StubBuilder {
    pub(crate) fn new(ledger: Rc<RefCell<BehaviorLedger>>) -> Self {
        Self {
            ledger,
            args: None,
            predicate: None,
            call_index: None,
        }
    }

    /// Constrain the rule to calls whose arguments structurally equal `args`.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// double.stubs("method").with(args!["ARG"]).returns(json!("RESULT"));
    /// ```
    pub fn with(mut self, args: Vec<Value>) -> Self {
        self.args = Some(args);
        self
    }

    /// Constrain the rule to calls whose arguments match positional string
    /// patterns (glob, then regex, then exact — see [`values_match`]).
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// double.stubs("read").matching(vec!["*.txt".into()]).returns(json!("ok"));
    /// ```
    pub fn matching(self, patterns: Vec<String>) -> Self {
        self.on(move |args| values_match(&patterns, args))
    }

    /// Constrain the rule with a predicate over the call's argument list.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// double.stubs("method").on(|args| args.len() == 2).returns(json!("PAIR"));
    /// ```
    pub fn on(mut self, predicate: impl Fn(&[Value]) -> bool + 'static) -> Self {
        self.predicate = Some(Rc::new(predicate));
        self
    }

    /// Constrain the rule to the call whose 0-based occurrence number is `n`.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// // Answers the second call only; other calls fall through.
    /// double.stubs("method").at(1).returns(json!("RESULT"));
    /// ```
    pub fn at(mut self, n: usize) -> Self {
        self.call_index = Some(n);
        self
    }

    /// Finalize with a literal return value and append the rule.
    pub fn returns(self, value: Value) {
        self.finish(Action::Return(value));
    }

    /// Finalize with a function called with the argument list; its result
    /// becomes the method's return value.
    pub fn calls(self, f: impl Fn(&[Value]) -> Value + 'static) {
        self.finish(Action::Invoke(Rc::new(f)));
    }

    fn finish(self, action: Action) {
        self.ledger.borrow_mut().push_rule(Rule {
            args: self.args,
            predicate: self.predicate,
            call_index: self.call_index,
            action,
        });
    }
}
