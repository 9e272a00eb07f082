//! Per-method rule list, call log, and the rule-selection algorithm.
//!
//! A [`BehaviorLedger`] is the unit behind every stubbed method: it holds the
//! append-ordered rules configured for that method, records every call made
//! to it, and selects which rule answers a given call. Selection scans rules
//! in reverse insertion order, so later configuration wins ties while a
//! narrower rule added after a default only wins the calls its constraint
//! actually matches.

use chrono::{DateTime, Utc};
use serde_json::Value;
use std::fmt;
use std::rc::Rc;

/// What a matched rule does with the call.
#[derive(Clone)]
pub enum Action {
    /// Return this literal value.
    Return(Value),
    /// Call this function with the call's argument list and return its result.
    Invoke(Rc<dyn Fn(&[Value]) -> Value>),
}

impl Action {
    /// Apply the action to an argument list.
    pub fn apply(&self, args: &[Value]) -> Value {
        match self {
            Action::Return(value) => value.clone(),
            Action::Invoke(f) => f(args),
        }
    }
}

impl fmt::Debug for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Return(value) => f.debug_tuple("Return").field(value).finish(),
            Action::Invoke(_) => f.write_str("Invoke(<fn>)"),
        }
    }
}

/// One configured (constraint, action) pair.
///
/// A rule with no constraints is unconditional: it answers every call that
/// reaches it during the reverse scan.
#[derive(Clone)]
pub struct Rule {
    /// Expected argument values, compared element-wise for structural equality.
    pub args: Option<Vec<Value>>,
    /// Predicate over the call's argument list.
    pub predicate: Option<Rc<dyn Fn(&[Value]) -> bool>>,
    /// 0-based occurrence number this rule applies to.
    pub call_index: Option<usize>,
    /// The action taken when the rule wins.
    pub action: Action,
}

impl Rule {
    /// Create an unconditional rule with the given action.
    pub fn unconditional(action: Action) -> Self {
        Self {
            args: None,
            predicate: None,
            call_index: None,
            action,
        }
    }

    /// Whether every constraint this rule carries holds for the call.
    pub fn is_eligible(&self, occurrence: usize, args: &[Value]) -> bool {
        if let Some(index) = self.call_index {
            if index != occurrence {
                return false;
            }
        }
        if let Some(expected) = &self.args {
            if expected.as_slice() != args {
                return false;
            }
        }
        if let Some(predicate) = &self.predicate {
            if !predicate(args) {
                return false;
            }
        }
        true
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("args", &self.args)
            .field("predicate", &self.predicate.as_ref().map(|_| "<fn>"))
            .field("call_index", &self.call_index)
            .field("action", &self.action)
            .finish()
    }
}

/// One recorded call: the argument list plus when it arrived.
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub args: Vec<Value>,
    pub timestamp: DateTime<Utc>,
}

impl RecordedCall {
    pub fn new(args: Vec<Value>) -> Self {
        Self {
            args,
            timestamp: Utc::now(),
        }
    }
}

/// Per-method rule list and call log.
#[derive(Debug, Default)]
pub struct BehaviorLedger {
    rules: Vec<Rc<Rule>>,
    calls: Vec<RecordedCall>,
}

impl BehaviorLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a rule. Rules are immutable once appended; newest last.
    pub fn push_rule(&mut self, rule: Rule) {
        self.rules.push(Rc::new(rule));
    }

    /// Record a call and return its occurrence number (0-based, counted
    /// before the call is appended).
    pub fn record(&mut self, args: Vec<Value>) -> usize {
        let occurrence = self.calls.len();
        self.calls.push(RecordedCall::new(args));
        occurrence
    }

    /// Snapshot of the rule list, for evaluation outside any borrow.
    ///
    /// Predicates and invoked actions are caller-supplied closures that may
    /// touch other doubles, so eligibility must not run while the ledger is
    /// borrowed.
    pub fn rules_snapshot(&self) -> Vec<Rc<Rule>> {
        self.rules.clone()
    }

    /// The call log verbatim: one argument list per call, in call order.
    pub fn report(&self) -> Vec<Vec<Value>> {
        self.calls.iter().map(|call| call.args.clone()).collect()
    }

    /// The full timestamped records, for custom assertions.
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.len()
    }
}

/// Select the rule that answers a call: first eligible rule scanning in
/// reverse insertion order ("last configured, first eligible").
pub fn select_rule(rules: &[Rc<Rule>], occurrence: usize, args: &[Value]) -> Option<Rc<Rule>> {
    rules
        .iter()
        .rev()
        .find(|rule| rule.is_eligible(occurrence, args))
        .cloned()
}
