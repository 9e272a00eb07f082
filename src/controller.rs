//! The controller attached to every double.
//!
//! A [`DoubleController`] owns one [`BehaviorLedger`] per configured method
//! name and exposes the three surfaces a double needs: configuration (default
//! rules from the initial map, further rules through [`stubs`]), dispatch,
//! and reporting. Class-scoped controllers additionally keep a registry of
//! the instance controllers created from them, in construction order.
//!
//! [`stubs`]: DoubleController::stubs

use serde_json::Value;
use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use crate::error::Error;
use crate::ledger::{select_rule, Action, BehaviorLedger, RecordedCall, Rule};
use crate::stubbing::StubBuilder;

/// A configuration map: method name to default return value.
///
/// A `Value::Null` entry still registers an eligible default rule; the method
/// answers calls with `Null` rather than being treated as unconfigured.
pub type MethodConfig = HashMap<String, Value>;

#[derive(Debug, Default)]
struct ControllerState {
    ledgers: HashMap<String, Rc<RefCell<BehaviorLedger>>>,
    allowed: HashSet<String>,
    instances: Vec<DoubleController>,
}

/// Per-double configuration, dispatch, and reporting unit.
///
/// Cheap to clone; clones share state. Single-threaded by design: all
/// interior state lives behind `Rc<RefCell<...>>`.
#[derive(Debug, Clone, Default)]
pub struct DoubleController {
    state: Rc<RefCell<ControllerState>>,
}

impl DoubleController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a controller pre-configured from a method map.
    pub fn from_config(config: &MethodConfig) -> Self {
        let controller = Self::new();
        controller.configure(config);
        controller
    }

    /// Register a default rule per entry and allow each method name.
    ///
    /// Entries are literal values (including `Null`); each becomes an
    /// unconditional `Return` rule on that method's ledger.
    pub fn configure(&self, config: &MethodConfig) {
        for (name, value) in config {
            self.ledger(name)
                .borrow_mut()
                .push_rule(Rule::unconditional(Action::Return(value.clone())));
        }
    }

    /// A rule builder bound to the named method's ledger.
    ///
    /// Stubbing a method is configuration, so the name is also added to the
    /// allowed set; a double's surface can grow after construction.
    pub fn stubs(&self, method: &str) -> StubBuilder {
        StubBuilder::new(self.ledger(method))
    }

    /// Route a call to the named ledger: record it, select a rule, apply it.
    ///
    /// The call is recorded unconditionally before matching, so a log entry
    /// exists even when dispatch fails. Rule evaluation runs on a snapshot of
    /// the rule list so predicates and invoked actions may call back into
    /// doubles without tripping a borrow.
    pub fn dispatch(&self, method: &str, args: Vec<Value>) -> Result<Value, Error> {
        if !self.is_allowed(method) {
            return Err(Error::NotStubbed(method.to_string()));
        }

        let ledger = self.ledger(method);
        let (occurrence, rules) = {
            let mut ledger = ledger.borrow_mut();
            (ledger.record(args.clone()), ledger.rules_snapshot())
        };

        match select_rule(&rules, occurrence, &args) {
            Some(rule) => Ok(rule.action.apply(&args)),
            None => Err(Error::NotStubbed(method.to_string())),
        }
    }

    /// The named method's call log, in call order. Empty if never called.
    /// Never mutates state.
    pub fn report(&self, method: &str) -> Vec<Vec<Value>> {
        let state = self.state.borrow();
        match state.ledgers.get(method) {
            Some(ledger) => ledger.borrow().report(),
            None => Vec::new(),
        }
    }

    /// The named method's timestamped call records.
    pub fn calls(&self, method: &str) -> Vec<RecordedCall> {
        let state = self.state.borrow();
        match state.ledgers.get(method) {
            Some(ledger) => ledger.borrow().calls(),
            None => Vec::new(),
        }
    }

    /// The n-th instance controller, by construction order.
    ///
    /// Only class-scoped controllers ever hold instances.
    pub fn instance(&self, n: usize) -> Result<DoubleController, Error> {
        let state = self.state.borrow();
        state
            .instances
            .get(n)
            .cloned()
            .ok_or(Error::InstanceOutOfRange {
                index: n,
                count: state.instances.len(),
            })
    }

    pub(crate) fn register_instance(&self, instance: DoubleController) {
        self.state.borrow_mut().instances.push(instance);
    }

    pub(crate) fn allow(&self, method: &str) {
        self.state.borrow_mut().allowed.insert(method.to_string());
    }

    pub(crate) fn is_allowed(&self, method: &str) -> bool {
        self.state.borrow().allowed.contains(method)
    }

    /// The named ledger, created on demand. Creation counts as configuration.
    fn ledger(&self, method: &str) -> Rc<RefCell<BehaviorLedger>> {
        let mut state = self.state.borrow_mut();
        state.allowed.insert(method.to_string());
        state
            .ledgers
            .entry(method.to_string())
            .or_insert_with(|| Rc::new(RefCell::new(BehaviorLedger::new())))
            .clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::methods;
    use serde_json::json;

    #[test]
    fn test_configured_method_returns_default() {
        let controller = DoubleController::from_config(&methods! {"method" => "RESULT"});
        assert_eq!(controller.dispatch("method", vec![]).unwrap(), json!("RESULT"));
    }

    #[test]
    fn test_unconfigured_method_is_not_stubbed() {
        let controller = DoubleController::from_config(&methods! {"method" => "RESULT"});
        let err = controller.dispatch("other", vec![]).unwrap_err();
        assert_eq!(err.to_string(), "method \"other\" is not stubbed");
    }

    #[test]
    fn test_null_entry_is_an_eligible_default() {
        let controller = DoubleController::from_config(&methods! {"method"});
        assert_eq!(controller.dispatch("method", vec![]).unwrap(), Value::Null);
    }

    #[test]
    fn test_failed_dispatch_still_records_the_call() {
        let controller = DoubleController::new();
        controller.allow("method");
        assert!(controller.dispatch("method", vec![json!("A")]).is_err());
        assert_eq!(controller.report("method"), vec![vec![json!("A")]]);
    }

    #[test]
    fn test_report_never_called_is_empty() {
        let controller = DoubleController::new();
        assert!(controller.report("method").is_empty());
        assert!(controller.calls("method").is_empty());
    }

    #[test]
    fn test_restubbing_replaces_default_but_keeps_log() {
        let controller = DoubleController::from_config(&methods! {"method" => "OLD"});
        controller.dispatch("method", vec![json!(1)]).unwrap();
        controller.stubs("method").returns(json!("NEW"));
        assert_eq!(controller.dispatch("method", vec![json!(2)]).unwrap(), json!("NEW"));
        assert_eq!(controller.report("method"), vec![vec![json!(1)], vec![json!(2)]]);
    }

    #[test]
    fn test_stubs_extends_the_allowed_set() {
        let controller = DoubleController::new();
        controller.stubs("extra").returns(json!("EXTRA"));
        assert_eq!(controller.dispatch("extra", vec![]).unwrap(), json!("EXTRA"));
    }

    #[test]
    fn test_instance_out_of_range() {
        let controller = DoubleController::new();
        let err = controller.instance(0).unwrap_err();
        assert!(matches!(err, Error::InstanceOutOfRange { index: 0, count: 0 }));
    }

    #[test]
    fn test_instances_returned_in_construction_order() {
        let class = DoubleController::new();
        let first = DoubleController::from_config(&methods! {"m" => 1});
        let second = DoubleController::from_config(&methods! {"m" => 2});
        class.register_instance(first);
        class.register_instance(second);

        assert_eq!(class.instance(0).unwrap().dispatch("m", vec![]).unwrap(), json!(1));
        assert_eq!(class.instance(1).unwrap().dispatch("m", vec![]).unwrap(), json!(2));
    }

    #[test]
    fn test_invoked_action_may_dispatch_other_doubles() {
        let inner = DoubleController::from_config(&methods! {"inner" => "DEEP"});
        let outer = DoubleController::new();
        let handle = inner.clone();
        outer
            .stubs("outer")
            .calls(move |_| handle.dispatch("inner", vec![]).unwrap());

        assert_eq!(outer.dispatch("outer", vec![]).unwrap(), json!("DEEP"));
        assert_eq!(inner.report("inner").len(), 1);
    }
}
