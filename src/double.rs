//! Double construction: stubs, mocks, and class-scoped doubles.
//!
//! Method interception is an explicit dispatch table, not runtime magic: the
//! set of names a double answers is closed at construction time (the
//! configuration map, plus the parent's declared members in mock mode), and
//! every call goes through [`Double::call`] with an explicit method name.
//! A real parent implementation is a held [`Parent`] delegate, never an
//! inherited base.

use serde_json::Value;
use std::rc::Rc;

use crate::controller::{DoubleController, MethodConfig};
use crate::error::Error;
use crate::stubbing::StubBuilder;

/// Reserved method name denoting the constructor.
pub const CONSTRUCTOR: &str = "__construct";

/// Configuration-map key prefix marking a class-level (static) member.
pub const STATIC_PREFIX: &str = "::";

/// A real implementation a double can stand in for.
///
/// `invoke` is only called with names from `methods()`; mock-mode doubles
/// delegate unconfigured members through it, stub-mode doubles keep the
/// parent for identity only.
pub trait Parent {
    /// The parent type's name, used for identity checks.
    fn type_name(&self) -> &'static str;

    /// The members the parent declares.
    fn methods(&self) -> &[&'static str];

    /// Run the real implementation of a declared member.
    fn invoke(&self, method: &str, args: &[Value]) -> Value;
}

/// How a double treats parent members absent from its configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Only configured members answer; everything else is a not-stubbed
    /// error, even if the parent implements it.
    Stub,
    /// Configured members are rerouted; every other parent member keeps its
    /// real behavior, unobserved by the engine.
    Mock,
}

/// A synthesized replacement object.
///
/// Calls route through the attached [`DoubleController`]; the controller
/// records every intercepted call and answers it from the configured rules.
pub struct Double {
    controller: DoubleController,
    parent: Option<Rc<dyn Parent>>,
    mode: Mode,
}

impl Double {
    fn build(parent: Option<Rc<dyn Parent>>, config: &MethodConfig, mode: Mode) -> Self {
        Self {
            controller: DoubleController::from_config(config),
            parent,
            mode,
        }
    }

    /// Invoke a method on the double.
    ///
    /// Configured methods dispatch through the controller. In mock mode an
    /// unconfigured method declared by the parent runs the parent's real
    /// implementation and is not recorded.
    pub fn call(&self, method: &str, args: Vec<Value>) -> Result<Value, Error> {
        if self.controller.is_allowed(method) {
            return self.controller.dispatch(method, args);
        }

        if self.mode == Mode::Mock {
            if let Some(parent) = &self.parent {
                if parent.methods().contains(&method) {
                    return Ok(parent.invoke(method, &args));
                }
            }
        }

        Err(Error::NotStubbed(method.to_string()))
    }

    /// A rule builder for further stubbing of the named method.
    pub fn stubs(&self, method: &str) -> StubBuilder {
        self.controller.stubs(method)
    }

    /// The named method's call log, in call order.
    pub fn report(&self, method: &str) -> Vec<Vec<Value>> {
        self.controller.report(method)
    }

    /// The attached controller, for the full inspection surface.
    pub fn controller(&self) -> &DoubleController {
        &self.controller
    }

    /// The pass-through mode this double was built with.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Whether this double stands in for the named parent type.
    pub fn is_double_of(&self, type_name: &str) -> bool {
        self.parent
            .as_ref()
            .is_some_and(|parent| parent.type_name() == type_name)
    }
}

/// A synthesized replacement class: static members plus an instance factory.
///
/// One controller serves all static calls; each constructed instance gets a
/// fresh controller, registered in construction order on the class-scoped
/// controller.
pub struct DoubleClass {
    controller: DoubleController,
    instance_config: MethodConfig,
    parent: Option<Rc<dyn Parent>>,
    mode: Mode,
}

impl DoubleClass {
    fn build(parent: Option<Rc<dyn Parent>>, config: &MethodConfig, mode: Mode) -> Self {
        let (static_config, instance_config) = split_scopes(config);
        Self {
            controller: DoubleController::from_config(&static_config),
            instance_config,
            parent,
            mode,
        }
    }

    /// Invoke a class-level (static) method.
    ///
    /// In mock mode an unconfigured member declared by the parent runs the
    /// parent's real implementation and is not recorded, same as instance
    /// dispatch.
    pub fn call_static(&self, method: &str, args: Vec<Value>) -> Result<Value, Error> {
        if self.controller.is_allowed(method) {
            return self.controller.dispatch(method, args);
        }

        if self.mode == Mode::Mock {
            if let Some(parent) = &self.parent {
                if parent.methods().contains(&method) {
                    return Ok(parent.invoke(method, &args));
                }
            }
        }

        Err(Error::NotStubbed(method.to_string()))
    }

    /// Construct an instance of the double class.
    ///
    /// The new instance controller is registered on the class controller, and
    /// the constructor call is recorded on it like any other method. A
    /// constructor with no configured action still records; construction
    /// never fails for lack of a rule.
    pub fn instantiate(&self, args: Vec<Value>) -> Double {
        let instance = Double::build(self.parent.clone(), &self.instance_config, self.mode);
        instance.controller.allow(CONSTRUCTOR);
        self.controller.register_instance(instance.controller.clone());

        // An unconfigured constructor dispatches to no rule; the call is
        // still recorded, and construction itself never fails.
        let _ = instance.controller.dispatch(CONSTRUCTOR, args);

        instance
    }

    /// The n-th instance controller, by construction order.
    pub fn instance(&self, n: usize) -> Result<DoubleController, Error> {
        self.controller.instance(n)
    }

    /// A rule builder for further stubbing of the named static method.
    pub fn stubs(&self, method: &str) -> StubBuilder {
        self.controller.stubs(method)
    }

    /// The named static method's call log.
    pub fn report(&self, method: &str) -> Vec<Vec<Value>> {
        self.controller.report(method)
    }

    /// The class-scoped controller.
    pub fn controller(&self) -> &DoubleController {
        &self.controller
    }

    /// The pass-through mode this class double was built with.
    pub fn mode(&self) -> Mode {
        self.mode
    }
}

/// Split a configuration map into static-scoped entries (keys prefixed with
/// `::`, prefix stripped) and instance-scoped entries.
fn split_scopes(config: &MethodConfig) -> (MethodConfig, MethodConfig) {
    let mut static_config = MethodConfig::new();
    let mut instance_config = MethodConfig::new();

    for (name, value) in config {
        match name.strip_prefix(STATIC_PREFIX) {
            Some(stripped) => {
                static_config.insert(stripped.to_string(), value.clone());
            }
            None => {
                instance_config.insert(name.clone(), value.clone());
            }
        }
    }

    (static_config, instance_config)
}

/// Build a stub object: only configured members answer.
pub fn stub(parent: Option<Rc<dyn Parent>>, config: MethodConfig) -> Double {
    Double::build(parent, &config, Mode::Stub)
}

/// Build a mock object: configured members are rerouted, the rest of the
/// parent stays real.
pub fn mock(parent: Option<Rc<dyn Parent>>, config: MethodConfig) -> Double {
    Double::build(parent, &config, Mode::Mock)
}

/// Build a stub class. Keys prefixed `::` configure static members.
pub fn stub_class(parent: Option<Rc<dyn Parent>>, config: MethodConfig) -> DoubleClass {
    DoubleClass::build(parent, &config, Mode::Stub)
}

/// Build a mock class. Keys prefixed `::` configure static members.
pub fn mock_class(parent: Option<Rc<dyn Parent>>, config: MethodConfig) -> DoubleClass {
    DoubleClass::build(parent, &config, Mode::Mock)
}
