//! Standard-library registry: named functions resolved by function nodes.

mod list;
mod logic;
mod math;
mod string;
mod time;

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use log::{debug, warn};

use crate::error::{EngineError, EvalError};
use crate::model::argument::{Param, TypeTag};
use crate::model::value::DVal;

/// Resolved argument values handed to a function body, keyed by parameter
/// name.
pub type ArgValues = HashMap<String, DVal>;

type InvokeFn = Box<dyn Fn(&ArgValues) -> Result<DVal, EngineError> + Send + Sync>;
type PreviewFn = Box<dyn Fn(&[DVal], i64) -> Vec<DVal> + Send + Sync>;

/// A standard-library function: parameter list, purity flag, body, and an
/// optional preview hook.
///
/// Pure functions are memoized per call-site node; impure ones re-execute on
/// every evaluation. The preview hook receives the resolved argument values
/// in parameter order plus the caller's cursor and reports per-argument live
/// values for the editor.
pub struct FunctionSpec {
    pub name: String,
    pub parameters: Vec<Param>,
    pub pure: bool,
    invoke: InvokeFn,
    preview: Option<PreviewFn>,
}

impl FunctionSpec {
    pub fn new(
        name: &str,
        invoke: impl Fn(&ArgValues) -> Result<DVal, EngineError> + Send + Sync + 'static,
    ) -> Self {
        Self {
            name: name.to_string(),
            parameters: Vec::new(),
            pure: true,
            invoke: Box::new(invoke),
            preview: None,
        }
    }

    pub fn with_params(mut self, parameters: Vec<Param>) -> Self {
        self.parameters = parameters;
        self
    }

    /// Mark the function as side-effecting: never memoized.
    pub fn impure(mut self) -> Self {
        self.pure = false;
        self
    }

    pub fn with_preview(
        mut self,
        hook: impl Fn(&[DVal], i64) -> Vec<DVal> + Send + Sync + 'static,
    ) -> Self {
        self.preview = Some(Box::new(hook));
        self
    }

    pub fn invoke(&self, args: &ArgValues) -> Result<DVal, EngineError> {
        (self.invoke)(args)
    }

    pub fn has_preview(&self) -> bool {
        self.preview.is_some()
    }

    /// Run the preview hook, if any, over argument values in parameter order.
    pub fn preview(&self, values: &[DVal], cursor: i64) -> Option<Vec<DVal>> {
        self.preview.as_ref().map(|hook| hook(values, cursor))
    }
}

/// Registry of standard-library functions, looked up by name.
pub struct FunctionRegistry {
    inner: RwLock<HashMap<String, Arc<FunctionSpec>>>,
}

impl FunctionRegistry {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(HashMap::new()),
        }
    }

    /// Create a registry with all built-in functions registered.
    pub fn with_builtins() -> Self {
        let registry = Self::new();
        for spec in [
            math::functions(),
            string::functions(),
            logic::functions(),
            list::functions(),
            time::functions(),
        ]
        .into_iter()
        .flatten()
        {
            registry.register(spec);
        }
        registry
    }

    pub fn register(&self, spec: FunctionSpec) {
        debug!("stdlib: register {}", spec.name);
        let name = spec.name.clone();
        let mut inner = self.inner.write().unwrap();
        if inner.insert(name.clone(), Arc::new(spec)).is_some() {
            warn!("stdlib: overwrote existing registration for {}", name);
        }
    }

    pub fn lookup(&self, name: &str) -> Result<Arc<FunctionSpec>, EngineError> {
        self.inner
            .read()
            .unwrap()
            .get(name)
            .cloned()
            .ok_or_else(|| EvalError::UnknownFunction(name.to_string()).into())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.inner.read().unwrap().contains_key(name)
    }
}

impl Default for FunctionRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

// ---------------------------------------------------------------------------
// Param helpers shared by the builtin modules
// ---------------------------------------------------------------------------

fn param(name: &str, type_tag: TypeTag) -> Param {
    Param::new(name, type_tag)
}

/// Look up a required argument; absence is an invariant violation because
/// argument maps are complete by construction.
fn required<'a>(
    function: &str,
    args: &'a ArgValues,
    name: &str,
) -> Result<&'a DVal, EngineError> {
    args.get(name).ok_or_else(|| {
        EvalError::UnknownArgument {
            function: function.to_string(),
            argument: name.to_string(),
        }
        .into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_unknown_name_fails() {
        let registry = FunctionRegistry::with_builtins();
        assert!(registry.lookup("nope").is_err());
        assert!(registry.contains("add"));
    }

    #[test]
    fn test_builtin_purity_flags() {
        let registry = FunctionRegistry::with_builtins();
        assert!(registry.lookup("add").unwrap().pure);
        assert!(registry.lookup("map").unwrap().pure);
        assert!(!registry.lookup("now").unwrap().pure);
        assert!(!registry.lookup("log_value").unwrap().pure);
    }

    #[test]
    fn test_preview_hooks() {
        let registry = FunctionRegistry::with_builtins();
        assert!(registry.lookup("map").unwrap().has_preview());
        assert!(!registry.lookup("add").unwrap().has_preview());
    }
}
