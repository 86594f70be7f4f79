//! Preview — per-argument live values for the editor.

use crate::error::{EngineError, EvalError};
use crate::eval::executor::Executor;
use crate::model::node::{Node, NodeKind};
use crate::model::scope::Scope;
use crate::model::value::DVal;

impl Executor {
    /// Produce per-argument live values for `node` at `cursor`.
    ///
    /// Arguments are resolved under the empty scope exactly as in
    /// [`Executor::execute`]; the function's preview hook (if any) then maps
    /// the resolved values, in parameter order, to the reported samples. A
    /// function without a hook reports `Incomplete` for every parameter.
    ///
    /// Only function nodes are previewable. Preview never reads or writes
    /// the memo, but it may run impure functions while resolving arguments;
    /// callers treat the result as best-effort.
    pub fn preview(&self, node: &Node, cursor: i64) -> Result<Vec<DVal>, EngineError> {
        let name = match node.kind() {
            NodeKind::Function { name, .. } => name,
            _ => return Err(EvalError::NotPreviewable(node.id).into()),
        };
        let spec = self.registry().lookup(name)?;

        let mut resolved = self.resolve_arguments(node, &Scope::empty())?;
        let values: Vec<DVal> = spec
            .parameters
            .iter()
            .map(|p| resolved.remove(&p.name).unwrap_or(DVal::Incomplete))
            .collect();

        Ok(spec
            .preview(&values, cursor)
            .unwrap_or_else(|| vec![DVal::Incomplete; spec.parameters.len()]))
    }
}
