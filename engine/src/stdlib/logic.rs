use super::{param, required, FunctionSpec};
use crate::model::argument::TypeTag;
use crate::model::value::DVal;

pub(super) fn functions() -> Vec<FunctionSpec> {
    vec![
        FunctionSpec::new("equals", |args| {
            let a = required("equals", args, "a")?;
            let b = required("equals", args, "b")?;
            Ok(DVal::Bool(a == b))
        })
        .with_params(vec![param("a", TypeTag::Any), param("b", TypeTag::Any)]),
        FunctionSpec::new("not", |args| {
            let v = required("not", args, "v")?;
            Ok(DVal::Bool(!v.is_truthy()))
        })
        .with_params(vec![param("v", TypeTag::Any)]),
        // Eager conditional: both branches are already resolved by the time
        // the body runs.
        FunctionSpec::new("if", |args| {
            let cond = required("if", args, "cond")?;
            let branch = if cond.is_truthy() { "then" } else { "else" };
            Ok(required("if", args, branch)?.clone())
        })
        .with_params(vec![
            param("cond", TypeTag::Any),
            param("then", TypeTag::Any),
            param("else", TypeTag::Any),
        ]),
    ]
}
