use ordered_float::OrderedFloat;

use super::{param, required, ArgValues, FunctionSpec};
use crate::error::EngineError;
use crate::model::argument::TypeTag;
use crate::model::value::DVal;

pub(super) fn functions() -> Vec<FunctionSpec> {
    vec![
        binop("add", |a, b| a + b, |a, b| a + b),
        binop("subtract", |a, b| a - b, |a, b| a - b),
        binop("multiply", |a, b| a * b, |a, b| a * b),
        FunctionSpec::new("divide", |args| {
            with_numbers("divide", args, |a, b| {
                if b == 0.0 {
                    Err(EngineError::function("divide", "division by zero"))
                } else {
                    Ok(DVal::float(a / b))
                }
            })
        })
        .with_params(vec![param("a", TypeTag::Any), param("b", TypeTag::Any)]),
    ]
}

fn binop(
    name: &'static str,
    int_op: fn(i64, i64) -> i64,
    float_op: fn(f64, f64) -> f64,
) -> FunctionSpec {
    FunctionSpec::new(name, move |args| {
        let a = required(name, args, "a")?;
        let b = required(name, args, "b")?;
        match (a, b) {
            (DVal::Incomplete, _) | (_, DVal::Incomplete) => Ok(DVal::Incomplete),
            (DVal::Null, _) | (_, DVal::Null) => Ok(DVal::Incomplete),
            (DVal::Int(x), DVal::Int(y)) => Ok(DVal::Int(int_op(*x, *y))),
            (DVal::Int(x), DVal::Float(y)) => Ok(DVal::float(float_op(*x as f64, y.into_inner()))),
            (DVal::Float(x), DVal::Int(y)) => Ok(DVal::float(float_op(x.into_inner(), *y as f64))),
            (DVal::Float(x), DVal::Float(y)) => {
                Ok(DVal::float(float_op(x.into_inner(), y.into_inner())))
            }
            (a, b) => Err(EngineError::function(
                name,
                format!("expected numbers, got {} and {}", a.type_name(), b.type_name()),
            )),
        }
    })
    .with_params(vec![param("a", TypeTag::Any), param("b", TypeTag::Any)])
}

fn with_numbers(
    name: &'static str,
    args: &ArgValues,
    op: impl FnOnce(f64, f64) -> Result<DVal, EngineError>,
) -> Result<DVal, EngineError> {
    let a = required(name, args, "a")?;
    let b = required(name, args, "b")?;
    let number = |v: &DVal| match v {
        DVal::Int(i) => Some(*i as f64),
        DVal::Float(OrderedFloat(f)) => Some(*f),
        _ => None,
    };
    match (a, b) {
        (DVal::Incomplete, _) | (_, DVal::Incomplete) | (DVal::Null, _) | (_, DVal::Null) => {
            Ok(DVal::Incomplete)
        }
        (a, b) => match (number(a), number(b)) {
            (Some(x), Some(y)) => op(x, y),
            _ => Err(EngineError::function(
                name,
                format!("expected numbers, got {} and {}", a.type_name(), b.type_name()),
            )),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn args2(a: DVal, b: DVal) -> ArgValues {
        let mut args = HashMap::new();
        args.insert("a".to_string(), a);
        args.insert("b".to_string(), b);
        args
    }

    #[test]
    fn test_add_coerces_mixed_operands() {
        let registry = crate::stdlib::FunctionRegistry::with_builtins();
        let add = registry.lookup("add").unwrap();
        assert_eq!(
            add.invoke(&args2(DVal::Int(2), DVal::Int(3))).unwrap(),
            DVal::Int(5)
        );
        assert_eq!(
            add.invoke(&args2(DVal::Int(2), DVal::float(0.5))).unwrap(),
            DVal::float(2.5)
        );
    }

    #[test]
    fn test_incomplete_operand_propagates() {
        let registry = crate::stdlib::FunctionRegistry::with_builtins();
        let add = registry.lookup("add").unwrap();
        assert_eq!(
            add.invoke(&args2(DVal::Int(2), DVal::Incomplete)).unwrap(),
            DVal::Incomplete
        );
    }

    #[test]
    fn test_divide_by_zero_fails() {
        let registry = crate::stdlib::FunctionRegistry::with_builtins();
        let divide = registry.lookup("divide").unwrap();
        assert!(divide.invoke(&args2(DVal::Int(1), DVal::Int(0))).is_err());
        assert_eq!(
            divide.invoke(&args2(DVal::Int(1), DVal::Int(2))).unwrap(),
            DVal::float(0.5)
        );
    }
}
