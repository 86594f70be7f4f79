use super::{param, required, FunctionSpec};
use crate::error::EngineError;
use crate::model::argument::TypeTag;
use crate::model::value::DVal;

pub(super) fn functions() -> Vec<FunctionSpec> {
    vec![
        FunctionSpec::new("concat", |args| {
            let a = required("concat", args, "a")?;
            let b = required("concat", args, "b")?;
            if a.is_incomplete() || b.is_incomplete() {
                return Ok(DVal::Incomplete);
            }
            let a = expect_str("concat", a)?;
            let b = expect_str("concat", b)?;
            Ok(DVal::Str(format!("{}{}", a, b)))
        })
        .with_params(vec![param("a", TypeTag::Str), param("b", TypeTag::Str)]),
        FunctionSpec::new("length", |args| {
            let v = required("length", args, "s")?;
            if v.is_incomplete() {
                return Ok(DVal::Incomplete);
            }
            let s = expect_str("length", v)?;
            Ok(DVal::Int(s.chars().count() as i64))
        })
        .with_params(vec![param("s", TypeTag::Str)]),
        FunctionSpec::new("uppercase", |args| {
            let v = required("uppercase", args, "s")?;
            if v.is_incomplete() {
                return Ok(DVal::Incomplete);
            }
            let s = expect_str("uppercase", v)?;
            Ok(DVal::Str(s.to_uppercase()))
        })
        .with_params(vec![param("s", TypeTag::Str)]),
    ]
}

fn expect_str<'a>(name: &str, v: &'a DVal) -> Result<&'a str, EngineError> {
    v.as_str().ok_or_else(|| {
        EngineError::function(name, format!("expected a string, got {}", v.type_name()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn arg(name: &str, v: DVal) -> crate::stdlib::ArgValues {
        let mut args = HashMap::new();
        args.insert(name.to_string(), v);
        args
    }

    #[test]
    fn test_length_counts_chars() {
        let registry = crate::stdlib::FunctionRegistry::with_builtins();
        let length = registry.lookup("length").unwrap();
        assert_eq!(
            length.invoke(&arg("s", DVal::Str("héllo".to_string()))).unwrap(),
            DVal::Int(5)
        );
        assert_eq!(
            length.invoke(&arg("s", DVal::Incomplete)).unwrap(),
            DVal::Incomplete
        );
        assert!(length.invoke(&arg("s", DVal::Int(3))).is_err());
    }
}
