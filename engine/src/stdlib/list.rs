//! Higher-order list builtins. `map` and `filter` invoke block closures and
//! carry preview hooks that surface the cursor-selected element as the live
//! value for the block argument.

use super::{param, required, FunctionSpec};
use crate::error::EngineError;
use crate::model::argument::TypeTag;
use crate::model::value::DVal;

pub(super) fn functions() -> Vec<FunctionSpec> {
    vec![
        FunctionSpec::new("map", |args| {
            let items = required("map", args, "items")?;
            let f = required("map", args, "f")?;
            if items.is_incomplete() || f.is_incomplete() {
                return Ok(DVal::Incomplete);
            }
            let (items, block) = expect_list_and_block("map", items, f)?;
            let mut out = Vec::with_capacity(items.len());
            for item in items {
                out.push(block.call(&[item.clone()])?);
            }
            Ok(DVal::List(out))
        })
        .with_params(vec![
            param("items", TypeTag::List),
            param("f", TypeTag::Block),
        ])
        .with_preview(element_at_cursor),
        FunctionSpec::new("filter", |args| {
            let items = required("filter", args, "items")?;
            let f = required("filter", args, "f")?;
            if items.is_incomplete() || f.is_incomplete() {
                return Ok(DVal::Incomplete);
            }
            let (items, block) = expect_list_and_block("filter", items, f)?;
            let mut out = Vec::new();
            for item in items {
                if block.call(&[item.clone()])?.is_truthy() {
                    out.push(item.clone());
                }
            }
            Ok(DVal::List(out))
        })
        .with_params(vec![
            param("items", TypeTag::List),
            param("f", TypeTag::Block),
        ])
        .with_preview(element_at_cursor),
        FunctionSpec::new("range", |args| {
            let from = required("range", args, "from")?;
            let to = required("range", args, "to")?;
            match (from, to) {
                (DVal::Incomplete, _) | (_, DVal::Incomplete) => Ok(DVal::Incomplete),
                (DVal::Int(a), DVal::Int(b)) => {
                    Ok(DVal::List((*a..*b).map(DVal::Int).collect()))
                }
                (a, b) => Err(EngineError::function(
                    "range",
                    format!("expected ints, got {} and {}", a.type_name(), b.type_name()),
                )),
            }
        })
        .with_params(vec![param("from", TypeTag::Int), param("to", TypeTag::Int)]),
    ]
}

fn expect_list_and_block<'a>(
    name: &str,
    items: &'a DVal,
    f: &'a DVal,
) -> Result<(&'a [DVal], &'a crate::model::value::BlockFn), EngineError> {
    let items = items.as_list().ok_or_else(|| {
        EngineError::function(name, format!("expected a list, got {}", items.type_name()))
    })?;
    match f {
        DVal::Block(_, func) => Ok((items, func)),
        other => Err(EngineError::function(
            name,
            format!("expected a block, got {}", other.type_name()),
        )),
    }
}

/// Preview: live value for the block argument is the element the caller's
/// cursor points at.
fn element_at_cursor(values: &[DVal], cursor: i64) -> Vec<DVal> {
    let element = values
        .first()
        .and_then(|items| items.as_list())
        .and_then(|items| usize::try_from(cursor).ok().and_then(|i| items.get(i)))
        .cloned()
        .unwrap_or(DVal::Incomplete);
    vec![element]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_at_cursor() {
        let items = DVal::List(vec![DVal::Int(10), DVal::Int(20)]);
        let f = DVal::Null;
        assert_eq!(
            element_at_cursor(&[items.clone(), f.clone()], 1),
            vec![DVal::Int(20)]
        );
        assert_eq!(
            element_at_cursor(&[items, f], 7),
            vec![DVal::Incomplete]
        );
    }
}
