use std::time::{SystemTime, UNIX_EPOCH};

use log::info;

use super::{param, required, FunctionSpec};
use crate::model::argument::TypeTag;
use crate::model::value::DVal;

pub(super) fn functions() -> Vec<FunctionSpec> {
    vec![
        // Wall clock in milliseconds. Impure: re-executed on every evaluation.
        FunctionSpec::new("now", |_args| {
            let millis = SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_millis() as i64)
                .unwrap_or(0);
            Ok(DVal::Int(millis))
        })
        .impure(),
        // Identity that emits its input through the log facade.
        FunctionSpec::new("log_value", |args| {
            let v = required("log_value", args, "v")?;
            info!("log_value: {}", v);
            Ok(v.clone())
        })
        .with_params(vec![param("v", TypeTag::Any)])
        .impure(),
    ]
}
