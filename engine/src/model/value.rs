//! DVal — the universe of runtime values flowing through the graph.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::Arc;

use ordered_float::OrderedFloat;

use crate::error::EngineError;
use crate::model::id::NodeId;

/// Invocable body of a block value. Captures the graph handle, the frozen
/// outer scope, and the block's argument ids; calling it evaluates the
/// block's return node under a fresh argument frame.
#[derive(Clone)]
pub struct BlockFn(Arc<dyn Fn(&[DVal]) -> Result<DVal, EngineError> + Send + Sync>);

impl BlockFn {
    pub fn new(
        f: impl Fn(&[DVal]) -> Result<DVal, EngineError> + Send + Sync + 'static,
    ) -> Self {
        Self(Arc::new(f))
    }

    /// Invoke the block with positional arguments.
    pub fn call(&self, args: &[DVal]) -> Result<DVal, EngineError> {
        (*self.0)(args)
    }
}

/// The value produced by evaluating a node.
///
/// `Incomplete` is the in-band sentinel for an unresolved input: it travels
/// through computations instead of aborting them. `Opaque` wraps a handle to
/// external state (a datastore table); `Block` is a first-class closure over
/// an anonymous sub-graph.
#[derive(Clone)]
pub enum DVal {
    Null,
    Incomplete,
    Bool(bool),
    Int(i64),
    Float(OrderedFloat<f64>),
    Str(String),
    List(Vec<DVal>),
    Record(BTreeMap<String, DVal>),
    /// Handle to a datastore, identified by table name.
    Opaque(String),
    /// Closure constructed from a block node, tagged with the block's id.
    Block(NodeId, BlockFn),
}

impl DVal {
    pub fn float(v: f64) -> DVal {
        DVal::Float(OrderedFloat(v))
    }

    /// Short name of the variant, used for live-value reporting.
    pub fn type_name(&self) -> &'static str {
        match self {
            DVal::Null => "Null",
            DVal::Incomplete => "Incomplete",
            DVal::Bool(_) => "Bool",
            DVal::Int(_) => "Int",
            DVal::Float(_) => "Float",
            DVal::Str(_) => "Str",
            DVal::List(_) => "List",
            DVal::Record(_) => "Record",
            DVal::Opaque(_) => "Opaque",
            DVal::Block(_, _) => "Block",
        }
    }

    pub fn is_incomplete(&self) -> bool {
        matches!(self, DVal::Incomplete)
    }

    /// Truthiness used by the logic and list builtins: `false`, `Null` and
    /// `Incomplete` are falsy, everything else is truthy.
    pub fn is_truthy(&self) -> bool {
        match self {
            DVal::Bool(b) => *b,
            DVal::Null | DVal::Incomplete => false,
            _ => true,
        }
    }

    pub fn as_list(&self) -> Option<&[DVal]> {
        match self {
            DVal::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            DVal::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Canonical JSON form, total on non-closure, non-opaque values.
    ///
    /// Record and argument keys come out order-stable (serde_json's default
    /// map preserves sorted key order), so the rendered string is usable as
    /// a memo key. Returns `None` for values that must not be memoized.
    pub fn canonical_json(&self) -> Option<serde_json::Value> {
        match self {
            DVal::Null => Some(serde_json::Value::Null),
            DVal::Incomplete => Some(serde_json::json!({ "__incomplete__": true })),
            DVal::Bool(b) => Some(serde_json::Value::Bool(*b)),
            DVal::Int(i) => Some(serde_json::Value::Number((*i).into())),
            DVal::Float(f) => serde_json::Number::from_f64(f.into_inner()).map(serde_json::Value::Number),
            DVal::Str(s) => Some(serde_json::Value::String(s.clone())),
            DVal::List(items) => items
                .iter()
                .map(|v| v.canonical_json())
                .collect::<Option<Vec<_>>>()
                .map(serde_json::Value::Array),
            DVal::Record(fields) => fields
                .iter()
                .map(|(k, v)| v.canonical_json().map(|j| (k.clone(), j)))
                .collect::<Option<serde_json::Map<_, _>>>()
                .map(serde_json::Value::Object),
            DVal::Opaque(_) | DVal::Block(_, _) => None,
        }
    }

    /// JSON projection for the front-end. Unlike [`DVal::canonical_json`]
    /// this is total: non-serializable values degrade to `null`.
    pub fn json_repr(&self) -> serde_json::Value {
        self.canonical_json().unwrap_or(serde_json::Value::Null)
    }
}

/// Canonical, order-stable serialization of a resolved argument map.
///
/// `None` when any value is not canonicalizable (closures, opaque handles):
/// such applications bypass the memo.
pub fn canonical_key(args: &HashMap<String, DVal>) -> Option<String> {
    let mut map = serde_json::Map::new();
    for (name, value) in args {
        map.insert(name.clone(), value.canonical_json()?);
    }
    Some(serde_json::Value::Object(map).to_string())
}

impl From<serde_json::Value> for DVal {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => DVal::Null,
            serde_json::Value::Bool(b) => DVal::Bool(b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    DVal::Int(i)
                } else {
                    DVal::float(n.as_f64().unwrap_or(0.0))
                }
            }
            serde_json::Value::String(s) => DVal::Str(s),
            serde_json::Value::Array(items) => {
                DVal::List(items.into_iter().map(DVal::from).collect())
            }
            serde_json::Value::Object(fields) => DVal::Record(
                fields.into_iter().map(|(k, v)| (k, DVal::from(v))).collect(),
            ),
        }
    }
}

/// Structural equality; blocks compare by the id of the node that produced
/// them, never by closure identity.
impl PartialEq for DVal {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (DVal::Null, DVal::Null) => true,
            (DVal::Incomplete, DVal::Incomplete) => true,
            (DVal::Bool(a), DVal::Bool(b)) => a == b,
            (DVal::Int(a), DVal::Int(b)) => a == b,
            (DVal::Float(a), DVal::Float(b)) => a == b,
            (DVal::Str(a), DVal::Str(b)) => a == b,
            (DVal::List(a), DVal::List(b)) => a == b,
            (DVal::Record(a), DVal::Record(b)) => a == b,
            (DVal::Opaque(a), DVal::Opaque(b)) => a == b,
            (DVal::Block(a, _), DVal::Block(b, _)) => a == b,
            _ => false,
        }
    }
}

impl Eq for DVal {}

impl fmt::Display for DVal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DVal::Null => write!(f, "null"),
            DVal::Incomplete => write!(f, "<incomplete>"),
            DVal::Bool(b) => write!(f, "{}", b),
            DVal::Int(i) => write!(f, "{}", i),
            DVal::Float(v) => write!(f, "{}", v.into_inner()),
            DVal::Str(s) => write!(f, "{}", s),
            DVal::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
            DVal::Record(fields) => {
                write!(f, "{{")?;
                for (i, (k, v)) in fields.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}: {}", k, v)?;
                }
                write!(f, "}}")
            }
            DVal::Opaque(table) => write!(f, "<datastore: {}>", table),
            DVal::Block(id, _) => write!(f, "<block: {}>", id),
        }
    }
}

impl fmt::Debug for DVal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DVal::Block(id, _) => f.debug_tuple("Block").field(id).finish(),
            other => write!(f, "{}({})", other.type_name(), other),
        }
    }
}
