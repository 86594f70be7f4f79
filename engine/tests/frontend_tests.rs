use engine::{
    Arg, DVal, FunctionRegistry, GraphStore, LiveValue, Node, NodeView, Pos,
};

fn project_json(node: &Node, registry: &FunctionRegistry, live: LiveValue) -> serde_json::Value {
    let view = NodeView::project(node, registry, live).unwrap();
    serde_json::to_value(view).unwrap()
}

#[test]
fn test_wire_field_names_are_stable() {
    let registry = FunctionRegistry::with_builtins();
    let node = Node::value("42");
    let json = project_json(&node, &registry, LiveValue::from_value(&DVal::Int(42)));

    let obj = json.as_object().unwrap();
    for key in [
        "name", "id", "type", "pos", "live", "cursor", "arguments", "block_id", "arg_ids",
    ] {
        assert!(obj.contains_key(key), "missing wire field {}", key);
    }
    let live = obj["live"].as_object().unwrap();
    for key in ["value", "type", "json", "exc"] {
        assert!(live.contains_key(key), "missing live field {}", key);
    }

    assert_eq!(json["type"], "value");
    assert_eq!(json["name"], "42");
    assert_eq!(json["live"]["value"], "42");
    assert_eq!(json["live"]["type"], "Int");
    assert_eq!(json["live"]["json"], 42);
    assert_eq!(json["live"]["exc"], serde_json::Value::Null);
}

#[test]
fn test_function_arguments_in_parameter_order() {
    let registry = FunctionRegistry::with_builtins();
    let mut store = GraphStore::new();
    let v = store.insert(Node::value("2"));
    let f = store.insert(Node::function("add", &registry).unwrap());
    store.connect(f, "a", v).unwrap();
    store
        .get_mut(f)
        .unwrap()
        .set_arg("b", Arg::Const(DVal::Int(3)))
        .unwrap();

    let json = project_json(store.get(f).unwrap(), &registry, LiveValue::incomplete());
    let arguments = json["arguments"].as_array().unwrap();
    assert_eq!(arguments.len(), 2);
    assert_eq!(arguments[0][0], "a");
    assert_eq!(arguments[0][1], serde_json::json!({ "AEdge": v.as_u64() }));
    assert_eq!(arguments[1][0], "b");
    assert_eq!(arguments[1][1], serde_json::json!({ "AConst": "3" }));
}

#[test]
fn test_block_and_arg_projection() {
    let registry = FunctionRegistry::with_builtins();
    let (block, args) = Node::block(2);

    let block_json = project_json(&block, &registry, LiveValue::incomplete());
    assert_eq!(block_json["type"], "block");
    assert_eq!(block_json["block_id"], serde_json::Value::Null);
    assert_eq!(block_json["arg_ids"].as_array().unwrap().len(), 2);

    let arg_json = project_json(&args[0], &registry, LiveValue::incomplete());
    assert_eq!(arg_json["type"], "arg");
    assert_eq!(arg_json["block_id"], block.id.as_u64());
    assert_eq!(arg_json["arg_ids"].as_array().unwrap().len(), 2);
    assert!(arg_json["arguments"].as_array().unwrap().is_empty());
}

#[test]
fn test_position_reaches_the_wire() {
    let registry = FunctionRegistry::with_builtins();
    let node = Node::value("42").with_position(Pos::new(120, -40));
    let json = project_json(&node, &registry, LiveValue::incomplete());
    assert_eq!(json["pos"]["x"], 120);
    assert_eq!(json["pos"]["y"], -40);
}

#[test]
fn test_exception_live_value() {
    let registry = FunctionRegistry::with_builtins();
    let node = Node::datastore("users");
    let json = project_json(&node, &registry, LiveValue::exception("table missing"));
    assert_eq!(json["type"], "datastore");
    assert_eq!(json["name"], "users");
    assert_eq!(json["live"]["exc"], "table missing");
}
