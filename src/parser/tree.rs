//! Structured decoding of a record body into a generic key/value tree
//!
//! Only a handful of paths are ever projected out (owner reference, persistent
//! call lists, method names), so the tree keeps every scalar as text and makes
//! no attempt at round-tripping.

use serde_yaml::Value;

/// Decoded record body
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Scalar(String),
    Mapping(Vec<(String, Node)>),
    Sequence(Vec<Node>),
}

/// Decode a prepared record body (see `SerializedRecord::structured_body`)
pub fn decode(body: &str) -> Result<Node, String> {
    let value: Value = serde_yaml::from_str(body).map_err(|e| e.to_string())?;
    Ok(Node::from(value))
}

impl From<Value> for Node {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Node::Scalar(String::new()),
            Value::Bool(b) => Node::Scalar(b.to_string()),
            Value::Number(n) => Node::Scalar(n.to_string()),
            Value::String(s) => Node::Scalar(s),
            Value::Sequence(items) => Node::Sequence(items.into_iter().map(Node::from).collect()),
            Value::Mapping(map) => Node::Mapping(
                map.into_iter()
                    .filter_map(|(k, v)| scalar_key(k).map(|k| (k, Node::from(v))))
                    .collect(),
            ),
            Value::Tagged(tagged) => Node::from(tagged.value),
        }
    }
}

fn scalar_key(key: Value) -> Option<String> {
    match key {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

impl Node {
    /// Child of a mapping by key
    pub fn get(&self, key: &str) -> Option<&Node> {
        match self {
            Node::Mapping(entries) => entries.iter().find(|(k, _)| k == key).map(|(_, v)| v),
            _ => None,
        }
    }

    /// Follow a chain of mapping keys
    pub fn path(&self, keys: &[&str]) -> Option<&Node> {
        keys.iter().try_fold(self, |node, key| node.get(key))
    }

    pub fn as_scalar(&self) -> Option<&str> {
        match self {
            Node::Scalar(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&[Node]> {
        match self {
            Node::Sequence(items) => Some(items),
            _ => None,
        }
    }

    /// Values of the top-level mapping (the object body under its type key)
    pub fn root_bodies(&self) -> impl Iterator<Item = &Node> {
        let entries: &[(String, Node)] = match self {
            Node::Mapping(entries) => entries.as_slice(),
            _ => &[],
        };
        entries.iter().map(|(_, v)| v)
    }

    /// Method names of every persistent call under this node, in source order
    ///
    /// Calls live at `<event>.m_PersistentCalls.m_Calls[*].m_MethodName`, with
    /// the event nested arbitrarily deep (`m_OnClick` on buttons,
    /// `m_Delegates[*].callback` on event triggers).
    pub fn persistent_call_targets(&self) -> Vec<String> {
        let mut targets = Vec::new();
        self.collect_call_targets(&mut targets);
        targets
    }

    fn collect_call_targets(&self, targets: &mut Vec<String>) {
        match self {
            Node::Mapping(entries) => {
                for (key, child) in entries {
                    if key == "m_PersistentCalls" {
                        collect_calls(child, targets);
                    } else {
                        child.collect_call_targets(targets);
                    }
                }
            }
            Node::Sequence(items) => {
                for item in items {
                    item.collect_call_targets(targets);
                }
            }
            Node::Scalar(_) => {}
        }
    }
}

fn collect_calls(persistent_calls: &Node, targets: &mut Vec<String>) {
    let Some(calls) = persistent_calls.get("m_Calls").and_then(Node::as_sequence) else {
        return;
    };

    for call in calls {
        if let Some(method) = call.get("m_MethodName").and_then(Node::as_scalar) {
            if !method.is_empty() {
                targets.push(method.to_string());
            }
        }
    }
}
