use serde::Serialize;
use serde::ser::{SerializeMap, Serializer};

/// A node in a parsed parameter or state file.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Int(i64),
    Float(f64),
    Text(String),
    List(Vec<Value>),
    Block(Block),
}

impl Value {
    /// Type a single token: integer first, then float, then text.
    pub fn from_token(token: &str) -> Self {
        if let Ok(i) = token.parse::<i64>() {
            return Value::Int(i);
        }
        if let Ok(f) = token.parse::<f64>() {
            return Value::Float(f);
        }
        Value::Text(token.to_string())
    }

    /// One token becomes a scalar, several become a list.
    pub fn from_tokens(tokens: &[&str]) -> Self {
        match tokens {
            [single] => Value::from_token(single),
            many => Value::List(many.iter().map(|t| Value::from_token(t)).collect()),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Value::Int(_) => "integer",
            Value::Float(_) => "float",
            Value::Text(_) => "text",
            Value::List(_) => "list",
            Value::Block(_) => "block",
        }
    }

    pub fn as_block(&self) -> Option<&Block> {
        match self {
            Value::Block(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    /// Scalars become report cells; lists and blocks do not.
    pub fn to_cell(&self) -> Option<Cell> {
        match self {
            Value::Int(i) => Some(Cell::Int(*i)),
            Value::Float(f) => Some(Cell::Float(*f)),
            Value::Text(s) => Some(Cell::Text(s.clone())),
            Value::List(_) | Value::Block(_) => None,
        }
    }
}

/// Named node with children kept in declaration order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Block {
    pub label: String,
    entries: Vec<(String, Value)>,
    // Names whose value is a list built from repeated entries.
    repeated: Vec<String>,
}

impl Block {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            entries: Vec::new(),
            repeated: Vec::new(),
        }
    }

    /// Add a child. A repeated name folds into a list at the position of
    /// its first occurrence; later repeats append to that list.
    pub fn insert(&mut self, name: impl Into<String>, value: Value) {
        let name = name.into();
        let Some(pos) = self.entries.iter().position(|(n, _)| *n == name) else {
            self.entries.push((name, value));
            return;
        };

        let slot = &mut self.entries[pos].1;
        if self.repeated.contains(&name) {
            if let Value::List(items) = slot {
                items.push(value);
            }
            return;
        }
        let first = std::mem::replace(slot, Value::List(Vec::new()));
        *slot = Value::List(vec![first, value]);
        self.repeated.push(name);
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    pub fn entries(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for Block {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, value) in &self.entries {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// A single report value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Cell {
    Int(i64),
    Float(f64),
    Text(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokens_are_typed_int_then_float_then_text() {
        assert_eq!(Value::from_token("12"), Value::Int(12));
        assert_eq!(Value::from_token("-3"), Value::Int(-3));
        assert_eq!(Value::from_token("1.5e+01"), Value::Float(15.0));
        assert_eq!(Value::from_token("0.5"), Value::Float(0.5));
        assert_eq!(Value::from_token("out/"), Value::Text("out/".to_string()));
    }

    #[test]
    fn several_tokens_make_a_list() {
        assert_eq!(
            Value::from_tokens(&["0", "0.5"]),
            Value::List(vec![Value::Int(0), Value::Float(0.5)])
        );
        assert_eq!(Value::from_tokens(&["linear"]), Value::Text("linear".into()));
    }

    #[test]
    fn repeated_blocks_fold_into_list_in_order() {
        let mut mixture = Block::new("Mixture");
        mixture.insert("nMonomer", Value::Int(2));
        for phi in [0.4, 0.6, 0.0] {
            let mut p = Block::new("Polymer");
            p.insert("phi", Value::Float(phi));
            mixture.insert("Polymer", Value::Block(p));
        }
        mixture.insert("ds", Value::Float(0.01));

        let names: Vec<&str> = mixture.entries().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["nMonomer", "Polymer", "ds"]);

        let polymers = mixture.get("Polymer").and_then(Value::as_list).unwrap();
        assert_eq!(polymers.len(), 3);
        let phi1 = polymers[1].as_block().and_then(|b| b.get("phi"));
        assert_eq!(phi1, Some(&Value::Float(0.6)));
    }

    #[test]
    fn repeated_scalars_append_in_order() {
        let mut b = Block::new("B");
        for i in 1..=3 {
            b.insert("x", Value::Int(i));
        }
        assert_eq!(
            b.get("x"),
            Some(&Value::List(vec![Value::Int(1), Value::Int(2), Value::Int(3)]))
        );
    }

    #[test]
    fn repeat_of_a_list_value_wraps_it_once() {
        let mut b = Block::new("B");
        b.insert("x", Value::List(vec![Value::Int(1), Value::Int(2)]));
        b.insert("x", Value::Int(3));
        b.insert("x", Value::Int(4));
        let x = b.get("x").and_then(Value::as_list).unwrap();
        assert_eq!(x.len(), 3);
        assert_eq!(x[0], Value::List(vec![Value::Int(1), Value::Int(2)]));
        assert_eq!(x[2], Value::Int(4));
    }

    #[test]
    fn block_serializes_in_declaration_order() {
        let mut b = Block::new("Sweep");
        b.insert("ns", Value::Int(10));
        b.insert("baseFileName", Value::Text("out/".into()));
        b.insert("chi", Value::List(vec![Value::Float(1.0)]));
        let json = serde_json::to_string(&Value::Block(b)).unwrap();
        assert_eq!(json, r#"{"ns":10,"baseFileName":"out/","chi":[1.0]}"#);
    }

    #[test]
    fn only_scalars_become_cells() {
        assert_eq!(Value::Int(4).to_cell(), Some(Cell::Int(4)));
        assert_eq!(Value::Text("a".into()).to_cell(), Some(Cell::Text("a".into())));
        assert_eq!(Value::List(vec![]).to_cell(), None);
        assert_eq!(Value::Block(Block::new("x")).to_cell(), None);
    }
}
