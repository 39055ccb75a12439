use crate::error::AddressError;
use crate::path::PathExpr;
use crate::record::Value;

impl PathExpr {
    /// Walk `root` left to right. Stops at the first missing field or
    /// out-of-range index; the resolved value keeps its native type.
    pub fn resolve<'a>(&self, root: &'a Value) -> Result<&'a Value, AddressError> {
        let block = root.as_block().ok_or_else(|| AddressError::NotABlock {
            expr: self.as_str().to_string(),
            segment: self.steps().first().map(|s| s.field.clone()).unwrap_or_default(),
            kind: root.kind(),
        })?;
        self.resolve_in(|name| block.get(name))
    }

    /// Like [`PathExpr::resolve`], for a namespace whose top-level fields
    /// are not stored as one block. `top` looks up the first segment.
    pub fn resolve_in<'a>(
        &self,
        top: impl Fn(&str) -> Option<&'a Value>,
    ) -> Result<&'a Value, AddressError> {
        let expr = || self.as_str().to_string();
        let mut current: Option<&'a Value> = None;

        for step in self.steps() {
            let found = match current {
                None => top(&step.field),
                Some(value) => value
                    .as_block()
                    .ok_or_else(|| AddressError::NotABlock {
                        expr: expr(),
                        segment: step.field.clone(),
                        kind: value.kind(),
                    })?
                    .get(&step.field),
            };
            let mut value = found.ok_or_else(|| AddressError::MissingField {
                expr: expr(),
                segment: step.field.clone(),
            })?;

            let mut segment = step.field.clone();
            for &index in &step.indices {
                let items = value.as_list().ok_or_else(|| AddressError::NotAList {
                    expr: expr(),
                    segment: segment.clone(),
                    kind: value.kind(),
                })?;
                segment.push_str(&format!("[{index}]"));
                value = items.get(index).ok_or_else(|| AddressError::IndexOutOfRange {
                    expr: expr(),
                    segment: segment.clone(),
                    index,
                    len: items.len(),
                })?;
            }
            current = Some(value);
        }

        // Parsing never yields an empty expression.
        current.ok_or_else(|| AddressError::MissingField {
            expr: expr(),
            segment: String::new(),
        })
    }
}
