use serde_json::Value;

use crate::foundation::error::{ReelError, ReelResult};

/// Title drawn when the document has none.
pub const FALLBACK_TITLE: &str = "Data from JSON";
/// Label drawn for items without a usable name.
pub const FALLBACK_ITEM_NAME: &str = "Item";

/// A parsed JSON document driving the visualization.
///
/// Fields are read defensively: a missing or mistyped `title`, `data`, `name` or `value` falls
/// back instead of failing.
#[derive(Clone, Debug, PartialEq)]
pub struct Document {
    value: Value,
}

impl Document {
    /// Wrap an already parsed JSON value.
    pub fn from_value(value: Value) -> Self {
        Self { value }
    }

    /// Parse JSON text.
    pub fn parse(text: &str) -> ReelResult<Self> {
        let value: Value = serde_json::from_str(text).map_err(|e| ReelError::parse(e.to_string()))?;
        Ok(Self { value })
    }

    /// Borrow the underlying JSON value.
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Title text, or [`FALLBACK_TITLE`].
    pub fn title(&self) -> String {
        self.value
            .get("title")
            .and_then(truthy_text)
            .unwrap_or_else(|| FALLBACK_TITLE.to_owned())
    }

    /// Item rows when `data` is an array; `None` selects the whole-document dump.
    pub fn items(&self) -> Option<Vec<Item<'_>>> {
        let data = self.value.get("data")?.as_array()?;
        Some(
            data.iter()
                .enumerate()
                .map(|(index, raw)| Item { index, raw })
                .collect(),
        )
    }

    /// Largest numeric item value; non-numeric values count as zero.
    ///
    /// Returns `None` when there is no item sequence or it is empty.
    pub fn max_item_value(&self) -> Option<f64> {
        let items = self.items()?;
        items
            .iter()
            .map(|it| it.value().and_then(Value::as_f64).unwrap_or(0.0))
            .reduce(f64::max)
    }
}

/// One entry of the document's `data` array.
#[derive(Clone, Copy, Debug)]
pub struct Item<'a> {
    index: usize,
    raw: &'a Value,
}

impl<'a> Item<'a> {
    /// Position in the `data` array.
    pub fn index(&self) -> usize {
        self.index
    }

    /// The raw JSON entry.
    pub fn raw(&self) -> &'a Value {
        self.raw
    }

    /// Display name, or [`FALLBACK_ITEM_NAME`].
    pub fn name(&self) -> String {
        self.raw
            .get("name")
            .and_then(truthy_text)
            .unwrap_or_else(|| FALLBACK_ITEM_NAME.to_owned())
    }

    /// The `value` field, if present.
    pub fn value(&self) -> Option<&'a Value> {
        self.raw.get("value")
    }

    /// Numeric value when it should draw a bar: a finite, non-zero number.
    pub fn bar_value(&self) -> Option<f64> {
        let v = self.value()?.as_f64()?;
        (v.is_finite() && v != 0.0).then_some(v)
    }

    /// Text line: `"<name>: <json>"`. A falsy `value` serializes the whole entry instead.
    pub fn label(&self) -> String {
        let shown = match self.value() {
            Some(v) if is_truthy(v) => v,
            _ => self.raw,
        };
        format!("{}: {}", self.name(), compact_json(shown))
    }
}

/// JavaScript-style truthiness of a JSON value.
pub(crate) fn is_truthy(v: &Value) -> bool {
    match v {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn truthy_text(v: &Value) -> Option<String> {
    if !is_truthy(v) {
        return None;
    }
    match v {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(number_text(n)),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Compact JSON with integral floats printed without a fraction (`10.0` -> `10`).
pub(crate) fn compact_json(v: &Value) -> String {
    integral_numbers(v).to_string()
}

/// Copy of `v` with every integral float, at any depth, turned into an integer.
pub(crate) fn integral_numbers(v: &Value) -> Value {
    match v {
        Value::Number(n) => Value::Number(integral(n).unwrap_or_else(|| n.clone())),
        Value::Array(items) => Value::Array(items.iter().map(integral_numbers).collect()),
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(k, v)| (k.clone(), integral_numbers(v)))
                .collect(),
        ),
        other => other.clone(),
    }
}

fn integral(n: &serde_json::Number) -> Option<serde_json::Number> {
    let f = n.as_f64().filter(|_| n.is_f64())?;
    (f.fract() == 0.0 && f.abs() < 1e15).then(|| serde_json::Number::from(f as i64))
}

fn number_text(n: &serde_json::Number) -> String {
    integral(n).unwrap_or_else(|| n.clone()).to_string()
}

#[cfg(test)]
#[path = "../../tests/unit/document/model.rs"]
mod tests;
