//! Rendering helpers shared by every compiler.
//!
//! Nothing here touches session state except [`Bindings`], which collects the
//! values behind each `?` placeholder in the order they are rendered.

use serde_json::{Map, Value};

/// The placeholder token for a bound value.
pub const PLACEHOLDER: &str = "?";

/// Values bound to the placeholders of one compiled statement.
///
/// Values are only recorded while the owning session is in debug or executing
/// mode. Otherwise rendering still emits placeholders but the list stays empty.
#[derive(Debug, Default)]
pub struct Bindings {
    values: Vec<Value>,
    recording: bool,
}

impl Bindings {
    pub fn new(recording: bool) -> Self {
        Self {
            values: Vec::new(),
            recording,
        }
    }

    pub fn is_recording(&self) -> bool {
        self.recording
    }

    pub fn push(&mut self, value: Value) {
        if self.recording {
            self.values.push(value);
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn into_values(self) -> Vec<Value> {
        self.values
    }
}

/// Renders a mapping as a CQL map literal: `{ 'k' : 'v' , 'k2' : 'v2' }`.
///
/// Nested objects, arrays and nulls recurse into the legacy form
/// `'k' : '{ ... } ` which is not valid CQL. Only flat maps are supported.
pub fn render_map(map: &Map<String, Value>) -> String {
    let entries = map
        .iter()
        .map(|(key, value)| render_entry(key, value))
        .collect::<Vec<_>>();
    format!("{{{}}}", entries.join(","))
}

fn render_entry(key: &str, value: &Value) -> String {
    match value {
        Value::Object(inner) => format!(" '{key}' : '{} ", render_map(inner)),
        Value::Array(items) => {
            let inner = items
                .iter()
                .enumerate()
                .map(|(idx, item)| (idx.to_string(), item.clone()))
                .collect::<Map<_, _>>();
            format!(" '{key}' : '{} ", render_map(&inner))
        }
        Value::Null => format!(" '{key}' : '{{}} "),
        scalar => format!(" '{key}' : '{}' ", literal(scalar)),
    }
}

/// Plain text form of a scalar value, without JSON string quotes.
pub fn literal(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Renders one placeholder per value, binding each value in order.
///
/// Arrays contribute one placeholder per element. Any other value is a single
/// placeholder.
pub fn placeholders(value: &Value, bindings: &mut Bindings) -> String {
    match value {
        Value::Array(items) => items
            .iter()
            .map(|item| {
                bindings.push(item.clone());
                PLACEHOLDER
            })
            .collect::<Vec<_>>()
            .join(", "),
        single => {
            bindings.push(single.clone());
            PLACEHOLDER.to_string()
        }
    }
}

/// Binds the whole value as a single parameter, for collection typed columns.
pub fn placeholder_for_array(value: &Value, bindings: &mut Bindings) -> String {
    bindings.push(value.clone());
    PLACEHOLDER.to_string()
}

pub fn quote(name: &str) -> String {
    format!("\"{name}\"")
}
