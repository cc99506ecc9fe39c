use std::fmt::Write as _;

use crate::instance::InstanceId;
use crate::value::Value;

use super::Rsz;

impl Rsz {
    /// `Class[index]`, or `null` for the null instance.
    pub fn instance_label(&self, id: InstanceId) -> String {
        match self.instance(id) {
            Some(instance) if !instance.is_null() => format!("{}[{}]", instance.name(), id),
            Some(_) => "null".to_string(),
            None => format!("?[{id}]"),
        }
    }

    /// A value with references spelled as instance labels.
    pub fn value_text(&self, value: &Value) -> String {
        match value {
            Value::Object(id) | Value::UserData(id) => self.instance_label(*id),
            Value::Array(items) => {
                let parts: Vec<String> = items.iter().map(|item| self.value_text(item)).collect();
                format!("[{}]", parts.join(", "))
            }
            other => other.to_string(),
        }
    }

    /// Multi-line dump of one instance: its label, then one line per field.
    pub fn stringify(&self, id: InstanceId) -> String {
        let mut out = self.instance_label(id);
        let Some(instance) = self.instance(id) else {
            return out;
        };
        for (field, value) in instance.fields() {
            let _ = write!(out, "\n  {}: {}", field.name, self.value_text(value));
        }
        out
    }
}
