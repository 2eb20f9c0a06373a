//! Apply a partial set of attributes to a project
//!
//! The patch is a JSON object using the same camelCase names and lenient
//! parsing as a full draft. Unknown names are errors; `id` may only repeat
//! the current value.

use ie_contracts::projects::attributes::ATTRIBUTES;
use ie_core::error::ValidationErrors;
use ie_models::Project;
use serde_json::Value;

pub fn apply_patch(base: &Project, patch: &Value) -> Result<Project, ValidationErrors> {
    let mut errors = ValidationErrors::new();

    let Value::Object(fields) = patch else {
        errors.add_base("Attributes must be a JSON object");
        return Err(errors);
    };

    let mut merged = match serde_json::to_value(base) {
        Ok(Value::Object(map)) => map,
        _ => {
            errors.add_base("Project could not be serialized");
            return Err(errors);
        }
    };

    for (key, value) in fields {
        if key == "id" {
            if value.as_str() != Some(base.id.as_str()) {
                errors.add("id", "cannot be changed");
            }
            continue;
        }
        if !ATTRIBUTES.contains(&key.as_str()) {
            errors.add(key.as_str(), "is not a known attribute");
            continue;
        }
        merged.insert(key.clone(), value.clone());
    }

    if !errors.is_empty() {
        return Err(errors);
    }

    serde_json::from_value(Value::Object(merged)).map_err(|e| {
        errors.add_base(e.to_string());
        errors
    })
}
