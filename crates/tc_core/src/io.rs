use crate::error::{Result, TacticError};
use crate::model::Document;
use serde_json::Value;
use std::fs;
use std::path::Path;

/// Write one document as pretty JSON
pub fn save_document_json<P: AsRef<Path>>(doc: &Document, path: P) -> anyhow::Result<()> {
    let data = serde_json::to_string_pretty(doc)?;
    fs::write(path, data)?;
    Ok(())
}

/// Read a single document or pick one out of a database export
pub fn load_document_json<P: AsRef<Path>>(
    path: P,
    tactic_id: Option<&str>,
    index: usize,
) -> anyhow::Result<Document> {
    let data = fs::read_to_string(path)?;
    let value: Value = serde_json::from_str(&data)?;
    let tactic = select_tactic(&value, tactic_id, index)?;
    ensure_tactic_schema(tactic)?;
    let doc: Document = serde_json::from_value(tactic.clone())?;
    Ok(doc)
}

/// Selects one tactic from either a single tactic object or an export array.
///
/// With an array, `tactic_id` wins when given; otherwise `index` is used.
pub fn select_tactic<'a>(value: &'a Value, tactic_id: Option<&str>, index: usize) -> Result<&'a Value> {
    let list = match value {
        Value::Object(_) => return Ok(value),
        Value::Array(list) => list,
        _ => {
            return Err(TacticError::Selection(
                "tactic JSON must be an object or an array of objects".to_string(),
            ))
        }
    };

    if list.is_empty() {
        return Err(TacticError::Selection("tactic list is empty".to_string()));
    }

    if let Some(id) = tactic_id {
        return list
            .iter()
            .find(|t| {
                let meta = &t["meta"];
                meta["tactic_id"].as_str() == Some(id) || meta["id"].as_str() == Some(id)
            })
            .ok_or_else(|| TacticError::NotFound { tactic_id: id.to_string() });
    }

    let tactic = list.get(index).ok_or_else(|| {
        TacticError::Selection(format!("index {index} out of range (len={})", list.len()))
    })?;
    if !tactic.is_object() {
        return Err(TacticError::Selection(format!("entry {index} is not an object")));
    }
    Ok(tactic)
}

/// Light shape check before full deserialization.
pub fn ensure_tactic_schema(tactic: &Value) -> Result<()> {
    if !tactic.is_object() {
        return Err(TacticError::Validation("tactic must be an object".to_string()));
    }
    if !tactic["meta"].is_object() {
        return Err(TacticError::Validation("tactic missing 'meta' object".to_string()));
    }
    if !tactic["frames"].is_array() {
        return Err(TacticError::Validation("tactic missing 'frames' list".to_string()));
    }
    Ok(())
}
