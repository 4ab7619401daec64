use serde_json::{Map, Value};

use super::file::StoredFile;

/// Outcome of a successful upload request.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadResult {
    /// One entry per configured field, in configuration order.
    pub files: Vec<(String, Option<StoredFile>)>,
    pub fields: Map<String, Value>,
}

/// Accumulates what one request has stored so far.
#[derive(Debug)]
pub struct UploadBatch {
    slots: Vec<(String, Option<StoredFile>)>,
    fields: Map<String, Value>,
}

impl UploadBatch {
    pub fn new(file_fields: &[String]) -> Self {
        Self {
            slots: file_fields.iter().map(|f| (f.clone(), None)).collect(),
            fields: Map::new(),
        }
    }

    /// Index of the slot configured for `field`, if any.
    pub fn slot(&self, field: &str) -> Option<usize> {
        self.slots.iter().position(|(name, _)| name == field)
    }

    pub fn is_filled(&self, slot: usize) -> bool {
        matches!(self.slots.get(slot), Some((_, Some(_))))
    }

    pub fn fill(&mut self, slot: usize, file: StoredFile) {
        if let Some((_, entry)) = self.slots.get_mut(slot) {
            *entry = Some(file);
        }
    }

    /// Records a plain form value. Repeated names collect into an array.
    pub fn push_text(&mut self, name: String, value: String) {
        match self.fields.get_mut(&name) {
            Some(Value::Array(values)) => values.push(Value::String(value)),
            Some(existing) => {
                let first = existing.take();
                *existing = Value::Array(vec![first, Value::String(value)]);
            }
            None => {
                self.fields.insert(name, Value::String(value));
            }
        }
    }

    pub fn stored(&self) -> impl Iterator<Item = &StoredFile> {
        self.slots.iter().filter_map(|(_, file)| file.as_ref())
    }

    pub fn into_result(self) -> UploadResult {
        UploadResult {
            files: self.slots,
            fields: self.fields,
        }
    }
}
