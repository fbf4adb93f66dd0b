//! Minimal bibliographic field model.
//!
//! Just enough MARC to drive identifier and EC extraction: iterate fields
//! by tag, read indicators, read subfields by code. Records are decoded
//! from the MARC-in-JSON layout ingestion hands us:
//!
//! ```json
//! {
//!   "leader": "00000cas a2200000 a 4500",
//!   "fields": [
//!     {"001": "ocm01768512"},
//!     {"035": {"ind1": " ", "ind2": " ", "subfields": [{"a": "(OCoLC)1768512"}]}}
//!   ]
//! }
//! ```

use serde_json::Value;

use crate::error::BibError;

#[derive(Debug, Clone)]
pub struct DataField {
    pub tag: String,
    pub ind1: char,
    pub ind2: char,
    subfields: Vec<(char, String)>,
}

impl DataField {
    /// First subfield with the given code.
    pub fn subfield(&self, code: char) -> Option<&str> {
        self.subfields
            .iter()
            .find(|(c, _)| *c == code)
            .map(|(_, v)| v.as_str())
    }

    /// All subfields with the given code, in field order.
    pub fn subfields(&self, code: char) -> impl Iterator<Item = &str> {
        self.subfields
            .iter()
            .filter(move |(c, _)| *c == code)
            .map(|(_, v)| v.as_str())
    }
}

#[derive(Debug, Clone)]
pub struct BibRecord {
    pub leader: String,
    controls: Vec<(String, String)>,
    data: Vec<DataField>,
}

impl BibRecord {
    pub fn from_json(blob: &Value) -> Result<Self, BibError> {
        let obj = blob
            .as_object()
            .ok_or_else(|| BibError::Malformed("top level is not an object".into()))?;
        let leader = obj
            .get("leader")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        let fields = obj
            .get("fields")
            .and_then(Value::as_array)
            .ok_or_else(|| BibError::Malformed("missing fields array".into()))?;

        let mut controls = Vec::new();
        let mut data = Vec::new();
        for entry in fields {
            let map = entry
                .as_object()
                .ok_or_else(|| BibError::Malformed("field entry is not an object".into()))?;
            let (tag, body) = map
                .iter()
                .next()
                .ok_or_else(|| BibError::Malformed("empty field entry".into()))?;
            match body {
                Value::String(v) => controls.push((tag.clone(), v.clone())),
                Value::Object(f) => {
                    let ind = |key: &str| {
                        f.get(key)
                            .and_then(Value::as_str)
                            .and_then(|s| s.chars().next())
                            .unwrap_or(' ')
                    };
                    let mut subfields = Vec::new();
                    if let Some(subs) = f.get("subfields").and_then(Value::as_array) {
                        for sub in subs {
                            let sub = sub.as_object().ok_or_else(|| {
                                BibError::Malformed(format!("bad subfield in {tag}"))
                            })?;
                            for (code, value) in sub {
                                if let (Some(c), Some(v)) = (code.chars().next(), value.as_str())
                                {
                                    subfields.push((c, v.to_string()));
                                }
                            }
                        }
                    }
                    data.push(DataField {
                        tag: tag.clone(),
                        ind1: ind("ind1"),
                        ind2: ind("ind2"),
                        subfields,
                    });
                }
                _ => return Err(BibError::Malformed(format!("field {tag} has no body"))),
            }
        }
        Ok(Self {
            leader,
            controls,
            data,
        })
    }

    /// First control field with the given tag.
    pub fn control(&self, tag: &str) -> Option<&str> {
        self.controls
            .iter()
            .find(|(t, _)| t == tag)
            .map(|(_, v)| v.as_str())
    }

    /// All data fields with the given tag, in record order.
    pub fn fields<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a DataField> {
        self.data.iter().filter(move |f| f.tag == tag)
    }
}
