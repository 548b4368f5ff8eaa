//! Parsing of the array's XML responses into ordered entity records.
//!
//! Every response is a `RESPONSE` element containing `OBJECT` blocks with
//! `PROPERTY` children, plus one trailing status OBJECT describing the
//! outcome of the command itself.

use roxmltree::{Document, Node};

use crate::catalog::QuerySpec;
use crate::error::CheckError;

/// Field values extracted for one OBJECT, in the order of the
/// subcommand's field table. Values are kept verbatim; a property missing
/// from the OBJECT is `None` rather than a parse failure.
#[derive(Clone, Debug, Default)]
pub struct EntityRecord {
    fields: Vec<(&'static str, Option<String>)>,
}

impl EntityRecord {
    pub fn get(&self, label: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(l, _)| *l == label)
            .and_then(|(_, v)| v.as_deref())
    }

    pub fn fields(&self) -> impl Iterator<Item = (&'static str, Option<&str>)> {
        self.fields.iter().map(|(l, v)| (*l, v.as_deref()))
    }

    /// True when not a single property could be extracted.
    pub fn is_empty(&self) -> bool {
        self.fields.iter().all(|(_, v)| v.is_none())
    }

    /// Appends the fields of a companion record (disks + disk-statistics).
    /// Labels already present keep their value.
    pub fn merge(&mut self, other: EntityRecord) {
        for (label, value) in other.fields {
            if self.fields.iter().any(|(l, _)| *l == label) {
                continue;
            }
            self.fields.push((label, value));
        }
    }

    #[cfg(test)]
    pub fn from_pairs(pairs: Vec<(&'static str, Option<String>)>) -> Self {
        EntityRecord { fields: pairs }
    }
}

/// Extracts the session key from a login response.
pub fn parse_session_key(body: &str) -> Result<String, CheckError> {
    let doc = parse_document(body)?;
    let status = status_object(&doc)
        .ok_or_else(|| CheckError::Parse("login response carries no status object".into()))?;

    let response = property_text(status, "response")
        .ok_or_else(|| CheckError::Parse("login response carries no response property".into()))?;

    match property_text(status, "response-type") {
        Some("Success") => Ok(response.to_string()),
        _ => Err(CheckError::Authentication(response.to_string())),
    }
}

/// Collects one record per OBJECT matching the subcommand's basetype, in
/// response order. An error reported by the array itself is re-surfaced
/// as an authentication failure when it concerns the session, otherwise
/// as a parse failure.
pub fn parse_records(body: &str, spec: &QuerySpec) -> Result<Vec<EntityRecord>, CheckError> {
    let doc = parse_document(body)?;
    check_api_status(&doc)?;

    let records = doc
        .descendants()
        .filter(|n| n.has_tag_name("OBJECT") && n.attribute("basetype") == Some(spec.basetype))
        .map(|object| EntityRecord {
            fields: spec
                .fields
                .iter()
                .map(|f| {
                    let value = property_text(object, f.property).map(str::to_string);
                    (f.label, value)
                })
                .collect(),
        })
        .collect();

    Ok(records)
}

fn parse_document(body: &str) -> Result<Document<'_>, CheckError> {
    let doc = Document::parse(body)
        .map_err(|e| CheckError::Parse(format!("response is not valid XML: {e}")))?;
    if !doc.root_element().has_tag_name("RESPONSE") {
        return Err(CheckError::Parse(
            "response is not an MSA API document".into(),
        ));
    }
    Ok(doc)
}

fn status_object<'a>(doc: &'a Document<'_>) -> Option<Node<'a, 'a>> {
    doc.descendants()
        .find(|n| n.has_tag_name("OBJECT") && n.attribute("basetype") == Some("status"))
}

fn property_text<'a>(object: Node<'a, 'a>, name: &str) -> Option<&'a str> {
    object
        .children()
        .find(|n| n.has_tag_name("PROPERTY") && n.attribute("name") == Some(name))
        .and_then(|n| n.text())
}

fn check_api_status(doc: &Document<'_>) -> Result<(), CheckError> {
    let Some(status) = status_object(doc) else {
        return Ok(());
    };
    if property_text(status, "response-type") != Some("Error") {
        return Ok(());
    }

    let message = property_text(status, "response")
        .unwrap_or("the array reported an error without a message")
        .to_string();

    // A rejected or expired session key is an authentication problem, not
    // a malformed response.
    let lowered = message.to_lowercase();
    if lowered.contains("session") || lowered.contains("authentication") {
        Err(CheckError::Authentication(message))
    } else {
        Err(CheckError::Parse(message))
    }
}
