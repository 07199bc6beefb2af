//! Documents — metadata for identity papers, certificates and the like.
//!
//! The file itself lives elsewhere; `storage_path` points at it.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::{
  field::Field,
  record::{OwnerId, RecordId, Resource},
  validate::{Validate, ValidationErrors},
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
  pub id:           RecordId,
  pub user_id:      OwnerId,
  pub filename:     String,
  pub doc_type:     Option<String>,
  pub expiry_date:  Option<NaiveDate>,
  /// Local path or object-store key.
  pub storage_path: String,
  /// Set by the store on insert.
  pub created_at:   DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NewDocument {
  pub filename:     String,
  pub doc_type:     Option<String>,
  pub expiry_date:  Option<NaiveDate>,
  pub storage_path: String,
}

impl NewDocument {
  pub fn new(filename: impl Into<String>, storage_path: impl Into<String>) -> Self {
    Self {
      filename:     filename.into(),
      doc_type:     None,
      expiry_date:  None,
      storage_path: storage_path.into(),
    }
  }
}

impl Validate for NewDocument {
  fn validate(&self) -> Result<(), ValidationErrors> {
    Ok(())
  }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DocumentPatch {
  pub filename:     Field<String>,
  pub doc_type:     Field<String>,
  pub expiry_date:  Field<NaiveDate>,
  pub storage_path: Field<String>,
}

impl Validate for DocumentPatch {
  fn validate(&self) -> Result<(), ValidationErrors> {
    let mut errs = ValidationErrors::new();
    errs.not_null("filename", &self.filename);
    errs.not_null("storage_path", &self.storage_path);
    errs.finish()
  }
}

impl Resource for Document {
  type New = NewDocument;
  type Patch = DocumentPatch;

  const NAME: &'static str = "document";
  const COLLECTION: &'static str = "documents";

  fn id(&self) -> RecordId { self.id }

  fn owner(&self) -> OwnerId { self.user_id }
}
