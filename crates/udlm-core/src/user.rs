//! Users — the identities that own records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::record::OwnerId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
  pub id:            OwnerId,
  pub email:         String,
  /// argon2 PHC string. Never serialised.
  #[serde(skip_serializing, default)]
  pub password_hash: String,
  pub created_at:    DateTime<Utc>,
}

/// Canonical form used for storage and lookup.
pub fn normalize_email(email: &str) -> String { email.trim().to_lowercase() }

/// `local@domain` with exactly one `@`, both parts non-empty and no
/// whitespace. Deliverability is not checked.
pub fn is_plausible_email(email: &str) -> bool {
  match email.split_once('@') {
    Some((local, domain)) => {
      !local.is_empty()
        && !domain.is_empty()
        && !domain.contains('@')
        && !email.chars().any(char::is_whitespace)
    }
    None => false,
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn password_hash_is_not_serialised() {
    let user = User {
      id:            OwnerId::new(1),
      email:         "a@example.com".into(),
      password_hash: "$argon2id$secret".into(),
      created_at:    Utc::now(),
    };
    let json = serde_json::to_string(&user).unwrap();
    assert!(!json.contains("argon2"), "{json}");
    assert!(!json.contains("password_hash"), "{json}");
  }

  #[test]
  fn email_needs_local_part_and_domain() {
    assert!(is_plausible_email("alice@example.com"));
    assert!(is_plausible_email("a@b"));
    for bad in ["@", "alice@", "@example.com", "alice", "a@b@c", "al ice@example.com", ""] {
      assert!(!is_plausible_email(bad), "{bad:?}");
    }
  }

  #[test]
  fn emails_are_case_and_space_insensitive() {
    assert_eq!(normalize_email("  Alice@Example.COM "), "alice@example.com");
  }
}
