//! Integration tests for `SqliteStore` against an in-memory database.

use chrono::{NaiveDate, NaiveDateTime};
use udlm_core::{
  Field, OwnerId, Resource,
  document::{Document, DocumentPatch, NewDocument},
  password::{NewPasswordEntry, PasswordEntry, PasswordEntryPatch},
  reminder::{NewReminder, Reminder, ReminderPatch},
  store::{OwnedStore, UserStore},
  subscription::{NewSubscription, Subscription, SubscriptionPatch},
};

use crate::{Error, SqliteStore, table::Table};

type Subs = Subscription;

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

async fn user(s: &SqliteStore, email: &str) -> OwnerId {
  s.add_user(email.into(), "$argon2id$placeholder".into())
    .await
    .unwrap()
    .expect("fresh email")
    .id
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate { NaiveDate::from_ymd_opt(y, m, d).unwrap() }

fn at(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
  date(y, m, d).and_hms_opt(h, 0, 0).unwrap()
}

fn netflix() -> NewSubscription {
  NewSubscription::new("Netflix", "monthly").due_on(date(2024, 6, 1))
}

// ─── Users ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn add_and_find_user() {
  let s = store().await;
  let id = user(&s, "alice@example.com").await;

  let found = s.find_user_by_email("alice@example.com").await.unwrap().unwrap();
  assert_eq!(found.id, id);
  assert_eq!(found.password_hash, "$argon2id$placeholder");

  assert!(s.find_user_by_email("bob@example.com").await.unwrap().is_none());
}

#[tokio::test]
async fn duplicate_email_returns_none() {
  let s = store().await;
  user(&s, "alice@example.com").await;
  let again = s
    .add_user("alice@example.com".into(), "other".into())
    .await
    .unwrap();
  assert!(again.is_none());
}

// ─── Create / list ───────────────────────────────────────────────────────────

#[tokio::test]
async fn create_fills_defaults_and_assigns_id() {
  let s = store().await;
  let alice = user(&s, "alice@example.com").await;

  let sub = OwnedStore::<Subs>::create(&s, alice, netflix()).await.unwrap();
  assert!(sub.id > 0);
  assert_eq!(sub.user_id, alice);
  assert_eq!(sub.name, "Netflix");
  assert_eq!(sub.currency, "INR");
  assert!(!sub.auto_detected);
  assert!(sub.is_active);
  assert_eq!(sub.next_payment_date, Some(date(2024, 6, 1)));
  assert_eq!(sub.provider, None);
}

async fn create_owned<R: Table>(s: &SqliteStore, owner: OwnerId, input: R::New) -> R {
  let record = OwnedStore::<R>::create(s, owner, input).await.unwrap();
  assert!(Resource::id(&record) > 0, "{}", R::NAME);
  assert_eq!(Resource::owner(&record), owner, "{}", R::NAME);
  record
}

#[tokio::test]
async fn every_resource_records_its_owner() {
  let s = store().await;
  let alice = user(&s, "alice@example.com").await;

  create_owned::<Subs>(&s, alice, netflix()).await;
  create_owned::<Reminder>(&s, alice, NewReminder::new("Rent", at(2024, 7, 1, 9))).await;
  create_owned::<Document>(&s, alice, NewDocument::new("pan.pdf", "/vault/pan.pdf")).await;
  create_owned::<PasswordEntry>(&s, alice, NewPasswordEntry::new("Gmail", "alice", "ct")).await;
}

#[tokio::test]
async fn create_then_list_round_trips() {
  let s = store().await;
  let alice = user(&s, "alice@example.com").await;

  let mut input = netflix();
  input.provider = Some("Netflix Inc.".into());
  input.amount = Some(649.0);
  input.notes = Some("family plan".into());
  let created = OwnedStore::<Subs>::create(&s, alice, input).await.unwrap();

  let listed = OwnedStore::<Subs>::list(&s, alice).await.unwrap();
  assert_eq!(listed.len(), 1);
  assert_eq!(listed[0], created);
  assert_eq!(listed[0].amount, Some(649.0));
}

#[tokio::test]
async fn duplicate_names_are_permitted() {
  let s = store().await;
  let alice = user(&s, "alice@example.com").await;
  let a = OwnedStore::<Subs>::create(&s, alice, netflix()).await.unwrap();
  let b = OwnedStore::<Subs>::create(&s, alice, netflix()).await.unwrap();
  assert_ne!(a.id, b.id);
  assert_eq!(OwnedStore::<Subs>::list(&s, alice).await.unwrap().len(), 2);
}

#[tokio::test]
async fn invalid_payload_is_rejected_before_insert() {
  let s = store().await;
  let alice = user(&s, "alice@example.com").await;

  let err = OwnedStore::<Subs>::create(&s, alice, NewSubscription::new("Netflix", ""))
    .await
    .unwrap_err();
  assert!(matches!(err, Error::Core(udlm_core::Error::Validation(ref e)) if e.has("billing_cycle")));
  assert!(OwnedStore::<Subs>::list(&s, alice).await.unwrap().is_empty());
}

#[tokio::test]
async fn create_for_unknown_owner_is_a_store_failure() {
  let s = store().await;
  let err = OwnedStore::<Subs>::create(&s, OwnerId::new(999), netflix())
    .await
    .unwrap_err();
  assert!(matches!(err, Error::Database(_)));
}

#[tokio::test]
async fn list_orders_by_next_payment_date_with_undated_first() {
  let s = store().await;
  let alice = user(&s, "alice@example.com").await;

  for (name, due) in [
    ("C", Some(date(2024, 9, 1))),
    ("A", Some(date(2024, 3, 1))),
    ("U", None),
    ("B", Some(date(2024, 6, 1))),
    ("A2", Some(date(2024, 3, 1))),
  ] {
    let mut input = NewSubscription::new(name, "monthly");
    input.next_payment_date = due;
    OwnedStore::<Subs>::create(&s, alice, input).await.unwrap();
  }

  let names = |subs: Vec<Subscription>| subs.into_iter().map(|s| s.name).collect::<Vec<_>>();
  let first = names(OwnedStore::<Subs>::list(&s, alice).await.unwrap());
  assert_eq!(first, ["U", "A", "A2", "B", "C"]);

  let second = names(OwnedStore::<Subs>::list(&s, alice).await.unwrap());
  assert_eq!(first, second);
}

// ─── Isolation ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn other_owners_cannot_see_update_or_delete() {
  let s = store().await;
  let alice = user(&s, "alice@example.com").await;
  let bob = user(&s, "bob@example.com").await;

  let sub = OwnedStore::<Subs>::create(&s, alice, netflix()).await.unwrap();

  assert!(OwnedStore::<Subs>::list(&s, bob).await.unwrap().is_empty());

  let patch = SubscriptionPatch { name: Field::Value("Hijacked".into()), ..Default::default() };
  assert!(OwnedStore::<Subs>::update(&s, bob, sub.id, patch).await.unwrap().is_none());
  assert!(!OwnedStore::<Subs>::delete(&s, bob, sub.id).await.unwrap());

  let still = OwnedStore::<Subs>::list(&s, alice).await.unwrap();
  assert_eq!(still, vec![sub]);
}

#[tokio::test]
async fn foreign_and_missing_ids_are_indistinguishable() {
  let s = store().await;
  let alice = user(&s, "alice@example.com").await;
  let bob = user(&s, "bob@example.com").await;
  let sub = OwnedStore::<Subs>::create(&s, alice, netflix()).await.unwrap();

  let foreign = OwnedStore::<Subs>::update(&s, bob, sub.id, SubscriptionPatch::default())
    .await
    .unwrap();
  let missing = OwnedStore::<Subs>::update(&s, bob, sub.id + 1000, SubscriptionPatch::default())
    .await
    .unwrap();
  assert_eq!(foreign, missing);
}

// ─── Update ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn update_changes_only_present_fields() {
  let s = store().await;
  let alice = user(&s, "alice@example.com").await;
  let mut input = netflix();
  input.notes = Some("keep me".into());
  let before = OwnedStore::<Subs>::create(&s, alice, input).await.unwrap();

  let patch = SubscriptionPatch { is_active: Field::Value(false), ..Default::default() };
  let after = OwnedStore::<Subs>::update(&s, alice, before.id, patch)
    .await
    .unwrap()
    .unwrap();

  assert!(!after.is_active);
  assert_eq!(Subscription { is_active: true, ..after.clone() }, before);
}

#[tokio::test]
async fn update_applies_zero_values_and_nulls() {
  let s = store().await;
  let alice = user(&s, "alice@example.com").await;
  let mut input = netflix();
  input.notes = Some("note".into());
  input.auto_detected = true;
  input.amount = Some(10.0);
  let sub = OwnedStore::<Subs>::create(&s, alice, input).await.unwrap();

  let patch = SubscriptionPatch {
    notes: Field::Value(String::new()),
    auto_detected: Field::Value(false),
    amount: Field::Null,
    next_payment_date: Field::Null,
    ..Default::default()
  };
  let after = OwnedStore::<Subs>::update(&s, alice, sub.id, patch)
    .await
    .unwrap()
    .unwrap();

  assert_eq!(after.notes.as_deref(), Some(""));
  assert!(!after.auto_detected);
  assert_eq!(after.amount, None);
  assert_eq!(after.next_payment_date, None);
  assert_eq!(after.name, "Netflix");
}

#[tokio::test]
async fn empty_patch_returns_record_unchanged() {
  let s = store().await;
  let alice = user(&s, "alice@example.com").await;
  let sub = OwnedStore::<Subs>::create(&s, alice, netflix()).await.unwrap();

  let same = OwnedStore::<Subs>::update(&s, alice, sub.id, SubscriptionPatch::default())
    .await
    .unwrap();
  assert_eq!(same, Some(sub));
}

#[tokio::test]
async fn empty_string_on_required_column_is_applied() {
  let s = store().await;
  let alice = user(&s, "alice@example.com").await;
  let before = OwnedStore::<Subs>::create(&s, alice, netflix()).await.unwrap();

  let patch = SubscriptionPatch { name: Field::Value(String::new()), ..Default::default() };
  let after = OwnedStore::<Subs>::update(&s, alice, before.id, patch)
    .await
    .unwrap()
    .unwrap();

  assert_eq!(after.name, "");
  assert_eq!(Subscription { name: "Netflix".into(), ..after.clone() }, before);

  let blank = NewPasswordEntry::new("", "", "");
  let entry = OwnedStore::<PasswordEntry>::create(&s, alice, blank).await.unwrap();
  assert_eq!(entry.service, "");
}

#[tokio::test]
async fn null_for_required_column_is_rejected() {
  let s = store().await;
  let alice = user(&s, "alice@example.com").await;
  let sub = OwnedStore::<Subs>::create(&s, alice, netflix()).await.unwrap();

  let patch = SubscriptionPatch { name: Field::Null, ..Default::default() };
  let err = OwnedStore::<Subs>::update(&s, alice, sub.id, patch).await.unwrap_err();
  assert!(matches!(err, Error::Core(udlm_core::Error::Validation(_))));
}

// ─── Delete ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn delete_twice_succeeds_then_reports_missing() {
  let s = store().await;
  let alice = user(&s, "alice@example.com").await;
  let sub = OwnedStore::<Subs>::create(&s, alice, netflix()).await.unwrap();

  assert!(OwnedStore::<Subs>::delete(&s, alice, sub.id).await.unwrap());
  assert!(!OwnedStore::<Subs>::delete(&s, alice, sub.id).await.unwrap());
  assert!(OwnedStore::<Subs>::list(&s, alice).await.unwrap().is_empty());
}

#[tokio::test]
async fn netflix_scenario() {
  let s = store().await;
  let alice = user(&s, "alice@example.com").await;

  let sub = OwnedStore::<Subs>::create(&s, alice, netflix()).await.unwrap();
  let patch = SubscriptionPatch { is_active: Field::Value(false), ..Default::default() };
  let updated = OwnedStore::<Subs>::update(&s, alice, sub.id, patch)
    .await
    .unwrap()
    .unwrap();
  assert!(!updated.is_active);
  assert_eq!(updated.name, "Netflix");

  assert!(OwnedStore::<Subs>::delete(&s, alice, sub.id).await.unwrap());

  let patch = SubscriptionPatch { is_active: Field::Value(true), ..Default::default() };
  assert!(OwnedStore::<Subs>::update(&s, alice, sub.id, patch).await.unwrap().is_none());
}

// ─── Other resource types ────────────────────────────────────────────────────

#[tokio::test]
async fn reminders_sort_by_due_at_and_toggle_completed() {
  let s = store().await;
  let alice = user(&s, "alice@example.com").await;

  let late = OwnedStore::<Reminder>::create(&s, alice, NewReminder::new("Insurance", at(2024, 8, 1, 9)))
    .await
    .unwrap();
  let mut rent = NewReminder::new("Rent", at(2024, 7, 1, 9));
  rent.category = Some("rent".into());
  rent.repeat_cycle = Some("monthly".into());
  let early = OwnedStore::<Reminder>::create(&s, alice, rent).await.unwrap();

  let listed = OwnedStore::<Reminder>::list(&s, alice).await.unwrap();
  assert_eq!(listed.iter().map(|r| r.id).collect::<Vec<_>>(), [early.id, late.id]);
  assert_eq!(listed[0].due_at, at(2024, 7, 1, 9));

  let patch = ReminderPatch { completed: Field::Value(true), ..Default::default() };
  let done = OwnedStore::<Reminder>::update(&s, alice, early.id, patch)
    .await
    .unwrap()
    .unwrap();
  assert!(done.completed);
  assert_eq!(done.category.as_deref(), Some("rent"));
}

#[tokio::test]
async fn documents_keep_created_at_across_updates() {
  let s = store().await;
  let alice = user(&s, "alice@example.com").await;

  let mut input = NewDocument::new("pan.pdf", "/vault/pan.pdf");
  input.doc_type = Some("PAN".into());
  let doc = OwnedStore::<Document>::create(&s, alice, input).await.unwrap();

  let patch = DocumentPatch { expiry_date: Field::Value(date(2030, 1, 1)), ..Default::default() };
  let after = OwnedStore::<Document>::update(&s, alice, doc.id, patch)
    .await
    .unwrap()
    .unwrap();
  assert_eq!(after.expiry_date, Some(date(2030, 1, 1)));
  assert_eq!(after.created_at, doc.created_at);
  assert_eq!(after.doc_type.as_deref(), Some("PAN"));
}

#[tokio::test]
async fn password_entries_sort_by_service() {
  let s = store().await;
  let alice = user(&s, "alice@example.com").await;
  let bob = user(&s, "bob@example.com").await;

  for service in ["Zoom", "Gmail", "Amazon"] {
    OwnedStore::<PasswordEntry>::create(&s, alice, NewPasswordEntry::new(service, "alice", "ct"))
      .await
      .unwrap();
  }
  let listed = OwnedStore::<PasswordEntry>::list(&s, alice).await.unwrap();
  let services: Vec<_> = listed.iter().map(|p| p.service.as_str()).collect();
  assert_eq!(services, ["Amazon", "Gmail", "Zoom"]);
  assert!(listed.iter().all(|p| !p.breached));

  assert!(OwnedStore::<PasswordEntry>::list(&s, bob).await.unwrap().is_empty());

  let patch = PasswordEntryPatch {
    breached: Field::Value(true),
    strength_score: Field::Value(12),
    ..Default::default()
  };
  let flagged = OwnedStore::<PasswordEntry>::update(&s, alice, listed[0].id, patch)
    .await
    .unwrap()
    .unwrap();
  assert!(flagged.breached);
  assert_eq!(flagged.strength_score, Some(12));
  assert_eq!(flagged.encrypted_password, "ct");
}

#[tokio::test]
async fn resource_tables_are_independent() {
  let s = store().await;
  let alice = user(&s, "alice@example.com").await;

  let sub = OwnedStore::<Subs>::create(&s, alice, netflix()).await.unwrap();
  // Same numeric id in a different table is a different record.
  assert!(!OwnedStore::<Document>::delete(&s, alice, sub.id).await.unwrap());
  assert_eq!(OwnedStore::<Subs>::list(&s, alice).await.unwrap().len(), 1);
}
