//! In-memory person store
//!
//! Records are keyed by a positive identifier handed out from a counter that
//! starts at 1. The store is a plain owned value; callers that share it across
//! tasks wrap it in a lock (see [`crate::server`]).

use crate::error::StoreError;
use serde::Serialize;
use std::collections::HashMap;

/// Record identifier. Always positive for a stored record.
pub type PersonId = i32;

/// A stored person record
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct Person {
    pub id: PersonId,
    pub name: String,
    pub email: String,
    pub phone_number: String,
}

/// The caller-supplied text fields of a record
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PersonFields {
    pub name: String,
    pub email: String,
    pub phone_number: String,
}

impl PersonFields {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        phone_number: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            phone_number: phone_number.into(),
        }
    }

    /// All three fields must be non-empty
    pub fn validate(&self) -> Result<(), StoreError> {
        if self.name.is_empty() || self.email.is_empty() || self.phone_number.is_empty() {
            return Err(StoreError::Validation);
        }
        Ok(())
    }
}

/// Keyed collection of person records plus the identifier counter
#[derive(Debug)]
pub struct PersonStore {
    persons: HashMap<PersonId, Person>,
    next_id: PersonId,
}

impl Default for PersonStore {
    fn default() -> Self {
        Self::new()
    }
}

impl PersonStore {
    pub fn new() -> Self {
        Self {
            persons: HashMap::new(),
            next_id: 1,
        }
    }

    /// Store a new record and return its identifier.
    ///
    /// The counter only advances on success.
    pub fn insert(&mut self, fields: PersonFields) -> Result<PersonId, StoreError> {
        fields.validate()?;

        let id = self.next_id;
        self.next_id = id.checked_add(1).ok_or(StoreError::IdsExhausted)?;

        self.persons.insert(
            id,
            Person {
                id,
                name: fields.name,
                email: fields.email,
                phone_number: fields.phone_number,
            },
        );

        Ok(id)
    }

    /// Get a copy of the record at `id`
    pub fn get(&self, id: PersonId) -> Result<Person, StoreError> {
        self.persons
            .get(&id)
            .cloned()
            .ok_or(StoreError::NotFound(id))
    }

    /// Overwrite the fields of an existing record.
    ///
    /// A missing id is reported before the new fields are validated.
    pub fn replace(&mut self, id: PersonId, fields: PersonFields) -> Result<(), StoreError> {
        let person = self.persons.get_mut(&id).ok_or(StoreError::NotFound(id))?;
        fields.validate()?;

        person.name = fields.name;
        person.email = fields.email;
        person.phone_number = fields.phone_number;

        Ok(())
    }

    /// Erase the record at `id`
    pub fn remove(&mut self, id: PersonId) -> Result<(), StoreError> {
        self.persons
            .remove(&id)
            .map(|_| ())
            .ok_or(StoreError::NotFound(id))
    }

    pub fn len(&self) -> usize {
        self.persons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.persons.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn john() -> PersonFields {
        PersonFields::new("John Wick", "john.wick@test.com", "123-456-789")
    }

    fn luke() -> PersonFields {
        PersonFields::new("Luke Skywalker", "luke.skywaler@test.com", "083-111-000")
    }

    #[test]
    fn test_insert_assigns_increasing_ids() {
        let mut store = PersonStore::new();
        assert_eq!(store.insert(john()).unwrap(), 1);
        assert_eq!(store.insert(luke()).unwrap(), 2);
        assert_eq!(store.insert(john()).unwrap(), 3);
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_insert_rejects_empty_fields() {
        let mut store = PersonStore::new();

        let cases = [
            PersonFields::new("", "a@b.c", "1"),
            PersonFields::new("a", "", "1"),
            PersonFields::new("a", "a@b.c", ""),
            PersonFields::default(),
        ];
        for fields in cases {
            assert_eq!(store.insert(fields), Err(StoreError::Validation));
        }

        // Counter untouched by the failed inserts
        assert!(store.is_empty());
        assert_eq!(store.insert(john()).unwrap(), 1);
    }

    #[test]
    fn test_get_returns_copy() {
        let mut store = PersonStore::new();
        let id = store.insert(john()).unwrap();

        let person = store.get(id).unwrap();
        assert_eq!(
            person,
            Person {
                id: 1,
                name: "John Wick".to_string(),
                email: "john.wick@test.com".to_string(),
                phone_number: "123-456-789".to_string(),
            }
        );
    }

    #[test]
    fn test_get_unknown_and_zero() {
        let mut store = PersonStore::new();
        store.insert(john()).unwrap();

        assert_eq!(store.get(0), Err(StoreError::NotFound(0)));
        assert_eq!(store.get(42), Err(StoreError::NotFound(42)));
        assert_eq!(store.get(-1), Err(StoreError::NotFound(-1)));
    }

    #[test]
    fn test_replace_overwrites_fields() {
        let mut store = PersonStore::new();
        let id = store.insert(john()).unwrap();

        store.replace(id, luke()).unwrap();

        let person = store.get(id).unwrap();
        assert_eq!(person.id, id);
        assert_eq!(person.name, "Luke Skywalker");
        assert_eq!(person.email, "luke.skywaler@test.com");
        assert_eq!(person.phone_number, "083-111-000");
    }

    #[test]
    fn test_replace_missing_takes_precedence() {
        let mut store = PersonStore::new();
        assert_eq!(
            store.replace(5, PersonFields::default()),
            Err(StoreError::NotFound(5))
        );
    }

    #[test]
    fn test_replace_invalid_leaves_record() {
        let mut store = PersonStore::new();
        let id = store.insert(john()).unwrap();

        assert_eq!(
            store.replace(id, PersonFields::new("New Name", "", "1")),
            Err(StoreError::Validation)
        );
        assert_eq!(store.get(id).unwrap().name, "John Wick");
    }

    #[test]
    fn test_remove_twice() {
        let mut store = PersonStore::new();
        let id = store.insert(john()).unwrap();

        store.remove(id).unwrap();
        assert_eq!(store.get(id), Err(StoreError::NotFound(id)));
        assert_eq!(store.remove(id), Err(StoreError::NotFound(id)));
        assert!(store.is_empty());
    }

    #[test]
    fn test_insert_at_counter_limit() {
        let mut store = PersonStore::new();
        store.next_id = PersonId::MAX;

        assert_eq!(store.insert(john()), Err(StoreError::IdsExhausted));
        assert_eq!(store.next_id, PersonId::MAX);
        assert!(store.is_empty());
    }

    #[test]
    fn test_ids_not_reused_after_remove() {
        let mut store = PersonStore::new();
        let first = store.insert(john()).unwrap();
        store.remove(first).unwrap();
        assert_eq!(store.insert(luke()).unwrap(), 2);
    }
}
