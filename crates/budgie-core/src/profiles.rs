//! In-memory profile store
//!
//! Profiles live for the lifetime of the process and are keyed by name.
//! Submitting the same name again replaces the earlier profile (last write wins).
//! The map sits behind an `RwLock` so the server can share one store across
//! request handlers; there are no transactions beyond a single insert.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use chrono::Utc;
use tracing::debug;

use crate::error::{Error, Result};
use crate::models::{NewProfile, UserProfile};

#[derive(Debug, Default)]
pub struct ProfileStore {
    profiles: RwLock<HashMap<String, UserProfile>>,
}

impl ProfileStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite the profile keyed by `profile.name`
    ///
    /// Returns the confirmation shown in the Profile Setup tab.
    pub fn create_or_replace(&self, profile: NewProfile) -> String {
        let name = profile.name.clone();
        let stored = UserProfile {
            name: profile.name,
            age: profile.age,
            user_type: profile.user_type,
            income: profile.income,
            monthly_expenses: profile.expenses,
            goals: profile.goals,
            created_at: Utc::now(),
        };

        let replaced = self
            .profiles
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(name.clone(), stored)
            .is_some();
        debug!(name = %name, replaced, "Stored user profile");

        format!("Profile created for {}! Personalized guidance is ready.", name)
    }

    pub fn get(&self, name: &str) -> Option<UserProfile> {
        self.profiles
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .cloned()
    }

    /// Like `get`, but a missing profile is an error
    pub fn require(&self, name: &str) -> Result<UserProfile> {
        self.get(name)
            .ok_or_else(|| Error::ProfileNotFound(name.to_string()))
    }

    /// All profiles, sorted by name
    pub fn list(&self) -> Vec<UserProfile> {
        let mut profiles: Vec<UserProfile> = self
            .profiles
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .cloned()
            .collect();
        profiles.sort_by(|a, b| a.name.cmp(&b.name));
        profiles
    }

    pub fn len(&self) -> usize {
        self.profiles
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UserType;

    fn new_profile(name: &str, income: f64) -> NewProfile {
        NewProfile {
            name: name.to_string(),
            age: 25,
            user_type: UserType::Student,
            income,
            expenses: 2000.0,
            goals: "Save for a laptop".to_string(),
        }
    }

    #[test]
    fn test_create_returns_confirmation() {
        let store = ProfileStore::new();
        let msg = store.create_or_replace(new_profile("alice", 3000.0));
        assert_eq!(
            msg,
            "Profile created for alice! Personalized guidance is ready."
        );
        assert_eq!(store.len(), 1);

        let profile = store.get("alice").unwrap();
        assert_eq!(profile.income, 3000.0);
        assert_eq!(profile.monthly_expenses, 2000.0);
        assert_eq!(profile.goals, "Save for a laptop");
    }

    #[test]
    fn test_same_name_overwrites() {
        let store = ProfileStore::new();
        store.create_or_replace(new_profile("alice", 3000.0));
        store.create_or_replace(new_profile("alice", 5000.0));

        assert_eq!(store.len(), 1);
        assert_eq!(store.get("alice").unwrap().income, 5000.0);
    }

    #[test]
    fn test_no_validation_of_numbers() {
        let store = ProfileStore::new();
        let mut profile = new_profile("bob", -100.0);
        profile.expenses = 0.0;
        store.create_or_replace(profile);

        let stored = store.get("bob").unwrap();
        assert_eq!(stored.income, -100.0);
        assert_eq!(stored.monthly_expenses, 0.0);
    }

    #[test]
    fn test_require_missing() {
        let store = ProfileStore::new();
        assert!(store.is_empty());
        assert!(matches!(
            store.require("nobody"),
            Err(Error::ProfileNotFound(name)) if name == "nobody"
        ));
    }

    #[test]
    fn test_list_sorted_by_name() {
        let store = ProfileStore::new();
        store.create_or_replace(new_profile("zoe", 1.0));
        store.create_or_replace(new_profile("adam", 2.0));
        let names: Vec<String> = store.list().into_iter().map(|p| p.name).collect();
        assert_eq!(names, vec!["adam", "zoe"]);
    }
}
