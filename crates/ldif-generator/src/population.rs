//! Synthesized identities and the insertion-ordered population holding them.

use std::collections::HashSet;

use rand::Rng;

use crate::entry_class::EntryClass;

/// One synthesized person.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    display_name: String,
    distinguished_name: String,
    organizational_unit: String,
    entry_class: EntryClass,
}

impl Identity {
    /// Builds an identity, deriving its DN from the name, unit and base DN.
    ///
    /// # Example
    ///
    /// ```
    /// use ldif_generator::{EntryClass, Identity};
    ///
    /// let identity = Identity::new(
    ///     "Smith Ann".to_owned(),
    ///     "Sales".to_owned(),
    ///     EntryClass::Person,
    ///     "dc=example,dc=com",
    /// );
    /// assert_eq!(
    ///     identity.distinguished_name(),
    ///     "cn=Smith Ann,ou=Sales,dc=example,dc=com"
    /// );
    /// ```
    #[must_use]
    pub fn new(
        display_name: String,
        organizational_unit: String,
        entry_class: EntryClass,
        base_dn: &str,
    ) -> Self {
        let distinguished_name = format!("cn={display_name},ou={organizational_unit},{base_dn}");
        Self {
            display_name,
            distinguished_name,
            organizational_unit,
            entry_class,
        }
    }

    /// Returns the display name, unique within a population.
    #[must_use]
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Returns the distinguished name.
    #[must_use]
    pub fn distinguished_name(&self) -> &str {
        &self.distinguished_name
    }

    /// Returns the organizational unit name.
    #[must_use]
    pub fn organizational_unit(&self) -> &str {
        &self.organizational_unit
    }

    /// Returns the entry class.
    #[must_use]
    pub const fn entry_class(&self) -> &EntryClass {
        &self.entry_class
    }
}

/// Insertion-ordered identities keyed by display name.
///
/// Identities are stored in a vector for O(1) access by index; a name set
/// enforces uniqueness.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Population {
    identities: Vec<Identity>,
    names: HashSet<String>,
}

impl Population {
    /// Creates an empty population with room for `capacity` identities.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            identities: Vec::with_capacity(capacity),
            names: HashSet::with_capacity(capacity),
        }
    }

    /// Inserts an identity unless its display name is already present.
    ///
    /// Returns `false` and drops the identity on a duplicate name.
    pub fn insert(&mut self, identity: Identity) -> bool {
        if !self.names.insert(identity.display_name.clone()) {
            return false;
        }
        self.identities.push(identity);
        true
    }

    /// Returns the number of identities.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.identities.len()
    }

    /// Returns `true` if the population holds no identity.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.identities.is_empty()
    }

    /// Returns `true` if `display_name` is taken.
    #[must_use]
    pub fn contains(&self, display_name: &str) -> bool {
        self.names.contains(display_name)
    }

    /// Returns the identity at insertion position `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Identity> {
        self.identities.get(index)
    }

    /// Iterates identities in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, Identity> {
        self.identities.iter()
    }

    /// Draws one identity uniformly at random, or `None` when empty.
    pub fn choose<R>(&self, rng: &mut R) -> Option<&Identity>
    where
        R: Rng + ?Sized,
    {
        if self.identities.is_empty() {
            return None;
        }
        let index = rng.random_range(0..self.identities.len());
        self.identities.get(index)
    }
}

impl<'a> IntoIterator for &'a Population {
    type Item = &'a Identity;
    type IntoIter = std::slice::Iter<'a, Identity>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
