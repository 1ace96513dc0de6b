//! Flat, insertion-ordered entity table.
//!
//! Every level of the catalog tree (facility → category → subcategory → item)
//! stores its children in a `Table`. Two write paths are exposed on purpose:
//!
//! - [`Table::insert`] refuses an id that is already present,
//! - [`Table::upsert`] replaces the existing entity in place.
//!
//! Iteration always follows insertion order, so scans over the tree are
//! deterministic.

use std::collections::HashMap;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::entity::Entity;
use crate::error::{DomainError, DomainResult};

#[derive(Debug, Clone)]
pub struct Table<E: Entity> {
    rows: Vec<E>,
    index: HashMap<E::Id, usize>,
}

impl<E: Entity> Table<E> {
    pub fn new() -> Self {
        Self {
            rows: Vec::new(),
            index: HashMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn contains(&self, id: &E::Id) -> bool {
        self.index.contains_key(id)
    }

    pub fn get(&self, id: &E::Id) -> Option<&E> {
        self.index.get(id).map(|&pos| &self.rows[pos])
    }

    pub fn get_mut(&mut self, id: &E::Id) -> Option<&mut E> {
        match self.index.get(id) {
            Some(&pos) => Some(&mut self.rows[pos]),
            None => None,
        }
    }

    /// Insert an entity whose id is not present yet.
    ///
    /// On a duplicate id the table is left untouched and `Conflict` is returned.
    pub fn insert(&mut self, entity: E) -> DomainResult<&mut E> {
        if self.index.contains_key(entity.id()) {
            return Err(DomainError::conflict(format!(
                "{:?} already exists",
                entity.id()
            )));
        }
        let pos = self.rows.len();
        self.index.insert(entity.id().clone(), pos);
        self.rows.push(entity);
        Ok(&mut self.rows[pos])
    }

    /// Insert or replace. A replaced entity keeps its original position and is
    /// handed back to the caller.
    pub fn upsert(&mut self, entity: E) -> Option<E> {
        match self.index.get(entity.id()) {
            Some(&pos) => Some(std::mem::replace(&mut self.rows[pos], entity)),
            None => {
                self.index.insert(entity.id().clone(), self.rows.len());
                self.rows.push(entity);
                None
            }
        }
    }

    pub fn remove(&mut self, id: &E::Id) -> Option<E> {
        let pos = self.index.remove(id)?;
        let removed = self.rows.remove(pos);
        for slot in self.index.values_mut() {
            if *slot > pos {
                *slot -= 1;
            }
        }
        Some(removed)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, E> {
        self.rows.iter()
    }

    /// Mutable iteration. Entity ids are immutable once stored, so the index
    /// stays valid.
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, E> {
        self.rows.iter_mut()
    }

    pub fn ids(&self) -> impl Iterator<Item = &E::Id> + '_ {
        self.rows.iter().map(Entity::id)
    }
}

impl<E: Entity> Default for Table<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Entity + PartialEq> PartialEq for Table<E> {
    fn eq(&self, other: &Self) -> bool {
        self.rows == other.rows
    }
}

impl<'a, E: Entity> IntoIterator for &'a Table<E> {
    type Item = &'a E;
    type IntoIter = std::slice::Iter<'a, E>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

impl<E: Entity> FromIterator<E> for Table<E> {
    /// Last write wins for repeated ids.
    fn from_iter<I: IntoIterator<Item = E>>(iter: I) -> Self {
        let mut table = Self::new();
        for entity in iter {
            table.upsert(entity);
        }
        table
    }
}

impl<E: Entity + Serialize> Serialize for Table<E> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(&self.rows)
    }
}

impl<'de, E: Entity + Deserialize<'de>> Deserialize<'de> for Table<E> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let rows = Vec::<E>::deserialize(deserializer)?;
        let mut table = Self::new();
        for row in rows {
            table.insert(row).map_err(serde::de::Error::custom)?;
        }
        Ok(table)
    }
}
