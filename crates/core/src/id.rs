//! Strongly-typed identifiers used across the catalog.
//!
//! Identifiers are short string codes (`"I001"`, `"WH-0191..."`). Administrators
//! may pick them by hand or let [`generate`](ItemCode::generate) mint one.

use core::str::FromStr;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

/// Code of a stock-keeping unit, unique within its subcategory.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemCode(String);

/// Identifier of a subcategory.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubcategoryId(String);

/// Identifier of a category.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryId(String);

/// Identifier of a store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StoreId(String);

/// Identifier of a warehouse.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WarehouseId(String);

/// Identifier of an order message (also its idempotency key).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageId(String);

/// Identifier of a user account.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

macro_rules! impl_code_newtype {
    ($t:ty, $name:literal, $prefix:literal) => {
        impl $t {
            /// Wrap an existing code.
            ///
            /// Prefer `FromStr` for user input; this constructor does not reject
            /// blank codes.
            pub fn new(code: impl Into<String>) -> Self {
                Self(code.into())
            }

            /// Mint a fresh, unique code.
            ///
            /// Uses UUIDv7 (time-ordered). Prefer passing codes explicitly in
            /// tests for determinism.
            pub fn generate() -> Self {
                Self(format!("{}-{}", $prefix, Uuid::now_v7().simple()))
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $t {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl From<$t> for String {
            fn from(value: $t) -> Self {
                value.0
            }
        }

        impl FromStr for $t {
            type Err = DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    return Err(DomainError::invalid_id(format!("{}: code cannot be blank", $name)));
                }
                Ok(Self(trimmed.to_string()))
            }
        }
    };
}

impl_code_newtype!(ItemCode, "ItemCode", "ITM");
impl_code_newtype!(SubcategoryId, "SubcategoryId", "SUB");
impl_code_newtype!(CategoryId, "CategoryId", "CAT");
impl_code_newtype!(StoreId, "StoreId", "STR");
impl_code_newtype!(WarehouseId, "WarehouseId", "WH");
impl_code_newtype!(MessageId, "MessageId", "MSG");
impl_code_newtype!(UserId, "UserId", "USR");
