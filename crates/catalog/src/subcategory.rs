use serde::{Deserialize, Serialize};

use superstore_core::{CategoryId, DomainResult, Entity, ItemCode, SubcategoryId, Table};

use crate::item::Item;

/// A named group of items inside a category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subcategory {
    id: SubcategoryId,
    name: String,
    category_id: CategoryId,
    items: Table<Item>,
}

impl Subcategory {
    pub fn new(id: SubcategoryId, name: impl Into<String>, category_id: CategoryId) -> Self {
        Self {
            id,
            name: name.into(),
            category_id,
            items: Table::new(),
        }
    }

    pub fn id_typed(&self) -> &SubcategoryId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn category_id(&self) -> &CategoryId {
        &self.category_id
    }

    /// Store an item, replacing any item with the same code (last write wins).
    pub fn add_item(&mut self, item: Item) -> Option<Item> {
        self.items.upsert(item)
    }

    /// Store an item only if its code is free; `Conflict` otherwise.
    pub fn insert_item(&mut self, item: Item) -> DomainResult<&mut Item> {
        self.items.insert(item)
    }

    pub fn remove_item(&mut self, code: &ItemCode) -> Option<Item> {
        self.items.remove(code)
    }

    pub fn item(&self, code: &ItemCode) -> Option<&Item> {
        self.items.get(code)
    }

    pub fn item_mut(&mut self, code: &ItemCode) -> Option<&mut Item> {
        self.items.get_mut(code)
    }

    /// All items in insertion order.
    pub fn items(&self) -> impl Iterator<Item = &Item> + '_ {
        self.items.iter()
    }

    pub fn items_mut(&mut self) -> impl Iterator<Item = &mut Item> + '_ {
        self.items.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Case-insensitive substring match on item names, in insertion order.
    pub fn search_items(&self, term: &str) -> Vec<&Item> {
        let needle = term.to_lowercase();
        self.items
            .iter()
            .filter(|item| item.name().to_lowercase().contains(&needle))
            .collect()
    }

    /// Items by name, case-sensitive ascending. Equal names keep insertion order.
    ///
    /// Names compare by Unicode scalar value (UTF-8 byte order). That differs
    /// from UTF-16 code-unit order only when a name mixes U+E000..=U+FFFF with
    /// characters above U+FFFF.
    pub fn items_sorted(&self) -> Vec<&Item> {
        let mut sorted: Vec<&Item> = self.items.iter().collect();
        sorted.sort_by(|a, b| a.name().cmp(b.name()));
        sorted
    }
}

impl Entity for Subcategory {
    type Id = SubcategoryId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use superstore_core::DomainError;

    fn beverages() -> Subcategory {
        Subcategory::new(
            SubcategoryId::new("S001"),
            "Beverages",
            CategoryId::new("C001"),
        )
    }

    fn item(code: &str, name: &str) -> Item {
        Item::new(ItemCode::new(code), name, SubcategoryId::new("S001"))
    }

    fn names(items: &[&Item]) -> Vec<String> {
        items.iter().map(|i| i.name().to_string()).collect()
    }

    #[test]
    fn add_and_remove_item() {
        let mut sub = beverages();
        sub.add_item(item("I001", "Cola"));
        assert_eq!(sub.len(), 1);
        assert_eq!(sub.item(&ItemCode::new("I001")).unwrap().name(), "Cola");

        let removed = sub.remove_item(&ItemCode::new("I001")).unwrap();
        assert_eq!(removed.name(), "Cola");
        assert!(sub.item(&ItemCode::new("I001")).is_none());
        assert!(sub.is_empty());
    }

    #[test]
    fn add_item_overwrites_same_code() {
        let mut sub = beverages();
        sub.add_item(item("I001", "Cola"));
        let previous = sub.add_item(item("I001", "Diet Cola"));

        assert_eq!(previous.unwrap().name(), "Cola");
        assert_eq!(sub.len(), 1);
        assert_eq!(sub.item(&ItemCode::new("I001")).unwrap().name(), "Diet Cola");
    }

    #[test]
    fn insert_item_refuses_taken_code() {
        let mut sub = beverages();
        sub.insert_item(item("I001", "Cola")).unwrap();

        let err = sub.insert_item(item("I001", "Diet Cola")).unwrap_err();
        match err {
            DomainError::Conflict(_) => {}
            _ => panic!("Expected Conflict error for duplicate item code"),
        }
        assert_eq!(sub.item(&ItemCode::new("I001")).unwrap().name(), "Cola");
    }

    #[test]
    fn search_is_case_insensitive_partial_match() {
        let mut sub = beverages();
        sub.add_item(item("I001", "Orange Juice"));
        sub.add_item(item("I002", "Apple Juice"));
        sub.add_item(item("I003", "Milk"));

        let results = sub.search_items("juice");
        assert_eq!(names(&results), vec!["Orange Juice", "Apple Juice"]);

        assert_eq!(sub.search_items("MILK").len(), 1);
        assert!(sub.search_items("tea").is_empty());
    }

    #[test]
    fn items_sorted_alphabetically() {
        let mut sub = beverages();
        sub.add_item(item("I002", "Cola"));
        sub.add_item(item("I001", "Apple Juice"));

        assert_eq!(names(&sub.items_sorted()), vec!["Apple Juice", "Cola"]);
    }

    #[test]
    fn items_sorted_is_case_sensitive_and_stable() {
        let mut sub = beverages();
        sub.add_item(item("I001", "apple"));
        sub.add_item(item("I002", "Banana"));
        sub.add_item(item("I003", "Banana"));

        let sorted = sub.items_sorted();
        // Uppercase sorts before lowercase.
        assert_eq!(names(&sorted), vec!["Banana", "Banana", "apple"]);
        assert_eq!(sorted[0].code().as_str(), "I002");
        assert_eq!(sorted[1].code().as_str(), "I003");
    }

    #[test]
    fn items_sorted_uses_scalar_value_order() {
        let mut sub = beverages();
        sub.add_item(item("I001", "\u{1F600} Smile Soda"));
        sub.add_item(item("I002", "\u{FF21} Fullwidth Ale"));

        // U+FF21 < U+1F600, although the emoji's UTF-16 surrogates sort lower.
        let codes: Vec<String> = sub.items_sorted().iter().map(|i| i.code().to_string()).collect();
        assert_eq!(codes, vec!["I002", "I001"]);
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: search returns exactly the items whose lowercase name
            /// contains the lowercase term.
            #[test]
            fn search_returns_exact_matches(
                item_names in proptest::collection::vec("[A-Za-z ]{0,12}", 0..12),
                term in "[A-Za-z]{0,3}"
            ) {
                let mut sub = beverages();
                for (idx, name) in item_names.iter().enumerate() {
                    sub.add_item(item(&format!("I{idx:03}"), name));
                }

                let needle = term.to_lowercase();
                let expected: Vec<&str> = item_names
                    .iter()
                    .filter(|n| n.to_lowercase().contains(&needle))
                    .map(String::as_str)
                    .collect();
                let actual: Vec<&str> = sub.search_items(&term).iter().map(|i| i.name()).collect();
                prop_assert_eq!(actual, expected);
            }
        }
    }
}
