//! Chart of accounts: the user-editable lookup lists entries refer to.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::entry::EntryType;

/// A single named item inside one of the chart's lists.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Category {
    pub id: String,
    pub name: String,
}

impl Category {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// The lists that make up the chart of accounts.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum CategoryKind {
    Income,
    Expense,
    Purchase,
    Bank,
    PaymentMethod,
}

impl CategoryKind {
    pub const ALL: [CategoryKind; 5] = [
        CategoryKind::Income,
        CategoryKind::Expense,
        CategoryKind::Purchase,
        CategoryKind::Bank,
        CategoryKind::PaymentMethod,
    ];

    /// The list an entry's `category_id` points into.
    pub fn for_entry_type(entry_type: EntryType) -> Self {
        match entry_type {
            EntryType::Income => CategoryKind::Income,
            EntryType::Expense => CategoryKind::Expense,
            EntryType::Purchase => CategoryKind::Purchase,
        }
    }
}

impl fmt::Display for CategoryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            CategoryKind::Income => "Income",
            CategoryKind::Expense => "Expense",
            CategoryKind::Purchase => "Purchase",
            CategoryKind::Bank => "Bank",
            CategoryKind::PaymentMethod => "Payment method",
        };
        f.write_str(label)
    }
}

/// Maps a category reference to its display name.
///
/// This is the only view of the chart the aggregation engine needs.
pub trait CategoryResolver {
    fn resolve(&self, kind: CategoryKind, id: &str) -> Option<&str>;
}

/// All category lists, one per [`CategoryKind`].
///
/// Older data only carried income and expense lists, so every list defaults
/// to empty when deserialising.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ChartOfAccounts {
    #[serde(default, alias = "incomeTypes")]
    pub income: Vec<Category>,
    #[serde(default, alias = "expenseTypes")]
    pub expense: Vec<Category>,
    #[serde(default, alias = "purchaseTypes")]
    pub purchase: Vec<Category>,
    #[serde(default)]
    pub banks: Vec<Category>,
    #[serde(default)]
    pub payment_methods: Vec<Category>,
}

impl ChartOfAccounts {
    /// Default chart seeded for a fresh book.
    pub fn starter() -> Self {
        fn list(names: &[&str]) -> Vec<Category> {
            names
                .iter()
                .enumerate()
                .map(|(idx, name)| Category::new((idx + 1).to_string(), *name))
                .collect()
        }

        Self {
            income: list(&["Vendas", "Recebimentos", "Outros"]),
            expense: list(&["Energia", "Aluguel", "RH", "Contabilidade"]),
            purchase: Vec::new(),
            banks: list(&["Stone", "Bradesco", "Conta Interna"]),
            payment_methods: list(&["Dinheiro", "Pix", "Débito", "Crédito"]),
        }
    }

    pub fn items(&self, kind: CategoryKind) -> &[Category] {
        match kind {
            CategoryKind::Income => &self.income,
            CategoryKind::Expense => &self.expense,
            CategoryKind::Purchase => &self.purchase,
            CategoryKind::Bank => &self.banks,
            CategoryKind::PaymentMethod => &self.payment_methods,
        }
    }

    fn items_mut(&mut self, kind: CategoryKind) -> &mut Vec<Category> {
        match kind {
            CategoryKind::Income => &mut self.income,
            CategoryKind::Expense => &mut self.expense,
            CategoryKind::Purchase => &mut self.purchase,
            CategoryKind::Bank => &mut self.banks,
            CategoryKind::PaymentMethod => &mut self.payment_methods,
        }
    }

    pub fn get(&self, kind: CategoryKind, id: &str) -> Option<&Category> {
        self.items(kind).iter().find(|category| category.id == id)
    }

    pub fn insert(&mut self, kind: CategoryKind, category: Category) {
        self.items_mut(kind).push(category);
    }

    /// Renames in place. Returns `false` when the id is not in the list.
    pub fn rename(&mut self, kind: CategoryKind, id: &str, name: impl Into<String>) -> bool {
        match self.items_mut(kind).iter_mut().find(|category| category.id == id) {
            Some(category) => {
                category.name = name.into();
                true
            }
            None => false,
        }
    }

    /// Drops the category from its list; entries keep their now dangling reference.
    pub fn remove(&mut self, kind: CategoryKind, id: &str) -> Option<Category> {
        let items = self.items_mut(kind);
        let position = items.iter().position(|category| category.id == id)?;
        Some(items.remove(position))
    }

    pub fn len(&self) -> usize {
        CategoryKind::ALL
            .iter()
            .map(|kind| self.items(*kind).len())
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl CategoryResolver for ChartOfAccounts {
    fn resolve(&self, kind: CategoryKind, id: &str) -> Option<&str> {
        self.get(kind, id).map(|category| category.name.as_str())
    }
}
