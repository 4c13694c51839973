//! Catalog items as served by the API and the option/action types exchanged
//! between the controller and the dropdown.

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Group an item belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemGroup {
    pub title: String,
}

/// A catalog item as returned by the catalog API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogItem {
    pub pk: u64,
    pub name: String,
    pub to_buy: bool,
    #[serde(default)]
    pub group: Vec<ItemGroup>,
}

impl CatalogItem {
    /// Display label: the name followed by every group title, joined by ", ".
    pub fn label(&self) -> String {
        std::iter::once(self.name.as_str())
            .chain(self.group.iter().map(|group| group.title.as_str()))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// One page of search results.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SearchPage {
    #[serde(default)]
    pub count: u64,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub previous: Option<String>,
    pub results: Vec<CatalogItem>,
}

/// A selectable row of the dropdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub label: String,
    /// Stringified primary key.
    pub value: String,
    pub to_buy: bool,
}

impl SelectOption {
    /// The action a click on this option's buy toggle produces.
    pub fn toggle_action(&self) -> ItemAction {
        if self.to_buy {
            ItemAction::MarkNotToBuy(self.value.clone())
        } else {
            ItemAction::MarkToBuy(self.value.clone())
        }
    }
}

impl From<&CatalogItem> for SelectOption {
    fn from(item: &CatalogItem) -> Self {
        Self {
            label: item.label(),
            value: item.pk.to_string(),
            to_buy: item.to_buy,
        }
    }
}

impl From<CatalogItem> for SelectOption {
    fn from(item: CatalogItem) -> Self {
        Self::from(&item)
    }
}

/// What the controller asks the dropdown to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionsAction {
    /// Replace the visible list with a fresh search batch for `input`.
    Add {
        options: Vec<SelectOption>,
        input: String,
    },
    /// Patch the rows whose `value` matches, leaving the rest untouched.
    Update { options: Vec<SelectOption> },
}

impl OptionsAction {
    /// `Add` with no options and no input, which hides the dropdown.
    pub fn cleared() -> Self {
        Self::Add {
            options: Vec::new(),
            input: String::new(),
        }
    }
}

/// What the user asked for by clicking in the dropdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemAction {
    MarkNotToBuy(String),
    MarkToBuy(String),
    CreateItem(String),
}

/// Parse an option value back into the primary key it was built from.
pub fn parse_identifier(value: &str) -> Result<u64> {
    value
        .parse::<u64>()
        .map_err(|_| Error::InvalidIdentifier(value.to_string()))
}
