//! # Item Form Contract
//!
//! The form is an external collaborator; this module is the contract it
//! shares with the item store.
//!
//! ## Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  "Add Item"  ──► ItemForm::blank(today)                                │
//! │  "Edit"      ──► ItemForm::from_item(&item)                            │
//! │                       │                                                 │
//! │                       │  user edits fields, add_tag / remove_tag,       │
//! │                       │  set_price_input("") leaves a price blank       │
//! │                       ▼                                                 │
//! │  "Save"      ──► into_payload(SaveMode::Final) ─┐                      │
//! │  "Save Draft"──► into_payload(SaveMode::Draft) ─┤                      │
//! │                                                 ▼                       │
//! │                                 ItemPayload (validated, blanks → 0)     │
//! │                                                 │                       │
//! │                                                 ▼                       │
//! │                                   ItemStore::save(editing, payload, ..) │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Blank numeric inputs are `None` here and become `0` only when the payload
//! is built, so "left blank" and "typed 0" stay distinguishable while the
//! form is open.

use chrono::NaiveDate;

use crate::money::Money;
use crate::types::{
    Authenticity, Condition, Item, ItemPayload, ItemStatus, ItemType, Rarity, Tags,
};
use crate::validation::{
    validate_acquired_date, validate_amount, validate_count, validate_item_name,
    validate_text_length, ValidationResult,
};
use crate::ValidationError;

/// How a form submission is stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveMode {
    /// Regular save: the item shows up in the normal view.
    Final,
    /// Saved incomplete: the item only shows up in draft mode.
    Draft,
}

impl SaveMode {
    pub const fn is_draft(&self) -> bool {
        matches!(self, SaveMode::Draft)
    }
}

/// The three price inputs on the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceField {
    Purchase,
    Sold,
    Estimated,
}

/// Editable state of the add/edit form.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemForm {
    pub name: String,
    pub brand: String,
    pub series: String,
    pub description: String,
    pub acquired_date: String,
    pub image_url: String,
    pub purchase_price: Option<Money>,
    pub sold_price: Option<Money>,
    pub estimated_value: Option<Money>,
    pub status: ItemStatus,
    pub item_type: ItemType,
    pub rarity: Rarity,
    pub quantity: i64,
    pub total_boxes_in_set: Option<i64>,
    pub condition: Option<Condition>,
    pub authenticity: Option<Authenticity>,
    pub tags: Tags,
    /// Set when editing an existing draft (shows the "Draft" badge).
    pub is_draft: bool,
}

impl Default for ItemForm {
    fn default() -> Self {
        ItemForm {
            name: String::new(),
            brand: String::new(),
            series: String::new(),
            description: String::new(),
            acquired_date: String::new(),
            image_url: String::new(),
            purchase_price: None,
            sold_price: None,
            estimated_value: None,
            status: ItemStatus::default(),
            item_type: ItemType::default(),
            rarity: Rarity::default(),
            quantity: 1,
            total_boxes_in_set: None,
            condition: Some(Condition::default()),
            authenticity: Some(Authenticity::default()),
            tags: Tags::new(),
            is_draft: false,
        }
    }
}

impl ItemForm {
    /// A fresh form for a new item, dated `today`.
    ///
    /// The caller supplies the date; this crate never reads the clock.
    pub fn blank(today: NaiveDate) -> Self {
        ItemForm {
            acquired_date: today.format("%Y-%m-%d").to_string(),
            ..ItemForm::default()
        }
    }

    /// A form pre-populated from an existing item.
    pub fn from_item(item: &Item) -> Self {
        ItemForm {
            name: item.name.clone(),
            brand: item.brand.clone(),
            series: item.series.clone(),
            description: item.description.clone(),
            acquired_date: item.acquired_date.clone(),
            image_url: item.image_url.clone(),
            purchase_price: Some(item.purchase_price()),
            sold_price: Some(item.sold_price()),
            estimated_value: Some(item.estimated_value()),
            status: item.status,
            item_type: item.item_type,
            rarity: item.rarity,
            quantity: item.quantity,
            total_boxes_in_set: Some(item.total_boxes_in_set),
            condition: item.condition,
            authenticity: item.authenticity,
            tags: item.tags.clone(),
            is_draft: item.is_draft,
        }
    }

    /// Adds a tag from the tag input. See [`Tags::push`] for the rules.
    pub fn add_tag(&mut self, tag: &str) -> ValidationResult<()> {
        self.tags.push(tag)
    }

    pub fn remove_tag(&mut self, index: usize) -> Option<String> {
        self.tags.remove(index)
    }

    /// Applies the raw text of a price input. Blank clears the price.
    pub fn set_price_input(&mut self, field: PriceField, input: &str) -> ValidationResult<()> {
        let amount = if input.trim().is_empty() {
            None
        } else {
            Some(Money::parse_amount(input)?)
        };

        match field {
            PriceField::Purchase => self.purchase_price = amount,
            PriceField::Sold => self.sold_price = amount,
            PriceField::Estimated => self.estimated_value = amount,
        }
        Ok(())
    }

    /// Applies the raw text of the "total boxes in set" input.
    pub fn set_total_boxes_input(&mut self, input: &str) -> ValidationResult<()> {
        let input = input.trim();
        self.total_boxes_in_set = if input.is_empty() {
            None
        } else {
            Some(input.parse().map_err(|_| ValidationError::InvalidFormat {
                field: "total boxes in set".to_string(),
                reason: "must be a whole number".to_string(),
            })?)
        };
        Ok(())
    }

    pub fn shows_total_boxes(&self) -> bool {
        self.item_type.has_set_size()
    }

    pub fn shows_purchase_price(&self) -> bool {
        self.status.shows_purchase_price()
    }

    pub fn shows_sold_price(&self) -> bool {
        self.status.shows_sold_price()
    }

    pub fn shows_estimated_value(&self) -> bool {
        self.status.shows_estimated_value()
    }

    /// Validates the form and builds the payload the store accepts.
    ///
    /// ## Rules
    /// - Final saves need a name; drafts may be saved without one
    /// - Dates must be `YYYY-MM-DD` or empty
    /// - Amounts and counts must not be negative
    /// - Blank amounts and set size become `0`
    pub fn into_payload(self, mode: SaveMode) -> ValidationResult<ItemPayload> {
        let name = self.name.trim().to_string();
        match mode {
            SaveMode::Final => validate_item_name(&name)?,
            SaveMode::Draft => validate_text_length("name", &name)?,
        }
        validate_text_length("brand", &self.brand)?;
        validate_text_length("series", &self.series)?;
        validate_acquired_date(&self.acquired_date)?;

        let purchase_price_cents = self.purchase_price.unwrap_or_default().cents();
        let sold_price_cents = self.sold_price.unwrap_or_default().cents();
        let estimated_value_cents = self.estimated_value.unwrap_or_default().cents();
        validate_amount("purchase price", purchase_price_cents)?;
        validate_amount("sold price", sold_price_cents)?;
        validate_amount("estimated value", estimated_value_cents)?;

        let total_boxes_in_set = self.total_boxes_in_set.unwrap_or(0);
        validate_count("quantity", self.quantity)?;
        validate_count("total boxes in set", total_boxes_in_set)?;

        Ok(ItemPayload {
            name,
            brand: self.brand.trim().to_string(),
            series: self.series.trim().to_string(),
            description: self.description,
            acquired_date: self.acquired_date.trim().to_string(),
            purchase_price_cents,
            sold_price_cents,
            estimated_value_cents,
            image_url: self.image_url,
            status: self.status,
            item_type: self.item_type,
            rarity: self.rarity,
            quantity: self.quantity,
            total_boxes_in_set,
            condition: self.condition,
            authenticity: self.authenticity,
            tags: self.tags,
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MAX_TAGS;

    #[test]
    fn test_blank_form_defaults() {
        let today = NaiveDate::from_ymd_opt(2025, 3, 9).unwrap();
        let form = ItemForm::blank(today);

        assert_eq!(form.acquired_date, "2025-03-09");
        assert_eq!(form.status, ItemStatus::Owned);
        assert_eq!(form.item_type, ItemType::BlindBoxSingle);
        assert_eq!(form.rarity, Rarity::Common);
        assert_eq!(form.condition, Some(Condition::Mint));
        assert_eq!(form.authenticity, Some(Authenticity::Real));
        assert_eq!(form.quantity, 1);
        assert!(form.shows_total_boxes());
    }

    #[test]
    fn test_final_save_requires_name() {
        let form = ItemForm::default();
        assert!(matches!(
            form.into_payload(SaveMode::Final),
            Err(ValidationError::Required { .. })
        ));
    }

    #[test]
    fn test_draft_save_allows_missing_name() {
        let payload = ItemForm::default().into_payload(SaveMode::Draft).unwrap();
        assert_eq!(payload.name, "");
    }

    #[test]
    fn test_blank_prices_normalize_to_zero() {
        let mut form = ItemForm {
            name: "Crybaby".to_string(),
            ..ItemForm::default()
        };
        form.set_price_input(PriceField::Purchase, "12.5").unwrap();
        form.set_price_input(PriceField::Sold, "").unwrap();

        let payload = form.into_payload(SaveMode::Final).unwrap();
        assert_eq!(payload.purchase_price_cents, 1250);
        assert_eq!(payload.sold_price_cents, 0);
        assert_eq!(payload.estimated_value_cents, 0);
        assert_eq!(payload.total_boxes_in_set, 0);
    }

    #[test]
    fn test_bad_inputs_are_rejected() {
        let mut form = ItemForm {
            name: "Crybaby".to_string(),
            ..ItemForm::default()
        };
        assert!(form.set_price_input(PriceField::Estimated, "lots").is_err());
        assert!(form.set_total_boxes_input("twelve").is_err());

        form.set_price_input(PriceField::Estimated, "-4").unwrap();
        assert!(matches!(
            form.clone().into_payload(SaveMode::Final),
            Err(ValidationError::OutOfRange { .. })
        ));

        form.estimated_value = None;
        form.acquired_date = "yesterday".to_string();
        assert!(matches!(
            form.into_payload(SaveMode::Final),
            Err(ValidationError::InvalidFormat { .. })
        ));
    }

    #[test]
    fn test_tag_count_capped() {
        let mut form = ItemForm::default();
        for i in 0..(MAX_TAGS + 4) {
            let _ = form.add_tag(&format!("tag-{}", i));
        }
        assert_eq!(form.tags.len(), MAX_TAGS);

        assert_eq!(form.remove_tag(0).as_deref(), Some("tag-0"));
        form.add_tag("again").unwrap();
        assert_eq!(form.tags.as_slice().last().map(String::as_str), Some("again"));
    }

    #[test]
    fn test_from_item_round_trips_payload() {
        let payload = ItemPayload {
            name: "Skullpanda".to_string(),
            status: ItemStatus::Tradeable,
            estimated_value_cents: 4200,
            total_boxes_in_set: 12,
            ..ItemPayload::default()
        };
        let item = Item::from_payload("id".to_string(), payload.clone(), true);

        let form = ItemForm::from_item(&item);
        assert!(form.is_draft);
        assert!(form.shows_estimated_value());
        assert!(!form.shows_sold_price());
        assert_eq!(form.into_payload(SaveMode::Draft).unwrap(), payload);
    }
}
