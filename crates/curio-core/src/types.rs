//! # Domain Types
//!
//! Core domain types used throughout Curio.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │      Item       │   │   ItemStatus    │   │    ItemType     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (UUID)      │   │  Owned          │   │  Blind Box ...  │       │
//! │  │  name / series  │   │  Wishlist       │   │  Single Item    │       │
//! │  │  prices (cents) │   │  Tradeable      │   │  Set Item, Mega │       │
//! │  │  tags (≤ 6)     │   │  Sold           │   │  Accessories .. │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  Rarity, Condition, Authenticity: closed label sets                     │
//! │  BulkField / BulkValue: the fields quick-select can rewrite             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every enum serializes as its display label (`"Blind Box Single"`), which is
//! also what the UI shows and what [`FromStr`] accepts.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::ValidationError;
use crate::money::Money;
use crate::MAX_TAGS;

// =============================================================================
// Labeled Enums
// =============================================================================

/// Declares a closed enumeration whose serialized form is its display label.
macro_rules! labeled_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $field:literal {
            $( $(#[$vmeta:meta])* $variant:ident => $label:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
        #[ts(export)]
        pub enum $name {
            $( $(#[$vmeta])* #[serde(rename = $label)] $variant ),+
        }

        impl $name {
            /// Every variant, in display order.
            pub const ALL: &'static [$name] = &[ $( $name::$variant ),+ ];

            /// The display label (also the serialized form).
            pub const fn label(&self) -> &'static str {
                match self {
                    $( $name::$variant => $label ),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }

        impl FromStr for $name {
            type Err = ValidationError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                $name::ALL
                    .iter()
                    .copied()
                    .find(|v| v.label() == s.trim())
                    .ok_or_else(|| {
                        ValidationError::not_allowed($field, $name::ALL.iter().map(|v| v.label()))
                    })
            }
        }
    };
}

labeled_enum! {
    /// Where an item stands in the collection.
    ///
    /// Drives which price fields are meaningful.
    ItemStatus, "status" {
        Owned => "Owned",
        Wishlist => "Wishlist",
        Tradeable => "Tradeable",
        Sold => "Sold",
    }
}

labeled_enum! {
    /// Kind of product the item is.
    ItemType, "type" {
        BlindBoxSingle => "Blind Box Single",
        BlindBoxSet => "Blind Box Set",
        SingleItem => "Single Item",
        SetItem => "Set Item",
        Mega => "Mega",
        Accessories => "Accessories",
        Custom => "Custom",
    }
}

labeled_enum! {
    Rarity, "rarity" {
        Common => "Common",
        Secret => "Secret",
        SuperSecret => "Super Secret",
        Limited => "Limited",
        Rare => "Rare",
        UltraRare => "Ultra Rare",
    }
}

labeled_enum! {
    /// Physical condition of an owned piece.
    Condition, "condition" {
        Mint => "Mint",
        Good => "Good",
        Fair => "Fair",
        Damaged => "Damaged",
        BrandNewInBox => "Brand New in Box",
        UnopenDamagedBox => "Unopen Damaged Box",
    }
}

labeled_enum! {
    Authenticity, "authenticity" {
        Real => "Real",
        Fake => "Fake",
        NotSure => "Not Sure",
    }
}

impl Default for ItemStatus {
    fn default() -> Self {
        ItemStatus::Owned
    }
}

impl Default for ItemType {
    fn default() -> Self {
        ItemType::BlindBoxSingle
    }
}

impl Default for Rarity {
    fn default() -> Self {
        Rarity::Common
    }
}

impl Default for Condition {
    fn default() -> Self {
        Condition::Mint
    }
}

impl Default for Authenticity {
    fn default() -> Self {
        Authenticity::Real
    }
}

// =============================================================================
// Field Visibility Rules
// =============================================================================
//
// ┌──────────────┬──────────┬──────────┬───────────┬──────┐
// │ price field  │  Owned   │ Wishlist │ Tradeable │ Sold │
// ├──────────────┼──────────┼──────────┼───────────┼──────┤
// │ purchase     │    ✓     │          │     ✓     │ form │
// │ sold         │          │          │           │  ✓   │
// │ estimated    │          │          │     ✓     │      │
// └──────────────┴──────────┴──────────┴───────────┴──────┘
//
// A sold item's card shows only what it sold for; the form still lets the
// purchase price be edited.

impl ItemStatus {
    /// Wishlist items have not been bought yet.
    pub const fn shows_purchase_price(&self) -> bool {
        !matches!(self, ItemStatus::Wishlist)
    }

    /// Whether the item card lists the purchase price.
    pub const fn lists_purchase_price(&self) -> bool {
        !matches!(self, ItemStatus::Wishlist | ItemStatus::Sold)
    }

    pub const fn shows_sold_price(&self) -> bool {
        matches!(self, ItemStatus::Sold)
    }

    pub const fn shows_estimated_value(&self) -> bool {
        matches!(self, ItemStatus::Tradeable)
    }
}

impl ItemType {
    /// Whether `total_boxes_in_set` means anything for this type.
    pub const fn has_set_size(&self) -> bool {
        matches!(
            self,
            ItemType::BlindBoxSingle | ItemType::BlindBoxSet | ItemType::SetItem
        )
    }
}

// =============================================================================
// Tags
// =============================================================================

/// Ordered list of at most [`MAX_TAGS`] short labels.
///
/// Duplicates are allowed and insertion order is preserved. The limit holds
/// for deserialized data too: an over-long list is rejected on load.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, TS)]
#[serde(transparent)]
#[ts(export)]
pub struct Tags(Vec<String>);

impl Tags {
    pub fn new() -> Self {
        Tags(Vec::new())
    }

    /// Appends a tag.
    ///
    /// ## Rules
    /// - Surrounding whitespace is trimmed
    /// - Empty tags are rejected
    /// - A full list is rejected (the list is left unchanged)
    pub fn push(&mut self, tag: &str) -> Result<(), ValidationError> {
        let tag = tag.trim();
        if tag.is_empty() {
            return Err(ValidationError::Required {
                field: "tag".to_string(),
            });
        }
        if self.is_full() {
            return Err(ValidationError::TooMany {
                field: "tags".to_string(),
                max: MAX_TAGS,
            });
        }
        self.0.push(tag.to_string());
        Ok(())
    }

    /// Removes the tag at `index`, returning it if the index was valid.
    pub fn remove(&mut self, index: usize) -> Option<String> {
        if index < self.0.len() {
            Some(self.0.remove(index))
        } else {
            None
        }
    }

    pub fn is_full(&self) -> bool {
        self.0.len() >= MAX_TAGS
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}

impl TryFrom<Vec<String>> for Tags {
    type Error = ValidationError;

    fn try_from(tags: Vec<String>) -> Result<Self, Self::Error> {
        if tags.len() > MAX_TAGS {
            return Err(ValidationError::TooMany {
                field: "tags".to_string(),
                max: MAX_TAGS,
            });
        }
        Ok(Tags(tags))
    }
}

impl<'de> Deserialize<'de> for Tags {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let tags = Vec::<String>::deserialize(deserializer)?;
        Tags::try_from(tags).map_err(serde::de::Error::custom)
    }
}

// =============================================================================
// Item Payload
// =============================================================================

/// Every user-editable field of an item, already validated.
///
/// Produced by [`ItemForm::into_payload`](crate::form::ItemForm::into_payload);
/// the item store only ever accepts this type. It is serialize-only so that a
/// payload cannot be built from raw JSON without passing through the form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ItemPayload {
    pub name: String,
    pub brand: String,
    pub series: String,
    pub description: String,
    /// ISO 8601 date (`YYYY-MM-DD`), may be empty.
    pub acquired_date: String,
    #[serde(rename = "purchasePrice", with = "amount")]
    #[ts(type = "number")]
    pub purchase_price_cents: i64,
    #[serde(rename = "soldPrice", with = "amount")]
    #[ts(type = "number")]
    pub sold_price_cents: i64,
    #[serde(rename = "estimatedValue", with = "amount")]
    #[ts(type = "number")]
    pub estimated_value_cents: i64,
    pub image_url: String,
    pub status: ItemStatus,
    #[serde(rename = "type")]
    pub item_type: ItemType,
    pub rarity: Rarity,
    pub quantity: i64,
    pub total_boxes_in_set: i64,
    pub condition: Option<Condition>,
    pub authenticity: Option<Authenticity>,
    pub tags: Tags,
}

// =============================================================================
// Stored Field Adapters
// =============================================================================
//
// Stored records carry prices as decimal numbers (`12.5`) and may hold `""`
// for an untouched numeric input. In memory both are whole integers.

mod amount {
    use crate::money::Money;
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serializer};
    use serde_json::Value;

    pub fn serialize<S>(cents: &i64, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_f64(Money::from_cents(*cents).to_decimal())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<i64, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        let money = match &value {
            Value::Null => Some(Money::default()),
            Value::Number(n) => match n.as_i64() {
                Some(whole) => whole.checked_mul(100).map(Money::from_cents),
                None => n.as_f64().and_then(Money::from_decimal),
            },
            Value::String(s) if s.trim().is_empty() => Some(Money::default()),
            Value::String(s) => Money::parse_amount(s).ok(),
            _ => None,
        };

        money
            .map(|m| m.cents())
            .ok_or_else(|| D::Error::custom(format!("invalid amount: {}", value)))
    }
}

mod count {
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serializer};
    use serde_json::Value;

    pub fn serialize<S>(count: &i64, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_i64(*count)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<i64, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        let count = match &value {
            Value::Null => Some(0),
            Value::Number(n) => n.as_i64().or_else(|| {
                n.as_f64()
                    .filter(|f| f.is_finite() && f.abs() < i64::MAX as f64)
                    .map(|f| f.trunc() as i64)
            }),
            Value::String(s) if s.trim().is_empty() => Some(0),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        };

        count.ok_or_else(|| D::Error::custom(format!("invalid count: {}", value)))
    }
}

const fn default_quantity() -> i64 {
    1
}

// =============================================================================
// Item
// =============================================================================

/// One collectible catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Item {
    /// Unique identifier (UUID v4), immutable after creation.
    pub id: String,

    /// Series / collection name. The main display title.
    pub name: String,

    pub brand: String,

    /// Character or variation within the series.
    pub series: String,

    pub description: String,

    /// ISO 8601 date string. Empty or malformed dates sort as the epoch.
    pub acquired_date: String,

    #[serde(rename = "purchasePrice", default, with = "amount")]
    #[ts(type = "number")]
    pub purchase_price_cents: i64,

    /// Meaningful only when status is Sold.
    #[serde(rename = "soldPrice", default, with = "amount")]
    #[ts(type = "number")]
    pub sold_price_cents: i64,

    /// Meaningful only when status is Tradeable.
    #[serde(rename = "estimatedValue", default, with = "amount")]
    #[ts(type = "number")]
    pub estimated_value_cents: i64,

    /// Opaque image reference, often an inline `data:` URI.
    pub image_url: String,

    pub status: ItemStatus,

    #[serde(rename = "type")]
    pub item_type: ItemType,

    pub rarity: Rarity,

    /// Records written before quantities existed count as one.
    #[serde(default = "default_quantity", with = "count")]
    #[ts(type = "number")]
    pub quantity: i64,

    /// Meaningful only for set types (see [`ItemType::has_set_size`]).
    #[serde(default, with = "count")]
    #[ts(type = "number")]
    pub total_boxes_in_set: i64,

    #[serde(default)]
    pub condition: Option<Condition>,

    #[serde(default)]
    pub authenticity: Option<Authenticity>,

    #[serde(default)]
    pub tags: Tags,

    #[serde(default)]
    pub is_favorite: bool,

    /// Drafts are hidden from the normal view.
    #[serde(default)]
    pub is_draft: bool,
}

/// Which of the three price fields a [`PriceLine`] refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceKind {
    Purchase,
    Sold,
    Estimated,
}

impl PriceKind {
    pub const fn label(&self) -> &'static str {
        match self {
            PriceKind::Purchase => "Purchase Price",
            PriceKind::Sold => "Sold Price",
            PriceKind::Estimated => "Estimated Value",
        }
    }
}

/// A price that is relevant for the item's current status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceLine {
    pub kind: PriceKind,
    pub amount: Money,
}

impl Item {
    /// Builds an item from a validated payload.
    ///
    /// New items always start out non-favorited.
    pub fn from_payload(id: String, payload: ItemPayload, is_draft: bool) -> Self {
        let mut item = Item {
            id,
            name: String::new(),
            brand: String::new(),
            series: String::new(),
            description: String::new(),
            acquired_date: String::new(),
            purchase_price_cents: 0,
            sold_price_cents: 0,
            estimated_value_cents: 0,
            image_url: String::new(),
            status: ItemStatus::default(),
            item_type: ItemType::default(),
            rarity: Rarity::default(),
            quantity: 0,
            total_boxes_in_set: 0,
            condition: None,
            authenticity: None,
            tags: Tags::new(),
            is_favorite: false,
            is_draft,
        };
        item.apply_payload(payload);
        item
    }

    /// Overwrites every user-editable field. `id`, `is_favorite` and
    /// `is_draft` are untouched.
    pub fn apply_payload(&mut self, payload: ItemPayload) {
        let ItemPayload {
            name,
            brand,
            series,
            description,
            acquired_date,
            purchase_price_cents,
            sold_price_cents,
            estimated_value_cents,
            image_url,
            status,
            item_type,
            rarity,
            quantity,
            total_boxes_in_set,
            condition,
            authenticity,
            tags,
        } = payload;

        self.name = name;
        self.brand = brand;
        self.series = series;
        self.description = description;
        self.acquired_date = acquired_date;
        self.purchase_price_cents = purchase_price_cents;
        self.sold_price_cents = sold_price_cents;
        self.estimated_value_cents = estimated_value_cents;
        self.image_url = image_url;
        self.status = status;
        self.item_type = item_type;
        self.rarity = rarity;
        self.quantity = quantity;
        self.total_boxes_in_set = total_boxes_in_set;
        self.condition = condition;
        self.authenticity = authenticity;
        self.tags = tags;
    }

    /// Extracts the user-editable fields (used to pre-populate a form).
    pub fn payload(&self) -> ItemPayload {
        ItemPayload {
            name: self.name.clone(),
            brand: self.brand.clone(),
            series: self.series.clone(),
            description: self.description.clone(),
            acquired_date: self.acquired_date.clone(),
            purchase_price_cents: self.purchase_price_cents,
            sold_price_cents: self.sold_price_cents,
            estimated_value_cents: self.estimated_value_cents,
            image_url: self.image_url.clone(),
            status: self.status,
            item_type: self.item_type,
            rarity: self.rarity,
            quantity: self.quantity,
            total_boxes_in_set: self.total_boxes_in_set,
            condition: self.condition,
            authenticity: self.authenticity,
            tags: self.tags.clone(),
        }
    }

    #[inline]
    pub fn purchase_price(&self) -> Money {
        Money::from_cents(self.purchase_price_cents)
    }

    #[inline]
    pub fn sold_price(&self) -> Money {
        Money::from_cents(self.sold_price_cents)
    }

    #[inline]
    pub fn estimated_value(&self) -> Money {
        Money::from_cents(self.estimated_value_cents)
    }

    /// The prices the item card lists for the current status.
    ///
    /// Hidden prices stay stored so flipping the status back restores them.
    pub fn price_lines(&self) -> Vec<PriceLine> {
        let mut lines = Vec::with_capacity(2);
        if self.status.shows_estimated_value() {
            lines.push(PriceLine {
                kind: PriceKind::Estimated,
                amount: self.estimated_value(),
            });
        }
        if self.status.shows_sold_price() {
            lines.push(PriceLine {
                kind: PriceKind::Sold,
                amount: self.sold_price(),
            });
        }
        if self.status.lists_purchase_price() {
            lines.push(PriceLine {
                kind: PriceKind::Purchase,
                amount: self.purchase_price(),
            });
        }
        lines
    }

    /// Number of boxes in the set, when the type has one and it was filled in.
    pub fn set_size(&self) -> Option<i64> {
        (self.item_type.has_set_size() && self.total_boxes_in_set > 0)
            .then_some(self.total_boxes_in_set)
    }

    /// Case-insensitive substring match against name, series and brand.
    ///
    /// `needle` must already be lowercase.
    pub fn matches_search(&self, needle: &str) -> bool {
        needle.is_empty()
            || self.name.to_lowercase().contains(needle)
            || self.series.to_lowercase().contains(needle)
            || self.brand.to_lowercase().contains(needle)
    }
}

// =============================================================================
// Bulk Edit Field / Value
// =============================================================================

/// The item fields quick-select can rewrite in bulk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum BulkField {
    Status,
    Type,
    Rarity,
}

impl BulkField {
    /// Labels the UI offers for this field.
    pub fn options(&self) -> Vec<&'static str> {
        match self {
            BulkField::Status => ItemStatus::ALL.iter().map(|v| v.label()).collect(),
            BulkField::Type => ItemType::ALL.iter().map(|v| v.label()).collect(),
            BulkField::Rarity => Rarity::ALL.iter().map(|v| v.label()).collect(),
        }
    }
}

/// A value for one [`BulkField`]. The variant carries the field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(tag = "field", content = "value", rename_all = "lowercase")]
#[ts(export)]
pub enum BulkValue {
    Status(ItemStatus),
    Type(ItemType),
    Rarity(Rarity),
}

impl BulkValue {
    /// Parses a label for the given field.
    ///
    /// ## Returns
    /// * `Ok(None)` - the input is blank (no value staged)
    /// * `Ok(Some(value))` - a valid label for `field`
    /// * `Err(NotAllowed)` - not one of the field's labels
    pub fn parse(field: BulkField, input: &str) -> Result<Option<Self>, ValidationError> {
        if input.trim().is_empty() {
            return Ok(None);
        }
        let value = match field {
            BulkField::Status => BulkValue::Status(input.parse()?),
            BulkField::Type => BulkValue::Type(input.parse()?),
            BulkField::Rarity => BulkValue::Rarity(input.parse()?),
        };
        Ok(Some(value))
    }

    pub const fn field(&self) -> BulkField {
        match self {
            BulkValue::Status(_) => BulkField::Status,
            BulkValue::Type(_) => BulkField::Type,
            BulkValue::Rarity(_) => BulkField::Rarity,
        }
    }

    /// Writes this value into the matching field of `item`.
    pub fn apply_to(&self, item: &mut Item) {
        match *self {
            BulkValue::Status(status) => item.status = status,
            BulkValue::Type(item_type) => item.item_type = item_type,
            BulkValue::Rarity(rarity) => item.rarity = rarity,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
