//! Form Validation
//!
//! Local, field-scoped checks for the item and category forms. A form
//! with errors is never submitted.

use std::collections::BTreeMap;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::models::{Item, ItemPayload};

pub const MAX_NAME_LEN: usize = 120;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Item name is required")]
    NameRequired,
    #[error("Item name must be 120 characters or less")]
    NameTooLong,
    #[error("Category is required")]
    CategoryRequired,
    #[error("Stock quantity is required")]
    StockRequired,
    #[error("Stock quantity must be a whole number of zero or more")]
    StockInvalid,
    #[error("Unit price is required")]
    PriceRequired,
    #[error("Unit price must be a valid positive number")]
    PriceInvalid,
    #[error("Expiration date must be a valid YYYY-MM-DD date")]
    ExpirationInvalid,
    #[error("Category name is required")]
    CategoryNameRequired,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FormField {
    Name,
    Category,
    Stock,
    UnitPrice,
    Expiration,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldErrors(BTreeMap<FormField, ValidationError>);

impl FieldErrors {
    pub fn get(&self, field: FormField) -> Option<ValidationError> {
        self.0.get(&field).copied()
    }

    pub fn message(&self, field: FormField) -> Option<String> {
        self.get(field).map(|e| e.to_string())
    }

    /// Drop the error for a field the user is editing
    pub fn clear(&mut self, field: FormField) {
        self.0.remove(&field);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn insert(&mut self, field: FormField, error: ValidationError) {
        self.0.insert(field, error);
    }
}

/// Raw text of the item form inputs
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemForm {
    pub name: String,
    pub category_name: String,
    pub stock: String,
    pub unit_price: String,
    /// `YYYY-MM-DD` or empty
    pub expiration: String,
}

impl ItemForm {
    /// Pre-fill for editing an existing item
    pub fn from_item(item: &Item) -> Self {
        Self {
            name: item.name.clone(),
            category_name: item.category.name.clone(),
            stock: item.stock.to_string(),
            unit_price: item.unit_price.to_string(),
            expiration: item
                .expiration_date
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
        }
    }

    pub fn set(&mut self, field: FormField, value: String) {
        match field {
            FormField::Name => self.name = value,
            FormField::Category => self.category_name = value,
            FormField::Stock => self.stock = value,
            FormField::UnitPrice => self.unit_price = value,
            FormField::Expiration => self.expiration = value,
        }
    }

    pub fn validate(&self) -> Result<ItemPayload, FieldErrors> {
        let mut errors = FieldErrors::default();

        let name = self.name.trim();
        if name.is_empty() {
            errors.insert(FormField::Name, ValidationError::NameRequired);
        } else if name.chars().count() > MAX_NAME_LEN {
            errors.insert(FormField::Name, ValidationError::NameTooLong);
        }

        let category_name = self.category_name.trim();
        if category_name.is_empty() {
            errors.insert(FormField::Category, ValidationError::CategoryRequired);
        }

        let stock = match self.stock.trim() {
            "" => {
                errors.insert(FormField::Stock, ValidationError::StockRequired);
                None
            }
            raw => raw.parse::<u32>().map_err(|_| {
                errors.insert(FormField::Stock, ValidationError::StockInvalid);
            }).ok(),
        };

        let unit_price = match self.unit_price.trim() {
            "" => {
                errors.insert(FormField::UnitPrice, ValidationError::PriceRequired);
                None
            }
            raw => match Decimal::from_str(raw) {
                Ok(price) if price > Decimal::ZERO => Some(price),
                _ => {
                    errors.insert(FormField::UnitPrice, ValidationError::PriceInvalid);
                    None
                }
            },
        };

        let expiration_date = match self.expiration.trim() {
            "" => None,
            raw => match NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
                Ok(date) => Some(date),
                Err(_) => {
                    errors.insert(FormField::Expiration, ValidationError::ExpirationInvalid);
                    None
                }
            },
        };

        match (errors.is_empty(), stock, unit_price) {
            (true, Some(in_stock), Some(unit_price)) => Ok(ItemPayload {
                name: name.to_string(),
                category_name: category_name.to_string(),
                unit_price,
                in_stock,
                expiration_date,
            }),
            _ => Err(errors),
        }
    }
}

/// Trimmed category name, or the reason it cannot be submitted
pub fn validate_category_name(raw: &str) -> Result<String, ValidationError> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(ValidationError::CategoryNameRequired);
    }
    Ok(name.to_string())
}
