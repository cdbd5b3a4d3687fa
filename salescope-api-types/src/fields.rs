//! Allow-listed sale fields
//!
//! Every field a client may name in a search, sort or filter is a variant of
//! [`SaleField`]. The three allow-lists are fixed slices and the storage layer
//! maps each variant to its column with an exhaustive `match`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::ValidationError;

/// Value kind of a field, used to coerce loosely typed wire values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Integer,
    Float,
    Date,
    Timestamp,
    /// Multi-value attribute stored in a child table
    TextList,
}

impl FieldKind {
    pub fn describe(&self) -> &'static str {
        match self {
            FieldKind::Text => "string",
            FieldKind::Integer => "integer",
            FieldKind::Float => "number",
            FieldKind::Date => "date (YYYY-MM-DD)",
            FieldKind::Timestamp => "timestamp (RFC 3339)",
            FieldKind::TextList => "string",
        }
    }
}

/// Sale fields that may appear in a query request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SaleField {
    CustomerName,
    PhoneNumber,
    Gender,
    Age,
    CustomerRegion,
    ProductCategory,
    Tags,
    Quantity,
    FinalAmount,
    Date,
    PaymentMethod,
    OrderStatus,
    DeliveryType,
    CreatedAt,
}

/// What a field is being used for in a request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldPurpose {
    Search,
    Sort,
    Filter,
}

impl fmt::Display for FieldPurpose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldPurpose::Search => f.write_str("searching"),
            FieldPurpose::Sort => f.write_str("sorting"),
            FieldPurpose::Filter => f.write_str("filtering"),
        }
    }
}

impl SaleField {
    pub const SEARCHABLE: &'static [SaleField] = &[SaleField::CustomerName, SaleField::PhoneNumber];

    pub const SORTABLE: &'static [SaleField] = &[
        SaleField::Date,
        SaleField::Quantity,
        SaleField::CustomerName,
        SaleField::FinalAmount,
        SaleField::CreatedAt,
    ];

    pub const FILTERABLE: &'static [SaleField] = &[
        SaleField::CustomerRegion,
        SaleField::Gender,
        SaleField::Age,
        SaleField::ProductCategory,
        SaleField::Tags,
        SaleField::PaymentMethod,
        SaleField::Date,
        SaleField::OrderStatus,
        SaleField::DeliveryType,
    ];

    const ALL: &'static [SaleField] = &[
        SaleField::CustomerName,
        SaleField::PhoneNumber,
        SaleField::Gender,
        SaleField::Age,
        SaleField::CustomerRegion,
        SaleField::ProductCategory,
        SaleField::Tags,
        SaleField::Quantity,
        SaleField::FinalAmount,
        SaleField::Date,
        SaleField::PaymentMethod,
        SaleField::OrderStatus,
        SaleField::DeliveryType,
        SaleField::CreatedAt,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SaleField::CustomerName => "customerName",
            SaleField::PhoneNumber => "phoneNumber",
            SaleField::Gender => "gender",
            SaleField::Age => "age",
            SaleField::CustomerRegion => "customerRegion",
            SaleField::ProductCategory => "productCategory",
            SaleField::Tags => "tags",
            SaleField::Quantity => "quantity",
            SaleField::FinalAmount => "finalAmount",
            SaleField::Date => "date",
            SaleField::PaymentMethod => "paymentMethod",
            SaleField::OrderStatus => "orderStatus",
            SaleField::DeliveryType => "deliveryType",
            SaleField::CreatedAt => "createdAt",
        }
    }

    pub fn kind(&self) -> FieldKind {
        match self {
            SaleField::Age | SaleField::Quantity => FieldKind::Integer,
            SaleField::FinalAmount => FieldKind::Float,
            SaleField::Date => FieldKind::Date,
            SaleField::CreatedAt => FieldKind::Timestamp,
            SaleField::Tags => FieldKind::TextList,
            SaleField::CustomerName
            | SaleField::PhoneNumber
            | SaleField::Gender
            | SaleField::CustomerRegion
            | SaleField::ProductCategory
            | SaleField::PaymentMethod
            | SaleField::OrderStatus
            | SaleField::DeliveryType => FieldKind::Text,
        }
    }

    pub fn is_allowed_for(&self, purpose: FieldPurpose) -> bool {
        let list = match purpose {
            FieldPurpose::Search => Self::SEARCHABLE,
            FieldPurpose::Sort => Self::SORTABLE,
            FieldPurpose::Filter => Self::FILTERABLE,
        };
        list.contains(self)
    }

    /// Fails with a validation error when the field is not on the allow-list for `purpose`
    pub fn ensure_allowed(&self, purpose: FieldPurpose) -> Result<(), ValidationError> {
        if self.is_allowed_for(purpose) {
            Ok(())
        } else {
            Err(ValidationError::FieldNotAllowed {
                field: self.as_str().to_string(),
                purpose,
            })
        }
    }

    /// Parse a wire field name and check it against one allow-list
    pub fn parse_for(name: &str, purpose: FieldPurpose) -> Result<Self, ValidationError> {
        let field: SaleField = name.parse()?;
        field.ensure_allowed(purpose)?;
        Ok(field)
    }
}

impl fmt::Display for SaleField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SaleField {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| ValidationError::UnknownField(s.to_string()))
    }
}
