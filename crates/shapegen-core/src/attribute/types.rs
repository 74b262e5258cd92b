// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Semantic attribute types.

use std::{fmt, str::FromStr};

use crate::error::ShapeError;

/// Closed set of semantic attribute types.
///
/// `Custom` holds the *name* of another shape rather than a handle, so a
/// relationship can be declared before its target exists. Names are bound in
/// [`ServiceBuilder::build`](crate::ServiceBuilder::build).
///
/// # Parsing
///
/// | Input | Type |
/// |-------|------|
/// | `"guid"`, `"GUID"` | `Guid` |
/// | `"date-time"`, `"DATE_TIME"` | `DateTime` |
/// | `"ip-address"`, `"IPADDRESS"` | `IpAddress` |
/// | `"array<email>"` | `Array(Email)` |
/// | `"custom<person>"` | `Custom("person")` |
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum AttributeType {
    /// Globally unique identifier.
    Guid,
    /// Free text.
    String,
    /// Integer.
    Int,
    /// Floating point number.
    Float,
    /// True/false.
    Boolean,
    /// Calendar date.
    Date,
    /// Time of day.
    Time,
    /// Date and time.
    DateTime,
    /// Epoch timestamp.
    Timestamp,
    /// E-mail address.
    Email,
    /// Arbitrary JSON document.
    Json,
    /// Phone number.
    Phone,
    /// URL.
    Url,
    /// IP address.
    IpAddress,
    /// Aggregate count.
    Count,
    /// Aggregate average.
    Average,
    /// Aggregate sum.
    Sum,
    /// Homogeneous list.
    Array(Box<AttributeType>),
    /// Reference to another shape by name.
    Custom(String)
}

impl AttributeType {
    /// Name of the referenced shape for `Custom` and `Array(Custom)`.
    #[must_use]
    pub fn referenced_shape(&self) -> Option<&str> {
        match self {
            Self::Custom(name) => Some(name),
            Self::Array(inner) => inner.referenced_shape(),
            _ => None
        }
    }

    /// Check if this is an `Array`.
    #[must_use]
    pub const fn is_array(&self) -> bool {
        matches!(self, Self::Array(_))
    }

    /// Build an `Array` of `inner`.
    #[must_use]
    pub fn array_of(inner: Self) -> Self {
        Self::Array(Box::new(inner))
    }

    fn scalar_from_key(key: &str) -> Option<Self> {
        let ty = match key {
            "guid" => Self::Guid,
            "string" => Self::String,
            "int" => Self::Int,
            "float" => Self::Float,
            "boolean" => Self::Boolean,
            "date" => Self::Date,
            "time" => Self::Time,
            "datetime" => Self::DateTime,
            "timestamp" => Self::Timestamp,
            "email" => Self::Email,
            "json" => Self::Json,
            "phone" => Self::Phone,
            "url" => Self::Url,
            "ipaddress" => Self::IpAddress,
            "count" => Self::Count,
            "average" => Self::Average,
            "sum" => Self::Sum,
            _ => return None
        };
        Some(ty)
    }
}

impl fmt::Display for AttributeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Guid => "guid",
            Self::String => "string",
            Self::Int => "int",
            Self::Float => "float",
            Self::Boolean => "boolean",
            Self::Date => "date",
            Self::Time => "time",
            Self::DateTime => "date-time",
            Self::Timestamp => "timestamp",
            Self::Email => "email",
            Self::Json => "json",
            Self::Phone => "phone",
            Self::Url => "url",
            Self::IpAddress => "ip-address",
            Self::Count => "count",
            Self::Average => "average",
            Self::Sum => "sum",
            Self::Array(inner) => return write!(f, "array<{inner}>"),
            Self::Custom(name) => return write!(f, "custom<{name}>")
        };
        f.write_str(label)
    }
}

impl FromStr for AttributeType {
    type Err = ShapeError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        let unknown = || ShapeError::UnknownAttributeType(value.to_string());

        if let Some((head, rest)) = trimmed.split_once('<') {
            let inner = rest.strip_suffix('>').ok_or_else(unknown)?.trim();
            return match head.trim().to_ascii_lowercase().as_str() {
                "array" => Ok(Self::array_of(inner.parse().map_err(|_| unknown())?)),
                "custom" if !inner.is_empty() => Ok(Self::Custom(inner.to_string())),
                _ => Err(unknown())
            };
        }

        let key: String = trimmed
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .map(|c| c.to_ascii_lowercase())
            .collect();
        Self::scalar_from_key(&key).ok_or_else(unknown)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_scalars_in_any_casing() {
        assert_eq!("GUID".parse::<AttributeType>().unwrap(), AttributeType::Guid);
        assert_eq!(
            "date_time".parse::<AttributeType>().unwrap(),
            AttributeType::DateTime
        );
        assert_eq!(
            "date-time".parse::<AttributeType>().unwrap(),
            AttributeType::DateTime
        );
        assert_eq!(
            "IPADDRESS".parse::<AttributeType>().unwrap(),
            AttributeType::IpAddress
        );
    }

    #[test]
    fn parses_nested_arrays_and_references() {
        assert_eq!(
            "array<array<int>>".parse::<AttributeType>().unwrap(),
            AttributeType::array_of(AttributeType::array_of(AttributeType::Int))
        );
        assert_eq!(
            "custom<person>".parse::<AttributeType>().unwrap(),
            AttributeType::Custom("person".to_string())
        );
    }

    #[test]
    fn rejects_unknown_types() {
        assert_eq!(
            "decimal".parse::<AttributeType>(),
            Err(ShapeError::UnknownAttributeType("decimal".to_string()))
        );
        assert!("array<decimal>".parse::<AttributeType>().is_err());
        assert!("custom<>".parse::<AttributeType>().is_err());
        assert!("array<int".parse::<AttributeType>().is_err());
    }

    #[test]
    fn display_round_trips_through_parse() {
        let ty = AttributeType::array_of(AttributeType::Custom("order".to_string()));
        assert_eq!(ty.to_string(), "array<custom<order>>");
        assert_eq!(ty.to_string().parse::<AttributeType>().unwrap(), ty);
    }

    #[test]
    fn referenced_shape_looks_through_arrays() {
        let ty = AttributeType::array_of(AttributeType::Custom("order".to_string()));
        assert_eq!(ty.referenced_shape(), Some("order"));
        assert_eq!(AttributeType::String.referenced_shape(), None);
    }
}
