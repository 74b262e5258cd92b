// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Strategy objects that inject system attributes into shapes.
//!
//! A service carries one [`StrategyDefaults`]; each shape may override any
//! strategy individually through [`ShapeOptions`](crate::ShapeOptions).
//! Overrides are resolved field by field (`override.or(default)`), never
//! merged recursively.
//!
//! | Strategy | Default attributes |
//! |----------|--------------------|
//! | [`PartitionKeyStrategy`] | `id` (GUID, key, create → GUID) |
//! | [`TypeStrategy`] | `type` (STRING, create → TYPE) |
//! | [`VersioningStrategy`] | `version` (STRING, create → AUTO_INCREMENT) |
//! | [`AuditStrategy`] | `created-at`, `updated-at`, `deleted-at` |
//! | [`ListStrategy`] | `search-text`, `next-token`, `items` |

use crate::attribute::{AttributeOptions, AttributeType, Generator, LifecyclePhase, ListRole};

/// Sentinel version marking the current revision of a record.
pub const CURRENT_VERSION: &str = "LATEST";

/// Identity attribute placed first on every persistent shape.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PartitionKeyStrategy {
    /// Attribute declaration.
    pub attribute: AttributeOptions
}

impl Default for PartitionKeyStrategy {
    fn default() -> Self {
        Self {
            attribute: AttributeOptions::new("id", AttributeType::Guid)
                .short_name("id")
                .comment("Unique identifier of the record.")
                .create_generator(Generator::Guid)
                .key(true)
        }
    }
}

/// Type discriminator attribute, present on every shape.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TypeStrategy {
    /// Attribute declaration.
    pub attribute: AttributeOptions
}

impl Default for TypeStrategy {
    fn default() -> Self {
        Self {
            attribute: AttributeOptions::new("type", AttributeType::String)
                .short_name("t")
                .comment("Type discriminator.")
                .create_generator(Generator::Type)
        }
    }
}

/// Version attribute for versioned persistent shapes.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VersioningStrategy {
    /// Attribute declaration.
    pub attribute:       AttributeOptions,
    /// Version value addressing the current revision.
    pub current_version: String
}

impl Default for VersioningStrategy {
    fn default() -> Self {
        Self {
            attribute:       AttributeOptions::new("version", AttributeType::String)
                .short_name("v")
                .comment("Record version.")
                .create_generator(Generator::AutoIncrement),
            current_version: CURRENT_VERSION.to_string()
        }
    }
}

/// Audit attributes attached for one lifecycle phase.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AuditPhase {
    /// Timestamp of the phase.
    pub date: Option<AttributeOptions>,
    /// Actor of the phase.
    pub user: Option<AttributeOptions>
}

impl AuditPhase {
    /// Attributes in insertion order: date, then user.
    pub fn attributes(&self) -> impl Iterator<Item = &AttributeOptions> {
        self.date.iter().chain(self.user.iter())
    }
}

/// Audit attributes per lifecycle phase.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AuditStrategy {
    /// Attached for creation.
    pub create: AuditPhase,
    /// Attached for update.
    pub update: AuditPhase,
    /// Attached for deletion.
    pub delete: AuditPhase
}

impl AuditStrategy {
    /// Strategy that attaches nothing.
    #[must_use]
    pub fn none() -> Self {
        Self {
            create: AuditPhase::default(),
            update: AuditPhase::default(),
            delete: AuditPhase::default()
        }
    }

    /// Phase configuration for `phase`.
    #[must_use]
    pub const fn phase(&self, phase: LifecyclePhase) -> &AuditPhase {
        match phase {
            LifecyclePhase::Create => &self.create,
            LifecyclePhase::Update => &self.update,
            LifecyclePhase::Delete => &self.delete
        }
    }
}

impl Default for AuditStrategy {
    /// `created-at`, `updated-at` and `deleted-at` timestamps, no users.
    ///
    /// `updated-at` is also stamped on create so a fresh record carries it.
    fn default() -> Self {
        let stamp = |name: &str, short: &str| {
            AttributeOptions::new(name, AttributeType::DateTime).short_name(short)
        };
        Self {
            create: AuditPhase {
                date: Some(
                    stamp("created-at", "cat")
                        .comment("Creation timestamp.")
                        .create_generator(Generator::CurrentDateTimeStamp)
                ),
                user: None
            },
            update: AuditPhase {
                date: Some(
                    stamp("updated-at", "uat")
                        .comment("Last update timestamp.")
                        .create_generator(Generator::CurrentDateTimeStamp)
                        .update_generator(Generator::CurrentDateTimeStamp)
                ),
                user: None
            },
            delete: AuditPhase {
                date: Some(
                    stamp("deleted-at", "dat")
                        .comment("Deletion timestamp.")
                        .delete_generator(Generator::CurrentDateTimeStamp)
                ),
                user: None
            }
        }
    }
}

/// Attributes of list operations.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ListStrategy {
    /// Free-text search input.
    pub search_text: Option<AttributeOptions>,
    /// Pagination token, on list input and output.
    pub next_token:  AttributeOptions,
    /// Name of the envelope attribute holding the page of records.
    pub items:       String
}

impl Default for ListStrategy {
    fn default() -> Self {
        Self {
            search_text: Some(
                AttributeOptions::new("search-text", AttributeType::String)
                    .short_name("q")
                    .comment("Text matched against the search index.")
                    .list_role(ListRole::SearchText)
            ),
            next_token:  AttributeOptions::new("next-token", AttributeType::String)
                .short_name("nt")
                .comment("Continuation token of the next page.")
                .list_role(ListRole::PaginationToken),
            items:       "items".to_string()
        }
    }
}

/// Service-wide strategy defaults inherited by every shape.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct StrategyDefaults {
    /// Identity attribute.
    pub partition_key:      PartitionKeyStrategy,
    /// Whether persistent shapes carry a version attribute.
    pub versioned:          bool,
    /// Version attribute.
    pub versioning:         VersioningStrategy,
    /// Type discriminator.
    pub type_discriminator: TypeStrategy,
    /// Audit attributes.
    pub audit:              AuditStrategy,
    /// List operation attributes.
    pub list:               ListStrategy
}

impl Default for StrategyDefaults {
    fn default() -> Self {
        Self {
            partition_key:      PartitionKeyStrategy::default(),
            versioned:          true,
            versioning:         VersioningStrategy::default(),
            type_discriminator: TypeStrategy::default(),
            audit:              AuditStrategy::default(),
            list:               ListStrategy::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_audit_stamps_each_phase() {
        let audit = AuditStrategy::default();
        let names: Vec<_> = LifecyclePhase::ALL
            .iter()
            .flat_map(|phase| audit.phase(*phase).attributes())
            .map(|attr| attr.name.as_str())
            .collect();
        assert_eq!(names, ["created-at", "updated-at", "deleted-at"]);
    }

    #[test]
    fn audit_phase_orders_date_before_user() {
        let phase = AuditPhase {
            date: Some(AttributeOptions::new("created-at", AttributeType::DateTime)),
            user: Some(AttributeOptions::new("created-by", AttributeType::Guid))
        };
        let names: Vec<_> = phase.attributes().map(|a| a.name.as_str()).collect();
        assert_eq!(names, ["created-at", "created-by"]);
    }

    #[test]
    fn none_attaches_nothing() {
        let audit = AuditStrategy::none();
        assert!(
            LifecyclePhase::ALL
                .iter()
                .all(|phase| audit.phase(*phase).attributes().next().is_none())
        );
    }

    #[test]
    fn defaults_are_versioned() {
        let defaults = StrategyDefaults::default();
        assert!(defaults.versioned);
        assert_eq!(defaults.versioning.current_version, CURRENT_VERSION);
        assert!(defaults.partition_key.attribute.is_key);
    }
}
