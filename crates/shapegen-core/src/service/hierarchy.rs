// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Root-to-leaf resource hierarchies.
//!
//! For members `[A, B, C]`:
//!
//! ```text
//! A: array of B
//! B: one-of A, array of C, lookup by-a on the index
//! C: one-of A, one-of B,   lookup by-b on the index
//! ```
//!
//! Every member references *all* of its ancestors, so a single read resolves
//! the full ancestry. An N-level hierarchy adds N(N-1)/2 ancestor references.

use tracing::debug;

use super::ServiceBuilder;
use crate::{
    access_pattern::AccessPattern,
    error::Result,
    handle::ResourceId,
    resource::RelationshipOptions
};

impl ServiceBuilder {
    /// Wire `members` (root first) into a hierarchy looked up through `index`.
    ///
    /// Each non-root member gets an access pattern `by-{parent}` on `index`
    /// with `pk = [parent reference]` and `sk = [type]`. On error no member
    /// is changed.
    pub fn add_hierarchy(&mut self, members: &[ResourceId], index: &str) -> Result<()> {
        for member in members {
            self.resource_ref(*member)?;
        }

        let mut staged = self.clone();
        staged.wire_hierarchy(members, index)?;
        *self = staged;

        debug!(
            service = %self.name,
            depth = members.len(),
            index,
            "hierarchy declared"
        );
        Ok(())
    }

    fn wire_hierarchy(&mut self, members: &[ResourceId], index: &str) -> Result<()> {
        for (position, &member) in members.iter().enumerate() {
            for &ancestor in &members[..position] {
                self.add_one_of(member, ancestor)?;
            }
            if let Some(&child) = members.get(position + 1) {
                self.add_array_of(member, child, RelationshipOptions::default())?;
            }
            if let Some(&parent) = position.checked_sub(1).and_then(|p| members.get(p)) {
                let parent_name = self.resource_ref(parent)?.name().to_string();
                let type_name = self
                    .resource_ref(member)?
                    .record()
                    .type_attribute_name()
                    .to_string();
                let pattern = AccessPattern::new(&format!("by-{parent_name}"))?
                    .on_index(index)
                    .partition_key([parent_name])?
                    .sort_key([type_name])?;
                self.add_access_pattern(member, pattern)?;
            }
        }
        Ok(())
    }
}
