// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Saved searches: named, optionally shared ticket filters.

use crate::query::select_visible;
use serde::{Deserialize, Serialize};
use servicedesk_audit::Actor;
use servicedesk_domain::{DomainError, Ticket, TicketFilter, validate_search_name};
use std::cmp::Ordering;
use time::OffsetDateTime;

/// A stored ticket filter owned by one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedSearch {
    /// `None` until persisted.
    pub search_id: Option<i64>,
    pub owner_id: String,
    pub name: String,
    pub description: Option<String>,
    pub criteria: TicketFilter,
    pub is_public: bool,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

/// Input for a new saved search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewSavedSearch {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub criteria: TicketFilter,
    #[serde(default)]
    pub is_public: bool,
}

/// Partial edit of a saved search. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SavedSearchUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub criteria: Option<TicketFilter>,
    pub is_public: Option<bool>,
}

impl SavedSearch {
    /// Builds a new search owned by `actor`.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is blank or too long, or the criteria
    /// are incoherent.
    pub fn create(
        input: NewSavedSearch,
        actor: &Actor,
        now: OffsetDateTime,
    ) -> Result<Self, DomainError> {
        validate_search_name(&input.name)?;
        input.criteria.validate()?;
        Ok(Self {
            search_id: None,
            owner_id: actor.id.clone(),
            name: input.name.trim().to_string(),
            description: input.description,
            criteria: input.criteria,
            is_public: input.is_public,
            created_at: now,
            updated_at: now,
        })
    }

    /// Returns true if `actor_id` may read this search.
    #[must_use]
    pub fn can_read(&self, actor_id: &str) -> bool {
        self.is_public || self.owner_id == actor_id
    }

    /// Enforces read access: owner, or anyone when public.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Forbidden` for other users' private searches.
    pub fn assert_can_read(&self, actor_id: &str) -> Result<(), DomainError> {
        if self.can_read(actor_id) {
            Ok(())
        } else {
            Err(DomainError::forbidden(
                "read saved search",
                format!("'{}' is private", self.name),
            ))
        }
    }

    /// Enforces owner-only access for edits and deletion.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Forbidden` unless `actor_id` owns the search.
    pub fn assert_owner(&self, actor_id: &str) -> Result<(), DomainError> {
        if self.owner_id == actor_id {
            Ok(())
        } else {
            Err(DomainError::forbidden(
                "modify saved search",
                format!("{actor_id} does not own '{}'", self.name),
            ))
        }
    }

    /// Applies an owner's edit.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor is not the owner or the new values
    /// are invalid. The search is unchanged on error.
    pub fn apply_update(
        &mut self,
        update: SavedSearchUpdate,
        actor: &Actor,
        now: OffsetDateTime,
    ) -> Result<(), DomainError> {
        self.assert_owner(&actor.id)?;
        if let Some(name) = &update.name {
            validate_search_name(name)?;
        }
        if let Some(criteria) = &update.criteria {
            criteria.validate()?;
        }

        if let Some(name) = update.name {
            self.name = name.trim().to_string();
        }
        if let Some(description) = update.description {
            self.description = Some(description).filter(|d| !d.trim().is_empty());
        }
        if let Some(criteria) = update.criteria {
            self.criteria = criteria;
        }
        if let Some(is_public) = update.is_public {
            self.is_public = is_public;
        }
        self.updated_at = now;
        Ok(())
    }

    /// Copies this search into a new private search owned by `actor`.
    ///
    /// The copy is named `"{original} (Copy)"` unless `new_name` is given.
    ///
    /// # Errors
    ///
    /// Returns an error if `actor` cannot read this search or the
    /// resulting name is invalid.
    pub fn duplicate_for(
        &self,
        actor: &Actor,
        new_name: Option<String>,
        now: OffsetDateTime,
    ) -> Result<Self, DomainError> {
        self.assert_can_read(&actor.id)?;
        let name = new_name.unwrap_or_else(|| format!("{} (Copy)", self.name));
        Self::create(
            NewSavedSearch {
                name,
                description: self.description.clone(),
                criteria: self.criteria.clone(),
                is_public: false,
            },
            actor,
            now,
        )
    }

    /// Runs the stored criteria over `tickets`.
    ///
    /// Only tickets `actor` may see are returned, newest first.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Forbidden` if `actor` cannot read the search.
    pub fn execute(&self, tickets: Vec<Ticket>, actor: &Actor) -> Result<Vec<Ticket>, DomainError> {
        self.assert_can_read(&actor.id)?;
        Ok(select_visible(tickets, &self.criteria, actor))
    }
}

/// Keeps the searches `actor_id` owns, plus public ones when requested,
/// ordered for display.
#[must_use]
pub fn visible_to(
    searches: Vec<SavedSearch>,
    actor_id: &str,
    include_public: bool,
) -> Vec<SavedSearch> {
    let mut visible: Vec<SavedSearch> = searches
        .into_iter()
        .filter(|s| s.owner_id == actor_id || (include_public && s.is_public))
        .collect();
    order_for(&mut visible, actor_id);
    visible
}

/// Orders searches owner-first, then most recently updated, then newest id.
pub fn order_for(searches: &mut [SavedSearch], actor_id: &str) {
    searches.sort_by(|a, b| compare_for(a, b, actor_id));
}

fn compare_for(a: &SavedSearch, b: &SavedSearch, actor_id: &str) -> Ordering {
    let a_owned = a.owner_id == actor_id;
    let b_owned = b.owner_id == actor_id;
    b_owned
        .cmp(&a_owned)
        .then_with(|| b.updated_at.cmp(&a.updated_at))
        .then_with(|| b.search_id.cmp(&a.search_id))
}
