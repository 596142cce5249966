// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::command::{NewTicket, TicketCommand, TicketUpdate};
use crate::error::CoreError;
use crate::state::TransitionResult;
use serde_json::json;
use servicedesk_audit::{Actor, DomainEvent, EventType, FIELD_FIRST_RESPONSE, HistoryDraft};
use servicedesk_domain::{
    Comment, DirectoryUser, DomainError, SlaPolicy, Ticket, TicketNumber, TicketStatus,
    assert_can_access, counts_as_response, has_elevated_access, validate_description,
    validate_resolution, validate_title,
};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

/// Builds a new ticket from user input.
///
/// The ticket starts in `New`, owned by `actor`, with its due date taken
/// from the SLA policy. The result carries a `created` history entry and a
/// `TicketCreated` event. The ticket has no storage key yet.
///
/// # Errors
///
/// Returns an error if the title or description is blank.
pub fn create_ticket(
    input: NewTicket,
    ticket_number: TicketNumber,
    actor: &Actor,
    now: OffsetDateTime,
    policy: &SlaPolicy,
) -> Result<TransitionResult, CoreError> {
    validate_title(&input.title)?;
    validate_description(&input.description)?;

    let ticket = Ticket {
        ticket_id: None,
        ticket_number,
        title: input.title.trim().to_string(),
        description: input.description.trim().to_string(),
        category: input.category,
        subcategory: normalize_optional(input.subcategory),
        priority: input.priority,
        impact: input.impact,
        urgency: input.urgency,
        service_level: input.service_level,
        status: TicketStatus::New,
        requester_id: actor.id.clone(),
        assignee_id: None,
        resolution: None,
        created_at: now,
        updated_at: now,
        due_date: Some(policy.compute_due_date(now, input.service_level)),
        closed_at: None,
        first_responded_at: None,
        version: 1,
    };

    let number: String = ticket.ticket_number.to_string();
    let event = DomainEvent::new(
        EventType::TicketCreated,
        None,
        number.clone(),
        actor,
        now,
        json!({
            "title": ticket.title,
            "category": ticket.category,
            "priority": ticket.priority,
            "service_level": ticket.service_level,
            "requester_id": ticket.requester_id,
        }),
    );

    Ok(TransitionResult {
        history: vec![HistoryDraft::created(&number, actor, now)],
        events: vec![event],
        new_ticket: ticket,
    })
}

/// Applies a command to a ticket, producing the new ticket, its history
/// entries and outbound events.
///
/// The input ticket is never modified. On error nothing has changed.
///
/// Status changes, assignments and explicit response markers by a support
/// user other than the requester also stamp `first_responded_at` the first
/// time they happen.
///
/// # Errors
///
/// Returns an error if:
/// - The actor cannot see the ticket, or lacks the role for the command
/// - The transition is not in the lifecycle table
/// - A required field (resolution, title, assignee) is invalid
/// - `expected_status` does not match the current status
pub fn apply(
    ticket: &Ticket,
    command: TicketCommand,
    actor: &Actor,
    now: OffsetDateTime,
    policy: &SlaPolicy,
) -> Result<TransitionResult, CoreError> {
    assert_can_access(ticket, &actor.id, actor.role)?;

    let mut change = Change::new(ticket, actor, now);
    let is_response: bool = match command {
        TicketCommand::Transition {
            to,
            resolution,
            expected_status,
        } => {
            check_expected_status(ticket, expected_status)?;
            change.transition(to, resolution)?;
            true
        }
        TicketCommand::Reopen { expected_status } => {
            check_expected_status(ticket, expected_status)?;
            if !ticket.status.is_reopen(TicketStatus::Open) {
                return Err(DomainError::InvalidTransition {
                    from: ticket.status.to_string(),
                    to: String::from("REOPENED"),
                }
                .into());
            }
            change.transition(TicketStatus::Open, None)?;
            true
        }
        TicketCommand::Assign { assignee } => {
            change.assign(&assignee)?;
            true
        }
        TicketCommand::Unassign => {
            change.unassign()?;
            true
        }
        TicketCommand::UpdateFields(update) => {
            change.update_fields(update, policy)?;
            false
        }
        TicketCommand::RecordFirstResponse => true,
    };

    if is_response {
        change.record_first_response();
    }

    Ok(change.finish())
}

/// Builds the `CommentAdded` event for a new comment.
///
/// The event is addressed to the other party: the assignee when the
/// requester comments, otherwise the requester. Internal comments are
/// never addressed to the requester.
#[must_use]
pub fn comment_added_event(
    ticket: &Ticket,
    comment: &Comment,
    actor: &Actor,
    now: OffsetDateTime,
) -> DomainEvent {
    let recipient: Option<&str> = if comment.author_id == ticket.requester_id {
        ticket.assignee_id.as_deref()
    } else if comment.is_internal {
        None
    } else {
        Some(ticket.requester_id.as_str())
    };

    DomainEvent::new(
        EventType::CommentAdded,
        ticket.ticket_id,
        ticket.ticket_number.to_string(),
        actor,
        now,
        json!({
            "comment_id": comment.comment_id,
            "is_internal": comment.is_internal,
            "recipient_id": recipient,
        }),
    )
}

fn check_expected_status(
    ticket: &Ticket,
    expected_status: Option<TicketStatus>,
) -> Result<(), DomainError> {
    match expected_status {
        Some(expected) if expected != ticket.status => Err(DomainError::Conflict {
            resource: "Ticket",
            message: format!(
                "expected {} to be {expected} but it is {}",
                ticket.ticket_number, ticket.status
            ),
        }),
        _ => Ok(()),
    }
}

/// Trims an optional free-text value, mapping blank to `None`.
fn normalize_optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Replaces `slot` with `value` when they differ, returning the old value.
fn replace_if_changed<T: PartialEq>(slot: &mut T, value: Option<T>) -> Option<T> {
    let value = value?;
    if *slot == value {
        return None;
    }
    Some(std::mem::replace(slot, value))
}

/// Accumulates the effects of one command.
struct Change<'a> {
    ticket: Ticket,
    actor: &'a Actor,
    now: OffsetDateTime,
    history: Vec<HistoryDraft>,
    events: Vec<DomainEvent>,
}

impl<'a> Change<'a> {
    fn new(ticket: &Ticket, actor: &'a Actor, now: OffsetDateTime) -> Self {
        Self {
            ticket: ticket.clone(),
            actor,
            now,
            history: Vec::new(),
            events: Vec::new(),
        }
    }

    fn is_elevated(&self) -> bool {
        has_elevated_access(self.actor.role)
    }

    fn is_requester(&self) -> bool {
        self.ticket.requester_id == self.actor.id
    }

    fn record(&mut self, field: &str, old_value: Option<String>, new_value: Option<String>) {
        self.history.push(HistoryDraft::changed(
            field, old_value, new_value, self.actor, self.now,
        ));
    }

    fn emit(&mut self, event_type: EventType, payload: serde_json::Value) {
        self.events.push(DomainEvent::new(
            event_type,
            self.ticket.ticket_id,
            self.ticket.ticket_number.to_string(),
            self.actor,
            self.now,
            payload,
        ));
    }

    fn require_elevated(&self, action: &str) -> Result<(), DomainError> {
        if self.is_elevated() {
            Ok(())
        } else {
            Err(DomainError::forbidden(
                action,
                format!("{} is not support staff", self.actor.id),
            ))
        }
    }

    fn authorize_transition(&self, from: TicketStatus, to: TicketStatus) -> Result<(), DomainError> {
        if self.is_elevated() {
            return Ok(());
        }
        let closes_resolved = from == TicketStatus::Resolved && to == TicketStatus::Closed;
        if self.is_requester() && (closes_resolved || from.is_reopen(to)) {
            return Ok(());
        }
        Err(DomainError::forbidden(
            "change ticket status",
            "requesters may only close or reopen their own resolved tickets",
        ))
    }

    fn transition(&mut self, to: TicketStatus, resolution: Option<String>) -> Result<(), DomainError> {
        let from: TicketStatus = self.ticket.status;
        self.authorize_transition(from, to)?;
        from.validate_transition(to)?;

        let resolution = normalize_optional(resolution);
        match to {
            TicketStatus::Resolved => {
                validate_resolution(resolution.as_deref())?;
            }
            TicketStatus::Closed => {}
            _ if resolution.is_some() => {
                return Err(DomainError::validation(
                    "resolution",
                    "only applies when resolving or closing",
                ));
            }
            _ => {}
        }
        if resolution.is_some() {
            self.ticket.resolution = resolution;
        }

        self.set_status(to, false);
        Ok(())
    }

    fn set_status(&mut self, to: TicketStatus, auto_triaged: bool) {
        let from: TicketStatus = self.ticket.status;
        self.ticket.status = to;
        self.ticket.closed_at = to.is_terminal().then_some(self.now);

        self.record(
            "status",
            Some(from.to_string()),
            Some(to.to_string()),
        );
        // A reopened ticket must be resolved afresh.
        if from.is_reopen(to)
            && let Some(old) = self.ticket.resolution.take()
        {
            self.record("resolution", Some(old), None);
        }
        self.emit(
            EventType::StatusChanged,
            json!({
                "from": from,
                "to": to,
                "reopened": from.is_reopen(to),
                "auto_triaged": auto_triaged,
            }),
        );
    }

    fn assign(&mut self, assignee: &DirectoryUser) -> Result<(), DomainError> {
        self.require_elevated("assign ticket")?;
        if !assignee.is_assignable() {
            return Err(DomainError::validation(
                "assignee_id",
                format!("{} is not an active support user", assignee.user_id),
            ));
        }
        if self.ticket.assignee_id.as_deref() == Some(assignee.user_id.as_str()) {
            return Ok(());
        }

        let previous = self.ticket.assignee_id.replace(assignee.user_id.clone());
        self.record(
            "assignee_id",
            previous.clone(),
            Some(assignee.user_id.clone()),
        );
        self.emit(
            EventType::TicketAssigned,
            json!({
                "assignee_id": assignee.user_id,
                "previous_assignee_id": previous,
            }),
        );

        if self.ticket.status == TicketStatus::New {
            self.set_status(TicketStatus::Open, true);
        }
        Ok(())
    }

    fn unassign(&mut self) -> Result<(), DomainError> {
        self.require_elevated("unassign ticket")?;
        let Some(previous) = self.ticket.assignee_id.take() else {
            return Ok(());
        };
        self.record("assignee_id", Some(previous.clone()), None);
        self.emit(
            EventType::TicketAssigned,
            json!({
                "assignee_id": null,
                "previous_assignee_id": previous,
            }),
        );
        Ok(())
    }

    fn update_fields(&mut self, update: TicketUpdate, policy: &SlaPolicy) -> Result<(), DomainError> {
        if update.is_empty() {
            return Err(DomainError::validation("update", "no fields supplied"));
        }
        if update.touches_classification() {
            self.require_elevated("change ticket classification")?;
        }
        if (update.title.is_some() || update.description.is_some())
            && !(self.is_requester() || self.is_elevated())
        {
            return Err(DomainError::forbidden(
                "edit ticket",
                "only the requester or support staff may edit tickets",
            ));
        }

        if let Some(title) = &update.title {
            validate_title(title)?;
        }
        if let Some(description) = &update.description {
            validate_description(description)?;
        }

        let title = update.title.map(|t| t.trim().to_string());
        if let Some(old) = replace_if_changed(&mut self.ticket.title, title) {
            let new = self.ticket.title.clone();
            self.record("title", Some(old), Some(new));
        }
        let description = update.description.map(|d| d.trim().to_string());
        if let Some(old) = replace_if_changed(&mut self.ticket.description, description) {
            let new = self.ticket.description.clone();
            self.record("description", Some(old), Some(new));
        }
        if let Some(old) = replace_if_changed(&mut self.ticket.category, update.category) {
            let new = self.ticket.category;
            self.record("category", Some(old.to_string()), Some(new.to_string()));
        }
        let subcategory = update.subcategory.map(normalize_optional);
        if let Some(old) = replace_if_changed(&mut self.ticket.subcategory, subcategory) {
            let new = self.ticket.subcategory.clone();
            self.record("subcategory", old, new);
        }
        if let Some(old) = replace_if_changed(&mut self.ticket.priority, update.priority) {
            let new = self.ticket.priority;
            self.record("priority", Some(old.to_string()), Some(new.to_string()));
        }
        if let Some(old) = replace_if_changed(&mut self.ticket.impact, update.impact) {
            let new = self.ticket.impact;
            self.record("impact", Some(old.to_string()), Some(new.to_string()));
        }
        if let Some(old) = replace_if_changed(&mut self.ticket.urgency, update.urgency) {
            let new = self.ticket.urgency;
            self.record("urgency", Some(old.to_string()), Some(new.to_string()));
        }
        if let Some(old) = replace_if_changed(&mut self.ticket.service_level, update.service_level)
        {
            let new = self.ticket.service_level;
            // Terminal tickets keep the due date they were closed against.
            if !self.ticket.status.is_terminal() {
                self.ticket.due_date =
                    Some(policy.compute_due_date(self.ticket.created_at, new));
            }
            self.record(
                "service_level",
                Some(old.to_string()),
                Some(new.to_string()),
            );
        }
        Ok(())
    }

    fn record_first_response(&mut self) {
        if self.ticket.first_responded_at.is_some()
            || !counts_as_response(&self.ticket, &self.actor.id, self.actor.role)
        {
            return;
        }
        self.ticket.first_responded_at = Some(self.now);
        let stamp = self.now.format(&Rfc3339).ok();
        self.record(FIELD_FIRST_RESPONSE, None, stamp);
    }

    fn finish(mut self) -> TransitionResult {
        if !self.history.is_empty() {
            self.ticket.updated_at = self.now;
        }
        TransitionResult {
            new_ticket: self.ticket,
            history: self.history,
            events: self.events,
        }
    }
}
