// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Report aggregation over a ticket corpus.
//!
//! Every section works on the tickets matched by one [`TicketFilter`]
//! predicate. Aggregation never fails: an empty corpus yields zero counts
//! and empty series. Results depend only on the corpus, the directory and
//! the supplied `now`.

use serde::Serialize;
use servicedesk_domain::{
    Category, DirectoryUser, Priority, SlaPolicy, Ticket, TicketFilter, TicketStatus,
    is_breached, is_compliant,
};
use std::collections::BTreeMap;
use time::{Date, Duration, Month, OffsetDateTime, Time, UtcOffset};

/// Target average resolution time shown next to the resolution trend.
pub const RESOLUTION_TARGET_DAYS: f64 = 3.0;

/// Number of calendar months covered by the trend series, including the
/// current one.
pub const TREND_WINDOW_MONTHS: u8 = 6;

/// Length of the trailing window for team performance and SLA metrics.
pub const RECENT_WINDOW_DAYS: i64 = 30;

/// A point-in-time operational report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportSnapshot {
    #[serde(with = "time::serde::rfc3339")]
    pub generated_at: OffsetDateTime,
    pub filter: TicketFilter,
    pub summary: ReportSummary,
    /// All five statuses, in lifecycle order, zero counts included.
    pub status_breakdown: Vec<StatusCount>,
    pub category_breakdown: Vec<BreakdownEntry<Category>>,
    pub priority_breakdown: Vec<BreakdownEntry<Priority>>,
    pub resolution_trend: Vec<ResolutionTrendPoint>,
    pub ticket_trend: Vec<TicketTrendPoint>,
    pub team_performance: Vec<TeamPerformance>,
    pub sla_metrics: SlaMetrics,
}

/// Headline counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ReportSummary {
    pub total: usize,
    /// `New`, `Open` or `InProgress`.
    pub pending: usize,
    pub resolved: usize,
    pub closed: usize,
    /// Past due and not yet resolved or closed.
    pub overdue: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatusCount {
    pub status: TicketStatus,
    pub count: usize,
}

/// A share-of-total entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BreakdownEntry<K> {
    pub key: K,
    pub count: usize,
    /// `round(count / total * 100)`.
    pub percentage: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolutionTrendPoint {
    /// Creation month, `YYYY-MM` (UTC).
    pub month: String,
    /// Mean days from creation to close, rounded to two decimals.
    pub average_days: f64,
    pub target_days: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TicketTrendPoint {
    /// Creation month, `YYYY-MM` (UTC).
    pub month: String,
    pub tickets: usize,
    /// Tickets from that month now `Resolved` or `Closed`.
    pub resolved: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamPerformance {
    pub user_id: String,
    pub display_name: String,
    pub assigned: usize,
    pub resolved: usize,
    pub average_resolution_days: f64,
    /// Compliant over closed-with-due-date, 100 when none qualify.
    pub sla_compliance: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SlaMetrics {
    /// First responses within the response target.
    pub response_compliance: u32,
    /// Closures within the due date.
    pub resolution_compliance: u32,
    pub responded: usize,
    pub closed_with_due_date: usize,
}

/// Builds the full report for the tickets matching `filter`.
#[must_use]
pub fn build_ticket_report(
    tickets: &[Ticket],
    filter: &TicketFilter,
    users: &[DirectoryUser],
    now: OffsetDateTime,
    policy: &SlaPolicy,
) -> ReportSnapshot {
    let matches = filter.predicate();
    let corpus: Vec<&Ticket> = tickets.iter().filter(|&t| matches(t)).collect();

    let trend_start = trend_window_start(now);
    let recent_start = now - Duration::days(RECENT_WINDOW_DAYS);
    let recent: Vec<&Ticket> = corpus
        .iter()
        .copied()
        .filter(|t| t.created_at >= recent_start)
        .collect();

    ReportSnapshot {
        generated_at: now,
        filter: filter.clone(),
        summary: summarize(&corpus, now),
        status_breakdown: status_breakdown(&corpus),
        category_breakdown: breakdown(&corpus, Category::ALL, |t| t.category),
        priority_breakdown: breakdown(&corpus, Priority::ALL, |t| t.priority),
        resolution_trend: resolution_trend(&corpus, trend_start),
        ticket_trend: ticket_trend(&corpus, trend_start),
        team_performance: team_performance(&recent, users),
        sla_metrics: sla_metrics(&recent, policy),
    }
}

fn summarize(corpus: &[&Ticket], now: OffsetDateTime) -> ReportSummary {
    let count = |status: TicketStatus| corpus.iter().filter(|t| t.status == status).count();
    ReportSummary {
        total: corpus.len(),
        pending: corpus.iter().filter(|t| t.status.is_pending()).count(),
        resolved: count(TicketStatus::Resolved),
        closed: count(TicketStatus::Closed),
        overdue: corpus.iter().filter(|t| is_breached(t, now)).count(),
    }
}

fn status_breakdown(corpus: &[&Ticket]) -> Vec<StatusCount> {
    TicketStatus::ALL
        .iter()
        .map(|status| StatusCount {
            status: *status,
            count: corpus.iter().filter(|t| t.status == *status).count(),
        })
        .collect()
}

fn breakdown<K: Copy + PartialEq>(
    corpus: &[&Ticket],
    keys: &[K],
    key_of: impl Fn(&Ticket) -> K,
) -> Vec<BreakdownEntry<K>> {
    let total = corpus.len();
    keys.iter()
        .filter_map(|key| {
            let count = corpus.iter().filter(|&&t| key_of(t) == *key).count();
            (count > 0).then(|| BreakdownEntry {
                key: *key,
                count,
                percentage: share_percent(count, total),
            })
        })
        .collect()
}

fn resolution_trend(corpus: &[&Ticket], start: OffsetDateTime) -> Vec<ResolutionTrendPoint> {
    let mut by_month: BTreeMap<String, Vec<f64>> = BTreeMap::new();
    for ticket in corpus {
        if let Some(days) = resolution_days(ticket)
            && ticket.closed_at.is_some_and(|closed| closed >= start)
        {
            by_month
                .entry(month_key(ticket.created_at))
                .or_default()
                .push(days);
        }
    }
    by_month
        .into_iter()
        .map(|(month, days)| ResolutionTrendPoint {
            month,
            average_days: round2(mean(&days)),
            target_days: RESOLUTION_TARGET_DAYS,
        })
        .collect()
}

fn ticket_trend(corpus: &[&Ticket], start: OffsetDateTime) -> Vec<TicketTrendPoint> {
    let mut by_month: BTreeMap<String, (usize, usize)> = BTreeMap::new();
    for ticket in corpus.iter().filter(|t| t.created_at >= start) {
        let entry = by_month.entry(month_key(ticket.created_at)).or_default();
        entry.0 += 1;
        if ticket.status.is_terminal() {
            entry.1 += 1;
        }
    }
    by_month
        .into_iter()
        .map(|(month, (tickets, resolved))| TicketTrendPoint {
            month,
            tickets,
            resolved,
        })
        .collect()
}

fn team_performance(recent: &[&Ticket], users: &[DirectoryUser]) -> Vec<TeamPerformance> {
    let mut members: Vec<&DirectoryUser> = users.iter().filter(|u| u.is_team_member()).collect();
    members.sort_by(|a, b| {
        a.display_name
            .cmp(&b.display_name)
            .then_with(|| a.user_id.cmp(&b.user_id))
    });

    members
        .into_iter()
        .map(|user| {
            let assigned: Vec<&Ticket> = recent
                .iter()
                .copied()
                .filter(|t| t.assignee_id.as_deref() == Some(user.user_id.as_str()))
                .collect();
            let days: Vec<f64> = assigned.iter().filter_map(|t| resolution_days(t)).collect();
            let (compliant, qualifying) = compliance_counts(&assigned);
            TeamPerformance {
                user_id: user.user_id.clone(),
                display_name: user.display_name.clone(),
                assigned: assigned.len(),
                resolved: assigned.iter().filter(|t| t.status.is_terminal()).count(),
                average_resolution_days: round2(mean(&days)),
                sla_compliance: compliance_percent(compliant, qualifying),
            }
        })
        .collect()
}

fn sla_metrics(recent: &[&Ticket], policy: &SlaPolicy) -> SlaMetrics {
    let responses: Vec<bool> = recent
        .iter()
        .filter_map(|t| policy.is_response_compliant(t))
        .collect();
    let responded_in_time = responses.iter().filter(|ok| **ok).count();
    let (compliant, qualifying) = compliance_counts(recent);

    SlaMetrics {
        response_compliance: compliance_percent(responded_in_time, responses.len()),
        resolution_compliance: compliance_percent(compliant, qualifying),
        responded: responses.len(),
        closed_with_due_date: qualifying,
    }
}

/// Returns (compliant, closed-with-due-date).
fn compliance_counts(tickets: &[&Ticket]) -> (usize, usize) {
    tickets
        .iter()
        .filter_map(|t| is_compliant(t))
        .fold((0, 0), |(ok, all), compliant| {
            (ok + usize::from(compliant), all + 1)
        })
}

fn resolution_days(ticket: &Ticket) -> Option<f64> {
    ticket
        .closed_at
        .map(|closed| (closed - ticket.created_at).as_seconds_f64() / 86_400.0)
}

/// First instant of the oldest month in the trend window (UTC).
fn trend_window_start(now: OffsetDateTime) -> OffsetDateTime {
    let now = now.to_offset(UtcOffset::UTC);
    let mut year = now.year();
    let mut month = now.month();
    for _ in 1..TREND_WINDOW_MONTHS {
        if month == Month::January {
            year -= 1;
        }
        month = month.previous();
    }
    Date::from_calendar_date(year, month, 1)
        .map_or(OffsetDateTime::UNIX_EPOCH, |date| {
            date.with_time(Time::MIDNIGHT).assume_utc()
        })
}

/// `YYYY-MM` of the instant in UTC.
fn month_key(at: OffsetDateTime) -> String {
    let at = at.to_offset(UtcOffset::UTC);
    format!("{:04}-{:02}", at.year(), u8::from(at.month()))
}

/// Share of total, 0 when the total is 0.
fn share_percent(count: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    rounded_percent(count, total)
}

/// Compliance ratio, 100 when nothing qualifies.
fn compliance_percent(compliant: usize, qualifying: usize) -> u32 {
    if qualifying == 0 {
        return 100;
    }
    rounded_percent(compliant, qualifying)
}

/// `round(part / whole * 100)`, half rounding up. `whole` must be non-zero.
fn rounded_percent(part: usize, whole: usize) -> u32 {
    u32::try_from((part * 100 + whole / 2) / whole).unwrap_or(100)
}

#[allow(clippy::cast_precision_loss)]
fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
