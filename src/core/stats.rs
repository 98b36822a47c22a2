//! Derived statistics - read-only aggregation for dashboard and client
//! detail views. Everything here is recomputed on each call from the
//! repositories' current snapshots; nothing is cached or stored.

use super::invoicing::is_overdue;
use crate::entities::{ClientId, InvoiceStatus, ProjectStatus, TimeEntry};
use crate::repo::{InvoiceRepo, ProjectRepo, TimeEntryRepo};
use chrono::{DateTime, Datelike, NaiveDate, NaiveTime, Utc};

/// Dashboard overview figures.
#[derive(Clone, Debug, PartialEq)]
pub struct DashboardStats {
    /// Sum of totals over non-paid invoices
    pub total_outstanding: f64,
    /// Sum of totals over paid invoices
    pub total_paid: f64,
    /// Hours tracked this calendar week (Sunday start, UTC)
    pub hours_this_week: f64,
    /// Hours tracked this calendar month (UTC)
    pub hours_this_month: f64,
    /// Count of projects with active status
    pub active_projects: usize,
    /// Count of invoices currently classified overdue
    pub overdue_invoices: usize,
}

/// Per-client figures for the client detail and list views.
#[derive(Clone, Debug, PartialEq)]
pub struct ClientStats {
    /// Number of projects owned by the client
    pub project_count: usize,
    /// Total tracked hours across the client's entries
    pub total_hours: f64,
    /// Total earnings across the client's entries
    pub total_earnings: f64,
}

fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

/// Midnight of the Sunday beginning the week containing `now`, UTC.
fn week_start(now: DateTime<Utc>) -> DateTime<Utc> {
    let days_from_sunday = i64::from(now.weekday().num_days_from_sunday());
    start_of_day(now.date_naive() - chrono::Duration::days(days_from_sunday))
}

/// Midnight of the first day of the month containing `now`, UTC.
fn month_start(now: DateTime<Utc>) -> DateTime<Utc> {
    let date = now.date_naive();
    // Day 1 exists in every month; the fallback never triggers.
    start_of_day(date.with_day(1).unwrap_or(date))
}

fn tracked_hours<'a>(
    entries: impl Iterator<Item = &'a TimeEntry>,
    since: DateTime<Utc>,
) -> f64 {
    let minutes: i64 = entries
        .filter(|entry| entry.created_at >= since)
        .map(|entry| entry.duration)
        .sum();
    // Cast safety: totals are minutes of tracked work, far below 2^52.
    #[allow(clippy::cast_precision_loss)]
    let hours = minutes as f64 / 60.0;
    hours
}

/// Computes the dashboard overview at `now` from the current repository
/// snapshots.
#[must_use]
pub fn dashboard_stats(
    projects: &ProjectRepo,
    entries: &TimeEntryRepo,
    invoices: &InvoiceRepo,
    now: DateTime<Utc>,
) -> DashboardStats {
    let total_outstanding = invoices
        .list()
        .iter()
        .filter(|invoice| invoice.status != InvoiceStatus::Paid)
        .map(|invoice| invoice.total)
        .sum();

    let total_paid = invoices
        .list()
        .iter()
        .filter(|invoice| invoice.status == InvoiceStatus::Paid)
        .map(|invoice| invoice.total)
        .sum();

    let hours_this_week = tracked_hours(entries.list().iter(), week_start(now));
    let hours_this_month = tracked_hours(entries.list().iter(), month_start(now));

    let active_projects = projects
        .list()
        .iter()
        .filter(|project| project.status == ProjectStatus::Active)
        .count();

    let overdue_invoices = invoices
        .list()
        .iter()
        .filter(|invoice| is_overdue(invoice, now))
        .count();

    DashboardStats {
        total_outstanding,
        total_paid,
        hours_this_week,
        hours_this_month,
        active_projects,
        overdue_invoices,
    }
}

/// Computes project count, total hours, and total earnings for one client.
#[must_use]
pub fn client_stats(
    client_id: &ClientId,
    projects: &ProjectRepo,
    entries: &TimeEntryRepo,
) -> ClientStats {
    let project_count = projects.projects_for_client(client_id).len();

    let client_entries = entries.entries_for_client(client_id);
    let minutes: i64 = client_entries.iter().map(|entry| entry.duration).sum();
    #[allow(clippy::cast_precision_loss)]
    let total_hours = minutes as f64 / 60.0;
    let total_earnings = client_entries.iter().map(|entry| entry.earnings()).sum();

    ClientStats {
        project_count,
        total_hours,
        total_earnings,
    }
}
