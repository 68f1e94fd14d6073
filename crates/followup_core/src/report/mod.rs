//! Deadline and assignee task reports.
//!
//! # Responsibility
//! - Aggregate open resolved tasks across documents.
//! - Render localized report lines.
//!
//! # Invariants
//! - Completed and untitled tasks are ignored.
//! - Due strings that are not ISO dates count toward the total only.
//! - Assignee ordering is count descending, ties in first-seen order.

use crate::i18n::{Locale, Translator};
use crate::model::document::Document;
use crate::tasks::resolver::TaskResolver;
use chrono::{Duration, NaiveDate};
use log::debug;

const NEAREST_LIMIT: usize = 3;
const WEEK_DAYS: i64 = 7;

/// One open task with its source meeting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportTask {
    pub title: String,
    pub assignee: String,
    pub due: String,
    pub meeting_title: String,
    pub meeting_date: String,
}

/// Aggregated counts over open tasks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskReport {
    pub total: usize,
    pub overdue: usize,
    pub next_7_days: usize,
    pub no_due: usize,
    /// Up to three dated tasks, nearest due first.
    pub nearest: Vec<ReportTask>,
    /// `(assignee, count)`; empty assignee means unassigned.
    pub by_assignee: Vec<(String, usize)>,
}

impl TaskReport {
    pub fn build(docs: &[Document], resolver: &TaskResolver, today: NaiveDate) -> Self {
        let tasks: Vec<ReportTask> = docs
            .iter()
            .flat_map(|doc| {
                resolver
                    .resolve_document_tasks(doc)
                    .into_iter()
                    .filter(|task| !task.title.is_empty() && !task.completed)
                    .map(move |task| ReportTask {
                        title: task.title,
                        assignee: task.assignee,
                        due: task.due,
                        meeting_title: doc.meeting_title.clone(),
                        meeting_date: doc.meeting_date.clone(),
                    })
            })
            .collect();

        let week_end = today + Duration::days(WEEK_DAYS);
        let mut report = TaskReport {
            total: tasks.len(),
            ..TaskReport::default()
        };

        for task in &tasks {
            if task.due.is_empty() {
                report.no_due += 1;
                continue;
            }
            let Ok(due) = NaiveDate::parse_from_str(&task.due, "%Y-%m-%d") else {
                continue;
            };
            if due < today {
                report.overdue += 1;
            } else if due <= week_end {
                report.next_7_days += 1;
            }
        }

        for task in &tasks {
            match report
                .by_assignee
                .iter_mut()
                .find(|(assignee, _)| *assignee == task.assignee)
            {
                Some((_, count)) => *count += 1,
                None => report.by_assignee.push((task.assignee.clone(), 1)),
            }
        }
        report.by_assignee.sort_by(|a, b| b.1.cmp(&a.1));

        let mut dated: Vec<ReportTask> = tasks
            .into_iter()
            .filter(|task| !task.due.is_empty())
            .collect();
        dated.sort_by(|a, b| a.due.cmp(&b.due));
        dated.truncate(NEAREST_LIMIT);
        report.nearest = dated;

        debug!(
            "event=task_report module=report status=ok docs={} total={} overdue={} next_7_days={} no_due={}",
            docs.len(),
            report.total,
            report.overdue,
            report.next_7_days,
            report.no_due
        );
        report
    }

    /// Count lines followed by the nearest dated tasks.
    pub fn deadline_lines(&self, translator: &dyn Translator, locale: Locale) -> Vec<String> {
        let count_line = |key: &str, count: usize| {
            let count = count.to_string();
            translator.t(key, &[("count", count.as_str())])
        };
        let mut lines = vec![
            count_line("reports.totalTasks", self.total),
            count_line("reports.overdue", self.overdue),
            count_line("reports.next7Days", self.next_7_days),
            count_line("reports.noDue", self.no_due),
        ];
        for task in &self.nearest {
            let date = NaiveDate::parse_from_str(&task.due, "%Y-%m-%d")
                .map(|date| locale.format_short_date(date))
                .unwrap_or_else(|_| task.due.clone());
            lines.push(format!(
                "{date} - {} ({})",
                task.title,
                assignee_label(&task.assignee, translator)
            ));
        }
        lines
    }

    /// `"{assignee}: {count}"` lines, or a single no-data line.
    pub fn assignee_lines(&self, translator: &dyn Translator) -> Vec<String> {
        if self.by_assignee.is_empty() {
            return vec![translator.t("common.noData", &[])];
        }
        self.by_assignee
            .iter()
            .map(|(assignee, count)| format!("{}: {count}", assignee_label(assignee, translator)))
            .collect()
    }
}

fn assignee_label(assignee: &str, translator: &dyn Translator) -> String {
    if assignee.is_empty() {
        translator.t("common.unassigned", &[])
    } else {
        assignee.to_string()
    }
}
