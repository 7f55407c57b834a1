//! Derived views over in-memory submission lists: filtering, recency
//! ordering, summary counts, and display-time timestamp formatting.

use super::record::{AdminSubmissionRecord, SubmissionRecord, SubmissionStatus};
use chrono::{Duration, NaiveDate, NaiveTime, Timelike};
use serde::Serialize;

/// Literal token rendered whenever a stored date or time fails to parse.
pub const INVALID_DATE: &str = "Invalid Date";

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Free-text and exact-date filter for an agent's own reports view. Empty
/// filters match everything.
#[derive(Debug, Clone, Default)]
pub struct ReportFilter {
    pub query: String,
    pub date: String,
}

impl ReportFilter {
    pub fn matches(&self, record: &SubmissionRecord) -> bool {
        let matches_search = contains_ignore_case(&record.project_name, &self.query)
            || contains_ignore_case(&record.builder_name, &self.query);
        let matches_date = self.date.is_empty() || record.date == self.date;
        matches_search && matches_date
    }
}

/// Admin console filter: free text over project, agent, and builder names,
/// plus optional exact agent and status restrictions.
#[derive(Debug, Clone, Default)]
pub struct AdminFilter {
    pub query: String,
    /// Empty (or "all") means every agent.
    pub agent: String,
    pub status: Option<SubmissionStatus>,
}

impl AdminFilter {
    pub fn matches(&self, record: &AdminSubmissionRecord) -> bool {
        let matches_search = contains_ignore_case(&record.project_name, &self.query)
            || contains_ignore_case(&record.agent_name, &self.query)
            || contains_ignore_case(&record.builder_name, &self.query);
        let matches_agent =
            self.agent.is_empty() || self.agent == "all" || record.agent_name == self.agent;
        let matches_status = self.status.map_or(true, |status| record.status == status);
        matches_search && matches_agent && matches_status
    }
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    needle.is_empty() || haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Newest first by numeric identifier. Identifiers are creation timestamps,
/// expected unique; the sort is stable so equal keys keep collection order.
pub fn sort_recent_first(records: &mut [SubmissionRecord]) {
    records.sort_by(|a, b| b.id.cmp(&a.id));
}

/// Summary counts for an agent's reports header.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionStats {
    pub total: usize,
    pub submitted: usize,
    pub drafts: usize,
    pub this_week: usize,
}

impl SubmissionStats {
    pub fn compute(records: &[SubmissionRecord], today: NaiveDate) -> Self {
        let week_ago = today - Duration::days(7);
        Self {
            total: records.len(),
            submitted: records
                .iter()
                .filter(|r| r.status == SubmissionStatus::Submitted)
                .count(),
            drafts: records
                .iter()
                .filter(|r| r.status == SubmissionStatus::Draft)
                .count(),
            this_week: records
                .iter()
                .filter(|r| {
                    // Unparseable dates are excluded, not treated as errors.
                    NaiveDate::parse_from_str(&r.date, DATE_FORMAT)
                        .map(|date| date >= week_ago)
                        .unwrap_or(false)
                })
                .count(),
        }
    }
}

/// Summary counts for the admin console header.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminStats {
    pub total: usize,
    pub pending: usize,
    pub approved: usize,
    pub rejected: usize,
}

impl AdminStats {
    pub fn compute(records: &[AdminSubmissionRecord]) -> Self {
        let count = |status: SubmissionStatus| records.iter().filter(|r| r.status == status).count();
        Self {
            total: records.len(),
            pending: count(SubmissionStatus::Pending),
            approved: count(SubmissionStatus::Approved),
            rejected: count(SubmissionStatus::Rejected),
        }
    }
}

/// Day-wise grouping for the admin reports view, newest date first. Dates
/// that fail to parse sort last, in their stored order.
pub fn group_by_date(
    records: &[AdminSubmissionRecord],
) -> Vec<(String, Vec<&AdminSubmissionRecord>)> {
    let mut groups: Vec<(String, Vec<&AdminSubmissionRecord>)> = Vec::new();
    for record in records {
        match groups.iter_mut().find(|(date, _)| *date == record.submitted_date) {
            Some((_, members)) => members.push(record),
            None => groups.push((record.submitted_date.clone(), vec![record])),
        }
    }

    groups.sort_by(|(a, _), (b, _)| {
        let parsed_a = NaiveDate::parse_from_str(a, DATE_FORMAT);
        let parsed_b = NaiveDate::parse_from_str(b, DATE_FORMAT);
        match (parsed_a, parsed_b) {
            (Ok(a), Ok(b)) => b.cmp(&a),
            (Ok(_), Err(_)) => std::cmp::Ordering::Less,
            (Err(_), Ok(_)) => std::cmp::Ordering::Greater,
            (Err(_), Err(_)) => std::cmp::Ordering::Equal,
        }
    });
    groups
}

/// Distinct agent names in first-seen order, for the agent filter dropdown.
pub fn agent_names(records: &[AdminSubmissionRecord]) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for record in records {
        if !names.iter().any(|name| name == &record.agent_name) {
            names.push(record.agent_name.clone());
        }
    }
    names
}

/// Combines a stored date and time into a display string, applying the
/// off-by-one-day correction: when the local offset is ahead of UTC and the
/// captured hour-of-day is less than that offset in hours, the displayed
/// date rolls forward one calendar day. The stored record is never touched.
pub fn render_timestamp(date: &str, time: &str, offset_minutes: i32) -> String {
    match display_date(date, time, offset_minutes) {
        Some(display) => format!("{display} at {time}"),
        None => INVALID_DATE.to_string(),
    }
}

/// The date half of [`render_timestamp`]; `None` when either part fails to
/// parse.
pub fn display_date(date: &str, time: &str, offset_minutes: i32) -> Option<String> {
    let parsed_date = NaiveDate::parse_from_str(date, DATE_FORMAT).ok()?;
    let parsed_time = parse_clock(time)?;

    let hour_minutes = parsed_time.hour() as i32 * 60;
    let adjusted = if offset_minutes > 0 && hour_minutes < offset_minutes {
        parsed_date + Duration::days(1)
    } else {
        parsed_date
    };

    Some(adjusted.format(DATE_FORMAT).to_string())
}

fn parse_clock(time: &str) -> Option<NaiveTime> {
    let trimmed = time.trim();
    NaiveTime::parse_from_str(trimmed, "%I:%M %p")
        .or_else(|_| NaiveTime::parse_from_str(trimmed, "%H:%M"))
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::onboarding::record::SubmissionKind;
    use serde_json::json;

    fn record(id: i64, project: &str, builder: &str, status: SubmissionStatus, date: &str) -> SubmissionRecord {
        SubmissionRecord {
            id,
            project_name: project.to_string(),
            builder_name: builder.to_string(),
            submission_type: SubmissionKind::FullOnboarding,
            status,
            date: date.to_string(),
            time: "10:30 AM".to_string(),
            details: json!({}),
        }
    }

    fn admin_record(id: i64, agent: &str, project: &str, status: SubmissionStatus, date: &str) -> AdminSubmissionRecord {
        AdminSubmissionRecord {
            id,
            agent_id: "1".to_string(),
            agent_name: agent.to_string(),
            project_name: project.to_string(),
            builder_name: "Prime Construction".to_string(),
            rera_number: String::new(),
            submitted_date: date.to_string(),
            status,
            form_data: Default::default(),
        }
    }

    #[test]
    fn filter_matches_substring_case_insensitively() {
        let record = record(1, "Skyline Towers", "Prime Construction", SubmissionStatus::Submitted, "2024-06-13");
        let filter = ReportFilter {
            query: "sky".to_string(),
            date: String::new(),
        };
        assert!(filter.matches(&record));

        let builder_filter = ReportFilter {
            query: "PRIME".to_string(),
            date: String::new(),
        };
        assert!(builder_filter.matches(&record));

        let miss = ReportFilter {
            query: "lakeside".to_string(),
            date: String::new(),
        };
        assert!(!miss.matches(&record));
    }

    #[test]
    fn date_filter_is_exact_match_only() {
        let record = record(1, "Skyline Towers", "Prime", SubmissionStatus::Submitted, "2024-06-13");
        let same_day = ReportFilter {
            query: String::new(),
            date: "2024-06-13".to_string(),
        };
        assert!(same_day.matches(&record));

        let other_day = ReportFilter {
            query: String::new(),
            date: "2024-06-12".to_string(),
        };
        assert!(!other_day.matches(&record));
    }

    #[test]
    fn empty_filter_matches_everything() {
        let record = record(1, "Skyline Towers", "Prime", SubmissionStatus::Draft, "nonsense");
        assert!(ReportFilter::default().matches(&record));
    }

    #[test]
    fn sort_is_descending_by_identifier() {
        let mut records = vec![
            record(3, "A", "A", SubmissionStatus::Submitted, "2024-06-15"),
            record(1, "B", "B", SubmissionStatus::Submitted, "2024-06-13"),
            record(2, "C", "C", SubmissionStatus::Submitted, "2024-06-14"),
        ];
        sort_recent_first(&mut records);
        let ids: Vec<i64> = records.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![3, 2, 1]);
    }

    #[test]
    fn stats_count_statuses_and_week_boundary() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 15).expect("valid date");
        let records = vec![
            record(1, "A", "A", SubmissionStatus::Submitted, "2024-06-08"), // exactly 7 days prior
            record(2, "B", "B", SubmissionStatus::Submitted, "2024-06-07"), // 8 days prior
            record(3, "C", "C", SubmissionStatus::Draft, "2024-06-15"),
            record(4, "D", "D", SubmissionStatus::Submitted, "not-a-date"),
        ];

        let stats = SubmissionStats::compute(&records, today);
        assert_eq!(stats.total, 4);
        assert_eq!(stats.submitted, 3);
        assert_eq!(stats.drafts, 1);
        assert_eq!(stats.this_week, 2); // the 7-day record and today's draft
    }

    #[test]
    fn admin_stats_count_review_states() {
        let records = vec![
            admin_record(1, "John Smith", "Skyline Towers", SubmissionStatus::Pending, "2024-06-15"),
            admin_record(2, "Sarah Johnson", "Green Valley", SubmissionStatus::Approved, "2024-06-14"),
            admin_record(3, "Mike Wilson", "Lakeside", SubmissionStatus::Rejected, "2024-06-12"),
            admin_record(4, "John Smith", "Urban Heights", SubmissionStatus::Approved, "2024-06-13"),
        ];
        let stats = AdminStats::compute(&records);
        assert_eq!(stats.total, 4);
        assert_eq!(stats.pending, 1);
        assert_eq!(stats.approved, 2);
        assert_eq!(stats.rejected, 1);
    }

    #[test]
    fn admin_filter_restricts_by_agent_and_status() {
        let records = vec![
            admin_record(1, "John Smith", "Skyline Towers", SubmissionStatus::Pending, "2024-06-15"),
            admin_record(2, "Sarah Johnson", "Green Valley", SubmissionStatus::Approved, "2024-06-14"),
        ];

        let by_agent = AdminFilter {
            agent: "John Smith".to_string(),
            ..AdminFilter::default()
        };
        let hits: Vec<_> = records.iter().filter(|r| by_agent.matches(r)).collect();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, 1);

        let by_status = AdminFilter {
            status: Some(SubmissionStatus::Approved),
            ..AdminFilter::default()
        };
        let hits: Vec<_> = records.iter().filter(|r| by_status.matches(r)).collect();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, 2);

        let all = AdminFilter {
            agent: "all".to_string(),
            ..AdminFilter::default()
        };
        assert_eq!(records.iter().filter(|r| all.matches(r)).count(), 2);
    }

    #[test]
    fn day_wise_grouping_orders_newest_first() {
        let records = vec![
            admin_record(1, "John Smith", "Urban Heights", SubmissionStatus::Approved, "2024-06-13"),
            admin_record(2, "Sarah Johnson", "Green Valley", SubmissionStatus::Pending, "2024-06-15"),
            admin_record(3, "Mike Wilson", "Lakeside", SubmissionStatus::Rejected, "2024-06-15"),
        ];

        let groups = group_by_date(&records);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].0, "2024-06-15");
        assert_eq!(groups[0].1.len(), 2);
        assert_eq!(groups[1].0, "2024-06-13");
    }

    #[test]
    fn agent_names_are_distinct_in_first_seen_order() {
        let records = vec![
            admin_record(1, "John Smith", "A", SubmissionStatus::Pending, "2024-06-15"),
            admin_record(2, "Sarah Johnson", "B", SubmissionStatus::Pending, "2024-06-15"),
            admin_record(3, "John Smith", "C", SubmissionStatus::Pending, "2024-06-15"),
        ];
        assert_eq!(agent_names(&records), vec!["John Smith", "Sarah Johnson"]);
    }

    #[test]
    fn positive_offset_rolls_small_hours_forward_one_day() {
        // +5.5 hours, captured at 01:00 AM: hour 1 < offset 5.5 -> next day.
        assert_eq!(
            display_date("2024-06-15", "01:00 AM", 330),
            Some("2024-06-16".to_string())
        );
        // Hour past the offset stays put.
        assert_eq!(
            display_date("2024-06-15", "10:30 AM", 330),
            Some("2024-06-15".to_string())
        );
        // Negative offsets never roll.
        assert_eq!(
            display_date("2024-06-15", "01:00 AM", -300),
            Some("2024-06-15".to_string())
        );
    }

    #[test]
    fn unparseable_inputs_render_the_invalid_token() {
        assert_eq!(render_timestamp("garbage", "10:30 AM", 330), INVALID_DATE);
        assert_eq!(render_timestamp("2024-06-15", "half past", 330), INVALID_DATE);
        assert_eq!(
            render_timestamp("2024-06-15", "01:00 AM", 330),
            "2024-06-16 at 01:00 AM"
        );
    }
}
