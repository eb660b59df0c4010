use serde::Serialize;

use crate::records::Record;

/// Everything the dashboard page needs: the per-record arrays that the
/// client-side charts consume, plus the two derived figures.
#[derive(Debug, Default, PartialEq, Serialize)]
pub struct DashboardStats {
    pub names: Vec<String>,
    pub hours: Vec<f64>,
    pub projects: Vec<String>,
    pub avg_hours: f64,
    pub total_hours: f64,
}

pub fn dashboard_stats(records: &[Record]) -> DashboardStats {
    if records.is_empty() {
        return DashboardStats::default();
    }

    let hours: Vec<f64> = records.iter().map(|r| r.hours).collect();
    let total: f64 = hours.iter().sum();
    let avg = total / hours.len() as f64;

    DashboardStats {
        names: records.iter().map(|r| r.name.clone()).collect(),
        projects: records.iter().map(|r| r.project.clone()).collect(),
        hours,
        avg_hours: round2(avg),
        total_hours: round2(total),
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, project: &str, hours: f64) -> Record {
        Record {
            id: "x".into(),
            name: name.into(),
            project: project.into(),
            hours,
            date: "2026-08-03".into(),
        }
    }

    #[test]
    fn an_empty_store_produces_an_all_zero_payload() {
        assert_eq!(dashboard_stats(&[]), DashboardStats::default());
    }

    #[test]
    fn totals_and_averages_are_rounded_to_two_decimals() {
        let records = vec![
            record("Ada", "website", 7.25),
            record("Grace", "compiler", 4.5),
        ];

        let stats = dashboard_stats(&records);

        assert_eq!(stats.total_hours, 11.75);
        // 11.75 / 2 = 5.875, which rounds up
        assert_eq!(stats.avg_hours, 5.88);
    }

    #[test]
    fn the_raw_arrays_keep_record_order() {
        let records = vec![
            record("Ada", "website", 8.0),
            record("Grace", "compiler", 6.0),
        ];

        let stats = dashboard_stats(&records);

        assert_eq!(stats.names, vec!["Ada", "Grace"]);
        assert_eq!(stats.projects, vec!["website", "compiler"]);
        assert_eq!(stats.hours, vec![8.0, 6.0]);
    }
}
