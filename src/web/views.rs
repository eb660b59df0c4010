// Hand-rendered HTML views.  The pages are small enough that a
// templating layer would be more code than the markup itself.

use chrono::Local;
use itertools::Itertools;

use crate::records::Record;
use crate::stats::DashboardStats;

const STYLE: &str = "\
body { font-family: sans-serif; margin: 2rem auto; max-width: 60rem; padding: 0 1rem; }
nav a { margin-right: 1rem; }
table { border-collapse: collapse; width: 100%; }
th, td { border: 1px solid #ccc; padding: 0.3rem 0.6rem; text-align: left; }
label { display: block; margin-bottom: 0.6rem; }
canvas { max-width: 100%; margin-top: 1.5rem; }
.stat strong { font-size: 1.3em; }";

fn page(title: &str, body: &str) -> String {
    format!(
        "<!doctype html>\n\
         <html lang=\"en\">\n\
         <head>\n\
         <meta charset=\"utf-8\">\n\
         <title>{title} - hourbook</title>\n\
         <style>{style}</style>\n\
         </head>\n\
         <body>\n\
         <nav><a href=\"/\">Records</a><a href=\"/add\">Add record</a><a href=\"/dashboard\">Dashboard</a></nav>\n\
         <h1>{title}</h1>\n\
         {body}\n\
         </body>\n\
         </html>\n",
        style = STYLE,
    )
}

pub(crate) fn index_page(records: &[Record]) -> String {
    if records.is_empty() {
        return page(
            "Timesheet records",
            "<p>No records yet.  <a href=\"/add\">Add the first one.</a></p>",
        );
    }

    let rows = records
        .iter()
        .map(|record| {
            format!(
                "<tr><td>{}</td><td>{}</td><td>{:.2}</td><td>{}</td>\
                 <td><a href=\"/edit/{id}\">Edit</a> <a href=\"/delete/{id}\">Delete</a></td></tr>",
                escape(&record.name),
                escape(&record.project),
                record.hours,
                escape(&record.date),
                id = escape(&record.id),
            )
        })
        .join("\n");
    let body = format!(
        "<table>\n\
         <tr><th>Name</th><th>Project</th><th>Hours</th><th>Date</th><th></th></tr>\n\
         {rows}\n\
         </table>"
    );
    page("Timesheet records", &body)
}

pub(crate) fn record_form_page(record: Option<&Record>) -> String {
    let (title, name, project, hours, date) = match record {
        Some(record) => (
            "Edit record",
            escape(&record.name),
            escape(&record.project),
            record.hours.to_string(),
            escape(&record.date),
        ),
        None => (
            "Add record",
            String::new(),
            String::new(),
            String::new(),
            Local::now().format("%Y-%m-%d").to_string(),
        ),
    };

    // the same form serves /add and /edit/{id}: an empty action posts
    // back to whichever of the two rendered it
    let body = format!(
        "<form method=\"post\" action=\"\">\n\
         <label>Employee name <input name=\"name\" value=\"{name}\" required></label>\n\
         <label>Project <input name=\"project\" value=\"{project}\" required></label>\n\
         <label>Hours <input name=\"hours\" value=\"{hours}\" type=\"number\" step=\"any\" required></label>\n\
         <label>Date <input name=\"date\" value=\"{date}\" type=\"date\"></label>\n\
         <button type=\"submit\">Save</button>\n\
         </form>"
    );
    page(title, &body)
}

const DASHBOARD_SCRIPT: &str = "\
const byKey = (keys, values) => {
  const totals = {};
  keys.forEach((key, i) => { totals[key] = (totals[key] || 0) + values[i]; });
  return totals;
};
const employees = byKey(data.names || [], data.hours || []);
new Chart(document.getElementById('hours-chart'), {
  type: 'bar',
  data: {
    labels: Object.keys(employees),
    datasets: [{ label: 'Hours by employee', data: Object.values(employees) }],
  },
});
const projects = byKey(data.projects || [], data.hours || []);
new Chart(document.getElementById('projects-chart'), {
  type: 'doughnut',
  data: {
    labels: Object.keys(projects),
    datasets: [{ label: 'Hours by project', data: Object.values(projects) }],
  },
});";

pub(crate) fn dashboard_page(stats: &DashboardStats) -> String {
    // a payload that fails to serialize degrades to an empty one, the
    // same way a store failure upstream does.  The \u escape keeps a
    // literal </script> in a stored name from closing the tag early.
    let data = serde_json::to_string(stats)
        .unwrap_or_else(|_| "{}".to_string())
        .replace('<', "\\u003c");
    let body = format!(
        "<p class=\"stat\">Total hours: <strong>{total:.2}</strong> &middot; \
         Average hours: <strong>{avg:.2}</strong></p>\n\
         <canvas id=\"hours-chart\"></canvas>\n\
         <canvas id=\"projects-chart\"></canvas>\n\
         <script src=\"https://cdn.jsdelivr.net/npm/chart.js\"></script>\n\
         <script>\n\
         const data = {data};\n\
         {script}\n\
         </script>",
        total = stats.total_hours,
        avg = stats.avg_hours,
        script = DASHBOARD_SCRIPT,
    );
    page("Dashboard", &body)
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, project: &str) -> Record {
        Record {
            id: "Uk".into(),
            name: name.into(),
            project: project.into(),
            hours: 7.5,
            date: "2026-08-03".into(),
        }
    }

    #[test]
    fn the_listing_escapes_stored_fields() {
        let records = vec![record("<b>Ada</b>", "R&D")];

        let html = index_page(&records);

        assert!(html.contains("&lt;b&gt;Ada&lt;/b&gt;"));
        assert!(html.contains("R&amp;D"));
        assert!(!html.contains("<b>Ada</b>"));
    }

    #[test]
    fn the_listing_links_every_record_to_edit_and_delete() {
        let html = index_page(&[record("Ada", "website")]);

        assert!(html.contains("href=\"/edit/Uk\""));
        assert!(html.contains("href=\"/delete/Uk\""));
    }

    #[test]
    fn the_edit_form_is_pre_filled_with_the_record() {
        let html = record_form_page(Some(&record("Ada", "website")));

        assert!(html.contains("value=\"Ada\""));
        assert!(html.contains("value=\"website\""));
        assert!(html.contains("value=\"7.5\""));
        assert!(html.contains("value=\"2026-08-03\""));
    }

    #[test]
    fn the_add_form_defaults_the_date_to_today() {
        let today = Local::now().format("%Y-%m-%d").to_string();

        let html = record_form_page(None);

        assert!(html.contains(&format!("name=\"date\" value=\"{today}\"")));
        assert!(html.contains("value=\"\""));
    }

    #[test]
    fn the_dashboard_embeds_the_payload_as_json() {
        let stats = DashboardStats {
            names: vec!["Ada".into()],
            hours: vec![7.5],
            projects: vec!["website".into()],
            avg_hours: 7.5,
            total_hours: 7.5,
        };

        let html = dashboard_page(&stats);

        assert!(html.contains("const data = {\"names\":[\"Ada\"]"));
        assert!(html.contains("Total hours: <strong>7.50</strong>"));
    }

    #[test]
    fn the_dashboard_payload_cannot_close_its_own_script_tag() {
        let stats = DashboardStats {
            names: vec!["</script>".into()],
            hours: vec![1.0],
            projects: vec!["x".into()],
            avg_hours: 1.0,
            total_hours: 1.0,
        };

        let html = dashboard_page(&stats);

        assert!(!html.contains("\"names\":[\"</script>\"]"));
        assert!(html.contains("\"names\":[\"\\u003c/script>\"]"));
    }
}
