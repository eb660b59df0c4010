use anyhow::Result;
use sqids::Sqids;

mod db;
mod schema;

pub use db::{establish_connection, Conn};

/// One timesheet entry as seen by the front-ends.
///
/// The id is the sqids-encoded form of the store's integer rowid, so
/// the value that ends up in URLs and terminal output is a short
/// opaque token rather than a raw autoincrement counter.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub id: String,
    pub name: String,
    pub project: String,
    pub hours: f64,
    pub date: String,
}

/// Replacement values for an update.  A field left as `None` keeps
/// whatever the store currently holds.
#[derive(Debug, Default, Clone, Copy)]
pub struct RecordPatch<'a> {
    pub name: Option<&'a str>,
    pub project: Option<&'a str>,
    pub hours: Option<f64>,
    pub date: Option<&'a str>,
}

impl RecordPatch<'_> {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.project.is_none()
            && self.hours.is_none()
            && self.date.is_none()
    }
}

pub struct Records<'a> {
    db: &'a mut Conn,
    ids: Sqids,
}

impl<'a> Records<'a> {
    pub fn new(db: &'a mut Conn) -> Self {
        Self {
            db,
            ids: Sqids::default(),
        }
    }

    pub fn add_record(
        &mut self,
        name: &str,
        project: &str,
        hours: f64,
        date: &str,
    ) -> Result<Record> {
        let row = db::insert_record(self.db, name, project, hours, date)?;
        public_record(&self.ids, row)
    }

    pub fn list_records(&mut self) -> Result<Vec<Record>> {
        let ids = &self.ids;
        db::query_records_all(self.db)?
            .map(|row| {
                row.map_err(anyhow::Error::from)
                    .and_then(|row| public_record(ids, row))
            })
            .collect()
    }

    pub fn get_record(&mut self, id: &str) -> Result<Option<Record>> {
        let Some(record_id) = self.decode_id(id) else {
            return Ok(None);
        };
        self.fetch(record_id)
    }

    /// Overwrites the fields set in `patch`, keyed by public id.
    /// Returns `None` without touching the store when the id does not
    /// decode or no row carries it, so callers that want a silent
    /// no-op can simply ignore the result.
    pub fn update_record(&mut self, id: &str, patch: RecordPatch) -> Result<Option<Record>> {
        let Some(record_id) = self.decode_id(id) else {
            return Ok(None);
        };
        if patch.is_empty() {
            // diesel refuses to build an UPDATE with no changed columns,
            // and there is nothing to write anyway
            return self.fetch(record_id);
        }
        let changes = db::RecordUpdate {
            name: patch.name,
            project: patch.project,
            hours: patch.hours,
            date: patch.date,
        };
        match db::update_record(self.db, record_id, &changes)? {
            Some(row) => Ok(Some(public_record(&self.ids, row)?)),
            None => Ok(None),
        }
    }

    /// Returns whether a record was actually removed.  Unknown and
    /// undecodable ids report `false` rather than failing.
    pub fn delete_record(&mut self, id: &str) -> Result<bool> {
        let Some(record_id) = self.decode_id(id) else {
            return Ok(false);
        };
        db::delete_record(self.db, record_id)
    }

    /// Case-insensitive substring match on the employee name.
    pub fn search_records(&mut self, query: &str) -> Result<Vec<Record>> {
        db::query_records_by_name(self.db, query)?
            .into_iter()
            .map(|row| public_record(&self.ids, row))
            .collect()
    }

    /// First record (lowest id) whose name contains `query` and whose
    /// date matches exactly.  This is how the terminal tool addresses
    /// records, so duplicates past the first are deliberately ignored.
    pub fn find_record(&mut self, query: &str, date: &str) -> Result<Option<Record>> {
        match db::find_record_by_name_and_date(self.db, query, date)? {
            Some(row) => Ok(Some(public_record(&self.ids, row)?)),
            None => Ok(None),
        }
    }

    /// Total hours per distinct employee name, ordered by name.
    pub fn hours_by_employee(&mut self) -> Result<Vec<(String, f64)>> {
        Ok(db::sum_hours_by_name(self.db)?
            .into_iter()
            .map(|(name, total)| (name, total.unwrap_or(0.0)))
            .collect())
    }

    fn fetch(&mut self, record_id: i32) -> Result<Option<Record>> {
        match db::get_record(self.db, record_id)? {
            Some(row) => Ok(Some(public_record(&self.ids, row)?)),
            None => Ok(None),
        }
    }

    fn decode_id(&self, id: &str) -> Option<i32> {
        match self.ids.decode(id).as_slice() {
            [n] => i32::try_from(*n).ok(),
            _ => None,
        }
    }
}

fn public_record(ids: &Sqids, row: db::Record) -> Result<Record> {
    Ok(Record {
        id: ids.encode(&[u64::try_from(row.id)?])?,
        name: row.name,
        project: row.project,
        hours: row.hours,
        date: row.date,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn connect() -> Conn {
        establish_connection(":memory:").unwrap()
    }

    #[test]
    fn added_records_show_up_in_the_listing() {
        let mut conn = connect();
        let mut recs = Records::new(&mut conn);

        let added = recs
            .add_record("Ada", "website", 7.5, "2026-08-03")
            .unwrap();
        let listed = recs.list_records().unwrap();

        assert_eq!(listed, vec![added.clone()]);
        assert_eq!(listed[0].name, "Ada");
        assert_eq!(listed[0].project, "website");
        assert_eq!(listed[0].hours, 7.5);
        assert_eq!(listed[0].date, "2026-08-03");
    }

    #[test]
    fn ids_round_trip_between_listing_and_lookup() {
        let mut conn = connect();
        let mut recs = Records::new(&mut conn);

        let added = recs.add_record("Ada", "website", 8.0, "2026-08-03").unwrap();
        let fetched = recs.get_record(&added.id).unwrap();

        assert_eq!(fetched, Some(added));
    }

    #[test]
    fn lookups_with_garbage_ids_return_none() {
        let mut conn = connect();
        let mut recs = Records::new(&mut conn);
        recs.add_record("Ada", "website", 8.0, "2026-08-03").unwrap();

        assert_eq!(recs.get_record("not an id!").unwrap(), None);
        assert_eq!(recs.get_record("").unwrap(), None);
    }

    #[test]
    fn update_keeps_the_id_and_the_fields_left_unset() {
        let mut conn = connect();
        let mut recs = Records::new(&mut conn);
        let added = recs.add_record("Ada", "website", 8.0, "2026-08-03").unwrap();

        let updated = recs
            .update_record(
                &added.id,
                RecordPatch {
                    hours: Some(6.0),
                    ..RecordPatch::default()
                },
            )
            .unwrap()
            .unwrap();

        assert_eq!(updated.id, added.id);
        assert_eq!(updated.hours, 6.0);
        assert_eq!(updated.name, "Ada");
        assert_eq!(updated.project, "website");
        assert_eq!(updated.date, "2026-08-03");
        assert_eq!(recs.get_record(&added.id).unwrap(), Some(updated));
    }

    #[test]
    fn update_with_an_empty_patch_changes_nothing() {
        let mut conn = connect();
        let mut recs = Records::new(&mut conn);
        let added = recs.add_record("Ada", "website", 8.0, "2026-08-03").unwrap();

        let updated = recs
            .update_record(&added.id, RecordPatch::default())
            .unwrap();

        assert_eq!(updated, Some(added.clone()));
        assert_eq!(recs.get_record(&added.id).unwrap(), Some(added));
    }

    #[test]
    fn updating_a_missing_record_is_a_silent_no_op() {
        let mut conn = connect();
        let mut recs = Records::new(&mut conn);
        let added = recs.add_record("Ada", "website", 8.0, "2026-08-03").unwrap();
        recs.delete_record(&added.id).unwrap();

        let updated = recs
            .update_record(
                &added.id,
                RecordPatch {
                    hours: Some(1.0),
                    ..RecordPatch::default()
                },
            )
            .unwrap();

        assert_eq!(updated, None);
        assert!(recs.list_records().unwrap().is_empty());
    }

    #[test]
    fn delete_removes_the_record_and_reports_it() {
        let mut conn = connect();
        let mut recs = Records::new(&mut conn);
        let first = recs.add_record("Ada", "website", 8.0, "2026-08-03").unwrap();
        let second = recs.add_record("Grace", "compiler", 6.0, "2026-08-03").unwrap();

        assert!(recs.delete_record(&first.id).unwrap());
        assert_eq!(recs.list_records().unwrap(), vec![second]);
    }

    #[test]
    fn deleting_a_nonexistent_id_leaves_the_collection_unchanged() {
        let mut conn = connect();
        let mut recs = Records::new(&mut conn);
        let added = recs.add_record("Ada", "website", 8.0, "2026-08-03").unwrap();
        recs.delete_record(&added.id).unwrap();

        assert!(!recs.delete_record(&added.id).unwrap());
        assert!(!recs.delete_record("garbage").unwrap());
        assert!(recs.list_records().unwrap().is_empty());
    }

    #[test]
    fn search_matches_case_insensitive_substrings() {
        let mut conn = connect();
        let mut recs = Records::new(&mut conn);
        recs.add_record("Ada Lovelace", "website", 8.0, "2026-08-03").unwrap();
        recs.add_record("Grace Hopper", "compiler", 6.0, "2026-08-03").unwrap();
        recs.add_record("ada lovelace", "website", 2.0, "2026-08-04").unwrap();

        let matches = recs.search_records("ADA").unwrap();

        assert_eq!(matches.len(), 2);
        assert!(matches.iter().all(|r| r.name.to_lowercase().contains("ada")));
    }

    #[test]
    fn find_record_takes_the_first_match_only() {
        let mut conn = connect();
        let mut recs = Records::new(&mut conn);
        let first = recs.add_record("Ada", "website", 8.0, "2026-08-03").unwrap();
        recs.add_record("Ada", "compiler", 4.0, "2026-08-03").unwrap();
        recs.add_record("Ada", "website", 2.0, "2026-08-04").unwrap();

        let found = recs.find_record("ada", "2026-08-03").unwrap();

        assert_eq!(found, Some(first));
        assert_eq!(recs.find_record("ada", "2026-01-01").unwrap(), None);
    }

    #[test]
    fn hours_are_summed_per_employee() {
        let mut conn = connect();
        let mut recs = Records::new(&mut conn);
        recs.add_record("Grace", "compiler", 6.0, "2026-08-03").unwrap();
        recs.add_record("Ada", "website", 8.0, "2026-08-03").unwrap();
        recs.add_record("Ada", "website", 1.5, "2026-08-04").unwrap();

        let totals = recs.hours_by_employee().unwrap();

        assert_eq!(
            totals,
            vec![("Ada".to_string(), 9.5), ("Grace".to_string(), 6.0)]
        );
    }

    #[test]
    fn duplicate_records_are_permitted() {
        let mut conn = connect();
        let mut recs = Records::new(&mut conn);
        let first = recs.add_record("Ada", "website", 8.0, "2026-08-03").unwrap();
        let second = recs.add_record("Ada", "website", 8.0, "2026-08-03").unwrap();

        assert_ne!(first.id, second.id);
        assert_eq!(recs.list_records().unwrap().len(), 2);
    }
}
