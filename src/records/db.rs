use std::fs::create_dir_all;
use std::path::Path;

use anyhow::Result;
use diesel::dsl::sum;
use diesel::{prelude::*, sql_query};
use diesel::{Connection, SqliteConnection};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};

pub struct Conn(SqliteConnection);

impl Drop for Conn {
    fn drop(&mut self) {
        // if this fails, we don't really care at this point
        // the goal is just to have the optimize pragma run when the program
        // ends, so that it can potentially update some of the tables based on
        // the queries used during this session.
        // See: https://sqlite.org/pragma.html#pragma_optimize
        let _ = sql_query("PRAGMA optimize;").execute(&mut self.0);
    }
}

pub fn establish_connection(database_url: impl AsRef<Path>) -> Result<Conn> {
    let database_url = database_url.as_ref();

    // The database and potentially its parent folders may not yet exist.  SQLite can handle
    // creating the file fine, but we need to make sure all of the parent folders also exist.
    if let Some(parent) = database_url.parent() {
        create_dir_all(parent)?;
    }

    // it seems kind of pointless to accept a path (which may not be utf-8) only to convert it lossily
    // into a string (which will be utf-8, but may not be exactly the path specified).  However, SQLite
    // only accepts utf-8 or utf-16 paths, and it's easier to type things elsewhere if we assume that the
    // database url is a real path
    // See: https://github.com/diesel-rs/diesel/discussions/3069
    let database_url = database_url.to_string_lossy();

    log::trace!("Connecting to SQLite DB at {database_url}");
    let mut conn = SqliteConnection::establish(&database_url)?;
    sql_query(
        "PRAGMA application_id = 0x68627230;
        PRAGMA foreign_keys = TRUE;
        PRAGMA ignore_check_constraints = FALSE;",
    )
    .execute(&mut conn)?;
    log::trace!("Connection to SQLite DB successful");
    run_migrations(&mut conn)?;
    Ok(Conn(conn))
}

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!();

fn run_migrations(db: &mut SqliteConnection) -> Result<()> {
    let migrated = match db.run_pending_migrations(MIGRATIONS) {
        Ok(migrations) => migrations.len(),
        Err(_) => anyhow::bail!("Could not update database to the latest version"),
    };

    if migrated > 0 {
        // a migration has occurred, so the data may be in a different format to when the last
        // analysis was done.  Run optimize now to update that analysis.
        // See: https://sqlite.org/pragma.html#pragma_optimize
        sql_query("PRAGMA optimize;").execute(db)?;
        log::trace!("Ran {migrated} migration(s) to update SQLite DB schema to latest version",);
    }

    Ok(())
}

#[derive(Queryable, Identifiable, Selectable, Debug, PartialEq, Clone)]
#[diesel(table_name = super::schema::records)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Record {
    pub id: i32,
    pub name: String,
    pub project: String,
    pub hours: f64,
    pub date: String,
}

#[derive(AsChangeset)]
#[diesel(table_name = super::schema::records)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct RecordUpdate<'a> {
    pub name: Option<&'a str>,
    pub project: Option<&'a str>,
    pub hours: Option<f64>,
    pub date: Option<&'a str>,
}

pub fn insert_record(
    conn: &mut Conn,
    name: &str,
    project: &str,
    hours: f64,
    date: &str,
) -> Result<Record> {
    use super::schema::records;
    let record = diesel::insert_into(records::table)
        .values((
            records::name.eq(name),
            records::project.eq(project),
            records::hours.eq(hours),
            records::date.eq(date),
        ))
        .returning(Record::as_returning())
        .get_result(&mut conn.0)?;
    Ok(record)
}

pub fn get_record(conn: &mut Conn, record_id: i32) -> Result<Option<Record>> {
    use super::schema::records;

    Ok(records::table
        .filter(records::id.eq(record_id))
        .select(Record::as_select())
        .first(&mut conn.0)
        .optional()?)
}

pub fn update_record(
    conn: &mut Conn,
    record_id: i32,
    changes: &RecordUpdate,
) -> Result<Option<Record>> {
    use super::schema::records;

    Ok(diesel::update(records::table.filter(records::id.eq(record_id)))
        .set(changes)
        .returning(Record::as_returning())
        .get_result(&mut conn.0)
        .optional()?)
}

pub fn delete_record(conn: &mut Conn, record_id: i32) -> Result<bool> {
    use super::schema::records;

    let count = diesel::delete(records::table.filter(records::id.eq(record_id)))
        .execute(&mut conn.0)?;
    Ok(count > 0)
}

pub fn query_records_all(
    conn: &mut Conn,
) -> Result<impl Iterator<Item = QueryResult<Record>> + '_> {
    use super::schema::records;

    Ok(records::table
        .select(Record::as_select())
        .order(records::id)
        .load_iter(&mut conn.0)?)
}

pub fn query_records_by_name(conn: &mut Conn, pattern: &str) -> Result<Vec<Record>> {
    use super::schema::records;

    // SQLite's LIKE is case-insensitive for ASCII, which covers the
    // names this store holds in practice.
    Ok(records::table
        .filter(records::name.like(format!("%{pattern}%")))
        .order(records::id)
        .select(Record::as_select())
        .load(&mut conn.0)?)
}

pub fn find_record_by_name_and_date(
    conn: &mut Conn,
    pattern: &str,
    date: &str,
) -> Result<Option<Record>> {
    use super::schema::records;

    Ok(records::table
        .filter(records::name.like(format!("%{pattern}%")))
        .filter(records::date.eq(date))
        .order(records::id)
        .select(Record::as_select())
        .first(&mut conn.0)
        .optional()?)
}

pub fn sum_hours_by_name(conn: &mut Conn) -> Result<Vec<(String, Option<f64>)>> {
    use super::schema::records;

    Ok(records::table
        .group_by(records::name)
        .select((records::name, sum(records::hours)))
        .order(records::name)
        .load(&mut conn.0)?)
}
