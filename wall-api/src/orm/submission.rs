//! Database operations for submissions: the repository boundary of the
//! intake pipeline and the admin dashboard.

use chrono::Utc;
use diesel::QueryableByName;
use diesel::prelude::*;
use diesel::sql_types::BigInt;

use crate::models::{NewSubmission, Submission};

#[derive(QueryableByName)]
struct LastInsertRowId {
    #[diesel(sql_type = BigInt)]
    last_insert_rowid: i64,
}

/// Inserts a new submission and returns the stored row.
pub fn insert_submission(
    conn: &mut SqliteConnection,
    new_submission: NewSubmission,
) -> Result<Submission, diesel::result::Error> {
    use crate::schema::submissions::dsl::*;

    diesel::insert_into(submissions)
        .values(&new_submission)
        .execute(conn)?;

    let last_id = diesel::sql_query("SELECT last_insert_rowid() as last_insert_rowid")
        .get_result::<LastInsertRowId>(conn)?
        .last_insert_rowid;

    submissions
        .filter(id.eq(last_id as i32))
        .first::<Submission>(conn)
}

/// Returns one page of submissions, newest first, optionally filtered by
/// viewed state, together with the total matching count.
pub fn list_submissions(
    conn: &mut SqliteConnection,
    page: i64,
    limit: i64,
    viewed_filter: Option<bool>,
) -> Result<(Vec<Submission>, i64), diesel::result::Error> {
    use crate::schema::submissions::dsl::*;

    let page = page.max(1);
    let limit = limit.clamp(1, 100);

    let total: i64 = match viewed_filter {
        Some(v) => submissions.filter(viewed.eq(v)).count().get_result(conn)?,
        None => submissions.count().get_result(conn)?,
    };

    let rows = match viewed_filter {
        Some(v) => submissions
            .filter(viewed.eq(v))
            .order(created_at.desc())
            .offset((page - 1) * limit)
            .limit(limit)
            .load::<Submission>(conn)?,
        None => submissions
            .order(created_at.desc())
            .offset((page - 1) * limit)
            .limit(limit)
            .load::<Submission>(conn)?,
    };

    Ok((rows, total))
}

/// Gets a single submission by ID.
pub fn get_submission(
    conn: &mut SqliteConnection,
    submission_id: i32,
) -> Result<Option<Submission>, diesel::result::Error> {
    use crate::schema::submissions::dsl::*;
    submissions
        .filter(id.eq(submission_id))
        .first::<Submission>(conn)
        .optional()
}

/// Marks one submission as viewed, returning the updated row, or `None`
/// if the id does not exist.
pub fn mark_viewed(
    conn: &mut SqliteConnection,
    submission_id: i32,
) -> Result<Option<Submission>, diesel::result::Error> {
    use crate::schema::submissions::dsl::*;

    let affected = diesel::update(submissions.filter(id.eq(submission_id)))
        .set((viewed.eq(true), updated_at.eq(Utc::now().naive_utc())))
        .execute(conn)?;

    if affected == 0 {
        return Ok(None);
    }
    get_submission(conn, submission_id)
}

/// Marks every listed submission as viewed, returning the number of rows
/// actually modified. Unknown ids are simply not counted.
pub fn mark_bulk_viewed(
    conn: &mut SqliteConnection,
    submission_ids: &[i32],
) -> Result<usize, diesel::result::Error> {
    use crate::schema::submissions::dsl::*;

    if submission_ids.is_empty() {
        return Ok(0);
    }

    diesel::update(submissions.filter(id.eq_any(submission_ids)))
        .set((viewed.eq(true), updated_at.eq(Utc::now().naive_utc())))
        .execute(conn)
}

/// Deletes a submission, returning the number of rows removed.
pub fn delete_submission(
    conn: &mut SqliteConnection,
    submission_id: i32,
) -> Result<usize, diesel::result::Error> {
    use crate::schema::submissions::dsl::*;
    diesel::delete(submissions.filter(id.eq(submission_id))).execute(conn)
}
