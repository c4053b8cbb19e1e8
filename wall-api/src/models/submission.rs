use chrono::NaiveDateTime;
use diesel::{Identifiable, Insertable, Queryable};
use serde::Serialize;
use ts_rs::TS;

use crate::schema::submissions;

/// A persisted public submission.
///
/// `ip_hash` and `user_agent` are stored for moderation purposes but never
/// serialized into API responses.
#[derive(Queryable, Identifiable, Debug, Serialize, TS)]
#[diesel(table_name = submissions)]
#[ts(export)]
pub struct Submission {
    pub id: i32,
    pub content: String,
    pub category: String,
    pub sentiment: String,
    pub viewed: bool,
    #[ts(type = "string")]
    pub created_at: NaiveDateTime,
    #[ts(type = "string")]
    pub updated_at: NaiveDateTime,
    #[serde(skip_serializing)]
    #[ts(skip)]
    pub ip_hash: String,
    #[serde(skip_serializing)]
    #[ts(skip)]
    pub user_agent: String,
}

#[derive(Insertable)]
#[diesel(table_name = submissions)]
pub struct NewSubmission {
    pub content: String,
    pub category: String,
    pub sentiment: String,
    pub viewed: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    pub ip_hash: String,
    pub user_agent: String,
}
