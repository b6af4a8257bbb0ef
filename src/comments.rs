use crate::{
    posts::Post,
    schema::{comments, users},
    users::User,
    Connection, Error, Result,
};
use chrono::{NaiveDateTime, Utc};
use diesel::{self, ExpressionMethods, QueryDsl, RunQueryDsl};

#[derive(Clone, Queryable, Identifiable, Serialize)]
pub struct Comment {
    pub id: i32,
    pub post_id: i32,
    pub author_id: i32,
    pub text: String,
    pub created: NaiveDateTime,
}

#[derive(Insertable)]
#[table_name = "comments"]
pub struct NewComment {
    pub post_id: i32,
    pub author_id: i32,
    pub text: String,
    pub created: NaiveDateTime,
}

impl NewComment {
    pub fn new(post_id: i32, author_id: i32, text: &str) -> Self {
        NewComment {
            post_id,
            author_id,
            text: text.to_owned(),
            created: Utc::now().naive_utc(),
        }
    }
}

impl Comment {
    insert!(comments, NewComment);
    get!(comments);

    pub fn create(conn: &Connection, new: NewComment) -> Result<Self> {
        if new.text.trim().is_empty() {
            return Err(Error::InvalidValue);
        }
        Post::get(conn, new.post_id)?;
        Self::insert(conn, new)
    }

    pub fn list_for_post(conn: &Connection, post_id: i32) -> Result<Vec<(Comment, User)>> {
        comments::table
            .inner_join(users::table)
            .filter(comments::post_id.eq(post_id))
            .order(comments::created.desc())
            .then_order_by(comments::id.desc())
            .load(conn)
            .map_err(Error::from)
    }
}
