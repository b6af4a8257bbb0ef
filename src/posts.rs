use crate::{
    groups::Group,
    schema::{follows, groups, posts, users},
    users::User,
    Connection, Error, Result,
};
use chrono::{NaiveDateTime, Utc};
use diesel::{self, ExpressionMethods, QueryDsl, RunQueryDsl};

#[derive(Clone, Queryable, Identifiable, Serialize)]
pub struct Post {
    pub id: i32,
    pub text: String,
    pub author_id: i32,
    pub group_id: Option<i32>,
    pub image: Option<String>,
    pub pub_date: NaiveDateTime,
}

#[derive(Insertable)]
#[table_name = "posts"]
pub struct NewPost {
    pub text: String,
    pub author_id: i32,
    pub group_id: Option<i32>,
    pub image: Option<String>,
    pub pub_date: NaiveDateTime,
}

impl NewPost {
    pub fn new(text: &str, author_id: i32, group_id: Option<i32>, image: Option<String>) -> Self {
        NewPost {
            text: text.to_owned(),
            author_id,
            group_id,
            image,
            pub_date: Utc::now().naive_utc(),
        }
    }
}

impl Post {
    insert!(posts, NewPost);
    get!(posts);

    pub fn create(conn: &Connection, new: NewPost) -> Result<Self> {
        if new.text.trim().is_empty() {
            return Err(Error::InvalidValue);
        }
        Self::insert(conn, new)
    }

    /// Only the author may touch a post. `pub_date` is never rewritten.
    pub fn edit_by(
        &self,
        conn: &Connection,
        editor_id: i32,
        text: &str,
        group_id: Option<i32>,
        image: Option<String>,
    ) -> Result<Self> {
        if editor_id != self.author_id {
            return Err(Error::Unauthorized);
        }
        if text.trim().is_empty() {
            return Err(Error::InvalidValue);
        }
        diesel::update(self)
            .set((
                posts::text.eq(text),
                posts::group_id.eq(group_id),
                posts::image.eq(image),
            ))
            .execute(conn)?;
        Self::get(conn, self.id)
    }

    pub fn count(conn: &Connection) -> Result<i64> {
        posts::table.count().get_result(conn).map_err(Error::from)
    }

    pub fn page(
        conn: &Connection,
        (offset, limit): (i64, i64),
    ) -> Result<Vec<(Post, User, Option<Group>)>> {
        posts::table
            .inner_join(users::table)
            .left_join(groups::table)
            .order(posts::pub_date.desc())
            .then_order_by(posts::id.desc())
            .offset(offset)
            .limit(limit)
            .load(conn)
            .map_err(Error::from)
    }

    pub fn count_for_group(conn: &Connection, group: &Group) -> Result<i64> {
        posts::table
            .filter(posts::group_id.eq(group.id))
            .count()
            .get_result(conn)
            .map_err(Error::from)
    }

    pub fn page_for_group(
        conn: &Connection,
        group: &Group,
        (offset, limit): (i64, i64),
    ) -> Result<Vec<(Post, User, Option<Group>)>> {
        posts::table
            .inner_join(users::table)
            .left_join(groups::table)
            .filter(posts::group_id.eq(group.id))
            .order(posts::pub_date.desc())
            .then_order_by(posts::id.desc())
            .offset(offset)
            .limit(limit)
            .load(conn)
            .map_err(Error::from)
    }

    pub fn count_for_author(conn: &Connection, author: &User) -> Result<i64> {
        posts::table
            .filter(posts::author_id.eq(author.id))
            .count()
            .get_result(conn)
            .map_err(Error::from)
    }

    pub fn page_for_author(
        conn: &Connection,
        author: &User,
        (offset, limit): (i64, i64),
    ) -> Result<Vec<(Post, User, Option<Group>)>> {
        posts::table
            .inner_join(users::table)
            .left_join(groups::table)
            .filter(posts::author_id.eq(author.id))
            .order(posts::pub_date.desc())
            .then_order_by(posts::id.desc())
            .offset(offset)
            .limit(limit)
            .load(conn)
            .map_err(Error::from)
    }

    pub fn count_followed_by(conn: &Connection, user_id: i32) -> Result<i64> {
        let targets = follows::table
            .filter(follows::follower_id.eq(user_id))
            .select(follows::following_id);
        posts::table
            .filter(posts::author_id.eq_any(targets))
            .count()
            .get_result(conn)
            .map_err(Error::from)
    }

    pub fn followed_by_page(
        conn: &Connection,
        user_id: i32,
        (offset, limit): (i64, i64),
    ) -> Result<Vec<(Post, User, Option<Group>)>> {
        let targets = follows::table
            .filter(follows::follower_id.eq(user_id))
            .select(follows::following_id);
        posts::table
            .inner_join(users::table)
            .left_join(groups::table)
            .filter(posts::author_id.eq_any(targets))
            .order(posts::pub_date.desc())
            .then_order_by(posts::id.desc())
            .offset(offset)
            .limit(limit)
            .load(conn)
            .map_err(Error::from)
    }

    pub fn get_with_relations(
        conn: &Connection,
        id: i32,
    ) -> Result<(Post, User, Option<Group>)> {
        posts::table
            .inner_join(users::table)
            .left_join(groups::table)
            .filter(posts::id.eq(id))
            .first(conn)
            .map_err(Error::from)
    }
}
