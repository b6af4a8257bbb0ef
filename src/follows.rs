use crate::{schema::follows, Connection, Error, Result};
use diesel::{
    self,
    result::{DatabaseErrorKind, Error as DieselError},
    ExpressionMethods, QueryDsl, RunQueryDsl,
};
use tracing::debug;

#[derive(Clone, Queryable, Identifiable, Serialize)]
pub struct Follow {
    pub id: i32,
    pub follower_id: i32,
    pub following_id: i32,
}

#[derive(Insertable)]
#[table_name = "follows"]
pub struct NewFollow {
    pub follower_id: i32,
    pub following_id: i32,
}

impl Follow {
    get!(follows);
    last!(follows);

    pub fn find(conn: &Connection, from: i32, to: i32) -> Result<Follow> {
        follows::table
            .filter(follows::follower_id.eq(from))
            .filter(follows::following_id.eq(to))
            .first(conn)
            .map_err(Error::from)
    }

    /// The unique constraint on `(follower_id, following_id)` is what
    /// dedupes concurrent inserts; hitting it means the edge is already
    /// there, which is what the caller wanted.
    pub fn insert(conn: &Connection, new: NewFollow) -> Result<Follow> {
        match diesel::insert_into(follows::table).values(&new).execute(conn) {
            Ok(_) => Self::last(conn),
            Err(DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _)) => {
                debug!(
                    "user {} already follows user {}",
                    new.follower_id, new.following_id
                );
                Self::find(conn, new.follower_id, new.following_id)
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Following yourself or someone you already follow is a no-op.
    pub fn follow(conn: &Connection, follower_id: i32, target_id: i32) -> Result<()> {
        if follower_id == target_id {
            return Ok(());
        }
        Follow::insert(
            conn,
            NewFollow {
                follower_id,
                following_id: target_id,
            },
        )?;
        Ok(())
    }

    /// Unlike `follow`, unfollowing someone you don't follow is an error.
    pub fn unfollow(conn: &Connection, follower_id: i32, target_id: i32) -> Result<()> {
        let follow = Follow::find(conn, follower_id, target_id)?;
        diesel::delete(&follow).execute(conn)?;
        Ok(())
    }

    pub fn is_following(conn: &Connection, viewer_id: i32, target_id: i32) -> Result<bool> {
        Ok(follows::table
            .filter(follows::follower_id.eq(viewer_id))
            .filter(follows::following_id.eq(target_id))
            .count()
            .get_result::<i64>(conn)?
            > 0)
    }

    pub fn following_targets(conn: &Connection, user_id: i32) -> Result<Vec<i32>> {
        follows::table
            .filter(follows::follower_id.eq(user_id))
            .select(follows::following_id)
            .load(conn)
            .map_err(Error::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{tests::db, users::tests as user_tests};
    use diesel::Connection;

    #[test]
    fn follow_is_idempotent() {
        let conn = db();
        conn.test_transaction::<_, Error, _>(|| {
            let users = user_tests::fill_database(&conn);
            Follow::follow(&conn, users[0].id, users[1].id)?;
            Follow::follow(&conn, users[0].id, users[1].id)?;

            assert_eq!(
                Follow::following_targets(&conn, users[0].id)?,
                vec![users[1].id]
            );
            Ok(())
        });
    }

    #[test]
    fn self_follow_is_a_noop() {
        let conn = db();
        conn.test_transaction::<_, Error, _>(|| {
            let users = user_tests::fill_database(&conn);
            Follow::follow(&conn, users[0].id, users[0].id)?;
            assert!(Follow::following_targets(&conn, users[0].id)?.is_empty());

            // the data store refuses the edge even when inserted directly
            assert!(Follow::insert(
                &conn,
                NewFollow {
                    follower_id: users[0].id,
                    following_id: users[0].id,
                },
            )
            .is_err());
            Ok(())
        });
    }

    #[test]
    fn unfollow_requires_an_edge() {
        let conn = db();
        conn.test_transaction::<_, Error, _>(|| {
            let users = user_tests::fill_database(&conn);
            assert!(matches!(
                Follow::unfollow(&conn, users[0].id, users[1].id),
                Err(Error::NotFound)
            ));

            Follow::follow(&conn, users[0].id, users[1].id)?;
            Follow::unfollow(&conn, users[0].id, users[1].id)?;
            assert!(!Follow::is_following(&conn, users[0].id, users[1].id)?);
            Ok(())
        });
    }

    #[test]
    fn is_following_is_directed() {
        let conn = db();
        conn.test_transaction::<_, Error, _>(|| {
            let users = user_tests::fill_database(&conn);
            Follow::follow(&conn, users[0].id, users[1].id)?;

            assert!(Follow::is_following(&conn, users[0].id, users[1].id)?);
            assert!(!Follow::is_following(&conn, users[1].id, users[0].id)?);
            Ok(())
        });
    }
}
