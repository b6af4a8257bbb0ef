use crate::{
    comments::Comment,
    follows::Follow,
    groups::Group,
    pagination::{Page, Paginator},
    posts::Post,
    users::User,
    Connection, Result, CONFIG,
};

/// A post together with the author and group it is rendered with. Feeds
/// load these in one joined query, never per item.
#[derive(Clone, Serialize)]
pub struct FeedEntry {
    pub post: Post,
    pub author: User,
    pub group: Option<Group>,
}

impl From<(Post, User, Option<Group>)> for FeedEntry {
    fn from((post, author, group): (Post, User, Option<Group>)) -> Self {
        FeedEntry {
            post,
            author,
            group,
        }
    }
}

#[derive(Clone, Serialize)]
pub struct GroupFeed {
    pub group: Group,
    pub page: Page<FeedEntry>,
}

#[derive(Clone, Serialize)]
pub struct ProfileFeed {
    pub profile: User,
    pub is_following: bool,
    pub page: Page<FeedEntry>,
}

#[derive(Clone, Serialize)]
pub struct CommentEntry {
    pub comment: Comment,
    pub author: User,
}

#[derive(Clone, Serialize)]
pub struct PostDetail {
    pub post: FeedEntry,
    pub comments: Vec<CommentEntry>,
}

fn paginator() -> Paginator {
    Paginator::new(CONFIG.count_post)
}

/// Every post on the platform, newest first.
pub fn home(conn: &Connection, page: Option<i32>) -> Result<Page<FeedEntry>> {
    let paginator = paginator();
    let total = Post::count(conn)?;
    let req = paginator.resolve(total, page);
    let items = Post::page(conn, (req.offset, req.limit))?
        .into_iter()
        .map(FeedEntry::from)
        .collect();
    Ok(Page::new(
        items,
        req.number,
        total,
        paginator.total_pages(total),
    ))
}

/// The posts of one group, newest first.
pub fn group(conn: &Connection, slug: &str, page: Option<i32>) -> Result<GroupFeed> {
    let group = Group::find_by_slug(conn, slug)?;
    let paginator = paginator();
    let total = Post::count_for_group(conn, &group)?;
    let req = paginator.resolve(total, page);
    let items = Post::page_for_group(conn, &group, (req.offset, req.limit))?
        .into_iter()
        .map(FeedEntry::from)
        .collect();
    Ok(GroupFeed {
        group,
        page: Page::new(items, req.number, total, paginator.total_pages(total)),
    })
}

/// The posts of one author, with a flag telling whether the viewer
/// follows them. An anonymous viewer never follows anyone.
pub fn profile(
    conn: &Connection,
    username: &str,
    viewer: Option<i32>,
    page: Option<i32>,
) -> Result<ProfileFeed> {
    let profile = User::find_by_name(conn, username)?;
    let is_following = match viewer {
        Some(viewer) => Follow::is_following(conn, viewer, profile.id)?,
        None => false,
    };
    let paginator = paginator();
    let total = Post::count_for_author(conn, &profile)?;
    let req = paginator.resolve(total, page);
    let items = Post::page_for_author(conn, &profile, (req.offset, req.limit))?
        .into_iter()
        .map(FeedEntry::from)
        .collect();
    Ok(ProfileFeed {
        profile,
        is_following,
        page: Page::new(items, req.number, total, paginator.total_pages(total)),
    })
}

/// The posts of everyone the viewer follows, newest first. Callers make
/// sure `viewer_id` is an authenticated identity before getting here.
pub fn following(conn: &Connection, viewer_id: i32, page: Option<i32>) -> Result<Page<FeedEntry>> {
    let paginator = paginator();
    let total = Post::count_followed_by(conn, viewer_id)?;
    let req = paginator.resolve(total, page);
    let items = Post::followed_by_page(conn, viewer_id, (req.offset, req.limit))?
        .into_iter()
        .map(FeedEntry::from)
        .collect();
    Ok(Page::new(
        items,
        req.number,
        total,
        paginator.total_pages(total),
    ))
}

/// One post with its comment thread, newest comment first.
pub fn detail(conn: &Connection, post_id: i32) -> Result<PostDetail> {
    let post = Post::get_with_relations(conn, post_id)?.into();
    let comments = Comment::list_for_post(conn, post_id)?
        .into_iter()
        .map(|(comment, author)| CommentEntry { comment, author })
        .collect();
    Ok(PostDetail { post, comments })
}
