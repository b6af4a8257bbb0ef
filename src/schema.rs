table! {
    comments (id) {
        id -> Integer,
        post_id -> Integer,
        author_id -> Integer,
        text -> Text,
        created -> Timestamp,
    }
}

table! {
    follows (id) {
        id -> Integer,
        follower_id -> Integer,
        following_id -> Integer,
    }
}

table! {
    groups (id) {
        id -> Integer,
        title -> Varchar,
        slug -> Varchar,
        description -> Text,
    }
}

table! {
    posts (id) {
        id -> Integer,
        text -> Text,
        author_id -> Integer,
        group_id -> Nullable<Integer>,
        image -> Nullable<Varchar>,
        pub_date -> Timestamp,
    }
}

table! {
    users (id) {
        id -> Integer,
        username -> Varchar,
    }
}

joinable!(comments -> posts (post_id));
joinable!(comments -> users (author_id));
joinable!(posts -> groups (group_id));
joinable!(posts -> users (author_id));

allow_tables_to_appear_in_same_query!(
    comments,
    follows,
    groups,
    posts,
    users,
);
