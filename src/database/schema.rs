use diesel::{allow_tables_to_appear_in_same_query, define_sql_function, joinable, table};

table! {
    groups (id) {
        id -> Integer,
        admin_user_id -> Integer,
        name -> Text,
        description -> Text,
        profile_picture_path -> Text,
        creation_date -> Timestamp,
    }
}

table! {
    user_groups (user_id, group_id) {
        user_id -> Integer,
        group_id -> Integer,
    }
}
joinable!(user_groups -> groups (group_id));
allow_tables_to_appear_in_same_query!(user_groups, groups);

define_sql_function! {
    /// Row id of the last row inserted on this connection
    fn last_insert_rowid() -> diesel::sql_types::BigInt;
}
