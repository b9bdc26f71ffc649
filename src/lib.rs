//! Group membership persistence: groups owned by an admin user and the memberships
//! linking users to them, stored in SQLite through diesel.

pub mod database {
    pub mod database;
    pub mod schema;
    pub mod utils;

    pub mod group {
        pub mod group;
        pub mod user_group;
    }

    #[cfg(test)]
    mod tests {
        mod common;
        mod config_tests;
        mod group_tests;
        mod transaction_tests;
        mod user_group_tests;
    }
}
pub mod utils {
    pub mod errors_catcher;
}

pub use database::group::group::Group;
pub use database::group::user_group::UserGroup;
pub use utils::errors_catcher::{ErrorResponse, ErrorType, ErrorTypeKind};
