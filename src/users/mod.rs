mod api;
mod list;
mod model;

pub use api::{MockUserSource, PageQuery, UserFilter, UsersPage};
pub use list::UserList;
pub use model::{User, user_columns, users_to_rows};
