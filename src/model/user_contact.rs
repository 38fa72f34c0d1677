use sqlx::FromRow;

use super::{ContactId, UserId};

/// One row of `user_contact`: `contact_id` is visible in `user_id`'s list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, FromRow)]
#[allow(dead_code)]
pub struct UserContact {
    pub user_id: UserId,
    pub contact_id: ContactId,
}
