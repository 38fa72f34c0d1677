use sqlx::{Executor, PgPool, Postgres};

use crate::error::StoreResult;
use crate::model::{ContactId, ContactSummary, NewContact, UserId};

/// Inserts a contact row that is not yet associated with any user.
pub async fn insert_contact<'e, E>(executor: E, contact: &NewContact) -> StoreResult<ContactId>
where
    E: Executor<'e, Database = Postgres>,
{
    let contact_id = sqlx::query_scalar::<_, ContactId>(
        "INSERT INTO contact (first_name, last_name, contact_number, email)
         VALUES ($1, $2, $3, $4)
         RETURNING user_id",
    )
    .bind(&contact.first_name)
    .bind(&contact.last_name)
    .bind(&contact.contact_number)
    .bind(&contact.email)
    .fetch_one(executor)
    .await?;

    Ok(contact_id)
}

pub async fn insert_association<'e, E>(
    executor: E,
    user_id: UserId,
    contact_id: ContactId,
) -> StoreResult<()>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query("INSERT INTO user_contact (user_id, contact_id) VALUES ($1, $2)")
        .bind(user_id)
        .bind(contact_id)
        .execute(executor)
        .await?;

    Ok(())
}

pub async fn association_exists<'e, E>(
    executor: E,
    user_id: UserId,
    contact_id: ContactId,
) -> StoreResult<bool>
where
    E: Executor<'e, Database = Postgres>,
{
    let count = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM user_contact WHERE user_id = $1 AND contact_id = $2",
    )
    .bind(user_id)
    .bind(contact_id)
    .fetch_one(executor)
    .await?;

    Ok(count > 0)
}

/// Creates a contact and links it to `owner` in one transaction.
pub async fn add_contact(
    pool: &PgPool,
    owner: UserId,
    contact: &NewContact,
) -> StoreResult<ContactId> {
    let mut tx = pool.begin().await?;

    let contact_id = insert_contact(&mut *tx, contact).await?;
    insert_association(&mut *tx, owner, contact_id).await?;

    tx.commit().await?;
    Ok(contact_id)
}

/// The owner's contact list. Row order is whatever the store returns.
pub async fn list_contacts(pool: &PgPool, owner: UserId) -> StoreResult<Vec<ContactSummary>> {
    let contacts = sqlx::query_as::<_, ContactSummary>(
        "SELECT COALESCE(c.first_name, '') AS first_name,
                COALESCE(c.last_name, '') AS last_name,
                COALESCE(c.contact_number, '') AS contact_number
         FROM user_contact uc
         JOIN contact c ON uc.contact_id = c.user_id
         WHERE uc.user_id = $1",
    )
    .bind(owner)
    .fetch_all(pool)
    .await?;

    Ok(contacts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_support::{alice, count_rows, with_schema};
    use crate::db::users::add_user;
    use crate::model::{Contact, UserContact};

    fn bob() -> NewContact {
        NewContact {
            first_name: "Bob".into(),
            last_name: "Builder".into(),
            contact_number: "555-0100".into(),
            email: "bob@example.com".into(),
        }
    }

    #[sqlx::test]
    #[ignore = "requires a PostgreSQL server at DATABASE_URL"]
    async fn added_contact_shows_up_in_owner_list(pool: PgPool) {
        with_schema(&pool).await;
        let owner = add_user(&pool, &alice()).await.unwrap();

        let before = list_contacts(&pool, owner).await.unwrap();
        assert!(before.is_empty());

        let contact_id = add_contact(&pool, owner, &bob()).await.unwrap();

        let summaries: Vec<String> = list_contacts(&pool, owner)
            .await
            .unwrap()
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(summaries, vec!["Bob Builder: 555-0100".to_owned()]);

        let links: Vec<UserContact> =
            sqlx::query_as("SELECT user_id, contact_id FROM user_contact")
                .fetch_all(&pool)
                .await
                .unwrap();
        assert_eq!(
            links,
            vec![UserContact {
                user_id: owner,
                contact_id,
            }]
        );

        let stored: Contact = sqlx::query_as("SELECT * FROM contact WHERE user_id = $1")
            .bind(contact_id)
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(stored.contact_id, contact_id);
        assert_eq!(stored.email.as_deref(), Some("bob@example.com"));
    }

    #[sqlx::test]
    #[ignore = "requires a PostgreSQL server at DATABASE_URL"]
    async fn contacts_are_scoped_to_their_owner(pool: PgPool) {
        with_schema(&pool).await;
        let owner = add_user(&pool, &alice()).await.unwrap();
        let other = add_user(&pool, &alice()).await.unwrap();

        add_contact(&pool, owner, &bob()).await.unwrap();

        assert_eq!(list_contacts(&pool, owner).await.unwrap().len(), 1);
        assert!(list_contacts(&pool, other).await.unwrap().is_empty());
    }

    #[sqlx::test]
    #[ignore = "requires a PostgreSQL server at DATABASE_URL"]
    async fn failed_link_leaves_no_orphan_contact(pool: PgPool) {
        with_schema(&pool).await;

        // no such user, so the association insert violates its foreign key
        let result = add_contact(&pool, 9_999, &bob()).await;

        assert!(result.is_err());
        assert_eq!(count_rows(&pool, "contact").await, 0);
        assert_eq!(count_rows(&pool, "user_contact").await, 0);
    }

    #[sqlx::test]
    #[ignore = "requires a PostgreSQL server at DATABASE_URL"]
    async fn association_check_sees_inserted_pairs(pool: PgPool) {
        with_schema(&pool).await;
        let owner = add_user(&pool, &alice()).await.unwrap();
        let contact_id = insert_contact(&pool, &bob()).await.unwrap();

        assert!(!association_exists(&pool, owner, contact_id).await.unwrap());
        insert_association(&pool, owner, contact_id).await.unwrap();
        assert!(association_exists(&pool, owner, contact_id).await.unwrap());

        // standalone contacts are not listed until linked
        insert_contact(&pool, &bob()).await.unwrap();
        assert_eq!(list_contacts(&pool, owner).await.unwrap().len(), 1);
    }
}
