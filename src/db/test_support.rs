use sqlx::PgPool;

use crate::db::schema;
use crate::model::NewUser;

pub(crate) async fn with_schema(pool: &PgPool) {
    for (_, ddl) in schema::TABLES {
        sqlx::query(ddl).execute(pool).await.unwrap();
    }
}

pub(crate) async fn count_rows(pool: &PgPool, table: &str) -> i64 {
    sqlx::query_scalar(&format!(r#"SELECT COUNT(*) FROM "{table}""#))
        .fetch_one(pool)
        .await
        .unwrap()
}

pub(crate) fn alice() -> NewUser {
    NewUser {
        username: "alice".into(),
        email: "alice@example.com".into(),
        first_name: "Alice".into(),
        last_name: "Anderson".into(),
        birth_year: 1990,
        password: "s3cret".into(),
        oib: 12_345_678_901,
    }
}
