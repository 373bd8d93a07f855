use sqlx::PgPool;

/// Every `id` column is a bigint.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_all_pks_are_bigint(pool: PgPool) {
    let rows: Vec<(String, String)> = sqlx::query_as(
        "SELECT table_name, data_type
         FROM information_schema.columns
         WHERE column_name = 'id'
           AND table_schema = 'public'
           AND table_name != '_sqlx_migrations'
         ORDER BY table_name",
    )
    .fetch_all(&pool)
    .await
    .unwrap();

    assert_eq!(rows.len(), 7);
    for (table, data_type) in &rows {
        assert_eq!(data_type, "bigint", "Table {table}.id should be bigint");
    }
}

/// Every table has timestamptz `created_at` and `updated_at`.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_all_tables_have_timestamps(pool: PgPool) {
    let tables: Vec<(String,)> = sqlx::query_as(
        "SELECT table_name
         FROM information_schema.tables
         WHERE table_schema = 'public'
           AND table_type = 'BASE TABLE'
           AND table_name != '_sqlx_migrations'
         ORDER BY table_name",
    )
    .fetch_all(&pool)
    .await
    .unwrap();

    for (table,) in &tables {
        for col in ["created_at", "updated_at"] {
            let result: Option<(String,)> = sqlx::query_as(
                "SELECT data_type
                 FROM information_schema.columns
                 WHERE table_schema = 'public'
                   AND table_name = $1
                   AND column_name = $2",
            )
            .bind(table)
            .bind(col)
            .fetch_optional(&pool)
            .await
            .unwrap();

            let (data_type,) =
                result.unwrap_or_else(|| panic!("Table {table} is missing column {col}"));
            assert_eq!(
                data_type, "timestamp with time zone",
                "Table {table}.{col} should be timestamptz"
            );
        }
    }
}

/// Status columns reject values outside their workflow.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_status_check_constraints(pool: PgPool) {
    let bad_booking = sqlx::query(
        "INSERT INTO bookings (name, email, class_type, status)
         VALUES ('A', 'a@example.com', 'salsa', 'archived')",
    )
    .execute(&pool)
    .await;
    assert!(bad_booking.is_err());

    let bad_rating = sqlx::query(
        "INSERT INTO testimonials (student_name, rating, content)
         VALUES ('A', 6, 'Lovely classes every week')",
    )
    .execute(&pool)
    .await;
    assert!(bad_rating.is_err());
}
