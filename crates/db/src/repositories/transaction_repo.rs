//! Repository for the `transactions` table.

use sqlx::PgPool;

use cardvault_core::types::{DbId, Timestamp};

use crate::models::transaction::{CreateTransaction, Transaction, TransactionFilter};

/// Column list for `transactions` queries.
const COLUMNS: &str = "\
    id, card_id, customer_id, amount_cents, currency, merchant_name, \
    merchant_category, status, is_disputed, fraud_flag, transaction_date, \
    created_at";

/// Provides query and flag operations for transactions.
///
/// Financial columns are never updated; only `is_disputed` and `fraud_flag`
/// mutate.
pub struct TransactionRepo;

impl TransactionRepo {
    /// Record a new transaction (authorization-flow / seed path).
    pub async fn create(pool: &PgPool, dto: &CreateTransaction) -> Result<Transaction, sqlx::Error> {
        let query = format!(
            "INSERT INTO transactions \
                (card_id, customer_id, amount_cents, currency, merchant_name, \
                 merchant_category, status, transaction_date) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Transaction>(&query)
            .bind(dto.card_id)
            .bind(dto.customer_id)
            .bind(dto.amount_cents)
            .bind(dto.currency.as_str())
            .bind(&dto.merchant_name)
            .bind(&dto.merchant_category)
            .bind(&dto.status)
            .bind(dto.transaction_date)
            .fetch_one(pool)
            .await
    }

    /// Find a transaction owned by the given customer.
    pub async fn find_for_customer(
        pool: &PgPool,
        transaction_id: DbId,
        customer_id: DbId,
    ) -> Result<Option<Transaction>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM transactions WHERE id = $1 AND customer_id = $2");
        sqlx::query_as::<_, Transaction>(&query)
            .bind(transaction_id)
            .bind(customer_id)
            .fetch_optional(pool)
            .await
    }

    /// Find a transaction by primary key (admin path).
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Transaction>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM transactions WHERE id = $1");
        sqlx::query_as::<_, Transaction>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List transactions matching the filter, newest first.
    pub async fn list(
        pool: &PgPool,
        filter: &TransactionFilter,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Transaction>, sqlx::Error> {
        let (where_clause, bind_values, bind_idx) = build_filter(filter);
        let query = format!(
            "SELECT {COLUMNS} FROM transactions {where_clause} \
             ORDER BY transaction_date DESC \
             LIMIT ${bind_idx} OFFSET ${}",
            bind_idx + 1
        );
        let q = bind_filter_values(sqlx::query_as::<_, Transaction>(&query), &bind_values);
        q.bind(limit).bind(offset).fetch_all(pool).await
    }

    /// Count transactions matching the filter (for pagination metadata).
    pub async fn count(pool: &PgPool, filter: &TransactionFilter) -> Result<i64, sqlx::Error> {
        let (where_clause, bind_values, _) = build_filter(filter);
        let query = format!("SELECT COUNT(*) FROM transactions {where_clause}");
        let q = bind_filter_values_scalar(sqlx::query_scalar::<_, i64>(&query), &bind_values);
        q.fetch_one(pool).await
    }

    /// Set the fraud flag on a customer-owned transaction.
    ///
    /// Returns `false` when the row is absent or not owned by the customer.
    pub async fn set_fraud_flag(
        pool: &PgPool,
        transaction_id: DbId,
        customer_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE transactions SET fraud_flag = TRUE \
             WHERE id = $1 AND customer_id = $2",
        )
        .bind(transaction_id)
        .bind(customer_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}

/// Typed bind value for dynamically-built transaction queries.
enum BindValue {
    BigInt(i64),
    Text(String),
    Bool(bool),
    Timestamp(Timestamp),
}

/// Build a WHERE clause and bind values from filter parameters.
///
/// Returns `(where_clause, bind_values, next_bind_index)`.
fn build_filter(filter: &TransactionFilter) -> (String, Vec<BindValue>, u32) {
    let mut conditions: Vec<String> = Vec::new();
    let mut bind_idx = 1u32;
    let mut bind_values: Vec<BindValue> = Vec::new();

    if let Some(card_id) = filter.card_id {
        conditions.push(format!("card_id = ${bind_idx}"));
        bind_idx += 1;
        bind_values.push(BindValue::BigInt(card_id));
    }

    if let Some(customer_id) = filter.customer_id {
        conditions.push(format!("customer_id = ${bind_idx}"));
        bind_idx += 1;
        bind_values.push(BindValue::BigInt(customer_id));
    }

    if let Some(ref status) = filter.status {
        conditions.push(format!("status = ${bind_idx}"));
        bind_idx += 1;
        bind_values.push(BindValue::Text(status.clone()));
    }

    if let Some(fraud_flag) = filter.fraud_flag {
        conditions.push(format!("fraud_flag = ${bind_idx}"));
        bind_idx += 1;
        bind_values.push(BindValue::Bool(fraud_flag));
    }

    if let Some(is_disputed) = filter.is_disputed {
        conditions.push(format!("is_disputed = ${bind_idx}"));
        bind_idx += 1;
        bind_values.push(BindValue::Bool(is_disputed));
    }

    if let Some(from) = filter.from {
        conditions.push(format!("transaction_date >= ${bind_idx}"));
        bind_idx += 1;
        bind_values.push(BindValue::Timestamp(from));
    }

    if let Some(to) = filter.to {
        conditions.push(format!("transaction_date <= ${bind_idx}"));
        bind_idx += 1;
        bind_values.push(BindValue::Timestamp(to));
    }

    let where_clause = if conditions.is_empty() {
        String::new()
    } else {
        format!("WHERE {}", conditions.join(" AND "))
    };

    (where_clause, bind_values, bind_idx)
}

/// Bind a slice of `BindValue` to a sqlx `QueryAs`.
fn bind_filter_values<'q, O>(
    mut q: sqlx::query::QueryAs<'q, sqlx::Postgres, O, sqlx::postgres::PgArguments>,
    bind_values: &'q [BindValue],
) -> sqlx::query::QueryAs<'q, sqlx::Postgres, O, sqlx::postgres::PgArguments> {
    for val in bind_values {
        match val {
            BindValue::BigInt(v) => q = q.bind(*v),
            BindValue::Text(v) => q = q.bind(v.as_str()),
            BindValue::Bool(v) => q = q.bind(*v),
            BindValue::Timestamp(v) => q = q.bind(*v),
        }
    }
    q
}

/// Bind a slice of `BindValue` to a sqlx `QueryScalar`.
fn bind_filter_values_scalar<'q>(
    mut q: sqlx::query::QueryScalar<'q, sqlx::Postgres, i64, sqlx::postgres::PgArguments>,
    bind_values: &'q [BindValue],
) -> sqlx::query::QueryScalar<'q, sqlx::Postgres, i64, sqlx::postgres::PgArguments> {
    for val in bind_values {
        match val {
            BindValue::BigInt(v) => q = q.bind(*v),
            BindValue::Text(v) => q = q.bind(v.as_str()),
            BindValue::Bool(v) => q = q.bind(*v),
            BindValue::Timestamp(v) => q = q.bind(*v),
        }
    }
    q
}
