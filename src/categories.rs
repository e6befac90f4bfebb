//! Category listing with document counts.
//!
//! Shows the seeded category set and how many stored documents resolve to
//! each, in seed order. Useful for verifying a sync distributed documents
//! the way the classifier intended.

use anyhow::Result;
use sqlx::Row;

use crate::config::Config;
use crate::db;

pub async fn run_categories(config: &Config) -> Result<()> {
    let pool = db::connect(config).await?;

    let rows = sqlx::query(
        r#"
        SELECT c.label, COUNT(d.id) AS doc_count
        FROM categories c
        LEFT JOIN documents d ON d.category_id = c.id
        GROUP BY c.id
        ORDER BY c.seed_order
        "#,
    )
    .fetch_all(&pool)
    .await?;

    println!("{:<20} DOCUMENTS", "CATEGORY");
    for row in &rows {
        let label: String = row.get("label");
        let doc_count: i64 = row.get("doc_count");
        println!("{:<20} {}", label, doc_count);
    }

    pool.close().await;
    Ok(())
}
