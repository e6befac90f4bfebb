use anyhow::Result;
use uuid::Uuid;

use crate::classify::Category;
use crate::config::Config;
use crate::db;

pub async fn run_migrations(config: &Config) -> Result<()> {
    let pool = db::connect(config).await?;

    // Create categories table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS categories (
            id TEXT PRIMARY KEY,
            label TEXT NOT NULL UNIQUE,
            seed_order INTEGER NOT NULL
        )
        "#,
    )
    .execute(&pool)
    .await?;

    // Create documents table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS documents (
            id TEXT PRIMARY KEY,
            number TEXT NOT NULL UNIQUE,
            title TEXT NOT NULL,
            doc_type TEXT NOT NULL DEFAULT '',
            category_id TEXT,
            publication_date TEXT,
            gazette_no TEXT,
            gazette_date TEXT,
            summary TEXT,
            full_text TEXT,
            article_count INTEGER NOT NULL DEFAULT 0,
            url TEXT NOT NULL,
            keywords_json TEXT NOT NULL DEFAULT '[]',
            inserted_at INTEGER NOT NULL,
            FOREIGN KEY (category_id) REFERENCES categories(id)
        )
        "#,
    )
    .execute(&pool)
    .await?;

    // Create articles table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS articles (
            id TEXT PRIMARY KEY,
            document_id TEXT NOT NULL,
            ordinal INTEGER NOT NULL,
            number TEXT NOT NULL,
            title TEXT,
            content TEXT,
            html_content TEXT,
            UNIQUE(document_id, ordinal),
            FOREIGN KEY (document_id) REFERENCES documents(id)
        )
        "#,
    )
    .execute(&pool)
    .await?;

    // Create indexes
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_articles_document_id ON articles(document_id)")
        .execute(&pool)
        .await?;
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_documents_category_id ON documents(category_id)")
        .execute(&pool)
        .await?;
    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_documents_inserted_at ON documents(inserted_at DESC)",
    )
    .execute(&pool)
    .await?;

    // Seed the fixed category set. The pipeline only ever looks these up;
    // it never creates categories of its own.
    for (i, category) in Category::ALL.iter().enumerate() {
        sqlx::query(
            "INSERT INTO categories (id, label, seed_order) VALUES (?, ?, ?) ON CONFLICT(label) DO NOTHING",
        )
        .bind(Uuid::new_v4().to_string())
        .bind(category.label())
        .bind(i as i64)
        .execute(&pool)
        .await?;
    }

    pool.close().await;
    Ok(())
}
