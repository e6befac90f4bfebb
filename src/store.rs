//! Deduplication lookup and persistence writer.
//!
//! The store speaks three tables: categories (label → id, seeded by
//! migration), documents (unique natural key), and articles (children of a
//! document, ordered by ordinal). Writing a document resolves its category
//! label first, inserts the document row, then bulk-inserts the article batch
//! in one transaction. An article-batch failure after the document committed
//! leaves the document in place and is reported as a consistency warning, not
//! rolled back.

use anyhow::{Context, Result};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::models::{ArticleRecord, DocumentRecord};

/// Outcome of one document write.
pub struct WriteReport {
    pub document_id: String,
    /// Set when the article batch failed after the document row committed.
    pub article_warning: Option<String>,
}

/// Point lookup by natural key. Lookup failures are real errors, never
/// treated as absence.
pub async fn document_exists(pool: &SqlitePool, number: &str) -> Result<bool> {
    let id: Option<String> = sqlx::query_scalar("SELECT id FROM documents WHERE number = ?")
        .bind(number)
        .fetch_optional(pool)
        .await
        .with_context(|| format!("duplicate check failed for document {}", number))?;

    Ok(id.is_some())
}

/// Resolve a category label to its stored id. `Ok(None)` means the label is
/// not seeded, which callers tolerate by writing a null reference.
pub async fn category_id(pool: &SqlitePool, label: &str) -> Result<Option<String>> {
    sqlx::query_scalar("SELECT id FROM categories WHERE label = ?")
        .bind(label)
        .fetch_optional(pool)
        .await
        .with_context(|| format!("category lookup failed for {}", label))
}

/// Insert a document and its article batch. Returns the new document id and,
/// when the article batch could not be saved, a consistency warning.
pub async fn write_document(
    pool: &SqlitePool,
    document: &DocumentRecord,
    articles: &[ArticleRecord],
) -> Result<WriteReport> {
    let category_ref = category_id(pool, document.category.label()).await?;
    if category_ref.is_none() {
        eprintln!("warning: category not seeded: {}", document.category.label());
    }

    let document_id = Uuid::new_v4().to_string();
    let keywords_json = serde_json::to_string(&document.keywords)?;
    let inserted_at = chrono::Utc::now().timestamp();

    sqlx::query(
        r#"
        INSERT INTO documents (id, number, title, doc_type, category_id, publication_date, gazette_no, gazette_date, summary, full_text, article_count, url, keywords_json, inserted_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&document_id)
    .bind(&document.number)
    .bind(&document.title)
    .bind(&document.doc_type)
    .bind(&category_ref)
    .bind(&document.publication_date)
    .bind(&document.gazette_no)
    .bind(&document.gazette_date)
    .bind(&document.summary)
    .bind(&document.full_text)
    .bind(document.article_count)
    .bind(&document.url)
    .bind(&keywords_json)
    .bind(inserted_at)
    .execute(pool)
    .await
    .with_context(|| format!("document insert failed for {}", document.number))?;

    let article_warning = if articles.is_empty() {
        None
    } else {
        match insert_articles(pool, &document_id, articles).await {
            Ok(()) => None,
            Err(e) => Some(format!(
                "articles for document {} not saved: {}",
                document.number, e
            )),
        }
    };

    Ok(WriteReport {
        document_id,
        article_warning,
    })
}

async fn insert_articles(
    pool: &SqlitePool,
    document_id: &str,
    articles: &[ArticleRecord],
) -> Result<()> {
    let mut tx = pool.begin().await?;

    for article in articles {
        sqlx::query(
            r#"
            INSERT INTO articles (id, document_id, ordinal, number, title, content, html_content)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(Uuid::new_v4().to_string())
        .bind(document_id)
        .bind(article.ordinal)
        .bind(&article.number)
        .bind(&article.title)
        .bind(&article.content)
        .bind(&article.html_content)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;
    Ok(())
}
