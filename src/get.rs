//! Stored-document retrieval by natural key.
//!
//! Fetches a document row and its articles (ordered by ordinal) from the
//! database. Used by the `mvz get` CLI command.

use anyhow::{bail, Result};
use serde::Serialize;
use sqlx::Row;

use crate::config::Config;
use crate::db;

/// A stored document together with its resolved category label and articles.
#[derive(Debug, Clone, Serialize)]
pub struct StoredDocument {
    pub id: String,
    pub number: String,
    pub title: String,
    pub doc_type: String,
    pub category: Option<String>,
    pub publication_date: Option<String>,
    pub gazette_no: Option<String>,
    pub gazette_date: Option<String>,
    pub summary: Option<String>,
    pub article_count: i64,
    pub url: String,
    pub keywords: Vec<String>,
    pub articles: Vec<StoredArticle>,
}

#[derive(Debug, Clone, Serialize)]
pub struct StoredArticle {
    pub ordinal: i64,
    pub number: String,
    pub title: Option<String>,
    pub content: Option<String>,
}

/// Core lookup returning structured data (used by the CLI and tests).
pub async fn get_document(config: &Config, number: &str) -> Result<StoredDocument> {
    let pool = db::connect(config).await?;

    let doc_row = sqlx::query(
        r#"
        SELECT d.id, d.number, d.title, d.doc_type, c.label AS category,
               d.publication_date, d.gazette_no, d.gazette_date, d.summary,
               d.article_count, d.url, d.keywords_json
        FROM documents d
        LEFT JOIN categories c ON c.id = d.category_id
        WHERE d.number = ?
        "#,
    )
    .bind(number)
    .fetch_optional(&pool)
    .await?;

    let doc_row = match doc_row {
        Some(row) => row,
        None => {
            pool.close().await;
            bail!("document not found: {}", number);
        }
    };

    let keywords_json: String = doc_row.get("keywords_json");
    let keywords: Vec<String> = serde_json::from_str(&keywords_json).unwrap_or_default();
    let document_id: String = doc_row.get("id");

    let article_rows = sqlx::query(
        "SELECT ordinal, number, title, content FROM articles WHERE document_id = ? ORDER BY ordinal",
    )
    .bind(&document_id)
    .fetch_all(&pool)
    .await?;

    let articles = article_rows
        .iter()
        .map(|row| StoredArticle {
            ordinal: row.get("ordinal"),
            number: row.get("number"),
            title: row.get("title"),
            content: row.get("content"),
        })
        .collect();

    let document = StoredDocument {
        id: document_id,
        number: doc_row.get("number"),
        title: doc_row.get("title"),
        doc_type: doc_row.get("doc_type"),
        category: doc_row.get("category"),
        publication_date: doc_row.get("publication_date"),
        gazette_no: doc_row.get("gazette_no"),
        gazette_date: doc_row.get("gazette_date"),
        summary: doc_row.get("summary"),
        article_count: doc_row.get("article_count"),
        url: doc_row.get("url"),
        keywords,
        articles,
    };

    pool.close().await;
    Ok(document)
}

/// Run the get command: look up a document and print it.
pub async fn run_get(config: &Config, number: &str) -> Result<()> {
    let document = get_document(config, number).await?;

    println!("Document {}", document.number);
    println!("  title:     {}", document.title);
    println!("  type:      {}", document.doc_type);
    println!(
        "  category:  {}",
        document.category.as_deref().unwrap_or("-")
    );
    println!(
        "  published: {}",
        document.publication_date.as_deref().unwrap_or("-")
    );
    println!("  url:       {}", document.url);
    println!("  keywords:  {}", document.keywords.join(", "));
    println!("  articles:  {}", document.article_count);

    for article in &document.articles {
        println!(
            "  [{}] Madde {}: {}",
            article.ordinal,
            article.number,
            article.title.as_deref().unwrap_or("")
        );
    }

    Ok(())
}
