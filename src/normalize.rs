//! Raw-record normalization via per-schema field-mapping tables.
//!
//! The remote API surfaces two field-naming schemes: an English-keyed shape
//! (`number`/`title`/`type`) and a Turkish-keyed shape (`no`/`adi`/`turu`).
//! Each shape is described by one [`FieldMap`] entry probed in order, so a
//! third upstream shape is a data change here, not a code change. Absent
//! fields default to empty/zero; raw input stays untyped (`serde_json::Value`)
//! until it leaves this module as a canonical record.

use serde_json::Value;

use crate::classify::classify;
use crate::keywords::extract_keywords;
use crate::models::{ArticleRecord, DocumentRecord};

/// Detail URL template applied when the source record carries no URL.
const URL_TEMPLATE: &str = "https://www.mevzuat.gov.tr/mevzuat?MevzuatNo=";

/// Keys under which the upstream record id may appear.
const ID_KEYS: [&str; 2] = ["id", "mevzuatId"];

/// Field names for one upstream document schema.
struct FieldMap {
    number: &'static str,
    title: &'static str,
    doc_type: &'static str,
    publication_date: &'static str,
    gazette_no: &'static str,
    gazette_date: &'static str,
    summary: &'static str,
    full_text: &'static str,
    url: &'static str,
    article_count: &'static str,
}

/// Known upstream document schemas, probed in order.
const DOCUMENT_SCHEMAS: [FieldMap; 2] = [
    FieldMap {
        number: "number",
        title: "title",
        doc_type: "type",
        publication_date: "publication_date",
        gazette_no: "gazette_no",
        gazette_date: "gazette_date",
        summary: "summary",
        full_text: "full_text",
        url: "url",
        article_count: "article_count",
    },
    FieldMap {
        number: "no",
        title: "adi",
        doc_type: "turu",
        publication_date: "yayimTarihi",
        gazette_no: "resmigNo",
        gazette_date: "resmigTarihi",
        summary: "ozet",
        full_text: "metnin_tamami",
        url: "url",
        article_count: "article_count",
    },
];

/// Field names for one upstream article schema.
struct ArticleFieldMap {
    number: &'static str,
    title: &'static str,
    content: &'static str,
    html_content: &'static str,
}

/// Known upstream article schemas, probed in order.
const ARTICLE_SCHEMAS: [ArticleFieldMap; 2] = [
    ArticleFieldMap {
        number: "number",
        title: "title",
        content: "content",
        html_content: "html_content",
    },
    ArticleFieldMap {
        number: "maddeNo",
        title: "baslik",
        content: "metin",
        html_content: "htmlMetin",
    },
];

fn string_value(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn document_field(raw: &Value, pick: fn(&FieldMap) -> &'static str) -> Option<String> {
    DOCUMENT_SCHEMAS
        .iter()
        .find_map(|schema| raw.get(pick(schema)).and_then(string_value))
}

fn document_int(raw: &Value, pick: fn(&FieldMap) -> &'static str) -> Option<i64> {
    DOCUMENT_SCHEMAS
        .iter()
        .find_map(|schema| raw.get(pick(schema)).and_then(Value::as_i64))
}

fn article_field(raw: &Value, pick: fn(&ArticleFieldMap) -> &'static str) -> Option<String> {
    ARTICLE_SCHEMAS
        .iter()
        .find_map(|schema| raw.get(pick(schema)).and_then(string_value))
}

/// Resolve the natural key of a raw candidate, if present and non-empty.
pub fn document_number(raw: &Value) -> Option<String> {
    document_field(raw, |m| m.number).filter(|n| !n.is_empty())
}

/// Resolve the upstream record id used by the detail/articles endpoints.
pub fn document_id(raw: &Value) -> Option<String> {
    ID_KEYS
        .iter()
        .find_map(|key| raw.get(key).and_then(string_value))
        .filter(|id| !id.is_empty())
}

/// Overlay the keys of a detail response onto a search candidate.
pub fn overlay(base: &mut Value, extra: Value) {
    if let (Some(base_map), Value::Object(extra_map)) = (base.as_object_mut(), extra) {
        for (key, value) in extra_map {
            base_map.insert(key, value);
        }
    }
}

/// Build the canonical document record from a raw candidate and its fetched
/// article list.
///
/// The article count is the fetched list length; when no articles came back,
/// an explicitly provided count is trusted instead. A missing URL is derived
/// from the document number via the fixed detail-URL template.
pub fn normalize(raw: &Value, articles: &[Value]) -> DocumentRecord {
    let number = document_number(raw).unwrap_or_default();
    let title = document_field(raw, |m| m.title).unwrap_or_default();

    let article_count = if articles.is_empty() {
        document_int(raw, |m| m.article_count).unwrap_or(0)
    } else {
        articles.len() as i64
    };

    let url = document_field(raw, |m| m.url)
        .filter(|u| !u.is_empty())
        .unwrap_or_else(|| format!("{}{}", URL_TEMPLATE, number));

    DocumentRecord {
        category: classify(&title),
        keywords: extract_keywords(&title),
        doc_type: document_field(raw, |m| m.doc_type).unwrap_or_default(),
        publication_date: document_field(raw, |m| m.publication_date),
        gazette_no: document_field(raw, |m| m.gazette_no),
        gazette_date: document_field(raw, |m| m.gazette_date),
        summary: document_field(raw, |m| m.summary),
        full_text: document_field(raw, |m| m.full_text),
        number,
        title,
        article_count,
        url,
    }
}

/// Build canonical article records from a raw article list.
///
/// Ordinals are assigned 1-based by fetch order regardless of any
/// source-provided numbering; a missing number label falls back to the
/// stringified ordinal.
pub fn normalize_articles(raw_articles: &[Value]) -> Vec<ArticleRecord> {
    raw_articles
        .iter()
        .enumerate()
        .map(|(i, raw)| {
            let ordinal = (i + 1) as i64;
            ArticleRecord {
                ordinal,
                number: article_field(raw, |m| m.number)
                    .filter(|n| !n.is_empty())
                    .unwrap_or_else(|| ordinal.to_string()),
                title: article_field(raw, |m| m.title),
                content: article_field(raw, |m| m.content),
                html_content: article_field(raw, |m| m.html_content),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::Category;
    use serde_json::json;

    #[test]
    fn test_english_schema() {
        let raw = json!({
            "number": "7504",
            "title": "7504 Sayılı İş Kanununda Değişiklik Yapan Kanun",
            "type": "KANUN",
            "publication_date": "2024-03-01",
            "gazette_no": "32145",
            "gazette_date": "2024-03-01",
            "summary": "İş hukuku alanında düzenlemeler",
            "url": "https://example.org/7504",
        });

        let doc = normalize(&raw, &[]);
        assert_eq!(doc.number, "7504");
        assert_eq!(doc.doc_type, "KANUN");
        assert_eq!(doc.category, Category::Labor);
        assert_eq!(doc.url, "https://example.org/7504");
        assert_eq!(doc.publication_date.as_deref(), Some("2024-03-01"));
    }

    #[test]
    fn test_turkish_schema() {
        let raw = json!({
            "no": "YN-2024-15",
            "adi": "Çevre Koruma Yönetmeliği",
            "turu": "YÖNETMELIK",
            "yayimTarihi": "2024-04-12",
            "resmigNo": "32146",
            "resmigTarihi": "2024-04-12",
            "ozet": "Çevre koruma tedbirleri",
            "metnin_tamami": "Madde metinleri...",
        });

        let doc = normalize(&raw, &[]);
        assert_eq!(doc.number, "YN-2024-15");
        assert_eq!(doc.doc_type, "YÖNETMELIK");
        assert_eq!(doc.category, Category::Environmental);
        assert_eq!(doc.gazette_no.as_deref(), Some("32146"));
        assert_eq!(doc.full_text.as_deref(), Some("Madde metinleri..."));
        assert_eq!(doc.keywords, vec!["çevre", "koruma", "yönetmeliği"]);
    }

    #[test]
    fn test_url_template_when_absent() {
        let raw = json!({ "no": "7504", "adi": "Bir Kanun" });
        let doc = normalize(&raw, &[]);
        assert_eq!(doc.url, "https://www.mevzuat.gov.tr/mevzuat?MevzuatNo=7504");
    }

    #[test]
    fn test_numeric_number_is_stringified() {
        let raw = json!({ "no": 7504, "adi": "Bir Kanun" });
        assert_eq!(document_number(&raw).as_deref(), Some("7504"));
    }

    #[test]
    fn test_article_count_prefers_fetched_list() {
        let raw = json!({ "no": "1", "adi": "X", "article_count": 12 });
        let articles = vec![json!({"number": "1"}), json!({"number": "2"})];
        assert_eq!(normalize(&raw, &articles).article_count, 2);
        assert_eq!(normalize(&raw, &[]).article_count, 12);
    }

    #[test]
    fn test_absent_fields_default() {
        let doc = normalize(&json!({}), &[]);
        assert_eq!(doc.number, "");
        assert_eq!(doc.title, "");
        assert_eq!(doc.article_count, 0);
        assert!(doc.summary.is_none());
        assert_eq!(doc.category, Category::Administrative);
        assert!(doc.keywords.is_empty());
    }

    #[test]
    fn test_document_id_resolution() {
        assert_eq!(document_id(&json!({"id": "abc"})).as_deref(), Some("abc"));
        assert_eq!(
            document_id(&json!({"mevzuatId": 42})).as_deref(),
            Some("42")
        );
        assert!(document_id(&json!({"no": "7504"})).is_none());
    }

    #[test]
    fn test_overlay_merges_detail_keys() {
        let mut base = json!({ "no": "7504", "adi": "Kısa Ad" });
        overlay(
            &mut base,
            json!({ "adi": "Tam Ad", "metnin_tamami": "..." }),
        );
        assert_eq!(base["adi"], "Tam Ad");
        assert_eq!(base["no"], "7504");
        assert_eq!(base["metnin_tamami"], "...");
    }

    #[test]
    fn test_article_ordinals_ignore_source_numbering() {
        let raw = vec![
            json!({ "maddeNo": "5", "baslik": "Amaç", "metin": "..." }),
            json!({ "maddeNo": "5", "baslik": "Kapsam" }),
            json!({ "maddeNo": "9" }),
            json!({ "baslik": "Numarasız" }),
        ];

        let articles = normalize_articles(&raw);
        let ordinals: Vec<i64> = articles.iter().map(|a| a.ordinal).collect();
        assert_eq!(ordinals, vec![1, 2, 3, 4]);
        assert_eq!(articles[0].number, "5");
        assert_eq!(articles[1].number, "5");
        assert_eq!(articles[2].number, "9");
        // No label provided: synthesized from the ordinal.
        assert_eq!(articles[3].number, "4");
        assert_eq!(articles[3].title.as_deref(), Some("Numarasız"));
    }

    #[test]
    fn test_article_english_schema() {
        let raw = vec![json!({
            "number": "1",
            "title": "Amaç",
            "content": "Bu Kanunun amacı...",
            "html_content": "<p>Bu Kanunun amacı...</p>",
        })];

        let articles = normalize_articles(&raw);
        assert_eq!(articles[0].number, "1");
        assert_eq!(articles[0].content.as_deref(), Some("Bu Kanunun amacı..."));
        assert_eq!(
            articles[0].html_content.as_deref(),
            Some("<p>Bu Kanunun amacı...</p>")
        );
    }
}
