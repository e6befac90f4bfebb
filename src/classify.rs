//! Keyword-rule category classifier.
//!
//! Maps a legislation title to one of eleven fixed legal-domain categories by
//! scanning an ordered rule table. Each rule is a keyword set tested by
//! substring containment against the lowercased title; the first rule with any
//! matching keyword wins, so rule order is part of the contract. Titles that
//! match no rule fall back to administrative law.

/// One of the fixed legal-domain classifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Constitutional,
    Labor,
    Criminal,
    Civil,
    Tax,
    Commercial,
    Health,
    Education,
    Environmental,
    Energy,
    Banking,
    Administrative,
}

impl Category {
    /// All categories in seed order (the default last).
    pub const ALL: [Category; 12] = [
        Category::Constitutional,
        Category::Labor,
        Category::Criminal,
        Category::Civil,
        Category::Tax,
        Category::Commercial,
        Category::Health,
        Category::Education,
        Category::Environmental,
        Category::Energy,
        Category::Banking,
        Category::Administrative,
    ];

    /// Display label as stored in the categories table.
    pub fn label(&self) -> &'static str {
        match self {
            Category::Constitutional => "Anayasa Hukuku",
            Category::Labor => "İş Hukuku",
            Category::Criminal => "Ceza Hukuku",
            Category::Civil => "Medeni Hukuk",
            Category::Tax => "Vergi Hukuku",
            Category::Commercial => "Ticaret Hukuku",
            Category::Health => "Sağlık Hukuku",
            Category::Education => "Eğitim Hukuku",
            Category::Environmental => "Çevre Hukuku",
            Category::Energy => "Enerji Hukuku",
            Category::Banking => "Bankacılık Hukuku",
            Category::Administrative => "İdare Hukuku",
        }
    }
}

/// Ordered rule table. Earlier rules take precedence when a title matches
/// several keyword sets.
const RULES: &[(&[&str], Category)] = &[
    (&["anayasa", "seçim", "parti"], Category::Constitutional),
    (&["iş", "çalışma", "sosyal güvenlik", "sgk"], Category::Labor),
    (&["ceza", "suç", "mahkeme"], Category::Criminal),
    (&["medeni", "aile", "evlilik", "miras"], Category::Civil),
    (&["vergi", "gelir", "kdv", "stopaj"], Category::Tax),
    (&["ticaret", "şirket", "rekabet"], Category::Commercial),
    (&["sağlık", "tıp", "hastane"], Category::Health),
    (&["eğitim", "okul", "üniversite"], Category::Education),
    (&["çevre", "orman", "su"], Category::Environmental),
    (&["enerji", "elektrik", "doğalgaz"], Category::Energy),
    (&["banka", "kredi", "finansal"], Category::Banking),
];

/// Classify a title into a category. Total: always returns a label.
pub fn classify(title: &str) -> Category {
    let lower = title.to_lowercase();

    for (words, category) in RULES {
        if words.iter().any(|word| lower.contains(word)) {
            return *category;
        }
    }

    Category::Administrative
}
