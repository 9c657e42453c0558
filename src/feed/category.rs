//! Title keyword classifier.

use super::types::Category;

/// Keyword table in priority order. The first category with a matching
/// keyword wins.
const KEYWORDS: &[(Category, &[&str])] = &[
    (Category::Ethiopia, &["エチオピア", "モカ"]),
    (Category::Peru, &["ペルー"]),
    (Category::Tanzania, &["タンザニア"]),
    (Category::Guatemala, &["グアテマラ", "グァテマラ"]),
    (Category::Set, &["セット", "トライアル", "お試し"]),
];

/// Classify a product title.
///
/// Matching is case-sensitive substring containment. Titles without a known
/// keyword (including the empty title) are [`Category::Coffee`].
pub fn classify(title: &str) -> Category {
    KEYWORDS
        .iter()
        .find(|(_, words)| words.iter().any(|word| title.contains(word)))
        .map(|(category, _)| *category)
        .unwrap_or_default()
}
