use super::ProductModel;

// relevance buckets evaluated against the whole trimmed lowercased
// query, ties inside one bucket keep original catalog order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum SearchRank {
    ExactTitle,
    TitlePrefix,
    TitleSubstring,
    FieldsOnly,
}

fn rank_by_title(title_lowered: &str, phrase_lowered: &str) -> SearchRank {
    if title_lowered == phrase_lowered {
        SearchRank::ExactTitle
    } else if title_lowered.starts_with(phrase_lowered) {
        SearchRank::TitlePrefix
    } else if title_lowered.contains(phrase_lowered) {
        SearchRank::TitleSubstring
    } else {
        SearchRank::FieldsOnly
    }
}

// Linear scan over a dedicated in-memory copy of the catalog. A product
// matches when every whitespace-separated token of the query appears as
// a case-insensitive substring of its title, category or description.
pub struct ProductSearchIndex {
    items: Vec<ProductModel>,
}

impl ProductSearchIndex {
    pub fn new(items: Vec<ProductModel>) -> Self {
        Self { items }
    }

    pub fn num_items(&self) -> usize {
        self.items.len()
    }

    pub fn query(&self, phrase: &str, limit: usize) -> Vec<ProductModel> {
        let phrase_lowered = phrase.trim().to_lowercase();
        let tokens = phrase_lowered
            .split_whitespace()
            .collect::<Vec<_>>();
        if tokens.is_empty() {
            return Vec::new();
        }
        let mut hits = self
            .items
            .iter()
            .filter(|p| {
                let title = p.title.to_lowercase();
                let category = p.category.to_lowercase();
                let description = p.description.to_lowercase();
                tokens.iter().all(|t| {
                    title.contains(t) || category.contains(t) || description.contains(t)
                })
            })
            .map(|p| {
                let rank = rank_by_title(p.title.to_lowercase().as_str(), phrase_lowered.as_str());
                (rank, p)
            })
            .collect::<Vec<_>>();
        // stable, equal ranks keep their relative catalog order
        hits.sort_by_key(|(rank, _)| *rank);
        hits.into_iter()
            .take(limit)
            .map(|(_, p)| p.clone())
            .collect::<Vec<_>>()
    } // end of fn query
} // end of impl ProductSearchIndex
