//! Plan categories and the per-category text buckets filled at startup.

use std::fmt;

/// Insurance plan category. Filenames and chat queries are mapped onto
/// this fixed set via [`match_keyword`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Medicare,
    AppleCare,
    Health101,
    Other,
}

impl Category {
    /// Human-readable plan name, as shown to the model and in logs.
    pub fn display_name(&self) -> &'static str {
        match self {
            Category::Medicare => "Medicare",
            Category::AppleCare => "Apple Care",
            Category::Health101 => "Health 101",
            Category::Other => "Other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Ordered (keyword, category) table consulted for both filename
/// categorization and chat-query routing. First match wins, so
/// precedence is exactly the order below.
pub const KEYWORD_TABLE: &[(&str, Category)] = &[
    ("medicare", Category::Medicare),
    ("apple", Category::AppleCare),
    ("health", Category::Health101),
];

/// Case-insensitive first-match lookup against [`KEYWORD_TABLE`].
pub fn match_keyword(text: &str) -> Option<Category> {
    let lower = text.to_lowercase();
    KEYWORD_TABLE
        .iter()
        .find(|(keyword, _)| lower.contains(keyword))
        .map(|&(_, category)| category)
}

/// Filename-based categorization: keyword match, otherwise the shared
/// "other" bucket.
pub fn categorize_filename(file_name: &str) -> Category {
    match_keyword(file_name).unwrap_or(Category::Other)
}

/// Accumulated document text per plan category.
///
/// Populated once during startup ingestion and never mutated afterwards;
/// request handlers share it read-only behind an `Arc`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentBuckets {
    medicare: String,
    applecare: String,
    health101: String,
    other: String,
}

impl DocumentBuckets {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append extracted text to a category bucket, separating multiple
    /// documents with a blank line. Whitespace-only text is dropped.
    pub fn append(&mut self, category: Category, text: &str) {
        if text.trim().is_empty() {
            return;
        }
        let slot = self.slot_mut(category);
        if !slot.is_empty() {
            slot.push_str("\n\n");
        }
        slot.push_str(text);
    }

    pub fn get(&self, category: Category) -> &str {
        match category {
            Category::Medicare => &self.medicare,
            Category::AppleCare => &self.applecare,
            Category::Health101 => &self.health101,
            Category::Other => &self.other,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.medicare.is_empty()
            && self.applecare.is_empty()
            && self.health101.is_empty()
            && self.other.is_empty()
    }

    /// Total characters held across all buckets (for startup logging).
    pub fn total_chars(&self) -> usize {
        self.medicare.len() + self.applecare.len() + self.health101.len() + self.other.len()
    }

    fn slot_mut(&mut self, category: Category) -> &mut String {
        match category {
            Category::Medicare => &mut self.medicare,
            Category::AppleCare => &mut self.applecare,
            Category::Health101 => &mut self.health101,
            Category::Other => &mut self.other,
        }
    }
}
