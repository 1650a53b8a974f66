//! The evaluation question catalog.
//!
//! A fixed, categorized set of questions probing where structured graph
//! queries beat free-text retrieval and vice versa, plus named curated
//! subsets ("quick", "medium", "diagnostic") built from declared recipes.
//! The catalog is immutable data; every accessor is a pure function over
//! the category definitions.

use crate::error::{BenchError, Result};
use serde::{Deserialize, Serialize};

/// The closed set of question categories.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Relationship,
    Counting,
    Filtering,
    Topic,
    Semantic,
    MultiHop,
    Temporal,
    Comparison,
}

impl Category {
    /// All categories, in catalog order.
    pub const ALL: [Category; 8] = [
        Category::Relationship,
        Category::Counting,
        Category::Filtering,
        Category::Topic,
        Category::Semantic,
        Category::MultiHop,
        Category::Temporal,
        Category::Comparison,
    ];

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Category::Relationship => "Relationship Queries",
            Category::Counting => "Counting & Aggregation",
            Category::Filtering => "Filtering Queries",
            Category::Topic => "Topic Queries",
            Category::Semantic => "Semantic/Content Queries",
            Category::MultiHop => "Complex Multi-hop",
            Category::Temporal => "Temporal Queries",
            Category::Comparison => "Comparison Queries",
        }
    }

    /// Which method is expected to win on this category.
    pub fn expectation(&self) -> &'static str {
        match self {
            Category::Relationship
            | Category::Counting
            | Category::Filtering
            | Category::MultiHop
            | Category::Temporal => "KG expected to win",
            Category::Semantic => "RAG expected to win",
            Category::Topic | Category::Comparison => "Mixed results expected",
        }
    }

    /// Parse a category from its identifier (case-insensitive).
    pub fn parse(name: &str) -> Option<Category> {
        match name.to_lowercase().replace('-', "_").as_str() {
            "relationship" => Some(Category::Relationship),
            "counting" => Some(Category::Counting),
            "filtering" => Some(Category::Filtering),
            "topic" => Some(Category::Topic),
            "semantic" => Some(Category::Semantic),
            "multi_hop" | "multihop" => Some(Category::MultiHop),
            "temporal" => Some(Category::Temporal),
            "comparison" => Some(Category::Comparison),
            _ => None,
        }
    }
}

/// A single evaluation question, tagged with its category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// The natural-language question text.
    pub text: String,
    /// The category this question belongs to.
    pub category: Category,
}

impl Question {
    fn new(text: &str, category: Category) -> Self {
        Self {
            text: text.to_string(),
            category,
        }
    }
}

const RELATIONSHIP_QUESTIONS: &[&str] = &[
    "Who are the collaborators of Emily Chen?",
    "Which researchers have co-authored papers with David Johnson?",
    "Find all researchers who have worked with Sarah Lee",
    "Who has Michael Brown collaborated with?",
    "Which authors have published together on AI Ethics?",
];

const COUNTING_QUESTIONS: &[&str] = &[
    "How many articles has each researcher published?",
    "Which researcher has published the most papers?",
    "How many papers are there on each topic?",
    "Count the number of articles in AI Ethics",
    "Which topic has the most publications?",
    "How many researchers work on Foundations of Language Models?",
    "What is the total number of publications in 2023?",
];

const FILTERING_QUESTIONS: &[&str] = &[
    "Show me all articles published by Emily Chen",
    "What papers did Lisa Wang publish in 2024?",
    "Find articles about Model Optimization",
    "Which papers were published after January 2024?",
    "List all researchers working on Safety subtopic",
    "Show me articles on AI Ethics published in 2023",
];

const TOPIC_QUESTIONS: &[&str] = &[
    "What topics does Emily Chen research?",
    "Which researchers work on AI Ethics?",
    "What are the main research areas in the dataset?",
    "Who works on Model Architectures?",
    "Find all researchers interested in Social Impact",
    "What subtopics are covered under Foundations of Language Models?",
];

const SEMANTIC_QUESTIONS: &[&str] = &[
    "What are the main challenges in AI safety according to the research?",
    "Explain the innovations in transformer architectures",
    "What are the ethical concerns about AI development?",
    "Summarize the research on language model optimization",
    "What approaches are proposed for privacy in AI?",
    "How is AI being used to address climate change?",
    "What are the key insights about scaling laws in language models?",
];

const MULTI_HOP_QUESTIONS: &[&str] = &[
    "Which researchers work on the same topics as Emily Chen?",
    "Find researchers who collaborate with colleagues of David Johnson",
    "What topics connect Michael Brown and Sarah Lee?",
    "Which researchers published in both 2023 and 2024?",
    "Find articles that bridge multiple subtopics",
    "Who are the most connected researchers in the collaboration network?",
];

const TEMPORAL_QUESTIONS: &[&str] = &[
    "What research was published in the last quarter of 2023?",
    "Which topics were most popular in 2024?",
    "Show the research timeline for Emily Chen",
    "What was the first paper published on AI Ethics?",
    "Compare publication activity between 2023 and 2024",
];

const COMPARISON_QUESTIONS: &[&str] = &[
    "Compare the research focus of Emily Chen vs Michael Brown",
    "Which topic has more researchers: AI Ethics or Language Models?",
    "Who is more prolific: David Johnson or Sarah Lee?",
    "Compare collaboration patterns between different research areas",
];

/// Quick benchmark: one representative question per capability, ten total.
const QUICK_QUESTIONS: &[(&str, Category)] = &[
    ("Who are the collaborators of Emily Chen?", Category::Relationship),
    ("How many articles has each researcher published?", Category::Counting),
    ("Show me all articles published by David Johnson", Category::Filtering),
    ("Which researchers work on AI Ethics?", Category::Topic),
    ("What are the main challenges in AI safety?", Category::Semantic),
    ("Which researchers work on the same topics as Emily Chen?", Category::MultiHop),
    ("What research was published in 2024?", Category::Temporal),
    ("Compare the research focus of Emily Chen vs Michael Brown", Category::Comparison),
    ("Which topic has the most publications?", Category::Counting),
    ("Explain the innovations in transformer architectures", Category::Semantic),
];

/// Strength/weakness diagnostic: four KG strengths, four RAG strengths,
/// four edge cases where both methods tend to struggle.
const DIAGNOSTIC_QUESTIONS: &[(&str, Category)] = &[
    // KG strengths
    ("Who collaborated with whom on Model Optimization papers?", Category::Relationship),
    ("How many co-authors does each researcher have?", Category::Counting),
    ("Find all papers published between June and December 2023", Category::Filtering),
    ("Which researchers published exactly 2 papers?", Category::Counting),
    // RAG strengths
    ("What are the key innovations proposed for transformer architectures?", Category::Semantic),
    ("Summarize the ethical concerns discussed in AI research", Category::Semantic),
    ("Explain the privacy-preserving techniques mentioned in the papers", Category::Semantic),
    ("What solutions are proposed for AI bias mitigation?", Category::Semantic),
    // Edge cases
    ("What is the citation impact of each paper?", Category::Counting),
    ("Compare the technical depth of papers on Safety", Category::Comparison),
    ("Predict future research directions based on current trends", Category::Semantic),
    ("Which paper had the most innovative methodology?", Category::Comparison),
];

/// The fixed curated-set identifiers.
pub const SET_NAMES: [&str; 3] = ["quick", "medium", "diagnostic"];

fn raw_questions(category: Category) -> &'static [&'static str] {
    match category {
        Category::Relationship => RELATIONSHIP_QUESTIONS,
        Category::Counting => COUNTING_QUESTIONS,
        Category::Filtering => FILTERING_QUESTIONS,
        Category::Topic => TOPIC_QUESTIONS,
        Category::Semantic => SEMANTIC_QUESTIONS,
        Category::MultiHop => MULTI_HOP_QUESTIONS,
        Category::Temporal => TEMPORAL_QUESTIONS,
        Category::Comparison => COMPARISON_QUESTIONS,
    }
}

/// All questions in a category, in catalog order.
pub fn questions_in(category: Category) -> Vec<Question> {
    raw_questions(category)
        .iter()
        .map(|text| Question::new(text, category))
        .collect()
}

/// The full catalog: every category with its questions, in catalog order.
pub fn all_categories() -> Vec<(Category, Vec<Question>)> {
    Category::ALL
        .iter()
        .map(|&c| (c, questions_in(c)))
        .collect()
}

/// Resolve a named curated set.
///
/// - `quick`: fixed 10-question benchmark spanning every capability.
/// - `medium`: the entire relationship category, then the first 3 questions
///   of counting, topic, semantic, multi-hop, and temporal.
/// - `diagnostic`: fixed strength/weakness probe set.
pub fn curated_set(name: &str) -> Result<Vec<Question>> {
    match name.to_lowercase().as_str() {
        "quick" => Ok(tagged_questions(QUICK_QUESTIONS)),
        "medium" => Ok(medium_set()),
        "diagnostic" => Ok(tagged_questions(DIAGNOSTIC_QUESTIONS)),
        other => Err(BenchError::UnknownSet(other.to_string())),
    }
}

fn tagged_questions(pairs: &[(&str, Category)]) -> Vec<Question> {
    pairs
        .iter()
        .map(|(text, category)| Question::new(text, *category))
        .collect()
}

fn medium_set() -> Vec<Question> {
    let mut questions = questions_in(Category::Relationship);
    for category in [
        Category::Counting,
        Category::Topic,
        Category::Semantic,
        Category::MultiHop,
        Category::Temporal,
    ] {
        questions.extend(questions_in(category).into_iter().take(3));
    }
    questions
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_categories_nonempty() {
        let catalog = all_categories();
        assert_eq!(catalog.len(), Category::ALL.len());
        for (category, questions) in &catalog {
            assert!(!questions.is_empty(), "{:?} has no questions", category);
            for q in questions {
                assert_eq!(q.category, *category);
                assert!(!q.text.is_empty());
            }
        }
    }

    #[test]
    fn test_quick_set_length() {
        let quick = curated_set("quick").unwrap();
        assert_eq!(quick.len(), QUICK_QUESTIONS.len());
        assert_eq!(quick.len(), 10);
    }

    #[test]
    fn test_medium_set_follows_recipe() {
        let medium = curated_set("medium").unwrap();

        // Length derived from the recipe, not a hardcoded constant.
        let expected_len = questions_in(Category::Relationship).len() + 3 * 5;
        assert_eq!(medium.len(), expected_len);

        // Entire relationship category comes first, in order.
        let relationship = questions_in(Category::Relationship);
        assert_eq!(&medium[..relationship.len()], &relationship[..]);

        // Then the first 3 of each remaining recipe category.
        let mut offset = relationship.len();
        for category in [
            Category::Counting,
            Category::Topic,
            Category::Semantic,
            Category::MultiHop,
            Category::Temporal,
        ] {
            let slice = &medium[offset..offset + 3];
            let expected: Vec<_> = questions_in(category).into_iter().take(3).collect();
            assert_eq!(slice, &expected[..]);
            offset += 3;
        }
    }

    #[test]
    fn test_medium_set_reproducible() {
        assert_eq!(curated_set("medium").unwrap(), curated_set("medium").unwrap());
    }

    #[test]
    fn test_diagnostic_set() {
        let diagnostic = curated_set("diagnostic").unwrap();
        assert_eq!(diagnostic.len(), DIAGNOSTIC_QUESTIONS.len());
        assert!(diagnostic.iter().all(|q| !q.text.is_empty()));
    }

    #[test]
    fn test_unknown_set() {
        let err = curated_set("does-not-exist").unwrap_err();
        assert!(matches!(err, BenchError::UnknownSet(_)));
    }

    #[test]
    fn test_set_names_resolve() {
        for name in SET_NAMES {
            assert!(curated_set(name).is_ok());
        }
    }

    #[test]
    fn test_category_parse() {
        assert_eq!(Category::parse("multi-hop"), Some(Category::MultiHop));
        assert_eq!(Category::parse("SEMANTIC"), Some(Category::Semantic));
        assert_eq!(Category::parse("nope"), None);
    }
}
