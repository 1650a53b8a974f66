//! Prompts for the judging model.

/// Collection of prompts used for comparative judgment.
pub struct Prompts;

impl Prompts {
    /// System prompt for the judge.
    pub fn system_judge() -> &'static str {
        "You are an expert AI judge evaluating different question-answering systems. Be objective, thorough, and fair in your evaluations."
    }

    /// Prompt template comparing the RAG answer against the Knowledge Graph
    /// answer for one question.
    ///
    /// Placeholders: {question}, {rag_answer}, {rag_source_count},
    /// {rag_time}, {kg_query}, {kg_answer}, {kg_result_count}, {kg_time}.
    pub fn judgment() -> &'static str {
        r#"You are an expert judge evaluating two AI systems answering the same question.

Question: "{question}"

SYSTEM A (RAG - Retrieval-Augmented Generation):
Answer: {rag_answer}
Method: Retrieved {rag_source_count} relevant documents and generated answer using LLM
Time: {rag_time}s

SYSTEM B (Knowledge Graph with Text-to-Cypher):
Cypher Query: {kg_query}
Answer: {kg_answer}
Method: Generated structured database query and retrieved {kg_result_count} exact results
Time: {kg_time}s

Evaluation Criteria:
1. **Accuracy**: Which answer is more factually correct?
2. **Completeness**: Which answer provides more complete information?
3. **Precision**: Which answer is more specific and exact?
4. **Verifiability**: Which answer can be verified/proven?
5. **Usefulness**: Which answer better serves the user's intent?

Provide your evaluation in the following JSON format:
{
    "winner": "A" or "B" or "TIE",
    "confidence": "high" or "medium" or "low",
    "accuracy_score_a": 1-10,
    "accuracy_score_b": 1-10,
    "completeness_score_a": 1-10,
    "completeness_score_b": 1-10,
    "precision_score_a": 1-10,
    "precision_score_b": 1-10,
    "reasoning": "Detailed explanation of your judgment",
    "strengths_a": ["strength 1", "strength 2"],
    "strengths_b": ["strength 1", "strength 2"],
    "weaknesses_a": ["weakness 1", "weakness 2"],
    "weaknesses_b": ["weakness 1", "weakness 2"],
    "recommendation": "When to use each method for this type of question"
}

Be objective and thorough in your analysis. Respond with only the JSON, no other text."#
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_judgment_prompt_placeholders() {
        let prompt = Prompts::judgment();
        for placeholder in [
            "{question}",
            "{rag_answer}",
            "{rag_source_count}",
            "{rag_time}",
            "{kg_query}",
            "{kg_answer}",
            "{kg_result_count}",
            "{kg_time}",
        ] {
            assert!(prompt.contains(placeholder), "missing {}", placeholder);
        }
    }

    #[test]
    fn test_judgment_prompt_names_all_criteria() {
        let prompt = Prompts::judgment();
        for criterion in [
            "Accuracy",
            "Completeness",
            "Precision",
            "Verifiability",
            "Usefulness",
        ] {
            assert!(prompt.contains(criterion), "missing {}", criterion);
        }
    }
}
