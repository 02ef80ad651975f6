use crate::catalog::display_name_from_id;

const DEFAULT_SUBJECT: &str = "mobile phones";

/// Grounded-answer prompt: the model is told to answer only from `context`
/// and to say when the answer is not there.
pub fn build_answer_prompt(question: &str, product_filter: Option<&str>, context: &str) -> String {
    let subject = product_filter
        .map(str::trim)
        .filter(|filter| !filter.is_empty())
        .map(display_name_from_id)
        .unwrap_or_else(|| DEFAULT_SUBJECT.to_string());

    format!(
        "Answer the following question about {subject}.\n\
         Only use the information provided in the context below.\n\
         If the specific information is not available in the context, say so.\n\
         \n\
         Question: {question}\n\
         \n\
         Context:\n\
         {context}"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_the_selected_product() {
        let prompt = build_answer_prompt("How much RAM?", Some("apple-iphone-16-128gb"), "RAM: 8GB");
        assert!(prompt.starts_with("Answer the following question about Apple Iphone 16 128Gb."));
        assert!(prompt.contains("Question: How much RAM?"));
        assert!(prompt.ends_with("Context:\nRAM: 8GB"));
    }

    #[test]
    fn falls_back_to_generic_subject() {
        let prompt = build_answer_prompt("Cheapest phone?", None, "");
        assert!(prompt.starts_with("Answer the following question about mobile phones."));
    }
}
