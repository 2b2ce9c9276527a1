//! Prompt construction for the document comparison

use ucp_audit_domain::{DocumentKind, NOTHING_TO_COMPARE};

/// Builds the audit prompt sent to the model
///
/// Each document's text is embedded verbatim under its section label.
/// The reference rulebook is optional; without it the prompt never
/// mentions `NOT_COMPARABLE`.
#[derive(Debug, Clone)]
pub struct PromptBuilder {
    letter_of_credit: String,
    invoice: String,
    bill_of_lading: String,
    reference: Option<String>,
}

impl PromptBuilder {
    /// Create a builder for the three required documents
    pub fn new(
        letter_of_credit: impl Into<String>,
        invoice: impl Into<String>,
        bill_of_lading: impl Into<String>,
    ) -> Self {
        Self {
            letter_of_credit: letter_of_credit.into(),
            invoice: invoice.into(),
            bill_of_lading: bill_of_lading.into(),
            reference: None,
        }
    }

    /// Attach the UCP 600 rulebook text
    pub fn with_reference(mut self, reference: Option<String>) -> Self {
        self.reference = reference;
        self
    }

    /// Build the complete audit prompt
    pub fn build(&self) -> String {
        let mut prompt = String::new();

        prompt.push_str(AUDIT_INSTRUCTIONS);
        prompt.push_str("\n\n");

        push_section(&mut prompt, DocumentKind::LetterOfCredit, &self.letter_of_credit);
        push_section(&mut prompt, DocumentKind::Invoice, &self.invoice);
        push_section(&mut prompt, DocumentKind::BillOfLading, &self.bill_of_lading);

        if let Some(reference) = &self.reference {
            push_section(&mut prompt, DocumentKind::Reference, reference);
        }

        prompt.push_str(AUDIT_TASK);
        prompt.push_str("\n\n");

        if self.reference.is_some() {
            prompt.push_str(&reference_rules());
            prompt.push_str("\n\n");
        }

        prompt.push_str(&output_format(self.reference.is_some()));
        prompt
    }
}

fn push_section(prompt: &mut String, kind: DocumentKind, text: &str) {
    prompt.push_str(kind.label());
    prompt.push_str(":\n");
    prompt.push_str(text);
    prompt.push_str("\n\n");
}

fn reference_rules() -> String {
    format!(
        r#"Use the UCP 600 REFERENCE above to cite the article behind each finding.
Additional rules:
- Every field stated in the LC must produce a record, even when the Invoice and BL are silent on it. For such a field set "found_value" to "{}" and "status" to "NOT_COMPARABLE".
- Name each "field" exactly as the LC names it, word for word. Do not rename, merge or translate LC field names."#,
        NOTHING_TO_COMPARE
    )
}

fn output_format(with_reference: bool) -> String {
    let statuses = if with_reference {
        "MATCH or DISCREPANCY or NOT_COMPARABLE"
    } else {
        "MATCH or DISCREPANCY"
    };

    format!(
        r#"Return the result ONLY as a JSON array of objects with this structure:
[
  {{
    "category": "Identity/Logistics/Product",
    "field": "Field Name",
    "requirement": "What LC says",
    "found_value": "What Invoice/BL says",
    "status": "{}",
    "ucp_ref": "Article number and brief reason"
  }}
]

Remember: Return ONLY valid JSON, no markdown code blocks, no explanations."#,
        statuses
    )
}

const AUDIT_INSTRUCTIONS: &str = "Act as a Trade Finance Auditor. \
Compare the following documents based on UCP 600.";

const AUDIT_TASK: &str = "TASK: Identify discrepancies in Applicant Name, \
Beneficiary Name, Dates, Ports, Weights, and Descriptions.";

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn builder() -> PromptBuilder {
        PromptBuilder::new("LC text", "Invoice text", "BL text")
    }

    #[test]
    fn test_prompt_includes_labeled_sections() {
        let prompt = builder().build();
        assert!(prompt.contains("LC DATA:\nLC text\n"));
        assert!(prompt.contains("INVOICE DATA:\nInvoice text\n"));
        assert!(prompt.contains("BL DATA:\nBL text\n"));
        assert!(!prompt.contains("UCP 600 REFERENCE"));
    }

    #[test]
    fn test_prompt_sections_in_order() {
        let prompt = builder().build();
        let lc = prompt.find("LC DATA").unwrap();
        let invoice = prompt.find("INVOICE DATA").unwrap();
        let bl = prompt.find("BL DATA").unwrap();
        assert!(lc < invoice && invoice < bl);
    }

    #[test]
    fn test_prompt_includes_instructions() {
        let prompt = builder().build();
        assert!(prompt.contains("Trade Finance Auditor"));
        assert!(prompt.contains("UCP 600"));
        assert!(prompt.contains("Applicant Name"));
        for key in ["category", "field", "requirement", "found_value", "status", "ucp_ref"] {
            assert!(prompt.contains(&format!("\"{}\"", key)), "missing key {}", key);
        }
        assert!(prompt.contains("MATCH or DISCREPANCY"));
    }

    #[test]
    fn test_prompt_without_reference_omits_not_comparable() {
        let prompt = builder().build();
        assert!(!prompt.contains("NOT_COMPARABLE"));
        assert!(!prompt.contains(NOTHING_TO_COMPARE));
        assert!(!prompt.contains("word for word"));
    }

    #[test]
    fn test_prompt_with_reference_adds_rules() {
        let prompt = builder()
            .with_reference(Some("Article 14 text".to_string()))
            .build();
        assert!(prompt.contains("UCP 600 REFERENCE:\nArticle 14 text\n"));
        assert!(prompt.contains("NOT_COMPARABLE"));
        assert!(prompt.contains("\"nothing to compare of\""));
        assert!(prompt.contains("exactly as the LC names it"));
    }

    #[test]
    fn test_build_is_deterministic() {
        let builder = builder().with_reference(Some("rules".to_string()));
        assert_eq!(builder.build(), builder.build());
    }

    proptest! {
        #[test]
        fn prompt_contains_each_text_verbatim(
            lc in ".{0,200}",
            invoice in ".{0,200}",
            bl in ".{0,200}",
            reference in proptest::option::of(".{0,200}"),
        ) {
            let prompt = PromptBuilder::new(lc.clone(), invoice.clone(), bl.clone())
                .with_reference(reference.clone())
                .build();

            prop_assert!(prompt.contains(&lc));
            prop_assert!(prompt.contains(&invoice));
            prop_assert!(prompt.contains(&bl));
            if let Some(reference) = reference {
                prop_assert!(prompt.contains(&reference));
            }
        }
    }
}
