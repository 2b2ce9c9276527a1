//! Core Auditor implementation

use crate::config::AuditConfig;
use crate::error::AuditError;
use crate::parser::parse_model_response;
use crate::prompt::PromptBuilder;
use crate::types::{AuditRequest, DocumentTexts};
use std::fmt::Display;
use std::sync::Arc;
use tracing::{debug, info, warn};
use ucp_audit_domain::traits::{LlmProvider, TextExtractor};
use ucp_audit_domain::{AuditId, AuditReport, Document};

/// Runs one document set through extraction, prompting, the model and parsing
///
/// The stages run strictly in order; the first failure ends the run and no
/// partial report is produced.
pub struct Auditor<L, X>
where
    L: LlmProvider,
    X: TextExtractor,
{
    llm_provider: Arc<L>,
    extractor: X,
    config: AuditConfig,
}

impl<L, X> Auditor<L, X>
where
    L: LlmProvider + Send + Sync + 'static,
    L::Error: Display,
    X: TextExtractor,
    X::Error: Display,
{
    /// Create a new Auditor
    pub fn new(llm_provider: L, extractor: X, config: AuditConfig) -> Self {
        Self {
            llm_provider: Arc::new(llm_provider),
            extractor,
            config,
        }
    }

    /// Configuration in use
    pub fn config(&self) -> &AuditConfig {
        &self.config
    }

    /// Audit one document set
    pub async fn audit(&self, request: AuditRequest) -> Result<AuditReport, AuditError> {
        self.config.validate().map_err(AuditError::Config)?;
        request.validate().map_err(AuditError::Config)?;

        let id = AuditId::new();
        info!(
            "Audit {} started with model '{}' (reference: {})",
            id,
            self.config.model,
            request.reference.is_some()
        );

        let texts = self.extract_texts(&request)?;
        let prompt = self.build_prompt(&texts);
        debug!("Audit {} prompt length: {} chars", id, prompt.len());

        let raw = self.invoke_model(&prompt).await?;
        debug!("Audit {} response length: {} chars", id, raw.len());

        let records = parse_model_response(&raw)?;
        let report = AuditReport::new(id, self.config.model.clone(), records, raw);

        info!(
            "Audit {} finished: {} checks, {} discrepancies",
            id,
            report.total_checks(),
            report.discrepancy_count()
        );
        Ok(report)
    }

    /// Extract the text of every document in the request
    pub fn extract_texts(&self, request: &AuditRequest) -> Result<DocumentTexts, AuditError> {
        let letter_of_credit = self.extract(&request.letter_of_credit)?;
        let invoice = self.extract(&request.invoice)?;
        let bill_of_lading = self.extract(&request.bill_of_lading)?;
        let reference = match &request.reference {
            Some(doc) => Some(self.extract(doc)?),
            None => None,
        };

        Ok(DocumentTexts {
            letter_of_credit,
            invoice,
            bill_of_lading,
            reference,
        })
    }

    /// Build the audit prompt from extracted texts
    pub fn build_prompt(&self, texts: &DocumentTexts) -> String {
        PromptBuilder::new(
            texts.letter_of_credit.as_str(),
            texts.invoice.as_str(),
            texts.bill_of_lading.as_str(),
        )
        .with_reference(texts.reference.clone())
        .build()
    }

    /// Send the prompt to the configured model and return its raw response
    pub async fn invoke_model(&self, prompt: &str) -> Result<String, AuditError> {
        let llm = Arc::clone(&self.llm_provider);
        let model = self.config.model.clone();
        let prompt = prompt.to_string();

        // LlmProvider is blocking
        tokio::task::spawn_blocking(move || {
            llm.generate_json(&model, &prompt).map_err(|e| {
                warn!("Model call failed: {}", e);
                AuditError::Provider(e.to_string())
            })
        })
        .await
        .map_err(|e| AuditError::Provider(format!("Task join error: {}", e)))?
    }

    fn extract(&self, doc: &Document) -> Result<String, AuditError> {
        let text = doc
            .text_with(&self.extractor)
            .map_err(|e| AuditError::Format {
                document: doc.kind(),
                message: e.to_string(),
            })?;

        if text.trim().is_empty() {
            warn!("No extractable text in {} '{}'", doc.kind(), doc.name());
        } else {
            debug!("Extracted {} chars from {} '{}'", text.len(), doc.kind(), doc.name());
        }

        Ok(self.truncate(doc, text))
    }

    fn truncate(&self, doc: &Document, text: &str) -> String {
        match self.config.max_document_chars {
            Some(limit) => match text.char_indices().nth(limit) {
                Some((cut, _)) => {
                    warn!(
                        "Truncating {} '{}' to {} characters",
                        doc.kind(),
                        doc.name(),
                        limit
                    );
                    text[..cut].to_string()
                }
                None => text.to_string(),
            },
            None => text.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ucp_audit_domain::DocumentKind;
    use ucp_audit_llm::MockProvider;

    struct Utf8Extractor;

    impl TextExtractor for Utf8Extractor {
        type Error = std::str::Utf8Error;

        fn extract_text(&self, bytes: &[u8]) -> Result<String, Self::Error> {
            std::str::from_utf8(bytes).map(str::to_string)
        }
    }

    fn create_test_auditor(config: AuditConfig) -> Auditor<MockProvider, Utf8Extractor> {
        Auditor::new(MockProvider::new("[]"), Utf8Extractor, config)
    }

    fn request(lc: &str) -> AuditRequest {
        AuditRequest::new(
            Document::new(DocumentKind::LetterOfCredit, "lc.pdf", lc.as_bytes().to_vec()),
            Document::new(DocumentKind::Invoice, "inv.pdf", b"invoice".to_vec()),
            Document::new(DocumentKind::BillOfLading, "bl.pdf", b"bill".to_vec()),
        )
    }

    #[test]
    fn test_extract_texts() {
        let auditor = create_test_auditor(AuditConfig::default());
        let texts = auditor.extract_texts(&request("credit")).unwrap();
        assert_eq!(texts.letter_of_credit, "credit");
        assert_eq!(texts.invoice, "invoice");
        assert_eq!(texts.bill_of_lading, "bill");
        assert!(texts.reference.is_none());
    }

    #[test]
    fn test_truncation_counts_chars() {
        let mut config = AuditConfig::default();
        config.max_document_chars = Some(3);
        let auditor = create_test_auditor(config);

        let texts = auditor.extract_texts(&request("Zürich port")).unwrap();
        assert_eq!(texts.letter_of_credit, "Zür");
        assert_eq!(texts.invoice, "inv");
    }

    #[test]
    fn test_text_under_limit_untouched() {
        let mut config = AuditConfig::default();
        config.max_document_chars = Some(100);
        let auditor = create_test_auditor(config);

        let texts = auditor.extract_texts(&request("credit")).unwrap();
        assert_eq!(texts.letter_of_credit, "credit");
    }

    #[test]
    fn test_invalid_bytes_name_document() {
        let auditor = create_test_auditor(AuditConfig::default());
        let mut req = request("credit");
        req.bill_of_lading = Document::new(DocumentKind::BillOfLading, "bl.pdf", vec![0xff, 0xfe]);

        match auditor.extract_texts(&req) {
            Err(AuditError::Format { document, .. }) => {
                assert_eq!(document, DocumentKind::BillOfLading)
            }
            other => panic!("Expected Format error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_invoke_model_uses_configured_model() {
        let llm = MockProvider::new("[]");
        let auditor = Auditor::new(
            llm.clone(),
            Utf8Extractor,
            AuditConfig::with_model("gemini-2.5-pro"),
        );

        let raw = auditor.invoke_model("prompt").await.unwrap();
        assert_eq!(raw, "[]");

        let call = llm.last_call().unwrap();
        assert_eq!(call.model, "gemini-2.5-pro");
        assert_eq!(call.prompt, "prompt");
        assert!(call.json);
    }
}
