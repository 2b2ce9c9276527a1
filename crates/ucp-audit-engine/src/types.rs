//! Request types for an audit run

use ucp_audit_domain::{Document, DocumentKind};

/// The documents for one audit
#[derive(Debug, Clone)]
pub struct AuditRequest {
    /// Letter of Credit
    pub letter_of_credit: Document,

    /// Commercial invoice
    pub invoice: Document,

    /// Bill of Lading
    pub bill_of_lading: Document,

    /// Optional UCP 600 rulebook
    pub reference: Option<Document>,
}

impl AuditRequest {
    /// Request for the three required documents, without a reference
    pub fn new(letter_of_credit: Document, invoice: Document, bill_of_lading: Document) -> Self {
        Self {
            letter_of_credit,
            invoice,
            bill_of_lading,
            reference: None,
        }
    }

    /// Attach (or clear) the reference rulebook
    pub fn with_reference(mut self, reference: Option<Document>) -> Self {
        self.reference = reference;
        self
    }

    /// Documents in extraction order: LC, Invoice, BL, then the reference
    pub fn documents(&self) -> impl Iterator<Item = &Document> {
        [&self.letter_of_credit, &self.invoice, &self.bill_of_lading]
            .into_iter()
            .chain(self.reference.as_ref())
    }

    /// Check each document sits in the slot matching its kind
    pub fn validate(&self) -> Result<(), String> {
        let slots = [
            (&self.letter_of_credit, DocumentKind::LetterOfCredit),
            (&self.invoice, DocumentKind::Invoice),
            (&self.bill_of_lading, DocumentKind::BillOfLading),
        ];
        for (doc, expected) in slots {
            if doc.kind() != expected {
                return Err(format!(
                    "'{}' is a {} but was supplied as the {}",
                    doc.name(),
                    doc.kind(),
                    expected
                ));
            }
        }
        if let Some(reference) = &self.reference {
            if reference.kind() != DocumentKind::Reference {
                return Err(format!(
                    "'{}' was supplied as the reference but is a {}",
                    reference.name(),
                    reference.kind()
                ));
            }
        }
        Ok(())
    }
}

/// Extracted text of every document in a request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentTexts {
    /// Letter of Credit text
    pub letter_of_credit: String,
    /// Invoice text
    pub invoice: String,
    /// Bill of Lading text
    pub bill_of_lading: String,
    /// Reference rulebook text
    pub reference: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(kind: DocumentKind, name: &str) -> Document {
        Document::new(kind, name, Vec::new())
    }

    #[test]
    fn test_documents_order() {
        let request = AuditRequest::new(
            doc(DocumentKind::LetterOfCredit, "lc.pdf"),
            doc(DocumentKind::Invoice, "inv.pdf"),
            doc(DocumentKind::BillOfLading, "bl.pdf"),
        )
        .with_reference(Some(doc(DocumentKind::Reference, "ucp600.pdf")));

        let names: Vec<_> = request.documents().map(|d| d.name()).collect();
        assert_eq!(names, vec!["lc.pdf", "inv.pdf", "bl.pdf", "ucp600.pdf"]);
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_swapped_documents_rejected() {
        let request = AuditRequest::new(
            doc(DocumentKind::Invoice, "inv.pdf"),
            doc(DocumentKind::LetterOfCredit, "lc.pdf"),
            doc(DocumentKind::BillOfLading, "bl.pdf"),
        );
        assert!(request.validate().is_err());
    }
}
