//! Documents submitted for audit

use crate::traits::TextExtractor;
use std::fmt;
use std::sync::OnceLock;

/// The role a document plays in an audit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentKind {
    /// Letter of Credit (MT700)
    LetterOfCredit,
    /// Commercial invoice
    Invoice,
    /// Bill of Lading
    BillOfLading,
    /// Optional UCP 600 reference rulebook
    Reference,
}

impl DocumentKind {
    /// Section label used when the text is embedded in a prompt
    pub fn label(&self) -> &'static str {
        match self {
            DocumentKind::LetterOfCredit => "LC DATA",
            DocumentKind::Invoice => "INVOICE DATA",
            DocumentKind::BillOfLading => "BL DATA",
            DocumentKind::Reference => "UCP 600 REFERENCE",
        }
    }

    /// Human-readable name
    pub fn display_name(&self) -> &'static str {
        match self {
            DocumentKind::LetterOfCredit => "Letter of Credit",
            DocumentKind::Invoice => "Invoice",
            DocumentKind::BillOfLading => "Bill of Lading",
            DocumentKind::Reference => "Reference",
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// A named document blob
///
/// The extracted text is derived from the bytes and computed at most once;
/// later calls to [`Document::text_with`] return the cached value.
#[derive(Debug, Clone)]
pub struct Document {
    kind: DocumentKind,
    name: String,
    bytes: Vec<u8>,
    text: OnceLock<String>,
}

impl Document {
    /// Create a document from raw bytes
    pub fn new(kind: DocumentKind, name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            kind,
            name: name.into(),
            bytes,
            text: OnceLock::new(),
        }
    }

    /// Document role
    pub fn kind(&self) -> DocumentKind {
        self.kind
    }

    /// File name or caller-supplied label
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Raw bytes
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Extracted text, if it has been computed
    pub fn text(&self) -> Option<&str> {
        self.text.get().map(String::as_str)
    }

    /// Extract the text with `extractor`, or return the cached text
    ///
    /// # Examples
    ///
    /// ```
    /// use ucp_audit_domain::{Document, DocumentKind};
    /// use ucp_audit_domain::traits::TextExtractor;
    ///
    /// struct Utf8;
    ///
    /// impl TextExtractor for Utf8 {
    ///     type Error = std::str::Utf8Error;
    ///
    ///     fn extract_text(&self, bytes: &[u8]) -> Result<String, Self::Error> {
    ///         std::str::from_utf8(bytes).map(str::to_string)
    ///     }
    /// }
    ///
    /// let doc = Document::new(DocumentKind::Invoice, "inv.pdf", b"Acme Co".to_vec());
    /// assert_eq!(doc.text_with(&Utf8).unwrap(), "Acme Co");
    /// assert_eq!(doc.text(), Some("Acme Co"));
    /// ```
    pub fn text_with<E: TextExtractor>(&self, extractor: &E) -> Result<&str, E::Error> {
        if let Some(text) = self.text.get() {
            return Ok(text);
        }
        let extracted = extractor.extract_text(&self.bytes)?;
        Ok(self.text.get_or_init(|| extracted))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    struct CountingExtractor {
        calls: Cell<usize>,
    }

    impl TextExtractor for CountingExtractor {
        type Error = String;

        fn extract_text(&self, bytes: &[u8]) -> Result<String, Self::Error> {
            self.calls.set(self.calls.get() + 1);
            String::from_utf8(bytes.to_vec()).map_err(|e| e.to_string())
        }
    }

    #[test]
    fn test_text_extracted_once() {
        let extractor = CountingExtractor { calls: Cell::new(0) };
        let doc = Document::new(DocumentKind::LetterOfCredit, "lc.pdf", b"32B: USD 10,000".to_vec());

        assert!(doc.text().is_none());
        assert_eq!(doc.text_with(&extractor).unwrap(), "32B: USD 10,000");
        assert_eq!(doc.text_with(&extractor).unwrap(), "32B: USD 10,000");
        assert_eq!(extractor.calls.get(), 1);
    }

    #[test]
    fn test_extraction_error_leaves_text_unset() {
        let extractor = CountingExtractor { calls: Cell::new(0) };
        let doc = Document::new(DocumentKind::Invoice, "bad.pdf", vec![0xff, 0xfe]);

        assert!(doc.text_with(&extractor).is_err());
        assert!(doc.text().is_none());
    }

    #[test]
    fn test_labels() {
        assert_eq!(DocumentKind::LetterOfCredit.label(), "LC DATA");
        assert_eq!(DocumentKind::Invoice.label(), "INVOICE DATA");
        assert_eq!(DocumentKind::BillOfLading.label(), "BL DATA");
        assert_eq!(DocumentKind::Reference.to_string(), "Reference");
    }
}
