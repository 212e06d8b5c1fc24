use serde::{Deserialize, Serialize};

/// What an uploaded document looks like, judged from its name, type and bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DocumentKind {
    Json,
    Text,
    Pdf,
    Unknown,
}

/// An uploaded planning document.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub filename: Option<String>,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl Document {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            filename: None,
            content_type: None,
            bytes: bytes.into(),
        }
    }

    /// Inline text content, as sent in a JSON request body.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self::new(text.into().into_bytes())
    }

    pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = Some(filename.into());
        self
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.iter().all(|b| b.is_ascii_whitespace())
    }

    /// Sniff the kind: magic bytes, then extension, then content type, then content.
    pub fn kind(&self) -> DocumentKind {
        if self.bytes.starts_with(b"%PDF") {
            return DocumentKind::Pdf;
        }

        if let Some(ext) = self.extension() {
            match ext.as_str() {
                "json" => return DocumentKind::Json,
                "pdf" => return DocumentKind::Pdf,
                "txt" | "text" | "md" => return self.sniff_text(),
                _ => {}
            }
        }

        if let Some(ct) = self.content_type.as_deref() {
            let ct = ct.to_ascii_lowercase();
            if ct.starts_with("application/json") {
                return DocumentKind::Json;
            }
            if ct.starts_with("application/pdf") {
                return DocumentKind::Pdf;
            }
            if ct.starts_with("text/") {
                return self.sniff_text();
            }
        }

        match std::str::from_utf8(&self.bytes) {
            Ok(_) => self.sniff_text(),
            Err(_) => DocumentKind::Unknown,
        }
    }

    /// Text that opens with `{` is planning JSON, whatever the label says.
    fn sniff_text(&self) -> DocumentKind {
        let first = self.bytes.iter().find(|b| !b.is_ascii_whitespace());
        if first == Some(&b'{') {
            DocumentKind::Json
        } else {
            DocumentKind::Text
        }
    }

    fn extension(&self) -> Option<String> {
        let name = self.filename.as_deref()?;
        let (_, ext) = name.rsplit_once('.')?;
        Some(ext.to_ascii_lowercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pdf_magic_wins_over_extension() {
        let doc = Document::new(b"%PDF-1.7\n...".to_vec()).with_filename("plan.txt");
        assert_eq!(doc.kind(), DocumentKind::Pdf);
    }

    #[test]
    fn test_json_body_under_text_label() {
        let json = r#"  {"assignments": []}"#;
        assert_eq!(Document::from_text(json).with_filename("plan.txt").kind(), DocumentKind::Json);
        assert_eq!(
            Document::from_text(json).with_content_type("text/plain").kind(),
            DocumentKind::Json
        );
        assert_eq!(
            Document::from_text("MODULES\nCS-301 | DS | high | 4").with_filename("plan.txt").kind(),
            DocumentKind::Text
        );
    }

    #[test]
    fn test_extension_then_content_type() {
        assert_eq!(Document::from_text("x").with_filename("Plan.JSON").kind(), DocumentKind::Json);
        assert_eq!(
            Document::from_text("x").with_content_type("text/plain; charset=utf-8").kind(),
            DocumentKind::Text
        );
        assert_eq!(
            Document::from_text("x").with_content_type("application/pdf").kind(),
            DocumentKind::Pdf
        );
    }

    #[test]
    fn test_content_sniffing() {
        assert_eq!(Document::from_text("  {\"modules\": []}").kind(), DocumentKind::Json);
        assert_eq!(Document::from_text("ASSIGNMENTS\n").kind(), DocumentKind::Text);
        assert_eq!(Document::new(vec![0xff, 0xfe, 0x00]).kind(), DocumentKind::Unknown);
    }

    #[test]
    fn test_whitespace_only_is_empty() {
        assert!(Document::from_text(" \n\t").is_empty());
        assert!(!Document::from_text("MODULES").is_empty());
    }
}
