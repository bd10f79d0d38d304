//! Bounded context assembly from source documents.

use crate::source::SourceDocument;

/// One source's contribution to the assembled context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextBlock {
    /// Source URL the block is attributed to.
    pub url: String,
    /// Document text, truncated to the per-document cap.
    pub text: String,
}

impl ContextBlock {
    fn rendered_len(&self) -> usize {
        // "[url]\n" + text + "\n\n" separator
        self.url.chars().count() + self.text.chars().count() + 5
    }
}

/// Ordered, size-bounded context handed to the answer synthesizer.
///
/// Invariants: block order equals search ranking order, and the rendered
/// size never exceeds the global cap it was assembled with.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssembledContext {
    blocks: Vec<ContextBlock>,
}

impl AssembledContext {
    /// Assemble documents into a bounded context.
    ///
    /// Deterministic: input order (= ranking order) is preserved. Empty
    /// documents are skipped. Each document's text is truncated to
    /// `per_doc_cap` characters before concatenation; if the rendered whole
    /// still exceeds `global_cap` characters, lowest-ranked blocks are
    /// dropped from the tail until it fits. Never fails: empty input yields
    /// an empty context.
    pub fn assemble(
        documents: &[SourceDocument],
        per_doc_cap: usize,
        global_cap: usize,
    ) -> Self {
        let mut blocks: Vec<ContextBlock> = documents
            .iter()
            .filter(|doc| !doc.is_empty())
            .map(|doc| ContextBlock {
                url: doc.url.clone(),
                text: truncate_chars(doc.text.trim(), per_doc_cap),
            })
            .collect();

        let mut total: usize = blocks.iter().map(ContextBlock::rendered_len).sum();
        while total > global_cap {
            match blocks.pop() {
                Some(dropped) => total -= dropped.rendered_len(),
                None => break,
            }
        }

        Self { blocks }
    }

    /// Whether any usable content survived assembly.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Number of blocks in the context.
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// The blocks, in ranking order.
    pub fn blocks(&self) -> &[ContextBlock] {
        &self.blocks
    }

    /// Render the context as a single text block, each chunk prefixed by
    /// its source URL.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for block in &self.blocks {
            out.push('[');
            out.push_str(&block.url);
            out.push_str("]\n");
            out.push_str(&block.text);
            out.push_str("\n\n");
        }
        out
    }

    /// Rendered size in characters.
    pub fn rendered_len(&self) -> usize {
        self.blocks.iter().map(ContextBlock::rendered_len).sum()
    }
}

/// Truncate to at most `cap` characters, respecting UTF-8 boundaries.
fn truncate_chars(s: &str, cap: usize) -> String {
    match s.char_indices().nth(cap) {
        Some((idx, _)) => s[..idx].to_string(),
        None => s.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{Origin, SourceDocument};
    use proptest::prelude::*;

    fn doc(url: &str, text: &str) -> SourceDocument {
        SourceDocument {
            title: url.to_string(),
            url: url.to_string(),
            text: text.to_string(),
            origin: Origin::Extracted,
        }
    }

    #[test]
    fn test_order_preserved() {
        let docs = vec![
            doc("https://a.example.com", "alpha"),
            doc("https://b.example.com", "bravo"),
            doc("https://c.example.com", "charlie"),
        ];
        let ctx = AssembledContext::assemble(&docs, 100, 10_000);
        let urls: Vec<&str> = ctx.blocks().iter().map(|b| b.url.as_str()).collect();
        assert_eq!(
            urls,
            vec![
                "https://a.example.com",
                "https://b.example.com",
                "https://c.example.com"
            ]
        );
    }

    #[test]
    fn test_per_document_cap() {
        let docs = vec![doc("https://a.example.com", &"x".repeat(500))];
        let ctx = AssembledContext::assemble(&docs, 100, 10_000);
        assert_eq!(ctx.blocks()[0].text.chars().count(), 100);
    }

    #[test]
    fn test_lowest_ranked_dropped_first() {
        let docs = vec![
            doc("https://a.example.com", &"a".repeat(200)),
            doc("https://b.example.com", &"b".repeat(200)),
            doc("https://c.example.com", &"c".repeat(200)),
        ];
        // Room for roughly two blocks.
        let ctx = AssembledContext::assemble(&docs, 1000, 500);
        assert_eq!(ctx.len(), 2);
        assert_eq!(ctx.blocks()[0].url, "https://a.example.com");
        assert_eq!(ctx.blocks()[1].url, "https://b.example.com");
    }

    #[test]
    fn test_empty_documents_skipped() {
        let docs = vec![
            doc("https://a.example.com", "   "),
            doc("https://b.example.com", ""),
        ];
        let ctx = AssembledContext::assemble(&docs, 100, 1000);
        assert!(ctx.is_empty());
    }

    #[test]
    fn test_empty_input_yields_empty_context() {
        let ctx = AssembledContext::assemble(&[], 100, 1000);
        assert!(ctx.is_empty());
        assert_eq!(ctx.render(), "");
    }

    #[test]
    fn test_render_prefixes_urls() {
        let docs = vec![doc("https://a.example.com", "body text")];
        let ctx = AssembledContext::assemble(&docs, 100, 1000);
        assert!(ctx.render().starts_with("[https://a.example.com]\nbody text"));
    }

    #[test]
    fn test_truncation_respects_utf8_boundaries() {
        let docs = vec![doc("https://a.example.com", "héllo wörld ünïcode")];
        let ctx = AssembledContext::assemble(&docs, 7, 1000);
        assert_eq!(ctx.blocks()[0].text, "héllo w");
    }

    proptest! {
        #[test]
        fn prop_rendered_size_never_exceeds_global_cap(
            texts in prop::collection::vec(".{0,400}", 0..20),
            per_doc_cap in 1usize..300,
            global_cap in 1usize..2000,
        ) {
            let docs: Vec<SourceDocument> = texts
                .iter()
                .enumerate()
                .map(|(i, t)| doc(&format!("https://s{i}.example.com"), t))
                .collect();
            let ctx = AssembledContext::assemble(&docs, per_doc_cap, global_cap);
            prop_assert!(ctx.rendered_len() <= global_cap);
            prop_assert!(ctx.render().chars().count() <= global_cap);
        }
    }
}
