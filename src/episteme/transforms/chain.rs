//! Chaining post-lexers
//!
//! [PostLexChain] composes independently written post-lexers into one. Data flows through the
//! stages in the order they were registered: the first stage sees the raw stream, the last one
//! feeds the parser.
//!
//! Composition is purely at the stream level. Each stage wraps the stream produced by the one
//! before it, so a chain of N stages is N nested iterators and nothing is buffered between
//! them.

use super::{PostLex, TokenStream};

/// An ordered sequence of post-lexers acting as a single post-lexer.
#[derive(Default)]
pub struct PostLexChain {
    stages: Vec<Box<dyn PostLex>>,
}

impl PostLexChain {
    /// Create an empty chain. An empty chain passes its input through unchanged.
    pub fn new() -> Self {
        Self { stages: Vec::new() }
    }

    /// Append a stage, builder style.
    pub fn with<P: PostLex + 'static>(mut self, stage: P) -> Self {
        self.add_stage(stage);
        self
    }

    /// Append a stage. It will see the output of every stage added before it.
    pub fn add_stage<P: PostLex + 'static>(&mut self, stage: P) {
        self.stages.push(Box::new(stage));
    }

    /// Number of stages registered in the chain.
    pub fn stage_count(&self) -> usize {
        self.stages.len()
    }
}

impl PostLex for PostLexChain {
    fn process<'a>(&'a mut self, stream: TokenStream<'a>) -> TokenStream<'a> {
        tracing::debug!(stages = self.stages.len(), "chaining post-lexers");
        // Each stage wraps the stream built so far: Tn(...T2(T1(stream)))
        self.stages
            .iter_mut()
            .fold(stream, |inner, stage| stage.process(inner))
    }
}

impl std::fmt::Debug for PostLexChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PostLexChain")
            .field("stages", &self.stages.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::episteme::testing::{kinds, mk_tokens, texts};
    use crate::episteme::token::{Token, TokenKind};
    use crate::episteme::transforms::{collect_tokens, stream_of};

    /// Appends a suffix to every token's text
    struct Suffix(&'static str);

    impl PostLex for Suffix {
        fn process<'a>(&'a mut self, stream: TokenStream<'a>) -> TokenStream<'a> {
            let suffix = self.0;
            Box::new(stream.map(move |item| {
                item.map(|token| {
                    let text = format!("{}{}", token.text, suffix);
                    Token::new(token.kind, text, token.span)
                })
            }))
        }
    }

    /// Inserts a marker token in front of the first token
    struct Marker;

    impl PostLex for Marker {
        fn process<'a>(&'a mut self, stream: TokenStream<'a>) -> TokenStream<'a> {
            let mut first = true;
            Box::new(stream.flat_map(move |item| {
                let mut out = Vec::new();
                if let (true, Ok(token)) = (first, &item) {
                    out.push(Ok(Token::borrow_position("MARK", "", token)));
                }
                first = false;
                out.push(item);
                out
            }))
        }
    }

    #[test]
    fn test_empty_chain_is_identity() {
        let mut chain = PostLexChain::new();
        let tokens = mk_tokens(&[("NAME", "a"), ("NUMBER", "1")]);
        let out = collect_tokens(chain.process(stream_of(tokens.clone()))).unwrap();
        assert_eq!(out, tokens);
        assert_eq!(chain.stage_count(), 0);
    }

    #[test]
    fn test_stages_apply_in_registration_order() {
        let mut chain = PostLexChain::new().with(Suffix("1")).with(Suffix("2"));
        let out = collect_tokens(chain.process(stream_of(mk_tokens(&[("NAME", "a")])))).unwrap();
        assert_eq!(texts(&out), vec!["a12"]);
    }

    #[test]
    fn test_chain_matches_manual_application() {
        let input = mk_tokens(&[("NAME", "a"), ("NAME", "b")]);

        let mut chain = PostLexChain::new()
            .with(Marker)
            .with(Suffix("!"));
        let chained = collect_tokens(chain.process(stream_of(input.clone()))).unwrap();

        let mut marker = Marker;
        let mut suffix = Suffix("!");
        let first = marker.process(stream_of(input));
        let manual = collect_tokens(suffix.process(first)).unwrap();

        assert_eq!(chained, manual);
        assert_eq!(kinds(&chained), vec!["MARK", "NAME", "NAME"]);
    }

    #[test]
    fn test_chain_is_reusable() {
        let mut chain = PostLexChain::new().with(Suffix("?"));
        for _ in 0..3 {
            let out =
                collect_tokens(chain.process(stream_of(mk_tokens(&[("NAME", "x")])))).unwrap();
            assert_eq!(texts(&out), vec!["x?"]);
        }
    }

    #[test]
    fn test_chains_nest() {
        let inner = PostLexChain::new().with(Suffix("a")).with(Suffix("b"));
        let mut outer = PostLexChain::new().with(inner).with(Suffix("c"));
        assert_eq!(outer.stage_count(), 2);

        let out = collect_tokens(outer.process(stream_of(mk_tokens(&[("NAME", "x")])))).unwrap();
        assert_eq!(texts(&out), vec!["xabc"]);
    }

    #[test]
    fn test_chain_is_lazy() {
        let endless = std::iter::repeat_with(|| Token::at(TokenKind::NAME, "x", Default::default()));
        let mut chain = PostLexChain::new().with(Suffix("1")).with(Suffix("2"));
        let taken: Vec<_> = chain
            .process(Box::new(endless.map(Ok)))
            .take(5)
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(texts(&taken), vec!["x12"; 5]);
    }

    #[test]
    fn test_add_stage() {
        let mut chain = PostLexChain::new();
        chain.add_stage(Suffix("1"));
        chain.add_stage(Marker);
        assert_eq!(chain.stage_count(), 2);
        assert_eq!(format!("{:?}", chain), "PostLexChain { stages: 2 }");
    }
}
