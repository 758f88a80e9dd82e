//! Green tree construction helpers

use rowan::{Checkpoint, GreenNodeBuilder};

use super::{CstToken, JsLanguage, JsSyntaxKind, JsSyntaxNode};

/// Thin wrapper over Rowan's `GreenNodeBuilder` speaking `JsSyntaxKind`
#[derive(Default)]
pub struct CstBuilder {
    inner: GreenNodeBuilder<'static>,
}

impl CstBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start_node(&mut self, kind: JsSyntaxKind) {
        self.inner.start_node(kind.into());
    }

    /// Start a node that retroactively wraps everything added since `checkpoint`
    pub fn start_node_at(&mut self, checkpoint: Checkpoint, kind: JsSyntaxKind) {
        self.inner.start_node_at(checkpoint, kind.into());
    }

    pub fn finish_node(&mut self) {
        self.inner.finish_node();
    }

    pub fn checkpoint(&self) -> Checkpoint {
        self.inner.checkpoint()
    }

    pub fn token(&mut self, kind: JsSyntaxKind, text: &str) {
        self.inner.token(kind.into(), text);
    }

    pub fn add_token(&mut self, token: &CstToken) {
        self.token(token.kind, &token.text);
    }

    pub fn finish(self) -> JsSyntaxNode {
        rowan::SyntaxNode::<JsLanguage>::new_root(self.inner.finish())
    }
}
