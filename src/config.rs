//! Analysis limits.
//!
//! The spec's grammar forbids unbounded dot-access chains or block nesting
//! only in the sense that a real parser would reject absurd input long
//! before it reached these passes. Since this crate accepts an
//! already-built AST from whatever upstream produced it, it still needs its
//! own bound so adversarial input fails with an `InternalError` instead of
//! blowing the native call stack.

/// Recursion limits for the two analysis passes.
#[derive(Debug, Clone, Copy)]
pub struct AnalysisConfig {
    /// Maximum depth of a `base.f1.f2...fk` dot-access chain.
    pub max_dot_chain_depth: u32,
    /// Maximum nesting depth of `if`/`while`/function-body scopes.
    pub max_block_depth: u32,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            max_dot_chain_depth: 256,
            max_block_depth: 512,
        }
    }
}
