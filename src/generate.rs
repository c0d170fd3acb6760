use crate::config::TreeConfig;
use crate::error::ConfigError;
use crate::grammar::rewrite;
use crate::interpreter::TreeInterpreter;
use crate::tree::SegmentTree;

/// Validates `config`, expands its grammar, and interprets the result with the
/// standard symbol table.
pub fn generate(config: &TreeConfig) -> Result<SegmentTree, ConfigError> {
    config.validate()?;
    let _span = tracing::debug_span!("generate", iterations = config.iterations).entered();

    let symbols = rewrite(&config.axiom, &config.rules, config.iterations);
    tracing::debug!(symbols = symbols.len(), "expanded grammar");

    let tree = TreeInterpreter::standard(config.clone()).build_tree(&symbols);
    tracing::debug!(segments = tree.len(), "interpreted tree");
    Ok(tree)
}
