use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Install the tracing subscriber. Safe to call more than once.
///
/// Nothing is installed unless `RUST_LOG` is set, e.g.
/// `RUST_LOG=bach_typeck=trace`. With `BACH_LOG_TREE` also set, spans are
/// drawn as an indented tree instead of flat lines.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_err() {
            return;
        }
        let filter = EnvFilter::from_default_env();
        let tree = std::env::var_os("BACH_LOG_TREE").is_some();
        tracing_subscriber::registry()
            .with(filter)
            .with(tree.then(|| {
                tracing_tree::HierarchicalLayer::new(2)
                    .with_targets(true)
                    .with_bracketed_fields(true)
            }))
            .with((!tree).then(|| {
                fmt::layer()
                    .with_target(true)
                    .with_level(true)
                    .with_writer(std::io::stderr)
            }))
            .init();
    });
}
