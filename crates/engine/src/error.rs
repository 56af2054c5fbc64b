//! Error kinds per §7. `CatalogLoad` is the only fatal class; everything
//! else is recorded and analysis continues, so only it gets a typed
//! variant callers are expected to match on — the rest flow through
//! `anyhow::Result` at their call sites, matching the teacher's preference
//! for typed errors only where callers branch on the variant.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TracerError {
    #[error("catalog failed to load: {0}")]
    CatalogLoad(#[from] patterns::InvalidRegex),
}
