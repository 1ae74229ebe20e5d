//! Persistence port for the seen-token set.

use crate::domain::SeenTokens;
use crate::error::Result;

/// Loads and saves the set of already handled tokens.
///
/// There is exactly one writer, so implementations need no locking. Calls
/// are synchronous; the set is small and written once per cycle.
pub trait TokenStore: Send + Sync {
    /// Load the stored set. A store that was never written loads as empty.
    fn load(&self) -> Result<SeenTokens>;

    /// Replace the stored set.
    fn save(&self, tokens: &SeenTokens) -> Result<()>;
}
