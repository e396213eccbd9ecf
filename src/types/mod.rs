// Shared domain types — used by both the engine layer and the form layer.
// Neither layer depends on the other; both import from this module.

pub mod context;
pub mod issue;
pub mod media;
pub mod permission;

pub use context::*;
pub use issue::*;
pub use media::*;
pub use permission::*;
