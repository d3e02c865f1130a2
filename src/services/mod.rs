pub mod imports;
pub mod persistence;
pub mod suggestions;

pub use imports::*;
pub use persistence::*;
pub use suggestions::*;
