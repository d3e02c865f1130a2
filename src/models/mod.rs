pub mod contact;
pub mod provider;
pub mod suggestion;

pub use contact::*;
pub use provider::*;
pub use suggestion::*;
