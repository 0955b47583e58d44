// Fri Oct 16 2026 - Alex

pub mod convert;
pub mod reference;
pub mod visit;

pub use convert::convert;
pub use reference::Backref;
pub use visit::{Applied, Visitor};
