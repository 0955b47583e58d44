// Fri Oct 16 2026 - Alex

pub mod alignment;
pub mod collection;
pub mod field;
pub mod layout;
pub mod serializer;

pub use alignment::{align_up, walk_struct};
pub use collection::Hierarchic;
pub use field::{pad_field, Field, PAD_NAME};
pub use layout::Struct;
pub use serializer::{SerializableField, SerializableLayout};
