pub mod aggregate;

pub use aggregate::{Relocation, RelocationAction, RelocationListQuery, RelocationStatus};
