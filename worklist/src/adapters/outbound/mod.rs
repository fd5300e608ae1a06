mod atomwalk;
mod memory;

pub use self::atomwalk::AtomwalkBackend;
pub use memory::{InMemoryBackend, UpdateCall};
