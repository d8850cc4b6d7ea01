//! Platform capabilities injected into the audio encoder and the history store.
//!
//! Binary decoding, ephemeral resource bookkeeping and durable key-value
//! access sit behind small traits so the core runs headless in tests.

pub mod codec;
pub mod resources;
pub mod storage;

pub use codec::{Base64Codec, BinaryCodec};
pub use resources::{EphemeralResources, InMemoryResources};
pub use storage::{FileStorage, MemoryStorage, PersistentStorage};
