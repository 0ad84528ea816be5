//! [`ArtifactStore`](conclave_application::ArtifactStore) adapters.

mod in_memory;

pub use in_memory::InMemoryArtifactStore;
