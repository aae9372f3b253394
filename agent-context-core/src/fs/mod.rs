pub mod local;
pub mod mock;
pub mod provider;

pub use local::LocalFs;
pub use provider::FsProvider;
