mod discovery;

pub use discovery::Discovery;
