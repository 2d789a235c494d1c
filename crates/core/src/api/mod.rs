pub mod traits;

// Backend client implementations
pub mod http;
