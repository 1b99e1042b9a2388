pub mod fetch;
pub mod redact;
pub mod wiki;
