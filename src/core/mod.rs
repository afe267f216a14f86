pub mod archiver;
pub mod error;
pub mod sampler;
pub mod source;
pub mod workspace;
