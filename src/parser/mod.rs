pub mod yaml;

pub use yaml::LoadError;
