pub mod guru;
pub mod prediction_client;
pub mod stats;

pub use guru::*;
pub use prediction_client::*;
pub use stats::*;
