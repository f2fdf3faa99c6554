// Data models: database rows, inference inputs and risk responses

pub mod health_inputs;
pub mod model_prediction;
pub mod user;

pub use health_inputs::*;
pub use model_prediction::*;
pub use user::*;
