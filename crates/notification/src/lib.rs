mod email;
mod relay;
mod service;
mod simulated;

pub use email::*;
pub use relay::*;
pub use service::*;
pub use simulated::*;
