mod controller;
mod draft;
mod error;
mod types;
mod validate;

pub use controller::*;
pub use draft::*;
pub use error::*;
pub use types::*;
pub use validate::*;
