//! Small string routines: numeric conversion, whitespace cleanup and path/token
//! slicing. Everything here is stateless.

mod error;
mod number;
mod search;
mod whitespace;
pub use error::*;
pub use number::*;
pub use search::*;
pub use whitespace::*;
