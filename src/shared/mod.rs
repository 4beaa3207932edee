pub mod errors;
pub mod ids;
pub mod shutdown;

pub use errors::*;
pub use ids::*;
pub use shutdown::*;
