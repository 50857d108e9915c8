mod health_check;
mod leads;

pub use health_check::*;
pub use leads::*;
