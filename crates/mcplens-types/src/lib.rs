pub mod call;
pub mod metrics;
mod util;

pub use call::*;
pub use metrics::*;
pub use util::*;
