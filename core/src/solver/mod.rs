pub use connectivity::{distances, reachable};
pub use joint::*;
pub use policy::{Reaction, react, step};

mod connectivity;
mod joint;
mod policy;
