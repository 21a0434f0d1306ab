pub mod normalize;
pub mod scan;

pub use normalize::{normalize, render, NormalizedSession};
pub use scan::SessionStore;
