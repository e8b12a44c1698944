mod types;

pub use types::{Document, Line, LineSink};
