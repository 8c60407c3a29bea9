pub mod arguments;

pub use arguments::Arguments;
