pub mod block_average;
pub mod quadrant;
pub mod reducer;

pub use block_average::block_average;
pub use quadrant::reduce;
pub use reducer::Reducer;
