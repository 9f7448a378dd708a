pub mod payload;

pub use payload::{decode_image_bytes, decode_payload, grid_from_luma8};
