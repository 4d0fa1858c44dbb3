pub mod filter;
pub mod frame_buffers;
