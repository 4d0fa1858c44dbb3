pub mod image_writer;
pub mod output_path;
