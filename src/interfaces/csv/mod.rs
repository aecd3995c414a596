pub mod command_reader;
pub mod course_writer;
