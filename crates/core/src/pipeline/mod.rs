pub mod transcribe_file_use_case;
