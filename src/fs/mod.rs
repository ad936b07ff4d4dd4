pub mod projects_file;
