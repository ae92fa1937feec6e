mod tests_discover;
mod tests_path;
mod tests_project;
