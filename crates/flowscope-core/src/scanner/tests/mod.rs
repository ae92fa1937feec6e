mod tests_blocks;
mod tests_text;
mod tests_walker;
