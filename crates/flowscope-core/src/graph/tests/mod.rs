mod tests_builder;
mod tests_calls;
mod tests_resolve;
