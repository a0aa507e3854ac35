mod loader_tests;
mod selection_tests;
