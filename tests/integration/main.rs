mod pipeline_tests;
mod scenarios;
