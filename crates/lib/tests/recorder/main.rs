mod common;
mod file_sink_tests;
mod scenario_tests;
