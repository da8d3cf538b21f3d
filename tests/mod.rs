mod common;
mod e2e_tests;
