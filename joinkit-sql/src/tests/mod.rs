pub(crate) mod utils;

mod join_tests;
mod property_tests;
