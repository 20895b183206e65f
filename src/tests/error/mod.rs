#[cfg(feature = "miette")]
mod miette_tests;
