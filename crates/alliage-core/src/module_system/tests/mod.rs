#[cfg(test)]
mod manifest_tests;
