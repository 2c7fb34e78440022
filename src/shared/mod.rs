pub mod constants;
pub mod templates;
pub mod time;
pub mod types;

#[cfg(test)]
pub mod test_helpers;
