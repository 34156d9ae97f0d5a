// Reusable library API for the command-line tools
pub mod alphabet;
pub mod dictionary;
pub mod errors;
pub mod evaluator;
pub mod fingerprint;
pub mod index;
pub mod letter_pool;
pub mod log;
pub mod resolver;
pub mod template;
