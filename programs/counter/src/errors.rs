use anchor_lang::prelude::*;

#[error_code]
pub enum CounterError {
    #[msg("Counter cannot be incremented past u64::MAX.")]
    Overflow,
}
