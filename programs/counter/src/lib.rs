#![allow(unexpected_cfgs)]
#![allow(clippy::result_large_err)]

use anchor_lang::prelude::*;

pub mod errors;

use errors::CounterError;

declare_id!("2LUoJnKc5maGZYcyqMcGk2WwdKwTygxwRP7uqBUu6h6y");

/// Size of the discriminator Anchor prepends to every `#[account]`.
pub const DISCRIMINATOR_SIZE: usize = 8;

#[program]
pub mod counter {
    use super::*;

    /// Create the counter account and set it to zero.
    pub fn initialize(ctx: Context<Initialize>) -> Result<()> {
        let counter = &mut ctx.accounts.counter;
        counter.count = 0;
        msg!("Counter initialized! Current count: {}", counter.count);
        Ok(())
    }

    /// Add one to an existing counter.
    pub fn increment(ctx: Context<Increment>) -> Result<()> {
        let counter = &mut ctx.accounts.counter;
        counter.count = counter
            .count
            .checked_add(1)
            .ok_or(CounterError::Overflow)?;
        msg!("Counter incremented! Current count: {}", counter.count);
        Ok(())
    }
}

#[derive(Accounts)]
pub struct Initialize<'info> {
    #[account(init, payer = user, space = Counter::SPACE)]
    pub counter: Account<'info, Counter>,
    #[account(mut)]
    pub user: Signer<'info>,
    pub system_program: Program<'info, System>,
}

/// Accounts for the increment instruction. No signer: anyone may increment.
#[derive(Accounts)]
pub struct Increment<'info> {
    #[account(mut)]
    pub counter: Account<'info, Counter>,
}

#[account]
#[derive(Debug, InitSpace)]
pub struct Counter {
    pub count: u64,
}

impl Counter {
    pub const SPACE: usize = DISCRIMINATOR_SIZE + Counter::INIT_SPACE;
}
