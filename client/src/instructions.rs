use anchor_lang::{system_program, InstructionData, ToAccountMetas};
use solana_sdk::{instruction::Instruction, pubkey::Pubkey};

/// Create `counter` with `user` paying rent. Both must sign.
pub fn initialize(counter: &Pubkey, user: &Pubkey) -> Instruction {
    Instruction {
        program_id: counter::ID,
        accounts: counter::accounts::Initialize {
            counter: *counter,
            user: *user,
            system_program: system_program::ID,
        }
        .to_account_metas(None),
        data: counter::instruction::Initialize {}.data(),
    }
}

pub fn increment(counter: &Pubkey) -> Instruction {
    Instruction {
        program_id: counter::ID,
        accounts: counter::accounts::Increment { counter: *counter }.to_account_metas(None),
        data: counter::instruction::Increment {}.data(),
    }
}
