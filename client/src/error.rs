use anchor_lang::error::ErrorCode as AnchorErrorCode;
use counter::errors::CounterError;
use solana_sdk::{instruction::InstructionError, pubkey::Pubkey, transaction::TransactionError};

/// `SystemError::AccountAlreadyInUse`, raised when `init` targets a live address.
const SYSTEM_ACCOUNT_ALREADY_IN_USE: u32 = 0;

/// Every way a counter call can fail. None of them are retried.
#[derive(Debug, Clone, PartialEq, Eq, strum_macros::Display)]
pub enum CounterClientError {
    #[strum(to_string = "counter account {address} already exists")]
    AccountAlreadyExists { address: Pubkey },
    #[strum(to_string = "counter account {address} not found")]
    AccountNotFound { address: Pubkey },
    #[strum(to_string = "counter account {address} is at u64::MAX")]
    CounterOverflow { address: Pubkey },
    #[strum(to_string = "counter account {address} holds invalid data: {reason}")]
    InvalidAccountData { address: Pubkey, reason: String },
    #[strum(to_string = "counter program failed with custom error {code}")]
    Program { code: u32 },
    #[strum(to_string = "transaction failed: {reason}")]
    Transaction { reason: String },
    #[strum(to_string = "transaction could not be confirmed: {reason}")]
    Confirmation { reason: String },
}

impl std::error::Error for CounterClientError {}

impl CounterClientError {
    /// Classify a failed transaction that targeted the counter at `address`.
    pub fn from_transaction_error(address: Pubkey, error: TransactionError) -> Self {
        match error {
            TransactionError::InstructionError(_, InstructionError::Custom(code)) => {
                Self::from_custom_code(address, code)
            }
            TransactionError::InstructionError(_, InstructionError::AccountAlreadyInitialized) => {
                Self::AccountAlreadyExists { address }
            }
            TransactionError::InstructionError(_, InstructionError::UninitializedAccount) => {
                Self::AccountNotFound { address }
            }
            other => Self::Transaction {
                reason: other.to_string(),
            },
        }
    }

    fn from_custom_code(address: Pubkey, code: u32) -> Self {
        if code == SYSTEM_ACCOUNT_ALREADY_IN_USE {
            Self::AccountAlreadyExists { address }
        } else if code == AnchorErrorCode::AccountNotInitialized as u32 {
            Self::AccountNotFound { address }
        } else if code == u32::from(CounterError::Overflow) {
            Self::CounterOverflow { address }
        } else {
            Self::Program { code }
        }
    }

    pub fn confirmation(reason: impl ToString) -> Self {
        Self::Confirmation {
            reason: reason.to_string(),
        }
    }
}
