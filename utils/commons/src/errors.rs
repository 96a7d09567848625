use super::*;

/// The custom errors the contract can produce.
#[derive(Serialize, Debug, PartialEq, Eq, Reject, SchemaType)]
pub enum CustomContractError {
    /// Failed parsing the parameter (Error code: -1).
    #[from(ParseError)]
    ParseParams,
    /// Failed logging: Log is full (Error code: -2).
    LogFull,
    /// Failed logging: Log is malformed (Error code: -3).
    LogMalformed,
    /// Sender does not hold the role the operation requires (Error code: -4).
    Unauthorized,
    /// Referenced event id was never assigned (Error code: -5).
    NotFound,
    /// Event is deactivated and refuses minting (Error code: -6).
    Inactive,
    /// All tickets for the event have been sold (Error code: -7).
    SoldOut,
    /// Attached amount is below the ticket price (Error code: -8).
    InsufficientPayment,
    /// Event start time is not in the future (Error code: -9).
    InvalidDate,
    /// Event capacity must be at least one ticket (Error code: -10).
    InvalidCapacity,
    /// Sender is not the ticket owner (Error code: -11).
    NotOwner,
    /// Ticket was already marked as used (Error code: -12).
    AlreadyUsed,
    /// Ticket is locked and cannot be transferred (Error code: -13).
    Locked,
    /// Only account addresses can perform this action (Error code: -14).
    OnlyAccountAddress,
    /// Failed to invoke a contract (Error code: -15).
    InvokeContractError,
    /// Failed to invoke a transfer (Error code: -16).
    InvokeTransferError,
    /// Sequential id space is exhausted (Error code: -17).
    Overflow,
}

/// Mapping the logging errors to CustomContractError.
impl From<LogError> for CustomContractError {
    fn from(le: LogError) -> Self {
        match le {
            LogError::Full => Self::LogFull,
            LogError::Malformed => Self::LogMalformed,
        }
    }
}

/// Mapping errors related to contract invocations to CustomContractError.
impl<T> From<CallContractError<T>> for CustomContractError {
    fn from(_cce: CallContractError<T>) -> Self {
        Self::InvokeContractError
    }
}

/// Mapping errors related to transfer invocations to CustomContractError.
impl From<TransferError> for CustomContractError {
    fn from(_te: TransferError) -> Self {
        Self::InvokeTransferError
    }
}

/// Mapping CustomContractError to ContractError
impl From<CustomContractError> for ContractError {
    fn from(c: CustomContractError) -> Self {
        Cis2Error::Custom(c)
    }
}
