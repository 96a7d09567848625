/// Tag for the Custom Event Created event.
pub const EVENT_CREATED_TAG: u8 = u8::MAX - 6;

/// Tag for the Custom Event Status Changed event.
pub const EVENT_STATUS_CHANGED_TAG: u8 = u8::MAX - 7;

/// Tag for the Custom Ticket Minted event.
pub const TICKET_MINTED_TAG: u8 = u8::MAX - 8;

/// Tag for the Custom Ticket Lock Toggled event.
pub const TICKET_LOCK_TOGGLED_TAG: u8 = u8::MAX - 9;

/// Tag for the Custom Ticket Used event.
pub const TICKET_USED_TAG: u8 = u8::MAX - 10;
