use commons::{
    ContractTokenId, EventId, EVENT_CREATED_TAG, EVENT_STATUS_CHANGED_TAG, TICKET_LOCK_TOGGLED_TAG,
    TICKET_MINTED_TAG, TICKET_USED_TAG,
};
use concordium_std::*;

/// Event creation log data.
#[derive(Debug, Serial)]
pub struct EventCreatedEvent<'a> {
    /// Identifier assigned to the new event.
    pub event_id: EventId,
    /// Event name.
    pub name: &'a String,
    /// Account that created the event and receives ticket proceeds.
    pub organizer: &'a AccountAddress,
}

/// Event activation toggle log data.
#[derive(Debug, Serial)]
pub struct EventStatusChangedEvent {
    /// Event identifier.
    pub event_id: EventId,
    /// New activation state.
    pub active: bool,
}

/// Ticket mint log data.
#[derive(Debug, Serial)]
pub struct TicketMintedEvent<'a> {
    /// Token identifier assigned to the new ticket.
    pub token_id: ContractTokenId,
    /// Event the ticket admits to.
    pub event_id: EventId,
    /// Address of the ticket buyer.
    pub owner: &'a Address,
}

/// Ticket lock toggle log data.
#[derive(Debug, Serial)]
pub struct TicketLockToggledEvent {
    /// Token identifier.
    pub token_id: ContractTokenId,
    /// New lock state.
    pub locked: bool,
}

/// Ticket use log data.
#[derive(Debug, Serial)]
pub struct TicketUsedEvent {
    /// Token identifier.
    pub token_id: ContractTokenId,
    /// Event the ticket admitted to.
    pub event_id: EventId,
}

/// Tagged Custom event to be serialized for the event log.
#[derive(Debug)]
pub enum TicketingEvent<'a> {
    /// Creating an event
    EventCreated(EventCreatedEvent<'a>),
    /// Toggling event activation
    EventStatusChanged(EventStatusChangedEvent),
    /// Minting a ticket
    TicketMinted(TicketMintedEvent<'a>),
    /// Toggling a ticket lock
    TicketLockToggled(TicketLockToggledEvent),
    /// Marking a ticket as used
    TicketUsed(TicketUsedEvent),
}

impl<'a> TicketingEvent<'a> {
    pub fn event_created(
        event_id: EventId,
        name: &'a String,
        organizer: &'a AccountAddress,
    ) -> Self {
        Self::EventCreated(EventCreatedEvent {
            event_id,
            name,
            organizer,
        })
    }

    pub fn event_status_changed(event_id: EventId, active: bool) -> Self {
        Self::EventStatusChanged(EventStatusChangedEvent { event_id, active })
    }

    pub fn ticket_minted(token_id: ContractTokenId, event_id: EventId, owner: &'a Address) -> Self {
        Self::TicketMinted(TicketMintedEvent {
            token_id,
            event_id,
            owner,
        })
    }

    pub fn ticket_lock_toggled(token_id: ContractTokenId, locked: bool) -> Self {
        Self::TicketLockToggled(TicketLockToggledEvent { token_id, locked })
    }

    pub fn ticket_used(token_id: ContractTokenId, event_id: EventId) -> Self {
        Self::TicketUsed(TicketUsedEvent { token_id, event_id })
    }
}

impl<'a> Serial for TicketingEvent<'a> {
    fn serial<W: Write>(&self, out: &mut W) -> Result<(), W::Err> {
        match self {
            TicketingEvent::EventCreated(event) => {
                out.write_u8(EVENT_CREATED_TAG)?;
                event.serial(out)
            }
            TicketingEvent::EventStatusChanged(event) => {
                out.write_u8(EVENT_STATUS_CHANGED_TAG)?;
                event.serial(out)
            }
            TicketingEvent::TicketMinted(event) => {
                out.write_u8(TICKET_MINTED_TAG)?;
                event.serial(out)
            }
            TicketingEvent::TicketLockToggled(event) => {
                out.write_u8(TICKET_LOCK_TOGGLED_TAG)?;
                event.serial(out)
            }
            TicketingEvent::TicketUsed(event) => {
                out.write_u8(TICKET_USED_TAG)?;
                event.serial(out)
            }
        }
    }
}
