use commons::{ContractTokenId, EventId};
use concordium_cis2::StandardIdentifierOwned;
use concordium_std::*;

use crate::state::EventData;

/// Parameter for the `createEvent` entrypoint.
#[derive(Debug, Serialize, SchemaType)]
pub struct CreateEventParams {
    pub name: String,
    pub description: String,
    /// Must be strictly in the future at creation time.
    pub start_time: Timestamp,
    /// Price of a single ticket. Zero makes the event free.
    pub ticket_price: Amount,
    /// Total number of tickets that can ever be minted for the event.
    pub max_tickets: u32,
}

/// Parameter for the `mintTicket` entrypoint.
#[derive(Debug, Serialize, SchemaType)]
pub struct MintTicketParams {
    pub event_id: EventId,
    /// External pointer to descriptive ticket content. Stored verbatim,
    /// never interpreted by the contract.
    pub metadata_url: String,
}

/// Parameter for the `setEventActive` entrypoint.
#[derive(Debug, Clone, Copy, Serialize, SchemaType)]
pub struct SetEventActiveParams {
    pub event_id: EventId,
    pub active: bool,
}

/// Parameter for the `viewEvents` entrypoint.
#[derive(Debug, Clone, Copy, Serialize, SchemaType)]
pub struct ViewEventsParams {
    pub skip: u32,
    pub show: u32,
}

/// Snapshot of a single event record, as returned by `getEvent` and
/// `viewEvents`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, SchemaType)]
pub struct EventView {
    pub event_id: EventId,
    pub name: String,
    pub description: String,
    pub start_time: Timestamp,
    pub ticket_price: Amount,
    pub max_tickets: u32,
    pub tickets_sold: u32,
    pub organizer: AccountAddress,
    pub active: bool,
}

impl EventView {
    pub fn from_data(event_id: EventId, data: &EventData) -> Self {
        Self {
            event_id,
            name: data.name.clone(),
            description: data.description.clone(),
            start_time: data.start_time,
            ticket_price: data.ticket_price,
            max_tickets: data.max_tickets,
            tickets_sold: data.tickets_sold,
            organizer: data.organizer,
            active: data.active,
        }
    }
}

/// Snapshot of a single ticket record, as returned by `getTicket`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, SchemaType)]
pub struct TicketView {
    pub token_id: ContractTokenId,
    pub event_id: EventId,
    pub owner: Address,
    pub metadata_url: String,
    pub used: bool,
    pub locked: bool,
}

/// Result of the `verifyTicket` entrypoint, the fields verification staff
/// needs at the venue door.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, SchemaType)]
pub struct VerificationResult {
    pub owner: Address,
    pub event_id: EventId,
    pub used: bool,
    pub locked: bool,
}

/// The parameter type for the contract function `setImplementors`.
/// Takes a standard identifier and list of contract addresses providing
/// implementations of this standard.
#[derive(Debug, Serialize, PartialEq, Eq, SchemaType)]
pub struct SetImplementorsParams {
    /// The identifier for the standard.
    pub id: StandardIdentifierOwned,
    /// The addresses of the implementors of the standard.
    pub implementors: Vec<ContractAddress>,
}
