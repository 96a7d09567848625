use commons::{
    Authority, ContractError, ContractResult, ContractTokenAmount, ContractTokenId,
    CustomContractError, EventId,
};
use concordium_cis2::*;
use concordium_std::*;
use core::ops::DerefMut;

use crate::external::{CreateEventParams, EventView, TicketView, VerificationResult};

/// A single event record. The id is the key of the event map and is never
/// reassigned; the organizer is fixed at creation.
#[derive(Debug, Serialize, Clone, SchemaType)]
pub struct EventData {
    pub name: String,
    pub description: String,
    pub start_time: Timestamp,
    pub ticket_price: Amount,
    pub max_tickets: u32,
    pub tickets_sold: u32,
    pub organizer: AccountAddress,
    pub active: bool,
}

/// A single ticket record. The token id is the key of the ticket map.
#[derive(Debug, Serialize, Clone, SchemaType)]
pub struct TicketData {
    /// The event this ticket admits to. Stays with the ticket across
    /// ownership transfers.
    pub event_id: EventId,
    pub owner: Address,
    /// Stored verbatim, never interpreted.
    pub metadata_url: String,
    /// Flips to true exactly once.
    pub used: bool,
    /// While set, ownership transfers are rejected.
    pub locked: bool,
}

/// Result of a successful mint. The price must be forwarded to the organizer
/// and any overpayment refunded by the caller of [`State::mint_ticket`].
#[must_use]
pub struct MintOutcome {
    pub token_id: ContractTokenId,
    pub price: Amount,
    pub organizer: AccountAddress,
}

/// The contract state.
#[derive(Serial, DeserialWithState, StateClone)]
#[concordium(state_parameter = "S")]
pub struct State<S: HasStateApi> {
    /// Authority module for role membership management.
    pub authority: Authority<S>,
    /// Event records keyed by their sequential id.
    pub events: StateMap<EventId, EventData, S>,
    /// Id assigned to the next created event.
    pub next_event_id: EventId,
    /// Ticket records keyed by their sequential token id, shared across all
    /// events.
    pub tickets: StateMap<ContractTokenId, TicketData, S>,
    /// Id assigned to the next minted ticket.
    pub next_ticket_id: u32,
    /// Operators for each address for this contract.
    pub operators: StateMap<Address, StateSet<Address, S>, S>,
    /// Contracts implementing the supported standards.
    pub implementors: StateMap<StandardIdentifierOwned, Vec<ContractAddress>, S>,
}

impl<S: HasStateApi> State<S> {
    /// Create a new state with no events and no tickets. `origin` becomes the
    /// first admin.
    pub fn new(state_builder: &mut StateBuilder<S>, origin: AccountAddress) -> Self {
        State {
            authority: Authority::new(state_builder, Address::Account(origin)),
            events: state_builder.new_map(),
            next_event_id: 0,
            tickets: state_builder.new_map(),
            next_ticket_id: 0,
            operators: state_builder.new_map(),
            implementors: state_builder.new_map(),
        }
    }

    /// Register a new event and assign it the next sequential id. The id
    /// counter moves in the same state transition, so ids can neither skip
    /// nor repeat.
    pub fn create_event(
        &mut self,
        organizer: AccountAddress,
        params: &CreateEventParams,
        slot_time: Timestamp,
    ) -> Result<EventId, CustomContractError> {
        ensure!(
            params.start_time > slot_time,
            CustomContractError::InvalidDate
        );
        ensure!(params.max_tickets > 0, CustomContractError::InvalidCapacity);

        let event_id = self.next_event_id;
        self.next_event_id = event_id
            .checked_add(1)
            .ok_or(CustomContractError::Overflow)?;

        self.events.insert(
            event_id,
            EventData {
                name: params.name.clone(),
                description: params.description.clone(),
                start_time: params.start_time,
                ticket_price: params.ticket_price,
                max_tickets: params.max_tickets,
                tickets_sold: 0,
                organizer,
                active: true,
            },
        );

        Ok(event_id)
    }

    pub fn event_organizer(&self, event_id: EventId) -> Result<AccountAddress, CustomContractError> {
        let event = self
            .events
            .get(&event_id)
            .ok_or(CustomContractError::NotFound)?;
        Ok(event.organizer)
    }

    pub fn set_event_active(
        &mut self,
        event_id: EventId,
        active: bool,
    ) -> Result<(), CustomContractError> {
        let mut event = self
            .events
            .get_mut(&event_id)
            .ok_or(CustomContractError::NotFound)?;
        event.active = active;
        Ok(())
    }

    /// Mint a ticket for `event_id`, owned by `owner`. The sold counter, the
    /// token id counter and the ticket record move in one state transition.
    pub fn mint_ticket(
        &mut self,
        event_id: EventId,
        owner: Address,
        metadata_url: String,
        amount: Amount,
    ) -> Result<MintOutcome, CustomContractError> {
        let mut event = self
            .events
            .get_mut(&event_id)
            .ok_or(CustomContractError::NotFound)?;
        ensure!(event.active, CustomContractError::Inactive);
        ensure!(
            event.tickets_sold < event.max_tickets,
            CustomContractError::SoldOut
        );
        ensure!(
            amount >= event.ticket_price,
            CustomContractError::InsufficientPayment
        );

        let token_id = TokenIdU32(self.next_ticket_id);
        self.next_ticket_id = self
            .next_ticket_id
            .checked_add(1)
            .ok_or(CustomContractError::Overflow)?;

        event.tickets_sold += 1;
        let price = event.ticket_price;
        let organizer = event.organizer;

        self.tickets.insert(
            token_id,
            TicketData {
                event_id,
                owner,
                metadata_url,
                used: false,
                locked: false,
            },
        );

        Ok(MintOutcome {
            token_id,
            price,
            organizer,
        })
    }

    /// Flip the lock of a ticket. Only the current owner may do this, and
    /// only while the ticket is unused. Returns the new lock state.
    pub fn toggle_lock(
        &mut self,
        sender: &Address,
        token_id: &ContractTokenId,
    ) -> ContractResult<bool> {
        let mut ticket = self
            .tickets
            .get_mut(token_id)
            .ok_or(ContractError::InvalidTokenId)?;
        ensure!(&ticket.owner == sender, CustomContractError::NotOwner.into());
        ensure!(!ticket.used, CustomContractError::AlreadyUsed.into());
        ticket.locked = !ticket.locked;
        Ok(ticket.locked)
    }

    /// Mark a ticket as used. `is_staff` grants verification staff the same
    /// right as the owner. Returns the event the ticket admitted to.
    pub fn use_ticket(
        &mut self,
        sender: &Address,
        token_id: &ContractTokenId,
        is_staff: bool,
    ) -> ContractResult<EventId> {
        let mut ticket = self
            .tickets
            .get_mut(token_id)
            .ok_or(ContractError::InvalidTokenId)?;
        ensure!(
            &ticket.owner == sender || is_staff,
            CustomContractError::NotOwner.into()
        );
        ensure!(!ticket.used, CustomContractError::AlreadyUsed.into());
        ticket.used = true;
        Ok(ticket.event_id)
    }

    /// Move ticket ownership from `from` to `to`. The transfer either fully
    /// completes or fully reverts; a locked ticket rejects before any field
    /// is touched. All fields other than the owner are preserved.
    pub fn transfer(
        &mut self,
        token_id: &ContractTokenId,
        from: &Address,
        to: &Address,
    ) -> ContractResult<()> {
        let mut ticket = self
            .tickets
            .get_mut(token_id)
            .ok_or(ContractError::InvalidTokenId)?;
        ensure!(&ticket.owner == from, ContractError::InsufficientFunds);
        ensure!(!ticket.locked, CustomContractError::Locked.into());
        ticket.owner = *to;
        Ok(())
    }

    /// Add a new operator for the given address.
    ///
    /// Succeeds even if the `operator` is already an operator for the `owner`.
    pub fn add_operator(
        &mut self,
        owner: &Address,
        operator: &Address,
        state_builder: &mut StateBuilder<S>,
    ) {
        self.operators
            .entry(*owner)
            .or_insert_with(|| state_builder.new_set())
            .deref_mut()
            .insert(*operator);
    }

    /// Update the state removing an operator for a given address.
    /// Succeeds even if the `operator` is _not_ an operator for the `address`.
    pub fn remove_operator(&mut self, owner: &Address, operator: &Address) {
        self.operators
            .get_mut(owner)
            .map(|mut operators| operators.remove(operator));
    }

    /// Check if `address` is an operator of `owner`.
    pub fn is_operator(&self, address: &Address, owner: &Address) -> bool {
        self.operators
            .get(owner)
            .map(|operators| operators.contains(address))
            .unwrap_or(false)
    }

    pub fn balance_of(
        &self,
        token_id: &ContractTokenId,
        address: &Address,
    ) -> ContractResult<ContractTokenAmount> {
        let ticket = self
            .tickets
            .get(token_id)
            .ok_or(ContractError::InvalidTokenId)?;
        let balance = if &ticket.owner == address { 1 } else { 0 };
        Ok(balance.into())
    }

    pub fn metadata_url(&self, token_id: &ContractTokenId) -> ContractResult<MetadataUrl> {
        let ticket = self
            .tickets
            .get(token_id)
            .ok_or(ContractError::InvalidTokenId)?;
        Ok(MetadataUrl {
            url: ticket.metadata_url.clone(),
            hash: None,
        })
    }

    pub fn event_view(&self, event_id: EventId) -> Result<EventView, CustomContractError> {
        let event = self
            .events
            .get(&event_id)
            .ok_or(CustomContractError::NotFound)?;
        Ok(EventView::from_data(event_id, &event))
    }

    /// Paginated listing of event records in id order.
    pub fn view_events(&self, skip: u32, show: u32) -> Vec<EventView> {
        self.events
            .iter()
            .skip(skip as usize)
            .take(show as usize)
            .map(|(event_id, event)| EventView::from_data(*event_id, &event))
            .collect()
    }

    pub fn ticket_view(&self, token_id: &ContractTokenId) -> ContractResult<TicketView> {
        let ticket = self
            .tickets
            .get(token_id)
            .ok_or(ContractError::InvalidTokenId)?;
        Ok(TicketView {
            token_id: *token_id,
            event_id: ticket.event_id,
            owner: ticket.owner,
            metadata_url: ticket.metadata_url.clone(),
            used: ticket.used,
            locked: ticket.locked,
        })
    }

    pub fn verification(&self, token_id: &ContractTokenId) -> ContractResult<VerificationResult> {
        let ticket = self
            .tickets
            .get(token_id)
            .ok_or(ContractError::InvalidTokenId)?;
        Ok(VerificationResult {
            owner: ticket.owner,
            event_id: ticket.event_id,
            used: ticket.used,
            locked: ticket.locked,
        })
    }

    /// Update the list of contracts implementing the specified standard.
    pub fn set_implementors(
        &mut self,
        id: StandardIdentifierOwned,
        contracts: Vec<ContractAddress>,
    ) {
        self.implementors.insert(id, contracts);
    }

    /// Look up the contracts implementing the specified standard.
    pub fn get_implementors(&self, id: &StandardIdentifierOwned) -> SupportResult {
        if let Some(addresses) = self.implementors.get(id) {
            SupportResult::SupportBy(addresses.to_vec())
        } else {
            SupportResult::NoSupport
        }
    }
}
