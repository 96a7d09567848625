use commons::{
    AuthorityUpdateParams, AuthorityViewParams, ContractBalanceOfQueryParams,
    ContractBalanceOfQueryResponse, ContractError, ContractResult, ContractTokenAmount,
    ContractTokenId, ContractTokenMetadataQueryParams, CustomContractError, EventId, HasRoleParams,
    TransferParameter,
};
use concordium_cis2::*;
use concordium_std::*;

use crate::events::*;
use crate::external::*;
use crate::state::State;

/// Standards directly supported by this contract.
const SUPPORTS_STANDARDS: [StandardIdentifier<'static>; 2] =
    [CIS0_STANDARD_IDENTIFIER, CIS2_STANDARD_IDENTIFIER];

/// Initialize the contract with no events and no tickets. The account
/// creating the instance is granted the admin role.
#[init(contract = "EventTicketing")]
fn contract_init<S: HasStateApi>(
    ctx: &impl HasInitContext,
    state_builder: &mut StateBuilder<S>,
) -> InitResult<State<S>> {
    Ok(State::new(state_builder, ctx.init_origin()))
}

/// Register a new event with the sender as its organizer.
///
/// Logs an `EventCreated` event.
///
/// It rejects if:
/// - Fails to parse parameter.
/// - The sender holds neither the organizer nor the admin role.
/// - The sender is a contract address.
/// - The start time is not strictly in the future.
/// - The capacity is zero.
#[receive(
    mutable,
    contract = "EventTicketing",
    name = "createEvent",
    parameter = "CreateEventParams",
    enable_logger
)]
fn contract_create_event<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
    logger: &mut impl HasLogger,
) -> ContractResult<()> {
    let params = CreateEventParams::deserial(&mut ctx.parameter_cursor())?;
    let sender = ctx.sender();

    ensure!(
        host.state().authority.has_organizer_rights(&sender),
        CustomContractError::Unauthorized.into()
    );

    // Ticket proceeds are forwarded to the organizer, so the organizer must
    // be an account.
    let organizer = match sender {
        Address::Account(account) => account,
        Address::Contract(_) => bail!(CustomContractError::OnlyAccountAddress.into()),
    };

    let slot_time = ctx.metadata().slot_time();
    let event_id = host
        .state_mut()
        .create_event(organizer, &params, slot_time)?;

    logger.log(&TicketingEvent::event_created(
        event_id,
        &params.name,
        &organizer,
    ))?;

    Ok(())
}

/// Toggle the activation state of an event. Inactive events refuse minting;
/// everything else about them stays readable.
///
/// Logs an `EventStatusChanged` event.
///
/// It rejects if:
/// - Fails to parse parameter.
/// - The event id was never assigned.
/// - The sender is neither the event organizer nor an admin.
#[receive(
    mutable,
    contract = "EventTicketing",
    name = "setEventActive",
    parameter = "SetEventActiveParams",
    enable_logger
)]
fn contract_set_event_active<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
    logger: &mut impl HasLogger,
) -> ContractResult<()> {
    let params = SetEventActiveParams::deserial(&mut ctx.parameter_cursor())?;
    let sender = ctx.sender();

    let state = host.state();
    let organizer = state.event_organizer(params.event_id)?;
    ensure!(
        sender == Address::Account(organizer) || state.authority.has_admin_rights(&sender),
        CustomContractError::Unauthorized.into()
    );

    host.state_mut()
        .set_event_active(params.event_id, params.active)?;

    logger.log(&TicketingEvent::event_status_changed(
        params.event_id,
        params.active,
    ))?;

    Ok(())
}

/// Mint a ticket for an event to the sender, against an attached payment of
/// at least the ticket price. The price is forwarded to the event organizer
/// and any overpayment is refunded to the sender in the same transaction.
///
/// Logs a `Mint` and a `TokenMetadata` event per the CIS2 standard, and a
/// custom `TicketMinted` event carrying the event id.
///
/// It rejects if:
/// - Fails to parse parameter.
/// - The sender is a contract address.
/// - The event id was never assigned.
/// - The event is deactivated.
/// - All tickets for the event are sold.
/// - The attached amount is below the ticket price.
#[receive(
    mutable,
    payable,
    contract = "EventTicketing",
    name = "mintTicket",
    parameter = "MintTicketParams",
    enable_logger
)]
fn contract_mint_ticket<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
    amount: Amount,
    logger: &mut impl HasLogger,
) -> ContractResult<()> {
    let params = MintTicketParams::deserial(&mut ctx.parameter_cursor())?;

    let buyer = match ctx.sender() {
        Address::Account(account) => account,
        Address::Contract(_) => bail!(CustomContractError::OnlyAccountAddress.into()),
    };
    let owner = Address::Account(buyer);

    let metadata_url = MetadataUrl {
        url: params.metadata_url.clone(),
        hash: None,
    };

    let mint = host
        .state_mut()
        .mint_ticket(params.event_id, owner, params.metadata_url, amount)?;

    // Standard events for wallets and indexers.
    logger.log(&Cis2Event::<ContractTokenId, ContractTokenAmount>::Mint(
        MintEvent {
            token_id: mint.token_id,
            amount: 1.into(),
            owner,
        },
    ))?;
    logger.log(
        &Cis2Event::<ContractTokenId, ContractTokenAmount>::TokenMetadata(TokenMetadataEvent {
            token_id: mint.token_id,
            metadata_url,
        }),
    )?;
    // Custom event linking the ticket to its event.
    logger.log(&TicketingEvent::ticket_minted(
        mint.token_id,
        params.event_id,
        &owner,
    ))?;

    // Forward the ticket price to the event organizer.
    if mint.price > Amount::zero() {
        host.invoke_transfer(&mint.organizer, mint.price)?;
    }

    // Refund any overpayment to the buyer.
    let remaining_funds = amount - mint.price;
    if remaining_funds > Amount::zero() {
        host.invoke_transfer(&buyer, remaining_funds)?;
    }

    Ok(())
}

/// Execute a list of ticket transfers, in the order of the list.
///
/// Logs a `Transfer` event for each executed transfer and invokes the
/// receive hook function on every contract receiver.
///
/// It rejects if:
/// - It fails to parse the parameter.
/// - Any of the transfers fail to be executed, which could be if:
///     - The sender is neither the `from` address nor one of its operators.
///     - The `token_id` does not exist.
///     - The amount is above 1, or the token is not owned by `from`.
///     - The ticket is locked.
/// - Fails to log event.
/// - Any of the receive hook messages rejects.
#[receive(
    mutable,
    contract = "EventTicketing",
    name = "transfer",
    parameter = "TransferParameter",
    enable_logger
)]
fn contract_transfer<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
    logger: &mut impl HasLogger,
) -> ContractResult<()> {
    let TransferParams(transfers) = TransferParameter::deserial(&mut ctx.parameter_cursor())?;
    let sender = ctx.sender();

    for Transfer {
        token_id,
        amount,
        from,
        to,
        data,
    } in transfers
    {
        // Authenticate the sender for this transfer.
        ensure!(
            from == sender || host.state().is_operator(&sender, &from),
            ContractError::Unauthorized
        );

        // Tickets are unique, so only amounts of 0 and 1 can succeed.
        if amount == 0.into() {
            continue;
        }
        ensure!(amount == 1.into(), ContractError::InsufficientFunds);

        let to_address = to.address();
        host.state_mut().transfer(&token_id, &from, &to_address)?;

        logger.log(&Cis2Event::Transfer(TransferEvent {
            token_id,
            amount,
            from,
            to: to_address,
        }))?;

        // If the receiver is a contract, send it the standard receive hook
        // message.
        if let Receiver::Contract(address, function) = to {
            let parameter = OnReceivingCis2Params {
                token_id,
                amount,
                from,
                data,
            };
            host.invoke_contract(
                &address,
                &parameter,
                function.as_entrypoint_name(),
                Amount::zero(),
            )?;
        }
    }

    Ok(())
}

/// Enable or disable addresses as operators of the sender address.
///
/// Logs an `UpdateOperator` event for each update.
///
/// It rejects if:
/// - It fails to parse the parameter.
/// - Fails to log event.
#[receive(
    mutable,
    contract = "EventTicketing",
    name = "updateOperator",
    parameter = "UpdateOperatorParams",
    enable_logger
)]
fn contract_update_operator<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
    logger: &mut impl HasLogger,
) -> ContractResult<()> {
    let UpdateOperatorParams(params) = UpdateOperatorParams::deserial(&mut ctx.parameter_cursor())?;
    let sender = ctx.sender();

    let (state, state_builder) = host.state_and_builder();
    for param in params {
        match &param.update {
            OperatorUpdate::Add => state.add_operator(&sender, &param.operator, state_builder),
            OperatorUpdate::Remove => state.remove_operator(&sender, &param.operator),
        }

        logger.log(
            &Cis2Event::<ContractTokenId, ContractTokenAmount>::UpdateOperator(
                UpdateOperatorEvent {
                    owner: sender,
                    operator: param.operator,
                    update: param.update,
                },
            ),
        )?;
    }

    Ok(())
}

/// Flip the transfer lock of a ticket. Only the current owner may toggle it,
/// and only while the ticket is unused.
///
/// Logs a `TicketLockToggled` event with the new state.
///
/// It rejects if:
/// - Fails to parse parameter.
/// - The token id does not exist.
/// - The sender is not the ticket owner.
/// - The ticket was already used.
#[receive(
    mutable,
    contract = "EventTicketing",
    name = "toggleTicketLock",
    parameter = "ContractTokenId",
    enable_logger
)]
fn contract_toggle_ticket_lock<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
    logger: &mut impl HasLogger,
) -> ContractResult<()> {
    let token_id = ContractTokenId::deserial(&mut ctx.parameter_cursor())?;

    let locked = host.state_mut().toggle_lock(&ctx.sender(), &token_id)?;

    logger.log(&TicketingEvent::ticket_lock_toggled(token_id, locked))?;

    Ok(())
}

/// Mark a ticket as used. Irreversible. Allowed for the ticket owner and for
/// verification staff, i.e. organizers and admins.
///
/// Logs a `TicketUsed` event.
///
/// It rejects if:
/// - Fails to parse parameter.
/// - The token id does not exist.
/// - The sender is neither the ticket owner nor staff.
/// - The ticket was already used.
#[receive(
    mutable,
    contract = "EventTicketing",
    name = "useTicket",
    parameter = "ContractTokenId",
    enable_logger
)]
fn contract_use_ticket<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
    logger: &mut impl HasLogger,
) -> ContractResult<()> {
    let token_id = ContractTokenId::deserial(&mut ctx.parameter_cursor())?;
    let sender = ctx.sender();

    let is_staff = host.state().authority.has_organizer_rights(&sender);
    let event_id = host.state_mut().use_ticket(&sender, &token_id, is_staff)?;

    logger.log(&TicketingEvent::ticket_used(token_id, event_id))?;

    Ok(())
}

/// View the fields verification staff needs at the venue door. Not gated on
/// a role; the record is public chain state either way.
#[receive(
    contract = "EventTicketing",
    name = "verifyTicket",
    parameter = "ContractTokenId",
    return_value = "VerificationResult"
)]
fn contract_verify_ticket<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &impl HasHost<State<S>, StateApiType = S>,
) -> ContractResult<VerificationResult> {
    let token_id = ContractTokenId::deserial(&mut ctx.parameter_cursor())?;
    host.state().verification(&token_id)
}

/// View the full record of a single ticket.
#[receive(
    contract = "EventTicketing",
    name = "getTicket",
    parameter = "ContractTokenId",
    return_value = "TicketView"
)]
fn contract_get_ticket<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &impl HasHost<State<S>, StateApiType = S>,
) -> ContractResult<TicketView> {
    let token_id = ContractTokenId::deserial(&mut ctx.parameter_cursor())?;
    host.state().ticket_view(&token_id)
}

/// View the record of a single event.
#[receive(
    contract = "EventTicketing",
    name = "getEvent",
    parameter = "EventId",
    return_value = "EventView"
)]
fn contract_get_event<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &impl HasHost<State<S>, StateApiType = S>,
) -> ContractResult<EventView> {
    let event_id = EventId::deserial(&mut ctx.parameter_cursor())?;
    Ok(host.state().event_view(event_id)?)
}

/// Paginated view of event records in id order.
#[receive(
    contract = "EventTicketing",
    name = "viewEvents",
    parameter = "ViewEventsParams",
    return_value = "Vec<EventView>"
)]
fn contract_view_events<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &impl HasHost<State<S>, StateApiType = S>,
) -> ContractResult<Vec<EventView>> {
    let params = ViewEventsParams::deserial(&mut ctx.parameter_cursor())?;
    Ok(host.state().view_events(params.skip, params.show))
}

/// Get the balance of given token IDs and addresses.
///
/// It rejects if:
/// - It fails to parse the parameter.
/// - Any of the queried `token_id` does not exist.
#[receive(
    contract = "EventTicketing",
    name = "balanceOf",
    parameter = "ContractBalanceOfQueryParams",
    return_value = "ContractBalanceOfQueryResponse"
)]
fn contract_balance_of<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &impl HasHost<State<S>, StateApiType = S>,
) -> ContractResult<ContractBalanceOfQueryResponse> {
    let params = ContractBalanceOfQueryParams::deserial(&mut ctx.parameter_cursor())?;
    let mut response = Vec::with_capacity(params.queries.len());
    for query in params.queries {
        let amount = host.state().balance_of(&query.token_id, &query.address)?;
        response.push(amount);
    }
    Ok(BalanceOfQueryResponse::from(response))
}

/// Check if the given addresses are operators of the queried owners.
///
/// It rejects if:
/// - It fails to parse the parameter.
#[receive(
    contract = "EventTicketing",
    name = "operatorOf",
    parameter = "OperatorOfQueryParams",
    return_value = "OperatorOfQueryResponse"
)]
fn contract_operator_of<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &impl HasHost<State<S>, StateApiType = S>,
) -> ContractResult<OperatorOfQueryResponse> {
    let params = OperatorOfQueryParams::deserial(&mut ctx.parameter_cursor())?;
    let mut response = Vec::with_capacity(params.queries.len());
    for query in params.queries {
        let is_operator = host.state().is_operator(&query.address, &query.owner);
        response.push(is_operator);
    }
    Ok(OperatorOfQueryResponse::from(response))
}

/// Get the metadata URLs of the given token IDs.
///
/// It rejects if:
/// - It fails to parse the parameter.
/// - Any of the queried `token_id` does not exist.
#[receive(
    contract = "EventTicketing",
    name = "tokenMetadata",
    parameter = "ContractTokenMetadataQueryParams",
    return_value = "TokenMetadataQueryResponse"
)]
fn contract_token_metadata<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &impl HasHost<State<S>, StateApiType = S>,
) -> ContractResult<TokenMetadataQueryResponse> {
    let params = ContractTokenMetadataQueryParams::deserial(&mut ctx.parameter_cursor())?;
    let mut response = Vec::with_capacity(params.queries.len());
    for token_id in params.queries {
        let metadata_url = host.state().metadata_url(&token_id)?;
        response.push(metadata_url);
    }
    Ok(TokenMetadataQueryResponse::from(response))
}

/// Get the supported standards or addresses for a given list of standard
/// identifiers.
///
/// It rejects if:
/// - It fails to parse the parameter.
#[receive(
    contract = "EventTicketing",
    name = "supports",
    parameter = "SupportsQueryParams",
    return_value = "SupportsQueryResponse"
)]
fn contract_supports<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &impl HasHost<State<S>, StateApiType = S>,
) -> ContractResult<SupportsQueryResponse> {
    let params = SupportsQueryParams::deserial(&mut ctx.parameter_cursor())?;
    let mut response = Vec::with_capacity(params.queries.len());
    for std_id in params.queries {
        if SUPPORTS_STANDARDS.contains(&std_id.as_standard_identifier()) {
            response.push(SupportResult::Support);
        } else {
            response.push(host.state().get_implementors(&std_id));
        }
    }
    Ok(SupportsQueryResponse::from(response))
}

/// Set the addresses for an implementation of a given standard.
///
/// It rejects if:
/// - It fails to parse the parameter.
/// - The sender is not an admin.
#[receive(
    mutable,
    contract = "EventTicketing",
    name = "setImplementors",
    parameter = "SetImplementorsParams"
)]
fn contract_set_implementors<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
) -> ContractResult<()> {
    ensure!(
        host.state().authority.has_admin_rights(&ctx.sender()),
        CustomContractError::Unauthorized.into()
    );
    let params = SetImplementorsParams::deserial(&mut ctx.parameter_cursor())?;
    host.state_mut()
        .set_implementors(params.id, params.implementors);
    Ok(())
}

/// Function to manage addresses that hold the admin and organizer roles.
///
///  It rejects if:
///  - Fails to parse `AuthorityUpdateParams` parameters.
///  - If sender is not one of the admins.
#[receive(
    mutable,
    contract = "EventTicketing",
    name = "updateAuthority",
    parameter = "AuthorityUpdateParams"
)]
fn update_authority<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
) -> ReceiveResult<()> {
    let state = host.state_mut();
    let params = AuthorityUpdateParams::deserial(&mut ctx.parameter_cursor())?;
    let sender = ctx.sender();
    state.authority.handle_update(sender, params)
}

/// Function to view addresses that hold the admin and organizer roles.
#[receive(
    contract = "EventTicketing",
    name = "viewAuthority",
    parameter = "AuthorityViewParams",
    return_value = "Vec<Address>"
)]
fn view_authority<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &impl HasHost<State<S>, StateApiType = S>,
) -> ReceiveResult<Vec<Address>> {
    let params = AuthorityViewParams::deserial(&mut ctx.parameter_cursor())?;
    Ok(host.state().authority.handle_view(params))
}

/// Exact role membership lookup.
#[receive(
    contract = "EventTicketing",
    name = "hasRole",
    parameter = "HasRoleParams",
    return_value = "bool"
)]
fn contract_has_role<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &impl HasHost<State<S>, StateApiType = S>,
) -> ReceiveResult<bool> {
    let params = HasRoleParams::deserial(&mut ctx.parameter_cursor())?;
    Ok(host.state().authority.has_role(&params.field, &params.address))
}

#[concordium_cfg_test]
mod tests {
    use super::*;
    use commons::{AuthorityField, AuthorityUpdateKind};
    use test_infrastructure::*;

    const ADMIN: AccountAddress = AccountAddress([1; 32]);
    const ORGANIZER: AccountAddress = AccountAddress([2; 32]);
    const BUYER: AccountAddress = AccountAddress([3; 32]);
    const BUYER_2: AccountAddress = AccountAddress([4; 32]);
    const BUYER_3: AccountAddress = AccountAddress([5; 32]);
    const VISITOR: AccountAddress = AccountAddress([6; 32]);

    const ADMIN_ADDR: Address = Address::Account(ADMIN);
    const ORGANIZER_ADDR: Address = Address::Account(ORGANIZER);
    const BUYER_ADDR: Address = Address::Account(BUYER);
    const BUYER_2_ADDR: Address = Address::Account(BUYER_2);
    const VISITOR_ADDR: Address = Address::Account(VISITOR);

    const TOKEN_0: ContractTokenId = TokenIdU32(0);
    const TOKEN_1: ContractTokenId = TokenIdU32(1);
    const TOKEN_2: ContractTokenId = TokenIdU32(2);

    /// Slot time at which events are created and tickets minted.
    fn now() -> Timestamp {
        Timestamp::from_timestamp_millis(1_000_000_000)
    }

    /// Event start, one day past [`now`].
    fn event_start() -> Timestamp {
        Timestamp::from_timestamp_millis(1_000_000_000 + 86_400_000)
    }

    fn ticket_price() -> Amount {
        Amount::from_micro_ccd(100)
    }

    fn new_ctx<'a>(sender: Address) -> TestReceiveContext<'a> {
        let mut ctx = TestReceiveContext::empty();
        ctx.set_sender(sender);
        ctx.set_metadata_slot_time(now());
        ctx
    }

    /// Contract state right after deployment plus an organizer grant.
    fn initial_state<S: HasStateApi>(state_builder: &mut StateBuilder<S>) -> State<S> {
        let mut state = State::new(state_builder, ADMIN);
        state
            .authority
            .handle_update(
                ADMIN_ADDR,
                AuthorityUpdateParams {
                    field: AuthorityField::Organizer,
                    kind: AuthorityUpdateKind::Add,
                    address: ORGANIZER_ADDR,
                },
            )
            .expect_report("Failed to grant the organizer role");
        state
    }

    fn new_host() -> TestHost<State<TestStateApi>> {
        let mut state_builder = TestStateBuilder::new();
        let state = initial_state(&mut state_builder);
        TestHost::new(state, state_builder)
    }

    fn expo_params(max_tickets: u32) -> CreateEventParams {
        CreateEventParams {
            name: "Expo".to_string(),
            description: "Annual technology exposition".to_string(),
            start_time: event_start(),
            ticket_price: ticket_price(),
            max_tickets,
        }
    }

    fn create_event(
        host: &mut TestHost<State<TestStateApi>>,
        sender: Address,
        params: &CreateEventParams,
    ) -> ContractResult<()> {
        let parameter_bytes = to_bytes(params);
        let mut ctx = new_ctx(sender);
        ctx.set_parameter(&parameter_bytes);
        let mut logger = TestLogger::init();
        contract_create_event(&ctx, host, &mut logger)
    }

    fn mint_ticket(
        host: &mut TestHost<State<TestStateApi>>,
        buyer: AccountAddress,
        event_id: EventId,
        payment: Amount,
    ) -> ContractResult<()> {
        let params = MintTicketParams {
            event_id,
            metadata_url: "ipfs://QmTicket".to_string(),
        };
        let parameter_bytes = to_bytes(&params);
        let mut ctx = new_ctx(Address::Account(buyer));
        ctx.set_parameter(&parameter_bytes);
        let mut logger = TestLogger::init();
        host.set_self_balance(payment);
        contract_mint_ticket(&ctx, host, payment, &mut logger)
    }

    fn transfer_ticket(
        host: &mut TestHost<State<TestStateApi>>,
        sender: Address,
        token_id: ContractTokenId,
        from: Address,
        to: AccountAddress,
    ) -> ContractResult<()> {
        let transfer: Transfer<ContractTokenId, ContractTokenAmount> = Transfer {
            token_id,
            amount: 1.into(),
            from,
            to: Receiver::from_account(to),
            data: AdditionalData::empty(),
        };
        let parameter_bytes = to_bytes(&TransferParams::from(vec![transfer]));
        let mut ctx = new_ctx(sender);
        ctx.set_parameter(&parameter_bytes);
        let mut logger = TestLogger::init();
        contract_transfer(&ctx, host, &mut logger)
    }

    fn toggle_lock(
        host: &mut TestHost<State<TestStateApi>>,
        sender: Address,
        token_id: ContractTokenId,
    ) -> ContractResult<()> {
        let parameter_bytes = to_bytes(&token_id);
        let mut ctx = new_ctx(sender);
        ctx.set_parameter(&parameter_bytes);
        let mut logger = TestLogger::init();
        contract_toggle_ticket_lock(&ctx, host, &mut logger)
    }

    fn use_ticket(
        host: &mut TestHost<State<TestStateApi>>,
        sender: Address,
        token_id: ContractTokenId,
    ) -> ContractResult<()> {
        let parameter_bytes = to_bytes(&token_id);
        let mut ctx = new_ctx(sender);
        ctx.set_parameter(&parameter_bytes);
        let mut logger = TestLogger::init();
        contract_use_ticket(&ctx, host, &mut logger)
    }

    /// Test initialization succeeds and the instance creator becomes the
    /// only admin.
    #[concordium_test]
    fn test_init() {
        let mut ctx = TestInitContext::empty();
        ctx.set_init_origin(ADMIN);
        let mut state_builder = TestStateBuilder::new();

        let result = contract_init(&ctx, &mut state_builder);
        let state = result.expect_report("Contract initialization failed");

        claim!(state.authority.has_admin_rights(&ADMIN_ADDR));
        claim!(state.authority.has_organizer_rights(&ADMIN_ADDR));
        claim_eq!(state.next_event_id, 0);
        claim_eq!(state.next_ticket_id, 0);
        claim!(state.view_events(0, 10).is_empty());
    }

    /// Granting a role twice leaves exactly one membership record and
    /// `hasRole` keeps returning true.
    #[concordium_test]
    fn test_grant_role_is_idempotent() {
        let mut host = new_host();

        let update = AuthorityUpdateParams {
            field: AuthorityField::Organizer,
            kind: AuthorityUpdateKind::Add,
            address: VISITOR_ADDR,
        };
        for _ in 0..2 {
            let parameter_bytes = to_bytes(&update);
            let mut ctx = new_ctx(ADMIN_ADDR);
            ctx.set_parameter(&parameter_bytes);
            let result = update_authority(&ctx, &mut host);
            claim_eq!(result, Ok(()));
        }

        let params = HasRoleParams {
            field: AuthorityField::Organizer,
            address: VISITOR_ADDR,
        };
        let parameter_bytes = to_bytes(&params);
        let mut ctx = new_ctx(VISITOR_ADDR);
        ctx.set_parameter(&parameter_bytes);
        claim_eq!(contract_has_role(&ctx, &host), Ok(true));

        let view = AuthorityViewParams {
            field: AuthorityField::Organizer,
            skip: 0,
            show: 10,
        };
        let parameter_bytes = to_bytes(&view);
        let mut ctx = new_ctx(VISITOR_ADDR);
        ctx.set_parameter(&parameter_bytes);
        let members = view_authority(&ctx, &host).expect_report("Failed to view authority");
        claim_eq!(
            members.iter().filter(|a| **a == VISITOR_ADDR).count(),
            1,
            "Exactly one membership record expected"
        );
    }

    /// Organizers must not manage role membership.
    #[concordium_test]
    fn test_update_authority_requires_admin() {
        let mut host = new_host();

        let update = AuthorityUpdateParams {
            field: AuthorityField::Organizer,
            kind: AuthorityUpdateKind::Add,
            address: VISITOR_ADDR,
        };
        let parameter_bytes = to_bytes(&update);
        let mut ctx = new_ctx(ORGANIZER_ADDR);
        ctx.set_parameter(&parameter_bytes);

        let result = update_authority(&ctx, &mut host);
        claim_eq!(result, Err(CustomContractError::Unauthorized.into()));
    }

    /// `hasRole` is an exact membership lookup: admins do not implicitly
    /// appear in the organizer list.
    #[concordium_test]
    fn test_has_role_is_exact() {
        let host = new_host();

        let queries = [
            (AuthorityField::Admin, ADMIN_ADDR, true),
            (AuthorityField::Organizer, ORGANIZER_ADDR, true),
            (AuthorityField::Organizer, ADMIN_ADDR, false),
            (AuthorityField::Admin, VISITOR_ADDR, false),
        ];
        for (field, address, expected) in queries {
            let parameter_bytes = to_bytes(&HasRoleParams { field, address });
            let mut ctx = new_ctx(VISITOR_ADDR);
            ctx.set_parameter(&parameter_bytes);
            claim_eq!(contract_has_role(&ctx, &host), Ok(expected));
        }
    }

    /// Test event creation by an organizer, ensuring the record is stored
    /// with a sequential id and the creation event is logged.
    #[concordium_test]
    fn test_create_event() {
        let mut host = new_host();

        let params = expo_params(100);
        let parameter_bytes = to_bytes(&params);
        let mut ctx = new_ctx(ORGANIZER_ADDR);
        ctx.set_parameter(&parameter_bytes);
        let mut logger = TestLogger::init();

        let result = contract_create_event(&ctx, &mut host, &mut logger);
        claim_eq!(result, Ok(()));

        let event = host
            .state()
            .event_view(0)
            .expect_report("Event 0 is expected to exist");
        claim_eq!(event.name, "Expo".to_string());
        claim_eq!(event.start_time, event_start());
        claim_eq!(event.ticket_price, ticket_price());
        claim_eq!(event.max_tickets, 100);
        claim_eq!(event.tickets_sold, 0);
        claim_eq!(event.organizer, ORGANIZER);
        claim!(event.active);

        claim!(
            logger.logs.contains(&to_bytes(&TicketingEvent::event_created(
                0,
                &params.name,
                &ORGANIZER,
            ))),
            "Expected an EventCreated event for event 0"
        );

        // The next event gets the next id
        claim_eq!(create_event(&mut host, ORGANIZER_ADDR, &expo_params(5)), Ok(()));
        claim_eq!(host.state().next_event_id, 2);
        claim!(host.state().event_view(1).is_ok());
    }

    /// Admins hold organizer rights and may create events too.
    #[concordium_test]
    fn test_create_event_by_admin() {
        let mut host = new_host();
        claim_eq!(create_event(&mut host, ADMIN_ADDR, &expo_params(10)), Ok(()));
        let event = host
            .state()
            .event_view(0)
            .expect_report("Event 0 is expected to exist");
        claim_eq!(event.organizer, ADMIN);
    }

    /// Accounts without a role must not create events.
    #[concordium_test]
    fn test_create_event_unauthorized() {
        let mut host = new_host();
        let result = create_event(&mut host, VISITOR_ADDR, &expo_params(10));
        claim_eq!(
            result,
            Err(ContractError::Custom(CustomContractError::Unauthorized))
        );
        claim!(host.state().event_view(0).is_err());
    }

    /// The start time must be strictly in the future at creation time.
    #[concordium_test]
    fn test_create_event_invalid_date() {
        let mut host = new_host();

        let mut params = expo_params(10);
        params.start_time = now();
        let result = create_event(&mut host, ORGANIZER_ADDR, &params);
        claim_eq!(
            result,
            Err(ContractError::Custom(CustomContractError::InvalidDate))
        );

        params.start_time = Timestamp::from_timestamp_millis(now().timestamp_millis() - 1);
        let result = create_event(&mut host, ORGANIZER_ADDR, &params);
        claim_eq!(
            result,
            Err(ContractError::Custom(CustomContractError::InvalidDate))
        );
    }

    /// Zero-capacity events are rejected.
    #[concordium_test]
    fn test_create_event_invalid_capacity() {
        let mut host = new_host();
        let result = create_event(&mut host, ORGANIZER_ADDR, &expo_params(0));
        claim_eq!(
            result,
            Err(ContractError::Custom(CustomContractError::InvalidCapacity))
        );
    }

    /// Test minting, ensuring the ticket is owned by the buyer, the sold
    /// counter moves, the proceeds reach the organizer and the appropriate
    /// events are logged.
    #[concordium_test]
    fn test_mint_ticket() {
        let mut host = new_host();
        claim_eq!(create_event(&mut host, ORGANIZER_ADDR, &expo_params(10)), Ok(()));

        let params = MintTicketParams {
            event_id: 0,
            metadata_url: "ipfs://QmTicket".to_string(),
        };
        let parameter_bytes = to_bytes(&params);
        let mut ctx = new_ctx(BUYER_ADDR);
        ctx.set_parameter(&parameter_bytes);
        let mut logger = TestLogger::init();
        host.set_self_balance(ticket_price());

        let result = contract_mint_ticket(&ctx, &mut host, ticket_price(), &mut logger);
        claim_eq!(result, Ok(()));

        let ticket = host
            .state()
            .ticket_view(&TOKEN_0)
            .expect_report("Ticket 0 is expected to exist");
        claim_eq!(ticket.event_id, 0);
        claim_eq!(ticket.owner, BUYER_ADDR);
        claim_eq!(ticket.metadata_url, "ipfs://QmTicket".to_string());
        claim!(!ticket.used);
        claim!(!ticket.locked);

        let event = host
            .state()
            .event_view(0)
            .expect_report("Event 0 is expected to exist");
        claim_eq!(event.tickets_sold, 1);

        claim_eq!(
            host.state().balance_of(&TOKEN_0, &BUYER_ADDR),
            Ok(1.into())
        );
        claim_eq!(
            host.state().balance_of(&TOKEN_0, &VISITOR_ADDR),
            Ok(0.into())
        );

        // The full price reaches the organizer, nothing is refunded
        claim_eq!(host.get_transfers(), vec![(ORGANIZER, ticket_price())]);

        claim!(
            logger.logs.contains(&to_bytes(&Cis2Event::<
                ContractTokenId,
                ContractTokenAmount,
            >::Mint(MintEvent {
                token_id: TOKEN_0,
                amount: 1.into(),
                owner: BUYER_ADDR,
            }))),
            "Expected a Mint event for token 0"
        );
        claim!(
            logger.logs.contains(&to_bytes(&Cis2Event::<
                ContractTokenId,
                ContractTokenAmount,
            >::TokenMetadata(
                TokenMetadataEvent {
                    token_id: TOKEN_0,
                    metadata_url: MetadataUrl {
                        url: "ipfs://QmTicket".to_string(),
                        hash: None,
                    },
                }
            ))),
            "Expected a TokenMetadata event for token 0"
        );
        claim!(
            logger.logs.contains(&to_bytes(&TicketingEvent::ticket_minted(
                TOKEN_0, 0, &BUYER_ADDR,
            ))),
            "Expected a TicketMinted event for token 0"
        );
    }

    /// Overpayment is refunded to the buyer in the same transaction.
    #[concordium_test]
    fn test_mint_refunds_overpayment() {
        let mut host = new_host();
        claim_eq!(create_event(&mut host, ORGANIZER_ADDR, &expo_params(10)), Ok(()));

        let payment = ticket_price() + Amount::from_micro_ccd(50);
        claim_eq!(mint_ticket(&mut host, BUYER, 0, payment), Ok(()));

        claim_eq!(
            host.get_transfers(),
            vec![
                (ORGANIZER, ticket_price()),
                (BUYER, Amount::from_micro_ccd(50)),
            ]
        );
    }

    /// Minting against an id that was never assigned fails.
    #[concordium_test]
    fn test_mint_unknown_event() {
        let mut host = new_host();
        let result = mint_ticket(&mut host, BUYER, 7, ticket_price());
        claim_eq!(
            result,
            Err(ContractError::Custom(CustomContractError::NotFound))
        );
    }

    /// Deactivated events refuse minting until reactivated.
    #[concordium_test]
    fn test_mint_inactive_event() {
        let mut host = new_host();
        claim_eq!(create_event(&mut host, ORGANIZER_ADDR, &expo_params(10)), Ok(()));

        let params = SetEventActiveParams {
            event_id: 0,
            active: false,
        };
        let parameter_bytes = to_bytes(&params);
        let mut ctx = new_ctx(ORGANIZER_ADDR);
        ctx.set_parameter(&parameter_bytes);
        let mut logger = TestLogger::init();
        claim_eq!(
            contract_set_event_active(&ctx, &mut host, &mut logger),
            Ok(())
        );
        claim!(
            logger
                .logs
                .contains(&to_bytes(&TicketingEvent::event_status_changed(0, false))),
            "Expected an EventStatusChanged event"
        );

        let result = mint_ticket(&mut host, BUYER, 0, ticket_price());
        claim_eq!(
            result,
            Err(ContractError::Custom(CustomContractError::Inactive))
        );
    }

    /// Only the event organizer or an admin may toggle activation.
    #[concordium_test]
    fn test_set_event_active_unauthorized() {
        let mut host = new_host();
        claim_eq!(create_event(&mut host, ORGANIZER_ADDR, &expo_params(10)), Ok(()));

        let params = SetEventActiveParams {
            event_id: 0,
            active: false,
        };
        let parameter_bytes = to_bytes(&params);
        let mut ctx = new_ctx(VISITOR_ADDR);
        ctx.set_parameter(&parameter_bytes);
        let mut logger = TestLogger::init();
        claim_eq!(
            contract_set_event_active(&ctx, &mut host, &mut logger),
            Err(ContractError::Custom(CustomContractError::Unauthorized))
        );

        // An admin who is not the organizer may
        let mut ctx = new_ctx(ADMIN_ADDR);
        ctx.set_parameter(&parameter_bytes);
        claim_eq!(
            contract_set_event_active(&ctx, &mut host, &mut logger),
            Ok(())
        );
    }

    /// A payment below the ticket price is rejected before any state moves.
    #[concordium_test]
    fn test_mint_insufficient_payment() {
        let mut host = new_host();
        claim_eq!(create_event(&mut host, ORGANIZER_ADDR, &expo_params(10)), Ok(()));

        let result = mint_ticket(&mut host, BUYER, 0, Amount::from_micro_ccd(99));
        claim_eq!(
            result,
            Err(ContractError::Custom(
                CustomContractError::InsufficientPayment
            ))
        );

        let event = host
            .state()
            .event_view(0)
            .expect_report("Event 0 is expected to exist");
        claim_eq!(event.tickets_sold, 0);
        claim_eq!(host.state().next_ticket_id, 0);
        claim!(host.get_transfers().is_empty());
    }

    /// Minting beyond capacity always fails and leaves the sold counter
    /// unchanged. This is the end-to-end scenario: two buyers fill the
    /// event, the third is turned away.
    #[concordium_test]
    fn test_mint_sold_out() {
        let mut host = new_host();
        claim_eq!(create_event(&mut host, ORGANIZER_ADDR, &expo_params(2)), Ok(()));

        claim_eq!(mint_ticket(&mut host, BUYER, 0, ticket_price()), Ok(()));
        claim_eq!(
            host.state()
                .event_view(0)
                .expect_report("Event 0 is expected to exist")
                .tickets_sold,
            1
        );

        claim_eq!(mint_ticket(&mut host, BUYER_2, 0, ticket_price()), Ok(()));
        claim_eq!(
            host.state()
                .event_view(0)
                .expect_report("Event 0 is expected to exist")
                .tickets_sold,
            2
        );

        let result = mint_ticket(&mut host, BUYER_3, 0, ticket_price());
        claim_eq!(
            result,
            Err(ContractError::Custom(CustomContractError::SoldOut))
        );

        // Sold counter and id counter are exactly where they were
        let event = host
            .state()
            .event_view(0)
            .expect_report("Event 0 is expected to exist");
        claim_eq!(event.tickets_sold, 2);
        claim_eq!(host.state().next_ticket_id, 2);

        // Token ids went out sequentially to the successful buyers
        claim_eq!(
            host.state()
                .ticket_view(&TOKEN_0)
                .expect_report("Ticket 0 is expected to exist")
                .owner,
            BUYER_ADDR
        );
        claim_eq!(
            host.state()
                .ticket_view(&TOKEN_1)
                .expect_report("Ticket 1 is expected to exist")
                .owner,
            BUYER_2_ADDR
        );
        claim!(host.state().ticket_view(&TOKEN_2).is_err());
    }

    /// Token ids keep increasing across events, never repeating.
    #[concordium_test]
    fn test_token_ids_unique_across_events() {
        let mut host = new_host();
        claim_eq!(create_event(&mut host, ORGANIZER_ADDR, &expo_params(5)), Ok(()));
        claim_eq!(create_event(&mut host, ORGANIZER_ADDR, &expo_params(5)), Ok(()));

        claim_eq!(mint_ticket(&mut host, BUYER, 0, ticket_price()), Ok(()));
        claim_eq!(mint_ticket(&mut host, BUYER, 1, ticket_price()), Ok(()));

        claim_eq!(
            host.state()
                .ticket_view(&TOKEN_0)
                .expect_report("Ticket 0 is expected to exist")
                .event_id,
            0
        );
        claim_eq!(
            host.state()
                .ticket_view(&TOKEN_1)
                .expect_report("Ticket 1 is expected to exist")
                .event_id,
            1
        );
    }

    /// Test the owner toggling the lock on and off, with the new state
    /// logged each time.
    #[concordium_test]
    fn test_toggle_ticket_lock() {
        let mut host = new_host();
        claim_eq!(create_event(&mut host, ORGANIZER_ADDR, &expo_params(10)), Ok(()));
        claim_eq!(mint_ticket(&mut host, BUYER, 0, ticket_price()), Ok(()));

        let parameter_bytes = to_bytes(&TOKEN_0);
        let mut ctx = new_ctx(BUYER_ADDR);
        ctx.set_parameter(&parameter_bytes);
        let mut logger = TestLogger::init();

        claim_eq!(
            contract_toggle_ticket_lock(&ctx, &mut host, &mut logger),
            Ok(())
        );
        claim!(
            host.state()
                .ticket_view(&TOKEN_0)
                .expect_report("Ticket 0 is expected to exist")
                .locked
        );
        claim!(
            logger
                .logs
                .contains(&to_bytes(&TicketingEvent::ticket_lock_toggled(TOKEN_0, true))),
            "Expected a TicketLockToggled event with the lock set"
        );

        let mut ctx = new_ctx(BUYER_ADDR);
        ctx.set_parameter(&parameter_bytes);
        claim_eq!(
            contract_toggle_ticket_lock(&ctx, &mut host, &mut logger),
            Ok(())
        );
        claim!(
            !host
                .state()
                .ticket_view(&TOKEN_0)
                .expect_report("Ticket 0 is expected to exist")
                .locked
        );
        claim!(
            logger
                .logs
                .contains(&to_bytes(&TicketingEvent::ticket_lock_toggled(TOKEN_0, false))),
            "Expected a TicketLockToggled event with the lock cleared"
        );
    }

    /// Only the current owner may toggle the lock.
    #[concordium_test]
    fn test_toggle_ticket_lock_not_owner() {
        let mut host = new_host();
        claim_eq!(create_event(&mut host, ORGANIZER_ADDR, &expo_params(10)), Ok(()));
        claim_eq!(mint_ticket(&mut host, BUYER, 0, ticket_price()), Ok(()));

        let result = toggle_lock(&mut host, VISITOR_ADDR, TOKEN_0);
        claim_eq!(
            result,
            Err(ContractError::Custom(CustomContractError::NotOwner))
        );
        claim!(
            !host
                .state()
                .ticket_view(&TOKEN_0)
                .expect_report("Ticket 0 is expected to exist")
                .locked
        );
    }

    /// The lock of a used ticket can no longer change.
    #[concordium_test]
    fn test_toggle_ticket_lock_after_use() {
        let mut host = new_host();
        claim_eq!(create_event(&mut host, ORGANIZER_ADDR, &expo_params(10)), Ok(()));
        claim_eq!(mint_ticket(&mut host, BUYER, 0, ticket_price()), Ok(()));
        claim_eq!(use_ticket(&mut host, BUYER_ADDR, TOKEN_0), Ok(()));

        let result = toggle_lock(&mut host, BUYER_ADDR, TOKEN_0);
        claim_eq!(
            result,
            Err(ContractError::Custom(CustomContractError::AlreadyUsed))
        );
    }

    /// Test the owner marking the ticket as used, and the second attempt
    /// failing without resetting the flag.
    #[concordium_test]
    fn test_use_ticket_once() {
        let mut host = new_host();
        claim_eq!(create_event(&mut host, ORGANIZER_ADDR, &expo_params(10)), Ok(()));
        claim_eq!(mint_ticket(&mut host, BUYER, 0, ticket_price()), Ok(()));

        let parameter_bytes = to_bytes(&TOKEN_0);
        let mut ctx = new_ctx(BUYER_ADDR);
        ctx.set_parameter(&parameter_bytes);
        let mut logger = TestLogger::init();

        claim_eq!(contract_use_ticket(&ctx, &mut host, &mut logger), Ok(()));
        claim!(
            host.state()
                .ticket_view(&TOKEN_0)
                .expect_report("Ticket 0 is expected to exist")
                .used
        );
        claim!(
            logger
                .logs
                .contains(&to_bytes(&TicketingEvent::ticket_used(TOKEN_0, 0))),
            "Expected a TicketUsed event for token 0"
        );

        let result = use_ticket(&mut host, BUYER_ADDR, TOKEN_0);
        claim_eq!(
            result,
            Err(ContractError::Custom(CustomContractError::AlreadyUsed))
        );
        claim!(
            host.state()
                .ticket_view(&TOKEN_0)
                .expect_report("Ticket 0 is expected to exist")
                .used,
            "The used flag must never reset"
        );
    }

    /// Verification staff may mark any ticket as used.
    #[concordium_test]
    fn test_use_ticket_by_staff() {
        let mut host = new_host();
        claim_eq!(create_event(&mut host, ORGANIZER_ADDR, &expo_params(10)), Ok(()));
        claim_eq!(mint_ticket(&mut host, BUYER, 0, ticket_price()), Ok(()));
        claim_eq!(mint_ticket(&mut host, BUYER_2, 0, ticket_price()), Ok(()));

        claim_eq!(use_ticket(&mut host, ORGANIZER_ADDR, TOKEN_0), Ok(()));
        claim_eq!(use_ticket(&mut host, ADMIN_ADDR, TOKEN_1), Ok(()));
    }

    /// A caller who is neither the owner nor staff cannot use the ticket.
    #[concordium_test]
    fn test_use_ticket_not_owner() {
        let mut host = new_host();
        claim_eq!(create_event(&mut host, ORGANIZER_ADDR, &expo_params(10)), Ok(()));
        claim_eq!(mint_ticket(&mut host, BUYER, 0, ticket_price()), Ok(()));

        let result = use_ticket(&mut host, VISITOR_ADDR, TOKEN_0);
        claim_eq!(
            result,
            Err(ContractError::Custom(CustomContractError::NotOwner))
        );
        claim!(
            !host
                .state()
                .ticket_view(&TOKEN_0)
                .expect_report("Ticket 0 is expected to exist")
                .used
        );
    }

    /// Test transfer succeeds, moving only the owner field.
    #[concordium_test]
    fn test_transfer_ticket() {
        let mut host = new_host();
        claim_eq!(create_event(&mut host, ORGANIZER_ADDR, &expo_params(10)), Ok(()));
        claim_eq!(mint_ticket(&mut host, BUYER, 0, ticket_price()), Ok(()));

        let transfer: Transfer<ContractTokenId, ContractTokenAmount> = Transfer {
            token_id: TOKEN_0,
            amount: 1.into(),
            from: BUYER_ADDR,
            to: Receiver::from_account(BUYER_2),
            data: AdditionalData::empty(),
        };
        let parameter_bytes = to_bytes(&TransferParams::from(vec![transfer]));
        let mut ctx = new_ctx(BUYER_ADDR);
        ctx.set_parameter(&parameter_bytes);
        let mut logger = TestLogger::init();

        claim_eq!(contract_transfer(&ctx, &mut host, &mut logger), Ok(()));

        let ticket = host
            .state()
            .ticket_view(&TOKEN_0)
            .expect_report("Ticket 0 is expected to exist");
        claim_eq!(ticket.owner, BUYER_2_ADDR);
        claim_eq!(ticket.event_id, 0);
        claim!(!ticket.used);
        claim!(!ticket.locked);

        claim_eq!(host.state().balance_of(&TOKEN_0, &BUYER_ADDR), Ok(0.into()));
        claim_eq!(
            host.state().balance_of(&TOKEN_0, &BUYER_2_ADDR),
            Ok(1.into())
        );

        claim_eq!(logger.logs.len(), 1, "Only one event should be logged");
        claim_eq!(
            logger.logs[0],
            to_bytes(&Cis2Event::Transfer::<ContractTokenId, ContractTokenAmount>(
                TransferEvent {
                    token_id: TOKEN_0,
                    amount: 1.into(),
                    from: BUYER_ADDR,
                    to: BUYER_2_ADDR,
                }
            )),
            "Incorrect event emitted"
        );
    }

    /// A locked ticket rejects the transfer; unlocking and retrying the same
    /// transfer succeeds with every other field preserved.
    #[concordium_test]
    fn test_transfer_locked_ticket() {
        let mut host = new_host();
        claim_eq!(create_event(&mut host, ORGANIZER_ADDR, &expo_params(10)), Ok(()));
        claim_eq!(mint_ticket(&mut host, BUYER, 0, ticket_price()), Ok(()));
        claim_eq!(toggle_lock(&mut host, BUYER_ADDR, TOKEN_0), Ok(()));

        let result = transfer_ticket(&mut host, BUYER_ADDR, TOKEN_0, BUYER_ADDR, BUYER_2);
        claim_eq!(
            result,
            Err(ContractError::Custom(CustomContractError::Locked))
        );
        claim_eq!(
            host.state()
                .ticket_view(&TOKEN_0)
                .expect_report("Ticket 0 is expected to exist")
                .owner,
            BUYER_ADDR,
            "A rejected transfer must not move ownership"
        );

        claim_eq!(toggle_lock(&mut host, BUYER_ADDR, TOKEN_0), Ok(()));
        claim_eq!(
            transfer_ticket(&mut host, BUYER_ADDR, TOKEN_0, BUYER_ADDR, BUYER_2),
            Ok(())
        );

        let ticket = host
            .state()
            .ticket_view(&TOKEN_0)
            .expect_report("Ticket 0 is expected to exist");
        claim_eq!(ticket.owner, BUYER_2_ADDR);
        claim!(!ticket.used);
        claim!(!ticket.locked);
    }

    /// Test transfer fails when the sender is neither the owner nor an
    /// operator of the owner.
    #[concordium_test]
    fn test_transfer_not_authorized() {
        let mut host = new_host();
        claim_eq!(create_event(&mut host, ORGANIZER_ADDR, &expo_params(10)), Ok(()));
        claim_eq!(mint_ticket(&mut host, BUYER, 0, ticket_price()), Ok(()));

        let result = transfer_ticket(&mut host, VISITOR_ADDR, TOKEN_0, BUYER_ADDR, VISITOR);
        claim_eq!(result, Err(ContractError::Unauthorized));
        claim_eq!(
            host.state()
                .ticket_view(&TOKEN_0)
                .expect_report("Ticket 0 is expected to exist")
                .owner,
            BUYER_ADDR
        );
    }

    /// Test transfer succeeds when the sender is an operator of the owner,
    /// and that the lock binds operators all the same.
    #[concordium_test]
    fn test_operator_transfer() {
        let mut host = new_host();
        claim_eq!(create_event(&mut host, ORGANIZER_ADDR, &expo_params(10)), Ok(()));
        claim_eq!(mint_ticket(&mut host, BUYER, 0, ticket_price()), Ok(()));

        let update = UpdateOperator {
            update: OperatorUpdate::Add,
            operator: VISITOR_ADDR,
        };
        let parameter_bytes = to_bytes(&UpdateOperatorParams(vec![update]));
        let mut ctx = new_ctx(BUYER_ADDR);
        ctx.set_parameter(&parameter_bytes);
        let mut logger = TestLogger::init();
        claim_eq!(
            contract_update_operator(&ctx, &mut host, &mut logger),
            Ok(())
        );
        claim!(host.state().is_operator(&VISITOR_ADDR, &BUYER_ADDR));

        // The lock blocks operators exactly as it blocks owners
        claim_eq!(toggle_lock(&mut host, BUYER_ADDR, TOKEN_0), Ok(()));
        let result = transfer_ticket(&mut host, VISITOR_ADDR, TOKEN_0, BUYER_ADDR, VISITOR);
        claim_eq!(
            result,
            Err(ContractError::Custom(CustomContractError::Locked))
        );

        claim_eq!(toggle_lock(&mut host, BUYER_ADDR, TOKEN_0), Ok(()));
        claim_eq!(
            transfer_ticket(&mut host, VISITOR_ADDR, TOKEN_0, BUYER_ADDR, VISITOR),
            Ok(())
        );
        claim_eq!(
            host.state()
                .ticket_view(&TOKEN_0)
                .expect_report("Ticket 0 is expected to exist")
                .owner,
            VISITOR_ADDR
        );
    }

    /// `verifyTicket` reports the door-check fields and fails for ids that
    /// were never assigned.
    #[concordium_test]
    fn test_verify_ticket() {
        let mut host = new_host();
        claim_eq!(create_event(&mut host, ORGANIZER_ADDR, &expo_params(10)), Ok(()));
        claim_eq!(mint_ticket(&mut host, BUYER, 0, ticket_price()), Ok(()));
        claim_eq!(use_ticket(&mut host, ORGANIZER_ADDR, TOKEN_0), Ok(()));

        let parameter_bytes = to_bytes(&TOKEN_0);
        let mut ctx = new_ctx(VISITOR_ADDR);
        ctx.set_parameter(&parameter_bytes);
        let result = contract_verify_ticket(&ctx, &host);
        claim_eq!(
            result,
            Ok(VerificationResult {
                owner: BUYER_ADDR,
                event_id: 0,
                used: true,
                locked: false,
            })
        );

        let parameter_bytes = to_bytes(&TOKEN_1);
        let mut ctx = new_ctx(VISITOR_ADDR);
        ctx.set_parameter(&parameter_bytes);
        let result = contract_verify_ticket(&ctx, &host);
        claim_eq!(result, Err(ContractError::InvalidTokenId));
    }

    /// `getEvent` fails for ids that were never assigned.
    #[concordium_test]
    fn test_get_event_not_found() {
        let host = new_host();

        let parameter_bytes = to_bytes(&0u32);
        let mut ctx = new_ctx(VISITOR_ADDR);
        ctx.set_parameter(&parameter_bytes);
        let result = contract_get_event(&ctx, &host);
        claim_eq!(
            result,
            Err(ContractError::Custom(CustomContractError::NotFound))
        );
    }

    /// `viewEvents` pages through the records in id order.
    #[concordium_test]
    fn test_view_events_pagination() {
        let mut host = new_host();
        for _ in 0..3 {
            claim_eq!(create_event(&mut host, ORGANIZER_ADDR, &expo_params(5)), Ok(()));
        }

        let params = ViewEventsParams { skip: 1, show: 1 };
        let parameter_bytes = to_bytes(&params);
        let mut ctx = new_ctx(VISITOR_ADDR);
        ctx.set_parameter(&parameter_bytes);
        let page = contract_view_events(&ctx, &host).expect_report("Failed to view events");
        claim_eq!(page.len(), 1);
        claim_eq!(page[0].event_id, 1);

        let params = ViewEventsParams { skip: 0, show: 10 };
        let parameter_bytes = to_bytes(&params);
        let mut ctx = new_ctx(VISITOR_ADDR);
        ctx.set_parameter(&parameter_bytes);
        let page = contract_view_events(&ctx, &host).expect_report("Failed to view events");
        claim_eq!(
            page.iter().map(|e| e.event_id).collect::<Vec<_>>(),
            vec![0, 1, 2]
        );
    }

    /// `balanceOf` answers queries in order and rejects unknown tokens.
    #[concordium_test]
    fn test_balance_of_query() {
        let mut host = new_host();
        claim_eq!(create_event(&mut host, ORGANIZER_ADDR, &expo_params(10)), Ok(()));
        claim_eq!(mint_ticket(&mut host, BUYER, 0, ticket_price()), Ok(()));

        let params = BalanceOfQueryParams {
            queries: vec![
                BalanceOfQuery {
                    token_id: TOKEN_0,
                    address: BUYER_ADDR,
                },
                BalanceOfQuery {
                    token_id: TOKEN_0,
                    address: VISITOR_ADDR,
                },
            ],
        };
        let parameter_bytes = to_bytes(&params);
        let mut ctx = new_ctx(VISITOR_ADDR);
        ctx.set_parameter(&parameter_bytes);
        let result = contract_balance_of(&ctx, &host).expect_report("Failed balanceOf query");
        claim_eq!(result.0, vec![1.into(), 0.into()]);

        let params = BalanceOfQueryParams {
            queries: vec![BalanceOfQuery {
                token_id: TOKEN_1,
                address: BUYER_ADDR,
            }],
        };
        let parameter_bytes = to_bytes(&params);
        let mut ctx = new_ctx(VISITOR_ADDR);
        ctx.set_parameter(&parameter_bytes);
        claim_eq!(
            contract_balance_of(&ctx, &host),
            Err(ContractError::InvalidTokenId)
        );
    }

    /// `tokenMetadata` returns the URL stored at mint, with no hash.
    #[concordium_test]
    fn test_token_metadata_query() {
        let mut host = new_host();
        claim_eq!(create_event(&mut host, ORGANIZER_ADDR, &expo_params(10)), Ok(()));
        claim_eq!(mint_ticket(&mut host, BUYER, 0, ticket_price()), Ok(()));

        let params = TokenMetadataQueryParams {
            queries: vec![TOKEN_0],
        };
        let parameter_bytes = to_bytes(&params);
        let mut ctx = new_ctx(VISITOR_ADDR);
        ctx.set_parameter(&parameter_bytes);
        let result =
            contract_token_metadata(&ctx, &host).expect_report("Failed tokenMetadata query");
        claim_eq!(
            result.0,
            vec![MetadataUrl {
                url: "ipfs://QmTicket".to_string(),
                hash: None,
            }]
        );
    }

    /// `getTicket` returns the full record and rejects unknown tokens.
    #[concordium_test]
    fn test_get_ticket_query() {
        let mut host = new_host();
        claim_eq!(create_event(&mut host, ORGANIZER_ADDR, &expo_params(10)), Ok(()));
        claim_eq!(mint_ticket(&mut host, BUYER, 0, ticket_price()), Ok(()));

        let parameter_bytes = to_bytes(&TOKEN_0);
        let mut ctx = new_ctx(VISITOR_ADDR);
        ctx.set_parameter(&parameter_bytes);
        let result = contract_get_ticket(&ctx, &host);
        claim_eq!(
            result,
            Ok(TicketView {
                token_id: TOKEN_0,
                event_id: 0,
                owner: BUYER_ADDR,
                metadata_url: "ipfs://QmTicket".to_string(),
                used: false,
                locked: false,
            })
        );

        let parameter_bytes = to_bytes(&TOKEN_1);
        let mut ctx = new_ctx(VISITOR_ADDR);
        ctx.set_parameter(&parameter_bytes);
        claim_eq!(
            contract_get_ticket(&ctx, &host),
            Err(ContractError::InvalidTokenId)
        );
    }

    /// `operatorOf` answers queries in order.
    #[concordium_test]
    fn test_operator_of_query() {
        let mut host = new_host();

        let update = UpdateOperator {
            update: OperatorUpdate::Add,
            operator: VISITOR_ADDR,
        };
        let parameter_bytes = to_bytes(&UpdateOperatorParams(vec![update]));
        let mut ctx = new_ctx(BUYER_ADDR);
        ctx.set_parameter(&parameter_bytes);
        let mut logger = TestLogger::init();
        claim_eq!(
            contract_update_operator(&ctx, &mut host, &mut logger),
            Ok(())
        );

        let params = OperatorOfQueryParams {
            queries: vec![
                OperatorOfQuery {
                    owner: BUYER_ADDR,
                    address: VISITOR_ADDR,
                },
                OperatorOfQuery {
                    owner: BUYER_ADDR,
                    address: ORGANIZER_ADDR,
                },
            ],
        };
        let parameter_bytes = to_bytes(&params);
        let mut ctx = new_ctx(VISITOR_ADDR);
        ctx.set_parameter(&parameter_bytes);
        let result = contract_operator_of(&ctx, &host).expect_report("Failed operatorOf query");
        claim_eq!(result.0, vec![true, false]);
    }

    /// `setImplementors` is admin-gated and feeds `supports` lookups.
    #[concordium_test]
    fn test_set_implementors_requires_admin() {
        let mut host = new_host();

        let implementor = ContractAddress {
            index: 5,
            subindex: 0,
        };
        let params = SetImplementorsParams {
            id: StandardIdentifierOwned::new_unchecked("CIS-3".to_string()),
            implementors: vec![implementor],
        };
        let parameter_bytes = to_bytes(&params);

        let mut ctx = new_ctx(VISITOR_ADDR);
        ctx.set_parameter(&parameter_bytes);
        claim_eq!(
            contract_set_implementors(&ctx, &mut host),
            Err(ContractError::Custom(CustomContractError::Unauthorized))
        );

        let mut ctx = new_ctx(ADMIN_ADDR);
        ctx.set_parameter(&parameter_bytes);
        claim_eq!(contract_set_implementors(&ctx, &mut host), Ok(()));

        let query = SupportsQueryParams {
            queries: vec![StandardIdentifierOwned::new_unchecked("CIS-3".to_string())],
        };
        let parameter_bytes = to_bytes(&query);
        let mut ctx = new_ctx(VISITOR_ADDR);
        ctx.set_parameter(&parameter_bytes);
        let result = contract_supports(&ctx, &host).expect_report("Failed supports query");
        claim_eq!(result.results, vec![SupportResult::SupportBy(vec![implementor])]);
    }

    /// The contract reports support for the standards it implements.
    #[concordium_test]
    fn test_supports_query() {
        let host = new_host();

        let params = SupportsQueryParams {
            queries: vec![
                StandardIdentifierOwned::new_unchecked("CIS-0".to_string()),
                StandardIdentifierOwned::new_unchecked("CIS-2".to_string()),
                StandardIdentifierOwned::new_unchecked("CIS-5".to_string()),
            ],
        };
        let parameter_bytes = to_bytes(&params);
        let mut ctx = new_ctx(VISITOR_ADDR);
        ctx.set_parameter(&parameter_bytes);
        let result = contract_supports(&ctx, &host).expect_report("Failed supports query");
        claim_eq!(
            result.results,
            vec![
                SupportResult::Support,
                SupportResult::Support,
                SupportResult::NoSupport,
            ]
        );
    }
}
