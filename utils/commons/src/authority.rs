use crate::CustomContractError;
use concordium_std::*;

#[derive(Debug, Serial, DeserialWithState, StateClone)]
#[concordium(state_parameter = "S")]
pub struct Authority<S: HasStateApi> {
    /// Trusted addresses that are allowed to manage role membership and
    /// moderate any event
    admins: StateSet<Address, S>,
    /// Addresses that are allowed to create and manage their own events
    organizers: StateSet<Address, S>,
}

impl<S: HasStateApi> Authority<S> {
    /// Create the role registry with `admin` as the only member. The instance
    /// creator is passed here, so an instance always has exactly one admin at
    /// the start.
    pub fn new(state_builder: &mut StateBuilder<S>, admin: Address) -> Self {
        let mut admins = state_builder.new_set();
        admins.insert(admin);
        Self {
            admins,
            organizers: state_builder.new_set(),
        }
    }

    pub fn has_admin_rights(&self, address: &Address) -> bool {
        self.admins.contains(address)
    }

    /// Event management rights. Admins are allowed everything organizers are.
    pub fn has_organizer_rights(&self, address: &Address) -> bool {
        self.organizers.contains(address) || self.has_admin_rights(address)
    }

    /// Exact membership lookup, with no admin fallback for the organizer
    /// list. This is the query behind the `hasRole` entrypoint.
    pub fn has_role(&self, field: &AuthorityField, address: &Address) -> bool {
        match field {
            AuthorityField::Admin => self.admins.contains(address),
            AuthorityField::Organizer => self.organizers.contains(address),
        }
    }

    /// Both role lists are managed by admins only. Adding a present member or
    /// removing a missing one is a no-op success.
    pub fn handle_update(
        &mut self,
        sender: Address,
        update: AuthorityUpdateParams,
    ) -> Result<(), Reject> {
        ensure!(
            self.has_admin_rights(&sender),
            CustomContractError::Unauthorized.into()
        );

        let address_list = match update.field {
            AuthorityField::Admin => &mut self.admins,
            AuthorityField::Organizer => &mut self.organizers,
        };

        match update.kind {
            AuthorityUpdateKind::Remove => {
                address_list.remove(&update.address);
            }
            AuthorityUpdateKind::Add => {
                address_list.insert(update.address);
            }
        }

        Ok(())
    }

    pub fn handle_view(&self, view: AuthorityViewParams) -> Vec<Address> {
        let address_list = match view.field {
            AuthorityField::Admin => &self.admins,
            AuthorityField::Organizer => &self.organizers,
        };

        let address_vec = address_list
            .iter()
            .skip(view.skip as usize)
            .take(view.show as usize)
            .map(|a| *a)
            .collect();

        address_vec
    }
}

#[derive(Debug, SchemaType, Serialize)]
pub enum AuthorityField {
    Admin,
    Organizer,
}

#[derive(Debug, SchemaType, Serialize)]
pub enum AuthorityUpdateKind {
    Remove,
    Add,
}

#[derive(Debug, SchemaType, Serialize)]
pub struct AuthorityUpdateParams {
    pub field: AuthorityField,
    pub kind: AuthorityUpdateKind,
    pub address: Address,
}

#[derive(Debug, SchemaType, Serialize)]
pub struct AuthorityViewParams {
    pub field: AuthorityField,
    pub skip: u32,
    pub show: u32,
}

#[derive(Debug, SchemaType, Serialize)]
pub struct HasRoleParams {
    pub field: AuthorityField,
    pub address: Address,
}

#[concordium_cfg_test]
mod tests {
    use super::*;
    use concordium_std::test_infrastructure::*;

    const ADMIN_ACCOUNT: AccountAddress = AccountAddress([1; 32]);
    const ADMIN_CONTRACT: ContractAddress = ContractAddress {
        index: 1,
        subindex: 1,
    };

    const ORGANIZER_ACCOUNT: AccountAddress = AccountAddress([2; 32]);

    const USER_1: AccountAddress = AccountAddress([16; 32]);
    const USER_2: AccountAddress = AccountAddress([17; 32]);

    fn default_authority() -> Authority<TestStateApi> {
        let mut state_builder = TestStateBuilder::new();

        let mut authority = Authority::new(&mut state_builder, Address::Account(ADMIN_ACCOUNT));
        authority.admins.insert(Address::Contract(ADMIN_CONTRACT));

        authority
            .organizers
            .insert(Address::Account(ORGANIZER_ACCOUNT));

        authority
    }

    #[concordium_test]
    fn test_new_authority_bootstraps_admin() {
        let mut state_builder = TestStateBuilder::new();
        let authority = Authority::new(&mut state_builder, Address::Account(ADMIN_ACCOUNT));

        claim!(authority.has_admin_rights(&Address::Account(ADMIN_ACCOUNT)));
        claim!(authority.has_organizer_rights(&Address::Account(ADMIN_ACCOUNT)));
        claim!(authority.has_role(
            &AuthorityField::Admin,
            &Address::Account(ADMIN_ACCOUNT)
        ));
        // Admin rights imply organizer rights, but not organizer membership
        claim!(!authority.has_role(
            &AuthorityField::Organizer,
            &Address::Account(ADMIN_ACCOUNT)
        ));
    }

    #[concordium_test]
    fn test_update_authority_add_new_admin() {
        let mut authority = default_authority();

        let result = authority.handle_update(
            Address::Account(ADMIN_ACCOUNT),
            AuthorityUpdateParams {
                field: AuthorityField::Admin,
                kind: AuthorityUpdateKind::Add,
                address: Address::Account(USER_1),
            },
        );
        claim_eq!(result, Ok(()));
        claim!(authority.has_admin_rights(&Address::Account(USER_1)));
        claim!(authority.has_organizer_rights(&Address::Account(USER_1)));

        let result = authority.handle_update(
            Address::Account(ORGANIZER_ACCOUNT),
            AuthorityUpdateParams {
                field: AuthorityField::Admin,
                kind: AuthorityUpdateKind::Add,
                address: Address::Account(USER_2),
            },
        );
        claim_eq!(result, Err(CustomContractError::Unauthorized.into()));
        claim!(!authority.has_admin_rights(&Address::Account(USER_2)));
        claim!(!authority.has_organizer_rights(&Address::Account(USER_2)));
    }

    #[concordium_test]
    fn test_update_authority_add_new_organizer() {
        let mut authority = default_authority();

        let result = authority.handle_update(
            Address::Account(ADMIN_ACCOUNT),
            AuthorityUpdateParams {
                field: AuthorityField::Organizer,
                kind: AuthorityUpdateKind::Add,
                address: Address::Account(USER_1),
            },
        );
        claim_eq!(result, Ok(()));
        claim!(!authority.has_admin_rights(&Address::Account(USER_1)));
        claim!(authority.has_organizer_rights(&Address::Account(USER_1)));
        claim!(authority.has_role(&AuthorityField::Organizer, &Address::Account(USER_1)));

        let result = authority.handle_update(
            Address::Contract(ADMIN_CONTRACT),
            AuthorityUpdateParams {
                field: AuthorityField::Organizer,
                kind: AuthorityUpdateKind::Add,
                address: Address::Account(USER_2),
            },
        );
        claim_eq!(result, Ok(()));
        claim!(authority.has_organizer_rights(&Address::Account(USER_2)));

        // Organizers are not allowed to extend the organizer list
        let result = authority.handle_update(
            Address::Account(ORGANIZER_ACCOUNT),
            AuthorityUpdateParams {
                field: AuthorityField::Organizer,
                kind: AuthorityUpdateKind::Add,
                address: Address::Account(USER_2),
            },
        );
        claim_eq!(result, Err(CustomContractError::Unauthorized.into()));
    }

    #[concordium_test]
    fn test_update_authority_add_existing_organizer() {
        let mut authority = default_authority();

        let result = authority.handle_update(
            Address::Account(ADMIN_ACCOUNT),
            AuthorityUpdateParams {
                field: AuthorityField::Organizer,
                kind: AuthorityUpdateKind::Add,
                address: Address::Account(ORGANIZER_ACCOUNT),
            },
        );
        // No change or error expected
        claim_eq!(result, Ok(()));
        claim!(authority.has_role(
            &AuthorityField::Organizer,
            &Address::Account(ORGANIZER_ACCOUNT)
        ));
        claim_eq!(
            authority.handle_view(AuthorityViewParams {
                field: AuthorityField::Organizer,
                skip: 0,
                show: 10,
            }),
            vec![Address::Account(ORGANIZER_ACCOUNT)]
        );
    }

    #[concordium_test]
    fn test_update_authority_remove_existing_admin() {
        let mut authority = default_authority();

        let result = authority.handle_update(
            Address::Account(ADMIN_ACCOUNT),
            AuthorityUpdateParams {
                field: AuthorityField::Admin,
                kind: AuthorityUpdateKind::Remove,
                address: Address::Contract(ADMIN_CONTRACT),
            },
        );
        claim_eq!(result, Ok(()));
        claim!(!authority.has_admin_rights(&Address::Contract(ADMIN_CONTRACT)));
        claim!(!authority.has_organizer_rights(&Address::Contract(ADMIN_CONTRACT)));

        let result = authority.handle_update(
            Address::Account(ORGANIZER_ACCOUNT),
            AuthorityUpdateParams {
                field: AuthorityField::Admin,
                kind: AuthorityUpdateKind::Remove,
                address: Address::Account(ADMIN_ACCOUNT),
            },
        );
        claim_eq!(result, Err(CustomContractError::Unauthorized.into()));
        claim!(authority.has_admin_rights(&Address::Account(ADMIN_ACCOUNT)));
    }

    #[concordium_test]
    fn test_update_authority_remove_existing_organizer() {
        let mut authority = default_authority();

        let result = authority.handle_update(
            Address::Account(ADMIN_ACCOUNT),
            AuthorityUpdateParams {
                field: AuthorityField::Organizer,
                kind: AuthorityUpdateKind::Remove,
                address: Address::Account(ORGANIZER_ACCOUNT),
            },
        );
        claim_eq!(result, Ok(()));
        claim!(!authority.has_organizer_rights(&Address::Account(ORGANIZER_ACCOUNT)));

        // Organizers cannot shrink the list either, even for themselves
        let mut authority = default_authority();
        let result = authority.handle_update(
            Address::Account(ORGANIZER_ACCOUNT),
            AuthorityUpdateParams {
                field: AuthorityField::Organizer,
                kind: AuthorityUpdateKind::Remove,
                address: Address::Account(ORGANIZER_ACCOUNT),
            },
        );
        claim_eq!(result, Err(CustomContractError::Unauthorized.into()));
        claim!(authority.has_organizer_rights(&Address::Account(ORGANIZER_ACCOUNT)));
    }

    #[concordium_test]
    fn test_update_authority_remove_missing_member() {
        let mut authority = default_authority();

        let result = authority.handle_update(
            Address::Account(ADMIN_ACCOUNT),
            AuthorityUpdateParams {
                field: AuthorityField::Organizer,
                kind: AuthorityUpdateKind::Remove,
                address: Address::Account(USER_1),
            },
        );
        // No change or error expected
        claim_eq!(result, Ok(()));
        claim!(!authority.has_organizer_rights(&Address::Account(USER_1)));

        let result = authority.handle_update(
            Address::Account(ADMIN_ACCOUNT),
            AuthorityUpdateParams {
                field: AuthorityField::Admin,
                kind: AuthorityUpdateKind::Remove,
                address: Address::Account(USER_1),
            },
        );
        // No change or error expected
        claim_eq!(result, Ok(()));
        claim!(!authority.has_admin_rights(&Address::Account(USER_1)));
    }

    #[concordium_test]
    fn test_view_authority_organizers() {
        let mut authority = default_authority();

        let mut organizer_set = (16u8..=255u8)
            .map(|n| {
                if n % 2 == 0 {
                    Address::Contract(ContractAddress {
                        index: n as u64,
                        subindex: 0,
                    })
                } else {
                    Address::Account(AccountAddress([n; 32]))
                }
            })
            .chain([Address::Account(ORGANIZER_ACCOUNT)])
            .collect::<HashSet<_>>();

        for organizer in organizer_set.iter() {
            authority.organizers.insert(*organizer);
        }

        let mut num_seen = 0;
        let increment = 30;
        loop {
            let returned_addresses = authority.handle_view(AuthorityViewParams {
                field: AuthorityField::Organizer,
                skip: num_seen,
                show: increment,
            });

            for addr in returned_addresses.iter() {
                // Check if the entry was present and remove it from the set. After the loop check that all addresses
                // were shown by confirming that `organizer_set` is empty
                claim!(organizer_set.remove(addr));
            }

            // If returned address count is less than `show`, no more addresses will be returned in future iterations
            if returned_addresses.len() != increment as usize {
                break;
            }
            num_seen += increment;
        }

        // All addresses must have been removed in the loop
        claim!(organizer_set.is_empty());
    }
}
