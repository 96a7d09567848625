//! An event ticketing smart contract implementing the Concordium Token
//! Standard CIS2.
//!
//! # Description
//! An instance of this smart contract keeps a registry of events and a
//! registry of tickets minted for them. Each ticket is a unique CIS2 token,
//! owned by the account that bought it and transferable with the standard
//! `transfer` function, unless its owner locked it.
//!
//! Role membership is managed through two lists: admins and organizers. The
//! account creating the instance becomes the first admin and is the only
//! kind of member allowed to change either list. Organizers (and admins)
//! create events; anyone can buy a ticket for an active event by attaching
//! at least the ticket price, which is forwarded to the event organizer.
//! Overpayment is refunded in the same transaction.
//!
//! A ticket is marked as used exactly once, either by its owner or by
//! verification staff (organizers and admins). Used tickets stay in the
//! registry and remain transferable, but their lock can no longer change.

#![cfg_attr(not(feature = "std"), no_std)]

mod contract;
mod events;
mod external;
mod state;
