// Path: crates/agora-consensus/src/external.rs
//! Capability interfaces the engine is constructed with, but never stores.
//!
//! The engine owns its durable store exclusively; everything else it needs
//! to evaluate an enrollment is borrowed for the duration of a single `add`
//! call, never held across calls and never reached through global state.

use agora_types::{Amount, Hash, PublicKey};

/// The kind of output recorded at a UTXO, as seen by the enrollment
/// validator. Only freeze outputs may back an enrollment.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UtxoKind {
    /// An output locking coins for the duration of a validator enrollment.
    Freeze,
    /// Any other output kind; never eligible for enrollment.
    Ordinary,
}

/// A UTXO as resolved through the external [`UtxoView`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Utxo {
    /// The output's kind.
    pub kind: UtxoKind,
    /// The coin value locked at this output.
    pub value: Amount,
    /// The single public key authorised to spend this output.
    pub owner: PublicKey,
}

/// Read-only, idempotent access to the UTXO set. The engine never mutates
/// this view; it is consulted once per `add` call to resolve the freeze
/// output backing a candidate enrollment.
pub trait UtxoView {
    /// Looks up the UTXO identified by `utxo_key`, if it is currently
    /// unspent.
    fn peek_utxo(&self, utxo_key: &Hash) -> Option<Utxo>;
}

/// Supplies the size of the penalty deposit associated with a slashed
/// enrollment, so the engine can tell whether a prior slashing's penalty has
/// been consumed before permitting re-enrollment of the same UTXO.
pub trait PenaltyDepositProvider {
    /// Returns the outstanding penalty deposit for `utxo_key`. A zero amount
    /// means the deposit has been fully consumed (spent or burned)
    /// elsewhere in the ledger.
    fn penalty_deposit(&self, utxo_key: &Hash) -> Amount;
}
