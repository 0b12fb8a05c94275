use crate::deal::Deal;
use crate::error::UndoError;
use tracing::debug;

/// Takes back the last `count` actions, card plays first and then calls.
///
/// A card play and a call weigh one action each. Emptying the trick in
/// progress reopens the trick before it; running out of cards continues
/// into the auction and drops the contract once its closing pass is gone.
/// An accepted claim is withdrawn without using up any of `count`.
///
/// Asking for more than the deal has recorded fails and leaves `deal`
/// untouched.
pub fn undo(deal: &mut Deal, count: u32) -> Result<(), UndoError> {
    let recorded = deal.total_actions();
    if count as usize > recorded {
        return Err(UndoError::Exceeds {
            requested: count,
            recorded,
        });
    }
    if count == 0 {
        return Ok(());
    }

    if let Some(claim) = deal.withdraw_claim() {
        debug!(claimer = %claim.claimer, tricks = claim.tricks_claimed, "claim withdrawn by undo");
    }
    for _ in 0..count {
        if let Some((seat, card)) = deal.pop_card() {
            debug!(%seat, %card, "card taken back");
        } else if let Some(call) = deal.pop_call() {
            debug!(call = %call.render(), "call taken back");
        }
    }
    Ok(())
}
