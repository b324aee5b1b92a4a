//! The component model shared by every screen and editor.
//!
//! A component is a value. Handling an action never mutates it: `reduce`
//! returns the next state, and `view` describes what to render for the current
//! state. On error the caller keeps the state it already has, so a rejected
//! action is never partially applied.

use crate::config::CoreConfig;
use crate::CoreResult;
use chrono::NaiveDate;
use obgyn_ids::{EntryId, IdGenerator, IdPrefix};

/// Inputs a reduction may need beyond the state and the action.
///
/// Holding the id generator and the current date here keeps reductions
/// deterministic under test.
pub struct Context {
    ids: Box<dyn IdGenerator>,
    today: NaiveDate,
}

impl Context {
    pub fn new(ids: Box<dyn IdGenerator>, today: NaiveDate) -> Self {
        Self { ids, today }
    }

    /// A context using the id strategy of `config`.
    pub fn from_config(config: &CoreConfig, today: NaiveDate) -> Self {
        Self::new(config.id_generator(), today)
    }

    pub fn next_id(&mut self, prefix: IdPrefix) -> EntryId {
        self.ids.next_id(prefix)
    }

    /// Keep `id`, already present in loaded data, from being handed out.
    pub fn reserve_id(&mut self, id: &EntryId) {
        self.ids.reserve(id);
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    /// Move the session to another day.
    pub fn set_today(&mut self, today: NaiveDate) {
        self.today = today;
    }
}

/// A state machine with a render description.
pub trait Component: Sized {
    type Action;
    type View;

    /// The state after `action`.
    ///
    /// # Errors
    ///
    /// Returns an error if the action is not valid in the current state; the
    /// current state stays valid and unchanged.
    fn reduce(&self, action: Self::Action, ctx: &mut Context) -> CoreResult<Self>;

    /// What to render for the current state.
    fn view(&self) -> Self::View;
}

/// Apply one action and describe the result.
///
/// This is the (state, action) to (state, view) step the display layer drives.
pub fn step<C: Component>(
    state: &C,
    action: C::Action,
    ctx: &mut Context,
) -> CoreResult<(C, C::View)> {
    let next = state.reduce(action, ctx)?;
    let view = next.view();
    Ok((next, view))
}
