//! Source of the current turn order.

use std::sync::RwLock;
use turnhook_core::Combatant;

/// Supplies the roster in turn order at the moment of a dispatch.
///
/// The host's combat tracker implements this. Closures returning a roster
/// work too.
pub trait OrderProvider: Send + Sync {
    fn current_order(&self) -> Vec<Combatant>;
}

impl<F> OrderProvider for F
where
    F: Fn() -> Vec<Combatant> + Send + Sync,
{
    fn current_order(&self) -> Vec<Combatant> {
        self()
    }
}

/// An in-memory roster the host overwrites before each notification.
#[derive(Debug, Default)]
pub struct SharedOrder {
    order: RwLock<Vec<Combatant>>,
}

impl SharedOrder {
    pub fn new(order: Vec<Combatant>) -> Self {
        Self {
            order: RwLock::new(order),
        }
    }

    pub fn set_order(&self, order: Vec<Combatant>) {
        match self.order.write() {
            Ok(mut guard) => *guard = order,
            Err(poisoned) => *poisoned.into_inner() = order,
        }
    }
}

impl OrderProvider for SharedOrder {
    fn current_order(&self) -> Vec<Combatant> {
        match self.order.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}
